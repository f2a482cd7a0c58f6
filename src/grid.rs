//////////////////////////////////////////////////////////////////////
// line families of the multigrid
//
// family i has unit normal e_i = (cos(i m), sin(i m)) with m = 2 pi / S,
// and its lines are { p : p . e_i = n + frac(offset_i) }

use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::errors::*;
use crate::params::Params;

//////////////////////////////////////////////////////////////////////

// (family, strip number)
pub type LineId = (usize, i64);

/// One line of the multigrid.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct GridLine {
    pub angle: usize, // family (direction) index in [0, S)
    pub n: i64,       // strip number, centered on 0
    pub index: f64    // n + frac(offset[angle])
}

impl GridLine {

    // identity of the line, independent of its offset
    pub fn id(&self) -> LineId {
        (self.angle, self.n)
    }

}

#[derive(Debug, PartialEq, Clone, Copy)]
pub struct SinCos {
    pub sin: f64,
    pub cos: f64
}

impl SinCos {

    pub fn of(angle: f64) -> Self {
        SinCos { sin: angle.sin(), cos: angle.cos() }
    }

}

//////////////////////////////////////////////////////////////////////

/// All line families for one set of parameters, plus the lookup
/// tables the later stages share.
#[derive(Debug, Clone)]
pub struct LineFamilies {
    pub symmetry: usize,
    pub steps: usize,
    pub multiplier: f64,
    pub sin_cos: Vec<SinCos>, // per family
    pub shift: Vec<f64>,      // per family, cos(i m + rotate)
    pub offsets: Vec<f64>,    // per family phase
    pub lines: Vec<GridLine>  // family-major, center-out within a family
}

// n values of a family ordered by |n|, so that lines near the
// center come first: 0, -1, 1, -2, 2, ...
pub fn centered_window(steps: usize) -> Vec<i64> {

    let half = (steps as i64 - 1) / 2;

    let mut window: Vec<i64> = (-half..=half).collect();

    // stable, so -k stays ahead of k
    window.sort_by_key(|n| n.abs());

    window

}

// sin/cos of every family direction
pub fn sin_cos_table(symmetry: usize, multiplier: f64) -> Vec<SinCos> {
    (0..symmetry).map(|i| SinCos::of(i as f64 * multiplier)).collect()
}

// cosine difference formula with the lookup table
pub fn shift_table(table: &[SinCos], rotate: f64) -> Vec<f64> {

    let r = SinCos::of(rotate);

    table.iter().map(|e| e.cos * r.cos - e.sin * r.sin).collect()

}

// seed depends only on (symmetry, seed) so that recomputing never
// depends on what was computed before
pub fn disorder_rng(symmetry: usize, seed: f64) -> StdRng {

    let mixed = (symmetry as u64).rotate_left(32) ^ seed.to_bits();

    StdRng::seed_from_u64(mixed)

}

/// Per-family phases: common pattern phase, optional jitter, optional pan.
pub fn family_offsets(params: &Params, steps: usize, shift: &[f64]) -> Vec<f64> {

    let mut offsets = vec![params.pattern; params.symmetry];

    if params.disorder > 0.0 {

        let mut rng = disorder_rng(params.symmetry, params.random_seed);

        for o in offsets.iter_mut() {
            *o += params.disorder * (rng.gen::<f64>() - 0.5);
        }

    }

    if params.pan > 0.0 {

        for (o, s) in offsets.iter_mut().zip(shift.iter()) {
            *o -= (steps as f64) * params.pan * s;
        }

    }

    offsets

}

impl LineFamilies {

    /// Build every family from validated parameters.
    pub fn new(params: &Params) -> Result<LineFamilies> {

        if params.symmetry < 3 {
            bail!(ErrorKind::InvalidConfiguration(
                format!("symmetry must be at least 3, got {:}", params.symmetry)));
        }

        let steps = params.steps();

        if steps < 1 || steps % 2 == 0 {
            bail!(ErrorKind::InvalidConfiguration(
                format!("steps must be odd and positive, got {:}", steps)));
        }

        let steps = steps as usize;
        let multiplier = params.multiplier();

        let sin_cos = sin_cos_table(params.symmetry, multiplier);
        let shift = shift_table(&sin_cos, params.rotate_rad());
        let offsets = family_offsets(params, steps, &shift);

        let window = centered_window(steps);

        let mut lines = Vec::with_capacity(params.symmetry * steps);

        for (angle, offset) in offsets.iter().enumerate() {
            for &n in &window {
                lines.push(GridLine {
                    angle: angle,
                    n: n,
                    index: n as f64 + (offset % 1.0)
                });
            }
        }

        debug!("built {:} families x {:} lines", params.symmetry, steps);

        Ok(LineFamilies {
            symmetry: params.symmetry,
            steps: steps,
            multiplier: multiplier,
            sin_cos: sin_cos,
            shift: shift,
            offsets: offsets,
            lines: lines
        })

    }

    // lines belonging to one family
    pub fn family(&self, angle: usize) -> &[GridLine] {
        &self.lines[angle * self.steps..(angle + 1) * self.steps]
    }

}
