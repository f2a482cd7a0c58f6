//////////////////////////////////////////////////////////////////////
// prototile classes and their colors

use std::collections::{HashMap, HashSet};

use log::debug;

use crate::color::{hsluv_to_rgb, lerp, Rgb8};
use crate::dual::Tile;
use crate::errors::*;
use crate::params::Params;
use crate::Point2d;

//////////////////////////////////////////////////////////////////////

/// What makes two tiles the same prototile.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ClassMode {
    Area,        // same shape, any orientation
    Orientation  // same shape and same edge directions
}

impl ClassMode {

    pub fn from_params(params: &Params) -> Self {
        if params.orientation_coloring {
            ClassMode::Orientation
        } else {
            ClassMode::Area
        }
    }

    pub fn key<'a>(&self, tile: &'a Tile) -> &'a str {
        match self {
            ClassMode::Area => tile.area.as_str(),
            ClassMode::Orientation => tile.angle_signature.as_str()
        }
    }

}

/// One prototile class, with a swatch shape for legends.
#[derive(Debug, Clone, PartialEq)]
pub struct PaletteEntry {
    pub key: String,
    pub fill: String,
    pub rgb: Rgb8,
    pub points: Vec<Point2d>, // representative shape, centered, unit longest diagonal
    pub area: String,
    pub angles: String,
    pub num_vertices: usize
}

#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    pub mode: ClassMode,
    pub entries: Vec<PaletteEntry>,
    lookup: HashMap<String, usize>
}

// center a polygon on its mean and scale its longest
// vertex-to-vertex distance to 1
pub fn normalize(points: &[Point2d]) -> Vec<Point2d> {

    let n = points.len();

    let mut dist: f64 = 0.0;

    for i in 0..n {
        for j in i..n {
            dist = dist.max((points[j] - points[i]).norm());
        }
    }

    let mean = crate::dual::centroid(points);

    if dist == 0.0 {
        return vec![Point2d::origin(); n];
    }

    points.iter().map(|p| Point2d::from((p - mean) / dist)).collect()

}

// ramp endpoints (hue, saturation, lightness)
pub fn ramp_endpoints(params: &Params) -> ([f64; 3], [f64; 3]) {

    let lightness = 50.0;

    let start = [params.hue + params.hue_range, params.sat, lightness + params.contrast];
    let end = [params.hue - params.hue_range, params.sat, lightness - params.contrast];

    (start, end)

}

// n colors evenly spread from start to end
pub fn color_ramp(params: &Params, n: usize) -> Vec<Rgb8> {

    let (start, end) = ramp_endpoints(params);

    let range = if n > 1 { (n - 1) as f64 } else { 1.0 };

    (0..n).map(|i| {

        let t = i as f64 / range;

        let h = lerp(start[0], end[0], t) % 360.0;
        let s = lerp(start[1], end[1], t);
        let l = lerp(start[2], end[2], t);

        Rgb8::from_unit(hsluv_to_rgb(h, s, l))

    }).collect()

}

impl Palette {

    /// Pick one representative per class, order the classes by vertex
    /// count and spread the color ramp across them.
    pub fn classify(tiles: &[Tile], params: &Params) -> Palette {

        let mode = ClassMode::from_params(params);

        let mut reps: Vec<&Tile> = Vec::new();
        let mut seen: HashSet<&str> = HashSet::new();

        for tile in tiles {
            if seen.insert(mode.key(tile)) {
                reps.push(tile);
            }
        }

        // stable, so ties stay in first-seen order
        reps.sort_by_key(|t| t.num_vertices);

        let mut colors = color_ramp(params, reps.len());

        // the colors flip, the class order does not
        if params.reverse_colors {
            colors.reverse();
        }

        let mut entries = Vec::with_capacity(reps.len());
        let mut lookup = HashMap::new();

        for (tile, rgb) in reps.iter().zip(colors.into_iter()) {

            let key = mode.key(tile).to_string();

            lookup.insert(key.clone(), entries.len());

            entries.push(PaletteEntry {
                key: key,
                fill: rgb.to_hex(),
                rgb: rgb,
                points: normalize(&tile.dual_pts),
                area: tile.area.clone(),
                angles: tile.angle_signature.clone(),
                num_vertices: tile.num_vertices
            });

        }

        debug!("classified {:} tiles into {:} prototiles by {:?}",
               tiles.len(), entries.len(), mode);

        Palette { mode: mode, entries: entries, lookup: lookup }

    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entry_for(&self, tile: &Tile) -> Result<&PaletteEntry> {

        let key = self.mode.key(tile);

        match self.lookup.get(key) {
            Some(&i) => Ok(&self.entries[i]),
            None => bail!(ErrorKind::MissingPrototileColor(key.to_string()))
        }

    }

    /// Write every tile's class color into its `fill`.
    pub fn paint(&self, tiles: &mut [Tile]) -> Result<()> {

        for tile in tiles.iter_mut() {
            let fill = self.entry_for(tile)?.fill.clone();
            tile.fill = fill;
        }

        Ok(())

    }

}
