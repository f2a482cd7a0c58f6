//////////////////////////////////////////////////////////////////////
// json output of a finished tiling

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::errors::*;
use crate::params::{Params, View};
use crate::tiling::Tiling;
use crate::Point2d;

fn xy(p: &Point2d) -> [f64; 2] {
    [p.x, p.y]
}

#[derive(Debug, Serialize)]
pub struct LineRecord {
    pub angle: usize,
    pub n: i64,
    pub index: f64
}

#[derive(Debug, Serialize)]
pub struct TileRecord {
    pub key: String,
    pub origin: [f64; 2],
    pub lines: Vec<LineRecord>,
    pub dual_pts: Vec<[f64; 2]>,
    pub mean: [f64; 2],
    pub area: String,
    pub angles: String,
    pub num_vertices: usize,
    pub fill: String
}

#[derive(Debug, Serialize)]
pub struct PaletteRecord {
    pub key: String,
    pub fill: String,
    pub area: String,
    pub angles: String,
    pub num_vertices: usize,
    pub points: Vec<[f64; 2]>
}

#[derive(Debug, Serialize)]
pub struct TilingRecord {
    pub symmetry: usize,
    pub steps: usize,
    pub view: [f64; 2],
    pub offsets: Vec<f64>,
    pub palette: Vec<PaletteRecord>,
    pub tiles: Vec<TileRecord>
}

impl TilingRecord {

    pub fn new(tiling: &Tiling, params: &Params, view: &View) -> Self {

        let palette = tiling.palette.entries.iter().map(|e| PaletteRecord {
            key: e.key.clone(),
            fill: e.fill.clone(),
            area: e.area.clone(),
            angles: e.angles.clone(),
            num_vertices: e.num_vertices,
            points: e.points.iter().map(xy).collect()
        }).collect();

        let tiles = tiling.tiles.iter().map(|t| TileRecord {
            key: t.key.to_string(),
            origin: [t.x, t.y],
            lines: t.lines.iter().map(
                |l| LineRecord { angle: l.angle, n: l.n, index: l.index }
            ).collect(),
            dual_pts: t.dual_pts.iter().map(xy).collect(),
            mean: xy(&t.mean),
            area: t.area.clone(),
            angles: t.angle_signature.clone(),
            num_vertices: t.num_vertices,
            fill: t.fill.clone()
        }).collect();

        TilingRecord {
            symmetry: params.symmetry,
            steps: tiling.families.steps,
            view: [view.width, view.height],
            offsets: tiling.families.offsets.clone(),
            palette: palette,
            tiles: tiles
        }

    }

}

pub fn to_json(tiling: &Tiling, params: &Params, view: &View) -> Result<String> {
    Ok(serde_json::to_string_pretty(&TilingRecord::new(tiling, params, view))?)
}

pub fn write_json(path: &Path,
                  tiling: &Tiling,
                  params: &Params,
                  view: &View) -> Result<()> {

    let f = File::create(path).chain_err(|| format!("creating {:}", path.display()))?;
    let mut writer = BufWriter::new(f);

    serde_json::to_writer_pretty(&mut writer, &TilingRecord::new(tiling, params, view))?;
    writer.write_all(b"\n")?;

    Ok(())

}
