//////////////////////////////////////////////////////////////////////
// how each tile gets painted, independent of any drawing backend

use crate::color::Rgb8;
use crate::dual::Tile;
use crate::errors::*;
use crate::palette::Palette;
use crate::params::{Params, View};
use crate::pick::{highlight, Selection};

pub const BACKGROUND: Rgb8 = Rgb8 { r: 0, g: 0, b: 51 };
pub const SELECTED: Rgb8 = Rgb8 { r: 128, g: 215, b: 255 };
pub const SELECTED_OUTLINE_MODE: Rgb8 = Rgb8 { r: 110, g: 110, b: 255 };
pub const ON_LINE: Rgb8 = Rgb8 { r: 0, g: 255, b: 0 };
pub const ON_LINES: Rgb8 = Rgb8 { r: 60, g: 179, b: 113 };
pub const OUTLINE: Rgb8 = Rgb8 { r: 0, g: 255, b: 0 };

// translucent line highlight when tiles are only outlined
const OUTLINE_MODE_ALPHA: f64 = 150.0 / 255.0;

#[derive(Debug, PartialEq, Clone, Copy)]
pub struct TileStyle {
    pub fill: Option<(Rgb8, f64)>, // color, alpha
    pub stroke: Option<Rgb8>
}

// thin lines when zoomed out, never more than a pixel
pub fn line_width(params: &Params, view: &View) -> f64 {
    (params.pre_factor(view).sqrt() / 4.5).min(1.0)
}

/// Fill and outline for one tile: class color first, then line
/// highlights, then selection on top.
pub fn tile_style(tile: &Tile,
                  palette: &Palette,
                  params: &Params,
                  selection: &Selection) -> Result<TileStyle> {

    let hl = highlight(tile, selection);

    let on_lines = match hl.selected_lines {
        0 => None,
        1 => Some(ON_LINE),
        _ => Some(ON_LINES)
    };

    let style = if params.color_tiles {

        let mut fill = palette.entry_for(tile)?.rgb;

        if let Some(c) = on_lines {
            fill = c;
        }

        if hl.selected {
            fill = SELECTED;
        }

        let stroke = if params.show_stroke {
            Some(Rgb8::new(params.stroke, params.stroke, params.stroke))
        } else {
            None
        };

        TileStyle { fill: Some((fill, 1.0)), stroke: stroke }

    } else {

        let mut fill = on_lines.map(|c| (c, OUTLINE_MODE_ALPHA));

        if hl.selected {
            fill = Some((SELECTED_OUTLINE_MODE, 1.0));
        }

        TileStyle { fill: fill, stroke: Some(OUTLINE) }

    };

    Ok(style)

}
