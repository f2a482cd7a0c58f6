//////////////////////////////////////////////////////////////////////
// reference renderer: draws a tiling and its palette with cairo

use std::fs::File;
use std::path::Path;

use log::info;

use crate::color::Rgb8;
use crate::errors::*;
use crate::palette::Palette;
use crate::params::{Params, View};
use crate::pick::{Selection, ViewTransform};
use crate::style::{line_width, tile_style, BACKGROUND};
use crate::tiling::Tiling;
use crate::{Point2d, Vec2d};

// legend cell size in points
const SWATCH: f64 = 72.0;
const SWATCH_MARGIN: f64 = 12.0;

//////////////////////////////////////////////////////////////////////

pub trait CairoVecOps {

    fn moveto(&self, p: &Point2d);
    fn lineto(&self, p: &Point2d);
    fn setcolor(&self, c: &Rgb8);
    fn setcolor_alpha(&self, c: &Rgb8, alpha: f64);
    fn drawpoly(&self, poly: &[Point2d]);

}

impl CairoVecOps for cairo::Context {

    fn moveto(&self, p: &Point2d) {
        self.move_to(p.x, p.y);
    }

    fn lineto(&self, p: &Point2d) {
        self.line_to(p.x, p.y);
    }

    fn setcolor(&self, c: &Rgb8) {
        let v = c.to_unit();
        self.set_source_rgb(v[0], v[1], v[2]);
    }

    fn setcolor_alpha(&self, c: &Rgb8, alpha: f64) {
        let v = c.to_unit();
        self.set_source_rgba(v[0], v[1], v[2], alpha);
    }

    fn drawpoly(&self, poly: &[Point2d]) {
        for (i, p) in poly.iter().enumerate() {
            if i == 0 {
                self.moveto(p);
            } else {
                self.lineto(p);
            }
        }
        self.close_path();
    }

}

macro_rules! with_save_restore {

    ($ctx:ident, { $($tree:tt)* }) => {

        $ctx.save();

        {
            $($tree)*
        }

        $ctx.restore();

    }

}

//////////////////////////////////////////////////////////////////////

/// Background plus every tile, in tile order, on a `view`-sized area.
pub fn draw_tiling(ctx: &cairo::Context,
                   tiling: &Tiling,
                   params: &Params,
                   view: &View,
                   selection: &Selection) -> Result<()> {

    let xform = ViewTransform::from_params(params, view);

    with_save_restore!(ctx, {

        ctx.setcolor(&BACKGROUND);
        ctx.rectangle(0.0, 0.0, view.width, view.height);
        ctx.fill();

        ctx.set_line_width(line_width(params, view));
        ctx.set_line_join(cairo::LineJoin::Round);

        for tile in &tiling.tiles {

            let style = tile_style(tile, &tiling.palette, params, selection)?;

            let pts: Vec<Point2d> = tile.dual_pts.iter().map(|p| xform.to_screen(p)).collect();

            ctx.drawpoly(&pts);

            if let Some((c, alpha)) = style.fill {
                ctx.setcolor_alpha(&c, alpha);
                ctx.fill_preserve();
            }

            if let Some(c) = style.stroke {
                ctx.setcolor(&c);
                ctx.stroke();
            } else {
                ctx.new_path();
            }

        }

    });

    Ok(())

}

/// One swatch per prototile class, left to right and wrapping at
/// `width`, each labeled with its area.
pub fn draw_palette(ctx: &cairo::Context,
                    palette: &Palette,
                    origin: &Point2d,
                    width: f64) {

    let per_row = ((width / (SWATCH + SWATCH_MARGIN)).floor() as usize).max(1);

    with_save_restore!(ctx, {

        ctx.set_font_size(10.0);
        ctx.set_line_width(0.5);

        for (i, entry) in palette.entries.iter().enumerate() {

            let (row, col) = (i / per_row, i % per_row);

            let corner = origin + Vec2d::new(col as f64 * (SWATCH + SWATCH_MARGIN),
                                             row as f64 * (SWATCH + 2.0 * SWATCH_MARGIN));

            let center = corner + Vec2d::repeat(0.5 * SWATCH);

            let pts: Vec<Point2d> = entry.points.iter().map(
                |p| center + p.coords * (0.9 * SWATCH)
            ).collect();

            ctx.drawpoly(&pts);
            ctx.setcolor(&entry.rgb);
            ctx.fill_preserve();
            ctx.set_source_rgb(0.0, 0.0, 0.0);
            ctx.stroke();

            ctx.moveto(&(corner + Vec2d::new(0.0, SWATCH + 0.75 * SWATCH_MARGIN)));
            ctx.show_text(&format!("{:} ({:})", entry.area, entry.num_vertices));

        }

    });

}

// rows needed below the tiling for the legend
fn palette_height(palette: &Palette, width: f64) -> f64 {

    let per_row = ((width / (SWATCH + SWATCH_MARGIN)).floor() as usize).max(1);
    let rows = (palette.len() + per_row - 1) / per_row;

    rows as f64 * (SWATCH + 2.0 * SWATCH_MARGIN) + SWATCH_MARGIN

}

//////////////////////////////////////////////////////////////////////

/// Tiling on the first page, palette legend on the second.
pub fn write_pdf(path: &Path,
                 tiling: &Tiling,
                 params: &Params,
                 view: &View,
                 selection: &Selection) -> Result<()> {

    let surface = cairo::PdfSurface::new(view.width, view.height, path)?;

    let ctx = cairo::Context::new(&surface);

    draw_tiling(&ctx, tiling, params, view, selection)?;

    ctx.show_page();

    let legend_height = palette_height(&tiling.palette, view.width);

    surface.set_size(view.width, legend_height)?;

    draw_palette(&ctx, &tiling.palette,
                 &Point2d::new(SWATCH_MARGIN, SWATCH_MARGIN),
                 view.width - 2.0 * SWATCH_MARGIN);

    ctx.show_page();

    info!("wrote {:} ({:} tiles)", path.display(), tiling.len());

    Ok(())

}

/// Tiling with the palette legend as a strip underneath.
pub fn write_png(path: &Path,
                 tiling: &Tiling,
                 params: &Params,
                 view: &View,
                 selection: &Selection) -> Result<()> {

    let legend_height = palette_height(&tiling.palette, view.width);

    let width = view.width.ceil() as i32;
    let height = (view.height + legend_height).ceil() as i32;

    let surface = cairo::ImageSurface::create(cairo::Format::ARgb32, width, height)?;

    {

        let ctx = cairo::Context::new(&surface);

        ctx.set_source_rgb(1.0, 1.0, 1.0);
        ctx.paint();

        draw_tiling(&ctx, tiling, params, view, selection)?;

        draw_palette(&ctx, &tiling.palette,
                     &Point2d::new(SWATCH_MARGIN, view.height + SWATCH_MARGIN),
                     view.width - 2.0 * SWATCH_MARGIN);

    }

    let mut f = File::create(path).chain_err(|| format!("creating {:}", path.display()))?;

    if let Err(e) = surface.write_to_png(&mut f) {
        bail!("error writing {:}: {:?}", path.display(), e);
    }

    info!("wrote {:} ({:} tiles)", path.display(), tiling.len());

    Ok(())

}
