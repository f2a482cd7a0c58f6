//////////////////////////////////////////////////////////////////////
// the whole pipeline, and a memo for callers that recompute often

use std::collections::HashMap;

use log::{debug, info};

use crate::dual::{dualize_all, Tile};
use crate::errors::*;
use crate::grid::LineFamilies;
use crate::intersect::{find_intersections, VisibilityWindow};
use crate::palette::Palette;
use crate::params::{Params, View};
use crate::pick;
use crate::{GridKey, Point2d};

//////////////////////////////////////////////////////////////////////

/// Tiles, keyed by their origin, plus the prototile palette.
#[derive(Debug, Clone)]
pub struct Tiling {
    pub families: LineFamilies,
    pub tiles: Vec<Tile>,               // in discovery order
    pub lookup: HashMap<GridKey, usize>,
    pub palette: Palette
}

impl Tiling {

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn get(&self, key: &GridKey) -> Option<&Tile> {
        self.lookup.get(key).map(|&i| &self.tiles[i])
    }

    /// Tile containing a point in tile coordinates.
    pub fn pick(&self, p: &Point2d) -> Option<&Tile> {
        pick::pick(&self.tiles, p)
    }

    /// Reclassify and repaint for new coloring parameters; the
    /// geometry stays as is.
    pub fn recolor(&mut self, params: &Params) -> Result<()> {

        let palette = Palette::classify(&self.tiles, params);

        palette.paint(&mut self.tiles)?;

        self.palette = palette;

        Ok(())

    }

}

/// Run the full pipeline. Identical inputs give identical tilings.
pub fn compute(params: &Params, view: &View) -> Result<Tiling> {

    params.validate(view)?;

    let families = LineFamilies::new(params)?;

    let window = VisibilityWindow::new(params, view, families.steps);
    let pts = find_intersections(&families, &window);

    let mut tiles = dualize_all(&pts, &families);

    let palette = Palette::classify(&tiles, params);
    palette.paint(&mut tiles)?;

    let lookup = tiles.iter().enumerate().map(|(i, t)| (t.key, i)).collect();

    info!("symmetry {:}, {:} steps: {:} tiles, {:} prototiles",
          params.symmetry, families.steps, tiles.len(), palette.len());

    Ok(Tiling {
        families: families,
        tiles: tiles,
        lookup: lookup,
        palette: palette
    })

}

//////////////////////////////////////////////////////////////////////

/// Keeps the last tiling. Geometry is recomputed only when a
/// parameter feeding it changes, and the palette only when a
/// coloring parameter changes.
#[derive(Debug, Default)]
pub struct TilingCache {
    tiling: Option<Tiling>,
    geometry_key: Option<u64>,
    color_key: Option<u64>,
    pub hits: usize,
    pub recolors: usize,
    pub misses: usize
}

impl TilingCache {

    pub fn new() -> Self {
        Default::default()
    }

    pub fn get(&mut self, params: &Params, view: &View) -> Result<&Tiling> {

        params.validate(view)?;

        let gkey = params.geometry_key(view);
        let ckey = params.color_key();

        let reuse = self.tiling.is_some() && self.geometry_key == Some(gkey);

        if !reuse {

            debug!("tiling cache miss");

            self.tiling = None;
            self.tiling = Some(compute(params, view)?);
            self.geometry_key = Some(gkey);
            self.color_key = Some(ckey);
            self.misses += 1;

        }

        let tiling = match self.tiling.as_mut() {
            Some(t) => t,
            None => bail!("tiling cache is empty")
        };

        if reuse {

            if self.color_key == Some(ckey) {
                self.hits += 1;
            } else {
                debug!("tiling cache recolor");
                tiling.recolor(params)?;
                self.color_key = Some(ckey);
                self.recolors += 1;
            }

        }

        Ok(tiling)

    }

    pub fn clear(&mut self) {
        self.tiling = None;
        self.geometry_key = None;
        self.color_key = None;
    }

}

#[cfg(test)]
mod tests {

    use super::*;

    fn params() -> Params {
        Params {
            symmetry: 5,
            radius: 20.0,
            pattern: 0.3,
            rotate: 0.0,
            orientation_coloring: false,
            ..Default::default()
        }
    }

    #[test_log::test]
    fn lookup_matches_tiles() {

        let t = compute(&params(), &View::default()).unwrap();

        assert!(!t.is_empty());
        assert_eq!(t.lookup.len(), t.len());

        for tile in &t.tiles {
            assert_eq!(t.get(&tile.key), Some(tile));
        }

    }

    #[test]
    fn compute_rejects_invalid_params() {
        let p = Params { symmetry: 2, ..params() };
        assert!(compute(&p, &View::default()).is_err());
    }

    #[test]
    fn cache_distinguishes_geometry_and_color_changes() {

        let view = View::default();
        let mut cache = TilingCache::new();

        let p = params();
        let n = cache.get(&p, &view).unwrap().len();
        assert_eq!((cache.misses, cache.hits, cache.recolors), (1, 0, 0));

        // display-only change
        let p2 = Params { stroke: 3, show_stroke: true, ..p.clone() };
        cache.get(&p2, &view).unwrap();
        assert_eq!((cache.misses, cache.hits, cache.recolors), (1, 1, 0));

        // coloring change keeps geometry
        let p3 = Params { reverse_colors: true, ..p.clone() };
        let fwd_fill = compute(&p, &view).unwrap().palette.entries[0].fill.clone();
        let t = cache.get(&p3, &view).unwrap();
        assert_eq!(t.len(), n);
        assert_eq!(t.palette.entries.last().map(|e| e.fill.clone()), Some(fwd_fill));
        assert_eq!((cache.misses, cache.hits, cache.recolors), (1, 1, 1));

        // rotation feeds culling, so it recomputes
        let p4 = Params { rotate: 10.0, ..p3.clone() };
        cache.get(&p4, &view).unwrap();
        assert_eq!(cache.misses, 2);

        assert!(cache.get(&Params { symmetry: 1, ..p4 }, &view).is_err());

    }

}
