//////////////////////////////////////////////////////////////////////
// hit testing: screen points to tiles, hover, and drag selection

use std::collections::HashSet;

use crate::dual::Tile;
use crate::grid::LineId;
use crate::params::{Params, View};
use crate::{GridKey, Point2d, Similarity2d, Vec2d};

// tiles whose centroid is farther than this from the cursor
// are not even tested
pub const PICK_RADIUS: f64 = 1.0;

//////////////////////////////////////////////////////////////////////

/// Maps tile coordinates to screen pixels: scale, then rotate, then
/// move the origin to the (panned) view center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    pub xform: Similarity2d
}

impl ViewTransform {

    pub fn new(center: Point2d, rotate: f64, scale: f64) -> Self {
        ViewTransform { xform: Similarity2d::new(center.coords, rotate, scale) }
    }

    pub fn from_params(params: &Params, view: &View) -> Self {

        let center = Point2d::new(0.5 * view.width + params.pan_pixels(view),
                                  0.5 * view.height);

        Self::new(center, params.rotate_rad(), params.pre_factor(view))

    }

    // pixels per tile unit
    pub fn scale(&self) -> f64 {
        self.xform.scaling()
    }

    pub fn to_screen(&self, p: &Point2d) -> Point2d {
        self.xform.transform_point(p)
    }

    pub fn to_tile(&self, screen: &Point2d) -> Point2d {
        self.xform.inverse_transform_point(screen)
    }

}

//////////////////////////////////////////////////////////////////////
// convex point-in-polygon

// which side of the directed edge a -> b the point lies on: -1, 0, 1
pub fn which_side(p: &Point2d, a: &Point2d, b: &Point2d) -> i8 {

    let v = (p.y - a.y) * (b.x - a.x) - (p.x - a.x) * (b.y - a.y);

    if v > 0.0 {
        1
    } else if v < 0.0 {
        -1
    } else {
        0
    }

}

/// Inside iff every edge puts the point on the same, non-zero side
/// as the first edge. Only meaningful for convex polygons.
pub fn contains(polygon: &[Point2d], p: &Point2d) -> bool {

    let n = polygon.len();

    if n < 3 {
        return false;
    }

    let first = which_side(p, &polygon[0], &polygon[1]);

    first != 0 && (1..n).all(
        |i| which_side(p, &polygon[i], &polygon[(i + 1) % n]) == first
    )

}

/// First tile near `p` (tile coordinates) that contains it.
pub fn pick_index(tiles: &[Tile], p: &Point2d) -> Option<usize> {

    tiles.iter().position(
        |t| (t.mean - p).norm() < PICK_RADIUS && contains(&t.dual_pts, p)
    )

}

pub fn pick<'a>(tiles: &'a [Tile], p: &Point2d) -> Option<&'a Tile> {
    pick_index(tiles, p).map(|i| &tiles[i])
}

/// Tile under a screen point.
pub fn pick_screen<'a>(tiles: &'a [Tile],
                       view: &ViewTransform,
                       screen: &Point2d) -> Option<&'a Tile> {
    pick(tiles, &view.to_tile(screen))
}

//////////////////////////////////////////////////////////////////////
// selection state belongs to the caller; we only read it and
// describe changes to it

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum SelectionEvent {
    Add(GridKey),
    Remove(GridKey)
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    pub tiles: HashSet<GridKey>,
    pub lines: HashSet<LineId>
}

impl Selection {

    pub fn new() -> Self {
        Default::default()
    }

    pub fn has_tile(&self, key: &GridKey) -> bool {
        self.tiles.contains(key)
    }

    pub fn apply(&mut self, event: &SelectionEvent) {
        match event {
            SelectionEvent::Add(key) => { self.tiles.insert(*key); },
            SelectionEvent::Remove(key) => { self.tiles.remove(key); }
        }
    }

    pub fn clear(&mut self) {
        self.tiles.clear();
        self.lines.clear();
    }

}

/// How a renderer should emphasize a tile.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub struct Highlight {
    pub selected: bool,
    pub selected_lines: usize // selected grid lines through the tile's origin
}

pub fn highlight(tile: &Tile, selection: &Selection) -> Highlight {

    Highlight {
        selected: selection.has_tile(&tile.key),
        selected_lines: tile.lines.iter().filter(|l| selection.lines.contains(&l.id())).count()
    }

}

//////////////////////////////////////////////////////////////////////

/// One press-drag-release gesture. Every tile is reported at most
/// once per gesture, and the whole gesture either adds or removes.
#[derive(Debug, Clone)]
pub struct DragGesture {
    pub adding: bool,
    prev: Point2d,
    visited: HashSet<GridKey>
}

impl DragGesture {

    /// Start a gesture; it removes if the pressed tile was already
    /// selected and adds otherwise.
    pub fn press(tiles: &[Tile],
                 view: &ViewTransform,
                 screen: Point2d,
                 selection: &Selection) -> (DragGesture, Option<SelectionEvent>) {

        let hit = pick_screen(tiles, view, &screen);

        let adding = match hit {
            Some(tile) => !selection.has_tile(&tile.key),
            None => true
        };

        let mut gesture = DragGesture {
            adding: adding,
            prev: screen,
            visited: HashSet::new()
        };

        let event = hit.and_then(|tile| gesture.visit(tile.key));

        (gesture, event)

    }

    fn visit(&mut self, key: GridKey) -> Option<SelectionEvent> {

        if !self.visited.insert(key) {
            return None;
        }

        if self.adding {
            Some(SelectionEvent::Add(key))
        } else {
            Some(SelectionEvent::Remove(key))
        }

    }

    /// Pointer moved to `screen`: resolve it, and sample back along
    /// the segment to the previous position so fast moves don't skip
    /// tiles.
    pub fn drag(&mut self,
                tiles: &[Tile],
                view: &ViewTransform,
                screen: Point2d) -> Vec<SelectionEvent> {

        let mut events = Vec::new();

        if let Some(tile) = pick_screen(tiles, view, &screen) {
            events.extend(self.visit(tile.key));
        }

        let delta: Vec2d = self.prev - screen;
        let distance = delta.norm();
        let step = (view.scale() / 10.0).max(1.0);

        if distance > step {

            let mut i = 0.0;

            while i <= distance {

                let cursor = screen + delta * (i / distance).min(1.0);

                if let Some(tile) = pick_screen(tiles, view, &cursor) {
                    events.extend(self.visit(tile.key));
                }

                i += step;

            }

        }

        self.prev = screen;

        events

    }

    // tiles reported so far
    pub fn visited(&self) -> &HashSet<GridKey> {
        &self.visited
    }

}
