//////////////////////////////////////////////////////////////////////
// crossings of grid lines from different families

use std::collections::HashMap;
use std::collections::hash_map::Entry::{Occupied, Vacant};

use log::debug;

use crate::grid::{GridLine, LineFamilies, SinCos};
use crate::params::{Params, View};
use crate::{GridKey, Point2d, EPSILON};

//////////////////////////////////////////////////////////////////////

/// A multigrid vertex: two or more lines meeting at one point.
#[derive(Debug, Clone, PartialEq)]
pub struct IntersectionPoint {
    pub key: GridKey,
    pub x: f64,
    pub y: f64,
    pub lines: Vec<GridLine>
}

impl IntersectionPoint {

    pub fn point(&self) -> Point2d {
        Point2d::new(self.x, self.y)
    }

    // add a line unless it is already here
    fn absorb(&mut self, line: &GridLine) {
        if !self.lines.iter().any(|l| l.id() == line.id()) {
            self.lines.push(*line);
        }
    }

}

/// Solve the 2x2 system for lines with the given normals, or None
/// if the families are (nearly) parallel.
pub fn solve_pair(line1: &GridLine, sc1: &SinCos,
                  line2: &GridLine, sc2: &SinCos) -> Option<Point2d> {

    let s12 = sc1.sin * sc2.cos - sc1.cos * sc2.sin;
    let s21 = -s12;

    if s12.abs() <= EPSILON {
        return None;
    }

    let x = (line2.index * sc1.sin - line1.index * sc2.sin) / s12;
    let y = (line2.index * sc1.cos - line1.index * sc2.cos) / s21;

    Some(Point2d::new(x, y))

}

//////////////////////////////////////////////////////////////////////
// which solved points survive

#[derive(Debug, Clone, Copy)]
pub struct VisibilityWindow {
    pub rotate: SinCos,   // global view rotation
    pub spacing: f64,     // pixels per grid unit
    pub half_width: f64,
    pub half_height: f64,
    pub steps: usize
}

impl VisibilityWindow {

    pub fn new(params: &Params, view: &View, steps: usize) -> Self {
        VisibilityWindow {
            rotate: SinCos::of(params.rotate_rad()),
            spacing: params.spacing(view),
            half_width: 0.5 * view.width,
            half_height: 0.5 * view.height,
            steps: steps
        }
    }

    // on screen, one spacing of slack around the edges
    pub fn on_screen(&self, p: &Point2d) -> bool {

        let r = &self.rotate;

        let xprime = p.x * r.cos - p.y * r.sin;
        let yprime = p.x * r.sin + p.y * r.cos;

        (xprime * self.spacing).abs() <= self.half_width + self.spacing &&
            (yprime * self.spacing).abs() <= self.half_height + self.spacing

    }

    // close enough to the center that the tile connects to the rest;
    // a single-step grid also keeps points out to half a step
    pub fn in_radius(&self, p: &Point2d) -> bool {

        let d = p.coords.norm();
        let steps = self.steps as f64;

        (self.steps == 1 && d <= 0.5 * steps) || d <= 0.5 * (steps - 1.0)

    }

    pub fn contains(&self, p: &Point2d) -> bool {
        self.on_screen(p) && self.in_radius(p)
    }

}

//////////////////////////////////////////////////////////////////////

/// Intersection points in first-found order, with a key lookup.
#[derive(Debug, Clone, Default)]
pub struct IntersectionSet {
    pub points: Vec<IntersectionPoint>,
    pub lookup: HashMap<GridKey, usize>
}

impl IntersectionSet {

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn get(&self, key: &GridKey) -> Option<&IntersectionPoint> {
        self.lookup.get(key).map(|&i| &self.points[i])
    }

    // record a crossing, merging with any point at the same key
    pub fn insert(&mut self, p: Point2d, line1: &GridLine, line2: &GridLine) {

        let key = GridKey::from_point(&p);

        match self.lookup.entry(key) {

            Occupied(o) => {
                let existing = &mut self.points[*o.get()];
                existing.absorb(line1);
                existing.absorb(line2);
            },

            Vacant(v) => {
                v.insert(self.points.len());
                self.points.push(IntersectionPoint {
                    key: key,
                    x: p.x,
                    y: p.y,
                    lines: vec![*line1, *line2]
                });
            }

        }

    }

}

/// Intersect every pair of lines from distinct families and keep the
/// visible ones.
pub fn find_intersections(families: &LineFamilies,
                          window: &VisibilityWindow) -> IntersectionSet {

    let mut pts = IntersectionSet::default();

    let mut parallel = 0;
    let mut culled = 0;

    for line1 in &families.lines {

        for line2 in &families.lines {

            if line1.angle >= line2.angle {
                continue;
            }

            let sc1 = &families.sin_cos[line1.angle];
            let sc2 = &families.sin_cos[line2.angle];

            match solve_pair(line1, sc1, line2, sc2) {
                None => { parallel += 1; },
                Some(p) => {
                    if window.contains(&p) {
                        pts.insert(p, line1, line2);
                    } else {
                        culled += 1;
                    }
                }
            }

        }

    }

    debug!("got {:} intersections ({:} parallel pairs, {:} culled)",
           pts.len(), parallel, culled);

    pts

}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::grid::sin_cos_table;
    use crate::PI;

    fn line(angle: usize, n: i64, index: f64) -> GridLine {
        GridLine { angle: angle, n: n, index: index }
    }

    #[test]
    fn perpendicular_families_cross() {

        let table = sin_cos_table(4, PI / 2.0);

        let l1 = line(0, 1, 1.25);
        let l2 = line(1, -2, -1.75);

        let p = solve_pair(&l1, &table[0], &l2, &table[1]).unwrap();

        assert!((p.x - 1.25).abs() < 1e-12);
        assert!((p.y + 1.75).abs() < 1e-12);

    }

    #[test]
    fn solution_lies_on_both_lines() {

        let table = sin_cos_table(7, 2.0 * PI / 7.0);

        let l1 = line(2, 1, 1.3);
        let l2 = line(5, -3, -2.7);

        let p = solve_pair(&l1, &table[2], &l2, &table[5]).unwrap();

        for (l, sc) in &[(l1, table[2]), (l2, table[5])] {
            let d = p.x * sc.cos + p.y * sc.sin - l.index;
            assert!(d.abs() < 1e-9);
        }

    }

    #[test]
    fn opposite_families_are_skipped() {

        // 0 and 180 degrees: parallel
        let table = sin_cos_table(4, PI / 2.0);
        assert!(solve_pair(&line(0, 0, 0.5), &table[0],
                           &line(2, 0, 0.5), &table[2]).is_none());

        // same direction
        assert!(solve_pair(&line(1, 0, 0.5), &table[1],
                           &line(1, 1, 1.5), &table[1]).is_none());

    }

    #[test]
    fn merges_coincident_crossings() {

        let mut set = IntersectionSet::default();

        let a = line(0, 0, 0.0);
        let b = line(1, 0, 0.0);
        let c = line(2, 0, 0.0);

        set.insert(Point2d::new(0.0, 0.0), &a, &b);
        set.insert(Point2d::new(1e-9, -1e-9), &a, &c);
        set.insert(Point2d::new(0.0, 0.0), &b, &c);

        assert_eq!(set.len(), 1);

        let pt = set.get(&GridKey::new(0.0, 0.0)).unwrap();
        let ids: Vec<(usize, i64)> = pt.lines.iter().map(|l| l.id()).collect();
        assert_eq!(ids, vec![(0, 0), (1, 0), (2, 0)]);

        // first solution wins
        assert_eq!(pt.x, 0.0);

    }

    #[test]
    fn radius_window_special_cases_single_step() {

        let mut w = VisibilityWindow {
            rotate: SinCos::of(0.0),
            spacing: 100.0,
            half_width: 500.0,
            half_height: 500.0,
            steps: 1
        };

        assert!(w.in_radius(&Point2d::new(0.4, 0.0)));
        assert!(!w.in_radius(&Point2d::new(0.6, 0.0)));

        w.steps = 5;
        assert!(w.in_radius(&Point2d::new(2.0, 0.0)));
        assert!(!w.in_radius(&Point2d::new(1.5, 1.5)));

    }

    #[test]
    fn screen_window_uses_rotation() {

        let w = VisibilityWindow {
            rotate: SinCos::of(PI / 4.0),
            spacing: 100.0,
            half_width: 200.0,
            half_height: 1000.0,
            steps: 101
        };

        // (2.5, 2.5) rotated by 45 degrees lands on the y axis
        assert!(w.on_screen(&Point2d::new(2.5, 2.5)));
        assert!(!w.on_screen(&Point2d::new(2.5, -2.5)));

    }

}
