//////////////////////////////////////////////////////////////////////
// de Bruijn dual: every multigrid vertex becomes a tile

use log::debug;

use crate::grid::{GridLine, LineFamilies};
use crate::intersect::{IntersectionPoint, IntersectionSet};
use crate::{approx, GridKey, Point2d, EPSILON, PI};

//////////////////////////////////////////////////////////////////////

/// A polygon of the dual tiling.
#[derive(Debug, Clone, PartialEq)]
pub struct Tile {
    pub key: GridKey,           // identity: rounded origin point
    pub x: f64,                 // origin intersection in grid space
    pub y: f64,
    pub lines: Vec<GridLine>,   // lines through the origin
    pub dual_pts: Vec<Point2d>, // polygon, counter-clockwise
    pub mean: Point2d,          // vertex centroid
    pub area: String,           // shoelace area to 3 decimals
    pub num_vertices: usize,
    pub angles: Vec<f64>,       // sorted edge directions, snapped to EPSILON
    pub angle_signature: String,
    pub fill: String            // prototile color, set by the palette
}

impl Tile {

    pub fn origin(&self) -> Point2d {
        Point2d::new(self.x, self.y)
    }

}

// sorted, deduplicated directions of all edges meeting at a vertex
pub fn edge_directions(lines: &[GridLine], multiplier: f64) -> Vec<f64> {

    let mut angles = Vec::with_capacity(2 * lines.len());

    for l in lines {
        let a = l.angle as f64 * multiplier;
        angles.push(a);
        angles.push((a + PI) % (2.0 * PI));
    }

    let mut angles: Vec<f64> = angles.into_iter().map(approx).collect();

    angles.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    angles.dedup();

    angles

}

// JSON-style list, with -0 printed as 0
pub fn signature(angles: &[f64]) -> String {

    let items: Vec<String> = angles.iter().map(|a| format!("{:}", a + 0.0)).collect();

    format!("[{:}]", items.join(","))

}

// 3-decimal area label, again with -0 printed as 0
pub fn area_label(area: f64) -> String {
    format!("{:}", crate::round_half_up(1000.0 * area) / 1000.0 + 0.0)
}

// signed area, positive for counter-clockwise
pub fn shoelace(points: &[Point2d]) -> f64 {

    let n = points.len();

    let mut area = 0.0;

    for (i, p0) in points.iter().enumerate() {
        let p1 = &points[(i + 1) % n];
        area += 0.5 * (p0.x * p1.y - p0.y * p1.x);
    }

    area

}

pub fn centroid(points: &[Point2d]) -> Point2d {

    let mut sum = Point2d::origin();

    for p in points {
        sum.coords += p.coords;
    }

    sum / (points.len() as f64)

}

impl LineFamilies {

    /// Strip indices of a point in every family, summed along the
    /// family normals.
    pub fn dual_point(&self, p: &Point2d) -> Point2d {

        let mut d = Point2d::origin();

        for (sc, offset) in self.sin_cos.iter().zip(self.offsets.iter()) {

            let k = (p.x * sc.cos + p.y * sc.sin - offset).floor();

            d.x += k * sc.cos;
            d.y += k * sc.sin;

        }

        d

    }

}

/// Turn one multigrid vertex into its tile, or None when the vertex
/// is too degenerate to bound a polygon.
pub fn dualize(pt: &IntersectionPoint, families: &LineFamilies) -> Option<Tile> {

    let angles = edge_directions(&pt.lines, families.multiplier);

    if angles.len() < 3 {
        return None;
    }

    // step off the vertex along each edge so we know which side
    // of each line a region lies on
    let offset_pts: Vec<Point2d> = angles.iter().map(
        |a| Point2d::new(pt.x - EPSILON * a.sin(), pt.y + EPSILON * a.cos())
    ).collect();

    let n = offset_pts.len();

    // one point inside each region around the vertex
    let median_pts = (0..n).map(|i| {
        let p0 = &offset_pts[i];
        let p1 = &offset_pts[(i + 1) % n];
        Point2d::new(0.5 * (p0.x + p1.x), 0.5 * (p0.y + p1.y))
    });

    let dual_pts: Vec<Point2d> = median_pts.map(|m| families.dual_point(&m)).collect();

    Some(Tile {
        key: pt.key,
        x: pt.x,
        y: pt.y,
        lines: pt.lines.clone(),
        mean: centroid(&dual_pts),
        area: area_label(shoelace(&dual_pts)),
        num_vertices: angles.len(),
        angle_signature: signature(&angles),
        angles: angles,
        dual_pts: dual_pts,
        fill: String::new()
    })

}

/// Dualize every intersection, keeping their order.
pub fn dualize_all(pts: &IntersectionSet, families: &LineFamilies) -> Vec<Tile> {

    let tiles: Vec<Tile> = pts.points.iter().filter_map(|p| dualize(p, families)).collect();

    debug!("got {:} tiles from {:} intersections ({:} degenerate)",
           tiles.len(), pts.len(), pts.len() - tiles.len());

    tiles

}
