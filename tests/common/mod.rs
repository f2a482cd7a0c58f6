#![allow(dead_code)]

use pcollider::dual::Tile;
use pcollider::grid::GridLine;
use pcollider::{GridKey, Params, Point2d};

/// Parameters with no disorder, no pan and no rotation, and a phase
/// that keeps the grid free of triple crossings.
pub fn regular_params(symmetry: usize, radius: f64) -> Params {
    Params {
        symmetry: symmetry,
        radius: radius,
        pattern: 0.3,
        pan: 0.0,
        disorder: 0.0,
        rotate: 0.0,
        orientation_coloring: false,
        ..Default::default()
    }
}

/// Axis-aligned unit square centered on (cx, cy), for picking tests
/// that don't need a real tiling.
pub fn unit_square(cx: f64, cy: f64) -> Tile {

    let pts = vec![
        Point2d::new(cx - 0.5, cy - 0.5),
        Point2d::new(cx + 0.5, cy - 0.5),
        Point2d::new(cx + 0.5, cy + 0.5),
        Point2d::new(cx - 0.5, cy + 0.5),
    ];

    Tile {
        key: GridKey::new(cx, cy),
        x: cx,
        y: cy,
        lines: vec![
            GridLine { angle: 0, n: cx.round() as i64, index: cx },
            GridLine { angle: 1, n: cy.round() as i64, index: cy },
        ],
        mean: Point2d::new(cx, cy),
        num_vertices: 4,
        dual_pts: pts,
        area: "1".to_string(),
        angles: vec![],
        angle_signature: String::new(),
        fill: "#000000".to_string()
    }

}

/// Every turn of the polygon goes the same (counter-clockwise) way.
pub fn is_strictly_convex(pts: &[Point2d]) -> bool {

    let n = pts.len();

    (0..n).all(|i| {
        let a = pts[i];
        let b = pts[(i + 1) % n];
        let c = pts[(i + 2) % n];
        let cross = (b.x - a.x) * (c.y - b.y) - (b.y - a.y) * (c.x - b.x);
        cross > 0.0
    })

}

pub fn rotate(p: &Point2d, angle: f64) -> Point2d {
    let (s, c) = angle.sin_cos();
    Point2d::new(c * p.x - s * p.y, s * p.x + c * p.y)
}
