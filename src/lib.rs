//////////////////////////////////////////////////////////////////////
//
// pcollider: de Bruijn multigrid tilings
//
// parameters -> grid lines -> intersections -> dual tiles -> palette
//
// picking runs against the finished tile set.
//

//////////////////////////////////////////////////////////////////////
// use error chain so we can use Result<> everywhere
// for error handling

#[macro_use]
extern crate error_chain;

pub mod errors {

    error_chain!{

        errors {

            InvalidConfiguration(msg: String) {
                description("invalid configuration")
                display("invalid configuration: {:}", msg)
            }

            MissingPrototileColor(key: String) {
                description("tile has no prototile color")
                display("no prototile color for tile class {:}", key)
            }

        }

        foreign_links {
            Fmt(::std::fmt::Error);
            Io(::std::io::Error);
            Json(::serde_json::Error);
            Cairo(::cairo::Error) #[cfg(feature = "render")];
        }

    }

}

pub mod color;
pub mod dual;
pub mod export;
pub mod grid;
pub mod intersect;
pub mod palette;
pub mod params;
pub mod pick;
pub mod style;
pub mod tiling;

#[cfg(feature = "render")]
pub mod render;

pub use crate::errors::{Error, ErrorKind, Result};
pub use crate::params::{Params, View};
pub use crate::pick::{DragGesture, Selection, SelectionEvent, ViewTransform};
pub use crate::tiling::{compute, Tiling, TilingCache};

//////////////////////////////////////////////////////////////////////
// pull in some types from nalgebra

pub type Vec2d = nalgebra::Vector2<f64>;
pub type Point2d = nalgebra::geometry::Point2<f64>;
pub type Similarity2d = nalgebra::Similarity2<f64>;

//////////////////////////////////////////////////////////////////////
// numeric tolerance shared by the whole pipeline

pub const EPSILON: f64 = 1e-6;
pub const INV_EPSILON: f64 = 1e6;

pub const PI: f64 = std::f64::consts::PI;
pub const DEG: f64 = PI / 180.0;

// round half up, so -0.5 goes to 0 rather than -1
pub fn round_half_up(x: f64) -> f64 {
    (x + 0.5).floor()
}

// snap to the EPSILON lattice
pub fn approx(x: f64) -> f64 {
    round_half_up(x * INV_EPSILON) / INV_EPSILON
}

// snap to the EPSILON lattice as an integer, for hashing
pub fn quantize(x: f64) -> i64 {
    round_half_up(x * INV_EPSILON) as i64
}

//////////////////////////////////////////////////////////////////////
// hashable identity for anything sitting at a plane point

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
pub struct GridKey {
    pub qx: i64,
    pub qy: i64
}

impl GridKey {

    pub fn new(x: f64, y: f64) -> Self {
        GridKey { qx: quantize(x), qy: quantize(y) }
    }

    pub fn from_point(p: &Point2d) -> Self {
        Self::new(p.x, p.y)
    }

    // back to plane coordinates (rounded)
    pub fn to_point(&self) -> Point2d {
        Point2d::new(self.qx as f64 / INV_EPSILON,
                     self.qy as f64 / INV_EPSILON)
    }

}

impl std::fmt::Display for GridKey {

    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let p = self.to_point();
        write!(f, "[{:},{:}]", p.x + 0.0, p.y + 0.0)
    }

}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn round_half_up_rounds_ties_up() {
        assert_eq!(round_half_up(2.5), 3.0);
        assert_eq!(round_half_up(-2.5), -2.0);
        assert_eq!(round_half_up(-0.5), 0.0);
        assert_eq!(round_half_up(-0.6), -1.0);
    }

    #[test]
    fn nearby_points_share_a_key() {
        let a = GridKey::new(0.1234564, -1.0);
        let b = GridKey::new(0.1234562, -0.9999999);
        assert_eq!(a, b);
        assert_ne!(a, GridKey::new(0.123458, -1.0));
    }

    #[test]
    fn negative_zero_key_prints_as_zero() {
        let k = GridKey::new(-0.0000001, 2.5);
        assert_eq!(k.qx, 0);
        assert_eq!(format!("{:}", k), "[0,2.5]");
    }

}
