//////////////////////////////////////////////////////////////////////
// HSLuv: hue/saturation/lightness on top of CIE LCh(uv), so equal
// steps look like equal steps
//
// hsluv -> lch -> luv -> xyz -> linear rgb -> srgb

// xyz -> linear srgb
const M: [[f64; 3]; 3] = [
    [3.240969941904521, -1.537383177570093, -0.498610760293],
    [-0.96924363628087, 1.87596750150772, 0.041555057407175],
    [0.055630079696993, -0.20397695888897, 1.056971514242878]
];

// D65 white point in u'v'
const REF_U: f64 = 0.19783000664283;
const REF_V: f64 = 0.46831999493879;

const KAPPA: f64 = 903.2962962;
const EPSILON: f64 = 0.0088564516;

/// Fill color as 8-bit sRGB.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8
}

impl Rgb8 {

    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb8 { r: r, g: g, b: b }
    }

    /// `#rrggbb`
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    pub fn from_hex(hex: &str) -> Option<Self> {

        let digits = hex.strip_prefix('#').unwrap_or(hex);

        if digits.len() != 6 || !digits.is_ascii() {
            return None;
        }

        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();

        Some(Rgb8::new(channel(0)?, channel(2)?, channel(4)?))

    }

    // channels in [0, 1], for drawing
    pub fn to_unit(&self) -> [f64; 3] {
        [self.r as f64 / 255.0, self.g as f64 / 255.0, self.b as f64 / 255.0]
    }

    // unit channels, clamped and rounded
    pub fn from_unit(rgb: [f64; 3]) -> Self {
        let q = |c: f64| crate::round_half_up(255.0 * c.max(0.0).min(1.0)) as u8;
        Rgb8::new(q(rgb[0]), q(rgb[1]), q(rgb[2]))
    }

}

//////////////////////////////////////////////////////////////////////
// gamut boundary: for a given lightness, the six lines in the uv
// plane where some rgb channel hits 0 or 1

struct Line {
    slope: f64,
    intercept: f64
}

fn get_bounds(l: f64) -> Vec<Line> {

    let sub1 = (l + 16.0).powi(3) / 1560896.0;
    let sub2 = if sub1 > EPSILON { sub1 } else { l / KAPPA };

    let mut bounds = Vec::with_capacity(6);

    for m in &M {

        let (m1, m2, m3) = (m[0], m[1], m[2]);

        for &t in &[0.0, 1.0] {

            let top1 = (284517.0 * m1 - 94839.0 * m3) * sub2;
            let top2 = (838422.0 * m3 + 769860.0 * m2 + 731718.0 * m1) * l * sub2
                - 769860.0 * t * l;
            let bottom = (632260.0 * m3 - 126452.0 * m2) * sub2 + 126452.0 * t;

            bounds.push(Line { slope: top1 / bottom, intercept: top2 / bottom });

        }

    }

    bounds

}

fn length_of_ray_until_intersect(theta: f64, line: &Line) -> f64 {
    line.intercept / (theta.sin() - line.slope * theta.cos())
}

// largest chroma inside the srgb gamut for this lightness and hue
fn max_chroma_for_lh(l: f64, h: f64) -> f64 {

    let hrad = h.to_radians();

    get_bounds(l).iter()
        .map(|b| length_of_ray_until_intersect(hrad, b))
        .filter(|len| *len >= 0.0)
        .fold(f64::MAX, f64::min)

}

fn from_linear(c: f64) -> f64 {
    if c <= 0.0031308 {
        12.92 * c
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    }
}

fn l_to_y(l: f64) -> f64 {
    if l <= 8.0 {
        l / KAPPA
    } else {
        ((l + 16.0) / 116.0).powi(3)
    }
}

fn hsluv_to_lch(h: f64, s: f64, l: f64) -> (f64, f64, f64) {

    if l > 99.9999999 {
        return (100.0, 0.0, h);
    }

    if l < 0.00000001 {
        return (0.0, 0.0, h);
    }

    let max = max_chroma_for_lh(l, h);

    (l, max / 100.0 * s, h)

}

fn lch_to_luv(l: f64, c: f64, h: f64) -> (f64, f64, f64) {
    let hrad = h.to_radians();
    (l, hrad.cos() * c, hrad.sin() * c)
}

fn luv_to_xyz(l: f64, u: f64, v: f64) -> [f64; 3] {

    if l == 0.0 {
        return [0.0, 0.0, 0.0];
    }

    let var_u = u / (13.0 * l) + REF_U;
    let var_v = v / (13.0 * l) + REF_V;

    let y = l_to_y(l);
    let x = 0.0 - (9.0 * y * var_u) / ((var_u - 4.0) * var_v - var_u * var_v);
    let z = (9.0 * y - 15.0 * var_v * y - var_v * x) / (3.0 * var_v);

    [x, y, z]

}

fn xyz_to_rgb(xyz: [f64; 3]) -> [f64; 3] {

    let dot = |m: &[f64; 3]| m[0] * xyz[0] + m[1] * xyz[1] + m[2] * xyz[2];

    [from_linear(dot(&M[0])), from_linear(dot(&M[1])), from_linear(dot(&M[2]))]

}

/// HSLuv (h in degrees, s and l in [0, 100]) to sRGB in [0, 1].
pub fn hsluv_to_rgb(h: f64, s: f64, l: f64) -> [f64; 3] {

    let (l, c, h) = hsluv_to_lch(h, s, l);
    let (l, u, v) = lch_to_luv(l, c, h);

    xyz_to_rgb(luv_to_xyz(l, u, v))

}

pub fn lerp(start: f64, stop: f64, x: f64) -> f64 {
    start + x * (stop - start)
}
