//////////////////////////////////////////////////////////////////////
// pattern parameters, their derived quantities, and the parameter
// file parser

use std::collections::HashSet;
use std::collections::hash_map::DefaultHasher;
use std::fs::File;
use std::hash::{Hash, Hasher};
use std::io::{BufRead, BufReader};
use std::path::Path;

use phf::phf_map;

use crate::errors::*;
use crate::{round_half_up, DEG, PI};

//////////////////////////////////////////////////////////////////////

/// Everything that determines a tiling and its coloring.
///
/// `stroke` and `show_stroke` only matter to a renderer and never
/// influence the computed tiles or palette.
#[derive(Debug, Clone, PartialEq)]
pub struct Params {
    pub symmetry: usize,           // number of line families, >= 3
    pub radius: f64,               // grid radius, sets steps
    pub pattern: f64,              // common phase of all families
    pub pan: f64,                  // shift of the families along the rotated x axis
    pub disorder: f64,             // magnitude of seeded per-family phase jitter
    pub random_seed: f64,          // seed for the jitter
    pub zoom: f64,                 // view magnification
    pub rotate: f64,               // view rotation in degrees
    pub color_tiles: bool,
    pub orientation_coloring: bool, // classify by angle signature instead of area
    pub reverse_colors: bool,
    pub hue: f64,                  // [0, 360)
    pub hue_range: f64,
    pub contrast: f64,
    pub sat: f64,                  // [0, 100]
    pub stroke: u8,
    pub show_stroke: bool
}

impl Default for Params {

    fn default() -> Self {
        Params {
            symmetry: 12,
            radius: 75.0,
            pattern: 0.0,
            pan: 0.0,
            disorder: 0.0,
            random_seed: 0.0,
            zoom: 1.0,
            rotate: 15.0,
            color_tiles: true,
            orientation_coloring: true,
            reverse_colors: false,
            hue: 342.0,
            hue_range: 62.0,
            contrast: 36.0,
            sat: 74.0,
            stroke: 128,
            show_stroke: false
        }
    }

}

/// Pixel size of the surface the tiling is shown on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct View {
    pub width: f64,
    pub height: f64
}

impl View {

    pub fn new(width: f64, height: f64) -> Self {
        View { width: width, height: height }
    }

    pub fn min_dim(&self) -> f64 {
        self.width.min(self.height)
    }

}

impl Default for View {
    fn default() -> Self {
        View::new(1000.0, 1000.0)
    }
}

//////////////////////////////////////////////////////////////////////
// derived quantities

impl Params {

    // angle between neighboring families
    pub fn multiplier(&self) -> f64 {
        2.0 * PI / (self.symmetry as f64)
    }

    // nearest odd number to radius / (symmetry - 1); may come out
    // below 1 for tiny radii, which validate() rejects
    pub fn steps(&self) -> i64 {
        let s = self.symmetry as f64;
        2 * (round_half_up((self.radius / (s - 1.0) - 1.0) / 2.0) as i64) + 1
    }

    pub fn rotate_rad(&self) -> f64 {
        self.rotate * DEG
    }

    // pixels per grid unit, used for culling
    pub fn spacing(&self, view: &View) -> f64 {
        self.zoom * view.min_dim() / (self.steps() as f64)
    }

    // pixels per tile unit, used for drawing and picking
    pub fn pre_factor(&self, view: &View) -> f64 {
        let spacing = view.min_dim() / (self.steps() as f64);
        self.zoom * spacing * self.multiplier() / PI
    }

    // horizontal pan in pixels
    pub fn pan_pixels(&self, view: &View) -> f64 {
        -self.zoom * view.min_dim() * self.pan
    }

    /// Fail fast on anything that would make the grid ill-defined.
    pub fn validate(&self, view: &View) -> Result<()> {

        if self.symmetry < 3 {
            bail!(ErrorKind::InvalidConfiguration(
                format!("symmetry must be at least 3, got {:}", self.symmetry)));
        }

        let reals = [
            ("radius", self.radius),
            ("pattern", self.pattern),
            ("pan", self.pan),
            ("disorder", self.disorder),
            ("random_seed", self.random_seed),
            ("zoom", self.zoom),
            ("rotate", self.rotate),
            ("hue", self.hue),
            ("hue_range", self.hue_range),
            ("contrast", self.contrast),
            ("sat", self.sat),
            ("view width", view.width),
            ("view height", view.height)
        ];

        for (name, value) in reals.iter() {
            if !value.is_finite() {
                bail!(ErrorKind::InvalidConfiguration(
                    format!("{:} is not a finite number", name)));
            }
        }

        if self.zoom <= 0.0 {
            bail!(ErrorKind::InvalidConfiguration(
                format!("zoom must be positive, got {:}", self.zoom)));
        }

        if view.width <= 0.0 || view.height <= 0.0 {
            bail!(ErrorKind::InvalidConfiguration(
                format!("view must have positive size, got {:}x{:}",
                        view.width, view.height)));
        }

        let steps = self.steps();

        if steps < 1 {
            bail!(ErrorKind::InvalidConfiguration(
                format!("radius {:} gives {:} steps for symmetry {:}",
                        self.radius, steps, self.symmetry)));
        }

        Ok(())

    }

    // everything the tile geometry depends on
    pub fn geometry_key(&self, view: &View) -> u64 {

        let mut h = DefaultHasher::new();

        self.symmetry.hash(&mut h);

        for v in &[self.radius, self.pattern, self.pan, self.disorder,
                   self.random_seed, self.zoom, self.rotate,
                   view.width, view.height] {
            v.to_bits().hash(&mut h);
        }

        h.finish()

    }

    // everything the palette depends on, on top of the geometry
    pub fn color_key(&self) -> u64 {

        let mut h = DefaultHasher::new();

        self.orientation_coloring.hash(&mut h);
        self.reverse_colors.hash(&mut h);

        for v in &[self.hue, self.hue_range, self.contrast, self.sat] {
            v.to_bits().hash(&mut h);
        }

        h.finish()

    }

}

//////////////////////////////////////////////////////////////////////
// parameter files look like
//
//   # comment
//   symmetry 5
//   rotate_deg 0
//   view 800 600
//
// one keyword per line, each keyword at most once

#[derive(Debug, PartialEq, Clone, Copy)]
enum Keyword {
    Symmetry,
    Radius,
    Pattern,
    Pan,
    Disorder,
    RandomSeed,
    Zoom,
    RotateDeg,
    RotateRad,
    ColorTiles,
    OrientationColoring,
    ReverseColors,
    Hue,
    HueRange,
    Contrast,
    Sat,
    Stroke,
    ShowStroke,
    View
}

static KEYWORDS: phf::Map<&'static str, Keyword> = phf_map! {
    "symmetry" => Keyword::Symmetry,
    "radius" => Keyword::Radius,
    "pattern" => Keyword::Pattern,
    "pan" => Keyword::Pan,
    "disorder" => Keyword::Disorder,
    "random_seed" => Keyword::RandomSeed,
    "zoom" => Keyword::Zoom,
    "rotate_deg" => Keyword::RotateDeg,
    "rotate_rad" => Keyword::RotateRad,
    "color_tiles" => Keyword::ColorTiles,
    "orientation_coloring" => Keyword::OrientationColoring,
    "reverse_colors" => Keyword::ReverseColors,
    "hue" => Keyword::Hue,
    "hue_range" => Keyword::HueRange,
    "contrast" => Keyword::Contrast,
    "sat" => Keyword::Sat,
    "stroke" => Keyword::Stroke,
    "show_stroke" => Keyword::ShowStroke,
    "view" => Keyword::View,
};

fn parse_token<T: std::str::FromStr>(value: &str) -> Result<T> {
    match value.parse::<T>() {
        Ok(v) => Ok(v),
        Err(_) => bail!("error parsing {:} as type {:}",
                        value, std::any::type_name::<T>())
    }
}

// exactly n tokens
fn expect_tokens<'a>(rest: &[&'a str], n: usize) -> Result<Vec<&'a str>> {

    if rest.len() < n {
        bail!("missing token(s): expected {:}, got {:}", n, rest.len());
    }

    if rest.len() > n {
        bail!("found extra token(s) starting with \"{:}\"", rest[n]);
    }

    Ok(rest.to_vec())

}

fn parse_one<T: std::str::FromStr>(rest: &[&str]) -> Result<T> {
    let tokens = expect_tokens(rest, 1)?;
    parse_token(tokens[0])
}

/// Accumulates parameter file lines into a `Params` and `View`.
#[derive(Debug, Default)]
pub struct ParamsParser {
    pub params: Params,
    pub view: View,
    seen: HashSet<&'static str>
}

impl ParamsParser {

    pub fn new() -> Self {
        Default::default()
    }

    fn apply(&mut self, keyword: Keyword, rest: &[&str]) -> Result<()> {

        let p = &mut self.params;

        match keyword {
            Keyword::Symmetry => { p.symmetry = parse_one(rest)?; },
            Keyword::Radius => { p.radius = parse_one(rest)?; },
            Keyword::Pattern => { p.pattern = parse_one(rest)?; },
            Keyword::Pan => { p.pan = parse_one(rest)?; },
            Keyword::Disorder => { p.disorder = parse_one(rest)?; },
            Keyword::RandomSeed => { p.random_seed = parse_one(rest)?; },
            Keyword::Zoom => { p.zoom = parse_one(rest)?; },
            Keyword::RotateDeg => { p.rotate = parse_one(rest)?; },
            Keyword::RotateRad => {
                let angle: f64 = parse_one(rest)?;
                p.rotate = angle / DEG;
            },
            Keyword::ColorTiles => { p.color_tiles = parse_one(rest)?; },
            Keyword::OrientationColoring => { p.orientation_coloring = parse_one(rest)?; },
            Keyword::ReverseColors => { p.reverse_colors = parse_one(rest)?; },
            Keyword::Hue => { p.hue = parse_one(rest)?; },
            Keyword::HueRange => { p.hue_range = parse_one(rest)?; },
            Keyword::Contrast => { p.contrast = parse_one(rest)?; },
            Keyword::Sat => { p.sat = parse_one(rest)?; },
            Keyword::Stroke => { p.stroke = parse_one(rest)?; },
            Keyword::ShowStroke => { p.show_stroke = parse_one(rest)?; },
            Keyword::View => {
                let tokens = expect_tokens(rest, 2)?;
                self.view = View::new(parse_token(tokens[0])?,
                                      parse_token(tokens[1])?);
            }
        }

        Ok(())

    }

    /// Handle one line of a parameter file.
    pub fn update_from(&mut self, line: &str) -> Result<()> {

        let mut trimmed = line.trim();

        if let Some(pos) = trimmed.find('#') {
            trimmed = &trimmed[0..pos];
        }

        let tokens: Vec<&str> = trimmed.split_whitespace().collect();

        if tokens.is_empty() {
            return Ok(());
        }

        let keyword = tokens[0];
        let rest = &tokens[1..];

        let (&name, &kw) = match KEYWORDS.get_entry(keyword) {
            Some(entry) => entry,
            None => {
                let mut known: Vec<&str> = KEYWORDS.keys().cloned().collect();
                known.sort();
                bail!("unrecognized keyword \"{:}\", expected one of: {:}",
                      keyword, known.join(", "));
            }
        };

        if !self.seen.insert(name) {
            bail!("{:} is already set", name);
        }

        self.apply(kw, rest).chain_err(
            || format!("while parsing keyword {:}", keyword))

    }

    /// Parse a whole stream; `filename` only labels error messages.
    pub fn parse(filename: &str, istr: &mut impl BufRead) -> Result<(Params, View)> {

        let mut parser = ParamsParser::new();
        let mut lineno = 0;

        loop {

            let mut line = String::new();

            lineno += 1;

            let len = istr.read_line(&mut line).chain_err(
                || format!("{:}:{:}: read error", filename, lineno))?;

            if len == 0 {
                break;
            }

            parser.update_from(line.as_str()).chain_err(
                || format!("{:}:{:}: parse error", filename, lineno))?;

        }

        parser.params.validate(&parser.view).chain_err(
            || format!("{:}: invalid parameters", filename))?;

        Ok((parser.params, parser.view))

    }

}

/// Read a parameter file from disk.
pub fn load_params(path: &Path) -> Result<(Params, View)> {

    let f = File::open(path).chain_err(|| format!("opening {:}", path.display()))?;
    let mut reader = BufReader::new(f);

    ParamsParser::parse(&path.display().to_string(), &mut reader)

}

#[cfg(test)]
mod tests {

    use super::*;
    use std::io::Cursor;

    fn parse_str(text: &str) -> Result<(Params, View)> {
        ParamsParser::parse("test.txt", &mut Cursor::new(text.as_bytes()))
    }

    #[test]
    fn steps_is_nearest_odd_number() {

        let mut p = Params::default();

        p.symmetry = 12;
        p.radius = 55.0;
        assert_eq!(p.steps(), 5);

        p.radius = 75.0;
        assert_eq!(p.steps(), 7);

        p.symmetry = 5;
        p.radius = 36.0;
        assert_eq!(p.steps(), 9);

        // tiny radius collapses to a single line per family
        p.radius = 0.0;
        assert_eq!(p.steps(), 1);

    }

    #[test]
    fn validate_rejects_low_symmetry() {

        let mut p = Params::default();
        p.symmetry = 2;

        match p.validate(&View::default()) {
            Err(Error(ErrorKind::InvalidConfiguration(_), _)) => {},
            other => panic!("expected InvalidConfiguration, got {:?}", other)
        }

    }

    #[test]
    fn validate_rejects_negative_steps() {

        let mut p = Params::default();
        p.symmetry = 3;
        p.radius = -20.0;

        assert!(p.steps() < 1);
        assert!(p.validate(&View::default()).is_err());

    }

    #[test]
    fn validate_rejects_bad_view() {
        let p = Params::default();
        assert!(p.validate(&View::new(0.0, 100.0)).is_err());
        assert!(p.validate(&View::new(100.0, f64::NAN)).is_err());
    }

    #[test]
    fn parses_keywords_comments_and_view() {

        let text = "# a five-fold pattern\n\
                    symmetry 5\n\
                    \n\
                    radius 36   # nine steps\n\
                    rotate_deg 0\n\
                    orientation_coloring false\n\
                    view 800 600\n";

        let (p, v) = parse_str(text).unwrap();

        assert_eq!(p.symmetry, 5);
        assert_eq!(p.steps(), 9);
        assert_eq!(p.rotate, 0.0);
        assert!(!p.orientation_coloring);
        assert_eq!(v, View::new(800.0, 600.0));
        assert_eq!(p.hue, Params::default().hue);

    }

    #[test]
    fn rejects_duplicate_and_unknown_keywords() {

        let err = parse_str("symmetry 5\nsymmetry 7\n").unwrap_err();
        assert!(format!("{:}", err).contains(":2:"));

        assert!(parse_str("colour_tiles true\n").is_err());
        assert!(parse_str("view 100\n").is_err());
        assert!(parse_str("radius 3 4\n").is_err());
        assert!(parse_str("symmetry five\n").is_err());

    }

    #[test]
    fn parse_validates_result() {
        assert!(parse_str("symmetry 2\n").is_err());
    }

    #[test]
    fn cache_keys_ignore_display_only_fields() {

        let view = View::default();
        let a = Params::default();
        let mut b = a.clone();

        b.stroke = 10;
        b.show_stroke = true;
        b.color_tiles = false;

        assert_eq!(a.geometry_key(&view), b.geometry_key(&view));
        assert_eq!(a.color_key(), b.color_key());

        b.rotate = 20.0;
        assert_ne!(a.geometry_key(&view), b.geometry_key(&view));

        b.hue = 10.0;
        assert_ne!(a.color_key(), b.color_key());

    }

}
