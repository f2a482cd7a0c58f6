use std::path::PathBuf;

use pcollider::params::load_params;
use pcollider::{compute, View};

fn pattern_file(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("patterns").join(name)
}

#[test]
fn bundled_patterns_load_and_compute() {

    for name in &["default.txt", "penrose.txt", "disordered.txt"] {

        let (params, view) = load_params(&pattern_file(name)).unwrap();
        let tiling = compute(&params, &view).unwrap();

        assert!(!tiling.is_empty(), "{:} gave no tiles", name);
        assert!(!tiling.palette.is_empty());

    }

}

#[test]
fn penrose_file_sets_view_and_classes() {

    let (params, view) = load_params(&pattern_file("penrose.txt")).unwrap();

    assert_eq!(params.symmetry, 5);
    assert_eq!(view, View::new(1200.0, 900.0));
    assert!(params.show_stroke);

    // thick and thin rhombs
    let tiling = compute(&params, &view).unwrap();
    assert_eq!(tiling.palette.len(), 2);

}

#[test]
fn missing_file_is_an_error() {
    assert!(load_params(&pattern_file("no_such_pattern.txt")).is_err());
}
