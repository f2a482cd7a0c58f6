mod common;

use std::collections::HashSet;

use common::{regular_params, unit_square};
use pcollider::pick::{pick, pick_screen};
use pcollider::{compute, DragGesture, Point2d, Selection, SelectionEvent, View, ViewTransform};

#[test]
fn centroid_picks_its_own_tile() {

    for &(symmetry, radius) in &[(5, 36.0), (12, 55.0)] {

        let tiling = compute(&regular_params(symmetry, radius), &View::default()).unwrap();

        for tile in &tiling.tiles {
            assert_eq!(tiling.pick(&tile.mean).map(|t| t.key), Some(tile.key));
        }

        assert!(tiling.pick(&Point2d::new(100.0, 100.0)).is_none());

    }

}

#[test]
fn screen_points_go_through_the_view_transform() {

    let params = regular_params(5, 36.0);
    let view = View::new(900.0, 700.0);

    let tiling = compute(&params, &view).unwrap();
    let xform = ViewTransform::from_params(&params, &view);

    for tile in tiling.tiles.iter().take(20) {
        let screen = xform.to_screen(&tile.mean);
        assert_eq!(pick_screen(&tiling.tiles, &xform, &screen).map(|t| t.key), Some(tile.key));
    }

    // far outside the window
    assert!(pick_screen(&tiling.tiles, &xform, &Point2d::new(-5000.0, -5000.0)).is_none());

}

#[test]
fn synthetic_polygon_contains_its_centroid() {

    let tiles = vec![unit_square(3.0, -2.0)];

    assert!(pick(&tiles, &Point2d::new(3.0, -2.0)).is_some());
    assert!(pick(&tiles, &Point2d::new(3.6, -2.0)).is_none());
    assert!(pick(&tiles, &Point2d::new(30.0, 20.0)).is_none());

}

#[test_log::test]
fn fast_drag_reports_each_tile_once() {

    let n = 8;

    let tiles: Vec<_> = (0..n).map(|i| unit_square(i as f64, 0.0)).collect();
    let xform = ViewTransform::new(Point2d::new(100.0, 100.0), 0.0, 20.0);

    let start = xform.to_screen(&tiles[0].mean);
    let end = xform.to_screen(&tiles[n - 1].mean);

    let (mut gesture, first) = DragGesture::press(&tiles, &xform, start, &Selection::new());

    assert!(gesture.adding);

    let mut events: Vec<SelectionEvent> = first.into_iter().collect();

    // one big jump across every tile
    events.extend(gesture.drag(&tiles, &xform, end));

    // and back again: nothing new
    assert!(gesture.drag(&tiles, &xform, start).is_empty());

    let reported: HashSet<SelectionEvent> = events.iter().cloned().collect();
    assert_eq!(reported.len(), events.len());

    let expected: HashSet<SelectionEvent> = tiles.iter()
        .filter_map(|t| pick(&tiles, &t.mean))
        .map(|t| SelectionEvent::Add(t.key))
        .collect();

    assert_eq!(reported, expected);
    assert_eq!(gesture.visited().len(), n);

}

#[test]
fn drag_events_update_a_selection() {

    let tiles: Vec<_> = (0..4).map(|i| unit_square(i as f64, 0.0)).collect();
    let xform = ViewTransform::new(Point2d::new(50.0, 50.0), 0.0, 20.0);

    let mut selection = Selection::new();

    let (mut gesture, first) = DragGesture::press(&tiles, &xform, Point2d::new(50.0, 50.0), &selection);

    for e in first.into_iter().chain(gesture.drag(&tiles, &xform, Point2d::new(110.0, 50.0))) {
        selection.apply(&e);
    }

    assert_eq!(selection.tiles.len(), 4);

    // pressing a selected tile starts a removing gesture
    let (mut gesture, first) = DragGesture::press(&tiles, &xform, Point2d::new(70.0, 50.0), &selection);

    assert!(!gesture.adding);

    for e in first.into_iter().chain(gesture.drag(&tiles, &xform, Point2d::new(90.0, 50.0))) {
        selection.apply(&e);
    }

    let left: Vec<_> = tiles.iter().filter(|t| selection.has_tile(&t.key)).map(|t| t.x).collect();
    assert_eq!(left, vec![0.0, 3.0]);

}
