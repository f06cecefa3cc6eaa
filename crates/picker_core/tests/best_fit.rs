use picker_core::{select_best_fit, ImageVariant, SelectionError};

fn variants(sizes: &[(i32, i32)]) -> Vec<ImageVariant> {
    sizes
        .iter()
        .map(|(w, h)| {
            ImageVariant::new(&format!("https://cdn.example.com/{w}x{h}.jpg"), *w, *h).unwrap()
        })
        .collect()
}

fn pick(sizes: &[(i32, i32)], min_width: i32, min_height: i32) -> (i32, i32) {
    let variants = variants(sizes);
    let best = select_best_fit(&variants, min_width, min_height).unwrap();
    (best.width(), best.height())
}

#[test]
fn unconstrained_picks_smallest_on_both_axes() {
    engine_logging::initialize_for_tests();
    assert_eq!(pick(&[(800, 600), (400, 300), (1600, 1200)], 0, 0), (400, 300));
}

#[test]
fn unconstrained_needs_both_axes_to_shrink() {
    // 400x700 is narrower but taller, so the first variant stays.
    assert_eq!(pick(&[(800, 600), (400, 700)], 0, 0), (800, 600));
}

#[test]
fn width_only_constraint_ignores_height() {
    assert_eq!(pick(&[(320, 240), (640, 480), (1280, 960)], 500, 0), (640, 480));
}

#[test]
fn height_only_constraint_ignores_width() {
    assert_eq!(pick(&[(150, 150), (320, 320), (640, 640)], -1, 200), (320, 320));
}

#[test]
fn both_constraints_require_both_axes() {
    let sizes = [(150, 150), (320, 320), (640, 640)];
    assert_eq!(pick(&sizes, 300, 300), (320, 320));
    // Nothing meets 1000x1000; the first candidate above the minimum never appears.
    assert_eq!(pick(&sizes, 1000, 1000), (150, 150));
}

#[test]
fn satisfied_best_is_not_replaced_by_larger() {
    assert_eq!(pick(&[(640, 640), (1080, 1080)], 300, 300), (640, 640));
}

#[test]
fn smaller_variant_meeting_constraint_replaces_larger_best() {
    assert_eq!(pick(&[(1080, 1080), (640, 640), (150, 150)], 300, 300), (640, 640));
}

#[test]
fn empty_collection_is_an_error() {
    let err = select_best_fit(&[], 100, 100).unwrap_err();
    assert_eq!(err, SelectionError::NoVariants);
}
