use bst_canvas::{ViewBox, Viewport};
use kurbo::{Size, Vec2};
use proptest::prelude::*;

proptest! {
    #[test]
    fn zoom_stays_in_range(factors in prop::collection::vec(0.1f64..5.0, 0..30)) {
        let mut viewport = Viewport::default();
        for factor in factors {
            viewport.zoom(factor);
            let zoom = viewport.zoom_level();
            prop_assert!((0.5..=2.0).contains(&zoom), "zoom {} out of range", zoom);
        }
    }

    #[test]
    fn zoom_keeps_view_center(factors in prop::collection::vec(0.5f64..2.0, 1..10)) {
        let mut viewport = Viewport::default();
        let center = viewport.view_box().center();
        for factor in factors {
            viewport.zoom(factor);
        }
        let moved = viewport.view_box().center();
        prop_assert!((moved.x - center.x).abs() < 1e-6);
        prop_assert!((moved.y - center.y).abs() < 1e-6);
    }

    #[test]
    fn pan_and_pan_back(dx in -500.0f64..500.0, dy in -500.0f64..500.0) {
        let rendered = Size::new(640.0, 480.0);
        let mut viewport = Viewport::default();
        viewport.pan(Vec2::new(dx, dy), rendered);
        viewport.pan(Vec2::new(-dx, -dy), rendered);

        let vb = viewport.view_box();
        let default = ViewBox::default();
        prop_assert!((vb.x - default.x).abs() < 1e-9);
        prop_assert!((vb.y - default.y).abs() < 1e-9);
    }
}
