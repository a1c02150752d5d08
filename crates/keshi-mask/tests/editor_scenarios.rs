//! Integration test: drive the editor through whole pointer sessions the
//! way a host UI would and check the painted mask.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use keshi_mask::{
    Dimensions, DisplayExtent, Editor, EditorConfig, EditorError, LoadError, LoadOutcome,
    MaskMode, PassthroughRemover, Point, PointerEvent, StrokeState, Tool,
};

fn png(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba([40, 90, 160, 255]));
    let mut buf = Vec::new();
    let encoder = image::codecs::png::PngEncoder::new(&mut buf);
    image::ImageEncoder::write_image(
        encoder,
        img.as_raw(),
        img.width(),
        img.height(),
        image::ExtendedColorType::Rgba8,
    )
    .unwrap();
    buf
}

fn editor_with_image(width: u32, height: u32) -> Editor {
    let mut editor = Editor::default();
    let request = editor.begin_image_load("fixture.png");
    let outcome = editor
        .complete_image_load(request, Ok(png(width, height)))
        .expect("fixture should load");
    assert_eq!(outcome, LoadOutcome::Ready(Dimensions::new(width, height)));
    editor
}

fn down(x: f64, y: f64, display: DisplayExtent) -> PointerEvent {
    PointerEvent::Down {
        position: Point::new(x, y),
        display,
    }
}

fn moved(x: f64, y: f64, display: DisplayExtent) -> PointerEvent {
    PointerEvent::Move {
        position: Point::new(x, y),
        display,
    }
}

#[test]
fn brush_drag_paints_two_discs_then_stops() {
    let mut editor = editor_with_image(400, 300);
    let display = DisplayExtent::new(400.0, 300.0);

    let first = editor.handle_pointer(down(200.0, 150.0, display)).unwrap();
    assert_eq!(first.unwrap().center, Point::new(200.0, 150.0));
    let second = editor.handle_pointer(moved(220.0, 150.0, display)).unwrap();
    assert_eq!(second.unwrap().center, Point::new(220.0, 150.0));
    editor.handle_pointer(PointerEvent::Up).unwrap();
    assert_eq!(editor.stroke_state(), StrokeState::Idle);

    let mask = editor.export_mask();
    assert_eq!(mask.dimensions(), (400, 300));
    assert_eq!(mask.get_pixel(200, 150).0[0], 255);
    assert_eq!(mask.get_pixel(220, 150).0[0], 255);
    assert_eq!(mask.get_pixel(210, 170).0[0], 255);
    assert_eq!(mask.get_pixel(170, 150).0[0], 0);
    assert_eq!(mask.get_pixel(250, 150).0[0], 0);
    assert_eq!(mask.get_pixel(210, 100).0[0], 0);

    let before = editor.mask().covered_pixel_count();
    let after_up = editor.handle_pointer(moved(300.0, 150.0, display)).unwrap();
    assert!(after_up.is_none());
    assert_eq!(editor.mask().covered_pixel_count(), before);
    assert_eq!(editor.export_mask().get_pixel(300, 150).0[0], 0);
}

#[test]
fn circle_click_paints_ring_only() {
    let mut editor = editor_with_image(400, 300);
    let display = DisplayExtent::new(400.0, 300.0);
    editor.select_tool(Tool::Circle);
    editor.set_stamp_size(100).unwrap();

    editor.handle_pointer(down(300.0, 200.0, display)).unwrap();
    editor.handle_pointer(PointerEvent::Up).unwrap();

    let mask = editor.export_mask();
    // On the ring, radius 50.
    assert_eq!(mask.get_pixel(350, 200).0[0], 255);
    assert_eq!(mask.get_pixel(300, 250).0[0], 255);
    assert_eq!(mask.get_pixel(249, 200).0[0], 255);
    // Interior and exterior untouched.
    assert_eq!(mask.get_pixel(300, 200).0[0], 0);
    assert_eq!(mask.get_pixel(320, 210).0[0], 0);
    assert_eq!(mask.get_pixel(360, 200).0[0], 0);
}

#[test]
fn rectangle_press_paints_axis_aligned_square() {
    let config = EditorConfig {
        anti_alias: false,
        ..EditorConfig::default()
    };
    let mut editor = Editor::new(config);
    let request = editor.begin_image_load("fixture.png");
    editor.complete_image_load(request, Ok(png(200, 200))).unwrap();
    let display = DisplayExtent::new(200.0, 200.0);
    editor.select_tool(Tool::Rectangle);
    editor.set_stamp_size(20).unwrap();

    editor.handle_pointer(down(50.0, 50.0, display)).unwrap();
    editor.handle_pointer(PointerEvent::Leave).unwrap();

    let mask = editor.export_mask();
    // Square spans [40, 60) on both axes, corners included.
    assert_eq!(mask.get_pixel(40, 40).0[0], 255);
    assert_eq!(mask.get_pixel(59, 59).0[0], 255);
    assert_eq!(mask.get_pixel(39, 50).0[0], 0);
    assert_eq!(mask.get_pixel(60, 50).0[0], 0);
    assert_eq!(editor.mask().covered_pixel_count(), 400);
}

#[test]
fn clear_then_paint_again() {
    let mut editor = editor_with_image(400, 300);
    let display = DisplayExtent::new(400.0, 300.0);

    editor.handle_pointer(down(100.0, 100.0, display)).unwrap();
    editor.handle_pointer(moved(150.0, 120.0, display)).unwrap();
    editor.handle_pointer(PointerEvent::Up).unwrap();
    assert!(!editor.mask().is_empty());

    editor.clear_selection();
    assert!(editor.mask().is_empty());
    assert_eq!(editor.mask().dimensions(), Dimensions::new(400, 300));

    editor.handle_pointer(down(300.0, 200.0, display)).unwrap();
    editor.handle_pointer(PointerEvent::Up).unwrap();
    let mask = editor.export_mask();
    assert_eq!(mask.get_pixel(300, 200).0[0], 255);
    assert_eq!(mask.get_pixel(100, 100).0[0], 0);
    assert_eq!(mask.get_pixel(150, 120).0[0], 0);
}

#[test]
fn scaled_display_maps_into_natural_resolution() {
    let mut editor = editor_with_image(800, 600);
    let display = DisplayExtent::new(400.0, 300.0);

    let stamp = editor
        .handle_pointer(down(100.0, 100.0, display))
        .unwrap()
        .unwrap();
    assert_eq!(stamp.center, Point::new(200.0, 200.0));

    let mask = editor.export_mask();
    assert_eq!(mask.get_pixel(200, 200).0[0], 255);
    assert_eq!(mask.get_pixel(100, 100).0[0], 0);
}

#[test]
fn collapsed_display_rejects_press_and_paints_nothing() {
    let mut editor = editor_with_image(100, 100);
    let result = editor.handle_pointer(down(10.0, 10.0, DisplayExtent::new(0.0, 100.0)));
    assert!(matches!(result, Err(EditorError::Map(_))));
    assert_eq!(editor.stroke_state(), StrokeState::Idle);
    assert!(editor.mask().is_empty());
}

#[test]
fn newest_image_selection_wins() {
    let mut editor = Editor::default();
    let older = editor.begin_image_load("first.png");
    let newer = editor.begin_image_load("second.png");

    let outcome = editor.complete_image_load(newer, Ok(png(64, 48))).unwrap();
    assert_eq!(outcome, LoadOutcome::Ready(Dimensions::new(64, 48)));
    let outcome = editor.complete_image_load(older, Ok(png(10, 10))).unwrap();
    assert_eq!(outcome, LoadOutcome::Stale);

    assert_eq!(editor.image_dimensions(), Some(Dimensions::new(64, 48)));
    assert_eq!(editor.image().unwrap().uri(), "second.png");
    assert_eq!(editor.mask().dimensions(), Dimensions::new(64, 48));
}

#[test]
fn new_image_discards_previous_selection() {
    let mut editor = editor_with_image(100, 100);
    let display = DisplayExtent::new(100.0, 100.0);
    editor.handle_pointer(down(50.0, 50.0, display)).unwrap();
    assert!(!editor.mask().is_empty());

    let loader = |_: &str| -> Result<Vec<u8>, LoadError> { Ok(png(120, 80)) };
    editor.select_image("other.png", &loader).unwrap();

    assert!(editor.mask().is_empty());
    assert_eq!(editor.mask().dimensions(), Dimensions::new(120, 80));
    assert_eq!(editor.stroke_state(), StrokeState::Idle);
}

#[test]
fn soft_export_keeps_fringe_values() {
    let config = EditorConfig {
        mask_mode: MaskMode::Soft,
        ..EditorConfig::default()
    };
    let mut editor = Editor::new(config);
    let request = editor.begin_image_load("fixture.png");
    editor.complete_image_load(request, Ok(png(200, 200))).unwrap();

    let display = DisplayExtent::new(200.0, 200.0);
    editor.handle_pointer(down(100.3, 100.7, display)).unwrap();

    let mask = editor.export_mask();
    assert_eq!(mask.get_pixel(100, 100).0[0], 255);
    assert!(
        mask.pixels().any(|p| p.0[0] > 0 && p.0[0] < 255),
        "anti-aliased disc should leave partial coverage at its edge"
    );
}

#[test]
fn generate_hands_image_and_mask_to_remover() {
    let mut editor = editor_with_image(32, 16);
    editor
        .handle_pointer(down(16.0, 8.0, DisplayExtent::new(32.0, 16.0)))
        .unwrap();

    let output = editor.generate(&PassthroughRemover).unwrap();
    assert_eq!(output.dimensions(), (32, 16));
    assert_eq!(output.get_pixel(0, 0).0, [40, 90, 160, 255]);
}
