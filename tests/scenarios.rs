//! End-to-end rendering scenarios through the public API.
//!
//! Placeholder inputs carry their index and an orientation marker, so a
//! quadrant compared pixel for pixel against an input proves both placement
//! and rotation.

use image::{GenericImageView, Rgba, RgbaImage};
use zinelayout::border::{Border, BorderType};
use zinelayout::synthetic;
use zinelayout::*;

fn quadrant_doc() -> LayoutDocument {
    LayoutDocument {
        global: Global {
            ppi: Some(300.0),
            ..Global::default()
        },
        page_setup: PageSetup {
            grid_size: GridSize::new(2, 2),
            ..PageSetup::default()
        },
        output_pages: vec![OutputPage::new(
            "quadrants",
            vec![
                CellPlacement::new(0, 0, 0),
                CellPlacement::new(1, 0, 1),
                CellPlacement::new(2, 1, 0),
                CellPlacement::new(3, 1, 1),
            ],
        )],
    }
}

fn quadrant(page: &RgbaImage, row: u32, column: u32) -> RgbaImage {
    page.view(column * 300, row * 300, 300, 300).to_image()
}

fn solid(w: u32, h: u32, v: u8) -> RgbaImage {
    RgbaImage::from_pixel(w, h, Rgba([v, v, v, 255]))
}

#[test]
fn four_inputs_fill_four_quadrants() {
    let inputs = synthetic::generate(4, 300, 300, false);
    let pages = render_document(&quadrant_doc(), &inputs).unwrap();
    assert_eq!(pages.len(), 1);

    let page = &pages[0].image;
    assert_eq!(page.dimensions(), (600, 600));
    for (index, (row, column)) in [(0, 0), (0, 1), (1, 0), (1, 1)].into_iter().enumerate() {
        assert!(
            quadrant(page, row, column) == inputs[index],
            "quadrant ({row}, {column}) should hold input {index}"
        );
    }
}

#[test]
fn rotated_placement_holds_rotated_input() {
    let mut doc = quadrant_doc();
    doc.output_pages[0].layout[0].rotation = Rotation::Rotate90;
    let inputs = synthetic::generate(4, 300, 300, true);

    let page = &render_document(&doc, &inputs).unwrap()[0].image;
    let expected = Rotation::Rotate90.apply(&inputs[0]);
    assert!(quadrant(page, 0, 0) == expected);
    assert!(quadrant(page, 0, 0) != inputs[0]);
    assert!(quadrant(page, 1, 1) == inputs[3]);
}

#[test]
fn duplicate_position_aborts_the_page() {
    let mut doc = quadrant_doc();
    doc.output_pages[0].layout[1].position = GridPosition::new(0, 0);
    let inputs = synthetic::generate(4, 300, 300, false);

    let err = render_document(&doc, &inputs).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::DuplicateCellPosition { .. }));
    assert_eq!(err.context().page.as_deref(), Some("quadrants"));
    assert_eq!(err.context().cell, Some(GridPosition::new(0, 0)));
}

#[test]
fn missing_input_aborts_the_page() {
    let mut doc = quadrant_doc();
    doc.output_pages[0].layout[2].input_index = 5;
    let inputs = synthetic::generate(4, 300, 300, false);

    let err = render_document(&doc, &inputs).unwrap_err();
    assert!(matches!(
        err.kind(),
        ErrorKind::InputIndexOutOfRange { index: 5, count: 4 }
    ));
    assert_eq!(err.context().cell, Some(GridPosition::new(1, 0)));
}

#[test]
fn mismatched_inputs_are_rejected_before_drawing() {
    let inputs = vec![solid(300, 300, 0), solid(300, 300, 0), solid(300, 301, 0), solid(300, 300, 0)];
    let err = render_document(&quadrant_doc(), &inputs).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::InputSizeMismatch { index: 2, .. }));
}

#[test]
fn global_border_override_on_borderless_document() {
    let doc = quadrant_doc();
    assert!(doc.global.border.is_none());
    let doc = apply_overrides(
        doc,
        &Overrides {
            global_border: true,
            ..Overrides::default()
        },
    );
    let border = doc.global.border.as_ref().unwrap();
    assert!(border.enabled);
    assert_eq!(border.color, Color::BLACK);
    assert_eq!(border.kind, BorderType::Plain);

    let inputs = vec![solid(300, 300, 128); 4];
    let page = &render_document(&doc, &inputs).unwrap()[0].image;
    let black = Rgba([0, 0, 0, 255]);
    for (x, y) in [(0, 0), (599, 0), (0, 599), (599, 599), (300, 0), (1, 300)] {
        assert_eq!(page.get_pixel(x, y), &black, "({x}, {y})");
    }
    assert_eq!(page.get_pixel(2, 300), &Rgba([128, 128, 128, 255]));
    assert_eq!(page.get_pixel(300, 300), &Rgba([128, 128, 128, 255]));
}

#[test]
fn margins_shrink_cells_and_leave_background() {
    let mut doc = quadrant_doc();
    doc.page_setup.page_width = Some(Measurement::px(640.0));
    doc.page_setup.page_height = Some(Measurement::px(640.0));
    doc.page_setup.margin = Margin::uniform(Measurement::px(20.0));
    doc.output_pages[0].layout[3].margin = Margin::uniform(Measurement::percent(10.0));
    let inputs = vec![solid(300, 300, 0); 4];

    let page = &render_document(&doc, &inputs).unwrap()[0].image;
    let white = Rgba([255, 255, 255, 255]);
    let black = Rgba([0, 0, 0, 255]);
    assert_eq!(page.dimensions(), (640, 640));
    assert_eq!(page.get_pixel(10, 10), &white, "page margin");
    assert_eq!(page.get_pixel(20, 20), &black, "first cell corner");
    // Cell (1, 1) spans 320..620; 10% of 300 is 30.
    assert_eq!(page.get_pixel(340, 340), &white, "cell margin");
    // The shrunken cell is resampled, which may be off by one.
    let dark = |x: u32, y: u32| page.get_pixel(x, y).0[..3].iter().all(|&c| c <= 1);
    assert!(dark(350, 350));
    assert!(dark(589, 589));
    assert_eq!(page.get_pixel(590, 590), &white);
}

#[test]
fn page_border_hides_global_border_and_layout_border_is_on_top() {
    let red = Color::rgb(255, 0, 0);
    let blue = Color::rgb(0, 0, 255);
    let mut doc = quadrant_doc();
    doc.global.border = Some(Border::plain(Color::BLACK));
    doc.page_setup.page_border = Some(Border::plain(red).with_thickness(Measurement::px(4.0)));
    doc.output_pages[0].layout_border = Some(Border::plain(blue).with_kind(BorderType::Corner));
    let inputs = vec![solid(300, 300, 200); 4];

    let page = &render_document(&doc, &inputs).unwrap()[0].image;
    // The layout area equals the page here, so the layout corner wins at the corner.
    assert_eq!(page.get_pixel(0, 0), &blue.to_rgba());
    // Cells cover the page border, and the global border is not drawn over it.
    assert_eq!(page.get_pixel(300, 0), &Rgba([200, 200, 200, 255]));
}

#[test]
fn every_page_is_rendered_in_order() {
    let mut doc = quadrant_doc();
    doc.output_pages.push(OutputPage::new("back.png", vec![CellPlacement::new(1, 1, 1)]));
    let inputs = synthetic::generate(doc.required_inputs(), 300, 300, false);

    let pages = render_document(&doc, &inputs).unwrap();
    let names: Vec<_> = pages.iter().map(RenderedPage::file_name).collect();
    assert_eq!(names, ["quadrants.png", "back.png"]);
    assert_eq!(pages[1].image.get_pixel(0, 0), &Color::WHITE.to_rgba());
    assert!(quadrant(&pages[1].image, 1, 1) == inputs[1]);
}
