//! Rendering output pages to RGBA rasters.
//!
//! Paint order within one page:
//!
//! 1. background
//! 2. page border, around the whole page
//! 3. each placement in declaration order: rotated, filled into its cell
//!    and copied over the canvas as-is (alpha included), then the cell's
//!    inner border
//! 4. output-page layout border, around the layout area
//! 5. global border, around the whole page, only when no page border was drawn
//!
//! Rendering holds no state between calls; pages of one document can be
//! rendered independently and in any order.

use std::borrow::Cow;

use image::{RgbaImage, imageops};
use log::debug;

use crate::border;
use crate::color::Color;
use crate::document::{CellPlacement, LayoutDocument, OutputPage};
use crate::error::{Error, ErrorKind};
use crate::fit;
use crate::geometry::{GridGeometry, Size};
use crate::stroke::stroke;

/// Color of page pixels no input or border covers.
pub const BACKGROUND: Color = Color::WHITE;

/// One rendered output page.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderedPage {
    /// The output page id.
    pub id: String,
    pub image: RgbaImage,
}

impl RenderedPage {
    /// `<id>.png`, without doubling an existing `.png` suffix.
    pub fn file_name(&self) -> String {
        if self.id.to_ascii_lowercase().ends_with(".png") {
            self.id.clone()
        } else {
            format!("{}.png", self.id)
        }
    }
}

/// Size shared by every input, or `None` for no inputs.
pub fn check_uniform_inputs(inputs: &[RgbaImage]) -> Result<Option<Size>, Error> {
    let Some(first) = inputs.first() else {
        return Ok(None);
    };
    let expected = Size::new(first.width(), first.height());
    for (index, img) in inputs.iter().enumerate().skip(1) {
        let found = Size::new(img.width(), img.height());
        if found != expected {
            return Err(ErrorKind::InputSizeMismatch {
                index,
                expected,
                found,
            }
            .into());
        }
    }
    Ok(Some(expected))
}

/// Render every output page of `document`, in declaration order.
///
/// Inputs are checked for uniform size before anything is drawn. The first
/// failing page aborts the document.
pub fn render_document(document: &LayoutDocument, inputs: &[RgbaImage]) -> Result<Vec<RenderedPage>, Error> {
    check_uniform_inputs(inputs)?;
    document
        .output_pages
        .iter()
        .map(|page| render_page(document, page, inputs).map(|image| rendered(page, image)))
        .collect()
}

/// [`render_document`] with pages rendered on the rayon thread pool.
#[cfg(feature = "parallel")]
pub fn render_document_par(
    document: &LayoutDocument,
    inputs: &[RgbaImage],
) -> Result<Vec<RenderedPage>, Error> {
    use rayon::prelude::*;

    check_uniform_inputs(inputs)?;
    document
        .output_pages
        .par_iter()
        .map(|page| render_page(document, page, inputs).map(|image| rendered(page, image)))
        .collect()
}

fn rendered(page: &OutputPage, image: RgbaImage) -> RenderedPage {
    RenderedPage {
        id: page.id.clone(),
        image,
    }
}

/// Render one output page.
///
/// `inputs` are assumed to be uniform in size; see [`check_uniform_inputs`].
pub fn render_page(document: &LayoutDocument, page: &OutputPage, inputs: &[RgbaImage]) -> Result<RgbaImage, Error> {
    paint_page(document, page, inputs).map_err(|e| e.in_page(&page.id))
}

fn paint_page(document: &LayoutDocument, page: &OutputPage, inputs: &[RgbaImage]) -> Result<RgbaImage, Error> {
    let ppi = document.ppi()?;
    let setup = &document.page_setup;
    let input_size = inputs.first().map(|img| Size::new(img.width(), img.height()));
    let page_size = document.page_size(input_size)?;
    let geometry = GridGeometry::resolve(page_size, setup.grid_size, &setup.margin, &page.margin, ppi)?;
    page.check_positions(geometry.grid())?;

    debug!(
        "page {:?}: {}x{} px at {ppi} ppi, layout area {:?}, {} cell(s)",
        page.id,
        page_size.width,
        page_size.height,
        geometry.layout_area(),
        page.layout.len()
    );

    let mut canvas = RgbaImage::from_pixel(page_size.width, page_size.height, BACKGROUND.to_rgba());

    let page_border = border::enabled(&setup.page_border);
    if let Some(b) = page_border {
        stroke(&mut canvas, geometry.page(), b, ppi)?;
    }

    for cell in &page.layout {
        paint_cell(&mut canvas, &geometry, cell, inputs, ppi).map_err(|e| Error::from(e).in_cell(cell.position))?;
    }

    if let Some(b) = border::enabled(&page.layout_border) {
        stroke(&mut canvas, geometry.layout_area(), b, ppi)?;
    }

    if page_border.is_none()
        && let Some(b) = border::enabled(&document.global.border)
    {
        stroke(&mut canvas, geometry.page(), b, ppi)?;
    }

    Ok(canvas)
}

fn paint_cell(
    canvas: &mut RgbaImage,
    geometry: &GridGeometry,
    cell: &CellPlacement,
    inputs: &[RgbaImage],
    ppi: f64,
) -> Result<(), ErrorKind> {
    let rect = geometry.cell(cell.position, &cell.margin, ppi)?;
    let source = inputs
        .get(cell.input_index)
        .ok_or(ErrorKind::InputIndexOutOfRange {
            index: cell.input_index,
            count: inputs.len(),
        })?;

    let rotated = if cell.rotation.is_identity() {
        Cow::Borrowed(source)
    } else {
        Cow::Owned(cell.rotation.apply(source))
    };
    let fitted = fit::fill(&rotated, rect.size());
    imageops::replace(canvas, &fitted, i64::from(rect.x), i64::from(rect.y));

    debug!(
        "  input {} -> ({}, {}) rotated {} into {rect:?}",
        cell.input_index,
        cell.position.row,
        cell.position.column,
        cell.rotation.degrees()
    );

    if let Some(b) = border::enabled(&cell.inner_layout_border) {
        stroke(canvas, rect, b, ppi)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::PageSetup;
    use crate::geometry::GridSize;
    use image::Rgba;

    fn solid(w: u32, h: u32, v: u8) -> RgbaImage {
        RgbaImage::from_pixel(w, h, Rgba([v, v, v, 255]))
    }

    fn single_cell_doc() -> LayoutDocument {
        LayoutDocument {
            page_setup: PageSetup {
                grid_size: GridSize::new(1, 1),
                ..PageSetup::default()
            },
            output_pages: vec![OutputPage::new("only", vec![CellPlacement::new(0, 0, 0)])],
            ..LayoutDocument::default()
        }
    }

    #[test]
    fn uniform_inputs() {
        assert_eq!(check_uniform_inputs(&[]).unwrap(), None);
        assert_eq!(
            check_uniform_inputs(&[solid(3, 2, 0), solid(3, 2, 9)]).unwrap(),
            Some(Size::new(3, 2))
        );
        let err = check_uniform_inputs(&[solid(3, 2, 0), solid(3, 2, 0), solid(2, 3, 0)]).unwrap_err();
        assert!(matches!(
            err.kind(),
            ErrorKind::InputSizeMismatch { index: 2, .. }
        ));
    }

    #[test]
    fn file_name_adds_png_once() {
        let page = |id: &str| RenderedPage {
            id: id.to_owned(),
            image: RgbaImage::new(1, 1),
        };
        assert_eq!(page("front").file_name(), "front.png");
        assert_eq!(page("back.PNG").file_name(), "back.PNG");
    }

    #[test]
    fn errors_carry_page_and_cell() {
        let mut doc = single_cell_doc();
        doc.output_pages[0].layout[0].input_index = 3;
        let err = render_page(&doc, &doc.output_pages[0], &[solid(4, 4, 0)]).unwrap_err();
        assert!(matches!(
            err.kind(),
            ErrorKind::InputIndexOutOfRange { index: 3, count: 1 }
        ));
        assert_eq!(err.context().page.as_deref(), Some("only"));
        assert_eq!(err.context().cell, Some(crate::GridPosition::new(0, 0)));
    }

    #[test]
    fn inferred_size_without_inputs_fails() {
        let doc = single_cell_doc();
        let err = render_document(&doc, &[]).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::NoInputs));
    }

    #[test]
    fn global_border_is_a_fallback_for_the_page_border() {
        use crate::border::Border;

        let mut doc = single_cell_doc();
        doc.output_pages[0].layout.clear();
        doc.page_setup.page_width = Some(crate::Measurement::px(10.0));
        doc.page_setup.page_height = Some(crate::Measurement::px(10.0));
        doc.global.border = Some(Border::plain(Color::rgb(255, 0, 0)));

        let img = render_page(&doc, &doc.output_pages[0], &[]).unwrap();
        assert_eq!(img.get_pixel(0, 0), &Rgba([255, 0, 0, 255]));

        doc.page_setup.page_border = Some(Border::plain(Color::rgb(0, 0, 255)));
        let img = render_page(&doc, &doc.output_pages[0], &[]).unwrap();
        assert_eq!(img.get_pixel(0, 0), &Rgba([0, 0, 255, 255]));
    }

    #[test]
    fn cells_are_copied_not_blended() {
        let doc = single_cell_doc();
        let mut input = solid(4, 4, 50);
        input.put_pixel(1, 2, Rgba([0, 0, 0, 0]));
        input.put_pixel(3, 0, Rgba([200, 100, 0, 128]));

        let img = render_page(&doc, &doc.output_pages[0], &[input.clone()]).unwrap();
        assert_eq!(img, input);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn parallel_matches_sequential() {
        let mut doc = single_cell_doc();
        doc.output_pages.push(OutputPage::new(
            "second",
            vec![CellPlacement::new(1, 0, 0).rotated(crate::Rotation::Rotate90)],
        ));
        let inputs = [solid(4, 6, 10), solid(4, 6, 200)];
        assert_eq!(
            render_document_par(&doc, &inputs).unwrap(),
            render_document(&doc, &inputs).unwrap()
        );
    }
}
