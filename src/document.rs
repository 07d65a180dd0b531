//! In-memory layout document: global settings, page setup and output pages.
//!
//! Documents decode from YAML with snake_case keys:
//!
//! ```yaml
//! global:
//!   ppi: 300
//! page_setup:
//!   page_width: 11in
//!   page_height: 8.5in
//!   grid_size: { rows: 2, columns: 4 }
//!   margin: { top: 0.25in, right: 0.25in, bottom: 0.25in, left: 0.25in }
//!   page_border: { enabled: true, color: "#000000", type: dashed, thickness: 2px }
//! output_pages:
//!   - id: front
//!     margin: { top: 0, right: 0, bottom: 0, left: 0 }
//!     layout_border: { enabled: false }
//!     layout:
//!       - input_index: 0
//!         position: { row: 0, column: 0 }
//!         rotation: 180
//!         margin: { top: 5mm }
//!         inner_layout_border: { enabled: true, type: corner }
//! ```
//!
//! Measurements are strings with a unit suffix or bare numbers (pixels).

use std::collections::HashSet;

use serde::Deserialize;

use crate::border::Border;
use crate::error::{Error, ErrorKind};
use crate::geometry::{GridPosition, GridSize, Insets, Size};
use crate::rotation::Rotation;
use crate::units::{DEFAULT_PPI, Measurement, validate_ppi};

/// Four-sided margin. Missing sides are zero.
#[derive(Copy, Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Margin {
    pub top: Measurement,
    pub right: Measurement,
    pub bottom: Measurement,
    pub left: Measurement,
}

impl Margin {
    pub const fn uniform(m: Measurement) -> Self {
        Self {
            top: m,
            right: m,
            bottom: m,
            left: m,
        }
    }

    fn sides(&self) -> [&Measurement; 4] {
        [&self.top, &self.right, &self.bottom, &self.left]
    }

    /// Resolve to pixels inside an area of `area` size.
    ///
    /// Percent left/right are of the area width, top/bottom of its height.
    pub fn resolve(&self, ppi: f64, area: Size) -> Result<Insets, ErrorKind> {
        let side = |m: &Measurement, reference: u32| -> Result<u32, ErrorKind> {
            let px = m.to_pixels(ppi, Some(reference))?;
            u32::try_from(px).map_err(|_| ErrorKind::MalformedMeasurement {
                text: m.to_string(),
            })
        };
        Ok(Insets {
            top: side(&self.top, area.height)?,
            right: side(&self.right, area.width)?,
            bottom: side(&self.bottom, area.height)?,
            left: side(&self.left, area.width)?,
        })
    }

    /// Pixel sum of the non-percent sides, `(horizontal, vertical)`.
    fn absolute_extent(&self, ppi: f64) -> Result<(u64, u64), ErrorKind> {
        let side = |m: &Measurement| -> Result<u64, ErrorKind> {
            if m.is_percent() {
                return Ok(0);
            }
            let px = m.to_pixels(ppi, None)?;
            u64::try_from(px).map_err(|_| ErrorKind::MalformedMeasurement {
                text: m.to_string(),
            })
        };
        // Each side fits in i64, so two of them fit in u64.
        Ok((
            side(&self.left)? + side(&self.right)?,
            side(&self.top)? + side(&self.bottom)?,
        ))
    }
}

/// Document-wide settings.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Global {
    /// Pixels per inch; [`DEFAULT_PPI`] when unset.
    pub ppi: Option<f64>,
    /// Drawn around the page when no page border is.
    pub border: Option<Border>,
}

/// Page size, grid and the page-level margin and border.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PageSetup {
    /// Explicit page width; inferred from the inputs when unset.
    pub page_width: Option<Measurement>,
    /// Explicit page height; inferred from the inputs when unset.
    pub page_height: Option<Measurement>,
    pub grid_size: GridSize,
    pub margin: Margin,
    pub page_border: Option<Border>,
}

/// One output raster.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct OutputPage {
    /// File name stem of the rendered page.
    pub id: String,
    pub margin: Margin,
    /// Stroked around the layout area.
    pub layout_border: Option<Border>,
    /// Placements in paint order.
    pub layout: Vec<CellPlacement>,
}

/// One input image placed into one grid cell.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CellPlacement {
    pub input_index: usize,
    pub position: GridPosition,
    pub rotation: Rotation,
    pub margin: Margin,
    /// Stroked around the cell after the image is placed.
    pub inner_layout_border: Option<Border>,
}

impl CellPlacement {
    pub fn new(input_index: usize, row: u32, column: u32) -> Self {
        Self {
            input_index,
            position: GridPosition::new(row, column),
            ..Self::default()
        }
    }

    pub fn rotated(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }
}

impl OutputPage {
    pub fn new(id: impl Into<String>, layout: Vec<CellPlacement>) -> Self {
        Self {
            id: id.into(),
            layout,
            ..Self::default()
        }
    }

    /// Every position must be inside `grid` and used at most once.
    ///
    /// The first placement at a position wins; the first later one is the
    /// error.
    pub fn check_positions(&self, grid: GridSize) -> Result<(), Error> {
        let mut seen = HashSet::with_capacity(self.layout.len());
        for cell in &self.layout {
            let position = cell.position;
            if !grid.contains(position) {
                return Err(Error::from(ErrorKind::CellOutOfGrid {
                    position,
                    rows: grid.rows,
                    columns: grid.columns,
                })
                .in_cell(position));
            }
            if !seen.insert(position) {
                return Err(Error::from(ErrorKind::DuplicateCellPosition { position }).in_cell(position));
            }
        }
        Ok(())
    }
}

/// One complete layout: settings, page setup and the pages to render.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutDocument {
    pub global: Global,
    pub page_setup: PageSetup,
    pub output_pages: Vec<OutputPage>,
}

impl LayoutDocument {
    /// The validated resolution.
    pub fn ppi(&self) -> Result<f64, ErrorKind> {
        validate_ppi(self.global.ppi.unwrap_or(DEFAULT_PPI))
    }

    /// Highest input index any placement refers to.
    pub fn max_input_index(&self) -> Option<usize> {
        self.output_pages
            .iter()
            .flat_map(|p| &p.layout)
            .map(|c| c.input_index)
            .max()
    }

    /// Number of inputs needed to satisfy every placement.
    pub fn required_inputs(&self) -> usize {
        self.max_input_index().map_or(0, |i| i + 1)
    }

    /// Page size in pixels.
    ///
    /// An explicit `page_width`/`page_height` wins. A missing axis is
    /// `columns × input width` (resp. `rows × input height`) plus the
    /// absolute page-setup margins on that axis; percent margins add nothing.
    pub fn page_size(&self, input: Option<Size>) -> Result<Size, ErrorKind> {
        let ppi = self.ppi()?;
        let setup = &self.page_setup;

        let explicit = |m: &Option<Measurement>| -> Result<Option<u32>, ErrorKind> {
            m.as_ref()
                .map(|m| {
                    let px = m.to_pixels(ppi, None)?;
                    u32::try_from(px).map_err(|_| ErrorKind::MalformedMeasurement {
                        text: m.to_string(),
                    })
                })
                .transpose()
        };
        let width = explicit(&setup.page_width)?;
        let height = explicit(&setup.page_height)?;
        if let (Some(width), Some(height)) = (width, height) {
            return Ok(Size::new(width, height));
        }

        let input = input.ok_or(ErrorKind::NoInputs)?;
        let grid = setup.grid_size.validate()?;
        let (extra_w, extra_h) = setup.margin.absolute_extent(ppi)?;
        let infer = |count: u32, each: u32, extra: u64| {
            (u64::from(count) * u64::from(each)).checked_add(extra)
        };
        let inferred_w = width.map(u64::from).or_else(|| infer(grid.columns, input.width, extra_w));
        let inferred_h = height.map(u64::from).or_else(|| infer(grid.rows, input.height, extra_h));
        let too_large = || ErrorKind::PageTooLarge {
            width: inferred_w,
            height: inferred_h,
        };
        match (inferred_w, inferred_h) {
            (Some(w), Some(h)) => Ok(Size::new(
                u32::try_from(w).map_err(|_| too_large())?,
                u32::try_from(h).map_err(|_| too_large())?,
            )),
            _ => Err(too_large()),
        }
    }

    /// Every structural problem, in document order, without stopping at the
    /// first. `input_count` enables the input-range check.
    pub fn validate(&self, input_count: Option<usize>) -> Vec<Error> {
        let mut issues = Vec::new();

        if let Err(e) = self.ppi() {
            issues.push(e.into());
        }
        let grid = self.page_setup.grid_size;
        if let Err(e) = grid.validate() {
            issues.push(e.into());
        }
        for m in [&self.page_setup.page_width, &self.page_setup.page_height]
            .into_iter()
            .flatten()
        {
            if m.is_percent() {
                issues.push(ErrorKind::MissingReference { value: m.value }.into());
            }
        }

        let mut ids = HashSet::new();
        for page in &self.output_pages {
            if page.id.trim().is_empty() {
                issues.push(Error::from(ErrorKind::EmptyPageId));
            } else if !ids.insert(page.id.as_str()) {
                issues.push(Error::from(ErrorKind::DuplicatePageId { id: page.id.clone() }).in_page(&page.id));
            }

            let mut seen = HashSet::new();
            for cell in &page.layout {
                let position = cell.position;
                let at = |kind: ErrorKind| Error::from(kind).in_cell(position).in_page(&page.id);
                if grid.rows > 0 && grid.columns > 0 && !grid.contains(position) {
                    issues.push(at(ErrorKind::CellOutOfGrid {
                        position,
                        rows: grid.rows,
                        columns: grid.columns,
                    }));
                } else if !seen.insert(position) {
                    issues.push(at(ErrorKind::DuplicateCellPosition { position }));
                }
                if let Some(count) = input_count
                    && cell.input_index >= count
                {
                    issues.push(at(ErrorKind::InputIndexOutOfRange {
                        index: cell.input_index,
                        count,
                    }));
                }
            }
        }
        issues
    }
}

/// Decode every YAML document in `text`, skipping empty ones.
///
/// `text` is expected to be already template-expanded.
#[cfg(feature = "yaml")]
pub fn load_documents(text: &str) -> Result<Vec<LayoutDocument>, Error> {
    let mut documents = Vec::new();
    for (index, de) in serde_yaml_ng::Deserializer::from_str(text).enumerate() {
        let value = serde_yaml_ng::Value::deserialize(de).map_err(|e| Error::from(e).in_document(index))?;
        if value.is_null() {
            continue;
        }
        let document: LayoutDocument =
            serde_yaml_ng::from_value(value).map_err(|e| Error::from(e).in_document(index))?;
        log::debug!(
            "document {index}: {} output page(s), grid {}x{}",
            document.output_pages.len(),
            document.page_setup.grid_size.rows,
            document.page_setup.grid_size.columns
        );
        documents.push(document);
    }
    Ok(documents)
}
