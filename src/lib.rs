//! Grid layout resolution and raster compositing for print-ready zine pages.
//!
//! A [`LayoutDocument`] describes a page size, a grid, margins at three
//! levels and borders at four scopes. Each output page places input images
//! into grid cells, optionally rotated in quarter turns. Rendering resolves
//! every measurement to whole pixels, fills each cell with its (rotated)
//! input by center-crop and resize, and strokes the enabled borders.
//!
//! # Modules
//!
//! - [`units`]: measurements with units, and their resolution to pixels
//! - [`geometry`]: rectangles, grids, and the page → grid → cell cascade
//! - [`rotation`]: quarter-turn rotations of dimensions and pixels
//! - [`document`]: the layout document model and its YAML decoding
//! - [`compose`]: rendering output pages
//! - [`overrides`]: command-line adjustments to a decoded document
//! - [`synthetic`]: numbered placeholder inputs
//!
//! ```
//! use zinelayout::{CellPlacement, GridSize, LayoutDocument, OutputPage, PageSetup, render_document};
//! use image::{Rgba, RgbaImage};
//!
//! let doc = LayoutDocument {
//!     page_setup: PageSetup {
//!         grid_size: GridSize::new(1, 2),
//!         ..PageSetup::default()
//!     },
//!     output_pages: vec![OutputPage::new(
//!         "spread",
//!         vec![CellPlacement::new(0, 0, 0), CellPlacement::new(1, 0, 1)],
//!     )],
//!     ..LayoutDocument::default()
//! };
//! let inputs = vec![
//!     RgbaImage::from_pixel(40, 60, Rgba([255, 0, 0, 255])),
//!     RgbaImage::from_pixel(40, 60, Rgba([0, 0, 255, 255])),
//! ];
//! let pages = render_document(&doc, &inputs).unwrap();
//! assert_eq!(pages[0].image.dimensions(), (80, 60));
//! assert_eq!(pages[0].file_name(), "spread.png");
//! ```

#![forbid(unsafe_code)]

pub mod border;
pub mod color;
pub mod compose;
pub mod document;
pub mod error;
pub mod fit;
pub mod geometry;
pub mod overrides;
pub mod rotation;
pub mod stroke;
pub mod synthetic;
pub mod units;

pub use border::{Border, BorderType};
pub use color::Color;
#[cfg(feature = "parallel")]
pub use compose::render_document_par;
pub use compose::{RenderedPage, check_uniform_inputs, render_document, render_page};
#[cfg(feature = "yaml")]
pub use document::load_documents;
pub use document::{CellPlacement, Global, LayoutDocument, Margin, OutputPage, PageSetup};
pub use error::{Error, ErrorContext, ErrorKind, Result};
pub use geometry::{GridGeometry, GridPosition, GridSize, Insets, Rect, Size, Stage};
pub use overrides::{Overrides, apply_overrides};
pub use rotation::Rotation;
pub use units::{DEFAULT_PPI, Measurement, Unit};
