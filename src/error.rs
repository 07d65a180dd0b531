//! Error kinds and the document/page/cell context they are reported with.

use core::fmt;

use thiserror::Error;

use crate::geometry::{GridPosition, Size, Stage};

/// Convenience alias used throughout the crate.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// What went wrong, without the location it went wrong at.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// Text did not match `<number><optional unit suffix>`.
    #[error("malformed measurement {text:?}: expected <number>[px|in|cm|mm|%]")]
    MalformedMeasurement { text: String },

    /// A percent measurement was resolved without a reference length.
    #[error("percent measurement {value}% needs a reference length")]
    MissingReference { value: f64 },

    /// PPI must be finite and strictly positive.
    #[error("invalid resolution {ppi} ppi")]
    InvalidResolution { ppi: f64 },

    /// Grid with zero rows or columns.
    #[error("invalid grid {rows}x{columns}: rows and columns must be positive")]
    InvalidGrid { rows: u32, columns: u32 },

    /// Margins left nothing to draw into.
    #[error("{stage} area would be {width}x{height} px after margins")]
    MarginExceedsArea { stage: Stage, width: i64, height: i64 },

    /// A placement references an input that was not supplied.
    #[error("input index {index} out of range ({count} inputs)")]
    InputIndexOutOfRange { index: usize, count: usize },

    /// Two placements on one output page target the same cell.
    #[error("cell ({}, {}) is already occupied", .position.row, .position.column)]
    DuplicateCellPosition { position: GridPosition },

    /// A placement lies outside the grid.
    #[error("cell ({}, {}) lies outside the {rows}x{columns} grid", .position.row, .position.column)]
    CellOutOfGrid {
        position: GridPosition,
        rows: u32,
        columns: u32,
    },

    /// Inputs are not all the same size.
    #[error("input {index} is {}x{}, expected {}x{}", .found.width, .found.height, .expected.width, .expected.height)]
    InputSizeMismatch {
        index: usize,
        expected: Size,
        found: Size,
    },

    /// Two output pages share an id, so their files would collide.
    #[error("output page id {id:?} is used more than once")]
    DuplicatePageId { id: String },

    #[error("output page has an empty id")]
    EmptyPageId,

    /// The inferred page would not fit in 32-bit pixel dimensions.
    #[error("page would be {}x{} px, beyond the largest supported size", fmt_extent(.width), fmt_extent(.height))]
    PageTooLarge {
        width: Option<u64>,
        height: Option<u64>,
    },

    /// Page size has to be inferred but there is no input to infer it from.
    #[error("page size is not set and there are no inputs to infer it from")]
    NoInputs,

    #[error("malformed color {text:?}: expected #RRGGBB[AA], a color name or R,G,B,A")]
    MalformedColor { text: String },

    #[error("unknown border type {text:?}: expected plain|dotted|dashed|corner")]
    UnknownBorderType { text: String },

    #[error("invalid rotation {degrees}: expected 0, 90, 180 or 270")]
    InvalidRotation { degrees: i64 },

    /// The layout text could not be decoded.
    #[cfg(feature = "yaml")]
    #[error("decoding layout: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

fn fmt_extent(px: &Option<u64>) -> String {
    px.map_or_else(|| "(overflow)".to_owned(), |v| v.to_string())
}

/// Where an error happened.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ErrorContext {
    /// Index of the document within a multi-document specification.
    pub document: Option<usize>,
    /// Output page id.
    pub page: Option<String>,
    /// Grid cell.
    pub cell: Option<GridPosition>,
}

impl ErrorContext {
    fn is_empty(&self) -> bool {
        self.document.is_none() && self.page.is_none() && self.cell.is_none()
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut sep = "";
        if let Some(doc) = self.document {
            write!(f, "document {doc}")?;
            sep = ", ";
        }
        if let Some(page) = &self.page {
            write!(f, "{sep}page {page:?}")?;
            sep = ", ";
        }
        if let Some(cell) = self.cell {
            write!(f, "{sep}cell ({}, {})", cell.row, cell.column)?;
        }
        Ok(())
    }
}

/// An [`ErrorKind`] together with the document, page and cell it concerns.
#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    context: ErrorContext,
}

impl Error {
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn context(&self) -> &ErrorContext {
        &self.context
    }

    /// Attach a document index unless one is already recorded.
    pub fn in_document(mut self, index: usize) -> Self {
        self.context.document.get_or_insert(index);
        self
    }

    /// Attach an output page id unless one is already recorded.
    pub fn in_page(mut self, id: &str) -> Self {
        if self.context.page.is_none() {
            self.context.page = Some(id.to_owned());
        }
        self
    }

    /// Attach a grid cell unless one is already recorded.
    pub fn in_cell(mut self, position: GridPosition) -> Self {
        self.context.cell.get_or_insert(position);
        self
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.context.is_empty() {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "{}: {}", self.context, self.kind)
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.kind.source()
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: ErrorContext::default(),
        }
    }
}

#[cfg(feature = "yaml")]
impl From<serde_yaml_ng::Error> for Error {
    fn from(e: serde_yaml_ng::Error) -> Self {
        ErrorKind::Yaml(e).into()
    }
}
