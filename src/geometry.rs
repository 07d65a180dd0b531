//! Grid geometry: turns page size, grid size and nested margins into pixel
//! rectangles.
//!
//! ```text
//!   page ── page-setup margin ──▶ grid area
//!   grid area ── output-page margin ──▶ layout area
//!   layout area ── rows × columns ──▶ slots
//!   slot ── cell margin ──▶ cell
//! ```
//!
//! Slots tile the layout area exactly. When the layout area does not divide
//! evenly, the leftover pixels go to the last column and the last row.
//!
//! ```
//! use zinelayout::{GridGeometry, GridPosition, GridSize, Margin, Rect, Size};
//!
//! let g = GridGeometry::resolve(
//!     Size::new(601, 600),
//!     GridSize::new(2, 2),
//!     &Margin::default(),
//!     &Margin::default(),
//!     300.0,
//! )
//! .unwrap();
//! assert_eq!(g.slot(GridPosition::new(0, 0)).unwrap(), Rect::new(0, 0, 300, 300));
//! assert_eq!(g.slot(GridPosition::new(1, 1)).unwrap(), Rect::new(300, 300, 301, 300));
//! ```

use core::fmt;

use log::trace;
use serde::Deserialize;

use crate::document::Margin;
use crate::error::ErrorKind;

/// Width × height dimensions in pixels.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned rectangle in pixel coordinates.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle at the origin covering `size`.
    pub const fn from_size(size: Size) -> Self {
        Self::new(0, 0, size.width, size.height)
    }

    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Exclusive right edge.
    pub const fn right(&self) -> u32 {
        self.x + self.width
    }

    /// Exclusive bottom edge.
    pub const fn bottom(&self) -> u32 {
        self.y + self.height
    }

    /// Shrink by `insets`, failing if nothing positive remains.
    pub fn inset(self, insets: Insets, stage: Stage) -> Result<Self, ErrorKind> {
        let width = i64::from(self.width) - i64::from(insets.left) - i64::from(insets.right);
        let height = i64::from(self.height) - i64::from(insets.top) - i64::from(insets.bottom);
        if width <= 0 || height <= 0 {
            return Err(ErrorKind::MarginExceedsArea {
                stage,
                width,
                height,
            });
        }
        // Both are positive and no larger than the originals.
        Ok(Self::new(
            self.x + insets.left,
            self.y + insets.top,
            width as u32,
            height as u32,
        ))
    }
}

/// Resolved margins in pixels.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Insets {
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
    pub left: u32,
}

/// Which nesting level a margin belongs to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Page-setup margin, page → grid area.
    PageSetup,
    /// Output-page margin, grid area → layout area.
    OutputPage,
    /// Division of the layout area into slots.
    Grid,
    /// Cell margin, slot → cell.
    Cell,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::PageSetup => "page setup",
            Self::OutputPage => "output page",
            Self::Grid => "grid",
            Self::Cell => "cell",
        })
    }
}

/// Rows × columns of the page grid. The default 0×0 grid is invalid.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
pub struct GridSize {
    pub rows: u32,
    pub columns: u32,
}

impl GridSize {
    pub const fn new(rows: u32, columns: u32) -> Self {
        Self { rows, columns }
    }

    pub fn validate(self) -> Result<Self, ErrorKind> {
        if self.rows == 0 || self.columns == 0 {
            Err(ErrorKind::InvalidGrid {
                rows: self.rows,
                columns: self.columns,
            })
        } else {
            Ok(self)
        }
    }

    pub fn contains(self, position: GridPosition) -> bool {
        position.row < self.rows && position.column < self.columns
    }

}

/// Zero-based `(row, column)` within a [`GridSize`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
pub struct GridPosition {
    pub row: u32,
    pub column: u32,
}

impl GridPosition {
    pub const fn new(row: u32, column: u32) -> Self {
        Self { row, column }
    }
}

/// Resolved rectangles of one output page.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct GridGeometry {
    page: Rect,
    grid_area: Rect,
    layout_area: Rect,
    grid: GridSize,
    slot: Size,
}

impl GridGeometry {
    /// Resolve the page, grid area, layout area and slot size.
    pub fn resolve(
        page: Size,
        grid: GridSize,
        page_margin: &Margin,
        layout_margin: &Margin,
        ppi: f64,
    ) -> Result<Self, ErrorKind> {
        let grid = grid.validate()?;
        let page = Rect::from_size(page);

        let grid_area = page.inset(page_margin.resolve(ppi, page.size())?, Stage::PageSetup)?;
        let layout_area =
            grid_area.inset(layout_margin.resolve(ppi, grid_area.size())?, Stage::OutputPage)?;

        let slot = Size::new(
            layout_area.width / grid.columns,
            layout_area.height / grid.rows,
        );
        if slot.width == 0 || slot.height == 0 {
            return Err(ErrorKind::MarginExceedsArea {
                stage: Stage::Grid,
                width: i64::from(slot.width),
                height: i64::from(slot.height),
            });
        }

        trace!(
            "grid {}x{}: page {page:?}, grid area {grid_area:?}, layout area {layout_area:?}, slot {}x{}",
            grid.rows, grid.columns, slot.width, slot.height
        );
        Ok(Self {
            page,
            grid_area,
            layout_area,
            grid,
            slot,
        })
    }

    pub fn page(&self) -> Rect {
        self.page
    }

    /// Page minus the page-setup margin.
    pub fn grid_area(&self) -> Rect {
        self.grid_area
    }

    /// Grid area minus the output-page margin; the area divided into slots.
    pub fn layout_area(&self) -> Rect {
        self.layout_area
    }

    pub fn grid(&self) -> GridSize {
        self.grid
    }

    /// Width of `column`, including the remainder for the last one.
    pub fn column_width(&self, column: u32) -> u32 {
        if column + 1 == self.grid.columns {
            self.layout_area.width - self.slot.width * (self.grid.columns - 1)
        } else {
            self.slot.width
        }
    }

    /// Height of `row`, including the remainder for the last one.
    pub fn row_height(&self, row: u32) -> u32 {
        if row + 1 == self.grid.rows {
            self.layout_area.height - self.slot.height * (self.grid.rows - 1)
        } else {
            self.slot.height
        }
    }

    /// The undivided slot at `position`, before any cell margin.
    pub fn slot(&self, position: GridPosition) -> Result<Rect, ErrorKind> {
        if !self.grid.contains(position) {
            return Err(ErrorKind::CellOutOfGrid {
                position,
                rows: self.grid.rows,
                columns: self.grid.columns,
            });
        }
        Ok(Rect::new(
            self.layout_area.x + position.column * self.slot.width,
            self.layout_area.y + position.row * self.slot.height,
            self.column_width(position.column),
            self.row_height(position.row),
        ))
    }

    /// The drawable rectangle at `position` after the cell's own margin.
    pub fn cell(&self, position: GridPosition, margin: &Margin, ppi: f64) -> Result<Rect, ErrorKind> {
        let slot = self.slot(position)?;
        slot.inset(margin.resolve(ppi, slot.size())?, Stage::Cell)
    }
}
