//! Command-level overrides applied to a decoded document before rendering.

use crate::border::{Border, BorderType};
use crate::color::Color;
use crate::document::LayoutDocument;

/// Overrides from the command line. The default changes nothing.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Overrides {
    /// Force-enable the global border.
    pub global_border: bool,
    /// Force-enable the page-setup border.
    pub page_border: bool,
    /// Force-enable the layout border of every output page.
    pub layout_border: bool,
    /// Force-enable the inner border of every cell.
    pub inner_border: bool,
    /// Replaces the color of the global border and of every scope forced on.
    pub border_color: Option<Color>,
    /// Replaces the type of the global border and of every scope forced on.
    pub border_type: Option<BorderType>,
    /// Replaces the document resolution.
    pub ppi: Option<f64>,
}

impl Overrides {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    fn force(&self, scope: &mut Option<Border>) {
        let border = scope.get_or_insert_with(Border::default);
        border.enabled = true;
        self.restyle(border);
    }

    fn restyle(&self, border: &mut Border) {
        if let Some(color) = self.border_color {
            border.color = color;
        }
        if let Some(kind) = self.border_type {
            border.kind = kind;
        }
    }
}

/// Apply `overrides` to `document`.
///
/// A border scope that is forced on is created with [`Border::default`]
/// styling when the document has none. Color and type overrides always
/// create the global border (without enabling it) so they can take effect
/// when it is enabled later.
pub fn apply_overrides(mut document: LayoutDocument, overrides: &Overrides) -> LayoutDocument {
    if let Some(ppi) = overrides.ppi {
        document.global.ppi = Some(ppi);
    }

    if overrides.global_border {
        overrides.force(&mut document.global.border);
    } else if overrides.border_color.is_some() || overrides.border_type.is_some() {
        let border = document.global.border.get_or_insert_with(Border::default);
        overrides.restyle(border);
    }

    if overrides.page_border {
        overrides.force(&mut document.page_setup.page_border);
    }

    for page in &mut document.output_pages {
        if overrides.layout_border {
            overrides.force(&mut page.layout_border);
        }
        if overrides.inner_border {
            for cell in &mut page.layout {
                overrides.force(&mut cell.inner_layout_border);
            }
        }
    }

    document
}
