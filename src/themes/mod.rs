//! The three invoice layouts.
//!
//! Each theme is drawn with absolute coordinates from the top of the first page; long item
//! tables continue onto further pages. They share the table engine in
//! [layout::table](crate::layout::table) and differ only in geometry, labels and style.

use crate::canvas::Canvas;
use crate::layout::table::ColumnSpec;
use crate::record::InvoiceRecord;

pub mod general;
pub mod modern;
pub mod simple;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Theme {
    /// Traditional, tabular service invoice
    General,
    /// Minimalist invoice with a grey header band
    Modern,
    /// Two-column header over a plain item table
    Simple,
}

impl Theme {
    pub const ALL: [Theme; 3] = [Theme::General, Theme::Modern, Theme::Simple];

    pub fn name(&self) -> &'static str {
        match self {
            Theme::General => "general",
            Theme::Modern => "modern",
            Theme::Simple => "simple",
        }
    }

    /// The columns of the theme's item table
    pub fn columns(&self) -> ColumnSpec {
        match self {
            Theme::General => general::columns(),
            Theme::Modern => modern::columns(),
            Theme::Simple => simple::columns(),
        }
    }

    /// Draw `record` onto the canvas. Never fails: absent fields are drawn with their
    /// defaults and oversized values are drawn as they are.
    pub fn render(&self, canvas: &mut Canvas, record: &InvoiceRecord) {
        match self {
            Theme::General => general::render(canvas, record),
            Theme::Modern => modern::render(canvas, record),
            Theme::Simple => simple::render(canvas, record),
        }
    }
}
