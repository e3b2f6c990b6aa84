//! Layout utilities for positioning invoice content on pages.
//!
//! - [`wrap_lines`](crate::layout::wrap_lines) measures text with real glyph advances and
//!   splits it into lines that fit a cell, keeping words intact where possible.
//! - [`table`](crate::layout::table) is the fixed-grid cell engine: header bands, fixed
//!   rows, rows with one wrapping column, and labelled totals blocks, all drawn through a
//!   [`Canvas`](crate::Canvas).
//!
//! # Example
//!
//! ```
//! use invoice_gen::layout::table::{draw_wrapping_row, Align, Column, ColumnSpec};
//! use invoice_gen::resolver::StandardFonts;
//! use invoice_gen::{Canvas, Document, Mm};
//!
//! let mut doc = Document::default();
//! let family = doc.add_font_family(&StandardFonts).expect("standard fonts always resolve");
//! let mut canvas = Canvas::a4(&doc, family);
//!
//! let columns = ColumnSpec::new([
//!     Column::new(Mm(95.0), "PRODUCT", Align::Left),
//!     Column::new(Mm(95.0), "TOTAL", Align::Right),
//! ]);
//! let row = draw_wrapping_row(&mut canvas, &columns, &["Logo Design", "$ 100.00"], 0, Mm(8.0));
//! assert_eq!(row.next_y, row.origin.1 + Mm(8.0));
//!
//! for page in canvas.finish() {
//!     doc.add_page(page);
//! }
//! ```

mod margins;
pub mod table;
mod text;

pub use margins::*;
pub use text::*;
