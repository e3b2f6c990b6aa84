mod canvas;
pub use canvas::*;

mod colour;
pub use colour::*;

mod content;

mod document;
pub use document::*;

mod font;
pub use font::*;

mod info;
pub use info::*;

/// Utility functions and structures to layout objects (mostly text and tables) on pages
pub mod layout;

mod output;
pub use output::*;

mod page;
pub use page::*;

pub mod pagesize;

mod rect;
pub use rect::*;

mod record;
pub use record::*;

pub(crate) mod refs;

mod render;
pub use render::*;

pub mod resolver;

pub mod samples;

mod standard_fonts;
pub use standard_fonts::StandardFont;

pub mod themes;

mod units;
pub use units::*;

mod error;
pub use error::*;

/// Re-export PDF-writer functionality, mostly for custom [pdf_writer::Content] generation
pub use pdf_writer;
