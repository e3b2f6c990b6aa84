//! From record to PDF: resolve fonts, draw the pages with a theme, serialise.

use crate::canvas::Canvas;
use crate::document::Document;
use crate::error::RenderError;
use crate::info::Info;
use crate::output::OutputDir;
use crate::record::InvoiceRecord;
use crate::resolver::FontResolver;
use crate::themes::Theme;
use std::path::PathBuf;

/// Build the document for `record` drawn with `theme`
pub fn render_document(
    theme: Theme,
    record: &InvoiceRecord,
    resolver: &dyn FontResolver,
) -> Result<Document, RenderError> {
    let mut doc = Document::default();
    let family = doc.add_font_family(resolver)?;

    let mut canvas = Canvas::a4(&doc, family);
    theme.render(&mut canvas, record);
    for page in canvas.finish() {
        doc.add_page(page);
    }

    let mut info = Info::new();
    info.title(format!("{} invoice", theme.name()))
        .subject("Invoice");
    if let Some(signer) = record.get("signer_name") {
        info.author(signer);
    }
    doc.set_info(info);

    Ok(doc)
}

/// Render `record` to the bytes of a PDF file
pub fn render_to_bytes(
    theme: Theme,
    record: &InvoiceRecord,
    resolver: &dyn FontResolver,
) -> Result<Vec<u8>, RenderError> {
    let doc = render_document(theme, record, resolver)?;
    let mut bytes: Vec<u8> = Vec::new();
    doc.write(&mut bytes)?;
    Ok(bytes)
}

/// Render `record` into `output` as `filename`, returning the written path
pub fn render_invoice(
    theme: Theme,
    record: &InvoiceRecord,
    resolver: &dyn FontResolver,
    output: &OutputDir,
    filename: &str,
) -> Result<PathBuf, RenderError> {
    let bytes = render_to_bytes(theme, record, resolver)?;
    output.write(filename, &bytes)
}
