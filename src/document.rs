use crate::{
    error::RenderError,
    font::{Font, FontFamily},
    info::Info,
    page::Page,
    refs::{ObjectReferences, RefType},
    resolver::FontResolver,
};
use id_arena::{Arena, Id};
use pdf_writer::{Pdf, Ref};
use std::io::Write;

#[derive(Default)]
/// A document is the main object that stores all the contents of the PDF
/// then renders it out with a call to [Document::write]
pub struct Document {
    pub info: Option<Info>,
    pub pages: Vec<Page>,
    pub fonts: Arena<Font>,
}

impl Document {
    /// Sets information about the document. If not provided, no information block will be
    /// written to the PDF
    pub fn set_info(&mut self, info: Info) {
        self.info = Some(info);
    }

    /// Add a page to the end of the document, returning its 0-based index
    pub fn add_page(&mut self, page: Page) -> usize {
        self.pages.push(page);
        self.pages.len() - 1
    }

    /// Add a font to the document structure. Note that fonts are stored "globally" within
    /// the document, such that any page can access it by referring to it by its id.
    pub fn add_font(&mut self, font: Font) -> Id<Font> {
        self.fonts.alloc(font)
    }

    /// Resolve a regular / bold pair through `resolver` and register both faces
    pub fn add_font_family(&mut self, resolver: &dyn FontResolver) -> Result<FontFamily, RenderError> {
        let faces = resolver.resolve()?;
        Ok(FontFamily {
            regular: self.add_font(faces.regular),
            bold: self.add_font(faces.bold),
        })
    }

    /// Write the entire document to the writer. Note: although this can write to arbitrary
    /// streams, the entire document is "rendered" in memory first.
    ///
    /// Output is deterministic: the same pages and fonts always serialise to the same
    /// bytes.
    pub fn write<W: Write>(self, mut w: W) -> Result<(), RenderError> {
        let Document { info, pages, fonts } = self;

        let mut refs = ObjectReferences::new();

        let catalog_id = refs.allocate(RefType::Catalog);
        let page_tree_id = refs.allocate(RefType::PageTree);

        let mut writer = Pdf::new();
        if let Some(info) = info {
            info.write(&mut refs, &mut writer);
        }

        let page_refs: Vec<Ref> = (0..pages.len())
            .map(|i| refs.allocate(RefType::Page(i)))
            .collect();

        writer
            .pages(page_tree_id)
            .count(page_refs.len() as i32)
            .kids(page_refs);

        for (id, font) in fonts.iter() {
            font.write(&mut refs, id, &mut writer);
        }

        for (page_index, page) in pages.iter().enumerate() {
            page.write(&mut refs, page_index, &fonts, &mut writer)?;
        }

        writer.catalog(catalog_id).pages(page_tree_id);

        w.write_all(writer.finish().as_slice()).map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::StandardFonts;
    use crate::{pagesize, Canvas};

    fn one_page_document() -> Document {
        let mut doc = Document::default();
        let family = doc.add_font_family(&StandardFonts).unwrap();
        let mut canvas = Canvas::a4(&doc, family);
        canvas.cell(crate::Cell::new(crate::Mm(40.0), crate::Mm(10.0), "INVOICE"));
        for page in canvas.finish() {
            doc.add_page(page);
        }
        doc
    }

    #[test]
    fn writes_a_pdf() {
        let mut bytes: Vec<u8> = Vec::new();
        one_page_document().write(&mut bytes).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("/BaseFont /Helvetica-Bold"));
        assert!(text.contains("/WinAnsiEncoding"));
    }

    #[test]
    fn output_is_deterministic() {
        let mut first: Vec<u8> = Vec::new();
        let mut second: Vec<u8> = Vec::new();
        one_page_document().write(&mut first).unwrap();
        one_page_document().write(&mut second).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn empty_document_still_writes() {
        let mut doc = Document::default();
        doc.add_page(Page::new(pagesize::A4, None));
        let mut bytes: Vec<u8> = Vec::new();
        doc.write(&mut bytes).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }
}
