use crate::{
    error::RenderError,
    refs::{ObjectReferences, RefType},
    standard_fonts::{encode_win_ansi, win_ansi_code, StandardFont},
    units::Pt,
};
use id_arena::Id;
use owned_ttf_parser::{AsFaceRef, Face, GlyphId, OwnedFace};
use pdf_writer::{
    types::{CidFontType, FontFlags, SystemInfo},
    Finish, Name, Pdf, Ref, Str,
};
use std::collections::BTreeMap;

/// A font that text can be measured and drawn with.
///
/// TrueType / OpenType faces are embedded in their entirety as CID fonts, so large fonts
/// will noticeably grow the generated PDF. Standard fonts are only referenced by name
/// and are supplied by the PDF viewer.
///
/// Fonts are referred to throughout the crate by their [Id] within the
/// [Document](crate::Document) rather than by any typed reference.
pub enum Font {
    TrueType(OwnedFace),
    Standard(StandardFont),
}

/// The regular and bold faces of the one family an invoice is set in
pub struct FontFaces {
    pub regular: Font,
    pub bold: Font,
}

/// A [FontFaces] pair after it was registered with a [Document](crate::Document)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FontFamily {
    pub regular: Id<Font>,
    pub bold: Id<Font>,
}

impl Font {
    /// Load a font from raw bytes, parsing the font and returning an error if the font
    /// could not be parsed
    pub fn load(bytes: Vec<u8>) -> Result<Font, RenderError> {
        let face = OwnedFace::from_vec(bytes, 0)?;
        Ok(Font::TrueType(face))
    }

    pub fn standard(font: StandardFont) -> Font {
        Font::Standard(font)
    }

    /// Obtain the full name of the font
    pub fn name(&self) -> String {
        match self {
            Font::TrueType(face) => {
                face_name(face.as_face_ref(), owned_ttf_parser::name_id::FULL_NAME)
                    .unwrap_or_else(|| "Embedded".to_string())
            }
            Font::Standard(font) => font.base_name().to_string(),
        }
    }

    /// Horizontal advance of a single character at the given size. Characters the font
    /// can't draw are measured as whatever replaces them when drawn.
    pub fn char_width(&self, ch: char, size: Pt) -> Pt {
        match self {
            Font::TrueType(face) => {
                let face = face.as_face_ref();
                let scaling = size / face.units_per_em() as f32;
                let advance = face
                    .glyph_hor_advance(GlyphId(glyph_or_replacement(face, ch)))
                    .unwrap_or_default();
                scaling * advance as f32
            }
            Font::Standard(font) => {
                let code = win_ansi_code(ch).unwrap_or(b'?');
                size * (font.width(code) as f32 / 1000.0)
            }
        }
    }

    /// Encode text into the byte string a content stream `Tj` expects for this font
    pub fn encode(&self, text: &str) -> Vec<u8> {
        match self {
            Font::TrueType(face) => text
                .chars()
                .flat_map(|ch| glyph_or_replacement(face.as_face_ref(), ch).to_be_bytes())
                .collect(),
            Font::Standard(_) => encode_win_ansi(text),
        }
    }

    pub(crate) fn write(&self, refs: &mut ObjectReferences, id: Id<Font>, writer: &mut Pdf) {
        let font_index = id.index();
        let font_id = refs.allocate(RefType::Font(font_index));

        match self {
            Font::Standard(font) => {
                writer
                    .type1_font(font_id)
                    .base_font(Name(font.base_name().as_bytes()))
                    .encoding_predefined(Name(b"WinAnsiEncoding"));
            }
            Font::TrueType(face) => {
                let face_ref = face.as_face_ref();
                let cid_font_id = write_cid(face, refs, font_index, writer);
                let to_unicode_id = write_to_unicode(face_ref, refs, font_index, writer);

                let mut font = writer.type0_font(font_id);
                font.base_font(Name(format!("F{font_index}").as_bytes()));
                font.encoding_predefined(Name(b"Identity-H"));
                font.descendant_font(cid_font_id);
                font.to_unicode(to_unicode_id);
            }
        }
    }
}

fn face_name(face: &Face, name_id: u16) -> Option<String> {
    face.names()
        .into_iter()
        .find(|name| name.name_id == name_id && name.is_unicode())
        .and_then(|name| name.to_string())
}

fn glyph_or_replacement(face: &Face, ch: char) -> u16 {
    face.glyph_index(ch)
        .or_else(|| face.glyph_index('\u{FFFD}'))
        .or_else(|| face.glyph_index('?'))
        .map(|gid| gid.0)
        .unwrap_or(0)
}

/// Every glyph reachable through a unicode cmap subtable, keyed by glyph id
fn glyph_ids(face: &Face) -> BTreeMap<u16, char> {
    let mut map: BTreeMap<u16, char> = BTreeMap::new();

    let Some(cmap) = face.tables().cmap else {
        return map;
    };

    for subtable in cmap.subtables.into_iter().filter(|table| table.is_unicode()) {
        subtable.codepoints(|codepoint: u32| {
            if let Ok(ch) = char::try_from(codepoint) {
                if let Some(index) = subtable.glyph_index(codepoint).filter(|index| index.0 > 0) {
                    map.entry(index.0).or_insert(ch);
                }
            }
        });
    }

    map
}

/// (advance, height) for every glyph id, in font units
fn glyphs_sizing(face: &Face, ids: &BTreeMap<u16, char>) -> BTreeMap<u16, (u16, i16)> {
    let mut sizing = BTreeMap::new();
    for (&id, &ch) in ids.iter() {
        if let Some(gid) = face.glyph_index(ch) {
            if let Some(h_advance) = face.glyph_hor_advance(gid) {
                let height = face
                    .glyph_bounding_box(gid)
                    .map(|bbox| bbox.y_max - bbox.y_min - face.descender())
                    .unwrap_or(1000);
                sizing.insert(id, (h_advance, height));
            }
        }
    }
    sizing
}

fn write_cid(face: &OwnedFace, refs: &mut ObjectReferences, font_index: usize, writer: &mut Pdf) -> Ref {
    let face_ref = face.as_face_ref();
    let font_descriptor_id = write_descriptor(face, refs, font_index, writer);

    let id = refs.allocate(RefType::CidFont(font_index));

    let mut cid_font = writer.cid_font(id);
    cid_font.subtype(CidFontType::Type2);
    cid_font.base_font(Name(format!("F{font_index}").as_bytes()));
    cid_font.system_info(SystemInfo {
        registry: Str(b"Adobe"),
        ordering: Str(b"Identity"),
        supplement: 0,
    });
    cid_font.font_descriptor(font_descriptor_id);

    let sizing = glyphs_sizing(face_ref, &glyph_ids(face_ref));
    let scaling = 1000.0 / face_ref.units_per_em() as f32;

    // the most frequent advance becomes the default width
    let mut widths_counts: BTreeMap<u16, usize> = BTreeMap::new();
    for &(width, _) in sizing.values() {
        *widths_counts.entry(width).or_insert(0) += 1;
    }
    let most_common_width = widths_counts
        .iter()
        .max_by_key(|&(_, count)| *count)
        .map(|(&width, _)| width as f32 * scaling)
        .unwrap_or(1000.0);

    let mut widths = cid_font.widths();
    let mut run: Option<(u16, Vec<f32>)> = None;
    for (&cid, &(width, _)) in sizing.iter() {
        let width = width as f32 * scaling;
        match run.as_mut() {
            Some((start, run_widths)) if (cid - *start) as usize == run_widths.len() => {
                run_widths.push(width);
            }
            _ => {
                if let Some((start, run_widths)) = run.take() {
                    widths.consecutive(start, run_widths);
                }
                run = Some((cid, vec![width]));
            }
        }
    }
    if let Some((start, run_widths)) = run {
        widths.consecutive(start, run_widths);
    }
    widths.finish();

    cid_font.default_width(most_common_width);
    cid_font.cid_to_gid_map_predefined(Name(b"Identity"));

    id
}

fn write_font_data(face: &OwnedFace, refs: &mut ObjectReferences, font_index: usize, writer: &mut Pdf) -> Ref {
    let id = refs.allocate(RefType::FontData(font_index));

    writer
        .stream(id, face.as_slice())
        .pair(Name(b"Length1"), face.as_slice().len() as i32);

    id
}

fn write_descriptor(
    face: &OwnedFace,
    refs: &mut ObjectReferences,
    font_index: usize,
    writer: &mut Pdf,
) -> Ref {
    let font_data_stream_id = write_font_data(face, refs, font_index, writer);
    let face_ref = face.as_face_ref();

    let sizing = glyphs_sizing(face_ref, &glyph_ids(face_ref));
    let max_width = sizing.values().map(|&(w, _)| w).max().unwrap_or_default();
    let max_height = sizing.values().map(|&(_, h)| h).max().unwrap_or_default();
    let sum_width: usize = sizing.values().map(|&(w, _)| w as usize).sum();
    let avg_width = sum_width as f32 / sizing.len().max(1) as f32;

    let id = refs.allocate(RefType::FontDescriptor(font_index));
    let name = face_name(face_ref, owned_ttf_parser::name_id::FULL_NAME)
        .unwrap_or_else(|| format!("F{font_index}"));
    let family = face_name(face_ref, owned_ttf_parser::name_id::FAMILY).unwrap_or_else(|| name.clone());
    let scaling = 1000.0 / face_ref.units_per_em() as f32;

    let mut descriptor = writer.font_descriptor(id);
    descriptor.name(Name(name.replace(' ', "").as_bytes()));
    descriptor.family(Str(family.as_bytes()));
    descriptor.weight(face_ref.weight().to_number());

    let mut flags: FontFlags = FontFlags::NON_SYMBOLIC;
    if face_ref.is_monospaced() {
        flags.set(FontFlags::FIXED_PITCH, true);
    }
    if face_ref.is_italic() {
        flags.set(FontFlags::ITALIC, true);
    }
    descriptor.flags(flags);

    descriptor.bbox(pdf_writer::Rect {
        x1: 0.0,
        y1: face_ref.descender() as f32 * scaling,
        x2: max_width as f32 * scaling,
        y2: max_height as f32 * scaling,
    });
    descriptor.italic_angle(if face_ref.is_italic() { -12.0 } else { 0.0 });
    descriptor.ascent(face_ref.ascender() as f32 * scaling);
    descriptor.descent(face_ref.descender() as f32 * scaling);
    descriptor.leading(face_ref.line_gap() as f32 * scaling);
    descriptor.cap_height(
        face_ref
            .capital_height()
            .map(|h| h as f32 * scaling)
            .unwrap_or(1000.0),
    );
    descriptor.x_height(
        face_ref
            .x_height()
            .unwrap_or_else(|| face_ref.capital_height().unwrap_or_default()) as f32
            * scaling,
    );
    // TODO: derive stem width from the OS/2 weight class instead of a fixed guess
    descriptor.stem_v(80.0);
    descriptor.avg_width(avg_width * scaling);
    descriptor.max_width(max_width as f32 * scaling);
    descriptor.missing_width(max_width as f32 * scaling);

    descriptor.font_file2(font_data_stream_id);

    id
}

fn write_to_unicode(face: &Face, refs: &mut ObjectReferences, font_index: usize, writer: &mut Pdf) -> Ref {
    let id = refs.allocate(RefType::ToUnicode(font_index));

    let mut map: String = r#"/CIDInit /ProcSet findresource begin
12 dict begin
begincmap
/CIDSystemInfo
<< /Registry (Adobe)
/Ordering (UCS) /Supplement 0 >> def
/CMapName /Adobe-Identity-UCS def
/CMapType 2 def
1 begincodespacerange
<0000> <FFFF>
endcodespacerange
"#
    .replace("\r\n", "\n");

    // bfchar blocks hold at most 100 entries and share a high byte
    let ids: Vec<(u16, char)> = glyph_ids(face).into_iter().collect();
    let mut cmap_blocks: Vec<Vec<(u16, char)>> = Vec::new();
    let mut current_block: Vec<(u16, char)> = Vec::new();
    let mut high_byte: u8 = 0;
    for &(id, ch) in ids.iter() {
        if (id >> 8) as u8 != high_byte || current_block.len() >= 100 {
            if !current_block.is_empty() {
                cmap_blocks.push(std::mem::take(&mut current_block));
            }
            high_byte = (id >> 8) as u8;
        }
        current_block.push((id, ch));
    }
    if !current_block.is_empty() {
        cmap_blocks.push(current_block);
    }

    for block in cmap_blocks.into_iter() {
        map.push_str(&format!("{} beginbfchar\n", block.len()));
        for (id, ch) in block.into_iter() {
            let mut utf16 = [0u16; 2];
            let units: String = ch
                .encode_utf16(&mut utf16)
                .iter()
                .map(|unit| format!("{unit:04x}"))
                .collect();
            map.push_str(&format!("<{id:04x}> <{units}>\n"));
        }
        map.push_str("endbfchar\n");
    }

    map.push_str("endcmap CMapName currentdict /CMap defineresource pop end end\n");

    let compressed = miniz_oxide::deflate::compress_to_vec_zlib(
        map.as_bytes(),
        miniz_oxide::deflate::CompressionLevel::DefaultCompression as u8,
    );
    let mut stream = writer.stream(id, compressed.as_slice());
    stream.filter(pdf_writer::Filter::FlateDecode);

    id
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_fonts_measure_from_afm_widths() {
        let font = Font::standard(StandardFont::Helvetica);
        assert!((font.char_width('a', Pt(10.0)).0 - 5.56).abs() < 1e-4);
        assert!((font.char_width(' ', Pt(10.0)).0 - 2.78).abs() < 1e-4);
    }

    #[test]
    fn unmapped_chars_measure_and_encode_as_question_marks() {
        let font = Font::standard(StandardFont::Helvetica);
        assert_eq!(font.encode("a\u{151}"), vec![b'a', b'?']);
        assert_eq!(font.char_width('\u{151}', Pt(10.0)), font.char_width('?', Pt(10.0)));
    }

    #[derive(Clone, Default)]
    struct CapturedLog(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLog {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn replaced_chars_are_logged() {
        let log = CapturedLog::default();
        let writer = log.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        let font = Font::standard(StandardFont::Helvetica);
        tracing::subscriber::with_default(subscriber, || {
            font.encode("Szállító");
            font.encode("Fizetendő");
        });

        let output = String::from_utf8(log.0.lock().unwrap().clone()).unwrap();
        assert_eq!(output.matches("no WinAnsi code").count(), 1);
        assert!(output.contains("Fizetendő"));
    }

    #[test]
    fn latin_1_text_encodes_to_win_ansi() {
        let font = Font::standard(StandardFont::HelveticaBold);
        assert_eq!(font.encode("\u{c1}FA"), vec![0xC1, b'F', b'A']);
        assert_eq!(font.name(), "Helvetica-Bold");
    }

    #[test]
    fn garbage_bytes_are_not_a_font() {
        assert!(matches!(
            Font::load(vec![0, 1, 2, 3]),
            Err(RenderError::FaceParsing(_))
        ));
    }
}
