use crate::font::Font;
use crate::units::Pt;

const TABSIZE: usize = 4;

/// Tracks a position on the current line where we can safely break to a new line.
#[derive(Clone, Copy)]
struct BreakPoint {
    /// number of chars of the current line that stay on it
    line_char_idx: usize,
    /// char index within the paragraph where the next line resumes
    input_char_idx: usize,
}

/// Splits text into lines that fit within `max_width` when set in `font` at `size`.
///
/// # Wrapping Behavior
///
/// Explicit newlines always start a new line (`\r\n` and `\r` count as newlines too,
/// tabs are expanded to spaces). Within a paragraph, whitespace is recorded as a break
/// point as the text is measured; when a character would overflow the line, the line is
/// rewound to the most recent break point and the next line starts after it, so words stay
/// intact. If no break point exists (a single very long word), the word is split at the
/// character that overflows. A line always holds at least one character, so a glyph wider
/// than `max_width` still makes progress.
///
/// Whitespace at a break is dropped. The result always holds at least one line, which is
/// empty for empty input.
pub fn wrap_lines(font: &Font, size: Pt, text: &str, max_width: Pt) -> Vec<String> {
    // replace tabs with spaces
    let text = text.replace('\t', &" ".repeat(TABSIZE));
    // normalize newlines
    let text = text.replace("\r\n", "\n").replace('\r', "\n");

    let mut lines: Vec<String> = Vec::new();
    for paragraph in text.split('\n') {
        wrap_paragraph(font, size, paragraph, max_width, &mut lines);
    }
    lines
}

fn wrap_paragraph(font: &Font, size: Pt, paragraph: &str, max_width: Pt, lines: &mut Vec<String>) {
    let chars: Vec<char> = paragraph.chars().collect();

    let mut line: Vec<char> = Vec::new();
    let mut x = Pt(0.0);
    let mut last_break: Option<BreakPoint> = None;

    let mut ci = 0usize;
    while ci < chars.len() {
        let ch = chars[ci];
        let hadv = font.char_width(ch, size);

        if x + hadv > max_width && !line.is_empty() {
            let resume_at = if ch.is_whitespace() {
                // the overflowing whitespace is itself the break
                lines.push(finish_line(&line));
                ci
            } else if let Some(bp) = last_break {
                lines.push(finish_line(&line[..bp.line_char_idx]));
                bp.input_char_idx
            } else {
                // no break point - force a character break, ch starts the next line
                lines.push(line.iter().collect());
                line.clear();
                x = Pt(0.0);
                continue;
            };

            line.clear();
            x = Pt(0.0);
            last_break = None;
            ci = resume_at;
            while ci < chars.len() && chars[ci].is_whitespace() {
                ci += 1;
            }
            continue;
        }

        line.push(ch);
        x += hadv;
        if ch.is_whitespace() {
            last_break = Some(BreakPoint {
                line_char_idx: line.len(),
                input_char_idx: ci + 1,
            });
        }
        ci += 1;
    }

    lines.push(line.iter().collect());
}

fn finish_line(chars: &[char]) -> String {
    let line: String = chars.iter().collect();
    line.trim_end().to_string()
}

/// Calculate the width of a given string of text given the font and font size
pub fn width_of_text(text: &str, font: &Font, size: Pt) -> Pt {
    text.chars().map(|ch| font.char_width(ch, size)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::standard_fonts::StandardFont;
    use pretty_assertions::assert_eq;

    fn helvetica() -> Font {
        Font::standard(StandardFont::Helvetica)
    }

    #[test]
    fn short_text_stays_on_one_line() {
        let lines = wrap_lines(&helvetica(), Pt(10.0), "Logo Design", Pt(200.0));
        assert_eq!(lines, vec!["Logo Design".to_string()]);
    }

    #[test]
    fn breaks_at_the_last_space() {
        // "aaaa " is 25.02pt wide at 10pt, one more "a" overflows 30pt
        let lines = wrap_lines(&helvetica(), Pt(10.0), "aaaa aaaa", Pt(30.0));
        assert_eq!(lines, vec!["aaaa".to_string(), "aaaa".to_string()]);
    }

    #[test]
    fn long_words_are_split_by_character() {
        let lines = wrap_lines(&helvetica(), Pt(10.0), "aaaaaaaaaa", Pt(30.0));
        assert_eq!(lines, vec!["aaaaa".to_string(), "aaaaa".to_string()]);
    }

    #[test]
    fn explicit_newlines_start_new_lines() {
        let lines = wrap_lines(&helvetica(), Pt(10.0), "one\r\ntwo\n\nfour", Pt(200.0));
        assert_eq!(
            lines,
            vec![
                "one".to_string(),
                "two".to_string(),
                String::new(),
                "four".to_string()
            ]
        );
    }

    #[test]
    fn empty_text_is_one_empty_line() {
        let lines = wrap_lines(&helvetica(), Pt(10.0), "", Pt(30.0));
        assert_eq!(lines, vec![String::new()]);
    }

    #[test]
    fn glyph_wider_than_the_box_still_progresses() {
        let lines = wrap_lines(&helvetica(), Pt(10.0), "WW", Pt(1.0));
        assert_eq!(lines, vec!["W".to_string(), "W".to_string()]);
    }

    #[test]
    fn every_wrapped_line_fits() {
        let font = helvetica();
        let text = lipsum::lipsum(60);
        let max = Pt(120.0);
        let lines = wrap_lines(&font, Pt(9.0), &text, max);
        assert!(lines.len() > 1);
        for line in lines.iter() {
            assert!(width_of_text(line, &font, Pt(9.0)) <= max, "{line:?} overflows");
        }
    }

    #[test]
    fn width_sums_advances() {
        let font = helvetica();
        let width = width_of_text("aa", &font, Pt(10.0));
        assert!((width.0 - 11.12).abs() < 1e-4);
    }
}
