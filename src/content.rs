//! Turns a page's drawing list into PDF content stream operators.

use crate::font::Font;
use crate::page::{LineLayout, PageContents, RectLayout, SpanLayout, Stroke};
use id_arena::Arena;
use pdf_writer::{Content, Name, Str};

pub(crate) fn render_contents(contents: &[PageContents], fonts: &Arena<Font>) -> Vec<u8> {
    let mut content = Content::new();

    for page_content in contents.iter() {
        match page_content {
            PageContents::Text(span) => render_span(&mut content, span, fonts),
            PageContents::Rect(rect) => render_rect(&mut content, rect),
            PageContents::Line(line) => render_line(&mut content, line),
        }
    }

    content.finish()
}

fn render_span(content: &mut Content, span: &SpanLayout, fonts: &Arena<Font>) {
    if span.text.is_empty() {
        return;
    }
    let Some(font) = fonts.get(span.font.id) else {
        return;
    };

    content.save_state();
    span.colour.apply_fill(content);
    content.begin_text();
    content.set_font(
        Name(format!("F{}", span.font.id.index()).as_bytes()),
        span.font.size.into(),
    );
    content.next_line(span.coords.0.into(), span.coords.1.into());
    content.show(Str(&font.encode(&span.text)));
    content.end_text();
    content.restore_state();
}

fn apply_stroke(content: &mut Content, stroke: &Stroke) {
    stroke.colour.apply_stroke(content);
    content.set_line_width(stroke.width.into());
}

fn render_rect(content: &mut Content, layout: &RectLayout) {
    let rect = layout.rect;
    content.save_state();
    if let Some(fill) = layout.fill {
        fill.apply_fill(content);
    }
    if let Some(stroke) = &layout.stroke {
        apply_stroke(content, stroke);
    }
    content.rect(
        rect.x1.into(),
        rect.y1.into(),
        rect.width().into(),
        rect.height().into(),
    );
    match (layout.fill.is_some(), layout.stroke.is_some()) {
        (true, true) => content.fill_nonzero_and_stroke(),
        (true, false) => content.fill_nonzero(),
        (false, true) => content.stroke(),
        (false, false) => content.end_path(),
    };
    content.restore_state();
}

fn render_line(content: &mut Content, line: &LineLayout) {
    content.save_state();
    apply_stroke(content, &line.stroke);
    content.move_to(line.from.0.into(), line.from.1.into());
    content.line_to(line.to.0.into(), line.to.1.into());
    content.stroke();
    content.restore_state();
}
