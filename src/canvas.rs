//! A cursor-driven drawing surface that fills [Page]s one after another.
//!
//! Everything on a [Canvas] is addressed in millimetres from the top-left corner of the
//! page, which is how invoice geometry is usually sketched. Coordinates are only converted
//! to PDF user space (points, bottom-left origin) when a primitive lands on the page.
//!
//! Cells that would cross the page break trigger (the page height less the bottom break
//! margin) continue at the top of a new page. A footer set with [Canvas::set_footer] is
//! drawn on every page as it is closed.

use crate::colour::{colours, Colour};
use crate::document::Document;
use crate::font::{Font, FontFamily};
use crate::layout::{width_of_text, wrap_lines, Margins};
use crate::page::{LineLayout, Page, RectLayout, SpanFont, SpanLayout, Stroke};
use crate::pagesize::{self, PageSize};
use crate::rect::Rect;
use crate::units::*;
use id_arena::{Arena, Id};

/// Horizontal placement of text inside a cell
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

/// Which edges of a cell get outlined
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum Borders {
    #[default]
    None,
    Bottom,
    All,
}

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum Weight {
    #[default]
    Regular,
    Bold,
}

/// The active font: which face of the family and how large
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FontStyle {
    pub weight: Weight,
    pub size: Pt,
}

impl Default for FontStyle {
    fn default() -> Self {
        FontStyle {
            weight: Weight::Regular,
            size: Pt(12.0),
        }
    }
}

/// Everything a drawing call depends on besides its own arguments.
///
/// Saving a copy and restoring it later is how callers temporarily change the cursor or
/// style without disturbing the surrounding layout.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CursorState {
    pub x: Mm,
    pub y: Mm,
    pub font: FontStyle,
    pub text_colour: Colour,
    pub fill_colour: Colour,
    pub draw_colour: Colour,
    pub line_width: Mm,
}

/// A single-line box of text, drawn at the cursor
#[derive(Debug, Clone, PartialEq)]
pub struct Cell<'t> {
    /// A width of zero extends the cell to the right margin
    pub width: Mm,
    pub height: Mm,
    pub text: &'t str,
    pub align: Align,
    pub border: Borders,
    pub fill: bool,
    /// Move to the start of the next line afterwards instead of to the right of the cell
    pub line_break: bool,
}

impl<'t> Cell<'t> {
    pub fn new(width: Mm, height: Mm, text: &'t str) -> Cell<'t> {
        Cell {
            width,
            height,
            text,
            align: Align::Left,
            border: Borders::None,
            fill: false,
            line_break: false,
        }
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn border(mut self, border: Borders) -> Self {
        self.border = border;
        self
    }

    pub fn fill(mut self, fill: bool) -> Self {
        self.fill = fill;
        self
    }

    pub fn line_break(mut self, line_break: bool) -> Self {
        self.line_break = line_break;
        self
    }
}

/// Drawn onto every page just before it is closed
pub type Footer<'d> = Box<dyn Fn(&mut Canvas<'d>) + 'd>;

pub struct Canvas<'d> {
    fonts: &'d Arena<Font>,
    family: FontFamily,
    size: PageSize,
    /// Closed pages, in order
    pages: Vec<Page>,
    page: Page,
    page_width: Mm,
    page_height: Mm,
    margins: Margins,
    cell_margin: Mm,
    /// Bottom margin of the automatic page break, `None` when breaking is off
    break_margin: Option<Mm>,
    footer: Option<Footer<'d>>,
    in_footer: bool,
    state: CursorState,
    last_height: Mm,
}

impl<'d> Canvas<'d> {
    /// Start drawing a fresh page. The cursor begins at the top-left margin corner and
    /// pages break automatically 20 mm above the bottom edge.
    pub fn new(doc: &'d Document, family: FontFamily, size: PageSize, margins: Margins) -> Canvas<'d> {
        let page = Page::new(size, Some(&margins));
        let state = CursorState {
            x: margins.left,
            y: margins.top,
            font: FontStyle::default(),
            text_colour: colours::BLACK,
            fill_colour: colours::BLACK,
            draw_colour: colours::BLACK,
            line_width: Mm(0.2),
        };

        Canvas {
            fonts: &doc.fonts,
            family,
            size,
            pages: Vec::new(),
            page,
            page_width: Mm::from(size.0),
            page_height: Mm::from(size.1),
            margins,
            cell_margin: Mm(1.0),
            break_margin: Some(Mm(20.0)),
            footer: None,
            in_footer: false,
            state,
            last_height: Mm(0.0),
        }
    }

    /// An A4 portrait page with 10 mm margins
    pub fn a4(doc: &'d Document, family: FontFamily) -> Canvas<'d> {
        Canvas::new(doc, family, pagesize::A4, Margins::all(Mm(10.0)))
    }

    pub fn x(&self) -> Mm {
        self.state.x
    }

    pub fn y(&self) -> Mm {
        self.state.y
    }

    pub fn left_margin(&self) -> Mm {
        self.margins.left
    }

    /// The x coordinate of the right margin
    pub fn right_edge(&self) -> Mm {
        self.page_width - self.margins.right
    }

    pub fn page_height(&self) -> Mm {
        self.page_height
    }

    /// Horizontal padding applied to text inside cells
    pub fn cell_margin(&self) -> Mm {
        self.cell_margin
    }

    /// Height of the most recently drawn cell
    pub fn last_height(&self) -> Mm {
        self.last_height
    }

    /// A copy of the current cursor and style
    pub fn save(&self) -> CursorState {
        self.state
    }

    pub fn restore(&mut self, state: CursorState) {
        self.state = state;
    }

    /// Run `f`, then put the cursor and style back the way they were
    pub fn scoped<R, F: FnOnce(&mut Canvas<'d>) -> R>(&mut self, f: F) -> R {
        let saved = self.save();
        let result = f(self);
        self.restore(saved);
        result
    }

    /// Set the abscissa. Negative values are measured from the right edge of the page.
    pub fn set_x(&mut self, x: Mm) {
        self.state.x = if x.0 < 0.0 { self.page_width + x } else { x };
    }

    /// Set the ordinate and move x back to the left margin. Negative values are measured
    /// from the bottom edge of the page.
    pub fn set_y(&mut self, y: Mm) {
        self.state.x = self.margins.left;
        self.state.y = if y.0 < 0.0 { self.page_height + y } else { y };
    }

    pub fn set_xy(&mut self, x: Mm, y: Mm) {
        self.set_y(y);
        self.set_x(x);
    }

    /// Line break: back to the left margin, `h` further down
    pub fn ln(&mut self, h: Mm) {
        self.state.x = self.margins.left;
        self.state.y += h;
    }

    /// Line break by the height of the last drawn cell
    pub fn newline(&mut self) {
        self.ln(self.last_height);
    }

    pub fn set_font(&mut self, weight: Weight, size: Pt) {
        self.state.font = FontStyle { weight, size };
    }

    pub fn set_text_colour(&mut self, colour: Colour) {
        self.state.text_colour = colour;
    }

    pub fn set_fill_colour(&mut self, colour: Colour) {
        self.state.fill_colour = colour;
    }

    pub fn set_draw_colour(&mut self, colour: Colour) {
        self.state.draw_colour = colour;
    }

    pub fn set_line_width(&mut self, width: Mm) {
        self.state.line_width = width;
    }

    /// Break pages automatically `margin` above the bottom edge, or never with `None`
    pub fn set_auto_page_break(&mut self, margin: Option<Mm>) {
        self.break_margin = margin;
    }

    /// The y past which content moves to the next page
    pub fn page_break_trigger(&self) -> Option<Mm> {
        self.break_margin.map(|margin| self.page_height - margin)
    }

    /// Draw `footer` on every page as it is closed, including the page being drawn now.
    /// The cursor and style are restored afterwards and nothing inside it breaks the page.
    pub fn set_footer<F: Fn(&mut Canvas<'d>) + 'd>(&mut self, footer: F) {
        self.footer = Some(Box::new(footer));
    }

    /// Pages drawn so far, counting the open one
    pub fn page_count(&self) -> usize {
        self.pages.len() + 1
    }

    fn crosses_trigger(&self, h: Mm) -> bool {
        !self.in_footer
            && self
                .page_break_trigger()
                .is_some_and(|trigger| self.state.y + h > trigger)
    }

    fn close_page(&mut self) {
        if let Some(footer) = self.footer.take() {
            let saved = self.save();
            self.in_footer = true;
            footer(self);
            self.in_footer = false;
            self.restore(saved);
            self.footer = Some(footer);
        }
    }

    /// Close the current page and continue at the top-left margin corner of a new one
    pub fn add_page(&mut self) {
        self.close_page();
        let page = std::mem::replace(&mut self.page, Page::new(self.size, Some(&self.margins)));
        self.pages.push(page);
        self.state.x = self.margins.left;
        self.state.y = self.margins.top;
        tracing::debug!(page = self.page_count(), "started new page");
    }

    /// Move to a new page unless `h` more fits above the break trigger. A block taller
    /// than a whole page only breaks when the cursor is not already at the top. The
    /// abscissa is kept. Returns whether a new page was started.
    pub fn ensure_space(&mut self, h: Mm) -> bool {
        if !self.crosses_trigger(h) || self.state.y <= self.margins.top {
            return false;
        }
        let x = self.state.x;
        self.add_page();
        self.state.x = x;
        true
    }

    fn font_id(&self) -> Id<Font> {
        match self.state.font.weight {
            Weight::Regular => self.family.regular,
            Weight::Bold => self.family.bold,
        }
    }

    fn font(&self) -> Option<&'d Font> {
        self.fonts.get(self.font_id())
    }

    /// Width of `text` in the current font
    pub fn text_width(&self, text: &str) -> Mm {
        match self.font() {
            Some(font) => Mm::from(width_of_text(text, font, self.state.font.size)),
            None => Mm(0.0),
        }
    }

    fn to_page(&self, x: Mm, y: Mm) -> (Pt, Pt) {
        (Pt::from(x), Pt::from(self.page_height - y))
    }

    fn stroke(&self) -> Stroke {
        Stroke {
            colour: self.state.draw_colour,
            width: Pt::from(self.state.line_width),
        }
    }

    fn page_rect(&self, x: Mm, y: Mm, w: Mm, h: Mm) -> Rect {
        let (x1, y2) = self.to_page(x, y);
        let (x2, y1) = self.to_page(x + w, y + h);
        Rect { x1, y1, x2, y2 }
    }

    /// Draw a straight line between two points using the draw colour and line width
    pub fn line(&mut self, x1: Mm, y1: Mm, x2: Mm, y2: Mm) {
        let line = LineLayout {
            from: self.to_page(x1, y1),
            to: self.to_page(x2, y2),
            stroke: self.stroke(),
        };
        self.page.add_line(line);
    }

    /// Outline a rectangle whose top-left corner is at (`x`, `y`)
    pub fn rect(&mut self, x: Mm, y: Mm, w: Mm, h: Mm) {
        let rect = RectLayout {
            rect: self.page_rect(x, y, w, h),
            fill: None,
            stroke: Some(self.stroke()),
        };
        self.page.add_rect(rect);
    }

    /// Draw a single line of text in a box at the cursor, then move the cursor either to
    /// the right of the box or to the start of the next line.
    ///
    /// The text is never clipped or wrapped; whatever does not fit spills out of the box.
    pub fn cell(&mut self, cell: Cell) {
        let Cell {
            width,
            height,
            text,
            align,
            border,
            fill,
            line_break,
        } = cell;

        if self.crosses_trigger(height) {
            let x = self.state.x;
            self.add_page();
            self.state.x = x;
        }

        let (x, y) = (self.state.x, self.state.y);
        let width = if width.0 == 0.0 {
            self.right_edge() - x
        } else {
            width
        };

        if fill || border == Borders::All {
            let rect = RectLayout {
                rect: self.page_rect(x, y, width, height),
                fill: fill.then_some(self.state.fill_colour),
                stroke: (border == Borders::All).then(|| self.stroke()),
            };
            self.page.add_rect(rect);
        }
        if border == Borders::Bottom {
            self.line(x, y + height, x + width, y + height);
        }

        if !text.is_empty() {
            self.place_text(x, y, width, height, text, align);
        }

        self.last_height = height;
        if line_break {
            self.state.x = self.margins.left;
            self.state.y = y + height;
        } else {
            self.state.x = x + width;
        }
    }

    fn place_text(&mut self, x: Mm, y: Mm, width: Mm, height: Mm, text: &str, align: Align) {
        let text_width = self.text_width(text);
        let dx = match align {
            Align::Left => self.cell_margin,
            Align::Center => (width - text_width) / 2.0,
            Align::Right => width - self.cell_margin - text_width,
        };
        let size = self.state.font.size;
        let baseline = y + height / 2.0 + Mm::from(size) * 0.3;

        let span = SpanLayout {
            text: text.to_string(),
            font: SpanFont {
                id: self.font_id(),
                size,
            },
            colour: self.state.text_colour,
            coords: self.to_page(x + dx, baseline),
        };
        self.page.add_span(span);
    }

    fn box_width(&self, w: Mm) -> Mm {
        if w.0 == 0.0 {
            self.right_edge() - self.state.x
        } else {
            w
        }
    }

    /// The lines `text` wraps into inside a box `w` wide at the current font, the way
    /// [Canvas::multi_cell] would draw them
    pub fn wrap_text(&self, w: Mm, text: &str) -> Vec<String> {
        let max_width = Pt::from(self.box_width(w) - self.cell_margin * 2.0);
        match self.font() {
            Some(font) => wrap_lines(font, self.state.font.size, text, max_width),
            None => vec![text.to_string()],
        }
    }

    /// Draw `text` wrapped into lines of height `h` within a box `w` wide (zero extends to
    /// the right margin). At least one line is always drawn, and lines past the break
    /// trigger continue on a new page.
    ///
    /// Afterwards the cursor sits at the right edge of the box, just below its last line;
    /// that y is also returned.
    pub fn multi_cell(&mut self, w: Mm, h: Mm, text: &str, align: Align) -> Mm {
        let x = self.state.x;
        let width = self.box_width(w);
        let lines = self.wrap_text(width, text);

        for line in lines.iter() {
            self.state.x = x;
            self.cell(Cell::new(width, h, line).align(align));
            self.state.y += h;
        }

        self.state.x = x + width;
        self.state.y
    }

    /// The page being drawn
    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Close the open page and hand over every page, in order
    pub fn finish(mut self) -> Vec<Page> {
        self.close_page();
        self.pages.push(self.page);
        self.pages
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::PageContents;
    use crate::resolver::StandardFonts;
    use pretty_assertions::assert_eq;

    fn document() -> (Document, FontFamily) {
        let mut doc = Document::default();
        let family = doc.add_font_family(&StandardFonts).unwrap();
        (doc, family)
    }

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn starts_at_the_margin_corner() {
        let (doc, family) = document();
        let canvas = Canvas::a4(&doc, family);
        assert_eq!((canvas.x(), canvas.y()), (Mm(10.0), Mm(10.0)));
        assert!(close(canvas.right_edge().0, 200.0));
    }

    #[test]
    fn cell_advances_right_or_breaks_line() {
        let (doc, family) = document();
        let mut canvas = Canvas::a4(&doc, family);
        canvas.cell(Cell::new(Mm(30.0), Mm(5.0), "Bill To:"));
        assert_eq!((canvas.x(), canvas.y()), (Mm(40.0), Mm(10.0)));

        canvas.cell(Cell::new(Mm(30.0), Mm(6.0), "x").line_break(true));
        assert_eq!((canvas.x(), canvas.y()), (Mm(10.0), Mm(16.0)));
        assert_eq!(canvas.last_height(), Mm(6.0));
    }

    #[test]
    fn zero_width_extends_to_the_right_margin() {
        let (doc, family) = document();
        let mut canvas = Canvas::a4(&doc, family);
        canvas.set_x(Mm(50.0));
        canvas.cell(Cell::new(Mm(0.0), Mm(5.0), ""));
        assert!(close(canvas.x().0, 200.0));
    }

    #[test]
    fn text_is_aligned_inside_the_padding() {
        let (doc, family) = document();
        let mut canvas = Canvas::a4(&doc, family);
        canvas.set_font(Weight::Regular, Pt(10.0));
        canvas.cell(Cell::new(Mm(50.0), Mm(6.0), "left"));
        canvas.set_x(Mm(10.0));
        canvas.cell(Cell::new(Mm(50.0), Mm(6.0), "right").align(Align::Right));

        let right_width = canvas.text_width("right");
        let spans: Vec<_> = canvas.page().spans().cloned().collect();
        assert_eq!(spans.len(), 2);
        assert!(close(Mm::from(spans[0].coords.0).0, 11.0));
        assert!(close(Mm::from(spans[1].coords.0).0, 60.0 - 1.0 - right_width.0));
    }

    #[test]
    fn baseline_sits_below_the_cell_middle() {
        let (doc, family) = document();
        let mut canvas = Canvas::a4(&doc, family);
        canvas.set_font(Weight::Bold, Pt(10.0));
        canvas.cell(Cell::new(Mm(50.0), Mm(6.0), "INVOICE"));

        let span = canvas.page().spans().next().cloned().unwrap();
        let size_mm = Mm::from(Pt(10.0)).0;
        let expected_top_down = 10.0 + 3.0 + 0.3 * size_mm;
        assert!(close(
            (canvas.page_height() - Mm::from(span.coords.1)).0,
            expected_top_down
        ));
        assert_eq!(span.font.id, family.bold);
    }

    #[test]
    fn bordered_and_bottom_bordered_cells() {
        let (doc, family) = document();
        let mut canvas = Canvas::a4(&doc, family);
        canvas.cell(Cell::new(Mm(20.0), Mm(5.0), "").border(Borders::All));
        canvas.cell(Cell::new(Mm(20.0), Mm(5.0), "").border(Borders::Bottom));
        canvas.cell(Cell::new(Mm(20.0), Mm(5.0), ""));

        let contents = &canvas.page().contents;
        assert_eq!(contents.len(), 2);
        assert!(matches!(contents[0], PageContents::Rect(_)));
        assert!(matches!(contents[1], PageContents::Line(_)));
    }

    #[test]
    fn multi_cell_leaves_cursor_right_of_the_box() {
        let (doc, family) = document();
        let mut canvas = Canvas::a4(&doc, family);
        canvas.set_font(Weight::Regular, Pt(9.0));
        let end = canvas.multi_cell(Mm(60.0), Mm(4.0), "line one\nline two\nline three", Align::Left);
        assert_eq!(end, Mm(22.0));
        assert_eq!((canvas.x(), canvas.y()), (Mm(70.0), Mm(22.0)));
    }

    #[test]
    fn multi_cell_draws_at_least_one_line() {
        let (doc, family) = document();
        let mut canvas = Canvas::a4(&doc, family);
        let end = canvas.multi_cell(Mm(60.0), Mm(5.0), "", Align::Left);
        assert_eq!(end, Mm(15.0));
    }

    #[test]
    fn negative_y_counts_from_the_bottom() {
        let (doc, family) = document();
        let mut canvas = Canvas::a4(&doc, family);
        canvas.set_x(Mm(80.0));
        canvas.set_y(Mm(-30.0));
        assert_eq!(canvas.x(), Mm(10.0));
        assert!(close(canvas.y().0, 267.0));
    }

    #[test]
    fn scoped_restores_the_cursor_and_style() {
        let (doc, family) = document();
        let mut canvas = Canvas::a4(&doc, family);
        let before = canvas.save();
        canvas.scoped(|c| {
            c.set_xy(Mm(120.0), Mm(40.0));
            c.set_font(Weight::Bold, Pt(24.0));
            c.set_fill_colour(Colour::new_grey_bytes(240));
            c.set_line_width(Mm(0.5));
        });
        assert_eq!(canvas.save(), before);
    }

    #[test]
    fn cell_past_the_trigger_moves_to_a_new_page() {
        let (doc, family) = document();
        let mut canvas = Canvas::a4(&doc, family);
        canvas.set_auto_page_break(Some(Mm(15.0)));
        canvas.set_xy(Mm(50.0), Mm(280.0));
        canvas.cell(Cell::new(Mm(30.0), Mm(6.0), "Total"));

        assert_eq!(canvas.page_count(), 2);
        assert_eq!((canvas.x(), canvas.y()), (Mm(80.0), Mm(10.0)));
        let span = canvas.page().spans().next().cloned().unwrap();
        assert!(close(Mm::from(span.coords.0).0, 51.0));

        let pages = canvas.finish();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].spans().count(), 0);
    }

    #[test]
    fn multi_cell_lines_continue_on_the_next_page() {
        let (doc, family) = document();
        let mut canvas = Canvas::a4(&doc, family);
        canvas.set_y(Mm(270.0));
        let end = canvas.multi_cell(Mm(60.0), Mm(5.0), "one\ntwo\nthree", Align::Left);
        assert_eq!(canvas.page_count(), 2);
        assert_eq!(end, Mm(20.0));
        assert_eq!(canvas.page().spans().count(), 2);
    }

    #[test]
    fn disabled_breaking_draws_past_the_bottom() {
        let (doc, family) = document();
        let mut canvas = Canvas::a4(&doc, family);
        canvas.set_auto_page_break(None);
        canvas.set_y(Mm(290.0));
        canvas.cell(Cell::new(Mm(30.0), Mm(6.0), "x"));
        assert_eq!(canvas.page_count(), 1);
        assert!(!canvas.ensure_space(Mm(50.0)));
    }

    #[test]
    fn ensure_space_never_leaves_a_blank_page() {
        let (doc, family) = document();
        let mut canvas = Canvas::a4(&doc, family);
        assert!(!canvas.ensure_space(Mm(500.0)));
        canvas.set_y(Mm(200.0));
        assert!(canvas.ensure_space(Mm(100.0)));
        assert_eq!(canvas.y(), Mm(10.0));
    }

    #[test]
    fn footer_is_drawn_on_every_page_without_disturbing_the_cursor() {
        let (doc, family) = document();
        let mut canvas = Canvas::a4(&doc, family);
        canvas.set_footer(|c| {
            c.set_y(Mm(-30.0));
            c.set_font(Weight::Bold, Pt(10.0));
            c.cell(Cell::new(Mm(0.0), Mm(5.0), "Thank you").align(Align::Center));
        });
        canvas.set_font(Weight::Regular, Pt(9.0));
        canvas.set_y(Mm(250.0));
        canvas.add_page();

        assert_eq!(canvas.y(), Mm(10.0));
        assert_eq!(canvas.save().font.weight, Weight::Regular);
        assert_eq!(canvas.page_count(), 2);

        let pages = canvas.finish();
        for page in pages.iter() {
            let footer: Vec<_> = page.spans().filter(|s| s.text == "Thank you").collect();
            assert_eq!(footer.len(), 1);
        }
    }

    #[test]
    fn custom_margins_move_the_line_start() {
        let (doc, family) = document();
        let margins = Margins::trbl(Mm(15.0), Mm(10.0), Mm(15.0), Mm(25.0));
        let mut canvas = Canvas::new(&doc, family, pagesize::LETTER, margins);
        assert_eq!((canvas.x(), canvas.y()), (Mm(25.0), Mm(15.0)));
        canvas.set_x(Mm(100.0));
        canvas.ln(Mm(5.0));
        assert_eq!((canvas.x(), canvas.y()), (Mm(25.0), Mm(20.0)));
    }
}
