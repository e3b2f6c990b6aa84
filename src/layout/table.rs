//! The fixed-grid cell engine behind every invoice table.
//!
//! Columns have fixed widths and cells have fixed heights, except for at most one
//! "wrapping" column per row whose text may run over several lines. The row then takes the
//! height of whichever is taller: one line, or the wrapped text.

use crate::canvas::{Canvas, Cell, Weight};
use crate::colour::Colour;
use crate::record::LineItem;
use crate::units::*;

pub use crate::canvas::{Align, Borders};

/// One column of a table
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub width: Mm,
    pub label: &'static str,
    /// Alignment of body cells
    pub align: Align,
    /// Alignment of the header label, the body alignment unless overridden
    pub header_align: Align,
}

impl Column {
    pub fn new(width: Mm, label: &'static str, align: Align) -> Column {
        Column {
            width,
            label,
            align,
            header_align: align,
        }
    }

    pub fn header_align(mut self, align: Align) -> Self {
        self.header_align = align;
        self
    }
}

/// The ordered columns of one table
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSpec {
    columns: Vec<Column>,
}

impl ColumnSpec {
    pub fn new<I: IntoIterator<Item = Column>>(columns: I) -> ColumnSpec {
        ColumnSpec {
            columns: columns.into_iter().collect(),
        }
    }

    pub fn total_width(&self) -> Mm {
        self.columns.iter().map(|c| c.width).sum()
    }

    /// Summed width of columns `0..=index`
    pub fn width_through(&self, index: usize) -> Mm {
        self.columns.iter().take(index + 1).map(|c| c.width).sum()
    }

    pub fn get(&self, index: usize) -> Option<&Column> {
        self.columns.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Where a row started and where it ended
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RowExtent {
    /// The cursor before anything in the row was drawn
    pub origin: (Mm, Mm),
    /// The y just below the last line of the wrapping column
    pub wrap_end_y: Mm,
    /// Where the next row starts
    pub next_y: Mm,
}

fn value_at<S: AsRef<str>>(values: &[S], index: usize) -> &str {
    values.get(index).map(|v| v.as_ref()).unwrap_or("")
}

fn draw_cells<S: AsRef<str>>(
    canvas: &mut Canvas,
    columns: &ColumnSpec,
    values: &[S],
    range: std::ops::Range<usize>,
    height: Mm,
    borders: Borders,
) {
    for (index, column) in columns.iter().enumerate().skip(range.start).take(range.len()) {
        canvas.cell(
            Cell::new(column.width, height, value_at(values, index))
                .align(column.align)
                .border(borders),
        );
    }
}

/// Draw one single-line row at the cursor. Text wider than its column is drawn anyway,
/// spilling over its neighbours. The cursor ends at the right edge of the row.
pub fn draw_fixed_row<S: AsRef<str>>(
    canvas: &mut Canvas,
    columns: &ColumnSpec,
    values: &[S],
    row_height: Mm,
    borders: Borders,
) {
    draw_cells(canvas, columns, values, 0..columns.len(), row_height, borders);
}

/// Draw one row where column `wrap_column` wraps its text over as many lines of
/// `line_height` as it needs, while every other column stays a single line aligned with
/// the top of the row.
///
/// A row that does not fit above the page break trigger starts on a new page. Afterwards
/// the cursor is at the left margin, below the taller of the wrapped text and a single
/// line. An out of range `wrap_column` draws a plain fixed row.
pub fn draw_wrapping_row<S: AsRef<str>>(
    canvas: &mut Canvas,
    columns: &ColumnSpec,
    values: &[S],
    wrap_column: usize,
    line_height: Mm,
) -> RowExtent {
    let wrapped = columns.get(wrap_column).map(|column| {
        let text = value_at(values, wrap_column);
        let lines = canvas.wrap_text(column.width, text).len().max(1);
        (column, text, lines)
    });
    let lines = wrapped.as_ref().map_or(1, |(_, _, lines)| *lines);
    canvas.ensure_space(line_height * lines as f32);

    let origin = (canvas.x(), canvas.y());
    let page = canvas.page_count();

    let wrap_end_y = match wrapped {
        Some((column, text, _)) => {
            // single-line columns first, the wrap may run onto the next page
            draw_cells(canvas, columns, values, 0..wrap_column, line_height, Borders::None);
            let wrap_right = origin.0 + columns.width_through(wrap_column);
            canvas.set_xy(wrap_right, origin.1);
            draw_cells(
                canvas,
                columns,
                values,
                wrap_column + 1..columns.len(),
                line_height,
                Borders::None,
            );

            canvas.set_xy(wrap_right - column.width, origin.1);
            canvas.multi_cell(column.width, line_height, text, column.align)
        }
        None => {
            draw_fixed_row(canvas, columns, values, line_height, Borders::None);
            origin.1 + line_height
        }
    };

    let next_y = if canvas.page_count() == page {
        wrap_end_y.max(origin.1 + line_height)
    } else {
        wrap_end_y
    };
    canvas.set_y(next_y);

    tracing::debug!(
        origin_y = %origin.1,
        wrap_end_y = %wrap_end_y,
        next_y = %next_y,
        lines,
        "laid out wrapping row"
    );

    RowExtent {
        origin,
        wrap_end_y,
        next_y,
    }
}

/// How a table's header band looks
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderStyle {
    pub weight: Weight,
    pub size: Pt,
    pub fill: Option<Colour>,
    pub borders: Borders,
    pub height: Mm,
    /// How far below the top of the band the body starts
    pub advance: Mm,
}

/// Draw the column labels as a single row, then move down by `style.advance`
pub fn draw_header_band(canvas: &mut Canvas, columns: &ColumnSpec, style: &HeaderStyle) {
    canvas.set_font(style.weight, style.size);
    if let Some(fill) = style.fill {
        canvas.set_fill_colour(fill);
    }

    for column in columns.iter() {
        canvas.cell(
            Cell::new(column.width, style.height, column.label)
                .align(column.header_align)
                .border(style.borders)
                .fill(style.fill.is_some()),
        );
    }
    canvas.ln(style.advance);
}

/// The last row of a totals block
#[derive(Debug, Clone, PartialEq)]
pub struct GrandTotalStyle {
    /// Extra space above the row
    pub gap_before: Mm,
    pub size: Pt,
    pub row_height: Mm,
    /// Border drawn around the value, used to rule it off
    pub value_border: Borders,
}

/// Geometry of a labelled totals block
#[derive(Debug, Clone, PartialEq)]
pub struct TotalsStyle {
    /// x of the label column
    pub anchor_x: Mm,
    pub label_width: Mm,
    pub label_align: Align,
    pub value_width: Mm,
    pub row_height: Mm,
    pub size: Pt,
    pub grand_total: GrandTotalStyle,
}

impl TotalsStyle {
    /// Height of a block of `rows` rows, the last one being the grand total
    pub fn block_height(&self, rows: usize) -> Mm {
        match rows {
            0 => Mm(0.0),
            n => {
                let grand = &self.grand_total;
                self.row_height * (n - 1) as f32 + grand.gap_before + grand.row_height
            }
        }
    }
}

/// Draw `(label, value)` rows at `style.anchor_x`, starting at the cursor's y. Values are
/// right-aligned and drawn verbatim. The last row is the grand total, set in bold. The
/// block is kept on one page.
///
/// Returns the y just below the block, which is also where the cursor ends up.
pub fn draw_labeled_totals_block(
    canvas: &mut Canvas,
    rows: &[(&str, &str)],
    style: &TotalsStyle,
) -> Mm {
    canvas.ensure_space(style.block_height(rows.len()));
    for (index, (label, value)) in rows.iter().enumerate() {
        let grand = &style.grand_total;
        let is_grand_total = index + 1 == rows.len();

        let (weight, size, height, value_border) = if is_grand_total {
            canvas.ln(grand.gap_before);
            (Weight::Bold, grand.size, grand.row_height, grand.value_border)
        } else {
            (Weight::Regular, style.size, style.row_height, Borders::None)
        };

        canvas.set_x(style.anchor_x);
        canvas.set_font(weight, size);
        canvas.cell(Cell::new(style.label_width, height, label).align(style.label_align));
        canvas.cell(
            Cell::new(style.value_width, height, value)
                .align(Align::Right)
                .border(value_border)
                .line_break(true),
        );
    }
    canvas.y()
}

/// How an item table looks: header band, body lines, spacing between rows
#[derive(Debug, Clone, PartialEq)]
pub struct TableStyle {
    pub header: HeaderStyle,
    pub body_size: Pt,
    pub line_height: Mm,
    pub wrap_column: usize,
    /// Space added below every row
    pub row_gap: Mm,
    /// Colour of a full-width rule drawn under every row
    pub separator: Option<Colour>,
}

/// Vertical extent of a drawn table
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TableExtent {
    /// Where the first body row started
    pub header_bottom: Mm,
    /// Where the cursor ended after the last row (and its gap)
    pub body_bottom: Mm,
}

/// Draw a header band followed by one wrapping row per item. The header is never left
/// alone at the foot of a page.
pub fn draw_table(
    canvas: &mut Canvas,
    columns: &ColumnSpec,
    style: &TableStyle,
    rows: &[LineItem],
) -> TableExtent {
    canvas.ensure_space(style.header.advance + style.line_height);
    draw_header_band(canvas, columns, &style.header);
    let header_bottom = canvas.y();

    canvas.set_font(Weight::Regular, style.body_size);
    for row in rows.iter() {
        let extent = draw_wrapping_row(
            canvas,
            columns,
            row.cells(),
            style.wrap_column,
            style.line_height,
        );

        if let Some(colour) = style.separator {
            canvas.scoped(|c| {
                c.set_draw_colour(colour);
                let (left, right) = (c.left_margin(), c.right_edge());
                c.line(left, extent.next_y, right, extent.next_y);
            });
        }
        canvas.ln(style.row_gap);
    }

    TableExtent {
        header_bottom,
        body_bottom: canvas.y(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colour::colours;
    use crate::page::PageContents;
    use crate::resolver::StandardFonts;
    use crate::Document;
    use crate::FontFamily;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn document() -> (Document, FontFamily) {
        let mut doc = Document::default();
        let family = doc.add_font_family(&StandardFonts).unwrap();
        (doc, family)
    }

    fn items_columns() -> ColumnSpec {
        ColumnSpec::new([
            Column::new(Mm(95.0), "PRODUCT", Align::Left),
            Column::new(Mm(30.0), "PRICE", Align::Right),
            Column::new(Mm(20.0), "QTY", Align::Center),
            Column::new(Mm(45.0), "TOTAL", Align::Right),
        ])
    }

    fn close(a: Mm, b: Mm) -> bool {
        (a.0 - b.0).abs() < 1e-3
    }

    #[test]
    fn width_through_includes_the_index() {
        let columns = items_columns();
        assert_eq!(columns.total_width(), Mm(190.0));
        assert_eq!(columns.width_through(0), Mm(95.0));
        assert_eq!(columns.width_through(1), Mm(125.0));
        assert_eq!(columns.width_through(10), Mm(190.0));
    }

    #[test]
    fn fixed_row_advances_by_the_table_width() {
        let (doc, family) = document();
        let mut canvas = Canvas::a4(&doc, family);
        let columns = items_columns();
        draw_fixed_row(&mut canvas, &columns, &["a", "b", "c", "d"], Mm(8.0), Borders::All);
        assert!(close(canvas.x(), Mm(10.0) + columns.total_width()));
        assert_eq!(canvas.y(), Mm(10.0));
        assert_eq!(canvas.page().contents.len(), 8);
    }

    #[test]
    fn fixed_row_fills_missing_values_with_nothing() {
        let (doc, family) = document();
        let mut canvas = Canvas::a4(&doc, family);
        draw_fixed_row(&mut canvas, &items_columns(), &["only one"], Mm(8.0), Borders::None);
        assert_eq!(canvas.page().spans().count(), 1);
        assert!(close(canvas.x(), Mm(200.0)));
    }

    #[test]
    fn short_wrapping_row_takes_one_line() {
        let (doc, family) = document();
        let mut canvas = Canvas::a4(&doc, family);
        canvas.set_font(Weight::Regular, Pt(9.0));
        let row = draw_wrapping_row(
            &mut canvas,
            &items_columns(),
            &["Logo Design", "$ 100.00", "1", "$ 100.00"],
            0,
            Mm(8.0),
        );
        assert_eq!(row.origin, (Mm(10.0), Mm(10.0)));
        assert_eq!(row.next_y, Mm(18.0));
        assert_eq!((canvas.x(), canvas.y()), (Mm(10.0), Mm(18.0)));
    }

    #[test]
    fn three_line_description_makes_a_three_line_row() {
        let (doc, family) = document();
        let mut canvas = Canvas::a4(&doc, family);
        canvas.set_font(Weight::Regular, Pt(9.0));
        let columns = ColumnSpec::new([
            Column::new(Mm(25.0), "Part Number", Align::Center),
            Column::new(Mm(80.0), "Description", Align::Left),
            Column::new(Mm(85.0), "Total", Align::Right),
        ]);
        let row = draw_wrapping_row(
            &mut canvas,
            &columns,
            &["2001", "first\nsecond\nthird", "$ 110.00"],
            1,
            Mm(5.0),
        );
        assert_eq!(row.wrap_end_y, Mm(25.0));
        assert_eq!(row.next_y, Mm(25.0));

        let following = draw_wrapping_row(&mut canvas, &columns, &["3001", "one", "$ 70.00"], 1, Mm(5.0));
        assert_eq!(following.origin.1, row.next_y);
    }

    #[test]
    fn columns_after_the_wrap_start_at_the_row_top() {
        let (doc, family) = document();
        let mut canvas = Canvas::a4(&doc, family);
        canvas.set_font(Weight::Regular, Pt(9.0));
        let long = lipsum::lipsum(40);
        draw_wrapping_row(&mut canvas, &items_columns(), &[long.as_str(), "$ 1.00", "1", "$ 1.00"], 0, Mm(8.0));

        let spans: Vec<_> = canvas.page().spans().cloned().collect();
        let qty = spans.iter().find(|s| s.text == "1").unwrap();
        let description_x = spans.last().unwrap().coords.0;
        let description: Vec<_> = spans.iter().filter(|s| s.coords.0 == description_x).collect();
        assert!(description.len() > 1);
        assert_eq!(qty.coords.1, description[0].coords.1);
    }

    #[test]
    fn row_that_would_cross_the_trigger_starts_a_new_page() {
        let (doc, family) = document();
        let mut canvas = Canvas::a4(&doc, family);
        canvas.set_font(Weight::Regular, Pt(9.0));
        canvas.set_y(Mm(270.0));
        let row = draw_wrapping_row(
            &mut canvas,
            &items_columns(),
            &["first\nsecond", "$ 1.00", "1", "$ 1.00"],
            0,
            Mm(8.0),
        );
        assert_eq!(canvas.page_count(), 2);
        assert_eq!(row.origin, (Mm(10.0), Mm(10.0)));
        assert_eq!(row.next_y, Mm(26.0));
        assert_eq!(canvas.page().spans().count(), 5);
    }

    #[test]
    fn wrap_index_out_of_range_draws_a_fixed_row() {
        let (doc, family) = document();
        let mut canvas = Canvas::a4(&doc, family);
        let row = draw_wrapping_row(&mut canvas, &items_columns(), &["a", "b", "c", "d"], 9, Mm(6.0));
        assert_eq!(row.next_y, Mm(16.0));
        assert_eq!(canvas.x(), Mm(10.0));
        assert_eq!(canvas.page().spans().count(), 4);
    }

    #[test]
    fn header_band_uses_column_labels() {
        let (doc, family) = document();
        let mut canvas = Canvas::a4(&doc, family);
        let style = HeaderStyle {
            weight: Weight::Bold,
            size: Pt(9.0),
            fill: Some(Colour::new_grey_bytes(240)),
            borders: Borders::None,
            height: Mm(10.0),
            advance: Mm(10.0),
        };
        draw_header_band(&mut canvas, &items_columns(), &style);

        let labels: Vec<String> = canvas.page().spans().map(|s| s.text.clone()).collect();
        assert_eq!(labels, vec!["PRODUCT", "PRICE", "QTY", "TOTAL"]);
        assert!(canvas.page().spans().all(|s| s.font.id == family.bold));
        assert_eq!(canvas.y(), Mm(20.0));
    }

    fn totals_style() -> TotalsStyle {
        TotalsStyle {
            anchor_x: Mm(140.0),
            label_width: Mm(35.0),
            label_align: Align::Right,
            value_width: Mm(25.0),
            row_height: Mm(6.0),
            size: Pt(9.0),
            grand_total: GrandTotalStyle {
                gap_before: Mm(1.0),
                size: Pt(9.0),
                row_height: Mm(6.0),
                value_border: Borders::Bottom,
            },
        }
    }

    #[test]
    fn totals_block_stacks_rows_and_rules_the_grand_total() {
        let (doc, family) = document();
        let mut canvas = Canvas::a4(&doc, family);
        canvas.set_y(Mm(100.0));
        let bottom = draw_labeled_totals_block(
            &mut canvas,
            &[
                ("Item Total:", "$ 220.00"),
                ("Sales Tax:", "$ 0.00"),
                ("Total Amount Due:", "$ 220.00"),
            ],
            &totals_style(),
        );
        assert_eq!(bottom, Mm(119.0));
        assert_eq!(totals_style().block_height(3), Mm(19.0));

        let page = canvas.page();
        let rules = page
            .contents
            .iter()
            .filter(|c| matches!(c, PageContents::Line(_)))
            .count();
        assert_eq!(rules, 1);
        let grand = page.spans().last().unwrap();
        assert_eq!(grand.text, "$ 220.00");
        assert_eq!(grand.font.id, family.bold);
    }

    #[test]
    fn totals_block_is_kept_on_one_page() {
        let (doc, family) = document();
        let mut canvas = Canvas::a4(&doc, family);
        canvas.set_y(Mm(265.0));
        let bottom = draw_labeled_totals_block(
            &mut canvas,
            &[("Item Total:", "$ 1.00"), ("Total Amount Due:", "$ 1.00")],
            &totals_style(),
        );
        assert_eq!(canvas.page_count(), 2);
        assert_eq!(bottom, Mm(10.0 + 13.0));
        assert_eq!(canvas.page().spans().count(), 4);
    }

    #[test]
    fn non_numeric_values_are_right_aligned_verbatim() {
        let (doc, family) = document();
        let mut canvas = Canvas::a4(&doc, family);
        let style = totals_style();
        draw_labeled_totals_block(&mut canvas, &[("Tax", "ÁFA mentes"), ("TOTAL", "$440")], &style);

        canvas.set_font(Weight::Regular, style.size);
        let tax_width = canvas.text_width("ÁFA mentes");
        let tax = canvas
            .page()
            .spans()
            .find(|s| s.text == "ÁFA mentes")
            .cloned()
            .unwrap();
        let right = style.anchor_x + style.label_width + style.value_width - canvas.cell_margin();
        assert!(close(Mm::from(tax.coords.0) + tax_width, right));
    }

    fn table_style() -> TableStyle {
        TableStyle {
            header: HeaderStyle {
                weight: Weight::Bold,
                size: Pt(9.0),
                fill: None,
                borders: Borders::Bottom,
                height: Mm(8.0),
                advance: Mm(10.0),
            },
            body_size: Pt(9.0),
            line_height: Mm(6.0),
            wrap_column: 0,
            row_gap: Mm(2.0),
            separator: None,
        }
    }

    #[test]
    fn empty_table_is_just_the_header() {
        let (doc, family) = document();
        let mut canvas = Canvas::a4(&doc, family);
        let extent = draw_table(&mut canvas, &items_columns(), &table_style(), &[]);
        assert_eq!(extent.header_bottom, Mm(20.0));
        assert_eq!(extent.body_bottom, extent.header_bottom);
    }

    #[test]
    fn table_rows_are_spaced_by_the_gap() {
        let (doc, family) = document();
        let mut canvas = Canvas::a4(&doc, family);
        let rows = vec![
            LineItem::from(["Brand consultation", "100", "1", "$100"]),
            LineItem::from(["Logo design", "100", "1", "$100"]),
            LineItem::from(["Website design", "100", "1", "$100"]),
        ];
        let extent = draw_table(&mut canvas, &items_columns(), &table_style(), &rows);
        assert_eq!(extent.body_bottom, Mm(20.0 + 3.0 * 8.0));
    }

    #[test]
    fn separators_are_drawn_in_their_own_colour() {
        let (doc, family) = document();
        let mut canvas = Canvas::a4(&doc, family);
        let style = TableStyle {
            separator: Some(Colour::new_grey_bytes(230)),
            row_gap: Mm(0.0),
            ..table_style()
        };
        let rows = vec![LineItem::from(["Logo Design", "$ 100.00", "1", "$ 100.00"])];
        draw_table(&mut canvas, &items_columns(), &style, &rows);

        let separator = canvas.page().contents.iter().rev().find_map(|c| match c {
            PageContents::Line(line) => Some(line.clone()),
            _ => None,
        });
        assert_eq!(separator.map(|l| l.stroke.colour), Some(Colour::new_grey_bytes(230)));
        assert_eq!(canvas.save().draw_colour, colours::BLACK);
    }

    proptest! {
        #[test]
        fn wrapping_rows_never_overlap(
            descriptions in prop::collection::vec("[a-zA-Z ]{0,200}", 1..12),
            line_height in 3.0f32..10.0,
        ) {
            let (doc, family) = document();
            let mut canvas = Canvas::a4(&doc, family);
            canvas.set_font(Weight::Regular, Pt(9.0));
            let columns = items_columns();
            let line_height = Mm(line_height);
            let trigger = canvas.page_break_trigger().unwrap();

            let mut previous_end: Option<Mm> = None;
            for description in descriptions.iter() {
                let pages = canvas.page_count();
                let row = draw_wrapping_row(
                    &mut canvas,
                    &columns,
                    &[description.as_str(), "$ 1.00", "1", "$ 1.00"],
                    0,
                    line_height,
                );
                prop_assert!(row.next_y >= row.origin.1 + line_height);
                prop_assert!(row.next_y >= row.wrap_end_y);
                prop_assert!(row.next_y <= trigger);
                match previous_end {
                    Some(end) if canvas.page_count() == pages => prop_assert_eq!(row.origin.1, end),
                    _ if canvas.page_count() > pages => prop_assert_eq!(row.origin.1, Mm(10.0)),
                    _ => {}
                }
                previous_end = Some(row.next_y);
            }
        }
    }
}
