//! Traditional service invoice: addresses and a boxed number/date/PO table up top, an
//! account band, work descriptions, the item table, then notes beside the totals.

use crate::canvas::{Canvas, Cell, Weight};
use crate::layout::table::*;
use crate::record::InvoiceRecord;
use crate::units::*;

const TABLE: TableStyle = TableStyle {
    header: HeaderStyle {
        weight: Weight::Bold,
        size: Pt(9.0),
        fill: None,
        borders: Borders::Bottom,
        height: Mm(6.0),
        advance: Mm(8.0),
    },
    body_size: Pt(9.0),
    line_height: Mm(5.0),
    wrap_column: 1,
    row_gap: Mm(1.0),
    separator: None,
};

const ACCOUNT_HEADER: HeaderStyle = HeaderStyle {
    weight: Weight::Bold,
    size: Pt(7.0),
    fill: None,
    borders: Borders::All,
    height: Mm(5.0),
    advance: Mm(5.0),
};

const TOTALS: TotalsStyle = TotalsStyle {
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
};

const ACCOUNT_FIELDS: [&str; 8] = [
    "acct_num",
    "ar_cust",
    "acct_id",
    "cust_po",
    "attn",
    "sales_rep",
    "ship_via",
    "terms",
];

const NO_AMOUNT: &str = "$ 0.00";

const BREAK_MARGIN: Mm = Mm(15.0);

pub fn columns() -> ColumnSpec {
    ColumnSpec::new([
        Column::new(Mm(25.0), "Part Number", Align::Center),
        Column::new(Mm(80.0), "Description", Align::Left),
        Column::new(Mm(15.0), "Qty.", Align::Center),
        Column::new(Mm(15.0), "UOM", Align::Center),
        Column::new(Mm(25.0), "Ea. Price", Align::Right).header_align(Align::Center),
        Column::new(Mm(30.0), "Total", Align::Right).header_align(Align::Center),
    ])
}

/// The bordered band of account details under the addresses
pub fn account_columns() -> ColumnSpec {
    ColumnSpec::new([
        Column::new(Mm(15.0), "Acct.#", Align::Center),
        Column::new(Mm(25.0), "A/R Cust.#", Align::Center),
        Column::new(Mm(30.0), "Acct. ID", Align::Center),
        Column::new(Mm(30.0), "Customer P.O.", Align::Center),
        Column::new(Mm(30.0), "Attn to", Align::Center),
        Column::new(Mm(20.0), "Sales Rep", Align::Center),
        Column::new(Mm(15.0), "Ship Via", Align::Center),
        Column::new(Mm(25.0), "Terms", Align::Center),
    ])
}

pub fn render(canvas: &mut Canvas, record: &InvoiceRecord) {
    canvas.set_auto_page_break(Some(BREAK_MARGIN));
    draw_parties(canvas, record);
    draw_invoice_box(canvas, record);

    canvas.ln(Mm(10.0));
    canvas.set_x(Mm(10.0));
    canvas.set_font(Weight::Regular, Pt(9.0));
    let source = format!("Source: {}", record.text("source_ref"));
    canvas.cell(Cell::new(Mm(0.0), Mm(5.0), &source).line_break(true));

    let band_top = canvas.y() + Mm(2.0);
    canvas.set_y(band_top);
    draw_header_band(canvas, &account_columns(), &ACCOUNT_HEADER);
    let account: Vec<String> = ACCOUNT_FIELDS.iter().map(|key| record.text(key)).collect();
    canvas.set_font(Weight::Regular, Pt(7.0));
    draw_fixed_row(canvas, &account_columns(), &account, Mm(8.0), Borders::All);
    canvas.ln(Mm(12.0));

    draw_paragraph(canvas, "Work Requested:", &record.text("work_requested"));
    canvas.ln(Mm(2.0));
    draw_paragraph(canvas, "Work Performed:", &record.text("work_performed"));
    canvas.ln(Mm(5.0));

    draw_table(canvas, &columns(), &TABLE, record.items("items"));

    // rule and totals stay together
    canvas.ensure_space(Mm(2.0) + TOTALS.block_height(3));
    let y = canvas.y();
    canvas.line(Mm(10.0), y, Mm(200.0), y);
    canvas.ln(Mm(2.0));

    let totals_top = canvas.y();
    canvas.set_xy(Mm(10.0), totals_top);
    canvas.set_font(Weight::Regular, Pt(8.0));
    canvas.multi_cell(Mm(110.0), Mm(4.0), &record.text("notes"), Align::Left);

    canvas.set_xy(TOTALS.anchor_x, totals_top);
    let net = record.text_or("total_net", NO_AMOUNT);
    let tax = record.text_or("tax", NO_AMOUNT);
    let gross = record.text_or("total_gross", NO_AMOUNT);
    draw_labeled_totals_block(
        canvas,
        &[
            ("Item Total:", net.as_str()),
            ("Sales Tax:", tax.as_str()),
            ("Total Amount Due:", gross.as_str()),
        ],
        &TOTALS,
    );
}

fn draw_parties(canvas: &mut Canvas, record: &InvoiceRecord) {
    canvas.set_xy(Mm(10.0), Mm(10.0));
    canvas.set_font(Weight::Bold, Pt(10.0));
    canvas.cell(Cell::new(Mm(60.0), Mm(5.0), "Bill To").line_break(true));
    canvas.set_font(Weight::Regular, Pt(9.0));
    canvas.multi_cell(Mm(60.0), Mm(4.0), &record.text("bill_to_text"), Align::Left);

    canvas.set_xy(Mm(80.0), Mm(10.0));
    canvas.set_font(Weight::Bold, Pt(10.0));
    canvas.cell(Cell::new(Mm(60.0), Mm(5.0), "Remit to").line_break(true));
    canvas.set_xy(Mm(80.0), Mm(15.0));
    canvas.set_font(Weight::Regular, Pt(9.0));
    canvas.multi_cell(Mm(60.0), Mm(4.0), &record.text("remit_to_text"), Align::Left);
}

fn draw_invoice_box(canvas: &mut Canvas, record: &InvoiceRecord) {
    canvas.set_xy(Mm(140.0), Mm(10.0));
    canvas.set_font(Weight::Bold, Pt(24.0));
    canvas.cell(
        Cell::new(Mm(60.0), Mm(10.0), "INVOICE")
            .align(Align::Right)
            .line_break(true),
    );

    canvas.set_xy(Mm(140.0), Mm(25.0));
    canvas.set_font(Weight::Bold, Pt(9.0));
    for (label, key) in [("Number:", "inv_number"), ("Date:", "inv_date"), ("PO:", "po_number")] {
        let (x, y) = (canvas.x(), canvas.y());
        canvas.rect(x, y, Mm(25.0), Mm(6.0));
        canvas.rect(x + Mm(25.0), y, Mm(35.0), Mm(6.0));
        canvas.cell(Cell::new(Mm(25.0), Mm(6.0), label));
        canvas.set_font(Weight::Regular, Pt(9.0));
        canvas.cell(Cell::new(Mm(35.0), Mm(6.0), &record.text(key)).align(Align::Center));
        canvas.set_font(Weight::Bold, Pt(9.0));
        canvas.ln(Mm(6.0));
        canvas.set_x(Mm(140.0));
    }
}

/// A bold heading line followed by wrapped body text
fn draw_paragraph(canvas: &mut Canvas, heading: &str, body: &str) {
    canvas.set_font(Weight::Bold, Pt(9.0));
    canvas.cell(Cell::new(Mm(0.0), Mm(5.0), heading).line_break(true));
    canvas.set_font(Weight::Regular, Pt(9.0));
    canvas.multi_cell(Mm(0.0), Mm(5.0), body, Align::Left);
}
