//! Two-column invoice: who it is issued to and where to pay on the left, the invoice
//! number and dates on the right, a plain item table below whichever column runs longer.

use crate::canvas::{Canvas, Cell, Weight};
use crate::colour::colours;
use crate::layout::table::*;
use crate::record::InvoiceRecord;
use crate::units::*;

const TOP: Mm = Mm(20.0);
const RIGHT_COLUMN_X: Mm = Mm(120.0);
const BREAK_MARGIN: Mm = Mm(20.0);

const TABLE: TableStyle = TableStyle {
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
};

const TOTALS: TotalsStyle = TotalsStyle {
    anchor_x: Mm(135.0),
    label_width: Mm(25.0),
    label_align: Align::Left,
    value_width: Mm(30.0),
    row_height: Mm(6.0),
    size: Pt(10.0),
    grand_total: GrandTotalStyle {
        gap_before: Mm(2.0),
        size: Pt(12.0),
        row_height: Mm(8.0),
        value_border: Borders::None,
    },
};

pub fn columns() -> ColumnSpec {
    ColumnSpec::new([
        Column::new(Mm(90.0), "DESCRIPTION", Align::Left),
        Column::new(Mm(35.0), "UNIT PRICE", Align::Right),
        Column::new(Mm(25.0), "QTY", Align::Right),
        Column::new(Mm(40.0), "TOTAL", Align::Right),
    ])
}

pub fn render(canvas: &mut Canvas, record: &InvoiceRecord) {
    canvas.set_auto_page_break(Some(BREAK_MARGIN));
    let left_end = draw_left_column(canvas, record);
    let right_end = draw_right_column(canvas, record);

    canvas.set_y(left_end.max(right_end) + Mm(15.0));
    canvas.set_fill_colour(colours::WHITE);
    draw_table(canvas, &columns(), &TABLE, record.items("items"));

    canvas.ln(Mm(5.0));
    let subtotal = record.text("subtotal");
    let tax = record.text("tax");
    let total = record.text("total_amount");
    draw_labeled_totals_block(
        canvas,
        &[
            ("SUBTOTAL", subtotal.as_str()),
            ("Tax", tax.as_str()),
            ("TOTAL", total.as_str()),
        ],
        &TOTALS,
    );

    canvas.ln(Mm(15.0));
    canvas.set_x(Mm(10.0));
    canvas.set_font(Weight::Bold, Pt(10.0));
    let signer = record.text("signer_name");
    canvas.cell(Cell::new(Mm(0.0), Mm(5.0), &signer).line_break(true));
}

/// ISSUED TO and PAY TO blocks; returns where the column ends
fn draw_left_column(canvas: &mut Canvas, record: &InvoiceRecord) -> Mm {
    canvas.set_y(TOP);
    canvas.set_x(Mm(10.0));

    canvas.set_font(Weight::Bold, Pt(10.0));
    canvas.cell(Cell::new(Mm(100.0), Mm(5.0), "ISSUED TO:").line_break(true));
    canvas.set_font(Weight::Regular, Pt(10.0));
    for key in ["issued_to_name", "issued_to_company"] {
        canvas.cell(Cell::new(Mm(100.0), Mm(5.0), &record.text(key)).line_break(true));
    }
    canvas.multi_cell(Mm(90.0), Mm(5.0), &record.text("issued_to_address"), Align::Left);
    canvas.ln(Mm(5.0));

    canvas.set_font(Weight::Bold, Pt(10.0));
    canvas.cell(Cell::new(Mm(100.0), Mm(5.0), "PAY TO:").line_break(true));
    canvas.set_font(Weight::Regular, Pt(10.0));
    let lines = [
        record.text("pay_to_bank"),
        format!("Account Name: {}", record.text("pay_to_acc_name")),
        format!("Account No.: {}", record.text("pay_to_acc_no")),
    ];
    for line in lines.iter() {
        canvas.cell(Cell::new(Mm(100.0), Mm(5.0), line).line_break(true));
    }

    canvas.y()
}

/// INVOICE title with number and dates; returns where the column ends
fn draw_right_column(canvas: &mut Canvas, record: &InvoiceRecord) -> Mm {
    canvas.set_xy(RIGHT_COLUMN_X, TOP);
    canvas.set_font(Weight::Bold, Pt(24.0));
    canvas.cell(
        Cell::new(Mm(70.0), Mm(10.0), "INVOICE")
            .align(Align::Right)
            .line_break(true),
    );

    canvas.ln(Mm(5.0));
    for (label, key) in [
        ("INVOICE NO:", "invoice_no"),
        ("DATE:", "date"),
        ("DUE DATE:", "due_date"),
    ] {
        canvas.set_x(RIGHT_COLUMN_X);
        canvas.set_font(Weight::Bold, Pt(10.0));
        canvas.cell(Cell::new(Mm(35.0), Mm(6.0), label));
        canvas.set_font(Weight::Regular, Pt(10.0));
        canvas.cell(
            Cell::new(Mm(35.0), Mm(6.0), &record.text(key))
                .align(Align::Right)
                .line_break(true),
        );
    }

    canvas.y()
}
