//! Minimalist invoice: a grey header band over the items, light rules between rows,
//! payment details beside the totals and a centred sign-off at the foot of the page.

use crate::canvas::{Canvas, Cell, Weight};
use crate::colour::{colours, Colour};
use crate::layout::table::*;
use crate::record::InvoiceRecord;
use crate::units::*;

const TABLE: TableStyle = TableStyle {
    header: HeaderStyle {
        weight: Weight::Bold,
        size: Pt(9.0),
        fill: Some(Colour::Grey { g: 240.0 / 255.0 }),
        borders: Borders::None,
        height: Mm(10.0),
        advance: Mm(10.0),
    },
    body_size: Pt(9.0),
    line_height: Mm(8.0),
    wrap_column: 0,
    row_gap: Mm(0.0),
    separator: Some(Colour::Grey { g: 230.0 / 255.0 }),
};

const TOTALS: TotalsStyle = TotalsStyle {
    anchor_x: Mm(120.0),
    label_width: Mm(40.0),
    label_align: Align::Left,
    value_width: Mm(40.0),
    row_height: Mm(8.0),
    size: Pt(10.0),
    grand_total: GrandTotalStyle {
        gap_before: Mm(0.0),
        size: Pt(10.0),
        row_height: Mm(8.0),
        value_border: Borders::None,
    },
};

const NO_AMOUNT: &str = "$ 0.00";

/// Leaves room for the footer
const BREAK_MARGIN: Mm = Mm(35.0);

/// PAYMENT METHOD heading plus three detail lines
const PAYMENT_HEIGHT: Mm = Mm(26.0);

pub fn columns() -> ColumnSpec {
    ColumnSpec::new([
        Column::new(Mm(95.0), "PRODUCT", Align::Left),
        Column::new(Mm(30.0), "PRICE", Align::Right),
        Column::new(Mm(20.0), "QTY", Align::Center),
        Column::new(Mm(45.0), "TOTAL", Align::Right),
    ])
}

pub fn render(canvas: &mut Canvas, record: &InvoiceRecord) {
    canvas.set_auto_page_break(Some(BREAK_MARGIN));
    let signer = record.text_or("signer_name", "Lorna Alvarado");
    canvas.set_footer(move |c| draw_footer(c, &signer));

    canvas.set_xy(Mm(110.0), Mm(20.0));
    canvas.set_font(Weight::Bold, Pt(24.0));
    canvas.cell(
        Cell::new(Mm(90.0), Mm(10.0), "INVOICE")
            .align(Align::Right)
            .line_break(true),
    );
    canvas.set_x(Mm(110.0));
    canvas.set_font(Weight::Regular, Pt(10.0));
    let invoice_id = format!("Invoice ID: {}", record.text_or("invoice_id", "#000000"));
    canvas.cell(
        Cell::new(Mm(90.0), Mm(6.0), &invoice_id)
            .align(Align::Right)
            .line_break(true),
    );

    canvas.set_xy(Mm(10.0), Mm(20.0));
    canvas.set_font(Weight::Bold, Pt(10.0));
    canvas.cell(Cell::new(Mm(100.0), Mm(6.0), "INVOICE TO").line_break(true));
    canvas.set_font(Weight::Regular, Pt(10.0));
    for key in ["customer_name", "customer_phone", "customer_email"] {
        canvas.cell(Cell::new(Mm(100.0), Mm(6.0), &record.text(key)).line_break(true));
    }
    canvas.multi_cell(Mm(90.0), Mm(6.0), &record.text("customer_address"), Align::Left);
    canvas.ln(Mm(15.0));

    draw_table(canvas, &columns(), &TABLE, record.items("items"));
    canvas.ln(Mm(5.0));

    canvas.ensure_space(PAYMENT_HEIGHT.max(TOTALS.block_height(3)));
    let bottom = canvas.y();
    draw_payment_method(canvas, record, bottom);

    canvas.set_xy(TOTALS.anchor_x, bottom);
    canvas.set_text_colour(colours::BLACK);
    let subtotal = record.text_or("subtotal", NO_AMOUNT);
    let tax = record.text_or("tax", NO_AMOUNT);
    let total = record.text_or("grand_total", NO_AMOUNT);
    draw_labeled_totals_block(
        canvas,
        &[
            ("SUB-TOTAL", subtotal.as_str()),
            ("TAX (20%)", tax.as_str()),
            ("TOTAL", total.as_str()),
        ],
        &TOTALS,
    );
}

fn draw_payment_method(canvas: &mut Canvas, record: &InvoiceRecord, top: Mm) {
    canvas.set_xy(Mm(10.0), top);
    canvas.set_font(Weight::Bold, Pt(10.0));
    canvas.cell(Cell::new(Mm(80.0), Mm(8.0), "PAYMENT METHOD").line_break(true));

    for (label, key) in [
        ("Name", "bank_name"),
        ("ID Bank", "bank_id"),
        ("Bank", "bank_institute"),
    ] {
        canvas.set_font(Weight::Bold, Pt(9.0));
        canvas.cell(Cell::new(Mm(20.0), Mm(6.0), label));
        canvas.set_font(Weight::Regular, Pt(9.0));
        let value = format!(":  {}", record.text(key));
        canvas.cell(Cell::new(Mm(50.0), Mm(6.0), &value).line_break(true));
    }
}

/// Sign-off anchored 30 mm above the bottom edge of every page
fn draw_footer(canvas: &mut Canvas, signer: &str) {
    canvas.set_y(Mm(-30.0));
    canvas.set_font(Weight::Bold, Pt(10.0));
    canvas.cell(
        Cell::new(Mm(0.0), Mm(5.0), "Thank You For Your Business")
            .align(Align::Center)
            .line_break(true),
    );
    canvas.ln(Mm(2.0));
    canvas.set_font(Weight::Regular, Pt(10.0));
    canvas.cell(Cell::new(Mm(0.0), Mm(5.0), signer).align(Align::Center));
}
