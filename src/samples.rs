//! Sample invoices for each theme, plus deliberately awkward variants with over-long text,
//! non-numeric amounts and short rows.

use crate::record::{InvoiceRecord, LineItem};

pub fn general_sample() -> InvoiceRecord {
    InvoiceRecord::new()
        .with(
            "bill_to_text",
            "ABC Communication\n3451 NE Willoughby Blvd.\nSturt, FL 5494 U.S.A\nPhone: (72) 288-2250\nEmail: dispatch@abcms.com",
        )
        .with(
            "remit_to_text",
            "Standard Products\n3150 SW 9th Street\nMiami, FL 3218 U.S.A.\nPhone: (306) 461-003",
        )
        .with("inv_number", "174221")
        .with("inv_date", "2/18/2019")
        .with("po_number", "1258-0854")
        .with("source_ref", "S.O. #687250")
        .with("acct_num", "860")
        .with("ar_cust", "Std Products")
        .with("acct_id", "Ft. Lenderdale")
        .with("cust_po", "285058-5848")
        .with("attn", "Curtis V. Brown")
        .with("sales_rep", "")
        .with("ship_via", "Email")
        .with("terms", "Due upon receipt")
        .with(
            "work_requested",
            "02/01/2016 11:39 AM, Gary: Per phone call from Ben: Customer advised that incoming phone calls now ring throughout the store over the speaker.",
        )
        .with(
            "work_performed",
            "2/16/16 Lines had programming glitch, ring over page to group 5011. Deleted Lisa out of MC 7224. Tested all lines incoming OK.",
        )
        .with(
            "items",
            vec![
                LineItem::from(["2001", "Professional Service 1-Labor", "2.00", "HR", "$ 55.00", "$ 110.00"]),
                LineItem::from(["3001", "Extra Fee - 24h Service", "1.00", "MD", "$ 70.00", "$ 70.00"]),
                LineItem::from(["9001", "Travel costs", "1.00", "TR", "$ 40.00", "$ 40.00"]),
            ],
        )
        .with(
            "notes",
            "There should be no calls coming in on these lines.\nThank you for your business!",
        )
        .with("total_net", "$ 220.00")
        .with("tax", "$ 0.00")
        .with("total_gross", "$ 220.00")
}

/// The general sample with an overflowing description and a row of nonsense amounts
pub fn general_broken() -> InvoiceRecord {
    general_sample()
        .with("inv_number", "ERROR-999")
        .with(
            "items",
            vec![
                LineItem::from([
                    "ERR",
                    "Ez egy extrém hosszú tétel leírás, ami biztosan el fogja törni a táblázatot, ha nem kezeli jól a sortörést a program...",
                    "999",
                    "db",
                    "$ 1.00",
                    "$ 999.00",
                ]),
                LineItem::from(["NaN", "Hibás ár", "-1", "db", "ingyen", "Végtelen"]),
            ],
        )
}

pub fn modern_sample() -> InvoiceRecord {
    InvoiceRecord::new()
        .with("invoice_id", "#1234567890")
        .with("customer_name", "Marceline Anderson")
        .with("customer_phone", "+123-456-7890")
        .with("customer_email", "hello@reallygreatsite.com")
        .with("customer_address", "123 Anywhere St., Any City")
        .with(
            "items",
            vec![
                LineItem::from(["Logo Design", "$ 100.00", "1", "$ 100.00"]),
                LineItem::from(["Business Magazine Design", "$ 60.00", "2", "$ 120.00"]),
                LineItem::from(["Business Card", "$ 125.00", "1", "$ 125.00"]),
                LineItem::from(["Website Page (Extra long description test)", "$ 30.00", "4", "$ 120.00"]),
            ],
        )
        .with("bank_name", "Kim Chun Hei")
        .with("bank_id", "123-456-7890")
        .with("bank_institute", "Fauget")
        .with("subtotal", "$ 465.00")
        .with("tax", "$ 93.00")
        .with("grand_total", "$ 558.00")
}

/// The modern sample with a product name repeated until it wraps many times
pub fn modern_broken() -> InvoiceRecord {
    let long_name = "Túl hosszú terméknév ".repeat(10);
    modern_sample().with(
        "items",
        vec![
            LineItem::from([long_name.as_str(), "$ 0.00", "10000", "$ 0.00"]),
            LineItem::from(["Normál tétel", "$ 10.00", "1", "$ 10.00"]),
        ],
    )
}

/// Six items at $100 with a $400 subtotal; the totals are printed as given.
pub fn simple_sample() -> InvoiceRecord {
    InvoiceRecord::new()
        .with("issued_to_name", "Richard Sanchez")
        .with("issued_to_company", "Thynk Unlimited")
        .with("issued_to_address", "123 Anywhere St., Any City")
        .with("pay_to_bank", "Borcele Bank")
        .with("pay_to_acc_name", "Adeline Palmerston")
        .with("pay_to_acc_no", "0123 4567 8901")
        .with("invoice_no", "01234")
        .with("date", "11.02.2030")
        .with("due_date", "11.03.2030")
        .with(
            "items",
            vec![
                LineItem::from(["Brand consultation", "100", "1", "$100"]),
                LineItem::from(["Logo design", "100", "1", "$100"]),
                LineItem::from(["Website design", "100", "1", "$100"]),
                LineItem::from(["Social media templates", "100", "1", "$100"]),
                LineItem::from(["Brand photography", "100", "1", "$100"]),
                LineItem::from(["Brand guide", "100", "1", "$100"]),
            ],
        )
        .with("subtotal", "$400")
        .with("tax", "10%")
        .with("total_amount", "$440")
        .with("signer_name", "Atlee Petersen")
}

/// The simple sample with an overflowing name, a wrapping description and a textual tax
pub fn simple_stress() -> InvoiceRecord {
    simple_sample()
        .with("issued_to_name", "Dr. Very Long Name ".repeat(5))
        .with(
            "items",
            vec![
                LineItem::from([
                    "Extrém hosszú szolgáltatás megnevezés, ami biztosan sortörést fog okozni a táblázatban, és meg kell nézni, hogy rácsúszik-e az árra.",
                    "9999",
                    "10",
                    "$99999",
                ]),
                LineItem::from(["Normál tétel", "10", "1", "$10"]),
            ],
        )
        .with("tax", "ÁFA mentes")
}
