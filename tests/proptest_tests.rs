//! Property-based tests for the aggregator and the ebInterface output.
//!
//! Run with: `cargo test --test proptest_tests`

use ebrechnung::core::*;
use ebrechnung::transform;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn with_lines(lines: Vec<RawLineItem>) -> RawInvoice {
    let mut builder = InvoiceRequestBuilder::new("2024-PROP", "2024-06-15")
        .biller(
            BillerBuilder::new(
                "Muster GmbH",
                "ATU12345678",
                RawAddress::new("Kärntner Straße 1", "1010", "Wien"),
            )
            .build(),
        )
        .recipient(
            RecipientBuilder::new(
                "Stadt Graz",
                "ATU87654321",
                "PO-2024-17",
                RawAddress::new("Hauptplatz 1", "8010", "Graz"),
            )
            .build(),
        )
        .payment("AT611904300234573201", "BKAUATWW");
    for line in lines {
        builder = builder.add_line(line);
    }
    builder.build()
}

// ── Proptest Strategies ─────────────────────────────────────────────────────

/// 0.00 to 99,999.99 in cents.
fn arb_price() -> impl Strategy<Value = i64> {
    0i64..10_000_000
}

fn arb_quantity() -> impl Strategy<Value = i64> {
    1i64..=1_000
}

/// Austrian rates plus a fractional one to exercise half-cent rounding.
fn arb_rate() -> impl Strategy<Value = Decimal> {
    prop_oneof![
        Just(dec!(0)),
        Just(dec!(10)),
        Just(dec!(13)),
        Just(dec!(20)),
        Just(dec!(5.5)),
    ]
}

fn arb_line() -> impl Strategy<Value = RawLineItem> {
    (arb_quantity(), arb_price(), arb_rate()).prop_map(|(qty, price, rate)| {
        LineItemBuilder::new("Position", qty, price)
            .tax_rate(rate)
            .build()
    })
}

fn arb_lines() -> impl Strategy<Value = Vec<RawLineItem>> {
    prop::collection::vec(arb_line(), 1..=12)
}

/// Text of every `<tag>…</tag>` occurrence.
fn values<'a>(xml: &'a str, tag: &str) -> Vec<&'a str> {
    let open = format!("<{tag}>");
    xml.match_indices(&open)
        .map(|(i, _)| {
            let rest = &xml[i + open.len()..];
            &rest[..rest.find('<').unwrap_or(rest.len())]
        })
        .collect()
}

fn is_money(value: &str) -> bool {
    match value.split_once('.') {
        Some((int, frac)) => {
            !int.is_empty()
                && int.bytes().all(|b| b.is_ascii_digit())
                && frac.len() == 2
                && frac.bytes().all(|b| b.is_ascii_digit())
        }
        None => false,
    }
}

proptest! {
    /// Identical input always gives identical bytes.
    #[test]
    fn transform_is_deterministic(lines in arb_lines()) {
        let raw = with_lines(lines);
        prop_assert_eq!(transform(&raw).unwrap(), transform(&raw).unwrap());
    }

    /// Line sums equal bucket sums equal totals.
    #[test]
    fn amounts_are_conserved(lines in arb_lines()) {
        let req = validate(&with_lines(lines)).unwrap();
        let agg = aggregate(&req.lines).unwrap();
        prop_assert!(agg.check_conservation().is_ok());

        let line_net: i64 = agg.lines.iter().map(|l| l.net).sum();
        let line_tax: i64 = agg.lines.iter().map(|l| l.tax).sum();
        prop_assert_eq!(agg.buckets.iter().map(|b| b.taxable).sum::<i64>(), line_net);
        prop_assert_eq!(agg.buckets.iter().map(|b| b.tax).sum::<i64>(), line_tax);
        prop_assert_eq!(agg.totals.gross, line_net + line_tax);
        prop_assert_eq!(agg.totals.payable, agg.totals.gross);
    }

    /// One bucket per distinct rate, strictly ascending.
    #[test]
    fn buckets_are_unique_and_sorted(lines in arb_lines()) {
        let req = validate(&with_lines(lines)).unwrap();
        let agg = aggregate(&req.lines).unwrap();

        let mut distinct: Vec<Decimal> = req.lines.iter().map(|l| l.tax_rate).collect();
        distinct.sort();
        distinct.dedup();
        let rates: Vec<Decimal> = agg.buckets.iter().map(|b| b.rate).collect();
        prop_assert_eq!(rates, distinct);
    }

    /// Reordering lines changes the item list but never the tax summary.
    #[test]
    fn tax_block_ignores_line_order(lines in arb_lines()) {
        let mut reversed = lines.clone();
        reversed.reverse();
        let a = String::from_utf8(transform(&with_lines(lines)).unwrap()).unwrap();
        let b = String::from_utf8(transform(&with_lines(reversed)).unwrap()).unwrap();

        let tax_block = |xml: &str| {
            let start = xml.find("<Tax>").unwrap();
            let end = xml.find("</Tax>").unwrap();
            xml[start..end].to_string()
        };
        prop_assert_eq!(tax_block(&a), tax_block(&b));
        prop_assert_eq!(values(&a, "PayableAmount"), values(&b, "PayableAmount"));
    }

    /// Every monetary element is `digits.dd`.
    #[test]
    fn monetary_values_have_two_decimals(lines in arb_lines()) {
        let xml = String::from_utf8(transform(&with_lines(lines)).unwrap()).unwrap();
        for tag in ["UnitPrice", "TaxableAmount", "TaxAmount", "LineItemAmount", "TotalGrossAmount", "PayableAmount"] {
            for value in values(&xml, tag) {
                prop_assert!(is_money(value), "{} = {:?}", tag, value);
            }
        }
    }

    /// Arbitrary text is either rejected on its field or emitted as legal XML.
    #[test]
    fn arbitrary_text_yields_legal_xml_or_rejection(text in any::<String>()) {
        let raw = with_lines(vec![LineItemBuilder::new(text.clone(), 1, 100).build()]);
        match transform(&raw) {
            Ok(bytes) => {
                let xml = String::from_utf8(bytes).unwrap();
                prop_assert!(xml.chars().all(is_xml_char));
                let mut reader = quick_xml::Reader::from_str(&xml);
                loop {
                    match reader.read_event() {
                        Ok(quick_xml::events::Event::Eof) => break,
                        Ok(_) => {}
                        Err(e) => prop_assert!(false, "not well-formed: {}", e),
                    }
                }
            }
            Err(TransformError::Validation(e)) => {
                prop_assert_eq!(e.field.as_str(), "items[0].description");
                prop_assert!(text.trim().is_empty() || !text.chars().all(is_xml_char));
            }
            Err(e) => prop_assert!(false, "unexpected error: {}", e),
        }
    }

    /// Per-line tax is within half a cent of the exact value.
    #[test]
    fn line_tax_is_correctly_rounded(net in 0i64..1_000_000_000, rate in arb_rate()) {
        let tax = line_tax(net, rate).unwrap();
        let exact = Decimal::from(net) * rate / dec!(100);
        let diff = (Decimal::from(tax) - exact).abs();
        prop_assert!(diff <= dec!(0.5));
        if diff == dec!(0.5) {
            prop_assert!(Decimal::from(tax) > exact, "ties round up for positive amounts");
        }
    }
}

// ── Edge cases ──────────────────────────────────────────────────────────────

#[test]
fn zero_priced_invoice() {
    let raw = with_lines(vec![LineItemBuilder::new("Gratisprobe", 5, 0).build()]);
    let xml = String::from_utf8(transform(&raw).unwrap()).unwrap();
    assert!(xml.contains("<TotalGrossAmount>0.00</TotalGrossAmount>"));
    assert!(xml.contains("<PayableAmount>0.00</PayableAmount>"));
}

#[test]
fn full_rate_of_one_hundred_percent() {
    let raw = with_lines(vec![
        LineItemBuilder::new("Abgabe", 1, 1_234)
            .tax_rate(dec!(100))
            .build(),
    ]);
    let req = validate(&raw).unwrap();
    let agg = aggregate(&req.lines).unwrap();
    assert_eq!(agg.totals.tax, 1_234);
    assert_eq!(agg.totals.gross, 2_468);
}
