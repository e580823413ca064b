//! End-to-end checks of the invoice engine through its public API

use chrono::NaiveDate;
use invoice_core::{
    format_numerals, resolve_amount, AmountResult, AmountType, CalendarFormatter, Invoice,
    InvoiceError, InvoiceInput, NumeralFormatter, TaxType, NUMERAL_BOXES,
};
use pretty_assertions::assert_eq;

#[test]
fn test_subtotal_regular_property() {
    for a in (0..100_000u64).step_by(7) {
        let r = resolve_amount(&a.to_string(), AmountType::Subtotal, TaxType::Regular).unwrap();
        // round(a * 0.05) half-up in integer arithmetic
        let expected_tax = (a * 5 + 50) / 100;
        assert_eq!(r.tax, expected_tax, "subtotal {a}");
        assert_eq!(r.amount, a + r.tax);
        assert_eq!(r.subtotal, a);
    }
}

#[test]
fn test_total_exempt_property() {
    for a in (0..100_000u64).step_by(13) {
        let r = resolve_amount(&a.to_string(), AmountType::Total, TaxType::Exempt).unwrap();
        assert_eq!(
            r,
            AmountResult {
                subtotal: a,
                tax: 0,
                amount: a
            }
        );
    }
}

#[test]
fn test_feeding_amount_back_reproduces_split() {
    for tax_type in [TaxType::Regular, TaxType::ZeroRate, TaxType::Exempt] {
        for amount_type in [AmountType::Total, AmountType::Subtotal] {
            for a in (0..20_000u64).step_by(3) {
                let first = resolve_amount(&a.to_string(), amount_type, tax_type).unwrap();
                let again =
                    resolve_amount(&first.amount.to_string(), AmountType::Total, tax_type)
                        .unwrap();
                assert_eq!(first, again, "{a} as {amount_type} with {tax_type}");
            }
        }
    }
}

#[test]
fn test_invalid_total_amounts() {
    for raw in ["-5", "abc"] {
        let input = InvoiceInput::from_query_pairs([
            ("date", "2024-03-15"),
            ("totalAmount", raw),
            ("amountType", "total"),
            ("taxType", "regular"),
        ])
        .unwrap();
        assert_eq!(
            Invoice::build(&input),
            Err(InvoiceError::InvalidAmount(raw.to_string()))
        );
    }
}

#[test]
fn test_oversized_amounts_fail_without_panicking() {
    let cases = [
        ("subtotalAmount", "subtotal", "79228162514264337593543950335"),
        ("totalAmount", "total", "79228162514264337593543950335"),
        ("subtotalAmount", "subtotal", "100000000000000000000000000000000"),
        ("totalAmount", "total", "1000000000"),
    ];

    for (field, amount_type, raw) in cases {
        let input = InvoiceInput::from_query_pairs([
            ("date", "2024-03-15"),
            (field, raw),
            ("amountType", amount_type),
        ])
        .unwrap();
        assert_eq!(
            Invoice::build(&input),
            Err(InvoiceError::InvalidAmount(raw.to_string())),
            "{field}={raw}"
        );
    }
}

#[test]
fn test_scenario_from_request() {
    let input = InvoiceInput::from_query_pairs([
        ("buyer", "測試股份有限公司"),
        ("uniformNumber", "24536806"),
        ("date", "2024-03-15"),
        ("totalAmount", "1050"),
        ("subtotalAmount", "1"),
        ("amountType", "total"),
        ("taxType", "regular"),
    ])
    .unwrap();

    let invoice = Invoice::build(&input).unwrap();
    assert_eq!(
        invoice.amounts,
        AmountResult {
            subtotal: 1000,
            tax: 50,
            amount: 1050
        }
    );
    assert_eq!(invoice.roc_date.to_string(), "113年3月15日");
    assert_eq!(invoice.period.to_string(), "113年3-4月");
    assert_eq!(invoice.download_file_name(), "發票_24536806_2024-03-15.png");
}

#[test]
fn test_roc_year_for_every_year() {
    for year in 1912..2100 {
        let date = NaiveDate::from_ymd_opt(year, 6, 30).unwrap();
        assert_eq!(CalendarFormatter::to_roc(&date).unwrap().roc_year, year - 1911);
    }
}

#[test]
fn test_period_constant_within_pair() {
    let march = NaiveDate::from_ymd_opt(2024, 3, 3).unwrap();
    let april = NaiveDate::from_ymd_opt(2024, 4, 20).unwrap();
    assert_eq!(
        CalendarFormatter::period_of(&march).unwrap(),
        CalendarFormatter::period_of(&april).unwrap()
    );
}

#[test]
fn test_numerals_zero_and_interior_zero() {
    let zero = format_numerals(0).unwrap();
    let shown: Vec<_> = zero.iter().enumerate().filter(|(_, c)| c.show).collect();
    assert_eq!(shown.len(), 1);
    assert_eq!(shown[0].0, NUMERAL_BOXES - 1);
    assert_eq!(shown[0].1.digit, None);

    let cells = format_numerals(105).unwrap();
    let first_shown = cells.iter().position(|c| c.show).unwrap();
    assert_eq!(cells[first_shown].unit, '佰');
    assert!(cells[first_shown..].iter().all(|c| c.show));
    assert_eq!(cells[NUMERAL_BOXES - 2].digit, None);
    assert_eq!(cells[NUMERAL_BOXES - 1].digit, Some('伍'));
}

#[test]
fn test_concurrent_calls_agree() {
    let handles: Vec<_> = (0..8u64)
        .map(|seed| {
            std::thread::spawn(move || {
                (0..1000u64)
                    .map(|i| {
                        let raw = (seed * 1000 + i).to_string();
                        let r = resolve_amount(&raw, AmountType::Total, TaxType::Regular).unwrap();
                        (r, NumeralFormatter::format(r.amount).unwrap())
                    })
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    for (seed, handle) in handles.into_iter().enumerate() {
        let results = handle.join().unwrap();
        for (i, (r, cells)) in results.into_iter().enumerate() {
            let raw = (seed as u64 * 1000 + i as u64).to_string();
            assert_eq!(
                r,
                resolve_amount(&raw, AmountType::Total, TaxType::Regular).unwrap()
            );
            assert_eq!(cells, format_numerals(r.amount).unwrap());
        }
    }
}
