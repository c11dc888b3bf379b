use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::invoice::{Invoice, InvoiceStatus};

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// An amount left the range `Decimal` can represent (about ±7.9e28).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("amount out of range")]
pub struct AmountOverflow;

/// VAT on `base` at `rate_percent` (e.g. `22` for 22%).
pub fn vat_amount(base: Decimal, rate_percent: Decimal) -> Result<Decimal, AmountOverflow> {
    base.checked_mul(rate_percent)
        .and_then(|product| product.checked_div(HUNDRED))
        // Large bases can overflow the product while the VAT itself fits.
        .or_else(|| base.checked_div(HUNDRED)?.checked_mul(rate_percent))
        .ok_or(AmountOverflow)
}

/// Gross amount: `base + vat_amount(base, rate_percent)`.
pub fn total(base: Decimal, rate_percent: Decimal) -> Result<Decimal, AmountOverflow> {
    base.checked_add(vat_amount(base, rate_percent)?)
        .ok_or(AmountOverflow)
}

/// Per-status sums shown on the invoicing dashboard.
///
/// `pending` includes invoices already sent but not yet paid. Drafts only
/// contribute to `total` and `total_revenue`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceStats {
    /// Number of invoices
    pub total: usize,
    pub paid: Decimal,
    pub pending: Decimal,
    pub overdue: Decimal,
    pub total_revenue: Decimal,
}

impl InvoiceStats {
    /// Fails when any running sum overflows.
    pub fn from_invoices<'a, I>(invoices: I) -> Result<Self, AmountOverflow>
    where
        I: IntoIterator<Item = &'a Invoice>,
    {
        invoices
            .into_iter()
            .try_fold(InvoiceStats::default(), |mut stats, invoice| {
                stats.total += 1;
                stats.total_revenue = add(stats.total_revenue, invoice.totale)?;
                match invoice.status {
                    InvoiceStatus::Paid => stats.paid = add(stats.paid, invoice.totale)?,
                    InvoiceStatus::Pending | InvoiceStatus::Sent => {
                        stats.pending = add(stats.pending, invoice.totale)?
                    }
                    InvoiceStatus::Overdue => stats.overdue = add(stats.overdue, invoice.totale)?,
                    InvoiceStatus::Draft => {}
                }
                Ok(stats)
            })
    }
}

fn add(sum: Decimal, amount: Decimal) -> Result<Decimal, AmountOverflow> {
    sum.checked_add(amount).ok_or(AmountOverflow)
}

/// Formats an amount the way `it-IT` currency formatting renders EUR:
/// `1.234,56 €`, with a non-breaking space before the symbol.
pub fn format_currency(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let plain = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}{grouped},{frac_part}\u{a0}€")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invoice(totale: i64, status: InvoiceStatus) -> Invoice {
        Invoice {
            numero: String::new(),
            cliente: String::new(),
            importo: Decimal::from(totale),
            iva: Decimal::ZERO,
            totale: Decimal::from(totale),
            status,
            data_emissione: String::new(),
            data_scadenza: String::new(),
            descrizione: None,
            note: None,
        }
    }

    #[test]
    fn test_vat_amount_and_total() {
        let base = Decimal::from(1000);
        let rate = Decimal::from(22);
        assert_eq!(vat_amount(base, rate), Ok(Decimal::from(220)));
        assert_eq!(total(base, rate), Ok(Decimal::from(1220)));
    }

    #[test]
    fn test_zero_rate_has_no_vat() {
        let base = Decimal::from_str_exact("99.99").unwrap();
        assert_eq!(vat_amount(base, Decimal::ZERO), Ok(Decimal::ZERO));
        assert_eq!(total(base, Decimal::ZERO), Ok(base));
    }

    #[test]
    fn test_fractional_rate() {
        let base = Decimal::from(200);
        let rate = Decimal::from_str_exact("5.5").unwrap();
        assert_eq!(vat_amount(base, rate), Ok(Decimal::from(11)));
    }

    #[test]
    fn test_stats_aggregation() {
        let invoices = vec![
            invoice(100, InvoiceStatus::Paid),
            invoice(50, InvoiceStatus::Pending),
            invoice(20, InvoiceStatus::Overdue),
        ];

        let stats = InvoiceStats::from_invoices(&invoices).unwrap();

        assert_eq!(
            stats,
            InvoiceStats {
                total: 3,
                paid: Decimal::from(100),
                pending: Decimal::from(50),
                overdue: Decimal::from(20),
                total_revenue: Decimal::from(170),
            }
        );
    }

    #[test]
    fn test_sent_counts_as_pending_and_draft_only_as_revenue() {
        let invoices = vec![
            invoice(30, InvoiceStatus::Sent),
            invoice(40, InvoiceStatus::Pending),
            invoice(5, InvoiceStatus::Draft),
        ];

        let stats = InvoiceStats::from_invoices(&invoices).unwrap();

        assert_eq!(stats.total, 3);
        assert_eq!(stats.pending, Decimal::from(70));
        assert_eq!(stats.paid, Decimal::ZERO);
        assert_eq!(stats.total_revenue, Decimal::from(75));
    }

    #[test]
    fn test_empty_stats() {
        let stats = InvoiceStats::from_invoices(&Vec::<Invoice>::new()).unwrap();
        assert_eq!(stats, InvoiceStats::default());
    }

    #[test]
    fn test_amounts_near_decimal_max_overflow() {
        let huge = Decimal::from_str_exact("50000000000000000000000000000").unwrap();

        let vat = Decimal::from_str_exact("11000000000000000000000000000").unwrap();

        assert_eq!(vat_amount(huge, Decimal::from(22)), Ok(vat));
        assert_eq!(total(huge, Decimal::from(22)), Ok(huge + vat));
        assert_eq!(total(huge, Decimal::from(100)), Err(AmountOverflow));
        assert_eq!(vat_amount(huge, Decimal::from(1000)), Err(AmountOverflow));
    }

    #[test]
    fn test_stats_overflow_is_an_error() {
        let mut big = invoice(0, InvoiceStatus::Paid);
        big.totale = Decimal::from_str_exact("50000000000000000000000000000").unwrap();
        let invoices = vec![big.clone(), big];

        assert_eq!(InvoiceStats::from_invoices(&invoices), Err(AmountOverflow));
    }

    #[test]
    fn test_stats_serialize_camel_case() {
        let stats = InvoiceStats::from_invoices(&[invoice(10, InvoiceStatus::Paid)]).unwrap();
        let json = serde_json::to_value(stats).unwrap();
        assert_eq!(json["total"], 1);
        assert_eq!(json["totalRevenue"], 10.0);
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(Decimal::ZERO), "0,00\u{a0}€");
        assert_eq!(
            format_currency(Decimal::from_str_exact("1234.5").unwrap()),
            "1.234,50\u{a0}€"
        );
        assert_eq!(
            format_currency(Decimal::from_str_exact("1234567.891").unwrap()),
            "1.234.567,89\u{a0}€"
        );
        assert_eq!(
            format_currency(Decimal::from_str_exact("-42.005").unwrap()),
            "-42,01\u{a0}€"
        );
        assert_eq!(format_currency(Decimal::from(999)), "999,00\u{a0}€");
    }
}
