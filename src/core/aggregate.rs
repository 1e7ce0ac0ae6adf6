use std::collections::HashMap;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::Serialize;

use super::error::InternalError;
use super::types::{LineItem, TaxCategory};

/// Amounts computed for one line item, in cents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineComputation {
    /// 1-based position in the request.
    pub position: usize,
    pub rate: Decimal,
    pub category: TaxCategory,
    /// unit price * quantity.
    pub net: i64,
    pub tax: i64,
}

/// All lines sharing one tax rate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaxBucket {
    pub rate: Decimal,
    pub category: TaxCategory,
    pub taxable: i64,
    pub tax: i64,
}

/// Document totals in cents. No discounts or prepayments exist, so
/// `payable == gross`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub net: i64,
    pub tax: i64,
    pub gross: i64,
    pub payable: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Aggregation {
    /// Same order as the input lines.
    pub lines: Vec<LineComputation>,
    /// One bucket per distinct rate, ascending by rate.
    pub buckets: Vec<TaxBucket>,
    pub totals: Totals,
}

/// Compute line amounts, per-rate tax buckets and document totals.
///
/// Rounding happens exactly once per line (the tax amount); totals are plain
/// sums of already rounded values.
pub fn aggregate(lines: &[LineItem]) -> Result<Aggregation, InternalError> {
    let mut computed = Vec::with_capacity(lines.len());
    let mut groups: HashMap<Decimal, (i64, i64)> = HashMap::new();
    let mut net_total: i64 = 0;
    let mut tax_total: i64 = 0;

    for (i, line) in lines.iter().enumerate() {
        let net = line
            .unit_price
            .checked_mul(line.quantity)
            .ok_or_else(|| overflow(format!("line {} net amount", i + 1)))?;
        let rate = line.tax_rate.normalize();
        let tax = line_tax(net, rate)?;

        let (taxable, bucket_tax) = groups.entry(rate).or_insert((0, 0));
        *taxable = add(*taxable, net, "bucket taxable amount")?;
        *bucket_tax = add(*bucket_tax, tax, "bucket tax amount")?;

        net_total = add(net_total, net, "net total")?;
        tax_total = add(tax_total, tax, "tax total")?;

        computed.push(LineComputation {
            position: i + 1,
            rate,
            category: TaxCategory::for_rate(rate),
            net,
            tax,
        });
    }

    let mut buckets: Vec<TaxBucket> = groups
        .into_iter()
        .map(|(rate, (taxable, tax))| TaxBucket {
            rate,
            category: TaxCategory::for_rate(rate),
            taxable,
            tax,
        })
        .collect();
    // HashMap iteration order is arbitrary; output must not be.
    buckets.sort_by(|a, b| a.rate.cmp(&b.rate));

    let gross = add(net_total, tax_total, "gross total")?;

    Ok(Aggregation {
        lines: computed,
        buckets,
        totals: Totals {
            net: net_total,
            tax: tax_total,
            gross,
            payable: gross,
        },
    })
}

/// Tax on a net amount, rounded half away from zero to whole cents.
///
/// `line_tax(25, 10)` is 2.5 cents and rounds to 3; banker's rounding would
/// give 2.
pub fn line_tax(net: i64, rate: Decimal) -> Result<i64, InternalError> {
    Decimal::from(net)
        .checked_mul(rate)
        .and_then(|v| v.checked_div(dec!(100)))
        .map(|v| v.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|v| v.to_i64())
        .ok_or_else(|| overflow(format!("tax on {net} at {rate}%")))
}

impl Aggregation {
    /// Re-check that buckets and totals reconcile with the line amounts.
    pub fn check_conservation(&self) -> Result<(), InternalError> {
        let line_net: i128 = self.lines.iter().map(|l| i128::from(l.net)).sum();
        let line_tax: i128 = self.lines.iter().map(|l| i128::from(l.tax)).sum();
        let bucket_net: i128 = self.buckets.iter().map(|b| i128::from(b.taxable)).sum();
        let bucket_tax: i128 = self.buckets.iter().map(|b| i128::from(b.tax)).sum();

        if bucket_net != line_net || bucket_tax != line_tax {
            return Err(InternalError::Arithmetic(format!(
                "tax buckets ({bucket_net}/{bucket_tax}) do not match lines ({line_net}/{line_tax})"
            )));
        }

        let t = &self.totals;
        if i128::from(t.net) != line_net || i128::from(t.tax) != line_tax {
            return Err(InternalError::Arithmetic(format!(
                "totals ({}/{}) do not match lines ({line_net}/{line_tax})",
                t.net, t.tax
            )));
        }
        if i128::from(t.gross) != line_net + line_tax || t.payable != t.gross {
            return Err(InternalError::Arithmetic(format!(
                "gross {} / payable {} do not equal net + tax {}",
                t.gross,
                t.payable,
                line_net + line_tax
            )));
        }

        if self.buckets.windows(2).any(|w| w[0].rate >= w[1].rate) {
            return Err(InternalError::Arithmetic(
                "tax buckets are not strictly ascending by rate".into(),
            ));
        }
        Ok(())
    }
}

fn add(a: i64, b: i64, what: &str) -> Result<i64, InternalError> {
    a.checked_add(b).ok_or_else(|| overflow(what.to_string()))
}

fn overflow(what: String) -> InternalError {
    InternalError::Arithmetic(format!("{what} overflows"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(qty: i64, price: i64, rate: Decimal) -> LineItem {
        LineItem {
            description: "Position".into(),
            quantity: qty,
            unit_price: price,
            tax_rate: rate,
            unit: None,
        }
    }

    #[test]
    fn half_cent_rounds_away_from_zero() {
        assert_eq!(line_tax(25, dec!(10)).unwrap(), 3);
        assert_eq!(line_tax(15, dec!(10)).unwrap(), 2);
        assert_eq!(line_tax(14, dec!(10)).unwrap(), 1);
        assert_eq!(line_tax(0, dec!(20)).unwrap(), 0);
        assert_eq!(line_tax(999, dec!(0)).unwrap(), 0);
    }

    #[test]
    fn fractional_rates() {
        // 1000 * 5.5% = 55
        assert_eq!(line_tax(1000, dec!(5.5)).unwrap(), 55);
        // 333 * 13% = 43.29
        assert_eq!(line_tax(333, dec!(13)).unwrap(), 43);
    }

    #[test]
    fn equal_rates_with_different_scale_share_a_bucket() {
        let agg = aggregate(&[line(1, 100, dec!(20)), line(1, 100, dec!(20.0))]).unwrap();
        assert_eq!(agg.buckets.len(), 1);
        assert_eq!(agg.buckets[0].taxable, 200);
        assert_eq!(agg.buckets[0].tax, 40);
    }

    #[test]
    fn per_line_rounding_is_summed_not_recomputed() {
        // Each line: 5 * 10% = 0.5 -> 1 cent. Bucket-level rounding would give 2.
        let agg = aggregate(&[line(1, 5, dec!(10)), line(1, 5, dec!(10)), line(1, 5, dec!(10))])
            .unwrap();
        assert_eq!(agg.totals.tax, 3);
        assert_eq!(agg.buckets[0].tax, 3);
        agg.check_conservation().unwrap();
    }

    #[test]
    fn conservation_detects_tampering() {
        let mut agg = aggregate(&[line(2, 500, dec!(20))]).unwrap();
        agg.buckets[0].tax += 1;
        assert!(matches!(
            agg.check_conservation(),
            Err(InternalError::Arithmetic(_))
        ));
    }

    #[test]
    fn overflow_is_internal() {
        let err = aggregate(&[line(i64::MAX, 2, dec!(0))]).unwrap_err();
        assert!(matches!(err, InternalError::Arithmetic(_)));
    }
}
