use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

/// One cent: the smallest representable amount and the settlement tolerance.
///
/// Balances whose magnitude drops below one cent are treated as settled,
/// and the pool as a whole may be off by at most one cent between total
/// buy-ins and total payouts before settlement is refused.
pub const CENT: Decimal = dec!(0.01);

/// Round an amount to currency precision (2 decimal places).
///
/// Midpoints round away from zero: `0.005` becomes `0.01`, `-0.005`
/// becomes `-0.01`. Every amount entering the ledger and every
/// intermediate result in the matching loop passes through this.
pub fn round_to_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Parse a raw payout entry, permissively.
///
/// Policy, not an error path: anything that does not parse as a decimal
/// coerces to zero, and negative entries clamp to zero. The parsed value
/// is stored as entered (payouts are not rounded at entry; totals and net
/// positions are rounded when aggregated). This mirrors the relaxed-entry
/// contract of the payout form: a half-typed number must never reject the
/// whole table.
pub fn parse_payout(raw: &str) -> Decimal {
    let parsed = raw.trim().parse::<Decimal>().unwrap_or(Decimal::ZERO);
    parsed.max(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_midpoint_away_from_zero() {
        assert_eq!(round_to_cents(dec!(0.005)), dec!(0.01));
        assert_eq!(round_to_cents(dec!(-0.005)), dec!(-0.01));
        assert_eq!(round_to_cents(dec!(2.675)), dec!(2.68));
    }

    #[test]
    fn test_round_two_places_unchanged() {
        assert_eq!(round_to_cents(dec!(12.34)), dec!(12.34));
        assert_eq!(round_to_cents(dec!(50)), dec!(50));
    }

    #[test]
    fn test_round_truncates_sub_cents() {
        assert_eq!(round_to_cents(dec!(33.333)), dec!(33.33));
        assert_eq!(round_to_cents(dec!(99.999)), dec!(100.00));
    }

    #[test]
    fn test_parse_payout_plain_number() {
        assert_eq!(parse_payout("80"), dec!(80));
        assert_eq!(parse_payout("12.50"), dec!(12.50));
    }

    #[test]
    fn test_parse_payout_keeps_sub_cent_entry() {
        // Entry is stored as typed; rounding happens at aggregation.
        assert_eq!(parse_payout("33.333"), dec!(33.333));
    }

    #[test]
    fn test_parse_payout_garbage_coerces_to_zero() {
        assert_eq!(parse_payout("not a number"), Decimal::ZERO);
        assert_eq!(parse_payout(""), Decimal::ZERO);
        assert_eq!(parse_payout("12abc"), Decimal::ZERO);
    }

    #[test]
    fn test_parse_payout_negative_clamps_to_zero() {
        assert_eq!(parse_payout("-5"), Decimal::ZERO);
        assert_eq!(parse_payout("-0.01"), Decimal::ZERO);
    }

    #[test]
    fn test_parse_payout_trims_whitespace() {
        assert_eq!(parse_payout("  42.00  "), dec!(42.00));
    }
}
