//! Checking an offered fee against an effective price table
//!
//! The fee may be paid in any one accepted denomination: it passes as soon
//! as a single denomination covers `ceil(price * gas_limit)`.

use crate::core::{Denom, Fee, PriceTable};
use bigdecimal::num_bigint::BigInt;
use bigdecimal::BigDecimal;
use std::fmt;
use thiserror::Error;

// =============================================================================
// Required Fees
// =============================================================================

/// Amount of one denomination a transaction must offer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequiredFee {
    pub denom: Denom,
    pub amount: BigInt,
}

impl RequiredFee {
    /// True if `fee` offers at least the required amount of this denomination.
    /// A zero requirement is always covered.
    pub fn is_covered_by(&self, fee: &Fee) -> bool {
        BigInt::from(fee.amount_of(&self.denom)) >= self.amount
    }
}

impl fmt::Display for RequiredFee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.denom)
    }
}

/// Required amounts for every effective denomination, in denomination order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequiredFees(Vec<RequiredFee>);

impl RequiredFees {
    pub fn iter(&self) -> impl Iterator<Item = &RequiredFee> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Required amount for `denom`, if it is accepted at all
    pub fn get(&self, denom: &Denom) -> Option<&BigInt> {
        self.0
            .iter()
            .find(|required| &required.denom == denom)
            .map(|required| &required.amount)
    }

    /// True if at least one denomination is covered by `fee`
    pub fn is_any_covered_by(&self, fee: &Fee) -> bool {
        self.0.iter().any(|required| required.is_covered_by(fee))
    }
}

impl FromIterator<RequiredFee> for RequiredFees {
    fn from_iter<I: IntoIterator<Item = RequiredFee>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for RequiredFees {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let items: Vec<String> = self.0.iter().map(RequiredFee::to_string).collect();
        f.write_str(&items.join(","))
    }
}

// =============================================================================
// Rejection
// =============================================================================

/// Why a transaction was refused admission.
///
/// A rejection is an ordinary outcome reported back to the submitter, who
/// may resubmit with a higher fee.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    #[error("insufficient fees; got: {offered} required: {required}")]
    InsufficientFee { offered: Fee, required: RequiredFees },
    #[error("fee denominations not accepted; got: {offered} required: {required}")]
    DenomMismatch { offered: Fee, required: RequiredFees },
}

impl Rejection {
    /// Per-denomination amounts that would have been accepted
    pub fn required(&self) -> &RequiredFees {
        match self {
            Self::InsufficientFee { required, .. } | Self::DenomMismatch { required, .. } => {
                required
            }
        }
    }

    pub fn offered(&self) -> &Fee {
        match self {
            Self::InsufficientFee { offered, .. } | Self::DenomMismatch { offered, .. } => offered,
        }
    }
}

// =============================================================================
// Evaluation
// =============================================================================

/// Smallest integer not below `value`; `value` is non-negative
fn ceil_to_int(value: &BigDecimal) -> BigInt {
    let (mut floor, _) = value.with_scale(0).into_bigint_and_exponent();
    if &BigDecimal::new(floor.clone(), 0) < value {
        floor += BigInt::from(1u8);
    }
    floor
}

/// `ceil(price * gas_limit)` for each denomination of `effective`
pub fn required_fees(effective: &PriceTable, gas_limit: u64) -> RequiredFees {
    let gas = BigDecimal::new(BigInt::from(gas_limit), 0);
    effective
        .iter()
        .map(|(denom, price)| RequiredFee {
            denom: denom.clone(),
            amount: ceil_to_int(&(price * &gas)),
        })
        .collect()
}

/// Accept `fee` if `effective` is empty or if it covers the requirement of
/// at least one effective denomination.
pub fn evaluate(fee: &Fee, gas_limit: u64, effective: &PriceTable) -> Result<(), Rejection> {
    if effective.is_empty() {
        return Ok(());
    }

    let required = required_fees(effective, gas_limit);
    if required.is_any_covered_by(fee) {
        return Ok(());
    }

    let offered = fee.clone();
    if !fee.is_empty() && !fee.denoms().any(|denom| effective.contains(denom)) {
        return Err(Rejection::DenomMismatch { offered, required });
    }
    Err(Rejection::InsufficientFee { offered, required })
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    const GAS: u64 = 200_000;

    fn table(text: &str) -> PriceTable {
        PriceTable::parse(text).unwrap()
    }

    fn fee(text: &str) -> Fee {
        Fee::parse(text).unwrap()
    }

    #[test]
    fn test_ceil_to_int() {
        let ceil = |s: &str| ceil_to_int(&BigDecimal::from_str(s).unwrap());
        assert_eq!(ceil("0"), BigInt::from(0));
        assert_eq!(ceil("400"), BigInt::from(400));
        assert_eq!(ceil("400.000"), BigInt::from(400));
        assert_eq!(ceil("400.0001"), BigInt::from(401));
        assert_eq!(ceil("0.3"), BigInt::from(1));
        assert_eq!(ceil("0.9999"), BigInt::from(1));
        assert_eq!(ceil("1.5"), BigInt::from(2));
        assert_eq!(ceil("2.0000001"), BigInt::from(3));
    }

    #[test]
    fn test_required_fees() {
        let required = required_fees(&table("0.004uatom,0.0025stake"), GAS);
        assert_eq!(required.len(), 2);
        assert_eq!(required.get(&Denom::new("uatom").unwrap()), Some(&BigInt::from(800)));
        assert_eq!(required.get(&Denom::new("stake").unwrap()), Some(&BigInt::from(500)));
        assert_eq!(required.to_string(), "500stake,800uatom");
    }

    #[test]
    fn test_required_fee_rounds_up() {
        let required = required_fees(&table("0.0000015uatom"), 100_001);
        // 0.1500015 rounds up to a whole unit
        assert_eq!(required.get(&Denom::new("uatom").unwrap()), Some(&BigInt::from(1)));
    }

    #[test]
    fn test_empty_table_accepts_anything() {
        assert!(evaluate(&Fee::new(), GAS, &PriceTable::new()).is_ok());
        assert!(evaluate(&fee("1stake"), GAS, &PriceTable::new()).is_ok());
    }

    #[test]
    fn test_exact_amount_accepted() {
        assert!(evaluate(&fee("800uatom"), GAS, &table("0.004uatom")).is_ok());
        assert!(evaluate(&fee("799uatom"), GAS, &table("0.004uatom")).is_err());
    }

    #[test]
    fn test_any_one_denomination_suffices() {
        let effective = table("0.004photon,0.004quark");
        assert!(evaluate(&fee("800quark"), GAS, &effective).is_ok());
        assert!(evaluate(&fee("1photon,800quark"), GAS, &effective).is_ok());
        // an unrelated extra coin does not spoil a covering one
        assert!(evaluate(&fee("800photon,5stake"), GAS, &effective).is_ok());
    }

    #[test]
    fn test_insufficient_fee_reports_all_requirements() {
        let effective = table("0.004photon,0.004quark");
        let err = evaluate(&fee("100photon"), GAS, &effective).unwrap_err();

        match &err {
            Rejection::InsufficientFee { offered, required } => {
                assert_eq!(offered, &fee("100photon"));
                assert_eq!(required.to_string(), "800photon,800quark");
            }
            other => panic!("unexpected rejection: {other:?}"),
        }
        assert_eq!(
            err.to_string(),
            "insufficient fees; got: 100photon required: 800photon,800quark"
        );
    }

    #[test]
    fn test_denom_mismatch() {
        let err = evaluate(&fee("800stake"), GAS, &table("0.004photon")).unwrap_err();
        assert!(matches!(err, Rejection::DenomMismatch { .. }));
        assert_eq!(err.required().len(), 1);
        assert_eq!(err.offered(), &fee("800stake"));
    }

    #[test]
    fn test_empty_fee_is_insufficient() {
        let err = evaluate(&Fee::new(), GAS, &table("0.004uatom")).unwrap_err();
        assert!(matches!(err, Rejection::InsufficientFee { .. }));
    }

    #[test]
    fn test_zero_price_is_no_floor() {
        let effective = table("0uatom,0.004photon");
        assert!(evaluate(&Fee::new(), GAS, &effective).is_ok());
        assert!(evaluate(&fee("0uatom"), GAS, &effective).is_ok());
    }
}
