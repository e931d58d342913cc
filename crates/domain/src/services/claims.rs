//! Claim ledger arithmetic.
//!
//! This module owns the rules for reconciling claim attempts against a
//! gift item's finite quantity. Every mutation of an item's `claimed`
//! counter flows through one of three decisions:
//!
//! - [`override_claimed`]: direct override, clamped into `0..=quantity`
//!   (backs "unmark as purchased"; deliberately produces no ledger entry)
//! - [`apply_claim`]: non-negative increment, truncated to the room left
//! - [`grant_purchase`]: the ledgered path; fails cleanly when nothing
//!   can be granted so a purchase is never silently recorded at zero
//!
//! The functions are pure; persistence calls them inside a row-locking
//! transaction so the read-compute-write sequence observes no
//! interleaving from concurrent writers. The invariant
//! `0 <= claimed <= quantity` holds after every decision regardless of
//! caller-supplied input.

use thiserror::Error;

/// Error produced when a purchase cannot grant any units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ClaimError {
    /// The item is fully claimed (or the request was for zero units);
    /// nothing was granted and nothing may be written.
    #[error("No units available to claim")]
    CapacityExhausted,
}

/// Outcome of an incremental claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClaimOutcome {
    /// The new claimed count to persist.
    pub claimed: i32,
    /// Units actually applied; may be less than requested, never more.
    pub applied: i32,
}

/// Outcome of a successful purchase grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PurchaseGrant {
    /// The new claimed count to persist.
    pub claimed: i32,
    /// Units granted to this purchase; always positive, and exactly the
    /// quantity the matching ledger entry must record.
    pub granted: i32,
}

/// Remaining unclaimed units, never negative.
pub fn available(quantity: i32, claimed: i32) -> i32 {
    (quantity - claimed).max(0)
}

/// Clamps a requested absolute claimed count into `0..=quantity`.
///
/// Values below zero clamp to zero, values above `quantity` clamp to
/// `quantity`. This is the out-of-ledger override path: it never produces
/// a purchase record, by design.
pub fn override_claimed(quantity: i32, requested: i32) -> i32 {
    requested.clamp(0, quantity.max(0))
}

/// Applies a non-negative increment, truncating to the room that remains.
///
/// An over-large request is partially satisfied rather than rejected; a
/// fully-claimed item yields `applied == 0` as a successful no-op.
pub fn apply_claim(quantity: i32, claimed: i32, delta: i32) -> ClaimOutcome {
    let applied = delta.clamp(0, available(quantity, claimed));
    ClaimOutcome {
        claimed: claimed + applied,
        applied,
    }
}

/// Decides how many units a purchase may take.
///
/// Grants `clamp(requested, 0, available)`. A grant of zero is an error:
/// the caller must not write anything, so the ledger never receives an
/// entry at a quantity the buyer neither asked for nor was told about.
pub fn grant_purchase(
    quantity: i32,
    claimed: i32,
    requested: i32,
) -> Result<PurchaseGrant, ClaimError> {
    let granted = requested.clamp(0, available(quantity, claimed));
    if granted <= 0 {
        return Err(ClaimError::CapacityExhausted);
    }
    Ok(PurchaseGrant {
        claimed: claimed + granted,
        granted,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_available() {
        assert_eq!(available(10, 3), 7);
        assert_eq!(available(2, 2), 0);
        // A quantity edit can never push availability negative
        assert_eq!(available(2, 5), 0);
    }

    #[test]
    fn test_override_clamps_below_zero() {
        assert_eq!(override_claimed(10, -5), 0);
    }

    #[test]
    fn test_override_clamps_above_quantity() {
        assert_eq!(override_claimed(10, 999), 10);
    }

    #[test]
    fn test_override_in_range_passes_through() {
        assert_eq!(override_claimed(10, 0), 0);
        assert_eq!(override_claimed(10, 7), 7);
        assert_eq!(override_claimed(10, 10), 10);
    }

    #[test]
    fn test_apply_claim_partial_grant() {
        // quantity=5, claimed=4: only one unit of the requested ten fits
        let outcome = apply_claim(5, 4, 10);
        assert_eq!(outcome.claimed, 5);
        assert_eq!(outcome.applied, 1);
    }

    #[test]
    fn test_apply_claim_full_grant() {
        let outcome = apply_claim(5, 1, 3);
        assert_eq!(outcome.claimed, 4);
        assert_eq!(outcome.applied, 3);
    }

    #[test]
    fn test_apply_claim_sold_out_is_noop() {
        // Fully claimed item: succeeds with nothing applied, no error
        let outcome = apply_claim(3, 3, 7);
        assert_eq!(outcome.claimed, 3);
        assert_eq!(outcome.applied, 0);
    }

    #[test]
    fn test_apply_claim_negative_delta_is_noop() {
        let outcome = apply_claim(5, 2, -4);
        assert_eq!(outcome.claimed, 2);
        assert_eq!(outcome.applied, 0);
    }

    #[test]
    fn test_grant_purchase_exhausted() {
        // quantity=2, claimed=2: fails distinctly, nothing to persist
        assert_eq!(
            grant_purchase(2, 2, 1),
            Err(ClaimError::CapacityExhausted)
        );
    }

    #[test]
    fn test_grant_purchase_zero_request_fails() {
        assert_eq!(
            grant_purchase(5, 0, 0),
            Err(ClaimError::CapacityExhausted)
        );
        assert_eq!(
            grant_purchase(5, 0, -2),
            Err(ClaimError::CapacityExhausted)
        );
    }

    #[test]
    fn test_grant_purchase_partial() {
        // quantity=3, claimed=2: a request for five grants exactly one,
        // and the ledger entry must carry that one
        let grant = grant_purchase(3, 2, 5).unwrap();
        assert_eq!(grant.granted, 1);
        assert_eq!(grant.claimed, 3);
    }

    #[test]
    fn test_grant_purchase_full() {
        let grant = grant_purchase(10, 4, 2).unwrap();
        assert_eq!(grant.granted, 2);
        assert_eq!(grant.claimed, 6);
    }

    #[test]
    fn test_invariant_over_operation_sequences() {
        // Drive one item through a mixed sequence of overrides, increments
        // and purchases; the invariant must hold after every step.
        let quantity = 6;
        let mut claimed = 0;

        let steps: Vec<Box<dyn Fn(i32) -> i32>> = vec![
            Box::new(|c| apply_claim(6, c, 4).claimed),
            Box::new(|_c| override_claimed(6, 99)),
            Box::new(|c| grant_purchase(6, c, 3).map(|g| g.claimed).unwrap_or(c)),
            Box::new(|_c| override_claimed(6, -7)),
            Box::new(|c| grant_purchase(6, c, 2).map(|g| g.claimed).unwrap_or(c)),
            Box::new(|c| apply_claim(6, c, 100).claimed),
            Box::new(|c| grant_purchase(6, c, 1).map(|g| g.claimed).unwrap_or(c)),
        ];

        for step in steps {
            claimed = step(claimed);
            assert!((0..=quantity).contains(&claimed));
        }
    }

    #[test]
    fn test_every_purchase_unit_traces_to_a_grant() {
        // Repeated purchases against one item: the sum of granted
        // quantities equals the final claimed count.
        let quantity = 7;
        let mut claimed = 0;
        let mut ledger: Vec<i32> = Vec::new();

        for requested in [3, 3, 3, 3] {
            match grant_purchase(quantity, claimed, requested) {
                Ok(grant) => {
                    claimed = grant.claimed;
                    ledger.push(grant.granted);
                }
                Err(ClaimError::CapacityExhausted) => {}
            }
        }

        assert_eq!(claimed, quantity);
        assert_eq!(ledger.iter().sum::<i32>(), claimed);
        assert_eq!(ledger, vec![3, 3, 1]);
    }
}
