//! Re-entrancy guard for checkout starts.
//!
//! The action router does not deduplicate clicks. While a checkout session is
//! being created for a `(webinar, viewer)` pair, further attempts for the same
//! pair are refused until the first one finishes.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

type CheckoutKey = (String, String);

/// Set of `(webinar_id, viewer_id)` pairs with a checkout in flight.
#[derive(Debug, Default)]
pub struct CheckoutGuard {
    in_flight: Mutex<HashSet<CheckoutKey>>,
}

impl CheckoutGuard {
    /// Claim the pair. Returns `None` if a checkout for it is already running.
    ///
    /// The claim is released when the returned permit is dropped.
    pub fn try_acquire(self: &Arc<Self>, webinar_id: &str, viewer_id: &str) -> Option<CheckoutPermit> {
        let key = (webinar_id.to_string(), viewer_id.to_string());
        if !self.lock().insert(key.clone()) {
            return None;
        }
        Some(CheckoutPermit {
            guard: Arc::clone(self),
            key,
        })
    }

    /// Number of checkouts currently in flight.
    pub fn in_flight(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> MutexGuard<'_, HashSet<CheckoutKey>> {
        // The set stays consistent even if a holder panicked mid-insert.
        self.in_flight.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Proof of an in-flight checkout; releases its pair on drop.
#[derive(Debug)]
pub struct CheckoutPermit {
    guard: Arc<CheckoutGuard>,
    key: CheckoutKey,
}

impl Drop for CheckoutPermit {
    fn drop(&mut self) {
        self.guard.lock().remove(&self.key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_acquire_for_same_pair_is_refused() {
        let guard = Arc::new(CheckoutGuard::default());
        let permit = guard.try_acquire("w1", "v1");
        assert!(permit.is_some());
        assert!(guard.try_acquire("w1", "v1").is_none());
        assert_eq!(guard.in_flight(), 1);
    }

    #[test]
    fn different_pairs_do_not_block_each_other() {
        let guard = Arc::new(CheckoutGuard::default());
        let _a = guard.try_acquire("w1", "v1").unwrap();
        let _b = guard.try_acquire("w1", "v2").unwrap();
        let _c = guard.try_acquire("w2", "v1").unwrap();
        assert_eq!(guard.in_flight(), 3);
    }

    #[test]
    fn dropping_permit_releases_pair() {
        let guard = Arc::new(CheckoutGuard::default());
        let permit = guard.try_acquire("w1", "v1").unwrap();
        drop(permit);
        assert_eq!(guard.in_flight(), 0);
        assert!(guard.try_acquire("w1", "v1").is_some());
    }
}
