//! Recorded scan trace for post-hoc analysis.
//!
//! Collects every event of an [`UnderflowScan`](super::UnderflowScan) so the
//! best achievable approximation per problem size can be looked up after the
//! fact, or the whole run exported as JSON.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::underflow_scan::ScanEvent;
use crate::math::Precision;

/// Best measured deviation for one problem size.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BestApproximation<T> {
    /// Problem size
    pub n: usize,
    /// Step exponent that achieved it
    pub k: u32,
    /// Signed deviation from the analytic derivative
    pub err: T,
}

/// Append-only record of scan events.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ScanTrace<T> {
    events: Vec<ScanEvent<T>>,
}

impl<T: Precision> ScanTrace<T> {
    /// Create a new, empty trace.
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Append an event.
    pub fn push(&mut self, event: ScanEvent<T>) {
        self.events.push(event);
    }

    /// All recorded events, in scan order.
    pub fn events(&self) -> &[ScanEvent<T>] {
        &self.events
    }

    /// Number of recorded events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether the trace is empty.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// The event that ended the scan, if any was recorded.
    pub fn terminal(&self) -> Option<&ScanEvent<T>> {
        self.events.last()
    }

    /// Smallest `|err|` measured for problem size `n`.
    ///
    /// Ties keep the smaller `k`.
    pub fn best_for(&self, n: usize) -> Option<BestApproximation<T>> {
        self.deviations()
            .filter(|best| best.n == n)
            .fold(None, |acc: Option<BestApproximation<T>>, cand| match acc {
                Some(cur) if cur.err.abs() <= cand.err.abs() => Some(cur),
                _ => Some(cand),
            })
    }

    /// Best approximation for every problem size that produced a deviation,
    /// ordered by `n`.
    pub fn best_per_size(&self) -> Vec<BestApproximation<T>> {
        let mut best: BTreeMap<usize, BestApproximation<T>> = BTreeMap::new();
        for cand in self.deviations() {
            best.entry(cand.n)
                .and_modify(|cur| {
                    if cand.err.abs() < cur.err.abs() {
                        *cur = cand;
                    }
                })
                .or_insert(cand);
        }
        best.into_values().collect()
    }

    /// Serialize the trace to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    fn deviations(&self) -> impl Iterator<Item = BestApproximation<T>> + '_ {
        self.events.iter().filter_map(|event| match *event {
            ScanEvent::Deviation { k, n, err } => Some(BestApproximation { n, k, err }),
            _ => None,
        })
    }
}

impl<T: Precision> FromIterator<ScanEvent<T>> for ScanTrace<T> {
    fn from_iter<I: IntoIterator<Item = ScanEvent<T>>>(iter: I) -> Self {
        Self {
            events: iter.into_iter().collect(),
        }
    }
}
