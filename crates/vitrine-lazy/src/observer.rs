//! Intersection observer
//!
//! Tracks which elements are being watched for visibility. The host reports
//! visibility changes as batches of `IntersectionEntry`; the observer only
//! decides which of them count.

use std::collections::BTreeSet;
use vitrine_core::NodeId;

#[derive(Debug, Clone, PartialEq)]
pub struct ObserverOptions {
    /// `None` observes against the viewport
    pub root: Option<NodeId>,
    pub root_margin: String,
    /// Visible fraction at which the host delivers an entry
    pub threshold: f64,
}

impl Default for ObserverOptions {
    fn default() -> Self {
        Self {
            root: None,
            root_margin: "0px".to_string(),
            threshold: 0.1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionEntry {
    pub target: NodeId,
    pub is_intersecting: bool,
    pub intersection_ratio: f64,
}

impl IntersectionEntry {
    pub fn visible(target: NodeId, intersection_ratio: f64) -> Self {
        Self {
            target,
            is_intersecting: true,
            intersection_ratio,
        }
    }

    pub fn hidden(target: NodeId) -> Self {
        Self {
            target,
            is_intersecting: false,
            intersection_ratio: 0.0,
        }
    }
}

#[derive(Debug, Default)]
pub struct IntersectionObserver {
    options: ObserverOptions,
    observed: BTreeSet<NodeId>,
}

impl IntersectionObserver {
    pub fn new(options: ObserverOptions) -> Self {
        Self {
            options,
            observed: BTreeSet::new(),
        }
    }

    pub fn options(&self) -> &ObserverOptions {
        &self.options
    }

    pub fn observe(&mut self, target: NodeId) {
        self.observed.insert(target);
    }

    /// Returns false if the target was not being observed
    pub fn unobserve(&mut self, target: NodeId) -> bool {
        self.observed.remove(&target)
    }

    pub fn is_observing(&self, target: NodeId) -> bool {
        self.observed.contains(&target)
    }

    pub fn observed_count(&self) -> usize {
        self.observed.len()
    }

    /// Observed targets whose entry reports them intersecting, in reported
    /// order. The threshold only governs when the host delivers entries.
    pub fn triggered(&self, entries: &[IntersectionEntry]) -> Vec<NodeId> {
        entries
            .iter()
            .filter(|e| self.is_observing(e.target))
            .filter(|e| e.is_intersecting)
            .map(|e| e.target)
            .collect()
    }
}
