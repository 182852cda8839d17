//! Core traits for spatem filtering.
//!
//! Each acceptance rule is a [`Criterion`]. A [`SpatemFilter`](crate::SpatemFilter)
//! holds up to one of each kind and evaluates them in a fixed order.

use crate::config::{ACCEPTED_DEVICE_ID_TYPES, ACCEPTED_DEVICE_IDS, ACCEPTED_DEVICE_SIGNATURES};
use crate::types::Spatem;
use serde::Serialize;
use std::fmt;

/// A single acceptance rule.
///
/// ## Design Note
/// - `Send + Sync` so a filter can be shared across threads
/// - `accepts` borrows the record and must not fail; an unusable record
///   is simply not accepted
pub trait Criterion: Send + Sync {
    /// Which rule this is (for logging and diagnostics)
    fn kind(&self) -> CriterionKind;

    /// Does the given spatem satisfy this rule?
    fn accepts(&self, spatem: &Spatem) -> bool;
}

/// The three kinds of criteria, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CriterionKind {
    DeviceSignatures,
    DeviceIdTypes,
    DeviceIds,
}

impl CriterionKind {
    /// The configuration key that activates this criterion.
    pub fn name(&self) -> &'static str {
        match self {
            CriterionKind::DeviceSignatures => ACCEPTED_DEVICE_SIGNATURES,
            CriterionKind::DeviceIdTypes => ACCEPTED_DEVICE_ID_TYPES,
            CriterionKind::DeviceIds => ACCEPTED_DEVICE_IDS,
        }
    }
}

impl fmt::Display for CriterionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
