//! Criterion on the composite `deviceId/deviceIdType` signature.

use crate::traits::{Criterion, CriterionKind};
use crate::types::Spatem;

/// Accepts spatems whose signature is in the accepted list.
///
/// ## Algorithm
/// Builds `deviceId + "/" + deviceIdType` (integers rendered in decimal)
/// and tests exact membership. A spatem missing either field has no
/// signature and is rejected.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceSignatureCriterion {
    accepted: Vec<String>,
}

impl DeviceSignatureCriterion {
    pub fn new(accepted: Vec<String>) -> Self {
        Self { accepted }
    }

    pub fn accepted(&self) -> &[String] {
        &self.accepted
    }
}

impl Criterion for DeviceSignatureCriterion {
    fn kind(&self) -> CriterionKind {
        CriterionKind::DeviceSignatures
    }

    fn accepts(&self, spatem: &Spatem) -> bool {
        match spatem.signature() {
            Some(signature) => self.accepted.contains(&signature),
            None => false,
        }
    }
}
