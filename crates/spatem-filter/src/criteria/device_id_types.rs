//! Criterion on the device identifier type.

use crate::traits::{Criterion, CriterionKind};
use crate::types::{IdValue, Spatem};

/// Accepts spatems whose `deviceIdType` is in the accepted list.
///
/// Membership is type-aware: an accepted `"2"` does not match a
/// `deviceIdType` of `2`.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceIdTypeCriterion {
    accepted: Vec<IdValue>,
}

impl DeviceIdTypeCriterion {
    pub fn new(accepted: Vec<IdValue>) -> Self {
        Self { accepted }
    }

    pub fn accepted(&self) -> &[IdValue] {
        &self.accepted
    }
}

impl Criterion for DeviceIdTypeCriterion {
    fn kind(&self) -> CriterionKind {
        CriterionKind::DeviceIdTypes
    }

    fn accepts(&self, spatem: &Spatem) -> bool {
        spatem
            .device_id_type
            .as_ref()
            .is_some_and(|device_id_type| self.accepted.contains(device_id_type))
    }
}
