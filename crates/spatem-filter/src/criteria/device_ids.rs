//! Criterion on the device identifier.

use crate::traits::{Criterion, CriterionKind};
use crate::types::{IdValue, Spatem};

/// Accepts spatems whose `deviceId` is in the accepted list.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceIdCriterion {
    accepted: Vec<IdValue>,
}

impl DeviceIdCriterion {
    pub fn new(accepted: Vec<IdValue>) -> Self {
        Self { accepted }
    }

    pub fn accepted(&self) -> &[IdValue] {
        &self.accepted
    }
}

impl Criterion for DeviceIdCriterion {
    fn kind(&self) -> CriterionKind {
        CriterionKind::DeviceIds
    }

    fn accepts(&self, spatem: &Spatem) -> bool {
        spatem
            .device_id
            .as_ref()
            .is_some_and(|device_id| self.accepted.contains(device_id))
    }
}
