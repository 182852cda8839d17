//! The SpatemFilter decides whether a spatem passes.
//!
//! Active criteria are evaluated in a fixed order and combined with
//! logical AND:
//! 1. Device signatures
//! 2. Device identifier types
//! 3. Device identifiers
//!
//! With no active criteria every spatem passes.

use crate::config::FilterConfiguration;
use crate::criteria::{DeviceIdCriterion, DeviceIdTypeCriterion, DeviceSignatureCriterion};
use crate::traits::{Criterion, CriterionKind};
use crate::types::Spatem;

/// Immutable set of acceptance criteria.
///
/// ## Usage
/// ```ignore
/// let filter = SpatemFilter::new(
///     FilterConfiguration::new().with_accepted_device_signatures(["aa:bb:cc:dd:ee:ff/2"]),
/// );
///
/// assert!(filter.is_passing(&Spatem::new("aa:bb:cc:dd:ee:ff", 2)));
/// ```
///
/// The filter holds no per-call state, so a shared reference can be used
/// from any number of threads at once.
#[derive(Debug, Clone, Default)]
pub struct SpatemFilter {
    device_signatures: Option<DeviceSignatureCriterion>,
    device_id_types: Option<DeviceIdTypeCriterion>,
    device_ids: Option<DeviceIdCriterion>,
}

impl SpatemFilter {
    /// Create a new SpatemFilter from a configuration.
    ///
    /// A criterion is active if and only if it is `Some` in the
    /// configuration, including `Some(vec![])`.
    pub fn new(config: FilterConfiguration) -> Self {
        let filter = Self {
            device_signatures: config
                .accepted_device_signatures
                .map(DeviceSignatureCriterion::new),
            device_id_types: config.accepted_device_id_types.map(DeviceIdTypeCriterion::new),
            device_ids: config.accepted_device_ids.map(DeviceIdCriterion::new),
        };
        tracing::debug!(active = ?filter.active_criteria(), "Constructed spatem filter");
        filter
    }

    /// Does the filter observe an acceptedDeviceSignatures criterion?
    pub fn has_accepted_device_signatures(&self) -> bool {
        self.device_signatures.is_some()
    }

    /// Does the filter observe an acceptedDeviceIds criterion?
    pub fn has_accepted_device_ids(&self) -> bool {
        self.device_ids.is_some()
    }

    /// Does the filter observe an acceptedDeviceIdTypes criterion?
    pub fn has_accepted_device_id_types(&self) -> bool {
        self.device_id_types.is_some()
    }

    pub fn device_signatures(&self) -> Option<&DeviceSignatureCriterion> {
        self.device_signatures.as_ref()
    }

    pub fn device_ids(&self) -> Option<&DeviceIdCriterion> {
        self.device_ids.as_ref()
    }

    pub fn device_id_types(&self) -> Option<&DeviceIdTypeCriterion> {
        self.device_id_types.as_ref()
    }

    /// Active criteria in evaluation order.
    pub fn active_criteria(&self) -> Vec<CriterionKind> {
        self.criteria().map(|criterion| criterion.kind()).collect()
    }

    /// Does the given spatem pass every active criterion?
    pub fn is_passing(&self, spatem: &Spatem) -> bool {
        self.first_failing(spatem).is_none()
    }

    /// The first active criterion that rejects the spatem, if any.
    ///
    /// Evaluation stops at the first rejection, so when several criteria
    /// would fail only the earliest in evaluation order is reported.
    pub fn first_failing(&self, spatem: &Spatem) -> Option<CriterionKind> {
        for criterion in self.criteria() {
            let accepted = criterion.accepts(spatem);
            tracing::trace!(criterion = %criterion.kind(), accepted, "Evaluated criterion");
            if !accepted {
                return Some(criterion.kind());
            }
        }
        None
    }

    /// The configuration this filter was built from.
    pub fn configuration(&self) -> FilterConfiguration {
        FilterConfiguration {
            accepted_device_signatures: self
                .device_signatures
                .as_ref()
                .map(|criterion| criterion.accepted().to_vec()),
            accepted_device_ids: self
                .device_ids
                .as_ref()
                .map(|criterion| criterion.accepted().to_vec()),
            accepted_device_id_types: self
                .device_id_types
                .as_ref()
                .map(|criterion| criterion.accepted().to_vec()),
        }
    }

    fn criteria(&self) -> impl Iterator<Item = &dyn Criterion> {
        let device_signatures = self
            .device_signatures
            .as_ref()
            .map(|criterion| criterion as &dyn Criterion);
        let device_id_types = self
            .device_id_types
            .as_ref()
            .map(|criterion| criterion as &dyn Criterion);
        let device_ids = self
            .device_ids
            .as_ref()
            .map(|criterion| criterion as &dyn Criterion);

        [device_signatures, device_id_types, device_ids]
            .into_iter()
            .flatten()
    }
}

impl From<FilterConfiguration> for SpatemFilter {
    fn from(config: FilterConfiguration) -> Self {
        Self::new(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::IdValue;

    #[test]
    fn test_default_filter_accepts_everything() {
        let filter = SpatemFilter::default();

        assert!(filter.active_criteria().is_empty());
        assert!(filter.is_passing(&Spatem::new("X1", 2)));
        assert!(filter.is_passing(&Spatem::default()));
    }

    #[test]
    fn test_introspection_reflects_configuration() {
        let filter = SpatemFilter::new(FilterConfiguration::new().with_accepted_device_ids(["X1"]));

        assert!(filter.has_accepted_device_ids());
        assert!(!filter.has_accepted_device_signatures());
        assert!(!filter.has_accepted_device_id_types());
    }

    #[test]
    fn test_introspection_ignores_list_contents() {
        let filter = SpatemFilter::new(FilterConfiguration {
            accepted_device_signatures: Some(vec![]),
            accepted_device_ids: Some(vec![]),
            accepted_device_id_types: Some(vec![]),
        });

        assert!(filter.has_accepted_device_signatures());
        assert!(filter.has_accepted_device_ids());
        assert!(filter.has_accepted_device_id_types());
    }

    #[test]
    fn test_evaluation_order() {
        let filter = SpatemFilter::new(
            FilterConfiguration::new()
                .with_accepted_device_ids(["X1"])
                .with_accepted_device_id_types([2])
                .with_accepted_device_signatures(["X1/2"]),
        );

        assert_eq!(
            filter.active_criteria(),
            vec![
                CriterionKind::DeviceSignatures,
                CriterionKind::DeviceIdTypes,
                CriterionKind::DeviceIds,
            ]
        );

        // Fails all three; signatures is reported first
        assert_eq!(
            filter.first_failing(&Spatem::new("X9", 9)),
            Some(CriterionKind::DeviceSignatures)
        );
    }

    #[test]
    fn test_types_checked_before_ids() {
        let filter = SpatemFilter::new(
            FilterConfiguration::new()
                .with_accepted_device_ids(["X1"])
                .with_accepted_device_id_types([2]),
        );

        assert_eq!(
            filter.first_failing(&Spatem::new("X2", 3)),
            Some(CriterionKind::DeviceIdTypes)
        );
        assert_eq!(
            filter.first_failing(&Spatem::new("X2", 2)),
            Some(CriterionKind::DeviceIds)
        );
        assert_eq!(filter.first_failing(&Spatem::new("X1", 2)), None);
    }

    #[test]
    fn test_configuration_round_trip() {
        let config = FilterConfiguration::new()
            .with_accepted_device_signatures(["X1/2"])
            .with_accepted_device_id_types([IdValue::from(2), IdValue::from("3")]);
        let filter = SpatemFilter::from(config.clone());

        assert_eq!(filter.configuration(), config);
        assert_eq!(filter.device_id_types().map(|criterion| criterion.accepted().len()), Some(2));
        assert!(filter.device_ids().is_none());
    }
}
