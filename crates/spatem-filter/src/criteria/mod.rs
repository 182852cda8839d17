//! Criterion implementations.
//!
//! Each criterion owns its accepted list and tests one membership rule.

pub mod device_id_types;
pub mod device_ids;
pub mod signatures;

// Re-export for convenience
pub use device_id_types::DeviceIdTypeCriterion;
pub use device_ids::DeviceIdCriterion;
pub use signatures::DeviceSignatureCriterion;
