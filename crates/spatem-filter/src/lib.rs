//! Acceptance filtering for spatem records.
//!
//! This crate provides:
//! - Spatem and IdValue, the record model the filter reads
//! - FilterConfiguration, the typed configuration plus its JSON boundary
//! - Criterion trait and the three criterion implementations
//! - SpatemFilter, which combines active criteria into a pass/fail decision
//!
//! ## Architecture
//! Configuration is validated once at construction. After that the filter
//! is immutable and every decision is a pure function of the filter and
//! the borrowed record:
//! 1. Signatures (`deviceId/deviceIdType`) must be listed, if configured
//! 2. The device identifier type must be listed, if configured
//! 3. The device identifier must be listed, if configured
//!
//! ## Example Usage
//! ```ignore
//! use spatem_filter::{FilterConfiguration, Spatem, SpatemFilter};
//!
//! let config = FilterConfiguration::from_json_str(
//!     r#"{ "acceptedDeviceIds": ["X1"], "acceptedDeviceIdTypes": [2] }"#,
//! )?;
//! let filter = SpatemFilter::new(config);
//!
//! assert!(filter.is_passing(&Spatem::new("X1", 2)));
//! assert!(!filter.is_passing(&Spatem::new("X1", 3)));
//! ```

pub mod config;
pub mod criteria;
pub mod error;
pub mod filter;
pub mod traits;
pub mod types;

// Re-export main types
pub use config::FilterConfiguration;
pub use error::{ConfigError, Result};
pub use filter::SpatemFilter;
pub use traits::{Criterion, CriterionKind};
pub use types::{IdValue, Spatem};
