//! Provider-facing options (data) and strategies (behavior).
//!
//! `options` holds the serde-loadable [`StrategyOptions`] plus the per-request
//! [`AuthorizationOptions`]. `strategy` defines [`ProviderStrategy`], the capability
//! interface flows use to fetch profiles and decorate authorization redirects, together
//! with the [`Verify`] callback contract and the normalized [`Profile`] wrapper.

pub mod options;
pub mod strategy;

pub use options::*;
pub use strategy::*;
