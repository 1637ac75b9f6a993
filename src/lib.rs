//! EVE Online SSO strategy for OAuth 2.0 clients: provider defaults, ESI character verification,
//! and typed provider errors on top of the `oauth2` crate.
//!
//! ```no_run
//! use esi_oauth2::{
//! 	auth::GrantedTokens,
//! 	error::BoxError,
//! 	esi::{EsiProfile, EsiStrategy},
//! 	provider::{Profile, StrategyOptions},
//! };
//!
//! let options = StrategyOptions::new("client-id", "client-secret")
//! 	.with_callback_url("https://app.example.com/auth/callback");
//! let strategy = EsiStrategy::new(options, |_: &GrantedTokens, profile: Profile<EsiProfile>| {
//! 	Ok::<_, BoxError>(profile.character_owner_hash().map(ToOwned::to_owned))
//! })?;
//! # let _ = strategy;
//! # Ok::<_, esi_oauth2::error::Error>(())
//! ```

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod error;
pub mod esi;
pub mod flows;
pub mod http;
pub mod oauth;
pub mod obs;
pub mod provider;

mod _prelude {
	pub use std::{
		collections::BTreeMap,
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		sync::Arc,
	};

	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use serde_json::Value;
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{BoxError, Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _};
