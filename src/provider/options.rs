//! Strategy configuration and per-request authorization options.

// self
use crate::{_prelude::*, error::ConfigError};

/// Application settings accepted by provider strategies.
///
/// Keys follow the spelling used by hosted SSO configuration files (`clientID`,
/// `callbackURL`, ...); snake-case aliases are accepted as well. Every field is optional
/// at this level so configuration loaders can deserialize partial documents. Strategies
/// validate the credentials when they are constructed.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategyOptions {
	/// Application client identifier (required).
	#[serde(rename = "clientID", alias = "client_id", skip_serializing_if = "Option::is_none")]
	pub client_id: Option<String>,
	/// Application client secret (required).
	#[serde(
		rename = "clientSecret",
		alias = "client_secret",
		skip_serializing_if = "Option::is_none"
	)]
	pub client_secret: Option<String>,
	/// Redirect target registered with the provider.
	#[serde(
		rename = "callbackURL",
		alias = "callback_url",
		skip_serializing_if = "Option::is_none"
	)]
	pub callback_url: Option<String>,
	/// Requested scopes, space-delimited.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub scope: Option<String>,
	/// Fixed `state` value echoed back by the provider; a random one is generated when unset.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub state: Option<String>,
	/// Authorization endpoint override.
	#[serde(
		rename = "authorizationURL",
		alias = "authorization_url",
		skip_serializing_if = "Option::is_none"
	)]
	pub authorization_url: Option<String>,
	/// Token endpoint override.
	#[serde(rename = "tokenURL", alias = "token_url", skip_serializing_if = "Option::is_none")]
	pub token_url: Option<String>,
	/// Profile (verification) endpoint override.
	#[serde(
		rename = "userProfileURL",
		alias = "user_profile_url",
		skip_serializing_if = "Option::is_none"
	)]
	pub user_profile_url: Option<String>,
}
impl StrategyOptions {
	/// Creates options carrying the application credentials.
	pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
		Self {
			client_id: Some(client_id.into()),
			client_secret: Some(client_secret.into()),
			..Default::default()
		}
	}

	/// Sets the redirect target.
	pub fn with_callback_url(mut self, url: impl Into<String>) -> Self {
		self.callback_url = Some(url.into());

		self
	}

	/// Sets the requested scopes.
	pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
		self.scope = Some(scope.into());

		self
	}

	/// Sets a fixed `state` value.
	pub fn with_state(mut self, state: impl Into<String>) -> Self {
		self.state = Some(state.into());

		self
	}

	/// Overrides the authorization endpoint.
	pub fn with_authorization_url(mut self, url: impl Into<String>) -> Self {
		self.authorization_url = Some(url.into());

		self
	}

	/// Overrides the token endpoint.
	pub fn with_token_url(mut self, url: impl Into<String>) -> Self {
		self.token_url = Some(url.into());

		self
	}

	/// Overrides the profile endpoint.
	pub fn with_user_profile_url(mut self, url: impl Into<String>) -> Self {
		self.user_profile_url = Some(url.into());

		self
	}

	/// Returns the client identifier and secret, rejecting missing or empty values.
	pub fn credentials(&self) -> Result<(&str, &str), ConfigError> {
		let client_id = non_empty(self.client_id.as_deref()).ok_or(ConfigError::MissingClientId)?;
		let client_secret =
			non_empty(self.client_secret.as_deref()).ok_or(ConfigError::MissingClientSecret)?;

		Ok((client_id, client_secret))
	}

	/// Parses `value`, falling back to `default` when the option is unset.
	pub(crate) fn resolve_url(
		option: &'static str,
		value: Option<&str>,
		default: &str,
	) -> Result<Url, ConfigError> {
		let raw = non_empty(value).unwrap_or(default);

		Url::parse(raw).map_err(|source| ConfigError::InvalidUrl { option, source })
	}
}
impl Debug for StrategyOptions {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("StrategyOptions")
			.field("client_id", &self.client_id)
			.field("client_secret_set", &self.client_secret.is_some())
			.field("callback_url", &self.callback_url)
			.field("scope", &self.scope)
			.field("state", &self.state)
			.field("authorization_url", &self.authorization_url)
			.field("token_url", &self.token_url)
			.field("user_profile_url", &self.user_profile_url)
			.finish()
	}
}

/// Per-request options used to build an authorization redirect.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthorizationOptions {
	/// Opaque value the provider echoes back on the callback.
	pub state: Option<String>,
	/// Redirect target for this request.
	pub callback_url: Option<String>,
	/// Scope override for this request.
	pub scope: Option<String>,
}
impl AuthorizationOptions {
	/// Sets the `state` value.
	pub fn with_state(mut self, state: impl Into<String>) -> Self {
		self.state = Some(state.into());

		self
	}

	/// Sets the redirect target.
	pub fn with_callback_url(mut self, url: impl Into<String>) -> Self {
		self.callback_url = Some(url.into());

		self
	}

	/// Sets the scope override.
	pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
		self.scope = Some(scope.into());

		self
	}
}

fn non_empty(value: Option<&str>) -> Option<&str> {
	value.filter(|value| !value.is_empty())
}
