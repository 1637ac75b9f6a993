//! Provider strategy hooks composed with the generic OAuth 2.0 client.
//!
//! A strategy owns a configured [`OAuth2Client`] and overrides only the provider-specific
//! pieces: how the profile is fetched and which extra parameters go on the authorization
//! redirect. Flows drive everything else.

// std
use std::ops::Deref;
// self
use crate::{
	_prelude::*,
	auth::GrantedTokens,
	http::HttpTransport,
	oauth::OAuth2Client,
	provider::AuthorizationOptions,
};

/// Boxed future returned by strategy hooks.
pub type StrategyFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T>> + 'a + Send>>;

/// Boxed future returned by [`Verify`] implementations.
pub type VerifyFuture<'a, U> =
	Pin<Box<dyn Future<Output = Result<Option<U>, BoxError>> + 'a + Send>>;

/// Capability interface implemented by provider strategies.
///
/// Override only what you need: `authorization_params` defaults to no extra parameters.
pub trait ProviderStrategy: Send + Sync {
	/// HTTP transport backing the strategy's OAuth client.
	type Transport: HttpTransport;
	/// Provider-specific profile fields.
	type Profile: Send;
	/// Application user produced by the verify callback.
	type User: Send;

	/// Fixed name used to register the strategy with a host.
	fn name(&self) -> &'static str;

	/// OAuth client configured with the application credentials.
	fn client(&self) -> &OAuth2Client<Self::Transport>;

	/// Default scope requested when the caller supplies none.
	fn scope(&self) -> Option<&str>;

	/// Default redirect target.
	fn callback_url(&self) -> Option<&str>;

	/// Fixed `state` value, when configured.
	fn state(&self) -> Option<&str> {
		None
	}

	/// Fetches and normalizes the profile of the subject owning `access_token`.
	fn user_profile<'a>(&'a self, access_token: &'a str) -> StrategyFuture<'a, Profile<Self::Profile>>;

	/// Extra provider parameters merged into the authorization redirect.
	fn authorization_params(&self, _options: &AuthorizationOptions) -> BTreeMap<String, String> {
		BTreeMap::new()
	}

	/// Hands the tokens and profile to the application's verify callback.
	fn verify<'a>(
		&'a self,
		tokens: &'a GrantedTokens,
		profile: Profile<Self::Profile>,
	) -> VerifyFuture<'a, Self::User>;
}

/// Application callback that maps an authenticated profile to a user.
///
/// Return `Ok(Some(user))` to accept, `Ok(None)` to reject, and `Err` for failures.
/// Synchronous closures `Fn(&GrantedTokens, Profile<P>) -> Result<Option<U>, BoxError>`
/// implement the trait automatically; implement it by hand for asynchronous lookups.
pub trait Verify<P>: Send + Sync {
	/// Application user type.
	type User: Send;

	/// Verifies the profile.
	fn verify<'a>(
		&'a self,
		tokens: &'a GrantedTokens,
		profile: Profile<P>,
	) -> VerifyFuture<'a, Self::User>;
}
impl<P, U, F> Verify<P> for F
where
	F: Send + Sync + Fn(&GrantedTokens, Profile<P>) -> Result<Option<U>, BoxError>,
	U: 'static + Send,
{
	type User = U;

	fn verify<'a>(
		&'a self,
		tokens: &'a GrantedTokens,
		profile: Profile<P>,
	) -> VerifyFuture<'a, Self::User> {
		Box::pin(std::future::ready(self(tokens, profile)))
	}
}

/// Normalized profile plus provenance.
///
/// `raw` is the exact response body and `json` its parsed form; the provider fields are
/// reachable through [`Deref`].
#[derive(Clone, Debug, PartialEq)]
pub struct Profile<T> {
	/// Name of the provider that produced the profile.
	pub provider: &'static str,
	/// Original response body.
	pub raw: String,
	/// Parsed response body.
	pub json: Value,
	/// Normalized provider fields.
	pub fields: T,
}
impl<T> Profile<T> {
	/// Wraps normalized fields with their provenance.
	pub fn new(provider: &'static str, raw: impl Into<String>, json: Value, fields: T) -> Self {
		Self { provider, raw: raw.into(), json, fields }
	}

	/// Consumes the profile, returning the normalized fields.
	pub fn into_fields(self) -> T {
		self.fields
	}
}
impl<T> Deref for Profile<T> {
	type Target = T;

	fn deref(&self) -> &Self::Target {
		&self.fields
	}
}
