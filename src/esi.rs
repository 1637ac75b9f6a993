//! EVE Online SSO strategy backed by the ESI verification endpoint.
//!
//! [`EsiStrategy`] supplies the SSO v2 endpoints and default scope, fetches the character
//! behind an access token with a single `GET`, and maps the provider's error bodies into
//! [`Error::Provider`].

pub mod profile;

mod error;

pub use profile::*;

// self
use crate::{
	_prelude::*,
	auth::GrantedTokens,
	http::HttpTransport,
	oauth::{AccessTokenPlacement, OAuth2Client},
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
	provider::{
		AuthorizationOptions, Profile, ProviderStrategy, StrategyFuture, StrategyOptions, Verify,
		VerifyFuture,
	},
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

/// Name hosts register the strategy under.
pub const STRATEGY_NAME: &str = "eveOnline";
/// Provenance recorded on every profile.
pub const PROVIDER: &str = "eveonline";
/// SSO v2 authorization endpoint.
pub const AUTHORIZATION_URL: &str = "https://login.eveonline.com/v2/oauth/authorize/";
/// SSO v2 token endpoint.
pub const TOKEN_URL: &str = "https://login.eveonline.com/v2/oauth/token";
/// ESI token verification endpoint.
pub const USER_PROFILE_URL: &str = "https://esi.evetech.net/verify/";
/// Scope requested when none is configured.
pub const DEFAULT_SCOPE: &str = "publicData";

#[cfg(feature = "reqwest")]
/// ESI strategy specialized for the crate's default reqwest transport.
pub type ReqwestEsiStrategy<V> = EsiStrategy<ReqwestHttpClient, V>;

/// EVE Online SSO strategy.
pub struct EsiStrategy<C, V>
where
	C: HttpTransport,
{
	oauth2: OAuth2Client<C>,
	user_profile_url: Url,
	scope: String,
	callback_url: Option<String>,
	state: Option<String>,
	verify: V,
}
impl<C, V> EsiStrategy<C, V>
where
	C: HttpTransport,
{
	/// Same as [`STRATEGY_NAME`].
	pub const NAME: &'static str = STRATEGY_NAME;

	/// Builds the strategy on top of a caller-provided transport.
	///
	/// Fails when the credentials are missing or empty, or when an endpoint override is not
	/// a valid URL. Nothing is sent over the network.
	pub fn with_transport(
		options: StrategyOptions,
		verify: V,
		transport: impl Into<Arc<C>>,
	) -> Result<Self> {
		let (client_id, client_secret) = options.credentials()?;
		let authorization_url = StrategyOptions::resolve_url(
			"authorizationURL",
			options.authorization_url.as_deref(),
			AUTHORIZATION_URL,
		)?;
		let token_url =
			StrategyOptions::resolve_url("tokenURL", options.token_url.as_deref(), TOKEN_URL)?;
		let user_profile_url = StrategyOptions::resolve_url(
			"userProfileURL",
			options.user_profile_url.as_deref(),
			USER_PROFILE_URL,
		)?;
		let oauth2 =
			OAuth2Client::new(client_id, client_secret, authorization_url, token_url, transport)
				.with_access_token_placement(AccessTokenPlacement::Header);
		let StrategyOptions { scope, callback_url, state, .. } = options;

		Ok(Self {
			oauth2,
			user_profile_url,
			scope: scope
				.filter(|scope| !scope.is_empty())
				.unwrap_or_else(|| DEFAULT_SCOPE.into()),
			callback_url,
			state,
			verify,
		})
	}

	/// Verification endpoint queried by [`ProviderStrategy::user_profile`].
	pub fn user_profile_url(&self) -> &Url {
		&self.user_profile_url
	}

	async fn fetch_profile(&self, access_token: &str) -> Result<Profile<EsiProfile>> {
		let body = self
			.oauth2
			.get(&self.user_profile_url, access_token)
			.await
			.map_err(error::map_profile_failure)?;
		let json = serde_json::from_str::<Value>(&body)
			.map_err(|source| Error::ProfileParse { source })?;
		let fields = EsiProfile::from_json(&json);

		Ok(Profile::new(PROVIDER, body, json, fields))
	}
}
#[cfg(feature = "reqwest")]
impl<V> EsiStrategy<ReqwestHttpClient, V> {
	/// Builds the strategy with the default reqwest transport.
	pub fn new(options: StrategyOptions, verify: V) -> Result<Self> {
		Self::with_transport(options, verify, ReqwestHttpClient::default())
	}
}
impl<C, V> ProviderStrategy for EsiStrategy<C, V>
where
	C: HttpTransport,
	V: Verify<EsiProfile>,
{
	type Profile = EsiProfile;
	type Transport = C;
	type User = V::User;

	fn name(&self) -> &'static str {
		STRATEGY_NAME
	}

	fn client(&self) -> &OAuth2Client<C> {
		&self.oauth2
	}

	fn scope(&self) -> Option<&str> {
		Some(&self.scope)
	}

	fn callback_url(&self) -> Option<&str> {
		self.callback_url.as_deref()
	}

	fn state(&self) -> Option<&str> {
		self.state.as_deref()
	}

	fn user_profile<'a>(&'a self, access_token: &'a str) -> StrategyFuture<'a, Profile<EsiProfile>> {
		Box::pin(async move {
			const KIND: FlowKind = FlowKind::UserProfile;

			let span = FlowSpan::new(KIND, "user_profile");

			obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

			let result = span.instrument(self.fetch_profile(access_token)).await;

			obs::record_result(&span, KIND, &result);

			result
		})
	}

	fn authorization_params(&self, options: &AuthorizationOptions) -> BTreeMap<String, String> {
		let mut params = BTreeMap::new();

		if let Some(state) = &options.state {
			params.insert("state".into(), state.clone());
		}
		if let Some(callback_url) = &options.callback_url {
			params.insert("redirect_uri".into(), callback_url.clone());
		}

		params
	}

	fn verify<'a>(
		&'a self,
		tokens: &'a GrantedTokens,
		profile: Profile<EsiProfile>,
	) -> VerifyFuture<'a, Self::User> {
		self.verify.verify(tokens, profile)
	}
}
impl<C, V> Debug for EsiStrategy<C, V>
where
	C: HttpTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("EsiStrategy")
			.field("oauth2", &self.oauth2)
			.field("user_profile_url", &self.user_profile_url.as_str())
			.field("scope", &self.scope)
			.field("callback_url", &self.callback_url)
			.field("state_set", &self.state.is_some())
			.finish()
	}
}

#[cfg(all(test, feature = "reqwest"))]
mod tests {
	// self
	use super::*;

	type Reject = fn(&GrantedTokens, Profile<EsiProfile>) -> Result<Option<()>, BoxError>;

	fn reject(_: &GrantedTokens, _: Profile<EsiProfile>) -> Result<Option<()>, BoxError> {
		Ok(None)
	}

	fn strategy(options: StrategyOptions) -> Result<ReqwestEsiStrategy<Reject>> {
		EsiStrategy::new(options, reject as Reject)
	}

	#[test]
	fn defaults_cover_endpoints_scope_and_header_placement() {
		let strategy = strategy(StrategyOptions::new("ABC123", "secret"))
			.expect("Strategy should build with credentials.");

		assert_eq!(strategy.name(), "eveOnline");
		assert_eq!(strategy.scope(), Some("publicData"));
		assert_eq!(strategy.callback_url(), None);
		assert_eq!(strategy.client().authorization_url().as_str(), AUTHORIZATION_URL);
		assert_eq!(strategy.client().token_url().as_str(), TOKEN_URL);
		assert_eq!(strategy.user_profile_url().as_str(), USER_PROFILE_URL);
		assert_eq!(strategy.client().access_token_placement(), AccessTokenPlacement::Header);
	}

	#[test]
	fn invalid_overrides_fail_construction() {
		let err = strategy(StrategyOptions::new("ABC123", "secret").with_user_profile_url("::"))
			.expect_err("Invalid profile URL should fail.");

		assert!(matches!(
			err,
			Error::Config(crate::error::ConfigError::InvalidUrl { option: "userProfileURL", .. })
		));
	}

	#[test]
	fn debug_hides_credentials_and_state() {
		let strategy = strategy(StrategyOptions::new("ABC123", "hunter2").with_state("fixed-state"))
			.expect("Strategy should build with credentials.");
		let rendered = format!("{strategy:?}");

		assert!(rendered.contains("ABC123"));
		assert!(!rendered.contains("hunter2"));
		assert!(!rendered.contains("fixed-state"));
	}
}
