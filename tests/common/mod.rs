#![allow(dead_code)]

// crates.io
use httpmock::MockServer;
// self
use esi_oauth2::{
	auth::GrantedTokens,
	error::BoxError,
	esi::{EsiProfile, EsiStrategy, ReqwestEsiStrategy},
	provider::{Profile, StrategyOptions},
};

pub const CLIENT_ID: &str = "ABC123";
pub const CLIENT_SECRET: &str = "secret";
pub const CALLBACK_URL: &str = "https://app.example.com/auth/eveonline/callback";
// base64("ABC123:secret")
pub const BASIC_AUTHORIZATION: &str = "Basic QUJDMTIzOnNlY3JldA==";
pub const VERIFY_FIXTURE: &str = include_str!("../fixtures/esi/esi-verify.json");

pub type VerifyOwner = fn(&GrantedTokens, Profile<EsiProfile>) -> Result<Option<String>, BoxError>;

/// Accepts every character and returns its owner hash.
pub fn verify_owner(
	_: &GrantedTokens,
	profile: Profile<EsiProfile>,
) -> Result<Option<String>, BoxError> {
	Ok(profile.character_owner_hash().map(ToOwned::to_owned))
}

/// Options pointing every endpoint at the mock server.
pub fn mock_options(server: &MockServer) -> StrategyOptions {
	StrategyOptions::new(CLIENT_ID, CLIENT_SECRET)
		.with_callback_url(CALLBACK_URL)
		.with_authorization_url(server.url("/v2/oauth/authorize/"))
		.with_token_url(server.url("/v2/oauth/token"))
		.with_user_profile_url(server.url("/verify/"))
}

pub fn build_strategy(options: StrategyOptions) -> ReqwestEsiStrategy<VerifyOwner> {
	EsiStrategy::new(options, verify_owner as VerifyOwner)
		.expect("Strategy should build from test options.")
}

pub fn build_mock_strategy(server: &MockServer) -> ReqwestEsiStrategy<VerifyOwner> {
	build_strategy(mock_options(server))
}
