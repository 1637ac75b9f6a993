#![cfg(feature = "reqwest")]

mod common;

// std
use std::collections::HashMap;
// crates.io
use httpmock::prelude::*;
// self
use common::*;
use esi_oauth2::{
	auth::GrantedTokens,
	error::{BoxError, Error, ErrorKind},
	esi::{EsiProfile, EsiStrategy},
	flows::{AuthOutcome, Authenticator, CallbackParams},
	provider::{AuthorizationOptions, Profile},
};

const TOKEN_BODY: &str = "{\"access_token\":\"access-success\",\"refresh_token\":\"refresh-success\",\"token_type\":\"bearer\",\"expires_in\":1199}";

#[tokio::test]
async fn start_authorization_builds_redirect_with_generated_state() {
	let server = MockServer::start_async().await;
	let authenticator = Authenticator::new(build_mock_strategy(&server));
	let session = authenticator.start_authorization(AuthorizationOptions::default());

	assert_eq!(session.state.len(), 24);
	assert!(session.state.chars().all(|c| c.is_ascii_alphanumeric()));
	assert_eq!(session.redirect_uri.as_deref(), Some(CALLBACK_URL));
	assert_eq!(session.scope.as_deref(), Some("publicData"));
	assert_eq!(session.authorize_url.path(), "/v2/oauth/authorize/");

	let pairs = session.authorize_url.query_pairs().into_owned().collect::<Vec<_>>();
	let keys = pairs.iter().map(|(key, _)| key.as_str()).collect::<Vec<_>>();

	assert_eq!(keys, ["response_type", "redirect_uri", "scope", "state", "client_id"]);

	let pairs = pairs.into_iter().collect::<HashMap<_, _>>();

	assert_eq!(pairs.get("response_type").map(String::as_str), Some("code"));
	assert_eq!(pairs.get("redirect_uri").map(String::as_str), Some(CALLBACK_URL));
	assert_eq!(pairs.get("scope").map(String::as_str), Some("publicData"));
	assert_eq!(pairs.get("state"), Some(&session.state));
	assert_eq!(pairs.get("client_id").map(String::as_str), Some(CLIENT_ID));
}

#[tokio::test]
async fn start_authorization_prefers_request_options() {
	let server = MockServer::start_async().await;
	let authenticator = Authenticator::new(build_strategy(mock_options(&server).with_state("fixed")));
	let session = authenticator.start_authorization(AuthorizationOptions::default());

	assert_eq!(session.state, "fixed");

	let session = authenticator.start_authorization(
		AuthorizationOptions::default()
			.with_state("per-request")
			.with_callback_url("https://other.example.com/cb")
			.with_scope("esi-wallet.read_character_wallet.v1"),
	);
	let pairs = session.authorize_url.query_pairs().into_owned().collect::<HashMap<_, _>>();

	assert_eq!(session.state, "per-request");
	assert_eq!(pairs.get("redirect_uri").map(String::as_str), Some("https://other.example.com/cb"));
	assert_eq!(
		pairs.get("scope").map(String::as_str),
		Some("esi-wallet.read_character_wallet.v1")
	);
}

#[tokio::test]
async fn complete_exchanges_code_fetches_profile_and_verifies() {
	let server = MockServer::start_async().await;
	let authenticator = Authenticator::new(build_mock_strategy(&server));
	let session = authenticator.start_authorization(AuthorizationOptions::default());
	let token_mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/v2/oauth/token")
				.header("authorization", BASIC_AUTHORIZATION)
				.header("content-type", "application/x-www-form-urlencoded");
			then.status(200).header("content-type", "application/json").body(TOKEN_BODY);
		})
		.await;
	let verify_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/verify/").header("authorization", "Bearer access-success");
			then.status(200).header("content-type", "application/json").body(VERIFY_FIXTURE);
		})
		.await;
	let outcome = authenticator
		.complete(&session, CallbackParams::code("valid-code", session.state.clone()))
		.await
		.expect("Callback should complete.");

	token_mock.assert_async().await;
	verify_mock.assert_async().await;

	let AuthOutcome::Authenticated { user, tokens } = outcome else {
		panic!("Unexpected outcome: {outcome:?}.");
	};

	assert_eq!(user, "lots_of_letters_and_numbers");
	assert_eq!(tokens.access_token.expose(), "access-success");
	assert_eq!(tokens.refresh_token.as_ref().map(|secret| secret.expose()), Some("refresh-success"));
	assert!(tokens.expires_at.is_some_and(|expires_at| expires_at > tokens.issued_at));
}

#[tokio::test]
async fn complete_rejects_state_mismatch_before_exchanging() {
	let server = MockServer::start_async().await;
	let authenticator = Authenticator::new(build_mock_strategy(&server));
	let session = authenticator.start_authorization(AuthorizationOptions::default());
	let token_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/v2/oauth/token");
			then.status(200).header("content-type", "application/json").body(TOKEN_BODY);
		})
		.await;
	let err = authenticator
		.complete(&session, CallbackParams::code("valid-code", "forged"))
		.await
		.expect_err("Forged state should fail.");

	assert_eq!(err.kind(), ErrorKind::State);
	assert_eq!(token_mock.hits_async().await, 0);

	let err = authenticator
		.complete(
			&session,
			CallbackParams { code: Some("valid-code".into()), ..Default::default() },
		)
		.await
		.expect_err("Missing state should fail.");

	assert!(matches!(err, Error::StateMismatch));
}

#[tokio::test]
async fn complete_maps_callback_errors() {
	let server = MockServer::start_async().await;
	let authenticator = Authenticator::new(build_mock_strategy(&server));
	let session = authenticator.start_authorization(AuthorizationOptions::default());
	let outcome = authenticator
		.complete(
			&session,
			CallbackParams::error("access_denied", Some("The user denied access.".into())),
		)
		.await
		.expect("Denied callbacks should not error.");

	assert_eq!(
		outcome,
		AuthOutcome::Rejected { message: Some("The user denied access.".into()) }
	);

	let outcome = authenticator
		.complete(&session, CallbackParams::default())
		.await
		.expect("Callbacks without a code should not error.");

	assert_eq!(outcome, AuthOutcome::Rejected { message: None });

	let err = authenticator
		.complete(&session, CallbackParams::error("invalid_scope", None))
		.await
		.expect_err("Provider errors should fail.");

	assert_eq!(err.kind(), ErrorKind::Provider);
	assert_eq!(err.to_string(), "invalid_scope");
	assert_eq!(err.code(), Some("invalid_scope"));
}

#[tokio::test]
async fn complete_surfaces_token_endpoint_errors() {
	let server = MockServer::start_async().await;
	let authenticator = Authenticator::new(build_mock_strategy(&server));
	let session = authenticator.start_authorization(AuthorizationOptions::default());

	server
		.mock_async(|when, then| {
			when.method(POST).path("/v2/oauth/token");
			then.status(400)
				.header("content-type", "application/json")
				.body("{\"error\":\"invalid_grant\",\"error_description\":\"Authorization code expired\"}");
		})
		.await;

	let err = authenticator
		.complete(&session, CallbackParams::code("stale-code", session.state.clone()))
		.await
		.expect_err("Token endpoint errors should fail.");

	assert_eq!(err.kind(), ErrorKind::Provider);
	assert_eq!(err.code(), Some("invalid_grant"));
	assert_eq!(err.to_string(), "Authorization code expired");
}

#[tokio::test]
async fn verify_callback_decides_the_outcome() {
	let server = MockServer::start_async().await;

	server
		.mock_async(|when, then| {
			when.method(POST).path("/v2/oauth/token");
			then.status(200).header("content-type", "application/json").body(TOKEN_BODY);
		})
		.await;
	server
		.mock_async(|when, then| {
			when.method(GET).path("/verify/");
			then.status(200).header("content-type", "application/json").body(VERIFY_FIXTURE);
		})
		.await;

	let rejecting = Authenticator::new(
		EsiStrategy::new(
			mock_options(&server),
			|_: &GrantedTokens, _: Profile<EsiProfile>| -> Result<Option<String>, BoxError> {
				Ok(None)
			},
		)
		.expect("Strategy should build."),
	);
	let session = rejecting.start_authorization(AuthorizationOptions::default());
	let outcome = rejecting
		.complete(&session, CallbackParams::code("valid-code", session.state.clone()))
		.await
		.expect("Rejected verification should not error.");

	assert_eq!(outcome, AuthOutcome::Rejected { message: None });

	let failing = Authenticator::new(
		EsiStrategy::new(
			mock_options(&server),
			|_: &GrantedTokens, _: Profile<EsiProfile>| -> Result<Option<String>, BoxError> {
				Err("database unavailable".into())
			},
		)
		.expect("Strategy should build."),
	);
	let session = failing.start_authorization(AuthorizationOptions::default());
	let err = failing
		.complete(&session, CallbackParams::code("valid-code", session.state.clone()))
		.await
		.expect_err("Verify failures should propagate.");

	assert_eq!(err.kind(), ErrorKind::Verify);
	assert_eq!(
		std::error::Error::source(&err).map(ToString::to_string),
		Some("database unavailable".into())
	);
}
