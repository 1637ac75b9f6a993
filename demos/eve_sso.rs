//! Signs a character in through EVE Online SSO.
//!
//! Set `EVE_CLIENT_ID`, `EVE_CLIENT_SECRET`, and `EVE_CALLBACK_URL` to your application's
//! values. The demo prints the authorization redirect; paste the `code` from the callback
//! into `EVE_CODE` and run it again with the printed `EVE_STATE` to finish the sign-in.

// std
use std::env;
// crates.io
use color_eyre::{Result, eyre::eyre};
// self
use esi_oauth2::{
	auth::GrantedTokens,
	error::BoxError,
	esi::{EsiProfile, EsiStrategy},
	flows::{AuthOutcome, Authenticator, CallbackParams},
	provider::{AuthorizationOptions, Profile, StrategyOptions},
};

#[derive(Debug)]
struct Character {
	id: String,
	name: String,
}

fn verify(_: &GrantedTokens, profile: Profile<EsiProfile>) -> Result<Option<Character>, BoxError> {
	let Some(id) = profile.character_id() else {
		return Ok(None);
	};

	Ok(Some(Character {
		id: id.to_string(),
		name: profile.character_name().unwrap_or_default().to_owned(),
	}))
}

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let options = StrategyOptions::new(env::var("EVE_CLIENT_ID")?, env::var("EVE_CLIENT_SECRET")?)
		.with_callback_url(env::var("EVE_CALLBACK_URL")?)
		.with_scope("publicData esi-location.read_location.v1");
	let authenticator = Authenticator::new(EsiStrategy::new(
		options,
		verify as fn(&GrantedTokens, Profile<EsiProfile>) -> Result<Option<Character>, BoxError>,
	)?);
	let mut authorization = AuthorizationOptions::default();

	if let Ok(state) = env::var("EVE_STATE") {
		authorization = authorization.with_state(state);
	}

	let session = authenticator.start_authorization(authorization);

	let Ok(code) = env::var("EVE_CODE") else {
		println!("Send your user to {}.", session.authorize_url);
		println!("Then rerun with EVE_STATE={} and EVE_CODE=<code>.", session.state);

		return Ok(());
	};

	match authenticator
		.complete(&session, CallbackParams::code(code, session.state.clone()))
		.await?
	{
		AuthOutcome::Authenticated { user, tokens } => {
			println!("Signed in as {} ({}).", user.name, user.id);
			println!("Access token expires at {:?}.", tokens.expires_at);
		},
		AuthOutcome::Rejected { message } =>
			return Err(eyre!("Sign-in rejected: {}.", message.unwrap_or_default())),
	}

	Ok(())
}
