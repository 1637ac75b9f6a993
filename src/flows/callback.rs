// self
use crate::{
	_prelude::*,
	auth::GrantedTokens,
	flows::{Authenticator, AuthorizationSession},
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
	provider::ProviderStrategy,
};

const ACCESS_DENIED: &str = "access_denied";

/// Query parameters the provider appends to the redirect target.
///
/// Deserializes straight from the callback query string.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CallbackParams {
	/// Authorization code.
	pub code: Option<String>,
	/// Echoed `state` value.
	pub state: Option<String>,
	/// OAuth error code, when the user or provider aborted the request.
	pub error: Option<String>,
	/// Human-readable companion of `error`.
	pub error_description: Option<String>,
}
impl CallbackParams {
	/// Callback carrying an authorization code and its state.
	pub fn code(code: impl Into<String>, state: impl Into<String>) -> Self {
		Self { code: Some(code.into()), state: Some(state.into()), ..Default::default() }
	}

	/// Callback carrying an OAuth error.
	pub fn error(error: impl Into<String>, description: Option<String>) -> Self {
		Self { error: Some(error.into()), error_description: description, ..Default::default() }
	}
}

/// Terminal result of a completed callback.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthOutcome<U> {
	/// Verify callback accepted the profile.
	Authenticated {
		/// Application user returned by the verify callback.
		user: U,
		/// Tokens granted by the code exchange.
		tokens: GrantedTokens,
	},
	/// Sign-in declined by the user, the provider, or the verify callback.
	Rejected {
		/// Reason supplied by the provider, if any.
		message: Option<String>,
	},
}
impl<U> AuthOutcome<U> {
	/// Returns the user when authentication succeeded.
	pub fn user(&self) -> Option<&U> {
		match self {
			Self::Authenticated { user, .. } => Some(user),
			Self::Rejected { .. } => None,
		}
	}
}

impl<S> Authenticator<S>
where
	S: ProviderStrategy,
{
	/// Completes a sign-in from the provider callback.
	///
	/// `access_denied` and callbacks without a code end in [`AuthOutcome::Rejected`]; any
	/// other callback error becomes [`Error::Provider`]. The returned state must match the
	/// session before the code is exchanged with the session's `redirect_uri`.
	pub async fn complete(
		&self,
		session: &AuthorizationSession,
		params: CallbackParams,
	) -> Result<AuthOutcome<S::User>> {
		let CallbackParams { code, state, error, error_description } = params;

		if let Some(error) = error {
			if error == ACCESS_DENIED {
				return Ok(AuthOutcome::Rejected { message: error_description });
			}

			return Err(Error::provider(error_description.unwrap_or_else(|| error.clone()), error));
		}

		let Some(code) = code else {
			return Ok(AuthOutcome::Rejected { message: None });
		};

		session.validate_state(state.as_deref())?;

		let tokens = self.exchange_code(&code, session.redirect_uri.as_deref()).await?;
		let strategy = self.strategy();
		let profile = strategy.user_profile(tokens.access_token.expose()).await?;
		let user = strategy
			.verify(&tokens, profile)
			.await
			.map_err(|source| Error::Verify { source })?;

		Ok(match user {
			Some(user) => AuthOutcome::Authenticated { user, tokens },
			None => AuthOutcome::Rejected { message: None },
		})
	}

	async fn exchange_code(&self, code: &str, redirect_uri: Option<&str>) -> Result<GrantedTokens> {
		const KIND: FlowKind = FlowKind::ExchangeCode;

		let span = FlowSpan::new(KIND, "complete");

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		let result =
			span.instrument(self.strategy().client().exchange_code(code, redirect_uri)).await;

		obs::record_result(&span, KIND, &result);

		result
	}
}
