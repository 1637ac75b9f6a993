//! Tokens granted by the provider's token endpoint.

// crates.io
use oauth2::TokenResponse;
// self
use crate::{_prelude::*, auth::TokenSecret};

/// Tokens issued by a successful authorization-code exchange.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrantedTokens {
	/// Access token secret; callers must avoid logging it.
	pub access_token: TokenSecret,
	/// Refresh token secret, if the provider issued one.
	pub refresh_token: Option<TokenSecret>,
	/// Token type reported by the provider (usually `Bearer`).
	pub token_type: String,
	/// Instant the response was received.
	pub issued_at: OffsetDateTime,
	/// Expiry instant derived from `expires_in`, when the provider supplied one.
	pub expires_at: Option<OffsetDateTime>,
	/// Scopes echoed by the token endpoint, if any.
	pub scopes: Vec<String>,
}
impl GrantedTokens {
	/// Creates a record for an access token issued now.
	pub fn new(access_token: impl Into<String>) -> Self {
		Self {
			access_token: TokenSecret::new(access_token),
			refresh_token: None,
			token_type: "Bearer".into(),
			issued_at: OffsetDateTime::now_utc(),
			expires_at: None,
			scopes: Vec::new(),
		}
	}

	/// Converts an `oauth2` token response received now.
	pub fn from_response<R>(response: &R) -> Self
	where
		R: TokenResponse,
		R::TokenType: AsRef<str>,
	{
		let issued_at = OffsetDateTime::now_utc();
		let expires_at = response
			.expires_in()
			.and_then(|lifetime| Duration::try_from(lifetime).ok())
			.and_then(|lifetime| issued_at.checked_add(lifetime));

		Self {
			access_token: TokenSecret::new(response.access_token().secret().to_owned()),
			refresh_token: response
				.refresh_token()
				.map(|token| TokenSecret::new(token.secret().to_owned())),
			token_type: response.token_type().as_ref().to_owned(),
			issued_at,
			expires_at,
			scopes: response
				.scopes()
				.map(|scopes| scopes.iter().map(|scope| scope.to_string()).collect())
				.unwrap_or_default(),
		}
	}

	/// Returns `true` once the access token is past its expiry at `instant`.
	///
	/// Tokens without an expiry never report as expired.
	pub fn is_expired_at(&self, instant: OffsetDateTime) -> bool {
		self.expires_at.is_some_and(|expires_at| instant >= expires_at)
	}
}
