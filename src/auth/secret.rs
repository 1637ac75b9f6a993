//! Access and refresh token values that never print themselves.

// self
use crate::_prelude::*;

const REDACTED: &str = "<redacted>";

/// Bearer credential issued by the SSO token endpoint.
///
/// `Debug` and `Display` only print a placeholder, so [`GrantedTokens`](crate::auth::GrantedTokens)
/// and [`AuthOutcome`](crate::flows::AuthOutcome) can be logged as a whole. Serde keeps the
/// plain value so hosts can persist tokens.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenSecret(String);
impl TokenSecret {
	/// Wraps a token string.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Plain token, e.g. for an `Authorization: Bearer` header.
	pub fn expose(&self) -> &str {
		&self.0
	}

	/// Consumes the wrapper, returning the plain token.
	pub fn into_inner(self) -> String {
		self.0
	}
}
impl From<String> for TokenSecret {
	fn from(value: String) -> Self {
		Self(value)
	}
}
impl Debug for TokenSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "TokenSecret({REDACTED})")
	}
}
impl Display for TokenSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(REDACTED)
	}
}
