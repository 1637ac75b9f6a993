// crates.io
use rand::{Rng, distr::Alphanumeric};
// self
use crate::_prelude::*;

pub(super) const STATE_LEN: usize = 24;

/// Authorization redirect metadata returned by
/// [`Authenticator::start_authorization`](crate::flows::Authenticator::start_authorization).
///
/// Keep it (e.g., in the host's session store) until the provider calls back.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthorizationSession {
	/// Opaque state value that must round-trip via the redirect handler.
	pub state: String,
	/// Redirect target sent with the authorization request, reused for the code exchange.
	pub redirect_uri: Option<String>,
	/// Scope requested on the authorization redirect.
	pub scope: Option<String>,
	/// Fully-formed authorize URL that callers should send end-users to.
	pub authorize_url: Url,
}
impl AuthorizationSession {
	/// Validates the `state` returned on the callback.
	///
	/// A missing value is a mismatch.
	pub fn validate_state(&self, returned_state: Option<&str>) -> Result<()> {
		match returned_state {
			Some(returned) if returned == self.state => Ok(()),
			_ => Err(Error::StateMismatch),
		}
	}
}

pub(super) fn random_string(len: usize) -> String {
	rand::rng().sample_iter(Alphanumeric).take(len).map(char::from).collect()
}
