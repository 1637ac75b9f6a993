//! Host-side driver for the authorization-code flow.
//!
//! [`Authenticator`] wraps a [`ProviderStrategy`] and covers both legs of the redirect
//! dance: [`Authenticator::start_authorization`] builds the provider redirect, and
//! [`Authenticator::complete`] validates the callback, exchanges the code, fetches the
//! profile, and hands both to the strategy's verify callback.

mod authorize;
mod callback;
mod session;

pub use callback::*;
pub use session::*;

// self
use crate::{_prelude::*, provider::ProviderStrategy};

/// Drives authorization-code flows against a single strategy.
pub struct Authenticator<S>
where
	S: ProviderStrategy,
{
	strategy: Arc<S>,
}
impl<S> Authenticator<S>
where
	S: ProviderStrategy,
{
	/// Wraps an owned strategy.
	pub fn new(strategy: S) -> Self {
		Self::with_shared(Arc::new(strategy))
	}

	/// Wraps a strategy shared with other parts of the host.
	pub fn with_shared(strategy: Arc<S>) -> Self {
		Self { strategy }
	}

	/// Strategy backing this authenticator.
	pub fn strategy(&self) -> &S {
		&self.strategy
	}
}
impl<S> Clone for Authenticator<S>
where
	S: ProviderStrategy,
{
	fn clone(&self) -> Self {
		Self { strategy: self.strategy.clone() }
	}
}
impl<S> Debug for Authenticator<S>
where
	S: ProviderStrategy,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Authenticator").field("strategy", &self.strategy.name()).finish()
	}
}
