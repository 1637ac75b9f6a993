// self
use crate::{
	flows::{
		Authenticator,
		session::{self, AuthorizationSession},
	},
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
	provider::{AuthorizationOptions, ProviderStrategy},
};

impl<S> Authenticator<S>
where
	S: ProviderStrategy,
{
	/// Builds the provider redirect for a new sign-in.
	///
	/// Unset options fall back to the strategy's callback URL, scope, and fixed state. When
	/// no state is configured anywhere a random alphanumeric one is generated, since the
	/// provider rejects requests without it.
	pub fn start_authorization(&self, options: AuthorizationOptions) -> AuthorizationSession {
		const KIND: FlowKind = FlowKind::Authorize;

		let _guard = FlowSpan::new(KIND, "start_authorization").entered();

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		let strategy = self.strategy();
		let AuthorizationOptions { state, callback_url, scope } = options;
		let state = state
			.or_else(|| strategy.state().map(ToOwned::to_owned))
			.unwrap_or_else(|| session::random_string(session::STATE_LEN));
		let options = AuthorizationOptions {
			state: Some(state.clone()),
			callback_url: callback_url.or_else(|| strategy.callback_url().map(ToOwned::to_owned)),
			scope: scope.or_else(|| strategy.scope().map(ToOwned::to_owned)),
		};
		let mut params = strategy.authorization_params(&options);

		if let Some(scope) = &options.scope {
			params.insert("scope".into(), scope.clone());
		}

		let authorize_url = strategy.client().authorize_url(&params);

		obs::record_flow_outcome(KIND, FlowOutcome::Success);

		AuthorizationSession {
			state,
			redirect_uri: options.callback_url,
			scope: options.scope,
			authorize_url,
		}
	}
}
