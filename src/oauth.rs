//! Generic OAuth 2.0 client that provider strategies compose with.
//!
//! [`OAuth2Client`] owns the application credentials and endpoint URLs, assembles
//! authorization redirects, exchanges authorization codes through [`oauth2::basic::BasicClient`],
//! and performs authenticated `GET` requests for provider profile endpoints.

pub use oauth2;

// std
use std::borrow::Cow;
// crates.io
use oauth2::{
	AsyncHttpClient, AuthUrl, AuthorizationCode, ClientId, ClientSecret, EndpointNotSet,
	EndpointSet, HttpClientError, RedirectUrl, RequestTokenError, TokenUrl,
	basic::{BasicClient, BasicErrorResponse, BasicRequestTokenError},
	http::{
		Method, Request,
		header::{ACCEPT, AUTHORIZATION},
	},
};
// self
use crate::{
	_prelude::*,
	auth::GrantedTokens,
	error::{ConfigError, TransportError},
	http::HttpTransport,
};

type ConfiguredBasicClient =
	BasicClient<EndpointSet, EndpointNotSet, EndpointNotSet, EndpointNotSet, EndpointSet>;

const TOKEN_FAILURE: &str = "Failed to obtain access token";

/// Where [`OAuth2Client::get`] places the bearer token.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AccessTokenPlacement {
	/// `access_token` query parameter.
	#[default]
	Query,
	/// `Authorization: Bearer` request header.
	Header,
}

/// OAuth 2.0 client configured with application credentials and provider endpoints.
pub struct OAuth2Client<C>
where
	C: HttpTransport,
{
	inner: ConfiguredBasicClient,
	client_id: String,
	authorization_url: Url,
	token_url: Url,
	placement: AccessTokenPlacement,
	transport: Arc<C>,
}
impl<C> OAuth2Client<C>
where
	C: HttpTransport,
{
	/// Creates a client that authenticates to the token endpoint with HTTP Basic credentials.
	pub fn new(
		client_id: impl Into<String>,
		client_secret: impl Into<String>,
		authorization_url: Url,
		token_url: Url,
		transport: impl Into<Arc<C>>,
	) -> Self {
		let client_id = client_id.into();
		let inner = BasicClient::new(ClientId::new(client_id.clone()))
			.set_client_secret(ClientSecret::new(client_secret.into()))
			.set_auth_uri(AuthUrl::from_url(authorization_url.clone()))
			.set_token_uri(TokenUrl::from_url(token_url.clone()));

		Self {
			inner,
			client_id,
			authorization_url,
			token_url,
			placement: AccessTokenPlacement::default(),
			transport: transport.into(),
		}
	}

	/// Overrides where the bearer token goes on `GET` requests.
	pub fn with_access_token_placement(mut self, placement: AccessTokenPlacement) -> Self {
		self.placement = placement;

		self
	}

	/// Toggles header-based bearer tokens on `GET` requests.
	pub fn use_authorization_header_for_get(&mut self, enabled: bool) {
		self.placement =
			if enabled { AccessTokenPlacement::Header } else { AccessTokenPlacement::Query };
	}

	/// Current bearer token placement.
	pub fn access_token_placement(&self) -> AccessTokenPlacement {
		self.placement
	}

	/// OAuth 2.0 client identifier.
	pub fn client_id(&self) -> &str {
		&self.client_id
	}

	/// Authorization endpoint.
	pub fn authorization_url(&self) -> &Url {
		&self.authorization_url
	}

	/// Token endpoint.
	pub fn token_url(&self) -> &Url {
		&self.token_url
	}

	/// Builds the authorization redirect.
	///
	/// `response_type=code` comes first and `client_id` last; `params` (strategy parameters,
	/// `scope`, ...) are appended in between. Values are percent-encoded here.
	pub fn authorize_url(&self, params: &BTreeMap<String, String>) -> Url {
		let mut url = self.authorization_url.clone();
		let mut pairs = url.query_pairs_mut();

		pairs.append_pair("response_type", "code");

		for (key, value) in params {
			if key == "response_type" || key == "client_id" {
				continue;
			}

			pairs.append_pair(key, value);
		}

		pairs.append_pair("client_id", &self.client_id);

		drop(pairs);

		url
	}

	/// Exchanges an authorization code at the token endpoint.
	pub async fn exchange_code(
		&self,
		code: &str,
		redirect_uri: Option<&str>,
	) -> Result<GrantedTokens> {
		let handle = self.transport.handle();
		let mut request = self.inner.exchange_code(AuthorizationCode::new(code.to_owned()));

		if let Some(redirect) = redirect_uri {
			let redirect_url = RedirectUrl::new(redirect.to_owned())
				.map_err(|source| ConfigError::InvalidUrl { option: "callbackURL", source })?;

			request = request.set_redirect_uri(Cow::Owned(redirect_url));
		}

		let response = request.request_async(&handle).await.map_err(map_request_error)?;

		Ok(GrantedTokens::from_response(&response))
	}

	/// Performs an authenticated `GET` and returns the body of a successful response.
	///
	/// Non-success statuses fail with [`TransportError::Status`] carrying the body as `data`.
	pub async fn get(&self, url: &Url, access_token: &str) -> Result<String, TransportError> {
		let mut target = url.clone();
		let mut builder = Request::builder().method(Method::GET).header(ACCEPT, "application/json");

		match self.placement {
			AccessTokenPlacement::Header =>
				builder = builder.header(AUTHORIZATION, format!("Bearer {access_token}")),
			AccessTokenPlacement::Query => {
				target.query_pairs_mut().append_pair("access_token", access_token);
			},
		}

		let request = builder.uri(target.as_str()).body(Vec::new())?;
		let handle = self.transport.handle();
		let response = handle.call(request).await.map_err(map_client_error)?;
		let status = response.status();
		let body = String::from_utf8_lossy(response.body()).into_owned();

		if !status.is_success() {
			return Err(TransportError::Status { status: status.as_u16(), data: body });
		}

		Ok(body)
	}
}
impl<C> Debug for OAuth2Client<C>
where
	C: HttpTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("OAuth2Client")
			.field("client_id", &self.client_id)
			.field("authorization_url", &self.authorization_url.as_str())
			.field("token_url", &self.token_url.as_str())
			.field("placement", &self.placement)
			.finish()
	}
}

fn map_request_error<E>(err: BasicRequestTokenError<HttpClientError<E>>) -> Error
where
	E: 'static + Send + Sync + StdError,
{
	match err {
		RequestTokenError::ServerResponse(response) => map_server_response_error(response),
		RequestTokenError::Request(error) =>
			Error::Transport { message: TOKEN_FAILURE, source: map_client_error(error) },
		RequestTokenError::Parse(source, _body) => Error::TokenResponseParse { source },
		RequestTokenError::Other(message) =>
			Error::Transport { message: TOKEN_FAILURE, source: TransportError::Other(message) },
	}
}

fn map_server_response_error(response: BasicErrorResponse) -> Error {
	let code = response.error().as_ref().to_owned();
	let message = response.error_description().cloned().unwrap_or_else(|| code.clone());

	Error::provider(message, code)
}

fn map_client_error<E>(err: HttpClientError<E>) -> TransportError
where
	E: 'static + Send + Sync + StdError,
{
	match err {
		HttpClientError::Reqwest(inner) => TransportError::network(*inner),
		HttpClientError::Http(inner) => TransportError::Request(inner),
		HttpClientError::Io(inner) => TransportError::Io(inner),
		HttpClientError::Other(message) => TransportError::Other(message),
		_ => TransportError::Other("Unhandled HTTP client error variant".into()),
	}
}
