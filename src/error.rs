//! Strategy-level error types shared by the OAuth client, the ESI strategy, and flows.

// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Boxed error used for opaque sources (transport internals, verify callbacks).
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical error exposed by public APIs.
///
/// Use [`Error::kind`] to branch on the category instead of matching every variant.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Provider reported an error through a recognized JSON shape.
	#[error("{message}")]
	Provider {
		/// Human-readable description supplied by the provider.
		message: String,
		/// Provider error code (e.g., `invalid_request`).
		code: String,
	},
	/// Transport failure without a decodable provider error.
	#[error("{message}")]
	Transport {
		/// Fixed description of the failed operation.
		message: &'static str,
		/// Original transport failure.
		#[source]
		source: TransportError,
	},
	/// Profile endpoint returned a body that is not valid JSON.
	#[error("Failed to parse user profile")]
	ProfileParse {
		/// Underlying JSON failure.
		#[source]
		source: serde_json::Error,
	},
	/// Token endpoint responded with malformed JSON.
	#[error("Failed to parse token response")]
	TokenResponseParse {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Returned `state` does not match the authorization session.
	#[error("Authorization state mismatch.")]
	StateMismatch,
	/// Verify callback failed.
	#[error("Verify callback failed.")]
	Verify {
		/// Error returned by the callback.
		#[source]
		source: BoxError,
	},
}
impl Error {
	/// Returns the category discriminant for this error.
	pub fn kind(&self) -> ErrorKind {
		match self {
			Self::Provider { .. } => ErrorKind::Provider,
			Self::Transport { .. } => ErrorKind::Transport,
			Self::ProfileParse { .. } | Self::TokenResponseParse { .. } => ErrorKind::Parse,
			Self::Config(_) => ErrorKind::Config,
			Self::StateMismatch => ErrorKind::State,
			Self::Verify { .. } => ErrorKind::Verify,
		}
	}

	/// Provider error code, for [`ErrorKind::Provider`] errors only.
	pub fn code(&self) -> Option<&str> {
		match self {
			Self::Provider { code, .. } => Some(code),
			_ => None,
		}
	}

	pub(crate) fn provider(message: impl Into<String>, code: impl Into<String>) -> Self {
		Self::Provider { message: message.into(), code: code.into() }
	}
}

/// Error categories surfaced by [`Error::kind`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
	/// Provider-reported error with message and code.
	Provider,
	/// Transport failure wrapping the original cause.
	Transport,
	/// Local parse failure of a provider response.
	Parse,
	/// Invalid local configuration.
	Config,
	/// Authorization state validation failed.
	State,
	/// Verify callback failed.
	Verify,
}
impl ErrorKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			ErrorKind::Provider => "provider",
			ErrorKind::Transport => "transport",
			ErrorKind::Parse => "parse",
			ErrorKind::Config => "config",
			ErrorKind::State => "state",
			ErrorKind::Verify => "verify",
		}
	}
}
impl Display for ErrorKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Configuration and validation failures raised while building strategies.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// `clientID` is missing or empty.
	#[error("The clientID option is required.")]
	MissingClientId,
	/// `clientSecret` is missing or empty.
	#[error("The clientSecret option is required.")]
	MissingClientSecret,
	/// A configured URL cannot be parsed.
	#[error("The {option} option is not a valid URL.")]
	InvalidUrl {
		/// Option name carrying the URL.
		option: &'static str,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Transport-level failures produced by [`OAuth2Client::get`](crate::oauth::OAuth2Client::get)
/// and the token exchange.
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Endpoint answered with a non-success status; `data` holds the response body.
	#[error("Endpoint responded with HTTP {status}.")]
	Status {
		/// HTTP status code.
		status: u16,
		/// Response body, decoded lossily as UTF-8.
		data: String,
	},
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the endpoint.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// HTTP request could not be assembled.
	#[error("HTTP request could not be constructed.")]
	Request(#[from] oauth2::http::Error),
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the endpoint.")]
	Io(#[from] std::io::Error),
	/// Any other failure reported by the HTTP client.
	#[error("HTTP client error occurred while calling the endpoint: {0}.")]
	Other(String),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}

	/// Error body attached to the failure, if the endpoint produced one.
	pub fn data(&self) -> Option<&str> {
		match self {
			Self::Status { data, .. } => Some(data),
			_ => None,
		}
	}

	/// HTTP status code, if the endpoint answered.
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::Status { status, .. } => Some(*status),
			_ => None,
		}
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn kinds_and_codes_follow_variants() {
		let provider = Error::provider("Invalid Credentials", "invalid_request");

		assert_eq!(provider.kind(), ErrorKind::Provider);
		assert_eq!(provider.code(), Some("invalid_request"));
		assert_eq!(provider.to_string(), "Invalid Credentials");

		let transport = Error::Transport {
			message: "Failed to fetch user profile",
			source: TransportError::Other("boom".into()),
		};

		assert_eq!(transport.kind(), ErrorKind::Transport);
		assert_eq!(transport.code(), None);
		assert_eq!(transport.to_string(), "Failed to fetch user profile");
		assert!(transport.source().is_some());
		assert_eq!(Error::StateMismatch.kind().as_str(), "state");
	}

	#[test]
	fn only_status_failures_carry_data() {
		let status = TransportError::Status { status: 401, data: "{}".into() };

		assert_eq!(status.data(), Some("{}"));
		assert_eq!(status.status(), Some(401));
		assert_eq!(TransportError::Other("x".into()).data(), None);
	}
}
