//! Client-level error types shared across dispatch, signing, and resource services.

// self
use crate::{_prelude::*, problem::ApiError, webhook::WebhookError};

/// Client-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical client error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Caller supplied an incomplete or unconvertible request.
	#[error(transparent)]
	Request(#[from] RequestError),
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS, timeout).
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// The API answered with a non-2xx status.
	#[error(transparent)]
	Api(#[from] ApiError),
	/// Inbound webhook failed verification.
	#[error(transparent)]
	Webhook(#[from] WebhookError),

	/// A successful response body did not match the requested type.
	#[error("Response body from {endpoint} could not be decoded.")]
	Decode {
		/// Endpoint identifier that produced the body.
		endpoint: &'static str,
		/// HTTP status code of the response.
		status: u16,
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
}
impl Error {
	/// Returns the parsed problem body when the failure came from the API.
	pub fn as_api_error(&self) -> Option<&ApiError> {
		match self {
			Self::Api(e) => Some(e),
			_ => None,
		}
	}
}

/// Caller errors detected before any network I/O.
#[derive(Debug, PartialEq, Eq, ThisError)]
pub enum RequestError {
	/// A query parameter declared as required by the endpoint was not supplied.
	#[error("Endpoint `{endpoint}` requires the `{name}` parameter.")]
	MissingRequiredParameter {
		/// Endpoint identifier.
		endpoint: &'static str,
		/// Wire name of the missing parameter.
		name: String,
	},
	/// A placeholder in the path template has no value.
	#[error("Endpoint `{endpoint}` requires a value for the `{{{name}}}` path placeholder.")]
	MissingPathParameter {
		/// Endpoint identifier.
		endpoint: &'static str,
		/// Placeholder name as written in the path template.
		name: String,
	},
	/// A parameter value cannot be rendered into its wire form.
	#[error("Parameter `{key}` has unsupported type `{type_name}`.")]
	UnsupportedParameterType {
		/// Caller-side key of the offending parameter.
		key: String,
		/// Runtime kind of the offending value.
		type_name: &'static str,
	},
	/// An argument failed local validation.
	#[error("Invalid value for `{name}`: {reason}.")]
	InvalidArgument {
		/// Argument name.
		name: &'static str,
		/// Why the value was rejected.
		reason: String,
	},
}

/// Configuration and validation failures raised by the client.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// The server demanded SCA but no private key is configured.
	#[error(
		"Endpoint `{endpoint}` requires SCA; configure a private key via `private_key_pem` or `private_key_file`."
	)]
	MissingPrivateKey {
		/// Endpoint identifier that issued the challenge.
		endpoint: &'static str,
	},
	/// The configured private key could not be parsed.
	#[error("Private key data is not a valid PEM-encoded RSA private key.")]
	InvalidKeyData {
		/// Underlying parsing failure.
		#[source]
		source: BoxError,
	},
	/// The private key file could not be read.
	#[error("Private key file `{path}` could not be read.")]
	PrivateKeyFile {
		/// Path that failed to load.
		path: String,
		/// Underlying IO failure.
		#[source]
		source: std::io::Error,
	},
	/// Both a private key file and inline key data were supplied.
	#[error("Provide only one of a private key file or inline private key data.")]
	ConflictingPrivateKeys,
	/// API key is empty.
	#[error("An API key is required.")]
	MissingApiKey,
	/// Environment variable holds an unknown environment name.
	#[error("Unknown environment `{value}`; expected `live` or `sandbox`.")]
	UnknownEnvironment {
		/// Rejected value.
		value: String,
	},
	/// Base URL override uses plain HTTP against a non-loopback host.
	#[error("Base URL must use HTTPS: {url}.")]
	InsecureBaseUrl {
		/// URL that failed validation.
		url: String,
	},
	/// A request URL could not be assembled.
	#[error("Request URL is invalid.")]
	InvalidUrl {
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

	/// Wraps a key parsing failure inside [`ConfigError`].
	pub fn invalid_key_data(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::InvalidKeyData { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Transport-level failures (network, deadlines).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling {endpoint}.")]
	Network {
		/// Endpoint identifier.
		endpoint: &'static str,
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// The call did not complete within its time budget.
	#[error("Call to {endpoint} timed out after {elapsed:?}.")]
	Timeout {
		/// Endpoint identifier.
		endpoint: &'static str,
		/// Time spent before giving up.
		elapsed: StdDuration,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(
		endpoint: &'static str,
		src: impl 'static + Send + Sync + std::error::Error,
	) -> Self {
		Self::Network { endpoint, source: Box::new(src) }
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn request_errors_name_the_offending_input() {
		let err = RequestError::MissingPathParameter {
			endpoint: "transfers.get",
			name: "transfer_id".into(),
		};

		assert_eq!(
			err.to_string(),
			"Endpoint `transfers.get` requires a value for the `{transfer_id}` path placeholder."
		);

		let err = RequestError::UnsupportedParameterType { key: "filter".into(), type_name: "object" };

		assert_eq!(err.to_string(), "Parameter `filter` has unsupported type `object`.");
	}

	#[test]
	fn config_error_converts_into_client_error_with_source() {
		let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
		let err: Error = ConfigError::PrivateKeyFile { path: "wise.pem".into(), source: io }.into();

		assert!(matches!(err, Error::Config(ConfigError::PrivateKeyFile { .. })));

		let source = StdError::source(&err).expect("Config error should expose its IO source.");

		assert_eq!(source.to_string(), "gone");
		assert!(err.as_api_error().is_none());
	}

	#[test]
	fn every_transport_error_names_its_endpoint() {
		let io = std::io::Error::new(std::io::ErrorKind::ConnectionReset, "reset");
		let errors = [
			TransportError::network("users.me", io),
			TransportError::Timeout { endpoint: "users.me", elapsed: StdDuration::from_secs(1) },
		];

		for err in errors {
			let endpoint = match &err {
				TransportError::Network { endpoint, .. } | TransportError::Timeout { endpoint, .. } =>
					*endpoint,
			};

			assert_eq!(endpoint, "users.me");
			assert!(err.to_string().contains("users.me"));
		}
	}
}
