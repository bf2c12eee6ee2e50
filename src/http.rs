//! Transport primitives for API round trips.
//!
//! The module exposes [`ApiHttpClient`] alongside the transport-neutral [`ApiRequest`] and
//! [`ApiResponse`] so downstream crates can plug in custom HTTP stacks (or fakes) without
//! touching dispatch. HTTP-level failures are *responses*: an implementation returns `Ok` for
//! every status code and reserves `Err` for connection, TLS, and timeout failures, which a
//! [`TransportErrorMapper`] then converts into client errors.

// std
#[cfg(feature = "reqwest")] use std::ops::Deref;
// self
use crate::_prelude::*;
#[cfg(feature = "reqwest")] use crate::error::{ConfigError, TransportError};

/// Boxed future returned by [`ApiHttpClient::execute`].
pub type HttpFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a + Send>>;

/// HTTP methods used by endpoint descriptors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
	/// `GET`
	Get,
	/// `POST`
	Post,
	/// `PUT`
	Put,
	/// `PATCH`
	Patch,
	/// `DELETE`
	Delete,
}
impl HttpMethod {
	/// Returns the method token.
	pub const fn as_str(self) -> &'static str {
		match self {
			HttpMethod::Get => "GET",
			HttpMethod::Post => "POST",
			HttpMethod::Put => "PUT",
			HttpMethod::Patch => "PATCH",
			HttpMethod::Delete => "DELETE",
		}
	}

	/// Returns true for methods that carry a JSON body.
	pub const fn sends_json(self) -> bool {
		matches!(self, HttpMethod::Post | HttpMethod::Put | HttpMethod::Patch)
	}
}
impl Display for HttpMethod {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Fully resolved request handed to a transport.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
	/// Identifier of the endpoint descriptor that produced the request.
	pub endpoint: &'static str,
	/// HTTP method.
	pub method: HttpMethod,
	/// Absolute URL including the canonical query string.
	pub url: Url,
	/// Header map; names are matched case-insensitively by [`ApiRequest::header`].
	pub headers: BTreeMap<String, String>,
	/// Optional JSON body.
	pub body: Option<JsonValue>,
	/// Remaining time budget for this leg, if the call is bounded.
	pub timeout: Option<StdDuration>,
}
impl ApiRequest {
	/// Looks up a header value, ignoring ASCII case.
	pub fn header(&self, name: &str) -> Option<&str> {
		self.headers
			.iter()
			.find(|(key, _)| key.eq_ignore_ascii_case(name))
			.map(|(_, value)| value.as_str())
	}
}

/// Transport-neutral view of an HTTP response.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiResponse {
	/// HTTP status code.
	pub status: u16,
	/// Reason phrase, when the transport knows one.
	pub reason: Option<String>,
	/// Response headers in arrival order.
	pub headers: Vec<(String, String)>,
	/// Final response URL.
	pub url: Url,
	/// Raw response body.
	pub body: Vec<u8>,
}
impl ApiResponse {
	/// Creates an empty response with the given status.
	pub fn new(status: u16, url: Url) -> Self {
		Self { status, reason: None, headers: Vec::new(), url, body: Vec::new() }
	}

	/// Sets the reason phrase.
	pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
		self.reason = Some(reason.into());

		self
	}

	/// Appends a header.
	pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.headers.push((name.into(), value.into()));

		self
	}

	/// Replaces the body.
	pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
		self.body = body.into();

		self
	}

	/// Returns true for 2xx statuses.
	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}

	/// Looks up the first header value, ignoring ASCII case.
	pub fn header(&self, name: &str) -> Option<&str> {
		self.headers
			.iter()
			.find(|(key, _)| key.eq_ignore_ascii_case(name))
			.map(|(_, value)| value.as_str())
	}

	/// Reason phrase or an empty string.
	pub fn reason(&self) -> &str {
		self.reason.as_deref().unwrap_or_default()
	}
}

/// Abstraction over HTTP transports capable of executing API requests.
///
/// Implementations must be `Send + Sync + 'static` so a client can be shared across tasks, and
/// the returned futures must be `Send`. Every HTTP status is a successful transport outcome.
pub trait ApiHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Concrete error emitted by the underlying transport.
	type TransportError: 'static + Send + Sync + StdError;

	/// Sends `request` and collects the full response.
	fn execute(
		&self,
		request: ApiRequest,
	) -> HttpFuture<'_, Result<ApiResponse, Self::TransportError>>;
}

/// Context handed to a [`TransportErrorMapper`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransportContext {
	/// Endpoint identifier of the failing call.
	pub endpoint: &'static str,
	/// 1 for the initial request, 2 for the step-up retry.
	pub attempt: u8,
	/// Time spent on the call so far.
	pub elapsed: StdDuration,
}

/// Maps transport failures into client [`Error`] values.
pub trait TransportErrorMapper<E>
where
	Self: 'static + Send + Sync,
	E: 'static + Send + Sync + StdError,
{
	/// Converts a transport error into a client error.
	fn map_transport_error(&self, context: &TransportContext, error: E) -> Error;
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
#[cfg(feature = "reqwest")]
#[derive(Clone, Default)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl ApiHttpClient for ReqwestHttpClient {
	type TransportError = ReqwestError;

	fn execute(
		&self,
		request: ApiRequest,
	) -> HttpFuture<'_, Result<ApiResponse, Self::TransportError>> {
		let client = self.0.clone();

		Box::pin(async move {
			let mut builder = client.request(reqwest_method(request.method), request.url);

			for (name, value) in &request.headers {
				builder = builder.header(name.as_str(), value.as_str());
			}
			if let Some(body) = &request.body {
				builder = builder.json(body);
			}
			if let Some(timeout) = request.timeout {
				builder = builder.timeout(timeout);
			}

			let response = builder.send().await?;
			let status = response.status();
			let headers = response
				.headers()
				.iter()
				.filter_map(|(name, value)| {
					value.to_str().ok().map(|value| (name.as_str().to_owned(), value.to_owned()))
				})
				.collect();
			let url = response.url().clone();
			let body = response.bytes().await?.to_vec();

			Ok(ApiResponse {
				status: status.as_u16(),
				reason: status.canonical_reason().map(str::to_owned),
				headers,
				url,
				body,
			})
		})
	}
}

/// Default mapper for reqwest-backed transports.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestTransportErrorMapper;
#[cfg(feature = "reqwest")]
impl TransportErrorMapper<ReqwestError> for ReqwestTransportErrorMapper {
	fn map_transport_error(&self, context: &TransportContext, err: ReqwestError) -> Error {
		if err.is_builder() {
			return ConfigError::from(err).into();
		}
		if err.is_timeout() {
			return TransportError::Timeout { endpoint: context.endpoint, elapsed: context.elapsed }
				.into();
		}

		TransportError::network(context.endpoint, err).into()
	}
}

#[cfg(feature = "reqwest")]
fn reqwest_method(method: HttpMethod) -> reqwest::Method {
	match method {
		HttpMethod::Get => reqwest::Method::GET,
		HttpMethod::Post => reqwest::Method::POST,
		HttpMethod::Put => reqwest::Method::PUT,
		HttpMethod::Patch => reqwest::Method::PATCH,
		HttpMethod::Delete => reqwest::Method::DELETE,
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn url() -> Url {
		Url::parse("https://api.sandbox.transferwise.tech/v1/me").expect("URL fixture should parse.")
	}

	#[test]
	fn response_headers_match_case_insensitively() {
		let response = ApiResponse::new(403, url())
			.with_header("x-2fa-approval-result", "REJECTED")
			.with_header("X-2FA-Approval", "abc123");

		assert_eq!(response.header("X-2FA-Approval-Result"), Some("REJECTED"));
		assert_eq!(response.header("x-2fa-approval"), Some("abc123"));
		assert_eq!(response.header("X-Signature"), None);
		assert!(!response.is_success());
		assert_eq!(response.reason(), "");
	}

	#[test]
	fn methods_report_json_bodies() {
		assert!(HttpMethod::Post.sends_json());
		assert!(!HttpMethod::Get.sends_json());
		assert_eq!(HttpMethod::Patch.to_string(), "PATCH");
	}

	#[cfg(feature = "reqwest")]
	#[tokio::test]
	async fn reqwest_mapper_classifies_connection_failures() {
		let client = ReqwestHttpClient::default();
		let request = ApiRequest {
			endpoint: "users.me",
			method: HttpMethod::Get,
			url: Url::parse("http://127.0.0.1:1/v1/me").expect("URL fixture should parse."),
			headers: BTreeMap::new(),
			body: None,
			timeout: Some(StdDuration::from_secs(5)),
		};
		let err = client.execute(request).await.expect_err("Port 1 should refuse connections.");
		let context =
			TransportContext { endpoint: "users.me", attempt: 1, elapsed: StdDuration::ZERO };
		let mapped = ReqwestTransportErrorMapper.map_transport_error(&context, err);

		assert!(matches!(
			mapped,
			Error::Transport(crate::error::TransportError::Network { endpoint: "users.me", .. })
		));
	}
}
