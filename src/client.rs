//! Client facade and request dispatch with SCA step-up.
//!
//! [`Client`] owns its configuration, transport, and step-up cache. Every resource service
//! funnels into [`Client::call`], which prepares the request from an
//! [`EndpointDescriptor`], sends it, answers at most one SCA challenge, and decodes the body.

// std
use std::time::Instant;
// self
use crate::{
	_prelude::*,
	config::{ClientConfig, DomainResolver},
	endpoint::{Call, EndpointDescriptor},
	error::{ConfigError, TransportError},
	http::{ApiHttpClient, ApiRequest, ApiResponse, TransportContext, TransportErrorMapper},
	obs::{self, CallOutcome, CallSpan},
	problem::ApiError,
	sca::{self, ScaOutcome, StepUpCache, StepUpHeaders},
};
#[cfg(feature = "reqwest")]
use crate::http::{ReqwestHttpClient, ReqwestTransportErrorMapper};

#[cfg(feature = "reqwest")]
/// Client specialized for the crate's default reqwest transport stack.
pub type ReqwestApiClient = Client<ReqwestHttpClient, ReqwestTransportErrorMapper>;

/// Entry point for every Wise API call.
///
/// The client binds one [`ClientConfig`] for its whole lifetime and shares it, the transport,
/// and the step-up cache between clones. Two clients never share state, so live and sandbox
/// clients (or different API keys) can run side by side.
pub struct Client<C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// HTTP client wrapper used for every outbound request.
	pub http_client: Arc<C>,
	/// Mapper applied to transport-layer errors before surfacing them to callers.
	pub transport_mapper: Arc<M>,
	config: Arc<ClientConfig>,
	resolver: DomainResolver,
	step_up: StepUpCache,
}
impl<C, M> Client<C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Creates a client that reuses the caller-provided transport + mapper pair.
	pub fn with_http_client(
		config: impl Into<Arc<ClientConfig>>,
		http_client: impl Into<Arc<C>>,
		mapper: impl Into<Arc<M>>,
	) -> Self {
		let config = config.into();

		Self {
			http_client: http_client.into(),
			transport_mapper: mapper.into(),
			resolver: DomainResolver::bound(config.clone()),
			config,
			step_up: StepUpCache::default(),
		}
	}

	/// Bound configuration.
	pub fn config(&self) -> &ClientConfig {
		&self.config
	}

	/// Resolver deriving base URL and default headers from the bound configuration.
	pub fn resolver(&self) -> &DomainResolver {
		&self.resolver
	}

	/// Step-up headers cached by this client.
	pub fn step_up_cache(&self) -> &StepUpCache {
		&self.step_up
	}

	/// Invokes `endpoint` and decodes the 2xx body into `T`.
	///
	/// An empty body decodes as JSON `null`, so `()` and `Option<_>` work for bodiless
	/// responses.
	pub async fn call<T>(&self, endpoint: &EndpointDescriptor, call: Call) -> Result<T>
	where
		T: DeserializeOwned,
	{
		let id = endpoint.id();

		observe(id, "call", async {
			let response = self.dispatch(endpoint, &call).await?;

			decode(id, &response)
		})
		.await
	}

	/// Sends `call` and returns the raw 2xx response, answering one SCA challenge if needed.
	///
	/// Recorded like [`Client::call`], under the `send` stage.
	pub async fn send(&self, endpoint: &EndpointDescriptor, call: &Call) -> Result<ApiResponse> {
		observe(endpoint.id(), "send", self.dispatch(endpoint, call)).await
	}

	async fn dispatch(&self, endpoint: &EndpointDescriptor, call: &Call) -> Result<ApiResponse> {
		let started = Instant::now();
		let id = endpoint.id();
		let mut request = endpoint.prepare(&self.resolver, call)?;

		if endpoint.is_sca_protected()
			&& let Some(cached) = self.step_up.fresh(id, self.config.step_up_ttl())
		{
			obs::record_step_up(id, true);
			cached.apply(&mut request.headers);
		}

		let response = self.execute(request.clone(), 1, started).await?;

		match ScaOutcome::classify(&response) {
			ScaOutcome::Success => Ok(response),
			ScaOutcome::ChallengeIssued(challenge) if endpoint.is_sca_protected() => {
				let private_key = self
					.config
					.private_key()
					.ok_or(ConfigError::MissingPrivateKey { endpoint: id })?;
				let signature = sca::sign_challenge(&challenge, private_key.expose())?;
				let headers = StepUpHeaders::new(challenge, signature);

				headers.apply(&mut request.headers);
				self.step_up.store(id, headers);
				obs::record_step_up(id, false);
				obs::record_call_outcome(id, CallOutcome::StepUp);

				let response = self.execute(request, 2, started).await?;

				if response.is_success() {
					Ok(response)
				} else {
					Err(ApiError::from_response(&response).into())
				}
			},
			_ => Err(ApiError::from_response(&response).into()),
		}
	}

	async fn execute(
		&self,
		mut request: ApiRequest,
		attempt: u8,
		started: Instant,
	) -> Result<ApiResponse> {
		let endpoint = request.endpoint;

		if let Some(budget) = self.config.timeout() {
			let elapsed = started.elapsed();
			let remaining = budget
				.checked_sub(elapsed)
				.filter(|remaining| !remaining.is_zero())
				.ok_or(TransportError::Timeout { endpoint, elapsed })?;

			request.timeout = Some(remaining);
		}

		self.http_client.execute(request).await.map_err(|e| {
			let context = TransportContext { endpoint, attempt, elapsed: started.elapsed() };

			self.transport_mapper.map_transport_error(&context, e)
		})
	}
}
#[cfg(feature = "reqwest")]
impl Client<ReqwestHttpClient, ReqwestTransportErrorMapper> {
	/// Creates a client with its own reqwest-backed transport.
	pub fn new(config: impl Into<Arc<ClientConfig>>) -> Self {
		Self::with_http_client(config, ReqwestHttpClient::default(), ReqwestTransportErrorMapper)
	}

	/// Creates a client from `WISE_*` environment variables.
	pub fn from_env() -> Result<Self> {
		Ok(Self::new(ClientConfig::from_env()?))
	}
}
impl<C, M> Clone for Client<C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	fn clone(&self) -> Self {
		Self {
			http_client: self.http_client.clone(),
			transport_mapper: self.transport_mapper.clone(),
			config: self.config.clone(),
			resolver: self.resolver.clone(),
			step_up: self.step_up.clone(),
		}
	}
}
impl<C, M> Debug for Client<C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Client")
			.field("environment", &self.config.environment())
			.field("base_url", &self.config.base_url().as_str())
			.field("private_key_set", &self.config.private_key().is_some())
			.field("cached_step_ups", &self.step_up.len())
			.finish()
	}
}

async fn observe<F, T>(id: &'static str, stage: &'static str, fut: F) -> Result<T>
where
	F: Future<Output = Result<T>>,
{
	let span = CallSpan::new(id, stage);

	obs::record_call_outcome(id, CallOutcome::Attempt);

	let result = span.instrument(fut).await;

	match &result {
		Ok(_) => obs::record_call_outcome(id, CallOutcome::Success),
		Err(_e) => {
			#[cfg(feature = "tracing")]
			tracing::warn!(endpoint = id, stage, error = %_e, "Wise API call failed.");

			obs::record_call_outcome(id, CallOutcome::Failure);
		},
	}

	result
}

fn decode<T>(endpoint: &'static str, response: &ApiResponse) -> Result<T>
where
	T: DeserializeOwned,
{
	let body: &[u8] =
		if response.body.iter().all(u8::is_ascii_whitespace) { b"null" } else { &response.body };
	let mut deserializer = serde_json::Deserializer::from_slice(body);

	serde_path_to_error::deserialize(&mut deserializer).map_err(|source| Error::Decode {
		endpoint,
		status: response.status,
		source,
	})
}
