//! Client configuration and the credential/domain resolver derived from it.
//!
//! A [`ClientConfig`] is validated once by [`ClientConfigBuilder::build`] and then shared behind
//! an [`Arc`] by every service of a client. The [`DomainResolver`] turns a bound configuration
//! into the base URL and default headers of each request; it never consults process-wide state,
//! so two clients with different environments can coexist.

pub mod secret;

pub use secret::*;

// std
use std::path::{Path, PathBuf};
// self
use crate::{_prelude::*, error::ConfigError};

/// Base URL of the production API.
pub const LIVE_BASE_URL: &str = "https://api.transferwise.com";
/// Base URL of the sandbox API.
pub const SANDBOX_BASE_URL: &str = "https://api.sandbox.transferwise.tech";

/// Environment variable holding the API key read by [`ClientConfig::from_env`].
pub const ENV_API_KEY: &str = "WISE_API_KEY";
/// Environment variable selecting `live` or `sandbox`.
pub const ENV_ENVIRONMENT: &str = "WISE_ENVIRONMENT";
/// Environment variable pointing at a PEM private key used for SCA.
pub const ENV_PRIVATE_KEY_FILE: &str = "WISE_PRIVATE_KEY_FILE";
/// Environment variable overriding the base URL.
pub const ENV_BASE_URL: &str = "WISE_BASE_URL";

/// Wise environments a client can talk to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
	/// Sandbox environment for integration testing.
	#[default]
	Sandbox,
	/// Production environment moving real money.
	Live,
}
impl Environment {
	/// Returns the stable lowercase label.
	pub const fn as_str(self) -> &'static str {
		match self {
			Environment::Sandbox => "sandbox",
			Environment::Live => "live",
		}
	}

	/// Returns the default API host for the environment.
	pub const fn default_base_url(self) -> &'static str {
		match self {
			Environment::Sandbox => SANDBOX_BASE_URL,
			Environment::Live => LIVE_BASE_URL,
		}
	}
}
impl Display for Environment {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
impl FromStr for Environment {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().as_str() {
			"sandbox" => Ok(Environment::Sandbox),
			"live" => Ok(Environment::Live),
			_ => Err(ConfigError::UnknownEnvironment { value: s.to_owned() }),
		}
	}
}

/// Immutable client configuration bound to every endpoint call.
#[derive(Clone, Debug)]
pub struct ClientConfig {
	api_key: ApiKey,
	environment: Environment,
	private_key: Option<PrivateKeyPem>,
	base_url: Url,
	timeout: Option<StdDuration>,
	step_up_ttl: Option<Duration>,
}
impl ClientConfig {
	/// Creates a new builder for the provided API key.
	pub fn builder(api_key: impl Into<String>) -> ClientConfigBuilder {
		ClientConfigBuilder::new(api_key)
	}

	/// Reads `WISE_API_KEY`, `WISE_ENVIRONMENT`, `WISE_PRIVATE_KEY_FILE`, and `WISE_BASE_URL`.
	pub fn from_env() -> Result<Self, ConfigError> {
		Self::from_lookup(|name| std::env::var(name).ok())
	}

	/// Builds a configuration from an arbitrary variable lookup.
	pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
	where
		F: Fn(&str) -> Option<String>,
	{
		let api_key = lookup(ENV_API_KEY).ok_or(ConfigError::MissingApiKey)?;
		let mut builder = Self::builder(api_key);

		if let Some(environment) = lookup(ENV_ENVIRONMENT) {
			builder = builder.environment(environment.parse()?);
		}
		if let Some(path) = lookup(ENV_PRIVATE_KEY_FILE) {
			builder = builder.private_key_file(path);
		}
		if let Some(raw) = lookup(ENV_BASE_URL) {
			let url = Url::parse(&raw).map_err(|source| ConfigError::InvalidUrl { source })?;

			builder = builder.base_url(url);
		}

		builder.build()
	}

	/// API key sent as the bearer token.
	pub fn api_key(&self) -> &ApiKey {
		&self.api_key
	}

	/// Selected environment.
	pub fn environment(&self) -> Environment {
		self.environment
	}

	/// Private key used to answer SCA challenges, if configured.
	pub fn private_key(&self) -> Option<&PrivateKeyPem> {
		self.private_key.as_ref()
	}

	/// Resolved base URL (environment default or override).
	pub fn base_url(&self) -> &Url {
		&self.base_url
	}

	/// Budget for a whole call, including a possible step-up retry.
	pub fn timeout(&self) -> Option<StdDuration> {
		self.timeout
	}

	/// How long cached step-up headers stay valid; `None` reuses them until challenged again.
	pub fn step_up_ttl(&self) -> Option<Duration> {
		self.step_up_ttl
	}

	/// Default headers attached to every request.
	pub fn required_headers(&self) -> BTreeMap<String, String> {
		let mut headers = BTreeMap::new();

		headers.insert("Authorization".into(), format!("Bearer {}", self.api_key.expose()));

		headers
	}
}

/// Builder for [`ClientConfig`] values.
#[derive(Debug)]
pub struct ClientConfigBuilder {
	api_key: ApiKey,
	environment: Environment,
	private_key: Option<PrivateKeyPem>,
	private_key_file: Option<PathBuf>,
	base_url: Option<Url>,
	timeout: Option<StdDuration>,
	step_up_ttl: Option<Duration>,
}
impl ClientConfigBuilder {
	/// Creates a new builder seeded with the API key and the sandbox environment.
	pub fn new(api_key: impl Into<String>) -> Self {
		Self {
			api_key: ApiKey::new(api_key),
			environment: Environment::default(),
			private_key: None,
			private_key_file: None,
			base_url: None,
			timeout: None,
			step_up_ttl: None,
		}
	}

	/// Selects the environment.
	pub fn environment(mut self, environment: Environment) -> Self {
		self.environment = environment;

		self
	}

	/// Supplies inline PEM key data.
	pub fn private_key_pem(mut self, pem: impl Into<Vec<u8>>) -> Self {
		self.private_key = Some(PrivateKeyPem::new(pem));

		self
	}

	/// Supplies a PEM key file, read when [`build`](Self::build) runs.
	pub fn private_key_file(mut self, path: impl AsRef<Path>) -> Self {
		self.private_key_file = Some(path.as_ref().to_path_buf());

		self
	}

	/// Overrides the environment's base URL (proxies, mock servers).
	pub fn base_url(mut self, url: Url) -> Self {
		self.base_url = Some(url);

		self
	}

	/// Bounds each call, including a step-up retry, to `timeout`.
	pub fn timeout(mut self, timeout: StdDuration) -> Self {
		self.timeout = Some(timeout);

		self
	}

	/// Expires cached step-up headers after `ttl`.
	pub fn step_up_ttl(mut self, ttl: Duration) -> Self {
		self.step_up_ttl = Some(if ttl.is_negative() { Duration::ZERO } else { ttl });

		self
	}

	/// Consumes the builder and validates the resulting configuration.
	pub fn build(self) -> Result<ClientConfig, ConfigError> {
		if self.api_key.is_blank() {
			return Err(ConfigError::MissingApiKey);
		}

		let private_key = match (self.private_key, self.private_key_file) {
			(Some(_), Some(_)) => return Err(ConfigError::ConflictingPrivateKeys),
			(Some(pem), None) => Some(pem),
			(None, Some(path)) => Some(read_private_key(&path)?),
			(None, None) => None,
		};
		let base_url = match self.base_url {
			Some(url) => url,
			None => Url::parse(self.environment.default_base_url())
				.map_err(|source| ConfigError::InvalidUrl { source })?,
		};

		validate_base_url(&base_url)?;

		Ok(ClientConfig {
			api_key: self.api_key,
			environment: self.environment,
			private_key,
			base_url,
			timeout: self.timeout,
			step_up_ttl: self.step_up_ttl,
		})
	}
}

/// Resolves the base URL and default headers for endpoint calls.
///
/// A resolver is either bound to exactly one configuration or unbound. The unbound form exists
/// for metadata inspection (documentation tooling, request previews) and resolves to the
/// sandbox host with no credentials.
#[derive(Clone, Debug, Default)]
pub struct DomainResolver(Option<Arc<ClientConfig>>);
impl DomainResolver {
	/// Binds the resolver to `config` for its whole lifetime.
	pub fn bound(config: Arc<ClientConfig>) -> Self {
		Self(Some(config))
	}

	/// Creates a resolver without credentials.
	pub fn unbound() -> Self {
		Self(None)
	}

	/// Returns the bound configuration, if any.
	pub fn config(&self) -> Option<&ClientConfig> {
		self.0.as_deref()
	}

	/// Base URL requests are issued against.
	pub fn base_url(&self) -> Result<Url, ConfigError> {
		match self.config() {
			Some(config) => Ok(config.base_url().clone()),
			None => Url::parse(SANDBOX_BASE_URL).map_err(|source| ConfigError::InvalidUrl { source }),
		}
	}

	/// Default headers derived from the bound configuration; empty when unbound.
	pub fn required_headers(&self) -> BTreeMap<String, String> {
		self.config().map(ClientConfig::required_headers).unwrap_or_default()
	}
}

fn read_private_key(path: &Path) -> Result<PrivateKeyPem, ConfigError> {
	std::fs::read(path)
		.map(PrivateKeyPem::new)
		.map_err(|source| ConfigError::PrivateKeyFile { path: path.display().to_string(), source })
}

fn validate_base_url(url: &Url) -> Result<(), ConfigError> {
	let loopback = matches!(url.host_str(), Some("localhost" | "127.0.0.1" | "[::1]"));

	if url.scheme() == "https" || (url.scheme() == "http" && loopback) {
		Ok(())
	} else {
		Err(ConfigError::InsecureBaseUrl { url: url.to_string() })
	}
}
