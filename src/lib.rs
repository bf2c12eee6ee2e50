//! Typed async client for the Wise (formerly TransferWise) REST API.
//!
//! Endpoints are `const` descriptors dispatched through a [`client::Client`]. Caller parameters
//! are canonicalized into the wire format, error responses become [`problem::ApiError`] values,
//! and Strong Customer Authentication (SCA) challenges are signed and retried transparently.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod api;
pub mod client;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod http;
pub mod obs;
pub mod params;
pub mod problem;
pub mod sca;
pub mod webhook;
#[cfg(all(any(test, feature = "test"), feature = "reqwest"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// self
	use crate::{
		client::ReqwestApiClient,
		config::{ClientConfig, Environment},
		http::ReqwestHttpClient,
	};

	/// API key used by every test client.
	pub const TEST_API_KEY: &str = "test-key";

	/// Builds a reqwest HTTP client that accepts the self-signed certificates produced by
	/// `httpmock` during tests.
	pub fn test_reqwest_http_client() -> ReqwestHttpClient {
		let client = ReqwestClient::builder()
			.danger_accept_invalid_certs(true)
			.danger_accept_invalid_hostnames(true)
			.redirect(reqwest::redirect::Policy::none())
			.build()
			.expect("Failed to build insecure Reqwest client for tests.");

		ReqwestHttpClient::with_client(client)
	}

	/// Returns a sandbox configuration pointed at `base_url` (typically an `httpmock` server).
	pub fn test_config(base_url: &str, private_key: Option<&[u8]>) -> ClientConfig {
		let base_url = Url::parse(base_url).expect("Mock server URL should parse.");
		let mut builder = ClientConfig::builder(TEST_API_KEY)
			.environment(Environment::Sandbox)
			.base_url(base_url);

		if let Some(pem) = private_key {
			builder = builder.private_key_pem(pem.to_vec());
		}

		builder.build().expect("Test configuration should be valid.")
	}

	/// Constructs a reqwest-backed [`ReqwestApiClient`] for the provided configuration.
	pub fn build_reqwest_test_client(config: ClientConfig) -> ReqwestApiClient {
		ReqwestApiClient::with_http_client(
			config,
			test_reqwest_http_client(),
			crate::http::ReqwestTransportErrorMapper,
		)
	}
}

mod _prelude {
	pub use std::{
		collections::{BTreeMap, HashMap},
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
		time::Duration as StdDuration,
	};

	pub use parking_lot::RwLock;
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize, de::DeserializeOwned};
	pub use serde_json::Value as JsonValue;
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(all(test, feature = "reqwest"))] use {color_eyre as _, httpmock as _, tokio as _};
