//! Declarative endpoint descriptors and request preparation.
//!
//! An [`EndpointDescriptor`] is a `const` value describing one HTTP operation: its stable
//! identifier, method, path template, required query parameters, static headers, and whether
//! the server may demand SCA step-up. Descriptors hold no runtime state. A [`Call`] carries the
//! per-invocation inputs, and [`EndpointDescriptor::prepare`] turns both into an
//! [`ApiRequest`] without touching the network.

// self
use crate::{
	_prelude::*,
	config::DomainResolver,
	error::{ConfigError, RequestError},
	http::{ApiRequest, HttpMethod},
	params::{CanonicalParams, Identified, ParamValue, Parameterizable, Params, to_lower_camel_case},
};

/// Deprecation metadata attached to an endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Deprecation {
	/// Guidance shown to callers.
	pub message: &'static str,
}

/// Static description of one API operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EndpointDescriptor {
	id: &'static str,
	method: HttpMethod,
	path: &'static str,
	required_params: &'static [&'static str],
	headers: &'static [(&'static str, &'static str)],
	sca: bool,
	deprecation: Option<Deprecation>,
}
impl EndpointDescriptor {
	/// Declares an endpoint with the given identifier, method, and path template.
	pub const fn new(id: &'static str, method: HttpMethod, path: &'static str) -> Self {
		Self {
			id,
			method,
			path,
			required_params: &[],
			headers: &[],
			sca: false,
			deprecation: None,
		}
	}

	/// Declares a `GET` endpoint.
	pub const fn get(id: &'static str, path: &'static str) -> Self {
		Self::new(id, HttpMethod::Get, path)
	}

	/// Declares a `POST` endpoint.
	pub const fn post(id: &'static str, path: &'static str) -> Self {
		Self::new(id, HttpMethod::Post, path)
	}

	/// Lists query parameters (wire names) that must be present.
	pub const fn required(self, names: &'static [&'static str]) -> Self {
		Self { required_params: names, ..self }
	}

	/// Adds static headers sent with every request.
	pub const fn with_headers(self, headers: &'static [(&'static str, &'static str)]) -> Self {
		Self { headers, ..self }
	}

	/// Marks the endpoint as able to demand SCA step-up.
	pub const fn sca_protected(self) -> Self {
		Self { sca: true, ..self }
	}

	/// Marks the endpoint as deprecated.
	pub const fn deprecated(self, message: &'static str) -> Self {
		Self { deprecation: Some(Deprecation { message }), ..self }
	}

	/// Stable identifier, also the step-up cache key.
	pub const fn id(&self) -> &'static str {
		self.id
	}

	/// HTTP method.
	pub const fn method(&self) -> HttpMethod {
		self.method
	}

	/// Path template with `{name}` placeholders.
	pub const fn path(&self) -> &'static str {
		self.path
	}

	/// Required query parameters (wire names).
	pub const fn required_params(&self) -> &'static [&'static str] {
		self.required_params
	}

	/// Static headers.
	pub const fn headers(&self) -> &'static [(&'static str, &'static str)] {
		self.headers
	}

	/// Whether the server may answer with an SCA challenge.
	pub const fn is_sca_protected(&self) -> bool {
		self.sca
	}

	/// Deprecation metadata, if any.
	pub const fn deprecation(&self) -> Option<Deprecation> {
		self.deprecation
	}

	/// Returns true when the endpoint is deprecated.
	pub const fn is_deprecated(&self) -> bool {
		self.deprecation.is_some()
	}

	/// Placeholder names in template order.
	pub fn placeholders(&self) -> Vec<&'static str> {
		self.path
			.split('/')
			.flat_map(|segment| segment.split('{').skip(1))
			.filter_map(|rest| rest.split_once('}').map(|(name, _)| name))
			.collect()
	}

	/// Validates `call` and assembles the request without sending it.
	///
	/// Checks run before any I/O: required query parameters first, then path placeholders.
	pub fn prepare(&self, resolver: &DomainResolver, call: &Call) -> Result<ApiRequest> {
		let query = call.query.canonicalize()?;

		if let Some(missing) = self.required_params.iter().find(|name| !query.contains_key(**name))
		{
			return Err(RequestError::MissingRequiredParameter {
				endpoint: self.id,
				name: (*missing).to_owned(),
			}
			.into());
		}

		let path_args = path_arguments(&call.path)?;
		let mut url = resolver.base_url()?;

		{
			let mut segments = url.path_segments_mut().map_err(|_| ConfigError::InvalidUrl {
				source: url::ParseError::RelativeUrlWithCannotBeABaseBase,
			})?;

			segments.pop_if_empty();

			for segment in self.path.split('/').filter(|segment| !segment.is_empty()) {
				segments.push(&self.render_segment(segment, &path_args)?);
			}
		}

		if !query.is_empty() {
			url.query_pairs_mut().extend_pairs(&query);
		}

		let mut headers = resolver.required_headers();

		if self.method.sends_json() {
			headers.insert("Content-Type".into(), "application/json".into());
		}
		for (name, value) in self.headers {
			headers.insert((*name).to_owned(), (*value).to_owned());
		}

		Ok(ApiRequest {
			endpoint: self.id,
			method: self.method,
			url,
			headers,
			body: call.body.clone(),
			timeout: None,
		})
	}

	fn render_segment(
		&self,
		segment: &str,
		args: &CanonicalParams,
	) -> Result<String, RequestError> {
		let mut rendered = String::with_capacity(segment.len());
		let mut rest = segment;

		while let Some(open) = rest.find('{') {
			let Some(close) = rest[open..].find('}').map(|offset| open + offset) else {
				break;
			};
			let name = &rest[open + 1..close];
			let value = args
				.get(name)
				.or_else(|| args.get(&to_lower_camel_case(name)))
				.ok_or_else(|| RequestError::MissingPathParameter {
					endpoint: self.id,
					name: name.to_owned(),
				})?;

			rendered.push_str(&rest[..open]);
			rendered.push_str(value);

			rest = &rest[close + 1..];
		}

		rendered.push_str(rest);

		Ok(rendered)
	}
}

/// Per-invocation inputs: path arguments, query parameters, and an optional JSON body.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Call {
	path: Params,
	query: Params,
	body: Option<JsonValue>,
}
impl Call {
	/// Creates an empty call.
	pub fn new() -> Self {
		Self::default()
	}

	/// Supplies a path placeholder value; `profile_id` also satisfies `{profileId}`.
	pub fn path(mut self, name: impl Into<String>, value: impl Parameterizable) -> Self {
		self.path.extend([(name.into(), value.as_parameter())]);

		self
	}

	/// Supplies a path placeholder from a resource's identifier.
	pub fn path_id<T>(self, name: impl Into<String>, resource: &T) -> Self
	where
		T: ?Sized + Identified,
	{
		self.path(name, ParamValue::identified(resource))
	}

	/// Adds one query parameter.
	pub fn param(mut self, key: impl Into<String>, value: impl Parameterizable) -> Self {
		self.query.extend([(key.into(), value.as_parameter())]);

		self
	}

	/// Merges a parameter set into the query.
	pub fn params(mut self, params: Params) -> Self {
		self.query.extend(params);

		self
	}

	/// Sets the JSON body.
	pub fn json(mut self, body: JsonValue) -> Self {
		self.body = Some(body);

		self
	}

	/// Query parameters as supplied by the caller.
	pub fn query(&self) -> &Params {
		&self.query
	}

	/// JSON body, if any.
	pub fn body(&self) -> Option<&JsonValue> {
		self.body.as_ref()
	}
}

// Each non-null argument is reachable under its raw key and its camelCase form.
fn path_arguments(path: &Params) -> Result<CanonicalParams, RequestError> {
	let mut args = CanonicalParams::new();

	for (key, value) in path.iter() {
		if value.is_null() {
			continue;
		}

		let wire = value.to_wire(key)?;

		args.insert(to_lower_camel_case(key), wire.clone());
		args.insert(key.to_owned(), wire);
	}

	Ok(args)
}

#[cfg(test)]
mod tests {
	// crates.io
	use serde_json::json;
	// self
	use super::*;
	use crate::config::ClientConfig;

	const STATEMENT: EndpointDescriptor = EndpointDescriptor::get(
		"test.statement",
		"/v1/profiles/{profile_id}/balance-statements/{balance_id}/statement.json",
	)
	.required(&["currency", "intervalStart", "intervalEnd"])
	.sca_protected();
	const BALANCE: EndpointDescriptor =
		EndpointDescriptor::get("test.balance", "/v4/profiles/{profileId}/balances/{balanceId}");
	const CREATE: EndpointDescriptor = EndpointDescriptor::post("test.create", "/v1/transfers")
		.with_headers(&[("Accept", "application/json")]);

	fn resolver() -> DomainResolver {
		DomainResolver::bound(Arc::new(
			ClientConfig::builder("secret").build().expect("Configuration should build."),
		))
	}

	fn statement_call() -> Call {
		Call::new()
			.path("profile_id", 1)
			.path("balance_id", 2)
			.param("currency", "EUR")
			.param("interval_start", "2024-01-01T00:00:00Z")
			.param("interval_end", "2024-02-01T00:00:00Z")
	}

	#[test]
	fn descriptors_are_const_metadata() {
		assert_eq!(STATEMENT.id(), "test.statement");
		assert!(STATEMENT.is_sca_protected());
		assert!(!BALANCE.is_sca_protected());
		assert!(!BALANCE.is_deprecated());
		assert_eq!(STATEMENT.placeholders(), ["profile_id", "balance_id"]);

		let deprecated = BALANCE.deprecated("Use balances instead.");

		assert_eq!(deprecated.deprecation().map(|d| d.message), Some("Use balances instead."));
	}

	#[test]
	fn prepare_renders_path_query_and_headers() {
		let request =
			STATEMENT.prepare(&resolver(), &statement_call()).expect("Call should prepare.");

		assert_eq!(request.method, HttpMethod::Get);
		assert_eq!(
			request.url.path(),
			"/v1/profiles/1/balance-statements/2/statement.json"
		);
		assert_eq!(
			request.url.query(),
			Some("currency=EUR&intervalEnd=2024-02-01T00%3A00%3A00Z&intervalStart=2024-01-01T00%3A00%3A00Z")
		);
		assert_eq!(request.header("authorization"), Some("Bearer secret"));
		assert_eq!(request.header("Content-Type"), None);
		assert_eq!(request.body, None);
	}

	#[test]
	fn placeholders_accept_snake_and_camel_arguments() {
		let snake = BALANCE
			.prepare(&resolver(), &Call::new().path("profile_id", 7).path("balance_id", 9))
			.expect("Snake-case arguments should satisfy camelCase placeholders.");
		let camel = BALANCE
			.prepare(&resolver(), &Call::new().path("profileId", 7).path("balanceId", 9))
			.expect("CamelCase arguments should satisfy camelCase placeholders.");

		assert_eq!(snake.url, camel.url);
		assert_eq!(snake.url.path(), "/v4/profiles/7/balances/9");

		let camel_into_snake = STATEMENT
			.prepare(
				&resolver(),
				&statement_call().path("profileId", 3).path("profile_id", None::<u64>),
			)
			.expect("CamelCase arguments should satisfy snake_case placeholders.");

		assert!(camel_into_snake.url.path().starts_with("/v1/profiles/3/"));
	}

	#[test]
	fn path_values_are_percent_encoded_as_one_segment() {
		let request = BALANCE
			.prepare(&resolver(), &Call::new().path("profile_id", "a/b c").path("balance_id", 1))
			.expect("Call should prepare.");

		assert_eq!(request.url.path(), "/v4/profiles/a%2Fb%20c/balances/1");
	}

	#[test]
	fn missing_required_parameters_fail_before_io() {
		let call = Call::new().path("profile_id", 1).path("balance_id", 2).param("currency", "EUR");
		let err = STATEMENT.prepare(&resolver(), &call).expect_err("Interval is missing.");

		assert!(matches!(
			err,
			Error::Request(RequestError::MissingRequiredParameter {
				endpoint: "test.statement",
				ref name,
			}) if name == "intervalStart"
		));

		let absent = statement_call().param("currency", None::<String>);

		assert!(matches!(
			STATEMENT.prepare(&resolver(), &absent),
			Err(Error::Request(RequestError::MissingRequiredParameter { .. }))
		));
	}

	#[test]
	fn missing_path_parameters_are_reported() {
		let err = BALANCE
			.prepare(&resolver(), &Call::new().path("profile_id", 1))
			.expect_err("Balance id is missing.");

		assert!(matches!(
			err,
			Error::Request(RequestError::MissingPathParameter { ref name, .. }) if name == "balanceId"
		));
	}

	#[test]
	fn mutating_methods_send_json_content_type() {
		let body = json!({ "targetAccount": 1 });
		let request = CREATE
			.prepare(&resolver(), &Call::new().json(body.clone()))
			.expect("Call should prepare.");

		assert_eq!(request.header("content-type"), Some("application/json"));
		assert_eq!(request.header("Accept"), Some("application/json"));
		assert_eq!(request.body, Some(body));
		assert_eq!(request.url.query(), None);
	}

	#[test]
	fn unbound_resolver_targets_sandbox_without_credentials() {
		let request = CREATE
			.prepare(&DomainResolver::unbound(), &Call::new())
			.expect("Unbound preparation should succeed.");

		assert_eq!(request.url.as_str(), "https://api.sandbox.transferwise.tech/v1/transfers");
		assert_eq!(request.header("Authorization"), None);
	}

	#[test]
	fn base_url_prefix_is_preserved() {
		let config = ClientConfig::builder("k")
			.base_url(Url::parse("http://127.0.0.1:9000/proxy/").expect("URL fixture should parse."))
			.build()
			.expect("Loopback configuration should build.");
		let request = CREATE
			.prepare(&DomainResolver::bound(Arc::new(config)), &Call::new())
			.expect("Call should prepare.");

		assert_eq!(request.url.as_str(), "http://127.0.0.1:9000/proxy/v1/transfers");
	}
}
