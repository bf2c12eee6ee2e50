// crates.io
use httpmock::prelude::*;
use serde_json::json;
// self
use wise_api_client::{
	_preludet::*,
	api::StatementQuery,
	error::ConfigError,
};

const PRIVATE_PEM: &[u8] = include_bytes!("fixtures/sca_private.pem");
const PRIVATE_PKCS1_PEM: &[u8] = include_bytes!("fixtures/sca_private_pkcs1.pem");
const ABC123_SIGNATURE: &str = include_str!("fixtures/abc123.sig");
const STATEMENT_PATH: &str = "/v1/profiles/0/balance-statements/1/statement.json";

fn statement_query() -> StatementQuery {
	StatementQuery::new("EUR", "2024-01-01T00:00:00.000Z", "2024-02-01T00:00:00.000Z")
}

async fn mock_challenge(server: &MockServer) -> httpmock::Mock<'_> {
	server
		.mock_async(|when, then| {
			when.method(GET).path(STATEMENT_PATH).header_missing("X-Signature");
			then.status(403)
				.header("X-2FA-Approval-Result", "REJECTED")
				.header("X-2FA-Approval", "abc123");
		})
		.await
}

async fn mock_signed(server: &MockServer) -> httpmock::Mock<'_> {
	server
		.mock_async(|when, then| {
			when.method(GET)
				.path(STATEMENT_PATH)
				.query_param("currency", "EUR")
				.query_param("intervalStart", "2024-01-01T00:00:00.000Z")
				.query_param("intervalEnd", "2024-02-01T00:00:00.000Z")
				.query_param("type", "COMPACT")
				.header("X-2FA-Approval", "abc123")
				.header("X-Signature", ABC123_SIGNATURE.trim());
			then.status(200)
				.header("content-type", "application/json")
				.body(r#"{"transactions":[]}"#);
		})
		.await
}

#[tokio::test]
async fn statement_challenge_is_signed_and_retried() {
	let server = MockServer::start_async().await;
	let client = build_reqwest_test_client(test_config(&server.base_url(), Some(PRIVATE_PEM)));
	let challenge = mock_challenge(&server).await;
	let signed = mock_signed(&server).await;
	let body: JsonValue = client
		.balance_statements()
		.statement(0, 1, statement_query())
		.await
		.expect("Step-up should release the statement.");

	assert_eq!(body, json!({ "transactions": [] }));

	challenge.assert_calls_async(1).await;
	signed.assert_calls_async(1).await;
}

#[tokio::test]
async fn cached_step_up_headers_skip_the_challenge() {
	let server = MockServer::start_async().await;
	let client = build_reqwest_test_client(test_config(&server.base_url(), Some(PRIVATE_PEM)));
	let challenge = mock_challenge(&server).await;
	let signed = mock_signed(&server).await;

	for _ in 0..2 {
		let _: JsonValue = client
			.balance_statements()
			.statement(0, 1, statement_query())
			.await
			.expect("Statement call should succeed.");
	}

	challenge.assert_calls_async(1).await;
	signed.assert_calls_async(2).await;
	assert_eq!(client.step_up_cache().len(), 1);
}

#[tokio::test]
async fn pkcs1_keys_answer_challenges() {
	let server = MockServer::start_async().await;
	let client =
		build_reqwest_test_client(test_config(&server.base_url(), Some(PRIVATE_PKCS1_PEM)));
	let challenge = mock_challenge(&server).await;
	let signed = mock_signed(&server).await;
	let _: JsonValue = client
		.balance_statements()
		.statement(0, 1, statement_query())
		.await
		.expect("PKCS#1 keys should sign the same way.");

	challenge.assert_calls_async(1).await;
	signed.assert_calls_async(1).await;
}

#[tokio::test]
async fn missing_private_key_fails_after_one_request() {
	let server = MockServer::start_async().await;
	let client = build_reqwest_test_client(test_config(&server.base_url(), None));
	let challenge = mock_challenge(&server).await;
	let signed = mock_signed(&server).await;
	let err = client
		.balance_statements()
		.statement::<JsonValue>(0, 1, statement_query())
		.await
		.expect_err("A challenge without a key should fail.");

	assert!(matches!(
		err,
		Error::Config(ConfigError::MissingPrivateKey { endpoint: "balance_statements.statement" })
	));

	challenge.assert_calls_async(1).await;
	signed.assert_calls_async(0).await;
}

#[tokio::test]
async fn invalid_key_data_surfaces_at_signing_time() {
	let server = MockServer::start_async().await;
	let client =
		build_reqwest_test_client(test_config(&server.base_url(), Some(b"not a pem".as_slice())));
	let challenge = mock_challenge(&server).await;
	let err = client
		.balance_statements()
		.statement::<JsonValue>(0, 1, statement_query())
		.await
		.expect_err("Garbage key data cannot sign.");

	assert!(matches!(err, Error::Config(ConfigError::InvalidKeyData { .. })));

	challenge.assert_calls_async(1).await;
}

#[tokio::test]
async fn funding_steps_up_with_the_same_body() {
	let server = MockServer::start_async().await;
	let client = build_reqwest_test_client(test_config(&server.base_url(), Some(PRIVATE_PEM)));
	let path = "/v3/profiles/3/transfers/9/payments";
	let challenge = server
		.mock_async(|when, then| {
			when.method(POST).path(path).header_missing("X-Signature");
			then.status(403)
				.header("X-2FA-Approval-Result", "REJECTED")
				.header("X-2FA-Approval", "abc123");
		})
		.await;
	let signed = server
		.mock_async(|when, then| {
			when.method(POST)
				.path(path)
				.header("X-Signature", ABC123_SIGNATURE.trim())
				.json_body(json!({ "type": "BALANCE" }));
			then.status(200)
				.header("content-type", "application/json")
				.body(r#"{"type":"BALANCE","status":"COMPLETED","errorCode":null}"#);
		})
		.await;
	let payment: JsonValue =
		client.transfers().fund(3, 9, None).await.expect("Funding should succeed after step-up.");

	assert_eq!(payment["status"], "COMPLETED");

	challenge.assert_calls_async(1).await;
	signed.assert_calls_async(1).await;
}

#[tokio::test]
async fn plain_endpoints_treat_challenges_as_failures() {
	let server = MockServer::start_async().await;
	let client = build_reqwest_test_client(test_config(&server.base_url(), Some(PRIVATE_PEM)));
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/v1/me");
			then.status(403)
				.header("X-2FA-Approval-Result", "REJECTED")
				.header("X-2FA-Approval", "abc123");
		})
		.await;
	let err =
		client.users().me::<JsonValue>().await.expect_err("No step-up outside SCA endpoints.");

	assert_eq!(err.as_api_error().map(|e| e.status), Some(403));
	assert!(client.step_up_cache().is_empty());

	mock.assert_calls_async(1).await;
}
