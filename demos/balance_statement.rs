//! Fetches a balance statement from a mock Wise server that demands SCA, letting the client sign
//! the challenge with a local key and retry.

// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
use serde_json::Value;
use url::Url;
// self
use wise_api_client::{
	api::{StatementQuery, StatementType},
	client::ReqwestApiClient,
	config::{ClientConfig, Environment},
};

const PRIVATE_KEY: &[u8] = include_bytes!("../tests/fixtures/sca_private.pem");
const STATEMENT_PATH: &str = "/v1/profiles/42/balance-statements/7/statement.json";

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let challenge_mock = server
		.mock_async(|when, then| {
			when.method(GET).path(STATEMENT_PATH).header_missing("X-2FA-Approval");
			then.status(403)
				.header("X-2FA-Approval-Result", "REJECTED")
				.header("X-2FA-Approval", "abc123");
		})
		.await;
	let statement_mock = server
		.mock_async(|when, then| {
			when.method(GET)
				.path(STATEMENT_PATH)
				.header("X-2FA-Approval", "abc123")
				.header_exists("X-Signature")
				.query_param("type", "FLAT");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"transactions\":[],\"endOfStatementBalance\":{\"value\":10.5}}");
		})
		.await;
	let config = ClientConfig::builder("demo-api-key")
		.environment(Environment::Sandbox)
		.base_url(Url::parse(&server.base_url())?)
		.private_key_pem(PRIVATE_KEY)
		.build()?;
	let client = ReqwestApiClient::new(config);
	let query = StatementQuery::new("EUR", "2024-01-01T00:00:00.000Z", "2024-02-01T00:00:00.000Z")
		.with_type(StatementType::Flat);
	let statement: Value = client.balance_statements().statement(42, 7, query).await?;

	println!("End of statement balance: {}.", statement["endOfStatementBalance"]["value"]);
	println!("Cached step-up entries: {}.", client.step_up_cache().len());

	challenge_mock.assert_async().await;
	statement_mock.assert_async().await;

	Ok(())
}
