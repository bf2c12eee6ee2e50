//! Transfers: listing, creation, requirements, and SCA-protected funding.

// crates.io
use serde_json::json;
// self
use crate::{
	_prelude::*,
	endpoint::{Call, EndpointDescriptor},
	http::{ApiHttpClient, TransportErrorMapper},
	params::{Parameterizable, Params},
};

/// `GET /v1/transfers`
pub const LIST: EndpointDescriptor = EndpointDescriptor::get("transfers.list", "/v1/transfers");
/// `GET /v1/transfers/{transfer_id}`
pub const GET: EndpointDescriptor =
	EndpointDescriptor::get("transfers.get", "/v1/transfers/{transfer_id}");
/// `POST /v1/transfers`
pub const CREATE: EndpointDescriptor =
	EndpointDescriptor::post("transfers.create", "/v1/transfers");
/// `POST /v1/transfer-requirements`
pub const REQUIREMENTS: EndpointDescriptor =
	EndpointDescriptor::post("transfers.requirements", "/v1/transfer-requirements");
/// `POST /v3/profiles/{profile_id}/transfers/{transfer_id}/payments`
pub const FUND: EndpointDescriptor = EndpointDescriptor::post(
	"transfers.fund",
	"/v3/profiles/{profile_id}/transfers/{transfer_id}/payments",
)
.sca_protected();

/// Filters accepted by [`Transfers::list`]; unset fields are not sent.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TransferQuery {
	/// Profile owning the transfers; defaults to the user's current profile.
	pub profile_id: Option<u64>,
	/// Comma separated status codes.
	pub status: Option<String>,
	/// Starting record number (a multiple of `limit`).
	pub offset: Option<u64>,
	/// Maximum number of records.
	pub limit: Option<u64>,
	/// Inclusive lower bound, `yyyy-mm-ddThh:mm:ss.sssZ`.
	pub created_date_start: Option<String>,
	/// Inclusive upper bound, `yyyy-mm-ddThh:mm:ss.sssZ`.
	pub created_date_end: Option<String>,
	/// Target currency code.
	pub target_currency: Option<String>,
	/// Source currency code.
	pub source_currency: Option<String>,
}
impl From<TransferQuery> for Params {
	fn from(query: TransferQuery) -> Self {
		Params::new()
			.insert("profile_id", query.profile_id)
			.insert("status", query.status)
			.insert("offset", query.offset)
			.insert("limit", query.limit)
			.insert("created_date_start", query.created_date_start)
			.insert("created_date_end", query.created_date_end)
			.insert("target_currency", query.target_currency)
			.insert("source_currency", query.source_currency)
	}
}

service!(
	/// Transfer operations.
	Transfers,
	transfers,
	"Transfer operations."
);
impl<C, M> Transfers<'_, C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Lists transfers matching `query`.
	pub async fn list<T>(&self, query: TransferQuery) -> Result<T>
	where
		T: DeserializeOwned,
	{
		self.client.call(&LIST, Call::new().params(query.into())).await
	}

	/// Fetches one transfer.
	pub async fn get<T>(&self, transfer: impl Parameterizable) -> Result<T>
	where
		T: DeserializeOwned,
	{
		self.client.call(&GET, Call::new().path("transfer_id", transfer)).await
	}

	/// Creates a transfer from a quote and a recipient.
	pub async fn create<T>(&self, transfer: JsonValue) -> Result<T>
	where
		T: DeserializeOwned,
	{
		self.client.call(&CREATE, Call::new().json(transfer)).await
	}

	/// Returns the extra fields a transfer needs.
	pub async fn requirements<T>(&self, transfer: JsonValue) -> Result<T>
	where
		T: DeserializeOwned,
	{
		self.client.call(&REQUIREMENTS, Call::new().json(transfer)).await
	}

	/// Pays for a transfer; without `payment` the multi-currency balance is used.
	///
	/// The server may demand SCA, in which case a private key must be configured.
	pub async fn fund<T>(
		&self,
		profile: impl Parameterizable,
		transfer: impl Parameterizable,
		payment: Option<JsonValue>,
	) -> Result<T>
	where
		T: DeserializeOwned,
	{
		let payment = payment.unwrap_or_else(|| json!({ "type": "BALANCE" }));
		let call = Call::new()
			.path("profile_id", profile)
			.path("transfer_id", transfer)
			.json(payment);

		self.client.call(&FUND, call).await
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::params::CanonicalParams;

	#[test]
	fn query_renames_and_drops_unset_fields() {
		let query = TransferQuery {
			profile_id: Some(42),
			created_date_start: Some("2024-01-01T00:00:00.000Z".into()),
			limit: Some(0),
			..Default::default()
		};
		let canonical = Params::from(query).canonicalize().expect("Query should canonicalize.");

		assert_eq!(
			canonical,
			CanonicalParams::from([
				("profileId".into(), "42".into()),
				("createdDateStart".into(), "2024-01-01T00:00:00.000Z".into()),
				("limit".into(), "0".into()),
			])
		);
	}

	#[test]
	fn fund_is_sca_protected() {
		assert!(FUND.is_sca_protected());
		assert!(!CREATE.is_sca_protected());
		assert_eq!(FUND.placeholders(), ["profile_id", "transfer_id"]);
	}
}
