//! Recipient accounts: listing with seek pagination, creation, and account requirements.

// self
use crate::{
	_prelude::*,
	endpoint::{Call, EndpointDescriptor},
	error::RequestError,
	http::{ApiHttpClient, TransportErrorMapper},
	params::{ParamValue, Parameterizable, Params},
};

/// Largest page the list endpoint serves.
pub const MAXIMUM_PAGE_SIZE: u64 = 20;

const ACCEPT_MINOR_VERSION_1: &[(&str, &str)] = &[("Accept-Minor-Version", "1")];

/// `GET /v2/accounts`
pub const LIST: EndpointDescriptor =
	EndpointDescriptor::get("recipient_accounts.list", "/v2/accounts");
/// `POST /v1/accounts`
pub const CREATE: EndpointDescriptor =
	EndpointDescriptor::post("recipient_accounts.create", "/v1/accounts");
/// `GET /v2/accounts/{account_id}`
pub const GET: EndpointDescriptor =
	EndpointDescriptor::get("recipient_accounts.get", "/v2/accounts/{account_id}");
/// `GET /v1/quotes/{quote_id}/account-requirements`
pub const QUOTE_REQUIREMENTS: EndpointDescriptor = EndpointDescriptor::get(
	"recipient_accounts.quote_requirements",
	"/v1/quotes/{quote_id}/account-requirements",
)
.with_headers(ACCEPT_MINOR_VERSION_1);
/// `GET /v1/account-requirements`
pub const REQUIREMENTS: EndpointDescriptor =
	EndpointDescriptor::get("recipient_accounts.requirements", "/v1/account-requirements")
		.required(&["source", "target", "sourceAmount"])
		.with_headers(ACCEPT_MINOR_VERSION_1);

/// Sort order for [`RecipientAccounts::list`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AccountSort {
	/// Ascending account id.
	#[default]
	IdAsc,
	/// Descending account id.
	IdDesc,
	/// Ascending currency.
	CurrencyAsc,
	/// Descending currency.
	CurrencyDesc,
}
impl AccountSort {
	/// Returns the wire value.
	pub const fn as_str(self) -> &'static str {
		match self {
			AccountSort::IdAsc => "id,asc",
			AccountSort::IdDesc => "id,desc",
			AccountSort::CurrencyAsc => "currency,asc",
			AccountSort::CurrencyDesc => "currency,desc",
		}
	}
}
impl FromStr for AccountSort {
	type Err = RequestError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		[Self::IdAsc, Self::IdDesc, Self::CurrencyAsc, Self::CurrencyDesc]
			.into_iter()
			.find(|sort| sort.as_str() == s)
			.ok_or_else(|| RequestError::InvalidArgument {
				name: "sort",
				reason: format!("`{s}` is not a known sort order"),
			})
	}
}
impl Parameterizable for AccountSort {
	fn as_parameter(&self) -> ParamValue {
		ParamValue::Str(self.as_str().into())
	}
}

/// Filters accepted by [`RecipientAccounts::list`]; unset fields are not sent.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AccountQuery {
	/// Only accounts owned by this profile.
	pub profile_id: Option<u64>,
	/// Account currency.
	pub currency: Option<String>,
	/// Page size, at most [`MAXIMUM_PAGE_SIZE`].
	pub size: Option<u64>,
	/// Account id the page starts from.
	pub seek_position: Option<u64>,
	/// Sort order.
	pub sort: Option<AccountSort>,
	/// Creator of the account.
	pub creator_id: Option<u64>,
	/// Whether the account is active; the server defaults to `true`.
	pub active: Option<bool>,
	/// Account types, e.g. `iban,swift_code`.
	pub account_type: Option<String>,
	/// Only accounts owned (or not owned) by the customer.
	pub owned_by_customer: Option<bool>,
}
impl From<AccountQuery> for Params {
	fn from(query: AccountQuery) -> Self {
		Params::new()
			.insert("profile_id", query.profile_id)
			.insert("currency", query.currency)
			.insert("size", query.size)
			.insert("seek_position", query.seek_position)
			.insert("sort", query.sort)
			.insert("creator_id", query.creator_id)
			.insert("active", query.active)
			.insert("type", query.account_type)
			.insert("owned_by_customer", query.owned_by_customer)
	}
}

#[derive(Deserialize)]
struct AccountPage {
	content: Vec<JsonValue>,
}

service!(
	/// Recipient account operations.
	RecipientAccounts,
	recipient_accounts,
	"Recipient account operations."
);
impl<C, M> RecipientAccounts<'_, C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Lists one page of recipient accounts.
	pub async fn list<T>(&self, query: AccountQuery) -> Result<T>
	where
		T: DeserializeOwned,
	{
		self.client.call(&LIST, Call::new().params(query.into())).await
	}

	/// Collects every recipient account by following the seek position page by page.
	///
	/// `page_size` is clamped to `1..=MAXIMUM_PAGE_SIZE`. Paging stops at the first short page
	/// or at an entry without a numeric `id`.
	pub async fn all(
		&self,
		profile_id: Option<u64>,
		sort: AccountSort,
		page_size: u64,
	) -> Result<Vec<JsonValue>> {
		let size = page_size.clamp(1, MAXIMUM_PAGE_SIZE);
		let mut accounts = Vec::new();
		let mut seek_position = None;

		loop {
			let query = AccountQuery {
				profile_id,
				size: Some(size),
				seek_position,
				sort: Some(sort),
				..Default::default()
			};
			let page: AccountPage = self.list(query).await?;
			let full = page.content.len() as u64 >= size;

			seek_position = page.content.last().and_then(|last| last.get("id")?.as_u64());
			accounts.extend(page.content);

			if !full || seek_position.is_none() {
				break;
			}
		}

		Ok(accounts)
	}

	/// Fetches one recipient account.
	pub async fn get<T>(&self, account: impl Parameterizable) -> Result<T>
	where
		T: DeserializeOwned,
	{
		self.client.call(&GET, Call::new().path("account_id", account)).await
	}

	/// Creates a recipient account.
	pub async fn create<T>(&self, account: JsonValue) -> Result<T>
	where
		T: DeserializeOwned,
	{
		self.client.call(&CREATE, Call::new().json(account)).await
	}

	/// Returns the fields a recipient account needs for the given quote.
	pub async fn quote_requirements<T>(&self, quote: impl Parameterizable) -> Result<T>
	where
		T: DeserializeOwned,
	{
		self.client.call(&QUOTE_REQUIREMENTS, Call::new().path("quote_id", quote)).await
	}

	/// Returns the fields a recipient account needs for a currency route and amount.
	pub async fn requirements<T>(
		&self,
		source: impl Parameterizable,
		target: impl Parameterizable,
		source_amount: impl Parameterizable,
	) -> Result<T>
	where
		T: DeserializeOwned,
	{
		let call = Call::new()
			.param("source", source)
			.param("target", target)
			.param("source_amount", source_amount);

		self.client.call(&REQUIREMENTS, call).await
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::params::CanonicalParams;

	#[test]
	fn sort_orders_round_trip_through_wire_values() {
		assert_eq!("currency,desc".parse::<AccountSort>(), Ok(AccountSort::CurrencyDesc));
		assert!(matches!(
			"id".parse::<AccountSort>(),
			Err(RequestError::InvalidArgument { name: "sort", .. })
		));
	}

	#[test]
	fn query_uses_wire_names() {
		let query = AccountQuery {
			profile_id: Some(7),
			seek_position: Some(120),
			sort: Some(AccountSort::IdDesc),
			account_type: Some("iban,swift_code".into()),
			owned_by_customer: Some(false),
			..Default::default()
		};
		let canonical = Params::from(query).canonicalize().expect("Query should canonicalize.");

		assert_eq!(
			canonical,
			CanonicalParams::from([
				("profileId".into(), "7".into()),
				("seekPosition".into(), "120".into()),
				("sort".into(), "id,desc".into()),
				("type".into(), "iban,swift_code".into()),
				("ownedByCustomer".into(), "false".into()),
			])
		);
	}

	#[test]
	fn requirement_endpoints_pin_the_minor_version() {
		assert_eq!(REQUIREMENTS.headers(), [("Accept-Minor-Version", "1")]);
		assert_eq!(QUOTE_REQUIREMENTS.headers(), [("Accept-Minor-Version", "1")]);
		assert_eq!(REQUIREMENTS.required_params(), ["source", "target", "sourceAmount"]);
		assert!(LIST.headers().is_empty());
	}
}
