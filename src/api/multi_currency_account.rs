//! Multi-currency account.

// self
use crate::{
	_prelude::*,
	endpoint::{Call, EndpointDescriptor},
	http::{ApiHttpClient, TransportErrorMapper},
	params::Parameterizable,
};

/// `GET /v4/profiles/{profile_id}/multi-currency-account`
pub const GET: EndpointDescriptor = EndpointDescriptor::get(
	"multi_currency_account.get",
	"/v4/profiles/{profile_id}/multi-currency-account",
);
/// `GET /v2/borderless-accounts-configuration/profiles/{profile_id}/available-currencies`
pub const AVAILABLE_CURRENCIES: EndpointDescriptor = EndpointDescriptor::get(
	"multi_currency_account.available_currencies",
	"/v2/borderless-accounts-configuration/profiles/{profile_id}/available-currencies",
);

service!(
	/// Multi-currency account operations.
	MultiCurrencyAccount,
	multi_currency_account,
	"Multi-currency account operations."
);
impl<C, M> MultiCurrencyAccount<'_, C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Fetches the account of a profile.
	pub async fn get<T>(&self, profile: impl Parameterizable) -> Result<T>
	where
		T: DeserializeOwned,
	{
		self.client.call(&GET, Call::new().path("profile_id", profile)).await
	}

	/// Lists currencies a balance can be opened in.
	pub async fn available_currencies<T>(&self, profile: impl Parameterizable) -> Result<T>
	where
		T: DeserializeOwned,
	{
		self.client.call(&AVAILABLE_CURRENCIES, Call::new().path("profile_id", profile)).await
	}
}
