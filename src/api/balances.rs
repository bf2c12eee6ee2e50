//! Balances of a multi-currency account.

// self
use crate::{
	_prelude::*,
	endpoint::{Call, EndpointDescriptor},
	http::{ApiHttpClient, TransportErrorMapper},
	params::Parameterizable,
};

/// `GET /v4/profiles/{profileId}/balances`; `types` is required.
pub const LIST: EndpointDescriptor =
	EndpointDescriptor::get("balances.list", "/v4/profiles/{profileId}/balances")
		.required(&["types"]);
/// `GET /v4/profiles/{profileId}/balances/{balanceId}`
pub const GET: EndpointDescriptor =
	EndpointDescriptor::get("balances.get", "/v4/profiles/{profileId}/balances/{balanceId}");

service!(
	/// Balance operations.
	Balances,
	balances,
	"Balance operations."
);
impl<C, M> Balances<'_, C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Lists balances of `types` (`STANDARD`, `SAVINGS`, or a list of both).
	pub async fn list<T>(
		&self,
		profile: impl Parameterizable,
		types: impl Parameterizable,
	) -> Result<T>
	where
		T: DeserializeOwned,
	{
		let call = Call::new().path("profile_id", profile).param("types", types);

		self.client.call(&LIST, call).await
	}

	/// Fetches one balance.
	pub async fn get<T>(
		&self,
		profile: impl Parameterizable,
		balance: impl Parameterizable,
	) -> Result<T>
	where
		T: DeserializeOwned,
	{
		self.client
			.call(&GET, Call::new().path("profile_id", profile).path("balance_id", balance))
			.await
	}
}
