//! Account details (bank details for receiving money).

// self
use crate::{
	_prelude::*,
	endpoint::{Call, EndpointDescriptor},
	http::{ApiHttpClient, TransportErrorMapper},
	params::Parameterizable,
};

/// `GET /v1/profiles/{profile_id}/account-details`
pub const LIST: EndpointDescriptor =
	EndpointDescriptor::get("account_details.list", "/v1/profiles/{profile_id}/account-details");

service!(
	/// Bank details for receiving money.
	AccountDetails,
	account_details,
	"Bank details for receiving money."
);
impl<C, M> AccountDetails<'_, C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Lists the account details of a profile.
	pub async fn list<T>(&self, profile: impl Parameterizable) -> Result<T>
	where
		T: DeserializeOwned,
	{
		self.client.call(&LIST, Call::new().path("profile_id", profile)).await
	}
}
