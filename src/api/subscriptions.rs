//! Webhook subscriptions registered on a profile.

// self
use crate::{
	_prelude::*,
	endpoint::{Call, EndpointDescriptor},
	http::{ApiHttpClient, TransportErrorMapper},
	params::Parameterizable,
};

/// `GET /v3/profiles/{profile_id}/subscriptions`
pub const LIST: EndpointDescriptor =
	EndpointDescriptor::get("subscriptions.list", "/v3/profiles/{profile_id}/subscriptions");
/// `GET /v3/profiles/{profile_id}/subscriptions/{subscription_id}`
pub const GET: EndpointDescriptor = EndpointDescriptor::get(
	"subscriptions.get",
	"/v3/profiles/{profile_id}/subscriptions/{subscription_id}",
);

service!(
	/// Webhook subscription operations.
	Subscriptions,
	subscriptions,
	"Webhook subscription operations."
);
impl<C, M> Subscriptions<'_, C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Lists the subscriptions of a profile.
	pub async fn list<T>(&self, profile: impl Parameterizable) -> Result<T>
	where
		T: DeserializeOwned,
	{
		self.client.call(&LIST, Call::new().path("profile_id", profile)).await
	}

	/// Fetches one subscription.
	pub async fn get<T>(
		&self,
		profile: impl Parameterizable,
		subscription: impl Parameterizable,
	) -> Result<T>
	where
		T: DeserializeOwned,
	{
		let call =
			Call::new().path("profile_id", profile).path("subscription_id", subscription);

		self.client.call(&GET, call).await
	}
}
