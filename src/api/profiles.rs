//! Personal and business profiles.

// self
use crate::{
	_prelude::*,
	endpoint::{Call, EndpointDescriptor},
	http::{ApiHttpClient, TransportErrorMapper},
	params::Parameterizable,
};

/// `GET /v1/profiles`
pub const LIST: EndpointDescriptor = EndpointDescriptor::get("profiles.list", "/v1/profiles");
/// `GET /v1/profiles/{profile_id}`
pub const GET: EndpointDescriptor =
	EndpointDescriptor::get("profiles.get", "/v1/profiles/{profile_id}");

service!(
	/// Profile operations.
	Profiles,
	profiles,
	"Profile operations."
);
impl<C, M> Profiles<'_, C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Lists every profile of the authenticated user.
	pub async fn list<T>(&self) -> Result<T>
	where
		T: DeserializeOwned,
	{
		self.client.call(&LIST, Call::new()).await
	}

	/// Fetches one profile.
	pub async fn get<T>(&self, profile: impl Parameterizable) -> Result<T>
	where
		T: DeserializeOwned,
	{
		self.client.call(&GET, Call::new().path("profile_id", profile)).await
	}
}
