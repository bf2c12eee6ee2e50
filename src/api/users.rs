//! Users.

// self
use crate::{
	_prelude::*,
	endpoint::{Call, EndpointDescriptor},
	http::{ApiHttpClient, TransportErrorMapper},
	params::Parameterizable,
};

/// `GET /v1/me`
pub const ME: EndpointDescriptor = EndpointDescriptor::get("users.me", "/v1/me");
/// `GET /v1/users/{userId}`
pub const GET: EndpointDescriptor = EndpointDescriptor::get("users.get", "/v1/users/{userId}");

service!(
	/// User operations.
	Users,
	users,
	"User operations."
);
impl<C, M> Users<'_, C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Fetches the user owning the API key.
	pub async fn me<T>(&self) -> Result<T>
	where
		T: DeserializeOwned,
	{
		self.client.call(&ME, Call::new()).await
	}

	/// Fetches a user by id.
	pub async fn get<T>(&self, user: impl Parameterizable) -> Result<T>
	where
		T: DeserializeOwned,
	{
		self.client.call(&GET, Call::new().path("user_id", user)).await
	}
}
