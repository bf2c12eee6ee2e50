//! Quotes lock an exchange rate for a future transfer.

// self
use crate::{
	_prelude::*,
	endpoint::{Call, EndpointDescriptor},
	http::{ApiHttpClient, TransportErrorMapper},
	params::Parameterizable,
};

/// `POST /v3/profiles/{profile_id}/quotes`
pub const CREATE: EndpointDescriptor =
	EndpointDescriptor::post("quotes.create", "/v3/profiles/{profile_id}/quotes");
/// `POST /v3/quotes`
pub const CREATE_UNAUTHENTICATED: EndpointDescriptor =
	EndpointDescriptor::post("quotes.create_unauthenticated", "/v3/quotes");
/// `GET /v3/profiles/{profile_id}/quotes/{quote_id}`
pub const GET: EndpointDescriptor =
	EndpointDescriptor::get("quotes.get", "/v3/profiles/{profile_id}/quotes/{quote_id}");

service!(
	/// Quote operations.
	Quotes,
	quotes,
	"Quote operations."
);
impl<C, M> Quotes<'_, C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Creates an authenticated quote usable for a transfer.
	pub async fn create<T>(&self, profile: impl Parameterizable, quote: JsonValue) -> Result<T>
	where
		T: DeserializeOwned,
	{
		self.client.call(&CREATE, Call::new().path("profile_id", profile).json(quote)).await
	}

	/// Creates an example quote; the result cannot be used for a transfer.
	pub async fn create_unauthenticated<T>(&self, quote: JsonValue) -> Result<T>
	where
		T: DeserializeOwned,
	{
		self.client.call(&CREATE_UNAUTHENTICATED, Call::new().json(quote)).await
	}

	/// Fetches a quote.
	pub async fn get<T>(
		&self,
		profile: impl Parameterizable,
		quote: impl Parameterizable,
	) -> Result<T>
	where
		T: DeserializeOwned,
	{
		self.client
			.call(&GET, Call::new().path("profile_id", profile).path("quote_id", quote))
			.await
	}
}
