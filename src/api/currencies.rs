//! Currencies.

// self
use crate::{
	_prelude::*,
	endpoint::{Call, EndpointDescriptor},
	http::{ApiHttpClient, TransportErrorMapper},
};

/// `GET /v1/currencies`
pub const LIST: EndpointDescriptor = EndpointDescriptor::get("currencies.list", "/v1/currencies");

service!(
	/// Supported currencies.
	Currencies,
	currencies,
	"Supported currencies."
);
impl<C, M> Currencies<'_, C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Lists every currency Wise supports.
	pub async fn list<T>(&self) -> Result<T>
	where
		T: DeserializeOwned,
	{
		self.client.call(&LIST, Call::new()).await
	}
}
