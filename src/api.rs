//! Typed resource services over the Wise endpoints.
//!
//! Each service borrows a [`Client`] and exposes one method per operation. Payloads are opaque:
//! every method is generic over the `DeserializeOwned` type the caller wants back, so
//! `serde_json::Value` works as well as a caller-defined model.
//!
//! ```no_run
//! # async fn demo() -> wise_api_client::error::Result<()> {
//! use serde_json::Value;
//! use wise_api_client::{client::Client, config::ClientConfig};
//!
//! let client = Client::new(ClientConfig::builder("api-key").build()?);
//! let profiles: Value = client.profiles().list().await?;
//! # let _ = profiles;
//! # Ok(())
//! # }
//! ```

macro_rules! service {
	($(#[$meta:meta])* $name:ident, $accessor:ident, $accessor_doc:literal) => {
		$(#[$meta])*
		pub struct $name<'a, C, M>
		where
			C: ?Sized + $crate::http::ApiHttpClient,
			M: ?Sized + $crate::http::TransportErrorMapper<C::TransportError>,
		{
			client: &'a $crate::client::Client<C, M>,
		}
		impl<C, M> $crate::client::Client<C, M>
		where
			C: ?Sized + $crate::http::ApiHttpClient,
			M: ?Sized + $crate::http::TransportErrorMapper<C::TransportError>,
		{
			#[doc = $accessor_doc]
			pub fn $accessor(&self) -> $name<'_, C, M> {
				$name { client: self }
			}
		}
		impl<C, M> Clone for $name<'_, C, M>
		where
			C: ?Sized + $crate::http::ApiHttpClient,
			M: ?Sized + $crate::http::TransportErrorMapper<C::TransportError>,
		{
			fn clone(&self) -> Self {
				Self { client: self.client }
			}
		}
		impl<C, M> std::fmt::Debug for $name<'_, C, M>
		where
			C: ?Sized + $crate::http::ApiHttpClient,
			M: ?Sized + $crate::http::TransportErrorMapper<C::TransportError>,
		{
			fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
				f.debug_tuple(stringify!($name)).field(self.client).finish()
			}
		}
	};
}

pub mod account_details;
pub mod balance_statements;
pub mod balances;
pub mod borderless_accounts;
pub mod currencies;
pub mod multi_currency_account;
pub mod profiles;
pub mod quotes;
pub mod recipient_accounts;
pub mod simulation;
pub mod subscriptions;
pub mod transfers;
pub mod users;

pub use account_details::AccountDetails;
pub use balance_statements::{BalanceStatements, StatementQuery, StatementType};
pub use balances::Balances;
pub use borderless_accounts::BorderlessAccounts;
pub use currencies::Currencies;
pub use multi_currency_account::MultiCurrencyAccount;
pub use profiles::Profiles;
pub use quotes::Quotes;
pub use recipient_accounts::{AccountQuery, AccountSort, RecipientAccounts};
pub use simulation::{SimulationStep, TransferSimulation};
pub use subscriptions::Subscriptions;
pub use transfers::{TransferQuery, Transfers};
pub use users::Users;

// crates.io
use serde_json::json;
// self
use crate::{
	_prelude::*,
	client::Client,
	http::{ApiHttpClient, TransportErrorMapper},
	params::Parameterizable,
};

impl<C, M> Client<C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Returns true when the API key can read the current user.
	///
	/// API errors (401, 403, ...) yield `false`; transport and configuration failures propagate.
	pub async fn can_read(&self) -> Result<bool> {
		match self.users().me::<JsonValue>().await {
			Ok(_) => Ok(true),
			Err(Error::Api(_)) => Ok(false),
			Err(e) => Err(e),
		}
	}

	/// Returns true when the API key may create resources on `profile`.
	///
	/// Creates a throwaway EUR to USD quote. API errors yield `false`; transport and
	/// configuration failures propagate.
	pub async fn can_write(&self, profile: impl Parameterizable) -> Result<bool> {
		let quote = json!({ "sourceCurrency": "EUR", "targetCurrency": "USD", "sourceAmount": 100 });

		match self.quotes().create::<JsonValue>(profile, quote).await {
			Ok(_) => Ok(true),
			Err(Error::Api(_)) => Ok(false),
			Err(e) => Err(e),
		}
	}

	/// Returns true when the key pair is accepted for SCA on `profile`.
	///
	/// Funds the non-existent transfer `0`: a 401 means the signature was refused, while any
	/// other API answer means authentication passed and only the transfer lookup failed.
	pub async fn can_sca(&self, profile: impl Parameterizable) -> Result<bool> {
		match self.transfers().fund::<JsonValue>(profile, 0, None).await {
			Err(Error::Api(e)) if e.status == 401 => Ok(false),
			Ok(_) | Err(Error::Api(_)) => Ok(true),
			Err(e) => Err(e),
		}
	}
}
