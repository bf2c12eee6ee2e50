//! Borderless accounts, superseded by account details and balance statements.

// self
use crate::{
	_prelude::*,
	endpoint::{Call, EndpointDescriptor},
	http::{ApiHttpClient, TransportErrorMapper},
	params::Parameterizable,
};

/// `GET /v1/borderless-accounts?profileId=`
pub const LIST: EndpointDescriptor =
	EndpointDescriptor::get("borderless_accounts.list", "/v1/borderless-accounts")
		.required(&["profileId"])
		.deprecated("The borderless-accounts endpoint is deprecated; use account-details instead.");
/// `GET /v3/profiles/{profile_id}/borderless-accounts/{account_id}/statement.json`
pub const STATEMENT: EndpointDescriptor = EndpointDescriptor::get(
	"borderless_accounts.statement",
	"/v3/profiles/{profile_id}/borderless-accounts/{account_id}/statement.json",
)
.required(&["currency", "intervalStart", "intervalEnd"])
.sca_protected()
.deprecated(
	"The borderless-accounts statement endpoint is deprecated; use balance-statements instead.",
);

service!(
	/// Deprecated borderless account operations.
	BorderlessAccounts,
	borderless_accounts,
	"Deprecated borderless account operations."
);
impl<C, M> BorderlessAccounts<'_, C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Lists the borderless accounts of a profile.
	#[deprecated(note = "The borderless-accounts endpoint is deprecated; use account-details instead.")]
	pub async fn list<T>(&self, profile: impl Parameterizable) -> Result<T>
	where
		T: DeserializeOwned,
	{
		self.client.call(&LIST, Call::new().param("profile_id", profile)).await
	}

	/// Fetches an account statement over `[interval_start, interval_end]`.
	#[deprecated(
		note = "The borderless-accounts statement endpoint is deprecated; use balance-statements instead."
	)]
	pub async fn statement<T>(
		&self,
		profile: impl Parameterizable,
		account: impl Parameterizable,
		currency: impl Parameterizable,
		interval_start: impl Parameterizable,
		interval_end: impl Parameterizable,
	) -> Result<T>
	where
		T: DeserializeOwned,
	{
		let call = Call::new()
			.path("profile_id", profile)
			.path("account_id", account)
			.param("currency", currency)
			.param("interval_start", interval_start)
			.param("interval_end", interval_end);

		self.client.call(&STATEMENT, call).await
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn descriptors_carry_deprecation() {
		assert!(LIST.is_deprecated());
		assert!(STATEMENT.is_deprecated());
		assert!(STATEMENT.is_sca_protected());
		assert!(
			LIST.deprecation().is_some_and(|deprecation| deprecation.message.contains("account-details"))
		);
	}
}
