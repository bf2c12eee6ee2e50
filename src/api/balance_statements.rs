//! Balance statements, released only after SCA.

// self
use crate::{
	_prelude::*,
	endpoint::{Call, EndpointDescriptor},
	error::RequestError,
	http::{ApiHttpClient, TransportErrorMapper},
	params::{ParamValue, Parameterizable},
};

/// `GET /v1/profiles/{profile_id}/balance-statements/{balance_id}/statement.json`
pub const STATEMENT: EndpointDescriptor = EndpointDescriptor::get(
	"balance_statements.statement",
	"/v1/profiles/{profile_id}/balance-statements/{balance_id}/statement.json",
)
.required(&["currency", "intervalStart", "intervalEnd"])
.sca_protected();

/// Statement layout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StatementType {
	/// One line per activity.
	#[default]
	Compact,
	/// Fees and conversions as separate lines.
	Flat,
}
impl StatementType {
	/// Returns the wire value.
	pub const fn as_str(self) -> &'static str {
		match self {
			StatementType::Compact => "COMPACT",
			StatementType::Flat => "FLAT",
		}
	}
}
impl Display for StatementType {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
impl FromStr for StatementType {
	type Err = RequestError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"COMPACT" => Ok(StatementType::Compact),
			"FLAT" => Ok(StatementType::Flat),
			_ => Err(RequestError::InvalidArgument {
				name: "type",
				reason: format!("`{s}` is not one of COMPACT, FLAT"),
			}),
		}
	}
}
impl Parameterizable for StatementType {
	fn as_parameter(&self) -> ParamValue {
		ParamValue::Str(self.as_str().into())
	}
}

/// Query of [`BalanceStatements::statement`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatementQuery {
	/// Currency of the balance.
	pub currency: String,
	/// Inclusive start, `yyyy-mm-ddThh:mm:ss.sssZ`.
	pub interval_start: String,
	/// Inclusive end, `yyyy-mm-ddThh:mm:ss.sssZ`.
	pub interval_end: String,
	/// Layout; defaults to [`StatementType::Compact`].
	pub statement_type: StatementType,
}
impl StatementQuery {
	/// Creates a compact statement query.
	pub fn new(
		currency: impl Into<String>,
		interval_start: impl Into<String>,
		interval_end: impl Into<String>,
	) -> Self {
		Self {
			currency: currency.into(),
			interval_start: interval_start.into(),
			interval_end: interval_end.into(),
			statement_type: StatementType::default(),
		}
	}

	/// Selects the layout.
	pub fn with_type(mut self, statement_type: StatementType) -> Self {
		self.statement_type = statement_type;

		self
	}
}

service!(
	/// Balance statement operations.
	BalanceStatements,
	balance_statements,
	"Balance statement operations."
);
impl<C, M> BalanceStatements<'_, C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Fetches the statement of one balance.
	///
	/// The server answers the first request with an SCA challenge unless step-up headers are
	/// cached.
	pub async fn statement<T>(
		&self,
		profile: impl Parameterizable,
		balance: impl Parameterizable,
		query: StatementQuery,
	) -> Result<T>
	where
		T: DeserializeOwned,
	{
		let call = Call::new()
			.path("profile_id", profile)
			.path("balance_id", balance)
			.param("currency", query.currency)
			.param("interval_start", query.interval_start)
			.param("interval_end", query.interval_end)
			.param("type", query.statement_type);

		self.client.call(&STATEMENT, call).await
	}
}
