//! Sandbox-only transfer state simulation.
//!
//! Each step moves a transfer one state further: `incoming_payment_waiting` → `processing` →
//! `funds_converted` → `outgoing_payment_sent` → `bounced_back` → `funds_refunded`.

// self
use crate::{
	_prelude::*,
	config::Environment,
	endpoint::{Call, EndpointDescriptor},
	error::RequestError,
	http::{ApiHttpClient, TransportErrorMapper},
	params::Parameterizable,
};

/// `GET /v1/simulation/transfers/{transfer_id}/processing`
pub const PROCESSING: EndpointDescriptor = EndpointDescriptor::get(
	"simulation.processing",
	"/v1/simulation/transfers/{transfer_id}/processing",
);
/// `GET /v1/simulation/transfers/{transfer_id}/funds_converted`
pub const FUNDS_CONVERTED: EndpointDescriptor = EndpointDescriptor::get(
	"simulation.funds_converted",
	"/v1/simulation/transfers/{transfer_id}/funds_converted",
);
/// `GET /v1/simulation/transfers/{transfer_id}/outgoing_payment_sent`
pub const OUTGOING_PAYMENT_SENT: EndpointDescriptor = EndpointDescriptor::get(
	"simulation.outgoing_payment_sent",
	"/v1/simulation/transfers/{transfer_id}/outgoing_payment_sent",
);
/// `GET /v1/simulation/transfers/{transfer_id}/bounced_back`
pub const BOUNCED_BACK: EndpointDescriptor = EndpointDescriptor::get(
	"simulation.bounced_back",
	"/v1/simulation/transfers/{transfer_id}/bounced_back",
);
/// `GET /v1/simulation/transfers/{transfer_id}/funds_refunded`
pub const FUNDS_REFUNDED: EndpointDescriptor = EndpointDescriptor::get(
	"simulation.funds_refunded",
	"/v1/simulation/transfers/{transfer_id}/funds_refunded",
);

/// Target state of a simulated transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimulationStep {
	/// `incoming_payment_waiting` → `processing`.
	Processing,
	/// `processing` → `funds_converted`.
	FundsConverted,
	/// `funds_converted` → `outgoing_payment_sent`.
	OutgoingPaymentSent,
	/// `outgoing_payment_sent` → `bounced_back`.
	BouncedBack,
	/// `bounced_back` → `funds_refunded`; does not trigger a refund webhook.
	FundsRefunded,
}
impl SimulationStep {
	/// Returns the descriptor driving this step.
	pub const fn descriptor(self) -> &'static EndpointDescriptor {
		match self {
			SimulationStep::Processing => &PROCESSING,
			SimulationStep::FundsConverted => &FUNDS_CONVERTED,
			SimulationStep::OutgoingPaymentSent => &OUTGOING_PAYMENT_SENT,
			SimulationStep::BouncedBack => &BOUNCED_BACK,
			SimulationStep::FundsRefunded => &FUNDS_REFUNDED,
		}
	}
}
impl FromStr for SimulationStep {
	type Err = RequestError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"processing" => Ok(SimulationStep::Processing),
			"funds_converted" => Ok(SimulationStep::FundsConverted),
			"outgoing_payment_sent" => Ok(SimulationStep::OutgoingPaymentSent),
			"bounced_back" => Ok(SimulationStep::BouncedBack),
			"funds_refunded" => Ok(SimulationStep::FundsRefunded),
			_ => Err(RequestError::InvalidArgument {
				name: "status",
				reason: format!("a transfer cannot be simulated into `{s}`"),
			}),
		}
	}
}

service!(
	/// Sandbox transfer simulation.
	TransferSimulation,
	simulate_transfer,
	"Sandbox transfer simulation."
);
impl<C, M> TransferSimulation<'_, C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Moves `transfer` into the state named by `step`.
	pub async fn to<T>(&self, step: SimulationStep, transfer: impl Parameterizable) -> Result<T>
	where
		T: DeserializeOwned,
	{
		if self.client.config().environment() == Environment::Live {
			return Err(RequestError::InvalidArgument {
				name: "environment",
				reason: "transfer simulation is only available in the sandbox".into(),
			}
			.into());
		}

		self.client.call(step.descriptor(), Call::new().path("transfer_id", transfer)).await
	}

	/// `incoming_payment_waiting` → `processing`.
	pub async fn to_processing<T>(&self, transfer: impl Parameterizable) -> Result<T>
	where
		T: DeserializeOwned,
	{
		self.to(SimulationStep::Processing, transfer).await
	}

	/// `processing` → `funds_converted`.
	pub async fn to_funds_converted<T>(&self, transfer: impl Parameterizable) -> Result<T>
	where
		T: DeserializeOwned,
	{
		self.to(SimulationStep::FundsConverted, transfer).await
	}

	/// `funds_converted` → `outgoing_payment_sent`.
	pub async fn to_outgoing_payment_sent<T>(&self, transfer: impl Parameterizable) -> Result<T>
	where
		T: DeserializeOwned,
	{
		self.to(SimulationStep::OutgoingPaymentSent, transfer).await
	}

	/// `outgoing_payment_sent` → `bounced_back`.
	pub async fn to_bounced_back<T>(&self, transfer: impl Parameterizable) -> Result<T>
	where
		T: DeserializeOwned,
	{
		self.to(SimulationStep::BouncedBack, transfer).await
	}

	/// `bounced_back` → `funds_refunded`.
	pub async fn to_funds_refunded<T>(&self, transfer: impl Parameterizable) -> Result<T>
	where
		T: DeserializeOwned,
	{
		self.to(SimulationStep::FundsRefunded, transfer).await
	}
}
