//! Verification of inbound webhook deliveries.
//!
//! Wise signs every webhook body with RSA PKCS#1 v1.5 / SHA-256 and sends the base64 signature
//! in `X-Signature-SHA256`. The public key differs per environment and is published by Wise; the
//! caller supplies it as PEM.

// crates.io
use base64::{Engine, engine::general_purpose::STANDARD};
use rsa::{
	RsaPublicKey,
	pkcs1::DecodeRsaPublicKey,
	pkcs1v15::{Signature, VerifyingKey},
	pkcs8::DecodePublicKey,
	signature::Verifier,
};
use sha2::Sha256;
// self
use crate::_prelude::*;

/// Header carrying the webhook signature.
pub const SIGNATURE_HEADER: &str = "X-Signature-SHA256";

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Webhook verification failures.
#[derive(Debug, ThisError)]
pub enum WebhookError {
	/// The request carried no signature header.
	#[error("The `X-Signature-SHA256` header is missing.")]
	MissingSignatureHeader,
	/// The signature header is not valid base64 or not a signature.
	#[error("The `X-Signature-SHA256` header could not be decoded.")]
	InvalidSignatureHeader {
		/// Underlying decoding failure.
		#[source]
		source: BoxError,
	},
	/// The body is not JSON.
	#[error("Webhook body is not JSON.")]
	InvalidPayload {
		/// Underlying parsing failure.
		#[source]
		source: serde_json::Error,
	},
	/// The signature does not match the body.
	#[error("Webhook signature does not match the payload.")]
	InvalidSignature,
	/// The configured public key could not be parsed.
	#[error("Webhook public key is not a valid PEM-encoded RSA public key.")]
	InvalidPublicKey {
		/// Underlying parsing failure.
		#[source]
		source: BoxError,
	},
}

/// Checks `signature` (base64) over `payload` against `public_key_pem`.
///
/// Both SPKI (`BEGIN PUBLIC KEY`) and PKCS#1 (`BEGIN RSA PUBLIC KEY`) encodings are accepted.
pub fn verify_signature(
	payload: &[u8],
	signature: &str,
	public_key_pem: &str,
) -> Result<(), WebhookError> {
	let key = parse_public_key(public_key_pem)?;
	let raw = STANDARD
		.decode(signature.trim())
		.map_err(|e| WebhookError::InvalidSignatureHeader { source: Box::new(e) })?;
	let signature = Signature::try_from(raw.as_slice())
		.map_err(|e| WebhookError::InvalidSignatureHeader { source: Box::new(e) })?;

	VerifyingKey::<Sha256>::new(key)
		.verify(payload, &signature)
		.map_err(|_| WebhookError::InvalidSignature)
}

/// Validates a delivery: the body must be JSON and `signature_header` must verify.
pub fn validate_request(
	body: &[u8],
	signature_header: Option<&str>,
	public_key_pem: &str,
) -> Result<(), WebhookError> {
	serde_json::from_slice::<JsonValue>(body)
		.map_err(|source| WebhookError::InvalidPayload { source })?;

	let signature = signature_header.ok_or(WebhookError::MissingSignatureHeader)?;

	verify_signature(body, signature, public_key_pem)
}

fn parse_public_key(pem: &str) -> Result<RsaPublicKey, WebhookError> {
	match RsaPublicKey::from_public_key_pem(pem) {
		Ok(key) => Ok(key),
		Err(spki_err) => RsaPublicKey::from_pkcs1_pem(pem)
			.map_err(|_| WebhookError::InvalidPublicKey { source: Box::new(spki_err) }),
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	const PUBLIC_PEM: &str = include_str!("../tests/fixtures/sca_public.pem");
	const PAYLOAD: &[u8] = include_bytes!("../tests/fixtures/webhook_payload.json");
	const PAYLOAD_SIGNATURE: &str = include_str!("../tests/fixtures/webhook_payload.sig");

	#[test]
	fn fixture_signature_verifies() {
		verify_signature(PAYLOAD, PAYLOAD_SIGNATURE, PUBLIC_PEM)
			.expect("Fixture signature should verify.");
		validate_request(PAYLOAD, Some(PAYLOAD_SIGNATURE), PUBLIC_PEM)
			.expect("Fixture delivery should validate.");
	}

	#[test]
	fn tampered_payload_is_rejected() {
		let tampered = br#"{"event_type":"transfers#refund"}"#;

		assert!(matches!(
			verify_signature(tampered, PAYLOAD_SIGNATURE, PUBLIC_PEM),
			Err(WebhookError::InvalidSignature)
		));
	}

	#[test]
	fn malformed_inputs_map_to_distinct_errors() {
		assert!(matches!(
			validate_request(PAYLOAD, None, PUBLIC_PEM),
			Err(WebhookError::MissingSignatureHeader)
		));
		assert!(matches!(
			validate_request(PAYLOAD, Some("***"), PUBLIC_PEM),
			Err(WebhookError::InvalidSignatureHeader { .. })
		));
		assert!(matches!(
			validate_request(b"<xml/>", Some(PAYLOAD_SIGNATURE), PUBLIC_PEM),
			Err(WebhookError::InvalidPayload { .. })
		));
		assert!(matches!(
			verify_signature(PAYLOAD, PAYLOAD_SIGNATURE, "not a key"),
			Err(WebhookError::InvalidPublicKey { .. })
		));
	}
}
