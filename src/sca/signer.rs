//! RSA PKCS#1 v1.5 / SHA-256 signing of SCA challenges.

// crates.io
use base64::{Engine, engine::general_purpose::STANDARD};
use rsa::{
	RsaPrivateKey,
	pkcs1::DecodeRsaPrivateKey,
	pkcs1v15::SigningKey,
	pkcs8::DecodePrivateKey,
	signature::{SignatureEncoding, Signer},
};
use sha2::Sha256;
// self
use crate::{
	_prelude::*,
	error::ConfigError,
	sca::{Challenge, Signature},
};

/// Signs `challenge` with the PEM-encoded RSA key and returns the base64 signature.
///
/// PKCS#8 (`BEGIN PRIVATE KEY`) and PKCS#1 (`BEGIN RSA PRIVATE KEY`) encodings are accepted.
/// PKCS#1 v1.5 signatures are deterministic, so the same key and challenge always produce the
/// same output.
pub fn sign_challenge(
	challenge: &Challenge,
	private_key_pem: &[u8],
) -> Result<Signature, ConfigError> {
	let key = parse_private_key(private_key_pem)?;
	let signing_key = SigningKey::<Sha256>::new(key);
	let signature = signing_key.sign(challenge.as_str().as_bytes());

	Ok(Signature::new(STANDARD.encode(signature.to_vec())))
}

fn parse_private_key(pem: &[u8]) -> Result<RsaPrivateKey, ConfigError> {
	let text = std::str::from_utf8(pem).map_err(ConfigError::invalid_key_data)?;

	match RsaPrivateKey::from_pkcs8_pem(text) {
		Ok(key) => Ok(key),
		Err(pkcs8_err) => RsaPrivateKey::from_pkcs1_pem(text)
			.map_err(|_| ConfigError::invalid_key_data(pkcs8_err)),
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use rsa::{
		pkcs1v15::{Signature as RsaSignature, VerifyingKey},
		pkcs8::DecodePublicKey,
		signature::Verifier,
	};
	// self
	use super::*;

	const PRIVATE_PEM: &[u8] = include_bytes!("../../tests/fixtures/sca_private.pem");
	const PRIVATE_PKCS1_PEM: &[u8] = include_bytes!("../../tests/fixtures/sca_private_pkcs1.pem");
	const PUBLIC_PEM: &str = include_str!("../../tests/fixtures/sca_public.pem");
	const ABC123_SIGNATURE: &str = include_str!("../../tests/fixtures/abc123.sig");

	#[test]
	fn signature_matches_openssl_output() {
		let signature = sign_challenge(&Challenge::new("abc123"), PRIVATE_PEM)
			.expect("Fixture key should sign the challenge.");

		assert_eq!(signature.as_str(), ABC123_SIGNATURE.trim());
	}

	#[test]
	fn pkcs1_and_pkcs8_keys_sign_identically() {
		let challenge = Challenge::new("7fa8c832-b8b5-4757-9c24-e952119999f2");
		let pkcs8 = sign_challenge(&challenge, PRIVATE_PEM).expect("PKCS#8 key should sign.");
		let pkcs1 = sign_challenge(&challenge, PRIVATE_PKCS1_PEM).expect("PKCS#1 key should sign.");

		assert_eq!(pkcs8, pkcs1);
	}

	#[test]
	fn signature_verifies_with_public_key() {
		let challenge = Challenge::new("7fa8c832-b8b5-4757-9c24-e952119999f2");
		let signature = sign_challenge(&challenge, PRIVATE_PEM).expect("Fixture key should sign.");
		let raw = STANDARD.decode(signature.as_str()).expect("Signature should be valid base64.");
		let public = rsa::RsaPublicKey::from_public_key_pem(PUBLIC_PEM)
			.expect("Fixture public key should parse.");
		let verifying_key = VerifyingKey::<Sha256>::new(public);
		let parsed = RsaSignature::try_from(raw.as_slice()).expect("Signature bytes should parse.");

		verifying_key
			.verify(challenge.as_str().as_bytes(), &parsed)
			.expect("Signature should verify against the public key.");
	}

	#[test]
	fn garbage_key_data_is_rejected() {
		let err = sign_challenge(&Challenge::new("abc123"), b"not a key")
			.expect_err("Garbage bytes should not parse as a key.");

		assert!(matches!(err, ConfigError::InvalidKeyData { .. }));

		let err = sign_challenge(&Challenge::new("abc123"), PUBLIC_PEM.as_bytes())
			.expect_err("A public key cannot sign.");

		assert!(matches!(err, ConfigError::InvalidKeyData { .. }));
	}
}
