//! Strong Customer Authentication (SCA) step-up primitives.
//!
//! Sensitive endpoints answer a first attempt with `403` plus
//! `X-2FA-Approval-Result: REJECTED` and a one-time token in `X-2FA-Approval`. The caller signs
//! the token with its private key and resends the request carrying `X-2FA-Approval` and
//! `X-Signature`. This module holds the pieces of that exchange:
//!
//! - [`ScaOutcome::classify`] turns a response into the coordinator's next state;
//! - [`signer::sign_challenge`] computes the signature;
//! - [`StepUpCache`] keeps solved headers per endpoint so later calls skip the challenge.
//!
//! The retry itself lives in [`Client`](crate::client::Client) dispatch: at most one step-up
//! per call.

pub mod signer;

pub use signer::*;

// self
use crate::{_prelude::*, http::ApiResponse};

/// Header carrying the challenge (response) or the solved challenge (request).
pub const APPROVAL_HEADER: &str = "X-2FA-Approval";
/// Header reporting the approval verdict.
pub const APPROVAL_RESULT_HEADER: &str = "X-2FA-Approval-Result";
/// Header carrying the base64 signature of the challenge.
pub const SIGNATURE_HEADER: &str = "X-Signature";
/// Verdict value that marks a challenge.
pub const REJECTED: &str = "REJECTED";

/// Opaque one-time token issued by the server.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Challenge(String);
impl Challenge {
	/// Wraps a server-issued token.
	pub fn new(token: impl Into<String>) -> Self {
		Self(token.into())
	}

	/// Returns the raw token.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}
impl Debug for Challenge {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "Challenge({})", self.0)
	}
}
impl Display for Challenge {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.0)
	}
}

/// Base64-encoded signature of a [`Challenge`].
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Signature(String);
impl Signature {
	/// Wraps an already encoded signature.
	pub fn new(encoded: impl Into<String>) -> Self {
		Self(encoded.into())
	}

	/// Returns the base64 text.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}
impl Debug for Signature {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "Signature({})", self.0)
	}
}

/// State reached after a response comes back.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScaOutcome {
	/// 2xx response.
	Success,
	/// 403 with a rejected approval and a challenge token.
	ChallengeIssued(Challenge),
	/// Any other non-2xx response.
	Failure,
}
impl ScaOutcome {
	/// Classifies a response.
	pub fn classify(response: &ApiResponse) -> Self {
		if response.is_success() {
			return Self::Success;
		}
		if response.status == 403
			&& response.header(APPROVAL_RESULT_HEADER).is_some_and(|value| value.trim() == REJECTED)
			&& let Some(token) = response.header(APPROVAL_HEADER).filter(|token| !token.is_empty())
		{
			return Self::ChallengeIssued(Challenge::new(token));
		}

		Self::Failure
	}
}

/// Solved step-up headers for one endpoint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StepUpHeaders {
	/// Challenge that was solved.
	pub challenge: Challenge,
	/// Signature of the challenge.
	pub signature: Signature,
	/// When the signature was computed.
	pub signed_at: OffsetDateTime,
}
impl StepUpHeaders {
	/// Creates a header set stamped with the current time.
	pub fn new(challenge: Challenge, signature: Signature) -> Self {
		Self { challenge, signature, signed_at: OffsetDateTime::now_utc() }
	}

	/// Returns true when the entry is older than `ttl` at `now`.
	pub fn is_stale_at(&self, ttl: Option<Duration>, now: OffsetDateTime) -> bool {
		ttl.is_some_and(|ttl| now - self.signed_at >= ttl)
	}

	/// Writes the headers into an outgoing header map.
	pub fn apply(&self, headers: &mut BTreeMap<String, String>) {
		headers.insert(APPROVAL_HEADER.into(), self.challenge.as_str().to_owned());
		headers.insert(SIGNATURE_HEADER.into(), self.signature.as_str().to_owned());
	}
}

/// Step-up headers shared by every clone of a client, keyed by endpoint identifier.
///
/// Entries are inserted only once the signature is complete. Concurrent solvers of the same
/// challenge overwrite each other; the last writer wins.
#[derive(Clone, Debug, Default)]
pub struct StepUpCache(Arc<RwLock<HashMap<&'static str, StepUpHeaders>>>);
impl StepUpCache {
	/// Returns the cached headers for `endpoint` unless they are stale, evicting stale ones.
	pub fn fresh(&self, endpoint: &'static str, ttl: Option<Duration>) -> Option<StepUpHeaders> {
		let now = OffsetDateTime::now_utc();
		let current = self.0.read().get(endpoint).cloned()?;

		if current.is_stale_at(ttl, now) {
			let mut map = self.0.write();

			if map.get(endpoint).is_some_and(|entry| entry.is_stale_at(ttl, now)) {
				map.remove(endpoint);
			}

			return None;
		}

		Some(current)
	}

	/// Stores solved headers for `endpoint`.
	pub fn store(&self, endpoint: &'static str, headers: StepUpHeaders) {
		self.0.write().insert(endpoint, headers);
	}

	/// Drops the entry for `endpoint`.
	pub fn evict(&self, endpoint: &'static str) -> Option<StepUpHeaders> {
		self.0.write().remove(endpoint)
	}

	/// Drops every entry.
	pub fn clear(&self) {
		self.0.write().clear();
	}

	/// Number of cached endpoints.
	pub fn len(&self) -> usize {
		self.0.read().len()
	}

	/// Returns true when nothing is cached.
	pub fn is_empty(&self) -> bool {
		self.0.read().is_empty()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn response(status: u16) -> ApiResponse {
		ApiResponse::new(
			status,
			Url::parse("https://api.sandbox.transferwise.tech/v1/profiles/0/balance-statements/1/statement.json")
				.expect("URL fixture should parse."),
		)
	}

	fn solved(token: &str) -> StepUpHeaders {
		StepUpHeaders::new(Challenge::new(token), Signature::new("c2ln"))
	}

	#[test]
	fn classify_detects_challenges() {
		let challenge = response(403)
			.with_header("X-2FA-Approval-Result", "REJECTED")
			.with_header("X-2FA-Approval", "abc123");

		assert_eq!(
			ScaOutcome::classify(&challenge),
			ScaOutcome::ChallengeIssued(Challenge::new("abc123"))
		);
		assert_eq!(ScaOutcome::classify(&response(200)), ScaOutcome::Success);
		assert_eq!(ScaOutcome::classify(&response(204)), ScaOutcome::Success);
	}

	#[test]
	fn classify_requires_every_trigger() {
		let plain_forbidden = response(403);
		let approved = response(403)
			.with_header("X-2FA-Approval-Result", "APPROVED")
			.with_header("X-2FA-Approval", "abc123");
		let missing_token = response(403).with_header("X-2FA-Approval-Result", "REJECTED");
		let wrong_status = response(401)
			.with_header("X-2FA-Approval-Result", "REJECTED")
			.with_header("X-2FA-Approval", "abc123");

		for candidate in [plain_forbidden, approved, missing_token, wrong_status] {
			assert_eq!(ScaOutcome::classify(&candidate), ScaOutcome::Failure);
		}
	}

	#[test]
	fn headers_apply_both_values() {
		let mut headers = BTreeMap::new();

		solved("abc123").apply(&mut headers);

		assert_eq!(headers.get(APPROVAL_HEADER).map(String::as_str), Some("abc123"));
		assert_eq!(headers.get(SIGNATURE_HEADER).map(String::as_str), Some("c2ln"));
	}

	#[test]
	fn cache_respects_ttl() {
		let cache = StepUpCache::default();

		cache.store("transfers.fund", solved("abc123"));

		assert!(cache.fresh("transfers.fund", None).is_some());
		assert!(cache.fresh("transfers.fund", Some(Duration::minutes(5))).is_some());
		assert!(cache.fresh("balance_statements.statement", None).is_none());
		assert!(cache.fresh("transfers.fund", Some(Duration::ZERO)).is_none());
		assert!(cache.is_empty(), "Stale entries should be evicted.");
	}

	#[test]
	fn cache_is_shared_between_clones_and_last_writer_wins() {
		let cache = StepUpCache::default();
		let clone = cache.clone();

		cache.store("transfers.fund", solved("first"));
		clone.store("transfers.fund", solved("second"));

		let current = cache.fresh("transfers.fund", None).expect("Entry should be cached.");

		assert_eq!(current.challenge.as_str(), "second");
		assert_eq!(cache.len(), 1);
		assert!(clone.evict("transfers.fund").is_some());
		assert!(cache.is_empty());
	}

	#[test]
	fn staleness_is_measured_from_signing_time() {
		let entry = solved("abc123");
		let later = entry.signed_at + Duration::minutes(10);

		assert!(!entry.is_stale_at(None, later));
		assert!(entry.is_stale_at(Some(Duration::minutes(5)), later));
		assert!(!entry.is_stale_at(Some(Duration::minutes(15)), later));
	}
}
