//! Canonicalization of caller parameters into Wise wire format.
//!
//! Callers name parameters in snake_case and pass heterogeneous values; the API expects
//! lowerCamelCase names and plain string values. [`Params`] collects the caller view and
//! [`Params::canonicalize`] produces the wire view:
//!
//! - absent values ([`ParamValue::Null`]) are dropped, while `0`, `""`, and empty lists are kept;
//! - booleans render as `true`/`false`;
//! - lists render as comma-joined elements in order;
//! - domain types participate through [`Parameterizable`] or [`Identified`].

// crates.io
use uuid::Uuid;
// self
use crate::{_prelude::*, error::RequestError};

/// Canonical parameter map keyed by wire name.
pub type CanonicalParams = BTreeMap<String, String>;

/// Caller-side parameter value before canonicalization.
#[derive(Clone, Debug, PartialEq)]
pub enum ParamValue {
	/// Absent value; dropped at the top level.
	Null,
	/// Boolean flag.
	Bool(bool),
	/// Signed integer.
	Int(i64),
	/// Unsigned integer.
	UInt(u64),
	/// Floating point number.
	Float(f64),
	/// Free-form text.
	Str(String),
	/// UUID rendered in hyphenated form.
	Uuid(Uuid),
	/// Ordered list rendered as comma-joined elements.
	List(Vec<ParamValue>),
	/// Arbitrary JSON, rendered by JSON kind.
	Json(JsonValue),
}
impl ParamValue {
	/// Converts a value through its [`Identified`] capability.
	pub fn identified<T>(value: &T) -> Self
	where
		T: ?Sized + Identified,
	{
		value.parameter_id().as_parameter()
	}

	/// Returns true for [`ParamValue::Null`] and JSON `null`.
	pub fn is_null(&self) -> bool {
		matches!(self, Self::Null | Self::Json(JsonValue::Null))
	}

	/// Runtime kind label used in error messages.
	pub fn type_name(&self) -> &'static str {
		match self {
			Self::Null => "null",
			Self::Bool(_) => "bool",
			Self::Int(_) | Self::UInt(_) => "int",
			Self::Float(_) => "float",
			Self::Str(_) => "str",
			Self::Uuid(_) => "uuid",
			Self::List(_) => "list",
			Self::Json(value) => json_type_name(value),
		}
	}

	/// Renders the value into its wire string.
	///
	/// `key` only feeds error messages. Nested nulls and JSON objects are rejected.
	pub fn to_wire(&self, key: &str) -> Result<String, RequestError> {
		let unsupported = |type_name: &'static str| RequestError::UnsupportedParameterType {
			key: key.to_owned(),
			type_name,
		};

		match self {
			Self::Null => Err(unsupported("null")),
			Self::Bool(flag) => Ok(if *flag { "true" } else { "false" }.into()),
			Self::Int(n) => Ok(n.to_string()),
			Self::UInt(n) => Ok(n.to_string()),
			Self::Float(n) => Ok(render_float(*n)),
			Self::Str(s) => Ok(s.clone()),
			Self::Uuid(id) => Ok(id.hyphenated().to_string()),
			Self::List(items) => {
				let rendered =
					items.iter().map(|item| item.to_wire(key)).collect::<Result<Vec<_>, _>>()?;

				Ok(rendered.join(","))
			},
			Self::Json(value) => match value {
				JsonValue::Bool(flag) => Self::Bool(*flag).to_wire(key),
				JsonValue::Number(n) => Ok(n.to_string()),
				JsonValue::String(s) => Ok(s.clone()),
				JsonValue::Array(items) =>
					Self::List(items.iter().cloned().map(Self::Json).collect()).to_wire(key),
				JsonValue::Null | JsonValue::Object(_) => Err(unsupported(json_type_name(value))),
			},
		}
	}
}

/// Shortest round-trip form with a mandatory fraction or exponent: `110.0`, `0.25`, `1e+20`,
/// `1.5e-07`.
fn render_float(n: f64) -> String {
	if !n.is_finite() {
		return if n.is_nan() { "nan".into() } else if n > 0. { "inf".into() } else { "-inf".into() };
	}

	let scientific = format!("{n:e}");
	let (mantissa, exponent) = scientific.split_once('e').unwrap_or((&scientific, "0"));
	let exponent = exponent.parse::<i32>().unwrap_or_default();

	if n != 0. && !(-4..16).contains(&exponent) {
		let sign = if exponent < 0 { '-' } else { '+' };

		return format!("{mantissa}e{sign}{:02}", exponent.unsigned_abs());
	}

	let plain = n.to_string();

	if plain.contains('.') { plain } else { format!("{plain}.0") }
}

/// Capability implemented by values that know their own parameter form.
pub trait Parameterizable {
	/// Returns the value used on the wire.
	fn as_parameter(&self) -> ParamValue;
}

/// Capability implemented by resources referenced by id (profiles, transfers, balances).
pub trait Identified {
	/// Identifier type rendered in place of the resource.
	type Id: Parameterizable;

	/// Returns the resource identifier.
	fn parameter_id(&self) -> Self::Id;
}

macro_rules! impl_parameterizable {
	($variant:ident as $cast:ty: $($ty:ty),+) => {
		$(
			impl Parameterizable for $ty {
				fn as_parameter(&self) -> ParamValue {
					ParamValue::$variant(<$cast>::from(*self))
				}
			}
		)+
	};
}

impl_parameterizable!(Int as i64: i8, i16, i32, i64);
impl_parameterizable!(UInt as u64: u8, u16, u32, u64);
impl_parameterizable!(Float as f64: f32, f64);

impl Parameterizable for ParamValue {
	fn as_parameter(&self) -> ParamValue {
		self.clone()
	}
}
impl Parameterizable for bool {
	fn as_parameter(&self) -> ParamValue {
		ParamValue::Bool(*self)
	}
}
impl Parameterizable for usize {
	fn as_parameter(&self) -> ParamValue {
		ParamValue::UInt(*self as u64)
	}
}
impl Parameterizable for str {
	fn as_parameter(&self) -> ParamValue {
		ParamValue::Str(self.to_owned())
	}
}
impl Parameterizable for String {
	fn as_parameter(&self) -> ParamValue {
		ParamValue::Str(self.clone())
	}
}
impl Parameterizable for Uuid {
	fn as_parameter(&self) -> ParamValue {
		ParamValue::Uuid(*self)
	}
}
impl Parameterizable for JsonValue {
	fn as_parameter(&self) -> ParamValue {
		ParamValue::Json(self.clone())
	}
}
impl<T> Parameterizable for Option<T>
where
	T: Parameterizable,
{
	fn as_parameter(&self) -> ParamValue {
		self.as_ref().map(T::as_parameter).unwrap_or(ParamValue::Null)
	}
}
impl<T> Parameterizable for [T]
where
	T: Parameterizable,
{
	fn as_parameter(&self) -> ParamValue {
		ParamValue::List(self.iter().map(T::as_parameter).collect())
	}
}
impl<T> Parameterizable for Vec<T>
where
	T: Parameterizable,
{
	fn as_parameter(&self) -> ParamValue {
		self.as_slice().as_parameter()
	}
}
impl<T, const N: usize> Parameterizable for [T; N]
where
	T: Parameterizable,
{
	fn as_parameter(&self) -> ParamValue {
		self.as_slice().as_parameter()
	}
}
impl<T> Parameterizable for &T
where
	T: ?Sized + Parameterizable,
{
	fn as_parameter(&self) -> ParamValue {
		(**self).as_parameter()
	}
}

/// Ordered caller-side parameters keyed by caller names.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Params(Vec<(String, ParamValue)>);
impl Params {
	/// Creates an empty parameter set.
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds (or replaces) a parameter.
	pub fn insert(mut self, key: impl Into<String>, value: impl Parameterizable) -> Self {
		self.set(key.into(), value.as_parameter());

		self
	}

	/// Adds (or replaces) a parameter from a resource's identifier.
	pub fn insert_id<T>(self, key: impl Into<String>, resource: &T) -> Self
	where
		T: ?Sized + Identified,
	{
		self.insert(key, ParamValue::identified(resource))
	}

	/// Returns true when no parameters were supplied.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Iterates caller-side entries in insertion order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
		self.0.iter().map(|(key, value)| (key.as_str(), value))
	}

	/// Converts the parameters into their wire form.
	pub fn canonicalize(&self) -> Result<CanonicalParams, RequestError> {
		let mut canonical = CanonicalParams::new();

		for (key, value) in &self.0 {
			if value.is_null() {
				continue;
			}

			canonical.insert(to_lower_camel_case(key), value.to_wire(key)?);
		}

		Ok(canonical)
	}

	fn set(&mut self, key: String, value: ParamValue) {
		match self.0.iter_mut().find(|(existing, _)| *existing == key) {
			Some(slot) => slot.1 = value,
			None => self.0.push((key, value)),
		}
	}
}
impl Extend<(String, ParamValue)> for Params {
	fn extend<I>(&mut self, iter: I)
	where
		I: IntoIterator<Item = (String, ParamValue)>,
	{
		for (key, value) in iter {
			self.set(key, value);
		}
	}
}
impl IntoIterator for Params {
	type IntoIter = std::vec::IntoIter<(String, ParamValue)>;
	type Item = (String, ParamValue);

	fn into_iter(self) -> Self::IntoIter {
		self.0.into_iter()
	}
}
impl<K, V> FromIterator<(K, V)> for Params
where
	K: Into<String>,
	V: Parameterizable,
{
	fn from_iter<I>(iter: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
	{
		iter.into_iter().fold(Self::new(), |params, (key, value)| params.insert(key, value))
	}
}

/// Renames a snake_case key into lowerCamelCase (`source_of_funds` → `sourceOfFunds`).
pub fn to_lower_camel_case(key: &str) -> String {
	let mut segments = key.split('_');
	let mut joined = segments.next().unwrap_or_default().to_owned();

	for segment in segments {
		let mut chars = segment.chars();

		if let Some(first) = chars.next() {
			joined.extend(first.to_uppercase());
			joined.push_str(&chars.as_str().to_lowercase());
		}
	}

	let mut chars = joined.chars();

	match chars.next() {
		Some(first) => first.to_lowercase().chain(chars).collect(),
		None => joined,
	}
}

fn json_type_name(value: &JsonValue) -> &'static str {
	match value {
		JsonValue::Null => "null",
		JsonValue::Bool(_) => "bool",
		JsonValue::Number(_) => "number",
		JsonValue::String(_) => "str",
		JsonValue::Array(_) => "list",
		JsonValue::Object(_) => "object",
	}
}
