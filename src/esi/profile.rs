//! Character profile returned by the ESI `/verify/` endpoint.
//!
//! The verification response only identifies the character and its token. Public
//! character details (corporation, alliance) live behind `/characters/{character_id}/`
//! and are left to the consuming application.

// crates.io
use serde_json::Number;
use time::{PrimitiveDateTime, format_description::well_known::Rfc3339, macros::format_description};
// self
use crate::_prelude::*;

/// Character identifier as sent by the provider (numeric upstream, string in some fixtures).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CharacterId {
	/// Any JSON number.
	Numeric(Number),
	/// Textual identifier.
	Text(String),
}
impl CharacterId {
	/// Reads an identifier from a JSON number or string.
	pub fn from_value(value: &Value) -> Option<Self> {
		match value {
			Value::Number(id) => Some(Self::Numeric(id.clone())),
			Value::String(id) => Some(Self::Text(id.clone())),
			_ => None,
		}
	}

	/// Identifier as an unsigned integer, when it is one.
	pub fn as_u64(&self) -> Option<u64> {
		match self {
			Self::Numeric(id) => id.as_u64(),
			Self::Text(id) => id.parse().ok(),
		}
	}
}
impl Display for CharacterId {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		match self {
			Self::Numeric(id) => write!(f, "{id}"),
			Self::Text(id) => f.write_str(id),
		}
	}
}

/// Input accepted by [`EsiProfile::parse`].
#[derive(Clone, Copy, Debug)]
pub enum ProfileSource<'a> {
	/// JSON-encoded text.
	Text(&'a str),
	/// Already-parsed JSON.
	Json(&'a Value),
}
impl<'a> From<&'a str> for ProfileSource<'a> {
	fn from(value: &'a str) -> Self {
		Self::Text(value)
	}
}
impl<'a> From<&'a String> for ProfileSource<'a> {
	fn from(value: &'a String) -> Self {
		Self::Text(value)
	}
}
impl<'a> From<&'a Value> for ProfileSource<'a> {
	fn from(value: &'a Value) -> Self {
		Self::Json(value)
	}
}

/// Normalized character fields from the verification endpoint.
///
/// Fields hold the upstream JSON values as sent, whatever their type; absent and `null`
/// fields stay `None`. Only `expires_on` is converted, from the upstream date string. The
/// typed accessors (`character_name()`, ...) read the values ESI documents.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EsiProfile {
	/// `CharacterID`.
	pub character_id: Option<Value>,
	/// `CharacterName` at fetch time.
	pub character_name: Option<Value>,
	/// `ExpiresOn`; `None` when absent, not a string, or unparsable.
	pub expires_on: Option<OffsetDateTime>,
	/// `Scopes` granted to the token.
	pub scopes: Option<Value>,
	/// `TokenType` (e.g., `JWT`).
	pub token_type: Option<Value>,
	/// `CharacterOwnerHash`; changes when the character moves to another account.
	pub character_owner_hash: Option<Value>,
}
impl EsiProfile {
	/// Parses a verification response given as JSON text or as a parsed value.
	///
	/// Only text that is not JSON fails. Field types are not checked.
	pub fn parse<'a>(source: impl Into<ProfileSource<'a>>) -> Result<Self, serde_json::Error> {
		match source.into() {
			ProfileSource::Text(text) => Ok(Self::from_json(&serde_json::from_str(text)?)),
			ProfileSource::Json(json) => Ok(Self::from_json(json)),
		}
	}

	/// Copies the known fields out of a parsed verification response.
	pub fn from_json(json: &Value) -> Self {
		let field = |name: &str| json.get(name).filter(|value| !value.is_null()).cloned();

		Self {
			character_id: field("CharacterID"),
			character_name: field("CharacterName"),
			expires_on: json.get("ExpiresOn").and_then(Value::as_str).and_then(parse_expires_on),
			scopes: field("Scopes"),
			token_type: field("TokenType"),
			character_owner_hash: field("CharacterOwnerHash"),
		}
	}

	/// `CharacterID` when it is a number or a string.
	pub fn character_id(&self) -> Option<CharacterId> {
		self.character_id.as_ref().and_then(CharacterId::from_value)
	}

	/// `CharacterName` when it is a string.
	pub fn character_name(&self) -> Option<&str> {
		self.character_name.as_ref().and_then(Value::as_str)
	}

	/// `Scopes` when it is a string.
	pub fn scopes(&self) -> Option<&str> {
		self.scopes.as_ref().and_then(Value::as_str)
	}

	/// `TokenType` when it is a string.
	pub fn token_type(&self) -> Option<&str> {
		self.token_type.as_ref().and_then(Value::as_str)
	}

	/// `CharacterOwnerHash` when it is a string.
	pub fn character_owner_hash(&self) -> Option<&str> {
		self.character_owner_hash.as_ref().and_then(Value::as_str)
	}

	/// `ExpiresOn` as milliseconds since the Unix epoch.
	pub fn expires_on_timestamp_millis(&self) -> Option<i64> {
		self.expires_on.map(|instant| (instant.unix_timestamp_nanos() / 1_000_000) as i64)
	}
}

/// Parses RFC 3339 timestamps; offset-less timestamps are read as UTC.
fn parse_expires_on(raw: &str) -> Option<OffsetDateTime> {
	OffsetDateTime::parse(raw, &Rfc3339).ok().or_else(|| {
		PrimitiveDateTime::parse(
			raw,
			format_description!(
				"[year]-[month]-[day]T[hour]:[minute]:[second][optional [.[subsecond]]]"
			),
		)
		.ok()
		.map(PrimitiveDateTime::assume_utc)
	})
}

#[cfg(test)]
mod tests {
	// crates.io
	use time::macros::datetime;
	// self
	use super::*;

	#[test]
	fn expires_on_accepts_rfc3339_and_offsetless_forms() {
		assert_eq!(parse_expires_on("2020-01-10T19:39:05Z"), Some(datetime!(2020-01-10 19:39:05 UTC)));
		assert_eq!(
			parse_expires_on("2020-01-10T20:39:05+01:00"),
			Some(datetime!(2020-01-10 19:39:05 UTC))
		);
		assert_eq!(parse_expires_on("2017-07-05T14:34:16"), Some(datetime!(2017-07-05 14:34:16 UTC)));
		assert_eq!(
			parse_expires_on("2017-07-05T14:34:16.5"),
			Some(datetime!(2017-07-05 14:34:16.5 UTC))
		);
		assert_eq!(parse_expires_on("next tuesday"), None);
	}

	#[test]
	fn numeric_and_textual_character_ids_round_trip_through_display() {
		let numeric = EsiProfile::parse("{\"CharacterID\":95465499}")
			.expect("Numeric identifiers should parse.");
		let textual = EsiProfile::parse("{\"CharacterID\":\"123456789\"}")
			.expect("Textual identifiers should parse.");
		let numeric_id = numeric.character_id().expect("Numeric identifier should be readable.");

		assert_eq!(numeric_id, CharacterId::Numeric(95465499_u64.into()));
		assert_eq!(numeric_id.to_string(), "95465499");
		assert_eq!(numeric_id.as_u64(), Some(95465499));
		assert_eq!(textual.character_id(), Some(CharacterId::Text("123456789".into())));
		assert_eq!(textual.character_id().and_then(|id| id.as_u64()), Some(123456789));
	}

	#[test]
	fn unexpected_field_types_are_copied_as_sent() {
		let profile = EsiProfile::parse(
			"{\"CharacterID\":-5,\"CharacterName\":42,\"Scopes\":[\"publicData\"],\"ExpiresOn\":1578685145000,\"TokenType\":null}",
		)
		.expect("Any JSON object should parse.");

		assert_eq!(profile.character_id, Some(Value::from(-5)));
		assert_eq!(profile.character_id().map(|id| id.to_string()), Some("-5".into()));
		assert_eq!(profile.character_name, Some(Value::from(42)));
		assert_eq!(profile.character_name(), None);
		assert_eq!(profile.scopes, Some(serde_json::json!(["publicData"])));
		assert_eq!(profile.expires_on, None);
		assert_eq!(profile.token_type, None);
		assert_eq!(profile.character_owner_hash, None);
	}

	#[test]
	fn non_object_json_yields_an_empty_profile() {
		assert_eq!(
			EsiProfile::parse("[1,2,3]").expect("JSON arrays should parse."),
			EsiProfile::default()
		);
	}

	#[test]
	fn absent_fields_stay_empty() {
		let profile = EsiProfile::parse("{}").expect("Empty objects should parse.");

		assert_eq!(profile, EsiProfile::default());
		assert_eq!(profile.expires_on_timestamp_millis(), None);
	}

	#[test]
	fn text_input_must_be_json() {
		assert!(EsiProfile::parse("Hello, world.").is_err());
	}
}
