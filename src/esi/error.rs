//! Recognizes the error bodies EVE SSO and ESI return and turns them into provider errors.

// self
use crate::{_prelude::*, error::TransportError};

type ErrorShape = fn(&Value) -> Option<Error>;

/// Tried in order; the first match wins.
const ERROR_SHAPES: &[ErrorShape] = &[nested_error, flat_error];

/// Maps a failed profile request into the crate taxonomy.
///
/// A body matching a known error shape becomes [`Error::Provider`]. Anything else
/// (no body, non-JSON body, unknown shape) wraps the original failure as
/// [`Error::Transport`].
pub(crate) fn map_profile_failure(failure: TransportError) -> Error {
	let json = failure.data().and_then(|data| serde_json::from_str::<Value>(data).ok());

	if let Some(err) = json.as_ref().and_then(match_error_shape) {
		return err;
	}

	Error::Transport { message: "Failed to fetch user profile", source: failure }
}

fn match_error_shape(json: &Value) -> Option<Error> {
	ERROR_SHAPES.iter().find_map(|shape| shape(json))
}

/// `{"error": {"message": "...", "code": "..."}}`
///
/// Keyed on `message`: a missing or empty `code` still matches and yields an empty code.
/// An `error` object without a usable `message` is left to the flat shape.
fn nested_error(json: &Value) -> Option<Error> {
	let error = json.get("error")?.as_object()?;
	let message = text(error.get("message")?)?;
	let code = error.get("code").and_then(text).unwrap_or_default();

	Some(Error::provider(message, code))
}

/// `{"error": "...", "error_description": "..."}`
fn flat_error(json: &Value) -> Option<Error> {
	let code = text(json.get("error")?)?;
	let message = text(json.get("error_description")?)?;

	Some(Error::provider(message, code))
}

// Non-empty strings and numbers only.
fn text(value: &Value) -> Option<String> {
	match value {
		Value::String(text) if !text.is_empty() => Some(text.clone()),
		Value::Number(number) => Some(number.to_string()),
		_ => None,
	}
}
