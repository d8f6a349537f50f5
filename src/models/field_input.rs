//! Caller-entered form values after coercion.

use serde::Serialize;

/// A form field that was left empty, parsed, or could not be parsed.
///
/// Blank text counts as [`FieldInput::Absent`] so that a cleared field falls
/// back the same way an omitted one does. Text that is present but not in
/// the expected form is kept apart as [`FieldInput::Invalid`].
///
/// # Example
///
/// ```
/// use reserve_offset_engine::models::FieldInput;
///
/// assert_eq!(FieldInput::Valid(6).value(), Some(6));
/// assert_eq!(FieldInput::<i32>::Invalid.value(), None);
/// assert!(FieldInput::<i32>::Invalid.is_invalid());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum FieldInput<T> {
    /// Omitted, `null` or blank.
    Absent,
    /// Parsed successfully.
    Valid(T),
    /// Present but not parseable.
    Invalid,
}

impl<T> FieldInput<T> {
    /// Returns the parsed value, if any.
    pub fn value(self) -> Option<T> {
        match self {
            FieldInput::Valid(value) => Some(value),
            FieldInput::Absent | FieldInput::Invalid => None,
        }
    }

    /// Returns `true` when the field held text that could not be parsed.
    pub fn is_invalid(&self) -> bool {
        matches!(self, FieldInput::Invalid)
    }

    /// Maps the parsed value, keeping absent and invalid as they are.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> FieldInput<U> {
        match self {
            FieldInput::Absent => FieldInput::Absent,
            FieldInput::Valid(value) => FieldInput::Valid(f(value)),
            FieldInput::Invalid => FieldInput::Invalid,
        }
    }
}

impl<T> From<Option<T>> for FieldInput<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(FieldInput::Absent, FieldInput::Valid)
    }
}
