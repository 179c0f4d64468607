use std::fmt::Display;

use slint_interpreter::ValueType;

use crate::{common::TopwatchError, Result};

#[derive(PartialEq, Clone)]
pub struct SlintProperty {
    name: String,
    value_type: ValueType,
}

impl SlintProperty {
    pub fn new(name: &str, value_type: ValueType) -> Self {
        Self {
            name: name.to_owned(),
            value_type,
        }
    }
}

impl Display for SlintProperty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Property '{}' of type '{:?}'", self.name, self.value_type)
    }
}

impl From<(String, ValueType)> for SlintProperty {
    fn from(value: (String, ValueType)) -> Self {
        Self {
            name: value.0,
            value_type: value.1,
        }
    }
}

/// Properties a style component must expose.
pub fn required_properties() -> [SlintProperty; 2] {
    [
        SlintProperty::new("clock_text", ValueType::String),
        SlintProperty::new("stopwatch_text", ValueType::String),
    ]
}

/// Properties a style component may expose for richer rendering.
pub fn optional_properties() -> [SlintProperty; 2] {
    [
        SlintProperty::new("stopwatch_running", ValueType::Bool),
        SlintProperty::new("show_help", ValueType::Bool),
    ]
}

pub fn check_properties(
    required_properties: &[SlintProperty],
    existing_properties: &[SlintProperty],
) -> Result<()> {
    let missing_properties: Vec<_> = required_properties
        .iter()
        .filter(|value| !existing_properties.contains(value))
        .map(ToString::to_string)
        .collect();

    if missing_properties.is_empty() {
        Ok(())
    } else {
        Err(TopwatchError::MissingProperties(missing_properties))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_required_property_is_reported() {
        let existing = [SlintProperty::new("clock_text", ValueType::String)];
        let result = check_properties(&required_properties(), &existing);
        let Err(TopwatchError::MissingProperties(missing)) = result else {
            panic!("expected missing properties");
        };
        assert_eq!(missing.len(), 1);
        assert!(missing[0].contains("stopwatch_text"));
    }

    #[test]
    fn type_mismatch_counts_as_missing() {
        let existing = [
            SlintProperty::new("clock_text", ValueType::String),
            SlintProperty::new("stopwatch_text", ValueType::Bool),
        ];
        assert!(check_properties(&required_properties(), &existing).is_err());
    }
}
