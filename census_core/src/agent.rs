use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::coordinate::Coordinate;

/// Trait key used for age bucketing.
pub const AGE_TRAIT: &str = "age";

/// A single named attribute of an agent.
///
/// Deserializes untagged, so JSON numbers, strings, booleans and `null`
/// map directly onto the matching variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TraitValue {
    Number(f64),
    Flag(bool),
    Text(String),
    Null,
}

impl TraitValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            TraitValue::Number(value) => Some(*value),
            TraitValue::Flag(_) | TraitValue::Text(_) | TraitValue::Null => None,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            TraitValue::Number(_) => "number",
            TraitValue::Flag(_) => "flag",
            TraitValue::Text(_) => "text",
            TraitValue::Null => "null",
        }
    }
}

impl From<f64> for TraitValue {
    fn from(value: f64) -> Self {
        TraitValue::Number(value)
    }
}

impl From<i32> for TraitValue {
    fn from(value: i32) -> Self {
        TraitValue::Number(value as f64)
    }
}

impl From<bool> for TraitValue {
    fn from(value: bool) -> Self {
        TraitValue::Flag(value)
    }
}

impl From<&str> for TraitValue {
    fn from(value: &str) -> Self {
        TraitValue::Text(value.to_string())
    }
}

impl From<String> for TraitValue {
    fn from(value: String) -> Self {
        TraitValue::Text(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TraitError {
    #[error("trait `{name}` is a {kind}, expected a number")]
    NotNumeric { name: String, kind: &'static str },
}

pub type Traits = BTreeMap<String, TraitValue>;

/// A located entity carrying an open set of named traits.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Agent {
    position: Coordinate,
    traits: Traits,
}

impl Agent {
    pub fn new(position: Coordinate, traits: Traits) -> Self {
        Self { position, traits }
    }

    /// Builder-style trait assignment, mostly for tests and synthetic data.
    pub fn with_trait(mut self, name: impl Into<String>, value: impl Into<TraitValue>) -> Self {
        self.traits.insert(name.into(), value.into());
        self
    }

    pub fn position(&self) -> Coordinate {
        self.position
    }

    pub fn traits(&self) -> &Traits {
        &self.traits
    }

    pub fn get(&self, name: &str) -> Option<&TraitValue> {
        self.traits.get(name)
    }

    /// Reads a numeric trait. An absent or `null` trait reads as `0`; a
    /// present trait that is not a number is an error.
    pub fn numeric_trait(&self, name: &str) -> Result<f64, TraitError> {
        match self.traits.get(name) {
            None | Some(TraitValue::Null) => Ok(0.0),
            Some(TraitValue::Number(value)) => Ok(*value),
            Some(other) => Err(TraitError::NotNumeric {
                name: name.to_string(),
                kind: other.kind(),
            }),
        }
    }

    /// Integer age in years, if the agent carries a whole, non-negative
    /// numeric `age` trait.
    pub fn age(&self) -> Option<u32> {
        let age = self.traits.get(AGE_TRAIT)?.as_number()?;
        if age.fract() != 0.0 || age < 0.0 || age > u32::MAX as f64 {
            return None;
        }
        Some(age as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn origin() -> Coordinate {
        Coordinate::new(0.0, 0.0).unwrap()
    }

    #[test]
    fn traits_are_readable_after_assignment() {
        let agent = Agent::new(origin(), Traits::new())
            .with_trait("age", 84)
            .with_trait("agreeableness", 42);
        assert_eq!(agent.numeric_trait("age"), Ok(84.0));
        assert_eq!(agent.numeric_trait("agreeableness"), Ok(42.0));
        assert_eq!(agent.position(), origin());
    }

    #[test]
    fn missing_trait_reads_as_zero() {
        let agent = Agent::new(origin(), Traits::new());
        assert_eq!(agent.numeric_trait("income"), Ok(0.0));
    }

    #[test]
    fn text_trait_is_not_numeric() {
        let agent = Agent::new(origin(), Traits::new()).with_trait("income", "high");
        assert_eq!(
            agent.numeric_trait("income"),
            Err(TraitError::NotNumeric {
                name: "income".to_string(),
                kind: "text",
            })
        );
    }

    #[test]
    fn age_requires_whole_non_negative_number() {
        let base = Agent::new(origin(), Traits::new());
        assert_eq!(base.clone().with_trait("age", 20).age(), Some(20));
        assert_eq!(base.clone().with_trait("age", 20.5).age(), None);
        assert_eq!(base.clone().with_trait("age", -1).age(), None);
        assert_eq!(base.clone().with_trait("age", "twenty").age(), None);
        assert_eq!(base.age(), None);
    }

    #[test]
    fn trait_values_deserialize_untagged() {
        let traits: Traits =
            serde_json::from_str(r#"{"age": 31, "name": "ada", "active": true}"#).unwrap();
        assert_eq!(traits["age"], TraitValue::Number(31.0));
        assert_eq!(traits["name"], TraitValue::Text("ada".to_string()));
        assert_eq!(traits["active"], TraitValue::Flag(true));
    }

    #[test]
    fn null_trait_reads_as_absent() {
        let traits: Traits = serde_json::from_str(r#"{"age": null, "income": null}"#).unwrap();
        assert_eq!(traits["income"], TraitValue::Null);
        let agent = Agent::new(origin(), traits);
        assert_eq!(agent.numeric_trait("income"), Ok(0.0));
        assert_eq!(agent.age(), None);
    }
}
