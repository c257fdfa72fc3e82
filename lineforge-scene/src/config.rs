//! Typed section/key lookups over a scene description

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Errors raised while reading or querying a configuration
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Missing section [{0}]")]
    MissingSection(String),

    #[error("Missing key '{key}' in section [{section}]")]
    MissingKey { section: String, key: String },

    #[error("Key '{key}' in section [{section}] is not {expected}")]
    WrongType {
        section: String,
        key: String,
        expected: &'static str,
    },

    #[error("Parse error on line {line}: {message}")]
    Parse { line: usize, message: String },
}

impl From<ConfigError> for lineforge_core::Error {
    fn from(e: ConfigError) -> Self {
        lineforge_core::Error::Config(e.to_string())
    }
}

/// A single configuration value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Double(f64),
    Str(String),
    IntTuple(Vec<i64>),
    DoubleTuple(Vec<f64>),
}

impl Value {
    pub fn as_double(&self) -> Option<f64> {
        match *self {
            Value::Double(v) => Some(v),
            Value::Int(v) => Some(v as f64),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match *self {
            Value::Int(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_double_tuple(&self) -> Option<Vec<f64>> {
        match self {
            Value::DoubleTuple(v) => Some(v.clone()),
            Value::IntTuple(v) => Some(v.iter().map(|&i| i as f64).collect()),
            _ => None,
        }
    }

    pub fn as_int_tuple(&self) -> Option<&[i64]> {
        match self {
            Value::IntTuple(v) => Some(v),
            _ => None,
        }
    }
}

/// Named group of key/value pairs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub name: String,
    pub values: BTreeMap<String, Value>,
}

impl Section {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: BTreeMap::new(),
        }
    }

    /// Builder-style insertion, mostly for tests and programmatic scenes
    pub fn with(mut self, key: impl Into<String>, value: Value) -> Self {
        self.values.insert(key.into(), value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    fn missing(&self, key: &str) -> ConfigError {
        ConfigError::MissingKey {
            section: self.name.clone(),
            key: key.to_string(),
        }
    }

    fn wrong_type(&self, key: &str, expected: &'static str) -> ConfigError {
        ConfigError::WrongType {
            section: self.name.clone(),
            key: key.to_string(),
            expected,
        }
    }

    fn typed<T>(
        &self,
        key: &str,
        expected: &'static str,
        convert: impl FnOnce(&Value) -> Option<T>,
    ) -> Result<Option<T>, ConfigError> {
        match self.get(key) {
            None => Ok(None),
            Some(value) => convert(value)
                .map(Some)
                .ok_or_else(|| self.wrong_type(key, expected)),
        }
    }

    /// A number; integers are accepted and widened
    pub fn double(&self, key: &str) -> Result<f64, ConfigError> {
        self.typed(key, "a number", Value::as_double)?
            .ok_or_else(|| self.missing(key))
    }

    pub fn double_or(&self, key: &str, default: f64) -> Result<f64, ConfigError> {
        Ok(self.typed(key, "a number", Value::as_double)?.unwrap_or(default))
    }

    pub fn int(&self, key: &str) -> Result<i64, ConfigError> {
        self.typed(key, "an integer", Value::as_int)?
            .ok_or_else(|| self.missing(key))
    }

    /// A non-negative integer, for counts and sizes
    pub fn usize(&self, key: &str) -> Result<usize, ConfigError> {
        let value = self.int(key)?;
        usize::try_from(value).map_err(|_| self.wrong_type(key, "a non-negative integer"))
    }

    pub fn double_tuple(&self, key: &str) -> Result<Vec<f64>, ConfigError> {
        self.typed(key, "a tuple of numbers", Value::as_double_tuple)?
            .ok_or_else(|| self.missing(key))
    }

    pub fn double_tuple_or(&self, key: &str, default: &[f64]) -> Result<Vec<f64>, ConfigError> {
        Ok(self
            .typed(key, "a tuple of numbers", Value::as_double_tuple)?
            .unwrap_or_else(|| default.to_vec()))
    }

    pub fn int_tuple(&self, key: &str) -> Result<Vec<i64>, ConfigError> {
        self.typed(key, "a tuple of integers", |v| v.as_int_tuple().map(<[i64]>::to_vec))?
            .ok_or_else(|| self.missing(key))
    }

    pub fn string(&self, key: &str) -> Result<&str, ConfigError> {
        self.string_if_exists(key)?.ok_or_else(|| self.missing(key))
    }

    pub fn string_if_exists(&self, key: &str) -> Result<Option<&str>, ConfigError> {
        match self.get(key) {
            None => Ok(None),
            Some(value) => value
                .as_str()
                .map(Some)
                .ok_or_else(|| self.wrong_type(key, "a string")),
        }
    }
}

/// A whole scene description: sections addressed by name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    pub sections: BTreeMap<String, Section>,
}

impl Configuration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a section
    pub fn insert(&mut self, section: Section) {
        self.sections.insert(section.name.clone(), section);
    }

    pub fn with_section(mut self, section: Section) -> Self {
        self.insert(section);
        self
    }

    pub fn section(&self, name: &str) -> Result<&Section, ConfigError> {
        self.sections
            .get(name)
            .ok_or_else(|| ConfigError::MissingSection(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn figure() -> Section {
        Section::new("Figure0")
            .with("scale", Value::Int(2))
            .with("rotateX", Value::Double(45.5))
            .with("center", Value::IntTuple(vec![0, 1, 2]))
            .with("type", Value::Str("Cube".to_string()))
            .with("nrPoints", Value::Int(-1))
    }

    #[test]
    fn test_numbers_widen() {
        let s = figure();
        assert_eq!(s.double("scale").unwrap(), 2.0);
        assert_eq!(s.double("rotateX").unwrap(), 45.5);
        assert_eq!(s.double_tuple("center").unwrap(), vec![0.0, 1.0, 2.0]);
        assert!(matches!(s.int("rotateX"), Err(ConfigError::WrongType { .. })));
    }

    #[test]
    fn test_defaults_only_apply_to_missing_keys() {
        let s = figure();
        assert_eq!(s.double_or("reflectionCoefficient", 0.0).unwrap(), 0.0);
        assert_eq!(s.double_tuple_or("diffuseReflection", &[0.0; 3]).unwrap(), vec![0.0; 3]);
        assert!(s.double_or("type", 1.0).is_err());
    }

    #[test]
    fn test_missing_and_negative() {
        let s = figure();
        assert_eq!(
            s.double("rotateZ"),
            Err(ConfigError::MissingKey {
                section: "Figure0".to_string(),
                key: "rotateZ".to_string()
            })
        );
        assert!(matches!(s.usize("nrPoints"), Err(ConfigError::WrongType { .. })));
    }

    #[test]
    fn test_strings() {
        let s = figure();
        assert_eq!(s.string("type").unwrap(), "Cube");
        assert_eq!(s.string_if_exists("inputfile").unwrap(), None);
        assert!(s.string("scale").is_err());
    }

    #[test]
    fn test_sections() {
        let config = Configuration::new().with_section(figure());
        assert!(config.section("Figure0").is_ok());
        assert_eq!(
            config.section("General"),
            Err(ConfigError::MissingSection("General".to_string()))
        );
        let err: lineforge_core::Error = ConfigError::MissingSection("General".to_string()).into();
        assert!(matches!(err, lineforge_core::Error::Config(_)));
    }

    #[test]
    fn test_untagged_values_pick_the_narrowest_variant() {
        let values: Vec<Value> =
            serde_json::from_str(r#"[true, 3, 2.5, 2.0, "Cube", [1, 2], [1.5, 2], []]"#).unwrap();
        assert_eq!(
            values,
            vec![
                Value::Bool(true),
                Value::Int(3),
                Value::Double(2.5),
                Value::Double(2.0),
                Value::Str("Cube".to_string()),
                Value::IntTuple(vec![1, 2]),
                Value::DoubleTuple(vec![1.5, 2.0]),
                Value::IntTuple(vec![]),
            ]
        );
    }

    #[test]
    fn test_configuration_survives_json() {
        let config = Configuration::new()
            .with_section(figure())
            .with_section(Section::new("General").with("size", Value::Int(256)));
        let json = serde_json::to_string(&config).unwrap();
        let back: Configuration = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
        assert_eq!(back.section("Figure0").unwrap().double("rotateX").unwrap(), 45.5);
    }
}
