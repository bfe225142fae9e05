//! Parsing settings
//!
//! Settings can be given in code or read from TOML:
//!
//! ```toml
//! handle_linux_macros = true
//! fuzzy_parsing = false
//! invalid_condition = "error_variable"
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Cannot read settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid settings: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Unknown invalid condition handling '{0}' (expected fail, true or error_variable)")]
    UnknownHandling(String),
}

/// What the Boolean interpreter does with a condition it cannot parse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum InvalidConditionHandling {
    /// Return the error to the caller
    #[default]
    #[serde(rename = "fail", alias = "exception", alias = "EXCEPTION")]
    Fail,
    /// Replace the condition with `True`
    #[serde(rename = "true", alias = "TRUE")]
    SubstituteTrue,
    /// Replace the condition with the variable `PARSING_ERROR`
    #[serde(rename = "error_variable", alias = "ERROR_VARIABLE")]
    SubstituteErrorVariable,
}

impl FromStr for InvalidConditionHandling {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fail" | "exception" => Ok(InvalidConditionHandling::Fail),
            "true" => Ok(InvalidConditionHandling::SubstituteTrue),
            "error_variable" => Ok(InvalidConditionHandling::SubstituteErrorVariable),
            _ => Err(SettingsError::UnknownHandling(s.to_string())),
        }
    }
}

impl fmt::Display for InvalidConditionHandling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidConditionHandling::Fail => write!(f, "fail"),
            InvalidConditionHandling::SubstituteTrue => write!(f, "true"),
            InvalidConditionHandling::SubstituteErrorVariable => write!(f, "error_variable"),
        }
    }
}

/// Options shared by the condition interpreters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ParsingSettings {
    /// Expand `IS_ENABLED`, `IS_MODULE` and `IS_BUILTIN`
    pub handle_linux_macros: bool,
    /// Encode comparisons and bare variables as synthesized variables
    /// (Boolean interpretation only)
    pub fuzzy_parsing: bool,
    pub invalid_condition: InvalidConditionHandling,
}

impl ParsingSettings {
    pub fn from_toml_str(text: &str) -> Result<Self, SettingsError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load_from_toml(path: &Path) -> Result<Self, SettingsError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = ParsingSettings::from_toml_str("").unwrap();
        assert_eq!(settings, ParsingSettings::default());
        assert!(!settings.handle_linux_macros);
        assert!(!settings.fuzzy_parsing);
        assert_eq!(settings.invalid_condition, InvalidConditionHandling::Fail);
    }

    #[test]
    fn test_from_toml() {
        let settings = ParsingSettings::from_toml_str(
            "handle_linux_macros = true\ninvalid_condition = \"error_variable\"\n",
        )
        .unwrap();
        assert!(settings.handle_linux_macros);
        assert!(!settings.fuzzy_parsing);
        assert_eq!(
            settings.invalid_condition,
            InvalidConditionHandling::SubstituteErrorVariable
        );
    }

    #[test]
    fn test_exception_alias() {
        let settings = ParsingSettings::from_toml_str("invalid_condition = \"exception\"").unwrap();
        assert_eq!(settings.invalid_condition, InvalidConditionHandling::Fail);
    }

    #[test]
    fn test_unknown_handling_rejected() {
        assert!(ParsingSettings::from_toml_str("invalid_condition = \"maybe\"").is_err());
        assert!(matches!(
            "maybe".parse::<InvalidConditionHandling>(),
            Err(SettingsError::UnknownHandling(_))
        ));
    }

    #[test]
    fn test_from_str_and_display_agree() {
        for handling in [
            InvalidConditionHandling::Fail,
            InvalidConditionHandling::SubstituteTrue,
            InvalidConditionHandling::SubstituteErrorVariable,
        ] {
            assert_eq!(handling.to_string().parse::<InvalidConditionHandling>().unwrap(), handling);
        }
        assert_eq!(
            "TRUE".parse::<InvalidConditionHandling>().unwrap(),
            InvalidConditionHandling::SubstituteTrue
        );
    }
}
