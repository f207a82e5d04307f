use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer};

use crate::error::{Result, ScoreboardError};
use crate::module::ModuleId;

/// Which renderer a configuration targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutKind {
    Grid,
    Split,
}

/// Sizing hint for one grid row, applied in declaration order.
///
/// A bare number is a fractional weight; a string such as `"120px"` pins the
/// row to an absolute cell count (the numeric prefix is what matters, any
/// unit suffix is tolerated).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowSizing {
    Weight(u16),
    Fixed(u16),
}

impl<'de> Deserialize<'de> for RowSizing {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct RowSizingVisitor;

        impl<'de> Visitor<'de> for RowSizingVisitor {
            type Value = RowSizing;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a weight number or a fixed-size string like \"120px\"")
            }

            fn visit_u64<E>(self, value: u64) -> std::result::Result<RowSizing, E>
            where
                E: de::Error,
            {
                u16::try_from(value)
                    .map(RowSizing::Weight)
                    .map_err(|_| E::custom(format!("row weight {} out of range", value)))
            }

            fn visit_i64<E>(self, value: i64) -> std::result::Result<RowSizing, E>
            where
                E: de::Error,
            {
                u16::try_from(value)
                    .map(RowSizing::Weight)
                    .map_err(|_| E::custom(format!("row weight {} out of range", value)))
            }

            fn visit_str<E>(self, value: &str) -> std::result::Result<RowSizing, E>
            where
                E: de::Error,
            {
                let digits: String = value.chars().take_while(|c| c.is_ascii_digit()).collect();
                digits
                    .parse::<u16>()
                    .map(RowSizing::Fixed)
                    .map_err(|_| E::custom(format!("fixed row size `{}` has no numeric prefix", value)))
            }
        }

        deserializer.deserialize_any(RowSizingVisitor)
    }
}

/// Declarative zone-to-module mapping, loaded once at startup.
///
/// `assignments` may carry zone names for layouts other than the active one;
/// the resolver filters by the active renderer's vocabulary. Assigning a
/// module id with no registered descriptor is tolerated and degrades to an
/// empty slot at render time.
#[derive(Debug, Clone, Deserialize)]
pub struct LayoutConfig {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: LayoutKind,
    #[serde(default)]
    pub assignments: HashMap<String, ModuleId>,
    #[serde(default, rename = "rowHeights")]
    pub row_sizing: Vec<RowSizing>,
}

impl LayoutConfig {
    pub fn new(id: impl Into<String>, kind: LayoutKind) -> Self {
        Self {
            id: id.into(),
            kind,
            assignments: HashMap::new(),
            row_sizing: Vec::new(),
        }
    }

    pub fn assign(mut self, zone: impl Into<String>, module: impl Into<ModuleId>) -> Self {
        self.assignments.insert(zone.into(), module.into());
        self
    }

    pub fn with_row_sizing(mut self, sizing: Vec<RowSizing>) -> Self {
        self.row_sizing = sizing;
        self
    }

    /// Parse and validate a configuration from its JSON form.
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// Authoring mistakes are load-time errors, not runtime conditions.
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(ScoreboardError::InvalidConfig(
                "configuration id must not be empty".to_string(),
            ));
        }
        for (index, sizing) in self.row_sizing.iter().enumerate() {
            match sizing {
                RowSizing::Weight(0) => {
                    return Err(ScoreboardError::InvalidConfig(format!(
                        "row {} has zero weight",
                        index
                    )));
                }
                RowSizing::Fixed(0) => {
                    return Err(ScoreboardError::InvalidConfig(format!(
                        "row {} has zero fixed height",
                        index
                    )));
                }
                _ => {}
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_grid_config_with_row_sizing() {
        let config = LayoutConfig::from_json_str(
            r#"{
                "id": "main-dashboard",
                "type": "grid",
                "assignments": {
                    "zone1": "weather",
                    "zone2": "sales",
                    "zone3": "sales"
                },
                "rowHeights": [1, 2, "120px"]
            }"#,
        )
        .unwrap();

        assert_eq!(config.id, "main-dashboard");
        assert_eq!(config.kind, LayoutKind::Grid);
        assert_eq!(config.assignments.get("zone2").unwrap(), "sales");
        assert_eq!(
            config.row_sizing,
            vec![
                RowSizing::Weight(1),
                RowSizing::Weight(2),
                RowSizing::Fixed(120)
            ]
        );
    }

    #[test]
    fn split_config_without_row_sizing() {
        let config = LayoutConfig::from_json_str(
            r#"{"id": "side", "type": "split", "assignments": {"sidebar": "weather"}}"#,
        )
        .unwrap();
        assert_eq!(config.kind, LayoutKind::Split);
        assert!(config.row_sizing.is_empty());
    }

    #[test]
    fn empty_id_is_rejected() {
        let err = LayoutConfig::from_json_str(r#"{"id": "  ", "type": "grid"}"#).unwrap_err();
        assert!(matches!(err, ScoreboardError::InvalidConfig(_)));
    }

    #[test]
    fn zero_weight_is_rejected() {
        let err =
            LayoutConfig::from_json_str(r#"{"id": "x", "type": "grid", "rowHeights": [0]}"#)
                .unwrap_err();
        assert!(matches!(err, ScoreboardError::InvalidConfig(_)));
    }

    #[test]
    fn fixed_size_without_digits_is_a_parse_error() {
        let err =
            LayoutConfig::from_json_str(r#"{"id": "x", "type": "grid", "rowHeights": ["px"]}"#)
                .unwrap_err();
        assert!(matches!(err, ScoreboardError::ConfigParse(_)));
    }
}
