use std::fs;
use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Layout options for [`Matrix::render`](crate::math::Matrix::render).
///
/// The default reproduces the canonical grid: two-space indent, cells joined
/// by two spaces, right-aligned to the widest rendered value.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct FormatConfig {
    /// Spaces before each row.
    pub indent: usize,
    /// Text placed between adjacent cells.
    pub separator: String,
    pub alignment: Alignment,
}

/// Horizontal placement of a value inside its cell.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    Left,
    #[default]
    Right,
    Center,
}

impl Alignment {
    pub fn pad(&self, cell: &str, width: usize) -> String {
        match self {
            Alignment::Left => format!("{:<width$}", cell, width = width),
            Alignment::Right => format!("{:>width$}", cell, width = width),
            Alignment::Center => format!("{:^width$}", cell, width = width),
        }
    }
}

impl FromStr for Alignment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "left" => Ok(Alignment::Left),
            "right" => Ok(Alignment::Right),
            "center" | "centre" => Ok(Alignment::Center),
            _ => Err(format!(
                "Unknown alignment: {}. Expected one of left, right, center",
                s
            )),
        }
    }
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            indent: 2,
            separator: String::from("  "),
            alignment: Alignment::Right,
        }
    }
}

impl FormatConfig {
    pub fn new(indent: usize, separator: impl Into<String>, alignment: Alignment) -> Self {
        Self {
            indent,
            separator: separator.into(),
            alignment,
        }
    }

    /// Reads a JSON object, keeping the default for any field that is
    /// missing or has the wrong type.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let partial: serde_json::Value =
            serde_json::from_str(json).context("Failed to parse format config JSON")?;
        let mut config = FormatConfig::default();

        macro_rules! load_or_default {
            ($field:ident) => {
                if let Some(val) = partial.get(stringify!($field)) {
                    if let Ok(parsed) = serde_json::from_value(val.clone()) {
                        config.$field = parsed;
                    } else {
                        log::warn!(
                            "Format config invalid value for '{}', using default: {:?}",
                            stringify!($field),
                            config.$field
                        );
                    }
                } else {
                    log::debug!(
                        "Format config missing field '{}', using default: {:?}",
                        stringify!($field),
                        config.$field
                    );
                }
            };
        }

        load_or_default!(indent);
        load_or_default!(separator);
        load_or_default!(alignment);

        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read format config: {}", path.display()))?;
        Self::from_json_str(&json)
    }
}
