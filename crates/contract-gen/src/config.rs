use std::fs;
use std::path::{Path, PathBuf};

use contract_core::errors::{ErrorInfo, GenError};
use contract_core::flags::GenerationFlags;
use serde::{Deserialize, Serialize};

/// Settings read from a `gen.toml` file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GenConfig {
    /// Fail on any schema diagnostic.
    #[serde(default)]
    pub strict: bool,
    /// Directory receiving plan files.
    #[serde(default)]
    pub out_dir: Option<PathBuf>,
    /// Artifacts to generate.
    #[serde(default)]
    pub flags: GenerationFlags,
}

pub fn load_config(path: &Path) -> Result<GenConfig, GenError> {
    let contents = fs::read_to_string(path).map_err(|err| {
        GenError::Config(
            ErrorInfo::new("read-config", format!("failed to read config: {err}"))
                .with_context("path", path.display().to_string()),
        )
    })?;
    parse_config(&contents).map_err(|err| match err {
        GenError::Config(info) => {
            GenError::Config(info.with_context("path", path.display().to_string()))
        }
        other => other,
    })
}

pub fn parse_config(contents: &str) -> Result<GenConfig, GenError> {
    toml::from_str(contents)
        .map_err(|err| GenError::Config(ErrorInfo::new("parse-config", err.to_string())))
}

/// Parses a flag bit-set written as `0x09` or `9`.
pub fn parse_bits(raw: &str) -> Result<u8, GenError> {
    let trimmed = raw.trim();
    let parsed = match trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
    {
        Some(hex) => u8::from_str_radix(hex, 16),
        None => trimmed.parse::<u8>(),
    };
    parsed.map_err(|err| {
        GenError::Config(
            ErrorInfo::new("invalid-bits", err.to_string())
                .with_context("bits", raw)
                .with_hint("use a byte such as 0x09 or 9"),
        )
    })
}
