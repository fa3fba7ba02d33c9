mod json;
mod lines;
mod text;
mod toml;
mod yaml;

use crate::value::Value;
use std::path::Path;
use thiserror::Error;
use tokio::fs;

#[derive(Error, Debug)]
pub enum FormatError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml_edit::TomlError),

    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Cannot encode value as {format}: {reason}")]
    Unsupported {
        format: &'static str,
        reason: String,
    },
}

/// On-disk encoding strategy for a managed file.
///
/// Each variant pairs a parser with a serializer and declares the default
/// file extension used by path resolution. Tree formats (`Toml`, `Yaml`,
/// `Json`) carry nested mappings; `Lines` carries an ordered list of literal
/// lines; `Text` passes file content through untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Toml,
    Yaml,
    Json,
    Lines,
    Text,
}

impl Format {
    /// Default extension contributed to the resolved file name.
    ///
    /// `Lines` and `Text` files name themselves (dotfiles, markers), so they
    /// contribute nothing.
    pub fn file_extension(&self) -> &'static str {
        match self {
            Format::Toml => "toml",
            Format::Yaml => "yaml",
            Format::Json => "json",
            Format::Lines | Format::Text => "",
        }
    }

    /// Read and parse the file at `path` into a structured value.
    pub async fn load(&self, path: &Path) -> Result<Value, FormatError> {
        let content = fs::read_to_string(path).await?;
        match self {
            Format::Toml => toml::parse(&content),
            Format::Yaml => yaml::parse(&content),
            Format::Json => json::parse(&content),
            Format::Lines => Ok(lines::parse(&content)),
            Format::Text => Ok(text::parse(content)),
        }
    }

    /// Serialize `value` and overwrite the file at `path`.
    pub async fn dump(&self, path: &Path, value: &Value) -> Result<(), FormatError> {
        let rendered = match self {
            Format::Toml => toml::render(value)?,
            Format::Yaml => yaml::render(value)?,
            Format::Json => json::render(value)?,
            Format::Lines => lines::render(value)?,
            Format::Text => text::render(value)?,
        };
        fs::write(path, rendered).await?;
        Ok(())
    }
}
