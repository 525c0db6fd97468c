//! Configuration loading and parsing
//!
//! Every section is optional; a missing `land-sales.toml` is the same as an
//! empty one. Command-line flags are applied on top in `main`.

use anyhow::{Context, Result};
use land_sales_decoder::DecoderConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main application configuration (loaded from land-sales.toml)
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub decoder: DecoderConfig,
    #[serde(default)]
    pub runtime: RuntimeConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct InputConfig {
    /// Directory holding the extracted sale files
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Extension of the files to decode, without the dot
    #[serde(default = "default_extension")]
    pub extension: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            extension: default_extension(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./extracted")
}

fn default_extension() -> String {
    "DAT".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    #[serde(default = "default_csv_path")]
    pub csv_path: PathBuf,
    #[serde(default = "default_manifest_path")]
    pub manifest_path: PathBuf,
    /// JSON run report, skipped when unset
    pub report_path: Option<PathBuf>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            csv_path: default_csv_path(),
            manifest_path: default_manifest_path(),
            report_path: None,
        }
    }
}

fn default_csv_path() -> PathBuf {
    PathBuf::from("./land_value.csv")
}

fn default_manifest_path() -> PathBuf {
    PathBuf::from("./manifest.txt")
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RuntimeConfig {
    /// Worker threads for decoding (0 = one per CPU)
    #[serde(default)]
    pub jobs: usize,
}

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: AppConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_deserialization() {
        let toml_content = r#"
            [input]
            data_dir = "data"

            [output]
            csv_path = "out/sales.csv"
            report_path = "out/report.json"

            [decoder]
            strict_footer = true

            [runtime]
            jobs = 4
        "#;

        let config: AppConfig = toml::from_str(toml_content).unwrap();
        assert_eq!(config.input.data_dir, PathBuf::from("data"));
        assert_eq!(config.input.extension, "DAT");
        assert_eq!(config.output.csv_path, PathBuf::from("out/sales.csv"));
        assert_eq!(config.output.manifest_path, PathBuf::from("./manifest.txt"));
        assert_eq!(config.output.report_path, Some(PathBuf::from("out/report.json")));
        assert!(config.decoder.strict_footer);
        assert_eq!(config.decoder.legacy_marker, "ARCHIVE_SALES");
        assert_eq!(config.runtime.jobs, 4);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.input.data_dir, PathBuf::from("./extracted"));
        assert_eq!(config.output.csv_path, PathBuf::from("./land_value.csv"));
        assert!(config.output.report_path.is_none());
        assert!(!config.decoder.strict_footer);
        assert_eq!(config.runtime.jobs, 0);
    }

    #[test]
    fn test_load_missing_file_has_context() {
        let err = load_config(Path::new("/nonexistent/land-sales.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
