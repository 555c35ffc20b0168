use std::path::{Path, PathBuf};

use mindstat_generate::GeneratorConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Config file picked up from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "mindstat.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("toml decode error in {}: {source}", path.display())]
    TomlDecode {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Where datasets live and how they are delimited.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    pub dir: PathBuf,
    pub default_file: String,
    pub delimiter: char,
    pub runs_dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("public/data"),
            default_file: mindstat_core::DEFAULT_DATASET_FILE.to_string(),
            delimiter: ',',
            runs_dir: PathBuf::from("runs"),
        }
    }
}

impl DataConfig {
    pub fn delimiter_byte(&self) -> Result<u8, ConfigError> {
        u8::try_from(self.delimiter)
            .ok()
            .filter(|byte| byte.is_ascii() && !matches!(byte, b'"' | b'\n' | b'\r'))
            .ok_or_else(|| {
                ConfigError::Invalid(format!(
                    "delimiter must be a single ASCII character other than quote or newline, got {:?}",
                    self.delimiter
                ))
            })
    }
}

/// Contents of `mindstat.toml`; every section is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub data: DataConfig,
    pub generate: GeneratorConfig,
}

impl CliConfig {
    /// Load `path`, or `mindstat.toml` if present, or built-in defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !default_path.exists() {
                    return Ok(Self::default());
                }
                default_path
            }
        };

        let content = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        Self::from_toml(&content).map_err(|source| ConfigError::TomlDecode { path, source })
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

#[cfg(test)]
mod tests {
    use mindstat_core::Region;

    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let config = CliConfig::from_toml("").expect("parse");
        assert_eq!(config.data.default_file, "mental_health_data.csv");
        assert_eq!(config.generate, GeneratorConfig::default());
    }

    #[test]
    fn partial_sections_override_defaults() {
        let config = CliConfig::from_toml(
            r#"
[data]
dir = "datasets"
delimiter = ";"

[generate]
start_year = 2015
end_year = 2016
countries = [{ name = "Testland", region = "europe" }]

[generate.trends]
depression = 0.5

[generate.regions.africa.gdp_per_capita]
min = 2000.0
max = 3000.0
"#,
        )
        .expect("parse");

        assert_eq!(config.data.dir, PathBuf::from("datasets"));
        assert_eq!(config.data.delimiter_byte().expect("delimiter"), b';');
        assert_eq!(config.generate.start_year, 2015);
        assert_eq!(config.generate.countries[0].region, Region::Europe);
        assert_eq!(config.generate.trends.depression, 0.5);
        assert_eq!(config.generate.trends.anxiety, 0.12);
        assert_eq!(config.generate.regions.africa.gdp_per_capita.min, 2000.0);
        assert_eq!(config.generate.regions.europe.depression.min, 3.5);
    }

    #[test]
    fn rejects_multibyte_delimiters() {
        let data = DataConfig {
            delimiter: 'é',
            ..DataConfig::default()
        };
        assert!(data.delimiter_byte().is_err());
    }
}
