use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_OUTPUT_FORMAT: OutputFormat = OutputFormat::Table;
pub const DEFAULT_MAX_REQUESTS: u32 = 1024;
pub const MAX_REQUESTS_CEILING: u32 = 65_536;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Config {
    pub output: OutputConfig,
    pub limits: LimitsConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OutputConfig {
    pub format: OutputFormat,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LimitsConfig {
    pub max_requests: u32,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_requests: DEFAULT_MAX_REQUESTS,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("failed to parse TOML config: {reason}")]
    Parse { reason: String },

    #[error("invalid config value for `{field}`: {reason}")]
    InvalidField { field: &'static str, reason: String },
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    output: Option<RawOutputConfig>,
    limits: Option<RawLimitsConfig>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct RawOutputConfig {
    format: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct RawLimitsConfig {
    max_requests: Option<i64>,
}

impl Config {
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = toml::from_str(contents).map_err(|err| ConfigError::Parse {
            reason: err.to_string(),
        })?;

        Self::from_raw(raw)
    }

    fn from_raw(raw: RawConfig) -> Result<Self, ConfigError> {
        let output = parse_output(raw.output.unwrap_or_default())?;
        let limits = parse_limits(raw.limits.unwrap_or_default())?;

        Ok(Self { output, limits })
    }
}

impl OutputFormat {
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.eq_ignore_ascii_case("table") {
            Some(Self::Table)
        } else if value.eq_ignore_ascii_case("json") {
            Some(Self::Json)
        } else {
            None
        }
    }
}

fn parse_output(raw: RawOutputConfig) -> Result<OutputConfig, ConfigError> {
    let format = match raw.format {
        Some(value) => OutputFormat::parse(&value).ok_or_else(|| ConfigError::InvalidField {
            field: "output.format",
            reason: "must be `table` or `json`".to_string(),
        })?,
        None => DEFAULT_OUTPUT_FORMAT,
    };

    Ok(OutputConfig { format })
}

fn parse_limits(raw: RawLimitsConfig) -> Result<LimitsConfig, ConfigError> {
    let max_requests = bounded_u32(
        raw.max_requests
            .unwrap_or(i64::from(DEFAULT_MAX_REQUESTS)),
        "limits.max_requests",
        1,
        MAX_REQUESTS_CEILING,
    )?;

    Ok(LimitsConfig { max_requests })
}

fn bounded_u32(value: i64, field: &'static str, min: u32, max: u32) -> Result<u32, ConfigError> {
    if value < i64::from(min) || value > i64::from(max) {
        return Err(ConfigError::InvalidField {
            field,
            reason: format!("must be between {min} and {max}"),
        });
    }

    u32::try_from(value).map_err(|err| ConfigError::InvalidField {
        field,
        reason: err.to_string(),
    })
}
