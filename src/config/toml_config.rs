use crate::adapters::clock::SEOUL_UTC_OFFSET_HOURS;
use crate::domain::model::QuantityLimits;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{ActionError, Result};
use crate::utils::validation::{
    validate_bind_host, validate_non_empty_string, validate_positive_number, validate_range,
    Validate,
};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

static ENV_VAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\$\{([^}]+)\}").expect("valid env pattern"));

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub server: ServerConfig,
    pub locale: LocaleConfig,
    pub order: OrderConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5055,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LocaleConfig {
    /// Informational; date math only uses the fixed offset.
    pub timezone: String,
    pub utc_offset_hours: i32,
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            timezone: "Asia/Seoul".to_string(),
            utc_offset_hours: SEOUL_UTC_OFFSET_HOURS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderConfig {
    pub min_quantity: u32,
    pub max_quantity: u32,
}

impl Default for OrderConfig {
    fn default() -> Self {
        let limits = QuantityLimits::default();
        Self {
            min_quantity: limits.min as u32,
            max_quantity: limits.max as u32,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub json: bool,
    pub verbose: bool,
}

impl TomlConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ActionError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// Parse TOML text after `${VAR}` substitution.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| ActionError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Unset variables are left as written so validation can point at them.
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .to_string()
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_bind_host("server.host", &self.server.host)?;
        validate_positive_number("server.port", u32::from(self.server.port), 1)?;
        validate_non_empty_string("locale.timezone", &self.locale.timezone)?;
        validate_range("locale.utc_offset_hours", self.locale.utc_offset_hours, -12, 14)?;
        validate_positive_number("order.min_quantity", self.order.min_quantity, 1)?;

        if self.order.min_quantity > self.order.max_quantity {
            return Err(ActionError::InvalidConfigValueError {
                field: "order.max_quantity".to_string(),
                value: self.order.max_quantity.to_string(),
                reason: format!(
                    "Must not be below order.min_quantity ({})",
                    self.order.min_quantity
                ),
            });
        }

        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl ConfigProvider for TomlConfig {
    fn host(&self) -> &str {
        &self.server.host
    }

    fn port(&self) -> u16 {
        self.server.port
    }

    fn utc_offset_hours(&self) -> i32 {
        self.locale.utc_offset_hours
    }

    fn quantity_limits(&self) -> QuantityLimits {
        QuantityLimits {
            min: i64::from(self.order.min_quantity),
            max: i64::from(self.order.max_quantity),
        }
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
