use crate::config::toml_config::TomlConfig;
use crate::utils::error::Result;
use clap::Parser;

#[derive(Debug, Clone, Default, Parser)]
#[command(name = "dinner-order-actions")]
#[command(about = "Custom action server for the dinner-course ordering bot")]
pub struct CliConfig {
    /// TOML configuration file; flags below override its values
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(long)]
    pub host: Option<String>,

    #[arg(long)]
    pub port: Option<u16>,

    /// Offset used to resolve "오늘", "내일" and friends (Seoul is 9)
    #[arg(long, allow_hyphen_values = true)]
    pub utc_offset_hours: Option<i32>,

    /// Run a single webhook request from a JSON file, print the response and exit
    #[arg(long)]
    pub request: Option<String>,

    #[arg(long, help = "Emit JSON log lines")]
    pub json_logs: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// File values (or defaults) with command-line overrides applied.
    pub fn resolve(&self) -> Result<TomlConfig> {
        let mut config = match &self.config {
            Some(path) => TomlConfig::from_file(path)?,
            None => TomlConfig::default(),
        };

        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(offset) = self.utc_offset_hours {
            config.locale.utc_offset_hours = offset;
        }
        config.logging.json |= self.json_logs;
        config.logging.verbose |= self.verbose;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_flags_override_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[server]\nhost = \"127.0.0.1\"\nport = 7070\n\n[locale]\nutc_offset_hours = 9\n")
            .unwrap();

        let cli = CliConfig::parse_from([
            "dinner-order-actions",
            "--config",
            temp_file.path().to_str().unwrap(),
            "--port",
            "8080",
            "--utc-offset-hours",
            "-5",
            "--verbose",
        ]);
        let config = cli.resolve().unwrap();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.locale.utc_offset_hours, -5);
        assert!(config.logging.verbose);
    }

    #[test]
    fn test_defaults_without_file() {
        let config = CliConfig::default().resolve().unwrap();
        assert_eq!(config.bind_address(), "0.0.0.0:5055");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let cli = CliConfig {
            config: Some("/nonexistent/actions.toml".to_string()),
            ..Default::default()
        };
        assert!(cli.resolve().is_err());
    }
}
