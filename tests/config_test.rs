use clap::Parser;
use dinner_order_actions::domain::ports::ConfigProvider;
use dinner_order_actions::utils::validation::Validate;
use dinner_order_actions::{ActionEngine, CliConfig, SystemClock};
use std::io::Write;
use std::sync::Arc;
use tempfile::NamedTempFile;

fn config_file(content: &str) -> anyhow::Result<NamedTempFile> {
    let mut file = NamedTempFile::new()?;
    file.write_all(content.as_bytes())?;
    Ok(file)
}

#[test]
fn test_config_file_drives_engine() -> anyhow::Result<()> {
    std::env::set_var("DINNER_ORDER_TEST_MAX_QTY", "5");
    let file = config_file(
        r#"
[server]
host = "127.0.0.1"
port = 5056

[locale]
timezone = "Asia/Seoul"
utc_offset_hours = 9

[order]
max_quantity = ${DINNER_ORDER_TEST_MAX_QTY}
"#,
    )?;

    let cli = CliConfig::parse_from([
        "dinner-order-actions",
        "--config",
        file.path().to_str().unwrap(),
    ]);
    let config = cli.resolve()?;
    config.validate()?;
    std::env::remove_var("DINNER_ORDER_TEST_MAX_QTY");

    assert_eq!(config.bind_address(), "127.0.0.1:5056");
    assert_eq!(config.quantity_limits().max, 5);

    let clock = SystemClock::from_offset_hours(config.utc_offset_hours())?;
    let engine = ActionEngine::with_order_actions(Arc::new(clock), config.quantity_limits());
    assert_eq!(engine.action_names().len(), 3);

    Ok(())
}

#[test]
fn test_invalid_config_is_rejected() -> anyhow::Result<()> {
    let file = config_file("[server]\nhost = \"127.0.0.1\"\nport = 0\n")?;

    let cli = CliConfig::parse_from([
        "dinner-order-actions",
        "--config",
        file.path().to_str().unwrap(),
    ]);
    let config = cli.resolve()?;
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("server.port"));

    Ok(())
}

#[test]
fn test_missing_config_file() {
    let cli = CliConfig::parse_from([
        "dinner-order-actions",
        "--config",
        "/nonexistent/dinner-order.toml",
    ]);
    assert!(cli.resolve().is_err());
}
