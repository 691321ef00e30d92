use clap::Parser;
use dinner_order_actions::adapters::webhook;
use dinner_order_actions::domain::ports::ConfigProvider;
use dinner_order_actions::utils::error::{ActionError, ErrorSeverity};
use dinner_order_actions::utils::{logger, validation::Validate};
use dinner_order_actions::{ActionEngine, ActionRequest, CliConfig, SystemClock};
use std::net::ToSocketAddrs;
use std::sync::Arc;

fn exit_code(e: &ActionError) -> i32 {
    match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}

fn fail(context: &str, e: ActionError) -> ! {
    tracing::error!(
        "❌ {}: {} (Category: {:?}, Severity: {:?})",
        context,
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(exit_code(&e).max(1));
}

fn run_single_request(engine: &ActionEngine, path: &str) -> Result<(), ActionError> {
    let body = std::fs::read(path)?;
    let request = ActionRequest::from_slice(&body)?;
    let response = webhook::handle_request(engine, &request)?;
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load configuration: {}", e);
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    logger::init_logger(config.logging.json, config.logging.verbose);

    tracing::info!("Starting dinner-order-actions");
    tracing::debug!("Resolved config: {:?}", config);

    if let Err(e) = config.validate() {
        fail("Configuration validation failed", e);
    }

    let clock = match SystemClock::from_offset_hours(config.utc_offset_hours()) {
        Ok(clock) => clock,
        Err(e) => fail("Invalid timezone offset", e),
    };
    tracing::info!(
        "🕘 Resolving dates in {} (UTC{:+})",
        config.locale.timezone,
        config.utc_offset_hours()
    );

    let engine = Arc::new(ActionEngine::with_order_actions(
        Arc::new(clock),
        config.quantity_limits(),
    ));

    if let Some(path) = &cli.request {
        if let Err(e) = run_single_request(&engine, path) {
            fail("Request failed", e);
        }
        return Ok(());
    }

    let addr = match (config.host(), config.port())
        .to_socket_addrs()
        .ok()
        .and_then(|mut addrs| addrs.next())
    {
        Some(addr) => addr,
        None => fail(
            "Cannot bind",
            ActionError::InvalidConfigValueError {
                field: "server.host".to_string(),
                value: config.bind_address(),
                reason: "Address does not resolve".to_string(),
            },
        ),
    };

    webhook::serve(engine, addr).await;

    Ok(())
}
