use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is not set.
fn default_directives(verbose: bool) -> &'static str {
    if verbose {
        // 슬롯 판정 로그(debug)까지, warp 내부 로그는 info
        "dinner_order_actions=debug,warp=info,warn"
    } else {
        "dinner_order_actions=info,warp=warn,warn"
    }
}

fn env_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)))
}

/// Pick the log format from `[logging]`.
pub fn init_logger(json: bool, verbose: bool) {
    if json {
        init_json_logger(verbose);
    } else {
        init_cli_logger(verbose);
    }
}

pub fn init_cli_logger(verbose: bool) {
    tracing_subscriber::registry()
        .with(env_filter(verbose))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(verbose)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}

/// JSON lines for log collectors when the action server runs in a container.
///
/// Each line carries the target and the enclosing `action` span, so one
/// dispatched action can be followed by sender and action name.
pub fn init_json_logger(verbose: bool) {
    tracing_subscriber::registry()
        .with(env_filter(verbose))
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_target(true)
                .with_current_span(true)
                .with_span_list(false)
                .flatten_event(true),
        )
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directives_parse() {
        for verbose in [true, false] {
            let directives = default_directives(verbose);
            assert!(directives.starts_with("dinner_order_actions="));
            assert!(directives.parse::<EnvFilter>().is_ok(), "{}", directives);
        }
        assert!(default_directives(true).contains("=debug"));
        assert!(!default_directives(false).contains("debug"));
    }
}
