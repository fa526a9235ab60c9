//! Tracing setup
//!
//! Logs go to stderr; stdout carries the MCP protocol.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default level for this crate for a given number of `-v` flags
pub fn crate_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    }
}

/// Initialize tracing
///
/// `RUST_LOG` filters as usual; this crate logs at `info` unless `-v` raises
/// it. Set `LOG_FORMAT=json` for JSON lines instead of plain text.
pub fn init_tracing(verbose: u8) -> anyhow::Result<()> {
    let directive = format!("issues_mcp={}", crate_level(verbose));
    let filter = EnvFilter::from_default_env().add_directive(directive.parse()?);

    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(filter);

    if use_json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .try_init()?;
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(false),
            )
            .try_init()?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(crate_level(0), "info");
        assert_eq!(crate_level(1), "debug");
        assert_eq!(crate_level(5), "trace");
    }
}
