//! Startup logic for Flowgate: logging, configuration and the gateway.

use std::path::Path;
use std::sync::{Arc, OnceLock};

use anyhow::Context;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use flowgate_api::{AppState, GatewayConfig, GatewayServer};
use flowgate_config::{Config, ConfigLoader, ConfigValidator};

/// Keeps the non-blocking file writer alive for the life of the process.
static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Initialize tracing with console output and, optionally, daily-rotated
/// log files under `log_dir`.
///
/// `RUST_LOG` controls the filter; the default is `info`.
pub(crate) fn init_tracing(log_dir: Option<&Path>, json: bool) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let console = if json {
        fmt::layer().json().boxed()
    } else {
        fmt::layer().with_target(true).boxed()
    };

    let file = match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("creating log directory {}", dir.display()))?;
            let appender = RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .filename_prefix("flowgate")
                .filename_suffix("log")
                .max_log_files(14)
                .build(dir)
                .context("building rolling log appender")?;
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let _ = LOG_GUARD.set(guard);
            Some(fmt::layer().with_writer(writer).with_ansi(false).boxed())
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console)
        .with(file)
        .try_init()
        .context("installing tracing subscriber")?;

    Ok(())
}

/// Load the configuration file (missing is fine), overlay the environment
/// and validate. Warnings are logged; any error aborts startup.
pub(crate) fn load_config(path: &Path) -> anyhow::Result<Config> {
    let config = ConfigLoader::load_or_default(path)
        .with_context(|| format!("loading configuration from {}", path.display()))?;

    let warnings = ConfigValidator::validate(&config)
        .into_result()
        .context("invalid configuration")?;
    for warning in warnings {
        warn!(path = %warning.path, "{}", warning.message);
    }

    Ok(config)
}

/// Build the gateway from `config` and serve until Ctrl-C.
pub(crate) async fn run_server(
    config: &Config,
    host: Option<String>,
    port: Option<u16>,
) -> anyhow::Result<()> {
    let state = Arc::new(AppState::from_config(config).context("building application state")?);
    let gateway = gateway_config(config, host, port);

    info!(
        flows = ?state.flows.flow_types().collect::<Vec<_>>(),
        base_url = %config.gumloop.base_url,
        "Starting Flowgate"
    );

    let server = GatewayServer::new(gateway, state);
    server
        .run()
        .await
        .with_context(|| format!("serving on {}", server.addr()))?;

    info!("Flowgate stopped");
    Ok(())
}

/// Listener settings: CLI flags win over the config file.
fn gateway_config(config: &Config, host: Option<String>, port: Option<u16>) -> GatewayConfig {
    GatewayConfig::new(
        host.unwrap_or_else(|| config.server.host.clone()),
        port.unwrap_or(config.server.port),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_config_from_file() {
        let file = write_config(
            r#"
[server]
port = 9100

[gumloop]
api_key = "file-key"
user_id = "file-user"
"#,
        );

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.server.port, 9100);
        assert_eq!(config.flows.saved_items.len(), 3);
    }

    #[test]
    fn test_load_config_rejects_invalid() {
        let file = write_config(
            r#"
[gumloop]
api_key = "file-key"
user_id = "file-user"

[polling]
interval_ms = 0
"#,
        );

        let err = load_config(file.path()).unwrap_err();
        assert!(format!("{:#}", err).contains("invalid configuration"));
    }

    #[test]
    fn test_gateway_config_cli_wins() {
        let config = Config::default();
        let gateway = gateway_config(&config, Some("127.0.0.1".to_string()), None);
        assert_eq!(gateway.host, "127.0.0.1");
        assert_eq!(gateway.port, config.server.port);

        let gateway = gateway_config(&config, None, Some(9000));
        assert_eq!(gateway.host, config.server.host);
        assert_eq!(gateway.port, 9000);
    }
}
