//! Main function starting the status monitor.

use log::{error, info};
use neuro_monitor::{init_logger, shutdown_signal, Config, StatusPoller};

#[tokio::main(flavor = "current_thread")]
#[cfg(not(tarpaulin_include))]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Will use default config settings if no environment vars are found.
    let config = Config::try_from_env().unwrap_or_default();

    // Start Logger, falling back to stderr when no config file is around
    let explicit = std::env::var_os("LOG_CONFIG").is_some();
    if let Err(e) = init_logger(&config.log_config, explicit) {
        eprintln!("(logger) {}.", e);
        return Err(e.into());
    }

    let poller = StatusPoller::connect(
        &config.server_host_grpc,
        config.server_port_grpc,
        config.poll_interval(),
    )?;
    info!("(main) monitoring {}.", poller.address());

    let mut stdout = std::io::stdout();
    if let Err(e) = poller.run(&mut stdout, shutdown_signal("monitor", None)).await {
        error!("(main) {}", e);
        return Err(e.into());
    }

    info!("(main) monitor shutdown.");
    Ok(())
}
