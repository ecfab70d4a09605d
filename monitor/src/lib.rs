#![doc = include_str!("../README.md")]

#[macro_use]
pub mod macros;
pub mod config;
pub mod logger;
pub mod poller;

pub use crate::config::Config;
pub use crate::logger::init_logger;
pub use crate::poller::{format_status, MonitorError, StatusPoller, StatusSource};

/// Tokio signal handler that will wait for a user to press CTRL+C.
/// This signal handler can be passed to [`StatusPoller::run`] to stop the
/// polling loop between two requests.
///
/// # Examples
///
/// ## using a shutdown signal channel
/// ```
/// use neuro_monitor::{shutdown_signal, StatusPoller};
/// use std::time::Duration;
///
/// async fn monitor() {
///     let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();
///     let poller = StatusPoller::connect("127.0.0.1", 8080, Duration::from_secs(15)).unwrap();
///
///     // Send the poller the shutdown request
///     shutdown_tx.send(()).expect("Could not stop poller.");
///
///     let _ = poller
///         .run(&mut std::io::stdout(), shutdown_signal("monitor", Some(shutdown_rx)))
///         .await;
/// }
/// ```
pub async fn shutdown_signal(name: &str, shutdown_rx: Option<tokio::sync::oneshot::Receiver<()>>) {
    match shutdown_rx {
        Some(receiver) => {
            if receiver.await.is_err() {
                poller_debug!("(shutdown_signal) sender for [{}] dropped.", name);
            }
        }
        None => {
            if let Err(e) = tokio::signal::ctrl_c().await {
                poller_error!("(shutdown_signal) could not listen for ctrl-c: {}.", e);
                // Without a signal handler the loop can only end on error.
                std::future::pending::<()>().await;
            }
        }
    }

    log::warn!("(shutdown_signal) shutdown for [{}].", name);
}
