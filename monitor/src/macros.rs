//! log macro's for the poller

/// Writes an info! message to the app::poller logger
#[macro_export]
macro_rules! poller_info {
    ($($arg:tt)+) => {
        log::info!(target: "app::poller", $($arg)+);
    };
}

/// Writes an error! message to the app::poller logger
#[macro_export]
macro_rules! poller_error {
    ($($arg:tt)+) => {
        log::error!(target: "app::poller", $($arg)+);
    };
}

/// Writes a debug! message to the app::poller logger
#[macro_export]
macro_rules! poller_debug {
    ($($arg:tt)+) => {
        log::debug!(target: "app::poller", $($arg)+);
    };
}
