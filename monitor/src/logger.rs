//! Logger start-up
//!
//! Logs go to stderr so stdout only carries status lines.

use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::runtime::ConfigErrors;
use log4rs::config::{Appender, Config, Logger, Root};
use log4rs::encode::pattern::PatternEncoder;
use snafu::prelude::*;
use std::path::Path;

const STDERR_APPENDER: &str = "stderr";
const LOG_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S)} {h({l})} {t} - {m}{n}";

/// Errors raised while starting the logger
#[derive(Debug, Snafu)]
pub enum LoggerError {
    /// The log configuration file could not be read or parsed.
    #[snafu(display("Could not parse {path}: {message}"))]
    File {
        /// path of the configuration file
        path: String,
        /// reason reported by log4rs
        message: String,
    },

    /// The built-in configuration is invalid.
    #[snafu(display("Could not build the default log configuration: {source}"))]
    Build {
        /// validation errors
        source: ConfigErrors,
    },

    /// A global logger was already installed.
    #[snafu(display("Could not install the logger: {source}"))]
    Install {
        /// error from the log facade
        source: log::SetLoggerError,
    },
}

/// Built-in configuration: `app::*` at info, everything else at warn, all on
/// stderr.
pub fn default_log_config() -> Result<Config, LoggerError> {
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
        .build();

    Config::builder()
        .appender(Appender::builder().build(STDERR_APPENDER, Box::new(stderr)))
        .logger(
            Logger::builder()
                .appender(STDERR_APPENDER)
                .additive(false)
                .build("app", LevelFilter::Info),
        )
        .build(Root::builder().appender(STDERR_APPENDER).build(LevelFilter::Warn))
        .context(BuildSnafu)
}

/// Whether `log_config` should be loaded from disk.
///
/// A file named explicitly (through `LOG_CONFIG`) is always used, so a typo
/// is reported instead of silently ignored.
pub fn use_log_file(log_config: &str, explicit: bool) -> bool {
    explicit || Path::new(log_config).exists()
}

/// Starts log4rs from `log_config`, or from [`default_log_config`] when the
/// file is absent and was not asked for explicitly.
pub fn init_logger(log_config: &str, explicit: bool) -> Result<(), LoggerError> {
    if use_log_file(log_config, explicit) {
        return log4rs::init_file(log_config, Default::default()).map_err(|e| {
            LoggerError::File {
                path: log_config.to_owned(),
                message: e.to_string(),
            }
        });
    }

    log4rs::init_config(default_log_config()?).context(InstallSnafu)?;
    log::debug!(
        "(init_logger) {} not found, using the built-in log configuration.",
        log_config
    );

    Ok(())
}
