//! Periodic status polling of a neuroevolution run

use neuro_monitor_client_grpc::prelude::*;
use snafu::prelude::*;
use std::future::Future;
use std::io::Write;
use std::time::Duration;
use tonic::async_trait;

/// Name of the remote service, used in log messages
pub const SERVICE_NAME: &str = "neuro";

/// Errors ending the polling loop
#[derive(Debug, Snafu)]
pub enum MonitorError {
    /// The status request failed.
    #[snafu(display("Status request failed: {source}"))]
    Rpc {
        /// request error
        source: RpcError,
    },

    /// The status line could not be written.
    #[snafu(display("Could not write the status line: {source}"))]
    Output {
        /// write error
        source: std::io::Error,
    },
}

/// Anything able to answer a status request
#[async_trait]
pub trait StatusSource: Send + Sync {
    /// Address the requests are sent to
    fn address(&self) -> &str;

    /// Fetch the current status of the run
    async fn fetch_status(&self) -> Result<StatusReply, RpcError>;
}

#[async_trait]
impl StatusSource for NeuroGrpcClient {
    fn address(&self) -> &str {
        self.get_address()
    }

    async fn fetch_status(&self) -> Result<StatusReply, RpcError> {
        self.status().await
    }
}

/// Formats a reply as a single status line
pub fn format_status(reply: &StatusReply) -> String {
    format!(
        "i: {} \t Top score: {} \t Top seed: {}",
        reply.num_iter,
        format_score(reply.top_score),
        reply.top_individual
    )
}

/// Integral scores keep one decimal (`1.0`). Magnitudes below `1e-4` or from
/// `1e16` up use exponent notation with a signed, two-digit exponent
/// (`1e-05`, `1.5e+16`). Everything else uses the shortest representation
/// that round-trips.
fn format_score(score: f64) -> String {
    if score.is_nan() {
        String::from("nan")
    } else if !score.is_finite() {
        score.to_string()
    } else if score != 0.0 && (score.abs() < 1e-4 || score.abs() >= 1e16) {
        format_exponent(score)
    } else if score.fract() == 0.0 {
        format!("{score:.1}")
    } else {
        score.to_string()
    }
}

fn format_exponent(score: f64) -> String {
    let formatted = format!("{score:e}");
    match formatted.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{mantissa}e{sign}{digits:0>2}")
        }
        None => formatted,
    }
}

/// Polls a status source at a fixed interval and prints each reply
#[derive(Debug)]
pub struct StatusPoller<S> {
    source: S,
    interval: Duration,
}

impl StatusPoller<NeuroGrpcClient> {
    /// Creates a poller on an insecure channel to `host:port`.
    ///
    /// The channel connects on first use, so an unreachable server is only
    /// reported by [`StatusPoller::poll`].
    pub fn connect(host: &str, port: u16, interval: Duration) -> Result<Self, RpcError> {
        let client = NeuroGrpcClient::new_client(host, port, SERVICE_NAME)?;
        poller_info!("(connect) channel to {} created.", client.get_address());

        Ok(Self::new(client, interval))
    }
}

impl<S: StatusSource> StatusPoller<S> {
    /// Creates a poller on top of an existing source
    pub fn new(source: S, interval: Duration) -> Self {
        Self { source, interval }
    }

    /// Address of the polled service
    pub fn address(&self) -> &str {
        self.source.address()
    }

    /// Delay between two polls
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Issues a single status request
    pub async fn poll(&self) -> Result<StatusReply, RpcError> {
        poller_debug!("(poll) requesting status from {}.", self.address());
        self.source.fetch_status().await
    }

    /// Polls, writes the status line to `out` and sleeps, until a poll fails
    /// or `shutdown` resolves.
    ///
    /// The first poll is issued immediately. A failed poll writes nothing and
    /// ends the loop with the error; there is no retry.
    pub async fn run<W, F>(&self, out: &mut W, shutdown: F) -> Result<(), MonitorError>
    where
        W: Write,
        F: Future<Output = ()>,
    {
        poller_info!(
            "(run) polling {} every {:?}.",
            self.address(),
            self.interval
        );
        tokio::pin!(shutdown);

        loop {
            let reply = tokio::select! {
                reply = self.poll() => match reply {
                    Ok(reply) => reply,
                    Err(e) => {
                        poller_error!("(run) {}", e);
                        return Err(e).context(RpcSnafu);
                    }
                },
                _ = &mut shutdown => break,
            };

            writeln!(out, "{}", format_status(&reply)).context(OutputSnafu)?;
            out.flush().context(OutputSnafu)?;

            tokio::select! {
                _ = tokio::time::sleep(self.interval) => {}
                _ = &mut shutdown => break,
            }
        }

        poller_info!("(run) shutdown requested, stopping.");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use neuro_monitor_client_grpc::mock;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use tokio::time::Instant;

    /// Hands out scripted replies and records when each request was made
    #[derive(Debug)]
    struct ScriptedSource {
        replies: Mutex<VecDeque<Result<StatusReply, RpcError>>>,
        calls: Mutex<Vec<Instant>>,
    }

    impl ScriptedSource {
        fn new(replies: Vec<Result<StatusReply, RpcError>>) -> Self {
            Self {
                replies: Mutex::new(replies.into()),
                calls: Mutex::new(vec![]),
            }
        }
    }

    #[async_trait]
    impl StatusSource for ScriptedSource {
        fn address(&self) -> &str {
            "http://127.0.0.1:8080"
        }

        async fn fetch_status(&self) -> Result<StatusReply, RpcError> {
            self.calls.lock().unwrap().push(Instant::now());
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(unavailable)
        }
    }

    fn unavailable() -> Result<StatusReply, RpcError> {
        Err(RpcError::Request {
            address: String::from("http://127.0.0.1:8080"),
            source: tonic::Status::unavailable("connection refused"),
        })
    }

    #[test]
    fn test_format_status() {
        assert_eq!(
            format_status(&mock::status_reply()),
            "i: 5 \t Top score: 0.42 \t Top seed: seed-7"
        );
    }

    #[test]
    fn test_format_score() {
        assert_eq!(format_score(1.0), "1.0");
        assert_eq!(format_score(-3.0), "-3.0");
        assert_eq!(format_score(0.1 + 0.2), "0.30000000000000004");
        assert_eq!(format_score(f64::INFINITY), "inf");
        assert_eq!(format_score(f64::NAN), "nan");
        assert_eq!(format_score(0.0), "0.0");
        assert_eq!(format_score(0.0001), "0.0001");
        assert_eq!(format_score(1e-5), "1e-05");
        assert_eq!(format_score(-2.5e-7), "-2.5e-07");
        assert_eq!(format_score(1.23e-100), "1.23e-100");
        assert_eq!(format_score(9999999999999998.0), "9999999999999998.0");
        assert_eq!(format_score(1e16), "1e+16");
        assert_eq!(format_score(1.5e16), "1.5e+16");
        assert_eq!(format_score(1e300), "1e+300");
    }

    #[tokio::test]
    async fn test_poll() {
        let poller = StatusPoller::new(
            ScriptedSource::new(vec![Ok(mock::status_reply())]),
            Duration::from_secs(15),
        );

        let reply = poller.poll().await;
        assert!(reply.is_ok());
        assert_eq!(reply.unwrap(), mock::status_reply());

        let reply = poller.poll().await;
        assert!(matches!(reply, Err(RpcError::Request { .. })));
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_waits_between_lines() {
        let source = ScriptedSource::new(vec![
            Ok(mock::status_reply()),
            Ok(mock::status_reply()),
            unavailable(),
        ]);
        let poller = StatusPoller::new(source, Duration::from_secs(15));

        let mut out: Vec<u8> = vec![];
        let result = poller.run(&mut out, std::future::pending()).await;
        assert!(matches!(result, Err(MonitorError::Rpc { .. })));

        let out = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines
            .iter()
            .all(|line| *line == "i: 5 \t Top score: 0.42 \t Top seed: seed-7"));

        let calls = poller.source.calls.lock().unwrap();
        assert_eq!(calls.len(), 3);
        for pair in calls.windows(2) {
            assert!(pair[1] - pair[0] >= Duration::from_secs(15));
        }
    }

    #[tokio::test]
    async fn test_run_unreachable_prints_nothing() {
        let poller = StatusPoller::new(ScriptedSource::new(vec![]), Duration::from_secs(15));

        let mut out: Vec<u8> = vec![];
        let result = poller.run(&mut out, std::future::pending()).await;

        match result {
            Err(MonitorError::Rpc { source }) => {
                assert!(matches!(source, RpcError::Request { .. }))
            }
            other => panic!("expected an rpc error, got {:?}", other),
        }
        assert!(out.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_stops_on_shutdown() {
        let source = ScriptedSource::new(vec![
            Ok(mock::status_reply()),
            Ok(mock::status_reply()),
            Ok(mock::status_reply()),
        ]);
        let poller = StatusPoller::new(source, Duration::from_secs(15));

        // Fires while the poller sleeps after its second line.
        let shutdown = tokio::time::sleep(Duration::from_secs(20));

        let mut out: Vec<u8> = vec![];
        let result = poller.run(&mut out, shutdown).await;
        assert!(result.is_ok());

        let out = String::from_utf8(out).unwrap();
        assert_eq!(out.lines().count(), 2);
        assert_eq!(poller.source.calls.lock().unwrap().len(), 2);
    }
}
