//! Terminal dashboard that polls the humidity API.
//!
//! The [`Dashboard`] holds the last successful history and a [`Phase`]
//! (idle, loading, error). A failed fetch or clear only changes the phase;
//! the displayed history is replaced by successful fetches alone.

pub mod client;
pub mod render;

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::time::{interval, MissedTickBehavior};

use crate::humidity::HumidityResponse;

pub use client::{ClientError, HumidityClient};

/// Where the dashboard gets its data from.
#[async_trait]
pub trait HumiditySource: Send + Sync {
    async fn fetch_history(&self) -> Result<Vec<HumidityResponse>, ClientError>;

    async fn clear_history(&self) -> Result<(), ClientError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Loading,
    Error(String),
}

#[derive(Debug, Default)]
pub struct Dashboard {
    readings: Vec<HumidityResponse>,
    phase: Phase,
}

impl Dashboard {
    #[must_use]
    pub fn readings(&self) -> &[HumidityResponse] {
        &self.readings
    }

    /// Most recent reading, if any.
    #[must_use]
    pub fn current(&self) -> Option<&HumidityResponse> {
        self.readings.first()
    }

    #[must_use]
    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Loading
    }

    /// Enter the loading phase, dropping any previous error.
    pub fn begin(&mut self) {
        self.phase = Phase::Loading;
    }

    pub fn finish_fetch(&mut self, result: Result<Vec<HumidityResponse>, ClientError>) {
        match result {
            Ok(readings) => {
                self.readings = readings;
                self.phase = Phase::Idle;
            }
            Err(e) => self.fail(e.to_string()),
        }
    }

    pub fn fail(&mut self, message: String) {
        self.phase = Phase::Error(message);
    }

    /// Fetch the history and display it.
    pub async fn refresh<S: HumiditySource + ?Sized>(&mut self, source: &S) {
        self.begin();
        let result = source.fetch_history().await;
        if let Err(e) = &result {
            tracing::warn!(error = %e, "Failed to fetch humidity history");
        }
        self.finish_fetch(result);
    }

    /// Clear the remote history, then fetch again on success.
    pub async fn clear<S: HumiditySource + ?Sized>(&mut self, source: &S) {
        self.begin();
        match source.clear_history().await {
            Ok(()) => self.refresh(source).await,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to clear humidity history");
                self.fail(e.to_string());
            }
        }
    }
}

/// Manual actions typed on stdin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Refresh,
    Clear,
    Quit,
}

impl Command {
    #[must_use]
    pub fn parse(line: &str) -> Option<Self> {
        match line.trim().to_lowercase().as_str() {
            "r" | "refresh" => Some(Self::Refresh),
            "c" | "clear" => Some(Self::Clear),
            "q" | "quit" | "exit" => Some(Self::Quit),
            _ => None,
        }
    }
}

/// Poll `source` every `poll_interval` (first fetch immediately) and act on
/// commands read line by line from `commands`, until `q` or `shutdown`
/// resolves. `shutdown` is also raced against in-flight requests.
///
/// `redraw` is called when a request starts and again when it finishes.
pub async fn run<S, R, F, D>(
    source: &S,
    poll_interval: Duration,
    commands: R,
    shutdown: F,
    mut redraw: D,
) -> Dashboard
where
    S: HumiditySource + ?Sized,
    R: AsyncBufRead + Unpin,
    F: Future<Output = ()>,
    D: FnMut(&Dashboard),
{
    let mut dashboard = Dashboard::default();
    let mut ticker = interval(poll_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut lines = commands.lines();
    let mut commands_open = true;

    let mut shutdown = std::pin::pin!(shutdown);

    tracing::info!(interval = ?poll_interval, "Starting humidity poller");

    loop {
        let command = tokio::select! {
            biased;
            () = &mut shutdown => break,
            _ = ticker.tick() => Command::Refresh,
            line = lines.next_line(), if commands_open => match line {
                Ok(Some(line)) => match Command::parse(&line) {
                    Some(command) => command,
                    None => {
                        tracing::debug!(input = %line.trim(), "Ignoring unknown command");
                        continue;
                    }
                },
                Ok(None) => {
                    commands_open = false;
                    continue;
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Stopped reading commands");
                    commands_open = false;
                    continue;
                }
            },
        };

        if command == Command::Quit {
            break;
        }

        dashboard.begin();
        redraw(&dashboard);

        let stopped = {
            let work = async {
                match command {
                    Command::Clear => dashboard.clear(source).await,
                    Command::Refresh | Command::Quit => dashboard.refresh(source).await,
                }
            };
            tokio::select! {
                biased;
                () = &mut shutdown => true,
                () = work => false,
            }
        };
        if stopped {
            break;
        }

        redraw(&dashboard);
    }

    tracing::info!("Stopping humidity poller");
    dashboard
}
