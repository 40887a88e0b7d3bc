//! Drives the configuration event reporter through a simulated fetch cycle.
//!
//! Run with `CONFIG_EVENTS_LEVEL=verbose` to see the begin/end fetch events, and
//! `RUST_LOG` to adjust the subscriber filter.

use std::io;
use std::time::Duration;

use anyhow::Result;
use http::StatusCode;
use metricsystem_config::events::{ConfigurationEvents, ReporterSettings};
use metricsystem_config::primitives::ConfigurationSource;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Canned outcome for one simulated request.
enum Outcome {
    Content { changed: bool },
    Status(StatusCode),
    Fault(io::Error),
}

/// Stand-in for the HTTP fetch loop that owns the real sources.
struct Poller {
    events: ConfigurationEvents,
    sources: Vec<ConfigurationSource>,
}

impl Poller {
    fn new(events: ConfigurationEvents, sources: Vec<ConfigurationSource>) -> Self {
        Self { events, sources }
    }

    async fn poll(&self, script: &[Outcome]) {
        for (source, outcome) in self.sources.iter().zip(script) {
            self.events.report_begin_fetch(source);
            tokio::time::sleep(Duration::from_millis(5)).await;
            match outcome {
                Outcome::Content { changed } => self.events.report_end_fetch(source, *changed),
                Outcome::Status(status) => self.events.report_fetch_failed(
                    source,
                    *status,
                    status.canonical_reason().unwrap_or_default(),
                ),
                Outcome::Fault(error) => self.events.report_exception(source, error),
            }
        }
        self.events
            .report_info(&self.sources, "configuration poll completed");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,MetricSystem-Configuration=debug"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let settings = ReporterSettings::from_env()?;
    info!(?settings, "=== MetricSystem configuration events ===");

    let events = ConfigurationEvents::tracing(settings);
    let sources = [
        "https://config.example/counters.json",
        "https://config.example/histograms.json",
        "https://mirror.example/counters.json",
        "file:///etc/metricsystem/defaults.json",
    ]
    .into_iter()
    .map(ConfigurationSource::new)
    .collect::<Result<Vec<_>, _>>()?;

    let poller = Poller::new(events.clone(), sources);
    poller
        .poll(&[
            Outcome::Content { changed: true },
            Outcome::Status(StatusCode::NOT_FOUND),
            Outcome::Fault(io::Error::new(
                io::ErrorKind::ConnectionRefused,
                "connection refused",
            )),
            Outcome::Content { changed: false },
        ])
        .await;

    events.report_warning(None::<&ConfigurationSource>, "no fallback source configured");
    events.report_error(["inline"], "rejected inline override");
    Ok(())
}
