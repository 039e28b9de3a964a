//! Logging configuration.
//!
//! The report itself is written to standard output, so by default diagnostics
//! only go to standard error. Journald and a log file can be enabled through
//! the configuration file.
use std::{fs::OpenOptions, path::PathBuf};

use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};
use tracing_subscriber::{
    Layer, Registry,
    filter::LevelFilter,
    layer::{Layered, SubscriberExt},
    registry::LookupSpan,
    util::SubscriberInitExt,
};

/// The subscriber the output layers are stacked on.
type LevelFiltered = Layered<LevelFilter, Registry>;

/// Where log records are emitted and at which minimum level.
#[serde_as]
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogConfig {
    /// Append log records to this file when set.
    #[serde(default = "LogConfig::default_file_path")]
    pub file_path: Option<PathBuf>,

    #[serde(default = "LogConfig::default_emit_journald")]
    pub emit_journald: bool,

    /// Logging to stdout mixes records into the report; keep it off unless
    /// the report is not consumed.
    #[serde(default = "LogConfig::default_emit_stdout")]
    pub emit_stdout: bool,

    #[serde(default = "LogConfig::default_emit_stderr")]
    pub emit_stderr: bool,

    #[serde(default = "LogConfig::default_log_level")]
    #[serde_as(as = "DisplayFromStr")]
    pub level: tracing::Level,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            file_path: Self::default_file_path(),
            emit_journald: Self::default_emit_journald(),
            emit_stdout: Self::default_emit_stdout(),
            emit_stderr: Self::default_emit_stderr(),
            level: Self::default_log_level(),
        }
    }
}

impl LogConfig {
    #[inline]
    #[must_use]
    pub const fn default_log_level() -> tracing::Level { tracing::Level::WARN }

    #[inline]
    #[must_use]
    pub const fn default_file_path() -> Option<PathBuf> { None }

    #[inline]
    #[must_use]
    pub const fn default_emit_journald() -> bool { false }

    #[inline]
    #[must_use]
    pub const fn default_emit_stdout() -> bool { false }

    #[inline]
    #[must_use]
    pub const fn default_emit_stderr() -> bool { true }

    /// Installs the global `tracing` subscriber described by this
    /// configuration.
    ///
    /// # Panics
    ///
    /// Panics if a global subscriber has already been installed.
    /// Targets that cannot be opened are skipped and reported once the
    /// subscriber is installed.
    pub fn registry(&self) {
        let mut layers: Vec<Box<dyn Layer<LevelFiltered> + Send + Sync>> = Vec::new();
        let mut unavailable = Vec::new();
        for driver in self.drivers() {
            match driver.clone().layer() {
                Some(layer) => layers.push(layer),
                None => unavailable.push(driver),
            }
        }

        tracing_subscriber::registry().with(LevelFilter::from_level(self.level)).with(layers).init();

        for driver in unavailable {
            tracing::warn!("Log target {driver:?} is unavailable, skipping it");
        }
    }

    /// Enabled output targets, standard error first.
    fn drivers(&self) -> Vec<LogDriver> {
        let Self { file_path, emit_journald, emit_stdout, emit_stderr, .. } = self;
        [
            emit_stderr.then_some(LogDriver::Stderr),
            emit_stdout.then_some(LogDriver::Stdout),
            emit_journald.then_some(LogDriver::Journald),
            file_path.clone().map(LogDriver::File),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
enum LogDriver {
    Stdout,
    Stderr,
    Journald,
    File(PathBuf),
}

impl LogDriver {
    /// Builds the layer for this driver, or `None` when the target cannot be
    /// opened (unwritable file, journald socket missing).
    #[allow(clippy::type_repetition_in_bounds)]
    fn layer<S>(self) -> Option<Box<dyn Layer<S> + Send + Sync + 'static>>
    where
        S: tracing::Subscriber,
        for<'a> S: LookupSpan<'a>,
    {
        let fmt = tracing_subscriber::fmt::layer().with_target(false);

        match self {
            Self::Stdout => Some(Box::new(fmt.with_writer(std::io::stdout))),
            Self::Stderr => Some(Box::new(fmt.with_writer(std::io::stderr))),
            Self::File(path) => {
                let file = OpenOptions::new().create(true).append(true).open(path).ok()?;
                Some(Box::new(fmt.with_ansi(false).with_writer(file)))
            }
            Self::Journald => Some(Box::new(tracing_journald::layer().ok()?)),
        }
    }
}
