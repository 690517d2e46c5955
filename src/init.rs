use tracing::Level;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::Registry;

/// Configuration of the global `tracing` subscriber that
/// [`crate::facility::TracingFacility`] writes through.
///
/// **Fields**
/// - `max_level`: most verbose level that is kept. Entries recorded as
///   `perf`/`verbose`/`debug` need at least `DEBUG`.
/// - `enable_stdout`: if `true`, a `tracing_subscriber::fmt::Layer`
///   prints entries to the console. With `false` the subscriber is
///   installed but silent.
/// - `with_target`: print the event target (`event_recorder`) in each line.
/// - `ansi`: colorize console output.
#[derive(Clone, Debug)]
pub struct SubscriberConfig {
    pub max_level: Level,
    pub enable_stdout: bool,
    pub with_target: bool,
    pub ansi: bool,
}

impl Default for SubscriberConfig {
    fn default() -> Self {
        Self {
            max_level: Level::INFO,
            enable_stdout: true,
            with_target: true,
            ansi: true,
        }
    }
}

/// Install a global `tracing` subscriber built from [`SubscriberConfig`].
///
/// **Returns**
/// - `Err(TryInitError)` if a global subscriber is already installed.
///
/// **Effects**
///
/// A [`Registry`] with a [`LevelFilter`] and, optionally, a `fmt` layer
/// becomes the process-wide default, so every recorder bound to
/// [`crate::facility::TracingFacility`] in this process writes through it.
pub fn init_tracing(config: SubscriberConfig) -> Result<(), TryInitError> {
    let filter = LevelFilter::from_level(config.max_level);

    // Two branches because the layered subscriber types differ.
    if config.enable_stdout {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(config.with_target)
            .with_ansi(config.ansi);
        Registry::default().with(filter).with(fmt_layer).try_init()
    } else {
        Registry::default().with(filter).try_init()
    }
}

/// Equivalent to calling [`init_tracing`] with
/// [`SubscriberConfig::default`].
pub fn init_tracing_default() -> Result<(), TryInitError> {
    init_tracing(SubscriberConfig::default())
}
