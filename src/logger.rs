use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use spdlog::sink::{RotatingFileSink, RotationPolicy, Sink, StdStream, StdStreamSink};
use spdlog::{Level, LevelFilter, Logger};

use crate::config::{Config, Log, LogLevel};

impl From<LogLevel> for Level {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Critical => Level::Critical,
            LogLevel::Error => Level::Error,
            LogLevel::Warn => Level::Warn,
            LogLevel::Info => Level::Info,
            LogLevel::Debug => Level::Debug,
            LogLevel::Trace => Level::Trace,
        }
    }
}

// Warnings and errors go to stderr, the rest to stdout
fn console_sinks() -> spdlog::Result<Vec<Arc<dyn Sink>>> {
    let stdout = StdStreamSink::builder()
        .std_stream(StdStream::Stdout)
        .level_filter(LevelFilter::MoreVerbose(Level::Warn))
        .build()?;

    let stderr = StdStreamSink::builder()
        .std_stream(StdStream::Stderr)
        .level_filter(LevelFilter::MoreSevereEqual(Level::Warn))
        .build()?;

    Ok(vec![Arc::new(stdout) as Arc<dyn Sink>, Arc::new(stderr) as Arc<dyn Sink>])
}

fn daily_file_sink(location: &Path, max_files: usize) -> spdlog::Result<Arc<dyn Sink>> {
    let sink: Arc<dyn Sink> = Arc::new(RotatingFileSink::builder()
        .base_path(location)
        .rotation_policy(RotationPolicy::Daily { hour: 0, minute: 0 })
        .max_files(max_files)
        .rotate_on_open(false)
        .build()?);
    Ok(sink)
}

/// Console output is kept when no log file is configured, so messages are never dropped.
pub fn build_logger(log: &Log) -> spdlog::Result<Arc<Logger>> {
    let mut sinks = vec![];
    if let Some(ref location) = log.location {
        sinks.push(daily_file_sink(location, log.max_files)?);
    }
    if log.log_to_console || log.location.is_none() {
        sinks.extend(console_sinks()?);
    }

    let logger = Arc::new(Logger::builder()
        .sinks(sinks)
        .level_filter(LevelFilter::MoreSevereEqual(log.level.into()))
        .flush_level_filter(LevelFilter::MoreSevereEqual(Level::Info))
        .build()?);

    if log.flush_period_secs > 0 {
        logger.set_flush_period(Some(Duration::from_secs(log.flush_period_secs)));
    }

    Ok(logger)
}

/// Without a `[log]` section the default console logger stays in place.
pub fn configure_logger(config: &Config) -> spdlog::Result<()> {
    if let Some(ref log) = config.log {
        spdlog::set_default_logger(build_logger(log)?);
    }
    Ok(())
}
