use std::io::Write;

use env_logger::{fmt::Formatter, Builder, Target};
use log::Level;

use crate::config::OptimizerConfig;
use crate::error::{OptimizerError, Result};

/// Installs the global logger. Call once from the binary.
pub fn init_logger(config: &OptimizerConfig) -> Result<()> {
    let log_timestamp = config.log_timestamp;

    let mut builder = Builder::new();
    builder
        .filter_level(config.level_filter())
        .write_style(env_logger::WriteStyle::Never)
        .target(Target::Stderr)
        .format(move |buf: &mut Formatter, record| {
            if log_timestamp {
                write!(buf, "{} ", buf.timestamp_millis())?;
            }
            writeln!(
                buf,
                "{} [{}] {}",
                level_tag(record.level()),
                record.target(),
                record.args()
            )
        });

    builder
        .try_init()
        .map_err(|e| OptimizerError::invalid_input(format!("logger init failed: {e}")))
}

fn level_tag(level: Level) -> &'static str {
    match level {
        Level::Error => "ERROR",
        Level::Warn => "WARN",
        Level::Info => "INFO",
        Level::Debug => "DEBUG",
        Level::Trace => "TRACE",
    }
}
