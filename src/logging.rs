use std::fs;

use fern::colors::{Color, ColoredLevelConfig};

use crate::config::Config;
use crate::error::Result;

/// Installs the global logger: colored records on stdout and plain records
/// in a date-based file under `log_file_path`.
pub fn setup_logger(config: &Config) -> Result<()> {
    let level = config.log_level_filter()?;
    fs::create_dir_all(&config.log_file_path)?;

    let colors_level = ColoredLevelConfig::new()
        .error(Color::Red)
        .warn(Color::Yellow)
        .info(Color::Blue)
        .debug(Color::White)
        .trace(Color::Magenta);

    let mut file_prefix = config.log_file_path.clone();
    file_prefix.push("movie-graph.");

    fern::Dispatch::new()
        .level(level)
        // Rocket's own request logging is noisy at debug.
        .level_for("rocket", level.min(log::LevelFilter::Info))
        .level_for("hyper", log::LevelFilter::Warn)
        .chain(
            fern::Dispatch::new()
                .format(move |out, message, record| {
                    out.finish(format_args!(
                        "[{}][{}][{}] {}",
                        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                        record.target(),
                        colors_level.color(record.level()),
                        message
                    ))
                })
                .chain(std::io::stdout()),
        )
        .chain(
            fern::Dispatch::new()
                .format(move |out, message, record| {
                    out.finish(format_args!(
                        "[{}][{}][{}] {}",
                        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                        record.target(),
                        record.level(),
                        message
                    ))
                })
                .chain(fern::DateBased::new(file_prefix, "%Y-%m-%d.log")),
        )
        .apply()?;

    Ok(())
}
