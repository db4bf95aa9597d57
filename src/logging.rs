use anyhow::Context;
use log::LevelFilter;
use log4rs::append::console::ConsoleAppender;
use log4rs::append::file::FileAppender;
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use std::path::Path;

/// One line per event, `timestamp LEVEL: message`, identical on both
/// destinations.
const LINE_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S)} {l}: {m}{n}";

/// Install INFO-level logging to the given append-only file, mirrored
/// to the console. The returned handle lives for the whole process;
/// appenders flush as each line is written.
pub fn init<P: AsRef<Path>>(log_path: P) -> anyhow::Result<log4rs::Handle> {
    let file = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(LINE_PATTERN)))
        .append(true)
        .build(log_path)
        .context("opening log file")?;

    let console = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new(LINE_PATTERN)))
        .build();

    let config = Config::builder()
        .appender(Appender::builder().build("file", Box::new(file)))
        .appender(Appender::builder().build("console", Box::new(console)))
        .build(
            Root::builder()
                .appender("file")
                .appender("console")
                .build(LevelFilter::Info),
        )
        .context("assembling logging config")?;

    log4rs::init_config(config).context("installing logger")
}
