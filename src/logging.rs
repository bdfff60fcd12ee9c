use log4rs::append::console::ConsoleAppender;
use log4rs::append::file::FileAppender;
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use crate::config::General;
use crate::errors::LoggingError;

const LOG_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S)} {l:<5} {t} - {m}{n}";

/// Builds the log4rs configuration, a file appender and optionally a stdout appender
///
/// # Arguments
///
/// * 'general' - general configuration with log path, level and stdout flag
pub fn build_log_config(general: &General) -> Result<Config, LoggingError> {
    let file = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
        .build(&general.log_path)?;

    let mut builder = Config::builder()
        .appender(Appender::builder().build("file", Box::new(file)));
    let mut root = Root::builder().appender("file");

    if general.log_to_stdout {
        let stdout = ConsoleAppender::builder()
            .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
            .build();

        builder = builder.appender(Appender::builder().build("stdout", Box::new(stdout)));
        root = root.appender("stdout");
    }

    Ok(builder.build(root.build(general.log_level))?)
}

/// Sets up logging for the process
///
/// # Arguments
///
/// * 'general' - general configuration with log path, level and stdout flag
pub fn setup_logger(general: &General) -> Result<(), LoggingError> {
    let config = build_log_config(general)?;
    let _ = log4rs::init_config(config)?;

    Ok(())
}
