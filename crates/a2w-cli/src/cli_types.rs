use clap::ValueEnum;
use tracing::level_filters::LevelFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CliLogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl From<CliLogLevel> for LevelFilter {
    fn from(value: CliLogLevel) -> Self {
        match value {
            CliLogLevel::Debug => LevelFilter::DEBUG,
            CliLogLevel::Info => LevelFilter::INFO,
            CliLogLevel::Warn => LevelFilter::WARN,
            CliLogLevel::Error => LevelFilter::ERROR,
        }
    }
}
