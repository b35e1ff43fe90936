use core::fmt::Arguments;
use log::Level;

/// Log target of all collector messages
pub const COLLECTOR_LOG_TARGET: &str = "    github";

/// Logging capability supplied by whatever hosts the collector.
pub trait Logger: Send + Sync {
    fn log(&self, level: Level, args: Arguments<'_>);

    fn debug(&self, args: Arguments<'_>) {
        self.log(Level::Debug, args);
    }

    fn info(&self, args: Arguments<'_>) {
        self.log(Level::Info, args);
    }

    fn warn(&self, args: Arguments<'_>) {
        self.log(Level::Warn, args);
    }

    fn error(&self, args: Arguments<'_>) {
        self.log(Level::Error, args);
    }
}

/// Logger that forwards to the `log` crate facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct FacadeLogger;

impl Logger for FacadeLogger {
    fn log(&self, level: Level, args: Arguments<'_>) {
        log::log!(target: COLLECTOR_LOG_TARGET, level, "{args}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Debug, Default)]
    struct CapturingLogger {
        lines: Mutex<Vec<(Level, String)>>,
    }

    impl Logger for CapturingLogger {
        fn log(&self, level: Level, args: Arguments<'_>) {
            self.lines.lock().unwrap().push((level, args.to_string()));
        }
    }

    #[test]
    fn test_provided_methods_set_level() {
        let logger = CapturingLogger::default();
        let repo = "a/b";

        logger.debug(format_args!("debug {repo}"));
        logger.info(format_args!("info {repo}"));
        logger.warn(format_args!("warn {repo}"));
        logger.error(format_args!("error {repo}"));

        let lines = logger.lines.lock().unwrap();
        assert_eq!(
            *lines,
            [
                (Level::Debug, "debug a/b".to_string()),
                (Level::Info, "info a/b".to_string()),
                (Level::Warn, "warn a/b".to_string()),
                (Level::Error, "error a/b".to_string()),
            ]
        );
    }

    #[test]
    fn test_facade_logger_does_not_require_installed_logger() {
        FacadeLogger.info(format_args!("nobody is listening"));
    }
}
