//! The process-wide destination of statistic lines.

use std::fmt::Debug;
use std::fmt::Display;
use std::fmt::Formatter;
use std::io::Write;
use std::sync::Mutex;
use std::sync::OnceLock;

use convert_case::Case;
use convert_case::Casing;
use log::debug;

/// How statistic lines are written: `{prefix} {name}={value}` per statistic, optionally followed
/// by a closing line once a block of statistics is complete.
pub struct StatisticOptions {
    prefix: &'static str,
    closing_line: Option<&'static str>,
    casing: Option<Case>,
    writer: Box<dyn Write + Send>,
}

impl StatisticOptions {
    fn write_statistic(&mut self, name: &str, value: &dyn Display) {
        let name = match self.casing {
            Some(casing) => name.to_case(casing),
            None => name.to_owned(),
        };
        if let Err(e) = writeln!(self.writer, "{} {name}={value}", self.prefix) {
            debug!("Could not write statistic {name}: {e}");
        }
    }

    fn close_block(&mut self) {
        if let Some(closing_line) = self.closing_line {
            if let Err(e) = writeln!(self.writer, "{closing_line}") {
                debug!("Could not write the end of the statistics: {e}");
            }
        }
        if let Err(e) = self.writer.flush() {
            debug!("Could not flush statistics: {e}");
        }
    }
}

impl Debug for StatisticOptions {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatisticOptions")
            .field("prefix", &self.prefix)
            .field("closing_line", &self.closing_line)
            .field("casing", &self.casing)
            .finish_non_exhaustive()
    }
}

static OPTIONS: OnceLock<Mutex<StatisticOptions>> = OnceLock::new();

fn with_options(action: impl FnOnce(&mut StatisticOptions)) {
    if let Some(options) = OPTIONS.get() {
        match options.lock() {
            Ok(mut options) => action(&mut options),
            Err(_) => debug!("Statistic logging is unavailable after a panic while writing"),
        }
    }
}

/// Turns statistic logging on. Until this is called every statistic is discarded; calls after
/// the first have no effect.
///
/// Statistics go to standard out unless a `writer` is given.
pub fn configure_statistic_logging(
    prefix: &'static str,
    closing_line: Option<&'static str>,
    casing: Option<Case>,
    writer: Option<Box<dyn Write + Send>>,
) {
    let _ = OPTIONS.get_or_init(|| {
        Mutex::new(StatisticOptions {
            prefix,
            closing_line,
            casing,
            writer: writer.unwrap_or_else(|| Box::new(std::io::stdout())),
        })
    });
}

pub fn log_statistic(name: impl Display, value: impl Display) {
    with_options(|options| options.write_statistic(&name.to_string(), &value));
}

/// Ends a block of statistics, e.g. with the `%%%mzn-stat-end` line that
/// [MiniZinc](https://www.minizinc.org/doc-2.7.6/en/fzn-spec.html#statistics-output) expects.
pub fn log_statistic_postfix() {
    with_options(StatisticOptions::close_block);
}

pub fn should_log_statistics() -> bool {
    OPTIONS.get().is_some()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    /// A writer whose output stays readable after it is handed to the logger.
    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0
                .lock()
                .expect("the buffer is not poisoned")
                .extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    // The options are process-wide, so this is the only test which configures them.
    #[test]
    fn statistics_are_written_with_prefix_casing_and_closing_line() {
        let buffer = SharedBuffer::default();
        configure_statistic_logging(
            "%%%mzn-stat:",
            Some("%%%mzn-stat-end"),
            Some(Case::Camel),
            Some(Box::new(buffer.clone())),
        );

        assert!(should_log_statistics());
        log_statistic("num_decisions", 12);
        log_statistic_postfix();

        let written = String::from_utf8(buffer.0.lock().expect("not poisoned").clone())
            .expect("statistics are utf-8");
        assert_eq!("%%%mzn-stat: numDecisions=12\n%%%mzn-stat-end\n", written);
    }
}
