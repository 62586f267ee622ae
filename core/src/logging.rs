//! Context-tagged diagnostic logging.
//!
//! # Design
//! Call sites depend on the `Logger` trait and obtain an instance from
//! `create_logger`, which currently always returns a `ConsoleLogger`. Every
//! line has the shape `[<timestamp>] [<context>] <message>`, where the
//! timestamp is taken at the moment of the call in UTC with millisecond
//! precision. The level is conveyed only by the stream: info goes to stdout,
//! warn and error go to stderr.
//!
//! Loggers are immutable after construction and never shared through a
//! global; each component asks the factory for its own.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, SecondsFormat, Utc};

/// A sink for context-tagged diagnostic messages.
pub trait Logger: Send + Sync {
    /// Label identifying the component that owns this logger.
    fn context(&self) -> &str;

    fn info(&self, message: &str);

    fn warn(&self, message: &str);

    fn error(&self, message: &str);
}

/// Create a logger bound to `context`.
pub fn create_logger(context: impl Into<String>) -> Arc<dyn Logger> {
    Arc::new(ConsoleLogger::new(context))
}

/// Current UTC time as `YYYY-MM-DDTHH:MM:SS.mmmZ`.
pub fn timestamp_now() -> String {
    format_timestamp(&Utc::now())
}

pub fn format_timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn format_line(timestamp: &str, context: &str, message: &str) -> String {
    format!("[{timestamp}] [{context}] {message}")
}

type Sink = Arc<Mutex<Box<dyn Write + Send>>>;

/// Writes formatted lines to an "out" stream (info) and an "err" stream
/// (warn, error). `new` binds them to stdout and stderr.
#[derive(Clone)]
pub struct ConsoleLogger {
    context: String,
    out: Sink,
    err: Sink,
}

impl ConsoleLogger {
    pub fn new(context: impl Into<String>) -> Self {
        Self::with_writers(context, io::stdout(), io::stderr())
    }

    pub fn with_writers<O, E>(context: impl Into<String>, out: O, err: E) -> Self
    where
        O: Write + Send + 'static,
        E: Write + Send + 'static,
    {
        Self {
            context: context.into(),
            out: Arc::new(Mutex::new(Box::new(out))),
            err: Arc::new(Mutex::new(Box::new(err))),
        }
    }

    fn write(&self, sink: &Sink, message: &str) {
        let line = format_line(&timestamp_now(), &self.context, message);
        // Logging stays infallible, even behind a poisoned lock.
        let mut writer = match sink.lock() {
            Ok(writer) => writer,
            Err(poisoned) => poisoned.into_inner(),
        };
        let _ = writeln!(writer, "{line}");
        let _ = writer.flush();
    }
}

impl Logger for ConsoleLogger {
    fn context(&self) -> &str {
        &self.context
    }

    fn info(&self, message: &str) {
        self.write(&self.out, message);
    }

    fn warn(&self, message: &str) {
        self.write(&self.err, message);
    }

    fn error(&self, message: &str) {
        self.write(&self.err, message);
    }
}

/// Forwards messages to `tracing` with the context as a structured field.
///
/// Not produced by `create_logger`; hand it to
/// `ProcedureClient::with_transport` when the host already runs a tracing
/// subscriber.
#[derive(Debug, Clone)]
pub struct TracingLogger {
    context: String,
}

impl TracingLogger {
    pub fn new(context: impl Into<String>) -> Self {
        Self {
            context: context.into(),
        }
    }
}

impl Logger for TracingLogger {
    fn context(&self) -> &str {
        &self.context
    }

    fn info(&self, message: &str) {
        tracing::info!(context = %self.context, "{message}");
    }

    fn warn(&self, message: &str) {
        tracing::warn!(context = %self.context, "{message}");
    }

    fn error(&self, message: &str) {
        tracing::error!(context = %self.context, "{message}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    /// In-memory writer whose contents stay readable after the logger owns it.
    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl SharedBuf {
        fn lines(&self) -> Vec<String> {
            let bytes = self.0.lock().unwrap().clone();
            String::from_utf8(bytes)
                .unwrap()
                .lines()
                .map(str::to_string)
                .collect()
        }
    }

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().write(buf)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Split `[<ts>] [<context>] <message>` into its three parts.
    fn split_line(line: &str) -> (String, String, String) {
        let rest = line.strip_prefix('[').unwrap();
        let (ts, rest) = rest.split_once("] [").unwrap();
        let (context, message) = rest.split_once("] ").unwrap();
        (ts.to_string(), context.to_string(), message.to_string())
    }

    fn capture(context: &str) -> (ConsoleLogger, SharedBuf, SharedBuf) {
        let out = SharedBuf::default();
        let err = SharedBuf::default();
        let logger = ConsoleLogger::with_writers(context, out.clone(), err.clone());
        (logger, out, err)
    }

    #[test]
    fn line_has_timestamp_context_and_message() {
        let at = Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap()
            + chrono::Duration::milliseconds(42);
        assert_eq!(
            format_line(&format_timestamp(&at), "X", "hello"),
            "[2024-03-09T14:05:07.042Z] [X] hello"
        );
    }

    #[test]
    fn whole_seconds_still_carry_milliseconds() {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(format_timestamp(&at), "2024-01-01T00:00:00.000Z");
    }

    #[test]
    fn timestamp_is_iso_8601_utc_with_millis() {
        let ts = timestamp_now();
        assert_eq!(ts.len(), 24, "{ts}");
        assert_eq!(&ts[10..11], "T");
        assert_eq!(&ts[19..20], ".");
        assert!(ts.ends_with('Z'));
        assert!(DateTime::parse_from_rfc3339(&ts).is_ok());
    }

    #[test]
    fn sequential_timestamps_do_not_decrease() {
        let first = DateTime::parse_from_rfc3339(&timestamp_now()).unwrap();
        let second = DateTime::parse_from_rfc3339(&timestamp_now()).unwrap();
        assert!(second >= first);
    }

    #[test]
    fn factory_binds_context() {
        let logger = create_logger("ApiService");
        assert_eq!(logger.context(), "ApiService");
    }

    #[test]
    fn info_goes_to_out_warn_and_error_to_err() {
        let (logger, out, err) = capture("X");
        logger.info("hello");
        logger.warn("careful");
        logger.error("broken");

        let out = out.lines();
        let err = err.lines();
        assert_eq!(out.len(), 1);
        assert_eq!(err.len(), 2);

        let (ts, context, message) = split_line(&out[0]);
        assert_eq!(context, "X");
        assert_eq!(message, "hello");
        assert_eq!(ts.len(), 24, "{ts}");
        assert!(ts.ends_with('Z'));
        assert!(DateTime::parse_from_rfc3339(&ts).is_ok());

        let messages: Vec<_> = err.iter().map(|l| split_line(l).2).collect();
        assert_eq!(messages, vec!["careful", "broken"]);
        assert!(err.iter().all(|l| split_line(l).1 == "X"));
    }

    #[test]
    fn each_line_gets_a_fresh_timestamp() {
        let (logger, out, _) = capture("X");
        logger.info("first");
        logger.info("second");

        let stamps: Vec<_> = out
            .lines()
            .iter()
            .map(|l| DateTime::parse_from_rfc3339(&split_line(l).0).unwrap())
            .collect();
        assert_eq!(stamps.len(), 2);
        assert!(stamps[1] >= stamps[0]);
    }

    #[test]
    fn loggers_keep_their_own_context() {
        let (a, a_out, _) = capture("A");
        let (b, b_out, _) = capture("B");
        a.info("from a");
        b.info("from b");

        assert_eq!(a.context(), "A");
        assert_eq!(b.context(), "B");
        assert_eq!(a_out.lines().len(), 1);
        assert_eq!(b_out.lines().len(), 1);
        assert_eq!(split_line(&a_out.lines()[0]).1, "A");
        assert_eq!(split_line(&b_out.lines()[0]).1, "B");
    }

    #[test]
    fn tracing_logger_carries_context() {
        let logger = TracingLogger::new("Search");
        assert_eq!(logger.context(), "Search");
        logger.info("no subscriber installed");
    }
}
