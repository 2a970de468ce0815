//! Console logger for build output
//!
//! Top-level lines start with an arrow marker, continuation lines are
//! indented to line up underneath. Level-tagged lines pad the level token
//! so messages align:
//!
//! ```text
//! -----> INFO:  Contributing to layer
//! -----> ERROR: download failed
//!       continuation
//! ```
//!
//! Debug output goes to the debug sink, everything else to the info sink.
//! A line is only written when its sink is configured.

use std::fmt;
use std::io::{self, Write};
use std::sync::{Arc, Mutex, PoisonError};

const PREFIX: &str = "----->";
const INDENT: &str = "      ";

/// Source of the enabled log levels (usually a resolved configuration)
pub trait LogLevels {
    fn is_debug_enabled(&self) -> bool;
    fn is_info_enabled(&self) -> bool;
}

/// Something that can be named in log output
pub trait Identifiable {
    /// `(name, description)`; either may be empty
    fn identity(&self) -> (&str, &str);
}

impl Identifiable for (&str, &str) {
    fn identity(&self) -> (&str, &str) {
        (self.0, self.1)
    }
}

type Sink = Box<dyn Write + Send>;

#[derive(Default)]
struct Sinks {
    info: Option<Sink>,
    debug: Option<Sink>,
}

/// Line-oriented build logger
///
/// Clones share the same sinks. Each call writes one complete line and
/// flushes it while holding the lock, so lines from clones never interleave.
#[derive(Clone, Default)]
pub struct Logger {
    sinks: Arc<Mutex<Sinks>>,
}

impl Logger {
    /// A logger with no sinks; every call is a no-op
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Debug to stderr and info to stdout, as enabled by `levels`
    pub fn from_levels(levels: &impl LogLevels) -> Self {
        let mut logger = Self::default();
        if levels.is_debug_enabled() {
            logger = logger.with_debug(io::stderr());
        }
        if levels.is_info_enabled() {
            logger = logger.with_info(io::stdout());
        }
        logger
    }

    pub fn with_info(self, sink: impl Write + Send + 'static) -> Self {
        self.lock().info = Some(Box::new(sink));
        self
    }

    pub fn with_debug(self, sink: impl Write + Send + 'static) -> Self {
        self.lock().debug = Some(Box::new(sink));
        self
    }

    pub fn error(&self, msg: impl fmt::Display) {
        self.print_info(level_line("ERROR", msg));
    }

    pub fn warning(&self, msg: impl fmt::Display) {
        self.print_info(level_line("WARN", msg));
    }

    pub fn info(&self, msg: impl fmt::Display) {
        self.print_info(level_line("INFO", msg));
    }

    pub fn debug(&self, msg: impl fmt::Display) {
        self.print_debug(level_line("DEBUG", msg));
    }

    /// A line with the leading arrow
    pub fn first_line(&self, msg: impl fmt::Display) {
        self.print_info(prefixed(&format!("{} ", PREFIX), msg));
    }

    /// An indented line without the arrow
    pub fn subsequent_line(&self, msg: impl fmt::Display) {
        self.print_info(prefixed(INDENT, msg));
    }

    pub fn is_debug_enabled(&self) -> bool {
        self.lock().debug.is_some()
    }

    pub fn is_info_enabled(&self) -> bool {
        self.lock().info.is_some()
    }

    /// `"name - description"`, or just the name when there is no description
    pub fn pretty_identity(v: &impl Identifiable) -> String {
        let (name, description) = v.identity();
        if description.is_empty() {
            name.to_string()
        } else {
            format!("{} - {}", name, description)
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Sinks> {
        self.sinks.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn print_info(&self, line: String) {
        write_line(self.lock().info.as_mut(), &line);
    }

    fn print_debug(&self, line: String) {
        write_line(self.lock().debug.as_mut(), &line);
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sinks = self.lock();
        f.debug_struct("Logger")
            .field("info", &sinks.info.is_some())
            .field("debug", &sinks.debug.is_some())
            .finish()
    }
}

impl LogLevels for Logger {
    fn is_debug_enabled(&self) -> bool {
        Logger::is_debug_enabled(self)
    }

    fn is_info_enabled(&self) -> bool {
        Logger::is_info_enabled(self)
    }
}

/// An empty message is a bare newline
fn level_line(level: &str, msg: impl fmt::Display) -> String {
    let msg = msg.to_string();
    if msg.is_empty() {
        return msg;
    }
    format!("{} {:<6} {}", PREFIX, format!("{}:", level), msg)
}

fn prefixed(prefix: &str, msg: impl fmt::Display) -> String {
    let msg = msg.to_string();
    if msg.is_empty() {
        return msg;
    }
    format!("{}{}", prefix, msg)
}

fn write_line(sink: Option<&mut Sink>, line: &str) {
    if let Some(sink) = sink {
        // Console output is best effort
        let _ = writeln!(sink, "{}", line).and_then(|_| sink.flush());
    }
}
