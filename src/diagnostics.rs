use std::fmt;

/// Message severity, most severe first.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    Error,
    Warning,
    Status,
    Debug,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Level::Error => "error",
            Level::Warning => "warning",
            Level::Status => "status",
            Level::Debug => "debug",
        };
        f.write_str(s)
    }
}

/// Sink for leveled diagnostics.
pub trait MessageHandler {
    fn print(&mut self, level: Level, message: &str);

    fn error(&mut self, message: &str) {
        self.print(Level::Error, message);
    }

    fn warning(&mut self, message: &str) {
        self.print(Level::Warning, message);
    }

    fn status(&mut self, message: &str) {
        self.print(Level::Status, message);
    }
}

/// Forwards messages to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingMessages;

impl MessageHandler for TracingMessages {
    fn print(&mut self, level: Level, message: &str) {
        match level {
            Level::Error => tracing::error!("{}", message),
            Level::Warning => tracing::warn!("{}", message),
            Level::Status => tracing::info!("{}", message),
            Level::Debug => tracing::debug!("{}", message),
        }
    }
}

/// Keeps messages up to `verbosity` in memory.
#[derive(Debug, Clone)]
pub struct CollectedMessages {
    pub verbosity: Level,
    pub messages: Vec<(Level, String)>,
}

impl CollectedMessages {
    pub fn new() -> Self {
        Self {
            verbosity: Level::Debug,
            messages: Vec::new(),
        }
    }

    pub fn errors(&self) -> impl Iterator<Item = &str> {
        self.messages
            .iter()
            .filter(|(l, _)| *l == Level::Error)
            .map(|(_, m)| m.as_str())
    }
}

impl Default for CollectedMessages {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageHandler for CollectedMessages {
    fn print(&mut self, level: Level, message: &str) {
        if level <= self.verbosity {
            self.messages.push((level, message.to_string()));
        }
    }
}
