use std::cell::RefCell;

/// Human-facing progress output for a seeding run
///
/// Gating on the run's `quiet` option happens at the call site, never here.
pub trait SeedLogger {
    fn info(&self, message: &str);
}

/// Forwards messages to `tracing` at info level
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl SeedLogger for TracingLogger {
    fn info(&self, message: &str) {
        tracing::info!(component = "seedkit::seed", "{}", message);
    }
}

/// Keeps messages in memory
#[derive(Debug, Default)]
pub struct MemoryLogger {
    messages: RefCell<Vec<String>>,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.borrow().clone()
    }
}

impl SeedLogger for MemoryLogger {
    fn info(&self, message: &str) {
        self.messages.borrow_mut().push(message.to_string());
    }
}
