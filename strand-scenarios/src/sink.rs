use std::cell::RefCell;
use std::rc::Rc;

use tracing::debug;

/// Destination for scenario narration.
pub trait Sink {
    /// Records one line of narration.
    fn line(&self, line: &str);
}

/// Prints every line to standard output.
#[derive(Debug, Clone, Copy, Default)]
pub struct Console;

impl Sink for Console {
    fn line(&self, line: &str) {
        debug!(line, "narration");
        println!("{line}");
    }
}

/// Collects narration in memory. Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    lines: Rc<RefCell<Vec<String>>>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of every line recorded so far.
    pub fn lines(&self) -> Vec<String> {
        self.lines.borrow().clone()
    }
}

impl Sink for Transcript {
    fn line(&self, line: &str) {
        self.lines.borrow_mut().push(line.to_owned());
    }
}
