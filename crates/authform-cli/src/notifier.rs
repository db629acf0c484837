use std::io::{self, IsTerminal, Write};

use authform_core::Notifier;
use tracing::debug;

/// Shows alerts on stderr and, like a modal dialog, waits for Enter.
pub struct TerminalNotifier {
    wait_for_ack: bool,
}

impl TerminalNotifier {
    pub fn new(wait_for_ack: bool) -> Self {
        Self { wait_for_ack }
    }

    fn blocks(&self) -> bool {
        // Never hang on a piped or closed stdin
        self.wait_for_ack && io::stdin().is_terminal()
    }
}

impl Notifier for TerminalNotifier {
    fn alert(&self, message: &str) {
        let mut stderr = io::stderr().lock();
        let _ = writeln!(stderr, "\n  {}\n", message);

        if !self.blocks() {
            return;
        }
        let _ = write!(stderr, "Press Enter to continue...");
        let _ = stderr.flush();
        drop(stderr);

        let mut line = String::new();
        if let Err(e) = io::stdin().read_line(&mut line) {
            debug!(error = %e, "Could not read alert acknowledgement");
        }
    }
}
