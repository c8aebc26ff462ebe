use page_core::{Severity, StatusLine};

use super::config::StatusMode;

/// Presents submission/load status to the user. Holds no business state:
/// every call renders exactly the line it is given.
pub struct StatusReporter {
    mode: StatusMode,
}

impl StatusReporter {
    pub fn new(mode: StatusMode) -> Self {
        Self { mode }
    }

    pub fn report(&self, line: &StatusLine) {
        match self.mode {
            StatusMode::Inline => self.inline(line),
            StatusMode::Alert => self.alert(line),
            StatusMode::Both => {
                self.inline(line);
                self.alert(line);
            }
        }
    }

    /// The status-text-element rendition: one row on stdout.
    fn inline(&self, line: &StatusLine) {
        match line.severity {
            Severity::Info => println!("[status] {}", line.text),
            Severity::Error => println!("[status:error] {}", line.text),
        }
    }

    /// The alert() rendition: an attention line on stderr.
    fn alert(&self, line: &StatusLine) {
        eprintln!("(!) {}", line.text);
    }
}
