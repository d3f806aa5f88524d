//! Export destination acquisition for the terminal.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use smap_report::DestinationPicker;

/// Picks a fixed parent directory and confirms the folder name on the
/// terminal, or accepts the default without asking when `assume_yes` is
/// set. End-of-input counts as cancellation.
pub struct TerminalPicker {
    parent: PathBuf,
    assume_yes: bool,
}

impl TerminalPicker {
    pub fn new(parent: PathBuf, assume_yes: bool) -> Self {
        Self { parent, assume_yes }
    }
}

impl DestinationPicker for TerminalPicker {
    fn pick_parent(&self) -> Option<PathBuf> {
        Some(self.parent.clone())
    }

    fn confirm_folder_name(&self, default: &str) -> Option<String> {
        if self.assume_yes {
            return Some(default.to_string());
        }
        let mut stdout = io::stdout();
        let _ = write!(stdout, "Export folder name [{default}] (n to cancel): ");
        let _ = stdout.flush();

        let mut line = String::new();
        let read = io::stdin().lock().read_line(&mut line).ok()?;
        if read == 0 {
            return None;
        }
        let trimmed = line.trim();
        match trimmed {
            "" => Some(default.to_string()),
            "n" | "N" => None,
            name => Some(name.to_string()),
        }
    }
}

/// Asks a yes/no question on the terminal; anything but an explicit yes
/// declines.
pub fn confirm_on_terminal(question: &str) -> bool {
    let mut stdout = io::stdout();
    let _ = write!(stdout, "{question} [y/N]: ");
    let _ = stdout.flush();

    let mut line = String::new();
    match io::stdin().lock().read_line(&mut line) {
        Ok(0) | Err(_) => false,
        Ok(_) => matches!(line.trim(), "y" | "Y" | "yes"),
    }
}
