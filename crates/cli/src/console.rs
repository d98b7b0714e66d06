//! Terminal notifier.

use std::io::{self, BufRead, Write};

use tidepool_storefront::notify::{Notice, Notifier};

/// Prints notices to stdout and asks confirmations on stdin.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier {
    assume_yes: bool,
}

impl ConsoleNotifier {
    /// Create a notifier. With `assume_yes`, every prompt is accepted
    /// without reading stdin.
    #[must_use]
    pub const fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

/// Render a notice as one terminal line.
#[must_use]
pub fn format_notice(notice: &Notice) -> String {
    format!(
        "[{}] {}: {}",
        notice.kind.as_str(),
        notice.title,
        notice.message
    )
}

/// Whether a typed answer means yes.
#[must_use]
pub fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

impl Notifier for ConsoleNotifier {
    #[allow(clippy::print_stdout)]
    fn notify(&self, notice: Notice) {
        println!("{}", format_notice(&notice));
    }

    #[allow(clippy::print_stdout)]
    fn confirm(&self, message: &str) -> bool {
        if self.assume_yes {
            println!("{message} yes");
            return true;
        }

        print!("{message} [y/N] ");
        if io::stdout().flush().is_err() {
            return false;
        }

        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(_) => is_yes(&answer),
            Err(e) => {
                tracing::warn!(error = %e, "Could not read confirmation");
                false
            }
        }
    }
}
