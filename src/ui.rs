// UI module for consistent terminal output with spinners and styled lines
//
// Everything the user sees goes through here; the rest of the crate logs via `log`.

#![allow(clippy::print_stdout, clippy::print_stderr)]

use console::{Term, style};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::time::Duration;

const SPINNER_CHARS: &str = "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏";

/// Check if stderr is a TTY (for interactive output)
fn is_tty() -> bool {
    Term::stderr().is_term()
}

/// Create a styled spinner for a long-running request
pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if !is_tty() {
        pb.set_draw_target(ProgressDrawTarget::hidden());
    }

    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_chars(SPINNER_CHARS)
            .template("{spinner:.cyan} {msg}")
            .expect("valid spinner template"),
    );
    pb.set_message(message.to_string());

    if is_tty() {
        pb.enable_steady_tick(Duration::from_millis(80));
    }

    pb
}

/// Change a spinner's message; without a TTY the message is printed instead
pub fn update_spinner(pb: &ProgressBar, message: &str) {
    if is_tty() {
        pb.set_message(message.to_string());
    } else {
        dim(&format!("  {}", message));
    }
}

fn finish_spinner(pb: &ProgressBar, msg: String, to_stderr: bool) {
    if is_tty() {
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{msg}")
                .expect("valid spinner template"),
        );
        pb.finish_with_message(msg);
    } else {
        pb.finish_and_clear();
        if to_stderr {
            eprintln!("{}", msg);
        } else {
            println!("{}", msg);
        }
    }
}

/// Finish a spinner with success
pub fn finish_spinner_success(pb: &ProgressBar, message: &str) {
    finish_spinner(pb, format!("{} {}", style("✓").green(), message), false);
}

/// Finish a spinner with error
pub fn finish_spinner_error(pb: &ProgressBar, message: &str) {
    finish_spinner(pb, format!("{} {}", style("✗").red(), message), true);
}

/// Print a success message with checkmark
pub fn success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Print a warning message
pub fn warning(message: &str) {
    eprintln!("{} {}", style("⚠").yellow(), message);
}

/// Print a warning that belongs to the run's results, on stdout
pub fn notice(message: &str) {
    println!("{} {}", style("⚠").yellow(), message);
}

/// Print a per-file failure on stdout
pub fn failure(message: &str) {
    println!("{} {}", style("✗").red(), message);
}

/// Print an error message
pub fn error(message: &str) {
    eprintln!("{} {}", style("✗").red(), message);
}

/// Print a header/section message
pub fn header(message: &str) {
    println!("{}", style(message).bold());
}

/// Print a dimmed/secondary message
pub fn dim(message: &str) {
    println!("{}", style(message).dim());
}

/// Print a labelled key/value line, e.g. "Repository: maven-releases"
pub fn status(prefix: &str, message: &str) {
    println!("{} {}", style(prefix).cyan().bold(), message);
}

/// Print a per-file line such as "[3/40] Downloading com/acme/..."
pub fn item(index: usize, total: usize, label: &str, path: &str) {
    println!(
        "{} {} {}",
        style(format!("[{}/{}]", index, total)).dim(),
        label,
        path
    );
}

/// Print an empty line
pub fn blank() {
    println!();
}
