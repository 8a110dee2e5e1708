//! Styled terminal output for generate-tfvars
//!
//! Every user-facing line goes to stdout, errors included, so a single
//! redirect captures the whole run. Generated tfvars text is printed
//! through [`plain`] and never styled.

use owo_colors::OwoColorize;

/// Frame line around the generated tfvars entry
pub const SEPARATOR: &str =
    "================================================================================";

/// Print a success message with a green checkmark
pub fn success(message: &str) {
    // Pastel mint green: RGB(152, 225, 152)
    println!(
        "{} {}",
        "✓".truecolor(152, 225, 152).bold(),
        message.bright_white()
    );
}

/// Print an error message with a red X
pub fn error(message: &str) {
    // Pastel coral/salmon: RGB(255, 160, 160)
    println!(
        "{} {}",
        "✗ Error:".truecolor(255, 160, 160).bold(),
        message.bright_white()
    );
}

/// Print a warning message with a yellow warning symbol
pub fn warning(message: &str) {
    // Pastel cream/yellow: RGB(255, 230, 160)
    println!(
        "{} {}",
        "⚠".truecolor(255, 230, 160).bold(),
        message.bright_white()
    );
}

/// Print an info message with a blue info symbol
pub fn info(message: &str) {
    // Pastel sky blue: RGB(160, 200, 255)
    println!(
        "{} {}",
        "ℹ".truecolor(160, 200, 255).bold(),
        message.bright_white()
    );
}

/// Print a dimmed/muted message
pub fn dimmed(message: &str) {
    // Brighter grey: RGB(160, 160, 160)
    println!("{}", message.truecolor(160, 160, 160));
}

pub fn plain(message: &str) {
    println!("{}", message);
}

pub fn separator() {
    println!("{}", SEPARATOR);
}

/// Print a blank line
pub fn blank() {
    println!();
}
