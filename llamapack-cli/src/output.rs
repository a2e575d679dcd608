//! Cargo-style output formatting
//!
//! Provides consistent, colorful terminal output similar to cargo.

/// ANSI color codes
pub mod colors {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD_GREEN: &str = "\x1b[1;32m";
    pub const BOLD_CYAN: &str = "\x1b[1;36m";
    pub const BOLD_YELLOW: &str = "\x1b[1;33m";
}

/// Check if terminal supports colors
pub fn supports_color() -> bool {
    std::env::var("NO_COLOR").is_err() && std::env::var("TERM").map(|t| t != "dumb").unwrap_or(true)
}

/// Print a status message in cargo style
/// Format: "   {status} {message}"
fn print_status(status: &str, color: &str, message: &str) {
    if supports_color() {
        eprintln!("{}{:>12}{} {}", color, status, colors::RESET, message);
    } else {
        eprintln!("{:>12} {}", status, message);
    }
}

/// Print "Cloning" status (green)
pub fn cloning(message: &str) {
    print_status("Cloning", colors::BOLD_GREEN, message);
}

/// Print "Configuring" status (green)
pub fn configuring(message: &str) {
    print_status("Configuring", colors::BOLD_GREEN, message);
}

/// Print "Building" status (green)
pub fn building(message: &str) {
    print_status("Building", colors::BOLD_GREEN, message);
}

/// Print "Installing" status (green)
pub fn installing(message: &str) {
    print_status("Installing", colors::BOLD_GREEN, message);
}

/// Print "Finished" status (green)
pub fn finished(message: &str) {
    print_status("Finished", colors::BOLD_GREEN, message);
}

/// Print "Cleaning" status (cyan)
pub fn cleaning(message: &str) {
    print_status("Cleaning", colors::BOLD_CYAN, message);
}

/// Print "Removed" status (green)
pub fn removed(message: &str) {
    print_status("Removed", colors::BOLD_GREEN, message);
}

/// Print "Skipping" status (cyan)
pub fn skipping(message: &str) {
    print_status("Skipping", colors::BOLD_CYAN, message);
}

/// Print "Warning" status (yellow)
pub fn warning(message: &str) {
    print_status("Warning", colors::BOLD_YELLOW, message);
}
