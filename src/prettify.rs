use std::fmt::Display;

// Text Styles
pub static RESET: &str = "\x1b[0m";
pub static BOLD: &str = "\x1b[1m";
pub static DIM: &str = "\x1b[2m";

// Bright Text Colors
pub static BRIGHT_RED: &str = "\x1b[91m";
pub static BRIGHT_GREEN: &str = "\x1b[92m";
pub static BRIGHT_YELLOW: &str = "\x1b[93m";
pub static BRIGHT_CYAN: &str = "\x1b[96m";

/// Label line followed by the value, the way layers dump their parameters.
pub fn labeled(label: &str, value: &impl Display) -> String {
    format!("{BOLD}{label}{RESET}\n{BRIGHT_CYAN}{value}{RESET}")
}

pub fn print_labeled(label: &str, value: &impl Display) {
    println!("{}", labeled(label, value));
}
