//! Terminal output helpers.
//!
//! Colors follow `console`'s detection (`NO_COLOR`, `CLICOLOR`, tty).

use console::style;

/// Print a success message with checkmark.
///
/// Example: `✓ uploaded to vault`
pub fn success(msg: &str) {
    println!("{} {}", style("✓").green(), msg);
}

/// Print an error message to stderr.
///
/// Example: `✗ can't find file 'db.password.txt'`
pub fn error(msg: &str) {
    eprintln!("{} {}", style("✗").red().for_stderr(), msg);
}

/// Print a hint to stderr.
pub fn hint(msg: &str) {
    eprintln!("{} {}", style("→").cyan().for_stderr(), style(msg).cyan().for_stderr());
}

/// Format a path for inline use.
pub fn path(p: &str) -> String {
    style(p).cyan().to_string()
}
