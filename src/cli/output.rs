//! Terminal output formatting with colors
//!
//! Respects NO_COLOR, CLICOLOR, CLICOLOR_FORCE automatically.

use std::error::Error;
use std::iter::successors;

use colored::Colorize;

/// Messages of an error and its sources, outermost first.
pub fn error_chain(err: &(dyn Error + 'static)) -> Vec<String> {
    successors(Some(err), |e: &&(dyn Error + 'static)| (*e).source())
        .map(ToString::to_string)
        .collect()
}

/// Print error (red bold "error:" prefix) and its causes to stderr
pub fn error(err: &(dyn Error + 'static)) {
    let mut chain = error_chain(err).into_iter();
    if let Some(msg) = chain.next() {
        eprintln!("{}: {}", "error".red().bold(), msg);
    }
    for cause in chain {
        eprintln!("  {}: {}", "caused by".yellow(), cause);
    }
}

/// Print warning (yellow "Warning:" prefix) to stderr
pub fn warning(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "Warning".yellow(), msg);
}

/// Print section header (cyan bold)
pub fn header(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg.to_string().cyan().bold());
}

/// Print indented detail (no color)
pub fn detail(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("  {}", msg);
}

/// Print plain output (no color, for tree listings)
pub fn info(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg);
}
