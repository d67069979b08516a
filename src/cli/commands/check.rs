//! Check command implementation.

use crate::preflight;
use colored::Colorize;

/// Run and print the preflight checks; returns whether all passed.
pub fn run_checks() -> bool {
    println!("{}", "Running preflight checks...".bold());
    println!();

    let results = preflight::run_preflight_checks();
    preflight::print_results(&results);
    println!();

    preflight::all_passed(&results)
}
