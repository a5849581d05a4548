//! MU Foods API entry point
//!
//! Parses CLI arguments, runs the selected command, prints errors to
//! stderr and exits non-zero on failure. All logic lives in the library.

use mufoods::cli;

#[tokio::main]
async fn main() {
    if let Err(e) = cli::run().await {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
