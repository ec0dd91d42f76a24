//! footprint binary entry point
//!
//! This is a thin wrapper that calls the library's `run_cli()` function.

use anyhow::Result;
use footprint_web::run_cli;

fn main() -> Result<()> {
    run_cli()
}
