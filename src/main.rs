//! # Voxel Streaming Entry Point
//!
//! Runs the headless driver from the library's `run()` function.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --release -- [config.json] [frames]
//! ```

use std::process::ExitCode;

fn main() -> ExitCode {
    match voxel_streaming::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            log::error!("{}", error);
            eprintln!("voxel-streaming: {}", error);
            ExitCode::FAILURE
        }
    }
}
