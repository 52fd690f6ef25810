//! MacWhisper packager - freezes, signs and packages the desktop app.
//!
//! Exit code 0 means `<AppName>_<Version>.dmg` exists in the working
//! directory; any failing stage exits with 1.

use macwhisper_packager::cli;
use std::process;

#[tokio::main]
async fn main() {
    env_logger::init();

    let exit_code = match cli::run().await {
        Ok(code) => code,
        Err(e) => {
            cli::OutputManager::new(false).error(&format!("Error: {}", e));
            1
        }
    };

    process::exit(exit_code);
}
