use matrix_validator::cli;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    matrix_validator::init();

    // Parse and process the command; the run command reports validation
    // defects through the exit code rather than through an error.
    match cli::run().await {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(1)
        }
    }
}
