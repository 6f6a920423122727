use authflow::cli;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let result = match cli::start() {
        Ok(action) => action.execute().await,
        Err(err) => Err(err),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("authflow: {err:#}");
            ExitCode::FAILURE
        }
    }
}
