use std::process::ExitCode;

use clap::Parser;
use gigscout_app::cli::LoginArgs;

#[cfg(feature = "browser")]
#[tokio::main]
async fn main() -> ExitCode {
    use engine_logging::{engine_error, engine_info};

    let args = LoginArgs::parse();
    gigscout_app::logging::initialize(std::path::Path::new(gigscout_app::logging::LOG_DIR));
    match gigscout_app::capture_login(args.site.into()).await {
        Ok(path) => {
            engine_info!("Cookies stored in {:?}", path);
            ExitCode::SUCCESS
        }
        Err(err) => {
            engine_error!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}

#[cfg(not(feature = "browser"))]
fn main() -> ExitCode {
    let _ = LoginArgs::parse();
    eprintln!("scout_login needs a real browser; rebuild with `--features browser`.");
    ExitCode::FAILURE
}
