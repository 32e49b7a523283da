use std::process::ExitCode;

use clap::Parser;
use gigscout_app::cli::SearchArgs;
use gigscout_core::Site;

#[tokio::main]
async fn main() -> ExitCode {
    gigscout_app::search_main(Site::Upwork, SearchArgs::parse()).await
}
