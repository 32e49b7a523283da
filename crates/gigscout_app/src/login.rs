use std::io::{self, BufRead, Write};

use engine_logging::engine_warn;
use gigscout_engine::LoginSignal;

/// Resumes once the operator presses Enter on the terminal.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdinLoginSignal;

#[async_trait::async_trait]
impl LoginSignal for StdinLoginSignal {
    async fn wait_until_ready(&self) {
        let waited = tokio::task::spawn_blocking(|| {
            let mut stderr = io::stderr();
            let _ = write!(stderr, "Finish logging in to the site, then press Enter... ");
            let _ = stderr.flush();
            let mut line = String::new();
            io::stdin().lock().read_line(&mut line).map(|_| ())
        })
        .await;

        match waited {
            Ok(Ok(())) => {}
            Ok(Err(err)) => engine_warn!("Could not read from stdin: {}", err),
            Err(err) => engine_warn!("Login prompt task failed: {}", err),
        }
    }
}
