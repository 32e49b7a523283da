use std::io::{self, Write};
use std::path::PathBuf;

use engine_logging::engine_info;
use gigscout_core::{ResultSet, Site};

use crate::persist::{write_atomically, PersistError};

#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("failed to serialize results: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to write results artifact: {0}")]
    Persist(#[from] PersistError),
    #[error("failed to write results to primary output: {0}")]
    Output(#[source] io::Error),
}

/// Writes the result set to `<results_dir>/<site>.json` and mirrors it as a
/// single JSON line on the primary output.
pub struct ResultSink<W: Write = io::Stdout> {
    results_dir: PathBuf,
    output: W,
}

impl ResultSink<io::Stdout> {
    pub fn stdout(results_dir: impl Into<PathBuf>) -> Self {
        Self::with_output(results_dir, io::stdout())
    }
}

impl<W: Write> ResultSink<W> {
    pub fn with_output(results_dir: impl Into<PathBuf>, output: W) -> Self {
        Self {
            results_dir: results_dir.into(),
            output,
        }
    }

    pub fn artifact_path(&self, site: Site) -> PathBuf {
        self.results_dir.join(format!("{}.json", site.key()))
    }

    /// Overwrites the artifact; nothing is appended or versioned.
    pub fn flush(&mut self, results: &ResultSet, site: Site) -> Result<PathBuf, SinkError> {
        let path = self.artifact_path(site);
        let pretty = serde_json::to_string_pretty(results)?;
        write_atomically(&path, &pretty)?;
        engine_info!("Saved {} listings to {:?}", results.len(), path);

        let line = serde_json::to_string(results)?;
        writeln!(self.output, "{line}").map_err(SinkError::Output)?;
        self.output.flush().map_err(SinkError::Output)?;
        Ok(path)
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }
}
