//! Analysis through an external program.

use std::ffi::OsString;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::thread;

use crate::error::{Error, Result};
use crate::model::AnalysisResult;

use super::{DocumentAnalyzer, FeatureType};

/// Environment variable naming the analyzer program.
pub const ANALYZER_ENV: &str = "ALBCERT_ANALYZER";

/// Environment variable the child receives with the requested features,
/// comma separated.
const FEATURES_ENV: &str = "ALBCERT_FEATURE_TYPES";

/// Runs a program that reads the document on stdin and prints the analysis
/// JSON on stdout.
///
/// The program is typically a thin wrapper around a cloud OCR client.
#[derive(Debug, Clone)]
pub struct CommandAnalyzer {
    program: PathBuf,
    args: Vec<OsString>,
    features: Vec<FeatureType>,
}

impl CommandAnalyzer {
    /// Analyzer running `program` without arguments.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            features: FeatureType::REQUIRED.to_vec(),
        }
    }

    /// Analyzer named by [`ANALYZER_ENV`], if set and non-empty.
    pub fn from_env() -> Option<Self> {
        std::env::var_os(ANALYZER_ENV)
            .filter(|v| !v.is_empty())
            .map(Self::new)
    }

    /// Append an argument.
    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Replace the requested features.
    pub fn with_features(mut self, features: &[FeatureType]) -> Self {
        self.features = features.to_vec();
        self
    }

    fn feature_list(&self) -> String {
        self.features
            .iter()
            .map(FeatureType::as_str)
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl DocumentAnalyzer for CommandAnalyzer {
    fn name(&self) -> &str {
        self.program
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("command")
    }

    fn analyze(&self, document: &[u8]) -> Result<AnalysisResult> {
        log::debug!(
            "Running analyzer {} on {} bytes",
            self.program.display(),
            document.len()
        );

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .env(FEATURES_ENV, self.feature_list())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                Error::Analysis(format!(
                    "failed to start {}: {}",
                    self.program.display(),
                    e
                ))
            })?;

        // Feed stdin from a separate thread so a large response cannot block
        // the child on a full stdout pipe.
        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| Error::Analysis("analyzer stdin unavailable".to_string()))?;
        let input = document.to_vec();
        let writer = thread::spawn(move || stdin.write_all(&input));

        let output = child
            .wait_with_output()
            .map_err(|e| Error::Analysis(format!("analyzer did not finish: {}", e)))?;

        match writer.join() {
            Ok(Ok(())) => {}
            Ok(Err(e)) => log::debug!("Analyzer closed stdin early: {}", e),
            Err(_) => return Err(Error::Analysis("stdin writer panicked".to_string())),
        }

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::Analysis(format!(
                "{} exited with {}: {}",
                self.program.display(),
                output.status,
                stderr.trim()
            )));
        }

        AnalysisResult::from_slice(&output.stdout)
            .map_err(|e| Error::Analysis(format!("invalid analyzer output: {}", e)))
    }
}
