//! Processing many certificates at once.

use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::error::Result;
use crate::ocr::DocumentAnalyzer;

use super::extractor::CertificateExtractor;
use super::fields::Extraction;
use super::options::{ErrorMode, ExtractOptions};

/// Outcome for one input of a batch.
#[derive(Debug)]
pub struct BatchItem {
    /// Input file
    pub path: PathBuf,
    /// Extraction, or why it failed
    pub result: Result<Extraction>,
}

impl BatchItem {
    /// Check if the document was extracted.
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Extract every file; scans need an `analyzer`.
///
/// Results come back in input order. In [`ErrorMode::Strict`] the first
/// failure aborts the batch and is returned; in [`ErrorMode::Lenient`] every
/// file gets its own [`BatchItem`].
pub fn extract_files<P>(
    paths: &[P],
    analyzer: Option<&dyn DocumentAnalyzer>,
    options: &ExtractOptions,
) -> Result<Vec<BatchItem>>
where
    P: AsRef<Path> + Sync,
{
    log::info!(
        "Extracting {} documents ({}, {:?})",
        paths.len(),
        if options.parallel { "parallel" } else { "sequential" },
        options.error_mode
    );

    let run = |path: &P| -> BatchItem {
        let path = path.as_ref();
        let result = extract_one(path, analyzer, options);
        if let Err(e) = &result {
            log::warn!("{}: {}", path.display(), e);
        }
        BatchItem {
            path: path.to_path_buf(),
            result,
        }
    };

    let items: Vec<BatchItem> = match options.error_mode {
        ErrorMode::Strict => {
            let strict = |path: &P| -> Result<BatchItem> {
                let path = path.as_ref();
                let extraction = extract_one(path, analyzer, options)?;
                Ok(BatchItem {
                    path: path.to_path_buf(),
                    result: Ok(extraction),
                })
            };
            if options.parallel {
                paths.par_iter().map(strict).collect::<Result<_>>()?
            } else {
                paths.iter().map(strict).collect::<Result<_>>()?
            }
        }
        ErrorMode::Lenient => {
            if options.parallel {
                paths.par_iter().map(run).collect()
            } else {
                paths.iter().map(run).collect()
            }
        }
    };

    Ok(items)
}

/// Extract a single file.
pub fn extract_one(
    path: &Path,
    analyzer: Option<&dyn DocumentAnalyzer>,
    options: &ExtractOptions,
) -> Result<Extraction> {
    let data = std::fs::read(path)?;
    let extractor = match analyzer {
        Some(analyzer) => CertificateExtractor::from_scan(&data, analyzer, options.clone())?,
        None => CertificateExtractor::from_bytes_with_options(&data, options.clone())?,
    };
    extractor.extract()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::model::Field;

    fn write(dir: &Path, name: &str, contents: &[u8]) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    fn response(comune: &str) -> String {
        format!(
            r#"{{"Blocks": [{{"Id": "l", "BlockType": "LINE", "Text": "Bashkia {}"}}]}}"#,
            comune
        )
    }

    #[test]
    fn test_order_is_preserved() {
        let dir = tempfile::tempdir().unwrap();
        let names = ["Tiranë", "Vlorë", "Fier", "Berat"];
        let paths: Vec<_> = names
            .iter()
            .enumerate()
            .map(|(i, n)| write(dir.path(), &format!("{}.json", i), response(n).as_bytes()))
            .collect();

        for options in [ExtractOptions::default(), ExtractOptions::default().sequential()] {
            let items = extract_files(&paths, None, &options).unwrap();
            let comuni: Vec<_> = items
                .iter()
                .map(|i| i.result.as_ref().unwrap().record.get(Field::Comune).to_string())
                .collect();
            assert_eq!(comuni, vec!["Tirana", "Valona", "Fier", "Berat"]);
        }
    }

    #[test]
    fn test_strict_aborts() {
        let dir = tempfile::tempdir().unwrap();
        let paths = vec![
            write(dir.path(), "ok.json", response("Fier").as_bytes()),
            write(dir.path(), "scan.pdf", b"%PDF-1.4"),
        ];
        let result = extract_files(&paths, None, &ExtractOptions::default());
        assert!(matches!(result, Err(Error::ScanNeedsAnalysis(_))));
    }

    #[test]
    fn test_lenient_reports_each_document() {
        let dir = tempfile::tempdir().unwrap();
        let paths = vec![
            write(dir.path(), "scan.png", b"\x89PNG\r\n\x1a\n"),
            write(dir.path(), "ok.json", response("Fier").as_bytes()),
            dir.path().join("missing.json"),
        ];
        let items = extract_files(&paths, None, &ExtractOptions::default().lenient()).unwrap();
        assert_eq!(items.len(), 3);
        assert!(!items[0].is_ok());
        assert!(items[1].is_ok());
        assert!(matches!(items[2].result, Err(Error::Io(_))));
        assert_eq!(items[1].path, paths[1]);
    }
}
