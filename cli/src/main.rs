//! albcert CLI - birth certificate extraction and translation tool

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use albcert::extract::{CertificateExtractor, Extraction};
use albcert::model::{BlockType, Field, Gender};
use albcert::render::{self, batch_dir_name, output_file_stem};
use albcert::{
    has_supported_extension, CommandAnalyzer, DocumentAnalyzer, ExtractOptions, JsonFormat,
    RenderOptions, TemplateLayout, TranslatorInfo,
};

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(name = "albcert")]
#[command(author = "iyulab")]
#[command(version)]
#[command(
    about = "Extract Albanian birth certificates and render the Italian translation",
    long_about = None
)]
struct Cli {
    /// Input file (analysis JSON, or a scan when an analyzer is configured)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output directory
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    #[command(flatten)]
    source: SourceArgs,

    #[command(flatten)]
    translator: TranslatorArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the record, Markdown and text translation to a directory
    Convert {
        /// Input file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,
    },

    /// Extract the record as JSON
    Extract {
        /// Input file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Include civil-status, seal and header diagnostics
        #[arg(long)]
        full: bool,
    },

    /// Render the Italian translation
    #[command(alias = "tr")]
    Translate {
        /// Input file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "markdown")]
        format: TranslationFormat,
    },

    /// Translate many certificates into one directory
    Batch {
        /// Input files
        #[arg(value_name = "FILES", required = true)]
        inputs: Vec<PathBuf>,

        /// Output directory (certificati_tradotti_<date> if not specified)
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "markdown")]
        format: TranslationFormat,

        /// Process one document at a time
        #[arg(long)]
        sequential: bool,

        /// Stop at the first failed document
        #[arg(long)]
        strict: bool,
    },

    /// Show block statistics and extraction diagnostics
    Info {
        /// Input file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show version information
    Version,
}

/// Where the block graph comes from and how it is read.
#[derive(Args, Clone, Default)]
struct SourceArgs {
    /// Template layout JSON (birth certificate layout if not specified)
    #[arg(long, value_name = "FILE", global = true)]
    layout: Option<PathBuf>,

    /// Program turning scans into analysis JSON (document on stdin)
    #[arg(long, value_name = "PROGRAM", env = "ALBCERT_ANALYZER", global = true)]
    analyzer: Option<PathBuf>,
}

/// Sworn translator details; the declaration is added when a name is given.
#[derive(Args, Clone, Default)]
struct TranslatorArgs {
    /// Translator full name
    #[arg(long, value_name = "NAME", env = "ALBCERT_TRANSLATOR_NAME", global = true)]
    translator_name: Option<String>,

    /// Translator registration certificate number
    #[arg(long, value_name = "NUMBER", env = "ALBCERT_TRANSLATOR_CERT", global = true)]
    translator_cert: Option<String>,

    /// Translator registration date (dd.mm.YYYY)
    #[arg(long, value_name = "DATE", env = "ALBCERT_TRANSLATOR_DATE", global = true)]
    translator_date: Option<String>,

    /// Grammatical gender of the declaration
    #[arg(long, value_enum, global = true)]
    translator_gender: Option<TranslatorGender>,

    /// Translation date (dd.mm.YYYY, today if not specified)
    #[arg(long, value_name = "DATE", global = true)]
    date: Option<String>,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum TranslationFormat {
    /// Markdown document
    Markdown,
    /// Plain text
    Text,
}

impl TranslationFormat {
    fn extension(&self) -> &'static str {
        match self {
            TranslationFormat::Markdown => "md",
            TranslationFormat::Text => "txt",
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum TranslatorGender {
    /// traduttore
    M,
    /// traduttrice
    F,
}

impl From<TranslatorGender> for Gender {
    fn from(gender: TranslatorGender) -> Self {
        match gender {
            TranslatorGender::M => Gender::Male,
            TranslatorGender::F => Gender::Female,
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let source = &cli.source;
    let translator = &cli.translator;

    let result = match cli.command {
        Some(Commands::Convert { input, output }) => {
            cmd_convert(&input, output.as_deref(), source, translator)
        }
        Some(Commands::Extract {
            input,
            output,
            compact,
            full,
        }) => cmd_extract(&input, output.as_deref(), compact, full, source),
        Some(Commands::Translate {
            input,
            output,
            format,
        }) => cmd_translate(&input, output.as_deref(), format, source, translator),
        Some(Commands::Batch {
            inputs,
            output,
            format,
            sequential,
            strict,
        }) => cmd_batch(
            &inputs,
            output.as_deref(),
            format,
            sequential,
            strict,
            source,
            translator,
        ),
        Some(Commands::Info { input }) => cmd_info(&input, source),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: convert if input is provided
            if let Some(input) = cli.input {
                cmd_convert(&input, cli.output.as_deref(), source, translator)
            } else {
                println!("{}", "Usage: albcert <FILE> [OUTPUT]".yellow());
                println!("       albcert --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn extract_options(source: &SourceArgs) -> CliResult<ExtractOptions> {
    let mut options = ExtractOptions::new();
    if let Some(path) = &source.layout {
        options = options.with_layout(TemplateLayout::from_path(path)?);
    }
    Ok(options)
}

fn analyzer(source: &SourceArgs) -> Option<CommandAnalyzer> {
    source.analyzer.as_ref().map(CommandAnalyzer::new)
}

fn load(input: &Path, source: &SourceArgs) -> CliResult<CertificateExtractor> {
    let data = fs::read(input)?;
    log::debug!("Loaded {} ({} bytes)", input.display(), data.len());
    let options = extract_options(source)?;
    let extractor = match analyzer(source) {
        Some(analyzer) => CertificateExtractor::from_scan(&data, &analyzer, options)?,
        None => CertificateExtractor::from_bytes_with_options(&data, options)?,
    };
    Ok(extractor)
}

fn parse_date(value: &str) -> CliResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%d.%m.%Y")
        .map_err(|e| format!("Invalid date '{}' (expected dd.mm.YYYY): {}", value, e).into())
}

fn render_options(args: &TranslatorArgs) -> CliResult<RenderOptions> {
    let mut options = RenderOptions::new();
    if let Some(date) = &args.date {
        options = options.with_date(parse_date(date)?);
    }

    if let Some(name) = &args.translator_name {
        let number = args
            .translator_cert
            .as_deref()
            .ok_or("--translator-cert is required with --translator-name")?;
        let date = args
            .translator_date
            .as_deref()
            .ok_or("--translator-date is required with --translator-name")?;
        let mut translator = TranslatorInfo::new(name, number, parse_date(date)?);
        if let Some(gender) = args.translator_gender {
            translator = translator.with_gender(gender.into());
        }
        options = options.with_translator(translator);
    }

    Ok(options)
}

fn render_translation(
    extraction: &Extraction,
    format: TranslationFormat,
    options: &RenderOptions,
) -> CliResult<String> {
    let content = match format {
        TranslationFormat::Markdown => render::to_markdown(&extraction.record, options)?,
        TranslationFormat::Text => render::to_text(&extraction.record, options)?,
    };
    Ok(content)
}

fn report_degraded(input: &Path, extraction: &Extraction) {
    if !extraction.has_table() {
        eprintln!(
            "{} {}: no table found, record is empty",
            "Warning:".yellow().bold(),
            input.display()
        );
        return;
    }
    if extraction.is_degraded() {
        eprintln!(
            "{} {}: check civil status and seal",
            "Warning:".yellow().bold(),
            input.display()
        );
    }
}

fn cmd_convert(
    input: &Path,
    output: Option<&Path>,
    source: &SourceArgs,
    translator: &TranslatorArgs,
) -> CliResult<()> {
    let output_dir = output.map(|p| p.to_path_buf()).unwrap_or_else(|| {
        let stem = input.file_stem().unwrap_or_default().to_string_lossy();
        PathBuf::from(format!("{}_output", stem))
    });

    fs::create_dir_all(&output_dir)?;

    let pb = ProgressBar::new(4);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {msg}")?
            .progress_chars("#>-"),
    );

    pb.set_message("Reading certificate...");
    let extraction = load(input, source)?.extract()?;
    let options = render_options(translator)?;
    pb.inc(1);

    pb.set_message("Writing record...");
    let json = render::to_json(&extraction.record, JsonFormat::Pretty)?;
    fs::write(output_dir.join("record.json"), &json)?;
    pb.inc(1);

    pb.set_message("Generating Markdown...");
    let markdown = render::to_markdown(&extraction.record, &options)?;
    fs::write(output_dir.join("translation.md"), &markdown)?;
    pb.inc(1);

    pb.set_message("Generating text...");
    let text = render::to_text(&extraction.record, &options)?;
    fs::write(output_dir.join("translation.txt"), &text)?;
    pb.inc(1);

    pb.finish_with_message("Done!");
    report_degraded(input, &extraction);

    println!("\n{}", "Output files:".green().bold());
    println!("  {} record.json", "├─".dimmed());
    println!("  {} translation.md", "├─".dimmed());
    println!("  {} translation.txt", "└─".dimmed());
    println!(
        "\n{} {}",
        "Suggested name:".dimmed(),
        output_file_stem(&extraction.record, options.effective_date())
    );

    Ok(())
}

fn cmd_extract(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
    full: bool,
    source: &SourceArgs,
) -> CliResult<()> {
    let extraction = load(input, source)?.extract()?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let json = if full {
        render::to_json(&extraction, format)?
    } else {
        render::to_json(&extraction.record, format)?
    };

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn cmd_translate(
    input: &Path,
    output: Option<&Path>,
    format: TranslationFormat,
    source: &SourceArgs,
    translator: &TranslatorArgs,
) -> CliResult<()> {
    let extraction = load(input, source)?.extract()?;
    let content = render_translation(&extraction, format, &render_options(translator)?)?;
    report_degraded(input, &extraction);

    if let Some(path) = output {
        fs::write(path, &content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }

    Ok(())
}

fn cmd_batch(
    inputs: &[PathBuf],
    output: Option<&Path>,
    format: TranslationFormat,
    sequential: bool,
    strict: bool,
    source: &SourceArgs,
    translator: &TranslatorArgs,
) -> CliResult<()> {
    let render_options = render_options(translator)?;
    let date = render_options.effective_date();
    let output_dir = batch_output_dir(output, date);
    fs::create_dir_all(&output_dir)?;

    let inputs = supported_inputs(inputs);
    if inputs.is_empty() {
        return Err("No input with a supported extension (json, pdf, jpg, jpeg, png)".into());
    }

    let mut options = extract_options(source)?.with_parallel(!sequential);
    if !strict {
        options = options.lenient();
    }

    let pb = ProgressBar::new_spinner();
    pb.set_message(format!("Extracting {} certificates...", inputs.len()));
    pb.enable_steady_tick(std::time::Duration::from_millis(100));

    let analyzer = analyzer(source);
    let items = albcert::extract::extract_files(
        &inputs,
        analyzer.as_ref().map(|a| a as &dyn DocumentAnalyzer),
        &options,
    )?;
    pb.finish_and_clear();

    let pb = ProgressBar::new(items.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let mut used = HashSet::new();
    let mut written = 0usize;
    let mut failed = Vec::new();

    for item in &items {
        pb.set_message(item.path.display().to_string());
        match &item.result {
            Ok(extraction) => {
                let content = render_translation(extraction, format, &render_options)?;
                let stem = unique_stem(output_file_stem(&extraction.record, date), &mut used);
                let path = output_dir.join(format!("{}.{}", stem, format.extension()));
                fs::write(&path, &content)?;
                report_degraded(&item.path, extraction);
                written += 1;
            }
            Err(e) => failed.push((item.path.clone(), e.to_string())),
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    println!(
        "{} {} of {} certificates translated into {}",
        "Done!".green().bold(),
        written,
        items.len(),
        output_dir.display()
    );
    for (path, error) in &failed {
        println!("  {} {}: {}", "✗".red(), path.display(), error);
    }

    Ok(())
}

/// The requested directory, or `certificati_tradotti_<date>` for the
/// translation date.
fn batch_output_dir(output: Option<&Path>, date: NaiveDate) -> PathBuf {
    output
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from(batch_dir_name(date)))
}

fn supported_inputs(inputs: &[PathBuf]) -> Vec<PathBuf> {
    inputs
        .iter()
        .filter(|path| {
            let supported = has_supported_extension(path);
            if !supported {
                log::warn!("Skipping unsupported input {}", path.display());
                eprintln!(
                    "{} skipping {} (unsupported extension)",
                    "Warning:".yellow().bold(),
                    path.display()
                );
            }
            supported
        })
        .cloned()
        .collect()
}

/// `stem`, or `stem_2`, `stem_3`, ... when already taken in this batch.
fn unique_stem(stem: String, used: &mut HashSet<String>) -> String {
    if used.insert(stem.clone()) {
        return stem;
    }
    let mut n = 2;
    loop {
        let candidate = format!("{}_{}", stem, n);
        if used.insert(candidate.clone()) {
            return candidate;
        }
        n += 1;
    }
}

fn cmd_info(input: &Path, source: &SourceArgs) -> CliResult<()> {
    let extractor = load(input, source)?;
    let index = extractor.index();

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!(
        "{}: {}",
        "Format".bold(),
        albcert::detect_format_from_path(input)?
    );
    println!("{}: {}", "Pages".bold(), extractor.page_count());
    println!("{}: {}", "Layout".bold(), extractor.options().layout.name);

    println!();
    println!("{}", "Block Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    for (label, kind) in [
        ("Blocks", None),
        ("Lines", Some(BlockType::Line)),
        ("Words", Some(BlockType::Word)),
        ("Tables", Some(BlockType::Table)),
        ("Cells", Some(BlockType::Cell)),
        ("Selection elements", Some(BlockType::SelectionElement)),
    ] {
        let count = match kind {
            Some(kind) => index.count(kind),
            None => index.len(),
        };
        println!("{}: {}", label.bold(), count);
    }

    let extraction = extractor.extract()?;

    println!();
    println!("{}", "Extraction".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    let filled = Field::ALL
        .iter()
        .filter(|f| !extraction.record.get(**f).is_empty())
        .count();
    println!("{}: {} of {}", "Fields filled".bold(), filled, Field::ALL.len());

    let status = match &extraction.civil_status {
        Some(status) if status.is_resolved() => status.to_string().green(),
        Some(status) => format!("{} ({:?})", status, status).yellow(),
        None => "no table".yellow(),
    };
    println!("{}: {}", "Civil status".bold(), status);

    let seal = match &extraction.seal {
        Some(seal) => format!("{} / {}", seal.date, seal.hash).green(),
        None => "not found".yellow(),
    };
    println!("{}: {}", "Electronic seal".bold(), seal);
    println!(
        "{}: {}",
        "Comune".bold(),
        or_dash(&extraction.header.comune)
    );
    println!(
        "{}: {}",
        "Sezione".bold(),
        or_dash(&extraction.header.sezione)
    );

    Ok(())
}

fn or_dash(value: &str) -> &str {
    if value.is_empty() {
        "-"
    } else {
        value
    }
}

fn cmd_version() {
    println!("{} {}", "albcert".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Albanian birth certificate extraction and Italian translation tool");
    println!();
    println!("License: MIT");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("31.07.2024").unwrap(),
            NaiveDate::from_ymd_opt(2024, 7, 31).unwrap()
        );
        assert!(parse_date("2024-07-31").is_err());
    }

    #[test]
    fn test_unique_stem() {
        let mut used = HashSet::new();
        assert_eq!(unique_stem("a".to_string(), &mut used), "a");
        assert_eq!(unique_stem("a".to_string(), &mut used), "a_2");
        assert_eq!(unique_stem("a".to_string(), &mut used), "a_3");
        assert_eq!(unique_stem("b".to_string(), &mut used), "b");
    }

    #[test]
    fn test_batch_dir_follows_translation_date() {
        let date = NaiveDate::from_ymd_opt(2025, 2, 1).unwrap();
        assert_eq!(
            batch_output_dir(None, date),
            PathBuf::from("certificati_tradotti_2025-02-01")
        );
        assert_eq!(
            batch_output_dir(Some(Path::new("out")), date),
            PathBuf::from("out")
        );
    }

    #[test]
    fn test_supported_inputs() {
        let inputs = vec![
            PathBuf::from("a.json"),
            PathBuf::from("notes.txt"),
            PathBuf::from("scan.PDF"),
            PathBuf::from("README"),
        ];
        assert_eq!(
            supported_inputs(&inputs),
            vec![PathBuf::from("a.json"), PathBuf::from("scan.PDF")]
        );
    }

    #[test]
    fn test_batch_skips_unsupported_and_uses_date() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("cert.json");
        fs::write(&input, r#"{"Blocks": []}"#).unwrap();
        let notes = dir.path().join("notes.txt");
        fs::write(&notes, "not a certificate").unwrap();
        let output = dir.path().join("out");

        let translator = TranslatorArgs {
            date: Some("01.02.2025".to_string()),
            ..Default::default()
        };
        cmd_batch(
            &[input, notes],
            Some(&output),
            TranslationFormat::Text,
            true,
            true,
            &SourceArgs::default(),
            &translator,
        )
        .unwrap();

        assert!(output
            .join("Nome_Cognome_Certificato_di_Nascita_01-02-2025.txt")
            .exists());
        assert_eq!(fs::read_dir(&output).unwrap().count(), 1);
    }

    #[test]
    fn test_translator_requires_details() {
        let args = TranslatorArgs {
            translator_name: Some("Ana".to_string()),
            ..Default::default()
        };
        assert!(render_options(&args).is_err());

        let args = TranslatorArgs {
            translator_name: Some("Ana".to_string()),
            translator_cert: Some("412".to_string()),
            translator_date: Some("31.07.2024".to_string()),
            translator_gender: Some(TranslatorGender::F),
            date: Some("01.02.2025".to_string()),
        };
        let options = render_options(&args).unwrap();
        assert_eq!(options.translator.unwrap().gender, Gender::Female);
        assert_eq!(
            options.date,
            Some(NaiveDate::from_ymd_opt(2025, 2, 1).unwrap())
        );
    }

    #[test]
    fn test_convert_writes_outputs() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("cert.json");
        fs::write(
            &input,
            r#"{"Blocks": [{"Id": "l", "BlockType": "LINE", "Text": "Bashkia Tiranë"}]}"#,
        )
        .unwrap();
        let output = dir.path().join("out");

        cmd_convert(
            &input,
            Some(&output),
            &SourceArgs::default(),
            &TranslatorArgs::default(),
        )
        .unwrap();

        let record: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(output.join("record.json")).unwrap())
                .unwrap();
        assert_eq!(record["Comune"], "Tirana");
        assert!(fs::read_to_string(output.join("translation.md"))
            .unwrap()
            .contains("Comune di Tirana"));
        assert!(output.join("translation.txt").exists());
    }
}
