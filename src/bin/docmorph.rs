//! CLI binary for docmorph.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `ConversionConfig` and writes the converted document.

use anyhow::{bail, Context, Result};
use clap::Parser;
use docmorph::{
    convert_async, save_result, supported_pairs, ConversionConfig, ConversionResult, Converter,
    DocumentKind, Outcome, Route, SourceDocument,
};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

const AFTER_HELP: &str = r#"EXAMPLES:
  # PDF to Excel, written next to the current directory as "<title>.xlsx"
  docmorph report.pdf --to excel

  # Word to PDF with an explicit title and output path
  docmorph minutes.docx --to pdf --title "Board minutes" -o out/minutes.pdf

  # Freeform text from stdin
  echo "first line" | docmorph - --from manual --to word --title Notes

  # Show every supported conversion
  docmorph --list

ENVIRONMENT VARIABLES:
  DOCMORPH_OUTPUT      Default output path or directory
  DOCMORPH_PDF_ROWS    Rows per sheet when converting a workbook to PDF
  DOCMORPH_WORD_ROWS   Rows per sheet when converting a workbook to Word
  DOCMORPH_NO_WORD     Disable Word output (Word targets degrade to Excel)
  RUST_LOG             Override the log filter
"#;

#[derive(Parser, Debug)]
#[command(
    name = "docmorph",
    version,
    about = "Convert PDF, Word, Excel, image or text documents to PDF, Word or Excel",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Source file, or `-` to read manual text from stdin.
    #[arg(required_unless_present = "list")]
    input: Option<String>,

    /// Target kind: pdf, word or excel.
    #[arg(long, required_unless_present = "list")]
    to: Option<DocumentKind>,

    /// Source kind. Inferred from the input extension when omitted.
    #[arg(long)]
    from: Option<DocumentKind>,

    /// Document title. Defaults to the input file stem.
    #[arg(long)]
    title: Option<String>,

    /// Output file or directory. Defaults to the current directory.
    #[arg(short, long, env = "DOCMORPH_OUTPUT")]
    output: Option<PathBuf>,

    #[arg(long, env = "DOCMORPH_PDF_ROWS", default_value_t = 50)]
    pdf_rows: usize,

    #[arg(long, env = "DOCMORPH_WORD_ROWS", default_value_t = 30)]
    word_rows: usize,

    #[arg(long, env = "DOCMORPH_NO_WORD")]
    no_word: bool,

    /// Print a JSON summary instead of a status line.
    #[arg(long, env = "DOCMORPH_JSON")]
    json: bool,

    /// Print the conversion matrix and exit.
    #[arg(long)]
    list: bool,

    #[arg(short, long, env = "DOCMORPH_VERBOSE")]
    verbose: bool,

    #[arg(short, long, env = "DOCMORPH_QUIET")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || cli.json {
        "error"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    if cli.list {
        return print_matrix(cli.json);
    }

    // ── Build config ─────────────────────────────────────────────────────
    let config = ConversionConfig::builder()
        .pdf_row_limit(cli.pdf_rows)
        .word_row_limit(cli.word_rows)
        .word_export(!cli.no_word)
        .build()
        .context("Invalid configuration")?;
    let converter = Converter::new(config);

    // ── Resolve source ───────────────────────────────────────────────────
    let input = cli.input.as_deref().context("INPUT is required")?;
    let target = cli.to.context("--to is required")?;
    let source = load_source(input, cli.from, cli.title.clone())?;

    // ── Run conversion ───────────────────────────────────────────────────
    let result = convert_async(source, target, &converter)
        .await
        .context("Conversion failed")?;

    let output = cli.output.clone().unwrap_or_else(|| PathBuf::from("."));
    let path = tokio::task::block_in_place(|| save_result(&result, &output))
        .context("Failed to write output")?;

    if cli.json {
        let summary = serde_json::json!({
            "format": result.format,
            "mime_type": result.mime_type,
            "filename": result.filename,
            "bytes": result.bytes.len(),
            "outcome": result.outcome,
            "path": path,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&summary).context("Failed to serialise summary")?
        );
    } else if !cli.quiet {
        print_status(&result, &path);
    }
    Ok(())
}

fn load_source(input: &str, from: Option<DocumentKind>, title: Option<String>) -> Result<SourceDocument> {
    if input == "-" {
        if from.is_some_and(|k| k != DocumentKind::Manual) {
            bail!("stdin input is only supported with --from manual");
        }
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read stdin")?;
        return Ok(SourceDocument::manual(
            title.unwrap_or_else(|| "document".to_string()),
            text,
        ));
    }

    let path = Path::new(input);
    let title = title.unwrap_or_else(|| {
        path.file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "document".to_string())
    });
    let kind = match from {
        Some(kind) => kind,
        None => DocumentKind::from_path(path).with_context(|| {
            format!("Cannot infer the document kind of '{input}'; pass --from")
        })?,
    };

    if kind == DocumentKind::Manual {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read '{}'", path.display()))?;
        return Ok(SourceDocument::manual(title, text));
    }
    Ok(SourceDocument::from_path(kind, title, path))
}

fn print_status(result: &ConversionResult, path: &Path) {
    match &result.outcome {
        Outcome::Fallback { message } => {
            eprintln!("warning: {message}");
            eprintln!(
                "wrote notice document {} ({} bytes)",
                path.display(),
                result.bytes.len()
            );
        }
        Outcome::Converted | Outcome::Passthrough => {
            eprintln!("wrote {} ({} bytes)", path.display(), result.bytes.len());
        }
    }
}

fn print_matrix(json: bool) -> Result<()> {
    if json {
        let rows: Vec<_> = supported_pairs()
            .map(|(from, to, route)| serde_json::json!({ "from": from, "to": to, "route": route }))
            .collect();
        println!(
            "{}",
            serde_json::to_string_pretty(&rows).context("Failed to serialise matrix")?
        );
        return Ok(());
    }

    println!("{:<8} {:<8} ROUTE", "FROM", "TO");
    for (from, to, route) in supported_pairs() {
        let how = match route {
            Route::Passthrough(_) => "passthrough".to_string(),
            Route::Pipeline { extractor, builder } => format!("{extractor:?} -> {builder:?}"),
        };
        println!("{:<8} {:<8} {}", from.to_string(), to.to_string(), how);
    }
    Ok(())
}
