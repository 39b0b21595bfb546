//! CLI binary for pdf2text.
//!
//! A thin shim over the library crate: `extract` runs the full decision
//! pipeline against a local file, `decrypt` unlocks and re-saves a protected
//! document, `serve` starts the HTTP service.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use pdf2text::{decrypt_pdf, extract_bytes_blocking, ExtractOptions, DEFAULT_OCR_LANGUAGE};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

const AFTER_HELP: &str = r#"EXAMPLES:
  # Extract text to stdout
  pdf2text extract statement.pdf

  # Encrypted document: candidates are tried in the order given
  pdf2text extract statement.pdf -p guess1 -p guess2 -o statement.txt

  # Scanned document: skip native extraction entirely
  pdf2text extract scan.pdf --force-ocr --ocr-lang eng

  # Remove password protection (writes statement_decrypted.pdf)
  pdf2text decrypt statement.pdf -p abc123

  # Run the HTTP service
  pdf2text serve --bind 0.0.0.0:8000

ENVIRONMENT VARIABLES:
  PDF2TEXT_BIND      Bind address for `serve`
  PDF2TEXT_VERBOSE   Enable DEBUG-level logs
  PDFIUM_LIB_PATH    Path to an existing libpdfium shared library

SETUP:
  pdfium is loaded as a shared library at startup; install it (or point
  PDFIUM_LIB_PATH at a copy) before first use. OCR fallback additionally
  needs the `tesseract` binary with the language packs for your documents
  (chi_tra, chi_sim and eng by default).
"#;

/// Extract plain text from PDF documents, with password trial and OCR fallback.
#[derive(Parser, Debug)]
#[command(
    name = "pdf2text",
    version,
    about = "Extract plain text from PDF documents, with password trial and OCR fallback",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, global = true, env = "PDF2TEXT_VERBOSE")]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract text from a local PDF file.
    Extract {
        /// Path to the PDF file.
        input: PathBuf,

        /// Candidate password for encrypted documents; repeat the flag to
        /// supply several, tried in the order given.
        #[arg(short, long = "password")]
        passwords: Vec<String>,

        /// Skip native extraction and OCR every page.
        #[arg(long)]
        force_ocr: bool,

        /// OCR language profile (a tesseract -l argument).
        #[arg(long, default_value = DEFAULT_OCR_LANGUAGE)]
        ocr_lang: String,

        /// Write text to this file instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Unlock an encrypted PDF with a known password and save an
    /// unprotected copy.
    Decrypt {
        /// Path to the encrypted PDF file.
        input: PathBuf,

        /// Output path; defaults to `<input stem>_decrypted.pdf`.
        output: Option<PathBuf>,

        /// The document's user password.
        #[arg(short, long)]
        password: String,
    },

    /// Run the HTTP extraction service.
    Serve {
        /// Address to bind, e.g. 0.0.0.0:8000.
        #[arg(short, long, default_value = "0.0.0.0:8000", env = "PDF2TEXT_BIND")]
        bind: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    match cli.command {
        Command::Extract {
            input,
            passwords,
            force_ocr,
            ocr_lang,
            output,
        } => run_extract(&input, passwords, force_ocr, ocr_lang, output.as_deref()).await,
        Command::Decrypt {
            input,
            output,
            password,
        } => run_decrypt(&input, output, &password).await,
        Command::Serve { bind } => pdf2text::server::serve(&bind)
            .await
            .context("HTTP service failed"),
    }
}

async fn run_extract(
    input: &Path,
    passwords: Vec<String>,
    force_ocr: bool,
    ocr_lang: String,
    output: Option<&Path>,
) -> Result<()> {
    let bytes = std::fs::read(input)
        .with_context(|| format!("Failed to read '{}'", input.display()))?;

    let options = ExtractOptions::builder()
        .force_ocr(force_ocr)
        .ocr_language(ocr_lang)
        .build();

    let text = tokio::task::spawn_blocking(move || {
        extract_bytes_blocking(&bytes, &passwords, &options)
    })
    .await
    .context("Extraction task panicked")?
    .context("Extraction failed")?;

    match output {
        Some(path) => {
            std::fs::write(path, &text)
                .with_context(|| format!("Failed to write '{}'", path.display()))?;
            eprintln!("Text written to {}", path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            handle.write_all(text.as_bytes())?;
            if !text.ends_with('\n') {
                handle.write_all(b"\n").ok();
            }
        }
    }

    Ok(())
}

async fn run_decrypt(input: &Path, output: Option<PathBuf>, password: &str) -> Result<()> {
    if !input.exists() {
        bail!("Input file not found: '{}'", input.display());
    }

    let output = output.unwrap_or_else(|| default_decrypted_path(input));
    let in_path = input.to_path_buf();
    let out_path = output.clone();
    let password = password.to_string();

    tokio::task::spawn_blocking(move || decrypt_pdf(&in_path, &out_path, &password))
        .await
        .context("Decryption task panicked")?
        .context("Decryption failed")?;

    eprintln!("Decrypted copy saved to {}", output.display());
    Ok(())
}

/// `statement.pdf` → `statement_decrypted.pdf`, next to the input.
fn default_decrypted_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("document");
    let ext = input.extension().and_then(|s| s.to_str()).unwrap_or("pdf");
    input.with_file_name(format!("{stem}_decrypted.{ext}"))
}
