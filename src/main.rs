// src/main.rs
mod badge;
mod extractors;
mod fetch;
mod utils;

use std::path::PathBuf;
use std::time::Duration;

use badge::{render_dynamic_badge, render_error_badge, BadgeWriter, OutputFormat, DEFAULT_LABEL};
use clap::builder::NonEmptyStringValueParser;
use clap::Parser;
use extractors::{ExtractionPipeline, ExtractionRequest, MatcherLimits};
use fetch::{client, FetchOptions};
use utils::AppError;

/// Extract a value from a remote text file with a linear-time regex and
/// render it as a badge
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// URL of the file to search; its full raw content is the search input
    #[arg(short, long)]
    url: String,

    /// Regular expression used to extract data; only the first match is used
    #[arg(short, long, value_parser = NonEmptyStringValueParser::new())]
    search: String,

    /// Replacement for the match, like `$1` for the first group.
    /// Without it the full matched text is shown
    #[arg(short, long)]
    replace: Option<String>,

    /// Regex flags, e.g. `i` for case insensitive or `m` for multiline
    #[arg(short, long, default_value = "")]
    flags: String,

    /// Value shown when the regex does not match
    #[arg(long, default_value = "")]
    no_match: String,

    /// Badge label
    #[arg(short, long, default_value = DEFAULT_LABEL)]
    label: String,

    /// Output format of the badge
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Write the badge to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// User-Agent sent when fetching the file
    #[arg(long, env = "DYNAMIC_REGEX_USER_AGENT", default_value = client::DEFAULT_USER_AGENT)]
    user_agent: String,

    /// Request timeout in seconds
    #[arg(long, env = "DYNAMIC_REGEX_TIMEOUT_SECS", default_value_t = client::DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,

    /// Largest document, in bytes, that will be searched
    #[arg(long, env = "DYNAMIC_REGEX_MAX_DOCUMENT_BYTES", default_value_t = client::DEFAULT_MAX_DOCUMENT_BYTES)]
    max_document_bytes: usize,

    /// Compiled regex size limit in bytes
    #[arg(long, env = "DYNAMIC_REGEX_SIZE_LIMIT", default_value_t = extractors::compiler::DEFAULT_SIZE_LIMIT)]
    size_limit: usize,

    /// Lazy DFA cache size limit in bytes
    #[arg(long, env = "DYNAMIC_REGEX_DFA_SIZE_LIMIT", default_value_t = extractors::compiler::DEFAULT_DFA_SIZE_LIMIT)]
    dfa_size_limit: usize,
}

impl Args {
    fn fetch_options(&self) -> Result<FetchOptions, AppError> {
        if self.timeout_secs == 0 {
            return Err(AppError::Config("timeout must be at least one second".to_string()));
        }
        if self.max_document_bytes == 0 {
            return Err(AppError::Config("max document size must be positive".to_string()));
        }
        Ok(FetchOptions {
            user_agent: self.user_agent.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
            max_document_bytes: self.max_document_bytes,
        })
    }

    fn matcher_limits(&self) -> Result<MatcherLimits, AppError> {
        if self.size_limit == 0 || self.dfa_size_limit == 0 {
            return Err(AppError::Config("regex size limits must be positive".to_string()));
        }
        Ok(MatcherLimits {
            size_limit: self.size_limit,
            dfa_size_limit: self.dfa_size_limit,
        })
    }

    fn request(&self) -> ExtractionRequest<'_> {
        ExtractionRequest {
            pattern: &self.search,
            flags: &self.flags,
            template: self.replace.as_deref(),
            no_match: Some(&self.no_match),
        }
    }
}

/// Fetch the document and resolve the value to display.
async fn resolve_value(args: &Args) -> Result<String, AppError> {
    let fetch_options = args.fetch_options()?;
    let pipeline = ExtractionPipeline::new(args.matcher_limits()?);

    let document = fetch::fetch_document(&args.url, &fetch_options).await?;
    tracing::info!("Searching {} bytes with pattern {:?}", document.len(), args.search);

    let value = pipeline.run(&document, &args.request())?;
    Ok(value)
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // 1. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging();

    // 2. Parse CLI Arguments
    let args = Args::parse();
    tracing::debug!("Starting with args: {:?}", args);

    let writer = BadgeWriter::new(args.format, args.output.clone());

    // 3. Fetch, extract, render
    match resolve_value(&args).await {
        Ok(value) => {
            tracing::info!("Extracted value: {:?}", value);
            writer.write(&render_dynamic_badge(&value, &args.label))?;
            Ok(())
        }
        Err(e) => {
            tracing::error!("{}", e);
            if let Some(badge) = render_error_badge(&e, &args.label) {
                if let Err(write_err) = writer.write(&badge) {
                    tracing::error!("Failed to write error badge: {}", write_err);
                }
            }
            Err(e)
        }
    }
}
