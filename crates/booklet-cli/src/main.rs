mod logger;

use anyhow::{Context, Result, bail};
use booklet_impose::BookletOptions;
use booklet_impose::constants::MAX_SHEETS_PER_SIGNATURE;
use clap::{Args, Parser, Subcommand};
use lopdf::Document;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "booklet", about = "Saddle-stitch booklet imposition", version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Produce the imposed booklet PDF
    Make {
        #[command(flatten)]
        common: CommonArgs,

        /// Output PDF file (default: <input>_print.pdf)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Compare sheets-per-signature choices by blank pages added
    #[command(alias = "advise")]
    Test {
        #[command(flatten)]
        common: CommonArgs,

        /// Enumerate sheets per signature below this bound (default: pages / 8)
        #[arg(long, value_parser = parse_sheet_count)]
        limit: Option<usize>,

        /// Keep only the best arrangement per signature count
        #[arg(long)]
        best: bool,
    },
}

#[derive(Args)]
struct CommonArgs {
    /// Input PDF file
    input: Option<PathBuf>,

    /// Sheets folded into each signature
    #[arg(short, long, value_parser = parse_sheet_count)]
    sheets: Option<usize>,

    /// JSON options file; command-line flags take precedence
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn parse_sheet_count(value: &str) -> std::result::Result<usize, String> {
    match value.parse::<usize>() {
        Ok(0) => Err("must be at least 1".to_string()),
        Ok(n) if n > MAX_SHEETS_PER_SIGNATURE => {
            Err(format!("must be at most {}", MAX_SHEETS_PER_SIGNATURE))
        }
        Ok(n) => Ok(n),
        Err(_) => Err(format!("`{}` is not a positive integer", value)),
    }
}

impl CommonArgs {
    /// Load the config file (if any) and apply command-line overrides
    async fn options(&self) -> Result<BookletOptions> {
        let mut options = match &self.config {
            Some(path) => BookletOptions::load(path)
                .await
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => BookletOptions::default(),
        };

        if let Some(input) = &self.input {
            options.input_file = input.clone();
        }
        if let Some(sheets) = self.sheets {
            options.sheets_per_signature = sheets;
        }
        if options.input_file.as_os_str().is_empty() {
            bail!("Missing input file");
        }

        Ok(options)
    }
}

async fn load_source(options: &BookletOptions) -> Result<Document> {
    let path = &options.input_file;
    if !path.exists() {
        bail!("File '{}' not found", path.display());
    }
    booklet_impose::load_pdf(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::StderrLogger::from_verbosity(cli.verbose).init()?;

    match cli.command {
        Commands::Make { common, output } => {
            let mut options = common.options().await?;
            if output.is_some() {
                options.output_file = output;
            }
            options.validate()?;

            let source = load_source(&options).await?;
            let total_pages = source.get_pages().len();
            let summary =
                booklet_impose::blank_pages_for(total_pages, options.sheets_per_signature);

            let imposed = booklet_impose::impose(&source, &options).await?;
            let output_path = options.output_path();
            booklet_impose::save_pdf(imposed, &output_path)
                .await
                .with_context(|| format!("Failed to write {}", output_path.display()))?;

            println!(
                "{} pages → {} sheet sides in {} signature(s), {} blank page(s) → {}",
                total_pages,
                summary.sheet_side_count(),
                summary.number_of_signatures,
                summary.blank_pages,
                output_path.display()
            );
        }

        Commands::Test {
            common,
            limit,
            best,
        } => {
            let mut options = common.options().await?;
            if limit.is_some() {
                options.advisor_limit = limit;
            }
            options.validate()?;

            let source = load_source(&options).await?;
            let total_pages = source.get_pages().len();

            let mut table = booklet_impose::arrangement_table(
                total_pages,
                options.advisor_limit,
                Some(options.sheets_per_signature),
            );
            if best {
                table = table.best_only();
            }
            print!("{}", table);
        }
    }

    Ok(())
}
