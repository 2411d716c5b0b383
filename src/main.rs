// src/main.rs
mod ai;
mod extractors;
mod metrics;
mod pdf;
mod report;
mod storage;
mod utils;

use std::path::PathBuf;

use clap::Parser;

use extractors::statements::{self, StatementTables};
use metrics::StatementMetrics;
use pdf::ReportDocument;
use storage::StorageManager;
use utils::AppError;

/// Command Line Interface for the annual-report financial statement extractor
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the annual-report PDF
    #[arg(short, long)]
    pdf: PathBuf,

    /// Output directory for extracted tables and metadata
    #[arg(short, long, default_value = "./output")]
    output_dir: String,

    /// Optional question to answer over the extracted figures
    #[arg(short, long)]
    question: Option<String>,

    /// Debug mode - dump per-page extracted text for debugging
    #[arg(short, long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // 1. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging();

    // 2. Parse CLI Arguments
    let args = Args::parse();
    tracing::info!("Starting extraction for args: {:?}", args);

    // 3. Initialize storage
    let storage = StorageManager::new(&args.output_dir)?;

    // 4. Load the PDF and extract per-page text + raw tables
    let document = ReportDocument::open(&args.pdf)?;
    tracing::info!("Loaded {} pages from {}", document.page_count(), args.pdf.display());

    if args.debug {
        let debug_dir = storage.base_dir().join("debug");
        let markers = [
            (statements::BALANCE_SHEET_MARKER, "balance-sheet"),
            (statements::PROFIT_LOSS_MARKER, "profit-and-loss"),
        ];
        utils::page_debug::dump_page_text(document.pages(), &debug_dir, &markers)?;
    }

    // 5. Tag pages, stitch tables, normalize
    let tables = statements::extract_statements(document.pages());
    print_extracts(&tables);
    save_extracts(&storage, &args.pdf, &tables);

    // 6. Derived metrics and charts
    let metrics = StatementMetrics::derive(&tables.balance_sheet, &tables.profit_loss);
    print_metrics(&metrics);

    // 7. Optional one-shot Q&A over the extracted figures
    if let Some(question) = &args.question {
        let context = ai::build_context(&tables.balance_sheet, &tables.profit_loss);
        tracing::info!("Answering question over {} bytes of context", context.len());

        let answer = ai::answer_question(question, &context).await?;
        println!("=== AI Response ===");
        println!("{}\n", answer);
    }

    tracing::info!("Extraction finished.");
    Ok(())
}

fn print_extracts(tables: &StatementTables) {
    if tables.balance_sheet.is_empty() {
        tracing::warn!("No balance-sheet marker pages yielded tables");
    }
    if tables.profit_loss.is_empty() {
        tracing::warn!("No profit-and-loss marker pages yielded tables");
    }

    println!("=== Balance Sheet Extract ===");
    println!("{}", report::render_table(&tables.balance_sheet));
    println!("=== Profit & Loss Extract ===");
    println!("{}", report::render_table(&tables.profit_loss));
}

fn save_extracts(storage: &StorageManager, source: &std::path::Path, tables: &StatementTables) {
    let extracts = [
        ("balance_sheet", &tables.balance_sheet),
        ("profit_loss", &tables.profit_loss),
    ];

    for (name, table) in extracts {
        if table.is_empty() {
            tracing::debug!("Skipping save of empty {} table", name);
            continue;
        }
        match storage.save_table(name, table) {
            Ok(path) => tracing::info!("Saved {} extract to: {}", name, path.display()),
            Err(e) => tracing::error!("Failed to save {} extract: {}", name, e),
        }
        match storage.save_table_metadata(name, source, table) {
            Ok(path) => tracing::info!("Saved {} metadata to: {}", name, path.display()),
            Err(e) => tracing::error!("Failed to save {} metadata: {}", name, e),
        }
    }
}

fn print_metrics(metrics: &StatementMetrics) {
    // A chart renders only when both of its metrics resolve; anything
    // missing just skips its chart, mirroring the lookup's silent degrade.
    match (metrics.total_assets, metrics.total_liabilities) {
        (Some(assets), Some(liabilities)) => {
            println!(
                "{}",
                report::render_bar_chart(
                    "Assets vs Liabilities",
                    &[("Assets", assets), ("Liabilities", liabilities)],
                )
            );
        }
        _ => tracing::warn!("Assets/liabilities did not both resolve, skipping chart"),
    }

    match (metrics.revenue, metrics.net_profit) {
        (Some(revenue), Some(profit)) => {
            println!(
                "{}",
                report::render_bar_chart(
                    "Revenue vs Profit",
                    &[("Revenue", revenue), ("Profit", profit)],
                )
            );
            if let Some(margin) = metrics.profit_margin() {
                println!("Profit Margin: {}\n", report::format_percent(margin));
            }
        }
        _ => tracing::warn!("Revenue/profit did not both resolve, skipping chart"),
    }
}
