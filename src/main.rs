//! Lifeplan CLI
//!
//! Runs a household projection scenario and exports the yearly ledger

use anyhow::Context;
use clap::Parser;
use lifeplan::export::write_ledger_csv_path;
use lifeplan::household::{load_scenario, Scenario};
use lifeplan::projection::ProjectionEngine;

#[derive(Debug, Parser)]
#[command(name = "lifeplan", version, about = "Household life-plan cashflow projection")]
struct Args {
    /// Scenario JSON file; the built-in senior-couple scenario when omitted
    #[arg(long)]
    scenario: Option<std::path::PathBuf>,

    /// Output CSV path for the full ledger
    #[arg(long, default_value = "lifeplan_output.csv")]
    output: std::path::PathBuf,

    /// Number of years to preview on the console
    #[arg(long, default_value_t = 15)]
    rows: usize,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let scenario = match &args.scenario {
        Some(path) => load_scenario(path)
            .map_err(|e| anyhow::anyhow!("{e}"))
            .with_context(|| format!("failed to load scenario {}", path.display()))?,
        None => Scenario::default_senior_couple(),
    };

    // Lifespan validation happens here; an inverted lifespan aborts the
    // run with a single message and no output file.
    let engine = ProjectionEngine::new(scenario)?;
    let result = engine.run();

    println!("Lifeplan projection ({} years)", result.horizon);
    println!(
        "{:>4} {:>5} {:>5} {:>10} {:>10} {:>10} {:>12}",
        "Year", "Prim", "Part", "Income", "Expense", "Cashflow", "Balance"
    );
    println!("{}", "-".repeat(62));

    let fmt_age = |a: Option<u32>| a.map(|v| v.to_string()).unwrap_or_default();
    for row in result.rows.iter().take(args.rows) {
        println!(
            "{:>4} {:>5} {:>5} {:>10.1} {:>10.1} {:>10.1} {:>12.1}",
            row.year,
            fmt_age(row.primary_age),
            fmt_age(row.partner_age),
            row.income_total,
            row.expense_total,
            row.cashflow,
            row.balance,
        );
    }
    if result.rows.len() > args.rows {
        println!("... ({} more years)", result.rows.len() - args.rows);
    }

    write_ledger_csv_path(&result, &args.output).map_err(|e| anyhow::anyhow!("{e}"))?;
    println!("\nFull ledger written to: {}", args.output.display());

    let summary = result.summary();
    println!("\nSummary:");
    println!("  Horizon: {} years", summary.horizon_years);
    if let Some(year) = summary.survivor_start_year {
        println!("  Single-survivor era starts: year {}", year);
    }
    println!("  Total income: {:.1}", summary.total_income);
    println!("  Total expense: {:.1}", summary.total_expense);
    println!("  Deficit years: {}", summary.deficit_years);
    println!(
        "  Minimum balance: {:.1} (year {})",
        summary.min_balance, summary.min_balance_year
    );
    println!("  Final balance: {:.1}", summary.final_balance);

    Ok(())
}
