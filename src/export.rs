//! CSV export of the projection ledger, one row per projected year

use std::error::Error;
use std::path::Path;

use crate::projection::ProjectionResult;

/// Write the full ledger as CSV to any writer
pub fn write_ledger_csv<W: std::io::Write>(
    result: &ProjectionResult,
    writer: W,
) -> Result<(), Box<dyn Error>> {
    let mut csv = csv::Writer::from_writer(writer);

    let mut header: Vec<String> = vec![
        "Year".into(),
        "PrimaryAge".into(),
        "PartnerAge".into(),
        "SurvivorStart".into(),
        "PrimaryIncome".into(),
        "PartnerIncome".into(),
        "PrimaryLumpIncome".into(),
        "PartnerLumpIncome".into(),
        "IncomeTotal".into(),
    ];
    header.extend(result.categories.iter().map(|c| c.label().to_string()));
    header.extend(
        [
            "LivingTotal",
            "PrimaryCare",
            "PartnerCare",
            "PrimaryLumpExpense",
            "PartnerLumpExpense",
            "ExpenseTotal",
            "Cashflow",
            "Balance",
        ]
        .map(String::from),
    );
    csv.write_record(&header)?;

    let age = |a: Option<u32>| a.map(|v| v.to_string()).unwrap_or_default();
    let money = |v: f64| format!("{:.1}", v);

    for row in &result.rows {
        let mut record: Vec<String> = vec![
            row.year.to_string(),
            age(row.primary_age),
            age(row.partner_age),
            if row.survivor_start { "1".into() } else { String::new() },
            money(row.primary_income),
            money(row.partner_income),
            money(row.primary_lump_income),
            money(row.partner_lump_income),
            money(row.income_total),
        ];
        record.extend(row.living.iter().map(|&v| money(v)));
        record.extend([
            money(row.living_total),
            money(row.primary_care),
            money(row.partner_care),
            money(row.primary_lump_expense),
            money(row.partner_lump_expense),
            money(row.expense_total),
            money(row.cashflow),
            money(row.balance),
        ]);
        csv.write_record(&record)?;
    }

    csv.flush()?;
    Ok(())
}

/// Write the full ledger as a CSV file
pub fn write_ledger_csv_path<P: AsRef<Path>>(
    result: &ProjectionResult,
    path: P,
) -> Result<(), Box<dyn Error>> {
    let file = std::fs::File::create(path.as_ref())?;
    write_ledger_csv(result, file)?;
    log::info!("ledger written to {}", path.as_ref().display());
    Ok(())
}
