//! CSV export and markdown report rendering for finished schedules

use std::fs::File;
use std::io::Write;
use std::path::Path;

use chrono::NaiveDate;
use csv::WriterBuilder;
use log::info;
use serde::{Deserialize, Serialize};

use crate::aggregate::YearlySummary;
use crate::error::Result;
use crate::loan::LoanParameters;
use crate::schedule::{ScheduleRow, ScheduleSummary, Termination};

const SCHEDULE_HEADER: [&str; 10] = [
    "Period",
    "Date",
    "Payment",
    "Interest",
    "Principal",
    "Extra_Principal",
    "Escrow",
    "Total_Outflow",
    "Balance",
    "Inflation_Adjusted_Payment",
];

const YEARLY_HEADER: [&str; 9] = [
    "Year",
    "Periods",
    "Payment",
    "Interest",
    "Principal",
    "Extra_Principal",
    "Escrow",
    "Total_Outflow",
    "Ending_Balance",
];

/// Serialized schedule line; None inflation writes an empty field
#[derive(Serialize)]
struct ScheduleRecord {
    period: u32,
    date: NaiveDate,
    payment: f64,
    interest: f64,
    principal: f64,
    extra_principal: f64,
    escrow: f64,
    total_outflow: f64,
    balance: f64,
    inflation_adjusted_payment: Option<f64>,
}

impl From<&ScheduleRow> for ScheduleRecord {
    fn from(row: &ScheduleRow) -> Self {
        Self {
            period: row.period,
            date: row.date,
            payment: round8(row.payment),
            interest: round8(row.interest),
            principal: round8(row.principal),
            extra_principal: round8(row.extra_principal),
            escrow: round8(row.escrow),
            total_outflow: round8(row.total_outflow),
            balance: round8(row.balance),
            inflation_adjusted_payment: row.inflation_adjusted_payment.map(round8),
        }
    }
}

#[derive(Serialize)]
struct YearlyRecord {
    year: i32,
    periods: u32,
    payment: f64,
    interest: f64,
    principal: f64,
    extra_principal: f64,
    escrow: f64,
    total_outflow: f64,
    ending_balance: f64,
}

impl From<&YearlySummary> for YearlyRecord {
    fn from(y: &YearlySummary) -> Self {
        Self {
            year: y.year,
            periods: y.periods,
            payment: round8(y.payment),
            interest: round8(y.interest),
            principal: round8(y.principal),
            extra_principal: round8(y.extra_principal),
            escrow: round8(y.escrow),
            total_outflow: round8(y.total_outflow),
            ending_balance: round8(y.ending_balance),
        }
    }
}

fn round8(value: f64) -> f64 {
    (value * 1e8).round() / 1e8
}

/// Write one CSV line per schedule row, header always present
pub fn write_schedule_csv<W: Write>(writer: W, rows: &[ScheduleRow]) -> Result<()> {
    let mut wtr = WriterBuilder::new().has_headers(false).from_writer(writer);
    wtr.write_record(SCHEDULE_HEADER)?;
    for row in rows {
        wtr.serialize(ScheduleRecord::from(row))?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_schedule_csv_file<P: AsRef<Path>>(path: P, rows: &[ScheduleRow]) -> Result<()> {
    let path = path.as_ref();
    write_schedule_csv(File::create(path)?, rows)?;
    info!("Wrote {} schedule rows to {}", rows.len(), path.display());
    Ok(())
}

/// Write the yearly roll-up as CSV
pub fn write_yearly_csv<W: Write>(writer: W, yearly: &[YearlySummary]) -> Result<()> {
    let mut wtr = WriterBuilder::new().has_headers(false).from_writer(writer);
    wtr.write_record(YEARLY_HEADER)?;
    for year in yearly {
        wtr.serialize(YearlyRecord::from(year))?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_yearly_csv_file<P: AsRef<Path>>(path: P, yearly: &[YearlySummary]) -> Result<()> {
    let path = path.as_ref();
    write_yearly_csv(File::create(path)?, yearly)?;
    info!("Wrote {} yearly rows to {}", yearly.len(), path.display());
    Ok(())
}

/// Format a currency amount as `$1,234.56`
pub fn format_money(amount: f64) -> String {
    let formatted = format!("{:.2}", amount.abs());
    let (int_part, frac_part) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if amount < 0.0 && formatted != "0.00" { "-" } else { "" };
    format!("{}${}.{}", sign, grouped, frac_part)
}

/// Optional borrower details printed at the top of a report
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BorrowerDetails {
    pub name: Option<String>,
    pub age: Option<u32>,
    pub region: Option<String>,
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Markdown summary report for a schedule run
pub fn render_report(
    params: &LoanParameters,
    summary: &ScheduleSummary,
    borrower: &BorrowerDetails,
    generated_on: NaiveDate,
) -> String {
    let title = match non_blank(&borrower.name) {
        Some(name) => format!("# Loan Report for {}", name),
        None => "# Loan Report".to_string(),
    };

    let mut lines = vec![title, String::new()];
    if let Some(age) = borrower.age {
        lines.push(format!("- Age: {}", age));
    }
    if let Some(region) = non_blank(&borrower.region) {
        lines.push(format!("- Region: {}", region));
    }
    if lines.len() > 2 {
        lines.push(String::new());
    }

    lines.extend([
        "## Loan Summary".to_string(),
        format!("- Principal (Loan Amount): {}", format_money(params.principal)),
        format!("- APR: {:.2}%", params.nominal_annual_rate * 100.0),
        format!("- Term: {} years", params.term_years),
        format!("- Repayment Frequency: {}", params.payment_frequency),
        format!("- Compounding: {}", params.compounding_frequency),
        format!("- First Payment: {}", params.start_date),
        format!("- Base Payment (per period): {}", format_money(summary.base_payment)),
        format!(
            "- Payments: {} of {} scheduled",
            summary.period_count, summary.scheduled_periods
        ),
        String::new(),
        "## Totals".to_string(),
        format!("- Total Interest: {}", format_money(summary.total_interest)),
        format!("- Total Principal: {}", format_money(summary.total_principal)),
        format!("- Total Extra Principal: {}", format_money(summary.total_extra_principal)),
        format!("- Total Escrow: {}", format_money(summary.total_escrow)),
        format!("- Fees Rolled Into Loan: {}", format_money(summary.fees_rolled_into_loan)),
        format!("- Fees Paid Upfront: {}", format_money(summary.fees_paid_upfront)),
        format!("- Total Cost: {}", format_money(summary.total_cost())),
    ]);

    if summary.termination == Termination::SafetyCap {
        lines.push(String::new());
        lines.push(format!(
            "> Warning: the loan does not pay off; {} remains after {} payments.",
            format_money(summary.final_balance),
            summary.period_count
        ));
    }

    lines.push(String::new());
    lines.push(format!("*Generated on: {}*", generated_on));
    lines.push(String::new());
    lines.join("\n")
}
