//! Loan amortization CLI
//!
//! Builds a schedule from a JSON config and/or flags, prints it, and writes
//! CSV and markdown outputs.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};

use loan_amortization::export::{
    format_money, render_report, write_schedule_csv_file, write_yearly_csv_file, BorrowerDetails,
};
use loan_amortization::loan::load_parameters;
use loan_amortization::{
    build_schedule, compare_extra_payments, CompoundingFrequency, LoanParameters, PaymentFrequency,
    ScheduleSummary,
};

#[derive(Parser)]
#[command(
    name = "amortize",
    version,
    about = "Loan amortization schedules",
    long_about = "Builds a period-by-period amortization schedule with optional extra payments, \
                  interest-only months, escrow, fee rolling and inflation-adjusted payments."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the full schedule, print the first periods and write it as CSV
    Schedule {
        #[command(flatten)]
        loan: LoanArgs,

        /// CSV output path
        #[arg(long, default_value = "amortization_schedule.csv")]
        output: PathBuf,

        /// Also write a markdown summary report here
        #[arg(long)]
        report: Option<PathBuf>,

        /// Borrower name for the report heading
        #[arg(long)]
        borrower: Option<String>,

        /// Borrower age, listed in the report
        #[arg(long)]
        age: Option<u32>,

        /// Borrower country or region, listed in the report
        #[arg(long)]
        region: Option<String>,

        /// Periods to print to the console
        #[arg(long, default_value_t = 24)]
        show: usize,
    },
    /// Roll the schedule up by calendar year
    Yearly {
        #[command(flatten)]
        loan: LoanArgs,

        /// Optional CSV output path
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Compare total interest and payment count with and without the extra payment
    Compare {
        #[command(flatten)]
        loan: LoanArgs,
    },
}

#[derive(Args, Debug)]
struct LoanArgs {
    /// JSON file with loan parameters; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Loan amount
    #[arg(long)]
    principal: Option<f64>,

    /// Annual interest rate (APR) in percent, e.g. 7.5
    #[arg(long)]
    apr: Option<f64>,

    /// Term in years
    #[arg(long)]
    years: Option<u32>,

    /// Compounding periods per year: 1, 2, 4 or 12
    #[arg(long)]
    compounding: Option<u32>,

    /// Payments per year: 12, 26 or 52
    #[arg(long)]
    payments_per_year: Option<u32>,

    /// First payment date (YYYY-MM-DD); defaults to today
    #[arg(long)]
    start_date: Option<NaiveDate>,

    /// Extra principal per period
    #[arg(long)]
    extra: Option<f64>,

    /// Interest-only months at the start of the loan
    #[arg(long)]
    interest_only_months: Option<u32>,

    /// Monthly escrow (tax/insurance/HOA)
    #[arg(long)]
    escrow: Option<f64>,

    /// Expected annual inflation in percent
    #[arg(long)]
    inflation: Option<f64>,

    /// One-time fees (origination, closing)
    #[arg(long)]
    fees: Option<f64>,

    /// Roll the one-time fees into the loan
    #[arg(long)]
    roll_fees: bool,
}

impl LoanArgs {
    fn into_parameters(self) -> Result<LoanParameters> {
        let mut params = match &self.config {
            Some(path) => load_parameters(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => LoanParameters::new(
                self.principal.context("--principal is required without --config")?,
                self.apr.context("--apr is required without --config")? / 100.0,
                self.years.context("--years is required without --config")?,
                self.start_date.unwrap_or_else(|| Local::now().date_naive()),
            ),
        };

        if let Some(principal) = self.principal {
            params.principal = principal;
        }
        if let Some(apr) = self.apr {
            params.nominal_annual_rate = apr / 100.0;
        }
        if let Some(years) = self.years {
            params.term_years = years;
        }
        if let Some(compounding) = self.compounding {
            params.compounding_frequency = CompoundingFrequency::try_from(compounding)?;
        }
        if let Some(payments) = self.payments_per_year {
            params.payment_frequency = PaymentFrequency::try_from(payments)?;
        }
        if let Some(start_date) = self.start_date {
            params.start_date = start_date;
        }
        if let Some(extra) = self.extra {
            params.extra_payment_per_period = extra;
        }
        if let Some(months) = self.interest_only_months {
            params.interest_only_months = months;
        }
        if let Some(escrow) = self.escrow {
            params.escrow_per_month = escrow;
        }
        if let Some(inflation) = self.inflation {
            params.inflation_annual_rate = inflation / 100.0;
        }
        if let Some(fees) = self.fees {
            params.one_time_fees = fees;
        }
        if self.roll_fees {
            params.roll_fees_into_loan = true;
        }

        params.validate()?;
        Ok(params)
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Schedule { loan, output, report, borrower, age, region, show } => {
            let borrower = BorrowerDetails { name: borrower, age, region };
            run_schedule(loan.into_parameters()?, output, report, borrower, show)
        }
        Commands::Yearly { loan, output } => run_yearly(loan.into_parameters()?, output),
        Commands::Compare { loan } => run_compare(loan.into_parameters()?),
    }
}

fn run_schedule(
    params: LoanParameters,
    output: PathBuf,
    report: Option<PathBuf>,
    borrower: BorrowerDetails,
    show: usize,
) -> Result<()> {
    let schedule = build_schedule(&params)?;

    print_loan_header(&params);
    println!(
        "{:>6} {:>10} {:>12} {:>12} {:>12} {:>10} {:>10} {:>14}",
        "Period", "Date", "Payment", "Interest", "Principal", "Extra", "Escrow", "Balance"
    );
    println!("{}", "-".repeat(94));

    for row in schedule.rows.iter().take(show) {
        println!(
            "{:>6} {:>10} {:>12.2} {:>12.2} {:>12.2} {:>10.2} {:>10.2} {:>14.2}",
            row.period,
            row.date,
            row.payment,
            row.interest,
            row.principal,
            row.extra_principal,
            row.escrow,
            row.balance,
        );
    }

    if schedule.len() > show {
        println!("... ({} more periods)", schedule.len() - show);
    }

    write_schedule_csv_file(&output, &schedule.rows)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    println!("\nFull schedule written to: {}", output.display());

    print_summary(&schedule.summary);

    if let Some(path) = report {
        let text = render_report(
            &params,
            &schedule.summary,
            &borrower,
            Local::now().date_naive(),
        );
        fs::write(&path, text).with_context(|| format!("Failed to write {}", path.display()))?;
        println!("Report written to: {}", path.display());
    }

    Ok(())
}

fn run_yearly(params: LoanParameters, output: Option<PathBuf>) -> Result<()> {
    let schedule = build_schedule(&params)?;
    let yearly = schedule.yearly();

    print_loan_header(&params);
    println!(
        "{:>6} {:>7} {:>14} {:>14} {:>14} {:>12} {:>12} {:>14}",
        "Year", "Periods", "Payment", "Interest", "Principal", "Extra", "Escrow", "Outflow"
    );
    println!("{}", "-".repeat(100));

    for year in &yearly {
        println!(
            "{:>6} {:>7} {:>14.2} {:>14.2} {:>14.2} {:>12.2} {:>12.2} {:>14.2}",
            year.year,
            year.periods,
            year.payment,
            year.interest,
            year.principal,
            year.extra_principal,
            year.escrow,
            year.total_outflow,
        );
    }

    if let Some(path) = output {
        write_yearly_csv_file(&path, &yearly)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("\nYearly summary written to: {}", path.display());
    }

    Ok(())
}

fn run_compare(params: LoanParameters) -> Result<()> {
    let comparison = compare_extra_payments(&params)?;

    print_loan_header(&params);
    println!("{:<26} {:>16} {:>10}", "Scenario", "Total Interest", "Payments");
    println!("{}", "-".repeat(54));
    for side in [&comparison.with_extra, &comparison.without_extra] {
        println!(
            "{:<26} {:>16} {:>10}",
            side.scenario,
            format_money(side.total_interest),
            side.period_count
        );
    }

    println!("\nInterest saved: {}", format_money(comparison.interest_saved()));
    println!("Payments saved: {}", comparison.periods_saved());
    Ok(())
}

fn print_loan_header(params: &LoanParameters) {
    println!("Loan: {} at {:.2}% for {} years", format_money(params.principal), params.nominal_annual_rate * 100.0, params.term_years);
    println!("  Payments:    {}", params.payment_frequency);
    println!("  Compounding: {}", params.compounding_frequency);
    println!("  First due:   {}", params.start_date);
    println!();
}

fn print_summary(summary: &ScheduleSummary) {
    println!("\nSummary:");
    println!("  Base Payment:          {}", format_money(summary.base_payment));
    println!("  Payments:              {} ({} scheduled)", summary.period_count, summary.scheduled_periods);
    println!("  Total Interest:        {}", format_money(summary.total_interest));
    println!("  Total Principal:       {}", format_money(summary.total_principal));
    println!("  Total Extra Principal: {}", format_money(summary.total_extra_principal));
    println!("  Total Escrow:          {}", format_money(summary.total_escrow));
    println!("  Fees Rolled In:        {}", format_money(summary.fees_rolled_into_loan));
    println!("  Fees Paid Upfront:     {}", format_money(summary.fees_paid_upfront));

    if !summary.is_paid_off() {
        println!(
            "\n  WARNING: loan not paid off; {} outstanding after {} payments",
            format_money(summary.final_balance),
            summary.period_count
        );
    }
}
