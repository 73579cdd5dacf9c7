//! Post-processing over schedule rows
//!
//! Yearly roll-up by calendar year and running cumulative totals. Both are
//! pure folds over the row slice and can be recomputed at will.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::schedule::ScheduleRow;

/// Column sums for one calendar year
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct YearlySummary {
    pub year: i32,
    /// Rows falling in this year
    pub periods: u32,
    pub payment: f64,
    pub interest: f64,
    pub principal: f64,
    pub extra_principal: f64,
    pub escrow: f64,
    pub total_outflow: f64,
    /// Balance after the year's last payment
    pub ending_balance: f64,
}

impl YearlySummary {
    fn add_row(&mut self, row: &ScheduleRow) {
        self.periods += 1;
        self.payment += row.payment;
        self.interest += row.interest;
        self.principal += row.principal;
        self.extra_principal += row.extra_principal;
        self.escrow += row.escrow;
        self.total_outflow += row.total_outflow;
        self.ending_balance = row.balance;
    }
}

/// Group rows by the calendar year of their payment date, in year order
pub fn yearly_summary(rows: &[ScheduleRow]) -> Vec<YearlySummary> {
    let mut years: BTreeMap<i32, YearlySummary> = BTreeMap::new();

    for row in rows {
        let year = row.date.year();
        years
            .entry(year)
            .or_insert_with(|| YearlySummary { year, ..Default::default() })
            .add_row(row);
    }

    years.into_values().collect()
}

/// Running totals up to and including one row
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CumulativePoint {
    pub period: u32,
    pub date: NaiveDate,
    pub cumulative_interest: f64,
    pub cumulative_principal: f64,
    pub cumulative_payment: f64,
}

/// Lazy iterator of cumulative interest/principal/payment over a schedule
#[derive(Debug, Clone)]
pub struct CumulativeTotals<'a> {
    rows: std::slice::Iter<'a, ScheduleRow>,
    interest: f64,
    principal: f64,
    payment: f64,
}

impl<'a> CumulativeTotals<'a> {
    pub fn new(rows: &'a [ScheduleRow]) -> Self {
        Self {
            rows: rows.iter(),
            interest: 0.0,
            principal: 0.0,
            payment: 0.0,
        }
    }
}

impl Iterator for CumulativeTotals<'_> {
    type Item = CumulativePoint;

    fn next(&mut self) -> Option<CumulativePoint> {
        let row = self.rows.next()?;
        self.interest += row.interest;
        self.principal += row.principal;
        self.payment += row.payment;

        Some(CumulativePoint {
            period: row.period,
            date: row.date,
            cumulative_interest: self.interest,
            cumulative_principal: self.principal,
            cumulative_payment: self.payment,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.rows.size_hint()
    }
}

impl ExactSizeIterator for CumulativeTotals<'_> {}
