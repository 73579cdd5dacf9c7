//! AWS Lambda handler for building amortization schedules
//!
//! Accepts loan parameters as a JSON event and returns the summary, the
//! extra-payment comparison, and optionally the yearly roll-up and full rows.

use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use log::info;
use serde::{Deserialize, Serialize};

use loan_amortization::{
    build_schedule, compare_with_schedule, ExtraPaymentComparison, LoanParameters, ScheduleRow,
    ScheduleSummary, YearlySummary,
};

/// Input event: loan parameters plus output switches
#[derive(Debug, Deserialize)]
pub struct ScheduleRequest {
    #[serde(flatten)]
    pub loan: LoanParameters,

    /// Return every schedule row (default: false)
    #[serde(default)]
    pub include_rows: bool,

    /// Return the calendar-year roll-up (default: true)
    #[serde(default = "default_true")]
    pub include_yearly: bool,

    /// Run the no-extra-payment counterfactual (default: true)
    #[serde(default = "default_true")]
    pub include_comparison: bool,
}

fn default_true() -> bool { true }

#[derive(Debug, Serialize, Default)]
pub struct ScheduleResponse {
    pub summary: Option<ScheduleSummary>,
    pub paid_off: bool,
    pub comparison: Option<ExtraPaymentComparison>,
    pub yearly: Option<Vec<YearlySummary>>,
    pub rows: Option<Vec<ScheduleRow>>,
    pub execution_time_ms: u64,
    pub error: Option<String>,
}

/// Build the response for one request; invalid input is reported in `error`
fn process(request: ScheduleRequest) -> ScheduleResponse {
    let start = std::time::Instant::now();

    let schedule = match build_schedule(&request.loan) {
        Ok(schedule) => schedule,
        Err(e) => {
            return ScheduleResponse {
                error: Some(e.to_string()),
                ..Default::default()
            };
        }
    };

    let comparison = if request.include_comparison {
        match compare_with_schedule(&request.loan, &schedule) {
            Ok(comparison) => Some(comparison),
            Err(e) => {
                return ScheduleResponse {
                    error: Some(e.to_string()),
                    ..Default::default()
                };
            }
        }
    } else {
        None
    };

    let yearly = request.include_yearly.then(|| schedule.yearly());
    let paid_off = schedule.summary.is_paid_off();

    ScheduleResponse {
        summary: Some(schedule.summary),
        paid_off,
        comparison,
        yearly,
        rows: request.include_rows.then_some(schedule.rows),
        execution_time_ms: start.elapsed().as_millis() as u64,
        error: None,
    }
}

async fn handler(event: LambdaEvent<ScheduleRequest>) -> Result<ScheduleResponse, Error> {
    let (request, context) = event.into_parts();
    info!("Request {}: principal={} term={}y", context.request_id, request.loan.principal, request.loan.term_years);
    Ok(process(request))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(handler)).await
}
