use impacthub_domain::donation::{
    DonationAmount, DonationFlow, DonationRecord, CHECKOUT_TIMED_OUT_MESSAGE,
};
use impacthub_domain::ProjectId;
use serde_json::json;

use crate::application::services::DonationOutcome;
use crate::presentation::error::CommandError;
use crate::presentation::output::Printer;
use crate::presentation::state::AppState;

pub async fn donate(
    state: &AppState,
    printer: &Printer,
    project_id: ProjectId,
    amount: Option<String>,
) -> Result<(), CommandError> {
    let project = state.services.projects.get(project_id).await?;

    let mut flow = DonationFlow::new(project_id);
    flow.open()?;
    if let Some(amount) = amount {
        flow.set_amount(DonationAmount::parse(&amount)?)?;
    }

    printer.note(format!("Donating {} to {}", flow.amount(), project.title));

    match state.services.donations.submit(&mut flow, &project.title).await? {
        DonationOutcome::Completed {
            donation_id,
            amount,
        } => printer.emit(
            &json!({
                "status": "success",
                "donation_id": donation_id,
                "amount_minor_units": amount.minor_units(),
            }),
            || format!("Thank you! Donation #{} of {} confirmed.", donation_id, amount),
        ),
        DonationOutcome::Dismissed => printer.emit(&json!({ "status": "dismissed" }), || {
            "Payment cancelled. No money was taken.".to_string()
        }),
        DonationOutcome::TimedOut { donation_id } => printer.emit(
            &json!({ "status": "unconfirmed", "donation_id": donation_id }),
            || format!("Donation #{}: {}", donation_id, CHECKOUT_TIMED_OUT_MESSAGE),
        ),
    }
}

fn donation_line(record: &DonationRecord) -> String {
    let when = record
        .created_at
        .map(|t| t.format("%Y-%m-%d").to_string())
        .unwrap_or_default();
    format!(
        "#{} {} ₹{} {} {}",
        record.id, when, record.amount, record.status, record.project_title
    )
}

pub async fn history(state: &AppState, printer: &Printer) -> Result<(), CommandError> {
    let donations = state.services.donations.history().await?;

    printer.emit(&donations, || {
        if donations.is_empty() {
            "No donations yet.".to_string()
        } else {
            donations.iter().map(donation_line).collect::<Vec<_>>().join("\n")
        }
    })
}
