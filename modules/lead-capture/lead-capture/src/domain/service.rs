use std::sync::Arc;

use chrono::{DateTime, Utc};
use lead_capture_sdk::{LeadSubmission, LeadSubmissionInput, SubmissionReceipt, validate};
use tracing::{debug, info, instrument, warn};

use super::error::DomainError;
use super::ports::{LeadSheet, SheetConnector};

/// Column titles written once to an empty sheet.
pub const HEADER_ROW: [&str; 5] = [
    "Full Name",
    "Email",
    "whatsapp",
    "Business Goals & Challenges",
    "Choose Your Service",
];

const SUBMITTED_AT_FORMAT: &str = "%m/%d/%Y, %I:%M:%S %p";

type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// `MM/DD/YYYY, hh:mm:ss AM` in UTC.
#[must_use]
pub fn format_submitted_at(at: DateTime<Utc>) -> String {
    at.format(SUBMITTED_AT_FORMAT).to_string()
}

/// Sheet row for a validated lead, in column order.
#[must_use]
pub fn lead_row(lead: &LeadSubmission, submitted_at: &str) -> Vec<String> {
    vec![
        lead.full_name.clone(),
        lead.email.clone(),
        lead.whatsapp.clone(),
        lead.business_goals.clone(),
        lead.service_type.id().to_owned(),
        submitted_at.to_owned(),
    ]
}

pub struct Service {
    sheets: Arc<dyn SheetConnector>,
    clock: Clock,
}

impl Service {
    pub fn new(sheets: Arc<dyn SheetConnector>) -> Self {
        Self {
            sheets,
            clock: Arc::new(Utc::now),
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: impl Fn() -> DateTime<Utc> + Send + Sync + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Validate, bootstrap the header row and append the lead.
    ///
    /// Nothing is written when validation fails. Header problems are logged and
    /// the append is attempted anyway.
    #[instrument(skip_all)]
    pub async fn submit(
        &self,
        input: LeadSubmissionInput,
    ) -> Result<SubmissionReceipt, DomainError> {
        let lead = validate(&input).map_err(|errors| {
            debug!(failed = errors.len(), "lead rejected by validation");
            DomainError::Validation(errors)
        })?;

        let sheet = self.sheets.connect().await?;
        ensure_header(sheet.as_ref()).await;

        let submitted_at = format_submitted_at((self.clock)());
        let outcome = sheet.append_row(lead_row(&lead, &submitted_at)).await?;

        info!(
            email = %lead.email,
            submitted_at = %submitted_at,
            rows_added = outcome.rows_added,
            "lead recorded"
        );

        Ok(SubmissionReceipt {
            submitted_at,
            rows_added: outcome.rows_added,
        })
    }
}

async fn ensure_header(sheet: &dyn LeadSheet) {
    if needs_header(sheet).await {
        write_header(sheet).await;
    }
}

/// `false` when the first row cannot be read.
async fn needs_header(sheet: &dyn LeadSheet) -> bool {
    match sheet.read_header().await {
        Ok(row) => row.as_ref().is_none_or(Vec::is_empty),
        Err(e) => {
            warn!(error = %e, "failed to read header row");
            false
        }
    }
}

async fn write_header(sheet: &dyn LeadSheet) {
    match sheet.write_header(&HEADER_ROW).await {
        Ok(()) => info!("header row written"),
        Err(e) => warn!(error = %e, "failed to write header row"),
    }
}
