use std::collections::BTreeMap;

use lead_capture_sdk::validation::check_field;
use lead_capture_sdk::{
    LeadField, LeadSubmissionInput, ServiceOption, ServiceType, SubmissionReceipt,
};
use tracing::{debug, info, warn};

use crate::messages::{GENERIC_SUBMIT_ERROR, field_message};
use crate::transport::{FormTransport, ServerReply, SubmitFormPayload, TransportError};

/// Where the form is in its lifecycle. `Submitted` is terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormPhase {
    Editing,
    Submitting,
    Submitted(SubmissionReceipt),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("a submission is already in flight")]
    Busy,
    #[error("the form has already been submitted")]
    AlreadySubmitted,
    #[error("{0} field(s) need attention")]
    Invalid(usize),
    #[error("no submission is in flight")]
    NotSubmitting,
    /// The request went out but did not succeed; the form is editable again.
    #[error("{0}")]
    Failed(String),
}

#[derive(Debug)]
pub struct FormController {
    values: LeadSubmissionInput,
    errors: BTreeMap<LeadField, &'static str>,
    phase: FormPhase,
    submit_error: Option<String>,
}

impl Default for FormController {
    fn default() -> Self {
        Self::new()
    }
}

impl FormController {
    #[must_use]
    pub fn new() -> Self {
        Self {
            values: LeadSubmissionInput::default(),
            errors: BTreeMap::new(),
            phase: FormPhase::Editing,
            submit_error: None,
        }
    }

    /// Choices for the service picker.
    #[must_use]
    pub fn services() -> &'static [ServiceOption] {
        &ServiceType::ALL
    }

    #[must_use]
    pub fn value(&self, field: LeadField) -> &str {
        self.values.get(field).unwrap_or_default()
    }

    #[must_use]
    pub fn phase(&self) -> &FormPhase {
        &self.phase
    }

    /// Busy indicator: a request is outstanding.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.phase == FormPhase::Submitting
    }

    #[must_use]
    pub fn inputs_enabled(&self) -> bool {
        self.phase == FormPhase::Editing
    }

    #[must_use]
    pub fn receipt(&self) -> Option<&SubmissionReceipt> {
        match &self.phase {
            FormPhase::Submitted(receipt) => Some(receipt),
            _ => None,
        }
    }

    #[must_use]
    pub fn field_error(&self, field: LeadField) -> Option<&'static str> {
        self.errors.get(&field).copied()
    }

    /// Inline errors in field order.
    pub fn field_errors(&self) -> impl Iterator<Item = (LeadField, &'static str)> + '_ {
        self.errors.iter().map(|(f, m)| (*f, *m))
    }

    #[must_use]
    pub fn submit_error(&self) -> Option<&str> {
        self.submit_error.as_deref()
    }

    fn ensure_editable(&self) -> Result<(), FormError> {
        match self.phase {
            FormPhase::Editing => Ok(()),
            FormPhase::Submitting => Err(FormError::Busy),
            FormPhase::Submitted(_) => Err(FormError::AlreadySubmitted),
        }
    }

    /// Edit a field and clear its inline error.
    ///
    /// # Errors
    /// [`FormError::Busy`] while submitting, [`FormError::AlreadySubmitted`] afterwards.
    pub fn set_field(
        &mut self,
        field: LeadField,
        value: impl Into<String>,
    ) -> Result<(), FormError> {
        self.ensure_editable()?;
        self.values.set(field, value);
        self.errors.remove(&field);
        Ok(())
    }

    /// # Errors
    /// Same as [`FormController::set_field`].
    pub fn select_service(&mut self, service: ServiceType) -> Result<(), FormError> {
        self.set_field(LeadField::ServiceType, service.id())
    }

    /// Check every field and record one inline message per failure.
    pub fn validate(&mut self) -> bool {
        self.errors.clear();
        for field in LeadField::ALL {
            if let Err(failure) = check_field(field, self.values.get(field)) {
                self.errors.insert(field, field_message(field, failure));
            }
        }
        self.errors.is_empty()
    }

    /// Validate and, if everything passes, lock the form and hand out the payload.
    ///
    /// # Errors
    /// [`FormError::Invalid`] with the number of failing fields (nothing is sent),
    /// or [`FormError::Busy`] / [`FormError::AlreadySubmitted`].
    pub fn begin_submit(&mut self) -> Result<SubmitFormPayload, FormError> {
        self.ensure_editable()?;
        if !self.validate() {
            debug!(invalid = self.errors.len(), "form has invalid fields");
            return Err(FormError::Invalid(self.errors.len()));
        }

        self.submit_error = None;
        self.phase = FormPhase::Submitting;
        Ok(SubmitFormPayload {
            full_name: self.value(LeadField::FullName).to_owned(),
            email: self.value(LeadField::Email).to_owned(),
            whatsapp: self.value(LeadField::Whatsapp).to_owned(),
            business_goals: self.value(LeadField::BusinessGoals).to_owned(),
            service_type: self.value(LeadField::ServiceType).to_owned(),
        })
    }

    /// Apply the outcome of the request started by [`FormController::begin_submit`].
    ///
    /// # Errors
    /// [`FormError::Failed`] with the message now shown to the user, or
    /// [`FormError::NotSubmitting`] when no request is in flight.
    pub fn finish(
        &mut self,
        outcome: Result<ServerReply, TransportError>,
    ) -> Result<SubmissionReceipt, FormError> {
        if self.phase != FormPhase::Submitting {
            return Err(FormError::NotSubmitting);
        }

        let message = match outcome {
            Ok(reply) => match reply.failure_message() {
                None => {
                    let data = reply.data.unwrap_or_default();
                    let receipt = SubmissionReceipt {
                        submitted_at: data.submitted_at,
                        rows_added: data.rows_added,
                    };
                    info!(submitted_at = %receipt.submitted_at, "form submitted");
                    self.phase = FormPhase::Submitted(receipt.clone());
                    return Ok(receipt);
                }
                Some(message) => message,
            },
            Err(e) => {
                warn!(error = %e, "submission request failed");
                GENERIC_SUBMIT_ERROR.to_owned()
            }
        };

        self.phase = FormPhase::Editing;
        self.submit_error = Some(message.clone());
        Err(FormError::Failed(message))
    }

    /// `begin_submit`, one request over `transport`, then `finish`.
    ///
    /// # Errors
    /// Any error of [`FormController::begin_submit`] or [`FormController::finish`].
    pub async fn submit<T>(&mut self, transport: &T) -> Result<SubmissionReceipt, FormError>
    where
        T: FormTransport + ?Sized,
    {
        let payload = self.begin_submit()?;
        let outcome = transport.send(&payload).await;
        self.finish(outcome)
    }
}
