//! Lead models shared by the endpoint and the form controller.

use std::fmt;
use std::str::FromStr;

/// The five user-supplied fields of a lead, in sheet column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LeadField {
    FullName,
    Email,
    Whatsapp,
    BusinessGoals,
    ServiceType,
}

impl LeadField {
    pub const ALL: [LeadField; 5] = [
        LeadField::FullName,
        LeadField::Email,
        LeadField::Whatsapp,
        LeadField::BusinessGoals,
        LeadField::ServiceType,
    ];

    /// JSON name used on the wire.
    #[must_use]
    pub fn wire_name(self) -> &'static str {
        match self {
            LeadField::FullName => "fullName",
            LeadField::Email => "email",
            LeadField::Whatsapp => "whatsapp",
            LeadField::BusinessGoals => "businessGoals",
            LeadField::ServiceType => "serviceType",
        }
    }
}

impl fmt::Display for LeadField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// Raw, untrusted field values as received from a form or request body.
///
/// `None` means the field was absent (or not a string on the wire); an empty
/// string is kept as such so that both cases fail the same rule.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeadSubmissionInput {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub whatsapp: Option<String>,
    pub business_goals: Option<String>,
    pub service_type: Option<String>,
}

impl LeadSubmissionInput {
    #[must_use]
    pub fn get(&self, field: LeadField) -> Option<&str> {
        match field {
            LeadField::FullName => self.full_name.as_deref(),
            LeadField::Email => self.email.as_deref(),
            LeadField::Whatsapp => self.whatsapp.as_deref(),
            LeadField::BusinessGoals => self.business_goals.as_deref(),
            LeadField::ServiceType => self.service_type.as_deref(),
        }
    }

    pub fn set(&mut self, field: LeadField, value: impl Into<String>) {
        let value = Some(value.into());
        match field {
            LeadField::FullName => self.full_name = value,
            LeadField::Email => self.email = value,
            LeadField::Whatsapp => self.whatsapp = value,
            LeadField::BusinessGoals => self.business_goals = value,
            LeadField::ServiceType => self.service_type = value,
        }
    }
}

/// Service a lead is interested in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceType {
    Automation,
    Visual,
    Both,
}

/// Selectable service offered by the booking form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceOption {
    pub service: ServiceType,
    pub title: &'static str,
    pub description: &'static str,
}

impl ServiceType {
    pub const ALL: [ServiceOption; 3] = [
        ServiceOption {
            service: ServiceType::Automation,
            title: "Automation",
            description: "Process automation & workflow optimization",
        },
        ServiceOption {
            service: ServiceType::Visual,
            title: "Visual",
            description: "AI visuals, 3D design & creative solutions",
        },
        ServiceOption {
            service: ServiceType::Both,
            title: "Both",
            description: "Complete automation + visual transformation",
        },
    ];

    /// Identifier stored in the sheet and sent by the form.
    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            ServiceType::Automation => "automation",
            ServiceType::Visual => "visual",
            ServiceType::Both => "both",
        }
    }
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Returned when a string names no known service.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown service type: {0}")]
pub struct UnknownServiceType(pub String);

impl FromStr for ServiceType {
    type Err = UnknownServiceType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        ServiceType::ALL
            .iter()
            .map(|opt| opt.service)
            .find(|svc| svc.id().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownServiceType(trimmed.to_owned()))
    }
}

/// A fully validated and normalized lead, ready to be recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeadSubmission {
    pub full_name: String,
    /// Trimmed and lower-cased.
    pub email: String,
    /// Trimmed; inner whitespace is kept as typed.
    pub whatsapp: String,
    pub business_goals: String,
    pub service_type: ServiceType,
}

/// Outcome of a recorded lead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionReceipt {
    /// Server-assigned UTC timestamp, formatted for people reading the sheet.
    pub submitted_at: String,
    pub rows_added: u64,
}
