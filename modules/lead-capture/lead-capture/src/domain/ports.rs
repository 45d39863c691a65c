//! Output ports for the spreadsheet collaborator.

use async_trait::async_trait;

use super::error::SheetError;

/// Result of a row append.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppendOutcome {
    pub rows_added: u64,
}

/// Produces an authorized handle on the target sheet.
///
/// Built once at startup and shared by every request; connecting is the
/// per-request "acquire a client" step.
#[async_trait]
pub trait SheetConnector: Send + Sync {
    async fn connect(&self) -> Result<Box<dyn LeadSheet>, SheetError>;
}

/// Append-only row store with a header-row convention.
#[async_trait]
pub trait LeadSheet: Send + Sync {
    /// First row of the header range, or `None` when the range is empty.
    async fn read_header(&self) -> Result<Option<Vec<String>>, SheetError>;

    async fn write_header(&self, header: &[&str]) -> Result<(), SheetError>;

    /// Insert one row after the last one; existing rows are never overwritten.
    async fn append_row(&self, row: Vec<String>) -> Result<AppendOutcome, SheetError>;
}
