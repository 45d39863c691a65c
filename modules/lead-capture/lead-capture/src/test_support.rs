//! In-memory sheet used by the service and REST tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::error::SheetError;
use crate::domain::ports::{AppendOutcome, LeadSheet, SheetConnector};
use crate::domain::service::{HEADER_ROW, Service};

/// Throwaway RSA key for signing test assertions.
pub const TEST_KEY: &str = include_str!("../tests/fixtures/service_account_key.pem");

#[derive(Default)]
pub struct MemorySheet {
    pub header: Mutex<Option<Vec<String>>>,
    pub rows: Mutex<Vec<Vec<String>>>,
    pub header_writes: AtomicUsize,
    pub connects: AtomicUsize,
    pub connect_error: Option<SheetError>,
    pub read_header_error: Option<SheetError>,
    pub write_header_error: Option<SheetError>,
    pub append_error: Option<SheetError>,
}

impl MemorySheet {
    pub fn with_header() -> Self {
        let sheet = Self::default();
        *sheet.header.lock().unwrap() = Some(HEADER_ROW.iter().map(|s| (*s).to_owned()).collect());
        sheet
    }

    pub fn service(self: &Arc<Self>) -> Service {
        Service::new(Arc::new(Arc::clone(self)))
    }

    pub fn rows(&self) -> Vec<Vec<String>> {
        self.rows.lock().unwrap().clone()
    }

    pub fn header_writes(&self) -> usize {
        self.header_writes.load(Ordering::SeqCst)
    }
}

struct MemoryHandle(Arc<MemorySheet>);

#[async_trait]
impl SheetConnector for Arc<MemorySheet> {
    async fn connect(&self) -> Result<Box<dyn LeadSheet>, SheetError> {
        self.connects.fetch_add(1, Ordering::SeqCst);
        if let Some(e) = &self.connect_error {
            return Err(e.clone());
        }
        Ok(Box::new(MemoryHandle(Arc::clone(self))))
    }
}

#[async_trait]
impl LeadSheet for MemoryHandle {
    async fn read_header(&self) -> Result<Option<Vec<String>>, SheetError> {
        if let Some(e) = &self.0.read_header_error {
            return Err(e.clone());
        }
        Ok(self.0.header.lock().unwrap().clone())
    }

    async fn write_header(&self, header: &[&str]) -> Result<(), SheetError> {
        if let Some(e) = &self.0.write_header_error {
            return Err(e.clone());
        }
        self.0.header_writes.fetch_add(1, Ordering::SeqCst);
        *self.0.header.lock().unwrap() = Some(header.iter().map(|s| (*s).to_owned()).collect());
        Ok(())
    }

    async fn append_row(&self, row: Vec<String>) -> Result<AppendOutcome, SheetError> {
        if let Some(e) = &self.0.append_error {
            return Err(e.clone());
        }
        self.0.rows.lock().unwrap().push(row);
        Ok(AppendOutcome { rows_added: 1 })
    }
}
