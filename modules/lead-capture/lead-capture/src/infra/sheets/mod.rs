//! Google Sheets adapter: service-account auth plus the `values` API.

pub mod client;
pub mod credentials;
pub mod token;

pub use client::GoogleSheetsClient;
pub use credentials::ServiceAccountCredentials;
pub use token::TokenProvider;
