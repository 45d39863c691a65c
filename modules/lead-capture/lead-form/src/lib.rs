//! Headless controller for the lead booking form.
//!
//! Holds the field values and inline errors, validates with the rules from
//! `lead-capture-sdk` before anything goes on the wire, and keeps at most one
//! submission in flight.

#![forbid(unsafe_code)]

pub mod controller;
pub mod messages;
pub mod transport;


pub use controller::{FormController, FormError, FormPhase};
pub use transport::{
    FormTransport, HttpFormTransport, ServerReply, SubmitFormPayload, TransportError,
};
