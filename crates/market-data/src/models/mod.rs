//! Transient, provider-shaped models.
//!
//! Everything in this module exists only between receiving a provider
//! response and handing normalized records to the domain layer.

mod bar;

pub use bar::{ParsedBars, ProviderBar, SkipReason, SkippedRecord};
