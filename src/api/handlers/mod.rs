//! HTTP request handlers, one module per resource.
//!
//! Handlers extract the [`CurrentUser`](crate::api::auth::CurrentUser), path ids
//! and body, call into [`crate::core`] and map the result onto a response.
//! Every failure is an [`Error`](crate::errors::Error), which renders its own
//! status code and JSON body.

/// Car registry
pub mod cars;
/// Liveness
pub mod health;
/// Parts installed on a repair
pub mod parts;
/// Repair history
pub mod repairs;
/// Excel export
pub mod reports;
/// Parts stock
pub mod stock_parts;
