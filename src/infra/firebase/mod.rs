// Firebase infra layer.
// - `service_account.rs` turns the service account key into access tokens.

pub mod service_account;

pub use service_account::ServiceAccountAuth;
