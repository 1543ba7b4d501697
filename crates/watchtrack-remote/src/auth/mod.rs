mod api;
mod client;

pub use client::{AuthClient, SignUpOutcome};
