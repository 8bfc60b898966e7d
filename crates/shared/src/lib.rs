//! Types shared between the users service client and the dashboard.

pub mod domain;
pub mod error;
pub mod protocol;
