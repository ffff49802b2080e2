//! Data models

pub mod issuer_record;

pub use issuer_record::{IssuerRecord, NOT_AVAILABLE};
