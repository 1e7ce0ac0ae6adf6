//! Request types, validation and tax arithmetic.
//!
//! Everything here is independent of the output format: a [`RawInvoice`] is
//! turned into an [`InvoiceRequest`] by [`validate`], and its lines into an
//! [`Aggregation`] by [`aggregate`].

mod aggregate;
mod builder;
mod error;
mod types;
pub mod units;
mod validation;

pub use aggregate::*;
pub use builder::*;
pub use error::*;
pub use types::*;
pub use units::is_known_unit_code;
pub use validation::*;
