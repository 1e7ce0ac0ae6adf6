//! ebInterface 6.1 generation.
//!
//! ebInterface is the Austrian XML invoice standard accepted by the federal
//! e-invoicing portal for invoices to public bodies.
//!
//! # Example
//!
//! ```no_run
//! use ebrechnung::core::*;
//! use ebrechnung::{CodecConfig, ebinterface};
//!
//! let request: InvoiceRequest = todo!(); // validate(&raw)?
//! let xml = ebinterface::to_ebinterface_xml(&request, &CodecConfig::default()).unwrap();
//! ```

mod compose;
pub mod document;
mod serialize;
pub(crate) mod xml_utils;

pub use compose::compose;
pub use serialize::serialize;

use crate::config::CodecConfig;
use crate::core::{InternalError, InvoiceRequest, aggregate};

/// Target namespace of the ebInterface 6.1 schema.
pub const NAMESPACE: &str = "http://www.ebinterface.at/schema/6p1/";

pub const DOCUMENT_TYPE: &str = "Invoice";
pub const INVOICE_CURRENCY: &str = "EUR";
pub const LANGUAGE: &str = "de";
pub const COUNTRY_CODE: &str = "AT";
pub const COUNTRY_NAME: &str = "Österreich";

/// Aggregate, compose and serialize a validated request.
pub fn to_ebinterface_bytes(
    request: &InvoiceRequest,
    config: &CodecConfig,
) -> Result<Vec<u8>, InternalError> {
    let aggregation = aggregate(&request.lines)?;
    aggregation.check_conservation()?;
    tracing::debug!(
        buckets = aggregation.buckets.len(),
        gross = aggregation.totals.gross,
        "invoice aggregated"
    );
    let doc = compose(request, &aggregation, config)?;
    serialize(&doc)
}

/// Same as [`to_ebinterface_bytes`], as a `String`.
pub fn to_ebinterface_xml(
    request: &InvoiceRequest,
    config: &CodecConfig,
) -> Result<String, InternalError> {
    let bytes = to_ebinterface_bytes(request, config)?;
    String::from_utf8(bytes).map_err(|e| InternalError::Xml(format!("XML UTF-8 error: {e}")))
}
