use crate::config::CodecConfig;
use crate::core::{RawInvoice, TransformError, validate};
use crate::ebinterface;

/// Turn an invoice record into ebInterface 6.1 XML with the default
/// configuration.
pub fn transform(raw: &RawInvoice) -> Result<Vec<u8>, TransformError> {
    transform_with(raw, &CodecConfig::default())
}

/// Validate, aggregate, compose and serialize one invoice.
///
/// Holds no state; identical inputs give byte-identical output.
pub fn transform_with(raw: &RawInvoice, config: &CodecConfig) -> Result<Vec<u8>, TransformError> {
    let request = validate(raw).inspect_err(|e| {
        tracing::warn!(field = %e.field, "invoice request rejected");
    })?;

    tracing::debug!(
        invoice = %request.number,
        lines = request.lines.len(),
        "invoice request accepted"
    );

    let xml = ebinterface::to_ebinterface_bytes(&request, config).inspect_err(|e| {
        tracing::error!(invoice = %request.number, error = %e, "ebInterface generation failed");
    })?;

    tracing::debug!(invoice = %request.number, bytes = xml.len(), "ebInterface document generated");
    Ok(xml)
}

/// Decode a JSON request body and transform it.
#[cfg(feature = "json")]
pub fn transform_json(body: &[u8], config: &CodecConfig) -> Result<Vec<u8>, TransformError> {
    let raw = RawInvoice::from_json_slice(body).inspect_err(|e| {
        tracing::warn!(error = %e, "invoice request is not valid JSON");
    })?;
    transform_with(&raw, config)
}
