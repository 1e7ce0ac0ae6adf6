use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Untrusted input
// ---------------------------------------------------------------------------

/// Invoice record as supplied by the merchant, before validation.
///
/// Missing fields decode to their empty value so the validator can report
/// them by path; unknown fields are rejected at decode time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawInvoice {
    pub invoice_number: String,
    /// ISO-8601 calendar date (`YYYY-MM-DD`).
    pub invoice_date: String,
    pub biller: RawBiller,
    pub recipient: RawRecipient,
    pub items: Vec<RawLineItem>,
    pub payment: RawPayment,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawBiller {
    pub name: String,
    pub vat_id: String,
    /// Identifier the recipient assigned to the biller.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub biller_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub email: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub contact_name: String,
    pub address: RawAddress,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawRecipient {
    pub name: String,
    pub vat_id: String,
    /// Order reference issued by the public body (mandatory for B2G).
    pub order_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub email: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub contact_name: String,
    pub address: RawAddress,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawAddress {
    pub street: String,
    pub zip: String,
    pub city: String,
}

impl RawAddress {
    pub fn new(street: impl Into<String>, zip: impl Into<String>, city: impl Into<String>) -> Self {
        Self {
            street: street.into(),
            zip: zip.into(),
            city: city.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawLineItem {
    pub description: String,
    pub quantity: i64,
    /// Net price per unit in cents.
    pub unit_price_cents: i64,
    /// VAT percentage. JSON numbers are converted to an exact decimal once.
    pub tax_rate: Decimal,
    /// UN/CEFACT Rec 20 unit code; the composer falls back to a default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawPayment {
    pub iban: String,
    pub bic: String,
}

// ---------------------------------------------------------------------------
// Accepted request
// ---------------------------------------------------------------------------

/// A request accepted by [`validate`](super::validate). Cannot be constructed
/// any other way outside this crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[non_exhaustive]
pub struct InvoiceRequest {
    pub number: String,
    pub date: NaiveDate,
    pub biller: Biller,
    pub recipient: Recipient,
    /// Non-empty, in the caller's order.
    pub lines: Vec<LineItem>,
    pub payment: PaymentDetails,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[non_exhaustive]
pub struct Biller {
    pub name: String,
    /// Austrian UID (`ATU` + 8 digits).
    pub vat_id: String,
    pub address: Address,
    pub contact: Contact,
    pub biller_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[non_exhaustive]
pub struct Recipient {
    pub name: String,
    pub vat_id: String,
    pub order_reference: String,
    pub address: Address,
    pub contact: Contact,
}

/// Postal address. The country is always Austria.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[non_exhaustive]
pub struct Address {
    pub street: String,
    pub postal_code: String,
    pub city: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[non_exhaustive]
pub struct Contact {
    pub name: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[non_exhaustive]
pub struct LineItem {
    pub description: String,
    /// Always > 0.
    pub quantity: i64,
    /// Cents, always >= 0.
    pub unit_price: i64,
    /// Within [0, 100].
    pub tax_rate: Decimal,
    pub unit: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[non_exhaustive]
pub struct PaymentDetails {
    /// Without whitespace.
    pub iban: String,
    pub bic: String,
}

/// ebInterface tax category code for a line or tax summary entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TaxCategory {
    /// `S`: any non-zero rate. Reduced and standard rates share this code.
    StandardRate,
    /// `Z`: zero rated.
    ZeroRated,
}

impl TaxCategory {
    pub fn for_rate(rate: Decimal) -> Self {
        if rate.is_zero() {
            Self::ZeroRated
        } else {
            Self::StandardRate
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::StandardRate => "S",
            Self::ZeroRated => "Z",
        }
    }
}

#[cfg(feature = "json")]
impl RawInvoice {
    /// Strict JSON decoding: unknown fields are an error.
    pub fn from_json(input: &str) -> Result<Self, super::TransformError> {
        serde_json::from_str(input).map_err(|e| super::TransformError::InvalidJson(e.to_string()))
    }

    pub fn from_json_slice(input: &[u8]) -> Result<Self, super::TransformError> {
        serde_json::from_slice(input)
            .map_err(|e| super::TransformError::InvalidJson(e.to_string()))
    }
}
