use serde::{Deserialize, Serialize};

use crate::core::units::DEFAULT_UNIT;

/// Knobs of the ebInterface composer.
///
/// Every field has a default, so a partial JSON/TOML object deserializes
/// fine. Schema constants (namespace, currency, language, country) are not
/// configurable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CodecConfig {
    /// Value of the `GeneratingSystem` root attribute.
    pub generating_system: String,
    /// Unit code for lines that carry none.
    pub default_unit: String,
    /// Contact name for the biller when the request has none.
    pub biller_contact_name: String,
    /// Contact name for the recipient when the request has none.
    pub recipient_contact_name: String,
    /// Emit the `Delivery` block (invoice date, biller address).
    pub include_delivery: bool,
    /// Free text placed in `PaymentMethod/Comment`.
    pub payment_comment: Option<String>,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            generating_system: env!("CARGO_PKG_NAME").to_string(),
            default_unit: DEFAULT_UNIT.to_string(),
            biller_contact_name: "Billing Department".to_string(),
            recipient_contact_name: "Accounting".to_string(),
            include_delivery: true,
            payment_comment: None,
        }
    }
}

impl CodecConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn generating_system(mut self, name: impl Into<String>) -> Self {
        self.generating_system = name.into();
        self
    }

    pub fn default_unit(mut self, code: impl Into<String>) -> Self {
        self.default_unit = code.into();
        self
    }

    pub fn biller_contact_name(mut self, name: impl Into<String>) -> Self {
        self.biller_contact_name = name.into();
        self
    }

    pub fn recipient_contact_name(mut self, name: impl Into<String>) -> Self {
        self.recipient_contact_name = name.into();
        self
    }

    pub fn include_delivery(mut self, include: bool) -> Self {
        self.include_delivery = include;
        self
    }

    pub fn payment_comment(mut self, comment: impl Into<String>) -> Self {
        self.payment_comment = Some(comment.into());
        self
    }

    #[cfg(feature = "json")]
    pub fn from_json(input: &str) -> Result<Self, crate::core::TransformError> {
        serde_json::from_str(input)
            .map_err(|e| crate::core::TransformError::InvalidJson(e.to_string()))
    }
}
