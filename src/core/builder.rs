use rust_decimal::Decimal;

use super::error::ValidationError;
use super::types::*;
use super::validation;

/// Builder for invoice records.
///
/// Produces the same [`RawInvoice`] a JSON request would decode into, so the
/// result still goes through [`validate`](super::validate).
///
/// ```
/// use ebrechnung::core::*;
/// use rust_decimal_macros::dec;
///
/// let request = InvoiceRequestBuilder::new("2024-0815", "2024-06-15")
///     .biller(BillerBuilder::new("Muster GmbH", "ATU12345678",
///         RawAddress::new("Kärntner Straße 1", "1010", "Wien")).build())
///     .recipient(RecipientBuilder::new("BMF", "ATU87654321", "4500012345",
///         RawAddress::new("Johannesgasse 5", "1010", "Wien")).build())
///     .add_line(LineItemBuilder::new("Beratung", 10, 12_000).tax_rate(dec!(20)).build())
///     .payment("AT611904300234573201", "BKAUATWW")
///     .validate()
///     .unwrap();
///
/// assert_eq!(request.lines.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct InvoiceRequestBuilder {
    raw: RawInvoice,
}

impl InvoiceRequestBuilder {
    pub fn new(number: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            raw: RawInvoice {
                invoice_number: number.into(),
                invoice_date: date.into(),
                ..Default::default()
            },
        }
    }

    pub fn biller(mut self, biller: RawBiller) -> Self {
        self.raw.biller = biller;
        self
    }

    pub fn recipient(mut self, recipient: RawRecipient) -> Self {
        self.raw.recipient = recipient;
        self
    }

    pub fn add_line(mut self, line: RawLineItem) -> Self {
        self.raw.items.push(line);
        self
    }

    pub fn payment(mut self, iban: impl Into<String>, bic: impl Into<String>) -> Self {
        self.raw.payment = RawPayment {
            iban: iban.into(),
            bic: bic.into(),
        };
        self
    }

    pub fn build(self) -> RawInvoice {
        self.raw
    }

    /// Build and run the validator.
    pub fn validate(self) -> Result<InvoiceRequest, ValidationError> {
        validation::validate(&self.raw)
    }
}

/// Builder for the biller block.
#[derive(Debug, Clone)]
pub struct BillerBuilder {
    raw: RawBiller,
}

impl BillerBuilder {
    pub fn new(name: impl Into<String>, vat_id: impl Into<String>, address: RawAddress) -> Self {
        Self {
            raw: RawBiller {
                name: name.into(),
                vat_id: vat_id.into(),
                address,
                ..Default::default()
            },
        }
    }

    pub fn contact_name(mut self, name: impl Into<String>) -> Self {
        self.raw.contact_name = name.into();
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.raw.email = email.into();
        self
    }

    pub fn biller_id(mut self, id: impl Into<String>) -> Self {
        self.raw.biller_id = id.into();
        self
    }

    pub fn build(self) -> RawBiller {
        self.raw
    }
}

/// Builder for the invoice recipient (the public body).
#[derive(Debug, Clone)]
pub struct RecipientBuilder {
    raw: RawRecipient,
}

impl RecipientBuilder {
    pub fn new(
        name: impl Into<String>,
        vat_id: impl Into<String>,
        order_id: impl Into<String>,
        address: RawAddress,
    ) -> Self {
        Self {
            raw: RawRecipient {
                name: name.into(),
                vat_id: vat_id.into(),
                order_id: order_id.into(),
                address,
                ..Default::default()
            },
        }
    }

    pub fn contact_name(mut self, name: impl Into<String>) -> Self {
        self.raw.contact_name = name.into();
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.raw.email = email.into();
        self
    }

    pub fn build(self) -> RawRecipient {
        self.raw
    }
}

/// Builder for line items. The tax rate defaults to the Austrian standard
/// rate of 20%.
#[derive(Debug, Clone)]
pub struct LineItemBuilder {
    raw: RawLineItem,
}

impl LineItemBuilder {
    pub fn new(description: impl Into<String>, quantity: i64, unit_price_cents: i64) -> Self {
        Self {
            raw: RawLineItem {
                description: description.into(),
                quantity,
                unit_price_cents,
                tax_rate: Decimal::new(20, 0),
                unit: None,
            },
        }
    }

    pub fn tax_rate(mut self, rate: Decimal) -> Self {
        self.raw.tax_rate = rate;
        self
    }

    pub fn unit(mut self, code: impl Into<String>) -> Self {
        self.raw.unit = Some(code.into());
        self
    }

    pub fn build(self) -> RawLineItem {
        self.raw
    }
}
