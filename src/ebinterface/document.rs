//! Typed ebInterface 6.1 document tree.
//!
//! One struct per schema structure. Field declaration order is the element
//! order the schema mandates and the order the serializer writes.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::core::TaxCategory;

/// A monetary amount in cents. Displays as `digits.dd`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Amount(pub i64);

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let cents = self.0.unsigned_abs();
        write!(f, "{sign}{}.{:02}", cents / 100, cents % 100)
    }
}

/// `Invoice` root.
///
/// Order: InvoiceNumber, InvoiceDate, Delivery?, Biller, InvoiceRecipient,
/// Details, Tax, TotalGrossAmount, PayableAmount, PaymentMethod.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EbInvoice {
    pub generating_system: String,
    pub document_type: &'static str,
    pub currency: &'static str,
    pub language: &'static str,
    pub invoice_number: String,
    pub invoice_date: NaiveDate,
    pub delivery: Option<EbDelivery>,
    pub biller: EbBiller,
    pub recipient: EbRecipient,
    pub details: EbDetails,
    pub tax: EbTax,
    pub total_gross_amount: Amount,
    pub payable_amount: Amount,
    pub payment_method: EbPaymentMethod,
}

/// Order: Name, Street, Town, ZIP, Country.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EbAddress {
    pub name: String,
    pub street: String,
    pub town: String,
    pub zip: String,
    pub country: EbCountry,
}

/// `<Country CountryCode="AT">Österreich</Country>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EbCountry {
    pub code: &'static str,
    pub name: &'static str,
}

/// Order: Name, Email?.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EbContact {
    pub name: String,
    pub email: Option<String>,
}

/// Order: Date, Address, Contact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EbDelivery {
    pub date: NaiveDate,
    pub address: EbAddress,
    pub contact: EbContact,
}

/// Order: VATIdentificationNumber, Address, Contact, InvoiceRecipientsBillerID?.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EbBiller {
    pub vat_id: String,
    pub address: EbAddress,
    pub contact: EbContact,
    pub invoice_recipients_biller_id: Option<String>,
}

/// Order: VATIdentificationNumber, OrderReference, Address, Contact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EbRecipient {
    pub vat_id: String,
    pub order_reference: EbOrderReference,
    pub address: EbAddress,
    pub contact: EbContact,
}

/// `OrderReference/OrderID`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EbOrderReference {
    pub order_id: String,
}

/// `Details/ItemList`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EbDetails {
    pub items: Vec<EbLineItem>,
}

/// `ListLineItem`.
///
/// Order: Description, Quantity, UnitPrice, InvoiceRecipientsOrderReference?,
/// TaxItem, LineItemAmount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EbLineItem {
    pub description: String,
    pub quantity: EbQuantity,
    pub unit_price: Amount,
    pub order_reference: Option<EbLineOrderReference>,
    pub tax_item: EbLineTaxItem,
    pub line_item_amount: Amount,
}

/// `<Quantity Unit="C62">10</Quantity>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EbQuantity {
    pub unit: String,
    pub value: i64,
}

/// Order: OrderID, OrderPositionNumber.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EbLineOrderReference {
    pub order_id: String,
    /// 1-based.
    pub position: usize,
}

/// Line-level `TaxItem`. Order: TaxableAmount, TaxPercent. No TaxAmount here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EbLineTaxItem {
    pub taxable_amount: Amount,
    pub tax_percent: EbTaxPercent,
}

/// `<TaxPercent TaxCategoryCode="S">20</TaxPercent>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EbTaxPercent {
    pub category: TaxCategory,
    pub rate: Decimal,
}

/// `Tax` summary block, one entry per rate, ascending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EbTax {
    pub items: Vec<EbTaxSummaryItem>,
}

/// Summary `TaxItem`. Order: TaxableAmount, TaxPercent, TaxAmount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EbTaxSummaryItem {
    pub taxable_amount: Amount,
    pub tax_percent: EbTaxPercent,
    pub tax_amount: Amount,
}

/// Order: Comment?, UniversalBankTransaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EbPaymentMethod {
    pub comment: Option<String>,
    pub beneficiary_account: EbBeneficiaryAccount,
}

/// `UniversalBankTransaction/BeneficiaryAccount`. Order: BIC, IBAN,
/// BankAccountOwner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EbBeneficiaryAccount {
    pub bic: String,
    pub iban: String,
    pub bank_account_owner: String,
}
