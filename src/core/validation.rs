use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::error::ValidationError;
use super::types::*;
use super::units::is_known_unit_code;

/// Upper bound on line items per invoice.
pub const MAX_LINE_ITEMS: usize = 10_000;
/// Upper bound on the invoice number length, in characters.
pub const MAX_INVOICE_NUMBER_LEN: usize = 200;

/// Validate an untrusted invoice record for the B2G channel.
///
/// Rules are checked in a fixed order and the first violation is returned;
/// errors are never batched. On success the returned request is immutable
/// and every amount derived from it fits in `i64` cents.
pub fn validate(raw: &RawInvoice) -> Result<InvoiceRequest, ValidationError> {
    require(&raw.invoice_number, "invoice_number", "invoice number is required")?;
    if raw.invoice_number.chars().count() > MAX_INVOICE_NUMBER_LEN {
        return Err(ValidationError::new(
            "invoice_number",
            format!("invoice number cannot exceed {MAX_INVOICE_NUMBER_LEN} characters"),
        ));
    }

    require(&raw.invoice_date, "invoice_date", "invoice date is required")?;
    let date = parse_iso_date(&raw.invoice_date).ok_or_else(|| {
        ValidationError::new("invoice_date", "date must be in YYYY-MM-DD format")
    })?;

    let biller = validate_biller(&raw.biller)?;
    let recipient = validate_recipient(&raw.recipient)?;
    let lines = validate_lines(&raw.items)?;
    let payment = validate_payment(&raw.payment)?;

    Ok(InvoiceRequest {
        number: raw.invoice_number.clone(),
        date,
        biller,
        recipient,
        lines,
        payment,
    })
}

fn validate_biller(raw: &RawBiller) -> Result<Biller, ValidationError> {
    require(&raw.name, "biller.name", "biller name is required")?;
    require(&raw.vat_id, "biller.vat_id", "biller VAT ID is required")?;
    check_vat_id(&raw.vat_id, "biller.vat_id")?;
    let address = validate_address(&raw.address, "biller.address")?;
    check_xml_text(&raw.contact_name, "biller.contact_name")?;
    check_xml_text(&raw.email, "biller.email")?;
    check_xml_text(&raw.biller_id, "biller.biller_id")?;

    Ok(Biller {
        name: raw.name.clone(),
        vat_id: raw.vat_id.clone(),
        address,
        contact: contact(&raw.contact_name, &raw.email),
        biller_id: non_empty(&raw.biller_id),
    })
}

fn validate_recipient(raw: &RawRecipient) -> Result<Recipient, ValidationError> {
    require(&raw.name, "recipient.name", "recipient name is required")?;
    require(&raw.vat_id, "recipient.vat_id", "recipient VAT ID is required")?;
    check_vat_id(&raw.vat_id, "recipient.vat_id")?;
    let address = validate_address(&raw.address, "recipient.address")?;
    require(
        &raw.order_id,
        "recipient.order_id",
        "order reference is required for invoices to public bodies",
    )?;
    check_xml_text(&raw.contact_name, "recipient.contact_name")?;
    check_xml_text(&raw.email, "recipient.email")?;

    Ok(Recipient {
        name: raw.name.clone(),
        vat_id: raw.vat_id.clone(),
        order_reference: raw.order_id.clone(),
        address,
        contact: contact(&raw.contact_name, &raw.email),
    })
}

fn validate_address(raw: &RawAddress, prefix: &str) -> Result<Address, ValidationError> {
    require(&raw.street, &format!("{prefix}.street"), "street is required")?;
    require(&raw.zip, &format!("{prefix}.zip"), "postal code is required")?;
    require(&raw.city, &format!("{prefix}.city"), "city is required")?;

    Ok(Address {
        street: raw.street.clone(),
        postal_code: raw.zip.clone(),
        city: raw.city.clone(),
    })
}

fn validate_lines(items: &[RawLineItem]) -> Result<Vec<LineItem>, ValidationError> {
    if items.is_empty() {
        return Err(ValidationError::new(
            "items",
            "at least one line item is required",
        ));
    }
    if items.len() > MAX_LINE_ITEMS {
        return Err(ValidationError::new(
            "items",
            format!("invoice cannot have more than {MAX_LINE_ITEMS} line items"),
        ));
    }

    let mut net_total: i64 = 0;
    let mut lines = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        let line = validate_line(item, i)?;

        // Tax never exceeds net (rate <= 100), so gross <= 2 * net.
        let net = line.unit_price * line.quantity;
        net_total = net_total
            .checked_add(net)
            .filter(|total| total.checked_mul(2).is_some())
            .ok_or_else(|| {
                ValidationError::new("items", "invoice total exceeds the supported range")
            })?;

        lines.push(line);
    }
    Ok(lines)
}

fn validate_line(item: &RawLineItem, index: usize) -> Result<LineItem, ValidationError> {
    let field = |name: &str| format!("items[{index}].{name}");

    if item.quantity <= 0 {
        return Err(ValidationError::new(
            field("quantity"),
            "quantity must be greater than 0",
        ));
    }
    require(&item.description, &field("description"), "description is required")?;
    if item.unit_price_cents < 0 {
        return Err(ValidationError::new(
            field("unit_price_cents"),
            "unit price must not be negative",
        ));
    }
    if item.tax_rate < Decimal::ZERO || item.tax_rate > dec!(100) {
        return Err(ValidationError::new(
            field("tax_rate"),
            "tax rate must be between 0 and 100",
        ));
    }

    if let Some(unit) = &item.unit {
        check_xml_text(unit, &field("unit"))?;
    }
    let unit = match item.unit.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(code) if is_known_unit_code(code) => Some(code.to_string()),
        Some(code) => {
            return Err(ValidationError::new(
                field("unit"),
                format!("'{code}' is not a supported UN/CEFACT Rec 20 unit code"),
            ));
        }
    };

    if item.unit_price_cents.checked_mul(item.quantity).is_none() {
        return Err(ValidationError::new(
            field("unit_price_cents"),
            "line amount exceeds the supported range",
        ));
    }

    Ok(LineItem {
        description: item.description.clone(),
        quantity: item.quantity,
        unit_price: item.unit_price_cents,
        tax_rate: item.tax_rate.normalize(),
        unit,
    })
}

fn validate_payment(raw: &RawPayment) -> Result<PaymentDetails, ValidationError> {
    require(&raw.iban, "payment.iban", "IBAN is required")?;
    require(&raw.bic, "payment.bic", "BIC is required")?;

    let iban = normalize_iban(&raw.iban);
    if !is_valid_iban(&iban) {
        return Err(ValidationError::new(
            "payment.iban",
            "IBAN must be AT followed by 18 digits (e.g. AT611904300234573201)",
        ));
    }
    if !is_valid_bic(&raw.bic) {
        return Err(ValidationError::new(
            "payment.bic",
            "BIC must be 8 or 11 uppercase letters and digits (e.g. BKAUATWW)",
        ));
    }

    Ok(PaymentDetails {
        iban,
        bic: raw.bic.clone(),
    })
}

// ---------------------------------------------------------------------------
// Format rules
// ---------------------------------------------------------------------------

/// Austrian UID: `ATU` followed by exactly 8 digits.
pub fn is_valid_vat_id(vat_id: &str) -> bool {
    vat_id.len() == 11
        && vat_id.starts_with("ATU")
        && vat_id[3..].bytes().all(|b| b.is_ascii_digit())
}

/// Austrian IBAN: `AT`, 2 check digits, 16 digits of account data.
/// Expects whitespace to be stripped already (see [`normalize_iban`]).
pub fn is_valid_iban(iban: &str) -> bool {
    iban.len() == 20 && iban.starts_with("AT") && iban[2..].bytes().all(|b| b.is_ascii_digit())
}

/// BIC: 4-letter bank code, 2-letter country, 2 alphanumeric location
/// characters and an optional 3 character branch code.
pub fn is_valid_bic(bic: &str) -> bool {
    let b = bic.as_bytes();
    if b.len() != 8 && b.len() != 11 {
        return false;
    }
    let alnum = |c: &u8| c.is_ascii_uppercase() || c.is_ascii_digit();
    b[..6].iter().all(u8::is_ascii_uppercase) && b[6..].iter().all(alnum)
}

/// Strip the spaces people put in printed IBANs. Other whitespace is left
/// in place and fails the format check.
pub fn normalize_iban(iban: &str) -> String {
    iban.replace(' ', "")
}

/// XML 1.0 `Char`: tab, LF, CR and everything from U+0020 up, except
/// U+FFFE and U+FFFF.
pub fn is_xml_char(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n' | '\r' | '\u{20}'..='\u{FFFD}' | '\u{10000}'..='\u{10FFFF}'
    )
}

/// Strict `YYYY-MM-DD`: zero padded and a real calendar date.
pub fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    let b = value.as_bytes();
    let shape_ok = b.len() == 10
        && b.iter().enumerate().all(|(i, c)| match i {
            4 | 7 => *c == b'-',
            _ => c.is_ascii_digit(),
        });
    if !shape_ok {
        return None;
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

fn check_vat_id(vat_id: &str, field: &str) -> Result<(), ValidationError> {
    if is_valid_vat_id(vat_id) {
        Ok(())
    } else {
        Err(ValidationError::new(
            field,
            "VAT ID must be ATU followed by 8 digits (e.g. ATU13585627)",
        ))
    }
}

/// Non-blank and representable in XML.
fn require(value: &str, field: &str, message: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new(field, message));
    }
    check_xml_text(value, field)
}

fn check_xml_text(value: &str, field: &str) -> Result<(), ValidationError> {
    if value.chars().all(is_xml_char) {
        Ok(())
    } else {
        Err(ValidationError::new(
            field,
            "contains characters not allowed in XML",
        ))
    }
}

fn non_empty(value: &str) -> Option<String> {
    (!value.trim().is_empty()).then(|| value.to_string())
}

fn contact(name: &str, email: &str) -> Contact {
    Contact {
        name: non_empty(name),
        email: non_empty(email),
    }
}
