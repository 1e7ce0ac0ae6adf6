use crate::config::CodecConfig;
use crate::core::*;

use super::document::*;
use super::{COUNTRY_CODE, COUNTRY_NAME, DOCUMENT_TYPE, INVOICE_CURRENCY, LANGUAGE};

/// Map a validated request and its aggregation onto the ebInterface tree.
///
/// Fails only when the inputs disagree with each other (an aggregation built
/// from a different request) or the configuration cannot be emitted (an
/// unknown default unit, or text that XML cannot carry).
pub fn compose(
    request: &InvoiceRequest,
    aggregation: &Aggregation,
    config: &CodecConfig,
) -> Result<EbInvoice, InternalError> {
    if aggregation.lines.len() != request.lines.len() {
        return Err(InternalError::Composition(format!(
            "aggregation has {} lines, request has {}",
            aggregation.lines.len(),
            request.lines.len()
        )));
    }
    if !is_known_unit_code(&config.default_unit) {
        return Err(InternalError::Composition(format!(
            "configured default unit '{}' is not a known unit code",
            config.default_unit
        )));
    }
    let configured_text = [
        ("generating_system", config.generating_system.as_str()),
        ("biller_contact_name", config.biller_contact_name.as_str()),
        ("recipient_contact_name", config.recipient_contact_name.as_str()),
        ("payment_comment", config.payment_comment.as_deref().unwrap_or("")),
    ];
    if let Some((name, _)) = configured_text
        .into_iter()
        .find(|(_, value)| !value.chars().all(is_xml_char))
    {
        return Err(InternalError::Composition(format!(
            "configured {name} contains characters not allowed in XML"
        )));
    }

    let biller = &request.biller;
    let recipient = &request.recipient;
    let biller_contact = contact(&biller.contact, &config.biller_contact_name);

    let delivery = config.include_delivery.then(|| EbDelivery {
        date: request.date,
        address: address(&biller.name, &biller.address),
        contact: biller_contact.clone(),
    });

    let items = request
        .lines
        .iter()
        .zip(&aggregation.lines)
        .map(|(line, computed)| line_item(line, computed, recipient, config))
        .collect::<Result<Vec<_>, _>>()?;

    let tax_items = aggregation
        .buckets
        .iter()
        .map(|bucket| EbTaxSummaryItem {
            taxable_amount: Amount(bucket.taxable),
            tax_percent: EbTaxPercent {
                category: bucket.category,
                rate: bucket.rate,
            },
            tax_amount: Amount(bucket.tax),
        })
        .collect();

    Ok(EbInvoice {
        generating_system: config.generating_system.clone(),
        document_type: DOCUMENT_TYPE,
        currency: INVOICE_CURRENCY,
        language: LANGUAGE,
        invoice_number: request.number.clone(),
        invoice_date: request.date,
        delivery,
        biller: EbBiller {
            vat_id: biller.vat_id.clone(),
            address: address(&biller.name, &biller.address),
            contact: biller_contact,
            invoice_recipients_biller_id: biller.biller_id.clone(),
        },
        recipient: EbRecipient {
            vat_id: recipient.vat_id.clone(),
            order_reference: EbOrderReference {
                order_id: recipient.order_reference.clone(),
            },
            address: address(&recipient.name, &recipient.address),
            contact: contact(&recipient.contact, &config.recipient_contact_name),
        },
        details: EbDetails { items },
        tax: EbTax { items: tax_items },
        total_gross_amount: Amount(aggregation.totals.gross),
        payable_amount: Amount(aggregation.totals.payable),
        payment_method: EbPaymentMethod {
            comment: config.payment_comment.clone(),
            beneficiary_account: EbBeneficiaryAccount {
                bic: request.payment.bic.clone(),
                iban: request.payment.iban.clone(),
                bank_account_owner: biller.name.clone(),
            },
        },
    })
}

fn line_item(
    line: &LineItem,
    computed: &LineComputation,
    recipient: &Recipient,
    config: &CodecConfig,
) -> Result<EbLineItem, InternalError> {
    if computed.rate != line.tax_rate {
        return Err(InternalError::Composition(format!(
            "line {} rate {} does not match computed rate {}",
            computed.position, line.tax_rate, computed.rate
        )));
    }

    Ok(EbLineItem {
        description: line.description.clone(),
        quantity: EbQuantity {
            unit: line
                .unit
                .clone()
                .unwrap_or_else(|| config.default_unit.clone()),
            value: line.quantity,
        },
        unit_price: Amount(line.unit_price),
        order_reference: Some(EbLineOrderReference {
            order_id: recipient.order_reference.clone(),
            position: computed.position,
        }),
        tax_item: EbLineTaxItem {
            taxable_amount: Amount(computed.net),
            tax_percent: EbTaxPercent {
                category: computed.category,
                rate: computed.rate,
            },
        },
        line_item_amount: Amount(computed.net),
    })
}

fn address(name: &str, addr: &Address) -> EbAddress {
    EbAddress {
        name: name.to_string(),
        street: addr.street.clone(),
        town: addr.city.clone(),
        zip: addr.postal_code.clone(),
        country: EbCountry {
            code: COUNTRY_CODE,
            name: COUNTRY_NAME,
        },
    }
}

fn contact(contact: &Contact, default_name: &str) -> EbContact {
    EbContact {
        name: contact
            .name
            .clone()
            .unwrap_or_else(|| default_name.to_string()),
        email: contact.email.clone(),
    }
}
