use crate::core::InternalError;

use super::NAMESPACE;
use super::document::*;
use super::xml_utils::XmlWriter;

/// Render a composed document as UTF-8 ebInterface 6.1 XML.
///
/// Each structure is written by its own function in the field order of the
/// matching record type in [`document`](super::document).
pub fn serialize(doc: &EbInvoice) -> Result<Vec<u8>, InternalError> {
    let mut w = XmlWriter::new()?;

    w.start_element_with_attrs(
        "Invoice",
        &[
            ("xmlns", NAMESPACE),
            ("GeneratingSystem", &doc.generating_system),
            ("DocumentType", doc.document_type),
            ("InvoiceCurrency", doc.currency),
            ("Language", doc.language),
        ],
    )?;

    w.text_element("InvoiceNumber", &doc.invoice_number)?;
    w.text_element("InvoiceDate", &doc.invoice_date.to_string())?;
    if let Some(delivery) = &doc.delivery {
        write_delivery(&mut w, delivery)?;
    }
    write_biller(&mut w, &doc.biller)?;
    write_recipient(&mut w, &doc.recipient)?;

    w.start_element("Details")?;
    w.start_element("ItemList")?;
    for item in &doc.details.items {
        write_line_item(&mut w, item)?;
    }
    w.end_element("ItemList")?;
    w.end_element("Details")?;

    w.start_element("Tax")?;
    for item in &doc.tax.items {
        w.start_element("TaxItem")?;
        w.amount_element("TaxableAmount", item.taxable_amount)?;
        write_tax_percent(&mut w, &item.tax_percent)?;
        w.amount_element("TaxAmount", item.tax_amount)?;
        w.end_element("TaxItem")?;
    }
    w.end_element("Tax")?;

    w.amount_element("TotalGrossAmount", doc.total_gross_amount)?;
    w.amount_element("PayableAmount", doc.payable_amount)?;
    write_payment_method(&mut w, &doc.payment_method)?;

    w.end_element("Invoice")?;
    Ok(w.into_bytes())
}

fn write_delivery(w: &mut XmlWriter, delivery: &EbDelivery) -> Result<(), InternalError> {
    w.start_element("Delivery")?;
    w.text_element("Date", &delivery.date.to_string())?;
    write_address(w, &delivery.address)?;
    write_contact(w, &delivery.contact)?;
    w.end_element("Delivery")?;
    Ok(())
}

fn write_biller(w: &mut XmlWriter, biller: &EbBiller) -> Result<(), InternalError> {
    w.start_element("Biller")?;
    w.text_element("VATIdentificationNumber", &biller.vat_id)?;
    write_address(w, &biller.address)?;
    write_contact(w, &biller.contact)?;
    if let Some(id) = &biller.invoice_recipients_biller_id {
        w.text_element("InvoiceRecipientsBillerID", id)?;
    }
    w.end_element("Biller")?;
    Ok(())
}

fn write_recipient(w: &mut XmlWriter, recipient: &EbRecipient) -> Result<(), InternalError> {
    w.start_element("InvoiceRecipient")?;
    w.text_element("VATIdentificationNumber", &recipient.vat_id)?;
    w.start_element("OrderReference")?;
    w.text_element("OrderID", &recipient.order_reference.order_id)?;
    w.end_element("OrderReference")?;
    write_address(w, &recipient.address)?;
    write_contact(w, &recipient.contact)?;
    w.end_element("InvoiceRecipient")?;
    Ok(())
}

fn write_address(w: &mut XmlWriter, address: &EbAddress) -> Result<(), InternalError> {
    w.start_element("Address")?;
    w.text_element("Name", &address.name)?;
    w.text_element("Street", &address.street)?;
    w.text_element("Town", &address.town)?;
    w.text_element("ZIP", &address.zip)?;
    w.text_element_with_attrs(
        "Country",
        address.country.name,
        &[("CountryCode", address.country.code)],
    )?;
    w.end_element("Address")?;
    Ok(())
}

fn write_contact(w: &mut XmlWriter, contact: &EbContact) -> Result<(), InternalError> {
    w.start_element("Contact")?;
    w.text_element("Name", &contact.name)?;
    if let Some(email) = &contact.email {
        w.text_element("Email", email)?;
    }
    w.end_element("Contact")?;
    Ok(())
}

fn write_line_item(w: &mut XmlWriter, item: &EbLineItem) -> Result<(), InternalError> {
    w.start_element("ListLineItem")?;
    w.text_element("Description", &item.description)?;
    w.text_element_with_attrs(
        "Quantity",
        &item.quantity.value.to_string(),
        &[("Unit", &item.quantity.unit)],
    )?;
    w.amount_element("UnitPrice", item.unit_price)?;
    if let Some(reference) = &item.order_reference {
        w.start_element("InvoiceRecipientsOrderReference")?;
        w.text_element("OrderID", &reference.order_id)?;
        w.text_element("OrderPositionNumber", &reference.position.to_string())?;
        w.end_element("InvoiceRecipientsOrderReference")?;
    }
    w.start_element("TaxItem")?;
    w.amount_element("TaxableAmount", item.tax_item.taxable_amount)?;
    write_tax_percent(w, &item.tax_item.tax_percent)?;
    w.end_element("TaxItem")?;
    w.amount_element("LineItemAmount", item.line_item_amount)?;
    w.end_element("ListLineItem")?;
    Ok(())
}

fn write_tax_percent(w: &mut XmlWriter, percent: &EbTaxPercent) -> Result<(), InternalError> {
    w.text_element_with_attrs(
        "TaxPercent",
        &percent.rate.normalize().to_string(),
        &[("TaxCategoryCode", percent.category.code())],
    )?;
    Ok(())
}

fn write_payment_method(w: &mut XmlWriter, method: &EbPaymentMethod) -> Result<(), InternalError> {
    w.start_element("PaymentMethod")?;
    if let Some(comment) = &method.comment {
        w.text_element("Comment", comment)?;
    }
    w.start_element("UniversalBankTransaction")?;
    w.start_element("BeneficiaryAccount")?;
    let account = &method.beneficiary_account;
    w.text_element("BIC", &account.bic)?;
    w.text_element("IBAN", &account.iban)?;
    w.text_element("BankAccountOwner", &account.bank_account_owner)?;
    w.end_element("BeneficiaryAccount")?;
    w.end_element("UniversalBankTransaction")?;
    w.end_element("PaymentMethod")?;
    Ok(())
}
