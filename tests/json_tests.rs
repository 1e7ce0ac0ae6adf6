#![cfg(feature = "json")]

use ebrechnung::core::*;
use ebrechnung::{CodecConfig, transform_json};

const GOLDEN_REQUEST: &str = r#"{
  "invoice_number": "RE-2024-001",
  "invoice_date": "2024-01-15",
  "biller": {
    "name": "Muster GmbH",
    "vat_id": "ATU13585627",
    "email": "office@muster.at",
    "address": { "street": "Mariahilfer Straße 10", "zip": "1070", "city": "Wien" }
  },
  "recipient": {
    "name": "Bundesbeschaffung GmbH",
    "vat_id": "ATU57138214",
    "order_id": "BBG-2024-4711",
    "address": { "street": "Lassallestraße 9b", "zip": "1020", "city": "Wien" }
  },
  "items": [
    { "description": "Wartungsvertrag Q1", "quantity": 10, "unit_price_cents": 12000, "tax_rate": 20 }
  ],
  "payment": { "iban": "AT123400000000005678", "bic": "BKAUATWW" }
}"#;

fn generate(body: &str) -> Result<String, TransformError> {
    transform_json(body.as_bytes(), &CodecConfig::default())
        .map(|bytes| String::from_utf8(bytes).unwrap())
}

#[test]
fn golden_request_produces_expected_amounts() {
    let xml = generate(GOLDEN_REQUEST).unwrap();
    assert!(xml.contains("<UnitPrice>120.00</UnitPrice>"));
    assert!(xml.contains("<LineItemAmount>1200.00</LineItemAmount>"));
    assert!(xml.contains("<TaxAmount>240.00</TaxAmount>"));
    assert!(xml.contains("<TotalGrossAmount>1440.00</TotalGrossAmount>"));
    assert!(xml.contains("<OrderID>BBG-2024-4711</OrderID>"));
}

#[test]
fn float_tax_rates_are_read_exactly() {
    let body = GOLDEN_REQUEST.replace("\"tax_rate\": 20", "\"tax_rate\": 20.0");
    let raw = RawInvoice::from_json(&body).unwrap();
    let req = validate(&raw).unwrap();
    assert_eq!(req.lines[0].tax_rate.to_string(), "20");
    assert_eq!(generate(&body).unwrap(), generate(GOLDEN_REQUEST).unwrap());
}

#[test]
fn string_tax_rates_are_accepted() {
    let body = GOLDEN_REQUEST.replace("\"tax_rate\": 20", "\"tax_rate\": \"13\"");
    let xml = generate(&body).unwrap();
    assert!(xml.contains("<TaxPercent TaxCategoryCode=\"S\">13</TaxPercent>"));
    assert!(xml.contains("<TaxAmount>156.00</TaxAmount>"));
}

#[test]
fn unknown_fields_rejected() {
    let body = GOLDEN_REQUEST.replace("\"invoice_number\"", "\"discount\": 5, \"invoice_number\"");
    let err = generate(&body).unwrap_err();
    assert!(matches!(err, TransformError::InvalidJson(_)));

    let resp = err.response();
    assert_eq!(resp.status, 400);
    assert_eq!(resp.code, ERR_CODE_INVALID_JSON);
}

#[test]
fn malformed_json_rejected() {
    assert!(matches!(
        generate("{\"invoice_number\": "),
        Err(TransformError::InvalidJson(_))
    ));
}

#[test]
fn missing_fields_reach_the_validator() {
    let err = generate("{}").unwrap_err();
    match err {
        TransformError::Validation(e) => assert_eq!(e.field, "invoice_number"),
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn missing_order_reference_response() {
    let body = GOLDEN_REQUEST.replace("\"order_id\": \"BBG-2024-4711\",", "");
    let err = generate(&body).unwrap_err();
    let resp = err.response();
    assert_eq!(resp.status, 400);
    assert_eq!(resp.code, ERR_CODE_VALIDATION);
    assert_eq!(resp.field.as_deref(), Some("recipient.order_id"));

    let json: serde_json::Value = serde_json::from_str(&resp.to_json()).unwrap();
    assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"]["field"], "recipient.order_id");
    assert!(json["error"].get("status").is_none());
}

#[test]
fn internal_error_response_is_generic() {
    let err = TransformError::from(InternalError::Arithmetic("gross total overflows".into()));
    let json: serde_json::Value = serde_json::from_str(&err.response().to_json()).unwrap();
    assert_eq!(json["error"]["code"], "INTERNAL_ERROR");
    assert!(json["error"].get("details").is_none());
    assert!(!json.to_string().contains("overflows"));
}

#[test]
fn raw_invoice_roundtrips_through_json() {
    let raw = RawInvoice::from_json(GOLDEN_REQUEST).unwrap();
    let encoded = serde_json::to_string(&raw).unwrap();
    assert_eq!(RawInvoice::from_json(&encoded).unwrap(), raw);
}
