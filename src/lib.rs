//! # ebrechnung
//!
//! Austrian business-to-government e-invoicing: turns a merchant's invoice
//! record into an ebInterface 6.1 XML document.
//!
//! The pipeline is validate → aggregate → compose → serialize. Amounts are
//! integer cents throughout; tax rates are [`rust_decimal::Decimal`] and
//! per-line tax is rounded half away from zero exactly once.
//!
//! ## Quick Start
//!
//! ```rust
//! use ebrechnung::core::*;
//! use rust_decimal_macros::dec;
//!
//! let raw = InvoiceRequestBuilder::new("2024-0815", "2024-06-15")
//!     .biller(BillerBuilder::new("Muster GmbH", "ATU12345678",
//!         RawAddress::new("Kärntner Straße 1", "1010", "Wien")).build())
//!     .recipient(RecipientBuilder::new("BMF", "ATU87654321", "4500012345",
//!         RawAddress::new("Johannesgasse 5", "1010", "Wien")).build())
//!     .add_line(LineItemBuilder::new("Beratung", 10, 12_000).tax_rate(dec!(20)).build())
//!     .payment("AT611904300234573201", "BKAUATWW")
//!     .build();
//!
//! let xml = String::from_utf8(ebrechnung::transform(&raw).unwrap()).unwrap();
//! assert!(xml.contains("<PayableAmount>1440.00</PayableAmount>"));
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `json` (default) | Strict JSON decoding of requests and configuration |
//!
//! ## Logging
//!
//! Events are emitted through [`tracing`]; install a subscriber to see them.

mod config;
pub mod core;
pub mod ebinterface;
mod transform;

pub use config::CodecConfig;
pub use transform::*;

// Re-export core types at crate root for convenience
pub use crate::core::*;
