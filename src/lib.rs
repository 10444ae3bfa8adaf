//! # billbook
//!
//! Invoice validation and persistence mapping: a submitted draft (header plus
//! line items) is checked against business rules, then fanned out into header
//! and line-item records behind the [`InvoiceStore`] trait. The storage
//! backend is the caller's choice; [`MemoryStore`] is the bundled reference
//! implementation.
//!
//! All monetary values use [`rust_decimal::Decimal`] — never floating point.
//! Line totals (quantity × unit price) are derived on read and never stored.
//!
//! ## Quick Start
//!
//! ```rust
//! use billbook::{InvoiceDraft, InvoiceService, LineItemDraft, MemoryStore};
//! use chrono::NaiveDate;
//! use rust_decimal_macros::dec;
//!
//! let mut service = InvoiceService::new(MemoryStore::new());
//!
//! let invoice = service
//!     .create(&InvoiceDraft {
//!         invoice_number: "INV-001".into(),
//!         customer_name: "Acme".into(),
//!         date: NaiveDate::from_ymd_opt(2024, 1, 1),
//!         details: vec![LineItemDraft {
//!             description: "Widget".into(),
//!             quantity: 2,
//!             unit_price: dec!(5.00),
//!         }],
//!     })
//!     .unwrap();
//!
//! assert_eq!(invoice.details.len(), 1);
//! assert_eq!(invoice.details[0].line_total(), dec!(10.00));
//! ```

pub mod core;
pub mod service;
pub mod store;

// Re-export the working set at the crate root for convenience
pub use crate::core::*;
pub use crate::service::InvoiceService;
pub use crate::store::{InvoiceStore, MemoryStore, StoreError};
