//! Persistence collaborator interface.
//!
//! The library never touches a concrete storage engine; everything goes
//! through [`InvoiceStore`]. [`MemoryStore`] is the bundled reference backend
//! and test double.

mod memory;

pub use memory::MemoryStore;

use chrono::NaiveDate;
use thiserror::Error;

use crate::core::{InvoiceHeader, InvoiceId, LineItem, LineItemDraft, LineItemId};

/// Errors surfaced by a storage backend.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StoreError {
    #[error("invoice {0} not found")]
    InvoiceNotFound(InvoiceId),

    #[error("line item {0} not found")]
    LineItemNotFound(LineItemId),

    /// Backend-specific failure (connectivity, constraint violation, ...).
    #[error("backend error: {0}")]
    Backend(String),
}

/// Storage contract for invoice headers and line items.
///
/// The processing model is synchronous and request-scoped, so methods take
/// `&self`/`&mut self` directly rather than going through an async runtime.
/// Scan methods return rows in insertion order.
///
/// This crate checks invoice-number uniqueness via [`number_exists`] before
/// writing, which is not atomic across callers. Backends that must guarantee
/// uniqueness under concurrent writers should additionally enforce a unique
/// index on the invoice number.
///
/// [`number_exists`]: InvoiceStore::number_exists
pub trait InvoiceStore {
    /// Persist a new invoice header, returning its assigned id.
    fn insert_header(
        &mut self,
        invoice_number: &str,
        customer_name: &str,
        date: NaiveDate,
    ) -> Result<InvoiceId, StoreError>;

    /// Persist a new line item under the given invoice, returning its
    /// assigned id.
    fn insert_line_item(
        &mut self,
        invoice_id: InvoiceId,
        item: &LineItemDraft,
    ) -> Result<LineItemId, StoreError>;

    /// Fetch a header by id.
    fn header(&self, id: InvoiceId) -> Result<InvoiceHeader, StoreError>;

    /// All headers, in insertion order.
    fn headers(&self) -> Result<Vec<InvoiceHeader>, StoreError>;

    /// Overwrite the stored header identified by `header.id`.
    fn update_header(&mut self, header: &InvoiceHeader) -> Result<(), StoreError>;

    /// Remove a header. Does not touch line items; callers cascade first.
    fn delete_header(&mut self, id: InvoiceId) -> Result<(), StoreError>;

    /// Fetch a line item by id.
    fn line_item(&self, id: LineItemId) -> Result<LineItem, StoreError>;

    /// All line items belonging to an invoice, in insertion order.
    fn line_items(&self, invoice_id: InvoiceId) -> Result<Vec<LineItem>, StoreError>;

    /// Remove every line item belonging to an invoice, returning how many
    /// were removed.
    fn delete_line_items(&mut self, invoice_id: InvoiceId) -> Result<usize, StoreError>;

    /// Whether any stored invoice carries this number, skipping the record
    /// identified by `exclude` if given.
    fn number_exists(
        &self,
        invoice_number: &str,
        exclude: Option<InvoiceId>,
    ) -> Result<bool, StoreError>;
}
