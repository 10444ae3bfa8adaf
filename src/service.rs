//! Invoice orchestration: the validate-then-persist pipeline.
//!
//! A single logical invoice write fans out into one header write plus one
//! write per line item. No partial-success state is exposed to the caller;
//! all-or-nothing semantics are the backend's concern (wrap the service call
//! in a transaction if the backend supports one).

use log::debug;

use crate::core::{
    validate_draft, BillbookError, DeleteReceipt, Invoice, InvoiceDraft, InvoiceHeader, InvoiceId,
    InvoicePatch,
};
use crate::store::InvoiceStore;

/// Validates and persists invoices as atomic logical units over an
/// [`InvoiceStore`] backend.
pub struct InvoiceService<S> {
    store: S,
}

impl<S: InvoiceStore> InvoiceService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Borrow the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Consume the service, returning the underlying store.
    pub fn into_store(self) -> S {
        self.store
    }

    /// Validate a draft and persist it: header first, then each line item in
    /// submission order. Returns the assembled aggregate.
    pub fn create(&mut self, draft: &InvoiceDraft) -> Result<Invoice, BillbookError> {
        let date = validate_draft(draft, &self.store, None)?;

        let id = self
            .store
            .insert_header(&draft.invoice_number, &draft.customer_name, date)?;
        for item in &draft.details {
            self.store.insert_line_item(id, item)?;
        }

        debug!(
            "created invoice {id} '{}' with {} line items",
            draft.invoice_number,
            draft.details.len()
        );
        self.assemble(id)
    }

    /// Apply a partial update: header fields absent from the patch keep
    /// their stored values, while the line-item collection is fully replaced
    /// — every existing item is destroyed and the submitted ones are created
    /// fresh, never diffed or merged.
    ///
    /// The uniqueness check excludes the invoice being updated, so keeping
    /// the same invoice number is not a conflict.
    pub fn update(&mut self, id: InvoiceId, patch: &InvoicePatch) -> Result<Invoice, BillbookError> {
        let existing = self.store.header(id)?;

        let merged = InvoiceDraft {
            invoice_number: patch
                .invoice_number
                .clone()
                .unwrap_or_else(|| existing.invoice_number.clone()),
            customer_name: patch
                .customer_name
                .clone()
                .unwrap_or_else(|| existing.customer_name.clone()),
            date: patch.date.or(Some(existing.date)),
            details: patch.details.clone(),
        };
        let date = validate_draft(&merged, &self.store, Some(id))?;

        self.store.update_header(&InvoiceHeader {
            id,
            invoice_number: merged.invoice_number,
            customer_name: merged.customer_name,
            date,
        })?;
        let dropped = self.store.delete_line_items(id)?;
        for item in &merged.details {
            self.store.insert_line_item(id, item)?;
        }

        debug!(
            "updated invoice {id}: replaced {dropped} line items with {}",
            merged.details.len()
        );
        self.assemble(id)
    }

    /// Delete an invoice and everything it owns. Line items go first, in
    /// case the backend enforces referential constraints.
    pub fn delete(&mut self, id: InvoiceId) -> Result<DeleteReceipt, BillbookError> {
        self.store.header(id)?;

        let deleted_line_items = self.store.delete_line_items(id)?;
        self.store.delete_header(id)?;

        debug!("deleted invoice {id} and {deleted_line_items} line items");
        Ok(DeleteReceipt {
            invoice_id: id,
            deleted_line_items,
        })
    }

    /// Fetch one invoice as an assembled aggregate.
    pub fn get(&self, id: InvoiceId) -> Result<Invoice, BillbookError> {
        self.assemble(id)
    }

    /// Fetch all invoices as assembled aggregates, in insertion order.
    pub fn list(&self) -> Result<Vec<Invoice>, BillbookError> {
        self.store
            .headers()?
            .into_iter()
            .map(|header| {
                let details = self.store.line_items(header.id)?;
                Ok(Invoice::assemble(header, details))
            })
            .collect()
    }

    fn assemble(&self, id: InvoiceId) -> Result<Invoice, BillbookError> {
        let header = self.store.header(id)?;
        let details = self.store.line_items(id)?;
        Ok(Invoice::assemble(header, details))
    }
}
