use chrono::NaiveDate;

use super::{InvoiceStore, StoreError};
use crate::core::{InvoiceHeader, InvoiceId, LineItem, LineItemDraft, LineItemId};

/// In-memory storage backend.
///
/// Reference implementation of [`InvoiceStore`] and the test double for the
/// service layer. Ids are assigned from monotonically increasing counters
/// starting at 1; scans preserve insertion order.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    headers: Vec<InvoiceHeader>,
    items: Vec<LineItem>,
    next_invoice_id: u64,
    next_line_item_id: u64,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of stored headers.
    pub fn header_count(&self) -> usize {
        self.headers.len()
    }

    /// Total number of stored line items, across all invoices.
    pub fn line_item_count(&self) -> usize {
        self.items.len()
    }
}

impl InvoiceStore for MemoryStore {
    fn insert_header(
        &mut self,
        invoice_number: &str,
        customer_name: &str,
        date: NaiveDate,
    ) -> Result<InvoiceId, StoreError> {
        self.next_invoice_id += 1;
        let id = InvoiceId(self.next_invoice_id);
        self.headers.push(InvoiceHeader {
            id,
            invoice_number: invoice_number.to_owned(),
            customer_name: customer_name.to_owned(),
            date,
        });
        Ok(id)
    }

    fn insert_line_item(
        &mut self,
        invoice_id: InvoiceId,
        item: &LineItemDraft,
    ) -> Result<LineItemId, StoreError> {
        if !self.headers.iter().any(|h| h.id == invoice_id) {
            return Err(StoreError::InvoiceNotFound(invoice_id));
        }
        self.next_line_item_id += 1;
        let id = LineItemId(self.next_line_item_id);
        self.items.push(LineItem {
            id,
            invoice_id,
            description: item.description.clone(),
            quantity: item.quantity,
            unit_price: item.unit_price,
        });
        Ok(id)
    }

    fn header(&self, id: InvoiceId) -> Result<InvoiceHeader, StoreError> {
        self.headers
            .iter()
            .find(|h| h.id == id)
            .cloned()
            .ok_or(StoreError::InvoiceNotFound(id))
    }

    fn headers(&self) -> Result<Vec<InvoiceHeader>, StoreError> {
        Ok(self.headers.clone())
    }

    fn update_header(&mut self, header: &InvoiceHeader) -> Result<(), StoreError> {
        let stored = self
            .headers
            .iter_mut()
            .find(|h| h.id == header.id)
            .ok_or(StoreError::InvoiceNotFound(header.id))?;
        *stored = header.clone();
        Ok(())
    }

    fn delete_header(&mut self, id: InvoiceId) -> Result<(), StoreError> {
        let before = self.headers.len();
        self.headers.retain(|h| h.id != id);
        if self.headers.len() == before {
            return Err(StoreError::InvoiceNotFound(id));
        }
        Ok(())
    }

    fn line_item(&self, id: LineItemId) -> Result<LineItem, StoreError> {
        self.items
            .iter()
            .find(|i| i.id == id)
            .cloned()
            .ok_or(StoreError::LineItemNotFound(id))
    }

    fn line_items(&self, invoice_id: InvoiceId) -> Result<Vec<LineItem>, StoreError> {
        Ok(self
            .items
            .iter()
            .filter(|i| i.invoice_id == invoice_id)
            .cloned()
            .collect())
    }

    fn delete_line_items(&mut self, invoice_id: InvoiceId) -> Result<usize, StoreError> {
        let before = self.items.len();
        self.items.retain(|i| i.invoice_id != invoice_id);
        Ok(before - self.items.len())
    }

    fn number_exists(
        &self,
        invoice_number: &str,
        exclude: Option<InvoiceId>,
    ) -> Result<bool, StoreError> {
        Ok(self
            .headers
            .iter()
            .any(|h| h.invoice_number == invoice_number && Some(h.id) != exclude))
    }
}
