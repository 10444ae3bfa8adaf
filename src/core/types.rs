use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

/// Invoice record identifier, assigned by the storage backend on insertion.
/// Zero is never assigned.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InvoiceId(pub u64);

impl std::fmt::Display for InvoiceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

/// Line-item record identifier, assigned by the storage backend on insertion.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineItemId(pub u64);

impl std::fmt::Display for LineItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

/// Submitted line item, before validation. `line_total` is never accepted as
/// input — it exists only on the stored [`LineItem`], derived on read.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LineItemDraft {
    /// Free-text description; must not be blank.
    pub description: String,
    /// Invoiced quantity; must be > 0.
    pub quantity: i64,
    /// Net price per unit; must be > 0.
    pub unit_price: Decimal,
}

/// Submitted invoice, before validation.
///
/// `date` and `details` are optional at the input layer so that their absence
/// surfaces as a validation message rather than a deserialization error.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct InvoiceDraft {
    /// Invoice number; must be unique among all stored invoices.
    pub invoice_number: String,
    /// Customer name; must not be blank.
    pub customer_name: String,
    /// Invoice date; required.
    pub date: Option<NaiveDate>,
    /// Line items in submission order; at least one is required.
    #[serde(default)]
    pub details: Vec<LineItemDraft>,
}

/// Partial update for an existing invoice.
///
/// Header fields left as `None` keep their stored values. The `details`
/// collection always fully replaces the stored one: every existing line item
/// is destroyed and the submitted items are created fresh — items are never
/// matched or reused by identity.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct InvoicePatch {
    pub invoice_number: Option<String>,
    pub customer_name: Option<String>,
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub details: Vec<LineItemDraft>,
}

/// Stored invoice header row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvoiceHeader {
    pub id: InvoiceId,
    pub invoice_number: String,
    pub customer_name: String,
    pub date: NaiveDate,
}

/// Stored line item, exclusively owned by its parent invoice.
#[derive(Debug, Clone, PartialEq)]
pub struct LineItem {
    pub id: LineItemId,
    /// Parent invoice. Internal linkage; not part of the serialized shape.
    pub invoice_id: InvoiceId,
    pub description: String,
    pub quantity: i64,
    pub unit_price: Decimal,
}

impl LineItem {
    /// Derived line total: quantity × unit price. Recomputed on every call,
    /// never persisted.
    pub fn line_total(&self) -> Decimal {
        crate::core::line_total(self.quantity, self.unit_price)
    }
}

// Serialization emits the computed `line_total` alongside the stored fields,
// so a derive won't do. `invoice_id` stays internal.
impl Serialize for LineItem {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("LineItem", 5)?;
        state.serialize_field("id", &self.id)?;
        state.serialize_field("description", &self.description)?;
        state.serialize_field("quantity", &self.quantity)?;
        state.serialize_field("unit_price", &self.unit_price)?;
        state.serialize_field("line_total", &self.line_total())?;
        state.end()
    }
}

/// The assembled aggregate: header plus its full set of owned line items,
/// treated as one unit for create/update/delete.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Invoice {
    pub id: InvoiceId,
    pub invoice_number: String,
    pub customer_name: String,
    pub date: NaiveDate,
    /// Line items in submission order.
    pub details: Vec<LineItem>,
}

impl Invoice {
    /// Assemble the aggregate from a header row and its line items.
    pub fn assemble(header: InvoiceHeader, details: Vec<LineItem>) -> Self {
        Self {
            id: header.id,
            invoice_number: header.invoice_number,
            customer_name: header.customer_name,
            date: header.date,
            details,
        }
    }
}

/// Confirmation returned by a successful delete.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeleteReceipt {
    pub invoice_id: InvoiceId,
    /// Number of line items removed together with the header.
    pub deleted_line_items: usize,
}
