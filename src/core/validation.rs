use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::error::{BillbookError, ValidationError};
use super::types::{InvoiceDraft, InvoiceId, LineItemDraft};
use crate::store::InvoiceStore;

/// Validate that a quantity is positive. Passing values are returned
/// unchanged.
pub fn validate_quantity(value: i64) -> Result<i64, ValidationError> {
    if value <= 0 {
        return Err(ValidationError::new(
            "quantity",
            "Quantity must be a positive integer.",
        ));
    }
    Ok(value)
}

/// Validate that a unit price is positive. Passing values are returned
/// unchanged.
pub fn validate_unit_price(value: Decimal) -> Result<Decimal, ValidationError> {
    if value <= Decimal::ZERO {
        return Err(ValidationError::new(
            "unit_price",
            "Unit price must be a positive value.",
        ));
    }
    Ok(value)
}

/// Validate that a description is not empty or whitespace-only. Passing
/// values are returned unchanged, untrimmed.
pub fn validate_description(value: &str) -> Result<&str, ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new(
            "description",
            "Description cannot be empty or whitespace.",
        ));
    }
    Ok(value)
}

/// Derived line total: quantity × unit price. Pure and exact; no rounding
/// beyond `Decimal` precision, no caching.
pub fn line_total(quantity: i64, unit_price: Decimal) -> Decimal {
    Decimal::from(quantity) * unit_price
}

/// Field-validate a single submitted line item. `index` is the item's
/// position in the submitted collection, used for the error field path.
///
/// Besides the three field predicates this rejects items whose line total is
/// not representable as a `Decimal`, so [`line_total`] stays infallible for
/// every item that passes validation.
pub fn validate_line_item(item: &LineItemDraft, index: usize) -> Result<(), ValidationError> {
    validate_description(&item.description)
        .map_err(|e| ValidationError::new(format!("details[{index}].description"), e.message))?;
    validate_quantity(item.quantity)
        .map_err(|e| ValidationError::new(format!("details[{index}].quantity"), e.message))?;
    validate_unit_price(item.unit_price)
        .map_err(|e| ValidationError::new(format!("details[{index}].unit_price"), e.message))?;
    if Decimal::from(item.quantity)
        .checked_mul(item.unit_price)
        .is_none()
    {
        return Err(ValidationError::new(
            format!("details[{index}]"),
            "Line total exceeds the supported numeric range.",
        ));
    }
    Ok(())
}

/// Validate a whole invoice draft against the store.
///
/// Each line item is field-validated first, then the aggregate rules run in
/// fixed order — details presence, invoice-number uniqueness, customer name,
/// date — stopping at the first failure. Returns the validated invoice date,
/// the one required field whose presence the types cannot guarantee.
///
/// `exclude` skips one stored record in the uniqueness check: updates pass
/// the id of the record being updated so an invoice keeping its own number
/// does not collide with itself; creates pass `None`.
///
/// The uniqueness check is check-then-act: it reads the store and the caller
/// writes afterwards, with no lock in between. Backends that need a hard
/// guarantee must enforce a unique index themselves.
pub fn validate_draft<S: InvoiceStore + ?Sized>(
    draft: &InvoiceDraft,
    store: &S,
    exclude: Option<InvoiceId>,
) -> Result<NaiveDate, BillbookError> {
    for (i, item) in draft.details.iter().enumerate() {
        validate_line_item(item, i)?;
    }

    if draft.details.is_empty() {
        return Err(ValidationError::new(
            "details",
            "Invoice must have at least one detail item.",
        )
        .into());
    }

    if store.number_exists(&draft.invoice_number, exclude)? {
        return Err(ValidationError::new(
            "invoice_number",
            "Invoice number must be unique.",
        )
        .into());
    }

    if draft.customer_name.trim().is_empty() {
        return Err(ValidationError::new(
            "customer_name",
            "Customer name cannot be empty.",
        )
        .into());
    }

    let Some(date) = draft.date else {
        return Err(ValidationError::new("date", "Date cannot be empty.").into());
    };

    Ok(date)
}
