//! Per-entity handlers: validate a draft, gate the write, reconcile the list.

pub mod homework;
pub mod materials;
pub mod news;
pub mod photo;
pub mod students;


use crate::state::{Field, FieldErrors};

/// Flag `field` when `value` is blank.
fn require(errors: &mut FieldErrors, field: Field, value: &str, message: &str) {
    if value.trim().is_empty() {
        errors.set(field, message);
    }
}

/// Flag `field` when `value` has fewer than `min` characters.
fn min_chars(errors: &mut FieldErrors, field: Field, value: &str, min: usize, message: &str) {
    if value.chars().count() < min {
        errors.set(field, message);
    }
}
