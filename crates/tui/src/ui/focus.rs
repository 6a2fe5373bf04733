//! Focus node names.
//!
//! Each palette field contributes its trigger and, while open, its popover
//! list to the focus ring, in field order. Node names are derived from the
//! field name so focus traces in the log identify the field.

/// Root container of the form.
pub const FORM: &str = "huepick.form";

pub fn trigger_node(field: &str) -> String {
    format!("picker.{field}.trigger")
}

pub fn popover_node(field: &str) -> String {
    format!("picker.{field}.popover")
}
