//! Helpers for turning `validator` reports into user-facing messages

use validator::{ValidationErrors, ValidationErrorsKind};

/// Flatten field errors into messages, ordered by `field_order`
///
/// `ValidationErrors` is backed by a hash map, so the form's declared field
/// order is passed in to keep the output stable.
pub(crate) fn collect_messages(errors: &ValidationErrors, field_order: &[&str]) -> Vec<String> {
    let fields = errors.errors();
    let mut messages = Vec::new();

    for field in field_order {
        if let Some(ValidationErrorsKind::Field(list)) = fields.get(*field) {
            for error in list {
                let text = error
                    .message
                    .as_ref()
                    .map_or_else(|| format!("{field} is invalid"), ToString::to_string);
                messages.push(text);
            }
        }
    }

    messages
}
