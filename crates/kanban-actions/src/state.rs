use serde::Serialize;
use std::collections::BTreeMap;
use validator::{ValidationErrors, ValidationErrorsKind};

/// Validation messages keyed by field path (`items[2].order`).
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Result of running an action.
///
/// Exactly one of the three fields is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionState<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_errors: Option<FieldErrors>,
}

impl<T> ActionState<T> {
    pub fn data(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
            field_errors: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            data: None,
            error: Some(message.into()),
            field_errors: None,
        }
    }

    pub fn invalid(field_errors: FieldErrors) -> Self {
        Self {
            data: None,
            error: None,
            field_errors: Some(field_errors),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.data.is_some()
    }

    pub fn into_result(self) -> Result<T, String> {
        match (self.data, self.error, self.field_errors) {
            (Some(data), _, _) => Ok(data),
            (None, Some(error), _) => Err(error),
            (None, None, Some(fields)) => Err(describe_field_errors(&fields)),
            (None, None, None) => Err("Empty action result".to_string()),
        }
    }
}

/// One line per field: `title: Title is required.`
pub fn describe_field_errors(fields: &FieldErrors) -> String {
    fields
        .iter()
        .map(|(field, messages)| format!("{}: {}", field, messages.join(", ")))
        .collect::<Vec<_>>()
        .join("; ")
}

pub fn field_errors(errors: &ValidationErrors) -> FieldErrors {
    let mut out = FieldErrors::new();
    collect(errors, None, &mut out);
    out
}

fn collect(errors: &ValidationErrors, prefix: Option<&str>, out: &mut FieldErrors) {
    for (field, kind) in errors.errors() {
        let path = match prefix {
            Some(prefix) => format!("{}.{}", prefix, field),
            None => field.to_string(),
        };
        match kind {
            ValidationErrorsKind::Field(errs) => {
                let messages = out.entry(path).or_default();
                messages.extend(errs.iter().map(|e| match &e.message {
                    Some(message) => message.to_string(),
                    None => e.code.to_string(),
                }));
            }
            ValidationErrorsKind::Struct(nested) => collect(nested, Some(&path), out),
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    collect(nested, Some(&format!("{}[{}]", path, index)), out);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::ValidationError;

    #[test]
    fn test_serializes_only_set_fields() {
        let ok = serde_json::to_value(ActionState::data(3)).unwrap();
        assert_eq!(ok, serde_json::json!({ "data": 3 }));

        let err = serde_json::to_value(ActionState::<i32>::error("Unauthorized")).unwrap();
        assert_eq!(err, serde_json::json!({ "error": "Unauthorized" }));

        let mut fields = FieldErrors::new();
        fields.insert("title".into(), vec!["Title is required.".into()]);
        let invalid = serde_json::to_value(ActionState::<i32>::invalid(fields)).unwrap();
        assert_eq!(
            invalid,
            serde_json::json!({ "fieldErrors": { "title": ["Title is required."] } })
        );
    }

    #[test]
    fn test_field_errors_use_message_or_code() {
        let mut errors = ValidationErrors::new();
        errors.add(
            "title",
            ValidationError::new("length").with_message("Title is too short.".into()),
        );
        errors.add("items", ValidationError::new("duplicate_id"));

        let fields = field_errors(&errors);
        assert_eq!(fields["title"], vec!["Title is too short."]);
        assert_eq!(fields["items"], vec!["duplicate_id"]);
    }

    #[test]
    fn test_into_result() {
        assert_eq!(ActionState::data(1).into_result(), Ok(1));
        assert_eq!(
            ActionState::<i32>::error("Board not found").into_result(),
            Err("Board not found".to_string())
        );
    }
}
