//! Setup submission schema.
//!
//! | field      | rule                  | message               |
//! |------------|-----------------------|-----------------------|
//! | `title`    | at least one character | `Title is required`   |
//! | `author`   | at least one character | `Author is required`  |
//! | `imageUrl` | absolute URL           | `Must be a valid URL` |
//!
//! Every rule runs; violations come back in the table's order.

use crate::domain::model::{FormFields, SetupSubmission};
use serde::Serialize;
use std::collections::HashMap;
use url::Url;

pub const TITLE_FIELD: &str = "title";
pub const AUTHOR_FIELD: &str = "author";
pub const IMAGE_URL_FIELD: &str = "imageUrl";

pub const TITLE_REQUIRED: &str = "Title is required";
pub const AUTHOR_REQUIRED: &str = "Author is required";
pub const INVALID_URL: &str = "Must be a valid URL";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ViolationKind {
    EmptyField,
    InvalidUrl,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: &'static str,
    pub kind: ViolationKind,
    pub message: &'static str,
}

/// Anything that can answer "what text is stored under this key".
///
/// Missing keys and non-text values both answer `None`.
pub trait FieldSource {
    fn field(&self, name: &str) -> Option<&str>;
}

impl FieldSource for FormFields {
    fn field(&self, name: &str) -> Option<&str> {
        self.get(name)
    }
}

impl FieldSource for HashMap<String, String> {
    fn field(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

impl FieldSource for serde_json::Map<String, serde_json::Value> {
    fn field(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(serde_json::Value::as_str)
    }
}

impl FieldSource for serde_json::Value {
    fn field(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(serde_json::Value::as_str)
    }
}

/// Validates untyped input into a [`SetupSubmission`].
pub fn validate_setup_submission<S>(input: &S) -> Result<SetupSubmission, Vec<FieldViolation>>
where
    S: FieldSource + ?Sized,
{
    let title = input.field(TITLE_FIELD).unwrap_or_default();
    let author = input.field(AUTHOR_FIELD).unwrap_or_default();
    let image_url = input.field(IMAGE_URL_FIELD).unwrap_or_default();

    let mut violations = Vec::new();

    if title.is_empty() {
        violations.push(FieldViolation {
            field: TITLE_FIELD,
            kind: ViolationKind::EmptyField,
            message: TITLE_REQUIRED,
        });
    }

    if author.is_empty() {
        violations.push(FieldViolation {
            field: AUTHOR_FIELD,
            kind: ViolationKind::EmptyField,
            message: AUTHOR_REQUIRED,
        });
    }

    if !is_well_formed_url(image_url) {
        violations.push(FieldViolation {
            field: IMAGE_URL_FIELD,
            kind: ViolationKind::InvalidUrl,
            message: INVALID_URL,
        });
    }

    if !violations.is_empty() {
        return Err(violations);
    }

    Ok(SetupSubmission {
        title: title.to_string(),
        author: author.to_string(),
        image_url: image_url.to_string(),
    })
}

/// Syntax only; any scheme is fine and the target is never fetched.
pub fn is_well_formed_url(candidate: &str) -> bool {
    Url::parse(candidate).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(title: &str, author: &str, image_url: &str) -> FormFields {
        vec![
            (TITLE_FIELD, title),
            (AUTHOR_FIELD, author),
            (IMAGE_URL_FIELD, image_url),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_valid_input_is_returned_unchanged() {
        let submission =
            validate_setup_submission(&fields("Desk", "Ana", "https://x.com/a.png")).unwrap();

        assert_eq!(submission.title, "Desk");
        assert_eq!(submission.author, "Ana");
        assert_eq!(submission.image_url, "https://x.com/a.png");
    }

    #[test]
    fn test_empty_title_fails_regardless_of_other_fields() {
        for (author, image_url) in [("Ana", "https://x.com/a.png"), ("", "bad"), ("Ana", "")] {
            let violations = validate_setup_submission(&fields("", author, image_url)).unwrap_err();
            assert_eq!(violations[0].field, TITLE_FIELD);
            assert_eq!(violations[0].kind, ViolationKind::EmptyField);
            assert_eq!(violations[0].message, TITLE_REQUIRED);
        }
    }

    #[test]
    fn test_not_a_url_is_rejected() {
        let violations =
            validate_setup_submission(&fields("Desk", "Ana", "not-a-url")).unwrap_err();

        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].field, IMAGE_URL_FIELD);
        assert_eq!(violations[0].kind, ViolationKind::InvalidUrl);
        assert_eq!(violations[0].message, INVALID_URL);
    }

    #[test]
    fn test_all_violations_are_collected_in_field_order() {
        let violations = validate_setup_submission(&fields("", "", "bad")).unwrap_err();
        let found: Vec<_> = violations.iter().map(|v| (v.field, v.kind)).collect();

        assert_eq!(
            found,
            vec![
                (TITLE_FIELD, ViolationKind::EmptyField),
                (AUTHOR_FIELD, ViolationKind::EmptyField),
                (IMAGE_URL_FIELD, ViolationKind::InvalidUrl),
            ]
        );
    }

    #[test]
    fn test_missing_keys_are_treated_as_empty() {
        let violations = validate_setup_submission(&FormFields::new()).unwrap_err();
        assert_eq!(violations.len(), 3);
        assert_eq!(violations[1].message, AUTHOR_REQUIRED);
    }

    #[test]
    fn test_whitespace_is_not_trimmed() {
        assert!(validate_setup_submission(&fields(" ", " ", "https://x.com/a.png")).is_ok());
    }

    #[test]
    fn test_json_input_with_non_text_values() {
        let input = json!({
            "title": 42,
            "author": "Ana",
            "imageUrl": "https://x.com/a.png"
        });

        let violations = validate_setup_submission(&input).unwrap_err();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].field, TITLE_FIELD);

        let not_an_object = json!(["Desk", "Ana"]);
        assert_eq!(validate_setup_submission(&not_an_object).unwrap_err().len(), 3);
    }

    #[test]
    fn test_string_map_input() {
        let mut input = HashMap::new();
        input.insert("title".to_string(), "Desk".to_string());
        input.insert("author".to_string(), "Ana".to_string());
        input.insert("imageUrl".to_string(), "mailto:ana@x.com".to_string());

        assert!(validate_setup_submission(&input).is_ok());
    }

    #[test]
    fn test_json_object_input() {
        let body = json!({
            "title": "Desk",
            "author": null,
            "imageUrl": "https://x.com/a.png"
        });
        let object = body.as_object().unwrap();

        let violations = validate_setup_submission(object).unwrap_err();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].field, AUTHOR_FIELD);
        assert_eq!(violations[0].message, AUTHOR_REQUIRED);
    }

    #[test]
    fn test_url_syntax() {
        assert!(is_well_formed_url("https://x.com/a.png"));
        assert!(is_well_formed_url("http://localhost:3000/img.jpg"));
        assert!(!is_well_formed_url(""));
        assert!(!is_well_formed_url("not-a-url"));
        assert!(!is_well_formed_url("/relative/path.png"));
    }
}
