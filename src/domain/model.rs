use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// A community-submitted desk setup as returned by the `setup.all` query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Setup {
    #[serde(deserialize_with = "id_as_text")]
    pub id: String,
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub description: String,
    pub image_url: String,
    #[serde(default)]
    pub likes: u32,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// A validated submission. Only produced by the submission schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetupSubmission {
    pub title: String,
    pub author: String,
    pub image_url: String,
}

/// Gallery read result: exactly one of `data` and `error` is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetupsResult {
    pub data: Option<Vec<Setup>>,
    pub error: Option<String>,
}

impl SetupsResult {
    pub fn ok(setups: Vec<Setup>) -> Self {
        Self {
            data: Some(setups),
            error: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            data: None,
            error: Some(message.into()),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Field name -> messages, in the order the violations were found.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Reserved key for errors that do not belong to a single field.
pub const FORM_ERROR_KEY: &str = "_form";

/// Loosely typed form input. Repeated keys keep every value; lookups see the first one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    pairs: Vec<(String, String)>,
}

impl FormFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.pairs.push((key.into(), value.into()));
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormFields {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            pairs: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Request-scoped identity handed to the RPC boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    /// Headers forwarded to the backend, lower-case names.
    pub headers: Vec<(String, String)>,
    /// Bearer token from the `authorization` header, if any.
    pub auth_token: Option<String>,
}

impl RequestContext {
    pub const FORWARDED_HEADERS: [&'static str; 2] = ["cookie", "authorization"];

    /// Builds a context from raw header pairs, keeping only the forwarded ones.
    pub fn from_header_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut context = Self::default();

        for (name, value) in pairs {
            let name = name.to_ascii_lowercase();
            if !Self::FORWARDED_HEADERS.contains(&name.as_str()) {
                continue;
            }

            if name == "authorization" {
                context.auth_token = value
                    .strip_prefix("Bearer ")
                    .or_else(|| value.strip_prefix("bearer "))
                    .map(|token| token.trim().to_string())
                    .filter(|token| !token.is_empty());
            }

            context.headers.push((name, value.to_string()));
        }

        context
    }

    pub fn is_authenticated(&self) -> bool {
        self.auth_token.is_some()
    }
}

/// Deployment environment. Only affects page metadata.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Production,
    #[default]
    Development,
}

impl Environment {
    pub const PRODUCTION_BASE_URL: &'static str = "https://rate-my-setup.vercel.app";

    /// Base URL used for canonical links and social cards.
    pub fn metadata_base(&self, port: u16) -> String {
        match self {
            Environment::Production => Self::PRODUCTION_BASE_URL.to_string(),
            Environment::Development => format!("http://localhost:{}", port),
        }
    }
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Ok(Environment::Production),
            "development" | "dev" | "local" | "preview" => Ok(Environment::Development),
            other => Err(format!(
                "unknown environment '{}', expected production or development",
                other
            )),
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Production => write!(f, "production"),
            Environment::Development => write!(f, "development"),
        }
    }
}

fn id_as_text<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(i64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(id) => id,
        RawId::Number(id) => id.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setup_accepts_numeric_and_text_ids() {
        let numeric: Setup = serde_json::from_value(serde_json::json!({
            "id": 7,
            "title": "Battlestation",
            "author": "Ana",
            "imageUrl": "https://x.com/a.png"
        }))
        .unwrap();
        assert_eq!(numeric.id, "7");
        assert_eq!(numeric.likes, 0);
        assert!(numeric.tags.is_empty());
        assert_eq!(numeric.description, "");

        let text: Setup = serde_json::from_value(serde_json::json!({
            "id": "b1f0",
            "title": "Minimal",
            "author": "Ben",
            "description": "White desk",
            "imageUrl": "https://x.com/b.png",
            "likes": 12,
            "tags": ["minimal", "white"]
        }))
        .unwrap();
        assert_eq!(text.id, "b1f0");
        assert_eq!(text.tags, vec!["minimal", "white"]);
    }

    #[test]
    fn test_submission_serializes_camel_case() {
        let submission = SetupSubmission {
            title: "Desk".to_string(),
            author: "Ana".to_string(),
            image_url: "https://x.com/a.png".to_string(),
        };
        let json = serde_json::to_value(&submission).unwrap();
        assert_eq!(json["imageUrl"], "https://x.com/a.png");
    }

    #[test]
    fn test_form_fields_first_value_wins() {
        let fields: FormFields = vec![("title", "first"), ("title", "second")]
            .into_iter()
            .collect();
        assert_eq!(fields.get("title"), Some("first"));
        assert_eq!(fields.get("author"), None);
        assert_eq!(fields.len(), 2);
    }

    #[test]
    fn test_environment_selects_metadata_base() {
        let production: Environment = "production".parse().unwrap();
        let preview: Environment = "preview".parse().unwrap();

        assert_eq!(production.metadata_base(3000), "https://rate-my-setup.vercel.app");
        assert_eq!(preview.metadata_base(8080), "http://localhost:8080");
        assert!("staging".parse::<Environment>().is_err());
    }

    #[test]
    fn test_request_context_keeps_forwarded_headers_only() {
        let context = RequestContext::from_header_pairs(vec![
            ("Cookie", "session=abc"),
            ("Authorization", "Bearer token-123"),
            ("User-Agent", "test"),
        ]);

        assert_eq!(context.headers.len(), 2);
        assert_eq!(context.headers[0], ("cookie".to_string(), "session=abc".to_string()));
        assert_eq!(context.auth_token.as_deref(), Some("token-123"));
        assert!(context.is_authenticated());
    }
}
