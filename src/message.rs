// src/message.rs
use serde::{Deserialize, Serialize};

use crate::error::AppError;

pub const MISSING_FIELDS: &str = "Missing books data or user query.";

#[derive(Debug, Default, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub books: Option<String>,
    #[serde(default)]
    pub query: Option<String>,
}

/// A request that passed the presence checks. Values are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedChat {
    pub books: String,
    pub query: String,
}

impl ChatRequest {
    pub fn validate(self) -> Result<ValidatedChat, AppError> {
        match (self.books, self.query) {
            (Some(books), Some(query)) if !books.is_empty() && !query.is_empty() => {
                Ok(ValidatedChat { books, query })
            }
            _ => Err(AppError::BadRequest(MISSING_FIELDS.to_string())),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub reply: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(books: Option<&str>, query: Option<&str>) -> ChatRequest {
        ChatRequest {
            books: books.map(str::to_string),
            query: query.map(str::to_string),
        }
    }

    #[test]
    fn validate_passes_values_through() {
        let chat = request(Some("Title,Author\nDune,Herbert"), Some(" hi ")).validate().unwrap();
        assert_eq!(chat.books, "Title,Author\nDune,Herbert");
        assert_eq!(chat.query, " hi ");
    }

    #[test]
    fn validate_rejects_missing_or_empty() {
        for req in [
            request(None, Some("q")),
            request(Some("b"), None),
            request(Some(""), Some("q")),
            request(Some("b"), Some("")),
            request(None, None),
        ] {
            match req.validate() {
                Err(AppError::BadRequest(msg)) => assert_eq!(msg, MISSING_FIELDS),
                other => panic!("expected bad request, got {other:?}"),
            }
        }
    }
}
