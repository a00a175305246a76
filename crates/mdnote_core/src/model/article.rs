//! Article domain model.
//!
//! # Responsibility
//! - Define the single persisted entity of the editor.
//!
//! # Invariants
//! - `id` is assigned by the store and never reused for another article.
//! - `title` and `content` are opaque text: empty values are valid and the
//!   store returns them byte-for-byte.
//! - `updated_at` is written by the persistence layer, never by callers.

use serde::{Deserialize, Serialize};

/// Store-assigned article identifier (`articles.id`).
pub type ArticleId = i64;

/// One markdown note as stored in the `articles` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    /// Autoincrement primary key.
    pub id: ArticleId,
    /// Free-form title shown in the article list.
    pub title: String,
    /// Markdown source rendered by the preview.
    pub content: String,
    /// Insert timestamp in epoch milliseconds.
    pub created_at: i64,
    /// Last write timestamp in epoch milliseconds.
    pub updated_at: i64,
}

impl Article {
    /// Returns whether this article was written after it was created.
    pub fn is_modified(&self) -> bool {
        self.updated_at > self.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::Article;

    #[test]
    fn serializes_with_camel_case_timestamps() {
        let article = Article {
            id: 7,
            title: "T".to_string(),
            content: "C".to_string(),
            created_at: 1_000,
            updated_at: 2_000,
        };

        let json = serde_json::to_value(&article).expect("article should serialize");
        assert_eq!(json["id"], 7);
        assert_eq!(json["updatedAt"], 2_000);
        assert_eq!(json["createdAt"], 1_000);
        assert!(article.is_modified());
    }
}
