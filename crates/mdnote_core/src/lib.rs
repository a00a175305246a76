//! Core logic of the mdnote markdown editor.
//! Storage, the article gateway, markdown preview and the editor view live
//! here; the CLI only wires them together.

pub mod config;
pub mod db;
pub mod editor;
pub mod logging;
pub mod markdown;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{AppConfig, ConfigError, PresentationConfig};
pub use editor::page::{render_page, Labels, Locale, Presentation};
pub use editor::state::{EditorAction, EditorError, EditorMode, EditorView, ErrorBanner};
pub use logging::{default_log_level, init_logging, logging_status, LogTarget};
pub use markdown::style::{StyleTable, Theme};
pub use markdown::{render_markdown, sanitize_url};
pub use model::article::{Article, ArticleId};
pub use repo::article_repo::{ArticleRepository, RepoError, RepoResult, SqliteArticleRepository};
pub use service::article_service::{ArticleGateway, ArticleService, GatewayError, GatewayResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
