//! Editor view state machine.
//!
//! # Responsibility
//! - Hold the loaded article list, the selection and the two text fields.
//! - Drive the gateway on load/save/delete and refresh the list afterwards.
//! - Keep the last failure as a displayable banner.
//!
//! # Invariants
//! - `mode` is `New` or `Editing(id)`; `save` always returns to `New` on success.
//! - A failed save keeps the mode and both fields so it can be retried.
//! - Deleting the article being edited leaves the selection in place;
//!   [`EditorView::editing_is_orphaned`] reports it.
//! - A successful action clears the banner; a failed one replaces it.

use crate::markdown::render_markdown;
use crate::markdown::style::StyleTable;
use crate::model::article::{Article, ArticleId};
use crate::service::article_service::{ArticleGateway, GatewayError};
use log::{debug, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Selection state of the editor form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EditorMode {
    /// Nothing selected; save creates a new article.
    #[default]
    New,
    /// Save overwrites the article with this id.
    Editing(ArticleId),
}

/// User action that triggered a gateway call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorAction {
    Load,
    Edit,
    Save,
    Delete,
}

impl EditorAction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Load => "load",
            Self::Edit => "edit",
            Self::Save => "save",
            Self::Delete => "delete",
        }
    }
}

/// Displayable failure state kept by the view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorBanner {
    pub action: EditorAction,
    /// Stable error kind, see [`GatewayError::kind`].
    pub kind: &'static str,
    pub message: String,
}

/// Failure of one editor action.
#[derive(Debug)]
pub struct EditorError {
    pub action: EditorAction,
    pub source: GatewayError,
}

impl EditorError {
    pub fn is_not_found(&self) -> bool {
        matches!(self.source, GatewayError::NotFound(_))
    }
}

impl Display for EditorError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} failed: {}", self.action.as_str(), self.source)
    }
}

impl Error for EditorError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.source)
    }
}

/// Stateful editor over an [`ArticleGateway`].
pub struct EditorView<G: ArticleGateway> {
    gateway: G,
    articles: Vec<Article>,
    mode: EditorMode,
    title: String,
    content: String,
    error: Option<ErrorBanner>,
}

impl<G: ArticleGateway> EditorView<G> {
    /// Creates an empty editor; call [`EditorView::load`] to fetch the list.
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            articles: Vec::new(),
            mode: EditorMode::New,
            title: String::new(),
            content: String::new(),
            error: None,
        }
    }

    /// Creates an editor and loads the list, as the page does on mount.
    ///
    /// A load failure is kept in [`EditorView::error`] instead of returned.
    pub fn mount(gateway: G) -> Self {
        let mut view = Self::new(gateway);
        let _ = view.load();
        view
    }

    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn error(&self) -> Option<&ErrorBanner> {
        self.error.as_ref()
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.mode, EditorMode::Editing(_))
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    /// Fetches the article list from the gateway.
    pub fn load(&mut self) -> Result<(), EditorError> {
        let articles = self
            .gateway
            .get_articles()
            .map_err(|source| self.fail(EditorAction::Load, source))?;
        self.articles = articles;
        self.error = None;
        Ok(())
    }

    /// Selects a loaded article and copies its fields into the form.
    ///
    /// # Errors
    /// `NotFound` when `id` is not in the loaded list; state is unchanged.
    pub fn edit(&mut self, id: ArticleId) -> Result<(), EditorError> {
        let Some(article) = self.articles.iter().find(|article| article.id == id) else {
            return Err(self.fail(EditorAction::Edit, GatewayError::NotFound(id)));
        };

        self.title = article.title.clone();
        self.content = article.content.clone();
        self.mode = EditorMode::Editing(id);
        self.error = None;
        debug!("event=editor_edit module=editor status=ok article_id={id}");
        Ok(())
    }

    /// Creates or updates depending on the mode, then resets the form and
    /// refreshes the list.
    ///
    /// Returns the saved article. A refresh failure after a successful write
    /// does not fail the save; it is kept in the banner.
    pub fn save(&mut self) -> Result<Article, EditorError> {
        let result = match self.mode {
            EditorMode::Editing(id) => self.gateway.update_article(id, &self.title, &self.content),
            EditorMode::New => self.gateway.create_article(&self.title, &self.content),
        };
        let saved = result.map_err(|source| self.fail(EditorAction::Save, source))?;
        debug!(
            "event=editor_save module=editor status=ok article_id={}",
            saved.id
        );

        self.mode = EditorMode::New;
        self.title.clear();
        self.content.clear();
        self.error = None;
        let _ = self.load();
        Ok(saved)
    }

    /// Deletes an article and refreshes the list.
    ///
    /// The selection is not reconciled when `id` is the article being edited.
    pub fn delete(&mut self, id: ArticleId) -> Result<(), EditorError> {
        self.gateway
            .delete_article(id)
            .map_err(|source| self.fail(EditorAction::Delete, source))?;
        debug!("event=editor_delete module=editor status=ok article_id={id}");

        self.error = None;
        let _ = self.load();
        Ok(())
    }

    /// True when the selected article is no longer in the loaded list.
    pub fn editing_is_orphaned(&self) -> bool {
        match self.mode {
            EditorMode::Editing(id) => !self.articles.iter().any(|article| article.id == id),
            EditorMode::New => false,
        }
    }

    /// Renders the current body field.
    pub fn preview_html(&self, styles: &StyleTable) -> String {
        render_markdown(&self.content, styles)
    }

    fn fail(&mut self, action: EditorAction, source: GatewayError) -> EditorError {
        warn!(
            "event=editor_{} module=editor status=error error_code={}",
            action.as_str(),
            source.kind()
        );
        self.error = Some(ErrorBanner {
            action,
            kind: source.kind(),
            message: source.to_string(),
        });
        EditorError { action, source }
    }
}
