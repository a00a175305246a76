//! Article persistence gateway.
//!
//! # Responsibility
//! - Expose the four editor-facing operations: list, create, update, delete.
//! - Translate repository failures into the gateway error taxonomy.
//!
//! # Invariants
//! - Every operation is a single passthrough to the repository; there is no
//!   caching, batching or cross-operation transaction.
//! - Create/update return the record as read back from storage.
//! - Log events carry ids only, never article text.

use crate::db::DbError;
use crate::model::article::{Article, ArticleId};
use crate::repo::article_repo::{ArticleRepository, RepoError};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type GatewayResult<T> = Result<T, GatewayError>;

/// Gateway error surfaced to the editor view and CLI.
#[derive(Debug)]
pub enum GatewayError {
    /// Update/delete target does not exist.
    NotFound(ArticleId),
    /// Store unreachable or failing at the transport level.
    ConnectionFailure(DbError),
    /// Schema mismatch or corrupt persisted state.
    Storage(RepoError),
    /// Write succeeded but the read-back did not find the row.
    InconsistentState(&'static str),
}

impl GatewayError {
    /// Short stable label used in logs and error banners.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "not_found",
            Self::ConnectionFailure(_) => "connection_failure",
            Self::Storage(_) => "storage",
            Self::InconsistentState(_) => "inconsistent_state",
        }
    }
}

impl Display for GatewayError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "article not found: {id}"),
            Self::ConnectionFailure(err) => write!(f, "article store unavailable: {err}"),
            Self::Storage(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => {
                write!(f, "inconsistent article state: {details}")
            }
        }
    }
}

impl Error for GatewayError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::ConnectionFailure(err) => Some(err),
            Self::Storage(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for GatewayError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::NotFound(id),
            RepoError::Db(err) => Self::ConnectionFailure(err),
            other => Self::Storage(other),
        }
    }
}

impl From<DbError> for GatewayError {
    fn from(value: DbError) -> Self {
        Self::ConnectionFailure(value)
    }
}

/// The editor's view of persistence.
///
/// Implemented by [`ArticleService`] for real storage; the editor only
/// depends on this trait.
pub trait ArticleGateway {
    /// Returns all articles, most recently written first.
    fn get_articles(&self) -> GatewayResult<Vec<Article>>;
    /// Inserts a new article and returns it with its assigned id.
    fn create_article(&self, title: &str, content: &str) -> GatewayResult<Article>;
    /// Overwrites title/content of an existing article and returns it.
    fn update_article(&self, id: ArticleId, title: &str, content: &str)
        -> GatewayResult<Article>;
    /// Removes an article permanently.
    fn delete_article(&self, id: ArticleId) -> GatewayResult<()>;
}

impl<G: ArticleGateway + ?Sized> ArticleGateway for &G {
    fn get_articles(&self) -> GatewayResult<Vec<Article>> {
        (**self).get_articles()
    }

    fn create_article(&self, title: &str, content: &str) -> GatewayResult<Article> {
        (**self).create_article(title, content)
    }

    fn update_article(
        &self,
        id: ArticleId,
        title: &str,
        content: &str,
    ) -> GatewayResult<Article> {
        (**self).update_article(id, title, content)
    }

    fn delete_article(&self, id: ArticleId) -> GatewayResult<()> {
        (**self).delete_article(id)
    }
}

/// Gateway implementation over any [`ArticleRepository`].
pub struct ArticleService<R: ArticleRepository> {
    repo: R,
}

impl<R: ArticleRepository> ArticleService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Gets one article by id.
    pub fn get_article(&self, id: ArticleId) -> GatewayResult<Option<Article>> {
        Ok(self.repo.get_article(id)?)
    }
}

impl<R: ArticleRepository> ArticleGateway for ArticleService<R> {
    fn get_articles(&self) -> GatewayResult<Vec<Article>> {
        let articles = self.repo.list_articles().map_err(log_failure("article_list"))?;
        info!(
            "event=article_list module=gateway status=ok count={}",
            articles.len()
        );
        Ok(articles)
    }

    fn create_article(&self, title: &str, content: &str) -> GatewayResult<Article> {
        let id = self
            .repo
            .insert_article(title, content)
            .map_err(log_failure("article_create"))?;
        info!("event=article_create module=gateway status=ok article_id={id}");

        self.repo
            .get_article(id)?
            .ok_or(GatewayError::InconsistentState(
                "created article not found in read-back",
            ))
    }

    fn update_article(
        &self,
        id: ArticleId,
        title: &str,
        content: &str,
    ) -> GatewayResult<Article> {
        self.repo
            .update_article(id, title, content)
            .map_err(log_failure("article_update"))?;
        info!("event=article_update module=gateway status=ok article_id={id}");

        self.repo
            .get_article(id)?
            .ok_or(GatewayError::InconsistentState(
                "updated article not found in read-back",
            ))
    }

    fn delete_article(&self, id: ArticleId) -> GatewayResult<()> {
        self.repo
            .delete_article(id)
            .map_err(log_failure("article_delete"))?;
        info!("event=article_delete module=gateway status=ok article_id={id}");
        Ok(())
    }
}

fn log_failure(event: &'static str) -> impl FnOnce(RepoError) -> GatewayError {
    move |err| {
        let err = GatewayError::from(err);
        warn!(
            "event={} module=gateway status=error error_code={} error={}",
            event,
            err.kind(),
            err
        );
        err
    }
}
