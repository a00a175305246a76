//! Article repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD APIs over the `articles` table.
//! - Own the write-stamp rule for `created_at` / `updated_at`.
//!
//! # Invariants
//! - List order is `updated_at DESC, id DESC`.
//! - Write stamps are strictly increasing inside one database, so the most
//!   recent write is always listed first even within one millisecond.
//! - Read paths reject invalid persisted state instead of masking it.

use crate::db::DbError;
use crate::model::article::{Article, ArticleId};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const ARTICLE_SELECT_SQL: &str = "SELECT
    id,
    title,
    content,
    created_at,
    updated_at
FROM articles";

// Wall clock in epoch ms, bumped past the newest stamp already stored.
const NEXT_WRITE_STAMP_SQL: &str = "MAX(
    CAST((julianday('now') - 2440587.5) * 86400000 AS INTEGER),
    (SELECT COALESCE(MAX(updated_at), 0) + 1 FROM articles)
)";

const REQUIRED_COLUMNS: [&str; 5] = ["id", "title", "content", "created_at", "updated_at"];

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for article persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    NotFound(ArticleId),
    InvalidData(String),
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "article not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted article data: {message}"),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` is missing; run migrations first")
            }
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "required column `{table}.{column}` is missing")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for article CRUD operations.
pub trait ArticleRepository {
    /// Inserts one article and returns its store-assigned id.
    fn insert_article(&self, title: &str, content: &str) -> RepoResult<ArticleId>;
    /// Overwrites title and content of an existing article.
    fn update_article(&self, id: ArticleId, title: &str, content: &str) -> RepoResult<()>;
    /// Gets one article by id.
    fn get_article(&self, id: ArticleId) -> RepoResult<Option<Article>>;
    /// Lists every article, most recently written first.
    fn list_articles(&self) -> RepoResult<Vec<Article>>;
    /// Removes one article permanently.
    fn delete_article(&self, id: ArticleId) -> RepoResult<()>;
}

/// SQLite-backed article repository.
pub struct SqliteArticleRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteArticleRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    ///
    /// # Errors
    /// Fails when the `articles` table or one of its columns is missing.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl ArticleRepository for SqliteArticleRepository<'_> {
    fn insert_article(&self, title: &str, content: &str) -> RepoResult<ArticleId> {
        self.conn.execute(
            &format!(
                "WITH stamp(value) AS (SELECT {NEXT_WRITE_STAMP_SQL})
                 INSERT INTO articles (title, content, created_at, updated_at)
                 SELECT ?1, ?2, value, value FROM stamp;"
            ),
            params![title, content],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn update_article(&self, id: ArticleId, title: &str, content: &str) -> RepoResult<()> {
        let changed = self.conn.execute(
            &format!(
                "UPDATE articles
                 SET
                    title = ?2,
                    content = ?3,
                    updated_at = {NEXT_WRITE_STAMP_SQL}
                 WHERE id = ?1;"
            ),
            params![id, title, content],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn get_article(&self, id: ArticleId) -> RepoResult<Option<Article>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{ARTICLE_SELECT_SQL} WHERE id = ?1;"))?;
        let article = stmt.query_row([id], parse_article_row).optional()?;
        article.map(validate_article).transpose()
    }

    fn list_articles(&self) -> RepoResult<Vec<Article>> {
        let mut stmt = self.conn.prepare(&format!(
            "{ARTICLE_SELECT_SQL} ORDER BY updated_at DESC, id DESC;"
        ))?;
        let mut rows = stmt.query([])?;
        let mut articles = Vec::new();

        while let Some(row) = rows.next()? {
            articles.push(validate_article(parse_article_row(row)?)?);
        }

        Ok(articles)
    }

    fn delete_article(&self, id: ArticleId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM articles WHERE id = ?1;", [id])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }
}

fn parse_article_row(row: &Row<'_>) -> rusqlite::Result<Article> {
    Ok(Article {
        id: row.get("id")?,
        title: row.get("title")?,
        content: row.get("content")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

fn validate_article(article: Article) -> RepoResult<Article> {
    if article.updated_at < article.created_at {
        return Err(RepoError::InvalidData(format!(
            "article {} has updated_at {} earlier than created_at {}",
            article.id, article.updated_at, article.created_at
        )));
    }
    Ok(article)
}

fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    if !table_exists(conn, "articles")? {
        return Err(RepoError::MissingRequiredTable("articles"));
    }

    for column in REQUIRED_COLUMNS {
        if !table_has_column(conn, "articles", column)? {
            return Err(RepoError::MissingRequiredColumn {
                table: "articles",
                column,
            });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
