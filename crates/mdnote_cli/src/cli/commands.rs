//! CLI command definitions

use clap::{Args, Parser, Subcommand};
use mdnote_core::{ArticleId, Locale, Theme};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "mdnote")]
#[command(about = "Markdown note editor backed by SQLite", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (TOML)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Database file, overrides config and MDNOTE_DB_PATH
    #[arg(long, global = true, value_name = "PATH")]
    pub db: Option<PathBuf>,

    /// Markdown styling (tailwind, plain)
    #[arg(long, global = true)]
    pub theme: Option<Theme>,

    /// Page wording (ja, en)
    #[arg(long, global = true)]
    pub locale: Option<Locale>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List articles, most recently written first
    List {
        /// Print the articles as JSON
        #[arg(long)]
        json: bool,
    },

    /// Create an article and print its id
    Create(ArticleInput),

    /// Overwrite title and content of an article
    Update {
        id: ArticleId,

        #[command(flatten)]
        input: ArticleInput,
    },

    /// Delete an article
    Delete { id: ArticleId },

    /// Print one article body
    Show {
        id: ArticleId,

        /// Render the body to HTML
        #[arg(long)]
        html: bool,
    },

    /// Render markdown from a file, or stdin when omitted
    Preview { file: Option<PathBuf> },

    /// Render the full editor page
    Page {
        /// Open this article in the editor form
        #[arg(long, value_name = "ID")]
        edit: Option<ArticleId>,
    },
}

#[derive(Args, Debug)]
pub struct ArticleInput {
    #[arg(long)]
    pub title: String,

    /// Markdown body
    #[arg(long, conflicts_with = "file", required_unless_present = "file")]
    pub content: Option<String>,

    /// Read the markdown body from this file
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,
}
