//! Command execution against the article store.
//!
//! # Invariants
//! - The connection is opened once per invocation and closed explicitly.
//! - Mutations go through [`EditorView`], the same state machine the page uses.

use super::commands::{ArticleInput, Cli, Commands};
use super::output::format_article_list;
use anyhow::{Context, Result};
use log::info;
use mdnote_core::db::{close_db, open_db, DbError};
use mdnote_core::{
    init_logging, render_markdown, render_page, AppConfig, ArticleGateway, ArticleService,
    ConfigError, EditorError, EditorView, GatewayError, LogTarget, Presentation, RepoError,
    SqliteArticleRepository,
};
use rusqlite::Connection;
use std::io::Read;
use std::path::Path;

/// Executes one parsed invocation.
pub fn run(cli: Cli) -> Result<()> {
    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(db) = cli.db {
        config.db_path = db;
    }
    if let Some(theme) = cli.theme {
        config.presentation.theme = theme;
    }
    if let Some(locale) = cli.locale {
        config.presentation.locale = locale;
    }
    start_logging(&config);

    let presentation = config.presentation.resolve();
    if let Commands::Preview { file } = &cli.command {
        // Preview never touches the store.
        return print_preview(file.as_deref(), &presentation);
    }

    let conn = open_db(&config.db_path)?;
    let outcome = execute(&conn, cli.command, &presentation);
    let closed = close_db(conn);
    outcome?;
    closed?;
    Ok(())
}

/// Maps a failure to the process exit code.
///
/// 2 store failure, 3 not found, 4 invalid config, 1 anything else.
pub fn exit_code(err: &anyhow::Error) -> i32 {
    for cause in err.chain() {
        if let Some(err) = cause.downcast_ref::<EditorError>() {
            return gateway_exit_code(&err.source);
        }
        if let Some(err) = cause.downcast_ref::<GatewayError>() {
            return gateway_exit_code(err);
        }
        if cause.is::<DbError>() || cause.is::<RepoError>() {
            return 2;
        }
        if cause.is::<ConfigError>() {
            return 4;
        }
    }
    1
}

fn gateway_exit_code(err: &GatewayError) -> i32 {
    match err {
        GatewayError::NotFound(_) => 3,
        _ => 2,
    }
}

fn start_logging(config: &AppConfig) {
    let target = match config.log_dir.as_ref() {
        Some(dir) => LogTarget::File(dir.clone()),
        None => LogTarget::Stderr,
    };
    if let Err(err) = init_logging(&config.log_level, target) {
        eprintln!("Warning: logging disabled: {err}");
    }
}

fn execute(conn: &Connection, command: Commands, presentation: &Presentation) -> Result<()> {
    let service = ArticleService::new(SqliteArticleRepository::try_new(conn)?);

    match command {
        Commands::List { json } => {
            let articles = service.get_articles()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&articles)?);
            } else {
                println!("{}", format_article_list(&articles).trim_end());
            }
        }
        Commands::Create(input) => {
            let content = input_content(&input)?;
            let mut view = EditorView::new(&service);
            view.set_title(input.title);
            view.set_content(content);
            let saved = view.save()?;
            info!(
                "event=cli_create module=cli status=ok article_id={}",
                saved.id
            );
            println!("{}", saved.id);
        }
        Commands::Update { id, input } => {
            let content = input_content(&input)?;
            let mut view = EditorView::new(&service);
            view.load()?;
            view.edit(id)?;
            view.set_title(input.title);
            view.set_content(content);
            let saved = view.save()?;
            info!(
                "event=cli_update module=cli status=ok article_id={}",
                saved.id
            );
            println!("Updated {}", saved.id);
        }
        Commands::Delete { id } => {
            EditorView::new(&service).delete(id)?;
            info!("event=cli_delete module=cli status=ok article_id={id}");
            println!("Deleted {id}");
        }
        Commands::Show { id, html } => {
            let article = service
                .get_article(id)?
                .ok_or(GatewayError::NotFound(id))?;
            if html {
                print!("{}", render_markdown(&article.content, &presentation.styles));
            } else {
                print!("{}", article.content);
            }
        }
        Commands::Page { edit } => {
            let mut view = EditorView::mount(&service);
            if let Some(id) = edit {
                view.edit(id)?;
            }
            print!("{}", render_page(&view, presentation));
        }
        Commands::Preview { file } => print_preview(file.as_deref(), presentation)?,
    }
    Ok(())
}

fn print_preview(file: Option<&Path>, presentation: &Presentation) -> Result<()> {
    let source = read_source(file)?;
    print!("{}", render_markdown(&source, &presentation.styles));
    Ok(())
}

fn input_content(input: &ArticleInput) -> Result<String> {
    match (&input.content, &input.file) {
        (Some(content), _) => Ok(content.clone()),
        (None, Some(path)) => read_source(Some(path.as_path())),
        (None, None) => Ok(String::new()),
    }
}

fn read_source(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read `{}`", path.display())),
        None => {
            let mut source = String::new();
            std::io::stdin()
                .read_to_string(&mut source)
                .context("failed to read stdin")?;
            Ok(source)
        }
    }
}
