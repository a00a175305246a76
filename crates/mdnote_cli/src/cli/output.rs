//! Output formatting utilities

use mdnote_core::Article;

/// Format the article list for display, one `id  title` row each.
///
/// Articles edited after creation carry a trailing `*`.
pub fn format_article_list(articles: &[Article]) -> String {
    if articles.is_empty() {
        return "No articles found".to_string();
    }

    let width = articles
        .iter()
        .map(|article| article.id.to_string().len())
        .max()
        .unwrap_or(1);

    let mut output = String::new();
    for article in articles {
        let marker = if article.is_modified() { " *" } else { "" };
        output.push_str(&format!(
            "{:>width$}  {}{}\n",
            article.id,
            display_title(&article.title),
            marker
        ));
    }
    output
}

fn display_title(title: &str) -> String {
    let single_line = title.replace(['\n', '\r'], " ");
    if single_line.trim().is_empty() {
        "(untitled)".to_string()
    } else {
        single_line
    }
}
