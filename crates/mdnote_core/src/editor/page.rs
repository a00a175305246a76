//! Static HTML rendering of the editor page.
//!
//! One page layout serves every look; wording and classes come from a
//! [`Presentation`], so themes never fork the markup.

use super::state::{EditorMode, EditorView};
use crate::markdown::style::{StyleTable, Theme};
use crate::markdown::{class_attr, escape_html};
use crate::service::article_service::ArticleGateway;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Wording language of the page chrome.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Ja,
    En,
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "ja" => Ok(Self::Ja),
            "en" => Ok(Self::En),
            other => Err(format!("unsupported locale `{other}`; expected ja|en")),
        }
    }
}

impl Display for Locale {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ja => f.write_str("ja"),
            Self::En => f.write_str("en"),
        }
    }
}

/// User-visible strings of the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Labels {
    pub app_title: &'static str,
    pub editor: &'static str,
    pub preview: &'static str,
    pub articles: &'static str,
    pub title_placeholder: &'static str,
    pub content_placeholder: &'static str,
    pub save: &'static str,
    pub update: &'static str,
    pub edit: &'static str,
    pub delete: &'static str,
    pub error: &'static str,
    pub orphaned_edit: &'static str,
}

impl Labels {
    pub fn for_locale(locale: Locale) -> Self {
        match locale {
            Locale::Ja => Self::japanese(),
            Locale::En => Self::english(),
        }
    }

    pub fn japanese() -> Self {
        Self {
            app_title: "マークダウンエディター",
            editor: "✏️ エディター",
            preview: "👀 プレビュー",
            articles: "📚 記事リスト",
            title_placeholder: "タイトル",
            content_placeholder: "マークダウンでコンテンツを入力...",
            save: "💾 保存",
            update: "✨ 更新",
            edit: "✏️ 編集",
            delete: "🗑️ 削除",
            error: "エラー",
            orphaned_edit: "編集中の記事は削除されています。保存すると失敗します。",
        }
    }

    pub fn english() -> Self {
        Self {
            app_title: "Markdown Editor",
            editor: "✏️ Editor",
            preview: "👀 Preview",
            articles: "📚 Articles",
            title_placeholder: "Title",
            content_placeholder: "Write markdown content...",
            save: "💾 Save",
            update: "✨ Update",
            edit: "✏️ Edit",
            delete: "🗑️ Delete",
            error: "Error",
            orphaned_edit: "The article being edited was deleted; saving it will fail.",
        }
    }

    /// Save button wording for the current mode.
    pub fn save_button(&self, mode: EditorMode) -> &'static str {
        match mode {
            EditorMode::Editing(_) => self.update,
            EditorMode::New => self.save,
        }
    }
}

/// Classes of the page chrome around the rendered markdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChromeStyles {
    pub container: &'static str,
    pub app_title: &'static str,
    pub grid: &'static str,
    pub card: &'static str,
    pub card_title: &'static str,
    pub card_body: &'static str,
    pub input: &'static str,
    pub textarea: &'static str,
    pub primary_button: &'static str,
    pub preview_body: &'static str,
    pub preview_title: &'static str,
    pub preview_frame: &'static str,
    pub list: &'static str,
    pub list_row: &'static str,
    pub list_title: &'static str,
    pub outline_button: &'static str,
    pub destructive_button: &'static str,
    pub banner: &'static str,
}

impl ChromeStyles {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Tailwind => Self::tailwind(),
            Theme::Plain => Self::plain(),
        }
    }

    pub fn tailwind() -> Self {
        Self {
            container: "container mx-auto p-4 space-y-6",
            app_title: "text-3xl font-bold mb-6 bg-gradient-to-r from-primary to-blue-600 bg-clip-text text-transparent",
            grid: "grid grid-cols-1 md:grid-cols-2 gap-6",
            card: "hover-lift border-2",
            card_title: "flex items-center space-x-2",
            card_body: "space-y-4",
            input: "transition-all-ease focus:ring-2 focus:ring-primary",
            textarea: "transition-all-ease focus:ring-2 focus:ring-primary resize-none",
            primary_button: "hover-scale w-full",
            preview_body: "prose prose-sm max-w-none dark:prose-invert",
            preview_title: "text-xl font-bold mb-2",
            preview_frame: "bg-secondary/50 rounded-lg p-4",
            list: "space-y-3",
            list_row: "flex justify-between items-center p-3 rounded-lg bg-secondary/50 hover:bg-secondary transition-all-ease",
            list_title: "font-medium",
            outline_button: "hover-scale",
            destructive_button: "hover-scale",
            banner: "border-2 border-red-400 bg-red-50 text-red-700 rounded-lg p-3",
        }
    }

    pub fn plain() -> Self {
        Self {
            container: "",
            app_title: "",
            grid: "",
            card: "",
            card_title: "",
            card_body: "",
            input: "",
            textarea: "",
            primary_button: "",
            preview_body: "",
            preview_title: "",
            preview_frame: "",
            list: "",
            list_row: "",
            list_title: "",
            outline_button: "",
            destructive_button: "",
            banner: "",
        }
    }
}

/// Everything that varies between looks of the same page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Presentation {
    pub locale: Locale,
    pub styles: StyleTable,
    pub chrome: ChromeStyles,
    pub labels: Labels,
}

impl Presentation {
    pub fn new(theme: Theme, locale: Locale) -> Self {
        Self {
            locale,
            styles: StyleTable::for_theme(theme),
            chrome: ChromeStyles::for_theme(theme),
            labels: Labels::for_locale(locale),
        }
    }
}

impl Default for Presentation {
    fn default() -> Self {
        Self::new(Theme::default(), Locale::default())
    }
}

/// Renders the full editor page for the current view state.
pub fn render_page<G: ArticleGateway>(view: &EditorView<G>, presentation: &Presentation) -> String {
    let chrome = &presentation.chrome;
    let labels = &presentation.labels;
    let mut html = String::new();

    html.push_str(&format!(
        "<!DOCTYPE html>\n<html lang=\"{}\">\n<head>\n<meta charset=\"utf-8\" />\n<title>{}</title>\n</head>\n<body>\n",
        presentation.locale,
        escape_html(labels.app_title)
    ));
    html.push_str(&format!("<main{}>\n", class_attr(chrome.container)));
    html.push_str(&format!(
        "<h1{}>{}</h1>\n",
        class_attr(chrome.app_title),
        escape_html(labels.app_title)
    ));

    if let Some(banner) = view.error() {
        html.push_str(&format!(
            "<div role=\"alert\" data-error-kind=\"{}\"{}>{}: {}</div>\n",
            banner.kind,
            class_attr(chrome.banner),
            escape_html(labels.error),
            escape_html(&banner.message)
        ));
    }
    if view.editing_is_orphaned() {
        html.push_str(&format!(
            "<div role=\"status\" data-warning=\"orphaned-edit\"{}>{}</div>\n",
            class_attr(chrome.banner),
            escape_html(labels.orphaned_edit)
        ));
    }

    html.push_str(&format!("<div{}>\n", class_attr(chrome.grid)));
    editor_card(&mut html, view, presentation);
    preview_card(&mut html, view, presentation);
    html.push_str("</div>\n");
    article_list_card(&mut html, view, presentation);

    html.push_str("</main>\n</body>\n</html>\n");
    html
}

fn card_open(html: &mut String, chrome: &ChromeStyles, heading: &str) {
    html.push_str(&format!(
        "<section{}>\n<h2{}>{}</h2>\n",
        class_attr(chrome.card),
        class_attr(chrome.card_title),
        escape_html(heading)
    ));
}

fn editor_card<G: ArticleGateway>(
    html: &mut String,
    view: &EditorView<G>,
    presentation: &Presentation,
) {
    let chrome = &presentation.chrome;
    let labels = &presentation.labels;
    card_open(html, chrome, labels.editor);

    let article_attr = match view.mode() {
        EditorMode::Editing(id) => format!(" data-article-id=\"{id}\""),
        EditorMode::New => String::new(),
    };
    html.push_str(&format!(
        "<form method=\"post\"{article_attr}{}>\n",
        class_attr(chrome.card_body)
    ));
    html.push_str(&format!(
        "<input type=\"text\" name=\"title\" placeholder=\"{}\" value=\"{}\"{} />\n",
        escape_html(labels.title_placeholder),
        escape_html(view.title()),
        class_attr(chrome.input)
    ));
    html.push_str(&format!(
        // Parsers drop one newline right after the start tag.
        "<textarea name=\"content\" rows=\"10\" placeholder=\"{}\"{}>\n{}</textarea>\n",
        escape_html(labels.content_placeholder),
        class_attr(chrome.textarea),
        escape_html(view.content())
    ));
    html.push_str(&format!(
        "<button type=\"submit\" name=\"action\" value=\"save\"{}>{}</button>\n",
        class_attr(chrome.primary_button),
        escape_html(labels.save_button(view.mode()))
    ));
    html.push_str("</form>\n</section>\n");
}

fn preview_card<G: ArticleGateway>(
    html: &mut String,
    view: &EditorView<G>,
    presentation: &Presentation,
) {
    let chrome = &presentation.chrome;
    card_open(html, chrome, presentation.labels.preview);

    html.push_str(&format!("<article{}>\n", class_attr(chrome.preview_body)));
    html.push_str(&format!(
        "<h2{}>{}</h2>\n",
        class_attr(chrome.preview_title),
        escape_html(view.title())
    ));
    html.push_str(&format!("<div{}>\n", class_attr(chrome.preview_frame)));
    html.push_str(&view.preview_html(&presentation.styles));
    html.push_str("</div>\n</article>\n</section>\n");
}

fn article_list_card<G: ArticleGateway>(
    html: &mut String,
    view: &EditorView<G>,
    presentation: &Presentation,
) {
    let chrome = &presentation.chrome;
    let labels = &presentation.labels;
    card_open(html, chrome, labels.articles);

    html.push_str(&format!("<ul{}>\n", class_attr(chrome.list)));
    for article in view.articles() {
        let selected = if view.mode() == EditorMode::Editing(article.id) {
            " aria-current=\"true\""
        } else {
            ""
        };
        html.push_str(&format!(
            "<li data-article-id=\"{}\"{selected}{}>\n<span{}>{}</span>\n",
            article.id,
            class_attr(chrome.list_row),
            class_attr(chrome.list_title),
            escape_html(&article.title)
        ));
        html.push_str(&format!(
            "<button type=\"button\" data-action=\"edit\" data-article-id=\"{}\"{}>{}</button>\n",
            article.id,
            class_attr(chrome.outline_button),
            escape_html(labels.edit)
        ));
        html.push_str(&format!(
            "<button type=\"button\" data-action=\"delete\" data-article-id=\"{}\"{}>{}</button>\n",
            article.id,
            class_attr(chrome.destructive_button),
            escape_html(labels.delete)
        ));
        html.push_str("</li>\n");
    }
    html.push_str("</ul>\n</section>\n");
}

#[cfg(test)]
mod tests {
    use super::{Labels, Locale, Presentation};
    use crate::editor::state::EditorMode;
    use crate::markdown::style::{StyleTable, Theme};

    #[test]
    fn save_button_follows_mode() {
        let labels = Labels::english();
        assert_eq!(labels.save_button(EditorMode::New), "💾 Save");
        assert_eq!(labels.save_button(EditorMode::Editing(3)), "✨ Update");
    }

    #[test]
    fn locale_parses_and_displays() {
        assert_eq!("EN".parse::<Locale>(), Ok(Locale::En));
        assert!("fr".parse::<Locale>().is_err());
        assert_eq!(Locale::Ja.to_string(), "ja");
    }

    #[test]
    fn default_presentation_is_tailwind_in_japanese() {
        let presentation = Presentation::default();
        assert_eq!(presentation.labels, Labels::japanese());
        assert_eq!(presentation.styles, StyleTable::tailwind());
        assert_eq!(
            Presentation::new(Theme::Plain, Locale::En).styles,
            StyleTable::plain()
        );
    }
}
