//! HTML rendering of the markdown tree.
//!
//! # Invariants
//! - Every text node and attribute value is escaped.
//! - Raw HTML from the source is shown as text, never injected.
//! - URLs with a scheme outside `http|https|mailto|tel` render as an empty
//!   attribute.

use super::ast::{inline_text, Alignment, Block, Cell, Document, Inline, ListItem, ListKind};
use super::parse::parse;
use super::style::StyleTable;
use once_cell::sync::Lazy;
use regex::Regex;

static URL_SCHEME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([^/?#:]*):").expect("valid url scheme regex"));

const SAFE_URL_SCHEMES: [&str; 4] = ["http", "https", "mailto", "tel"];

/// Parses `source` and renders it with `styles`.
pub fn render_markdown(source: &str, styles: &StyleTable) -> String {
    render_html(&parse(source), styles)
}

/// Renders a parsed document to an HTML fragment.
pub fn render_html(document: &Document, styles: &StyleTable) -> String {
    let mut renderer = HtmlRenderer {
        styles,
        out: String::new(),
    };
    renderer.blocks(&document.blocks);
    renderer.out
}

/// Escapes `&`, `<`, `>`, `"` and `'` for text and attribute positions.
pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Returns `url` when it is relative or uses an allowed scheme, else `""`.
pub fn sanitize_url(url: &str) -> &str {
    let trimmed = url.trim();
    match URL_SCHEME_RE.captures(trimmed) {
        None => trimmed,
        Some(caps) => {
            let scheme = caps.get(1).map_or("", |m| m.as_str());
            if SAFE_URL_SCHEMES
                .iter()
                .any(|allowed| scheme.eq_ignore_ascii_case(allowed))
            {
                trimmed
            } else {
                ""
            }
        }
    }
}

/// Formats ` class="..."`, or nothing for an empty class.
pub(crate) fn class_attr(class: &str) -> String {
    if class.is_empty() {
        String::new()
    } else {
        format!(" class=\"{}\"", escape_html(class))
    }
}

struct HtmlRenderer<'a> {
    styles: &'a StyleTable,
    out: String,
}

impl HtmlRenderer<'_> {
    fn blocks(&mut self, blocks: &[Block]) {
        for block in blocks {
            self.block(block);
        }
    }

    fn block(&mut self, block: &Block) {
        match block {
            Block::Heading { level, content } => {
                let level = level.get();
                self.open("h", level, self.styles.heading(level));
                self.inlines(content);
                self.out.push_str(&format!("</h{level}>\n"));
            }
            Block::Paragraph(content) => {
                self.tag_open("p", self.styles.paragraph);
                self.inlines(content);
                self.out.push_str("</p>\n");
            }
            Block::Plain(content) => self.inlines(content),
            Block::List { kind, items } => self.list(*kind, items),
            Block::BlockQuote(children) => {
                self.tag_open("blockquote", self.styles.blockquote);
                self.out.push('\n');
                self.blocks(children);
                self.out.push_str("</blockquote>\n");
            }
            Block::CodeBlock { language, text } => {
                self.tag_open("pre", self.styles.code_block);
                match language {
                    Some(language) => self.out.push_str(&format!(
                        "<code class=\"language-{}\">",
                        escape_html(language)
                    )),
                    None => self.out.push_str("<code>"),
                }
                self.out.push_str(&escape_html(text));
                self.out.push_str("</code></pre>\n");
            }
            Block::Table {
                alignments,
                head,
                rows,
            } => self.table(alignments, head, rows),
            Block::Rule => {
                self.out
                    .push_str(&format!("<hr{} />\n", class_attr(self.styles.rule)));
            }
            Block::Html(html) => {
                self.tag_open("p", self.styles.paragraph);
                self.out.push_str(&escape_html(html.trim_end()));
                self.out.push_str("</p>\n");
            }
        }
    }

    fn list(&mut self, kind: ListKind, items: &[ListItem]) {
        let tag = match kind {
            ListKind::Bullet => {
                self.tag_open("ul", self.styles.bullet_list);
                "ul"
            }
            ListKind::Ordered { start } => {
                self.out.push_str("<ol");
                if start != 1 {
                    self.out.push_str(&format!(" start=\"{start}\""));
                }
                self.out
                    .push_str(&format!("{}>", class_attr(self.styles.ordered_list)));
                "ol"
            }
        };
        self.out.push('\n');

        for item in items {
            self.tag_open("li", self.styles.list_item);
            if let Some(checked) = item.checked {
                let state = if checked { " checked" } else { "" };
                self.out
                    .push_str(&format!("<input type=\"checkbox\" disabled{state} /> "));
            }
            self.blocks(&item.blocks);
            self.out.push_str("</li>\n");
        }

        self.out.push_str(&format!("</{tag}>\n"));
    }

    fn table(&mut self, alignments: &[Alignment], head: &[Cell], rows: &[Vec<Cell>]) {
        self.tag_open("div", self.styles.table_wrapper);
        self.tag_open("table", self.styles.table);
        self.out.push_str("\n<thead>\n<tr>\n");
        for (index, cell) in head.iter().enumerate() {
            self.cell("th", self.styles.table_header_cell, alignments.get(index), cell);
        }
        self.out.push_str("</tr>\n</thead>\n");

        if !rows.is_empty() {
            self.out.push_str("<tbody>\n");
            for row in rows {
                self.out.push_str("<tr>\n");
                for (index, cell) in row.iter().enumerate() {
                    self.cell("td", self.styles.table_cell, alignments.get(index), cell);
                }
                self.out.push_str("</tr>\n");
            }
            self.out.push_str("</tbody>\n");
        }
        self.out.push_str("</table>\n</div>\n");
    }

    fn cell(&mut self, tag: &str, class: &str, alignment: Option<&Alignment>, content: &[Inline]) {
        let style = match alignment {
            Some(Alignment::Left) => " style=\"text-align: left\"",
            Some(Alignment::Center) => " style=\"text-align: center\"",
            Some(Alignment::Right) => " style=\"text-align: right\"",
            Some(Alignment::None) | None => "",
        };
        self.out
            .push_str(&format!("<{tag}{}{style}>", class_attr(class)));
        self.inlines(content);
        self.out.push_str(&format!("</{tag}>\n"));
    }

    fn inlines(&mut self, inlines: &[Inline]) {
        for inline in inlines {
            self.inline(inline);
        }
    }

    fn inline(&mut self, inline: &Inline) {
        match inline {
            Inline::Text(text) => self.out.push_str(&escape_html(text)),
            Inline::Code(code) => {
                self.tag_open("code", self.styles.inline_code);
                self.out.push_str(&escape_html(code));
                self.out.push_str("</code>");
            }
            Inline::Emphasis(children) => self.wrap("em", self.styles.emphasis, children),
            Inline::Strong(children) => self.wrap("strong", self.styles.strong, children),
            Inline::Strikethrough(children) => {
                self.wrap("del", self.styles.strikethrough, children)
            }
            Inline::Link {
                href,
                title,
                children,
            } => {
                self.out.push_str(&format!(
                    "<a href=\"{}\"",
                    escape_html(sanitize_url(href))
                ));
                if !title.is_empty() {
                    self.out
                        .push_str(&format!(" title=\"{}\"", escape_html(title)));
                }
                self.out
                    .push_str(&format!("{}>", class_attr(self.styles.link)));
                self.inlines(children);
                self.out.push_str("</a>");
            }
            Inline::Image { src, title, alt } => {
                self.out.push_str(&format!(
                    "<img src=\"{}\" alt=\"{}\"",
                    escape_html(sanitize_url(src)),
                    escape_html(&inline_text(alt))
                ));
                if !title.is_empty() {
                    self.out
                        .push_str(&format!(" title=\"{}\"", escape_html(title)));
                }
                self.out
                    .push_str(&format!("{} />", class_attr(self.styles.image)));
            }
            Inline::SoftBreak => self.out.push('\n'),
            Inline::HardBreak => self.out.push_str("<br />\n"),
            Inline::Html(html) => self.out.push_str(&escape_html(html)),
        }
    }

    fn wrap(&mut self, tag: &str, class: &str, children: &[Inline]) {
        self.tag_open(tag, class);
        self.inlines(children);
        self.out.push_str(&format!("</{tag}>"));
    }

    fn tag_open(&mut self, tag: &str, class: &str) {
        self.out.push_str(&format!("<{tag}{}>", class_attr(class)));
    }

    fn open(&mut self, tag: &str, level: u8, class: &str) {
        self.out
            .push_str(&format!("<{tag}{level}{}>", class_attr(class)));
    }
}
