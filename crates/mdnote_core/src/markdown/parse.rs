//! Folds the pulldown-cmark event stream into a [`Document`].
//!
//! # Invariants
//! - pulldown-cmark emits balanced `Start`/`End` pairs, so every `End` closes
//!   exactly the frame its `Start` opened.
//! - Constructs the preview does not style (footnotes, metadata blocks) are
//!   parsed and dropped.

use super::ast::{Alignment, Block, Cell, Document, HeadingLevel, Inline, ListItem, ListKind};
use pulldown_cmark::{
    Alignment as MdAlignment, CodeBlockKind, Event, HeadingLevel as MdHeadingLevel, Options,
    Parser as MdParser, Tag,
};

/// Parses markdown source with GFM tables, strikethrough and task lists.
pub fn parse(source: &str) -> Document {
    let mut builder = Builder::new();
    for event in MdParser::new_ext(source, parser_options()) {
        builder.handle(event);
    }
    builder.finish()
}

fn parser_options() -> Options {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);
    options
}

enum Frame {
    Document(Vec<Block>),
    BlockQuote(Vec<Block>),
    List {
        kind: ListKind,
        items: Vec<ListItem>,
    },
    Item {
        checked: Option<bool>,
        blocks: Vec<Block>,
        pending: Vec<Inline>,
    },
    Paragraph(Vec<Inline>),
    Heading {
        level: HeadingLevel,
        content: Vec<Inline>,
    },
    CodeBlock {
        language: Option<String>,
        text: String,
    },
    HtmlBlock(String),
    Table {
        alignments: Vec<Alignment>,
        head: Vec<Cell>,
        rows: Vec<Vec<Cell>>,
    },
    TableHead(Vec<Cell>),
    TableRow(Vec<Cell>),
    TableCell(Vec<Inline>),
    Emphasis(Vec<Inline>),
    Strong(Vec<Inline>),
    Strikethrough(Vec<Inline>),
    Link {
        href: String,
        title: String,
        children: Vec<Inline>,
    },
    Image {
        src: String,
        title: String,
        alt: Vec<Inline>,
    },
    Discard,
}

struct Builder {
    stack: Vec<Frame>,
}

impl Builder {
    fn new() -> Self {
        Self {
            stack: vec![Frame::Document(Vec::new())],
        }
    }

    fn handle(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.open(tag),
            Event::End(_) => self.close(),
            Event::Text(text) => self.push_text(&text),
            Event::Code(code) => self.push_inline(Inline::Code(code.into_string())),
            Event::Html(html) => self.push_html(&html),
            Event::InlineHtml(html) => self.push_inline(Inline::Html(html.into_string())),
            Event::SoftBreak => self.push_inline(Inline::SoftBreak),
            Event::HardBreak => self.push_inline(Inline::HardBreak),
            Event::Rule => self.push_block(Block::Rule),
            Event::TaskListMarker(checked) => self.mark_task(checked),
            _ => {}
        }
    }

    fn open(&mut self, tag: Tag<'_>) {
        let frame = match tag {
            Tag::Paragraph => Frame::Paragraph(Vec::new()),
            Tag::Heading { level, .. } => Frame::Heading {
                level: heading_level(level),
                content: Vec::new(),
            },
            Tag::BlockQuote { .. } => Frame::BlockQuote(Vec::new()),
            Tag::CodeBlock(kind) => Frame::CodeBlock {
                language: match kind {
                    CodeBlockKind::Fenced(info) => info
                        .split_whitespace()
                        .next()
                        .map(str::to_string),
                    CodeBlockKind::Indented => None,
                },
                text: String::new(),
            },
            Tag::HtmlBlock => Frame::HtmlBlock(String::new()),
            Tag::List(start) => Frame::List {
                kind: match start {
                    Some(start) => ListKind::Ordered { start },
                    None => ListKind::Bullet,
                },
                items: Vec::new(),
            },
            Tag::Item => Frame::Item {
                checked: None,
                blocks: Vec::new(),
                pending: Vec::new(),
            },
            Tag::Table(alignments) => Frame::Table {
                alignments: alignments.into_iter().map(alignment).collect(),
                head: Vec::new(),
                rows: Vec::new(),
            },
            Tag::TableHead => Frame::TableHead(Vec::new()),
            Tag::TableRow => Frame::TableRow(Vec::new()),
            Tag::TableCell => Frame::TableCell(Vec::new()),
            Tag::Emphasis => Frame::Emphasis(Vec::new()),
            Tag::Strong => Frame::Strong(Vec::new()),
            Tag::Strikethrough => Frame::Strikethrough(Vec::new()),
            Tag::Link {
                dest_url, title, ..
            } => Frame::Link {
                href: dest_url.into_string(),
                title: title.into_string(),
                children: Vec::new(),
            },
            Tag::Image {
                dest_url, title, ..
            } => Frame::Image {
                src: dest_url.into_string(),
                title: title.into_string(),
                alt: Vec::new(),
            },
            _ => Frame::Discard,
        };
        self.stack.push(frame);
    }

    fn close(&mut self) {
        // The document frame is never closed by an event.
        if self.stack.len() < 2 {
            return;
        }
        let Some(frame) = self.stack.pop() else {
            return;
        };

        match frame {
            Frame::Document(_) | Frame::Discard => {}
            Frame::BlockQuote(blocks) => self.push_block(Block::BlockQuote(blocks)),
            Frame::List { kind, items } => self.push_block(Block::List { kind, items }),
            Frame::Item {
                checked,
                mut blocks,
                pending,
            } => {
                if !pending.is_empty() {
                    blocks.push(Block::Plain(pending));
                }
                if let Some(Frame::List { items, .. }) = self.stack.last_mut() {
                    items.push(ListItem { checked, blocks });
                }
            }
            Frame::Paragraph(content) => self.push_block(Block::Paragraph(content)),
            Frame::Heading { level, content } => {
                self.push_block(Block::Heading { level, content })
            }
            Frame::CodeBlock { language, text } => {
                self.push_block(Block::CodeBlock { language, text })
            }
            Frame::HtmlBlock(html) => self.push_block(Block::Html(html)),
            Frame::Table {
                alignments,
                head,
                rows,
            } => self.push_block(Block::Table {
                alignments,
                head,
                rows,
            }),
            Frame::TableHead(cells) => {
                if let Some(Frame::Table { head, .. }) = self.stack.last_mut() {
                    *head = cells;
                }
            }
            Frame::TableRow(cells) => {
                if let Some(Frame::Table { rows, .. }) = self.stack.last_mut() {
                    rows.push(cells);
                }
            }
            Frame::TableCell(content) => match self.stack.last_mut() {
                Some(Frame::TableHead(cells)) | Some(Frame::TableRow(cells)) => {
                    cells.push(content)
                }
                _ => {}
            },
            Frame::Emphasis(children) => self.push_inline(Inline::Emphasis(children)),
            Frame::Strong(children) => self.push_inline(Inline::Strong(children)),
            Frame::Strikethrough(children) => self.push_inline(Inline::Strikethrough(children)),
            Frame::Link {
                href,
                title,
                children,
            } => self.push_inline(Inline::Link {
                href,
                title,
                children,
            }),
            Frame::Image { src, title, alt } => self.push_inline(Inline::Image { src, title, alt }),
        }
    }

    fn push_text(&mut self, text: &str) {
        match self.stack.last_mut() {
            Some(Frame::CodeBlock { text: buffer, .. }) | Some(Frame::HtmlBlock(buffer)) => {
                buffer.push_str(text)
            }
            _ => self.push_inline(Inline::Text(text.to_string())),
        }
    }

    fn push_html(&mut self, html: &str) {
        match self.stack.last_mut() {
            Some(Frame::HtmlBlock(buffer)) => buffer.push_str(html),
            _ => self.push_inline(Inline::Html(html.to_string())),
        }
    }

    fn push_inline(&mut self, inline: Inline) {
        let Some(frame) = self.stack.last_mut() else {
            return;
        };
        let target = match frame {
            Frame::Paragraph(content)
            | Frame::Heading { content, .. }
            | Frame::TableCell(content)
            | Frame::Emphasis(content)
            | Frame::Strong(content)
            | Frame::Strikethrough(content) => content,
            Frame::Link { children, .. } => children,
            Frame::Image { alt, .. } => alt,
            Frame::Item { pending, .. } => pending,
            _ => return,
        };

        // pulldown-cmark may split one text run into several events.
        if let (Inline::Text(next), Some(Inline::Text(previous))) = (&inline, target.last_mut()) {
            previous.push_str(next);
            return;
        }
        target.push(inline);
    }

    fn push_block(&mut self, block: Block) {
        let Some(frame) = self.stack.last_mut() else {
            return;
        };
        match frame {
            Frame::Document(blocks) | Frame::BlockQuote(blocks) => blocks.push(block),
            Frame::Item {
                blocks, pending, ..
            } => {
                if !pending.is_empty() {
                    blocks.push(Block::Plain(std::mem::take(pending)));
                }
                blocks.push(block);
            }
            _ => {}
        }
    }

    fn mark_task(&mut self, done: bool) {
        let item = self.stack.iter_mut().rev().find_map(|frame| match frame {
            Frame::Item { checked, .. } => Some(checked),
            _ => None,
        });
        if let Some(slot) = item {
            *slot = Some(done);
        }
    }

    fn finish(mut self) -> Document {
        // Unbalanced input cannot come out of pulldown-cmark, but fold any
        // leftovers rather than lose text.
        while self.stack.len() > 1 {
            self.close();
        }
        match self.stack.pop() {
            Some(Frame::Document(blocks)) => Document { blocks },
            _ => Document::default(),
        }
    }
}

fn heading_level(level: MdHeadingLevel) -> HeadingLevel {
    HeadingLevel::new(match level {
        MdHeadingLevel::H1 => 1,
        MdHeadingLevel::H2 => 2,
        MdHeadingLevel::H3 => 3,
        MdHeadingLevel::H4 => 4,
        MdHeadingLevel::H5 => 5,
        MdHeadingLevel::H6 => 6,
    })
}

fn alignment(value: MdAlignment) -> Alignment {
    match value {
        MdAlignment::None => Alignment::None,
        MdAlignment::Left => Alignment::Left,
        MdAlignment::Center => Alignment::Center,
        MdAlignment::Right => Alignment::Right,
    }
}

#[cfg(test)]
mod tests {
    use super::parse;
    use crate::markdown::ast::{Alignment, Block, Inline, ListItem, ListKind};

    fn text(value: &str) -> Inline {
        Inline::Text(value.to_string())
    }

    #[test]
    fn parses_heading_levels() {
        let doc = parse("# One\n\n### Three");
        assert_eq!(doc.blocks.len(), 2);
        match &doc.blocks[1] {
            Block::Heading { level, content } => {
                assert_eq!(level.get(), 3);
                assert_eq!(content, &vec![text("Three")]);
            }
            other => panic!("unexpected block: {other:?}"),
        }
    }

    #[test]
    fn tight_list_items_hold_plain_runs() {
        let doc = parse("- a\n- b");
        assert_eq!(
            doc.blocks,
            vec![Block::List {
                kind: ListKind::Bullet,
                items: vec![
                    ListItem {
                        checked: None,
                        blocks: vec![Block::Plain(vec![text("a")])],
                    },
                    ListItem {
                        checked: None,
                        blocks: vec![Block::Plain(vec![text("b")])],
                    },
                ],
            }]
        );
    }

    #[test]
    fn ordered_list_keeps_start_number() {
        let doc = parse("3. c\n4. d");
        assert!(matches!(
            doc.blocks[0],
            Block::List {
                kind: ListKind::Ordered { start: 3 },
                ..
            }
        ));
    }

    #[test]
    fn nested_list_follows_item_text() {
        let doc = parse("- outer\n  - inner");
        let Block::List { items, .. } = &doc.blocks[0] else {
            panic!("expected list");
        };
        assert_eq!(items[0].blocks.len(), 2);
        assert_eq!(items[0].blocks[0], Block::Plain(vec![text("outer")]));
        assert!(matches!(items[0].blocks[1], Block::List { .. }));
    }

    #[test]
    fn task_markers_set_checked_state() {
        let doc = parse("- [x] done\n- [ ] todo");
        let Block::List { items, .. } = &doc.blocks[0] else {
            panic!("expected list");
        };
        assert_eq!(items[0].checked, Some(true));
        assert_eq!(items[1].checked, Some(false));
    }

    #[test]
    fn fenced_code_keeps_language_and_text() {
        let doc = parse("```rust extra\nfn main() {}\n```");
        assert_eq!(
            doc.blocks,
            vec![Block::CodeBlock {
                language: Some("rust".to_string()),
                text: "fn main() {}\n".to_string(),
            }]
        );
    }

    #[test]
    fn indented_code_has_no_language() {
        let doc = parse("    let x = 1;\n");
        assert!(matches!(
            &doc.blocks[0],
            Block::CodeBlock { language: None, text } if text == "let x = 1;\n"
        ));
    }

    #[test]
    fn indented_code_at_end_of_input_has_no_trailing_newline() {
        let doc = parse("    let x = 1;");
        assert!(matches!(
            &doc.blocks[0],
            Block::CodeBlock { language: None, text } if text == "let x = 1;"
        ));
    }

    #[test]
    fn inline_markup_nests() {
        let doc = parse("*a **b** [c](https://e.x \"t\")*");
        let Block::Paragraph(content) = &doc.blocks[0] else {
            panic!("expected paragraph");
        };
        let Inline::Emphasis(children) = &content[0] else {
            panic!("expected emphasis");
        };
        assert_eq!(children[0], text("a "));
        assert_eq!(children[1], Inline::Strong(vec![text("b")]));
        assert_eq!(children[2], text(" "));
        assert_eq!(
            children[3],
            Inline::Link {
                href: "https://e.x".to_string(),
                title: "t".to_string(),
                children: vec![text("c")],
            }
        );
    }

    #[test]
    fn table_collects_head_rows_and_alignment() {
        let doc = parse("| a | b |\n|:--|--:|\n| 1 | 2 |");
        assert_eq!(
            doc.blocks,
            vec![Block::Table {
                alignments: vec![Alignment::Left, Alignment::Right],
                head: vec![vec![text("a")], vec![text("b")]],
                rows: vec![vec![vec![text("1")], vec![text("2")]]],
            }]
        );
    }

    #[test]
    fn blockquote_wraps_paragraphs_and_rule_is_a_block() {
        let doc = parse("> quoted\n\n---");
        assert_eq!(
            doc.blocks,
            vec![
                Block::BlockQuote(vec![Block::Paragraph(vec![text("quoted")])]),
                Block::Rule,
            ]
        );
    }

    #[test]
    fn raw_html_inside_paragraph_becomes_inline_html() {
        let doc = parse("a <b>c</b>");
        let Block::Paragraph(content) = &doc.blocks[0] else {
            panic!("expected paragraph");
        };
        assert!(content.contains(&Inline::Html("<b>".to_string())));
        assert!(parse("").blocks.is_empty());
    }
}
