//! Declarative element-to-class table used by the renderer.
//!
//! # Invariants
//! - An empty class string means "emit no `class` attribute".
//! - The table is data only; the renderer never branches on theme.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Named presentation theme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Tailwind utility classes.
    #[default]
    Tailwind,
    /// Bare semantic HTML.
    Plain,
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "tailwind" => Ok(Self::Tailwind),
            "plain" => Ok(Self::Plain),
            other => Err(format!(
                "unsupported theme `{other}`; expected tailwind|plain"
            )),
        }
    }
}

impl Display for Theme {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Tailwind => f.write_str("tailwind"),
            Self::Plain => f.write_str("plain"),
        }
    }
}

/// Class names per rendered element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleTable {
    /// `h1` through `h6`, by index `level - 1`.
    pub headings: [&'static str; 6],
    pub paragraph: &'static str,
    pub bullet_list: &'static str,
    pub ordered_list: &'static str,
    pub list_item: &'static str,
    pub blockquote: &'static str,
    pub inline_code: &'static str,
    pub code_block: &'static str,
    pub link: &'static str,
    pub strong: &'static str,
    pub emphasis: &'static str,
    pub strikethrough: &'static str,
    pub rule: &'static str,
    pub table_wrapper: &'static str,
    pub table: &'static str,
    pub table_header_cell: &'static str,
    pub table_cell: &'static str,
    pub image: &'static str,
}

impl StyleTable {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Tailwind => Self::tailwind(),
            Theme::Plain => Self::plain(),
        }
    }

    pub fn tailwind() -> Self {
        Self {
            headings: [
                "text-2xl font-bold my-4",
                "text-xl font-bold my-3",
                "text-lg font-bold my-2",
                "text-base font-bold my-2",
                "text-sm font-bold my-2",
                "text-xs font-bold my-2",
            ],
            paragraph: "my-2",
            bullet_list: "list-disc ml-6 my-2",
            ordered_list: "list-decimal ml-6 my-2",
            list_item: "my-1",
            blockquote: "border-l-4 border-gray-300 pl-4 my-2 italic",
            inline_code: "bg-gray-100 rounded px-1 py-0.5",
            code_block: "bg-gray-100 rounded p-4 my-2 overflow-auto",
            link: "text-blue-500 hover:text-blue-700 underline",
            strong: "font-bold",
            emphasis: "italic",
            strikethrough: "line-through",
            rule: "my-4 border-t border-gray-300",
            table_wrapper: "overflow-x-auto my-4",
            table: "min-w-full border-collapse border border-gray-300",
            table_header_cell: "border border-gray-300 px-4 py-2 bg-gray-50",
            table_cell: "border border-gray-300 px-4 py-2",
            image: "max-w-full",
        }
    }

    pub fn plain() -> Self {
        Self {
            headings: [""; 6],
            paragraph: "",
            bullet_list: "",
            ordered_list: "",
            list_item: "",
            blockquote: "",
            inline_code: "",
            code_block: "",
            link: "",
            strong: "",
            emphasis: "",
            strikethrough: "",
            rule: "",
            table_wrapper: "",
            table: "",
            table_header_cell: "",
            table_cell: "",
            image: "",
        }
    }

    /// Class for a heading of `level` (clamped to `1..=6`).
    pub fn heading(&self, level: u8) -> &'static str {
        let index = usize::from(level.clamp(1, 6)) - 1;
        self.headings[index]
    }
}

impl Default for StyleTable {
    fn default() -> Self {
        Self::tailwind()
    }
}

#[cfg(test)]
mod tests {
    use super::{StyleTable, Theme};

    #[test]
    fn theme_parses_case_insensitively() {
        assert_eq!("Plain".parse::<Theme>(), Ok(Theme::Plain));
        assert_eq!(" tailwind ".parse::<Theme>(), Ok(Theme::Tailwind));
        assert!("neon".parse::<Theme>().is_err());
    }

    #[test]
    fn heading_classes_follow_level() {
        let table = StyleTable::tailwind();
        assert_eq!(table.heading(1), "text-2xl font-bold my-4");
        assert_eq!(table.heading(6), "text-xs font-bold my-2");
        assert_eq!(table.heading(42), table.heading(6));
        assert_eq!(StyleTable::for_theme(Theme::Plain).heading(1), "");
    }
}
