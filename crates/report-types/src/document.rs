//! Report document structure handed to a rendering backend

use serde::{Deserialize, Serialize};

/// Ordered content blocks making up one report
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedDocument {
    pub blocks: Vec<Block>,
}

/// A single content block.
///
/// Serialized with a `kind` tag so templates can dispatch on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Block {
    Title {
        text: String,
    },
    Heading {
        text: String,
        level: u8,
    },
    /// The original content with matched spans marked
    Annotated {
        segments: Vec<Segment>,
        /// Markup-safe rich-text rendition of `segments`
        markup: String,
    },
    Spacer {
        points: u32,
    },
    Table(MatchTable),
}

/// A run of content text, either plain or marked as matched
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub text: String,
    pub marked: bool,
}

/// Tabular summary of matches
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchTable {
    pub columns: Vec<Column>,
    pub rows: Vec<MatchRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub title: String,
    pub width_inches: f64,
}

/// One row per source: (matched text, similarity, source reference)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRow {
    pub matched_text: String,
    pub similarity: String,
    pub reference: String,
}

/// A rendered, fixed-layout report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub bytes: Vec<u8>,
    pub mime_type: String,
    pub page_count: usize,
}

impl AnnotatedDocument {
    /// The first table block, if any
    pub fn table(&self) -> Option<&MatchTable> {
        self.blocks.iter().find_map(|block| match block {
            Block::Table(table) => Some(table),
            _ => None,
        })
    }

    /// Heading texts in document order
    pub fn headings(&self) -> Vec<&str> {
        self.blocks
            .iter()
            .filter_map(|block| match block {
                Block::Heading { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn has_annotated_text(&self) -> bool {
        self.blocks
            .iter()
            .any(|block| matches!(block, Block::Annotated { .. }))
    }
}

impl Segment {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            marked: false,
        }
    }

    pub fn marked(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            marked: true,
        }
    }
}

impl Column {
    pub fn new(title: &str, width_inches: f64) -> Self {
        Self {
            title: title.to_string(),
            width_inches,
        }
    }
}
