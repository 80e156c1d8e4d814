use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;
use crate::ids::BlockId;

/// Language assigned to a code block created without a `#language=` pragma.
pub const DEFAULT_CODE_LANGUAGE: &str = "text";

fn default_language() -> String {
    DEFAULT_CODE_LANGUAGE.to_string()
}

/// The variant of a content block, without its payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockTag {
    Markdown,
    Code,
    Aside,
}

impl BlockTag {
    pub const ALL: [BlockTag; 3] = [BlockTag::Markdown, BlockTag::Code, BlockTag::Aside];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Markdown => "markdown",
            Self::Code => "code",
            Self::Aside => "aside",
        }
    }

    /// Article used in human-readable messages ("a code block", "an aside block").
    pub fn article(&self) -> &'static str {
        match self {
            Self::Aside => "an",
            Self::Markdown | Self::Code => "a",
        }
    }
}

impl fmt::Display for BlockTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BlockTag {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "markdown" => Ok(Self::Markdown),
            "code" => Ok(Self::Code),
            "aside" => Ok(Self::Aside),
            other => Err(TypeError::UnknownBlockType(other.to_string())),
        }
    }
}

/// Variant-specific payload of a [`ContentBlock`].
///
/// Serialized inline with the block as `"tag": "<variant>"`, so a code block
/// reads `{"id": .., "tag": "code", "language": "rust", "content": ..}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "tag", rename_all = "lowercase")]
pub enum BlockKind {
    Markdown,
    Code {
        #[serde(default = "default_language")]
        language: String,
    },
    Aside,
}

impl BlockKind {
    pub fn tag(&self) -> BlockTag {
        match self {
            Self::Markdown => BlockTag::Markdown,
            Self::Code { .. } => BlockTag::Code,
            Self::Aside => BlockTag::Aside,
        }
    }
}

/// A single typed unit of a post's body.
///
/// `id` is assigned at creation and never changes; neither does the variant.
/// Editing replaces `content` (always pragma-stripped) and variant options.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentBlock {
    pub id: BlockId,
    #[serde(flatten)]
    pub kind: BlockKind,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classes: Option<String>,
}

impl ContentBlock {
    pub fn markdown(id: BlockId, content: impl Into<String>) -> Self {
        Self::with_kind(id, BlockKind::Markdown, content)
    }

    pub fn code(id: BlockId, content: impl Into<String>, language: impl Into<String>) -> Self {
        Self::with_kind(
            id,
            BlockKind::Code {
                language: language.into(),
            },
            content,
        )
    }

    pub fn aside(id: BlockId, content: impl Into<String>) -> Self {
        Self::with_kind(id, BlockKind::Aside, content)
    }

    fn with_kind(id: BlockId, kind: BlockKind, content: impl Into<String>) -> Self {
        Self {
            id,
            kind,
            content: content.into(),
            classes: None,
        }
    }

    pub fn with_classes(mut self, classes: impl Into<String>) -> Self {
        self.classes = Some(classes.into());
        self
    }

    pub fn tag(&self) -> BlockTag {
        self.kind.tag()
    }

    /// The code language, or `None` for non-code blocks.
    pub fn language(&self) -> Option<&str> {
        match &self.kind {
            BlockKind::Code { language } => Some(language),
            _ => None,
        }
    }
}
