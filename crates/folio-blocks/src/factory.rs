//! Per-variant block construction and editing.
//!
//! Creation and editing differ for code blocks only in the fallback used when
//! no `#language=` pragma is given: creation falls back to
//! [`DEFAULT_CODE_LANGUAGE`], editing keeps the block's current language.

use folio_types::{BlockId, BlockKind, BlockTag, ContentBlock, DEFAULT_CODE_LANGUAGE};
use tracing::debug;

use crate::error::{BlockError, BlockResult};
use crate::pragma::{decode, Pragma};

const LANGUAGE: &str = "language";

/// Parse an untyped tag string.
///
/// This is the only place an unrecognised variant can enter the system.
pub fn parse_tag(tag: &str) -> BlockResult<BlockTag> {
    Ok(tag.parse::<BlockTag>()?)
}

/// Resolve the language option, falling back to `fallback` when absent.
///
/// The result is trimmed and must be non-empty.
fn resolve_language(pragma: &Pragma, fallback: &str) -> BlockResult<String> {
    let language = pragma.option(LANGUAGE).unwrap_or(fallback).trim();
    if language.is_empty() {
        return Err(BlockError::Validation("language required".into()));
    }
    Ok(language.to_string())
}

/// Build a new block of variant `tag` from raw (pragma-prefixed) text.
pub fn create_block(id: BlockId, tag: BlockTag, raw: &str) -> BlockResult<ContentBlock> {
    let pragma = decode(raw);
    let block = match tag {
        BlockTag::Markdown => ContentBlock::markdown(id, pragma.body),
        BlockTag::Aside => ContentBlock::aside(id, pragma.body),
        BlockTag::Code => {
            let language = resolve_language(&pragma, DEFAULT_CODE_LANGUAGE)?;
            ContentBlock::code(id, pragma.body, language)
        }
    };
    debug!(block = %block.id, tag = %tag, "created block");
    Ok(block)
}

fn ensure_tag(block: &ContentBlock, expected: BlockTag) -> BlockResult<()> {
    let actual = block.tag();
    if actual != expected {
        return Err(BlockError::TypeMismatch { expected, actual });
    }
    Ok(())
}

/// Replace the body of a markdown block. Pragma options are ignored.
pub fn edit_markdown(block: &ContentBlock, raw: &str) -> BlockResult<ContentBlock> {
    ensure_tag(block, BlockTag::Markdown)?;
    Ok(ContentBlock {
        content: decode(raw).body,
        ..block.clone()
    })
}

/// Replace the body of an aside block. Pragma options are ignored.
pub fn edit_aside(block: &ContentBlock, raw: &str) -> BlockResult<ContentBlock> {
    ensure_tag(block, BlockTag::Aside)?;
    Ok(ContentBlock {
        content: decode(raw).body,
        ..block.clone()
    })
}

/// Replace the body of a code block and, when a `#language=` pragma is
/// present, its language.
pub fn edit_code(block: &ContentBlock, raw: &str) -> BlockResult<ContentBlock> {
    ensure_tag(block, BlockTag::Code)?;
    let current = block.language().unwrap_or(DEFAULT_CODE_LANGUAGE);
    let pragma = decode(raw);
    let language = resolve_language(&pragma, current)?;
    Ok(ContentBlock {
        kind: BlockKind::Code { language },
        content: pragma.body,
        ..block.clone()
    })
}

/// Edit a block with the editor matching its own variant.
pub fn edit_block(block: &ContentBlock, raw: &str) -> BlockResult<ContentBlock> {
    let edited = match block.tag() {
        BlockTag::Markdown => edit_markdown(block, raw),
        BlockTag::Code => edit_code(block, raw),
        BlockTag::Aside => edit_aside(block, raw),
    }?;
    debug!(block = %edited.id, tag = %edited.tag(), "edited block");
    Ok(edited)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id() -> BlockId {
        BlockId::from("b1")
    }

    #[test]
    fn create_code_defaults_to_text() {
        let block = create_block(id(), BlockTag::Code, "print('hi')").unwrap();
        assert_eq!(block.language(), Some("text"));
        assert_eq!(block.content, "print('hi')");
    }

    #[test]
    fn create_code_uses_pragma_language() {
        let block = create_block(id(), BlockTag::Code, "#language= python \nprint('hi')").unwrap();
        assert_eq!(block.language(), Some("python"));
        assert_eq!(block.content, "print('hi')");
    }

    #[test]
    fn create_code_rejects_empty_language() {
        let err = create_block(id(), BlockTag::Code, "#language=\nx").unwrap_err();
        assert_eq!(err, BlockError::Validation("language required".into()));

        let err = create_block(id(), BlockTag::Code, "#language=   \nx").unwrap_err();
        assert!(matches!(err, BlockError::Validation(_)));
    }

    #[test]
    fn create_markdown_strips_and_ignores_options() {
        let block = create_block(id(), BlockTag::Markdown, "#language=rust\n# Title").unwrap();
        assert_eq!(block.tag(), BlockTag::Markdown);
        assert_eq!(block.content, "# Title");
        assert_eq!(block.language(), None);
    }

    #[test]
    fn create_aside() {
        let block = create_block(id(), BlockTag::Aside, "a side note").unwrap();
        assert_eq!(block.tag(), BlockTag::Aside);
        assert_eq!(block.content, "a side note");
    }

    #[test]
    fn parse_tag_unknown() {
        assert_eq!(parse_tag("code").unwrap(), BlockTag::Code);
        assert_eq!(
            parse_tag("gallery").unwrap_err(),
            BlockError::UnknownBlockType("gallery".into())
        );
    }

    #[test]
    fn edit_code_keeps_previous_language() {
        let block = ContentBlock::code(id(), "old", "rust");
        let edited = edit_block(&block, "new body").unwrap();
        assert_eq!(edited.language(), Some("rust"));
        assert_eq!(edited.content, "new body");
        assert_eq!(edited.id, block.id);
    }

    #[test]
    fn edit_code_changes_language() {
        let block = ContentBlock::code(id(), "old", "rust");
        let edited = edit_block(&block, "#language=go\npackage main").unwrap();
        assert_eq!(edited.language(), Some("go"));
        assert_eq!(edited.content, "package main");
    }

    #[test]
    fn edit_code_rejects_blank_language() {
        let block = ContentBlock::code(id(), "old", "rust");
        let err = edit_block(&block, "#language= \nx").unwrap_err();
        assert!(matches!(err, BlockError::Validation(_)));
    }

    #[test]
    fn edit_preserves_classes() {
        let block = ContentBlock::markdown(id(), "old").with_classes("lead");
        let edited = edit_block(&block, "new").unwrap();
        assert_eq!(edited.classes.as_deref(), Some("lead"));
        assert_eq!(edited.content, "new");
    }

    #[test]
    fn wrong_editor_is_type_mismatch() {
        let block = ContentBlock::markdown(id(), "text");
        let err = edit_code(&block, "x").unwrap_err();
        assert_eq!(
            err,
            BlockError::TypeMismatch {
                expected: BlockTag::Code,
                actual: BlockTag::Markdown
            }
        );
        assert_eq!(err.to_string(), "Block is not a code block");

        let err = edit_aside(&block, "x").unwrap_err();
        assert_eq!(err.to_string(), "Block is not an aside block");

        let code = ContentBlock::code(id(), "x", "rust");
        assert_eq!(
            edit_markdown(&code, "x").unwrap_err().to_string(),
            "Block is not a markdown block"
        );
    }

    #[test]
    fn edit_never_changes_variant() {
        for block in [
            ContentBlock::markdown(id(), "m"),
            ContentBlock::code(id(), "c", "c"),
            ContentBlock::aside(id(), "a"),
        ] {
            let edited = edit_block(&block, "#language=rust\nbody").unwrap();
            assert_eq!(edited.tag(), block.tag());
        }
    }
}
