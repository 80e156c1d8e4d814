//! Positional operations over a post's block sequence.
//!
//! Every mutating operation is pure: it takes the post by reference and
//! returns an updated copy, leaving the input untouched. Block order is the
//! vector index, so the sequence never has gaps.

use folio_types::{BlockId, ContentBlock, Direction, Position, Post, PostId};

use crate::error::{DocumentError, DocumentResult};

/// Index of the post with the given id.
pub fn find_post(posts: &[Post], id: &PostId) -> DocumentResult<usize> {
    posts
        .iter()
        .position(|p| &p.id == id)
        .ok_or_else(|| DocumentError::PostNotFound(id.clone()))
}

/// Index of the block with the given id within `post`.
pub fn find_block(post: &Post, id: &BlockId) -> DocumentResult<usize> {
    post.content
        .iter()
        .position(|b| &b.id == id)
        .ok_or_else(|| DocumentError::BlockNotFound(id.clone()))
}

fn with_content(post: &Post, content: Vec<ContentBlock>) -> Post {
    Post {
        content,
        ..post.clone()
    }
}

/// Replace the block at `index`.
///
/// The replacement must keep the id of the block it replaces or use an id
/// not present elsewhere in the post.
pub fn replace_block_at(post: &Post, index: usize, block: ContentBlock) -> DocumentResult<Post> {
    let len = post.content.len();
    if index >= len {
        return Err(DocumentError::IndexOutOfBounds { index, len });
    }
    let clash = post
        .content
        .iter()
        .enumerate()
        .any(|(i, b)| i != index && b.id == block.id);
    if clash {
        return Err(DocumentError::DuplicateBlock(block.id));
    }
    let mut content = post.content.clone();
    content[index] = block;
    Ok(with_content(post, content))
}

/// Insert `block` at `index`; `index == len` appends.
pub fn insert_block_at(post: &Post, index: usize, block: ContentBlock) -> DocumentResult<Post> {
    let len = post.content.len();
    if index > len {
        return Err(DocumentError::IndexOutOfBounds { index, len });
    }
    if post.content.iter().any(|b| b.id == block.id) {
        return Err(DocumentError::DuplicateBlock(block.id));
    }
    let mut content = post.content.clone();
    content.insert(index, block);
    Ok(with_content(post, content))
}

/// Remove the block at `index`.
pub fn delete_block_at(post: &Post, index: usize) -> DocumentResult<Post> {
    let len = post.content.len();
    if index >= len {
        return Err(DocumentError::IndexOutOfBounds { index, len });
    }
    let mut content = post.content.clone();
    content.remove(index);
    Ok(with_content(post, content))
}

/// Move a block one step up or down.
///
/// Implemented as delete-then-insert at the target index, which for a
/// single step swaps the block with its neighbour and leaves every other
/// block where it was.
pub fn move_block(post: &Post, block_id: &BlockId, direction: Direction) -> DocumentResult<Post> {
    let current = find_block(post, block_id)?;
    let target = direction
        .step(current)
        .filter(|&t| t < post.content.len())
        .ok_or_else(|| DocumentError::OutOfRange {
            block: block_id.clone(),
            direction,
        })?;

    let block = post.content[current].clone();
    let without = delete_block_at(post, current)?;
    insert_block_at(&without, target, block)
}

/// Insert `block` next to `target`, or at the front when there is no target.
///
/// Without a target the block is prepended regardless of `position`.
pub fn insert_block_relative(
    post: &Post,
    block: ContentBlock,
    position: Position,
    target: Option<&BlockId>,
) -> DocumentResult<Post> {
    let index = match target {
        None => 0,
        Some(target) => {
            let target_index = find_block(post, target)
                .map_err(|_| DocumentError::TargetNotFound(target.clone()))?;
            match position {
                Position::Before => target_index,
                Position::After => target_index + 1,
            }
        }
    };
    insert_block_at(post, index, block)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(id: &str) -> ContentBlock {
        ContentBlock::markdown(BlockId::from(id), id)
    }

    fn abc() -> Post {
        let mut post = Post::new("Test", "", vec![]);
        post.content = vec![block("A"), block("B"), block("C")];
        post
    }

    fn order(post: &Post) -> Vec<String> {
        post.content.iter().map(|b| b.id.to_string()).collect()
    }

    #[test]
    fn find_post_and_block() {
        let post = abc();
        let posts = vec![Post::new("Other", "", vec![]), post.clone()];
        assert_eq!(find_post(&posts, &post.id).unwrap(), 1);
        assert_eq!(find_block(&post, &BlockId::from("C")).unwrap(), 2);

        let missing = PostId::from("nope");
        assert_eq!(
            find_post(&posts, &missing),
            Err(DocumentError::PostNotFound(missing))
        );
        assert!(matches!(
            find_block(&post, &BlockId::from("Z")),
            Err(DocumentError::BlockNotFound(_))
        ));
    }

    #[test]
    fn move_middle_up_and_down() {
        let post = abc();
        let up = move_block(&post, &BlockId::from("B"), Direction::Up).unwrap();
        assert_eq!(order(&up), ["B", "A", "C"]);
        let down = move_block(&post, &BlockId::from("B"), Direction::Down).unwrap();
        assert_eq!(order(&down), ["A", "C", "B"]);
        // input untouched
        assert_eq!(order(&post), ["A", "B", "C"]);
    }

    #[test]
    fn move_past_edges_is_out_of_range() {
        let post = abc();
        assert!(matches!(
            move_block(&post, &BlockId::from("A"), Direction::Up),
            Err(DocumentError::OutOfRange { .. })
        ));
        assert!(matches!(
            move_block(&post, &BlockId::from("C"), Direction::Down),
            Err(DocumentError::OutOfRange { .. })
        ));
    }

    #[test]
    fn move_missing_block() {
        assert!(matches!(
            move_block(&abc(), &BlockId::from("Q"), Direction::Up),
            Err(DocumentError::BlockNotFound(_))
        ));
    }

    #[test]
    fn insert_relative_positions() {
        let post = abc();
        let b = BlockId::from("B");
        let before = insert_block_relative(&post, block("N"), Position::Before, Some(&b)).unwrap();
        assert_eq!(order(&before), ["A", "N", "B", "C"]);
        let after = insert_block_relative(&post, block("N"), Position::After, Some(&b)).unwrap();
        assert_eq!(order(&after), ["A", "B", "N", "C"]);
        for position in [Position::Before, Position::After] {
            let front = insert_block_relative(&post, block("N"), position, None).unwrap();
            assert_eq!(order(&front), ["N", "A", "B", "C"]);
        }
    }

    #[test]
    fn insert_relative_missing_target() {
        let err = insert_block_relative(&abc(), block("N"), Position::After, Some(&BlockId::from("Z")))
            .unwrap_err();
        assert_eq!(err, DocumentError::TargetNotFound(BlockId::from("Z")));
    }

    #[test]
    fn insert_at_bounds() {
        let post = abc();
        let appended = insert_block_at(&post, 3, block("N")).unwrap();
        assert_eq!(order(&appended), ["A", "B", "C", "N"]);
        assert_eq!(
            insert_block_at(&post, 4, block("N")).unwrap_err(),
            DocumentError::IndexOutOfBounds { index: 4, len: 3 }
        );
    }

    #[test]
    fn insert_rejects_duplicate_id() {
        assert_eq!(
            insert_block_at(&abc(), 0, block("B")).unwrap_err(),
            DocumentError::DuplicateBlock(BlockId::from("B"))
        );
    }

    #[test]
    fn delete_at() {
        let post = abc();
        let deleted = delete_block_at(&post, 1).unwrap();
        assert_eq!(order(&deleted), ["A", "C"]);
        assert!(matches!(
            delete_block_at(&post, 3),
            Err(DocumentError::IndexOutOfBounds { .. })
        ));
    }

    #[test]
    fn replace_at() {
        let post = abc();
        let replaced =
            replace_block_at(&post, 1, ContentBlock::markdown(BlockId::from("B"), "new")).unwrap();
        assert_eq!(replaced.content[1].content, "new");
        assert_eq!(order(&replaced), ["A", "B", "C"]);

        assert!(matches!(
            replace_block_at(&post, 1, block("C")),
            Err(DocumentError::DuplicateBlock(_))
        ));
        assert!(matches!(
            replace_block_at(&post, 9, block("X")),
            Err(DocumentError::IndexOutOfBounds { .. })
        ));
    }
}
