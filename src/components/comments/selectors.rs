//! Read-only views over `CommentsState`.

use super::CommentsState;
use crate::view_model::{Comment, CommentId, PostId};

pub fn get_comment<'a>(state: &'a CommentsState, id: CommentId) -> Option<&'a Comment> {
    state.items.get(&id)
}

/// Comments for `post_id` in list order, or `None` if nothing has been
/// received for that post yet. `Some(vec![])` means the post has no comments.
/// Ids that don't resolve to a known comment are skipped.
pub fn get_comments_for_post(state: &CommentsState, post_id: PostId) -> Option<Vec<&Comment>> {
    let ids = state.items_on_post.get(&post_id)?;
    Some(
        ids.iter()
            .filter_map(|id| get_comment(state, *id))
            .collect(),
    )
}

pub fn is_requesting_comments_for_post(state: &CommentsState, post_id: PostId) -> bool {
    state.requests.get(&post_id).copied().unwrap_or_default()
}

/// 0 when the post was never fetched
pub fn get_total_comments_for_post(state: &CommentsState, post_id: PostId) -> u64 {
    state.totals.get(&post_id).copied().unwrap_or_default()
}

pub fn is_submitting_comment_on_post(state: &CommentsState, post_id: PostId) -> bool {
    state.is_submitting.get(&post_id).copied().unwrap_or_default()
}
