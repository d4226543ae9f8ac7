use im::{HashMap, Vector};

use super::{CommentsAction, CommentsState};
use crate::view_model::{Comment, CommentId, PostId};

/// Applies `action` to every part of the state. The parts don't know about
/// each other; each one only looks at the actions it cares about.
pub fn reduce(state: &CommentsState, action: &CommentsAction) -> CommentsState {
    CommentsState {
        items: items(&state.items, action),
        items_on_post: items_on_post(&state.items_on_post, action),
        requests: requests(&state.requests, action),
        totals: totals(&state.totals, action),
        is_submitting: is_submitting(&state.is_submitting, action),
    }
}

/// Known comments by id. Incoming comments overwrite older copies with the same id.
pub fn items(
    state: &HashMap<CommentId, Comment>,
    action: &CommentsAction,
) -> HashMap<CommentId, Comment> {
    match action {
        CommentsAction::FetchSuccess { comments, .. } => {
            let mut next = state.clone();
            next.extend(comments.iter().map(|c| (c.id, c.clone())));
            next
        }
        CommentsAction::SubmitSuccess { comment, .. } => state.update(comment.id, comment.clone()),
        CommentsAction::FetchRequest { .. }
        | CommentsAction::FetchFailure { .. }
        | CommentsAction::SubmitRequest { .. }
        | CommentsAction::SubmitFailure { .. } => state.clone(),
    }
}

/// Comment ids per post. A fetch replaces the whole list for its post, a
/// submission appends to the end of it.
pub fn items_on_post(
    state: &HashMap<PostId, Vector<CommentId>>,
    action: &CommentsAction,
) -> HashMap<PostId, Vector<CommentId>> {
    match action {
        CommentsAction::FetchSuccess {
            post_id, comments, ..
        } => state.update(*post_id, comments.iter().map(|c| c.id).collect()),
        CommentsAction::SubmitSuccess { post_id, comment } => {
            // newest last, even when the server order would put it elsewhere
            let mut ids = state.get(post_id).cloned().unwrap_or_default();
            ids.push_back(comment.id);
            state.update(*post_id, ids)
        }
        CommentsAction::FetchRequest { .. }
        | CommentsAction::FetchFailure { .. }
        | CommentsAction::SubmitRequest { .. }
        | CommentsAction::SubmitFailure { .. } => state.clone(),
    }
}

/// Fetch in flight per post. Overlapping fetches for one post are not
/// deduplicated; the first one to finish clears the flag.
pub fn requests(state: &HashMap<PostId, bool>, action: &CommentsAction) -> HashMap<PostId, bool> {
    match action {
        CommentsAction::FetchRequest { post_id } => state.update(*post_id, true),
        CommentsAction::FetchSuccess { post_id, .. }
        | CommentsAction::FetchFailure { post_id, .. } => state.update(*post_id, false),
        CommentsAction::SubmitRequest { .. }
        | CommentsAction::SubmitSuccess { .. }
        | CommentsAction::SubmitFailure { .. } => state.clone(),
    }
}

/// Submission in flight per post
pub fn is_submitting(
    state: &HashMap<PostId, bool>,
    action: &CommentsAction,
) -> HashMap<PostId, bool> {
    match action {
        CommentsAction::SubmitRequest { post_id } => state.update(*post_id, true),
        CommentsAction::SubmitSuccess { post_id, .. }
        | CommentsAction::SubmitFailure { post_id, .. } => state.update(*post_id, false),
        CommentsAction::FetchRequest { .. }
        | CommentsAction::FetchSuccess { .. }
        | CommentsAction::FetchFailure { .. } => state.clone(),
    }
}

/// Server side comment count per post. A fetch overwrites it, a successful
/// submission counts up by one. It never goes down.
pub fn totals(state: &HashMap<PostId, u64>, action: &CommentsAction) -> HashMap<PostId, u64> {
    match action {
        CommentsAction::FetchSuccess { post_id, count, .. } => state.update(*post_id, *count),
        CommentsAction::SubmitSuccess { post_id, .. } => {
            let current = state.get(post_id).copied().unwrap_or_default();
            state.update(*post_id, current.saturating_add(1))
        }
        CommentsAction::FetchRequest { .. }
        | CommentsAction::FetchFailure { .. }
        | CommentsAction::SubmitRequest { .. }
        | CommentsAction::SubmitFailure { .. } => state.clone(),
    }
}
