use im::{HashMap, Vector};

use crate::view_model::{Comment, CommentId, PostId};

/// Normalized comments: every comment is stored once in `items`, posts only
/// refer to comments by id.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CommentsState {
    /// All comments ever received, for all posts
    pub items: HashMap<CommentId, Comment>,
    /// Per post, the comment ids in server order. Submitted comments are appended.
    pub items_on_post: HashMap<PostId, Vector<CommentId>>,
    /// Per post, whether a fetch is in flight
    pub requests: HashMap<PostId, bool>,
    /// Per post, the comment count last reported by the server
    pub totals: HashMap<PostId, u64>,
    /// Per post, whether a submission is in flight
    pub is_submitting: HashMap<PostId, bool>,
}
