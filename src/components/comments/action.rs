use crate::environment::ApiError;
use crate::view_model::{Comment, PostId};

/// Lifecycle of the two comment operations. Every action names the post it
/// belongs to; the reducers key all their bookkeeping on it.
#[derive(Clone, PartialEq)]
pub enum CommentsAction {
    FetchRequest {
        post_id: PostId,
    },
    FetchSuccess {
        post_id: PostId,
        /// In server order
        comments: Vec<Comment>,
        /// Total the server reports for the post, which can exceed `comments.len()`
        count: u64,
    },
    FetchFailure {
        post_id: PostId,
        error: ApiError,
    },
    SubmitRequest {
        post_id: PostId,
    },
    SubmitSuccess {
        post_id: PostId,
        comment: Comment,
    },
    SubmitFailure {
        post_id: PostId,
        error: ApiError,
    },
}

impl CommentsAction {
    pub fn post_id(&self) -> PostId {
        match self {
            Self::FetchRequest { post_id }
            | Self::FetchSuccess { post_id, .. }
            | Self::FetchFailure { post_id, .. }
            | Self::SubmitRequest { post_id }
            | Self::SubmitSuccess { post_id, .. }
            | Self::SubmitFailure { post_id, .. } => *post_id,
        }
    }
}

impl std::fmt::Debug for CommentsAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FetchRequest { post_id } => f.debug_tuple("FetchRequest").field(post_id).finish(),
            Self::FetchSuccess {
                post_id,
                comments,
                count,
            } => f
                .debug_struct("FetchSuccess")
                .field("post_id", post_id)
                .field("comments", &comments.len())
                .field("count", count)
                .finish(),
            Self::FetchFailure { post_id, error } => f
                .debug_struct("FetchFailure")
                .field("post_id", post_id)
                .field("error", error)
                .finish(),
            Self::SubmitRequest { post_id } => {
                f.debug_tuple("SubmitRequest").field(post_id).finish()
            }
            Self::SubmitSuccess { post_id, comment } => f
                .debug_struct("SubmitSuccess")
                .field("post_id", post_id)
                .field("comment", &comment.id)
                .finish(),
            Self::SubmitFailure { post_id, error } => f
                .debug_struct("SubmitFailure")
                .field("post_id", post_id)
                .field("error", error)
                .finish(),
        }
    }
}
