use std::future::Future;

use super::CommentsAction;
use crate::environment::{ApiError, Environment};
use crate::view_model::{Comment, NewComment, PostId};

/// Marks `post_id` as loading right away, then returns the work that loads
/// its comments and the server side total. The outcome only ever shows up in
/// the store as `FetchSuccess` or `FetchFailure`.
///
/// Nothing stops two fetches for the same post from running at once; check
/// `is_requesting_comments_for_post` first if that matters.
pub fn request_comments(
    environment: &Environment,
    post_id: PostId,
) -> impl Future<Output = ()> + Send + 'static {
    environment
        .store
        .dispatch(CommentsAction::FetchRequest { post_id });
    let model = environment.model.clone();
    let store = environment.store.clone();
    async move {
        let result = async {
            let comments = model.comments(post_id).await?;
            let count = model.total_comments(post_id).await?;
            Ok::<_, ApiError>((comments, count))
        }
        .await;
        let action = match result {
            Ok((comments, count)) => CommentsAction::FetchSuccess {
                post_id,
                comments,
                count,
            },
            Err(error) => CommentsAction::FetchFailure { post_id, error },
        };
        store.dispatch(action);
    }
}

/// Marks the draft's post as submitting right away, then returns the work
/// that creates the comment. The result is dispatched to the store before it
/// is handed back, so by the time the caller sees an `Err` the submitting
/// flag is already cleared.
pub fn submit_comment(
    environment: &Environment,
    comment: NewComment,
) -> impl Future<Output = Result<Comment, ApiError>> + Send + 'static {
    let post_id = comment.post;
    environment
        .store
        .dispatch(CommentsAction::SubmitRequest { post_id });
    let model = environment.model.clone();
    let store = environment.store.clone();
    async move {
        match model.post_comment(&comment).await {
            Ok(created) => {
                store.dispatch(CommentsAction::SubmitSuccess {
                    post_id,
                    comment: created.clone(),
                });
                Ok(created)
            }
            Err(error) => {
                store.dispatch(CommentsAction::SubmitFailure {
                    post_id,
                    error: error.clone(),
                });
                Err(error)
            }
        }
    }
}
