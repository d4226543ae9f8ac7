use tokio::task::JoinHandle;

use crate::components::comments::request_comments;
use crate::components::comments::selectors::is_requesting_comments_for_post;
use crate::environment::Environment;
use crate::view_model::PostId;

/// Keeps the comments of one post loaded. Call `on_mount` when the owner
/// appears and `on_update` whenever the post it shows may have changed.
/// It renders nothing; fetching is all it does.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct QueryComments {
    post_id: PostId,
}

impl QueryComments {
    pub fn new(post_id: PostId) -> Self {
        Self { post_id }
    }

    pub fn post_id(&self) -> PostId {
        self.post_id
    }

    pub fn on_mount(&self, environment: &Environment) -> Option<JoinHandle<()>> {
        self.request(environment)
    }

    /// Only fetches if `post_id` differs from the current one
    pub fn on_update(
        &mut self,
        environment: &Environment,
        post_id: PostId,
    ) -> Option<JoinHandle<()>> {
        if self.post_id == post_id {
            return None;
        }
        self.post_id = post_id;
        self.request(environment)
    }

    /// Spawns a fetch onto the current tokio runtime, unless one is already
    /// running for this post.
    fn request(&self, environment: &Environment) -> Option<JoinHandle<()>> {
        let post_id = self.post_id;
        let requesting = environment
            .store
            .with(|state| is_requesting_comments_for_post(state, post_id));
        if requesting {
            log::debug!("Already requesting comments for {post_id}");
            return None;
        }
        log::debug!("Request comments for {post_id}");
        Some(tokio::spawn(request_comments(environment, post_id)))
    }
}
