//! Client side comment state for the WordPress REST API: a normalized store
//! of comments keyed by post, the fetch/submit lifecycle that fills it, and
//! read-only selectors over it.

mod app;
mod components;
mod environment;
mod helper;
mod view_model;

pub use app::{init_logging, run};
pub use components::comments::{
    reduce, reducer, request_comments, selectors, submit_comment, CommentsAction, CommentsState,
};
pub use components::query_comments::QueryComments;
pub use environment::types::{Order, Query};
pub use environment::{
    ApiError, Config, ConfigError, Environment, Model, RestTransport, Store, Transport,
};
pub use helper::parse_count;
pub use view_model::{Comment, CommentId, NewComment, PostId};
