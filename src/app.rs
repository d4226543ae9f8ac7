use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use futures_util::future::join_all;
use structopt::StructOpt;
use url::Url;

use crate::components::comments::selectors::{get_comments_for_post, get_total_comments_for_post};
use crate::components::comments::{
    request_comments, submit_comment, CommentsAction, CommentsState,
};
use crate::environment::{ApiError, Config, Environment};
use crate::helper::normalize_endpoint;
use crate::view_model::{CommentId, NewComment, PostId};

#[derive(StructOpt)]
#[structopt(name = "wp-comments", about = "Read and write comments on a WordPress site")]
struct Opt {
    /// Configuration file, defaults to the platform config directory
    #[structopt(short, long, parse(from_os_str))]
    config: Option<PathBuf>,

    /// Base url of the REST API, e.g. https://example.org/wp-json/wp/v2/
    #[structopt(short, long)]
    endpoint: Option<Url>,

    /// Nonce sent as X-WP-Nonce
    #[structopt(long)]
    nonce: Option<String>,

    #[structopt(subcommand)]
    cmd: Command,
}

#[derive(StructOpt)]
enum Command {
    /// Save endpoint and nonce to the configuration file
    Configure,
    /// Print the comments on one or more posts
    List {
        #[structopt(required = true)]
        post_ids: Vec<u64>,
    },
    /// Submit a new comment
    Submit {
        post_id: u64,

        #[structopt(long)]
        content: String,

        #[structopt(long)]
        author_name: Option<String>,

        #[structopt(long)]
        author_email: Option<String>,

        /// Id of the comment this one replies to
        #[structopt(long)]
        parent: Option<u64>,
    },
}

pub fn init_logging() {
    use env_logger::Env;
    use std::io::Write;
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            writeln!(
                buf,
                "{}:{} {} [{}] - {}",
                record.file().unwrap_or("unknown"),
                record.line().unwrap_or(0),
                chrono::Local::now().format("%Y-%m-%dT%H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .target(env_logger::Target::Stdout)
        .init();
}

pub async fn run() -> anyhow::Result<()> {
    init_logging();
    let opt = Opt::from_args();

    let path = match opt.config {
        Some(ref path) => path.clone(),
        None => Config::default_path()?,
    };
    let config = effective_config(&opt, &path)?;
    log::debug!("Using {}", config.endpoint);

    match opt.cmd {
        Command::Configure => {
            config
                .write(&path)
                .with_context(|| format!("saving configuration to {}", path.display()))?;
            println!("Saved configuration to {}", path.display());
        }
        Command::List { post_ids } => {
            let environment = Environment::from_config(&config)?;
            let posts: Vec<PostId> = post_ids.into_iter().map(PostId).collect();
            for report in list_posts(&environment, &posts).await {
                print!("{report}");
            }
        }
        Command::Submit {
            post_id,
            content,
            author_name,
            author_email,
            parent,
        } => {
            let environment = Environment::from_config(&config)?;
            let draft = NewComment {
                post: PostId(post_id),
                content,
                parent: parent.map(CommentId),
                author_name,
                author_email,
                author_url: None,
            };
            let comment = submit_comment(&environment, draft)
                .await
                .with_context(|| format!("submitting comment on post {post_id}"))?;
            println!("Created comment {} on post {}", comment.id, comment.post);
        }
    }
    Ok(())
}

/// The stored configuration with command line overrides applied
fn effective_config(opt: &Opt, path: &Path) -> anyhow::Result<Config> {
    let stored = Config::read(path)?;
    let mut config = match (stored, opt.endpoint.clone()) {
        (Some(mut config), Some(endpoint)) => {
            config.endpoint = normalize_endpoint(endpoint);
            config
        }
        (None, Some(endpoint)) => Config::new(endpoint),
        (Some(config), None) => config,
        (None, None) => bail!(
            "No endpoint configured in {}. Pass --endpoint",
            path.display()
        ),
    };
    if let Some(ref nonce) = opt.nonce {
        config.nonce = Some(nonce.clone());
    }
    Ok(config)
}

/// Fetches all `posts` at once and describes each one, failures included
async fn list_posts(environment: &Environment, posts: &[PostId]) -> Vec<String> {
    let actions = environment.store.subscribe_actions();
    join_all(posts.iter().map(|post| request_comments(environment, *post))).await;

    let failures: HashMap<PostId, ApiError> = actions
        .try_iter()
        .filter_map(|action| match action {
            CommentsAction::FetchFailure { post_id, error } => Some((post_id, error)),
            _ => None,
        })
        .collect();
    let state = environment.store.state();
    posts
        .iter()
        .map(|post| describe_post(&state, *post, failures.get(post)))
        .collect()
}

fn describe_post(state: &CommentsState, post: PostId, failure: Option<&ApiError>) -> String {
    if let Some(error) = failure {
        return format!("Post {post}: could not load comments: {error}\n");
    }
    let Some(comments) = get_comments_for_post(state, post) else {
        return format!("Post {post}: no comments loaded\n");
    };
    let mut report = format!(
        "Post {post}: {} comments\n",
        get_total_comments_for_post(state, post)
    );
    for comment in comments {
        report.push_str(&format!(
            "  #{} {}: {}\n",
            comment.id,
            comment.author_name().unwrap_or("anonymous"),
            comment.rendered_content().unwrap_or_default().trim()
        ));
    }
    report
}
