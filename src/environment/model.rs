use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use url::Url;

use super::error::ApiError;
use super::types::{Config, Query};
use crate::helper::{normalize_endpoint, parse_count};
use crate::view_model::{Comment, NewComment, PostId};

const COMMENTS_PATH: &str = "comments";
const NONCE_HEADER: &str = "X-WP-Nonce";
const TOTAL_HEADER: &str = "X-WP-Total";

/// The three calls the comment effects need from the REST API.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn list(&self, path: &str, query: &Query) -> Result<Vec<Comment>, ApiError>;

    /// Total number of items matching `query`, read off the response headers
    async fn head_count(&self, path: &str, query: &Query) -> Result<u64, ApiError>;

    async fn create(&self, path: &str, body: &NewComment) -> Result<Comment, ApiError>;
}

/// `Transport` over HTTP
pub struct RestTransport {
    client: reqwest::Client,
    endpoint: Url,
    nonce: Option<String>,
}

impl RestTransport {
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;
        Ok(Self {
            client,
            endpoint: normalize_endpoint(config.endpoint.clone()),
            nonce: config.nonce.clone(),
        })
    }

    fn url(&self, path: &str) -> Result<Url, ApiError> {
        self.endpoint
            .join(path.trim_start_matches('/'))
            .map_err(|e| ApiError::Network {
                message: format!("Invalid resource path {path:?}: {e}"),
                status: None,
            })
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, ApiError> {
        let builder = self.client.request(method, self.url(path)?);
        Ok(match self.nonce {
            Some(ref nonce) => builder.header(NONCE_HEADER, nonce),
            None => builder,
        })
    }
}

#[async_trait]
impl Transport for RestTransport {
    async fn list(&self, path: &str, query: &Query) -> Result<Vec<Comment>, ApiError> {
        let response = self.request(Method::GET, path)?.query(query).send().await?;
        decode(check(response).await?).await
    }

    async fn head_count(&self, path: &str, query: &Query) -> Result<u64, ApiError> {
        let response = self.request(Method::HEAD, path)?.query(query).send().await?;
        let response = check(response).await?;
        let Some(total) = response.headers().get(TOTAL_HEADER) else {
            log::warn!("No {TOTAL_HEADER} header for {path} {query:?}");
            return Ok(0);
        };
        Ok(total.to_str().map(parse_count).unwrap_or_default())
    }

    async fn create(&self, path: &str, body: &NewComment) -> Result<Comment, ApiError> {
        let response = self.request(Method::POST, path)?.json(body).send().await?;
        decode(check(response).await?).await
    }
}

async fn check(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await?;
    Err(classify_error(status.as_u16(), &body))
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status().as_u16();
    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| {
        log::debug!("Could not decode response: {e:?}");
        ApiError::Parse { status, body }
    })
}

/// The REST API reports failures as `{ "code": .., "message": .., "data": { "status": .. } }`
#[derive(Deserialize)]
struct ErrorBody {
    code: Option<String>,
    message: String,
}

fn classify_error(status: u16, body: &str) -> ApiError {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(error) => ApiError::Protocol {
            status,
            code: error.code,
            message: error.message,
        },
        Err(_) => ApiError::Parse {
            status,
            body: body.to_string(),
        },
    }
}

/// Typed access to the comments resource. Cheap to clone; every clone
/// shares the same transport.
#[derive(Clone)]
pub struct Model {
    client: Arc<dyn Transport>,
    per_page: Option<u32>,
}

impl std::fmt::Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("per_page", &self.per_page)
            .finish()
    }
}

impl Model {
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let client = RestTransport::new(config)?;
        Ok(Self {
            client: Arc::new(client),
            per_page: config.per_page,
        })
    }

    pub fn with_transport(client: Arc<dyn Transport>) -> Self {
        Self {
            client,
            per_page: None,
        }
    }

    fn query(&self, post: PostId) -> Query {
        Query::for_post(post).per_page(self.per_page)
    }

    /// Comments on `post`, oldest first
    pub async fn comments(&self, post: PostId) -> Result<Vec<Comment>, ApiError> {
        log::trace!("Comments for {post}");
        let data = self
            .client
            .list(COMMENTS_PATH, &self.query(post))
            .await
            .logged("comments")?;
        log::trace!("comments data arrived {}", data.len());
        Ok(data)
    }

    /// How many comments the server knows for `post`, independent of paging
    pub async fn total_comments(&self, post: PostId) -> Result<u64, ApiError> {
        log::trace!("Total comments for {post}");
        self.client
            .head_count(COMMENTS_PATH, &self.query(post))
            .await
            .logged("total_comments")
    }

    pub async fn post_comment(&self, comment: &NewComment) -> Result<Comment, ApiError> {
        log::trace!("Post comment on {}", comment.post);
        self.client
            .create(COMMENTS_PATH, comment)
            .await
            .logged("post_comment")
    }
}

trait ResultExt {
    fn logged(self, call: &'static str) -> Self;
}

impl<T> ResultExt for Result<T, ApiError> {
    fn logged(self, call: &'static str) -> Self {
        self.map_err(|e| {
            log::error!("API Error: {call} {e}");
            e
        })
    }
}



#[cfg(test)]
mod rest_tests {
    use std::net::TcpListener;
    use std::sync::Mutex;

    use axum::extract::RawQuery;
    use axum::http::{HeaderMap, HeaderValue, Method, StatusCode};
    use axum::response::IntoResponse;
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::{json, Value};

    use super::*;
    use crate::view_model::CommentId;

    const COMMENTS_ROUTE: &str = "/wp-json/wp/v2/comments";

    #[derive(Clone, Debug, PartialEq)]
    struct Seen {
        method: Method,
        query: Option<String>,
        nonce: Option<String>,
        body: Option<Value>,
    }

    type Log = Arc<Mutex<Vec<Seen>>>;

    fn record(
        log: &Log,
        method: Method,
        query: Option<String>,
        headers: &HeaderMap,
        body: Option<Value>,
    ) {
        let nonce = headers
            .get(NONCE_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        log.lock().unwrap().push(Seen {
            method,
            query,
            nonce,
            body,
        });
    }

    /// Runs `app` on a free local port and points a config at it
    fn serve(app: Router) -> Config {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let server = axum::Server::from_tcp(listener)
            .unwrap()
            .serve(app.into_make_service());
        tokio::spawn(server);
        Config::new(Url::parse(&format!("http://{addr}/wp-json/wp/v2")).unwrap())
    }

    /// Two comments on post 5. `total` becomes the `X-WP-Total` header.
    /// New comments get id 100 and echo the submitted fields.
    fn comments_server(log: Log, total: Option<&'static str>) -> Router {
        let list_log = log.clone();
        let list = move |method: Method, headers: HeaderMap, RawQuery(query): RawQuery| {
            let log = list_log.clone();
            async move {
                record(&log, method, query, &headers, None);
                let mut response = Json(json!([
                    { "id": 1, "post": 5, "author_name": "Ann", "content": { "rendered": "<p>first</p>" } },
                    { "id": 2, "post": 5, "author_name": "Bob", "content": { "rendered": "<p>second</p>" } }
                ]))
                .into_response();
                if let Some(total) = total {
                    response
                        .headers_mut()
                        .insert(TOTAL_HEADER, HeaderValue::from_static(total));
                }
                response
            }
        };
        let create = move |headers: HeaderMap, Json(body): Json<Value>| {
            let log = log.clone();
            async move {
                record(&log, Method::POST, None, &headers, Some(body.clone()));
                let created = json!({
                    "id": 100,
                    "post": body["post"],
                    "parent": body.get("parent").cloned().unwrap_or(json!(0)),
                    "author_name": body["author_name"],
                    "content": { "rendered": format!("<p>{}</p>", body["content"].as_str().unwrap_or_default()) }
                });
                (StatusCode::CREATED, Json(created))
            }
        };
        Router::new().route(COMMENTS_ROUTE, get(list).post(create))
    }

    /// Answers every request with the same status and raw body
    fn answering(status: StatusCode, body: &'static str) -> Router {
        Router::new().route(
            COMMENTS_ROUTE,
            get(move || async move { (status, body) }).post(move || async move { (status, body) }),
        )
    }

    #[tokio::test]
    async fn lists_and_counts_with_nonce() {
        let log = Log::default();
        let config = serve(comments_server(log.clone(), Some("7"))).with_nonce("n0nce");
        let transport = RestTransport::new(&config).unwrap();
        let query = Query::for_post(PostId(5));

        let comments = transport.list(COMMENTS_PATH, &query).await.unwrap();
        assert_eq!(
            comments.iter().map(|c| c.id).collect::<Vec<_>>(),
            vec![CommentId(1), CommentId(2)]
        );
        assert_eq!(comments[1].author_name(), Some("Bob"));
        assert_eq!(transport.head_count(COMMENTS_PATH, &query).await.unwrap(), 7);

        let seen = log.lock().unwrap().clone();
        let expected = |method| Seen {
            method,
            query: Some("post=5&order=asc".to_string()),
            nonce: Some("n0nce".to_string()),
            body: None,
        };
        assert_eq!(seen, vec![expected(Method::GET), expected(Method::HEAD)]);
    }

    #[tokio::test]
    async fn omits_nonce_when_unset_and_sends_page_size() {
        let log = Log::default();
        let config = serve(comments_server(log.clone(), Some("2")));
        let transport = RestTransport::new(&config).unwrap();
        let query = Query::for_post(PostId(5)).per_page(Some(20));

        transport.list(COMMENTS_PATH, &query).await.unwrap();

        let seen = log.lock().unwrap().clone();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].nonce, None);
        assert_eq!(seen[0].query.as_deref(), Some("post=5&order=asc&per_page=20"));
    }

    #[tokio::test]
    async fn missing_total_header_counts_zero() {
        let config = serve(comments_server(Log::default(), None));
        let transport = RestTransport::new(&config).unwrap();
        let count = transport
            .head_count(COMMENTS_PATH, &Query::for_post(PostId(5)))
            .await;
        assert_eq!(count, Ok(0));
    }

    #[tokio::test]
    async fn total_header_is_read_like_a_number_prefix() {
        let config = serve(comments_server(Log::default(), Some("12 comments")));
        let transport = RestTransport::new(&config).unwrap();
        let count = transport
            .head_count(COMMENTS_PATH, &Query::for_post(PostId(5)))
            .await;
        assert_eq!(count, Ok(12));
    }

    #[tokio::test]
    async fn creates_with_json_body() {
        let log = Log::default();
        let config = serve(comments_server(log.clone(), None)).with_nonce("n0nce");
        let transport = RestTransport::new(&config).unwrap();
        let draft = NewComment::new(PostId(5), "hello")
            .in_reply_to(CommentId(2))
            .with_author("Cy", "cy@example.org");

        let created = transport.create(COMMENTS_PATH, &draft).await.unwrap();
        assert_eq!(created.id, CommentId(100));
        assert_eq!(created.post, PostId(5));
        assert_eq!(created.rendered_content(), Some("<p>hello</p>"));
        assert_eq!(created.field("parent"), Some(&json!(2)));

        let seen = log.lock().unwrap().clone();
        assert_eq!(seen[0].nonce.as_deref(), Some("n0nce"));
        assert_eq!(
            seen[0].body,
            Some(json!({
                "post": 5,
                "content": "hello",
                "parent": 2,
                "author_name": "Cy",
                "author_email": "cy@example.org"
            }))
        );
    }

    #[tokio::test]
    async fn json_error_answer_is_protocol_error() {
        let config = serve(answering(
            StatusCode::NOT_FOUND,
            r#"{"code":"rest_post_invalid_id","message":"Invalid post ID.","data":{"status":404}}"#,
        ));
        let transport = RestTransport::new(&config).unwrap();
        let result = transport
            .list(COMMENTS_PATH, &Query::for_post(PostId(5)))
            .await;
        assert_eq!(
            result,
            Err(ApiError::Protocol {
                status: 404,
                code: Some("rest_post_invalid_id".to_string()),
                message: "Invalid post ID.".to_string(),
            })
        );

        // a HEAD answer has no body to classify
        let count = transport
            .head_count(COMMENTS_PATH, &Query::for_post(PostId(5)))
            .await;
        assert_eq!(
            count,
            Err(ApiError::Parse {
                status: 404,
                body: String::new(),
            })
        );
    }

    #[tokio::test]
    async fn other_error_answer_is_parse_error() {
        let config = serve(answering(StatusCode::BAD_GATEWAY, "<html>Bad Gateway</html>"));
        let transport = RestTransport::new(&config).unwrap();
        let result = transport
            .create(COMMENTS_PATH, &NewComment::new(PostId(5), "hello"))
            .await;
        assert_eq!(
            result,
            Err(ApiError::Parse {
                status: 502,
                body: "<html>Bad Gateway</html>".to_string(),
            })
        );
    }

    #[tokio::test]
    async fn success_with_unexpected_body_is_parse_error() {
        let config = serve(answering(StatusCode::OK, "<html>maintenance</html>"));
        let transport = RestTransport::new(&config).unwrap();
        let result = transport
            .list(COMMENTS_PATH, &Query::for_post(PostId(5)))
            .await;
        assert_eq!(
            result,
            Err(ApiError::Parse {
                status: 200,
                body: "<html>maintenance</html>".to_string(),
            })
        );
    }

    #[tokio::test]
    async fn refused_connection_is_network_error() {
        let addr = TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap();
        let config = Config::new(Url::parse(&format!("http://{addr}/wp-json/wp/v2")).unwrap());
        let transport = RestTransport::new(&config).unwrap();
        let result = transport
            .list(COMMENTS_PATH, &Query::for_post(PostId(5)))
            .await;
        assert!(matches!(result, Err(ApiError::Network { status: None, .. })));
    }
}
