use async_trait::async_trait;
use folio_protocol::{
    endpoints, AddBlockRequest, BlockResponse, CreatePostRequest, CreatePostResponse, ErrorBody,
    MoveBlockRequest, SuccessResponse, UpdateBlockRequest,
};
use folio_types::{BlockId, ContentBlock, Direction, Post, PostId};
use reqwest::{Client, Method, Response, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::api::ContentApi;
use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::retry::{with_retry, RetryPolicy};

/// [`ContentApi`] over HTTP.
#[derive(Clone, Debug)]
pub struct HttpContentApi {
    client: Client,
    config: ClientConfig,
}

impl HttpContentApi {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Append percent-encoded path segments to the base URL.
    fn url(&self, segments: &[&str]) -> ClientResult<Url> {
        let mut url = Url::parse(&self.config.base_url)
            .map_err(|e| ClientError::Config(format!("invalid base url {}: {e}", self.config.base_url)))?;
        url.path_segments_mut()
            .map_err(|_| ClientError::Config(format!("base url {} cannot carry a path", self.config.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send_once<T: DeserializeOwned>(
        &self,
        method: Method,
        url: &Url,
        body: Option<&Value>,
    ) -> ClientResult<T> {
        let mut request = self.client.request(method, url.clone());
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await?;
        decode_response(response).await
    }

    async fn request<T: DeserializeOwned>(
        &self,
        policy: RetryPolicy,
        method: Method,
        segments: &[&str],
        body: Option<Value>,
    ) -> ClientResult<T> {
        let url = self.url(segments)?;
        debug!(%method, %url, "request");
        let op = format!("{method} {}", url.path());
        let (url, body) = (&url, body.as_ref());
        with_retry(&policy, &op, move || self.send_once(method.clone(), url, body)).await
    }
}

async fn decode_response<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json::<T>().await?);
    }
    let bytes = response.bytes().await?;
    let (kind, message) = match serde_json::from_slice::<ErrorBody>(&bytes) {
        Ok(body) => (Some(body.kind), body.error),
        Err(_) => (None, String::from_utf8_lossy(&bytes).into_owned()),
    };
    Err(ClientError::Api {
        status: status.as_u16(),
        kind,
        message,
    })
}

fn to_body<T: serde::Serialize>(value: &T) -> ClientResult<Value> {
    serde_json::to_value(value).map_err(|e| ClientError::Decode(e.to_string()))
}

#[async_trait]
impl ContentApi for HttpContentApi {
    async fn list_posts(&self) -> ClientResult<Vec<Post>> {
        self.request(self.config.read_policy(), Method::GET, &endpoints::posts(), None)
            .await
    }

    async fn get_post(&self, post_id: &PostId) -> ClientResult<Post> {
        self.request(self.config.read_policy(), Method::GET, &endpoints::post(post_id), None)
            .await
    }

    async fn get_post_by_slug(&self, slug: &str) -> ClientResult<Post> {
        self.request(
            self.config.read_policy(),
            Method::GET,
            &endpoints::post_by_slug(slug),
            None,
        )
        .await
    }

    async fn create_post(&self, req: &CreatePostRequest) -> ClientResult<Post> {
        let created: CreatePostResponse = self
            .request(
                self.config.create_policy(),
                Method::POST,
                &endpoints::posts(),
                Some(to_body(req)?),
            )
            .await?;
        Ok(created.post)
    }

    async fn update_block(&self, post_id: &PostId, block_id: &BlockId, raw: &str) -> ClientResult<ContentBlock> {
        let body = to_body(&UpdateBlockRequest {
            content: raw.to_string(),
        })?;
        let res: BlockResponse = self
            .request(
                self.config.mutation_policy(),
                Method::PUT,
                &endpoints::block(post_id, block_id),
                Some(body),
            )
            .await?;
        Ok(res.block)
    }

    async fn delete_block(&self, post_id: &PostId, block_id: &BlockId) -> ClientResult<()> {
        let _: SuccessResponse = self
            .request(
                self.config.delete_policy(),
                Method::DELETE,
                &endpoints::block(post_id, block_id),
                None,
            )
            .await?;
        Ok(())
    }

    async fn add_block(&self, post_id: &PostId, req: &AddBlockRequest) -> ClientResult<ContentBlock> {
        let res: BlockResponse = self
            .request(
                self.config.mutation_policy(),
                Method::POST,
                &endpoints::blocks(post_id),
                Some(to_body(req)?),
            )
            .await?;
        Ok(res.block)
    }

    async fn move_block(&self, post_id: &PostId, block_id: &BlockId, direction: Direction) -> ClientResult<ContentBlock> {
        let res: BlockResponse = self
            .request(
                self.config.mutation_policy(),
                Method::PUT,
                &endpoints::block_move(post_id, block_id),
                Some(to_body(&MoveBlockRequest { direction })?),
            )
            .await?;
        Ok(res.block)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use folio_protocol::ErrorKind;
    use folio_server::{FolioServer, ServerConfig};
    use folio_store::InMemoryPostStore;
    use folio_types::Position;
    use tokio::net::TcpListener;

    async fn spawn_server(store: Arc<InMemoryPostStore>) -> String {
        let router = FolioServer::with_store(ServerConfig::default(), store).router();
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}/api")
    }

    fn api(base_url: String) -> HttpContentApi {
        HttpContentApi::new(ClientConfig {
            retry_base_delay_ms: 1,
            ..ClientConfig::new(base_url)
        })
    }

    #[test]
    fn url_joins_base_and_path() {
        let api = HttpContentApi::new(ClientConfig::new("http://localhost:3001/api/"));
        assert_eq!(
            api.url(&endpoints::posts()).unwrap().as_str(),
            "http://localhost:3001/api/posts"
        );
        let api = HttpContentApi::new(ClientConfig::new("http://localhost:3001/api"));
        assert_eq!(
            api.url(&endpoints::post_by_slug("a/b?c#d")).unwrap().as_str(),
            "http://localhost:3001/api/posts/by-slug/a%2Fb%3Fc%23d"
        );
    }

    #[test]
    fn invalid_base_url_is_config_error() {
        let api = HttpContentApi::new(ClientConfig::new("not a url"));
        assert!(matches!(api.url(&endpoints::posts()), Err(ClientError::Config(_))));
    }

    #[tokio::test]
    async fn reserved_characters_stay_inside_one_segment() {
        let store = Arc::new(InMemoryPostStore::new());
        let api = api(spawn_server(store).await);
        let err = api.get_post_by_slug("a/b?c#d").await.unwrap_err();
        match err {
            ClientError::Api { status, kind, message } => {
                assert_eq!(status, 404);
                assert_eq!(kind, Some(ErrorKind::NotFound));
                assert_eq!(message, "Post not found: a/b?c#d");
            }
            other => panic!("unexpected error: {other}"),
        }
        let err = api.get_post(&PostId::from("x/content")).await.unwrap_err();
        assert_eq!(err.kind(), Some(ErrorKind::NotFound));
    }

    #[tokio::test]
    async fn end_to_end_against_server() {
        let store = Arc::new(InMemoryPostStore::new());
        let api = api(spawn_server(store.clone()).await);

        let post = api
            .create_post(&CreatePostRequest {
                title: "Over the Wire".into(),
                lead: String::new(),
                tags: vec![],
            })
            .await
            .unwrap();
        assert_eq!(post.slug, "over-the-wire");

        let first = api
            .add_block(
                &post.id,
                &AddBlockRequest {
                    tag: "markdown".into(),
                    content: "first".into(),
                    position: Position::After,
                    target_block_id: None,
                    language: None,
                },
            )
            .await
            .unwrap();
        let code = api
            .add_block(
                &post.id,
                &AddBlockRequest {
                    tag: "code".into(),
                    content: "#language=rust\nfn main() {}".into(),
                    position: Position::After,
                    target_block_id: Some(first.id.clone()),
                    language: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(code.language(), Some("rust"));

        let moved = api
            .move_block(&post.id, &code.id, Direction::Up)
            .await
            .unwrap();
        assert_eq!(moved.id, code.id);

        let updated = api
            .update_block(&post.id, &first.id, "changed")
            .await
            .unwrap();
        assert_eq!(updated.content, "changed");

        api.delete_block(&post.id, &code.id).await.unwrap();

        let fetched = api.get_post_by_slug("over-the-wire").await.unwrap();
        assert_eq!(fetched.content, vec![updated]);
        assert_eq!(api.list_posts().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn api_errors_carry_kind() {
        let store = Arc::new(InMemoryPostStore::new());
        let api = api(spawn_server(store).await);
        let err = api.get_post(&PostId::from("missing")).await.unwrap_err();
        match err {
            ClientError::Api { status, kind, message } => {
                assert_eq!(status, 404);
                assert_eq!(kind, Some(ErrorKind::NotFound));
                assert_eq!(message, "Post not found: missing");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn unreachable_server_is_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let api = api(format!("http://{addr}/api"));
        let err = api.list_posts().await.unwrap_err();
        assert!(err.is_retryable());
    }
}
