use std::time::Duration;

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use spdlog::{debug, info};

use crate::config::{ContentApi, OrderDirection};
use crate::error::{redact_url, FetchError, FetchResult};
use crate::paginator::PageSource;
use crate::post::Page;

#[derive(Deserialize)]
struct ApiRoot {
    refs: Vec<ApiRef>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiRef {
    #[serde(rename = "ref")]
    reference: String,
    #[serde(default)]
    is_master_ref: bool,
}

/// Which documents the first page asks for and in which order.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchQuery {
    pub document_type: String,
    pub page_size: u32,
    pub order_field: String,
    pub order_direction: OrderDirection,
}

impl SearchQuery {
    pub fn from(cfg: &ContentApi) -> Self {
        SearchQuery {
            document_type: cfg.document_type.clone(),
            page_size: cfg.page_size,
            order_field: cfg.order_field.clone(),
            order_direction: cfg.order_direction,
        }
    }

    pub fn predicate(&self) -> String {
        format!(r#"[[at(document.type,"{}")]]"#, self.document_type)
    }

    pub fn orderings(&self) -> String {
        format!("[document.{} {}]", self.order_field, self.order_direction.as_str())
    }

    fn params(&self, master_ref: &str) -> Vec<(&'static str, String)> {
        vec![
            ("ref", master_ref.to_string()),
            ("q", self.predicate()),
            ("pageSize", self.page_size.to_string()),
            ("orderings", self.orderings()),
        ]
    }
}

pub struct ContentClient {
    client: Client,
    endpoint: String,
    access_token: Option<String>,
    query: SearchQuery,
}

impl ContentClient {
    pub fn new(cfg: &ContentApi) -> FetchResult<Self> {
        let endpoint = cfg.endpoint.trim_end_matches('/').to_string();
        let client = Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()
            .map_err(|source| FetchError::http(&endpoint, source))?;

        Ok(ContentClient {
            client,
            endpoint,
            access_token: cfg.access_token.clone(),
            query: SearchQuery::from(cfg),
        })
    }

    fn with_token(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.access_token {
            Some(ref token) => builder.query(&[("access_token", token.as_str())]),
            None => builder,
        }
    }

    async fn send_json<T: DeserializeOwned>(url: &str, builder: RequestBuilder) -> FetchResult<T> {
        let response = builder
            .send()
            .await
            .map_err(|source| FetchError::http(url, source))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::status(url, status));
        }

        let body = response
            .text()
            .await
            .map_err(|source| FetchError::http(url, source))?;

        serde_json::from_str(&body).map_err(|e| FetchError::decode(url, e.to_string()))
    }

    /// Reads the API root document and returns the ref of the published content.
    pub async fn master_ref(&self) -> FetchResult<String> {
        let builder = self.with_token(self.client.get(&self.endpoint));
        let root: ApiRoot = Self::send_json(&self.endpoint, builder).await?;

        root.refs
            .into_iter()
            .find(|r| r.is_master_ref)
            .map(|r| r.reference)
            .ok_or_else(|| FetchError::NoMasterRef(redact_url(&self.endpoint)))
    }

    pub async fn first_page(&self) -> FetchResult<Page> {
        let master_ref = self.master_ref().await?;
        debug!("Using master ref {}", master_ref);

        let url = format!("{}/documents/search", self.endpoint);
        let builder = self.client.get(&url).query(&self.query.params(&master_ref));
        let builder = self.with_token(builder);
        let page: Page = Self::send_json(&url, builder).await?;

        info!("Loaded first page of {}: {} posts, next_page={:?}", self.query.document_type, page.results.len(), page.next_page.as_deref().map(redact_url));
        Ok(page)
    }
}

impl PageSource for ContentClient {
    async fn fetch_page(&self, cursor: &str) -> FetchResult<Page> {
        debug!("Fetching next page {}", redact_url(cursor));
        let page: Page = Self::send_json(cursor, self.client.get(cursor)).await?;
        info!("Loaded page: {} posts, next_page={:?}", page.results.len(), page.next_page.as_deref().map(redact_url));
        Ok(page)
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::config::LoadMode;
    use crate::test_data::{API_ROOT_JSON, FIRST_PAGE_JSON, LAST_PAGE_JSON};

    use super::*;

    fn api_config(endpoint: String, access_token: Option<&str>) -> ContentApi {
        ContentApi {
            endpoint,
            access_token: access_token.map(str::to_string),
            document_type: "posts".to_string(),
            page_size: 2,
            order_field: "last_publication_date".to_string(),
            order_direction: OrderDirection::Desc,
            load_mode: LoadMode::Startup,
            timeout_secs: 5,
        }
    }

    fn json(body: &str) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_raw(body, "application/json")
    }

    async fn mount_root(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/api/v2"))
            .respond_with(json(API_ROOT_JSON))
            .mount(server)
            .await;
    }

    #[test]
    fn test_search_query() {
        let query = SearchQuery::from(&api_config("http://localhost".to_string(), None));
        assert_eq!(query.predicate(), r#"[[at(document.type,"posts")]]"#);
        assert_eq!(query.orderings(), "[document.last_publication_date desc]");
    }

    #[tokio::test]
    async fn test_master_ref() {
        let server = MockServer::start().await;
        mount_root(&server).await;

        let client = ContentClient::new(&api_config(format!("{}/api/v2/", server.uri()), None)).unwrap();
        assert_eq!(client.master_ref().await.unwrap(), "YF0");
    }

    #[tokio::test]
    async fn test_missing_master_ref() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v2"))
            .respond_with(json(r#"{"refs": [{"id": "preview", "ref": "X", "isMasterRef": false}]}"#))
            .mount(&server)
            .await;

        let client = ContentClient::new(&api_config(format!("{}/api/v2", server.uri()), None)).unwrap();
        assert!(matches!(client.master_ref().await, Err(FetchError::NoMasterRef(_))));
    }

    #[tokio::test]
    async fn test_first_page_query() {
        let server = MockServer::start().await;
        mount_root(&server).await;
        Mock::given(method("GET"))
            .and(path("/api/v2/documents/search"))
            .and(query_param("ref", "YF0"))
            .and(query_param("q", r#"[[at(document.type,"posts")]]"#))
            .and(query_param("pageSize", "2"))
            .and(query_param("orderings", "[document.last_publication_date desc]"))
            .and(query_param("access_token", "secret"))
            .respond_with(json(FIRST_PAGE_JSON))
            .expect(1)
            .mount(&server)
            .await;

        let client = ContentClient::new(&api_config(format!("{}/api/v2", server.uri()), Some("secret"))).unwrap();
        let page = client.first_page().await.unwrap();
        assert_eq!(page.results.len(), 2);
        assert_eq!(page.results[0].data.title, "Como utilizar Hooks");
        assert!(page.next_page.is_some());
    }

    #[tokio::test]
    async fn test_fetch_cursor() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v2/documents/search"))
            .and(query_param("page", "2"))
            .respond_with(json(LAST_PAGE_JSON))
            .expect(1)
            .mount(&server)
            .await;

        let client = ContentClient::new(&api_config(format!("{}/api/v2", server.uri()), None)).unwrap();
        let cursor = format!("{}/api/v2/documents/search?ref=YF0&page=2&pageSize=2", server.uri());
        let page = client.fetch_page(&cursor).await.unwrap();
        assert_eq!(page.next_page, None);
        assert_eq!(page.results[0].data.title, "Rascunho");
    }

    #[tokio::test]
    async fn test_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = ContentClient::new(&api_config(format!("{}/api/v2", server.uri()), None)).unwrap();
        match client.first_page().await {
            Err(FetchError::Status { status, .. }) => assert_eq!(status.as_u16(), 500),
            other => panic!("Unexpected result {:?}", other.map(|p| p.results.len())),
        }
    }

    #[tokio::test]
    async fn test_invalid_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(json(r#"{"results": "nope"}"#))
            .mount(&server)
            .await;

        let client = ContentClient::new(&api_config(format!("{}/api/v2", server.uri()), None)).unwrap();
        let cursor = format!("{}/api/v2/documents/search?page=2", server.uri());
        assert!(matches!(client.fetch_page(&cursor).await, Err(FetchError::Decode { .. })));
    }

    #[tokio::test]
    async fn test_transport_error_hides_token() {
        let client = ContentClient::new(&api_config("http://127.0.0.1:1/api/v2".to_string(), Some("SECRET_TOKEN"))).unwrap();
        let err = client.first_page().await.err().unwrap();
        assert!(matches!(err, FetchError::Http { .. }));
        assert!(!format!("{}", err).contains("SECRET_TOKEN"));
        assert!(!format!("{:?}", err).contains("SECRET_TOKEN"));
    }

    #[tokio::test]
    async fn test_cursor_error_hides_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let client = ContentClient::new(&api_config(format!("{}/api/v2", server.uri()), Some("SECRET_TOKEN"))).unwrap();
        let cursor = format!("{}/api/v2/documents/search?ref=YF0&page=2&access_token=SECRET_TOKEN", server.uri());
        let err = client.fetch_page(&cursor).await.err().unwrap();
        assert!(matches!(err, FetchError::Status { .. }));
        assert!(!err.to_string().contains("SECRET_TOKEN"));
    }
}
