//! HTTP retrieval of LIS documents with the file cache in front.

use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::Client;
use rollcall_shared::{CachePolicy, DocumentKey, Result, RollcallError, SourceConfig};
use tracing::{debug, info, instrument};
use url::Url;

use crate::cache::{DocumentCache, write_document};
use crate::{DocumentSource, document_path};

/// User-Agent string for document requests.
const USER_AGENT: &str = concat!("Rollcall/", env!("CARGO_PKG_VERSION"));

/// Maximum response size we accept (32 MB).
const MAX_RESPONSE_SIZE: u64 = 32 * 1024 * 1024;

/// Maximum number of redirects to follow.
const MAX_REDIRECTS: usize = 5;

/// Fetches vote documents from the Senate website, caching them on disk.
pub struct SenateSource {
    client: Client,
    base_url: Url,
    cache: DocumentCache,
    policy: CachePolicy,
}

impl SenateSource {
    /// Create a source from runtime configuration.
    pub fn new(config: &SourceConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| {
                RollcallError::fetch(
                    config.base_url.as_str(),
                    format!("failed to build HTTP client: {e}"),
                )
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            cache: DocumentCache::new(&config.cache_dir),
            policy: config.cache_policy,
        })
    }

    pub fn cache(&self) -> &DocumentCache {
        &self.cache
    }

    /// Absolute URL of a document.
    pub fn document_url(&self, key: &DocumentKey) -> Result<Url> {
        self.base_url.join(&document_path(key)).map_err(|e| {
            RollcallError::fetch(self.base_url.as_str(), format!("bad document path: {e}"))
        })
    }

    /// GET a document from the remote source, bypassing the cache.
    #[instrument(skip_all, fields(key = %key))]
    pub async fn download(&self, key: &DocumentKey) -> Result<Vec<u8>> {
        let url = self.document_url(key)?;
        info!(%url, "downloading document");

        let response = self
            .client
            .get(url.as_str())
            .send()
            .await
            .map_err(|e| RollcallError::fetch(url.as_str(), e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RollcallError::fetch(url.as_str(), format!("HTTP {status}")));
        }

        if let Some(len) = response.content_length() {
            if len > MAX_RESPONSE_SIZE {
                return Err(RollcallError::fetch(
                    url.as_str(),
                    format!("response too large ({len} bytes, max {MAX_RESPONSE_SIZE})"),
                ));
            }
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| RollcallError::fetch(url.as_str(), format!("failed to read body: {e}")))?;

        debug!(bytes = body.len(), "document downloaded");
        Ok(body.to_vec())
    }

    /// Download a document and save it at `path` instead of the cache layout.
    pub async fn download_to(&self, key: &DocumentKey, path: &Path) -> Result<PathBuf> {
        let bytes = self.download(key).await?;
        write_document(path, &bytes)?;
        Ok(path.to_path_buf())
    }
}

impl DocumentSource for SenateSource {
    async fn fetch(&self, key: &DocumentKey) -> Result<Vec<u8>> {
        if self.policy == CachePolicy::TrustLocal {
            if let Some(bytes) = self.cache.load(key)? {
                return Ok(bytes);
            }
        }

        let bytes = self.download(key).await?;
        self.cache.store(key, &bytes)?;
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rollcall_shared::{Congress, Session, parse_base_url};
    use uuid::Uuid;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const VOTE_LIST: &str = "<vote_summary><votes/></vote_summary>";

    fn source_for(server: &MockServer, policy: CachePolicy) -> (SenateSource, PathBuf) {
        let cache_dir =
            std::env::temp_dir().join(format!("rollcall-http-test-{}", Uuid::now_v7()));
        let config = SourceConfig {
            base_url: parse_base_url(&server.uri()).unwrap(),
            cache_dir: cache_dir.clone(),
            cache_policy: policy,
            timeout_secs: 5,
        };
        (SenateSource::new(&config).unwrap(), cache_dir)
    }

    fn list_key() -> DocumentKey {
        DocumentKey::vote_list(Congress::new(115).unwrap(), Session::First)
    }

    #[tokio::test]
    async fn fetch_miss_downloads_and_caches() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/roll_call_lists/vote_menu_115_1.xml"))
            .respond_with(ResponseTemplate::new(200).set_body_string(VOTE_LIST))
            .expect(1)
            .mount(&server)
            .await;

        let (source, cache_dir) = source_for(&server, CachePolicy::TrustLocal);

        let first = source.fetch(&list_key()).await.unwrap();
        assert_eq!(first, VOTE_LIST.as_bytes());
        assert!(cache_dir.join("115_1.xml").is_file());

        // Served from disk: the mock's expect(1) fails on drop otherwise.
        let second = source.fetch(&list_key()).await.unwrap();
        assert_eq!(second, first);

        let _ = std::fs::remove_dir_all(&cache_dir);
    }

    #[tokio::test]
    async fn refresh_policy_always_downloads() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/roll_call_lists/vote_menu_115_1.xml"))
            .respond_with(ResponseTemplate::new(200).set_body_string(VOTE_LIST))
            .expect(2)
            .mount(&server)
            .await;

        let (source, cache_dir) = source_for(&server, CachePolicy::Refresh);
        source.fetch(&list_key()).await.unwrap();
        source.fetch(&list_key()).await.unwrap();

        let _ = std::fs::remove_dir_all(&cache_dir);
    }

    #[tokio::test]
    async fn vote_record_uses_padded_path() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/roll_call_votes/vote1151/vote_115_1_00054.xml"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<roll_call_vote/>"))
            .mount(&server)
            .await;

        let (source, cache_dir) = source_for(&server, CachePolicy::TrustLocal);
        let key = DocumentKey::vote(Congress::new(115).unwrap(), Session::First, 54);
        let bytes = source.fetch(&key).await.unwrap();

        assert_eq!(bytes, b"<roll_call_vote/>");
        assert!(cache_dir.join("115_1_00054.xml").is_file());

        let _ = std::fs::remove_dir_all(&cache_dir);
    }

    #[tokio::test]
    async fn missing_document_is_fetch_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let (source, cache_dir) = source_for(&server, CachePolicy::TrustLocal);
        let err = source.fetch(&list_key()).await.unwrap_err();

        assert!(matches!(err, RollcallError::Fetch { .. }));
        assert!(err.to_string().contains("404"));
        assert!(!cache_dir.join("115_1.xml").exists());
    }

    #[tokio::test]
    async fn download_to_custom_path() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/roll_call_lists/vote_menu_115_1.xml"))
            .respond_with(ResponseTemplate::new(200).set_body_string(VOTE_LIST))
            .mount(&server)
            .await;

        let (source, cache_dir) = source_for(&server, CachePolicy::TrustLocal);
        let out = cache_dir.join("custom").join("menu.xml");
        let written = source.download_to(&list_key(), &out).await.unwrap();

        assert_eq!(written, out);
        assert_eq!(std::fs::read_to_string(&out).unwrap(), VOTE_LIST);
        // The cache layout is untouched.
        assert!(!cache_dir.join("115_1.xml").exists());

        let _ = std::fs::remove_dir_all(&cache_dir);
    }
}
