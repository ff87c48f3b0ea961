use super::*;
use crate::networking::NetworkingConfig;
use mockito::Server;
use tempfile::TempDir;

fn http_fetcher() -> HttpContentFetcher {
    HttpContentFetcher::new(NetworkingConfig::default().build_client().unwrap())
}

// ============================================================================
// Filename resolution
// ============================================================================

#[test]
fn test_content_disposition_plain_and_quoted() {
    assert_eq!(
        filename_from_content_disposition("attachment; filename=\"jei-1.20.jar\""),
        Some("jei-1.20.jar".to_string())
    );
    assert_eq!(
        filename_from_content_disposition("attachment; filename=jei.jar"),
        Some("jei.jar".to_string())
    );
    assert_eq!(filename_from_content_disposition("inline"), None);
}

#[test]
fn test_content_disposition_prefers_extended_form() {
    let header = "attachment; filename=\"fallback.jar\"; filename*=UTF-8''caf%C3%A9.jar";
    assert_eq!(
        filename_from_content_disposition(header),
        Some("café.jar".to_string())
    );
}

#[test]
fn test_filename_from_url_decodes_last_segment() {
    let url = Url::parse("https://edge.forgecdn.net/files/1/2/Mod%20Name%201.0.jar?x=1").unwrap();
    assert_eq!(filename_from_url(&url), Some("Mod Name 1.0.jar".to_string()));

    let trailing = Url::parse("https://x/files/a.jar/").unwrap();
    assert_eq!(filename_from_url(&trailing), Some("a.jar".to_string()));

    let root = Url::parse("https://x/").unwrap();
    assert_eq!(filename_from_url(&root), None);
}

// ============================================================================
// HTTP fetcher
// ============================================================================

#[tokio::test]
async fn test_http_fetch_with_filename_override() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/files/a.jar")
        .with_status(200)
        .with_body("jar-bytes")
        .create_async()
        .await;

    let temp_dir = TempDir::new().unwrap();
    let mods = temp_dir.path().join("mods");
    let url = format!("{}/files/a.jar", server.url());

    let path = http_fetcher()
        .fetch(&url, &mods, Some("renamed.jar"))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(path, mods.join("renamed.jar"));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "jar-bytes");
    assert!(!mods.join("renamed.jar.partial").exists());
}

#[tokio::test]
async fn test_http_fetch_derives_filename_from_url() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/files/some-mod-1.2.jar")
        .with_status(200)
        .with_body("x")
        .create_async()
        .await;

    let temp_dir = TempDir::new().unwrap();
    let url = format!("{}/files/some-mod-1.2.jar", server.url());

    let path = http_fetcher()
        .fetch(&url, temp_dir.path(), None)
        .await
        .unwrap();

    assert_eq!(path, temp_dir.path().join("some-mod-1.2.jar"));
}

#[tokio::test]
async fn test_http_fetch_uses_content_disposition() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/download/42")
        .with_status(200)
        .with_header("content-disposition", "attachment; filename=\"served.jar\"")
        .with_body("x")
        .create_async()
        .await;

    let temp_dir = TempDir::new().unwrap();
    let url = format!("{}/download/42", server.url());

    let path = http_fetcher()
        .fetch(&url, temp_dir.path(), None)
        .await
        .unwrap();

    assert_eq!(path, temp_dir.path().join("served.jar"));
}

#[tokio::test]
async fn test_http_fetch_non_success_status() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/files/missing.jar")
        .with_status(404)
        .create_async()
        .await;

    let temp_dir = TempDir::new().unwrap();
    let url = format!("{}/files/missing.jar", server.url());

    let err = http_fetcher()
        .fetch(&url, temp_dir.path(), None)
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::Status { status: 404, .. }));
    assert!(!temp_dir.path().join("missing.jar").exists());
}

#[tokio::test]
async fn test_http_fetch_rejects_path_like_filename() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/files/a.jar")
        .with_status(200)
        .with_body("x")
        .create_async()
        .await;

    let temp_dir = TempDir::new().unwrap();
    let url = format!("{}/files/a.jar", server.url());

    let err = http_fetcher()
        .fetch(&url, temp_dir.path(), Some("../escape.jar"))
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::InvalidFilename { .. }));
}

// ============================================================================
// Mock fetcher
// ============================================================================

#[tokio::test]
async fn test_mock_fetch_writes_body_and_records_calls() {
    let fetcher = MockContentFetcher::new()
        .with_response("https://x/a.jar", "alpha")
        .await
        .with_failure("https://x/b.jar", "connection reset")
        .await;

    let temp_dir = TempDir::new().unwrap();

    let path = fetcher
        .fetch("https://x/a.jar", temp_dir.path(), None)
        .await
        .unwrap();
    assert_eq!(std::fs::read_to_string(path).unwrap(), "alpha");

    let err = fetcher
        .fetch("https://x/b.jar", temp_dir.path(), Some("b.jar"))
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::Mock { ref message, .. } if message == "connection reset"));

    let err = fetcher
        .fetch("https://x/unknown.jar", temp_dir.path(), None)
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::Mock { .. }));

    assert_eq!(
        fetcher.calls().await,
        vec![
            "https://x/a.jar".to_string(),
            "https://x/b.jar".to_string(),
            "https://x/unknown.jar".to_string(),
        ]
    );
}
