//! Placeholder HTTP route layer.
//!
//! Request-routing glue only: handlers extract path parameters and
//! return stub responses. The download core does not depend on this
//! crate; the daemon serves it alongside the TCP listener.

use axum::Router;
use axum::extract::Path;
use axum::routing::get;

/// Builds the route layer.
pub fn router() -> Router {
    Router::new()
        .route("/", get(|| async { "hello\n" }))
        .route("/download/:game/:version", get(download_versioned))
        .route("/download/:game", get(download))
        .route("/info/:game", get(info))
        .route("/list", get(list))
}

async fn download_versioned(Path((game, version)): Path<(String, String)>) -> String {
    format!("requested download: {game} v:{version}\n")
}

async fn download(Path(game): Path<String>) -> String {
    // No version in the path: treat as the latest.
    format!("requested download: {game} v:latest\n")
}

async fn info(Path(game): Path<String>) -> String {
    format!("requested info: {game}\n")
}

async fn list() -> &'static str {
    "no game listing available yet\n"
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    async fn get_text(path: &str) -> (StatusCode, String) {
        let response = router()
            .oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn root_says_hello() {
        let (status, body) = get_text("/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "hello\n");
    }

    #[tokio::test]
    async fn download_with_version() {
        let (status, body) = get_text("/download/mygame/2.1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "requested download: mygame v:2.1\n");
    }

    #[tokio::test]
    async fn download_defaults_to_latest() {
        let (_, body) = get_text("/download/mygame").await;
        assert_eq!(body, "requested download: mygame v:latest\n");
    }

    #[tokio::test]
    async fn info_echoes_game() {
        let (_, body) = get_text("/info/mygame").await;
        assert_eq!(body, "requested info: mygame\n");
    }

    #[tokio::test]
    async fn list_is_a_stub() {
        let (status, _) = get_text("/list").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn unknown_route_is_404() {
        let (status, _) = get_text("/nope").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
