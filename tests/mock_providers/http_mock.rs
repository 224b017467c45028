//! HTTP mock server that streams TTS audio in several chunks

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use axum::{
    Router,
    body::{Body, Bytes},
    extract::{Path, State},
    http::{HeaderMap, Response, StatusCode},
    routing::post,
};
use futures::StreamExt;
use tokio::net::TcpListener;

struct ChunkedState {
    chunks: Vec<Bytes>,
    requests: AtomicUsize,
    delay: Duration,
}

/// Running chunked TTS server.
pub struct ChunkedSpeechServer {
    pub base_url: String,
    state: Arc<ChunkedState>,
}

impl ChunkedSpeechServer {
    pub fn request_count(&self) -> usize {
        self.state.requests.load(Ordering::SeqCst)
    }
}

async fn tts_handler(
    State(state): State<Arc<ChunkedState>>,
    Path(_voice_id): Path<String>,
    headers: HeaderMap,
) -> Response<Body> {
    state.requests.fetch_add(1, Ordering::SeqCst);

    if headers.get("xi-api-key").is_none() {
        return Response::builder()
            .status(StatusCode::UNAUTHORIZED)
            .body(Body::from(r#"{"detail":{"message":"missing api key"}}"#))
            .unwrap();
    }

    let delay = state.delay;
    let stream = futures::stream::iter(state.chunks.clone()).then(move |chunk| async move {
        tokio::time::sleep(delay).await;
        Ok::<_, std::io::Error>(chunk)
    });

    Response::builder()
        .status(StatusCode::OK)
        .header("content-type", "audio/mpeg")
        .body(Body::from_stream(stream))
        .unwrap()
}

/// Start a server on a random port answering every synthesis request with
/// `chunks`, one after another.
pub async fn spawn_chunked_speech_server(chunks: Vec<&'static [u8]>) -> ChunkedSpeechServer {
    let state = Arc::new(ChunkedState {
        chunks: chunks.into_iter().map(Bytes::from_static).collect(),
        requests: AtomicUsize::new(0),
        delay: Duration::from_millis(5),
    });

    let app = Router::new()
        .route("/v1/text-to-speech/{voice_id}", post(tts_handler))
        .with_state(state.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    ChunkedSpeechServer {
        base_url: format!("http://{addr}"),
        state,
    }
}
