//! Single-page web surface for the chat.
//!
//! `GET /` renders the page from current session state; `POST /` maps the
//! submitted form onto one event cycle, runs the turn loop, and re-renders.
//! One shared session lives behind a mutex, so update cycles run to
//! completion one at a time. The responder call is awaited inline; a slow
//! model stalls that cycle, with no timeout.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{Form, State};
use axum::response::Html;
use axum::routing::get;
use axum::Router;
use eyre::Result;
use serde::Deserialize;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::chat::handle_cycle;
use crate::chat::render::render_page;
use crate::chat::responder::Responder;
use crate::chat::session::{ChatSession, EventCycle};

/// State shared across handlers: the single chat session and the model
/// collaborator behind its trait seam.
pub struct AppState {
    session: Mutex<ChatSession>,
    responder: Box<dyn Responder>,
}

impl AppState {
    pub fn new(responder: Box<dyn Responder>) -> Self {
        Self {
            session: Mutex::new(ChatSession::new()),
            responder,
        }
    }
}

/// The form fields posted by the page. `send` and `clear` are present only
/// when the corresponding button triggered the post.
#[derive(Debug, Deserialize)]
struct ChatForm {
    #[serde(default)]
    message: String,
    send: Option<String>,
    clear: Option<String>,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index).post(update))
        .with_state(state)
}

async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    let session = state.session.lock().await;
    Html(render_page(&session, ""))
}

async fn update(State(state): State<Arc<AppState>>, Form(form): Form<ChatForm>) -> Html<String> {
    let cycle = EventCycle {
        clear: form.clear.is_some(),
        submit: form.send.is_some(),
        input: form.message,
    };

    let mut session = state.session.lock().await;
    let input_value = handle_cycle(&mut session, state.responder.as_ref(), cycle).await;
    Html(render_page(&session, &input_value))
}

/// Bind and serve until ctrl-c.
pub async fn serve(state: Arc<AppState>, host: &str, port: u16) -> Result<()> {
    let app = router(state);
    let addr: SocketAddr = format!("{host}:{port}").parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "chat server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("chat server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to install CTRL+C handler");
    }
    info!("shutdown signal received");
}
