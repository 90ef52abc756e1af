//! `hunt serve` - read-only HTTP facade over the reward engine
//!
//! Routes:
//! - `GET /rewards?item_name=...` plain text reward report
//! - `GET /item_name_list` JSON array of every item name
//!
//! Responses carry an `ETag` built from the database version and the
//! endpoint version, so clients revalidate only when either changes.

use crate::context::GlobalArgs;
use anyhow::{Context as _, Result};
use clap::Parser;
use http_body_util::Full;
use hyper::body::{Bytes, Incoming};
use hyper::header::{self, HeaderValue};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Method, Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use hunt_core::config::ServerConfig;
use hunt_core::{render, EngineConstants, MemoryRepository, Repository, RewardEngine};
use percent_encoding::percent_decode_str;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{debug, info, warn};

const TEXT: &str = "text/plain; charset=utf-8";
const JSON: &str = "application/json";

#[derive(Parser, Debug)]
pub struct ServeCommand {
    /// Listen address, overrides the settings file
    #[arg(long)]
    pub addr: Option<String>,
}

/// Shared by every connection; never mutated after startup
pub struct ServerState {
    pub repo: MemoryRepository,
    pub constants: EngineConstants,
    pub server: ServerConfig,
}

impl ServerState {
    fn etag(&self, endpoint: &str) -> String {
        format!("\"{}-{}-v{}\"", self.repo.version(), endpoint, self.server.api_version)
    }
}

impl ServeCommand {
    pub fn execute(self, global: &GlobalArgs) -> Result<()> {
        let ctx = global.load()?;
        let mut server = ctx.config.server.clone();
        if let Some(addr) = self.addr {
            server.addr = addr;
        }
        let state = Arc::new(ServerState {
            repo: ctx.repo,
            constants: ctx.config.constants,
            server,
        });
        let runtime = tokio::runtime::Runtime::new().context("starting the async runtime")?;
        runtime.block_on(run(state))
    }
}

async fn run(state: Arc<ServerState>) -> Result<()> {
    let listener = TcpListener::bind(&state.server.addr)
        .await
        .with_context(|| format!("binding {}", state.server.addr))?;
    info!("listening on http://{}", state.server.addr);

    loop {
        let (stream, remote_addr) = tokio::select! {
            accepted = listener.accept() => match accepted {
                Ok(conn) => conn,
                Err(e) => {
                    warn!("accept error: {}", e);
                    continue;
                }
            },
            _ = tokio::signal::ctrl_c() => {
                info!("shutting down");
                return Ok(());
            }
        };

        let state = state.clone();
        tokio::spawn(async move {
            let io = TokioIo::new(stream);
            let service = service_fn(move |req| {
                let state = state.clone();
                async move { handle_request(state, req).await }
            });
            if let Err(e) = http1::Builder::new().serve_connection(io, service).await {
                debug!("connection {} closed: {}", remote_addr, e);
            }
        });
    }
}

async fn handle_request(state: Arc<ServerState>, req: Request<Incoming>) -> Result<Response<Full<Bytes>>, hyper::Error> {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let query = req.uri().query().map(str::to_string);
    let if_none_match = req
        .headers()
        .get(header::IF_NONE_MATCH)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    debug!("{} {}", method, req.uri());

    // report building is synchronous and CPU bound
    let response = tokio::task::spawn_blocking(move || {
        route(&state, &method, &path, query.as_deref(), if_none_match.as_deref())
    })
    .await
    .unwrap_or_else(|e| {
        warn!("request handler failed: {}", e);
        respond(StatusCode::INTERNAL_SERVER_ERROR, TEXT, "internal error")
    });
    Ok(response)
}

/// Answer one request; pure apart from logging
pub fn route(
    state: &ServerState,
    method: &Method,
    path: &str,
    query: Option<&str>,
    if_none_match: Option<&str>,
) -> Response<Full<Bytes>> {
    if method != Method::GET {
        return respond(StatusCode::METHOD_NOT_ALLOWED, TEXT, "only GET is supported");
    }
    match path {
        "/rewards" => {
            let etag = state.etag("rewards");
            if etag_matches(if_none_match, &etag) {
                return not_modified(&etag, state.server.max_age);
            }
            let name = query.and_then(|q| query_param(q, "item_name")).unwrap_or_default();
            rewards(state, name.trim(), &etag)
        }
        "/item_name_list" => {
            let etag = state.etag("items");
            if etag_matches(if_none_match, &etag) {
                return not_modified(&etag, state.server.max_age);
            }
            item_names(state, &etag)
        }
        _ => respond(StatusCode::NOT_FOUND, TEXT, "not found"),
    }
}

fn rewards(state: &ServerState, name: &str, etag: &str) -> Response<Full<Bytes>> {
    if name.is_empty() {
        return respond(StatusCode::BAD_REQUEST, TEXT, "Please enter an item name");
    }
    let engine = RewardEngine::new(&state.repo, &state.constants);
    match engine.item_rewards(name) {
        Ok(rewards) if rewards.is_found() => {
            cached(respond(StatusCode::OK, TEXT, render(&rewards)), etag, state.server.max_age)
        }
        Ok(rewards) => respond(StatusCode::NOT_FOUND, TEXT, render(&rewards)),
        Err(err) => {
            warn!("rewards for '{}' failed: {}", name, err);
            respond(StatusCode::INTERNAL_SERVER_ERROR, TEXT, err.to_string())
        }
    }
}

fn item_names(state: &ServerState, etag: &str) -> Response<Full<Bytes>> {
    let names: Vec<String> = match state.repo.get_items() {
        Ok(items) => items.into_iter().map(|i| i.name).collect(),
        Err(err) => {
            warn!("listing items failed: {}", err);
            return respond(StatusCode::INTERNAL_SERVER_ERROR, TEXT, err.to_string());
        }
    };
    match serde_json::to_string(&names) {
        Ok(body) => cached(respond(StatusCode::OK, JSON, body), etag, state.server.max_age),
        Err(err) => respond(StatusCode::INTERNAL_SERVER_ERROR, TEXT, err.to_string()),
    }
}

fn respond(status: StatusCode, content_type: &'static str, body: impl Into<Bytes>) -> Response<Full<Bytes>> {
    let mut response = Response::new(Full::new(body.into()));
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(header::CONTENT_TYPE, HeaderValue::from_static(content_type));
    response
}

fn cached(mut response: Response<Full<Bytes>>, etag: &str, max_age: u32) -> Response<Full<Bytes>> {
    let headers = response.headers_mut();
    if let Ok(value) = HeaderValue::from_str(etag) {
        headers.insert(header::ETAG, value);
    }
    if let Ok(value) = HeaderValue::from_str(&format!("public, max-age={}", max_age)) {
        headers.insert(header::CACHE_CONTROL, value);
    }
    response
}

fn not_modified(etag: &str, max_age: u32) -> Response<Full<Bytes>> {
    let mut response = Response::new(Full::new(Bytes::new()));
    *response.status_mut() = StatusCode::NOT_MODIFIED;
    cached(response, etag, max_age)
}

/// `If-None-Match` lists `etag` (weak or strong) or is `*`
fn etag_matches(if_none_match: Option<&str>, etag: &str) -> bool {
    let Some(header) = if_none_match else {
        return false;
    };
    header.split(',').map(str::trim).any(|tag| {
        let tag = tag.strip_prefix("W/").unwrap_or(tag);
        tag == "*" || tag == etag
    })
}

fn decode(component: &str) -> String {
    let component = component.replace('+', " ");
    percent_decode_str(&component).decode_utf8_lossy().into_owned()
}

/// First value of `key` in a form-encoded query string
pub fn query_param(query: &str, key: &str) -> Option<String> {
    query.split('&').find_map(|pair| {
        let (k, v) = pair.split_once('=').unwrap_or((pair, ""));
        (decode(k) == key).then(|| decode(v))
    })
}
