//! Local HTTP listener for `/log`
//!
//! - 127.0.0.1 only, served by `tiny_http`
//! - Only `GET /log?log=<text>` is routed; everything else is 404/405
//! - Journal calls are serialized through a mutex
//!
//! Requests are received with a short timeout so the loop notices the
//! shutdown flag. Connection reads happen on tiny_http's worker threads, so a
//! stalled client never blocks the loop.

use crate::cache::DurableStore;
use crate::constants::{LOG_ROUTE, RECV_POLL_MS};
use crate::endpoint::{handle_log_request, LogRequest, LogResponse};
use crate::error::{DaylogError, Result};
use crate::journal::Journal;
use crate::notes::NoteSource;
use parking_lot::Mutex;
use std::io;
use std::net::{Ipv4Addr, TcpListener};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tiny_http::{Method, Request, Response, Server};
use tracing::{debug, info, warn};

/// Journal shared with the listener
pub type SharedJournal<N, S> = Arc<Mutex<Journal<N, S>>>;

/// Decoded query parameters, in request order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams(pub Vec<(String, String)>);

impl QueryParams {
    /// Split a raw query string. Values decode `+` as space, then percent escapes.
    pub fn parse(raw: &str) -> Result<Self> {
        raw.split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| {
                let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
                Ok((decode_component(key)?, decode_component(value)?))
            })
            .collect::<Result<Vec<_>>>()
            .map(Self)
    }
}

impl LogRequest for QueryParams {
    fn query(&self, name: &str) -> Option<String> {
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.clone())
    }
}

/// Plain-text reply, converted to a tiny_http response when sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlainReply {
    pub status: u16,
    pub body: String,
}

impl PlainReply {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

impl Default for PlainReply {
    fn default() -> Self {
        Self::new(200, "")
    }
}

impl LogResponse for PlainReply {
    fn set_status(&mut self, status: u16) {
        self.status = status;
    }

    fn send(&mut self, body: &str) {
        self.body = body.to_string();
    }
}

pub fn bind_listener(port: u16) -> Result<TcpListener> {
    TcpListener::bind((Ipv4Addr::LOCALHOST, port))
        .map_err(|e| DaylogError::ServerBind { port, source: e })
}

/// Serve requests until `shutdown` is set. Blocks the calling thread.
pub fn run_server_with_listener<N, S>(
    listener: TcpListener,
    journal: SharedJournal<N, S>,
    shutdown: Arc<AtomicBool>,
) -> Result<()>
where
    N: NoteSource,
    S: DurableStore,
{
    let port = listener.local_addr().map(|addr| addr.port()).unwrap_or(0);
    let server = Server::from_listener(listener, None).map_err(|e| DaylogError::ServerBind {
        port,
        source: io::Error::other(e),
    })?;
    info!("Listening on http://127.0.0.1:{}{}", port, LOG_ROUTE);

    while !shutdown.load(Ordering::Relaxed) {
        match server.recv_timeout(Duration::from_millis(RECV_POLL_MS)) {
            Ok(Some(request)) => serve(request, &journal),
            Ok(None) => continue,
            Err(e) => {
                warn!("HTTP listener failed: {}", e);
                break;
            }
        }
    }

    info!("HTTP listener stopped");
    Ok(())
}

fn serve<N: NoteSource, S: DurableStore>(request: Request, journal: &SharedJournal<N, S>) {
    debug!("{} {}", request.method(), request.url());
    let reply = route(request.method(), request.url(), journal);

    let response = Response::from_string(reply.body).with_status_code(reply.status);
    if let Err(e) = request.respond(response) {
        debug!("Failed to send response: {}", e);
    }
}

/// Map a request line to a reply. `/log/` routes like `/log`.
pub fn route<N: NoteSource, S: DurableStore>(
    method: &Method,
    url: &str,
    journal: &SharedJournal<N, S>,
) -> PlainReply {
    let (path, raw_query) = url.split_once('?').unwrap_or((url, ""));
    if path.trim_end_matches('/') != LOG_ROUTE {
        return PlainReply::new(404, "Not Found");
    }
    if *method != Method::Get {
        return PlainReply::new(405, "Method Not Allowed");
    }

    let params = match QueryParams::parse(raw_query) {
        Ok(params) => params,
        Err(e) => {
            debug!("Rejecting request: {}", e);
            return PlainReply::new(400, "Bad Request");
        }
    };

    let mut reply = PlainReply::default();
    let mut journal = journal.lock();
    handle_log_request(&mut *journal, &params, &mut reply);
    reply
}

fn decode_component(raw: &str) -> Result<String> {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|decoded| decoded.into_owned())
        .map_err(|e| DaylogError::Protocol {
            message: format!("invalid query encoding: {}", e),
        })
}
