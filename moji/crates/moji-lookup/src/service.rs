//! The lookup worker.
//!
//! One [`LookupService`] runs per process on its own thread. It owns the
//! [`LookupCache`] outright and is reached only through a request channel
//! and a reply channel, so the cache needs no lock. Requests are served one
//! at a time in arrival order; each gets exactly one reply.
//!
//! ```text
//!   Client ──Request──▶ LookupService ──(miss)──▶ Resolver
//!     ▲                      │
//!     └────────Reply─────────┘
//! ```

use std::thread::{self, JoinHandle};

use crossbeam_channel::{bounded, Receiver, Sender};

use crate::cache::{CacheStats, LookupCache};
use crate::client::Client;
use crate::error::{LookupError, ResolveError, Result};
use crate::message::{Reply, Request, Status};
use crate::resolver::Resolver;

/// Name of the worker thread.
pub const SERVICE_THREAD_NAME: &str = "moji-lookup";

/// Channel capacity in each direction. The client never has more than one
/// request outstanding.
const CHANNEL_CAPACITY: usize = 1;

/// Cache-owning serve loop.
pub struct LookupService<R> {
    resolver: R,
    cache: LookupCache,
}

impl<R: Resolver> LookupService<R> {
    /// Creates a service with an empty cache.
    pub fn new(resolver: R) -> Self {
        Self {
            resolver,
            cache: LookupCache::new(),
        }
    }

    /// Answers one request, consulting the cache first.
    pub fn handle(&mut self, request: &Request) -> Reply {
        let key = request.token.as_str();
        if let Some(reply) = self.cache.get(key) {
            return reply.clone();
        }

        let description = request.token.description();
        let reply = match self.resolver.resolve(&description, &request.context) {
            Ok(symbol) => {
                log::debug!("resolved {:?} -> {}", description, symbol);
                Reply::new(Status::Resolved, symbol)
            }
            Err(ResolveError::NotFound) => {
                log::debug!("no symbol for {:?}", description);
                Reply::new(Status::Unresolved, request.token.placeholder())
            }
            Err(ResolveError::SourceUnavailable(reason)) => {
                log::warn!("lookup of {:?} failed: {}", description, reason);
                self.cache.record_failure();
                return Reply::new(Status::Failed, reason);
            }
        };

        self.cache.insert(key.to_string(), reply.clone());
        reply
    }

    /// Serves requests until either channel disconnects, then returns the
    /// cache statistics.
    pub fn run(mut self, requests: Receiver<Request>, replies: Sender<Reply>) -> CacheStats {
        while let Ok(request) = requests.recv() {
            let reply = self.handle(&request);
            if replies.send(reply).is_err() {
                log::debug!("reply channel closed, stopping");
                break;
            }
        }

        let stats = self.cache.stats();
        log::debug!(
            "lookup service stopped: {} requests, {} hits, {} misses, {} failures, {} cached",
            stats.requests(),
            stats.hits,
            stats.misses,
            stats.failures,
            self.cache.len()
        );
        stats
    }

    /// Current cache statistics.
    pub fn stats(&self) -> CacheStats {
        self.cache.stats()
    }
}

/// Join handle for a spawned [`LookupService`].
#[derive(Debug)]
pub struct ServiceHandle {
    thread: JoinHandle<CacheStats>,
}

impl ServiceHandle {
    /// Waits for the worker to stop. Drop the [`Client`] first, or this
    /// blocks forever.
    pub fn join(self) -> Result<CacheStats> {
        self.thread.join().map_err(|_| LookupError::ServicePanicked)
    }
}

/// Starts the lookup worker and returns the client connected to it.
///
/// # Example
///
/// ```
/// use moji_lookup::{spawn, LookupContext, ResolveError, Token};
///
/// let resolver = |description: &str, _: &LookupContext| match description {
///     "waving hand" => Ok("👋".to_string()),
///     _ => Err(ResolveError::NotFound),
/// };
/// let (mut client, handle) = spawn(resolver).unwrap();
/// let ctx = LookupContext::new("annotations.json");
///
/// let wave = Token::new("waving_hand").unwrap();
/// assert_eq!(client.call(wave, &ctx).unwrap(), "👋");
///
/// drop(client);
/// assert_eq!(handle.join().unwrap().misses, 1);
/// ```
pub fn spawn<R: Resolver>(resolver: R) -> Result<(Client, ServiceHandle)> {
    let (request_tx, request_rx) = bounded(CHANNEL_CAPACITY);
    let (reply_tx, reply_rx) = bounded(CHANNEL_CAPACITY);

    let service = LookupService::new(resolver);
    let thread = thread::Builder::new()
        .name(SERVICE_THREAD_NAME.to_string())
        .spawn(move || service.run(request_rx, reply_tx))?;

    log::debug!("lookup service started");
    Ok((Client::new(request_tx, reply_rx), ServiceHandle { thread }))
}
