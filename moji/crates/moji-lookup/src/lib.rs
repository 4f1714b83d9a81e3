//! moji-lookup - Memoizing short-code lookup service
//!
//! This crate resolves short codes such as `thumbs_up` to symbols through a
//! single long-lived worker that owns a memo cache. Callers talk to the
//! worker with a blocking [`Client`]; the worker consults its cache and
//! falls back to a [`Resolver`] on a miss.
//!
//! # Example Usage
//!
//! ```no_run
//! use moji_lookup::{spawn, AnnotationResolver, LookupContext, Token};
//!
//! let (mut client, handle) = spawn(AnnotationResolver::new())?;
//! let ctx = LookupContext::new("annotations.json");
//!
//! let symbol = client.call(Token::new("thumbs_up")?, &ctx)?;
//! println!("{symbol}");
//!
//! drop(client);
//! let stats = handle.join()?;
//! println!("{} hits, {} misses", stats.hits, stats.misses);
//! # Ok::<(), moji_lookup::LookupError>(())
//! ```
//!
//! # Module Structure
//!
//! - [`token`] - Short-code validation and canonical forms
//! - [`resolver`] - The resolver capability and the annotation-table adapter
//! - [`cache`] - The memo table
//! - [`message`] - Request and reply messages
//! - [`service`] - The worker loop and its spawner
//! - [`client`] - The blocking call interface
//! - [`error`] - Error types
//!
//! # Outcomes
//!
//! | Resolver result       | Cached | Caller sees                      |
//! |-----------------------|--------|----------------------------------|
//! | `Ok(symbol)`          | yes    | `Ok(symbol)`                     |
//! | `NotFound`            | yes    | `Ok("?token?")`                  |
//! | `SourceUnavailable`   | no     | `Err(SourceUnavailable)` (fatal) |

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod cache;
pub mod client;
pub mod error;
pub mod message;
pub mod resolver;
pub mod service;
pub mod token;

pub use cache::{CacheStats, LookupCache};
pub use client::Client;
pub use error::{LookupError, ResolveError, Result};
pub use message::{Reply, Request, Status};
pub use resolver::{AnnotationResolver, LookupContext, Resolver};
pub use service::{spawn, LookupService, ServiceHandle};
pub use token::{is_shortcode_char, Token};
