//! Picker engine: token storage, HTTP transport and the paginated feed client.
mod client;
mod parse;
mod persist;
mod token_store;
mod transport;
mod types;

pub use client::{FeedClient, FeedSettings, MEDIA_URL_ENDPOINT};
pub use parse::{parse_feed_response, ParseError, ParsedPage};
pub use persist::{ensure_store_dir, AtomicFileWriter, PersistError};
pub use token_store::{FileTokenStore, MemoryTokenStore, TokenStore, TOKEN_NAMESPACE};
pub use transport::{ReqwestTransport, Transport, TransportSettings};
pub use types::{FeedError, FeedPage, HttpResponse, TransportError, TransportFailure};
