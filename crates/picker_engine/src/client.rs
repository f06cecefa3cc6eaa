use std::sync::{Arc, Mutex, MutexGuard};

use engine_logging::{engine_debug, engine_info, engine_warn, redact_access_token};
use picker_core::{build_request_url, FeedCursor, DEFAULT_PAGE_SIZE};
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::parse::parse_feed_response;
use crate::{FeedError, FeedPage, HttpResponse, TokenStore, Transport, TransportError, TransportFailure};

pub const MEDIA_URL_ENDPOINT: &str = "https://api.instagram.com/v1/users/self/media/recent";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedSettings {
    pub endpoint: String,
    pub page_size: u32,
}

impl Default for FeedSettings {
    fn default() -> Self {
        Self {
            endpoint: MEDIA_URL_ENDPOINT.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Pages through the user's recent media.
///
/// One page request may be in flight at a time; a second concurrent call is
/// rejected with [`FeedError::Busy`]. State only changes once a response has
/// been received, so a dropped or cancelled call leaves cursor and token as
/// they were. A [`FeedClient::reset_feed`] issued while a request is pending
/// wins: the late page is discarded with [`FeedError::Superseded`].
pub struct FeedClient {
    settings: FeedSettings,
    transport: Arc<dyn Transport>,
    tokens: Arc<dyn TokenStore>,
    state: Mutex<FeedState>,
}

#[derive(Debug, Default)]
struct FeedState {
    cursor: FeedCursor,
    /// Bumped by every reset; a response only advances the cursor it was requested from.
    generation: u64,
    in_flight: bool,
}

struct InFlightGuard<'a>(&'a FeedClient);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.lock_state().in_flight = false;
    }
}

impl FeedClient {
    pub fn new(
        settings: FeedSettings,
        transport: Arc<dyn Transport>,
        tokens: Arc<dyn TokenStore>,
    ) -> Self {
        Self {
            settings,
            transport,
            tokens,
            state: Mutex::new(FeedState::default()),
        }
    }

    /// Rewinds to the newest photos. No I/O.
    pub fn reset_feed(&self) {
        engine_debug!("reset feed");
        let mut state = self.lock_state();
        state.cursor.reset();
        state.generation = state.generation.wrapping_add(1);
    }

    pub fn cursor(&self) -> FeedCursor {
        self.lock_state().cursor.clone()
    }

    pub fn has_token(&self) -> bool {
        self.tokens.has()
    }

    pub fn is_fetching(&self) -> bool {
        self.lock_state().in_flight
    }

    pub async fn fetch_next_page(&self) -> Result<FeedPage, FeedError> {
        let _guard = self.begin()?;
        let (url, generation) = self.next_request_url()?;
        let response = self
            .transport
            .get(url.as_str())
            .await
            .map_err(map_transport_error)?;
        self.complete(response, generation)
    }

    /// Like [`FeedClient::fetch_next_page`], abandoning the request when `cancel` fires.
    pub async fn fetch_next_page_cancellable(
        &self,
        cancel: &CancellationToken,
    ) -> Result<FeedPage, FeedError> {
        let _guard = self.begin()?;
        let (url, generation) = self.next_request_url()?;
        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                engine_info!("page request cancelled");
                return Err(FeedError::Cancelled);
            }
            result = self.transport.get(url.as_str()) => result,
        };
        let response = result.map_err(map_transport_error)?;
        self.complete(response, generation)
    }

    fn begin(&self) -> Result<InFlightGuard<'_>, FeedError> {
        let mut state = self.lock_state();
        if state.in_flight {
            engine_warn!("rejecting page request while another is in flight");
            return Err(FeedError::Busy);
        }
        state.in_flight = true;
        Ok(InFlightGuard(self))
    }

    fn next_request_url(&self) -> Result<(Url, u64), FeedError> {
        let state = self.lock_state();
        let base = state
            .cursor
            .request_base(&self.settings.endpoint)
            .ok_or(FeedError::Exhausted)?;
        let token = self.tokens.get();
        let url = build_request_url(base, token.as_deref(), self.settings.page_size)?;
        engine_debug!("Executing query: {}", redact_access_token(url.as_str()));
        Ok((url, state.generation))
    }

    fn complete(&self, response: HttpResponse, generation: u64) -> Result<FeedPage, FeedError> {
        match response.status {
            200 => {}
            400 | 401 => {
                engine_warn!(
                    "access token rejected with status {}; clearing token and feed",
                    response.status
                );
                self.tokens.clear();
                self.reset_feed();
                return Err(FeedError::NeedsReauth);
            }
            status => {
                engine_warn!("feed request failed with status {}", status);
                return Err(FeedError::Server(status));
            }
        }

        let parsed = parse_feed_response(&response.body)
            .map_err(|err| FeedError::MalformedResponse(err.to_string()))?;

        let mut state = self.lock_state();
        if state.generation != generation {
            engine_info!(
                "feed was reset during the request; dropping {} photos",
                parsed.photos.len()
            );
            return Err(FeedError::Superseded);
        }
        state.cursor.advance(parsed.next_url);
        let has_more = state.cursor.has_more();
        drop(state);
        engine_info!(
            "Fetched {} photos ({} skipped), more available: {}",
            parsed.photos.len(),
            parsed.skipped,
            has_more
        );

        Ok(FeedPage {
            photos: parsed.photos,
            skipped: parsed.skipped,
            has_more,
        })
    }

    fn lock_state(&self) -> MutexGuard<'_, FeedState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn map_transport_error(err: TransportError) -> FeedError {
    if err.kind == TransportFailure::Cancelled {
        return FeedError::Cancelled;
    }
    engine_warn!("transport failure: {}", err);
    FeedError::Transport(err)
}
