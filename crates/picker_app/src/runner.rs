use std::collections::VecDeque;

use engine_logging::{engine_info, engine_warn};
use picker_core::{update, AppState, Effect, Msg};
use picker_engine::FeedClient;
use tokio::runtime::Runtime;

/// Executes core effects against the feed client.
pub struct EffectRunner {
    client: FeedClient,
    runtime: Runtime,
}

impl EffectRunner {
    pub fn new(client: FeedClient, runtime: Runtime) -> Self {
        Self { client, runtime }
    }

    pub fn has_token(&self) -> bool {
        self.client.has_token()
    }

    /// Runs one effect; fetches report back with the message to feed into `update`.
    pub fn run(&self, effect: Effect) -> Option<Msg> {
        match effect {
            Effect::ResetFeed => {
                self.client.reset_feed();
                None
            }
            Effect::FetchNextPage => {
                let msg = match self.runtime.block_on(self.client.fetch_next_page()) {
                    Ok(page) => Msg::PageLoaded {
                        photos: page.photos,
                        skipped: page.skipped,
                        has_more: page.has_more,
                    },
                    Err(err) => {
                        engine_warn!("Page request failed: {}", err);
                        Msg::LoadFailed {
                            reason: err.to_string(),
                            needs_login: err.is_auth(),
                        }
                    }
                };
                Some(msg)
            }
            Effect::StartLogin => {
                engine_info!("Login required; run `picker login-url` to sign in");
                None
            }
        }
    }
}

/// Drives the picker until `pages` pages arrived or the feed stops.
pub fn browse(runner: &EffectRunner, pages: u32, tile: (i32, i32), select: &[usize]) -> AppState {
    let mut state = AppState::new();
    let mut queue = VecDeque::from([
        Msg::TileSizeChanged {
            width: tile.0,
            height: tile.1,
        },
        Msg::Opened {
            has_token: runner.has_token(),
        },
    ]);
    let mut pages_loaded = 0;

    while let Some(msg) = queue.pop_front() {
        let page_arrived = matches!(msg, Msg::PageLoaded { .. });
        let (next, effects) = update(state, msg);
        state = next;

        if page_arrived {
            pages_loaded += 1;
            if pages_loaded < pages {
                queue.push_back(Msg::LoadMoreRequested);
            }
        }
        queue.extend(effects.into_iter().filter_map(|effect| runner.run(effect)));
    }

    for index in select {
        let (next, _) = update(state, Msg::PhotoToggled { index: *index });
        state = next;
    }
    state
}
