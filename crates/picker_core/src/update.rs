use crate::{AppState, Effect, Msg, SessionState};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::Opened { has_token } => {
            if state.session() == SessionState::Loading {
                return (state, Vec::new());
            }
            if has_token {
                start_from_top(&mut state)
            } else {
                state.set_session(SessionState::NeedsLogin);
                vec![Effect::StartLogin]
            }
        }
        Msg::LoginCompleted => {
            // A stale page may still be in flight from before the login.
            if state.session() == SessionState::Loading {
                Vec::new()
            } else {
                start_from_top(&mut state)
            }
        }
        Msg::Refresh => match state.session() {
            SessionState::Loading | SessionState::NeedsLogin => Vec::new(),
            _ => start_from_top(&mut state),
        },
        Msg::LoadMoreRequested => match state.session() {
            SessionState::Ready | SessionState::Failed => {
                state.set_session(SessionState::Loading);
                vec![Effect::FetchNextPage]
            }
            _ => Vec::new(),
        },
        Msg::TileSizeChanged { width, height } => {
            state.set_tile_size(width, height);
            Vec::new()
        }
        Msg::PageLoaded {
            photos,
            skipped,
            has_more,
        } => {
            if state.session() != SessionState::Loading {
                engine_logging::engine_warn!(
                    "dropping unexpected page while {:?}",
                    state.session()
                );
                return (state, Vec::new());
            }
            state.append_page(photos, skipped);
            state.set_session(if has_more {
                SessionState::Ready
            } else {
                SessionState::Exhausted
            });
            Vec::new()
        }
        Msg::LoadFailed {
            reason,
            needs_login,
        } => {
            if needs_login {
                state.clear_photos();
                state.set_error(Some(reason));
                state.set_session(SessionState::NeedsLogin);
                vec![Effect::StartLogin]
            } else {
                state.set_error(Some(reason));
                state.set_session(SessionState::Failed);
                Vec::new()
            }
        }
        Msg::PhotoToggled { index } => {
            if !state.toggle_selection(index) {
                engine_logging::engine_debug!("ignoring toggle of unknown photo {}", index);
            }
            Vec::new()
        }
    };

    (state, effects)
}

fn start_from_top(state: &mut AppState) -> Vec<Effect> {
    state.clear_photos();
    state.set_error(None);
    state.set_session(SessionState::Loading);
    vec![Effect::ResetFeed, Effect::FetchNextPage]
}
