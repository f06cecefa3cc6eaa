//! Picker core: photo model, best-fit selection, feed cursor and the pure picker state machine.
mod cursor;
mod effect;
mod login;
mod model;
mod msg;
mod request;
mod select;
mod state;
mod update;
mod view_model;

pub use cursor::FeedCursor;
pub use effect::Effect;
pub use login::{
    authorize_url, intercept_redirect, LoginConfig, RedirectOutcome, AUTHORIZE_ENDPOINT,
    GENERIC_LOGIN_ERROR, UNKNOWN_LOGIN_ERROR,
};
pub use model::{secure_url, ImageVariant, ModelError, PhotoRecord, UNKNOWN_DIMENSION};
pub use msg::Msg;
pub use request::{build_request_url, RequestError, COUNT_PARAM, DEFAULT_PAGE_SIZE};
pub use select::{select_best_fit, SelectionError};
pub use state::{AppState, SessionState, DEFAULT_TILE_SIZE};
pub use update::update;
pub use view_model::{AppViewModel, PageStats, PhotoRowView};
