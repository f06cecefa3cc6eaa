use crate::PhotoRecord;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Picker opened; `has_token` reflects the token store at that moment.
    Opened { has_token: bool },
    /// Login flow stored a fresh token.
    LoginCompleted,
    /// User scrolled to the end of the grid.
    LoadMoreRequested,
    /// User asked to start over from the newest photos.
    Refresh,
    /// UI reported the tile size used for best-fit selection.
    TileSizeChanged { width: i32, height: i32 },
    /// Engine delivered a page.
    PageLoaded {
        photos: Vec<PhotoRecord>,
        skipped: usize,
        has_more: bool,
    },
    /// Engine failed to deliver a page.
    LoadFailed { reason: String, needs_login: bool },
    /// User tapped a photo tile.
    PhotoToggled { index: usize },
}
