use crate::SessionState;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PageStats {
    pub added: usize,
    pub duplicates: usize,
    pub skipped: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub session: SessionState,
    pub photo_count: usize,
    pub selected_count: usize,
    pub rows: Vec<PhotoRowView>,
    pub last_page: Option<PageStats>,
    pub last_error: Option<String>,
    pub can_load_more: bool,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoRowView {
    pub index: usize,
    pub id: String,
    /// Best-fit image for the current tile size.
    pub image_url: Option<String>,
    pub selected: bool,
}
