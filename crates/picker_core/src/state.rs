use std::collections::BTreeSet;

use crate::view_model::{AppViewModel, PageStats, PhotoRowView};
use crate::PhotoRecord;

/// Default tile edge used when the UI has not reported one yet.
pub const DEFAULT_TILE_SIZE: i32 = 320;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Loading,
    Ready,
    Exhausted,
    NeedsLogin,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    session: SessionState,
    photos: Vec<PhotoRecord>,
    selected: BTreeSet<usize>,
    tile_width: i32,
    tile_height: i32,
    last_page: Option<PageStats>,
    last_error: Option<String>,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            session: SessionState::Idle,
            photos: Vec::new(),
            selected: BTreeSet::new(),
            tile_width: DEFAULT_TILE_SIZE,
            tile_height: DEFAULT_TILE_SIZE,
            last_page: None,
            last_error: None,
            dirty: false,
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> SessionState {
        self.session
    }

    pub fn photos(&self) -> &[PhotoRecord] {
        &self.photos
    }

    pub fn selected_photos(&self) -> Vec<&PhotoRecord> {
        self.selected
            .iter()
            .filter_map(|index| self.photos.get(*index))
            .collect()
    }

    pub fn view(&self) -> AppViewModel {
        let rows = self
            .photos
            .iter()
            .enumerate()
            .map(|(index, photo)| PhotoRowView {
                index,
                id: photo.id().to_string(),
                image_url: photo
                    .best_image_url(self.tile_width, self.tile_height)
                    .ok()
                    .map(|url| url.to_string()),
                selected: self.selected.contains(&index),
            })
            .collect();

        AppViewModel {
            session: self.session,
            photo_count: self.photos.len(),
            selected_count: self.selected.len(),
            rows,
            last_page: self.last_page.clone(),
            last_error: self.last_error.clone(),
            can_load_more: matches!(self.session, SessionState::Ready | SessionState::Failed),
            dirty: self.dirty,
        }
    }

    /// Returns whether anything changed since the last call and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn set_session(&mut self, session: SessionState) {
        if self.session != session {
            self.session = session;
            self.dirty = true;
        }
    }

    pub(crate) fn set_tile_size(&mut self, width: i32, height: i32) {
        if (self.tile_width, self.tile_height) != (width, height) {
            self.tile_width = width;
            self.tile_height = height;
            self.dirty = true;
        }
    }

    pub(crate) fn clear_photos(&mut self) {
        if !self.photos.is_empty() || !self.selected.is_empty() {
            self.dirty = true;
        }
        self.photos.clear();
        self.selected.clear();
        self.last_page = None;
    }

    pub(crate) fn set_error(&mut self, reason: Option<String>) {
        self.last_error = reason;
        self.dirty = true;
    }

    /// Appends a page, dropping photos equal to one already shown.
    pub(crate) fn append_page(&mut self, photos: Vec<PhotoRecord>, skipped: usize) {
        let mut stats = PageStats {
            added: 0,
            duplicates: 0,
            skipped,
        };
        for photo in photos {
            if self.photos.contains(&photo) {
                stats.duplicates += 1;
            } else {
                self.photos.push(photo);
                stats.added += 1;
            }
        }
        self.last_page = Some(stats);
        self.last_error = None;
        self.dirty = true;
    }

    pub(crate) fn toggle_selection(&mut self, index: usize) -> bool {
        if index >= self.photos.len() {
            return false;
        }
        if !self.selected.remove(&index) {
            self.selected.insert(index);
        }
        self.dirty = true;
        true
    }
}
