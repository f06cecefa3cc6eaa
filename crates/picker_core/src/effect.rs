#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Rewind the feed cursor to the newest photos.
    ResetFeed,
    FetchNextPage,
    /// Hand control to the login flow.
    StartLogin,
}
