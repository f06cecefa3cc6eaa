/// Where the next feed request should start.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FeedCursor {
    /// Nothing fetched since the last reset; the next request hits the endpoint.
    #[default]
    NotStarted,
    /// The API reported a further page at this URL.
    Next(String),
    /// The last page carried no next URL.
    Exhausted,
}

impl FeedCursor {
    pub fn reset(&mut self) {
        *self = FeedCursor::NotStarted;
    }

    /// Records the pagination result of a successful page.
    pub fn advance(&mut self, next_url: Option<String>) {
        *self = match next_url {
            Some(url) if !url.trim().is_empty() => FeedCursor::Next(url),
            _ => FeedCursor::Exhausted,
        };
    }

    /// Base URL of the next request, or `None` once the feed is exhausted.
    pub fn request_base<'a>(&'a self, endpoint: &'a str) -> Option<&'a str> {
        match self {
            FeedCursor::NotStarted => Some(endpoint),
            FeedCursor::Next(url) => Some(url),
            FeedCursor::Exhausted => None,
        }
    }

    pub fn has_more(&self) -> bool {
        matches!(self, FeedCursor::Next(_))
    }
}
