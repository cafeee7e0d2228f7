//! Navigation state: the address carrying the current note id.
//!
//! The current note is named by the `note` query parameter. Updates replace
//! the current address instead of adding a history entry.

use url::Url;

pub const NOTE_PARAM: &str = "note";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    url: Url,
}

impl Location {
    pub fn new(url: Url) -> Self {
        Self { url }
    }

    pub fn parse(url: &str) -> Result<Self, url::ParseError> {
        Ok(Self::new(Url::parse(url)?))
    }

    /// `scheme://host[:port]` of the address, without a trailing slash.
    pub fn origin(&self) -> String {
        self.url.origin().ascii_serialization()
    }

    /// The note id carried by the address, if any.
    pub fn note_id(&self) -> Option<String> {
        self.url
            .query_pairs()
            .find(|(key, _)| key == NOTE_PARAM)
            .map(|(_, value)| value.into_owned())
            .filter(|id| !id.is_empty())
    }

    /// Replace the address so it names `note_id`, keeping other parameters.
    pub fn replace_note(&mut self, note_id: &str) {
        let others: Vec<(String, String)> = self
            .url
            .query_pairs()
            .filter(|(key, _)| key != NOTE_PARAM)
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        let mut pairs = self.url.query_pairs_mut();
        pairs.clear();
        for (key, value) in &others {
            pairs.append_pair(key, value);
        }
        pairs.append_pair(NOTE_PARAM, note_id);
        drop(pairs);

        log::debug!("Replaced location with {}", self.url);
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.url)
    }
}
