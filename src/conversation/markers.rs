//! Detection of the finished email among assistant replies.
//!
//! The model is never asked for a structured "done" signal, so a reply is taken
//! as final when it contains one of a few literal phrases. Matching is a plain
//! case-sensitive substring test. An ordinary question that happens to mention
//! "Subject" will therefore end the interview early.

/// Phrases that mark a reply as the final email.
pub const DEFAULT_MARKERS: &[&str] = &["Here is the email", "Subject"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionMarkers {
    markers: Vec<String>,
}

impl Default for CompletionMarkers {
    fn default() -> Self {
        Self {
            markers: DEFAULT_MARKERS.iter().map(|m| m.to_string()).collect(),
        }
    }
}

impl CompletionMarkers {
    /// Replace the default phrases. Empty strings are dropped since they would
    /// match every reply.
    pub fn new<I, S>(markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            markers: markers.into_iter().map(Into::into).filter(|m| !m.is_empty()).collect(),
        }
    }

    pub fn markers(&self) -> &[String] {
        &self.markers
    }

    /// Returns the first marker found in `content`, if any.
    pub fn find(&self, content: &str) -> Option<&str> {
        self.markers.iter().map(String::as_str).find(|m| content.contains(m))
    }

    pub fn is_final(&self, content: &str) -> bool {
        self.find(content).is_some()
    }
}
