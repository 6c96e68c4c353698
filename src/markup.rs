//! SSML rendering for puns.
//!
//! The punchline of a pun is almost always its last two words, so those are
//! wrapped in `<emphasis level="strong">` and the rest is spoken plainly.

use std::fmt;

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum MarkupError {
    #[error("need at least three words to place emphasis, got {0:?}")]
    TooFewWords(String),
}

/// A pun split at its second-to-last space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmphasisSplit<'a> {
    /// Everything before the second-to-last space.
    pub plain: &'a str,
    /// The second-to-last space and everything after it.
    pub emphasized: &'a str,
}

impl<'a> EmphasisSplit<'a> {
    pub fn new(text: &'a str) -> Result<Self, MarkupError> {
        let last = text.rfind(' ');
        let split_at = last
            .and_then(|last| text[..last].rfind(' '))
            .ok_or_else(|| MarkupError::TooFewWords(text.to_string()))?;

        let (plain, emphasized) = text.split_at(split_at);
        Ok(Self { plain, emphasized })
    }
}

impl fmt::Display for EmphasisSplit<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<speak>{} <emphasis level=\"strong\">{}</emphasis></speak>",
            escape_xml(self.plain),
            escape_xml(self.emphasized)
        )
    }
}

/// Render `text` as an SSML document with strong emphasis on the last two words.
pub fn to_ssml(text: &str) -> Result<String, MarkupError> {
    Ok(EmphasisSplit::new(text)?.to_string())
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}
