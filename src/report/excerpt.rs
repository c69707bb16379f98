use std::borrow::Cow;

use serde_json::Value;

use super::format::with_thousands;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TruncationStyle {
    Remaining,
    Total,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Excerpt {
    pub text: String,
    pub total_chars: usize,
    pub shown_chars: usize,
}

impl Excerpt {
    pub fn new(content: &str, max_chars: usize) -> Self {
        Self::measured(content, content.chars().count(), max_chars)
    }

    /// `display` is shown in place of content measuring `total_chars`.
    pub fn measured(display: &str, total_chars: usize, max_chars: usize) -> Self {
        let text = if total_chars > max_chars {
            display.chars().take(max_chars).collect()
        } else {
            display.to_string()
        };

        Self {
            text,
            total_chars,
            shown_chars: total_chars.min(max_chars),
        }
    }

    pub fn is_truncated(&self) -> bool {
        self.total_chars > self.shown_chars
    }

    pub fn omitted_chars(&self) -> usize {
        self.total_chars - self.shown_chars
    }

    pub fn truncation_notice(&self, style: TruncationStyle) -> Option<String> {
        if !self.is_truncated() {
            return None;
        }
        Some(match style {
            TruncationStyle::Remaining => format!(
                "... ({} more characters)",
                with_thousands(self.omitted_chars() as u64)
            ),
            TruncationStyle::Total => format!(
                "... (truncated, full content is {} chars)",
                with_thousands(self.total_chars as u64)
            ),
        })
    }
}

pub fn display_text(content: &str, pretty_json: bool) -> Cow<'_, str> {
    if !pretty_json {
        return Cow::Borrowed(content);
    }

    match serde_json::from_str::<Value>(content).and_then(|v| serde_json::to_string_pretty(&v)) {
        Ok(pretty) => Cow::Owned(pretty),
        Err(_) => Cow::Borrowed(content),
    }
}
