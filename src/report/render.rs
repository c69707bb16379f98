use crate::api::{DocumentSummary, GrokResponse};

use super::excerpt::{Excerpt, TruncationStyle, display_text};
use super::format::{format_duration_ms, format_tokens, with_thousands};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub excerpt_chars: usize,
    pub truncation: TruncationStyle,
    pub pretty_json: bool,
    pub token_breakdown: bool,
    pub show_size: bool,
    pub show_timestamp: bool,
    pub indent: &'static str,
}

impl RenderOptions {
    pub const SUMMARY: Self = Self {
        excerpt_chars: 300,
        truncation: TruncationStyle::Remaining,
        pretty_json: false,
        token_breakdown: false,
        show_size: false,
        show_timestamp: false,
        indent: "   ",
    };

    pub const DUMP: Self = Self {
        excerpt_chars: 100,
        truncation: TruncationStyle::Remaining,
        pretty_json: false,
        token_breakdown: false,
        show_size: true,
        show_timestamp: false,
        indent: "   ",
    };

    pub const LATEST: Self = Self {
        excerpt_chars: 500,
        truncation: TruncationStyle::Total,
        pretty_json: false,
        token_breakdown: false,
        show_size: true,
        show_timestamp: true,
        indent: "",
    };

    pub const DETAIL: Self = Self {
        excerpt_chars: 2000,
        truncation: TruncationStyle::Total,
        pretty_json: true,
        token_breakdown: true,
        show_size: true,
        show_timestamp: true,
        indent: "   ",
    };
}

pub const NOT_PROCESSED: &str = "⏳ Document not yet processed";
pub const NOT_AVAILABLE: &str = "ℹ️  Full Grok response not available";
pub const CLASSIFICATION_HEADING: &str = "📋 Document Classification:";

/// Renders the response block for one document.
pub fn render_response(
    doc: &DocumentSummary,
    response: Option<&GrokResponse>,
    opts: &RenderOptions,
) -> String {
    let indent = opts.indent;

    if !doc.status.is_completed() {
        return format!("{indent}{NOT_PROCESSED}\n");
    }
    let Some(response) = response else {
        return format!("{indent}{NOT_AVAILABLE}\n");
    };

    let mut out = String::new();
    out.push_str(&format!("{indent}✅ Full Grok response available\n"));
    out.push_str(&format!("{indent}Model: {}\n", response.model()));

    if opts.token_breakdown {
        out.push_str(&format!(
            "{indent}Prompt Tokens: {}\n",
            format_tokens(response.prompt_tokens)
        ));
        out.push_str(&format!(
            "{indent}Completion Tokens: {}\n",
            format_tokens(response.completion_tokens)
        ));
        out.push_str(&format!(
            "{indent}Total Tokens: {}\n",
            format_tokens(response.total_tokens)
        ));
    } else {
        out.push_str(&format!(
            "{indent}Tokens: {}\n",
            format_tokens(response.total_tokens)
        ));
    }

    out.push_str(&format!(
        "{indent}Processing Time: {}\n",
        format_duration_ms(response.response_time_ms)
    ));
    if opts.show_size {
        out.push_str(&format!(
            "{indent}Response Size: {} characters\n",
            with_thousands(response.content_chars() as u64)
        ));
    }
    if opts.show_timestamp {
        out.push_str(&format!("{indent}Timestamp: {}\n", response.timestamp()));
    }

    out.push_str(&render_content(response.content(), opts));

    if let Some(classification) = response.classification() {
        out.push_str(&format!("\n{indent}{CLASSIFICATION_HEADING}\n"));
        out.push_str(&format!(
            "{indent}Type: {}\n",
            classification.document_type()
        ));
        out.push_str(&format!(
            "{indent}Subtype: {}\n",
            classification.document_subtype()
        ));
    }

    out
}

fn render_content(content: &str, opts: &RenderOptions) -> String {
    let indent = opts.indent;

    if content.is_empty() {
        return format!("{indent}No raw content available\n");
    }

    let body = display_text(content, opts.pretty_json);
    let excerpt = Excerpt::measured(&body, content.chars().count(), opts.excerpt_chars);

    let mut out = format!(
        "\n{indent}🔍 Raw response (first {} chars):\n",
        opts.excerpt_chars
    );
    for line in excerpt.text.lines() {
        out.push_str(&format!("{indent}{line}\n"));
    }
    if let Some(notice) = excerpt.truncation_notice(opts.truncation) {
        out.push_str(&format!("{indent}{notice}\n"));
    }
    out
}
