use chrono::DateTime;

pub fn with_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

pub fn format_tokens(tokens: Option<u64>) -> String {
    tokens.map(with_thousands).unwrap_or_else(|| "N/A".to_string())
}

pub fn format_duration_ms(ms: Option<f64>) -> String {
    match ms {
        None => "N/A".to_string(),
        Some(ms) if ms < 1000.0 => format!("{ms}ms"),
        Some(ms) => format!("{:.1}s", ms / 1000.0),
    }
}

pub fn format_uploaded_at(uploaded_at: &str) -> String {
    if uploaded_at.is_empty() {
        return "N/A".to_string();
    }
    match DateTime::parse_from_rfc3339(uploaded_at) {
        Ok(ts) => ts.format("%Y-%m-%d %H:%M:%S").to_string(),
        Err(_) => uploaded_at.to_string(),
    }
}

pub fn short_id(document_id: &str) -> &str {
    match document_id.char_indices().nth(8) {
        Some((idx, _)) => &document_id[..idx],
        None => document_id,
    }
}
