//! Escaping policy and display formatting shared by the renderers.
use std::borrow::Cow;

use crate::config::schema::RenderingConfig;
use crate::model::FieldValue;

/// How backend-supplied strings are placed into HTML.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HtmlPolicy {
    /// Escape every value (default).
    #[default]
    Escape,
    /// Insert values verbatim, allowing the backend to send markup. Only for
    /// backends that never echo user input.
    TrustBackend,
}

impl HtmlPolicy {
    pub fn from_config(config: &RenderingConfig) -> Self {
        if config.trust_backend_html {
            Self::TrustBackend
        } else {
            Self::Escape
        }
    }

    /// Prepare a backend string for interpolation.
    pub fn text<'a>(self, raw: &'a str) -> Cow<'a, str> {
        match self {
            Self::Escape => escape(raw),
            Self::TrustBackend => Cow::Borrowed(raw),
        }
    }

    pub fn value(self, value: &FieldValue) -> String {
        self.text(&value.display()).into_owned()
    }

    /// The value, or `fallback` (never escaped, always static text) when absent.
    pub fn value_or(self, value: Option<&FieldValue>, fallback: &str) -> String {
        match value {
            Some(v) => self.value(v),
            None => fallback.to_string(),
        }
    }
}

/// Escape the five HTML-significant characters.
pub fn escape(raw: &str) -> Cow<'_, str> {
    if !raw.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(raw);
    }
    let mut out = String::with_capacity(raw.len() + 16);
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    Cow::Owned(out)
}

/// Format a count with thousands separators and at most three decimals
/// (`1234567` → `1,234,567`, `1234.5` → `1,234.5`).
pub fn format_count(n: f64) -> String {
    if !n.is_finite() {
        return n.to_string();
    }

    let fixed = format!("{:.3}", n.abs());
    let (digits, decimals) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 4);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let decimals = decimals.trim_end_matches('0');
    if !decimals.is_empty() {
        grouped.push('.');
        grouped.push_str(decimals);
    }

    if n < 0.0 && grouped != "0" {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// A `0.0..=1.0` score as a whole percentage (`0.856` → `86`).
pub fn whole_percent(fraction: f64) -> i64 {
    (fraction * 100.0).round() as i64
}

/// `google_ads` → `Google Ads`.
pub fn title_case_id(id: &str) -> String {
    id.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// `high_value_segment` → `HIGH VALUE SEGMENT`.
pub fn upper_label(key: &str) -> String {
    key.replace('_', " ").to_uppercase()
}
