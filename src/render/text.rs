//! Plain-text view of rendered HTML, for terminal output.
//!
//! Tags are dropped, block-level closing tags become line breaks, list items
//! get a bullet, and the five escaped entities are restored. Whitespace is
//! then normalized:
//!
//! - Strip leading whitespace and trailing whitespace from each line.
//! - Collapse runs of blank lines down to one.

const BLOCK_TAGS: &[&str] = &["p", "div", "section", "ul", "h2", "h3", "h4", "h5", "h6"];

/// Convert an HTML fragment produced by the renderers into readable text.
pub fn plain_text(html: &str) -> String {
    let mut raw = String::with_capacity(html.len());
    let mut rest = html;

    while let Some(open) = rest.find('<') {
        raw.push_str(&rest[..open]);
        let Some(close) = rest[open..].find('>') else {
            raw.push_str(&rest[open..]);
            rest = "";
            break;
        };
        let tag = &rest[open + 1..open + close];
        let name = tag
            .trim_start_matches('/')
            .split(|c: char| c.is_whitespace())
            .next()
            .unwrap_or("");

        if name == "li" && !tag.starts_with('/') {
            if !raw.ends_with('\n') {
                raw.push('\n');
            }
            raw.push_str("- ");
        } else if name == "br" || (tag.starts_with('/') && BLOCK_TAGS.contains(&name)) {
            raw.push('\n');
        } else if name == "span" && tag.starts_with('/') {
            raw.push(' ');
        }
        rest = &rest[open + close + 1..];
    }
    raw.push_str(rest);

    normalize(&unescape(&raw))
}

fn unescape(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

fn normalize(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut blank = false;

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            if !blank && !result.is_empty() {
                result.push('\n');
            }
            blank = true;
        } else {
            blank = false;
            result.push_str(line);
            result.push('\n');
        }
    }

    result.trim_end().to_string()
}
