// src/core/html.rs
// Low-level HTML string helpers.
// Deliberately naive but tailored to the portal's table markup.
// They operate case-insensitively on ASCII tag/attribute names.

/// Find the next complete tag block from `from` onwards, case-insensitive.
/// A block is from the start of the opening tag to the end of the closing tag.
///
/// Example:
/// `<tr ...> ... </tr>` or `<td ...> ... </td>`
pub fn next_tag_block_ci(s: &str, open_tag: &str, close_tag: &str, from: usize) -> Option<(usize, usize)> {
    let lc = to_lowercase_fast(s);
    let open_lc = to_lowercase_fast(open_tag);
    let close_lc = to_lowercase_fast(close_tag);

    // Locate the opening tag
    let start = lc.get(from..)?.find(&open_lc)? + from;
    // Jump past the end of the opening tag
    let open_end = s[start..].find('>')? + start + 1;
    // Find the closing tag
    let end_rel = lc[open_end..].find(&close_lc)?;
    let end = open_end + end_rel + close_tag.len();
    Some((start, end))
}

/// Given a complete tag block like `<td ...>INNER</td>`,
/// return the INNER text without the wrapping tags (still may contain nested tags).
pub fn inner_after_open_tag(block: &str) -> String {
    if let Some(open_end) = block.find('>') {
        if let Some(close_start) = block.rfind('<') {
            if close_start > open_end {
                return block[open_end + 1..close_start].to_string();
            }
        }
    }
    String::new()
}

/// Inner text of a block, tags stripped and entities/whitespace normalized.
/// The common path for reading one table cell. A `<br>` inside a cell
/// separates stacked values (code / enrollment kind), so it becomes a space
/// rather than vanishing with the tag.
pub fn cell_text(block: &str) -> String {
    let inner = normalize_entities(&inner_after_open_tag(block));
    let lc = to_lowercase_fast(&inner);
    let mut spaced = String::with_capacity(inner.len() + 4);
    let mut last = 0usize;
    for (i, _) in lc.match_indices("<br") {
        spaced.push_str(&inner[last..i]);
        spaced.push(' ');
        last = i;
    }
    spaced.push_str(&inner[last..]);
    strip_tags(spaced)
}

/// Remove all HTML tags `<...>` from the string, then collapse whitespace.
pub fn strip_tags(s: String) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;
    for ch in s.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    normalize_ws(&out)
}

/// Minimal HTML entity decoding: the portal emits `&nbsp;` and `&amp;` only.
pub fn normalize_entities(s: &str) -> String {
    s.replace("&nbsp;", " ").replace("&amp;", "&")
}

/// Collapse sequences of whitespace into a single space and trim.
pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space {
                out.push(' ');
                prev_space = true;
            }
        } else {
            out.push(ch);
            prev_space = false;
        }
    }
    out.trim().to_string()
}

/// Fast ASCII-only lowercasing for tag/attribute matching.
pub fn to_lowercase_fast(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_ascii() { c.to_ascii_lowercase() } else { c })
        .collect()
}

/// Does the opening tag at the start of `block` carry `needle` anywhere in its
/// attribute text? Tolerant of quoting style and attribute order.
pub fn open_tag_contains_ci(block: &str, needle: &str) -> bool {
    let end = match block.find('>') {
        Some(e) => e,
        None => return false,
    };
    to_lowercase_fast(&block[..end]).contains(&to_lowercase_fast(needle))
}
