// src/faculty.rs
//! Faculty name → directory URL linking.
//!
//! Layouts that carry a faculty column get each name linked to the
//! university's public faculty directory. The directory keys pages by a
//! lowercase hyphenated slug of the bare name, titles dropped.

const DIRECTORY_PREFIX: &str = "https://www.srmist.edu.in/faculty/";

const TITLES: &[&str] = &["dr", "prof", "mr", "mrs", "ms"];

/// Directory URL for a faculty name, or None when the cell holds nothing
/// linkable (empty, placeholder dashes, bare initials).
pub fn link_for(name: &str) -> Option<String> {
    let slug = slugify(name);
    if slug.len() < 3 {
        return None;
    }
    Some(join!(DIRECTORY_PREFIX, &slug, "/"))
}

/// "Dr. B. Rao" → "b-rao". Titles go, punctuation becomes hyphens,
/// runs collapse.
fn slugify(name: &str) -> String {
    let mut words: Vec<String> = name
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_ascii_lowercase)
        .collect();

    if let Some(first) = words.first() {
        if TITLES.contains(&first.as_str()) {
            words.remove(0);
        }
    }
    words.join("-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn titles_are_dropped() {
        assert_eq!(link_for("Dr. Rao").unwrap(), "https://www.srmist.edu.in/faculty/rao/");
        assert_eq!(slugify("Prof. A. K. Iyer"), "a-k-iyer");
    }

    #[test]
    fn unlinkable_cells_yield_none() {
        assert_eq!(link_for(""), None);
        assert_eq!(link_for("—"), None);
        assert_eq!(link_for("Dr."), None);
    }
}
