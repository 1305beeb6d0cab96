//! Title normalization and fuzzy matching.
//!
//! Titles arrive from hand-maintained lists with uneven whitespace, edition
//! suffixes, and the occasional typo. This module provides the canonical
//! title form used for de-duplication, slug generation for stable ids, and
//! the Levenshtein-based fuzzy matcher used by the gap reporter.

/// Canonicalize a display title: trim and collapse internal whitespace.
///
/// Idempotent — normalizing an already-normalized title returns it unchanged.
pub fn normalize_title(title: &str) -> String {
    let mut result = String::with_capacity(title.len());
    let mut last_was_space = false;
    for c in title.trim().chars() {
        if c.is_whitespace() {
            if !last_was_space {
                result.push(' ');
                last_was_space = true;
            }
        } else {
            result.push(c);
            last_was_space = false;
        }
    }
    result
}

/// Lowercased normalized form used as the comparison key for matching.
pub fn title_key(title: &str) -> String {
    normalize_title(title).to_lowercase()
}

/// Convert a string to a URL-safe slug.
pub fn slugify(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut last_was_separator = false;

    for c in s.chars() {
        if c.is_ascii_alphanumeric() {
            result.push(c.to_ascii_lowercase());
            last_was_separator = false;
        } else if !last_was_separator && !result.is_empty() {
            result.push('-');
            last_was_separator = true;
        }
    }

    if result.ends_with('-') {
        result.pop();
    }

    result
}

/// Edition/variant qualifiers recognized at the end of a title.
/// Longer qualifiers first, so "HD Remaster" wins over "Remaster".
const EDITION_QUALIFIERS: &[&str] = &[
    "game of the year edition",
    "collector's edition",
    "collectors edition",
    "anniversary edition",
    "definitive edition",
    "complete edition",
    "enhanced edition",
    "special edition",
    "limited edition",
    "deluxe edition",
    "goty edition",
    "director's cut",
    "hd collection",
    "hd remaster",
    "remastered",
    "remaster",
    "hd",
];

/// Split a recognized edition qualifier off a title.
///
/// Returns the base title and the qualifier, if one was found. The qualifier
/// may be attached with a colon, a dash, or parentheses:
///
/// ```
/// use shelfgap_catalog::normalize::split_edition;
///
/// let (base, qualifier) = split_edition("Halo: Combat Evolved");
/// assert_eq!(base, "Halo: Combat Evolved");
/// assert!(qualifier.is_none());
///
/// let (base, qualifier) = split_edition("Skyward Sword: Collector's Edition");
/// assert_eq!(base, "Skyward Sword");
/// assert_eq!(qualifier.as_deref(), Some("Collector's Edition"));
/// ```
pub fn split_edition(title: &str) -> (String, Option<String>) {
    let normalized = normalize_title(title);
    let (body, had_paren) = match normalized.strip_suffix(')') {
        Some(s) => (s, true),
        None => (normalized.as_str(), false),
    };
    let lower = body.to_lowercase();

    for qualifier in EDITION_QUALIFIERS {
        if !lower.ends_with(qualifier) {
            continue;
        }
        let cut = body.len() - qualifier.len();
        if !body.is_char_boundary(cut) {
            continue;
        }
        let prefix = &body[..cut];
        // Word boundary: don't treat "Rockhard" as "Rockhar" + "HD".
        if !prefix.is_empty()
            && !prefix.ends_with(|c: char| c.is_whitespace() || matches!(c, ':' | '-' | '('))
        {
            continue;
        }
        let qualifier_text = body[cut..].to_string();

        let base = if had_paren {
            match prefix.trim_end().strip_suffix('(') {
                Some(b) => b.trim_end(),
                None => continue,
            }
        } else {
            let trimmed = prefix.trim_end();
            trimmed
                .strip_suffix(':')
                .or_else(|| trimmed.strip_suffix('-'))
                .unwrap_or(trimmed)
                .trim_end()
        };

        if base.is_empty() {
            continue;
        }
        return (base.to_string(), Some(qualifier_text));
    }

    (normalized, None)
}

/// Classic two-row Levenshtein edit distance.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0usize; b.len() + 1];

    for (i, &ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let cost = if ca == cb { 0 } else { 1 };
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Maximum edit distance considered a fuzzy match for a title of this length.
///
/// Short titles allow up to 2 edits; longer titles scale proportionally.
pub fn fuzzy_threshold(len: usize) -> usize {
    if len < 20 { 2 } else { len / 10 }
}

/// Whether two titles match fuzzily on their normalized keys.
pub fn titles_match(a: &str, b: &str) -> bool {
    let ka = title_key(a);
    let kb = title_key(b);
    if ka == kb {
        return true;
    }
    let threshold = fuzzy_threshold(ka.len().max(kb.len()));
    levenshtein(&ka, &kb) <= threshold
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_collapses_whitespace() {
        assert_eq!(normalize_title("  Super   Mario\tBros.  "), "Super Mario Bros.");
    }

    #[test]
    fn normalize_is_idempotent() {
        let once = normalize_title("  Metroid   Prime ");
        assert_eq!(normalize_title(&once), once);
    }

    #[test]
    fn slugify_basic() {
        assert_eq!(slugify("Super Mario Bros."), "super-mario-bros");
        assert_eq!(slugify("GoldenEye 007"), "goldeneye-007");
    }

    #[test]
    fn split_edition_colon() {
        let (base, q) = split_edition("Title X: Collector's Edition");
        assert_eq!(base, "Title X");
        assert_eq!(q.as_deref(), Some("Collector's Edition"));
    }

    #[test]
    fn split_edition_parenthesized() {
        let (base, q) = split_edition("Title X (Game of the Year Edition)");
        assert_eq!(base, "Title X");
        assert_eq!(q.as_deref(), Some("Game of the Year Edition"));
    }

    #[test]
    fn split_edition_suffix_without_separator() {
        let (base, q) = split_edition("Wind Waker HD");
        assert_eq!(base, "Wind Waker");
        assert_eq!(q.as_deref(), Some("HD"));

        // Qualifier must sit on a word boundary.
        let (base, q) = split_edition("Rockhard");
        assert_eq!(base, "Rockhard");
        assert!(q.is_none());
    }

    #[test]
    fn split_edition_none() {
        let (base, q) = split_edition("Mario Kart 64");
        assert_eq!(base, "Mario Kart 64");
        assert!(q.is_none());
    }

    #[test]
    fn split_edition_bare_qualifier_kept() {
        // A title that IS a qualifier should not split into an empty base.
        let (base, q) = split_edition("Remastered");
        assert_eq!(base, "Remastered");
        assert!(q.is_none());
    }

    #[test]
    fn levenshtein_basic() {
        assert_eq!(levenshtein("kitten", "sitting"), 3);
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("same", "same"), 0);
    }

    #[test]
    fn fuzzy_threshold_scales() {
        assert_eq!(fuzzy_threshold(5), 2);
        assert_eq!(fuzzy_threshold(19), 2);
        assert_eq!(fuzzy_threshold(30), 3);
    }

    #[test]
    fn titles_match_tolerates_typos() {
        assert!(titles_match("GoldenEye 007", "Goldeneye 007"));
        assert!(titles_match("Metroid Prime", "Metroid Prme"));
        assert!(!titles_match("Metroid Prime", "Metroid Fusion"));
    }
}
