//! Parser for markdown franchise-list entries.
//!
//! Hand-maintained franchise lists follow a loose bullet convention:
//! ```text
//! - **Game Title** (1997) - Platform/Platform ***[MISSING data]***
//! ```
//!
//! This parser extracts the title, release year, platform tokens, and the
//! missing-from-database marker from these lines. It tolerates absent bold
//! markers, absent years, absent platforms, any casing on the MISSING
//! marker, and indented sub-bullets (edition variants of the entry above).

/// One classified input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedLine {
    /// Empty or purely structural (horizontal rules).
    Blank,
    /// A markdown heading (`# Franchise`, `## Spin-offs`, ...).
    Heading,
    /// A game entry.
    Entry(EntryLine),
    /// Nothing extractable; carries the reason for the skip report.
    Unrecognized { reason: String },
}

/// Parsed fields of a single game-entry line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryLine {
    /// Count of leading whitespace characters. Non-zero marks a sub-bullet,
    /// which callers treat as an edition variant of the previous entry.
    pub indent: usize,
    /// Raw title text, whitespace-normalized but not otherwise rewritten.
    pub title: String,
    pub year: Option<i32>,
    /// Platform tokens as written, split on `/` and `,`. Not yet
    /// canonicalized against the platform vocabulary.
    pub platforms: Vec<String>,
    /// Set when the line carries a `[MISSING ...]` marker.
    pub missing: bool,
    /// Trailing text inside the MISSING marker, e.g. "shut down 2021".
    pub note: Option<String>,
}

/// Parse one line of a franchise list.
///
/// # Examples
///
/// ```
/// use shelfgap_catalog::line_parser::{parse_list_line, ParsedLine};
///
/// let parsed = parse_list_line("- **Super Mario Bros.** (1985) - NES");
/// let ParsedLine::Entry(entry) = parsed else { panic!() };
/// assert_eq!(entry.title, "Super Mario Bros.");
/// assert_eq!(entry.year, Some(1985));
/// assert_eq!(entry.platforms, vec!["NES"]);
/// assert!(!entry.missing);
///
/// let parsed = parse_list_line("- **GoldenEye 007** (1997) - Nintendo 64 ***[MISSING]***");
/// let ParsedLine::Entry(entry) = parsed else { panic!() };
/// assert!(entry.missing);
/// ```
pub fn parse_list_line(line: &str) -> ParsedLine {
    if line.trim().is_empty() {
        return ParsedLine::Blank;
    }

    let indent = line.len() - line.trim_start().len();
    let trimmed = line.trim();

    if trimmed.starts_with('#') {
        return ParsedLine::Heading;
    }
    // Horizontal rules: ---, ***, ___, === and friends.
    if trimmed.chars().all(|c| matches!(c, '-' | '*' | '_' | '=')) {
        return ParsedLine::Blank;
    }

    let content = strip_bullet(trimmed);

    let (content, missing, note) = extract_missing_marker(content);
    let content = content.trim();

    let (title_raw, year, platforms) = extract_fields(content);

    let title = crate::normalize::normalize_title(title_raw.trim().trim_end_matches('-').trim());
    if title.is_empty() {
        return ParsedLine::Unrecognized {
            reason: "no title extractable".to_string(),
        };
    }

    ParsedLine::Entry(EntryLine {
        indent,
        title,
        year,
        platforms,
        missing,
        note,
    })
}

/// Parse a whole document, pairing each non-blank line with its 1-based number.
///
/// Blank lines, headings, and rules are dropped; entries and unrecognized
/// lines are returned for the importer to act on.
pub fn parse_list(text: &str) -> Vec<(usize, ParsedLine)> {
    text.lines()
        .enumerate()
        .filter_map(|(i, line)| match parse_list_line(line) {
            ParsedLine::Blank | ParsedLine::Heading => None,
            parsed => Some((i + 1, parsed)),
        })
        .collect()
}

// ── Internal parsing ────────────────────────────────────────────────────────

/// Strip a leading list-bullet marker (`- `, `* `, `+ `) if present.
fn strip_bullet(s: &str) -> &str {
    let mut chars = s.char_indices();
    match (chars.next(), chars.next()) {
        (Some((_, '-' | '*' | '+')), Some((i, c))) if c.is_whitespace() => {
            s[i + c.len_utf8()..].trim_start()
        }
        _ => s,
    }
}

/// Find and remove a `[MISSING ...]` marker (any casing), along with the
/// asterisk runs that usually wrap it.
///
/// Returns the remaining text, whether the marker was present, and any
/// trailing text inside the bracket beyond the MISSING word itself.
fn extract_missing_marker(content: &str) -> (String, bool, Option<String>) {
    let bytes = content.as_bytes();
    let mut open = None;
    for (i, &b) in bytes.iter().enumerate() {
        if b == b'[' && content[i + 1..].len() >= 7 {
            let after = &content[i + 1..];
            if after
                .chars()
                .zip("missing".chars())
                .take(7)
                .all(|(a, b)| a.eq_ignore_ascii_case(&b))
            {
                open = Some(i);
                break;
            }
        }
    }

    let Some(open) = open else {
        return (content.to_string(), false, None);
    };
    let Some(close_rel) = content[open..].find(']') else {
        return (content.to_string(), false, None);
    };
    let close = open + close_rel;

    // Note text: bracket content minus the MISSING word and separators.
    // "data" / "from database" are part of the marker idiom, not a note.
    let inner = &content[open + 1..close];
    let note = inner[7..]
        .trim_start_matches([' ', '-', ':', '–'])
        .trim()
        .to_string();
    let note = match note.to_lowercase().as_str() {
        "" | "data" | "from database" | "from db" | "from store" => None,
        _ => Some(note),
    };

    // Drop the marker and the asterisks hugging it on either side.
    let left = content[..open].trim_end_matches('*').trim_end();
    let right = content[close + 1..].trim_start_matches('*').trim_start();

    let mut rest = left.to_string();
    if !right.is_empty() {
        if !rest.is_empty() {
            rest.push(' ');
        }
        rest.push_str(right);
    }

    (rest, true, note)
}

/// Split the cleaned line content into raw title, year, and platform tokens.
fn extract_fields(content: &str) -> (String, Option<i32>, Vec<String>) {
    // Bold title takes priority: everything inside the first `**...**`.
    if let Some(stripped) = content.strip_prefix("**") {
        if let Some(close) = stripped.find("**") {
            let title = stripped[..close].to_string();
            let remainder = &stripped[close + 2..];
            let (year, platforms) = extract_year_and_platforms(remainder);
            return (title, year, platforms);
        }
    }

    // Otherwise anchor on a `(YYYY)` year parenthetical.
    if let Some((start, end, year)) = find_year_paren(content) {
        let title = content[..start].to_string();
        let (_, platforms) = extract_year_and_platforms(&content[end..]);
        return (title, year, platforms);
    }

    // No bold, no year: the whole thing is the title. Platform extraction
    // without either anchor would eat subtitles, so don't guess.
    (content.to_string(), None, Vec::new())
}

/// Pull a year parenthetical and a ` - Platform/Platform` tail out of the
/// text following the title.
fn extract_year_and_platforms(remainder: &str) -> (Option<i32>, Vec<String>) {
    let mut year = None;
    let mut rest = remainder;

    if let Some((_, end, found)) = find_year_paren(rest) {
        year = found;
        // Platforms conventionally follow the year.
        rest = &rest[end..];
    }

    let rest = rest
        .trim()
        .trim_start_matches(['-', '–', ':'])
        .trim();

    let platforms = split_platforms(rest);
    (year, platforms)
}

/// Locate the first `(YYYY)` parenthetical. Returns byte range and the year
/// when it parses into a plausible release-year window.
fn find_year_paren(s: &str) -> Option<(usize, usize, Option<i32>)> {
    let bytes = s.as_bytes();
    for i in 0..bytes.len() {
        if bytes[i] != b'(' {
            continue;
        }
        if i + 5 < bytes.len()
            && bytes[i + 1..i + 5].iter().all(|b| b.is_ascii_digit())
            && bytes[i + 5] == b')'
        {
            let year: i32 = s[i + 1..i + 5].parse().ok()?;
            let year = (1950..=2100).contains(&year).then_some(year);
            return Some((i, i + 6, year));
        }
    }
    None
}

/// Split a platform tail on `/` and `,`, trimming each token.
fn split_platforms(s: &str) -> Vec<String> {
    if s.is_empty() {
        return Vec::new();
    }
    s.split(['/', ','])
        .map(|p| p.trim().trim_matches('*').trim().to_string())
        .filter(|p| !p.is_empty())
        .collect()
}
