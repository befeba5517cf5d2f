//! # Text Processing Module
//!
//! This module provides the text utilities shared across the pipeline for
//! mixed Tamil/English menu text.
//!
//! ## Features
//!
//! - Splitting a dish name into its Tamil-script and Latin-script parts
//! - Cleaning raw candidate names (edge punctuation, control characters, length)
//! - Normalizing names for knowledge base comparison
//! - Keyword containment with word boundaries for Latin and substrings for Tamil

use log::{trace, warn};

/// Tamil Unicode block
const TAMIL_RANGE: std::ops::RangeInclusive<char> = '\u{0B80}'..='\u{0BFF}';

/// Characters that separate the script segments of a name
const SEGMENT_SEPARATORS: &[char] = &['(', ')', '[', ']', '{', '}', '/', '|', '\\'];

/// Punctuation stripped from the edges of names
const EDGE_PUNCTUATION: &[char] = &[
    '-', '–', '—', '.', ',', ':', ';', '*', '•', '·', '|', '"', '\'', '…', '_', '=', '~', '/',
];

/// A dish name split by script
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptNames {
    pub tamil: String,
    pub english: String,
}

impl ScriptNames {
    pub fn has_both(&self) -> bool {
        !self.tamil.is_empty() && !self.english.is_empty()
    }
}

pub fn is_tamil_char(c: char) -> bool {
    TAMIL_RANGE.contains(&c)
}

pub fn has_tamil(text: &str) -> bool {
    text.chars().any(is_tamil_char)
}

/// Split a raw name into its Tamil and Latin parts
///
/// Order-independent: whichever segment appears is assigned to the matching
/// field. Tokens without letters (numbers, for instance) stay with the
/// segment they follow.
///
/// # Examples
///
/// ```rust
/// use menu_extract::text_processing::split_scripts;
///
/// let names = split_scripts("நண்டு கறி (Jaffna Crab Curry)");
/// assert_eq!(names.tamil, "நண்டு கறி");
/// assert_eq!(names.english, "Jaffna Crab Curry");
///
/// let names = split_scripts("Dish 1");
/// assert_eq!(names.english, "Dish 1");
/// assert!(names.tamil.is_empty());
/// ```
pub fn split_scripts(raw: &str) -> ScriptNames {
    let spaced: String = raw
        .chars()
        .map(|c| if SEGMENT_SEPARATORS.contains(&c) { ' ' } else { c })
        .collect();

    let mut tamil: Vec<String> = Vec::new();
    let mut latin: Vec<String> = Vec::new();
    let mut last_was_tamil = false;

    for token in spaced.split_whitespace() {
        let token = token.trim_matches(|c: char| EDGE_PUNCTUATION.contains(&c));
        if token.is_empty() {
            continue;
        }

        let tamil_part: String = token.chars().filter(|c| is_tamil_char(*c)).collect();
        let latin_part: String = token.chars().filter(|c| !is_tamil_char(*c)).collect();
        let latin_part = latin_part.trim_matches(|c: char| EDGE_PUNCTUATION.contains(&c));
        let latin_has_letters = latin_part.chars().any(|c| c.is_alphabetic());
        let has_tamil_part = !tamil_part.is_empty();

        if has_tamil_part {
            tamil.push(tamil_part);
            last_was_tamil = true;
        }

        if latin_has_letters {
            latin.push(latin_part.to_string());
            last_was_tamil = false;
        } else if !latin_part.is_empty() && !has_tamil_part {
            // Numbers and similar neutral tokens follow the previous segment
            if last_was_tamil {
                tamil.push(latin_part.to_string());
            } else {
                latin.push(latin_part.to_string());
            }
        }
    }

    let names = ScriptNames {
        tamil: tamil.join(" "),
        english: latin.join(" "),
    };
    trace!("Split '{}' -> {:?}", raw, names);
    names
}

/// Clean a raw candidate name
///
/// Strips control characters and edge punctuation, collapses whitespace and
/// limits the length, cutting at a word boundary when possible.
pub fn clean_name(raw: &str, max_length: usize) -> String {
    let without_controls: String = raw
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect();

    let mut name = without_controls
        .split_whitespace()
        .collect::<Vec<&str>>()
        .join(" ");

    name = name
        .trim_matches(|c: char| c.is_whitespace() || EDGE_PUNCTUATION.contains(&c))
        .to_string();

    if name.chars().count() > max_length {
        let original = name.clone();
        let truncated: String = name.chars().take(max_length).collect();
        name = match truncated.rfind(' ') {
            Some(last_space) => truncated[..last_space].to_string(),
            None => truncated,
        };
        warn!(
            "Name truncated due to length limit ({} chars): '{}' -> '{}'",
            max_length, original, name
        );
    }

    name.trim().to_string()
}

/// Normalize text for knowledge base comparison
///
/// Lowercases, folds Latin diacritics, drops zero-width characters, turns
/// punctuation into spaces and collapses whitespace.
pub fn normalize_for_match(text: &str) -> String {
    let mapped: String = text
        .chars()
        .filter(|c| !matches!(*c, '\u{200B}'..='\u{200D}' | '\u{FEFF}'))
        .flat_map(|c| c.to_lowercase())
        .map(|c| {
            if is_tamil_char(c) || c.is_alphanumeric() {
                fold_diacritic(c)
            } else {
                ' '
            }
        })
        .collect();

    mapped.split_whitespace().collect::<Vec<&str>>().join(" ")
}

fn fold_diacritic(c: char) -> char {
    match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' => 'a',
        'è' | 'é' | 'ê' | 'ë' | 'ē' => 'e',
        'ì' | 'í' | 'î' | 'ï' | 'ī' => 'i',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ō' => 'o',
        'ù' | 'ú' | 'û' | 'ü' | 'ū' => 'u',
        'ç' => 'c',
        'ñ' => 'n',
        _ => c,
    }
}

/// Check whether `haystack` contains `keyword`
///
/// Tamil keywords match as plain substrings since Tamil words take suffixes.
/// Latin keywords are matched case-insensitively and must sit on word
/// boundaries, so "veg" does not match "vegetable".
pub fn contains_keyword(haystack: &str, keyword: &str) -> bool {
    let keyword = keyword.trim();
    if keyword.is_empty() {
        return false;
    }
    if has_tamil(keyword) {
        return haystack.contains(keyword);
    }

    let haystack = haystack.to_lowercase();
    let keyword = keyword.to_lowercase();
    haystack.match_indices(&keyword).any(|(start, matched)| {
        let before = haystack[..start].chars().next_back();
        let after = haystack[start + matched.len()..].chars().next();
        !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
    })
}

/// Check whether a word in `haystack` starts with the Latin `keyword`
pub fn contains_word_prefix(haystack: &str, keyword: &str) -> bool {
    let haystack = haystack.to_lowercase();
    let keyword = keyword.trim().to_lowercase();
    if keyword.is_empty() {
        return false;
    }
    haystack.match_indices(&keyword).any(|(start, _)| {
        !haystack[..start]
            .chars()
            .next_back()
            .is_some_and(char::is_alphanumeric)
    })
}

/// Uppercase the first character
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
