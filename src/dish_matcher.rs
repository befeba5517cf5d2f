//! # Knowledge Base Matcher
//!
//! Matches an extracted dish name against the knowledge base. Three tiers are
//! tried in order, each with a lower confidence than the last:
//!
//! - **Exact**: a normalized name equals an entry name in either script
//! - **Partial**: one name contains the other (word-aligned for Latin text)
//! - **Fuzzy**: a Latin name within a small edit distance of an entry name,
//!   which absorbs OCR letter errors such as "Hopqers"

use log::{debug, trace};
use std::sync::Arc;

use crate::dish_knowledge::{DishKnowledgeBase, IndexedEntry};
use crate::text_processing::{has_tamil, normalize_for_match, split_scripts};

pub const EXACT_MATCH_CONFIDENCE: f64 = 95.0;
pub const BILINGUAL_EXACT_MATCH_CONFIDENCE: f64 = 100.0;
pub const PARTIAL_MATCH_MIN_CONFIDENCE: f64 = 55.0;
pub const PARTIAL_MATCH_MAX_CONFIDENCE: f64 = 75.0;
pub const FUZZY_MATCH_BASE_CONFIDENCE: f64 = 60.0;
pub const FUZZY_MATCH_PENALTY_PER_EDIT: f64 = 5.0;

/// Shortest name (in characters) allowed to take part in a partial match
const MIN_PARTIAL_CHARS: usize = 4;
/// Shortest name (in characters) allowed to take part in a fuzzy match
const MIN_FUZZY_CHARS: usize = 6;
/// Names shorter than this tolerate a single edit at most
const SHORT_NAME_CHARS: usize = 10;
const SHORT_NAME_MAX_EDITS: usize = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    Exact,
    Partial,
    Fuzzy,
}

/// Result of a successful knowledge base lookup
#[derive(Debug, Clone, PartialEq)]
pub struct DishMatch {
    pub canonical_english: String,
    pub canonical_tamil: String,
    pub category: String,
    pub is_vegetarian: bool,
    pub is_spicy: bool,
    pub match_confidence: f64,
    pub kind: MatchKind,
}

impl DishMatch {
    fn from_entry(indexed: &IndexedEntry, match_confidence: f64, kind: MatchKind) -> Self {
        let entry = &indexed.entry;
        Self {
            canonical_english: entry.english.clone(),
            canonical_tamil: entry.tamil.clone(),
            category: entry.default_category.clone(),
            is_vegetarian: entry.is_vegetarian,
            is_spicy: entry.is_spicy,
            match_confidence,
            kind,
        }
    }
}

/// Fuzzy matcher over a shared knowledge base
#[derive(Debug, Clone)]
pub struct DishMatcher {
    knowledge_base: Arc<DishKnowledgeBase>,
    max_edit_distance: usize,
}

impl DishMatcher {
    pub fn new(knowledge_base: Arc<DishKnowledgeBase>, max_edit_distance: usize) -> Self {
        Self {
            knowledge_base,
            max_edit_distance,
        }
    }

    /// Match a raw name against the knowledge base
    ///
    /// The full name and each of its script segments are tried, so a
    /// bilingual name like "அப்பம் (Hoppers)" matches on either half.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use menu_extract::dish_knowledge::DishKnowledgeBase;
    /// use menu_extract::dish_matcher::{DishMatcher, MatchKind};
    /// use std::sync::Arc;
    ///
    /// let matcher = DishMatcher::new(Arc::new(DishKnowledgeBase::builtin()?), 2);
    /// let found = matcher.match_name("அப்பம் (Hoppers)").unwrap();
    /// assert_eq!(found.kind, MatchKind::Exact);
    /// assert_eq!(found.canonical_english, "Hoppers");
    /// assert!(matcher.match_name("Dish 1").is_none());
    /// # Ok::<(), menu_extract::menu_errors::MenuError>(())
    /// ```
    pub fn match_name(&self, raw_name: &str) -> Option<DishMatch> {
        let segments = name_segments(raw_name);
        if segments.is_empty() {
            return None;
        }

        let found = self
            .exact_match(&segments)
            .or_else(|| self.partial_match(&segments))
            .or_else(|| self.fuzzy_match(&segments));

        match &found {
            Some(m) => debug!(
                "Matched '{}' to '{}' ({:?}, {:.1})",
                raw_name, m.canonical_english, m.kind, m.match_confidence
            ),
            None => trace!("No knowledge base match for '{}'", raw_name),
        }
        found
    }

    fn exact_match(&self, segments: &[String]) -> Option<DishMatch> {
        let mut best: Option<(&IndexedEntry, usize)> = None;

        for indexed in self.knowledge_base.indexed() {
            let english_hit = segments.iter().any(|s| *s == indexed.english_key);
            let tamil_hit = segments.iter().any(|s| *s == indexed.tamil_key);
            let hits = english_hit as usize + tamil_hit as usize;

            if hits > best.map_or(0, |(_, h)| h) {
                best = Some((indexed, hits));
            }
        }

        best.map(|(indexed, hits)| {
            let confidence = if hits == 2 {
                BILINGUAL_EXACT_MATCH_CONFIDENCE
            } else {
                EXACT_MATCH_CONFIDENCE
            };
            DishMatch::from_entry(indexed, confidence, MatchKind::Exact)
        })
    }

    fn partial_match(&self, segments: &[String]) -> Option<DishMatch> {
        let mut best: Option<(&IndexedEntry, f64)> = None;

        for indexed in self.knowledge_base.indexed() {
            for key in [&indexed.english_key, &indexed.tamil_key] {
                for segment in segments {
                    if let Some(ratio) = containment_ratio(segment, key) {
                        let confidence = PARTIAL_MATCH_MIN_CONFIDENCE
                            + (PARTIAL_MATCH_MAX_CONFIDENCE - PARTIAL_MATCH_MIN_CONFIDENCE) * ratio;
                        if confidence > best.map_or(0.0, |(_, c)| c) {
                            best = Some((indexed, confidence));
                        }
                    }
                }
            }
        }

        best.map(|(indexed, confidence)| {
            DishMatch::from_entry(indexed, confidence, MatchKind::Partial)
        })
    }

    fn fuzzy_match(&self, segments: &[String]) -> Option<DishMatch> {
        let mut best: Option<(&IndexedEntry, usize)> = None;

        for segment in segments.iter().filter(|s| !has_tamil(s)) {
            let segment_chars = segment.chars().count();
            if segment_chars < MIN_FUZZY_CHARS {
                continue;
            }
            let allowed = self.allowed_edits(segment_chars);

            for indexed in self.knowledge_base.indexed() {
                if indexed.english_key.chars().count() < MIN_FUZZY_CHARS {
                    continue;
                }
                let distance = levenshtein_distance(segment, &indexed.english_key);
                if distance <= allowed
                    && distance < best.map_or(usize::MAX, |(_, d)| d)
                {
                    best = Some((indexed, distance));
                }
            }
        }

        best.map(|(indexed, distance)| {
            let confidence = (FUZZY_MATCH_BASE_CONFIDENCE
                - FUZZY_MATCH_PENALTY_PER_EDIT * distance as f64)
                .max(0.0);
            DishMatch::from_entry(indexed, confidence, MatchKind::Fuzzy)
        })
    }

    /// Edit budget for a name of the given length
    fn allowed_edits(&self, name_chars: usize) -> usize {
        if name_chars < SHORT_NAME_CHARS {
            self.max_edit_distance.min(SHORT_NAME_MAX_EDITS)
        } else {
            self.max_edit_distance
        }
    }
}

/// Normalized full name plus its per-script segments, de-duplicated
fn name_segments(raw_name: &str) -> Vec<String> {
    let names = split_scripts(raw_name);
    let mut segments: Vec<String> = Vec::with_capacity(3);

    for candidate in [raw_name, names.english.as_str(), names.tamil.as_str()] {
        let normalized = normalize_for_match(candidate);
        if !normalized.is_empty() && !segments.contains(&normalized) {
            segments.push(normalized);
        }
    }
    segments
}

/// Length ratio (shorter / longer) when one name contains the other
///
/// Tamil names match as substrings; Latin names must align on words. The
/// shorter side needs at least four characters.
fn containment_ratio(a: &str, b: &str) -> Option<f64> {
    let (shorter, longer) = if a.chars().count() <= b.chars().count() {
        (a, b)
    } else {
        (b, a)
    };

    let shorter_len = shorter.chars().count();
    if shorter_len < MIN_PARTIAL_CHARS || shorter == longer {
        return None;
    }

    let contained = if has_tamil(shorter) {
        longer.contains(shorter)
    } else {
        format!(" {} ", longer).contains(&format!(" {} ", shorter))
    };

    contained.then(|| shorter_len as f64 / longer.chars().count() as f64)
}

/// Calculate Levenshtein distance between two strings
fn levenshtein_distance(s1: &str, s2: &str) -> usize {
    let s1_chars: Vec<char> = s1.chars().collect();
    let s2_chars: Vec<char> = s2.chars().collect();

    let mut previous: Vec<usize> = (0..=s2_chars.len()).collect();
    let mut current = vec![0; s2_chars.len() + 1];

    for (i, c1) in s1_chars.iter().enumerate() {
        current[0] = i + 1;
        for (j, c2) in s2_chars.iter().enumerate() {
            let cost = if c1 == c2 { 0 } else { 1 };
            current[j + 1] = (previous[j + 1] + 1)
                .min(current[j] + 1)
                .min(previous[j] + cost);
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[s2_chars.len()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dish_knowledge::DishKnowledgeEntry;

    fn fixture_matcher() -> DishMatcher {
        let base = DishKnowledgeBase::new(vec![
            DishKnowledgeEntry::new("அப்பம்", "Hoppers", "Hoppers").vegetarian(),
            DishKnowledgeEntry::new("நண்டு கறி", "Jaffna Crab Curry", "Curries").spicy(),
            DishKnowledgeEntry::new("கொத்து ரொட்டி", "Kottu Roti", "Kottu").spicy(),
        ])
        .unwrap();
        DishMatcher::new(Arc::new(base), 2)
    }

    #[test]
    fn test_exact_match_either_script() {
        let matcher = fixture_matcher();

        let english = matcher.match_name("hoppers").unwrap();
        assert_eq!(english.kind, MatchKind::Exact);
        assert_eq!(english.match_confidence, EXACT_MATCH_CONFIDENCE);
        assert_eq!(english.canonical_tamil, "அப்பம்");

        let tamil = matcher.match_name("நண்டு கறி").unwrap();
        assert_eq!(tamil.canonical_english, "Jaffna Crab Curry");
        assert_eq!(tamil.category, "Curries");
    }

    #[test]
    fn test_bilingual_exact_match_scores_highest() {
        let matcher = fixture_matcher();
        let found = matcher.match_name("நண்டு கறி (Jaffna Crab Curry)").unwrap();

        assert_eq!(found.kind, MatchKind::Exact);
        assert_eq!(found.match_confidence, BILINGUAL_EXACT_MATCH_CONFIDENCE);
    }

    #[test]
    fn test_partial_match() {
        let matcher = fixture_matcher();
        let found = matcher.match_name("Cheese Kottu Roti").unwrap();

        assert_eq!(found.kind, MatchKind::Partial);
        assert_eq!(found.canonical_english, "Kottu Roti");
        assert!(found.match_confidence >= PARTIAL_MATCH_MIN_CONFIDENCE);
        assert!(found.match_confidence <= PARTIAL_MATCH_MAX_CONFIDENCE);
    }

    #[test]
    fn test_partial_match_requires_word_alignment() {
        let matcher = fixture_matcher();
        assert!(matcher.match_name("Grasshoppers").is_none());
    }

    #[test]
    fn test_fuzzy_match_absorbs_ocr_errors() {
        let matcher = fixture_matcher();
        let found = matcher.match_name("Hopqers").unwrap();

        assert_eq!(found.kind, MatchKind::Fuzzy);
        assert_eq!(found.canonical_english, "Hoppers");
        assert_eq!(found.match_confidence, 55.0);
    }

    #[test]
    fn test_short_names_allow_one_edit() {
        let base = DishKnowledgeBase::new(vec![
            DishKnowledgeEntry::new("முட்டை ரொட்டி", "Egg Roti", "Bread"),
            DishKnowledgeEntry::new("பால் தேநீர்", "Milk Tea", "Beverages"),
            DishKnowledgeEntry::new("நண்டு கறி", "Jaffna Crab Curry", "Curries"),
        ])
        .unwrap();
        let matcher = DishMatcher::new(Arc::new(base), 2);

        assert!(matcher.match_name("Veg Roti").is_none());
        assert!(matcher.match_name("Mint Tea").is_none());
        assert_eq!(matcher.match_name("Eg Roti").unwrap().kind, MatchKind::Fuzzy);

        let long = matcher.match_name("Jafna Crab Curyy").unwrap();
        assert_eq!(long.kind, MatchKind::Fuzzy);
        assert_eq!(long.match_confidence, 50.0);
    }

    #[test]
    fn test_no_match() {
        let matcher = fixture_matcher();
        assert!(matcher.match_name("Dish 1").is_none());
        assert!(matcher.match_name("").is_none());
    }

    #[test]
    fn test_levenshtein_distance() {
        assert_eq!(levenshtein_distance("", ""), 0);
        assert_eq!(levenshtein_distance("abc", ""), 3);
        assert_eq!(levenshtein_distance("kitten", "sitting"), 3);
        assert_eq!(levenshtein_distance("hoppers", "hopqers"), 1);
    }
}
