//! Keyword search over the cached verse and hadith corpora.
//!
//! Scoring per record and field:
//!
//! | hit                               | original | translation |
//! |-----------------------------------|----------|-------------|
//! | exact substring                   | 2.0      | 1.0         |
//! | token containment (fuzzy only)    | 1.0      | 0.5         |
//!
//! A record hitting both fields is a [`MatchType::Both`] match scored with
//! the sum. Matching is case-insensitive, and Arabic is compared with its
//! vowel marks, tatweel and alef variants folded away so a bare query finds
//! fully vocalised text. Results are ranked by descending score with ties in
//! corpus order, then cut to the requested limit.

use std::cmp::Ordering;

use log::debug;
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::content_model::{
    HadithPage, HadithRecord, HighlightFragment, Highlights, MatchType, SearchResult, VerseRecord,
};
use crate::corpus::parse_verse_lines;

pub const ORIGINAL_EXACT_WEIGHT: f64 = 2.0;
pub const ORIGINAL_FUZZY_WEIGHT: f64 = 1.0;
pub const TRANSLATION_EXACT_WEIGHT: f64 = 1.0;
pub const TRANSLATION_FUZZY_WEIGHT: f64 = 0.5;

/// Default number of lines returned by [`search_lines`].
pub const DEFAULT_LINE_RESULTS: usize = 5;

/// Shorter query tokens and record words take no part in fuzzy matching.
const MIN_FUZZY_CHARS: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchOptions {
    pub search_original: bool,
    pub search_translation: bool,
    /// Surah allowlist; empty searches every loaded surah.
    pub surah_filter: Vec<u16>,
    pub fuzzy: bool,
    pub limit: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            search_original: true,
            search_translation: true,
            surah_filter: Vec::new(),
            fuzzy: true,
            limit: 20,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HadithLanguage {
    #[default]
    English,
    Arabic,
    Urdu,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HadithSearchOptions {
    /// Book ids to search; empty means every supported book.
    pub books: Vec<String>,
    pub language: HadithLanguage,
    /// Also match against the Arabic text when searching a translation.
    pub search_original: bool,
    pub fuzzy: bool,
    /// 1-based page number.
    pub page: usize,
    /// Page size.
    pub limit: usize,
}

impl Default for HadithSearchOptions {
    fn default() -> Self {
        Self {
            books: Vec::new(),
            language: HadithLanguage::English,
            search_original: true,
            fuzzy: true,
            page: 1,
            limit: 10,
        }
    }
}

/// A query prepared once and matched against many records.
pub struct PreparedQuery {
    folded: String,
    tokens: Vec<String>,
    pattern: Option<Regex>,
}

impl PreparedQuery {
    /// Returns `None` for blank queries, which match nothing.
    pub fn new(query: &str) -> Option<Self> {
        let raw = query.trim();
        if raw.is_empty() {
            return None;
        }

        let folded = fold(raw);
        let tokens: Vec<String> = words(&folded)
            .filter(|token| token.chars().count() >= MIN_FUZZY_CHARS)
            .map(str::to_string)
            .collect();
        let pattern = RegexBuilder::new(&regex::escape(raw))
            .case_insensitive(true)
            .build()
            .ok();

        Some(Self {
            folded,
            tokens,
            pattern,
        })
    }

    fn exact_hit(&self, folded_field: &str) -> bool {
        !self.folded.is_empty() && folded_field.contains(&self.folded)
    }

    fn fuzzy_hit(&self, folded_field: &str) -> bool {
        words(folded_field).any(|word| {
            self.tokens.iter().any(|token| {
                word.contains(token.as_str())
                    || (word.chars().count() >= MIN_FUZZY_CHARS && token.contains(word))
            })
        })
    }

    fn highlight(&self, field: &str) -> Vec<HighlightFragment> {
        let Some(pattern) = &self.pattern else {
            return whole(field);
        };

        let mut fragments = Vec::new();
        let mut last = 0;
        for found in pattern.find_iter(field) {
            if found.start() > last {
                fragments.push(HighlightFragment {
                    text: field[last..found.start()].to_string(),
                    is_match: false,
                });
            }
            fragments.push(HighlightFragment {
                text: found.as_str().to_string(),
                is_match: true,
            });
            last = found.end();
        }

        if fragments.is_empty() {
            // Matched only after folding diacritics; nothing to split on.
            return whole(field);
        }
        if last < field.len() {
            fragments.push(HighlightFragment {
                text: field[last..].to_string(),
                is_match: false,
            });
        }
        fragments
    }
}

fn whole(field: &str) -> Vec<HighlightFragment> {
    vec![HighlightFragment {
        text: field.to_string(),
        is_match: false,
    }]
}

/// Lowercases and strips what Arabic search should not depend on.
pub fn fold(text: &str) -> String {
    text.chars()
        .filter(|&c| !is_arabic_mark(c))
        .map(|c| match c {
            '\u{0622}' | '\u{0623}' | '\u{0625}' | '\u{0671}' => '\u{0627}',
            '\u{0649}' => '\u{064A}',
            _ => c,
        })
        .flat_map(char::to_lowercase)
        .collect()
}

fn is_arabic_mark(c: char) -> bool {
    matches!(c,
        '\u{0610}'..='\u{061A}'
        | '\u{0640}'
        | '\u{064B}'..='\u{065F}'
        | '\u{0670}'
        | '\u{06D6}'..='\u{06DC}'
        | '\u{06DF}'..='\u{06E8}'
        | '\u{06EA}'..='\u{06ED}')
}

fn words(text: &str) -> impl Iterator<Item = &str> {
    text.split_whitespace()
        .map(|word| word.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|word| !word.is_empty())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Hit {
    Exact,
    Fuzzy,
}

fn field_hit(query: &PreparedQuery, field: &str, fuzzy: bool) -> Option<Hit> {
    let folded = fold(field);
    if query.exact_hit(&folded) {
        Some(Hit::Exact)
    } else if fuzzy && query.fuzzy_hit(&folded) {
        Some(Hit::Fuzzy)
    } else {
        None
    }
}

/// Scores one record given the text of each field taking part in the search.
pub fn score_fields(
    query: &PreparedQuery,
    original: Option<&str>,
    translation: Option<&str>,
    fuzzy: bool,
) -> Option<(MatchType, f64, Highlights)> {
    let mut score = 0.0;
    let mut highlights = Highlights::default();

    let original_hit = original.and_then(|text| {
        let hit = field_hit(query, text, fuzzy)?;
        match hit {
            Hit::Exact => {
                score += ORIGINAL_EXACT_WEIGHT;
                highlights.original = query.highlight(text);
            }
            Hit::Fuzzy => {
                score += ORIGINAL_FUZZY_WEIGHT;
                highlights.original = whole(text);
            }
        }
        Some(hit)
    });

    let translation_hit = translation.and_then(|text| {
        let hit = field_hit(query, text, fuzzy)?;
        match hit {
            Hit::Exact => {
                score += TRANSLATION_EXACT_WEIGHT;
                highlights.translation = query.highlight(text);
            }
            Hit::Fuzzy => {
                score += TRANSLATION_FUZZY_WEIGHT;
                highlights.translation = whole(text);
            }
        }
        Some(hit)
    });

    let match_type = match (original_hit, translation_hit) {
        (Some(_), Some(_)) => MatchType::Both,
        (Some(_), None) => MatchType::Original,
        (None, Some(_)) => MatchType::Translation,
        (None, None) => return None,
    };
    Some((match_type, score, highlights))
}

fn rank<R>(results: &mut [SearchResult<R>]) {
    // sort_by is stable: equal scores keep corpus order
    results.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
}

/// Searches `verses` (in corpus order) and returns the best `options.limit` matches.
pub fn search_verses<'a>(
    verses: impl IntoIterator<Item = &'a VerseRecord>,
    query: &str,
    options: &SearchOptions,
) -> Vec<SearchResult<VerseRecord>> {
    let Some(prepared) = PreparedQuery::new(query) else {
        return Vec::new();
    };
    if !options.search_original && !options.search_translation {
        return Vec::new();
    }

    let mut results: Vec<SearchResult<VerseRecord>> = verses
        .into_iter()
        .filter(|verse| {
            options.surah_filter.is_empty() || options.surah_filter.contains(&verse.surah_number)
        })
        .filter_map(|verse| {
            let original = options.search_original.then_some(verse.text.as_str());
            let translation = options.search_translation.then_some(verse.translation.as_str());
            let (match_type, score, highlights) =
                score_fields(&prepared, original, translation, options.fuzzy)?;
            Some(SearchResult {
                record: verse.clone(),
                match_type,
                score,
                highlights,
            })
        })
        .collect();

    rank(&mut results);
    debug!("Verse search '{}' matched {} records", query.trim(), results.len());
    results.truncate(options.limit);
    results
}

/// Ranks every matching hadith and returns the requested page.
pub fn search_hadiths<'a>(
    hadiths: impl IntoIterator<Item = &'a HadithRecord>,
    query: &str,
    options: &HadithSearchOptions,
) -> HadithPage {
    let Some(prepared) = PreparedQuery::new(query) else {
        return HadithPage::empty();
    };

    let mut results: Vec<SearchResult<HadithRecord>> = hadiths
        .into_iter()
        .filter_map(|hadith| {
            let (original, translation) = match options.language {
                HadithLanguage::Arabic => (Some(hadith.arabic.as_str()), None),
                HadithLanguage::English => (
                    options.search_original.then_some(hadith.arabic.as_str()),
                    Some(hadith.text.as_str()),
                ),
                HadithLanguage::Urdu => (
                    options.search_original.then_some(hadith.arabic.as_str()),
                    Some(hadith.urdu.as_deref().unwrap_or("")),
                ),
            };
            let (match_type, score, highlights) =
                score_fields(&prepared, original, translation, options.fuzzy)?;
            Some(SearchResult {
                record: hadith.clone(),
                match_type,
                score,
                highlights,
            })
        })
        .collect();

    rank(&mut results);
    debug!("Hadith search '{}' matched {} records", query.trim(), results.len());
    paginate(results, options.page, options.limit)
}

/// Ranks the verse lines of a `s:v | original | translation` document by how
/// many times the query occurs in each and parses the best `top_k`.
///
/// Lines that are not verse lines, such as markdown headers, never rank.
/// Equal counts keep document order.
pub fn search_lines(text: &str, query: &str, top_k: usize) -> Vec<VerseRecord> {
    let needle = fold(query.trim());
    if needle.is_empty() {
        return Vec::new();
    }

    let mut scored: Vec<(usize, &str)> = text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| {
            let count = fold(line).matches(needle.as_str()).count();
            (count > 0).then_some((count, line))
        })
        .collect();
    scored.sort_by(|a, b| b.0.cmp(&a.0));

    let verses: Vec<VerseRecord> = scored
        .into_iter()
        .flat_map(|(_, line)| parse_verse_lines(line))
        .take(top_k)
        .collect();
    debug!("Line search '{}' kept {} verses", query.trim(), verses.len());
    verses
}

fn paginate(results: Vec<SearchResult<HadithRecord>>, page: usize, limit: usize) -> HadithPage {
    let limit = limit.max(1);
    let page = page.max(1);
    let total = results.len();
    let total_pages = total.div_ceil(limit);

    let start = (page - 1).saturating_mul(limit);
    let results = results.into_iter().skip(start).take(limit).collect();

    HadithPage {
        results,
        total,
        page,
        total_pages,
    }
}
