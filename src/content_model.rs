//! Reference data and search result types.
//!
//! Verses and hadiths are immutable once loaded into the corpus cache; the
//! search functions hand out [`SearchResult`]s that borrow nothing and can be
//! serialized straight back to the host.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::app_response::AppResponse;

/// Number of surahs in the Quran.
pub const SURAH_COUNT: u16 = 114;

/// Composite `"surah:verse"` identifier of a Quranic verse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VerseKey {
    pub surah: u16,
    pub verse: u16,
}

impl VerseKey {
    pub fn new(surah: u16, verse: u16) -> Self {
        Self { surah, verse }
    }
}

impl Display for VerseKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.surah, self.verse)
    }
}

impl FromStr for VerseKey {
    type Err = AppResponse;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || AppResponse::ValidationError(format!("Invalid verse key: {s}"));

        let (surah, verse) = s.trim().split_once(':').ok_or_else(invalid)?;
        let surah: u16 = surah.trim().parse().map_err(|_| invalid())?;
        let verse: u16 = verse.trim().parse().map_err(|_| invalid())?;
        if surah == 0 || surah > SURAH_COUNT || verse == 0 {
            return Err(invalid());
        }
        Ok(Self { surah, verse })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordBreakdown {
    pub position: u16,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transliteration: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerseRecord {
    pub surah_number: u16,
    pub verse_number: u16,
    pub verse_key: String,
    /// Original Arabic text.
    pub text: String,
    pub translation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transliteration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub words: Option<Vec<WordBreakdown>>,
}

impl VerseRecord {
    pub fn new(
        surah: u16,
        verse: u16,
        text: impl Into<String>,
        translation: impl Into<String>,
    ) -> Self {
        Self {
            surah_number: surah,
            verse_number: verse,
            verse_key: VerseKey::new(surah, verse).to_string(),
            text: text.into(),
            translation: translation.into(),
            transliteration: None,
            words: None,
        }
    }

    pub fn with_transliteration(mut self, transliteration: impl Into<String>) -> Self {
        self.transliteration = Some(transliteration.into());
        self
    }

    pub fn key(&self) -> VerseKey {
        VerseKey::new(self.surah_number, self.verse_number)
    }

    /// Checks that `verse_key` agrees with the surah and verse numbers.
    pub fn validate(&self) -> Result<(), AppResponse> {
        let parsed: VerseKey = self.verse_key.parse()?;
        if parsed != self.key() {
            return Err(AppResponse::ValidationError(format!(
                "Verse key {} does not match {}:{}",
                self.verse_key, self.surah_number, self.verse_number
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurahInfo {
    pub number: u16,
    pub name: String,
    pub name_latin: String,
    pub name_translation: String,
    pub revelation_type: String,
    pub verse_count: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HadithBook {
    pub id: &'static str,
    pub name: &'static str,
    pub arabic_name: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HadithRecord {
    pub id: String,
    pub book_slug: String,
    pub book_name: String,
    pub chapter_id: String,
    pub chapter_title: String,
    pub urn: String,
    pub arabic: String,
    /// English text.
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub urdu: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,
    /// Hadith number within its book, as printed in `reference`.
    #[serde(default)]
    pub number: String,
    pub reference: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchType {
    Original,
    Translation,
    Both,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightFragment {
    pub text: String,
    pub is_match: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Highlights {
    pub original: Vec<HighlightFragment>,
    pub translation: Vec<HighlightFragment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult<R> {
    pub record: R,
    pub match_type: MatchType,
    pub score: f64,
    pub highlights: Highlights,
}

/// One page of hadith search results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HadithPage {
    pub results: Vec<SearchResult<HadithRecord>>,
    pub total: usize,
    pub page: usize,
    pub total_pages: usize,
}

impl HadithPage {
    pub fn empty() -> Self {
        Self {
            results: Vec::new(),
            total: 0,
            page: 1,
            total_pages: 0,
        }
    }
}
