//! In-memory cache of verse and hadith reference data.
//!
//! Data is loaded once per surah or book and kept for the life of the
//! store; loading a surah or book that is already cached leaves the cached
//! copy untouched.

use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

use log::{info, warn};
use serde::Deserialize;
use serde_json::Value as JsonValue;

use crate::app_response::AppResponse;
use crate::content_model::{HadithPage, HadithRecord, SearchResult, SurahInfo, VerseKey, VerseRecord};
use crate::fallback_data::{self, HADITH_BOOKS, TAFSIR_UNAVAILABLE};
use crate::search::{self, HadithSearchOptions, SearchOptions};

const AUDIO_BASE_URL: &str = "https://verses.quran.com/Alafasy/mp3";

pub struct ContentCache {
    surahs: Vec<SurahInfo>,
    verses: RwLock<BTreeMap<u16, Vec<VerseRecord>>>,
    hadiths: RwLock<HashMap<String, Vec<HadithRecord>>>,
}

impl Default for ContentCache {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentCache {
    /// A cache holding only the surah table.
    pub fn new() -> Self {
        Self {
            surahs: fallback_data::surahs(),
            verses: RwLock::new(BTreeMap::new()),
            hadiths: RwLock::new(HashMap::new()),
        }
    }

    /// A cache seeded with the built-in surahs.
    pub fn with_fallback() -> Self {
        let cache = Self::new();
        match cache.insert_verses(fallback_data::verses()) {
            Ok(count) => info!("Seeded {count} built-in surahs"),
            Err(e) => warn!("Built-in verses rejected: {e}"),
        }
        cache
    }

    pub fn all_surahs(&self) -> &[SurahInfo] {
        &self.surahs
    }

    pub fn surah_info(&self, number: u16) -> Option<&SurahInfo> {
        self.surahs.iter().find(|surah| surah.number == number)
    }

    pub fn loaded_surahs(&self) -> Vec<u16> {
        self.verses
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .keys()
            .copied()
            .collect()
    }

    /// Caches `verses`, grouped by surah. The whole batch is validated before
    /// anything is cached. Returns how many surahs were newly cached.
    pub fn insert_verses(&self, verses: Vec<VerseRecord>) -> Result<usize, AppResponse> {
        let mut by_surah: BTreeMap<u16, Vec<VerseRecord>> = BTreeMap::new();
        for verse in verses {
            verse.validate()?;
            if let Some(info) = self.surah_info(verse.surah_number) {
                if verse.verse_number > info.verse_count {
                    return Err(AppResponse::ValidationError(format!(
                        "Verse {} is beyond the {} verses of surah {}",
                        verse.verse_key, info.verse_count, info.number
                    )));
                }
            }
            by_surah.entry(verse.surah_number).or_default().push(verse);
        }

        for verses in by_surah.values_mut() {
            verses.sort_by_key(|verse| verse.verse_number);
            let before = verses.len();
            verses.dedup_by_key(|verse| verse.verse_number);
            if verses.len() != before {
                warn!("Dropped {} duplicate verse keys", before - verses.len());
            }
        }

        let mut cache = self.verses.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        let mut inserted = 0;
        for (surah, verses) in by_surah {
            if cache.contains_key(&surah) {
                info!("Surah {surah} already cached, keeping the cached copy");
                continue;
            }
            cache.insert(surah, verses);
            inserted += 1;
        }
        Ok(inserted)
    }

    /// Loads a JSON array of verse records.
    pub fn load_verses_json(&self, json: &str) -> Result<usize, AppResponse> {
        let verses: Vec<VerseRecord> = serde_json::from_str(json)?;
        self.insert_verses(verses)
    }

    /// Loads verses from `s:v | original | translation` lines.
    pub fn load_verse_lines(&self, text: &str) -> Result<usize, AppResponse> {
        let verses = parse_verse_lines(text);
        if verses.is_empty() {
            return Err(AppResponse::ValidationError("No verse lines found".to_string()));
        }
        self.insert_verses(verses)
    }

    pub fn surah_verses(&self, surah: u16) -> Vec<VerseRecord> {
        self.verses
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(&surah)
            .cloned()
            .unwrap_or_default()
    }

    pub fn verse(&self, key: &str) -> Result<Option<VerseRecord>, AppResponse> {
        let key: VerseKey = key.parse()?;
        let cache = self.verses.read().unwrap_or_else(|poisoned| poisoned.into_inner());
        Ok(cache
            .get(&key.surah)
            .and_then(|verses| verses.iter().find(|verse| verse.verse_number == key.verse))
            .cloned())
    }

    pub fn tafsir(&self, key: &str) -> String {
        fallback_data::tafsir(key.trim())
            .unwrap_or(TAFSIR_UNAVAILABLE)
            .to_string()
    }

    pub fn search_verses(&self, query: &str, options: &SearchOptions) -> Vec<SearchResult<VerseRecord>> {
        let cache = self.verses.read().unwrap_or_else(|poisoned| poisoned.into_inner());
        search::search_verses(cache.values().flatten(), query, options)
    }

    /// Parses and caches one hadith book. Returns the number of hadiths cached.
    pub fn load_hadith_book(&self, book_id: &str, json: &str) -> Result<usize, AppResponse> {
        let book_id = book_id.trim();
        if book_id.is_empty() {
            return Err(AppResponse::ValidationError("Book id cannot be empty".to_string()));
        }

        let records = parse_hadith_book(book_id, json)?;
        let mut cache = self.hadiths.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(existing) = cache.get(book_id) {
            info!("Hadith book '{book_id}' already cached, keeping the cached copy");
            return Ok(existing.len());
        }

        let count = records.len();
        cache.insert(book_id.to_string(), records);
        info!("Cached {count} hadiths from '{book_id}'");
        Ok(count)
    }

    pub fn is_book_loaded(&self, book_id: &str) -> bool {
        self.hadiths
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .contains_key(book_id)
    }

    /// Finds a hadith by its id or its number within the book.
    pub fn hadith(&self, book_id: &str, id: &str) -> Option<HadithRecord> {
        let cache = self.hadiths.read().unwrap_or_else(|poisoned| poisoned.into_inner());
        cache
            .get(book_id)?
            .iter()
            .find(|hadith| hadith.id == id || hadith.number == id)
            .cloned()
    }

    /// Searches the selected books. Fails with `NotFound` if any of them has
    /// not been loaded.
    pub fn search_hadiths(
        &self,
        query: &str,
        options: &HadithSearchOptions,
    ) -> Result<HadithPage, AppResponse> {
        let books: Vec<&str> = if options.books.is_empty() {
            HADITH_BOOKS.iter().map(|book| book.id).collect()
        } else {
            options.books.iter().map(String::as_str).collect()
        };

        let cache = self.hadiths.read().unwrap_or_else(|poisoned| poisoned.into_inner());
        let mut selected = Vec::with_capacity(books.len());
        for book in books {
            let hadiths = cache
                .get(book)
                .ok_or_else(|| AppResponse::NotFound(format!("Hadith book '{book}' is not loaded")))?;
            selected.push(hadiths);
        }

        Ok(search::search_hadiths(selected.into_iter().flatten(), query, options))
    }
}

/// Recitation audio for a verse, e.g. `1:1` -> `.../001001.mp3`.
pub fn verse_audio_url(key: &str) -> Result<String, AppResponse> {
    let key: VerseKey = key.parse()?;
    Ok(format!("{AUDIO_BASE_URL}/{:03}{:03}.mp3", key.surah, key.verse))
}

/// Parses `s:v | original | translation` lines, skipping anything else.
pub fn parse_verse_lines(text: &str) -> Vec<VerseRecord> {
    text.lines()
        .filter_map(|line| {
            let mut parts = line.split('|').map(str::trim);
            let key: VerseKey = parts.next()?.parse().ok()?;
            let original = parts.next().unwrap_or_default();
            let translation = parts.next().unwrap_or_default();
            Some(VerseRecord::new(key.surah, key.verse, original, translation))
        })
        .collect()
}

/// Returns the section of a surah-info markdown document that starts at the
/// `# <surah>` header, up to the next numbered header. Unnumbered headings
/// inside the section are kept.
pub fn surah_detailed_info(markdown: &str, surah: u16) -> Option<String> {
    let mut section: Vec<&str> = Vec::new();
    for line in markdown.lines() {
        let trimmed = line.trim();
        match surah_header(trimmed) {
            Some(number) if number == surah => {
                section.clear();
                section.push(trimmed);
            }
            Some(_) if !section.is_empty() => break,
            Some(_) => {}
            None if !section.is_empty() => section.push(line),
            None => {}
        }
    }

    let info = section.join("\n");
    let info = info.trim_end();
    (!info.is_empty()).then(|| info.to_string())
}

/// The number of a `# <n>` header line, if `line` is one.
fn surah_header(line: &str) -> Option<u16> {
    let rest = line.strip_prefix('#')?.trim_start();
    let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();
    digits.parse().ok()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum HadithDocument {
    Book {
        #[serde(default)]
        chapters: Vec<RawChapter>,
        hadiths: Vec<RawHadith>,
    },
    List(Vec<RawHadith>),
}

#[derive(Deserialize)]
struct RawChapter {
    #[serde(default)]
    id: Option<JsonValue>,
    #[serde(default)]
    arabic: String,
    #[serde(default)]
    english: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawEnglish {
    Text(String),
    Narrated {
        #[serde(default)]
        narrator: String,
        #[serde(default)]
        text: String,
    },
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawHadith {
    #[serde(default)]
    id: Option<JsonValue>,
    #[serde(default)]
    id_in_book: Option<JsonValue>,
    #[serde(default)]
    hadith_number: Option<JsonValue>,
    #[serde(default)]
    chapter_id: Option<JsonValue>,
    #[serde(default)]
    chapter_title: Option<String>,
    #[serde(default)]
    urn: Option<String>,
    #[serde(default)]
    arabic: String,
    #[serde(default)]
    english: Option<RawEnglish>,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    urdu: Option<String>,
    #[serde(default)]
    grade: Option<String>,
}

fn json_scalar(value: &Option<JsonValue>) -> Option<String> {
    match value.as_ref()? {
        JsonValue::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        JsonValue::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

pub(crate) fn parse_hadith_book(book_id: &str, json: &str) -> Result<Vec<HadithRecord>, AppResponse> {
    let (chapters, raw) = match serde_json::from_str::<HadithDocument>(json)? {
        HadithDocument::Book { chapters, hadiths } => (chapters, hadiths),
        HadithDocument::List(hadiths) => (Vec::new(), hadiths),
    };

    let chapter_titles: HashMap<String, String> = chapters
        .into_iter()
        .filter_map(|chapter| {
            let id = json_scalar(&chapter.id)?;
            let title = if chapter.english.trim().is_empty() {
                chapter.arabic
            } else {
                chapter.english
            };
            Some((id, title))
        })
        .collect();

    let book_name = fallback_data::hadith_book(book_id)
        .map(|book| book.name.to_string())
        .unwrap_or_else(|| book_id.to_string());

    let records = raw
        .into_iter()
        .enumerate()
        .map(|(index, hadith)| {
            let number = json_scalar(&hadith.hadith_number)
                .or_else(|| json_scalar(&hadith.id_in_book))
                .or_else(|| json_scalar(&hadith.id))
                .unwrap_or_else(|| (index + 1).to_string());
            let id = json_scalar(&hadith.id).unwrap_or_else(|| format!("{book_id}-{number}"));
            let chapter_id = json_scalar(&hadith.chapter_id).unwrap_or_default();
            let chapter_title = non_empty(hadith.chapter_title)
                .or_else(|| chapter_titles.get(&chapter_id).cloned())
                .unwrap_or_default();
            let text = match hadith.english {
                Some(RawEnglish::Text(text)) => text,
                Some(RawEnglish::Narrated { narrator, text }) => {
                    format!("{} {}", narrator.trim(), text.trim()).trim().to_string()
                }
                None => hadith.text.unwrap_or_default(),
            };

            HadithRecord {
                urn: non_empty(hadith.urn)
                    .unwrap_or_else(|| format!("urn:hadith:{book_id}:{number}")),
                reference: format!("{book_name} {number}"),
                id,
                book_slug: book_id.to_string(),
                book_name: book_name.clone(),
                chapter_id,
                chapter_title,
                arabic: hadith.arabic,
                text,
                urdu: non_empty(hadith.urdu),
                grade: non_empty(hadith.grade),
                number,
            }
        })
        .collect();

    Ok(records)
}
