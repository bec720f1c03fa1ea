//! # Deen Companion Core
//!
//! Local Quran and hadith search with persisted reading progress, designed for
//! FFI (Foreign Function Interface) integration with Flutter and web hosts.
//! Progress, recent searches and the user mode are stored as JSON documents in
//! LMDB (Lightning Memory-Mapped Database); reference texts are handed over by
//! the host and cached in memory for the life of the store.
//!
//! ## Features
//!
//! - **Verse search**: exact and fuzzy matching over Arabic text and
//!   translation, scored and ranked, with highlight fragments
//! - **Hadith search**: the same scoring over the six major collections, paged
//! - **Progress tracking**: read counts, last-read pointer, daily history,
//!   streaks, favorites and memorized verses
//! - **Latest search wins**: every search carries a generation so hosts can
//!   drop responses that were overtaken by a newer request
//! - **Safe error handling**: No `unwrap()` calls in production code
//!
//! ## Quick Start
//!
//! ```no_run
//! use deen_companion_core::{create_store, record_read, search_quran, free_response};
//! use std::ffi::CString;
//!
//! let name = CString::new("my_app").unwrap();
//! let state = create_store(name.as_ptr());
//!
//! let request = CString::new(r#"{"query":"mercy","limit":10}"#).unwrap();
//! let results = search_quran(state, request.as_ptr());
//! free_response(results);
//!
//! let key = CString::new("1:1").unwrap();
//! let count = record_read(state, key.as_ptr());
//! free_response(count);
//! ```
//!
//! ## FFI Functions
//!
//! Every function returning `*const c_char` returns a JSON-encoded
//! [`app_response::AppResponse`] that the caller releases with
//! [`free_response`].
//!
//! - [`create_store`] / [`create_store_with_config`] / [`create_memory_store`] - Open a store
//! - [`close_store`] - Sync and release a store
//! - [`load_verses`] / [`load_verse_lines`] / [`load_hadith_book`] - Hand over reference data
//! - [`search_quran`] / [`search_hadith`] / [`is_search_current`] - Search
//! - [`get_verse`] / [`get_tafsir`] / [`get_hadith`] / [`get_surahs`] / [`get_verse_audio_url`] - Lookups
//! - [`search_text_lines`] / [`get_surah_detailed_info`] - Search host-fetched markdown documents
//! - [`record_read`] / [`toggle_favorite`] / [`toggle_memorized`] - Progress updates
//! - [`get_progress`] / [`get_reading_stats`] - Progress reads
//! - [`get_search_history`] / [`clear_search_history`] - Recent searches
//! - [`get_user_mode`] / [`set_user_mode`] - Adult or kid mode

pub mod app_response;
pub mod app_state;
pub mod config;
pub mod content_model;
pub mod corpus;
pub mod fallback_data;
pub mod generation;
pub mod local_db_state;
pub mod progress;
pub mod progress_model;
pub mod search;
pub mod search_history;
pub mod storage;

use std::ffi::{CStr, CString};
use std::os::raw::c_char;

use log::{info, warn};
use serde_json::Value as JsonValue;

use crate::app_response::AppResponse;
use crate::app_state::{merge_request, CompanionState};
use crate::config::StoreConfig;
use crate::content_model::SURAH_COUNT;
use crate::corpus::{surah_detailed_info, verse_audio_url};
use crate::progress_model::UserMode;
use crate::search::{search_lines, DEFAULT_LINE_RESULTS};

/// Opens (or creates) an LMDB-backed store named `name`.
///
/// The environment lives in a `<name>.lmdb` directory relative to the
/// current working directory. All other settings use their defaults; see
/// [`create_store_with_config`] to change them.
///
/// # Returns
///
/// A pointer to the [`CompanionState`] on success, or a null pointer on
/// failure. Release it with [`close_store`].
///
/// # Examples
///
/// ```no_run
/// use std::ffi::CString;
/// use deen_companion_core::create_store;
///
/// let name = CString::new("reader").unwrap();
/// let state = create_store(name.as_ptr());
/// assert!(!state.is_null());
/// ```
///
/// # Errors
///
/// Returns null pointer if:
/// - Input name pointer is null
/// - Input string contains invalid UTF-8 or is empty
/// - The LMDB environment cannot be opened
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn create_store(name: *const c_char) -> *mut CompanionState {
    if name.is_null() {
        warn!("Null name pointer passed to create_store");
        return std::ptr::null_mut();
    }

    let name_str = match unsafe { CStr::from_ptr(name).to_str() } {
        Ok(s) => s,
        Err(e) => {
            warn!("Invalid UTF-8 in name parameter: {e}");
            return std::ptr::null_mut();
        }
    };

    open_state(StoreConfig::named(name_str))
}

/// Opens a store from a JSON [`StoreConfig`]. Missing fields take their
/// defaults, so `{}` opens the default store and `{"in_memory":true}` an
/// ephemeral one.
///
/// # Examples
///
/// ```no_run
/// use std::ffi::CString;
/// use deen_companion_core::create_store_with_config;
///
/// let config = CString::new(r#"{"name":"reader","history_days":60}"#).unwrap();
/// let state = create_store_with_config(config.as_ptr());
/// ```
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn create_store_with_config(config_json: *const c_char) -> *mut CompanionState {
    if config_json.is_null() {
        warn!("Null config pointer passed to create_store_with_config");
        return std::ptr::null_mut();
    }

    let json = match unsafe { CStr::from_ptr(config_json).to_str() } {
        Ok(s) => s,
        Err(e) => {
            warn!("Invalid UTF-8 in config parameter: {e}");
            return std::ptr::null_mut();
        }
    };

    match StoreConfig::from_json(json) {
        Ok(config) => open_state(config),
        Err(e) => {
            warn!("Rejected store config: {e}");
            std::ptr::null_mut()
        }
    }
}

/// Opens a store that keeps everything in memory. Nothing survives
/// [`close_store`].
#[no_mangle]
pub extern "C" fn create_memory_store() -> *mut CompanionState {
    Box::into_raw(Box::new(CompanionState::in_memory()))
}

fn open_state(config: StoreConfig) -> *mut CompanionState {
    let location = if config.in_memory {
        "memory".to_string()
    } else {
        config.lmdb_dir()
    };
    info!("Opening store at: {location}");

    match CompanionState::open(config) {
        Ok(state) => {
            info!("✅ Store opened successfully");
            Box::into_raw(Box::new(state))
        }
        Err(e) => {
            warn!("❌ Failed to open store: {e}");
            warn!("Attempted location: {location}");
            std::ptr::null_mut()
        }
    }
}

/// Syncs the store to disk and releases the handle.
///
/// The pointer must not be used after this call, even if the returned
/// response reports a sync failure.
///
/// # Examples
///
/// ```no_run
/// use std::ffi::CString;
/// use deen_companion_core::{create_store, close_store, free_response};
///
/// let name = CString::new("reader").unwrap();
/// let state = create_store(name.as_ptr());
///
/// // Before hot restart or application shutdown
/// let result = close_store(state);
/// free_response(result);
/// ```
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn close_store(state: *mut CompanionState) -> *const c_char {
    if state.is_null() {
        let error = AppResponse::BadRequest("Null state pointer passed to close_store".to_string());
        return response_to_c_string(&error);
    }

    let state = unsafe { Box::from_raw(state) };
    let response = match state.close() {
        Ok(()) => AppResponse::success("Store closed successfully"),
        Err(e) => e,
    };
    drop(state);
    response_to_c_string(&response)
}

/// Releases a string returned by any function of this library.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn free_response(ptr: *const c_char) {
    if ptr.is_null() {
        return;
    }
    unsafe {
        drop(CString::from_raw(ptr as *mut c_char));
    }
}

/// Caches a JSON array of verse records.
///
/// Each record needs `surah_number`, `verse_number`, `verse_key`, `text` and
/// `translation`; `transliteration` and `words` are optional. Surahs that are
/// already cached keep their cached verses.
///
/// # Returns
///
/// `Ok` with the number of newly cached surahs, `SerializationError` for
/// malformed JSON, `ValidationError` if a verse key disagrees with its numbers.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn load_verses(state: *mut CompanionState, json_ptr: *const c_char) -> *const c_char {
    let state = match state_ref(state, "load_verses") {
        Ok(s) => s,
        Err(err) => return err,
    };
    let json = match c_ptr_to_string(json_ptr, "JSON") {
        Ok(json) => json,
        Err(err) => return err,
    };

    match state.content().load_verses_json(&json) {
        Ok(count) => response_to_c_string(&AppResponse::payload(&count)),
        Err(e) => response_to_c_string(&e),
    }
}

/// Caches verses from text with one `s:v | original | translation` line per
/// verse. Lines in any other shape, such as markdown headers, are skipped.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn load_verse_lines(state: *mut CompanionState, text_ptr: *const c_char) -> *const c_char {
    let state = match state_ref(state, "load_verse_lines") {
        Ok(s) => s,
        Err(err) => return err,
    };
    let text = match c_ptr_to_string(text_ptr, "text") {
        Ok(text) => text,
        Err(err) => return err,
    };

    match state.content().load_verse_lines(&text) {
        Ok(count) => response_to_c_string(&AppResponse::payload(&count)),
        Err(e) => response_to_c_string(&e),
    }
}

/// Caches one hadith book.
///
/// # JSON Format
///
/// Either an array of hadith objects or a book object:
/// ```json
/// {
///   "chapters": [{ "id": 1, "arabic": "...", "english": "Revelation" }],
///   "hadiths": [{
///     "id": 1, "idInBook": 1, "chapterId": 1, "arabic": "...",
///     "english": { "narrator": "Narrated 'Umar:", "text": "..." }
///   }]
/// }
/// ```
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn load_hadith_book(
    state: *mut CompanionState,
    book_ptr: *const c_char,
    json_ptr: *const c_char,
) -> *const c_char {
    let state = match state_ref(state, "load_hadith_book") {
        Ok(s) => s,
        Err(err) => return err,
    };
    let book = match c_ptr_to_string(book_ptr, "book") {
        Ok(book) => book,
        Err(err) => return err,
    };
    let json = match c_ptr_to_string(json_ptr, "JSON") {
        Ok(json) => json,
        Err(err) => return err,
    };

    match state.content().load_hadith_book(&book, &json) {
        Ok(count) => response_to_c_string(&AppResponse::payload(&count)),
        Err(e) => response_to_c_string(&e),
    }
}

/// Searches the cached verses.
///
/// # JSON Format
///
/// ```json
/// {
///   "query": "mercy",
///   "search_original": true,
///   "search_translation": true,
///   "surah_filter": [1, 112],
///   "fuzzy": true,
///   "limit": 50
/// }
/// ```
///
/// Only `query` is required. The `Ok` payload is a
/// [`app_state::VerseSearchResponse`]; its `generation` can be checked with
/// [`is_search_current`] before the host applies it.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn search_quran(state: *mut CompanionState, request_ptr: *const c_char) -> *const c_char {
    let state = match state_ref(state, "search_quran") {
        Ok(s) => s,
        Err(err) => return err,
    };
    let (query, request) = match parse_search_request(request_ptr) {
        Ok(parsed) => parsed,
        Err(err) => return err,
    };
    let options = match merge_request(&state.default_verse_options(), &request) {
        Ok(options) => options,
        Err(e) => return response_to_c_string(&e),
    };

    let response = state.search_quran(&query, &options);
    response_to_c_string(&AppResponse::payload(&response))
}

/// Searches the cached hadith books.
///
/// Accepts `query` plus any of `books`, `language` (`english`, `arabic`,
/// `urdu`), `search_original`, `fuzzy`, `page` and `limit`. A book that has
/// not been loaded yields an empty page with `error` set.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn search_hadith(state: *mut CompanionState, request_ptr: *const c_char) -> *const c_char {
    let state = match state_ref(state, "search_hadith") {
        Ok(s) => s,
        Err(err) => return err,
    };
    let (query, request) = match parse_search_request(request_ptr) {
        Ok(parsed) => parsed,
        Err(err) => return err,
    };
    let options = match merge_request(&state.default_hadith_options(), &request) {
        Ok(options) => options,
        Err(e) => return response_to_c_string(&e),
    };

    let response = state.search_hadith(&query, &options);
    response_to_c_string(&AppResponse::payload(&response))
}

/// Whether `generation` belongs to the newest search issued on this store.
/// Returns `false` for a null state.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn is_search_current(state: *mut CompanionState, generation: u64) -> bool {
    match unsafe { state.as_ref() } {
        Some(state) => state.generations().is_current(generation),
        None => false,
    }
}

/// Looks up one verse by its `surah:verse` key.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn get_verse(state: *mut CompanionState, key_ptr: *const c_char) -> *const c_char {
    let state = match state_ref(state, "get_verse") {
        Ok(s) => s,
        Err(err) => return err,
    };
    let key = match c_ptr_to_string(key_ptr, "key") {
        Ok(key) => key,
        Err(err) => return err,
    };

    match state.content().verse(&key) {
        Ok(Some(verse)) => response_to_c_string(&AppResponse::payload(&verse)),
        Ok(None) => {
            let error = AppResponse::NotFound(format!("No verse loaded for key: {key}"));
            response_to_c_string(&error)
        }
        Err(e) => response_to_c_string(&e),
    }
}

#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn get_tafsir(state: *mut CompanionState, key_ptr: *const c_char) -> *const c_char {
    let state = match state_ref(state, "get_tafsir") {
        Ok(s) => s,
        Err(err) => return err,
    };
    let key = match c_ptr_to_string(key_ptr, "key") {
        Ok(key) => key,
        Err(err) => return err,
    };

    response_to_c_string(&AppResponse::payload(&state.content().tafsir(&key)))
}

/// Looks up one hadith by id or by its number within `book`.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn get_hadith(
    state: *mut CompanionState,
    book_ptr: *const c_char,
    id_ptr: *const c_char,
) -> *const c_char {
    let state = match state_ref(state, "get_hadith") {
        Ok(s) => s,
        Err(err) => return err,
    };
    let book = match c_ptr_to_string(book_ptr, "book") {
        Ok(book) => book,
        Err(err) => return err,
    };
    let id = match c_ptr_to_string(id_ptr, "id") {
        Ok(id) => id,
        Err(err) => return err,
    };

    match state.content().hadith(&book, &id) {
        Some(hadith) => response_to_c_string(&AppResponse::payload(&hadith)),
        None => {
            let error = AppResponse::NotFound(format!("No hadith {id} in book {book}"));
            response_to_c_string(&error)
        }
    }
}

#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn get_surahs(state: *mut CompanionState) -> *const c_char {
    let state = match state_ref(state, "get_surahs") {
        Ok(s) => s,
        Err(err) => return err,
    };
    response_to_c_string(&AppResponse::payload(&state.content().all_surahs()))
}

#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn get_verse_audio_url(key_ptr: *const c_char) -> *const c_char {
    let key = match c_ptr_to_string(key_ptr, "key") {
        Ok(key) => key,
        Err(err) => return err,
    };

    match verse_audio_url(&key) {
        Ok(url) => response_to_c_string(&AppResponse::payload(&url)),
        Err(e) => response_to_c_string(&e),
    }
}

/// Searches a `s:v | original | translation` document the host fetched
/// (such as a full translation file) without caching it.
///
/// Lines are ranked by how often `query` occurs in them; the `Ok` payload is
/// the best `top_k` lines as verse records. A `top_k` of 0 returns the
/// default five.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn search_text_lines(
    text_ptr: *const c_char,
    query_ptr: *const c_char,
    top_k: u32,
) -> *const c_char {
    let text = match c_ptr_to_string(text_ptr, "text") {
        Ok(text) => text,
        Err(err) => return err,
    };
    let query = match c_ptr_to_string(query_ptr, "query") {
        Ok(query) => query,
        Err(err) => return err,
    };

    let top_k = match top_k {
        0 => DEFAULT_LINE_RESULTS,
        n => n as usize,
    };
    let verses = search_lines(&text, &query, top_k);
    response_to_c_string(&AppResponse::payload(&verses))
}

/// Extracts the section for `surah` from a surah-info markdown document
/// whose sections start with `# <number>` headers.
///
/// # Errors
///
/// `ValidationError` for a surah outside 1..=114, `NotFound` if the document
/// has no section for it.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn get_surah_detailed_info(markdown_ptr: *const c_char, surah: u16) -> *const c_char {
    let markdown = match c_ptr_to_string(markdown_ptr, "markdown") {
        Ok(markdown) => markdown,
        Err(err) => return err,
    };

    if surah == 0 || surah > SURAH_COUNT {
        let error = AppResponse::ValidationError(format!("Invalid surah number: {surah}"));
        return response_to_c_string(&error);
    }

    match surah_detailed_info(&markdown, surah) {
        Some(info) => response_to_c_string(&AppResponse::payload(&info)),
        None => {
            let error = AppResponse::NotFound(format!("No section for surah {surah}"));
            response_to_c_string(&error)
        }
    }
}

/// Counts one read of `key` (usually a verse key) and returns its new count.
///
/// Storage failures are logged and never reported; the count reflects the
/// update as applied in memory.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn record_read(state: *mut CompanionState, key_ptr: *const c_char) -> *const c_char {
    let state = match state_ref(state, "record_read") {
        Ok(s) => s,
        Err(err) => return err,
    };
    let key = match c_ptr_to_string(key_ptr, "key") {
        Ok(key) => key,
        Err(err) => return err,
    };

    let count = state.progress().record_read(&key);
    response_to_c_string(&AppResponse::payload(&count))
}

/// Flips favorite status of `key`; the payload is the new status.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn toggle_favorite(state: *mut CompanionState, key_ptr: *const c_char) -> *const c_char {
    let state = match state_ref(state, "toggle_favorite") {
        Ok(s) => s,
        Err(err) => return err,
    };
    let key = match c_ptr_to_string(key_ptr, "key") {
        Ok(key) => key,
        Err(err) => return err,
    };

    response_to_c_string(&AppResponse::payload(&state.progress().toggle_favorite(&key)))
}

/// Flips memorized status of `key`; the payload is the new status.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn toggle_memorized(state: *mut CompanionState, key_ptr: *const c_char) -> *const c_char {
    let state = match state_ref(state, "toggle_memorized") {
        Ok(s) => s,
        Err(err) => return err,
    };
    let key = match c_ptr_to_string(key_ptr, "key") {
        Ok(key) => key,
        Err(err) => return err,
    };

    response_to_c_string(&AppResponse::payload(&state.progress().toggle_memorized(&key)))
}

#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn get_progress(state: *mut CompanionState) -> *const c_char {
    let state = match state_ref(state, "get_progress") {
        Ok(s) => s,
        Err(err) => return err,
    };
    response_to_c_string(&AppResponse::payload(&state.progress().progress()))
}

/// Total reads, seven-day average, current streak and list sizes.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn get_reading_stats(state: *mut CompanionState) -> *const c_char {
    let state = match state_ref(state, "get_reading_stats") {
        Ok(s) => s,
        Err(err) => return err,
    };
    response_to_c_string(&AppResponse::payload(&state.progress().compute_stats()))
}

#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn get_search_history(state: *mut CompanionState) -> *const c_char {
    let state = match state_ref(state, "get_search_history") {
        Ok(s) => s,
        Err(err) => return err,
    };
    response_to_c_string(&AppResponse::payload(&state.recent_searches().entries()))
}

#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn clear_search_history(state: *mut CompanionState) -> *const c_char {
    let state = match state_ref(state, "clear_search_history") {
        Ok(s) => s,
        Err(err) => return err,
    };
    state.recent_searches().clear();
    response_to_c_string(&AppResponse::payload(&state.recent_searches().entries()))
}

/// The stored mode (`"adult"` or `"kid"`), or `null` if none was chosen yet.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn get_user_mode(state: *mut CompanionState) -> *const c_char {
    let state = match state_ref(state, "get_user_mode") {
        Ok(s) => s,
        Err(err) => return err,
    };
    response_to_c_string(&AppResponse::payload(&state.user_mode()))
}

#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn set_user_mode(state: *mut CompanionState, mode_ptr: *const c_char) -> *const c_char {
    let state = match state_ref(state, "set_user_mode") {
        Ok(s) => s,
        Err(err) => return err,
    };
    let mode = match c_ptr_to_string(mode_ptr, "mode") {
        Ok(mode) => mode,
        Err(err) => return err,
    };

    let result = mode
        .parse::<UserMode>()
        .and_then(|mode| state.set_user_mode(mode).map(|()| mode));
    match result {
        Ok(mode) => response_to_c_string(&AppResponse::payload(&mode)),
        Err(e) => response_to_c_string(&e),
    }
}

/// Borrows the state behind an FFI handle, or builds the `BadRequest`
/// response for a null one.
fn state_ref<'a>(state: *mut CompanionState, fn_name: &str) -> Result<&'a CompanionState, *const c_char> {
    match unsafe { state.as_ref() } {
        Some(s) => Ok(s),
        None => {
            let error = AppResponse::BadRequest(format!("Null state pointer passed to {fn_name}"));
            Err(response_to_c_string(&error))
        }
    }
}

/// Reads a search request object and pulls out its `query`.
fn parse_search_request(ptr: *const c_char) -> Result<(String, JsonValue), *const c_char> {
    let json = c_ptr_to_string(ptr, "request")?;

    let request: JsonValue = match serde_json::from_str(&json) {
        Ok(value) => value,
        Err(e) => {
            let error = AppResponse::SerializationError(format!("Invalid JSON: {e}"));
            return Err(response_to_c_string(&error));
        }
    };

    match request.get("query").and_then(JsonValue::as_str) {
        Some(query) => Ok((query.to_string(), request.clone())),
        None => {
            let error = AppResponse::BadRequest("Search request needs a string 'query'".to_string());
            Err(response_to_c_string(&error))
        }
    }
}

/// Converts an [`AppResponse`] to a C-compatible string.
///
/// Serializes the response to JSON and hands ownership of the resulting C
/// string to the caller, who releases it with [`free_response`].
///
/// Returns a null pointer if serialization or C string creation fails.
fn response_to_c_string(response: &AppResponse) -> *const c_char {
    let json = match serde_json::to_string(response) {
        Ok(j) => j,
        Err(e) => {
            warn!("Error serializing response: {e}");
            return std::ptr::null();
        }
    };

    match CString::new(json) {
        Ok(c_str) => c_str.into_raw(),
        Err(e) => {
            warn!("Error creating CString: {e}");
            std::ptr::null()
        }
    }
}

/// Converts a C string pointer to a Rust String.
///
/// # Returns
///
/// * `Ok(String)` - If conversion was successful
/// * `Err(*const c_char)` - Pointer to a `BadRequest` response for null
///   pointers and invalid UTF-8
fn c_ptr_to_string(ptr: *const c_char, field_name: &str) -> Result<String, *const c_char> {
    if ptr.is_null() {
        let error = AppResponse::BadRequest(format!("Null {field_name} pointer"));
        return Err(response_to_c_string(&error));
    }

    match unsafe { CStr::from_ptr(ptr).to_str() } {
        Ok(s) => Ok(s.to_string()),
        Err(e) => {
            let error = AppResponse::BadRequest(format!("Invalid UTF-8 in {field_name}: {e}"));
            Err(response_to_c_string(&error))
        }
    }
}
