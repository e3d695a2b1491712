/*
 *   Copyright (c) 2025 R3BL LLC
 *   All rights reserved.
 *
 *   Licensed under the Apache License, Version 2.0 (the "License");
 *   you may not use this file except in compliance with the License.
 *   You may obtain a copy of the License at
 *
 *   http://www.apache.org/licenses/LICENSE-2.0
 *
 *   Unless required by applicable law or agreed to in writing, software
 *   distributed under the License is distributed on an "AS IS" BASIS,
 *   WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 *   See the License for the specific language governing permissions and
 *   limitations under the License.
 */

//! Cursor aware, case insensitive prefix completion over a fixed list of words.

use std::sync::Arc;

use crate::QUALIFIER_SEPARATOR;

/// The result of a completion request. The line reader rebuilds the line as `head` +
/// one of the `candidates` + `tail`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Completion {
    pub head: String,
    pub candidates: Vec<String>,
    pub tail: String,
}

/// Function installed into a [`crate::LineReader`] to offer inline suggestions. Its
/// arguments are the current line, and the cursor position counted in characters.
pub type CompletionCallback = Arc<dyn Fn(&str, usize) -> Completion + Send + Sync>;

/// Filter `words` for the given `line` and `cursor` (counted in characters, clamped to
/// the end of the line). Neither `line` nor `words` is modified.
///
/// - Empty line, or the cursor is at the start: offer every top level word, ie: those
///   that don't contain [`QUALIFIER_SEPARATOR`].
/// - Otherwise: offer every word that starts with the text before the cursor, ignoring
///   case, in the order they appear in `words`. The text after the cursor is returned as
///   the `tail`.
#[must_use]
pub fn complete_words(line: &str, cursor: usize, words: &[String]) -> Completion {
    if line.is_empty() || cursor == 0 {
        return Completion {
            candidates: words
                .iter()
                .filter(|word| !word.contains(QUALIFIER_SEPARATOR))
                .cloned()
                .collect(),
            ..Default::default()
        };
    }

    let split_at = line
        .char_indices()
        .nth(cursor)
        .map_or(line.len(), |(byte_index, _)| byte_index);
    let (before_cursor, after_cursor) = line.split_at(split_at);
    let prefix = before_cursor.to_lowercase();

    Completion {
        head: String::new(),
        candidates: words
            .iter()
            .filter(|word| word.to_lowercase().starts_with(&prefix))
            .cloned()
            .collect(),
        tail: after_cursor.to_string(),
    }
}

/// Wrap [`complete_words()`] into a [`CompletionCallback`] that owns the (immutable)
/// candidate list.
#[must_use]
pub fn word_completer(words: Arc<[String]>) -> CompletionCallback {
    Arc::new(move |line: &str, cursor: usize| complete_words(line, cursor, &words))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words() -> Vec<String> {
        ["Issues.Create", "Issues.List", "Repositories.Get"]
            .into_iter()
            .map(String::from)
            .collect()
    }

    fn words_with_services() -> Vec<String> {
        [
            "Issues",
            "Issues.Create",
            "Issues.List",
            "Repositories",
            "Repositories.Get",
        ]
        .into_iter()
        .map(String::from)
        .collect()
    }

    #[test]
    fn test_empty_line_offers_only_top_level_words() {
        let completion = complete_words("", 0, &words_with_services());

        pretty_assertions::assert_eq!(completion, Completion {
            head: String::new(),
            candidates: vec!["Issues".to_string(), "Repositories".to_string()],
            tail: String::new(),
        });
    }

    #[test]
    fn test_cursor_at_start_ignores_the_rest_of_the_line() {
        let completion = complete_words("Issues.Li", 0, &words_with_services());

        pretty_assertions::assert_eq!(completion.candidates, vec!["Issues", "Repositories"]);
        assert!(completion.head.is_empty());
        assert!(completion.tail.is_empty());
    }

    #[test]
    fn test_prefix_before_cursor() {
        let completion = complete_words("Iss", 3, &words());

        pretty_assertions::assert_eq!(completion.candidates, vec![
            "Issues.Create",
            "Issues.List"
        ]);
        assert!(completion.head.is_empty());
        assert!(completion.tail.is_empty());
    }

    #[test]
    fn test_prefix_is_case_insensitive_and_tail_is_kept() {
        let completion = complete_words("iSS(owner)", 3, &words());

        pretty_assertions::assert_eq!(completion.candidates, vec![
            "Issues.Create",
            "Issues.List"
        ]);
        assert_eq!(completion.tail, "(owner)");
    }

    #[test]
    fn test_cursor_counts_characters_not_bytes() {
        let words = vec!["éIssues".to_string(), "Issues".to_string()];

        let completion = complete_words("éI!", 2, &words);

        pretty_assertions::assert_eq!(completion.candidates, vec!["éIssues"]);
        assert_eq!(completion.tail, "!");
    }

    #[test]
    fn test_cursor_past_end_is_clamped() {
        let completion = complete_words("Repo", 42, &words());

        pretty_assertions::assert_eq!(completion.candidates, vec!["Repositories.Get"]);
        assert!(completion.tail.is_empty());
    }

    #[test]
    fn test_no_match() {
        let completion = complete_words("Pulls", 5, &words());
        assert!(completion.candidates.is_empty());
    }

    #[test]
    fn test_word_completer_does_not_mutate_words() {
        let words: Arc<[String]> = words().into();
        let callback = word_completer(words.clone());

        let completion = callback("Issues.L", 8);

        pretty_assertions::assert_eq!(completion.candidates, vec!["Issues.List"]);
        pretty_assertions::assert_eq!(&*words, &self::words()[..]);
    }
}
