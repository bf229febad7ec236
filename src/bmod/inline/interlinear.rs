//! Word/tag alignment for verses annotated with Strong's markers.
//!
//! Two marker notations are recognised:
//! - Angle markers, `In the beginning <H7225> God <H430>`, which trail the
//!   word they annotate, usually as a separate token.
//! - Brace markers, `said{H559} {H3808}`, glued to their word. A brace
//!   marker standing alone marks a source word left untranslated and is
//!   rendered as the placeholder word [`UNTRANSLATED`].
//!
//! Morphology markers such as `{(8804)}` carry no lexical tag and are
//! removed before alignment. A token may hold several glued words
//! (`a{H1}b{H2}`); each marker tags the fragment in front of it.

use std::sync::OnceLock;

use regex::Regex;

use crate::bmod::types::models::{InterlinearToken, StrongsId, Testament};

/// Word emitted for a source word with no English rendering.
pub const UNTRANSLATED: &str = "[?]";

static MARKER_PATTERN: OnceLock<Regex> = OnceLock::new();
static MORPHOLOGY_PATTERN: OnceLock<Regex> = OnceLock::new();
static EDGE_PUNCTUATION_PATTERN: OnceLock<Regex> = OnceLock::new();

fn marker_regex() -> &'static Regex {
    MARKER_PATTERN.get_or_init(|| {
        Regex::new(r"<(?P<angle>[HG]\d+)>|\{(?P<brace>[HG]\d+)\}")
            .expect("Invalid interlinear marker regex pattern")
    })
}

fn morphology_regex() -> &'static Regex {
    MORPHOLOGY_PATTERN.get_or_init(|| {
        Regex::new(r"\{\([^)}]*\)\}").expect("Invalid morphology regex pattern")
    })
}

/// Strips Unicode punctuation (`.`, `”`, `—`) from both ends of a fragment.
fn edge_punctuation_regex() -> &'static Regex {
    EDGE_PUNCTUATION_PATTERN.get_or_init(|| {
        Regex::new(r"^\p{P}*(?s:(?P<core>.*?))\p{P}*$").expect("Invalid punctuation regex pattern")
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Notation {
    Angle,
    Brace,
}

/// The testament of the markers in `text`, or `None` when it has none.
///
/// Greek only when every marker is Greek; mixed alphabets are ambiguous and
/// resolve to Hebrew.
pub fn marker_testament(text: &str) -> Option<Testament> {
    let mut has_hebrew = false;
    let mut has_greek = false;
    for caps in marker_regex().captures_iter(text) {
        let tag = caps.name("angle").or_else(|| caps.name("brace"));
        match tag.and_then(|m| m.as_str().chars().next()) {
            Some('H') => has_hebrew = true,
            Some('G') => has_greek = true,
            _ => {}
        }
    }
    match (has_hebrew, has_greek) {
        (false, false) => None,
        (false, true) => Some(Testament::Greek),
        _ => Some(Testament::Hebrew),
    }
}

/// Picks the sentinel testament for a verse, defaulting to Hebrew.
pub fn detect_testament(text: &str) -> Testament {
    marker_testament(text).unwrap_or(Testament::Hebrew)
}

/// Aligns a verse, inferring the sentinel testament from its markers.
pub fn align(text: &str) -> Vec<InterlinearToken> {
    align_for(text, detect_testament(text))
}

/// Aligns a verse whose untagged words default to `testament`'s sentinel.
pub fn align_for(text: &str, testament: Testament) -> Vec<InterlinearToken> {
    let sentinel = StrongsId::sentinel(testament);
    let cleaned = morphology_regex().replace_all(text, "");
    let mut tokens: Vec<InterlinearToken> = Vec::new();

    for raw in cleaned.split_whitespace() {
        align_token(raw, sentinel, &mut tokens);
    }

    tokens
}

/// Aligns one whitespace token, appending to `tokens`.
///
/// Text before a marker is the word that marker tags. The first fragment
/// of a token is kept verbatim; fragments after a marker lose their edge
/// punctuation, and a fragment left empty by that is dropped.
fn align_token(raw: &str, sentinel: StrongsId, tokens: &mut Vec<InterlinearToken>) {
    let mut cursor = 0;
    let mut seen_marker = false;

    for caps in marker_regex().captures_iter(raw) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        let before = &raw[cursor..whole.start()];
        let word = if seen_marker { trim_punctuation(before) } else { before };
        cursor = whole.end();

        let Some((notation, tag)) = marker(&caps) else {
            if !word.is_empty() {
                push(tokens, word, sentinel);
            }
            continue;
        };

        if !word.is_empty() {
            push(tokens, word, tag);
        } else if seen_marker {
            // Consecutive markers: the later one wins.
            if let Some(previous) = tokens.last_mut() {
                previous.tag = tag;
            }
        } else {
            match (notation, tokens.last_mut()) {
                (Notation::Angle, Some(previous)) => previous.tag = tag,
                _ => push(tokens, UNTRANSLATED, tag),
            }
        }
        seen_marker = true;
    }

    let rest = &raw[cursor..];
    let rest = if cursor == 0 { rest } else { trim_punctuation(rest) };
    if !rest.is_empty() {
        push(tokens, rest, sentinel);
    }
}

fn push(tokens: &mut Vec<InterlinearToken>, word: &str, tag: StrongsId) {
    tokens.push(InterlinearToken {
        word: word.to_string(),
        tag,
    });
}

fn trim_punctuation(fragment: &str) -> &str {
    edge_punctuation_regex()
        .captures(fragment)
        .and_then(|caps| caps.name("core"))
        .map_or(fragment, |m| m.as_str())
}

fn marker(caps: &regex::Captures<'_>) -> Option<(Notation, StrongsId)> {
    let (notation, tag) = match (caps.name("angle"), caps.name("brace")) {
        (Some(m), _) => (Notation::Angle, m.as_str()),
        (None, Some(m)) => (Notation::Brace, m.as_str()),
        (None, None) => return None,
    };
    tag.parse::<StrongsId>().ok().map(|id| (notation, id))
}

/// Renders tokens in the stored `word|H123` form, space separated.
pub fn format_pipe(tokens: &[InterlinearToken]) -> String {
    tokens
        .iter()
        .map(|token| format!("{}|{}", token.word, token.tag))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parses the stored `word|H123` form.
///
/// Words without a `|` belong to the next tagged word, so multi-word
/// glosses such as `without form|H8414` survive. A pair whose tag does not
/// parse is dropped; trailing untagged words get the sentinel.
pub fn parse_pipe(text: &str) -> Vec<InterlinearToken> {
    let mut tokens = Vec::new();
    let mut pending: Vec<&str> = Vec::new();
    let mut testament = Testament::Hebrew;

    for part in text.split_whitespace() {
        let Some((word, tag)) = part.rsplit_once('|') else {
            pending.push(part);
            continue;
        };
        if !word.is_empty() {
            pending.push(word);
        }
        let gloss = pending.join(" ");
        pending.clear();
        if let Ok(tag) = tag.parse::<StrongsId>() {
            testament = tag.testament;
            tokens.push(InterlinearToken { word: gloss, tag });
        }
    }

    if !pending.is_empty() {
        tokens.push(InterlinearToken {
            word: pending.join(" "),
            tag: StrongsId::sentinel(testament),
        });
    }
    tokens
}
