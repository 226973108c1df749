//! Candidate normalisation and noise filtering.
//!
//! Every raw candidate passes through [`clean`] before it may become a
//! [`crate::types::Term`]. The rules are data-driven: each source maps to a
//! [`NoiseProfile`] holding its deny-lists, so adding a source means adding
//! a profile entry rather than new control flow.
//!
//! Steps, in order:
//!
//! 1. Decode residual entities, collapse whitespace, strip leading bullet
//!    glyphs (profiles with `strip_bullets`)
//! 2. Reject empty strings
//! 3. Reject strings longer than [`MAX_TERM_CHARS`] characters
//! 4. Reject boilerplate (deny-lists, pure punctuation, bracketed counts,
//!    interrogative or exclamatory text)
//! 5. Require at least one Japanese character

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

use crate::types::{Candidate, SourceId};

/// Longest accepted translation, in characters.
pub const MAX_TERM_CHARS: usize = 50;

/// Glyphs stripped from the start of scraped candidates.
const BULLET_GLYPHS: &[char] = &[
    '・', '•', '●', '◆', '▶', '▷', '◼', '■', '□', '-', '–', '—', '·',
];

/// Characters that mark meta text rather than a translation.
const META_PUNCTUATION: &[char] = &['?', '？', '!', '！'];

/// Bracketed counts such as `(123 results)` or `（12件）`.
static BRACKETED_COUNT: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"^[(（\[【]\s*[0-9０-９][0-9０-９,，]*\s*[^)）\]】]*[)）\]】]$").ok()
});

/// Source-specific noise rules.
#[derive(Debug)]
pub struct NoiseProfile {
    /// Strip leading bullet and arrow glyphs.
    pub strip_bullets: bool,
    /// Decode HTML entities left in the raw text. Off for scraped pages,
    /// whose text the HTML parser has already decoded once.
    pub decode_entities: bool,
    /// Lowercased strings rejected on exact match.
    pub deny_exact: &'static [&'static str],
    /// Lowercased substrings rejected anywhere in the candidate.
    pub deny_contains: &'static [&'static str],
}

/// Profile for scraped dictionary pages: navigation, column headers,
/// UI verbs, legal footers and ad labels all leak into extracted blocks.
pub static SCRAPED_PAGE: NoiseProfile = NoiseProfile {
    strip_bullets: true,
    decode_entities: false,
    deny_exact: &[
        "additional translations",
        "principal translations",
        "compound forms",
        "english",
        "japanese",
        "英語",
        "日本語",
        "英和",
        "和英",
        "訳語",
        "主な訳語",
        "その他の訳語",
        "複合語",
        "例文",
        "report",
        "edit",
        "login",
        "log in",
        "sign in",
        "share",
        "ログイン",
        "編集",
        "報告",
        "共有",
        "もっと見る",
        "宣伝",
        "広告",
        "pr",
    ],
    deny_contains: &[
        "copyright",
        "privacy",
        "terms of",
        "©",
        "利用規約",
        "プライバシー",
        "著作権",
        "weblio",
        "wordreference",
    ],
};

/// Profile for structured APIs, whose fields are already clean apart from
/// the odd HTML entity carried through from upstream dictionary data.
pub static STRUCTURED_API: NoiseProfile = NoiseProfile {
    strip_bullets: false,
    decode_entities: true,
    deny_exact: &[],
    deny_contains: &["copyright", "©"],
};

/// Noise profile for a given source.
pub fn profile_for(source: SourceId) -> &'static NoiseProfile {
    if source.is_scraped() {
        &SCRAPED_PAGE
    } else {
        &STRUCTURED_API
    }
}

/// Why a candidate was discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Nothing left after normalisation.
    Empty,
    /// Longer than [`MAX_TERM_CHARS`].
    TooLong,
    /// Matched a boilerplate rule.
    Boilerplate,
    /// No Japanese character present.
    NoTargetScript,
}

/// Normalise and filter one candidate using its source's profile.
///
/// Returns the cleaned text on success.
pub fn clean(candidate: &Candidate) -> Result<String, Rejection> {
    clean_text(&candidate.raw_text, profile_for(candidate.source))
}

/// Normalise and filter raw text against an explicit profile.
pub fn clean_text(raw: &str, profile: &NoiseProfile) -> Result<String, Rejection> {
    let text = normalize(raw, profile);

    if text.is_empty() {
        return Err(Rejection::Empty);
    }
    if text.chars().count() > MAX_TERM_CHARS {
        return Err(Rejection::TooLong);
    }
    if is_boilerplate(&text, profile) {
        return Err(Rejection::Boilerplate);
    }
    if !contains_target_script(&text) {
        return Err(Rejection::NoTargetScript);
    }
    Ok(text)
}

/// Decode entities (profiles with `decode_entities`), collapse whitespace
/// and optionally strip bullets.
pub fn normalize(raw: &str, profile: &NoiseProfile) -> String {
    let decoded = if profile.decode_entities {
        decode_entities(raw)
    } else {
        Cow::Borrowed(raw)
    };
    let mut text = collapse_whitespace(&decoded);
    if profile.strip_bullets {
        let stripped = text.trim_start_matches(|c: char| BULLET_GLYPHS.contains(&c) || c.is_whitespace());
        if stripped.len() != text.len() {
            text = stripped.to_owned();
        }
    }
    text
}

/// Trim and collapse runs of whitespace (including U+3000 and NBSP) to a
/// single ASCII space.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Decode the small set of HTML entities seen in source payloads:
/// `&nbsp;`, `&amp;`, `&lt;`, `&gt;`, `&quot;`, `&apos;` and numeric
/// (`&#NNN;`, `&#xHH;`) references. Unknown entities are left as-is.
pub fn decode_entities(text: &str) -> Cow<'_, str> {
    if !text.contains('&') {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        // Entities are short; do not scan arbitrarily far for ';'.
        let semi = tail.char_indices().take(12).find(|&(_, c)| c == ';').map(|(i, _)| i);
        match semi.and_then(|end| decode_entity(&tail[1..end]).map(|c| (c, end))) {
            Some((decoded, end)) => {
                out.push(decoded);
                rest = &tail[end + 1..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    Cow::Owned(out)
}

/// Decode a single entity body (without `&` and `;`).
fn decode_entity(body: &str) -> Option<char> {
    match body {
        "nbsp" => Some('\u{a0}'),
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => {
            let num = body.strip_prefix('#')?;
            let code = match num.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => num.parse::<u32>().ok()?,
            };
            char::from_u32(code)
        }
    }
}

/// Returns `true` if `text` matches any boilerplate rule.
fn is_boilerplate(text: &str, profile: &NoiseProfile) -> bool {
    if text.contains(META_PUNCTUATION) {
        return true;
    }
    if !text.chars().any(char::is_alphanumeric) {
        return true;
    }
    if BRACKETED_COUNT.as_ref().is_some_and(|re| re.is_match(text)) {
        return true;
    }
    let lower = text.to_lowercase();
    profile.deny_exact.contains(&lower.as_str())
        || profile.deny_contains.iter().any(|needle| lower.contains(needle))
}

/// Returns `true` if `c` belongs to the Japanese script ranges: kana,
/// kanji, iteration marks and half-width katakana. Kana punctuation such
/// as the middle dot does not count.
pub fn is_target_script(c: char) -> bool {
    matches!(c,
        '\u{3005}' | '\u{3006}'          // 々 〆
        | '\u{3041}'..='\u{3096}'        // hiragana
        | '\u{309D}'..='\u{309F}'        // hiragana iteration marks
        | '\u{30A1}'..='\u{30FA}'        // katakana
        | '\u{30FC}'..='\u{30FF}'        // prolonged sound mark, katakana iteration
        | '\u{31F0}'..='\u{31FF}'        // katakana phonetic extensions
        | '\u{3400}'..='\u{4DBF}'        // CJK extension A
        | '\u{4E00}'..='\u{9FFF}'        // CJK unified ideographs
        | '\u{F900}'..='\u{FAFF}'        // CJK compatibility ideographs
        | '\u{FF66}'..='\u{FF9F}'        // half-width katakana
    )
}

/// Returns `true` if `text` contains at least one Japanese character.
pub fn contains_target_script(text: &str) -> bool {
    text.chars().any(is_target_script)
}
