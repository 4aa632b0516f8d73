//! C8: BCP 47 language subtag validation (spec.md §4.7).
//!
//! A linear scan over `-`-separated subtags in `language -> extlang ->
//! script -> region -> variant* -> (singleton -> extension+ | privateuse+)`
//! order, backed by compile-time `phf` maps. The IANA language subtag
//! registry (~10,000 entries) is explicitly out of scope to ingest at
//! build time (spec.md §1); this hand-curates a representative subset of
//! each registry table instead, in the shape the full registry would
//! take.

use phf::phf_map;

/// Why a tag was rejected, and where (spec.md §4.7: "`{reason, offset,
/// length}` pointing into the input").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rejection {
    pub reason: &'static str,
    pub offset: u32,
    pub length: u32,
}

/// Primary language subtags (2-3 letters). Representative subset.
static LANGUAGE: phf::Map<&'static str, ()> = phf_map! {
    "en" => (), "fr" => (), "de" => (), "es" => (), "it" => (), "pt" => (),
    "ru" => (), "zh" => (), "ja" => (), "ko" => (), "ar" => (), "hi" => (),
    "nl" => (), "sv" => (), "pl" => (), "tr" => (), "vi" => (), "th" => (),
    "he" => (), "uk" => (), "cs" => (), "el" => (), "fi" => (), "da" => (),
    "no" => (), "hu" => (), "ro" => (), "sk" => (), "bg" => (), "hr" => (),
    "und" => (),
};

/// Deprecated primary language subtags, mapped to their replacement.
static LANGUAGE_DEPRECATED: phf::Map<&'static str, &'static str> = phf_map! {
    "in" => "id",
    "iw" => "he",
    "ji" => "yi",
    "mo" => "ro",
};

static EXTLANG: phf::Map<&'static str, ()> = phf_map! {
    "cmn" => (), "yue" => (), "asp" => (),
};

static SCRIPT: phf::Map<&'static str, ()> = phf_map! {
    "Latn" => (), "Cyrl" => (), "Hans" => (), "Hant" => (), "Arab" => (),
    "Grek" => (), "Hebr" => (), "Hira" => (), "Kana" => (), "Hang" => (),
    "Deva" => (), "Thai" => (),
};

static REGION: phf::Map<&'static str, ()> = phf_map! {
    "US" => (), "GB" => (), "FR" => (), "DE" => (), "JP" => (), "CN" => (),
    "KR" => (), "BR" => (), "IN" => (), "RU" => (), "CA" => (), "AU" => (),
    "ES" => (), "IT" => (), "MX" => (), "419" => (), "001" => (),
};

static VARIANT: phf::Map<&'static str, ()> = phf_map! {
    "valencia" => (), "1996" => (), "polyton" => (), "rozaj" => (),
};

static GRANDFATHERED: phf::Map<&'static str, ()> = phf_map! {
    "i-klingon" => (), "i-navajo" => (), "i-enochian" => (), "zh-min-nan" => (),
};

static GRANDFATHERED_DEPRECATED: phf::Map<&'static str, &'static str> = phf_map! {
    "art-lojban" => "jbo",
    "zh-xiang" => "hsn",
};

/// Validate a BCP 47 language tag. Returns `None` on success, or a
/// [`Rejection`] pointing at the first offending subtag.
#[must_use]
pub fn validate(tag: &[u8]) -> Option<Rejection> {
    let Ok(text) = std::str::from_utf8(tag) else {
        return Some(Rejection {
            reason: "non-UTF-8 language tag",
            offset: 0,
            length: tag.len() as u32,
        });
    };
    if text.is_empty() {
        return Some(Rejection { reason: "empty language tag", offset: 0, length: 0 });
    }

    let lower = text.to_ascii_lowercase();
    if let Some(&replacement) = GRANDFATHERED_DEPRECATED.get(lower.as_str()) {
        return Some(Rejection { reason: replacement, offset: 0, length: text.len() as u32 });
    }
    if GRANDFATHERED.contains_key(lower.as_str()) {
        return None;
    }

    let subtags: Vec<&str> = text.split('-').collect();
    let mut offset = 0u32;
    let mut i = 0usize;

    let lang = subtags[0];
    if !(2..=8).contains(&lang.len()) || !lang.bytes().all(|b| b.is_ascii_alphabetic()) {
        return Some(reject("malformed primary language subtag", offset, lang.len() as u32));
    }
    let lang_lower = lang.to_ascii_lowercase();
    if let Some(&replacement) = LANGUAGE_DEPRECATED.get(lang_lower.as_str()) {
        return Some(Rejection { reason: replacement, offset, length: lang.len() as u32 });
    }
    if lang.len() <= 3 && !LANGUAGE.contains_key(lang_lower.as_str()) {
        return Some(reject("unknown primary language subtag", offset, lang.len() as u32));
    }
    offset += lang.len() as u32 + 1;
    i += 1;

    while i < subtags.len() && subtags[i].len() == 3 && subtags[i].bytes().all(|b| b.is_ascii_alphabetic()) {
        let lowered = subtags[i].to_ascii_lowercase();
        if !EXTLANG.contains_key(lowered.as_str()) {
            break;
        }
        offset += subtags[i].len() as u32 + 1;
        i += 1;
    }

    if i < subtags.len() && subtags[i].len() == 4 && subtags[i].bytes().all(|b| b.is_ascii_alphabetic()) {
        let capitalized = capitalize(&subtags[i].to_ascii_lowercase());
        if !SCRIPT.contains_key(capitalized.as_str()) {
            return Some(reject("unknown script subtag", offset, subtags[i].len() as u32));
        }
        offset += subtags[i].len() as u32 + 1;
        i += 1;
    }

    if i < subtags.len() && is_region_shaped(subtags[i]) {
        let upper = subtags[i].to_ascii_uppercase();
        if !REGION.contains_key(upper.as_str()) {
            return Some(reject("unknown region subtag", offset, subtags[i].len() as u32));
        }
        offset += subtags[i].len() as u32 + 1;
        i += 1;
    }

    while i < subtags.len() && is_variant_shaped(subtags[i]) {
        let lowered = subtags[i].to_ascii_lowercase();
        if !VARIANT.contains_key(lowered.as_str()) {
            return Some(reject("unknown variant subtag", offset, subtags[i].len() as u32));
        }
        offset += subtags[i].len() as u32 + 1;
        i += 1;
    }

    // Remaining subtags are singleton extensions or a private-use
    // sequence; not cross-checked against a registry (spec.md §4.7
    // enumerates only the six tables above), just shape-checked.
    while i < subtags.len() {
        if subtags[i].is_empty() {
            return Some(reject("empty subtag", offset, 0));
        }
        offset += subtags[i].len() as u32 + 1;
        i += 1;
    }

    None
}

fn is_region_shaped(s: &str) -> bool {
    (s.len() == 2 && s.bytes().all(|b| b.is_ascii_alphabetic())) || (s.len() == 3 && s.bytes().all(|b| b.is_ascii_digit()))
}

fn is_variant_shaped(s: &str) -> bool {
    (5..=8).contains(&s.len()) || (s.len() == 4 && s.as_bytes()[0].is_ascii_digit())
}

fn reject(reason: &'static str, offset: u32, length: u32) -> Rejection {
    Rejection { reason, offset, length }
}

fn capitalize(lowered: &str) -> String {
    let mut chars = lowered.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_language_is_valid() {
        assert_eq!(validate(b"en"), None);
    }

    #[test]
    fn language_script_region_is_valid() {
        assert_eq!(validate(b"en-Latn-US"), None);
    }

    #[test]
    fn unknown_primary_language_is_rejected() {
        assert!(validate(b"xx").is_some());
    }

    #[test]
    fn grandfathered_tag_is_valid() {
        assert_eq!(validate(b"i-klingon"), None);
    }

    #[test]
    fn deprecated_language_is_rejected_with_replacement_reason() {
        let r = validate(b"iw").unwrap();
        assert_eq!(r.reason, "he");
    }

    #[test]
    fn invalid_region_points_at_the_offending_subtag() {
        let r = validate(b"en-XX-invalid").unwrap();
        assert_eq!(r.offset, 3);
        assert_eq!(r.length, 2);
    }
}
