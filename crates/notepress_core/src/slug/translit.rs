//! Static transliteration table and slug derivation.
//!
//! # Invariants
//! - Output contains only `[a-z0-9-]`.
//! - Pure function of the input text; no locale or environment lookups.

use once_cell::sync::Lazy;
use regex::Regex;

static AMPERSAND_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"&amp;|&").expect("valid ampersand regex"));
static HYPHEN_RUN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"-{2,}").expect("valid hyphen regex"));

/// Derives a URL-safe slug from free text.
///
/// Lowercases, transliterates non-Latin letters, turns whitespace, `-` and
/// `_` runs into single hyphens and drops every other symbol. Leading and
/// trailing hyphens are trimmed. No length cap is applied here.
pub fn slugify(input: &str) -> String {
    let lowered = input.to_lowercase();
    let expanded = AMPERSAND_RE.replace_all(&lowered, " and ");

    let mut ascii = String::with_capacity(expanded.len());
    for ch in expanded.chars() {
        if ch.is_ascii_alphanumeric() {
            ascii.push(ch);
        } else if ch.is_whitespace() || ch == '-' || ch == '_' {
            ascii.push('-');
        } else if let Some(latin) = transliterate_char(ch) {
            ascii.push_str(latin);
        }
    }

    let collapsed = HYPHEN_RUN_RE.replace_all(&ascii, "-");
    collapsed.trim_matches('-').to_string()
}

/// Maps one lowercase letter to its Latin phonetic equivalent.
///
/// Returns `None` for characters with no mapping; callers drop them.
/// Hard and soft signs map to an empty string.
pub fn transliterate_char(ch: char) -> Option<&'static str> {
    cyrillic(ch).or_else(|| greek(ch)).or_else(|| latin_extended(ch))
}

fn cyrillic(ch: char) -> Option<&'static str> {
    let latin = match ch {
        'а' => "a",
        'б' => "b",
        'в' => "v",
        'г' => "g",
        'д' => "d",
        'е' => "e",
        'ё' => "yo",
        'ж' => "zh",
        'з' => "z",
        'и' => "i",
        'й' => "j",
        'к' => "k",
        'л' => "l",
        'м' => "m",
        'н' => "n",
        'о' => "o",
        'п' => "p",
        'р' => "r",
        'с' => "s",
        'т' => "t",
        'у' => "u",
        'ф' => "f",
        'х' => "h",
        'ц' => "ts",
        'ч' => "ch",
        'ш' => "sh",
        'щ' => "sch",
        'ъ' | 'ь' => "",
        'ы' => "y",
        'э' => "e",
        'ю' => "yu",
        'я' => "ya",
        // Ukrainian and Belarusian letters.
        'є' => "ye",
        'і' => "i",
        'ї' => "yi",
        'ґ' => "g",
        'ў' => "u",
        _ => return None,
    };
    Some(latin)
}

fn greek(ch: char) -> Option<&'static str> {
    let latin = match ch {
        'α' | 'ά' => "a",
        'β' => "v",
        'γ' => "g",
        'δ' => "d",
        'ε' | 'έ' => "e",
        'ζ' => "z",
        'η' | 'ή' => "i",
        'θ' => "th",
        'ι' | 'ί' | 'ϊ' | 'ΐ' => "i",
        'κ' => "k",
        'λ' => "l",
        'μ' => "m",
        'ν' => "n",
        'ξ' => "x",
        'ο' | 'ό' => "o",
        'π' => "p",
        'ρ' => "r",
        'σ' | 'ς' => "s",
        'τ' => "t",
        'υ' | 'ύ' | 'ϋ' | 'ΰ' => "y",
        'φ' => "f",
        'χ' => "ch",
        'ψ' => "ps",
        'ω' | 'ώ' => "o",
        _ => return None,
    };
    Some(latin)
}

fn latin_extended(ch: char) -> Option<&'static str> {
    let latin = match ch {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' | 'ă' | 'ą' => "a",
        'æ' => "ae",
        'ç' | 'ć' | 'č' => "c",
        'ď' | 'đ' | 'ð' => "d",
        'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ę' | 'ě' => "e",
        'ğ' => "g",
        'ì' | 'í' | 'î' | 'ï' | 'ī' | 'ı' => "i",
        'ł' | 'ľ' => "l",
        'ñ' | 'ń' | 'ň' => "n",
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' | 'ō' | 'ő' => "o",
        'œ' => "oe",
        'ř' => "r",
        'ś' | 'š' | 'ş' => "s",
        'ß' => "ss",
        'ť' | 'ţ' => "t",
        'þ' => "th",
        'ù' | 'ú' | 'û' | 'ü' | 'ū' | 'ů' | 'ű' => "u",
        'ý' | 'ÿ' => "y",
        'ź' | 'ż' | 'ž' => "z",
        _ => return None,
    };
    Some(latin)
}

#[cfg(test)]
mod tests {
    use super::{slugify, transliterate_char};

    #[test]
    fn transliterates_russian_title() {
        assert_eq!(slugify("Заголовок заметки"), "zagolovok-zametki");
        assert_eq!(slugify("Щука и ёж"), "schuka-i-yozh");
    }

    #[test]
    fn drops_signs_and_punctuation() {
        assert_eq!(slugify("Объявление: съезд!"), "obyavlenie-sezd");
        assert_eq!(slugify("Hello, World."), "hello-world");
    }

    #[test]
    fn collapses_separator_runs_and_trims_edges() {
        assert_eq!(slugify("  a -- b__c  "), "a-b-c");
        assert_eq!(slugify("---"), "");
    }

    #[test]
    fn expands_ampersand() {
        assert_eq!(slugify("Tom & Jerry"), "tom-and-jerry");
        assert_eq!(slugify("Tom&amp;Jerry"), "tom-and-jerry");
    }

    #[test]
    fn folds_greek_and_diacritics() {
        assert_eq!(slugify("Αθήνα"), "athina");
        assert_eq!(slugify("Crème Brûlée"), "creme-brulee");
    }

    #[test]
    fn unmapped_scripts_are_dropped() {
        assert_eq!(slugify("日本 note"), "note");
        assert_eq!(transliterate_char('日'), None);
    }

    #[test]
    fn output_alphabet_is_restricted() {
        let slug = slugify("Ёлка 2024 — «праздник» №1 / Ünïcödé");
        assert!(slug
            .chars()
            .all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '-'));
        assert!(!slug.contains("--"));
    }
}
