//! Locale-style string comparison with uppercase first.
//!
//! Approximates the default (root) collation at three strengths:
//!
//! 1. primary: base letters, ignoring case and accents. Character classes
//!    order as whitespace < punctuation < symbols < digits < letters.
//! 2. secondary: accents (`e` < `é`).
//! 3. tertiary: case, uppercase before lowercase (`A` < `a`).
//!
//! A later level is only consulted when every earlier level ties over the
//! whole string, which keeps the ordering total and transitive.

use std::cmp::Ordering;

/// Letters that decompose into a base letter plus an accent. The accent codes
/// only need to be distinct and ordered.
const DECOMPOSITIONS: &[(char, char, u16)] = &[
    ('à', 'a', 1), ('á', 'a', 2), ('â', 'a', 3), ('ã', 'a', 4), ('ä', 'a', 5), ('å', 'a', 6),
    ('À', 'A', 1), ('Á', 'A', 2), ('Â', 'A', 3), ('Ã', 'A', 4), ('Ä', 'A', 5), ('Å', 'A', 6),
    ('ç', 'c', 7), ('Ç', 'C', 7),
    ('è', 'e', 1), ('é', 'e', 2), ('ê', 'e', 3), ('ë', 'e', 5),
    ('È', 'E', 1), ('É', 'E', 2), ('Ê', 'E', 3), ('Ë', 'E', 5),
    ('ì', 'i', 1), ('í', 'i', 2), ('î', 'i', 3), ('ï', 'i', 5),
    ('Ì', 'I', 1), ('Í', 'I', 2), ('Î', 'I', 3), ('Ï', 'I', 5),
    ('ñ', 'n', 4), ('Ñ', 'N', 4),
    ('ò', 'o', 1), ('ó', 'o', 2), ('ô', 'o', 3), ('õ', 'o', 4), ('ö', 'o', 5), ('ø', 'o', 8),
    ('Ò', 'O', 1), ('Ó', 'O', 2), ('Ô', 'O', 3), ('Õ', 'O', 4), ('Ö', 'O', 5), ('Ø', 'O', 8),
    ('ù', 'u', 1), ('ú', 'u', 2), ('û', 'u', 3), ('ü', 'u', 5),
    ('Ù', 'U', 1), ('Ú', 'U', 2), ('Û', 'U', 3), ('Ü', 'U', 5),
    ('ý', 'y', 2), ('ÿ', 'y', 5), ('Ý', 'Y', 2), ('Ÿ', 'Y', 5),
    ('ё', 'е', 5), ('Ё', 'Е', 5),
    ('й', 'и', 9), ('Й', 'И', 9),
];

/// Combining diacritical marks attach to the preceding character.
const COMBINING_MARKS: std::ops::RangeInclusive<char> = '\u{300}'..='\u{36f}';

#[derive(Debug, Clone, Copy)]
struct CollationElement {
    primary: (u8, char),
    secondary: u16,
    tertiary: u8,
}

/// Compare two strings under the collation described in the module docs.
pub fn compare(a: &str, b: &str) -> Ordering {
    let left = elements(a);
    let right = elements(b);

    level(&left, &right, |e| e.primary)
        .then_with(|| level(&left, &right, |e| e.secondary))
        .then_with(|| level(&left, &right, |e| e.tertiary))
}

fn level<T: Ord>(
    a: &[CollationElement],
    b: &[CollationElement],
    key: impl Fn(&CollationElement) -> T,
) -> Ordering {
    a.iter().map(&key).cmp(b.iter().map(&key))
}

fn elements(s: &str) -> Vec<CollationElement> {
    let mut out: Vec<CollationElement> = Vec::with_capacity(s.len());
    for c in s.chars() {
        if COMBINING_MARKS.contains(&c) {
            if let Some(last) = out.last_mut() {
                let accent = mark_accent(c);
                last.secondary = if last.secondary == 0 {
                    accent
                } else {
                    last.secondary.saturating_mul(64).saturating_add(accent)
                };
            }
            continue;
        }

        let (base, accent) = decompose(c);
        let folded = base.to_lowercase().next().unwrap_or(base);
        out.push(CollationElement {
            primary: (class_of(base), folded),
            secondary: accent,
            tertiary: if base.is_uppercase() { 0 } else { 1 },
        });
    }
    out
}

fn decompose(c: char) -> (char, u16) {
    DECOMPOSITIONS
        .iter()
        .find(|(composed, _, _)| *composed == c)
        .map_or((c, 0), |&(_, base, accent)| (base, accent))
}

// Same codes as DECOMPOSITIONS so precomposed and combining forms agree.
fn mark_accent(mark: char) -> u16 {
    match mark {
        '\u{300}' => 1,
        '\u{301}' => 2,
        '\u{302}' => 3,
        '\u{303}' => 4,
        '\u{308}' => 5,
        '\u{30a}' => 6,
        '\u{327}' => 7,
        '\u{306}' => 9,
        other => 16 + (other as u32 - 0x300) as u16,
    }
}

fn class_of(c: char) -> u8 {
    if c.is_whitespace() {
        0
    } else if c.is_alphabetic() {
        4
    } else if c.is_numeric() {
        3
    } else if c.is_ascii_punctuation() && !"$+<=>^`|~".contains(c) {
        1
    } else {
        2
    }
}
