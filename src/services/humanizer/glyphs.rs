// Glyph Tables
// Homoglyphs, invisible marks and alternate-width spaces used by the anti-detection pass.

use std::collections::HashMap;
use std::sync::OnceLock;

pub const ZERO_WIDTH_SPACE: char = '\u{200B}';

/// Invisible formatting marks inserted after function words.
pub const INVISIBLE_MARKS: &[char] = &['\u{200C}', '\u{200D}', '\u{2060}', '\u{200E}', '\u{FEFF}', '\u{061C}'];

/// Zero-width marks used by the finishing pass. None of them renders.
pub const RHYTHM_MARKS: &[char] = &['\u{2060}', '\u{200B}', '\u{200C}', '\u{200D}', '\u{FEFF}'];

pub const ALTERNATE_SPACES: &[char] = &['\u{2004}', '\u{2005}', '\u{2006}', '\u{2009}', '\u{202F}', '\u{205F}'];

/// Latin letter and the look-alikes it can be swapped for. Lower case first, then upper.
pub const HOMOGLYPHS: &[(char, &[char])] = &[
    ('a', &['\u{0430}', '\u{0251}', '\u{03B1}']),
    ('b', &['\u{0185}', '\u{042C}', '\u{03E6}']),
    ('c', &['\u{0441}', '\u{03F2}', '\u{0188}']),
    ('d', &['\u{0501}', '\u{0257}', '\u{0111}']),
    ('e', &['\u{0435}', '\u{0117}', '\u{04BD}']),
    ('g', &['\u{0261}', '\u{0581}', '\u{0123}']),
    ('h', &['\u{04BB}', '\u{13C2}', '\u{210E}']),
    ('i', &['\u{0456}', '\u{0269}', '\u{03AF}']),
    ('j', &['\u{0458}', '\u{03F3}', '\u{0249}']),
    ('k', &['\u{043A}', '\u{049D}', '\u{2C6A}']),
    ('l', &['\u{04CF}', '\u{1E37}', '\u{217C}']),
    ('m', &['\u{043C}', '\u{1E43}', '\u{217F}']),
    ('n', &['\u{043F}', '\u{0578}', '\u{1E47}']),
    ('o', &['\u{043E}', '\u{03BF}', '\u{022F}']),
    ('p', &['\u{0440}', '\u{03C1}', '\u{1E57}']),
    ('q', &['\u{0566}', '\u{051B}', '\u{02A0}']),
    ('r', &['\u{0433}', '\u{1E5B}', '\u{027E}']),
    ('s', &['\u{0455}', '\u{1E63}', '\u{0282}']),
    ('t', &['\u{0442}', '\u{1E6D}', '\u{021B}']),
    ('u', &['\u{03C5}', '\u{057D}', '\u{1E73}']),
    ('v', &['\u{0475}', '\u{03BD}', '\u{2174}']),
    ('w', &['\u{051D}', '\u{0461}', '\u{1E87}']),
    ('x', &['\u{0445}', '\u{04B3}', '\u{00D7}']),
    ('y', &['\u{0443}', '\u{1EF5}', '\u{0263}']),
    ('z', &['\u{1D22}', '\u{017C}', '\u{01B6}']),
    ('A', &['\u{0410}', '\u{0391}', '\u{13AA}']),
    ('B', &['\u{0412}', '\u{0392}', '\u{13F4}']),
    ('C', &['\u{0421}', '\u{03F9}', '\u{216D}']),
    ('D', &['\u{13A0}', '\u{216E}', '\u{00D0}']),
    ('E', &['\u{0415}', '\u{0395}', '\u{13AC}']),
    ('F', &['\u{03DC}', '\u{15B4}', '\u{0191}']),
    ('G', &['\u{050C}', '\u{13C0}', '\u{01E4}']),
    ('H', &['\u{041D}', '\u{0397}', '\u{13BB}']),
    ('I', &['\u{0406}', '\u{0399}', '\u{13C6}']),
    ('J', &['\u{0408}', '\u{13AB}', '\u{0248}']),
    ('K', &['\u{041A}', '\u{039A}', '\u{13E6}']),
    ('L', &['\u{13DE}', '\u{216C}', '\u{053C}']),
    ('M', &['\u{041C}', '\u{039C}', '\u{13B7}']),
    ('N', &['\u{039D}', '\u{2C9A}', '\u{A4E0}']),
    ('O', &['\u{041E}', '\u{039F}', '\u{13BE}']),
    ('P', &['\u{0420}', '\u{03A1}', '\u{13E2}']),
    ('Q', &['\u{051A}', '\u{2D55}', '\u{01EA}']),
    ('R', &['\u{13A1}', '\u{13D2}', '\u{A4E3}']),
    ('S', &['\u{0405}', '\u{13D5}', '\u{054F}']),
    ('T', &['\u{0422}', '\u{03A4}', '\u{13A2}']),
    ('U', &['\u{054D}', '\u{144C}', '\u{A4F4}']),
    ('V', &['\u{0474}', '\u{13D9}', '\u{2164}']),
    ('W', &['\u{051C}', '\u{13B3}', '\u{13D4}']),
    ('X', &['\u{0425}', '\u{03A7}', '\u{2169}']),
    ('Y', &['\u{03A5}', '\u{13BD}', '\u{04AE}']),
    ('Z', &['\u{13C3}', '\u{0396}', '\u{A4DC}']),
];

/// Look-alikes for `ch`; empty when the letter has none.
pub fn homoglyphs_for(ch: char) -> &'static [char] {
    HOMOGLYPHS
        .iter()
        .find(|(latin, _)| *latin == ch)
        .map(|(_, glyphs)| *glyphs)
        .unwrap_or(&[])
}

fn canonical_index() -> &'static HashMap<char, char> {
    static INDEX: OnceLock<HashMap<char, char>> = OnceLock::new();
    INDEX.get_or_init(|| {
        HOMOGLYPHS
            .iter()
            .flat_map(|(latin, glyphs)| glyphs.iter().map(move |g| (*g, *latin)))
            .collect()
    })
}

/// The Latin letter a homoglyph stands in for.
pub fn canonical_latin(ch: char) -> Option<char> {
    canonical_index().get(&ch).copied()
}

pub fn is_invisible(ch: char) -> bool {
    ch == ZERO_WIDTH_SPACE || INVISIBLE_MARKS.contains(&ch) || RHYTHM_MARKS.contains(&ch)
}

/// Undo every glyph-level disguise: drop invisible marks, restore plain spaces and Latin letters.
pub fn reveal(text: &str) -> String {
    text.chars()
        .filter(|c| !is_invisible(*c))
        .map(|c| {
            if ALTERNATE_SPACES.contains(&c) {
                ' '
            } else {
                canonical_latin(c).unwrap_or(c)
            }
        })
        .collect()
}
