//! Terminal stand-ins for web font families.
//!
//! A terminal cannot switch typefaces, so a loaded family is drawn with the
//! Unicode Mathematical Alphanumeric letters that best match its category.
//! Characters without a styled counterpart pass through unchanged.

/// Code points of `A`, `a` and `0` in one styled alphabet.
#[derive(Debug, Clone, Copy)]
struct Alphabet {
    upper: u32,
    lower: u32,
    digits: Option<u32>,
}

const BOLD_SERIF: Alphabet = Alphabet {
    upper: 0x1D400,
    lower: 0x1D41A,
    digits: Some(0x1D7CE),
};
const SANS: Alphabet = Alphabet {
    upper: 0x1D5A0,
    lower: 0x1D5BA,
    digits: Some(0x1D7E2),
};
const MONOSPACE: Alphabet = Alphabet {
    upper: 0x1D670,
    lower: 0x1D68A,
    digits: Some(0x1D7F6),
};
const BOLD_SCRIPT: Alphabet = Alphabet {
    upper: 0x1D4D0,
    lower: 0x1D4EA,
    digits: None,
};
const BOLD_FRAKTUR: Alphabet = Alphabet {
    upper: 0x1D56C,
    lower: 0x1D586,
    digits: None,
};

fn alphabet_for(category: &str) -> Option<Alphabet> {
    match category.to_ascii_lowercase().as_str() {
        "serif" => Some(BOLD_SERIF),
        "sans-serif" => Some(SANS),
        "monospace" => Some(MONOSPACE),
        "handwriting" => Some(BOLD_SCRIPT),
        "display" => Some(BOLD_FRAKTUR),
        _ => None,
    }
}

fn offset(base: u32, from: char, c: char) -> Option<char> {
    char::from_u32(base + (c as u32 - from as u32))
}

fn map_char(alphabet: Alphabet, c: char) -> char {
    let mapped = match c {
        'A'..='Z' => offset(alphabet.upper, 'A', c),
        'a'..='z' => offset(alphabet.lower, 'a', c),
        '0'..='9' => alphabet.digits.and_then(|base| offset(base, '0', c)),
        _ => None,
    };
    mapped.unwrap_or(c)
}

/// Render `text` in the glyph style of `category`.
pub fn stylize(text: &str, category: &str) -> String {
    match alphabet_for(category) {
        Some(alphabet) => text.chars().map(|c| map_char(alphabet, c)).collect(),
        None => text.to_string(),
    }
}
