//! Slug generation with Greek-to-Latin transliteration.

/// Slug used when a title is missing or reduces to nothing.
pub const UNTITLED: &str = "untitled";

/// Latin substitutions for lowercase Greek letters and accented vowels.
const GREEK_TO_LATIN: &[(char, &str)] = &[
    ('α', "a"),
    ('β', "v"),
    ('γ', "g"),
    ('δ', "d"),
    ('ε', "e"),
    ('ζ', "z"),
    ('η', "i"),
    ('θ', "th"),
    ('ι', "i"),
    ('κ', "k"),
    ('λ', "l"),
    ('μ', "m"),
    ('ν', "n"),
    ('ξ', "x"),
    ('ο', "o"),
    ('π', "p"),
    ('ρ', "r"),
    ('σ', "s"),
    ('ς', "s"),
    ('τ', "t"),
    ('υ', "y"),
    ('φ', "f"),
    ('χ', "ch"),
    ('ψ', "ps"),
    ('ω', "o"),
    ('ά', "a"),
    ('έ', "e"),
    ('ή', "i"),
    ('ί', "i"),
    ('ό', "o"),
    ('ύ', "y"),
    ('ώ', "o"),
    ('ϊ', "i"),
    ('ΐ', "i"),
    ('ϋ', "y"),
    ('ΰ', "y"),
];

fn latin_for(c: char) -> Option<&'static str> {
    GREEK_TO_LATIN
        .iter()
        .find(|(greek, _)| *greek == c)
        .map(|(_, latin)| *latin)
}

/// Lowercase the input and replace every Greek letter with its Latin spelling.
///
/// Characters outside the table pass through unchanged.
pub fn transliterate(input: &str) -> String {
    let lowercased = input.to_lowercase();
    let mut out = String::with_capacity(lowercased.len());
    for c in lowercased.chars() {
        match latin_for(c) {
            Some(latin) => out.push_str(latin),
            None => out.push(c),
        }
    }
    out
}

/// Convert a title to a URL-safe slug
///
/// Rules:
/// - Lowercase and transliterate Greek to Latin
/// - Whitespace runs and hyphens become a single hyphen
/// - Every other character outside `[a-z0-9]` is removed
/// - No leading or trailing hyphens
/// - Empty results fall back to [`UNTITLED`]
///
/// # Examples
///
/// ```
/// use sheetsite_core::slugify;
///
/// assert_eq!(slugify("Hello World"), "hello-world");
/// assert_eq!(slugify("Καλημέρα Κόσμε"), "kalimera-kosme");
/// assert_eq!(slugify("C++ Programming"), "c-programming");
/// assert_eq!(slugify(""), "untitled");
/// ```
pub fn slugify(input: &str) -> String {
    if input.is_empty() {
        return UNTITLED.to_string();
    }

    let latin = transliterate(input);

    let mut slug = String::with_capacity(latin.len());
    let mut pending_hyphen = false;
    for c in latin.trim().chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            slug.push(c);
            pending_hyphen = false;
        } else if c == '-' || c.is_whitespace() {
            pending_hyphen = true;
        }
        // anything else is dropped without breaking the current word
    }

    if slug.is_empty() {
        UNTITLED.to_string()
    } else {
        slug
    }
}
