// ✍️ Name Normalizer
// Turns handwritten names ("alpHa-alFRedo", "Riz@z RISO00tto!") into the
// canonical form used as registry key: "Alpha Alfredo", "Rizz Risotto".

/// Canonicalize a free-form name.
///
/// Returns `None` when the input has no ASCII letters at all. Otherwise:
/// `-` and `_` become spaces, everything that is not a letter or a space is
/// dropped, whitespace runs collapse to one space, and every word is
/// capitalized.
pub fn normalize(input: &str) -> Option<String> {
    if !input.chars().any(|c| c.is_ascii_alphabetic()) {
        return None;
    }

    let letters: String = input
        .replace(['-', '_'], " ")
        .chars()
        .filter(|c| c.is_ascii_alphabetic() || *c == ' ')
        .collect::<String>()
        .to_ascii_lowercase();

    let words: Vec<String> = letters.split_whitespace().map(capitalize).collect();
    Some(words.join(" "))
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

// ============================================================================
// TESTS
// ============================================================================
