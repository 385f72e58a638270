//! Name normalization for the two matching stages.

/// Exact-stage key: uppercase with every whitespace character removed.
///
/// Punctuation is kept, so `"ABC SDN. BHD"` and `"ABC SDN BHD"` get
/// different keys.
pub fn strict_key(name: &str) -> String {
    name.to_uppercase()
        .chars()
        .filter(|ch| !ch.is_whitespace())
        .collect()
}

/// Approximate-stage form: lowercase, word characters and whitespace only,
/// whitespace runs collapsed to one space, ends trimmed.
pub fn cleaned_name(name: &str) -> String {
    let lowered = name.to_lowercase();
    let kept: String = lowered
        .chars()
        .filter(|&ch| is_word_char(ch) || ch.is_whitespace())
        .collect();
    kept.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}
