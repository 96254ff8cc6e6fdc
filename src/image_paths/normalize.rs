use regex::Regex;

fn disallowed_characters() -> &'static Regex {
    use std::sync::OnceLock;

    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[^a-z0-9.]").expect("invalid normalisation regex"))
}

/// Lower-case a filename and drop everything except ASCII letters, digits and `.`.
///
/// Hyphens, underscores, spaces and other punctuation vanish, so `Blue_Eyes.jpg` and
/// `blue-eyes.jpg` both become `blueeyes.jpg`.
pub fn normalize_name(value: &str) -> String {
    disallowed_characters()
        .replace_all(&value.to_lowercase(), "")
        .into_owned()
}
