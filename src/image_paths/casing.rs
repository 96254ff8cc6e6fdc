/// Re-case a filename as `Capitalised` basename plus lower-case extension.
///
/// Returns `None` when the filename has no extension or when its basename holds no
/// upper-case letter, i.e. when the filename is left as it is.
pub fn recase_filename(filename: &str) -> Option<String> {
    let (basename, extension) = filename.rsplit_once('.')?;
    if !basename.chars().any(char::is_uppercase) {
        return None;
    }

    Some(format!(
        "{}.{}",
        capitalise(basename),
        extension.to_lowercase()
    ))
}

fn capitalise(value: &str) -> String {
    let lower = value.to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => lower,
    }
}
