/// An image reference taken apart at its last `/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImagePath<'a> {
    /// Directory-like part before the last `/`, if there is one.
    pub prefix: Option<&'a str>,
    /// Last path segment, extension included.
    pub filename: &'a str,
}

/// Split an image reference into its prefix and filename.
///
/// A reference without any `/` is treated as a bare filename.
pub fn split_image_path(image: &str) -> ImagePath<'_> {
    match image.rsplit_once('/') {
        Some((prefix, filename)) => ImagePath {
            prefix: Some(prefix),
            filename,
        },
        None => ImagePath {
            prefix: None,
            filename: image,
        },
    }
}

/// Rebuild a reference under the canonical public prefix.
///
/// Trailing slashes on the prefix are collapsed so the separator appears exactly once.
pub fn join_public_path(prefix: &str, filename: &str) -> String {
    format!("{}/{}", prefix.trim_end_matches('/'), filename)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_at_last_separator() {
        let path = split_image_path("/assets/cards/Dark Magician.png");
        assert_eq!(path.prefix, Some("/assets/cards"));
        assert_eq!(path.filename, "Dark Magician.png");
    }

    #[test]
    fn bare_filenames_have_no_prefix() {
        let path = split_image_path("card.png");
        assert_eq!(path.prefix, None);
        assert_eq!(path.filename, "card.png");
    }

    #[test]
    fn trailing_separator_yields_empty_filename() {
        let path = split_image_path("/assets/cards/");
        assert_eq!(path.prefix, Some("/assets/cards"));
        assert_eq!(path.filename, "");
    }

    #[test]
    fn joins_without_doubling_separators() {
        assert_eq!(join_public_path("/assets/cards", "A.png"), "/assets/cards/A.png");
        assert_eq!(join_public_path("/assets/cards/", "A.png"), "/assets/cards/A.png");
    }
}
