use crate::util::legalize_filename;
use std::borrow::Cow;

/// Extension used when an enclosure URL has no path suffix.
pub const DEFAULT_FORMAT: Format = Format::from_exact_extension(".mp3");

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Format<'a> {
    format_ext: Cow<'a, str>,
}

impl<'a> Format<'a> {
    pub fn new(name_or_ext: impl AsRef<str>) -> Self {
        let mut format = name_or_ext.as_ref().to_owned();
        if !format.starts_with('.') {
            format.insert(0, '.');
        }

        Self {
            format_ext: Cow::Owned(format),
        }
    }

    /// Construct format with EXACT format extension on comptime.
    pub const fn from_exact_extension(ext: &'a str) -> Self {
        Self {
            format_ext: Cow::Borrowed(ext),
        }
    }

    /// Format named by the suffix of the URL's last path segment, or [`DEFAULT_FORMAT`].
    ///
    /// Query strings and fragments are ignored. Unsafe filename characters in the
    /// suffix are replaced the same way as in titles.
    pub fn from_url(url: impl AsRef<str>) -> Format<'static> {
        let url = url.as_ref();
        let path = match url::Url::parse(url) {
            Ok(parsed) => parsed.path().to_owned(),
            Err(_) => url
                .split(|c: char| c == '?' || c == '#')
                .next()
                .unwrap_or_default()
                .to_owned(),
        };
        let segment = path.rsplit('/').next().unwrap_or_default();
        match segment.rfind('.') {
            // A leading dot names a hidden file, not an extension.
            Some(i) if i > 0 && i + 1 < segment.len() => Format::new(legalize_filename(&segment[i..])),
            _ => DEFAULT_FORMAT,
        }
    }

    pub fn get_extension(&self) -> &str {
        &self.format_ext
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_adds_leading_dot() {
        assert_eq!(Format::new("ogg").get_extension(), ".ogg");
        assert_eq!(Format::new(".m4a").get_extension(), ".m4a");
    }

    #[test]
    fn extension_from_url_path() {
        let format = Format::from_url("https://cdn.example.com/shows/episode.ogg");
        assert_eq!(format.get_extension(), ".ogg");
    }

    #[test]
    fn missing_suffix_defaults_to_mp3() {
        let format = Format::from_url("https://cdn.example.com/shows/episode123");
        assert_eq!(format, DEFAULT_FORMAT);
        assert_eq!(format.get_extension(), ".mp3");
    }

    #[test]
    fn query_and_host_are_ignored() {
        assert_eq!(
            Format::from_url("https://cdn.example.com/a/ep.m4a?token=x.y").get_extension(),
            ".m4a"
        );
        assert_eq!(
            Format::from_url("https://media.example.com/").get_extension(),
            ".mp3"
        );
        assert_eq!(
            Format::from_url("https://cdn.example.com/dir.v2/episode").get_extension(),
            ".mp3"
        );
    }

    #[test]
    fn hidden_or_trailing_dot_is_not_an_extension() {
        assert_eq!(Format::from_url("https://x.org/.hidden").get_extension(), ".mp3");
        assert_eq!(Format::from_url("https://x.org/episode.").get_extension(), ".mp3");
    }

    #[test]
    fn unsafe_chars_in_suffix_are_replaced() {
        assert_eq!(Format::from_url("https://x.org/ep.a:b").get_extension(), ".a_b");
        assert_eq!(Format::from_url("https://x.org/ep.m*a").get_extension(), ".m_a");
    }

    #[test]
    fn unparsable_url_still_uses_path_suffix() {
        assert_eq!(Format::from_url("/local/file.mp3?x=1").get_extension(), ".mp3");
        assert_eq!(Format::from_url("relative/ep.opus").get_extension(), ".opus");
    }
}
