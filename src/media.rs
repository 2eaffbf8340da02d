use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
    Audio,
    Link,
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MediaKind::Image => "image",
            MediaKind::Video => "video",
            MediaKind::Audio => "audio",
            MediaKind::Link => "link",
        };
        f.write_str(label)
    }
}

/// A media path referenced by slide content, as written in the lesson.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MediaRef<'a> {
    pub kind: MediaKind,
    pub path: &'a str,
}

impl<'a> MediaRef<'a> {
    pub fn new(kind: MediaKind, path: &'a str) -> Self {
        Self { kind, path }
    }
}

/// Something the host can hand to its image, video or audio element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaResource {
    pub kind: MediaKind,
    pub location: String,
}

/// Turns a lesson media path into a renderable resource. Fetching and caching
/// belong to the host.
pub trait MediaResolver {
    fn resolve(&self, media: MediaRef<'_>) -> MediaResource;
}

/// Resolves relative paths against a base directory or URL. Absolute URLs
/// are passed through untouched.
#[derive(Debug, Clone, Default)]
pub struct PrefixResolver {
    base: String,
}

impl PrefixResolver {
    pub fn new(base: &str) -> Self {
        Self {
            base: base.trim_end_matches('/').to_string(),
        }
    }
}

impl MediaResolver for PrefixResolver {
    fn resolve(&self, media: MediaRef<'_>) -> MediaResource {
        let location = if media.path.contains("://") || self.base.is_empty() {
            media.path.to_string()
        } else {
            format!("{}/{}", self.base, media.path.trim_start_matches('/'))
        };

        MediaResource {
            kind: media.kind,
            location,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_paths_are_joined_to_the_base() {
        let resolver = PrefixResolver::new("https://cdn.example.org/lesson/");
        let resource = resolver.resolve(MediaRef::new(MediaKind::Audio, "/media/part1.mp3"));
        assert_eq!(resource.location, "https://cdn.example.org/lesson/media/part1.mp3");
        assert_eq!(resource.kind, MediaKind::Audio);
    }

    #[test]
    fn absolute_urls_pass_through() {
        let resolver = PrefixResolver::new("public");
        let resource = resolver.resolve(MediaRef::new(MediaKind::Link, "https://example.org/game"));
        assert_eq!(resource.location, "https://example.org/game");
    }

    #[test]
    fn empty_base_keeps_the_path() {
        let resolver = PrefixResolver::default();
        let resource = resolver.resolve(MediaRef::new(MediaKind::Image, "/media/cover.jpg"));
        assert_eq!(resource.location, "/media/cover.jpg");
    }
}
