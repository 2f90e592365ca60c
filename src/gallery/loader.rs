//! Image loading and caching for the viewer.

use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};

use image::DynamicImage;

const CACHE_CAPACITY: usize = 20;

/// Small MRU cache of decoded images, keyed by resolved path.
#[derive(Debug, Default)]
struct ImageCache {
    entries: HashMap<PathBuf, DynamicImage>,
    order: VecDeque<PathBuf>,
    max_size: usize,
}

impl ImageCache {
    fn new(max_size: usize) -> Self {
        Self {
            max_size,
            ..Self::default()
        }
    }

    fn get(&self, path: &Path) -> Option<&DynamicImage> {
        self.entries.get(path)
    }

    fn insert(&mut self, path: PathBuf, image: DynamicImage) {
        if self.entries.insert(path.clone(), image).is_some() {
            return;
        }
        self.order.push_back(path);
        while self.entries.len() > self.max_size {
            let Some(oldest) = self.order.pop_front() else {
                break;
            };
            self.entries.remove(&oldest);
        }
    }

    fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }
}

/// Loads viewer images from the local filesystem with caching.
///
/// Only local sources are loaded: plain paths and `file://` URLs.
/// Remote (`http`, `https`) and inline (`data:`) sources resolve to
/// `None` and the viewer falls back to its textual placeholder.
#[derive(Debug)]
pub struct ImageLoader {
    cache: ImageCache,
    base_path: PathBuf,
}

impl ImageLoader {
    /// Create a loader resolving relative sources against `base_path`.
    pub fn new(base_path: PathBuf) -> Self {
        Self {
            cache: ImageCache::new(CACHE_CAPACITY),
            base_path,
        }
    }

    /// Load and decode `src`, using the cache when possible.
    pub fn load(&mut self, src: &str) -> Option<DynamicImage> {
        let full_path = self.resolve(src)?;
        if let Some(img) = self.cache.get(&full_path) {
            return Some(img.clone());
        }
        let img = image::open(&full_path).ok()?;
        self.cache.insert(full_path, img.clone());
        Some(img)
    }

    /// Map `src` to a local path, or `None` for non-local sources.
    fn resolve(&self, src: &str) -> Option<PathBuf> {
        if src.starts_with("http://") || src.starts_with("https://") || src.starts_with("data:") {
            return None;
        }
        let src = src.strip_prefix("file://").unwrap_or(src);
        let path = Path::new(src);
        if path.is_absolute() {
            Some(path.to_path_buf())
        } else {
            Some(self.base_path.join(path))
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loader() -> ImageLoader {
        ImageLoader::new(PathBuf::from("/base"))
    }

    #[test]
    fn test_resolve_absolute() {
        assert_eq!(
            loader().resolve("/pics/a.png"),
            Some(PathBuf::from("/pics/a.png"))
        );
    }

    #[test]
    fn test_resolve_relative_joins_base() {
        assert_eq!(
            loader().resolve("pics/a.png"),
            Some(PathBuf::from("/base/pics/a.png"))
        );
    }

    #[test]
    fn test_resolve_file_url() {
        assert_eq!(
            loader().resolve("file:///pics/a.png"),
            Some(PathBuf::from("/pics/a.png"))
        );
    }

    #[test]
    fn test_remote_and_inline_sources_are_skipped() {
        let loader = loader();
        assert_eq!(loader.resolve("https://example.com/a.png"), None);
        assert_eq!(loader.resolve("http://example.com/a.png"), None);
        assert_eq!(loader.resolve("data:image/png;base64,AAAA"), None);
    }

    #[test]
    fn test_cache_evicts_oldest() {
        let mut cache = ImageCache::new(2);
        let img = DynamicImage::new_rgb8(1, 1);
        cache.insert(PathBuf::from("a"), img.clone());
        cache.insert(PathBuf::from("b"), img.clone());
        cache.insert(PathBuf::from("c"), img);
        assert!(cache.get(Path::new("a")).is_none());
        assert!(cache.get(Path::new("b")).is_some());
        assert!(cache.get(Path::new("c")).is_some());
    }
}
