//! The image catalog offered by the picker.
//!
//! By default the catalog is the built-in sample set; pointing the
//! application at a directory scans it for raster images instead.

use std::path::Path;

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::grid::ImageRef;

/// The built-in sample catalog.
const SAMPLE_IMAGES: [&str; 6] = [
    "img1.jpg",
    "img2.jpg",
    "img3.jpg",
    "img4.jpg",
    "img5.jpg",
    "img6.jpg",
];

/// File extensions recognized as images, lowercase.
const IMAGE_EXTENSIONS: [&str; 6] = ["jpg", "jpeg", "png", "gif", "webp", "bmp"];

/// The set of images the picker can assign to cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageLibrary {
    images: Vec<ImageRef>,
}

impl ImageLibrary {
    /// The built-in sample catalog.
    pub fn sample() -> Self {
        Self {
            images: SAMPLE_IMAGES.iter().map(|s| ImageRef::new(*s)).collect(),
        }
    }

    /// Scan a directory (recursively) for image files.
    ///
    /// Unreadable entries are skipped with a warning. Results are sorted
    /// by path so the catalog order is deterministic.
    pub fn scan(dir: &Path) -> Self {
        let mut images = Vec::new();
        for entry in WalkDir::new(dir).follow_links(true) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!(error = %e, "Skipping unreadable entry during image scan");
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            let is_image = path
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
                .unwrap_or(false);
            if is_image {
                images.push(ImageRef::new(path.display().to_string()));
            }
        }
        images.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        debug!(dir = %dir.display(), count = images.len(), "Scanned image directory");
        Self { images }
    }

    /// Scan a directory, falling back to the sample catalog when the scan
    /// finds nothing.
    pub fn scan_or_sample(dir: &Path) -> Self {
        let scanned = Self::scan(dir);
        if scanned.is_empty() {
            warn!(dir = %dir.display(), "No images found, using sample catalog");
            Self::sample()
        } else {
            scanned
        }
    }

    /// The catalog entries.
    pub fn images(&self) -> &[ImageRef] {
        &self.images
    }

    /// A cloned catalog for handing to the picker.
    pub fn catalog(&self) -> Vec<ImageRef> {
        self.images.clone()
    }

    /// The number of entries.
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

impl Default for ImageLibrary {
    fn default() -> Self {
        Self::sample()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_sample_catalog() {
        let library = ImageLibrary::sample();
        assert_eq!(library.len(), 6);
        assert_eq!(library.images()[0], ImageRef::new("img1.jpg"));
    }

    #[test]
    fn test_scan_picks_up_only_images() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.png"), b"x").unwrap();
        fs::write(dir.path().join("a.jpg"), b"x").unwrap();
        fs::write(dir.path().join("notes.txt"), b"x").unwrap();
        fs::write(dir.path().join("noext"), b"x").unwrap();

        let library = ImageLibrary::scan(dir.path());
        let names: Vec<&str> = library.images().iter().map(|i| i.display_name()).collect();
        assert_eq!(names, vec!["a.jpg", "b.png"]);
    }

    #[test]
    fn test_scan_recurses_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub").join("deep.webp"), b"x").unwrap();
        fs::write(dir.path().join("top.JPG"), b"x").unwrap();

        let library = ImageLibrary::scan(dir.path());
        assert_eq!(library.len(), 2);
    }

    #[test]
    fn test_scan_or_sample_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let library = ImageLibrary::scan_or_sample(dir.path());
        assert_eq!(library, ImageLibrary::sample());
    }

    #[test]
    fn test_scan_or_sample_prefers_scan() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("real.png"), b"x").unwrap();

        let library = ImageLibrary::scan_or_sample(dir.path());
        assert_eq!(library.len(), 1);
    }
}
