// SPDX-License-Identifier: MPL-2.0
//! Gallery manifest: the list of videos to show, as TOML.
//!
//! ```toml
//! [[video]]
//! src = "https://example.org/ocean.mp4"
//! title = "Ocean"
//! aspect = "vertical"
//! class_names = "rounded-lg shadow"
//! loop = true
//! poster_index = 3
//! ```

use crate::error::{Error, Result};
use crate::surface::MediaSource;
use crate::thumbnail::{AspectVariant, ThumbnailProps};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct Manifest {
    #[serde(default, rename = "video")]
    pub videos: Vec<VideoEntry>,
}

/// One `[[video]]` entry.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct VideoEntry {
    pub src: String,
    pub title: String,
    #[serde(default)]
    pub aspect: AspectVariant,
    #[serde(default)]
    pub class_names: Option<String>,
    #[serde(default, rename = "loop")]
    pub loop_on_end: bool,
    #[serde(default)]
    pub poster_index: Option<u32>,
}

impl From<VideoEntry> for ThumbnailProps {
    fn from(entry: VideoEntry) -> Self {
        let mut props = ThumbnailProps::new(entry.src, entry.title)
            .with_aspect(entry.aspect)
            .with_loop(entry.loop_on_end);
        props.class_names = entry.class_names;
        props.poster_index = entry.poster_index;
        props
    }
}

impl Manifest {
    /// Parses a manifest. Entries with an empty `src` are rejected.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Manifest`] for invalid TOML or empty sources.
    pub fn parse(content: &str) -> Result<Self> {
        let manifest: Manifest =
            toml::from_str(content).map_err(|e| Error::Manifest(e.to_string()))?;

        if let Some(position) = manifest.videos.iter().position(|v| v.src.trim().is_empty()) {
            return Err(Error::Manifest(format!(
                "video #{} has an empty src",
                position + 1
            )));
        }

        Ok(manifest)
    }

    /// Reads and parses a manifest file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Thumbnails for sources given on the command line, titled by file name.
    #[must_use]
    pub fn from_sources(sources: &[String], aspect: AspectVariant, loop_on_end: bool) -> Self {
        let videos = sources
            .iter()
            .map(|src| {
                let source = MediaSource::new(src.as_str());
                VideoEntry {
                    title: source.file_name().unwrap_or(src.as_str()).to_string(),
                    src: src.clone(),
                    aspect,
                    class_names: None,
                    loop_on_end,
                    poster_index: None,
                }
            })
            .collect();
        Self { videos }
    }

    pub fn extend(&mut self, other: Manifest) {
        self.videos.extend(other.videos);
    }

    #[must_use]
    pub fn into_props(self) -> Vec<ThumbnailProps> {
        self.videos.into_iter().map(ThumbnailProps::from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const SAMPLE: &str = r#"
        [[video]]
        src = "https://example.org/ocean.mp4"
        title = "Ocean"
        aspect = "vertical"
        class_names = "rounded-lg shadow"
        loop = true
        poster_index = 3

        [[video]]
        src = "clips/forest.webm"
        title = "Forest"
    "#;

    #[test]
    fn parses_full_and_minimal_entries() {
        let manifest = Manifest::parse(SAMPLE).expect("sample should parse");
        assert_eq!(manifest.videos.len(), 2);

        let ocean = &manifest.videos[0];
        assert_eq!(ocean.aspect, AspectVariant::Vertical);
        assert!(ocean.loop_on_end);
        assert_eq!(ocean.poster_index, Some(3));

        let forest = &manifest.videos[1];
        assert_eq!(forest.aspect, AspectVariant::Video);
        assert!(!forest.loop_on_end);
        assert_eq!(forest.poster_index, None);
        assert_eq!(forest.class_names, None);
    }

    #[test]
    fn entries_become_props() {
        let props = Manifest::parse(SAMPLE).unwrap().into_props();
        assert_eq!(props[0].poster_path().as_deref(), Some("/thumbnails/3.jpg"));
        assert!(props[0].style_classes().shadow);
        assert_eq!(props[1].title, "Forest");
    }

    #[test]
    fn empty_manifest_is_valid() {
        assert!(Manifest::parse("").unwrap().videos.is_empty());
    }

    #[test]
    fn missing_title_is_manifest_error() {
        let result = Manifest::parse("[[video]]\nsrc = \"a.mp4\"\n");
        assert!(matches!(result, Err(Error::Manifest(_))));
    }

    #[test]
    fn empty_src_is_rejected() {
        let result = Manifest::parse("[[video]]\nsrc = \" \"\ntitle = \"Blank\"\n");
        match result {
            Err(Error::Manifest(message)) => assert!(message.contains("#1")),
            other => panic!("expected Manifest error, got {other:?}"),
        }
    }

    #[test]
    fn unknown_aspect_is_rejected() {
        let result =
            Manifest::parse("[[video]]\nsrc = \"a.mp4\"\ntitle = \"A\"\naspect = \"square\"\n");
        assert!(matches!(result, Err(Error::Manifest(_))));
    }

    #[test]
    fn sources_are_titled_by_file_name() {
        let manifest = Manifest::from_sources(
            &["/videos/a.mp4".to_string(), "https://x.org/b.webm?t=1".to_string()],
            AspectVariant::Vertical,
            true,
        );
        let titles: Vec<_> = manifest.videos.iter().map(|v| v.title.as_str()).collect();
        assert_eq!(titles, vec!["a.mp4", "b.webm"]);
        assert!(manifest.videos.iter().all(|v| v.loop_on_end));
    }

    #[test]
    fn load_reads_file() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let path = temp_dir.path().join("gallery.toml");
        fs::write(&path, SAMPLE).expect("write file");

        let manifest = Manifest::load(&path).expect("file should load");
        assert_eq!(manifest.videos.len(), 2);
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let result = Manifest::load(&temp_dir.path().join("missing.toml"));
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
