use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Extensions accepted by the upload dialog and the type sniffer.
pub const AUDIO_EXTENSIONS: [&str; 6] = ["mp3", "wav", "ogg", "flac", "m4a", "aac"];

/// Descriptor of the one optional ambient-audio file. At most one exists
/// at a time; replacing it tears down the previous pipeline first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioSource {
    pub file_name: String,
    pub path: PathBuf,
    pub size_bytes: u64,
}

impl AudioSource {
    /// Builds a descriptor for `path`, or `None` when the extension does
    /// not sniff as audio. Non-audio selections are dropped here without
    /// touching whatever is currently loaded.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();
        if !AUDIO_EXTENSIONS.contains(&ext.as_str()) {
            return None;
        }
        let file_name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        let size_bytes = fs::metadata(path).map(|m| m.len()).unwrap_or(0);
        Some(AudioSource {
            file_name,
            path: path.to_path_buf(),
            size_bytes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_audio_extensions() {
        let source = AudioSource::from_path(Path::new("/music/rain.mp3")).unwrap();
        assert_eq!(source.file_name, "rain.mp3");
        assert_eq!(source.path, PathBuf::from("/music/rain.mp3"));

        assert!(AudioSource::from_path(Path::new("/music/om.WAV")).is_some());
        assert!(AudioSource::from_path(Path::new("/music/bowl.flac")).is_some());
    }

    #[test]
    fn test_rejects_non_audio() {
        assert!(AudioSource::from_path(Path::new("/video/movie.mp4")).is_none());
        assert!(AudioSource::from_path(Path::new("/docs/notes.txt")).is_none());
        assert!(AudioSource::from_path(Path::new("/music/noext")).is_none());
    }
}
