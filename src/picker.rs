// Audio file picker
//
// Terminal stand-in for a file input: scans one directory for .mp3/.wav
// files and tracks a selectable cursor over them. The extension filter is a
// UI convenience only - a corrupt or mislabeled file is caught by the
// Analysis Service, not here.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Extensions the picker accepts, matched case-insensitively
const AUDIO_EXTENSIONS: &[&str] = &["mp3", "wav"];

/// One pickable audio file
#[derive(Debug, Clone)]
pub struct AudioFile {
    pub name: String,
    pub size_bytes: u64,
    pub path: PathBuf,
}

/// Selectable list of audio files in one directory
pub struct FilePicker {
    pub dir: PathBuf,
    pub files: Vec<AudioFile>,
    pub cursor: usize,
}

impl FilePicker {
    /// Scan `dir` for audio files, sorted by name
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        let files = scan_audio_files(&dir)?;
        Ok(Self {
            dir,
            files,
            cursor: 0,
        })
    }

    /// Re-scan the directory, keeping the cursor in bounds
    pub fn rescan(&mut self) -> Result<()> {
        self.files = scan_audio_files(&self.dir)?;
        if self.cursor >= self.files.len() {
            self.cursor = self.files.len().saturating_sub(1);
        }
        Ok(())
    }

    pub fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        if self.cursor + 1 < self.files.len() {
            self.cursor += 1;
        }
    }

    /// The file under the cursor, if any
    pub fn current(&self) -> Option<&AudioFile> {
        self.files.get(self.cursor)
    }
}

fn is_audio_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| {
            let e = e.to_ascii_lowercase();
            AUDIO_EXTENSIONS.contains(&e.as_str())
        })
        .unwrap_or(false)
}

fn scan_audio_files(dir: &Path) -> Result<Vec<AudioFile>> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read audio directory {}", dir.display()))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.context("Failed to read directory entry")?;
        let path = entry.path();
        if !path.is_file() || !is_audio_file(&path) {
            continue;
        }
        let metadata = entry
            .metadata()
            .with_context(|| format!("Failed to stat {}", path.display()))?;
        let name = entry.file_name().to_string_lossy().to_string();
        files.push(AudioFile {
            name,
            size_bytes: metadata.len(),
            path,
        });
    }

    files.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filters_by_extension_case_insensitively() {
        assert!(is_audio_file(Path::new("song.mp3")));
        assert!(is_audio_file(Path::new("Take2.WAV")));
        assert!(!is_audio_file(Path::new("notes.txt")));
        assert!(!is_audio_file(Path::new("noext")));
        assert!(!is_audio_file(Path::new("archive.mp3.gz")));
    }

    #[test]
    fn scan_picks_up_only_audio_files() {
        let dir = std::env::temp_dir().join(format!("soundsense-picker-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("b.wav"), [0u8; 16]).unwrap();
        std::fs::write(dir.join("a.mp3"), [0u8; 8]).unwrap();
        std::fs::write(dir.join("readme.md"), "x").unwrap();

        let picker = FilePicker::new(&dir).unwrap();
        let names: Vec<&str> = picker.files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["a.mp3", "b.wav"]);
        assert_eq!(picker.files[0].size_bytes, 8);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn cursor_stays_in_bounds() {
        let dir = std::env::temp_dir().join(format!("soundsense-cursor-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("a.mp3"), [0u8; 4]).unwrap();
        std::fs::write(dir.join("b.mp3"), [0u8; 4]).unwrap();

        let mut picker = FilePicker::new(&dir).unwrap();
        picker.move_up();
        assert_eq!(picker.cursor, 0);
        picker.move_down();
        assert_eq!(picker.cursor, 1);
        picker.move_down();
        assert_eq!(picker.cursor, 1);

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
