//! Temporary file management.
//!
//! The audio pass writes to a fixed file name beside the output. The guard
//! here wraps a `tempfile::TempPath` for that name, so the file is deleted
//! when the guard goes out of scope whether the encode succeeds or fails.

use std::io;
use std::path::Path;

use tempfile::TempPath;

use crate::error::CoreResult;

/// A temporary file removed on drop. The file itself is created by ffmpeg.
#[derive(Debug)]
pub struct TempAudioFile {
    path: TempPath,
}

impl TempAudioFile {
    /// Takes ownership of `path`. Nothing is created on disk.
    ///
    /// Relative paths are resolved against the current directory so a later
    /// directory change cannot redirect the cleanup.
    pub fn new(path: &Path) -> CoreResult<Self> {
        let path = TempPath::try_from_path(path)?;
        Ok(Self { path })
    }

    /// Places the temporary file `file_name` in the directory of `output`.
    pub fn beside(output: &Path, file_name: &str) -> CoreResult<Self> {
        let dir = output
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        Self::new(&dir.join(file_name))
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Deletes the file now and reports the outcome. A file that was never
    /// written is not an error.
    pub fn close(self) {
        let display = self.path.display().to_string();
        match self.path.close() {
            Ok(()) => log::debug!("Removed temporary file {display}"),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => log::warn!("Failed to remove temporary file {display}: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn file_is_removed_on_drop() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("temp-audio.m4a");
        {
            let guard = TempAudioFile::new(&path).unwrap();
            fs::write(guard.path(), b"audio").unwrap();
            assert!(path.exists());
        }
        assert!(!path.exists());
    }

    #[test]
    fn close_removes_file() {
        let dir = tempfile::tempdir().unwrap();
        let guard = TempAudioFile::beside(&dir.path().join("out.mov"), "temp-audio.m4a").unwrap();
        fs::write(guard.path(), b"audio").unwrap();
        guard.close();
        assert!(!dir.path().join("temp-audio.m4a").exists());
    }

    #[test]
    fn missing_file_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        TempAudioFile::new(&dir.path().join("never-created.m4a"))
            .unwrap()
            .close();
        drop(TempAudioFile::new(&dir.path().join("also-missing.m4a")).unwrap());
    }

    #[test]
    fn beside_uses_output_directory() {
        let guard =
            TempAudioFile::beside(Path::new("/videos/out_9x16_crop.mov"), "temp-audio.m4a").unwrap();
        assert_eq!(guard.path(), Path::new("/videos/temp-audio.m4a"));

        let guard = TempAudioFile::beside(Path::new("out.mov"), "temp-audio.m4a").unwrap();
        assert!(guard.path().is_absolute());
        assert!(guard.path().ends_with("temp-audio.m4a"));
        assert_eq!(
            guard.path().parent(),
            Some(std::env::current_dir().unwrap().as_path())
        );
    }
}
