//! Async file pickers for ingestion
//!
//! Each picker runs inside a `Task::perform` future: the dialog and the
//! file read happen off the update loop, and the raw bytes come back in a
//! message. Decoding stays in the update loop so failures can surface in
//! the status line without touching prior state.

use std::path::PathBuf;

/// Pick a Standard MIDI File and read its bytes.
///
/// `None` when the user cancels the dialog or the file cannot be read.
pub async fn pick_midi() -> Option<(PathBuf, Vec<u8>)> {
    let file = rfd::AsyncFileDialog::new()
        .add_filter("MIDI files", &["mid", "midi", "MID"])
        .pick_file()
        .await?;

    let path = file.path().to_path_buf();
    let data = file.read().await;
    log::info!("pick_midi: read {} bytes from {:?}", data.len(), path);
    Some((path, data))
}

/// Pick an alignment text file (CSV or whitespace-delimited).
pub async fn pick_alignment() -> Option<(PathBuf, String)> {
    let file = rfd::AsyncFileDialog::new()
        .add_filter("Alignment files", &["csv", "txt", "tsv"])
        .add_filter("All files", &["*"])
        .pick_file()
        .await?;

    let path = file.path().to_path_buf();
    let bytes = file.read().await;
    let text = String::from_utf8_lossy(&bytes).into_owned();
    log::info!("pick_alignment: read {} bytes from {:?}", bytes.len(), path);
    Some((path, text))
}

/// Short display name for a loaded file (file name without directories).
pub fn display_name(path: &std::path::Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name() {
        assert_eq!(display_name(std::path::Path::new("/a/b/score.mid")), "score.mid");
        assert_eq!(display_name(std::path::Path::new("perf.mid")), "perf.mid");
    }
}
