//! Recovering pre-edit file contents from a session transcript.
//!
//! The transcript is JSONL. Entries produced by file-editing tools carry a
//! `toolUseResult` with the edited path and the file content before and
//! after the edit; everything else is ignored.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

/// One line of the transcript. Only the fields needed to track edits.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptEntry {
    #[serde(default)]
    pub tool_use_result: Option<ToolUseResult>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolUseResult {
    #[serde(default)]
    pub file_path: Option<String>,
    /// Content before the edit. Absent for newly created files.
    #[serde(default)]
    pub original_file: Option<String>,
    /// Content after the edit.
    #[serde(default)]
    pub content: Option<String>,
}

impl TranscriptEntry {
    /// Path and pre-edit content if this entry records a file edit.
    ///
    /// A file created during the session has no pre-edit content; its
    /// original is the empty string.
    fn file_edit(self) -> Option<(String, String)> {
        let result = self.tool_use_result?;
        let path = result.file_path.filter(|p| !p.is_empty())?;
        if result.original_file.is_none() && result.content.is_none() {
            return None;
        }
        Some((path, result.original_file.unwrap_or_default()))
    }
}

/// Earliest known content of every file edited in the session, in order of
/// first appearance in the transcript.
#[derive(Debug, Default)]
pub struct FileOriginals {
    index: HashMap<String, usize>,
    originals: Vec<String>,
}

impl FileOriginals {
    /// Record `original` for `path` unless the path is already known.
    /// Returns whether it was recorded.
    pub fn insert_if_absent(&mut self, path: String, original: String) -> bool {
        if self.index.contains_key(&path) {
            return false;
        }
        self.index.insert(path, self.originals.len());
        self.originals.push(original);
        true
    }

    pub fn len(&self) -> usize {
        self.originals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.originals.is_empty()
    }

    /// Paths with their originals, in order of first appearance.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        let mut ordered: Vec<(&str, usize)> =
            self.index.iter().map(|(p, &i)| (p.as_str(), i)).collect();
        ordered.sort_unstable_by_key(|&(_, i)| i);
        ordered
            .into_iter()
            .map(move |(p, i)| (p, self.originals[i].as_str()))
    }
}

/// Parse one transcript line, or `None` if it is not valid JSON of the
/// expected shape.
pub fn parse_line(line: &str) -> Option<TranscriptEntry> {
    serde_json::from_str(line).ok()
}

/// Scan transcript text and collect the first-seen original of each edited
/// file. Malformed lines are skipped.
pub fn collect_originals(text: &str) -> FileOriginals {
    let mut originals = FileOriginals::default();
    let mut skipped = 0usize;

    for line in text.trim().lines().filter(|l| !l.trim().is_empty()) {
        let Some(entry) = parse_line(line) else {
            skipped += 1;
            continue;
        };
        if let Some((path, original)) = entry.file_edit() {
            originals.insert_if_absent(path, original);
        }
    }

    if skipped > 0 {
        tracing::debug!(skipped, "ignored malformed transcript lines");
    }
    originals
}

/// Read the transcript at `path` and collect file originals.
///
/// A missing transcript yields an empty map. Other read failures are
/// returned to the caller.
pub fn load_originals(path: &Path) -> std::io::Result<FileOriginals> {
    match std::fs::read(path) {
        Ok(bytes) => Ok(collect_originals(&String::from_utf8_lossy(&bytes))),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "transcript not found");
            Ok(FileOriginals::default())
        }
        Err(e) => Err(e),
    }
}
