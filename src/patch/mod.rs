//! Offset-safe patch engine.
//!
//! Writes accepted corrections back to disk. Corrections are snapshotted into
//! a max-heap keyed by absolute file offset and drained highest first, so the
//! edits inside any one file run back to front and a replacement of a
//! different length never shifts a byte range still waiting in the queue.
//!
//! Every edit re-reads its file and checks that the bytes at the recorded
//! range still spell the misspelled word. If they don't (the file changed,
//! or an earlier correction overlapped this one) the edit is reported as a
//! [`Progress::Mismatch`] and skipped; nothing is written.

use crate::model::{Action, Misspelling, PatchError};
use crossbeam::channel::{self, Receiver};
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::thread;
use tracing::{debug, error, info, warn};

/// One correction, detached from the session list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    /// File to patch.
    pub path: PathBuf,
    /// Absolute byte offset of the word.
    pub begin: usize,
    /// The word expected at `begin`.
    pub word: String,
    /// Decision taken for the word.
    pub action: Action,
}

impl From<&Misspelling> for Edit {
    fn from(m: &Misspelling) -> Self {
        Self {
            path: m.text.position.filename.clone(),
            begin: m.absolute_offset(),
            word: m.word.clone(),
            action: m.action.clone(),
        }
    }
}

/// What happened to one processed edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Progress {
    /// The word was found and replaced.
    Replaced {
        /// Patched file.
        path: PathBuf,
        /// Absolute byte offset of the edit.
        offset: usize,
        /// Word that was removed.
        word: String,
        /// Text written in its place.
        replacement: String,
    },
    /// The file no longer holds the word at the recorded range.
    Mismatch {
        /// File that was checked.
        path: PathBuf,
        /// Absolute byte offset of the edit.
        offset: usize,
        /// The misspelled word.
        expected: String,
        /// What the file holds there instead (lossy UTF-8, truncated at EOF).
        found: String,
    },
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Progress::Replaced {
                path,
                offset,
                word,
                replacement,
            } => write!(
                f,
                "{}@{}: {} -> {}",
                path.display(),
                offset,
                word,
                replacement
            ),
            Progress::Mismatch {
                path,
                offset,
                expected,
                found,
            } => write!(
                f,
                "{}@{}: ({} != {})",
                path.display(),
                offset,
                found,
                expected
            ),
        }
    }
}

/// Counts for one apply run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ApplySummary {
    /// Edits written to disk.
    pub replaced: usize,
    /// Edits whose word was not found.
    pub mismatched: usize,
    /// Items without a `Replace` decision.
    pub skipped: usize,
    /// Items left in the queue after an I/O failure.
    pub unprocessed: usize,
}

#[derive(Debug)]
struct Queued {
    seq: usize,
    edit: Edit,
}

impl Ord for Queued {
    // Highest offset first; among equal offsets, first queued first.
    fn cmp(&self, other: &Self) -> Ordering {
        self.edit
            .begin
            .cmp(&other.edit.begin)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Queued {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Queued {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Queued {}

/// Drains queued edits highest offset first, yielding one result per
/// processed `Replace` edit.
///
/// The iterator fuses after the first [`PatchError`]: the remaining items
/// are dropped unapplied and [`ApplySummary::unprocessed`] counts them.
#[derive(Debug)]
pub struct PatchQueue {
    heap: BinaryHeap<Queued>,
    summary: ApplySummary,
    failed: bool,
}

impl PatchQueue {
    /// Snapshot `edits` into a new queue.
    pub fn new(edits: impl IntoIterator<Item = Edit>) -> Self {
        let heap = edits
            .into_iter()
            .enumerate()
            .map(|(seq, edit)| Queued { seq, edit })
            .collect();
        Self {
            heap,
            summary: ApplySummary::default(),
            failed: false,
        }
    }

    /// Snapshot the current decisions of `misspellings`.
    pub fn from_misspellings<'a>(misspellings: impl IntoIterator<Item = &'a Misspelling>) -> Self {
        Self::new(misspellings.into_iter().map(Edit::from))
    }

    /// Items still waiting.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// True when nothing is left to process.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Counts so far.
    pub fn summary(&self) -> ApplySummary {
        self.summary
    }

    /// Drain the whole queue, stopping at the first I/O failure.
    pub fn run(mut self) -> Result<ApplySummary, PatchError> {
        for progress in self.by_ref() {
            progress?;
        }
        Ok(self.summary)
    }
}

impl Iterator for PatchQueue {
    type Item = Result<Progress, PatchError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        loop {
            let Queued { edit, .. } = self.heap.pop()?;
            let Action::Replace { replacement } = &edit.action else {
                self.summary.skipped += 1;
                continue;
            };
            return match splice_file(&edit.path, edit.begin, &edit.word, replacement) {
                Ok(progress) => {
                    match progress {
                        Progress::Replaced { .. } => self.summary.replaced += 1,
                        Progress::Mismatch { .. } => self.summary.mismatched += 1,
                    }
                    Some(Ok(progress))
                }
                Err(err) => {
                    error!(path = %err.path().display(), error = %err, "Apply aborted");
                    self.failed = true;
                    self.summary.unprocessed = self.heap.len();
                    self.heap.clear();
                    Some(Err(err))
                }
            };
        }
    }
}

/// Replace `word` at `begin` in the file at `path`, if it is still there.
fn splice_file(
    path: &Path,
    begin: usize,
    word: &str,
    replacement: &str,
) -> Result<Progress, PatchError> {
    let mut bytes = std::fs::read(path).map_err(|source| PatchError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let end = begin.saturating_add(word.len());
    if bytes.get(begin..end) != Some(word.as_bytes()) {
        let found = bytes
            .get(begin..end)
            .or_else(|| bytes.get(begin..))
            .map(|b| String::from_utf8_lossy(b).into_owned())
            .unwrap_or_default();
        warn!(path = %path.display(), offset = begin, expected = word, found = %found, "Word not found at recorded offset");
        return Ok(Progress::Mismatch {
            path: path.to_path_buf(),
            offset: begin,
            expected: word.to_string(),
            found,
        });
    }

    bytes.splice(begin..end, replacement.bytes());
    std::fs::write(path, &bytes).map_err(|source| PatchError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), offset = begin, word, replacement, "Replaced word");
    Ok(Progress::Replaced {
        path: path.to_path_buf(),
        offset: begin,
        word: word.to_string(),
        replacement: replacement.to_string(),
    })
}

/// Messages from a background apply run.
#[derive(Debug)]
pub enum ApplyEvent {
    /// One edit was processed.
    Progress(Progress),
    /// I/O failure; nothing else will be applied.
    Failed(PatchError),
    /// The run ended. Always the last message.
    Done(ApplySummary),
}

/// Drain `queue` on a worker thread, streaming events over a channel.
///
/// The channel closes after [`ApplyEvent::Done`]. If the receiver goes away
/// the worker stops before the next edit.
pub fn spawn_apply(mut queue: PatchQueue) -> std::io::Result<Receiver<ApplyEvent>> {
    let (tx, rx) = channel::unbounded();
    thread::Builder::new()
        .name("typofix-apply".into())
        .spawn(move || {
            debug!(items = queue.len(), "Apply started");
            while let Some(result) = queue.next() {
                let event = match result {
                    Ok(progress) => ApplyEvent::Progress(progress),
                    Err(err) => ApplyEvent::Failed(err),
                };
                if tx.send(event).is_err() {
                    return;
                }
            }
            let summary = queue.summary();
            info!(
                replaced = summary.replaced,
                mismatched = summary.mismatched,
                skipped = summary.skipped,
                unprocessed = summary.unprocessed,
                "Apply finished"
            );
            let _ = tx.send(ApplyEvent::Done(summary));
        })?;
    Ok(rx)
}
