//! Append-only record of what a run created, one JSON object per line.
//!
//! Replaying it lets an interrupted migration continue without duplicating discussions or
//! comments that already exist upstream.

use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use tracing::{info, warn};

use crate::error::MigrationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Discussion,
    Comment,
    /// The comment was marked as the accepted answer of its discussion.
    Answer,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntry {
    pub kind: EntryKind,
    /// Source post id.
    pub post_id: i64,
    /// GitHub node id of the created discussion or comment.
    pub id: String,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug)]
pub struct Journal {
    file: File,
}

impl Journal {
    /// Opens (creating if needed) the journal at `path` and returns the entries already in it.
    ///
    /// An unfinished last line left by an interrupted write is dropped and cut from the file, so
    /// new entries start on a fresh line.
    pub fn open(path: &Path) -> Result<(Self, Vec<JournalEntry>), MigrationError> {
        let (entries, existing) = if path.is_file() {
            let raw = std::fs::read_to_string(path)?;
            let replay = read_entries(&raw)?;
            (replay.entries, Some((raw, replay.complete_len)))
        } else {
            (Vec::new(), None)
        };

        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        if let Some((raw, complete_len)) = existing {
            if complete_len < raw.len() {
                file.set_len(complete_len as u64)?;
            }
            if complete_len > 0 && !raw[..complete_len].ends_with('\n') {
                file.write_all(b"\n")?;
            }
        }

        info!(
            path = %path.display(),
            replayed = entries.len(),
            "Opened migration journal"
        );

        Ok((Self { file }, entries))
    }

    /// Writes one entry and flushes it to disk before returning.
    pub fn append(&mut self, entry: &JournalEntry) -> Result<(), MigrationError> {
        let mut line = serde_json::to_vec(entry).map_err(std::io::Error::from)?;
        line.push(b'\n');
        self.file.write_all(&line)?;
        self.file.sync_data()?;
        Ok(())
    }
}

struct Replay {
    entries: Vec<JournalEntry>,
    /// Byte length of the prefix holding only whole entries.
    complete_len: usize,
}

fn read_entries(raw: &str) -> Result<Replay, MigrationError> {
    let (body, tail) = match raw.rfind('\n') {
        Some(pos) => raw.split_at(pos + 1),
        None => ("", raw),
    };

    let mut entries = body
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| {
            serde_json::from_str(line).map_err(|source| MigrationError::JournalParse {
                line: idx + 1,
                source,
            })
        })
        .collect::<Result<Vec<JournalEntry>, _>>()?;

    if tail.trim().is_empty() {
        return Ok(Replay {
            entries,
            complete_len: raw.len(),
        });
    }

    // No trailing newline: the last write may have been cut short.
    match serde_json::from_str(tail) {
        Ok(entry) => {
            entries.push(entry);
            Ok(Replay {
                entries,
                complete_len: raw.len(),
            })
        }
        Err(error) => {
            warn!(
                line = body.lines().count() + 1,
                %error,
                "Dropping unfinished journal entry"
            );
            Ok(Replay {
                entries,
                complete_len: body.len(),
            })
        }
    }
}
