//! Persisted collection of matches, keyed by match id.
//!
//! The collection is kept as one pretty-printed JSON array. File-backed
//! stores write through on every change; in-memory stores never touch disk.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::Context;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::core::{InningsRecord, Match, MatchStatus, MatchType, ScoreError};

/// One entry in the store: headline fields for listing plus the full match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredMatch {
    pub id: String,
    pub timestamp: i64,
    pub match_type: MatchType,
    pub team1_name: String,
    pub team2_name: String,
    pub overs: u32,
    pub current_inning: u8,
    pub status: MatchStatus,
    #[serde(default)]
    pub innings: InningsRecord,
    pub match_data: Match,
}

impl From<&Match> for StoredMatch {
    fn from(m: &Match) -> Self {
        Self {
            id: m.id.clone(),
            timestamp: m.timestamp,
            match_type: m.match_type,
            team1_name: m.team1.name.clone(),
            team2_name: m.team2.name.clone(),
            overs: m.overs,
            current_inning: m.current_inning,
            status: m.status,
            innings: m.innings.clone(),
            match_data: m.clone(),
        }
    }
}

/// Parse an exported collection. Anything but a JSON array of match records
/// is rejected.
pub fn parse_import(json: &str) -> Result<Vec<StoredMatch>, ScoreError> {
    let value: serde_json::Value =
        serde_json::from_str(json).map_err(|e| ScoreError::MalformedImport(e.to_string()))?;
    if !value.is_array() {
        return Err(ScoreError::MalformedImport("expected a JSON array of matches".into()));
    }
    serde_json::from_value(value).map_err(|e| ScoreError::MalformedImport(e.to_string()))
}

#[derive(Debug, Default)]
pub struct MatchStore {
    path: Option<PathBuf>,
    matches: Vec<StoredMatch>,
}

impl MatchStore {
    /// Store that lives only in memory.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Open the store at `path`. A missing file is an empty store; an
    /// unreadable or corrupt one is logged and also treated as empty.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let matches: Vec<StoredMatch> = match fs::read_to_string(&path) {
            Ok(text) => serde_json::from_str(&text).unwrap_or_else(|e| {
                warn!("ignoring unreadable match store {}: {}", path.display(), e);
                Vec::new()
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => Vec::new(),
            Err(e) => {
                warn!("could not read match store {}: {}", path.display(), e);
                Vec::new()
            }
        };
        debug!("opened {} with {} matches", path.display(), matches.len());
        Self {
            path: Some(path),
            matches,
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn list(&self) -> &[StoredMatch] {
        &self.matches
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn load(&self, id: &str) -> Option<&StoredMatch> {
        self.matches.iter().find(|m| m.id == id)
    }

    /// Full match data for `id`.
    pub fn load_match(&self, id: &str) -> Option<Match> {
        self.load(id).map(|m| m.match_data.clone())
    }

    /// Insert or replace the record for `m`, returning its id.
    pub fn save(&mut self, m: &Match) -> anyhow::Result<String> {
        let record = StoredMatch::from(m);
        let mut matches = self.matches.clone();
        match matches.iter_mut().find(|s| s.id == record.id) {
            Some(slot) => *slot = record,
            None => matches.push(record),
        }
        self.commit(matches)?;
        Ok(m.id.clone())
    }

    /// Remove the match with `id`; `false` if there was none.
    pub fn delete(&mut self, id: &str) -> anyhow::Result<bool> {
        if self.load(id).is_none() {
            return Ok(false);
        }
        let matches = self.matches.iter().filter(|m| m.id != id).cloned().collect();
        self.commit(matches)?;
        Ok(true)
    }

    pub fn delete_all(&mut self) -> anyhow::Result<()> {
        self.commit(Vec::new())
    }

    /// Whole collection as pretty-printed JSON.
    pub fn export(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.matches)
    }

    /// Replace the whole collection with an exported one. On a malformed
    /// payload the store is left untouched.
    pub fn import(&mut self, json: &str) -> anyhow::Result<usize> {
        let matches = parse_import(json)?;
        let count = matches.len();
        self.commit(matches)?;
        Ok(count)
    }

    /// Write the collection to disk through a temporary file.
    pub fn flush(&self) -> anyhow::Result<()> {
        write_matches(self.path.as_deref(), &self.matches)
    }

    /// Persist `matches` and only then make them the current collection.
    fn commit(&mut self, matches: Vec<StoredMatch>) -> anyhow::Result<()> {
        write_matches(self.path.as_deref(), &matches)?;
        self.matches = matches;
        Ok(())
    }
}

fn write_matches(path: Option<&Path>, matches: &[StoredMatch]) -> anyhow::Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let text = serde_json::to_string_pretty(matches)?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, text).with_context(|| format!("writing {}", tmp.display()))?;
    fs::rename(&tmp, path).with_context(|| format!("replacing {}", path.display()))?;
    debug!("saved {} matches to {}", matches.len(), path.display());
    Ok(())
}
