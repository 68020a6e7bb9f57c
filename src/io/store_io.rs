use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer, Serialize};
use tempfile::NamedTempFile;

use crate::model::change::Change;
use crate::model::collection::Collection;

/// Error type for save-file I/O
#[derive(Debug, thiserror::Error)]
pub enum StoreIoError {
    #[error("could not read {path}: {source}")]
    ReadError { path: PathBuf, source: io::Error },
    #[error("could not write {path}: {source}")]
    WriteError { path: PathBuf, source: io::Error },
    #[error("could not serialize groups: {0}")]
    SerializeError(#[from] serde_json::Error),
}

/// What `load` found at the save path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// No file yet (first run)
    Missing,
    /// The file is not a JSON array of groups; nothing was loaded
    Malformed,
    /// The file holds `null`
    Empty,
    /// This many groups were appended
    Loaded(usize),
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// A group as written to the save file. Identity is not persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupRecord {
    #[serde(default, alias = "Name", deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, alias = "Tasks", deserialize_with = "null_as_default")]
    pub tasks: Vec<TaskRecord>,
}

/// A task as written to the save file. Neither identity nor the owning
/// group is persisted; ownership is implied by nesting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    #[serde(default, alias = "Text", deserialize_with = "null_as_default")]
    pub text: String,
    #[serde(rename = "isDone", alias = "IsDone", default)]
    pub is_done: bool,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ---------------------------------------------------------------------------
// Encode / decode
// ---------------------------------------------------------------------------

/// Flatten the collection's groups (placeholder skipped) into records, in
/// display order.
pub fn encode(coll: &Collection) -> Vec<GroupRecord> {
    coll.groups()
        .map(|group| GroupRecord {
            name: group.name().to_string(),
            tasks: coll
                .tasks_of(group.id())
                .map(|task| TaskRecord {
                    text: task.text().to_string(),
                    is_done: task.is_done(),
                })
                .collect(),
        })
        .collect()
}

/// Encode to a pretty-printed JSON document
pub fn to_json(coll: &Collection) -> Result<String, StoreIoError> {
    Ok(serde_json::to_string_pretty(&encode(coll))?)
}

/// Rebuild groups and tasks from records with fresh identities.
///
/// Groups go right after the placeholder, ahead of any groups already
/// present, in record order. Returns the number of groups added.
pub fn decode_into(coll: &mut Collection, records: Vec<GroupRecord>) -> usize {
    let count = records.len();
    for (offset, record) in records.into_iter().enumerate() {
        let (group, _) = coll.insert_group_quiet(1 + offset, record.name);
        for task in record.tasks {
            coll.push_task_quiet(group, task.text, task.is_done);
        }
    }
    coll.emit(Change::Loaded { groups: count });
    count
}

/// Parse a save document. `None` for a `null` document. A leading UTF-8
/// byte-order mark is skipped.
pub fn parse_records(json: &str) -> Result<Option<Vec<GroupRecord>>, serde_json::Error> {
    let json = json.strip_prefix('\u{feff}').unwrap_or(json);
    serde_json::from_str::<Option<Vec<GroupRecord>>>(json)
}

// ---------------------------------------------------------------------------
// File I/O
// ---------------------------------------------------------------------------

/// Load the save file at `path` into `coll`.
///
/// A missing, malformed or `null` file loads nothing and is not an error.
/// Any other failure to read the file is returned.
pub fn load(path: &Path, coll: &mut Collection) -> Result<LoadOutcome, StoreIoError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::debug!("no save file at {}", path.display());
            return Ok(LoadOutcome::Missing);
        }
        Err(e) if e.kind() == io::ErrorKind::InvalidData => {
            log::warn!("save file {} is not UTF-8, ignoring it", path.display());
            return Ok(LoadOutcome::Malformed);
        }
        Err(e) => {
            return Err(StoreIoError::ReadError {
                path: path.to_path_buf(),
                source: e,
            });
        }
    };

    match parse_records(&content) {
        Ok(Some(records)) => {
            let count = decode_into(coll, records);
            log::debug!("loaded {} groups from {}", count, path.display());
            Ok(LoadOutcome::Loaded(count))
        }
        Ok(None) => Ok(LoadOutcome::Empty),
        Err(e) => {
            log::warn!("could not parse {}, ignoring it: {}", path.display(), e);
            Ok(LoadOutcome::Malformed)
        }
    }
}

/// Write the collection to `path`, creating parent directories first.
pub fn save(path: &Path, coll: &Collection) -> Result<(), StoreIoError> {
    let json = to_json(coll)?;
    let write_error = |source| StoreIoError::WriteError {
        path: path.to_path_buf(),
        source,
    };
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(write_error)?;
    }
    atomic_write(path, json.as_bytes()).map_err(write_error)?;
    log::debug!("saved {} groups to {}", coll.group_count(), path.display());
    Ok(())
}

/// Write `content` to `path` atomically using a temp file + rename.
///
/// A symlinked save file is written through to its target, and an existing
/// file keeps its permissions.
fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let target = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    let dir = match target.parent() {
        Some(d) if !d.as_os_str().is_empty() => d,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    if let Ok(meta) = fs::metadata(&target) {
        tmp.as_file().set_permissions(meta.permissions())?;
    }
    tmp.persist(&target).map_err(|e| e.error)?;
    Ok(())
}
