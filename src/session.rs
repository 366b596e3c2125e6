/*!
 * Edit sessions and draft-edit persistence.
 *
 * One `EditSession` per loaded document, constructed explicitly by the
 * controller and dropped to dispose; sessions are never looked up from
 * shared global state. The `DraftStore` persists per-entry free-text
 * drafts keyed by a stable hash of the original file content, so an
 * interrupted editing session can be resumed against the same file later.
 * Entries are addressed by their stable position in the document.
 */

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{debug, info};
use sha2::{Digest, Sha256};

use crate::errors::ParseError;
use crate::file_utils::FileManager;
use crate::formats::{self, ParseOptions};
use crate::subtitle_document::SubtitleDocument;

/// Stable identity of a source text: SHA-256 over its bytes, hex encoded.
/// Re-computing the key for unchanged content always yields the same value.
pub fn content_key(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// An open editing session over one subtitle document
#[derive(Debug)]
pub struct EditSession {
    /// Where the document was loaded from
    pub source_path: PathBuf,

    /// The working document
    pub document: SubtitleDocument,

    /// Content key of the original text, for draft lookup
    pub content_key: String,
}

impl EditSession {
    /// Open a session from a file on disk. The format is detected from the
    /// extension (with a content sniff as fallback) and the file is parsed
    /// with the given options.
    pub fn open(path: &Path, options: &ParseOptions) -> Result<Self> {
        let content = FileManager::read_to_string(path)?;
        let format = FileManager::detect_format(path, &content)?;
        let session = Self::from_content(path.to_path_buf(), &content, format, options)
            .with_context(|| format!("Failed to parse subtitle file: {}", path.display()))?;
        info!(
            "Opened {} as {}: {}",
            path.display(),
            format,
            session.document
        );
        Ok(session)
    }

    /// Build a session from already-loaded content
    pub fn from_content(
        source_path: PathBuf,
        content: &str,
        format: formats::SubtitleFormat,
        options: &ParseOptions,
    ) -> Result<Self, ParseError> {
        let document = formats::parse(content, format, options)?;
        Ok(EditSession {
            source_path,
            document,
            content_key: content_key(content),
        })
    }
}

/// Draft edits for one document: entry position -> replacement text
pub type Drafts = BTreeMap<usize, String>;

/// File-backed store of draft edits, one JSON file per content key
#[derive(Debug)]
pub struct DraftStore {
    root: PathBuf,
}

impl DraftStore {
    /// Store under the user's local data directory
    pub fn open_default() -> Result<Self> {
        let root = dirs::data_local_dir()
            .context("Could not determine the local data directory")?
            .join("subwork")
            .join("drafts");
        Ok(DraftStore { root })
    }

    /// Store rooted at an explicit directory
    pub fn at(root: impl Into<PathBuf>) -> Self {
        DraftStore { root: root.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }

    /// Persist drafts for a content key, replacing any previous set
    pub fn save(&self, key: &str, drafts: &Drafts) -> Result<()> {
        FileManager::ensure_dir(&self.root)?;
        let path = self.path_for(key);
        let json = serde_json::to_string_pretty(drafts)?;
        fs::write(&path, json)
            .with_context(|| format!("Failed to write draft file: {}", path.display()))?;
        debug!("Saved {} draft(s) for {}", drafts.len(), key);
        Ok(())
    }

    /// Load drafts previously saved for a content key, if any
    pub fn load(&self, key: &str) -> Result<Option<Drafts>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        let json = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read draft file: {}", path.display()))?;
        let drafts = serde_json::from_str(&json)
            .with_context(|| format!("Corrupt draft file: {}", path.display()))?;
        Ok(Some(drafts))
    }

    /// Remove the drafts for a content key
    pub fn clear(&self, key: &str) -> Result<()> {
        let path = self.path_for(key);
        if path.exists() {
            fs::remove_file(&path)
                .with_context(|| format!("Failed to remove draft file: {}", path.display()))?;
        }
        Ok(())
    }
}

/// Apply drafts to a document by entry position. Empty drafts keep the
/// original text; malformed entries are skipped. Returns how many entries
/// were updated.
pub fn apply_drafts(doc: &mut SubtitleDocument, drafts: &Drafts) -> usize {
    let mut applied = 0;
    for (&position, draft) in drafts {
        let Some(entry) = doc.entries.get_mut(position) else {
            continue;
        };
        if entry.malformed {
            continue;
        }
        let trimmed = draft.trim();
        if !trimmed.is_empty() && trimmed != entry.text {
            entry.text = trimmed.to_string();
            applied += 1;
        }
    }
    applied
}
