use crate::workspace::{ScheduleState, SCHEMA_VERSION};
use anyhow::{bail, Context};
use std::cell::RefCell;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

pub trait Storage {
    /// Charge l'état depuis un support.
    fn load(&self) -> anyhow::Result<ScheduleState>;
    /// Sauvegarde de manière atomique.
    fn save(&self, state: &ScheduleState) -> anyhow::Result<()>;
}

fn check_schema(state: &ScheduleState) -> anyhow::Result<()> {
    if state.schema_version > SCHEMA_VERSION {
        bail!(
            "unsupported schema version {} (this build reads up to {})",
            state.schema_version,
            SCHEMA_VERSION
        );
    }
    Ok(())
}

pub struct JsonStorage {
    path: PathBuf,
}

impl JsonStorage {
    pub fn open<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        Ok(Self { path: path.as_ref().to_path_buf() })
    }

    /// Comme `load`, mais un fichier absent donne un état vide.
    pub fn load_or_default(&self) -> anyhow::Result<ScheduleState> {
        if !self.path.exists() {
            tracing::info!(path = %self.path.display(), "no state file, starting empty");
            return Ok(ScheduleState::default());
        }
        self.load()
    }
}

impl Storage for JsonStorage {
    fn load(&self) -> anyhow::Result<ScheduleState> {
        let data = fs::read(&self.path).with_context(|| format!("reading {}", self.path.display()))?;
        let state: ScheduleState = serde_json::from_slice(&data)
            .with_context(|| format!("parsing {}", self.path.display()))?;
        check_schema(&state)?;
        Ok(state)
    }

    fn save(&self, state: &ScheduleState) -> anyhow::Result<()> {
        let json = serde_json::to_vec_pretty(state)?;
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir).with_context(|| "creating temp file")?;
        tmp.write_all(&json)?;
        tmp.flush()?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).with_context(|| "atomic rename")?;
        tracing::debug!(path = %self.path.display(), bytes = json.len(), "state saved");
        Ok(())
    }
}

/// Stockage en mémoire ; le document passe quand même par JSON.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    doc: RefCell<Option<String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raw(&self) -> Option<String> {
        self.doc.borrow().clone()
    }
}

impl Storage for MemoryStorage {
    fn load(&self) -> anyhow::Result<ScheduleState> {
        let doc = self.doc.borrow();
        let Some(raw) = doc.as_deref() else {
            return Ok(ScheduleState::default());
        };
        let state: ScheduleState = serde_json::from_str(raw).context("parsing in-memory state")?;
        check_schema(&state)?;
        Ok(state)
    }

    fn save(&self, state: &ScheduleState) -> anyhow::Result<()> {
        let raw = serde_json::to_string(state)?;
        *self.doc.borrow_mut() = Some(raw);
        Ok(())
    }
}
