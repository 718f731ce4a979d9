use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Identifiant fort pour Worker
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkerId(String);

impl WorkerId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WorkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Membre de l'équipe. `id` ne change jamais après création.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Worker {
    pub id: WorkerId,
    pub display_name: String,
    #[serde(default)]
    pub work_id: String,
}

impl Worker {
    pub fn new<D: Into<String>, W: Into<String>>(display_name: D, work_id: W) -> Self {
        Self {
            id: WorkerId::random(),
            display_name: display_name.into(),
            work_id: work_id.into(),
        }
    }

    pub fn with_id<D: Into<String>, W: Into<String>>(id: WorkerId, display_name: D, work_id: W) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            work_id: work_id.into(),
        }
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum RosterError {
    #[error("duplicate worker id: {0}")]
    DuplicateId(WorkerId),
    #[error("unknown worker: {0}")]
    UnknownWorker(WorkerId),
}

/// Liste ordonnée des membres. L'ordre d'insertion sert de départage
/// lors de l'équilibrage automatique.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Roster {
    workers: Vec<Worker>,
}

impl Roster {
    pub fn new(workers: Vec<Worker>) -> Self {
        Self { workers }
    }

    pub fn add(&mut self, worker: Worker) -> Result<(), RosterError> {
        if self.find_by_id(&worker.id).is_some() {
            return Err(RosterError::DuplicateId(worker.id));
        }
        tracing::debug!(worker = %worker.id, "worker added");
        self.workers.push(worker);
        Ok(())
    }

    /// Met à jour le nom et le matricule ; l'identifiant reste inchangé.
    pub fn update(
        &mut self,
        id: &WorkerId,
        display_name: Option<String>,
        work_id: Option<String>,
    ) -> Result<&Worker, RosterError> {
        let worker = self
            .workers
            .iter_mut()
            .find(|w| &w.id == id)
            .ok_or_else(|| RosterError::UnknownWorker(id.clone()))?;
        if let Some(name) = display_name {
            worker.display_name = name;
        }
        if let Some(work_id) = work_id {
            worker.work_id = work_id;
        }
        Ok(worker)
    }

    /// Retire un membre. Ses affectations existantes ne sont pas touchées
    /// (voir `reconcile::prune_orphans`).
    pub fn remove(&mut self, id: &WorkerId) -> Option<Worker> {
        let pos = self.workers.iter().position(|w| &w.id == id)?;
        tracing::debug!(worker = %id, "worker removed");
        Some(self.workers.remove(pos))
    }

    pub fn find_by_id<'a>(&'a self, id: &WorkerId) -> Option<&'a Worker> {
        self.workers.iter().find(|w| &w.id == id)
    }
    pub fn find_by_work_id<'a>(&'a self, work_id: &str) -> Option<&'a Worker> {
        self.workers.iter().find(|w| w.work_id == work_id)
    }
    pub fn contains(&self, id: &WorkerId) -> bool {
        self.find_by_id(id).is_some()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Worker> {
        self.workers.iter()
    }
    pub fn len(&self) -> usize {
        self.workers.len()
    }
    pub fn is_empty(&self) -> bool {
        self.workers.is_empty()
    }
    /// Nom affichable d'un identifiant, ou l'identifiant brut s'il est orphelin.
    pub fn display_name_of<'a>(&'a self, id: &'a WorkerId) -> &'a str {
        self.find_by_id(id)
            .map(|w| w.display_name.as_str())
            .unwrap_or_else(|| id.as_str())
    }
}

impl<'a> IntoIterator for &'a Roster {
    type Item = &'a Worker;
    type IntoIter = std::slice::Iter<'a, Worker>;

    fn into_iter(self) -> Self::IntoIter {
        self.workers.iter()
    }
}

/// Poste de travail. L'ordre de déclaration est l'ordre d'affichage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShiftType {
    Early,
    Mid,
    Late,
}

impl ShiftType {
    pub const ALL: [ShiftType; 3] = [ShiftType::Early, ShiftType::Mid, ShiftType::Late];

    pub fn as_str(&self) -> &'static str {
        match self {
            ShiftType::Early => "early",
            ShiftType::Mid => "mid",
            ShiftType::Late => "late",
        }
    }

    /// Plage horaire nominale (heure locale).
    pub fn time_range(&self) -> &'static str {
        match self {
            ShiftType::Early => "09:30-18:30",
            ShiftType::Mid => "11:00-20:00",
            ShiftType::Late => "12:30-21:30",
        }
    }
}

impl fmt::Display for ShiftType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("unknown shift type: {0} (expected early, mid or late)")]
pub struct UnknownShiftType(pub String);

impl FromStr for ShiftType {
    type Err = UnknownShiftType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "early" => Ok(ShiftType::Early),
            "mid" => Ok(ShiftType::Mid),
            "late" => Ok(ShiftType::Late),
            other => Err(UnknownShiftType(other.to_string())),
        }
    }
}

/// Créneau adressable : (date, poste). Trié par date puis par poste.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slot {
    pub date: NaiveDate,
    pub shift_type: ShiftType,
}

impl Slot {
    pub fn new(date: NaiveDate, shift_type: ShiftType) -> Self {
        Self { date, shift_type }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.date, self.shift_type)
    }
}

/// Identifiant fort pour Assignment
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssignmentId(String);

impl AssignmentId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
    /// Identifiant dérivé du créneau (`2024-05-01-early`), utilisé pour les suggestions.
    pub fn for_slot(slot: &Slot) -> Self {
        Self(slot.to_string())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Affectation d'un créneau. `worker_ids` n'est jamais vide dans le store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub id: AssignmentId,
    pub slot: Slot,
    pub worker_ids: Vec<WorkerId>,
}

impl Assignment {
    pub fn new(slot: Slot, worker_ids: Vec<WorkerId>) -> Self {
        Self {
            id: AssignmentId::random(),
            slot,
            worker_ids,
        }
    }

    pub fn contains(&self, worker: &WorkerId) -> bool {
        self.worker_ids.contains(worker)
    }
}
