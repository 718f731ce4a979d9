use crate::model::{ShiftType, Slot, WorkerId};
use crate::period::WeekStart;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Options du moteur, persistées avec l'état.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineOptions {
    #[serde(default)]
    pub week_start: WeekStart,
    /// Retire les doublons d'un créneau lors de `set_workers`.
    #[serde(default)]
    pub dedupe_worker_ids: bool,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            week_start: WeekStart::Sunday,
            dedupe_worker_ids: false,
        }
    }
}

/// Un membre présent sur plusieurs postes le même jour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict {
    pub worker: WorkerId,
    pub date: NaiveDate,
    pub shift_types: Vec<ShiftType>,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum EngineError {
    #[error("invalid move: no worker at index {index} of slot {slot}")]
    InvalidMove { slot: Slot, index: usize },
}
