#![forbid(unsafe_code)]
//! Roulement — moteur de planification d'équipes par créneaux (jour × poste).
//!
//! - Store d'affectations : une affectation par créneau, jamais vide.
//! - Suggestions équilibrées (glouton, charge = nombre de créneaux).
//! - Déplacements manuels atomiques, détection de conflits consultative.
//! - Modèles de semaine nommés ; persistance JSON explicite.

pub mod clock;
pub mod engine;
pub mod io;
pub mod model;
pub mod period;
pub mod reconcile;
pub mod storage;
pub mod store;
pub mod template;
pub mod warning;
pub mod workspace;

pub use clock::{Clock, FixedClock, SystemClock};
pub use engine::{
    detect_conflicts, workload, AllocationEngine, Conflict, EngineError, EngineOptions,
    WorkloadRow,
};
pub use model::{
    Assignment, AssignmentId, Roster, RosterError, ShiftType, Slot, Worker, WorkerId,
};
pub use period::{Period, PeriodError, WeekStart};
pub use reconcile::{prune_orphans, OrphanReport};
pub use storage::{JsonStorage, MemoryStorage, Storage};
pub use store::AssignmentStore;
pub use template::{TemplateEntry, TemplateError, TemplateManager, WeekTemplate};
pub use warning::{conflict_warnings, render_warnings, TextWarning, WarningRenderer};
pub use workspace::{ScheduleState, Workspace, SCHEMA_VERSION};
