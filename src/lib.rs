#![forbid(unsafe_code)]
//! Shiftboard — planification de shifts d'équipe (lib + CLI).
//!
//! - Plannings, templates de shifts, assignation manuelle ou automatique.
//! - Stratégies d'assignation : répartition égale, nombre minimal, heures équilibrées.
//! - Persistance via un port `ShiftRepository` ; stockage fichier JSON atomique.
//! - Tout en UTC ; parsing RFC3339 ; affichage local en dehors de la lib.

/// Événement `tracing`, compilé uniquement avec la feature `logging`.
macro_rules! log_event {
    ($level:ident, $($arg:tt)+) => {
        #[cfg(feature = "logging")]
        tracing::$level!($($arg)+);
    };
}

pub mod accounts;
pub mod admin;
pub mod error;
pub mod io;
pub mod model;
pub mod pattern;
pub mod report;
pub mod repository;
pub mod scheduler;
pub mod staff;
pub mod storage;

pub use error::{ErrorKind, SchedError};
pub use model::{Account, Board, Role, Schedule, ScheduleId, Shift, ShiftId, StaffMember, UserId};
pub use pattern::{load_pattern_from_file, PatternSlot, WeeklyPattern};
pub use report::{list_shifts, ScheduleView, ShiftFilter, ShiftView};
pub use repository::ShiftRepository;
pub use scheduler::{create_strategy, find_overlaps, AutoScheduler, Overlap, Strategy};
pub use storage::{JsonStorage, Storage};
