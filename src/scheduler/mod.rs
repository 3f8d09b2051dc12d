mod assignment;
mod conflicts;
mod strategy;
mod util;

pub use conflicts::{find_overlaps, Overlap};
pub use strategy::{create_strategy, Strategy};

use crate::error::SchedError;
use crate::model::{ScheduleId, Shift, StaffMember};
use crate::report::ShiftView;
use crate::repository::ShiftRepository;

/// Contexte d'assignation automatique : exécute une stratégie puis persiste
/// le résultat en un seul lot via le repository injecté.
#[derive(Debug)]
pub struct AutoScheduler<'r, R: ShiftRepository + ?Sized> {
    repo: &'r mut R,
}

impl<'r, R: ShiftRepository + ?Sized> AutoScheduler<'r, R> {
    pub fn new(repo: &'r mut R) -> Self {
        Self { repo }
    }

    /// Résout la stratégie, collecte staff et templates libres, puis génère.
    pub fn run(&mut self, schedule_id: &ScheduleId, key: &str) -> Result<Vec<ShiftView>, SchedError> {
        let strategy = create_strategy(key)?;
        if self.repo.find_schedule(schedule_id).is_none() {
            return Err(SchedError::not_found("schedule", schedule_id.as_str()));
        }
        let staff = self.repo.list_staff();
        let templates = self.repo.unassigned_templates(schedule_id);
        self.generate_schedule(strategy, &staff, &templates, schedule_id)
    }

    pub fn generate_schedule(
        &mut self,
        strategy: Strategy,
        staff: &[StaffMember],
        templates: &[Shift],
        schedule_id: &ScheduleId,
    ) -> Result<Vec<ShiftView>, SchedError> {
        let assigned = strategy.generate(schedule_id, staff, templates);
        if assigned.is_empty() {
            log_event!(
                info,
                schedule = %schedule_id,
                strategy = strategy.key(),
                "nothing to assign"
            );
            return Ok(Vec::new());
        }

        self.repo.commit_assignments(&assigned)?;
        log_event!(
            info,
            schedule = %schedule_id,
            strategy = strategy.key(),
            assigned = assigned.len(),
            "assignments committed"
        );

        Ok(assigned
            .iter()
            .map(|shift| {
                let name = staff
                    .iter()
                    .find(|m| shift.staff_id.as_ref() == Some(&m.id))
                    .map(|m| m.name.as_str());
                ShiftView::new(shift, name)
            })
            .collect())
    }
}
