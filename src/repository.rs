use crate::error::SchedError;
use crate::model::{Account, Board, Schedule, ScheduleId, Shift, StaffMember};

/// Port de persistance utilisé par `AutoScheduler`.
pub trait ShiftRepository {
    /// Staff disponible, dans l'ordre d'insertion.
    fn list_staff(&self) -> Vec<StaffMember>;
    fn find_schedule(&self, id: &ScheduleId) -> Option<&Schedule>;
    /// Templates non assignés d'un planning, dans l'ordre d'insertion.
    fn unassigned_templates(&self, schedule_id: &ScheduleId) -> Vec<Shift>;
    /// Enregistre un lot d'assignations : tout ou rien.
    fn commit_assignments(&mut self, shifts: &[Shift]) -> Result<(), SchedError>;
}

impl ShiftRepository for Board {
    fn list_staff(&self) -> Vec<StaffMember> {
        self.accounts
            .iter()
            .filter_map(Account::as_staff_member)
            .collect()
    }

    fn find_schedule(&self, id: &ScheduleId) -> Option<&Schedule> {
        self.find_schedule_by_id(id)
    }

    fn unassigned_templates(&self, schedule_id: &ScheduleId) -> Vec<Shift> {
        self.shifts
            .iter()
            .filter(|s| &s.schedule_id == schedule_id && s.is_template())
            .cloned()
            .collect()
    }

    fn commit_assignments(&mut self, shifts: &[Shift]) -> Result<(), SchedError> {
        // validation complète du lot avant toute écriture
        let mut positions = Vec::with_capacity(shifts.len());
        for shift in shifts {
            let Some(staff_id) = shift.staff_id.as_ref() else {
                return Err(SchedError::InvalidArgument(format!(
                    "shift {} carries no staff member",
                    shift.id
                )));
            };
            if !self.find_account(staff_id).is_some_and(Account::is_staff) {
                return Err(SchedError::not_found("staff member", staff_id.as_str()));
            }
            if self.find_schedule_by_id(&shift.schedule_id).is_none() {
                return Err(SchedError::not_found("schedule", shift.schedule_id.as_str()));
            }
            let Some(pos) = self.shifts.iter().position(|s| s.id == shift.id) else {
                return Err(SchedError::not_found("shift", shift.id.as_str()));
            };
            if !self.shifts[pos].is_template() || positions.contains(&pos) {
                return Err(SchedError::AlreadyAssigned(shift.id.to_string()));
            }
            positions.push(pos);
        }

        for (pos, shift) in positions.into_iter().zip(shifts) {
            let stored = &mut self.shifts[pos];
            stored.staff_id = shift.staff_id.clone();
            stored.schedule_id = shift.schedule_id.clone();
        }
        Ok(())
    }
}
