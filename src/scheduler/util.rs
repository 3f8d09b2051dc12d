use crate::model::{ScheduleId, Shift, StaffMember};

/// Index du premier minimum ; à égalité, l'ordre du roster l'emporte.
pub(super) fn first_min<T: Ord + Copy>(loads: &[T]) -> usize {
    loads
        .iter()
        .enumerate()
        .min_by_key(|(_, load)| **load)
        .map_or(0, |(idx, _)| idx)
}

pub(super) fn bind(template: &Shift, schedule_id: &ScheduleId, member: &StaffMember) -> Shift {
    Shift {
        staff_id: Some(member.id.clone()),
        schedule_id: schedule_id.clone(),
        ..template.clone()
    }
}
