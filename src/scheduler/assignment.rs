use super::util;
use crate::model::{ScheduleId, Shift, StaffMember};

/// Round-robin : le i-ème template revient à `staff[i % n]`.
pub(super) fn even_distribution(
    schedule_id: &ScheduleId,
    staff: &[StaffMember],
    templates: &[Shift],
) -> Vec<Shift> {
    if staff.is_empty() {
        return Vec::new();
    }

    let total = staff.len();
    templates
        .iter()
        .enumerate()
        .map(|(idx, template)| util::bind(template, schedule_id, &staff[idx % total]))
        .collect()
}

/// Glouton sur le nombre de shifts déjà attribués.
pub(super) fn minimal_days(
    schedule_id: &ScheduleId,
    staff: &[StaffMember],
    templates: &[Shift],
) -> Vec<Shift> {
    if staff.is_empty() {
        return Vec::new();
    }

    let mut counts = vec![0usize; staff.len()];
    templates
        .iter()
        .map(|template| {
            let pick = util::first_min(&counts);
            counts[pick] += 1;
            util::bind(template, schedule_id, &staff[pick])
        })
        .collect()
}

/// Glouton sur la durée cumulée (secondes).
pub(super) fn balanced_hours(
    schedule_id: &ScheduleId,
    staff: &[StaffMember],
    templates: &[Shift],
) -> Vec<Shift> {
    if staff.is_empty() {
        return Vec::new();
    }

    let mut totals = vec![0i64; staff.len()];
    templates
        .iter()
        .map(|template| {
            let pick = util::first_min(&totals);
            totals[pick] += template.duration().num_seconds();
            util::bind(template, schedule_id, &staff[pick])
        })
        .collect()
}
