//! Opérations réservées aux comptes `admin`.

use crate::accounts::require_role;
use crate::error::SchedError;
use crate::model::{Board, Role, Schedule, ScheduleId, Shift, ShiftId, UserId};
use crate::pattern::WeeklyPattern;
use crate::report::{self, ScheduleView, ShiftFilter, ShiftView};
use crate::scheduler::AutoScheduler;
use chrono::{DateTime, NaiveDate, Utc};

pub fn create_schedule(
    board: &mut Board,
    admin: &UserId,
    name: &str,
    now: DateTime<Utc>,
) -> Result<ScheduleId, SchedError> {
    require_role(board, admin, Role::Admin, "create schedules")?;
    if name.trim().is_empty() {
        return Err(SchedError::InvalidArgument(
            "schedule name cannot be empty".to_string(),
        ));
    }
    let schedule = Schedule::new(name.trim(), admin.clone(), now);
    let id = schedule.id.clone();
    board.schedules.push(schedule);
    Ok(id)
}

/// Supprime un planning et tous ses shifts ; renvoie le nombre de shifts retirés.
pub fn delete_schedule(
    board: &mut Board,
    admin: &UserId,
    schedule_id: &ScheduleId,
) -> Result<usize, SchedError> {
    require_role(board, admin, Role::Admin, "delete schedules")?;
    let Some(pos) = board.schedules.iter().position(|s| &s.id == schedule_id) else {
        return Err(SchedError::not_found("schedule", schedule_id.as_str()));
    };
    board.schedules.remove(pos);
    let before = board.shifts.len();
    board.shifts.retain(|s| &s.schedule_id != schedule_id);
    Ok(before - board.shifts.len())
}

/// Ajoute un template (shift non assigné) à un planning.
pub fn add_template(
    board: &mut Board,
    admin: &UserId,
    schedule_id: &ScheduleId,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<ShiftId, SchedError> {
    require_role(board, admin, Role::Admin, "create shift templates")?;
    ensure_schedule(board, schedule_id)?;
    let template = Shift::template(schedule_id.clone(), start, end)?;
    let id = template.id.clone();
    board.shifts.push(template);
    Ok(id)
}

/// Génère les templates d'un planning depuis un motif hebdomadaire.
pub fn seed_from_pattern(
    board: &mut Board,
    admin: &UserId,
    schedule_id: &ScheduleId,
    pattern: &WeeklyPattern,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<usize, SchedError> {
    require_role(board, admin, Role::Admin, "create shift templates")?;
    ensure_schedule(board, schedule_id)?;
    let templates = pattern.expand(schedule_id, from, to)?;
    let count = templates.len();
    board.shifts.extend(templates);
    log_event!(info, schedule = %schedule_id, pattern = %pattern.name, count, "templates seeded");
    Ok(count)
}

/// Assignation manuelle : crée directement un shift assigné.
pub fn schedule_shift(
    board: &mut Board,
    admin: &UserId,
    staff: &UserId,
    schedule_id: &ScheduleId,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<ShiftView, SchedError> {
    require_role(board, admin, Role::Admin, "schedule shifts")?;
    let member = board
        .find_account(staff)
        .ok_or_else(|| SchedError::not_found("staff member", staff.as_str()))?;
    if !member.is_staff() {
        return Err(SchedError::InvalidArgument(format!(
            "{} is not a staff member",
            member.username
        )));
    }
    ensure_schedule(board, schedule_id)?;

    let mut shift = Shift::template(schedule_id.clone(), start, end)?;
    shift.staff_id = Some(staff.clone());
    let view = ShiftView::new(&shift, Some(member.username.as_str()));
    board.shifts.push(shift);
    Ok(view)
}

/// Assignation automatique des templates libres d'un planning.
pub fn auto_schedule(
    board: &mut Board,
    admin: &UserId,
    schedule_id: &ScheduleId,
    method: &str,
) -> Result<Vec<ShiftView>, SchedError> {
    require_role(board, admin, Role::Admin, "run automatic scheduling")?;
    AutoScheduler::new(board).run(schedule_id, method)
}

pub fn shift_report(
    board: &Board,
    admin: &UserId,
    filter: &ShiftFilter,
) -> Result<Vec<ShiftView>, SchedError> {
    require_role(board, admin, Role::Admin, "view shift reports")?;
    Ok(report::list_shifts(board, filter))
}

pub fn schedule_report(
    board: &Board,
    admin: &UserId,
    schedule_id: &ScheduleId,
) -> Result<ScheduleView, SchedError> {
    require_role(board, admin, Role::Admin, "view schedules")?;
    report::schedule_view(board, schedule_id)
}

fn ensure_schedule(board: &Board, schedule_id: &ScheduleId) -> Result<(), SchedError> {
    match board.find_schedule_by_id(schedule_id) {
        Some(_) => Ok(()),
        None => Err(SchedError::not_found("schedule", schedule_id.as_str())),
    }
}
