//! Opérations côté staff : roster, consultation, pointage.

use crate::accounts;
use crate::error::SchedError;
use crate::model::{Board, ShiftId, UserId};
use crate::report::{self, ShiftFilter, ShiftView};
use chrono::{DateTime, Utc};

/// Shifts assignés à `staff`, triés par début.
pub fn view_roster(board: &Board, staff: &UserId) -> Result<Vec<ShiftView>, SchedError> {
    accounts::get_user(board, staff)?;
    Ok(report::list_shifts(board, &ShiftFilter::staff(staff.clone())))
}

pub fn get_shift(board: &Board, shift_id: &ShiftId) -> Result<ShiftView, SchedError> {
    board
        .find_shift(shift_id)
        .map(|s| ShiftView::from_board(board, s))
        .ok_or_else(|| SchedError::not_found("shift", shift_id.as_str()))
}

pub fn clock_in(
    board: &mut Board,
    staff: &UserId,
    shift_id: &ShiftId,
    now: DateTime<Utc>,
) -> Result<ShiftView, SchedError> {
    punch(board, staff, shift_id, Punch::In, now)
}

pub fn clock_out(
    board: &mut Board,
    staff: &UserId,
    shift_id: &ShiftId,
    now: DateTime<Utc>,
) -> Result<ShiftView, SchedError> {
    punch(board, staff, shift_id, Punch::Out, now)
}

#[derive(Debug, Clone, Copy)]
enum Punch {
    In,
    Out,
}

fn punch(
    board: &mut Board,
    staff: &UserId,
    shift_id: &ShiftId,
    kind: Punch,
    now: DateTime<Utc>,
) -> Result<ShiftView, SchedError> {
    let shift = board
        .find_shift_mut(shift_id)
        .ok_or_else(|| SchedError::not_found("shift", shift_id.as_str()))?;
    if shift.staff_id.as_ref() != Some(staff) {
        let action = match kind {
            Punch::In => "clock in to",
            Punch::Out => "clock out of",
        };
        return Err(SchedError::PermissionDenied(format!(
            "cannot {action} a shift not assigned to this staff member"
        )));
    }
    match kind {
        Punch::In => shift.clock_in = Some(now),
        Punch::Out => shift.clock_out = Some(now),
    }
    log_event!(info, shift = %shift_id, staff = %staff, kind = ?kind, "clock event");
    get_shift(board, shift_id)
}
