use crate::error::SchedError;
use crate::model::{Board, ScheduleId, Shift, ShiftId, UserId};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Représentation publique d'un shift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftView {
    pub id: ShiftId,
    pub staff_id: Option<UserId>,
    pub staff_name: Option<String>,
    pub schedule_id: ScheduleId,
    pub start_time: String,
    pub end_time: String,
    pub clock_in: Option<String>,
    pub clock_out: Option<String>,
}

impl ShiftView {
    pub fn new(shift: &Shift, staff_name: Option<&str>) -> Self {
        Self {
            id: shift.id.clone(),
            staff_id: shift.staff_id.clone(),
            staff_name: staff_name.map(str::to_owned),
            schedule_id: shift.schedule_id.clone(),
            start_time: timestamp(shift.start),
            end_time: timestamp(shift.end),
            clock_in: shift.clock_in.map(timestamp),
            clock_out: shift.clock_out.map(timestamp),
        }
    }

    /// Résout le nom du titulaire dans le board.
    pub fn from_board(board: &Board, shift: &Shift) -> Self {
        Self::new(shift, board.staff_name(shift))
    }
}

/// Représentation publique d'un planning et de ses shifts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleView {
    pub id: ScheduleId,
    pub name: String,
    pub created_at: String,
    pub created_by: UserId,
    pub shift_count: usize,
    pub shifts: Vec<ShiftView>,
}

/// Filtres optionnels du rapport.
#[derive(Debug, Clone, Default)]
pub struct ShiftFilter {
    pub schedule: Option<ScheduleId>,
    pub staff: Option<UserId>,
}

impl ShiftFilter {
    pub fn schedule(id: ScheduleId) -> Self {
        Self {
            schedule: Some(id),
            staff: None,
        }
    }

    pub fn staff(id: UserId) -> Self {
        Self {
            schedule: None,
            staff: Some(id),
        }
    }

    fn matches(&self, shift: &Shift) -> bool {
        let schedule_ok = self
            .schedule
            .as_ref()
            .map_or(true, |id| &shift.schedule_id == id);
        let staff_ok = self
            .staff
            .as_ref()
            .map_or(true, |id| shift.staff_id.as_ref() == Some(id));
        schedule_ok && staff_ok
    }
}

/// Liste les shifts filtrés, triés par début croissant (tri stable).
pub fn list_shifts(board: &Board, filter: &ShiftFilter) -> Vec<ShiftView> {
    let mut shifts: Vec<&Shift> = board.shifts.iter().filter(|s| filter.matches(s)).collect();
    shifts.sort_by_key(|s| s.start);
    shifts
        .into_iter()
        .map(|s| ShiftView::from_board(board, s))
        .collect()
}

pub fn schedule_view(board: &Board, id: &ScheduleId) -> Result<ScheduleView, SchedError> {
    let schedule = board
        .find_schedule_by_id(id)
        .ok_or_else(|| SchedError::not_found("schedule", id.as_str()))?;
    let shifts = list_shifts(board, &ShiftFilter::schedule(id.clone()));
    Ok(ScheduleView {
        id: schedule.id.clone(),
        name: schedule.name.clone(),
        created_at: timestamp(schedule.created_at),
        created_by: schedule.created_by.clone(),
        shift_count: shifts.len(),
        shifts,
    })
}

fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}
