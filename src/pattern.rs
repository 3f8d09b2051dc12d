use crate::error::SchedError;
use crate::model::{ScheduleId, Shift};
use anyhow::{bail, Context, Result};
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Motif hebdomadaire servant à générer les templates d'un planning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklyPattern {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub slots: Vec<PatternSlot>,
}

impl WeeklyPattern {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            bail!("pattern name cannot be empty");
        }
        if self.slots.is_empty() {
            bail!("pattern must contain at least one slot");
        }
        for slot in &self.slots {
            slot.validate()?;
        }
        Ok(())
    }

    /// Un template par jour couvert et par slot, entre `from` et `to` inclus.
    pub fn expand(
        &self,
        schedule_id: &ScheduleId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Shift>, SchedError> {
        self.validate()
            .map_err(|err| SchedError::InvalidArgument(err.to_string()))?;
        if to < from {
            return Err(SchedError::InvalidArgument(
                "end date must be after start date".to_string(),
            ));
        }

        let mut shifts = Vec::new();
        let mut current = from;
        while current <= to {
            let weekday = current.weekday().number_from_monday() as u8;
            for slot in self.slots.iter().filter(|s| s.days.contains(&weekday)) {
                let (start, end) = build_datetimes(current, slot.start_time, slot.end_time)?;
                shifts.push(Shift::template(schedule_id.clone(), start, end)?);
            }
            current = current
                .succ_opt()
                .context("date overflow")?;
        }

        shifts.sort_by_key(|s| s.start);
        Ok(shifts)
    }
}

/// Créneau horaire ; `days` en ISO (1 = lundi ... 7 = dimanche).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternSlot {
    #[serde(default)]
    pub label: String,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub days: Vec<u8>,
}

impl PatternSlot {
    fn validate(&self) -> Result<()> {
        if self.days.is_empty() {
            bail!("slot must define at least one day");
        }
        if let Some(day) = self.days.iter().find(|d| !(1..=7).contains(*d)) {
            bail!("slot day {day} out of range 1..=7");
        }
        if self.start_time == self.end_time {
            bail!("slot start_time and end_time cannot be equal");
        }
        Ok(())
    }
}

pub fn load_pattern_from_file<P: AsRef<Path>>(path: P) -> Result<WeeklyPattern> {
    let path = path.as_ref();
    let data = fs::read(path).with_context(|| format!("reading pattern {}", path.display()))?;
    let pattern: WeeklyPattern = serde_json::from_slice(&data)
        .with_context(|| format!("parsing pattern {}", path.display()))?;
    pattern.validate()?;
    Ok(pattern)
}

pub fn export_pattern_json<P: AsRef<Path>>(path: P, pattern: &WeeklyPattern) -> Result<()> {
    let json = serde_json::to_string_pretty(pattern)?;
    fs::write(path, json)?;
    Ok(())
}

/// Une fin antérieure ou égale au début bascule au lendemain.
fn build_datetimes(
    date: NaiveDate,
    start_time: NaiveTime,
    end_time: NaiveTime,
) -> Result<(DateTime<Utc>, DateTime<Utc>), SchedError> {
    let start_dt = Utc.from_utc_datetime(&NaiveDateTime::new(date, start_time));
    let mut end_date = date;
    if end_time <= start_time {
        end_date = end_date
            .succ_opt()
            .context("date overflow")?;
    }
    let end_dt = Utc.from_utc_datetime(&NaiveDateTime::new(end_date, end_time));
    Ok((start_dt, end_dt))
}
