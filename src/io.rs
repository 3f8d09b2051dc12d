use crate::model::{Account, Role};
use crate::report::ShiftView;
use anyhow::{bail, Context};
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use csv::{ReaderBuilder, WriterBuilder};
use std::fs;
use std::path::Path;

/// Formats acceptés en plus de RFC3339 (UTC implicite).
const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Import de comptes depuis CSV: header `username[,role]` (rôle `staff` par défaut)
pub fn import_accounts_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<Account>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;
    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let username = rec.get(0).context("missing username")?.trim();
        if username.is_empty() {
            bail!("invalid account row (empty username)");
        }
        let role = match rec.get(1).map(str::trim) {
            Some(raw) if !raw.is_empty() => raw
                .parse::<Role>()
                .with_context(|| format!("invalid role for username {username}"))?,
            _ => Role::Staff,
        };
        out.push(Account::new(username, role));
    }
    Ok(out)
}

/// Import d'intervalles de templates: header `start,end`
pub fn import_templates_csv<P: AsRef<Path>>(
    path: P,
) -> anyhow::Result<Vec<(DateTime<Utc>, DateTime<Utc>)>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let start = rec.get(0).context("missing start")?;
        let end = rec.get(1).context("missing end")?;
        let start = parse_timestamp(start).context("start")?;
        let end = parse_timestamp(end).context("end")?;
        out.push((start, end));
    }
    Ok(out)
}

/// RFC3339, sinon `YYYY-MM-DD HH:MM:SS` lu en UTC.
pub fn parse_timestamp(raw: &str) -> anyhow::Result<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = raw.parse::<DateTime<Utc>>() {
        return Ok(dt);
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| Utc.from_utc_datetime(&naive))
        .with_context(|| format!("invalid timestamp: {raw}"))
}

/// Export JSON du rapport (jolie mise en forme)
pub fn export_report_json<P: AsRef<Path>>(path: P, shifts: &[ShiftView]) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(shifts)?;
    fs::write(path, s)?;
    Ok(())
}

/// Export CSV du rapport: header `id,staff_id,staff_name,schedule_id,start,end,clock_in,clock_out`
pub fn export_report_csv<P: AsRef<Path>>(path: P, shifts: &[ShiftView]) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_path(path)?;
    w.write_record([
        "id",
        "staff_id",
        "staff_name",
        "schedule_id",
        "start",
        "end",
        "clock_in",
        "clock_out",
    ])?;
    for s in shifts {
        w.write_record([
            s.id.as_str(),
            s.staff_id.as_ref().map_or("", |id| id.as_str()),
            s.staff_name.as_deref().unwrap_or(""),
            s.schedule_id.as_str(),
            s.start_time.as_str(),
            s.end_time.as_str(),
            s.clock_in.as_deref().unwrap_or(""),
            s.clock_out.as_deref().unwrap_or(""),
        ])?;
    }
    w.flush()?;
    Ok(())
}
