use super::assignment;
use crate::error::SchedError;
use crate::model::{ScheduleId, Shift, StaffMember};
use std::fmt;
use std::str::FromStr;

/// Stratégie d'assignation automatique (ensemble fermé).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    EvenDistribution,
    MinimalDays,
    BalancedHours,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [
        Strategy::EvenDistribution,
        Strategy::MinimalDays,
        Strategy::BalancedHours,
    ];

    /// Clé reconnue par la factory.
    pub fn key(self) -> &'static str {
        match self {
            Strategy::EvenDistribution => "even",
            Strategy::MinimalDays => "minimal",
            Strategy::BalancedHours => "balanced",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Strategy::EvenDistribution => "Even Distribution",
            Strategy::MinimalDays => "Minimal Days",
            Strategy::BalancedHours => "Balanced Hours",
        }
    }

    /// Assigne les templates au staff, sans effet de bord.
    ///
    /// L'ordre de sortie suit celui des templates. Un roster ou une liste de
    /// templates vide produit une sortie vide.
    pub fn generate(
        self,
        schedule_id: &ScheduleId,
        staff: &[StaffMember],
        templates: &[Shift],
    ) -> Vec<Shift> {
        log_event!(
            debug,
            strategy = self.key(),
            schedule = %schedule_id,
            staff = staff.len(),
            templates = templates.len(),
            "applying strategy"
        );
        match self {
            Strategy::EvenDistribution => {
                assignment::even_distribution(schedule_id, staff, templates)
            }
            Strategy::MinimalDays => assignment::minimal_days(schedule_id, staff, templates),
            Strategy::BalancedHours => assignment::balanced_hours(schedule_id, staff, templates),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Strategy {
    type Err = SchedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        create_strategy(s)
    }
}

/// Factory : résout une clé (insensible à la casse et aux espaces).
pub fn create_strategy(key: &str) -> Result<Strategy, SchedError> {
    let key = key.trim().to_lowercase();
    Strategy::ALL
        .into_iter()
        .find(|s| s.key() == key)
        .ok_or_else(|| {
            let valid: Vec<&str> = Strategy::ALL.iter().map(|s| s.key()).collect();
            SchedError::InvalidArgument(format!(
                "invalid scheduling method '{key}': must be one of {}",
                valid.join(", ")
            ))
        })
}
