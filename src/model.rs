use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::SchedError;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(String);

        impl $name {
            pub fn new<S: AsRef<str>>(s: S) -> Self {
                Self(s.as_ref().to_owned())
            }
            pub fn random() -> Self {
                Self(Uuid::new_v4().to_string())
            }
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id!(
    /// Identifiant fort pour un compte utilisateur
    UserId
);
string_id!(
    /// Identifiant fort pour un planning
    ScheduleId
);
string_id!(
    /// Identifiant fort pour un shift
    ShiftId
);

/// Rôle porté par un compte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Staff,
    User,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Admin, Role::Staff, Role::User];

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Staff => "staff",
            Role::User => "user",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = SchedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        Role::ALL
            .into_iter()
            .find(|r| r.as_str() == key)
            .ok_or_else(|| {
                let valid: Vec<&str> = Role::ALL.iter().map(|r| r.as_str()).collect();
                SchedError::InvalidArgument(format!(
                    "invalid role '{key}': must be one of {}",
                    valid.join(", ")
                ))
            })
    }
}

/// Compte (admin, staff ou simple utilisateur)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: UserId,
    pub username: String,
    pub role: Role,
}

impl Account {
    pub fn new<U: Into<String>>(username: U, role: Role) -> Self {
        Self {
            id: UserId::random(),
            username: username.into(),
            role,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn is_staff(&self) -> bool {
        self.role == Role::Staff
    }

    /// Projection utilisée comme cible d'assignation.
    pub fn as_staff_member(&self) -> Option<StaffMember> {
        self.is_staff().then(|| StaffMember {
            id: self.id.clone(),
            name: self.username.clone(),
        })
    }
}

/// Membre du staff tel que vu par les stratégies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaffMember {
    pub id: UserId,
    pub name: String,
}

impl StaffMember {
    pub fn new<N: Into<String>>(id: UserId, name: N) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Planning : conteneur nommé, propriétaire de ses shifts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    pub id: ScheduleId,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub created_by: UserId,
}

impl Schedule {
    pub fn new<N: Into<String>>(name: N, created_by: UserId, created_at: DateTime<Utc>) -> Self {
        Self {
            id: ScheduleId::random(),
            name: name.into(),
            created_at,
            created_by,
        }
    }
}

/// Shift (UTC). Sans `staff_id`, c'est un template en attente d'assignation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shift {
    pub id: ShiftId,
    pub staff_id: Option<UserId>,
    pub schedule_id: ScheduleId,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    #[serde(default)]
    pub clock_in: Option<DateTime<Utc>>,
    #[serde(default)]
    pub clock_out: Option<DateTime<Utc>>,
}

impl Shift {
    /// Crée un template non assigné en validant que `end > start`.
    pub fn template(
        schedule_id: ScheduleId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Self, SchedError> {
        if end <= start {
            return Err(SchedError::InvalidTimeRange);
        }
        Ok(Self {
            id: ShiftId::random(),
            staff_id: None,
            schedule_id,
            start,
            end,
            clock_in: None,
            clock_out: None,
        })
    }

    pub fn is_template(&self) -> bool {
        self.staff_id.is_none()
    }

    /// Durée du créneau ; un intervalle inversé ou vide compte pour zéro.
    pub fn duration(&self) -> Duration {
        (self.end - self.start).max(Duration::zero())
    }

    pub fn overlaps(&self, other: &Shift) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Document persisté : comptes, plannings, shifts
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Board {
    #[serde(default)]
    pub accounts: Vec<Account>,
    #[serde(default)]
    pub schedules: Vec<Schedule>,
    #[serde(default)]
    pub shifts: Vec<Shift>,
}

impl Board {
    pub fn find_account<'a>(&'a self, id: &UserId) -> Option<&'a Account> {
        self.accounts.iter().find(|a| &a.id == id)
    }
    pub fn find_account_by_username<'a>(&'a self, username: &str) -> Option<&'a Account> {
        self.accounts.iter().find(|a| a.username == username)
    }
    pub fn find_schedule_by_id<'a>(&'a self, id: &ScheduleId) -> Option<&'a Schedule> {
        self.schedules.iter().find(|s| &s.id == id)
    }
    pub fn find_shift<'a>(&'a self, id: &ShiftId) -> Option<&'a Shift> {
        self.shifts.iter().find(|s| &s.id == id)
    }
    pub fn find_shift_mut(&mut self, id: &ShiftId) -> Option<&mut Shift> {
        self.shifts.iter_mut().find(|s| &s.id == id)
    }

    /// Nom affiché du titulaire d'un shift, s'il existe.
    pub fn staff_name<'a>(&'a self, shift: &Shift) -> Option<&'a str> {
        shift
            .staff_id
            .as_ref()
            .and_then(|id| self.find_account(id))
            .map(|a| a.username.as_str())
    }
}

