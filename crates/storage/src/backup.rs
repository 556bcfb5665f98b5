use chrono::NaiveDate;
use reisfit_domain as domain;

use crate::record::{RecordError, Session, UserProfile, Workout};

/// Content of a backup file.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub struct Backup {
    pub user: Vec<UserProfile>,
    pub workouts: Vec<Workout>,
    pub sessions: Vec<Session>,
}

impl From<&domain::Snapshot> for Backup {
    fn from(value: &domain::Snapshot) -> Self {
        Self {
            user: value.profile.iter().map(UserProfile::from).collect(),
            workouts: value.workouts.iter().map(Workout::from).collect(),
            sessions: value.sessions.iter().map(Session::from).collect(),
        }
    }
}

impl TryFrom<Backup> for domain::Snapshot {
    type Error = BackupError;

    fn try_from(value: Backup) -> Result<Self, Self::Error> {
        if value.user.len() > 1 {
            return Err(BackupError::MultipleProfiles(value.user.len()));
        }
        Ok(Self {
            profile: value
                .user
                .into_iter()
                .next()
                .map(domain::UserProfile::try_from)
                .transpose()?,
            workouts: value
                .workouts
                .into_iter()
                .map(domain::Workout::try_from)
                .collect::<Result<Vec<_>, _>>()?,
            sessions: value
                .sessions
                .into_iter()
                .map(domain::Session::from)
                .collect(),
        })
    }
}

pub fn to_json(snapshot: &domain::Snapshot) -> Result<String, BackupError> {
    Ok(serde_json::to_string_pretty(&Backup::from(snapshot))?)
}

/// Parse and validate a complete backup file.
pub fn from_json(json: &str) -> Result<domain::Snapshot, BackupError> {
    domain::Snapshot::try_from(serde_json::from_str::<Backup>(json)?)
}

#[must_use]
pub fn file_name(date: NaiveDate) -> String {
    format!("reis-fit-backup-{}.json", date.format("%Y-%m-%d"))
}

#[derive(thiserror::Error, Debug)]
pub enum BackupError {
    #[error("invalid backup file: {0}")]
    Format(#[from] serde_json::Error),
    #[error("invalid backup file: {0}")]
    Record(#[from] RecordError),
    #[error("invalid backup file: {0} profiles")]
    MultipleProfiles(usize),
}
