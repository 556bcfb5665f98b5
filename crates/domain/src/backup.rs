use crate::{ReadError, Session, UpdateError, UserProfile, Workout};

#[allow(async_fn_in_trait)]
pub trait BackupService {
    async fn export_all(&self) -> Result<Snapshot, ReadError>;
    /// Replace all stored data by the snapshot.
    async fn import_all(&self, snapshot: Snapshot) -> Result<(), UpdateError>;
}

#[allow(async_fn_in_trait)]
pub trait BackupRepository {
    async fn export_all(&self) -> Result<Snapshot, ReadError>;
    /// Clear and repopulate all collections atomically.
    async fn import_all(&self, snapshot: Snapshot) -> Result<(), UpdateError>;
}

/// Complete content of the storage.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub profile: Option<UserProfile>,
    pub workouts: Vec<Workout>,
    pub sessions: Vec<Session>,
}

impl Snapshot {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.profile.is_none() && self.workouts.is_empty() && self.sessions.is_empty()
    }
}
