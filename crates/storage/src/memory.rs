use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use reisfit_domain as domain;

/// Volatile storage keeping all data in memory.
///
/// Clones share the same data.
#[derive(Clone, Default)]
pub struct Memory {
    data: Rc<RefCell<domain::Snapshot>>,
    unavailable: Rc<Cell<bool>>,
}

impl Memory {
    #[must_use]
    pub fn new(snapshot: domain::Snapshot) -> Self {
        Self {
            data: Rc::new(RefCell::new(snapshot)),
            unavailable: Rc::new(Cell::new(false)),
        }
    }

    /// Let all subsequent operations fail with `StorageError::Unavailable`.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.set(unavailable);
    }

    fn check(&self) -> Result<(), domain::StorageError> {
        if self.unavailable.get() {
            return Err(domain::StorageError::Unavailable);
        }
        Ok(())
    }
}

impl domain::ProfileRepository for Memory {
    async fn read_profile(&self) -> Result<Option<domain::UserProfile>, domain::ReadError> {
        self.check()?;
        Ok(self.data.borrow().profile.clone())
    }

    async fn replace_profile(
        &self,
        profile: domain::UserProfile,
    ) -> Result<domain::UserProfile, domain::UpdateError> {
        self.check()?;
        self.data.borrow_mut().profile = Some(profile.clone());
        Ok(profile)
    }
}

impl domain::WorkoutRepository for Memory {
    async fn read_workouts(&self) -> Result<Vec<domain::Workout>, domain::ReadError> {
        self.check()?;
        let mut workouts = self.data.borrow().workouts.clone();
        workouts.sort_by_key(|w| w.created_at);
        Ok(workouts)
    }

    async fn read_workout(
        &self,
        id: domain::WorkoutID,
    ) -> Result<domain::Workout, domain::ReadError> {
        self.check()?;
        self.data
            .borrow()
            .workouts
            .iter()
            .find(|w| w.id == id)
            .cloned()
            .ok_or(domain::ReadError::NotFound)
    }

    async fn create_workout(
        &self,
        workout: domain::Workout,
    ) -> Result<domain::Workout, domain::CreateError> {
        self.check()?;
        let mut data = self.data.borrow_mut();
        if data.workouts.iter().any(|w| w.id == workout.id) {
            return Err(domain::CreateError::Conflict);
        }
        data.workouts.push(workout.clone());
        Ok(workout)
    }

    async fn replace_workout(
        &self,
        workout: domain::Workout,
    ) -> Result<domain::Workout, domain::UpdateError> {
        self.check()?;
        let mut data = self.data.borrow_mut();
        match data.workouts.iter_mut().find(|w| w.id == workout.id) {
            Some(w) => *w = workout.clone(),
            None => data.workouts.push(workout.clone()),
        }
        Ok(workout)
    }

    async fn delete_workout(
        &self,
        id: domain::WorkoutID,
    ) -> Result<domain::WorkoutID, domain::DeleteError> {
        self.check()?;
        self.data.borrow_mut().workouts.retain(|w| w.id != id);
        Ok(id)
    }
}

impl domain::SessionRepository for Memory {
    async fn read_sessions(&self) -> Result<Vec<domain::Session>, domain::ReadError> {
        self.check()?;
        let mut sessions = self.data.borrow().sessions.clone();
        sessions.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(sessions)
    }

    async fn create_session(
        &self,
        session: domain::Session,
    ) -> Result<domain::Session, domain::CreateError> {
        self.check()?;
        let mut data = self.data.borrow_mut();
        if data.sessions.iter().any(|s| s.id == session.id) {
            return Err(domain::CreateError::Conflict);
        }
        data.sessions.push(session.clone());
        Ok(session)
    }
}

impl domain::BackupRepository for Memory {
    async fn export_all(&self) -> Result<domain::Snapshot, domain::ReadError> {
        self.check()?;
        Ok(self.data.borrow().clone())
    }

    async fn import_all(&self, snapshot: domain::Snapshot) -> Result<(), domain::UpdateError> {
        self.check()?;
        *self.data.borrow_mut() = snapshot;
        Ok(())
    }
}
