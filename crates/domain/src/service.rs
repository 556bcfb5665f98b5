use std::collections::BTreeMap;

use chrono::NaiveDate;
use log::{debug, error};

use crate::{
    BackupRepository, BackupService, CreateError, DeleteError, ProfileRepository, ProfileService,
    ReadError, Session, SessionRepository, SessionService, Snapshot, UpdateError, UserProfile,
    Workout, WorkoutID, WorkoutRepository, WorkoutService, current_streak, muscle_frequency,
};

pub struct Service<R> {
    repository: R,
}

impl<R> Service<R>
where
    R: ProfileRepository + WorkoutRepository + SessionRepository + BackupRepository,
{
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

macro_rules! log_on_error {
    ($func: expr, $error: ident, $action: literal, $entity: literal) => {{
        let result = $func.await;
        match result {
            Ok(_) => {}
            Err(ref err) => match err {
                $error::Storage(crate::StorageError::Unavailable) => {
                    debug!("failed to {} {}: {err}", $action, $entity);
                }
                _ => {
                    error!("failed to {} {}: {err}", $action, $entity);
                }
            },
        }
        result
    }};
}

impl<R: ProfileRepository> ProfileService for Service<R> {
    async fn get_profile(&self) -> Result<Option<UserProfile>, ReadError> {
        log_on_error!(self.repository.read_profile(), ReadError, "get", "profile")
    }

    async fn replace_profile(&self, profile: UserProfile) -> Result<UserProfile, UpdateError> {
        log_on_error!(
            self.repository.replace_profile(profile),
            UpdateError,
            "replace",
            "profile"
        )
    }
}

impl<R: WorkoutRepository> WorkoutService for Service<R> {
    async fn get_workouts(&self) -> Result<Vec<Workout>, ReadError> {
        log_on_error!(
            self.repository.read_workouts(),
            ReadError,
            "get",
            "workouts"
        )
    }

    async fn get_workout(&self, id: WorkoutID) -> Result<Workout, ReadError> {
        log_on_error!(
            self.repository.read_workout(id),
            ReadError,
            "get",
            "workout"
        )
    }

    async fn create_workout(&self, workout: Workout) -> Result<Workout, CreateError> {
        log_on_error!(
            self.repository.create_workout(workout),
            CreateError,
            "create",
            "workout"
        )
    }

    async fn replace_workout(&self, workout: Workout) -> Result<Workout, UpdateError> {
        log_on_error!(
            self.repository.replace_workout(workout),
            UpdateError,
            "replace",
            "workout"
        )
    }

    async fn delete_workout(&self, id: WorkoutID) -> Result<WorkoutID, DeleteError> {
        log_on_error!(
            self.repository.delete_workout(id),
            DeleteError,
            "delete",
            "workout"
        )
    }
}

impl<R: SessionRepository> SessionService for Service<R> {
    async fn get_sessions(&self) -> Result<Vec<Session>, ReadError> {
        log_on_error!(
            self.repository.read_sessions(),
            ReadError,
            "get",
            "sessions"
        )
    }

    async fn create_session(&self, session: Session) -> Result<Session, CreateError> {
        log_on_error!(
            self.repository.create_session(session),
            CreateError,
            "create",
            "session"
        )
    }
}

impl<R: BackupRepository> BackupService for Service<R> {
    async fn export_all(&self) -> Result<Snapshot, ReadError> {
        log_on_error!(self.repository.export_all(), ReadError, "export", "data")
    }

    async fn import_all(&self, snapshot: Snapshot) -> Result<(), UpdateError> {
        log_on_error!(
            self.repository.import_all(snapshot),
            UpdateError,
            "import",
            "data"
        )
    }
}

impl<R: SessionRepository> Service<R> {
    /// Number of consecutive training days ending today or yesterday.
    pub async fn get_streak(&self, today: NaiveDate) -> Result<u32, ReadError> {
        let sessions = self.get_sessions().await?;
        Ok(current_streak(
            sessions.iter().map(Session::local_date),
            today,
        ))
    }
}

impl<R: SessionRepository + WorkoutRepository> Service<R> {
    pub async fn get_muscle_frequency(&self) -> Result<BTreeMap<String, u32>, ReadError> {
        let sessions = self.get_sessions().await?;
        let workouts = self.get_workouts().await?;
        Ok(muscle_frequency(&sessions, &workouts))
    }

    /// Log a workout for a past day with the sets prescribed by the workout.
    pub async fn log_past_session(
        &self,
        workout_id: WorkoutID,
        date: NaiveDate,
        today: NaiveDate,
    ) -> Result<Session, CreateError> {
        if date > today {
            return Err(CreateError::Other(
                format!("cannot log session in the future ({date})").into(),
            ));
        }
        let workout = self.get_workout(workout_id).await?;
        self.create_session(Session::retroactive(&workout, date))
            .await
    }
}
