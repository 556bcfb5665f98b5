use chrono::{DateTime, Local, NaiveDate, NaiveTime, TimeZone, Utc};
use derive_more::Deref;
use uuid::Uuid;

use crate::{CreateError, ExerciseID, Interval, ReadError, Workout, WorkoutID};

/// Duration assumed for sessions logged after the fact.
pub const RETROACTIVE_DURATION: u32 = 3600;
/// Repetitions assumed for sessions logged after the fact if the rep label has no lower bound.
pub const RETROACTIVE_REPS: u32 = 10;

#[allow(async_fn_in_trait)]
pub trait SessionService {
    /// Sessions ordered by date, newest first.
    async fn get_sessions(&self) -> Result<Vec<Session>, ReadError>;
    async fn create_session(&self, session: Session) -> Result<Session, CreateError>;

    async fn get_sessions_in(&self, interval: &Interval) -> Result<Vec<Session>, ReadError> {
        Ok(self
            .get_sessions()
            .await?
            .into_iter()
            .filter(|s| interval.contains(s.local_date()))
            .collect())
    }
}

#[allow(async_fn_in_trait)]
pub trait SessionRepository {
    async fn read_sessions(&self) -> Result<Vec<Session>, ReadError>;
    async fn create_session(&self, session: Session) -> Result<Session, CreateError>;
}

/// A performed workout.
///
/// Sessions are never modified after creation. The workout name is a snapshot taken at
/// creation time and the referenced workout may no longer exist.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub id: SessionID,
    pub workout_id: WorkoutID,
    pub workout_name: String,
    pub date: DateTime<Utc>,
    pub duration: u32,
    pub performed_exercises: Vec<PerformedExercise>,
}

impl Session {
    /// Log a workout on a past day with the sets prescribed by the template.
    #[must_use]
    pub fn retroactive(workout: &Workout, date: NaiveDate) -> Self {
        Self {
            id: SessionID::random(),
            workout_id: workout.id,
            workout_name: workout.name.to_string(),
            date: local_noon(date),
            duration: RETROACTIVE_DURATION,
            performed_exercises: workout
                .exercises()
                .map(|e| PerformedExercise {
                    exercise_id: e.id,
                    name: e.name.clone(),
                    sets: (0..e.sets)
                        .map(|_| PerformedSet {
                            reps: e
                                .reps
                                .lower_bound()
                                .filter(|r| *r > 0)
                                .unwrap_or(RETROACTIVE_REPS),
                            load: e.load,
                        })
                        .collect(),
                })
                .collect(),
        }
    }

    /// Calendar day of the session in the local time zone.
    #[must_use]
    pub fn local_date(&self) -> NaiveDate {
        self.date.with_timezone(&Local).date_naive()
    }

    #[must_use]
    pub fn total_sets(&self) -> usize {
        self.performed_exercises.iter().map(|e| e.sets.len()).sum()
    }

    #[must_use]
    pub fn total_reps(&self) -> u32 {
        self.performed_exercises
            .iter()
            .flat_map(|e| e.sets.iter())
            .map(|s| s.reps)
            .sum()
    }

    #[must_use]
    pub fn max_load(&self) -> f32 {
        self.performed_exercises
            .iter()
            .flat_map(|e| e.sets.iter())
            .map(|s| s.load)
            .fold(0.0, f32::max)
    }
}

#[derive(Deref, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct SessionID(Uuid);

impl SessionID {
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl From<Uuid> for SessionID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for SessionID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PerformedExercise {
    pub exercise_id: ExerciseID,
    pub name: String,
    pub sets: Vec<PerformedSet>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerformedSet {
    pub reps: u32,
    pub load: f32,
}

fn local_noon(date: NaiveDate) -> DateTime<Utc> {
    let noon = date
        .and_hms_opt(12, 0, 0)
        .unwrap_or_else(|| date.and_time(NaiveTime::default()));
    Local
        .from_local_datetime(&noon)
        .earliest()
        .map_or_else(|| noon.and_utc(), |dt| dt.with_timezone(&Utc))
}

/// Format a number of seconds as `MM:SS`, or `H:MM:SS` from one hour on.
#[must_use]
pub fn format_duration(seconds: u32) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let seconds = seconds % 60;
    if hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes:02}:{seconds:02}")
    }
}
