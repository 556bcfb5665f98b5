use chrono::{DateTime, Utc};
use reisfit_domain as domain;
use uuid::Uuid;

/// Key of the single profile record.
pub const PROFILE_KEY: u32 = 1;

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: u32,
    pub name: String,
    pub gender: String,
    pub activity_level: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
}

impl From<&domain::UserProfile> for UserProfile {
    fn from(value: &domain::UserProfile) -> Self {
        Self {
            id: PROFILE_KEY,
            name: value.name.to_string(),
            gender: value.sex.to_string(),
            activity_level: value.activity_level.key().to_string(),
            weight: value.weight,
            height: value.height,
            age: value.age,
        }
    }
}

impl TryFrom<UserProfile> for domain::UserProfile {
    type Error = RecordError;

    fn try_from(value: UserProfile) -> Result<Self, Self::Error> {
        Ok(Self {
            name: domain::Name::new(&value.name)?,
            sex: domain::Sex::from(value.gender.as_str()),
            activity_level: domain::ActivityLevel::try_from(value.activity_level.as_str())?,
            weight: value.weight,
            height: value.height,
            age: value.age,
        })
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Workout {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub muscle_groups: Vec<String>,
    pub exercise_groups: Vec<ExerciseGroup>,
    pub created_at: DateTime<Utc>,
}

impl From<&domain::Workout> for Workout {
    fn from(value: &domain::Workout) -> Self {
        Self {
            id: *value.id,
            name: value.name.to_string(),
            category: value.category.name().to_string(),
            muscle_groups: value.muscle_groups.iter().map(str::to_string).collect(),
            exercise_groups: value
                .exercise_groups
                .iter()
                .map(ExerciseGroup::from)
                .collect(),
            created_at: value.created_at,
        }
    }
}

impl TryFrom<Workout> for domain::Workout {
    type Error = RecordError;

    fn try_from(value: Workout) -> Result<Self, Self::Error> {
        Ok(Self {
            id: value.id.into(),
            name: domain::Name::new(&value.name)?,
            category: domain::Category::from(value.category.as_str()),
            muscle_groups: value.muscle_groups.iter().collect(),
            exercise_groups: value
                .exercise_groups
                .into_iter()
                .map(domain::ExerciseGroup::try_from)
                .collect::<Result<_, _>>()?,
            created_at: value.created_at,
        })
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseGroup {
    pub id: Uuid,
    #[serde(default)]
    pub technique: String,
    pub exercises: Vec<Exercise>,
}

impl From<&domain::ExerciseGroup> for ExerciseGroup {
    fn from(value: &domain::ExerciseGroup) -> Self {
        Self {
            id: *value.id,
            technique: value.technique.clone(),
            exercises: value.exercises.iter().map(Exercise::from).collect(),
        }
    }
}

impl TryFrom<ExerciseGroup> for domain::ExerciseGroup {
    type Error = RecordError;

    fn try_from(value: ExerciseGroup) -> Result<Self, Self::Error> {
        Ok(Self {
            id: value.id.into(),
            technique: value.technique,
            exercises: value
                .exercises
                .into_iter()
                .map(domain::Exercise::try_from)
                .collect::<Result<_, _>>()?,
        })
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    pub id: Uuid,
    pub name: String,
    pub sets: u32,
    pub reps: String,
    pub load: f32,
    pub rest: u32,
}

impl From<&domain::Exercise> for Exercise {
    fn from(value: &domain::Exercise) -> Self {
        Self {
            id: *value.id,
            name: value.name.clone(),
            sets: value.sets,
            reps: value.reps.to_string(),
            load: value.load,
            rest: value.rest,
        }
    }
}

impl TryFrom<Exercise> for domain::Exercise {
    type Error = RecordError;

    fn try_from(value: Exercise) -> Result<Self, Self::Error> {
        if value.sets == 0 {
            return Err(RecordError::NoSets(value.name));
        }
        Ok(Self {
            id: value.id.into(),
            name: value.name,
            sets: value.sets,
            reps: domain::Reps::new(&value.reps),
            load: value.load,
            rest: value.rest,
        })
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: Uuid,
    pub workout_id: Uuid,
    pub workout_name: String,
    pub date: DateTime<Utc>,
    pub duration: u32,
    pub performed_exercises: Vec<PerformedExercise>,
}

impl From<&domain::Session> for Session {
    fn from(value: &domain::Session) -> Self {
        Self {
            id: *value.id,
            workout_id: *value.workout_id,
            workout_name: value.workout_name.clone(),
            date: value.date,
            duration: value.duration,
            performed_exercises: value
                .performed_exercises
                .iter()
                .map(PerformedExercise::from)
                .collect(),
        }
    }
}

impl From<Session> for domain::Session {
    fn from(value: Session) -> Self {
        Self {
            id: value.id.into(),
            workout_id: value.workout_id.into(),
            workout_name: value.workout_name,
            date: value.date,
            duration: value.duration,
            performed_exercises: value
                .performed_exercises
                .into_iter()
                .map(domain::PerformedExercise::from)
                .collect(),
        }
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PerformedExercise {
    pub exercise_id: Uuid,
    pub name: String,
    pub sets: Vec<PerformedSet>,
}

impl From<&domain::PerformedExercise> for PerformedExercise {
    fn from(value: &domain::PerformedExercise) -> Self {
        Self {
            exercise_id: *value.exercise_id,
            name: value.name.clone(),
            sets: value
                .sets
                .iter()
                .map(|s| PerformedSet {
                    reps: s.reps,
                    load: s.load,
                })
                .collect(),
        }
    }
}

impl From<PerformedExercise> for domain::PerformedExercise {
    fn from(value: PerformedExercise) -> Self {
        Self {
            exercise_id: value.exercise_id.into(),
            name: value.name,
            sets: value
                .sets
                .into_iter()
                .map(|s| domain::PerformedSet {
                    reps: s.reps,
                    load: s.load,
                })
                .collect(),
        }
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct PerformedSet {
    pub reps: u32,
    pub load: f32,
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum RecordError {
    #[error(transparent)]
    InvalidName(#[from] domain::NameError),
    #[error(transparent)]
    InvalidActivityLevel(#[from] domain::ActivityLevelError),
    #[error("exercise \"{0}\" has no sets")]
    NoSets(String),
}
