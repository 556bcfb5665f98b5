use chrono::{DateTime, Utc};
use derive_more::{AsRef, Deref, Display};
use uuid::Uuid;

use crate::{CreateError, DeleteError, Name, NameError, ReadError, UpdateError, ValidationError};

#[allow(async_fn_in_trait)]
pub trait WorkoutService {
    async fn get_workouts(&self) -> Result<Vec<Workout>, ReadError>;
    async fn get_workout(&self, id: WorkoutID) -> Result<Workout, ReadError>;
    async fn create_workout(&self, workout: Workout) -> Result<Workout, CreateError>;
    async fn replace_workout(&self, workout: Workout) -> Result<Workout, UpdateError>;
    async fn delete_workout(&self, id: WorkoutID) -> Result<WorkoutID, DeleteError>;

    fn validate_workout_name(&self, name: &str) -> Result<Name, ValidationError> {
        match Name::new(name) {
            Ok(name) => Ok(name),
            Err(NameError::Empty) => Err(ValidationError::other(
                "Por favor, dê um nome ao treino.",
            )),
            Err(err) => Err(ValidationError::Other(err.into())),
        }
    }
}

#[allow(async_fn_in_trait)]
pub trait WorkoutRepository {
    async fn read_workouts(&self) -> Result<Vec<Workout>, ReadError>;
    async fn read_workout(&self, id: WorkoutID) -> Result<Workout, ReadError>;
    async fn create_workout(&self, workout: Workout) -> Result<Workout, CreateError>;
    async fn replace_workout(&self, workout: Workout) -> Result<Workout, UpdateError>;
    async fn delete_workout(&self, id: WorkoutID) -> Result<WorkoutID, DeleteError>;
}

pub const MUSCLE_GROUPS: [&str; 14] = [
    "Peito",
    "Costas",
    "Ombros",
    "Bíceps",
    "Tríceps",
    "Pernas",
    "Quadríceps",
    "Isquiotibiais",
    "Panturrilhas",
    "Glúteos",
    "Abdômen",
    "Lombar",
    "Antebraço",
    "Trapézio",
];

pub const TECHNIQUES: [&str; 8] = [
    "Drop-set",
    "Bi-set",
    "Tri-set",
    "Rest-pause",
    "Super-série",
    "Pico de Contração",
    "Fadiga Excêntrica",
    "Combinado",
];

#[derive(Debug, Clone, PartialEq)]
pub struct Workout {
    pub id: WorkoutID,
    pub name: Name,
    pub category: Category,
    pub muscle_groups: MuscleGroups,
    pub exercise_groups: Vec<ExerciseGroup>,
    pub created_at: DateTime<Utc>,
}

impl Workout {
    pub fn exercises(&self) -> impl Iterator<Item = &Exercise> {
        self.exercise_groups.iter().flat_map(|g| g.exercises.iter())
    }

    #[must_use]
    pub fn num_exercises(&self) -> usize {
        self.exercise_groups.iter().map(|g| g.exercises.len()).sum()
    }

    #[must_use]
    pub fn exercise(&self, group_idx: usize, exercise_idx: usize) -> Option<&Exercise> {
        self.exercise_groups
            .get(group_idx)
            .and_then(|g| g.exercises.get(exercise_idx))
    }
}

#[derive(Deref, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct WorkoutID(Uuid);

impl WorkoutID {
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl From<Uuid> for WorkoutID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for WorkoutID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    A,
    B,
    C,
    D,
    FullBody,
    #[default]
    None,
}

impl Category {
    #[must_use]
    pub fn iter() -> std::slice::Iter<'static, Category> {
        static CATEGORIES: [Category; 6] = [
            Category::A,
            Category::B,
            Category::C,
            Category::D,
            Category::FullBody,
            Category::None,
        ];
        CATEGORIES.iter()
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Category::A => "A",
            Category::B => "B",
            Category::C => "C",
            Category::D => "D",
            Category::FullBody => "Full Body",
            Category::None => "",
        }
    }
}

impl From<&str> for Category {
    fn from(value: &str) -> Self {
        Category::iter()
            .find(|c| c.name() == value)
            .copied()
            .unwrap_or_default()
    }
}

/// Muscle group tags of a workout.
///
/// Tags keep their insertion order for display and never contain duplicates.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MuscleGroups(Vec<String>);

impl MuscleGroups {
    /// Returns `false` if the tag is empty or already present.
    pub fn add(&mut self, tag: &str) -> bool {
        let tag = tag.trim();
        if tag.is_empty() || self.contains(tag) {
            return false;
        }
        self.0.push(tag.to_string());
        true
    }

    pub fn remove(&mut self, tag: &str) -> bool {
        let len = self.0.len();
        self.0.retain(|t| t != tag);
        self.0.len() != len
    }

    #[must_use]
    pub fn contains(&self, tag: &str) -> bool {
        self.0.iter().any(|t| t == tag)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Known muscle groups starting with the given input which are not yet part of the tags.
    #[must_use]
    pub fn suggestions(&self, input: &str) -> Vec<&'static str> {
        let input = input.trim().to_lowercase();
        if input.is_empty() {
            return vec![];
        }
        MUSCLE_GROUPS
            .iter()
            .filter(|m| m.to_lowercase().starts_with(&input) && !self.contains(m))
            .copied()
            .collect()
    }
}

impl<S: AsRef<str>> FromIterator<S> for MuscleGroups {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        let mut muscle_groups = MuscleGroups::default();
        for tag in iter {
            muscle_groups.add(tag.as_ref());
        }
        muscle_groups
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseGroup {
    pub id: ExerciseGroupID,
    pub technique: String,
    pub exercises: Vec<Exercise>,
}

impl ExerciseGroup {
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: ExerciseGroupID::random(),
            technique: String::new(),
            exercises: vec![Exercise::new()],
        }
    }
}

impl Default for ExerciseGroup {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Deref, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct ExerciseGroupID(Uuid);

impl ExerciseGroupID {
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl From<Uuid> for ExerciseGroupID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for ExerciseGroupID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Exercise {
    pub id: ExerciseID,
    pub name: String,
    pub sets: u32,
    pub reps: Reps,
    pub load: f32,
    pub rest: u32,
}

impl Exercise {
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: ExerciseID::random(),
            name: String::new(),
            sets: 3,
            reps: Reps::new("10"),
            load: 10.0,
            rest: 60,
        }
    }
}

impl Default for Exercise {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Deref, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct ExerciseID(Uuid);

impl ExerciseID {
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl From<Uuid> for ExerciseID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for ExerciseID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

/// Repetition label of an exercise, e.g. "10" or "8-12".
#[derive(AsRef, Debug, Display, Default, Clone, PartialEq, Eq)]
pub struct Reps(String);

impl Reps {
    #[must_use]
    pub fn new(reps: &str) -> Self {
        Self(reps.to_string())
    }

    /// Leading integer of the part before the first `-`.
    #[must_use]
    pub fn lower_bound(&self) -> Option<u32> {
        let first = self.0.split('-').next().unwrap_or_default().trim_start();
        let digits = first
            .find(|c: char| !c.is_ascii_digit())
            .map_or(first, |end| &first[..end]);
        digits.parse().ok()
    }
}

/// Editable state of a workout in the editor.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutDraft {
    pub id: Option<WorkoutID>,
    pub created_at: Option<DateTime<Utc>>,
    pub name: String,
    pub category: Category,
    pub muscle_groups: MuscleGroups,
    pub exercise_groups: Vec<ExerciseGroup>,
}

impl WorkoutDraft {
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: None,
            created_at: None,
            name: String::new(),
            category: Category::None,
            muscle_groups: MuscleGroups::default(),
            exercise_groups: vec![],
        }
    }

    #[must_use]
    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }

    pub fn add_group(&mut self) {
        self.exercise_groups.push(ExerciseGroup::new());
    }

    pub fn remove_group(&mut self, group_idx: usize) {
        if group_idx < self.exercise_groups.len() {
            self.exercise_groups.remove(group_idx);
        }
    }

    pub fn add_exercise(&mut self, group_idx: usize) {
        if let Some(group) = self.exercise_groups.get_mut(group_idx) {
            group.exercises.push(Exercise::new());
        }
    }

    pub fn remove_exercise(&mut self, group_idx: usize, exercise_idx: usize) {
        if let Some(group) = self.exercise_groups.get_mut(group_idx) {
            if exercise_idx < group.exercises.len() {
                group.exercises.remove(exercise_idx);
            }
        }
    }

    /// Turn the draft into a workout.
    ///
    /// An existing workout keeps its ID and creation time.
    pub fn into_workout(self, now: DateTime<Utc>) -> Result<Workout, WorkoutDraftError> {
        let name = Name::new(&self.name)?;
        if let Some(exercise) = self
            .exercise_groups
            .iter()
            .flat_map(|g| g.exercises.iter())
            .find(|e| e.sets == 0)
        {
            return Err(WorkoutDraftError::NoSets(exercise.name.clone()));
        }
        Ok(Workout {
            id: self.id.unwrap_or_else(WorkoutID::random),
            name,
            category: self.category,
            muscle_groups: self.muscle_groups,
            exercise_groups: self.exercise_groups,
            created_at: self.created_at.unwrap_or(now),
        })
    }
}

impl Default for WorkoutDraft {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&Workout> for WorkoutDraft {
    fn from(value: &Workout) -> Self {
        Self {
            id: Some(value.id),
            created_at: Some(value.created_at),
            name: value.name.to_string(),
            category: value.category,
            muscle_groups: value.muscle_groups.clone(),
            exercise_groups: value.exercise_groups.clone(),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum WorkoutDraftError {
    #[error(transparent)]
    Name(#[from] NameError),
    #[error("Exercise \"{0}\" must have at least one set")]
    NoSets(String),
}
