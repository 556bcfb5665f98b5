use chrono::{DateTime, Utc};

use crate::{PerformedExercise, PerformedSet, Session, SessionID, Workout};

/// Repetitions logged for a set if the rep label of the exercise has no lower bound.
pub const DEFAULT_REPS: u32 = 0;
/// Delay between completing a set and starting its rest countdown.
pub const REST_SETTLE_DELAY_MS: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunnerState {
    Idle,
    InProgress,
    Resting { remaining: u32 },
    Finished,
}

/// Rest countdown to be started after the settle delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RestRequest {
    pub generation: u64,
    pub seconds: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetToggle {
    pub done: bool,
    pub rest: Option<RestRequest>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestTick {
    Running(u32),
    Finished,
    /// The countdown was replaced, skipped or the session has ended.
    Stale,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
}

impl Progress {
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn percentage(&self) -> f32 {
        if self.total == 0 {
            return 0.0;
        }
        self.completed as f32 / self.total as f32 * 100.0
    }
}

/// State of a live workout session.
///
/// The performed log is derived from the done flags of the sets. Unchecking a set removes it from
/// the log. Exercises are logged in the order in which their first set was completed.
#[derive(Debug, Clone)]
pub struct WorkoutRunner {
    workout: Workout,
    state: RunnerState,
    done: Vec<Vec<Vec<bool>>>,
    completion_order: Vec<(usize, usize)>,
    elapsed: u32,
    generation: u64,
}

impl WorkoutRunner {
    #[must_use]
    pub fn new(workout: Workout) -> Self {
        let done = done_flags(&workout);
        Self {
            workout,
            state: RunnerState::Idle,
            done,
            completion_order: vec![],
            elapsed: 0,
            generation: 0,
        }
    }

    pub fn start(&mut self) -> Result<(), RunnerError> {
        if self.state != RunnerState::Idle {
            return Err(RunnerError::AlreadyStarted);
        }
        self.done = done_flags(&self.workout);
        self.completion_order.clear();
        self.elapsed = 0;
        self.state = RunnerState::InProgress;
        Ok(())
    }

    #[must_use]
    pub fn workout(&self) -> &Workout {
        &self.workout
    }

    #[must_use]
    pub fn state(&self) -> RunnerState {
        self.state
    }

    #[must_use]
    pub fn elapsed(&self) -> u32 {
        self.elapsed
    }

    #[must_use]
    pub fn remaining_rest(&self) -> Option<u32> {
        match self.state {
            RunnerState::Resting { remaining } => Some(remaining),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_done(&self, group_idx: usize, exercise_idx: usize, set_idx: usize) -> bool {
        self.done
            .get(group_idx)
            .and_then(|g| g.get(exercise_idx))
            .and_then(|e| e.get(set_idx))
            .copied()
            .unwrap_or(false)
    }

    #[must_use]
    pub fn is_exercise_completed(&self, group_idx: usize, exercise_idx: usize) -> bool {
        self.done
            .get(group_idx)
            .and_then(|g| g.get(exercise_idx))
            .is_some_and(|sets| all_done(sets))
    }

    #[must_use]
    pub fn progress(&self) -> Progress {
        Progress {
            completed: self
                .done
                .iter()
                .flatten()
                .filter(|sets| all_done(sets))
                .count(),
            total: self.workout.num_exercises(),
        }
    }

    /// Flip the done flag of a set.
    ///
    /// Completing a set cancels the active rest and requests a new countdown with the rest time
    /// of the exercise.
    pub fn toggle_set(
        &mut self,
        group_idx: usize,
        exercise_idx: usize,
        set_idx: usize,
    ) -> Result<SetToggle, RunnerError> {
        self.ensure_active()?;

        let rest = self
            .workout
            .exercise(group_idx, exercise_idx)
            .map(|e| e.rest)
            .ok_or(RunnerError::InvalidSet {
                group_idx,
                exercise_idx,
                set_idx,
            })?;
        let flag = self
            .done
            .get_mut(group_idx)
            .and_then(|g| g.get_mut(exercise_idx))
            .and_then(|e| e.get_mut(set_idx))
            .ok_or(RunnerError::InvalidSet {
                group_idx,
                exercise_idx,
                set_idx,
            })?;

        *flag = !*flag;
        let done = *flag;

        if !done {
            return Ok(SetToggle { done, rest: None });
        }

        if !self.completion_order.contains(&(group_idx, exercise_idx)) {
            self.completion_order.push((group_idx, exercise_idx));
        }

        self.generation += 1;
        self.state = RunnerState::InProgress;

        Ok(SetToggle {
            done,
            rest: (rest > 0).then_some(RestRequest {
                generation: self.generation,
                seconds: rest,
            }),
        })
    }

    /// Start a requested rest countdown.
    ///
    /// Returns false if the request has been superseded in the meantime.
    pub fn begin_rest(&mut self, request: RestRequest) -> bool {
        if request.generation != self.generation || self.state != RunnerState::InProgress {
            return false;
        }
        self.state = RunnerState::Resting {
            remaining: request.seconds,
        };
        true
    }

    /// Advance the rest countdown of the given generation by one second.
    pub fn tick_rest(&mut self, generation: u64) -> RestTick {
        if generation != self.generation {
            return RestTick::Stale;
        }
        match self.state {
            RunnerState::Resting { remaining } if remaining > 1 => {
                self.state = RunnerState::Resting {
                    remaining: remaining - 1,
                };
                RestTick::Running(remaining - 1)
            }
            RunnerState::Resting { .. } => {
                self.state = RunnerState::InProgress;
                RestTick::Finished
            }
            _ => RestTick::Stale,
        }
    }

    pub fn skip_rest(&mut self) -> Result<(), RunnerError> {
        if !matches!(self.state, RunnerState::Resting { .. }) {
            return Err(RunnerError::NotResting);
        }
        self.generation += 1;
        self.state = RunnerState::InProgress;
        Ok(())
    }

    /// Advance the session duration by one second.
    pub fn tick_elapsed(&mut self) {
        if matches!(
            self.state,
            RunnerState::InProgress | RunnerState::Resting { .. }
        ) {
            self.elapsed += 1;
        }
    }

    /// Sets completed so far, grouped by exercise.
    #[must_use]
    pub fn performed_exercises(&self) -> Vec<PerformedExercise> {
        self.completion_order
            .iter()
            .filter_map(|(group_idx, exercise_idx)| {
                let exercise = self.workout.exercise(*group_idx, *exercise_idx)?;
                let count = self.done[*group_idx][*exercise_idx]
                    .iter()
                    .filter(|d| **d)
                    .count();
                if count == 0 {
                    return None;
                }
                Some(PerformedExercise {
                    exercise_id: exercise.id,
                    name: exercise.name.clone(),
                    sets: vec![
                        PerformedSet {
                            reps: exercise.reps.lower_bound().unwrap_or(DEFAULT_REPS),
                            load: exercise.load,
                        };
                        count
                    ],
                })
            })
            .collect()
    }

    pub fn finish(&mut self, now: DateTime<Utc>) -> Result<Session, RunnerError> {
        self.ensure_active()?;
        self.generation += 1;
        self.state = RunnerState::Finished;
        Ok(Session {
            id: SessionID::random(),
            workout_id: self.workout.id,
            workout_name: self.workout.name.to_string(),
            date: now,
            duration: self.elapsed,
            performed_exercises: self.performed_exercises(),
        })
    }

    fn ensure_active(&self) -> Result<(), RunnerError> {
        match self.state {
            RunnerState::Idle => Err(RunnerError::NotStarted),
            RunnerState::Finished => Err(RunnerError::Finished),
            RunnerState::InProgress | RunnerState::Resting { .. } => Ok(()),
        }
    }
}

/// An exercise without sets is never completed.
fn all_done(sets: &[bool]) -> bool {
    !sets.is_empty() && sets.iter().all(|d| *d)
}

fn done_flags(workout: &Workout) -> Vec<Vec<Vec<bool>>> {
    workout
        .exercise_groups
        .iter()
        .map(|g| {
            g.exercises
                .iter()
                .map(|e| vec![false; e.sets as usize])
                .collect()
        })
        .collect()
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum RunnerError {
    #[error("workout not started")]
    NotStarted,
    #[error("workout already started")]
    AlreadyStarted,
    #[error("workout already finished")]
    Finished,
    #[error("not resting")]
    NotResting,
    #[error("no set {set_idx} of exercise {exercise_idx} in group {group_idx}")]
    InvalidSet {
        group_idx: usize,
        exercise_idx: usize,
        set_idx: usize,
    },
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;
    use chrono::DateTime;
    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};

    use crate::{Category, Exercise, ExerciseGroup, MuscleGroups, Name, Reps};

    use super::*;

    #[fixture]
    fn workout() -> Workout {
        Workout {
            id: 1.into(),
            name: Name::new("Treino A").unwrap(),
            category: Category::A,
            muscle_groups: MuscleGroups::default(),
            exercise_groups: vec![
                ExerciseGroup {
                    id: 1.into(),
                    technique: String::new(),
                    exercises: vec![Exercise {
                        id: 1.into(),
                        name: "Supino".to_string(),
                        sets: 2,
                        reps: Reps::new("8-12"),
                        load: 40.0,
                        rest: 60,
                    }],
                },
                ExerciseGroup {
                    id: 2.into(),
                    technique: "Bi-set".to_string(),
                    exercises: vec![
                        Exercise {
                            id: 2.into(),
                            name: "Rosca".to_string(),
                            sets: 1,
                            reps: Reps::new("falha"),
                            load: 10.0,
                            rest: 45,
                        },
                        Exercise {
                            id: 3.into(),
                            name: "Tríceps Corda".to_string(),
                            sets: 1,
                            reps: Reps::new("12"),
                            load: 15.0,
                            rest: 0,
                        },
                    ],
                },
            ],
            created_at: DateTime::default(),
        }
    }

    #[fixture]
    fn runner(workout: Workout) -> WorkoutRunner {
        let mut runner = WorkoutRunner::new(workout);
        runner.start().unwrap();
        runner
    }

    #[rstest]
    fn test_start(workout: Workout) {
        let mut runner = WorkoutRunner::new(workout);
        assert_eq!(runner.state(), RunnerState::Idle);
        assert_eq!(runner.toggle_set(0, 0, 0), Err(RunnerError::NotStarted));
        runner.start().unwrap();
        assert_eq!(runner.state(), RunnerState::InProgress);
        assert_eq!(runner.elapsed(), 0);
        assert!(runner.performed_exercises().is_empty());
        assert_eq!(runner.start(), Err(RunnerError::AlreadyStarted));
    }

    #[rstest]
    fn test_toggle_set_starts_rest(mut runner: WorkoutRunner) {
        let toggle = runner.toggle_set(0, 0, 0).unwrap();
        assert_eq!(
            toggle,
            SetToggle {
                done: true,
                rest: Some(RestRequest {
                    generation: 1,
                    seconds: 60
                })
            }
        );
        assert_eq!(
            runner.performed_exercises(),
            vec![PerformedExercise {
                exercise_id: 1.into(),
                name: "Supino".to_string(),
                sets: vec![PerformedSet { reps: 8, load: 40.0 }],
            }]
        );
        assert_eq!(runner.state(), RunnerState::InProgress);

        assert!(runner.begin_rest(toggle.rest.unwrap()));
        assert_eq!(runner.remaining_rest(), Some(60));

        runner.skip_rest().unwrap();
        assert_eq!(runner.state(), RunnerState::InProgress);
        assert_eq!(runner.remaining_rest(), None);
        assert_eq!(runner.skip_rest(), Err(RunnerError::NotResting));
    }

    #[rstest]
    fn test_rest_countdown(mut runner: WorkoutRunner) {
        let request = runner.toggle_set(1, 0, 0).unwrap().rest.unwrap();
        assert!(runner.begin_rest(request));
        for remaining in (1..45).rev() {
            assert_eq!(runner.tick_rest(request.generation), RestTick::Running(remaining));
        }
        assert_eq!(runner.tick_rest(request.generation), RestTick::Finished);
        assert_eq!(runner.state(), RunnerState::InProgress);
        assert_eq!(runner.tick_rest(request.generation), RestTick::Stale);
    }

    #[rstest]
    fn test_new_rest_supersedes_previous(mut runner: WorkoutRunner) {
        let first = runner.toggle_set(0, 0, 0).unwrap().rest.unwrap();
        assert!(runner.begin_rest(first));
        let second = runner.toggle_set(0, 0, 1).unwrap().rest.unwrap();
        assert_eq!(runner.state(), RunnerState::InProgress);
        assert_eq!(runner.tick_rest(first.generation), RestTick::Stale);
        assert!(!runner.begin_rest(first));
        assert!(runner.begin_rest(second));
        assert_eq!(runner.tick_rest(first.generation), RestTick::Stale);
        assert_eq!(runner.tick_rest(second.generation), RestTick::Running(59));
    }

    #[rstest]
    fn test_settle_superseded_before_rest(mut runner: WorkoutRunner) {
        let first = runner.toggle_set(0, 0, 0).unwrap().rest.unwrap();
        let second = runner.toggle_set(0, 0, 1).unwrap().rest.unwrap();
        assert!(!runner.begin_rest(first));
        assert!(runner.begin_rest(second));
    }

    #[rstest]
    fn test_zero_rest(mut runner: WorkoutRunner) {
        assert_eq!(
            runner.toggle_set(1, 1, 0),
            Ok(SetToggle {
                done: true,
                rest: None
            })
        );
    }

    #[rstest]
    fn test_uncheck_removes_set_from_log(mut runner: WorkoutRunner) {
        runner.toggle_set(0, 0, 0).unwrap();
        runner.toggle_set(0, 0, 1).unwrap();
        assert_eq!(runner.performed_exercises()[0].sets.len(), 2);

        let toggle = runner.toggle_set(0, 0, 1).unwrap();
        assert_eq!(
            toggle,
            SetToggle {
                done: false,
                rest: None
            }
        );
        assert_eq!(runner.performed_exercises()[0].sets.len(), 1);

        runner.toggle_set(0, 0, 0).unwrap();
        assert!(runner.performed_exercises().is_empty());
    }

    #[rstest]
    fn test_uncheck_keeps_rest(mut runner: WorkoutRunner) {
        let request = runner.toggle_set(0, 0, 0).unwrap().rest.unwrap();
        assert!(runner.begin_rest(request));
        runner.toggle_set(0, 0, 0).unwrap();
        assert_eq!(runner.remaining_rest(), Some(60));
    }

    #[rstest]
    fn test_log_in_completion_order(mut runner: WorkoutRunner) {
        runner.toggle_set(1, 1, 0).unwrap();
        runner.toggle_set(1, 0, 0).unwrap();
        runner.toggle_set(0, 0, 0).unwrap();
        assert_eq!(
            runner
                .performed_exercises()
                .iter()
                .map(|e| (e.name.as_str(), e.sets[0].reps))
                .collect::<Vec<_>>(),
            vec![("Tríceps Corda", 12), ("Rosca", 0), ("Supino", 8)]
        );
    }

    #[rstest]
    fn test_invalid_set(mut runner: WorkoutRunner) {
        assert_eq!(
            runner.toggle_set(0, 0, 2),
            Err(RunnerError::InvalidSet {
                group_idx: 0,
                exercise_idx: 0,
                set_idx: 2
            })
        );
        assert!(matches!(
            runner.toggle_set(2, 0, 0),
            Err(RunnerError::InvalidSet { .. })
        ));
        assert!(matches!(
            runner.toggle_set(0, 1, 0),
            Err(RunnerError::InvalidSet { .. })
        ));
    }

    #[rstest]
    fn test_progress(mut runner: WorkoutRunner) {
        assert_eq!(
            runner.progress(),
            Progress {
                completed: 0,
                total: 3
            }
        );
        runner.toggle_set(0, 0, 0).unwrap();
        assert_eq!(runner.progress().completed, 0);
        assert!(!runner.is_exercise_completed(0, 0));
        runner.toggle_set(0, 0, 1).unwrap();
        assert!(runner.is_exercise_completed(0, 0));
        assert_eq!(runner.progress().completed, 1);
        assert_approx_eq!(runner.progress().percentage(), 33.333, 1e-3);
        runner.toggle_set(1, 0, 0).unwrap();
        runner.toggle_set(1, 1, 0).unwrap();
        assert_eq!(
            runner.progress(),
            Progress {
                completed: 3,
                total: 3
            }
        );
        assert_approx_eq!(runner.progress().percentage(), 100.0);
    }

    #[rstest]
    fn test_progress_exercise_without_sets(mut workout: Workout) {
        workout.exercise_groups[0].exercises[0].sets = 0;
        let mut runner = WorkoutRunner::new(workout);
        runner.start().unwrap();

        assert_eq!(
            runner.progress(),
            Progress {
                completed: 0,
                total: 3
            }
        );
        assert!(!runner.is_exercise_completed(0, 0));

        runner.toggle_set(1, 0, 0).unwrap();
        runner.toggle_set(1, 1, 0).unwrap();
        assert_eq!(runner.progress().completed, 2);
        assert!(!runner.is_exercise_completed(0, 0));
    }

    #[test]
    fn test_progress_empty_workout() {
        let progress = Progress {
            completed: 0,
            total: 0,
        };
        assert_approx_eq!(progress.percentage(), 0.0);
    }

    #[rstest]
    fn test_elapsed(mut runner: WorkoutRunner) {
        runner.tick_elapsed();
        let request = runner.toggle_set(0, 0, 0).unwrap().rest.unwrap();
        runner.begin_rest(request);
        runner.tick_elapsed();
        runner.tick_rest(request.generation);
        runner.tick_elapsed();
        assert_eq!(runner.elapsed(), 3);
    }

    #[rstest]
    fn test_finish(mut runner: WorkoutRunner) {
        let now = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        for _ in 0..90 {
            runner.tick_elapsed();
        }
        runner.toggle_set(0, 0, 0).unwrap();
        let request = runner.toggle_set(1, 0, 0).unwrap().rest.unwrap();
        runner.begin_rest(request);

        let session = runner.finish(now).unwrap();

        assert_eq!(runner.state(), RunnerState::Finished);
        assert_eq!(session.workout_id, 1.into());
        assert_eq!(session.workout_name, "Treino A");
        assert_eq!(session.date, now);
        assert_eq!(session.duration, 90);
        assert_eq!(session.total_sets(), 2);
        assert_eq!(runner.tick_rest(request.generation), RestTick::Stale);

        runner.tick_elapsed();
        assert_eq!(runner.elapsed(), 90);
        assert_eq!(runner.toggle_set(0, 0, 1), Err(RunnerError::Finished));
        assert_eq!(runner.finish(now), Err(RunnerError::Finished));
    }
}
