use std::collections::{BTreeMap, BTreeSet, HashMap};

use chrono::{Duration, NaiveDate};

use crate::{Session, Workout, WorkoutID};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    pub first: NaiveDate,
    pub last: NaiveDate,
}

impl Interval {
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.first <= date && date <= self.last
    }
}

impl From<std::ops::RangeInclusive<NaiveDate>> for Interval {
    fn from(value: std::ops::RangeInclusive<NaiveDate>) -> Self {
        Interval {
            first: *value.start(),
            last: *value.end(),
        }
    }
}

/// Number of consecutive training days ending today or yesterday.
///
/// Days after `today` are ignored, so imported sessions with a future date neither anchor nor
/// extend the streak.
#[must_use]
pub fn current_streak(days: impl IntoIterator<Item = NaiveDate>, today: NaiveDate) -> u32 {
    let days = days
        .into_iter()
        .filter(|d| *d <= today)
        .collect::<BTreeSet<_>>();

    let mut days = days.into_iter().rev();

    let Some(mut previous) = days.next() else {
        return 0;
    };

    if previous != today && previous != today - Duration::days(1) {
        return 0;
    }

    let mut streak = 1;

    for day in days {
        if day != previous - Duration::days(1) {
            break;
        }
        streak += 1;
        previous = day;
    }

    streak
}

/// Number of sessions per muscle group tag of the performed workout.
///
/// Sessions of deleted workouts are skipped.
#[must_use]
pub fn muscle_frequency(sessions: &[Session], workouts: &[Workout]) -> BTreeMap<String, u32> {
    let workouts = workouts
        .iter()
        .map(|w| (w.id, w))
        .collect::<HashMap<WorkoutID, &Workout>>();
    let mut frequency = BTreeMap::new();

    for session in sessions {
        let Some(workout) = workouts.get(&session.workout_id) else {
            continue;
        };
        for tag in workout.muscle_groups.iter() {
            *frequency.entry(tag.to_string()).or_insert(0) += 1;
        }
    }

    frequency
}
