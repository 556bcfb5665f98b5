use log::debug;
use reisfit_domain as domain;

/// Screens reachable through the bottom navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Dashboard,
    Workouts,
    History,
    Settings,
}

impl Tab {
    #[must_use]
    pub fn iter() -> std::slice::Iter<'static, Tab> {
        static TABS: [Tab; 4] = [Tab::Dashboard, Tab::Workouts, Tab::History, Tab::Settings];
        TABS.iter()
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Tab::Dashboard => "Início",
            Tab::Workouts => "Treinos",
            Tab::History => "Histórico",
            Tab::Settings => "Ajustes",
        }
    }
}

/// The single active screen of the application.
#[derive(Debug, Default, Clone, PartialEq)]
pub enum Screen {
    #[default]
    Dashboard,
    WorkoutList,
    /// Editing an existing workout or creating a new one.
    Editor(Option<domain::Workout>),
    Runner(domain::Workout),
    Summary(domain::Session),
    History,
    Settings,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Navigate(Tab),
    NewWorkout,
    EditWorkout(domain::Workout),
    WorkoutSaved,
    CancelEdit,
    StartWorkout(domain::Workout),
    WorkoutFinished(domain::Session),
    CloseSummary,
}

impl From<Tab> for Screen {
    fn from(value: Tab) -> Self {
        match value {
            Tab::Dashboard => Screen::Dashboard,
            Tab::Workouts => Screen::WorkoutList,
            Tab::History => Screen::History,
            Tab::Settings => Screen::Settings,
        }
    }
}

impl Screen {
    /// Apply an event to the current screen.
    ///
    /// Events that make no sense on the current screen leave it unchanged.
    #[must_use]
    pub fn update(self, event: Event) -> Screen {
        match (self, event) {
            (_, Event::Navigate(tab)) => Screen::from(tab),
            (Screen::WorkoutList, Event::NewWorkout) => Screen::Editor(None),
            (Screen::WorkoutList, Event::EditWorkout(workout)) => Screen::Editor(Some(workout)),
            (Screen::Editor(_), Event::WorkoutSaved | Event::CancelEdit) => Screen::WorkoutList,
            (Screen::Dashboard | Screen::WorkoutList, Event::StartWorkout(workout)) => {
                Screen::Runner(workout)
            }
            (Screen::Runner(_), Event::WorkoutFinished(session)) => Screen::Summary(session),
            (Screen::Summary(_), Event::CloseSummary) => Screen::Dashboard,
            (screen, event) => {
                debug!("ignoring {event:?} on {screen:?}");
                screen
            }
        }
    }

    /// Tab highlighted in the bottom navigation.
    #[must_use]
    pub fn tab(&self) -> Option<Tab> {
        match self {
            Screen::Dashboard => Some(Tab::Dashboard),
            Screen::WorkoutList => Some(Tab::Workouts),
            Screen::History => Some(Tab::History),
            Screen::Settings => Some(Tab::Settings),
            Screen::Editor(_) | Screen::Runner(_) | Screen::Summary(_) => None,
        }
    }

    #[must_use]
    pub fn show_bottom_nav(&self) -> bool {
        self.tab().is_some()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};

    use super::*;

    #[fixture]
    fn workout() -> domain::Workout {
        domain::Workout {
            id: 1.into(),
            name: domain::Name::new("Treino A").unwrap(),
            category: domain::Category::A,
            muscle_groups: ["Peito"].into_iter().collect(),
            exercise_groups: vec![],
            created_at: Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap(),
        }
    }

    #[fixture]
    fn session() -> domain::Session {
        domain::Session {
            id: 1.into(),
            workout_id: 1.into(),
            workout_name: "Treino A".to_string(),
            date: Utc.with_ymd_and_hms(2024, 2, 1, 18, 30, 0).unwrap(),
            duration: 60,
            performed_exercises: vec![],
        }
    }

    #[rstest]
    #[case(Tab::Dashboard, Screen::Dashboard)]
    #[case(Tab::Workouts, Screen::WorkoutList)]
    #[case(Tab::History, Screen::History)]
    #[case(Tab::Settings, Screen::Settings)]
    fn test_navigate(#[case] tab: Tab, #[case] expected: Screen) {
        assert_eq!(Screen::Settings.update(Event::Navigate(tab)), expected);
        assert_eq!(expected.tab(), Some(tab));
    }

    #[rstest]
    fn test_edit_workout(workout: domain::Workout) {
        let screen = Screen::WorkoutList.update(Event::EditWorkout(workout.clone()));
        assert_eq!(screen, Screen::Editor(Some(workout)));
        assert_eq!(screen.update(Event::CancelEdit), Screen::WorkoutList);
    }

    #[test]
    fn test_new_workout() {
        let screen = Screen::WorkoutList.update(Event::NewWorkout);
        assert_eq!(screen, Screen::Editor(None));
        assert_eq!(screen.update(Event::WorkoutSaved), Screen::WorkoutList);
    }

    #[rstest]
    fn test_run_workout(workout: domain::Workout, session: domain::Session) {
        let screen = Screen::Dashboard.update(Event::StartWorkout(workout.clone()));
        assert_eq!(screen, Screen::Runner(workout));
        let screen = screen.update(Event::WorkoutFinished(session.clone()));
        assert_eq!(screen, Screen::Summary(session));
        assert_eq!(screen.update(Event::CloseSummary), Screen::Dashboard);
    }

    #[rstest]
    fn test_ignored_events(workout: domain::Workout, session: domain::Session) {
        assert_eq!(
            Screen::History.update(Event::WorkoutFinished(session)),
            Screen::History
        );
        assert_eq!(Screen::Dashboard.update(Event::CloseSummary), Screen::Dashboard);
        assert_eq!(
            Screen::Runner(workout.clone()).update(Event::NewWorkout),
            Screen::Runner(workout)
        );
    }

    #[rstest]
    fn test_show_bottom_nav(workout: domain::Workout, session: domain::Session) {
        for tab in Tab::iter() {
            assert!(Screen::from(*tab).show_bottom_nav());
        }
        assert!(!Screen::Editor(None).show_bottom_nav());
        assert!(!Screen::Runner(workout).show_bottom_nav());
        assert!(!Screen::Summary(session).show_bottom_nav());
    }
}
