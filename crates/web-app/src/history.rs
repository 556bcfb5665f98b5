use std::collections::BTreeMap;

use reisfit_domain::{
    self as domain, SessionRepository, SessionService, WorkoutRepository, WorkoutService,
};

#[derive(Debug, Clone, PartialEq)]
pub struct History {
    pub sessions: Vec<domain::Session>,
    pub workouts: Vec<domain::Workout>,
    pub muscle_frequency: BTreeMap<String, u32>,
    pub muscle_map: domain::MuscleMap,
    expanded: Option<domain::SessionID>,
}

impl History {
    /// Load sessions and workouts concurrently.
    pub async fn load<R>(service: &domain::Service<R>) -> Result<Self, domain::ReadError>
    where
        R: SessionRepository + WorkoutRepository,
    {
        let (sessions, workouts) =
            futures_util::join!(service.get_sessions(), service.get_workouts());
        Ok(Self::new(sessions?, workouts?))
    }

    #[must_use]
    pub fn new(sessions: Vec<domain::Session>, workouts: Vec<domain::Workout>) -> Self {
        let muscle_frequency = domain::muscle_frequency(&sessions, &workouts);
        let muscle_map = domain::MuscleMap::new(&muscle_frequency);
        Self {
            sessions,
            workouts,
            muscle_frequency,
            muscle_map,
            expanded: None,
        }
    }

    /// Show the details of a session, or hide them if they are already shown.
    pub fn toggle_details(&mut self, id: domain::SessionID) {
        self.expanded = if self.expanded == Some(id) {
            None
        } else {
            Some(id)
        };
    }

    #[must_use]
    pub fn is_expanded(&self, id: domain::SessionID) -> bool {
        self.expanded == Some(id)
    }
}

/// Date and duration of a session, e.g. "01/02/2024 • 52:05".
#[must_use]
pub fn session_subtitle(session: &domain::Session) -> String {
    format!(
        "{} • {}",
        session.local_date().format("%d/%m/%Y"),
        domain::format_duration(session.duration)
    )
}

#[must_use]
pub fn set_label(set: &domain::PerformedSet) -> String {
    format!("{} reps @ {}kg", set.reps, set.load)
}
