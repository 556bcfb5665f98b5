use chrono::NaiveDate;
use reisfit_domain::{self as domain, SessionRepository};

/// Statistics shown after finishing a workout.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub session: domain::Session,
    pub duration: String,
    pub total_sets: usize,
    pub total_reps: u32,
    pub max_load: f32,
    pub streak: u32,
}

impl Summary {
    pub async fn load<R: SessionRepository>(
        service: &domain::Service<R>,
        session: domain::Session,
        today: NaiveDate,
    ) -> Result<Self, domain::ReadError> {
        let streak = service.get_streak(today).await?;
        Ok(Self::new(session, streak))
    }

    #[must_use]
    pub fn new(session: domain::Session, streak: u32) -> Self {
        Self {
            duration: domain::format_duration(session.duration),
            total_sets: session.total_sets(),
            total_reps: session.total_reps(),
            max_load: session.max_load(),
            streak,
            session,
        }
    }
}
