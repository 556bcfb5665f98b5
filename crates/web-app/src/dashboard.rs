use std::collections::BTreeSet;

use chrono::NaiveDate;
use log::error;
use reisfit_domain::{
    self as domain, ProfileRepository, ProfileService, SessionRepository, SessionService,
    WorkoutRepository, WorkoutService,
};

/// Name used in the greeting if no profile exists.
pub const DEFAULT_NAME: &str = "Atleta";

#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    pub profile: Option<domain::UserProfile>,
    pub workouts: Vec<domain::Workout>,
    pub sessions: Vec<domain::Session>,
    pub streak: u32,
    pub month: domain::Month,
    pub today: NaiveDate,
}

impl Dashboard {
    /// Load profile, workouts, sessions and streak concurrently.
    pub async fn load<R>(
        service: &domain::Service<R>,
        today: NaiveDate,
    ) -> Result<Self, domain::ReadError>
    where
        R: ProfileRepository + WorkoutRepository + SessionRepository,
    {
        let (profile, workouts, sessions, streak) = futures_util::join!(
            service.get_profile(),
            service.get_workouts(),
            service.get_sessions(),
            service.get_streak(today),
        );
        Ok(Self {
            profile: profile?,
            workouts: workouts?,
            sessions: sessions?,
            streak: streak?,
            month: domain::Month::of(today),
            today,
        })
    }

    #[must_use]
    pub fn greeting(&self) -> String {
        let name = self
            .profile
            .as_ref()
            .map_or_else(|| DEFAULT_NAME.to_string(), |p| p.name.to_string());
        format!("Olá, {name}!")
    }

    #[must_use]
    pub fn quick_start(&self) -> Option<&domain::Workout> {
        self.workouts.first()
    }

    /// Workout preselected when logging a past session.
    #[must_use]
    pub fn default_retroactive_workout(&self) -> Option<domain::WorkoutID> {
        self.workouts.first().map(|w| w.id)
    }

    #[must_use]
    pub fn trained_days(&self) -> BTreeSet<NaiveDate> {
        self.sessions
            .iter()
            .map(domain::Session::local_date)
            .collect()
    }

    #[must_use]
    pub fn calendar(&self) -> Vec<domain::CalendarCell> {
        domain::month_grid(self.month, &self.trained_days(), self.today)
    }

    pub fn show_previous_month(&mut self) {
        self.month = self.month.previous();
    }

    pub fn show_next_month(&mut self) {
        self.month = self.month.next();
    }

    /// Log a past session and reload the dashboard.
    ///
    /// If the reload fails, the stored session is added to the loaded data instead.
    pub async fn log_past_session<R>(
        &mut self,
        service: &domain::Service<R>,
        workout_id: domain::WorkoutID,
        date: NaiveDate,
    ) -> Result<domain::Session, domain::CreateError>
    where
        R: ProfileRepository + WorkoutRepository + SessionRepository,
    {
        let session = service
            .log_past_session(workout_id, date, self.today)
            .await?;
        match Self::load(service, self.today).await {
            Ok(dashboard) => {
                *self = Self {
                    month: self.month,
                    ..dashboard
                };
            }
            Err(err) => {
                error!("failed to reload dashboard: {err}");
                self.add_session(session.clone());
            }
        }
        Ok(session)
    }

    fn add_session(&mut self, session: domain::Session) {
        let idx = self.sessions.partition_point(|s| s.date > session.date);
        self.sessions.insert(idx, session);
        self.streak = domain::current_streak(self.trained_days(), self.today);
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::Cell, rc::Rc};

    use chrono::{Duration, Local, TimeZone};
    use pretty_assertions::assert_eq;
    use reisfit_storage::memory::Memory;

    use crate::tests::data::{PROFILE, SESSION, WORKOUT, WORKOUT_2, service, snapshot};

    use super::*;

    fn today() -> NaiveDate {
        SESSION.local_date() + Duration::days(1)
    }

    #[tokio::test]
    async fn test_load() {
        let service = service(snapshot());
        let dashboard = Dashboard::load(&service, today()).await.unwrap();

        assert_eq!(dashboard.profile, Some(PROFILE.clone()));
        assert_eq!(dashboard.workouts, vec![WORKOUT.clone(), WORKOUT_2.clone()]);
        assert_eq!(dashboard.sessions, vec![SESSION.clone()]);
        assert_eq!(dashboard.streak, 1);
        assert_eq!(dashboard.greeting(), "Olá, Maria!");
        assert_eq!(dashboard.quick_start(), Some(&*WORKOUT));
        assert_eq!(dashboard.default_retroactive_workout(), Some(WORKOUT.id));
        assert_eq!(dashboard.month, domain::Month::of(today()));
    }

    #[tokio::test]
    async fn test_load_empty() {
        let service = service(domain::Snapshot::default());
        let dashboard = Dashboard::load(&service, today()).await.unwrap();

        assert_eq!(dashboard.greeting(), "Olá, Atleta!");
        assert_eq!(dashboard.quick_start(), None);
        assert_eq!(dashboard.default_retroactive_workout(), None);
        assert_eq!(dashboard.streak, 0);
    }

    #[tokio::test]
    async fn test_load_failure() {
        let memory = Memory::new(snapshot());
        memory.set_unavailable(true);
        let service = domain::Service::new(memory);
        assert!(matches!(
            Dashboard::load(&service, today()).await,
            Err(domain::ReadError::Storage(
                domain::StorageError::Unavailable
            ))
        ));
    }

    #[tokio::test]
    async fn test_calendar() {
        let service = service(snapshot());
        let dashboard = Dashboard::load(&service, today()).await.unwrap();
        let days = dashboard
            .calendar()
            .into_iter()
            .filter_map(|cell| match cell {
                domain::CalendarCell::Day(day) => Some(day),
                domain::CalendarCell::Blank => None,
            })
            .collect::<Vec<_>>();

        assert_eq!(
            days.iter()
                .filter(|d| d.trained)
                .map(|d| d.date)
                .collect::<Vec<_>>(),
            vec![SESSION.local_date()]
        );
        assert_eq!(
            days.iter().filter(|d| d.today).map(|d| d.date).collect::<Vec<_>>(),
            vec![today()]
        );
    }

    #[tokio::test]
    async fn test_month_navigation() {
        let service = service(snapshot());
        let mut dashboard = Dashboard::load(&service, today()).await.unwrap();
        dashboard.show_previous_month();
        assert_eq!(dashboard.month, domain::Month::of(today()).previous());
        dashboard.show_next_month();
        dashboard.show_next_month();
        assert_eq!(dashboard.month, domain::Month::of(today()).next());
    }

    #[tokio::test]
    async fn test_log_past_session() {
        let service = service(snapshot());
        let mut dashboard = Dashboard::load(&service, today()).await.unwrap();
        dashboard.show_previous_month();

        let session = dashboard
            .log_past_session(&service, WORKOUT_2.id, today())
            .await
            .unwrap();

        assert_eq!(session.workout_id, WORKOUT_2.id);
        assert_eq!(session.local_date(), today());
        assert_eq!(
            session.date,
            Local
                .from_local_datetime(&today().and_hms_opt(12, 0, 0).unwrap())
                .unwrap()
                .to_utc()
        );
        assert_eq!(dashboard.sessions.len(), 2);
        assert_eq!(dashboard.streak, 2);
        assert_eq!(dashboard.month, domain::Month::of(today()).previous());
    }

    #[tokio::test]
    async fn test_log_past_session_reload_failure() {
        let repository = FailingReloads::new(snapshot());
        let service = domain::Service::new(repository.clone());
        let mut dashboard = Dashboard::load(&service, today()).await.unwrap();

        let session = dashboard
            .log_past_session(&service, WORKOUT.id, today())
            .await
            .unwrap();

        assert!(repository.memory.read_sessions().await.unwrap().contains(&session));
        assert_eq!(dashboard.sessions, vec![session, SESSION.clone()]);
        assert_eq!(dashboard.streak, 2);
    }

    /// Fails all reads once a session was created.
    #[derive(Clone)]
    struct FailingReloads {
        memory: Memory,
        session_created: Rc<Cell<bool>>,
    }

    impl FailingReloads {
        fn new(snapshot: domain::Snapshot) -> Self {
            Self {
                memory: Memory::new(snapshot),
                session_created: Rc::new(Cell::new(false)),
            }
        }

        fn check(&self) -> Result<(), domain::ReadError> {
            if self.session_created.get() {
                return Err(domain::StorageError::Unavailable.into());
            }
            Ok(())
        }
    }

    impl ProfileRepository for FailingReloads {
        async fn read_profile(&self) -> Result<Option<domain::UserProfile>, domain::ReadError> {
            self.check()?;
            self.memory.read_profile().await
        }

        async fn replace_profile(
            &self,
            profile: domain::UserProfile,
        ) -> Result<domain::UserProfile, domain::UpdateError> {
            self.memory.replace_profile(profile).await
        }
    }

    impl WorkoutRepository for FailingReloads {
        async fn read_workouts(&self) -> Result<Vec<domain::Workout>, domain::ReadError> {
            self.check()?;
            self.memory.read_workouts().await
        }

        async fn read_workout(
            &self,
            id: domain::WorkoutID,
        ) -> Result<domain::Workout, domain::ReadError> {
            self.check()?;
            self.memory.read_workout(id).await
        }

        async fn create_workout(
            &self,
            workout: domain::Workout,
        ) -> Result<domain::Workout, domain::CreateError> {
            self.memory.create_workout(workout).await
        }

        async fn replace_workout(
            &self,
            workout: domain::Workout,
        ) -> Result<domain::Workout, domain::UpdateError> {
            self.memory.replace_workout(workout).await
        }

        async fn delete_workout(
            &self,
            id: domain::WorkoutID,
        ) -> Result<domain::WorkoutID, domain::DeleteError> {
            self.memory.delete_workout(id).await
        }
    }

    impl SessionRepository for FailingReloads {
        async fn read_sessions(&self) -> Result<Vec<domain::Session>, domain::ReadError> {
            self.check()?;
            self.memory.read_sessions().await
        }

        async fn create_session(
            &self,
            session: domain::Session,
        ) -> Result<domain::Session, domain::CreateError> {
            let session = self.memory.create_session(session).await?;
            self.session_created.set(true);
            Ok(session)
        }
    }

    impl domain::BackupRepository for FailingReloads {
        async fn export_all(&self) -> Result<domain::Snapshot, domain::ReadError> {
            self.check()?;
            domain::BackupRepository::export_all(&self.memory).await
        }

        async fn import_all(&self, snapshot: domain::Snapshot) -> Result<(), domain::UpdateError> {
            domain::BackupRepository::import_all(&self.memory, snapshot).await
        }
    }

    #[tokio::test]
    async fn test_log_past_session_in_future() {
        let service = service(snapshot());
        let mut dashboard = Dashboard::load(&service, today()).await.unwrap();
        assert!(matches!(
            dashboard
                .log_past_session(&service, WORKOUT.id, today() + Duration::days(1))
                .await,
            Err(domain::CreateError::Other(_))
        ));
        assert_eq!(dashboard.sessions.len(), 1);
    }
}
