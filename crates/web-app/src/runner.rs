use std::{
    cell::{Ref, RefCell},
    future::Future,
    rc::{Rc, Weak},
};

use chrono::Utc;
use gloo_timers::future::TimeoutFuture;
use log::error;
use reisfit_domain::{self as domain, SessionRepository, SessionService};
use wasm_bindgen_futures::spawn_local;

use crate::{Settings, service_worker, settings};

const TICK_MS: u32 = 1000;

/// Drives a workout runner with timers.
///
/// The elapsed time and the rest countdown are advanced every second. Both timers stop when the
/// session is finished or the driver is dropped.
pub struct RunnerDriver {
    runner: Rc<RefCell<domain::WorkoutRunner>>,
    settings: Settings,
    on_change: Rc<dyn Fn()>,
    on_finish: Box<dyn Fn(domain::Session)>,
    unsaved: RefCell<Option<domain::Session>>,
}

impl RunnerDriver {
    pub fn start(
        workout: domain::Workout,
        settings: Settings,
        on_change: impl Fn() + 'static,
        on_finish: impl Fn(domain::Session) + 'static,
    ) -> Result<Self, domain::RunnerError> {
        let mut runner = domain::WorkoutRunner::new(workout);
        runner.start()?;
        let driver = Self {
            runner: Rc::new(RefCell::new(runner)),
            settings,
            on_change: Rc::new(on_change),
            on_finish: Box::new(on_finish),
            unsaved: RefCell::new(None),
        };
        spawn_local(count_elapsed(
            Rc::downgrade(&driver.runner),
            TimeoutFuture::new,
            driver.on_change.clone(),
        ));
        Ok(driver)
    }

    #[must_use]
    pub fn runner(&self) -> Ref<'_, domain::WorkoutRunner> {
        self.runner.borrow()
    }

    pub fn toggle_set(
        &self,
        group_idx: usize,
        exercise_idx: usize,
        set_idx: usize,
    ) -> Result<domain::SetToggle, domain::RunnerError> {
        let toggle = self
            .runner
            .borrow_mut()
            .toggle_set(group_idx, exercise_idx, set_idx)?;
        if let Some(request) = toggle.rest {
            let settings = self.settings;
            let workout_name = self.runner.borrow().workout().name.to_string();
            spawn_local(count_down_rest(
                Rc::downgrade(&self.runner),
                request,
                TimeoutFuture::new,
                self.on_change.clone(),
                move || alert_rest_finished(settings, &workout_name),
            ));
        }
        (self.on_change)();
        Ok(toggle)
    }

    pub fn skip_rest(&self) -> Result<(), domain::RunnerError> {
        self.runner.borrow_mut().skip_rest()?;
        (self.on_change)();
        Ok(())
    }

    /// Stop the timers, store the session and pass it to the finish callback.
    ///
    /// If storing fails, the session is kept and can be stored by calling this method again.
    pub async fn finish<R: SessionRepository>(
        &self,
        service: &domain::Service<R>,
    ) -> Result<(), FinishError> {
        let unsaved = self.unsaved.borrow_mut().take();
        let session = match unsaved {
            Some(session) => session,
            None => self.runner.borrow_mut().finish(Utc::now())?,
        };
        match service.create_session(session.clone()).await {
            Ok(session) => {
                if self.settings.notifications {
                    post(&service_worker::Message::CloseNotifications);
                }
                (self.on_finish)(session);
                Ok(())
            }
            Err(err) => {
                *self.unsaved.borrow_mut() = Some(session);
                Err(err.into())
            }
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum FinishError {
    #[error(transparent)]
    Runner(#[from] domain::RunnerError),
    #[error(transparent)]
    Create(#[from] domain::CreateError),
}

/// Advance the elapsed time every tick until the session is finished or dropped.
pub async fn count_elapsed<S, F>(
    runner: Weak<RefCell<domain::WorkoutRunner>>,
    sleep: S,
    on_change: Rc<dyn Fn()>,
) where
    S: Fn(u32) -> F,
    F: Future<Output = ()>,
{
    loop {
        sleep(TICK_MS).await;
        let Some(runner) = runner.upgrade() else {
            return;
        };
        {
            let mut runner = runner.borrow_mut();
            if runner.state() == domain::RunnerState::Finished {
                return;
            }
            runner.tick_elapsed();
        }
        on_change();
    }
}

/// Run a requested rest countdown after the settle delay.
///
/// The countdown ends silently if it is superseded by another one, skipped or the session ends.
pub async fn count_down_rest<S, F>(
    runner: Weak<RefCell<domain::WorkoutRunner>>,
    request: domain::RestRequest,
    sleep: S,
    on_change: Rc<dyn Fn()>,
    on_finished: impl FnOnce(),
) where
    S: Fn(u32) -> F,
    F: Future<Output = ()>,
{
    sleep(domain::REST_SETTLE_DELAY_MS).await;
    {
        let Some(runner) = runner.upgrade() else {
            return;
        };
        if !runner.borrow_mut().begin_rest(request) {
            return;
        }
    }
    on_change();

    loop {
        sleep(TICK_MS).await;
        let Some(runner) = runner.upgrade() else {
            return;
        };
        let tick = runner.borrow_mut().tick_rest(request.generation);
        match tick {
            domain::RestTick::Running(_) => on_change(),
            domain::RestTick::Finished => {
                on_finished();
                on_change();
                return;
            }
            domain::RestTick::Stale => return,
        }
    }
}

fn alert_rest_finished(settings: Settings, workout_name: &str) {
    if settings.vibration {
        settings::vibrate(settings::VIBRATION_MS);
    }
    if settings.notifications {
        post(&service_worker::Message::rest_finished(workout_name));
    }
}

fn post(message: &service_worker::Message) {
    if let Err(err) = service_worker::post(message) {
        error!("{err}");
    }
}
