use indexed_db_futures::{
    DeserialiseFromJs, KeyPath, SerialiseToJs, database::Database, error::OpenDbError, prelude::*,
    primitive::TryToJs, transaction::TransactionMode,
};
use log::debug;
use reisfit_domain as domain;
use strum::AsRefStr;

use crate::record::{Session, UserProfile, Workout};

const DB_NAME: &str = "ReisFitDB";
const DB_VERSION: u8 = 1;

#[derive(Clone)]
pub struct IndexedDB;

impl IndexedDB {
    async fn open(&self) -> Result<Database, OpenDbError> {
        Database::open(DB_NAME)
            .with_version(DB_VERSION)
            .with_on_blocked(|event| {
                debug!("upgrade of database blocked: {event:?}");
                Ok(())
            })
            .with_on_upgrade_needed(|event, db| {
                #[allow(clippy::single_match)]
                match (event.old_version(), event.new_version()) {
                    (0.0, Some(1.0)) => {
                        db.create_object_store(Store::User)
                            .with_key_path(KeyPath::One("id"))
                            .build()?;
                        db.create_object_store(Store::Workouts)
                            .with_key_path(KeyPath::One("id"))
                            .build()?;
                        db.create_object_store(Store::Sessions)
                            .with_key_path(KeyPath::One("id"))
                            .build()?;
                    }
                    _ => {}
                }
                Ok(())
            })
            .await
    }

    async fn get<K, R, V>(
        &self,
        object_store: Store,
        key: K,
    ) -> Result<Option<R>, Box<dyn std::error::Error>>
    where
        K: serde::Serialize + TryToJs,
        R: TryFrom<V>,
        V: for<'de> serde::Deserialize<'de>,
        <R as TryFrom<V>>::Error: std::error::Error,
    {
        let db = self.open().await?;
        let transaction = db
            .transaction(object_store.as_ref())
            .with_mode(TransactionMode::Readonly)
            .build()?;
        let store = transaction.object_store(object_store.as_ref())?;
        let value: Option<V> = store.get(key).serde()?.await?;
        Ok(value
            .map(|v| {
                R::try_from(v).map_err(|err| {
                    IndexedDBError::Other(anyhow::anyhow!(
                        "invalid {} record: {err}",
                        object_store.as_ref()
                    ))
                })
            })
            .transpose()?)
    }

    async fn get_all<R, V>(
        &self,
        object_store: Store,
    ) -> Result<Vec<R>, Box<dyn std::error::Error>>
    where
        R: TryFrom<V>,
        V: DeserialiseFromJs,
        <R as TryFrom<V>>::Error: std::error::Error,
    {
        let db = self.open().await?;
        let transaction = db
            .transaction(object_store.as_ref())
            .with_mode(TransactionMode::Readonly)
            .build()?;
        let store = transaction.object_store(object_store.as_ref())?;
        let mut r = vec![];
        for e in store.get_all().serde()?.await? {
            r.push(R::try_from(e?).map_err(|err| {
                IndexedDBError::Other(anyhow::anyhow!(
                    "invalid {} record: {err}",
                    object_store.as_ref()
                ))
            })?);
        }
        Ok(r)
    }

    async fn add<V: serde::Serialize, R>(
        &self,
        object_store: Store,
        value: V,
        result: R,
    ) -> Result<R, Box<dyn std::error::Error>> {
        let db = self.open().await?;
        let transaction = db
            .transaction(object_store.as_ref())
            .with_mode(TransactionMode::Readwrite)
            .build()?;
        let store = transaction.object_store(object_store.as_ref())?;
        store.add(value).serde()?.await?;
        transaction.commit().await?;
        Ok(result)
    }

    async fn put<V: serde::Serialize, R>(
        &self,
        object_store: Store,
        value: V,
        result: R,
    ) -> Result<R, Box<dyn std::error::Error>> {
        let db = self.open().await?;
        let transaction = db
            .transaction(object_store.as_ref())
            .with_mode(TransactionMode::Readwrite)
            .build()?;
        let store = transaction.object_store(object_store.as_ref())?;
        store.put(value).serde()?.await?;
        transaction.commit().await?;
        Ok(result)
    }

    async fn delete<K: serde::Serialize + SerialiseToJs + TryToJs, R>(
        &self,
        object_store: Store,
        key: K,
        result: R,
    ) -> Result<R, Box<dyn std::error::Error>> {
        let db = self.open().await?;
        let transaction = db
            .transaction(object_store.as_ref())
            .with_mode(TransactionMode::Readwrite)
            .build()?;
        let store = transaction.object_store(object_store.as_ref())?;
        store.delete(key).serde()?.await?;
        transaction.commit().await?;
        Ok(result)
    }

    /// Clear and repopulate all stores in a single transaction.
    async fn replace_all(
        &self,
        snapshot: &domain::Snapshot,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let db = self.open().await?;
        let transaction = db
            .transaction([
                Store::User.as_ref(),
                Store::Workouts.as_ref(),
                Store::Sessions.as_ref(),
            ])
            .with_mode(TransactionMode::Readwrite)
            .build()?;

        let user = transaction.object_store(Store::User.as_ref())?;
        let workouts = transaction.object_store(Store::Workouts.as_ref())?;
        let sessions = transaction.object_store(Store::Sessions.as_ref())?;

        user.clear()?.await?;
        workouts.clear()?.await?;
        sessions.clear()?.await?;

        if let Some(profile) = &snapshot.profile {
            user.put(UserProfile::from(profile)).serde()?.await?;
        }
        for workout in &snapshot.workouts {
            workouts.put(Workout::from(workout)).serde()?.await?;
        }
        for session in &snapshot.sessions {
            sessions.put(Session::from(session)).serde()?.await?;
        }

        transaction.commit().await?;
        Ok(())
    }
}

impl domain::ProfileRepository for IndexedDB {
    async fn read_profile(&self) -> Result<Option<domain::UserProfile>, domain::ReadError> {
        Ok(IndexedDB
            .get_all::<domain::UserProfile, UserProfile>(Store::User)
            .await?
            .pop())
    }

    async fn replace_profile(
        &self,
        profile: domain::UserProfile,
    ) -> Result<domain::UserProfile, domain::UpdateError> {
        Ok(IndexedDB
            .put(Store::User, UserProfile::from(&profile), profile)
            .await?)
    }
}

impl domain::WorkoutRepository for IndexedDB {
    async fn read_workouts(&self) -> Result<Vec<domain::Workout>, domain::ReadError> {
        let mut workouts = IndexedDB
            .get_all::<domain::Workout, Workout>(Store::Workouts)
            .await?;
        workouts.sort_by_key(|w| w.created_at);
        Ok(workouts)
    }

    async fn read_workout(
        &self,
        id: domain::WorkoutID,
    ) -> Result<domain::Workout, domain::ReadError> {
        IndexedDB
            .get::<_, domain::Workout, Workout>(Store::Workouts, id.to_string())
            .await?
            .ok_or(domain::ReadError::NotFound)
    }

    async fn create_workout(
        &self,
        workout: domain::Workout,
    ) -> Result<domain::Workout, domain::CreateError> {
        Ok(IndexedDB
            .add(Store::Workouts, Workout::from(&workout), workout)
            .await?)
    }

    async fn replace_workout(
        &self,
        workout: domain::Workout,
    ) -> Result<domain::Workout, domain::UpdateError> {
        Ok(IndexedDB
            .put(Store::Workouts, Workout::from(&workout), workout)
            .await?)
    }

    async fn delete_workout(
        &self,
        id: domain::WorkoutID,
    ) -> Result<domain::WorkoutID, domain::DeleteError> {
        Ok(IndexedDB
            .delete(Store::Workouts, id.to_string(), id)
            .await?)
    }
}

impl domain::SessionRepository for IndexedDB {
    async fn read_sessions(&self) -> Result<Vec<domain::Session>, domain::ReadError> {
        let mut sessions = IndexedDB
            .get_all::<domain::Session, Session>(Store::Sessions)
            .await?;
        sessions.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(sessions)
    }

    async fn create_session(
        &self,
        session: domain::Session,
    ) -> Result<domain::Session, domain::CreateError> {
        Ok(IndexedDB
            .add(Store::Sessions, Session::from(&session), session)
            .await?)
    }
}

impl domain::BackupRepository for IndexedDB {
    async fn export_all(&self) -> Result<domain::Snapshot, domain::ReadError> {
        Ok(domain::Snapshot {
            profile: domain::ProfileRepository::read_profile(self).await?,
            workouts: IndexedDB
                .get_all::<domain::Workout, Workout>(Store::Workouts)
                .await?,
            sessions: IndexedDB
                .get_all::<domain::Session, Session>(Store::Sessions)
                .await?,
        })
    }

    async fn import_all(&self, snapshot: domain::Snapshot) -> Result<(), domain::UpdateError> {
        Ok(IndexedDB.replace_all(&snapshot).await?)
    }
}

#[derive(thiserror::Error, Debug)]
pub enum IndexedDBError {
    #[error(transparent)]
    IDBError(#[from] indexed_db_futures::error::Error),
    #[error(transparent)]
    IDBOpenDBError(#[from] indexed_db_futures::error::OpenDbError),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[derive(AsRefStr, Clone, Copy)]
pub enum Store {
    #[strum(serialize = "user")]
    User,
    #[strum(serialize = "workouts")]
    Workouts,
    #[strum(serialize = "sessions")]
    Sessions,
}
