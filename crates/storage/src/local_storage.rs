use std::collections::VecDeque;

use gloo_storage::Storage as GlooStorage;
use reisfit_web_app::{Settings, SettingsRepository, log};
use serde::de::DeserializeOwned;

const KEY_SETTINGS: &str = "settings";
const KEY_LOG: &str = "log";

/// Read a value, falling back to the default if the key was never written.
fn get_or_default<T: DeserializeOwned + Default>(
    key: &str,
) -> Result<T, gloo_storage::errors::StorageError> {
    match gloo_storage::LocalStorage::get(key) {
        Ok(value) => Ok(value),
        Err(gloo_storage::errors::StorageError::KeyNotFound(_)) => Ok(T::default()),
        Err(err) => Err(err),
    }
}

pub struct LocalStorage;

impl SettingsRepository for LocalStorage {
    async fn read_settings(&self) -> Result<Settings, String> {
        get_or_default(KEY_SETTINGS).map_err(|err| err.to_string())
    }

    async fn write_settings(&self, settings: Settings) -> Result<(), String> {
        gloo_storage::LocalStorage::set(KEY_SETTINGS, settings).map_err(|err| err.to_string())
    }
}

pub struct Log;

impl log::Repository for Log {
    fn read_entries(&self) -> Result<VecDeque<log::Entry>, log::Error> {
        get_or_default(KEY_LOG).map_err(|err| log::Error::Unknown(err.to_string()))
    }

    fn write_entry(&self, entry: log::Entry) -> Result<(), log::Error> {
        let mut entries = self.read_entries()?;
        log::push_entry(&mut entries, entry);
        gloo_storage::LocalStorage::set(KEY_LOG, entries)
            .map_err(|err| log::Error::Unknown(err.to_string()))
    }
}
