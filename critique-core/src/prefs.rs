//! Persisted user preferences.
//!
//! A tiny key/value store on a WAL-mode SQLite file. The only key critique
//! writes today is [`THEME_KEY`]; the theme is read once at startup and
//! written back on every toggle.

use std::future::Future;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use rusqlite::OptionalExtension;
use tokio_rusqlite::Connection;

use crate::error::PrefsError;
use crate::types::ThemePreference;

/// Key under which the light/dark preference is stored.
pub const THEME_KEY: &str = "theme";

/// Minimal async key/value interface over persisted preferences.
pub trait PreferenceStore: Send + Sync {
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<String>, PrefsError>> + Send;
    fn set(&self, key: &str, value: &str) -> impl Future<Output = Result<(), PrefsError>> + Send;
}

/// [`PreferenceStore`] backed by a single SQLite database file.
pub struct SqlitePreferenceStore {
    conn: Connection,
}

impl SqlitePreferenceStore {
    /// Opens (or creates) the preference database at `path`, configures WAL
    /// mode, and applies schema migrations.
    ///
    /// # Errors
    ///
    /// Returns `PrefsError` if the file cannot be opened or the DDL fails.
    pub async fn open(path: &str) -> Result<Self, PrefsError> {
        let conn = Connection::open(path).await?;

        conn.call(|db| {
            db.execute_batch(
                "PRAGMA journal_mode=WAL;
                 PRAGMA synchronous=NORMAL;",
            )?;
            db.busy_timeout(Duration::from_secs(5))?;
            crate::schema::migrate(db)?;
            Ok::<_, rusqlite::Error>(())
        })
        .await?;

        Ok(Self { conn })
    }
}

impl PreferenceStore for SqlitePreferenceStore {
    async fn get(&self, key: &str) -> Result<Option<String>, PrefsError> {
        let key = key.to_owned();
        let value = self
            .conn
            .call(move |db| {
                let value = db
                    .query_row(
                        "SELECT value FROM preferences WHERE key = ?1",
                        rusqlite::params![&key],
                        |r| r.get::<_, String>(0),
                    )
                    .optional()?;
                Ok::<_, rusqlite::Error>(value)
            })
            .await?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), PrefsError> {
        let key = key.to_owned();
        let value = value.to_owned();
        self.conn
            .call(move |db| {
                let tx = db.transaction_with_behavior(rusqlite::TransactionBehavior::Immediate)?;
                tx.execute(
                    "INSERT INTO preferences (key, value, updated_at) VALUES (?1, ?2, ?3)
                     ON CONFLICT(key) DO UPDATE SET value = excluded.value,
                                                    updated_at = excluded.updated_at",
                    rusqlite::params![&key, &value, now_secs()],
                )?;
                tx.commit()?;
                Ok::<_, rusqlite::Error>(())
            })
            .await?;
        Ok(())
    }
}

/// Returns the current Unix timestamp in seconds.
fn now_secs() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}

/// Reads the theme preference, defaulting to dark.
///
/// A missing key, an unrecognised value, or a read error all yield
/// [`ThemePreference::Dark`]; the last two are logged.
pub async fn load_theme<S: PreferenceStore>(store: &S) -> ThemePreference {
    match store.get(THEME_KEY).await {
        Ok(Some(raw)) => ThemePreference::parse(&raw).unwrap_or_else(|| {
            tracing::warn!(value = %raw, "unknown stored theme, using dark");
            ThemePreference::default()
        }),
        Ok(None) => ThemePreference::default(),
        Err(e) => {
            tracing::warn!(error = %e, "could not read theme preference, using dark");
            ThemePreference::default()
        }
    }
}

/// Flips `current` and persists the new value before returning it.
///
/// # Errors
///
/// Returns `PrefsError` if the write fails; the caller decides whether to keep
/// the new theme for this process anyway.
pub async fn toggle_theme<S: PreferenceStore>(
    store: &S,
    current: ThemePreference,
) -> Result<ThemePreference, PrefsError> {
    let next = current.toggled();
    store.set(THEME_KEY, next.as_str()).await?;
    tracing::debug!(theme = next.as_str(), "theme preference saved");
    Ok(next)
}
