//! Application state: the catalog, session defaults, and the in-memory wizard
//! session store.
//!
//! Sessions hold `WizardState` snapshots keyed by a UUID. Actions are reduced
//! under the write lock, so concurrent actions on one session apply in turn.
//! Nothing here is persisted.

use std::{collections::HashMap, sync::Arc};
use tokio::sync::RwLock;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::catalog::Catalog;
use crate::config::{load_wizard_config_from_env, PaperDefaults, WizardConfig};
use crate::error::{WizardError, WizardResult};
use crate::wizard::WizardState;

#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<RwLock<HashMap<String, WizardState>>>,
    pub catalog: Catalog,
    pub defaults: PaperDefaults,
}

impl AppState {
    /// Build state from env: load TOML config if present, else built-ins.
    #[instrument(level = "info", skip_all)]
    pub fn new() -> Self {
        let cfg = load_wizard_config_from_env().unwrap_or_default();
        Self::from_config(&cfg)
    }

    pub fn from_config(cfg: &WizardConfig) -> Self {
        let catalog = cfg.catalog();
        info!(
            target: "paper_wizard",
            classes = catalog.subjects_by_class.len(),
            topics = catalog.topics.len(),
            default_duration = cfg.defaults.duration,
            "Catalog ready"
        );
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            catalog,
            defaults: cfg.defaults.clone(),
        }
    }

    /// Start a fresh wizard session from the configured defaults.
    #[instrument(level = "debug", skip(self))]
    pub async fn create_session(&self) -> (String, WizardState) {
        let id = Uuid::new_v4().to_string();
        let wizard = WizardState::new(self.defaults.initial_config());
        self.sessions.write().await.insert(id.clone(), wizard.clone());
        (id, wizard)
    }

    #[instrument(level = "debug", skip(self), fields(%id))]
    pub async fn get_session(&self, id: &str) -> WizardResult<WizardState> {
        self.sessions
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| WizardError::UnknownSession(id.to_string()))
    }

    /// Apply `f` to a session's snapshot and store the result while holding the
    /// write lock. A submitted result closes the session. Errors from `f` leave
    /// the stored snapshot untouched.
    #[instrument(level = "debug", skip(self, f), fields(%id))]
    pub async fn update_session<F>(&self, id: &str, f: F) -> WizardResult<WizardState>
    where
        F: FnOnce(&WizardState) -> WizardResult<WizardState>,
    {
        let mut sessions = self.sessions.write().await;
        let current = sessions
            .get(id)
            .ok_or_else(|| WizardError::UnknownSession(id.to_string()))?;
        let next = f(current)?;
        if next.submitted {
            sessions.remove(id);
        } else {
            sessions.insert(id.to_string(), next.clone());
        }
        Ok(next)
    }

    #[instrument(level = "debug", skip(self), fields(%id))]
    pub async fn remove_session(&self, id: &str) -> WizardResult<WizardState> {
        self.sessions
            .write()
            .await
            .remove(id)
            .ok_or_else(|| WizardError::UnknownSession(id.to_string()))
    }

    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn sessions_round_trip_and_discard() {
        let state = AppState::from_config(&WizardConfig::default());
        let (id, wizard) = state.create_session().await;
        assert_eq!(state.get_session(&id).await, Ok(wizard.clone()));

        state.remove_session(&id).await.expect("remove");
        assert_eq!(state.session_count().await, 0);
        assert_eq!(state.get_session(&id).await, Err(WizardError::UnknownSession(id.clone())));
        assert!(state.remove_session(&id).await.is_err());
    }

    #[tokio::test]
    async fn update_session_writes_back_or_closes() {
        let state = AppState::from_config(&WizardConfig::default());
        let (id, _) = state.create_session().await;

        let out = state
            .update_session(&id, |w| {
                let mut next = w.clone();
                next.config.title = "Mock 2".into();
                Ok(next)
            })
            .await
            .expect("update");
        assert_eq!(out.config.title, "Mock 2");
        assert_eq!(state.get_session(&id).await.expect("get").config.title, "Mock 2");

        let err = state
            .update_session(&id, |_| Err(WizardError::NotAtFinalStep))
            .await
            .unwrap_err();
        assert_eq!(err, WizardError::NotAtFinalStep);
        assert_eq!(state.get_session(&id).await.expect("get").config.title, "Mock 2");

        state
            .update_session(&id, |w| Ok(WizardState { submitted: true, ..w.clone() }))
            .await
            .expect("submit");
        assert_eq!(state.session_count().await, 0);
        assert_eq!(
            state.update_session(&id, |w| Ok(w.clone())).await,
            Err(WizardError::UnknownSession(id.clone()))
        );
    }

    #[tokio::test]
    async fn new_sessions_use_configured_defaults() {
        let cfg = WizardConfig::from_toml_str("[defaults]\nduration = 45\n").expect("parse");
        let state = AppState::from_config(&cfg);
        let (_, wizard) = state.create_session().await;
        assert_eq!(wizard.config.duration, 45);
    }
}
