// src/state.rs

use axum::extract::FromRef;
use sqlx::SqlitePool;

use crate::{
    config::Config,
    engine::{processor::AnswerProcessor, registry::QuestionRegistry, store::ScoreStore},
    services::{directory::InMemoryDirectory, question_bank::QuestionBank},
};

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub store: ScoreStore,
    pub registry: QuestionRegistry,
    pub bank: QuestionBank,
    pub directory: InMemoryDirectory,
}

impl AppState {
    /// Wires the engine components around one database pool.
    pub fn new(pool: SqlitePool, config: Config) -> Self {
        let store = ScoreStore::new(pool.clone(), config.store_timeout);
        let registry = QuestionRegistry::new(config.question_ttl, config.registry_capacity);

        Self {
            store,
            registry,
            bank: QuestionBank::new(pool),
            directory: InMemoryDirectory::new(),
            config,
        }
    }

    pub fn processor(&self) -> AnswerProcessor {
        AnswerProcessor::new(self.registry.clone(), self.store.clone())
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

impl FromRef<AppState> for ScoreStore {
    fn from_ref(state: &AppState) -> Self {
        state.store.clone()
    }
}

impl FromRef<AppState> for QuestionRegistry {
    fn from_ref(state: &AppState) -> Self {
        state.registry.clone()
    }
}

impl FromRef<AppState> for QuestionBank {
    fn from_ref(state: &AppState) -> Self {
        state.bank.clone()
    }
}

impl FromRef<AppState> for InMemoryDirectory {
    fn from_ref(state: &AppState) -> Self {
        state.directory.clone()
    }
}

impl FromRef<AppState> for AnswerProcessor {
    fn from_ref(state: &AppState) -> Self {
        state.processor()
    }
}
