use super::Operation;
use crate::envelope::{ApiError, NetworkResponse};
use crate::server::state::AppState;
use axum::extract::State;
use monument_core::{
    core_version, load_survey_rows, seed_monuments, MonumentService, SqliteMonumentRepository,
};
use serde::Serialize;
use std::time::Instant;

const HELLO: Operation = Operation {
    name: "hello",
    success: "Hello World",
    failure: "Failed to say hello",
};
const POPULATE: Operation = Operation {
    name: "populate",
    success: "Database Populated!",
    failure: "Failed to populate database",
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Health {
    pub version: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PopulateSummary {
    pub created: usize,
}

pub async fn hello() -> NetworkResponse<Health> {
    HELLO.respond(
        Instant::now(),
        Ok(Health {
            version: core_version(),
        }),
    )
}

/// Loads the configured survey dataset into the registry.
pub async fn populate(State(state): State<AppState>) -> NetworkResponse<PopulateSummary> {
    let started = Instant::now();
    let result = async move {
        let seed_file = state
            .config
            .seed_file
            .clone()
            .ok_or_else(|| ApiError::validation("no seed file configured"))?;
        state
            .with_session(move |conn| {
                let rows = load_survey_rows(&seed_file)?;
                let mut service = MonumentService::new(SqliteMonumentRepository::try_new(conn)?);
                let created = seed_monuments(&mut service, &rows, &mut rand::thread_rng())?;
                Ok(PopulateSummary {
                    created: created.len(),
                })
            })
            .await
    }
    .await;
    POPULATE.respond(started, result)
}
