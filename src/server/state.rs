use axum::extract::FromRef;

use crate::engine::Recommender;
use std::sync::Arc;
use std::time::Instant;

use super::ServerConfig;

pub type GuardedRecommender = Arc<Recommender>;

#[derive(Clone)]
pub struct ServerState {
    pub config: ServerConfig,
    pub start_time: Instant,
    pub recommender: GuardedRecommender,
    pub hash: String,
}

impl ServerState {
    pub fn new(config: ServerConfig, recommender: GuardedRecommender) -> ServerState {
        ServerState {
            config,
            start_time: Instant::now(),
            recommender,
            hash: env!("GIT_HASH").to_owned(),
        }
    }
}

impl FromRef<ServerState> for GuardedRecommender {
    fn from_ref(input: &ServerState) -> Self {
        input.recommender.clone()
    }
}

impl FromRef<ServerState> for ServerConfig {
    fn from_ref(input: &ServerState) -> Self {
        input.config.clone()
    }
}
