// src/engine/mod.rs

pub mod leaderboard;
pub mod processor;
pub mod rank;
pub mod registry;
pub mod store;
