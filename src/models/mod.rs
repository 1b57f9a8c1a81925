// src/models/mod.rs

pub mod answer;
pub mod leaderboard;
pub mod member;
pub mod question;
pub mod score;
