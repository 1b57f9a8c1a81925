// src/services/mod.rs

pub mod directory;
pub mod question_bank;
