// src/utils/mod.rs

pub mod extract;
pub mod guard;
