// src/cfg/mod.rs

pub mod cards;
pub mod config;
