// src/w3c/mod.rs
pub mod client;
