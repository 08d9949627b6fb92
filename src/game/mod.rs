// Game layer: playable characters and their controllers

pub mod characters;
