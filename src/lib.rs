//! Old World ambition extractor and viewer core.
//!
//! `data` turns the game's XML reference files into one normalized JSON
//! dataset; `viewer` holds the pure filtering/availability logic the viewer
//! page queries it with; `server` serves both over plain HTTP.

pub mod cli;
pub mod data;
pub mod server;
pub mod viewer;
