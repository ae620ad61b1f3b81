// lib.rs - Two-state cellular automaton engine
//
// Conway's Game of Life and other B/S rules on a bounded or toroidal grid,
// with a replayable generation history and an RLE pattern codec.

//! ```
//! use life_engine::{Engine, patterns};
//!
//! let mut engine = Engine::new(32, 32);
//! let glider = patterns::find("Glider").unwrap().grid().unwrap();
//! assert!(engine.place_pattern(1, 1, &glider));
//!
//! engine.step(true);
//! assert!(engine.rollback());
//! let expected = format!("$2bo$3bo$b3o{}!", "$".repeat(28));
//! assert_eq!(engine.export_rle(), expected);
//! ```

mod config;
mod engine;
mod error;
mod grid;
mod history;
mod record;
pub mod rle;
mod rules;
mod stats;

pub mod patterns;

pub use config::EngineConfig;
pub use engine::Engine;
pub use error::{ConfigError, EngineError, PatternError, RleError, RuleError};
pub use grid::{Cell, Grid, Rect};
pub use history::{DEFAULT_CAPACITY, HistoryBuffer};
pub use record::MatrixData;
pub use rules::{MAX_NEIGHBORS, RuleSet};
pub use stats::{EQUILIBRIUM_UPDATES, PopulationStats};
