// main.rs - Conway's Game of Life viewer on top of life_engine
// The window owns the timer tick and input; all simulation lives in the engine.

use eframe::egui;
use egui::Color32;
use std::time::{Duration, Instant};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use life_engine::{Engine, EngineConfig, MatrixData, patterns};

mod ui;

fn main() -> Result<(), eframe::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = load_config();
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 1000.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Conway's Game of Life",
        options,
        Box::new(move |_cc| Box::new(GameOfLife::new(&config))),
    )
}

/// Reads the TOML config named by the first argument, if any.
fn load_config() -> EngineConfig {
    let Some(path) = std::env::args().nth(1) else {
        return EngineConfig::default();
    };
    let loaded = std::fs::read_to_string(&path)
        .map_err(|err| err.to_string())
        .and_then(|text| EngineConfig::from_toml_str(&text).map_err(|err| err.to_string()));
    match loaded {
        Ok(config) => {
            info!(%path, "loaded config");
            config
        }
        Err(err) => {
            warn!(%path, %err, "using default config");
            EngineConfig::default()
        }
    }
}

pub struct GameOfLife {
    pub engine: Engine,

    pub is_running: bool,
    pub last_update: Instant,
    pub update_interval: Duration,
    pub live_color: Color32,
    pub dead_color: Color32,
    pub selected_pattern: usize,
    pub seed_probability: f64,

    pub rule_input: String,
    pub rle_text: String,
    pub message: Option<String>,
}

impl GameOfLife {
    fn new(config: &EngineConfig) -> Self {
        let mut engine = Engine::from_config(config).unwrap_or_else(|err| {
            warn!(%err, "invalid config, starting with defaults");
            Engine::new(100, 100)
        });
        engine.randomize(config.seed_probability);

        Self {
            rule_input: engine.rule(),
            engine,
            is_running: false,
            last_update: Instant::now(),
            update_interval: Duration::from_millis(200),
            live_color: Color32::from_rgb(0, 200, 0),
            dead_color: Color32::from_rgb(40, 40, 40),
            selected_pattern: 0,
            seed_probability: config.seed_probability,
            rle_text: String::new(),
            message: None,
        }
    }
}

/// Actions the UI module drives.
pub trait GameOfLifeInterface {
    fn update_generation(&mut self);
    fn step_back(&mut self);
    fn clear_grid(&mut self);
    fn random_grid(&mut self);
    fn apply_selected_pattern(&mut self);
    fn apply_rule(&mut self);
    fn export_pattern(&mut self);
    fn import_pattern(&mut self);
}

impl GameOfLifeInterface for GameOfLife {
    fn update_generation(&mut self) {
        self.engine.tick();
        if self.is_running && self.engine.cycle_detected() {
            self.is_running = false;
            self.message = Some(format!("Cycle reached at generation {}", self.engine.generation()));
        }
    }

    fn step_back(&mut self) {
        if !self.engine.rollback() {
            self.message = Some("No earlier generation kept".to_string());
        }
    }

    fn clear_grid(&mut self) {
        self.engine.clear();
        self.message = None;
    }

    fn random_grid(&mut self) {
        self.engine.randomize(self.seed_probability);
        self.message = None;
    }

    fn apply_selected_pattern(&mut self) {
        let Some(pattern) = patterns::PATTERNS.get(self.selected_pattern) else {
            return;
        };
        match pattern.grid() {
            Ok(grid) => {
                let current = self.engine.current();
                // Centre the pattern on the grid.
                let x = (current.rows() as isize - grid.rows() as isize) / 2;
                let y = (current.cols() as isize - grid.cols() as isize) / 2;
                self.engine.clear();
                if !self.engine.place_pattern(x, y, &grid) {
                    self.message = Some(format!("{} does not fit on this grid", pattern.name));
                }
            }
            Err(err) => self.message = Some(err.to_string()),
        }
    }

    fn apply_rule(&mut self) {
        match self.engine.set_rule(&self.rule_input) {
            Ok(()) => {
                self.rule_input = self.engine.rule();
                self.message = None;
            }
            Err(err) => self.message = Some(err.to_string()),
        }
    }

    fn export_pattern(&mut self) {
        let title = format!("Generation {}", self.engine.generation());
        self.rle_text = self.engine.save(title).to_rle_file();
    }

    fn import_pattern(&mut self) {
        let result = MatrixData::from_rle_file(&self.rle_text)
            .map_err(|err| err.to_string())
            .and_then(|record| self.engine.load_record(&record).map_err(|err| err.to_string()));
        match result {
            Ok(()) => {
                self.rule_input = self.engine.rule();
                self.message = None;
            }
            Err(err) => self.message = Some(err),
        }
    }
}
