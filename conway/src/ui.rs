// ui.rs - egui front end: controls, grid painting, statistics and RLE panel

use eframe::egui;
use egui::{Color32, Rect, Stroke, Vec2};
use std::time::{Duration, Instant};

use life_engine::patterns;

use crate::{GameOfLife, GameOfLifeInterface};

/// Largest side of the painted grid, in points.
const GRID_EXTENT: f32 = 640.0;

impl eframe::App for GameOfLife {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Auto-update if running
        if self.is_running && self.last_update.elapsed() >= self.update_interval {
            self.update_generation();
            self.last_update = Instant::now();
            ctx.request_repaint();
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Conway's Game of Life");

            // Controls
            ui.horizontal(|ui| {
                let button_text = if self.is_running { "⏸ Pause" } else { "▶ Start" };
                if ui.button(button_text).clicked() {
                    self.is_running = !self.is_running;
                    if self.is_running {
                        self.last_update = Instant::now();
                    }
                }

                ui.add_enabled_ui(!self.is_running, |ui| {
                    if ui.button("⏮ Back").clicked() {
                        self.step_back();
                    }
                    if ui.button("⏭ Step").clicked() {
                        self.update_generation();
                    }
                });

                if ui.button("⏹ Clear").clicked() {
                    self.is_running = false;
                    self.clear_grid();
                }

                if ui.button("🎲 Random").clicked() {
                    self.is_running = false;
                    self.random_grid();
                }

                ui.separator();

                let mut wrap = self.engine.wrap();
                if ui.checkbox(&mut wrap, "Wrap edges").changed() {
                    self.engine.set_wrap(wrap);
                }
            });

            ui.horizontal(|ui| {
                // Pattern dropdown
                ui.label("Pattern:");
                egui::ComboBox::from_id_source("pattern_selector")
                    .selected_text(patterns::PATTERNS[self.selected_pattern].name)
                    .show_ui(ui, |ui| {
                        for (i, pattern) in patterns::PATTERNS.iter().enumerate() {
                            ui.selectable_value(&mut self.selected_pattern, i, pattern.name);
                        }
                    });

                if ui.button("Apply Pattern").clicked() {
                    self.is_running = false;
                    self.apply_selected_pattern();
                }

                ui.separator();

                ui.label("Rule:");
                ui.add(egui::TextEdit::singleline(&mut self.rule_input).desired_width(110.0));
                if ui.button("Set Rule").clicked() {
                    self.apply_rule();
                }
            });

            ui.separator();

            // Speed control
            ui.horizontal(|ui| {
                ui.label("Speed:");
                let mut speed = 1000.0 / self.update_interval.as_millis() as f32;
                if ui.add(egui::Slider::new(&mut speed, 0.5..=90.0).suffix(" gen/sec")).changed() {
                    self.update_interval = Duration::from_millis((1000.0 / speed) as u64);
                }

                ui.separator();

                ui.label("Live:");
                ui.color_edit_button_srgba(&mut self.live_color);
                ui.label("Dead:");
                ui.color_edit_button_srgba(&mut self.dead_color);
            });

            if let Some(message) = &self.message {
                ui.colored_label(Color32::LIGHT_RED, message.as_str());
            }

            ui.separator();

            self.draw_grid(ui);

            ui.separator();

            self.draw_stats(ui);

            ui.separator();

            // Pattern text in `.rle` file layout
            ui.horizontal(|ui| {
                if ui.button("Export RLE").clicked() {
                    self.export_pattern();
                }
                if ui.button("Import RLE").clicked() {
                    self.is_running = false;
                    self.import_pattern();
                }
            });
            egui::ScrollArea::vertical().max_height(120.0).show(ui, |ui| {
                ui.add(
                    egui::TextEdit::multiline(&mut self.rle_text)
                        .code_editor()
                        .desired_width(f32::INFINITY),
                );
            });
        });

        // Request repaint if running to keep animation smooth
        if self.is_running {
            ctx.request_repaint();
        }
    }
}

impl GameOfLife {
    // Cell (x, y) is painted at column x, row y, the same layout an RLE
    // body reads in.
    fn draw_grid(&mut self, ui: &mut egui::Ui) {
        let grid = self.engine.current();
        let (rows, cols) = (grid.rows(), grid.cols());
        let spacing = 0.5;
        let box_size = (GRID_EXTENT / rows.max(cols) as f32 - spacing).clamp(2.0, 15.0);
        let pitch = box_size + spacing;

        let total_size = Vec2::new(pitch * rows as f32 - spacing, pitch * cols as f32 - spacing);
        let (response, painter) = ui.allocate_painter(total_size, egui::Sense::click());
        let start_pos = response.rect.min;

        painter.rect_filled(Rect::from_min_size(start_pos, total_size), 0.0, Color32::BLACK);

        for x in 0..rows {
            for y in 0..cols {
                let rect = Rect::from_min_size(
                    egui::pos2(start_pos.x + x as f32 * pitch, start_pos.y + y as f32 * pitch),
                    Vec2::splat(box_size),
                );
                let cell_color = if grid.is_alive(x, y) { self.live_color } else { self.dead_color };
                painter.rect_filled(rect, 1.0, cell_color);
                if box_size >= 6.0 {
                    painter.rect_stroke(rect, 1.0, Stroke::new(0.2, Color32::from_gray(60)));
                }
            }
        }

        // Toggle the clicked cell while paused
        if !self.is_running && response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                let offset = pos - start_pos;
                let x = (offset.x / pitch) as usize;
                let y = (offset.y / pitch) as usize;
                if x < rows && y < cols {
                    self.engine.toggle_cell(x, y);
                }
            }
        }
    }

    fn draw_stats(&self, ui: &mut egui::Ui) {
        let stats = self.engine.stats();
        let area = stats.area().max(1);
        let live_cells = self.engine.population();

        ui.horizontal(|ui| {
            ui.label(format!("Generation: {}", self.engine.generation()));
            ui.label(format!("Live cells: {live_cells}"));
            ui.label(format!("Population: {:.1}%", live_cells as f32 / area as f32 * 100.0));
            ui.label(format!("Min / Max: {} / {}", stats.min(), stats.max()));
        });

        ui.horizontal(|ui| {
            let slope = |s: Option<f64>| s.map_or("N/A".to_string(), |s| format!("{s:.2}"));
            ui.label(format!("Avg. cells/tick: {}", slope(stats.average_slope())));
            match stats.equilibrium() {
                Some((tick, population)) => {
                    ui.label(format!("Equilibrium @ ({tick}, {population})"));
                }
                None => {
                    ui.label(format!("Curr. cells/tick: {}", slope(stats.instantaneous_slope())));
                }
            }
            ui.label(format!(
                "History: {}/{} (max {})",
                self.engine.history_index() + 1,
                self.engine.history_len(),
                self.engine.history_capacity()
            ));
            ui.label(format!("Rule: {}", self.engine.rule()));
        });
    }
}
