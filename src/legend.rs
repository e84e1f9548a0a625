// Copyright 2025 Chris Custine
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use airmap_core::AltitudeBand;
use egui::{vec2, Color32, Sense};

use crate::overlay::{band_color, draw_airport_symbol, draw_city_symbol};

const SYMBOL_SIZE: f32 = 20.0;
const KEY_RADIUS: f32 = 6.0;

/// One legend row: a symbol cell followed by its label
fn key_row(ui: &mut egui::Ui, label: &str, draw: impl FnOnce(&egui::Painter, egui::Pos2)) {
    ui.horizontal(|ui| {
        let (rect, _) = ui.allocate_exact_size(vec2(SYMBOL_SIZE, SYMBOL_SIZE), Sense::hover());
        draw(ui.painter(), rect.center());
        ui.label(label);
    });
}

/// Floating "Airport Key" window; closing it clears `open`
pub fn show(ctx: &egui::Context, open: &mut bool) {
    egui::Window::new("Airport Key")
        .open(open)
        .anchor(egui::Align2::LEFT_TOP, vec2(10.0, 10.0))
        .resizable(false)
        .collapsible(true)
        .show(ctx, |ui| {
            key_row(ui, "City Marker", draw_city_symbol);
            key_row(ui, "Airport", |painter, center| {
                draw_airport_symbol(painter, center, KEY_RADIUS, Color32::WHITE);
            });

            ui.add_space(6.0);
            ui.label("Altitude:");

            for band in AltitudeBand::ALL {
                key_row(ui, band.label(), |painter, center| {
                    draw_airport_symbol(painter, center, KEY_RADIUS, band_color(band));
                });
            }
        });
}
