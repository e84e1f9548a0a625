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

mod carto_tiles;
mod config;
mod legend;
mod map_data;
mod overlay;

use std::path::PathBuf;

use airmap_core::{MarkerLayer, Selection};
use clap::Parser;
use eframe::egui;
use log::{info, warn};
use walkers::{HttpTiles, Map, MapMemory, Position};

use config::AppConfig;
use map_data::{FeedPaths, MapData};
use overlay::MarkerOverlay;

const APP_TITLE: &str = "AirMap Desktop";

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Directory holding the feed files
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// OpenFlights airports file
    #[arg(long)]
    airports: Option<PathBuf>,

    /// OpenFlights routes file
    #[arg(long)]
    routes: Option<PathBuf>,

    /// Populated places GeoJSON file
    #[arg(long)]
    cities: Option<PathBuf>,

    /// Print the configuration file location and exit
    #[arg(long)]
    print_config_path: bool,
}

impl Args {
    /// Command-line values win over the configuration file
    fn apply(&self, config: &mut AppConfig) {
        if let Some(dir) = &self.data_dir {
            config.data_dir.clone_from(dir);
        }
        if let Some(file) = &self.airports {
            config.airports_file.clone_from(file);
        }
        if let Some(file) = &self.routes {
            config.routes_file.clone_from(file);
        }
        if let Some(file) = &self.cities {
            config.cities_file.clone_from(file);
        }
    }
}

fn main() -> Result<(), eframe::Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    if args.print_config_path {
        match AppConfig::get_config_path() {
            Ok(path) => println!("{}", path.display()),
            Err(e) => eprintln!("Could not determine config path: {e}"),
        }
        return Ok(());
    }

    info!("Starting {}...", APP_TITLE);

    let mut config = AppConfig::load().unwrap_or_else(|e| {
        warn!("Failed to load configuration, using defaults: {}", e);
        AppConfig::default()
    });
    args.apply(&mut config);

    let (data, load_errors) = MapData::load(&FeedPaths::from_config(&config));
    let layer = data.into_layer(config.thresholds());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1300.0, 900.0])
            .with_title(APP_TITLE),
        ..Default::default()
    };

    eframe::run_native(
        APP_TITLE,
        options,
        Box::new(move |cc| Ok(Box::new(AirmapApp::new(cc, &config, layer, load_errors)))),
    )
}

struct AirmapApp {
    tiles: HttpTiles,
    map_memory: MapMemory,
    center: Position,
    layer: MarkerLayer,
    selection: Selection,
    show_legend: bool,
    load_errors: Vec<String>,
}

impl AirmapApp {
    fn new(
        cc: &eframe::CreationContext<'_>,
        config: &AppConfig,
        layer: MarkerLayer,
        load_errors: Vec<String>,
    ) -> Self {
        let mut map_memory = MapMemory::default();
        if let Err(e) = map_memory.set_zoom(config.default_zoom) {
            warn!("Ignoring default zoom {}: {:?}", config.default_zoom, e);
        }

        Self {
            tiles: carto_tiles::basemap_tiles(config.basemap, &cc.egui_ctx),
            map_memory,
            center: walkers::lat_lon(config.center_latitude, config.center_longitude),
            layer,
            selection: Selection::default(),
            show_legend: config.show_legend,
            load_errors,
        }
    }
}

impl eframe::App for AirmapApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if ctx.input(|i| i.key_pressed(egui::Key::L)) {
            self.show_legend = !self.show_legend;
        }

        if !self.load_errors.is_empty() {
            egui::TopBottomPanel::bottom("load_errors").show(ctx, |ui| {
                for message in &self.load_errors {
                    ui.colored_label(egui::Color32::from_rgb(255, 110, 110), message);
                }
            });
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                let overlay = MarkerOverlay::new(&mut self.layer, &mut self.selection);
                ui.add(Map::new(Some(&mut self.tiles), &mut self.map_memory, self.center).with_plugin(overlay));
            });

        legend::show(ctx, &mut self.show_legend);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_overrides_config() {
        let args = Args::parse_from(["airmap-desktop", "--data-dir", "/feeds", "--routes", "r.dat"]);
        let mut config = AppConfig::default();

        args.apply(&mut config);

        assert_eq!(config.data_dir, PathBuf::from("/feeds"));
        assert_eq!(config.routes_file, PathBuf::from("r.dat"));
        assert_eq!(config.airports_file, PathBuf::from("airports.dat"));
        assert!(!args.print_config_path);
    }

    #[test]
    fn test_print_config_path_flag() {
        let args = Args::parse_from(["airmap-desktop", "--print-config-path"]);
        assert!(args.print_config_path);
        assert!(args.data_dir.is_none());
    }
}
