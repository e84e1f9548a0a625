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

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use walkers::sources::{Attribution, TileSource};
use walkers::{HttpOptions, HttpTiles, TileId};

use crate::config::APP_NAME;

/// Carto basemap flavour
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BasemapStyle {
    #[default]
    DarkMatter,
    Positron,
    Voyager,
}

impl BasemapStyle {
    /// Path segment of the style on the Carto CDN
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::DarkMatter => "dark_all",
            Self::Positron => "light_all",
            Self::Voyager => "rastertiles/voyager",
        }
    }
}

/// Tile source for Carto CDN basemap tiles
/// Uses subdomain load balancing across a-d.basemaps.cartocdn.com
#[derive(Debug, Clone, Copy)]
pub struct CartoTileSource {
    style: BasemapStyle,
}

impl CartoTileSource {
    #[must_use]
    pub const fn new(style: BasemapStyle) -> Self {
        Self { style }
    }
}

impl TileSource for CartoTileSource {
    fn tile_url(&self, tile_id: TileId) -> String {
        let subdomain = ['a', 'b', 'c', 'd'][((tile_id.x + tile_id.y) % 4) as usize];

        format!(
            "https://{}.basemaps.cartocdn.com/{}/{}/{}/{}.png",
            subdomain,
            self.style.path(),
            tile_id.zoom,
            tile_id.x,
            tile_id.y
        )
    }

    fn attribution(&self) -> Attribution {
        Attribution {
            text: "© OpenStreetMap contributors, © CARTO",
            url: "https://carto.com/attributions",
            logo_light: None,
            logo_dark: None,
        }
    }
}

/// Disk cache for downloaded tiles, one directory per style
fn tile_cache_dir(style: BasemapStyle) -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from(".cache"))
        .join(APP_NAME)
        .join("tiles")
        .join(style.path().replace('/', "_"))
}

/// HTTP tile fetcher with an on-disk cache
pub fn basemap_tiles(style: BasemapStyle, ctx: &egui::Context) -> HttpTiles {
    let http_options = HttpOptions {
        cache: Some(tile_cache_dir(style)),
        ..Default::default()
    };

    HttpTiles::with_options(CartoTileSource::new(style), http_options, ctx.clone())
}
