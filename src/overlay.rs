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

//! Map plugin that draws the markers and feeds pointer input to the
//! selection controller.
//!
//! Each frame the plugin first updates the hover from the pointer position,
//! applies a click if there was one, and only then paints, so the frame
//! always shows the state after this frame's input.

use airmap_core::marker::TRI_SIZE;
use airmap_core::{AltitudeBand, Location, MapView, Marker, MarkerLayer, MarkerRef, ScreenPoint, Selection};
use egui::{pos2, vec2, Color32, FontId, Painter, Pos2, Rect, Shape, Stroke};
use walkers::{MapMemory, Plugin, Projector};

/// Fill of the city triangle
pub const CITY_COLOR: Color32 = Color32::from_rgb(150, 30, 30);

const ROUTE_STROKE: Stroke = Stroke {
    width: 1.5,
    color: Color32::from_rgba_premultiplied(200, 200, 200, 200),
};

const SELECTED_RING: Stroke = Stroke {
    width: 2.0,
    color: Color32::WHITE,
};

const TOOLTIP_HEIGHT: f32 = 39.0;
const TOOLTIP_PADDING: f32 = 3.0;
const TOOLTIP_FONT_SIZE: f32 = 12.0;

/// Fill color of an airport in the given altitude band
#[must_use]
pub fn band_color(band: AltitudeBand) -> Color32 {
    let (r, g, b) = band.rgb();
    Color32::from_rgb(r, g, b)
}

fn to_pos(point: ScreenPoint) -> Pos2 {
    pos2(point.x, point.y)
}

fn to_screen_point(pos: Pos2) -> ScreenPoint {
    ScreenPoint::new(pos.x, pos.y)
}

/// [`MapView`] backed by the walkers projector of the current frame
pub struct ProjectorView<'a> {
    projector: &'a Projector,
}

impl<'a> ProjectorView<'a> {
    pub fn new(projector: &'a Projector) -> Self {
        Self { projector }
    }
}

impl std::fmt::Debug for ProjectorView<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProjectorView").finish_non_exhaustive()
    }
}

impl MapView for ProjectorView<'_> {
    fn project(&self, location: Location) -> ScreenPoint {
        let screen = self.projector.project(walkers::lat_lon(location.lat, location.lon));
        ScreenPoint::new(screen.x, screen.y)
    }
}

/// Upward triangle used for cities, on the map and in the legend
pub fn draw_city_symbol(painter: &Painter, center: Pos2) {
    let points = vec![
        pos2(center.x, center.y - TRI_SIZE),
        pos2(center.x - TRI_SIZE, center.y + TRI_SIZE),
        pos2(center.x + TRI_SIZE, center.y + TRI_SIZE),
    ];
    painter.add(Shape::convex_polygon(points, CITY_COLOR, Stroke::new(1.0, Color32::BLACK)));
}

/// Filled circle used for airports, on the map and in the legend
pub fn draw_airport_symbol(painter: &Painter, center: Pos2, radius: f32, fill: Color32) {
    painter.circle(center, radius, fill, Stroke::new(1.0, Color32::BLACK));
}

/// White two-line box above a marker
fn draw_tooltip(painter: &Painter, anchor: Pos2, lines: &[String; 2]) {
    let galleys: Vec<_> = lines
        .iter()
        .map(|line| painter.layout_no_wrap(line.clone(), FontId::proportional(TOOLTIP_FONT_SIZE), Color32::BLACK))
        .collect();

    let text_width = galleys.iter().map(|g| g.size().x).fold(0.0_f32, f32::max);
    let rect = Rect::from_min_size(
        pos2(anchor.x, anchor.y - TRI_SIZE - TOOLTIP_HEIGHT),
        vec2(text_width + 2.0 * TOOLTIP_PADDING, TOOLTIP_HEIGHT),
    );
    painter.rect_filled(rect, 0.0, Color32::WHITE);

    let mut y = rect.top() + TOOLTIP_PADDING;
    for galley in galleys {
        let height = galley.size().y;
        painter.galley(pos2(rect.left() + TOOLTIP_PADDING, y), galley, Color32::BLACK);
        y += height + TOOLTIP_PADDING;
    }
}

/// Walkers plugin over the marker layer
pub struct MarkerOverlay<'a> {
    layer: &'a mut MarkerLayer,
    selection: &'a mut Selection,
}

impl<'a> MarkerOverlay<'a> {
    pub fn new(layer: &'a mut MarkerLayer, selection: &'a mut Selection) -> Self {
        Self { layer, selection }
    }
}

impl std::fmt::Debug for MarkerOverlay<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MarkerOverlay")
            .field("selection", &self.selection)
            .finish_non_exhaustive()
    }
}

impl Plugin for MarkerOverlay<'_> {
    fn run(
        self: Box<Self>,
        ui: &mut egui::Ui,
        response: &egui::Response,
        projector: &Projector,
        _map_memory: &MapMemory,
    ) {
        let Self { layer, selection } = *self;
        let view = ProjectorView::new(projector);

        let pointer = response.hover_pos().map(to_screen_point);
        selection.pointer_moved(layer, &view, pointer);

        if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                selection.clicked(layer, &view, to_screen_point(pos));
                // markers under the pointer may have just been hidden
                selection.pointer_moved(layer, &view, pointer);
            }
        }

        paint(ui, layer, selection, &view);
    }
}

fn paint(ui: &egui::Ui, layer: &MarkerLayer, selection: &Selection, view: &ProjectorView<'_>) {
    let painter = ui.painter();
    let visible = ui.clip_rect().expand(TOOLTIP_HEIGHT);

    for route in layer.routes().iter().filter(|r| !r.is_hidden() && r.is_linked()) {
        let points: Vec<Pos2> = route.locations().iter().map(|&l| to_pos(view.project(l))).collect();
        painter.add(Shape::line(points, ROUTE_STROKE));
    }

    for city in layer.cities().iter().filter(|c| !c.is_hidden()) {
        let center = to_pos(view.project(city.location()));
        if visible.contains(center) {
            draw_city_symbol(painter, center);
        }
    }

    for airport in layer.airports().iter().filter(|a| !a.is_hidden()) {
        let center = to_pos(view.project(airport.location()));
        if !visible.contains(center) {
            continue;
        }
        let band = airport.altitude_band();
        draw_airport_symbol(painter, center, band.radius(), band_color(band));
        if airport.is_selected() {
            painter.circle_stroke(center, band.radius() + 3.0, SELECTED_RING);
        }
    }

    if let Some(city) = layer.cities().iter().find(|c| c.is_selected() && !c.is_hidden()) {
        let center = to_pos(view.project(city.location()));
        painter.circle_stroke(center, TRI_SIZE + 4.0, SELECTED_RING);
    }

    let hovered = selection.hover.and_then(|marker| match marker {
        MarkerRef::Airport(i) => layer.airports().get(i).map(|a| (a.location(), a.title_lines())),
        MarkerRef::City(i) => layer.cities().get(i).map(|c| (c.location(), c.title_lines())),
    });
    if let Some((location, lines)) = hovered {
        draw_tooltip(painter, to_pos(view.project(location)), &lines);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_colors() {
        assert_eq!(band_color(AltitudeBand::Low), Color32::from_rgb(255, 0, 0));
        assert_eq!(band_color(AltitudeBand::Medium), Color32::from_rgb(0, 0, 255));
        assert_eq!(band_color(AltitudeBand::High), Color32::from_rgb(255, 255, 0));
    }

    #[test]
    fn test_point_conversion() {
        let pos = pos2(12.5, -3.0);
        assert_eq!(to_pos(to_screen_point(pos)), pos);
    }
}
