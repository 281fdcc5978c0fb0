//! Macroquad-based visualization for the map generator.
//!
//! Provides an interactive debug view with:
//! - Zoom (mouse wheel) and pan (WASD/arrow keys)
//! - Tile selection (click) and resource survey (E key, handled by the app)
//! - Map reroll (R key)
//! - Display mode cycling (M key)

use macroquad::prelude::*;

use crate::geometry::{hex_corners, Point};
use crate::map::HexMap;
use crate::tile::{resource_color, resource_name, terrain_color, terrain_name};

/// Display mode for the visualization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    /// Show terrain colors.
    Terrain,
    /// Show resource quality (surveyed tiles only).
    Resource,
    /// Show tile outlines only.
    Wireframe,
}

/// Visualization state.
pub struct Visualizer {
    /// Camera offset (pan).
    pub camera_offset: Vec2,
    /// Zoom level.
    pub zoom: f32,
    /// Show hex outlines.
    pub show_outlines: bool,
    /// Show tile centers.
    pub show_centers: bool,
    /// Currently selected tile index.
    pub selected_tile: Option<usize>,
    /// Display mode.
    pub display_mode: DisplayMode,
    /// Map extent (min corner).
    map_min: Point,
    /// Map extent (max corner).
    map_max: Point,
}

impl Default for Visualizer {
    fn default() -> Self {
        Self {
            camera_offset: Vec2::ZERO,
            zoom: 1.0,
            show_outlines: true,
            show_centers: false,
            selected_tile: None,
            display_mode: DisplayMode::Terrain,
            map_min: Point::ZERO,
            map_max: Point::ZERO,
        }
    }
}

impl Visualizer {
    pub fn new(map: &HexMap) -> Self {
        let (map_min, map_max) = map_extent(map);
        let mut vis = Self {
            map_min,
            map_max,
            ..Default::default()
        };
        vis.refit();
        vis
    }

    /// Transform a map point to screen coordinates.
    pub fn map_to_screen(&self, p: Point) -> Vec2 {
        Vec2::new(
            p.x as f32 * self.zoom + self.camera_offset.x,
            p.y as f32 * self.zoom + self.camera_offset.y,
        )
    }

    /// Transform screen coordinates to map point.
    pub fn screen_to_map(&self, screen: Vec2) -> Point {
        Point::new(
            ((screen.x - self.camera_offset.x) / self.zoom) as f64,
            ((screen.y - self.camera_offset.y) / self.zoom) as f64,
        )
    }

    /// Handle input for camera control. Returns true when a reroll was
    /// requested.
    pub fn handle_input(&mut self) -> bool {
        let mut reroll = false;

        // Zoom with mouse wheel
        let (_, wheel_y) = mouse_wheel();
        if wheel_y != 0.0 {
            let mouse_pos = Vec2::new(mouse_position().0, mouse_position().1);
            let old_map_pos = self.screen_to_map(mouse_pos);

            self.zoom *= 1.0 + wheel_y * 0.05;
            self.zoom = self.zoom.clamp(0.05, 10.0);

            // Adjust offset to zoom toward mouse position
            let new_screen_pos = self.map_to_screen(old_map_pos);
            self.camera_offset += mouse_pos - new_screen_pos;
        }

        // Pan with WASD or arrow keys
        let pan_speed = 10.0 / self.zoom;
        if is_key_down(KeyCode::W) || is_key_down(KeyCode::Up) {
            self.camera_offset.y += pan_speed;
        }
        if is_key_down(KeyCode::S) || is_key_down(KeyCode::Down) {
            self.camera_offset.y -= pan_speed;
        }
        if is_key_down(KeyCode::A) || is_key_down(KeyCode::Left) {
            self.camera_offset.x += pan_speed;
        }
        if is_key_down(KeyCode::D) || is_key_down(KeyCode::Right) {
            self.camera_offset.x -= pan_speed;
        }

        // Toggle displays
        if is_key_pressed(KeyCode::V) {
            self.show_outlines = !self.show_outlines;
        }
        if is_key_pressed(KeyCode::C) {
            self.show_centers = !self.show_centers;
        }

        // Cycle display modes with M
        if is_key_pressed(KeyCode::M) {
            self.display_mode = match self.display_mode {
                DisplayMode::Terrain => DisplayMode::Resource,
                DisplayMode::Resource => DisplayMode::Wireframe,
                DisplayMode::Wireframe => DisplayMode::Terrain,
            };
        }

        // Reroll with R
        if is_key_pressed(KeyCode::R) {
            reroll = true;
        }

        // Reset view with Home
        if is_key_pressed(KeyCode::Home) {
            *self = Self {
                map_min: self.map_min,
                map_max: self.map_max,
                ..Default::default()
            };
            self.refit();
        }

        reroll
    }

    /// Zoom and center the camera so the whole map fits on screen.
    fn refit(&mut self) {
        let screen_w = screen_width();
        let screen_h = screen_height();
        let map_w = ((self.map_max.x - self.map_min.x) as f32).max(1.0);
        let map_h = ((self.map_max.y - self.map_min.y) as f32).max(1.0);
        self.zoom = (screen_w / map_w).min(screen_h / map_h) * 0.9;
        self.camera_offset = Vec2::new(
            (screen_w - map_w * self.zoom) / 2.0 - self.map_min.x as f32 * self.zoom,
            (screen_h - map_h * self.zoom) / 2.0 - self.map_min.y as f32 * self.zoom,
        );
    }

    /// Find which tile contains the given screen position.
    pub fn find_tile_at(&self, map: &HexMap, screen_pos: Vec2) -> Option<usize> {
        map.index_at(self.screen_to_map(screen_pos))
    }

    /// Draw the complete map.
    pub fn draw(&self, map: &HexMap) {
        // Clear background
        clear_background(Color::from_rgba(20, 30, 40, 255));

        // Fill tiles back to front
        for &i in &map.draw_order {
            self.draw_tile(map, i);
        }

        // Outlines on top of the fills
        if self.show_outlines {
            for &i in &map.draw_order {
                self.draw_outline(map, i, 1.0, Color::from_rgba(60, 60, 60, 255));
            }
        }

        // Tile centers
        if self.show_centers {
            self.draw_tile_centers(map);
        }

        // Selected tile highlight
        if let Some(idx) = self.selected_tile {
            self.draw_selected(map, idx);
        }

        // UI overlay
        self.draw_ui(map);
    }

    fn tile_fill_color(&self, map: &HexMap, index: usize) -> Color {
        let tile = &map.tiles[index];
        match self.display_mode {
            DisplayMode::Terrain => {
                let (r, g, b) = terrain_color(tile.terrain);
                Color::from_rgba(r, g, b, 255)
            }
            DisplayMode::Resource => {
                if tile.assessed {
                    let (r, g, b) = resource_color(tile.resource);
                    Color::from_rgba(r, g, b, 255)
                } else {
                    // Unsurveyed tiles stay hidden
                    Color::from_rgba(70, 70, 70, 255)
                }
            }
            DisplayMode::Wireframe => Color::from_rgba(30, 40, 50, 255),
        }
    }

    /// Draw a single filled hexagon as a triangle fan.
    fn draw_tile(&self, map: &HexMap, index: usize) {
        let tile = &map.tiles[index];
        let color = self.tile_fill_color(map, index);

        let corners = hex_corners(tile.position, map.major_radius);
        let screen_corners: Vec<Vec2> = corners.iter().map(|&c| self.map_to_screen(c)).collect();
        let center = self.map_to_screen(tile.position);

        for i in 0..screen_corners.len() {
            let v1 = screen_corners[i];
            let v2 = screen_corners[(i + 1) % screen_corners.len()];
            draw_triangle(center, v1, v2, color);
        }
    }

    fn draw_outline(&self, map: &HexMap, index: usize, thickness: f32, color: Color) {
        let tile = &map.tiles[index];
        let corners = hex_corners(tile.position, map.major_radius);
        for i in 0..corners.len() {
            let p0 = self.map_to_screen(corners[i]);
            let p1 = self.map_to_screen(corners[(i + 1) % corners.len()]);
            draw_line(p0.x, p0.y, p1.x, p1.y, thickness, color);
        }
    }

    /// Draw center points.
    fn draw_tile_centers(&self, map: &HexMap) {
        for tile in &map.tiles {
            let pos = self.map_to_screen(tile.position);
            draw_circle(pos.x, pos.y, 2.5, Color::from_rgba(200, 100, 100, 255));
        }
    }

    /// Draw selected tile highlight.
    fn draw_selected(&self, map: &HexMap, index: usize) {
        if index >= map.len() {
            return;
        }
        self.draw_outline(map, index, 3.0, Color::from_rgba(255, 255, 0, 255));
    }

    /// Draw UI overlay.
    fn draw_ui(&self, map: &HexMap) {
        let mut y = 10.0;
        let line_height = 18.0;
        let font_size = 16.0;

        // Title
        draw_text("Hex Map Generator", 10.0, y, font_size + 4.0, WHITE);
        y += line_height + 5.0;

        // Controls
        draw_text("Controls:", 10.0, y, font_size, GRAY);
        y += line_height;
        draw_text("  WASD/Arrows: Pan", 10.0, y, font_size, GRAY);
        y += line_height;
        draw_text("  Mouse Wheel: Zoom", 10.0, y, font_size, GRAY);
        y += line_height;
        draw_text("  Click: Select tile", 10.0, y, font_size, GRAY);
        y += line_height;
        draw_text("  E: Survey selected tile", 10.0, y, font_size, GRAY);
        y += line_height;
        draw_text("  R: Reroll map", 10.0, y, font_size, GRAY);
        y += line_height;
        draw_text("  Home: Reset view", 10.0, y, font_size, GRAY);
        y += line_height + 5.0;

        // Toggles
        draw_text("Toggles:", 10.0, y, font_size, GRAY);
        y += line_height;
        let outlines_text = format!("  V: Outlines [{}]", if self.show_outlines { "ON" } else { "OFF" });
        draw_text(&outlines_text, 10.0, y, font_size, if self.show_outlines { GREEN } else { GRAY });
        y += line_height;
        let centers_text = format!("  C: Centers [{}]", if self.show_centers { "ON" } else { "OFF" });
        draw_text(&centers_text, 10.0, y, font_size, if self.show_centers { GREEN } else { GRAY });
        y += line_height;
        let mode_name = match self.display_mode {
            DisplayMode::Terrain => "Terrain",
            DisplayMode::Resource => "Resource",
            DisplayMode::Wireframe => "Wireframe",
        };
        draw_text(&format!("  M: Mode [{}]", mode_name), 10.0, y, font_size, YELLOW);
        y += line_height + 5.0;

        // Stats
        draw_text("Stats:", 10.0, y, font_size, GRAY);
        y += line_height;
        draw_text(&format!("  Tiles: {}", map.len()), 10.0, y, font_size, GRAY);
        y += line_height;
        draw_text(&format!("  Layers: {}", map.n_layers), 10.0, y, font_size, GRAY);
        y += line_height;
        draw_text(&format!("  Border: {}", map.border_tiles.len()), 10.0, y, font_size, GRAY);
        y += line_height;
        draw_text(&format!("  Seed: {}", map.config.seed), 10.0, y, font_size, GRAY);
        y += line_height;
        draw_text(&format!("  Zoom: {:.1}x", self.zoom), 10.0, y, font_size, GRAY);
        y += line_height;
        draw_text(&format!("  FPS: {}", get_fps()), 10.0, y, font_size, GRAY);

        // Selected tile info
        if let Some(idx) = self.selected_tile {
            if let Some(tile) = map.tile(idx) {
                let info_x = screen_width() - 250.0;
                let mut info_y = 10.0;

                draw_text("Selected Tile:", info_x, info_y, font_size + 2.0, YELLOW);
                info_y += line_height;
                draw_text(
                    &format!("  Coord: ({}, {})", tile.coord.q, tile.coord.r),
                    info_x,
                    info_y,
                    font_size,
                    WHITE,
                );
                info_y += line_height;
                draw_text(&format!("  Layer: {}", tile.coord.ring()), info_x, info_y, font_size, WHITE);
                info_y += line_height;
                draw_text(
                    &format!("  Terrain: {}", terrain_name(tile.terrain)),
                    info_x,
                    info_y,
                    font_size,
                    WHITE,
                );
                info_y += line_height;
                let resource_text = if tile.assessed {
                    format!("  Resource: {}", resource_name(tile.resource))
                } else {
                    "  Resource: unsurveyed".to_string()
                };
                draw_text(&resource_text, info_x, info_y, font_size, WHITE);
                info_y += line_height;
                draw_text(
                    &format!("  Neighbors: {}", map.neighbors(tile.coord).len()),
                    info_x,
                    info_y,
                    font_size,
                    WHITE,
                );
                info_y += line_height;
                draw_text(
                    &format!("  Pos: ({:.0}, {:.0})", tile.position.x, tile.position.y),
                    info_x,
                    info_y,
                    font_size,
                    WHITE,
                );
            }
        }
    }
}

/// Bounding extent of a map, tile geometry included.
fn map_extent(map: &HexMap) -> (Point, Point) {
    let r = map.major_radius;
    let mut min = Point::new(f64::INFINITY, f64::INFINITY);
    let mut max = Point::new(f64::NEG_INFINITY, f64::NEG_INFINITY);
    for tile in &map.tiles {
        min.x = min.x.min(tile.position.x - r);
        min.y = min.y.min(tile.position.y - r);
        max.x = max.x.max(tile.position.x + r);
        max.y = max.y.max(tile.position.y + r);
    }
    if map.is_empty() {
        (Point::ZERO, Point::ZERO)
    } else {
        (min, max)
    }
}
