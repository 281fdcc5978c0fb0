//! Hex Map Generator - Main Application
//!
//! Interactive visualization of the procedural hex-map generation.

use macroquad::prelude::*;

use hexmapgen::map::HexMap;
use hexmapgen::visualizer::Visualizer;
use hexmapgen::{generate_map_stats, generate_map_with_config, print_map_report, GenerationConfig};

fn window_conf() -> Conf {
    Conf {
        window_title: "Hex Map Generator".to_string(),
        window_width: 1280,
        window_height: 800,
        window_resizable: true,
        ..Default::default()
    }
}

struct AppState {
    map: HexMap,
    visualizer: Visualizer,
    reroll_count: u64,
}

impl AppState {
    fn new(map: HexMap) -> Self {
        let visualizer = Visualizer::new(&map);
        Self {
            map,
            visualizer,
            reroll_count: 0,
        }
    }

    fn reroll(&mut self) {
        self.reroll_count += 1;
        println!("Rerolling map #{}...", self.reroll_count);

        if let Err(e) = self.map.reroll() {
            eprintln!("Reroll failed: {e}");
            return;
        }
        self.visualizer.selected_tile = None;

        print_map_report(&generate_map_stats(&self.map));
    }

    fn update(&mut self) {
        // Handle input
        let reroll = self.visualizer.handle_input();

        if reroll {
            self.reroll();
        }

        // Handle click selection
        if is_mouse_button_pressed(MouseButton::Left) {
            let mouse_pos = Vec2::new(mouse_position().0, mouse_position().1);
            // Don't select if clicking on the UI panel
            if mouse_pos.x > 260.0 {
                self.visualizer.selected_tile = self.visualizer.find_tile_at(&self.map, mouse_pos);
            }
        }

        // Survey the selected tile with E
        if is_key_pressed(KeyCode::E) {
            if let Some(idx) = self.visualizer.selected_tile {
                if let Some(tile) = self.map.tile_mut(idx) {
                    let quality = tile.assess();
                    println!(
                        "Surveyed tile ({}, {}): {}",
                        tile.coord.q,
                        tile.coord.r,
                        hexmapgen::tile::resource_name(quality)
                    );
                }
            }
        }
    }

    fn draw(&self) {
        self.visualizer.draw(&self.map);
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    println!("=== Hex Map Generator ===");
    println!();
    println!("Controls:");
    println!("  WASD/Arrows - Pan");
    println!("  Mouse Wheel - Zoom");
    println!("  Click - Select tile");
    println!("  E - Survey selected tile");
    println!("  R - Reroll map");
    println!("  V - Toggle outlines");
    println!("  C - Toggle centers");
    println!("  M - Cycle display modes");
    println!("  Home - Reset view");
    println!();

    let config = GenerationConfig::default();
    let map = match generate_map_with_config(&config) {
        Ok(map) => map,
        Err(e) => {
            eprintln!("Map generation failed: {e}");
            std::process::exit(1);
        }
    };

    println!("Initial map generated:");
    print_map_report(&generate_map_stats(&map));

    let mut state = AppState::new(map);

    loop {
        state.update();
        state.draw();
        next_frame().await
    }
}
