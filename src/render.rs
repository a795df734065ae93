use std::fs;
use std::path::Path;

use anyhow::Context;
use image::{Rgb, RgbImage};

use crate::board::{Board, Terrain};
use crate::common::{Position, SearchReport};

const CELL: u32 = 20;
const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
const OUTLINE: Rgb<u8> = Rgb([54, 54, 54]);
const MARK: Rgb<u8> = Rgb([48, 48, 48]);

fn terrain_color(terrain: Terrain) -> Rgb<u8> {
    match terrain {
        Terrain::Walkable => WHITE,
        Terrain::Wall => Rgb([70, 70, 70]),
        Terrain::Water => Rgb([67, 110, 238]),
        Terrain::Mountain => Rgb([150, 150, 150]),
        Terrain::Forest => Rgb([35, 142, 35]),
        Terrain::Grassland => Rgb([50, 205, 50]),
        Terrain::Road => Rgb([133, 94, 66]),
        Terrain::Start => Rgb([255, 0, 0]),
        Terrain::Goal => Rgb([0, 255, 0]),
    }
}

/// Render the board with the search overlays: a corner tick on every
/// expanded cell, a hollow square on cells still pending on the frontier,
/// and a centered dot along the found route.
pub fn draw(board: &Board, report: &SearchReport) -> RgbImage {
    let mut img = RgbImage::from_pixel(
        board.width as u32 * CELL + 1,
        board.height as u32 * CELL + 1,
        WHITE,
    );

    for y in 0..board.height {
        for x in 0..board.width {
            fill_cell(&mut img, (x, y), terrain_color(board.grid[y][x].terrain));
        }
    }

    for &position in &report.closed {
        closed_tick(&mut img, position);
    }
    for &position in &report.pending {
        pending_outline(&mut img, position);
    }

    if let Some(route) = report.route() {
        for &position in &route.steps {
            // Repaint the cell first; route cells also carry a closed tick.
            let (x, y) = position;
            fill_cell(&mut img, position, terrain_color(board.grid[y][x].terrain));
            route_dot(&mut img, position);
        }
    }

    img
}

pub fn save_png(img: &RgbImage, path: &str) -> anyhow::Result<()> {
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    img.save(path).with_context(|| format!("writing {path}"))
}

fn fill_cell(img: &mut RgbImage, (cx, cy): Position, color: Rgb<u8>) {
    let x0 = cx as u32 * CELL;
    let y0 = cy as u32 * CELL;
    for dy in 0..=CELL {
        for dx in 0..=CELL {
            let edge = dx == 0 || dy == 0 || dx == CELL || dy == CELL;
            img.put_pixel(x0 + dx, y0 + dy, if edge { OUTLINE } else { color });
        }
    }
}

fn route_dot(img: &mut RgbImage, (cx, cy): Position) {
    let x0 = cx as u32 * CELL;
    let y0 = cy as u32 * CELL;
    for dy in 8..13 {
        for dx in 8..13 {
            img.put_pixel(x0 + dx, y0 + dy, MARK);
        }
    }
}

fn closed_tick(img: &mut RgbImage, (cx, cy): Position) {
    let x0 = cx as u32 * CELL;
    let y0 = cy as u32 * CELL;
    for dy in 3..6 {
        for dx in 3..6 {
            img.put_pixel(x0 + dx, y0 + dy, MARK);
        }
    }
}

fn pending_outline(img: &mut RgbImage, (cx, cy): Position) {
    let x0 = cx as u32 * CELL;
    let y0 = cy as u32 * CELL;
    for dy in 6..15 {
        for dx in 6..15 {
            let edge = dx == 6 || dy == 6 || dx == 14 || dy == 14;
            if edge {
                img.put_pixel(x0 + dx, y0 + dy, MARK);
            }
        }
    }
}
