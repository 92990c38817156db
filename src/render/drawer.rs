//! Module drawers: how a single dark module is painted

use image::{Rgba, RgbaImage};
use serde::{Deserialize, Serialize};

/// Which orthogonal neighbours of a module are dark
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Neighbours {
    /// Module above
    pub north: bool,
    /// Module to the right
    pub east: bool,
    /// Module below
    pub south: bool,
    /// Module to the left
    pub west: bool,
}

/// Shape used for dark modules
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ModuleDrawer {
    /// Plain filled squares
    Square,
    /// Squares whose free corners are rounded with a half-module radius
    #[default]
    Rounded,
}

impl ModuleDrawer {
    /// Parse a drawer name (case-insensitive).
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "square" => Some(Self::Square),
            "rounded" | "round" => Some(Self::Rounded),
            _ => None,
        }
    }

    /// Whether pixel `(px, py)` inside a `box_size` cell belongs to the module.
    ///
    /// A corner is rounded only when neither neighbour touching it is dark,
    /// so runs of dark modules join without notches.
    pub fn covers(&self, neighbours: Neighbours, box_size: u32, px: u32, py: u32) -> bool {
        match self {
            ModuleDrawer::Square => true,
            ModuleDrawer::Rounded => {
                let radius = box_size as f32 / 2.0;
                let fx = px as f32 + 0.5;
                let fy = py as f32 + 0.5;
                let west = fx < radius;
                let north = fy < radius;

                let rounded = match (north, west) {
                    (true, true) => !neighbours.north && !neighbours.west,
                    (true, false) => !neighbours.north && !neighbours.east,
                    (false, true) => !neighbours.south && !neighbours.west,
                    (false, false) => !neighbours.south && !neighbours.east,
                };
                if !rounded {
                    return true;
                }

                let dx = fx - radius;
                let dy = fy - radius;
                dx * dx + dy * dy <= radius * radius
            }
        }
    }

    /// Paint one module whose top-left pixel is `origin`.
    pub(crate) fn draw(
        &self,
        canvas: &mut RgbaImage,
        origin: (u32, u32),
        box_size: u32,
        neighbours: Neighbours,
        color: Rgba<u8>,
    ) {
        for py in 0..box_size {
            for px in 0..box_size {
                if self.covers(neighbours, box_size, px, py) {
                    canvas.put_pixel(origin.0 + px, origin.1 + py, color);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coverage(drawer: ModuleDrawer, neighbours: Neighbours, box_size: u32) -> u32 {
        let mut count = 0;
        for py in 0..box_size {
            for px in 0..box_size {
                if drawer.covers(neighbours, box_size, px, py) {
                    count += 1;
                }
            }
        }
        count
    }

    #[test]
    fn square_fills_the_cell() {
        assert_eq!(coverage(ModuleDrawer::Square, Neighbours::default(), 10), 100);
    }

    #[test]
    fn isolated_rounded_module_is_a_disc() {
        let lone = Neighbours::default();
        assert!(!ModuleDrawer::Rounded.covers(lone, 10, 0, 0));
        assert!(!ModuleDrawer::Rounded.covers(lone, 10, 9, 9));
        assert!(ModuleDrawer::Rounded.covers(lone, 10, 5, 5));
        assert!(ModuleDrawer::Rounded.covers(lone, 10, 0, 5));

        let area = coverage(ModuleDrawer::Rounded, lone, 10);
        // pi * 5^2 ~= 78.5
        assert!((70..=90).contains(&area), "area {area}");
    }

    #[test]
    fn corners_next_to_dark_neighbours_stay_square() {
        let west_only = Neighbours {
            west: true,
            ..Neighbours::default()
        };
        assert!(ModuleDrawer::Rounded.covers(west_only, 10, 0, 0));
        assert!(ModuleDrawer::Rounded.covers(west_only, 10, 0, 9));
        assert!(!ModuleDrawer::Rounded.covers(west_only, 10, 9, 0));
        assert!(!ModuleDrawer::Rounded.covers(west_only, 10, 9, 9));
    }

    #[test]
    fn surrounded_module_is_full() {
        let all = Neighbours {
            north: true,
            east: true,
            south: true,
            west: true,
        };
        assert_eq!(coverage(ModuleDrawer::Rounded, all, 10), 100);
    }

    #[test]
    fn parse_names() {
        assert_eq!(ModuleDrawer::parse("Rounded"), Some(ModuleDrawer::Rounded));
        assert_eq!(ModuleDrawer::parse("square"), Some(ModuleDrawer::Square));
        assert_eq!(ModuleDrawer::parse("circle"), None);
    }
}
