//! Fixed scene dressing and colour rules.
//!
//! Nothing here touches the gameplay RNG: the decorative ring around the
//! arena is laid out the same way every frame and every game.

use glam::Vec3;
use ratatui::style::Color;

use crate::game::ObstacleKind;

pub const HEAD_COLOR: Color = Color::Rgb(0, 180, 0);
const BODY_BASE: (f32, f32, f32) = (0.0, 220.0, 40.0);
pub const APPLE_COLOR: Color = Color::Rgb(220, 20, 60);
pub const TREE_COLOR: Color = Color::Rgb(34, 139, 34);
pub const TRUNK_COLOR: Color = Color::Rgb(139, 69, 19);
pub const ROCK_COLOR: Color = Color::Rgb(169, 169, 169);
pub const WALL_COLOR: Color = Color::Rgb(139, 134, 130);
pub const ARENA_COLOR: Color = Color::Rgb(76, 187, 23);
pub const OUTER_GROUND_COLOR: Color = Color::Rgb(65, 160, 20);

const DECORATION_COUNT: usize = 24;

/// Tree or rock standing outside the walls
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decoration {
    pub kind: ObstacleKind,
    pub position: Vec3,
    pub scale: f32,
}

/// The ring of scenery around an arena of half-extent `arena`
pub fn decorations(arena: f32) -> Vec<Decoration> {
    let extended = arena * 1.5;

    (0..DECORATION_COUNT)
        .map(|i| {
            let angle = (i as f32 * 15.0).to_radians();
            // Staggered radius so neighbours do not line up
            let distance = extended * 0.9 + (i % 3) as f32 * 0.4;
            let base_y = -0.1 + (i % 5) as f32 * 0.02;
            let scale = 0.8 + ((i * 13) % 50) as f32 / 100.0;

            let (kind, scale) = if i % 2 == 0 {
                (ObstacleKind::Tree, scale * 1.2)
            } else {
                (ObstacleKind::Rock, scale * 1.5)
            };

            Decoration {
                kind,
                position: Vec3::new(angle.sin() * distance, base_y, angle.cos() * distance),
                scale,
            }
        })
        .collect()
}

/// Colour of segment `index` in a snake of `len` segments.
///
/// The head stands out; the body fades from bright green toward teal.
pub fn segment_color(index: usize, len: usize) -> Color {
    if index == 0 {
        return HEAD_COLOR;
    }

    let fade = index as f32 / len.max(1) as f32;
    let (r, g, b) = BODY_BASE;
    Color::Rgb(
        (r * (1.0 - fade * 0.5)) as u8,
        (g * (1.0 - fade * 0.3)) as u8,
        (b + (135.0 - b) * fade) as u8,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decorations_ring_outside_arena() {
        let arena = 20.0;
        let ring = decorations(arena);
        assert_eq!(ring.len(), 24);

        for deco in &ring {
            let horizontal = Vec3::new(deco.position.x, 0.0, deco.position.z).length();
            assert!(horizontal > arena * 1.2);
        }
    }

    #[test]
    fn test_decorations_alternate_and_repeat() {
        let ring = decorations(20.0);
        assert_eq!(ring[0].kind, ObstacleKind::Tree);
        assert_eq!(ring[1].kind, ObstacleKind::Rock);
        assert_eq!(ring, decorations(20.0));

        // First item sits straight down +Z
        assert!(ring[0].position.x.abs() < 1e-5);
        assert!((ring[0].position.z - 27.0).abs() < 1e-4);
    }

    #[test]
    fn test_segment_gradient() {
        assert_eq!(segment_color(0, 5), HEAD_COLOR);

        let Color::Rgb(_, g1, b1) = segment_color(1, 10) else {
            panic!("expected rgb");
        };
        let Color::Rgb(_, g9, b9) = segment_color(9, 10) else {
            panic!("expected rgb");
        };
        assert!(g9 < g1);
        assert!(b9 > b1);
    }
}
