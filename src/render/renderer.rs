use glam::Vec3;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        Block, BorderType, Borders, Clear, Paragraph,
        canvas::{Canvas, Circle, Context, Line as CanvasLine, Points},
    },
};

use super::camera::Camera3D;
use super::projector::{Projector, ScreenPoint};
use super::scenery::{
    self, APPLE_COLOR, ARENA_COLOR, OUTER_GROUND_COLOR, ROCK_COLOR, TREE_COLOR, TRUNK_COLOR,
    WALL_COLOR,
};
use crate::game::{GameState, ObstacleKind};
use crate::metrics::GameMetrics;

const SEGMENT_RADIUS: f32 = 0.5;
const APPLE_RADIUS: f32 = 0.5;
const WALL_HEIGHT: f32 = 1.0;
const WALL_OFFSET: f32 = 0.5;
const GRID_DIVISIONS: usize = 8;
/// Sides used to approximate a cone's base
const CONE_SIDES: usize = 6;

/// A round shape, drawn back to front after the wireframe
struct Blob {
    centre: ScreenPoint,
    radius: f64,
    color: Color,
}

#[derive(Default)]
struct Scene {
    lines: Vec<CanvasLine>,
    blobs: Vec<Blob>,
}

impl Scene {
    fn line(&mut self, projector: &Projector, a: Vec3, b: Vec3, color: Color) {
        if let Some((p, q)) = projector.project_line(a, b) {
            self.lines.push(CanvasLine {
                x1: p.x,
                y1: p.y,
                x2: q.x,
                y2: q.y,
                color,
            });
        }
    }

    /// Closed outline through `points` at their own heights
    fn outline(&mut self, projector: &Projector, points: &[Vec3], color: Color) {
        for (i, a) in points.iter().enumerate() {
            let b = points[(i + 1) % points.len()];
            self.line(projector, *a, b, color);
        }
    }

    fn sphere(&mut self, projector: &Projector, centre: Vec3, radius: f32, color: Color) {
        if let Some(point) = projector.project(centre) {
            self.blobs.push(Blob {
                radius: projector.radius(radius, &point),
                centre: point,
                color,
            });
        }
    }

    fn tree(&mut self, projector: &Projector, base: Vec3, scale: f32) {
        let trunk_top = base + Vec3::Y * 0.8;
        self.line(projector, base, trunk_top, TRUNK_COLOR);

        let cone_base = base + Vec3::Y;
        let apex = cone_base + Vec3::Y * (2.0 * scale);
        let ring: Vec<Vec3> = (0..CONE_SIDES)
            .map(|i| {
                let angle = i as f32 / CONE_SIDES as f32 * std::f32::consts::TAU;
                cone_base + Vec3::new(angle.cos(), 0.0, angle.sin()) * (0.7 * scale)
            })
            .collect();

        self.outline(projector, &ring, TREE_COLOR);
        for corner in &ring {
            self.line(projector, *corner, apex, TREE_COLOR);
        }
    }

    fn rock(&mut self, projector: &Projector, base: Vec3, scale: f32, color: Color) {
        // Rocks are squat, so sit the blob low
        self.sphere(projector, base + Vec3::Y * (0.3 * scale), 0.6 * scale, color);
    }

    fn obstacle(&mut self, projector: &Projector, kind: ObstacleKind, base: Vec3, scale: f32) {
        match kind {
            ObstacleKind::Tree => self.tree(projector, base, scale),
            ObstacleKind::Rock => self.rock(projector, base, scale, ROCK_COLOR),
        }
    }

    fn build(projector: &Projector, state: &GameState) -> Self {
        let mut scene = Scene::default();
        let arena = state.arena_size;

        // Ground: the outer field, then the arena grid
        let outer = arena * 1.5;
        scene.outline(projector, &square(outer, -0.1), OUTER_GROUND_COLOR);
        let gap = arena * 2.0 / GRID_DIVISIONS as f32;
        for k in 0..=GRID_DIVISIONS {
            let offset = -arena + gap * k as f32;
            scene.line(
                projector,
                Vec3::new(offset, 0.0, -arena),
                Vec3::new(offset, 0.0, arena),
                ARENA_COLOR,
            );
            scene.line(
                projector,
                Vec3::new(-arena, 0.0, offset),
                Vec3::new(arena, 0.0, offset),
                ARENA_COLOR,
            );
        }

        // Walls with corner posts
        let wall = arena + WALL_OFFSET;
        scene.outline(projector, &square(wall, 0.0), WALL_COLOR);
        scene.outline(projector, &square(wall, WALL_HEIGHT), WALL_COLOR);
        for corner in square(wall, 0.0) {
            scene.line(
                projector,
                corner,
                corner + Vec3::Y * (WALL_HEIGHT * 1.5),
                WALL_COLOR,
            );
        }

        for deco in scenery::decorations(arena) {
            scene.obstacle(projector, deco.kind, deco.position, deco.scale);
        }
        for obs in &state.obstacles {
            scene.obstacle(projector, obs.kind, obs.position, obs.scale);
        }

        let segments = state.snake.segments();
        for (i, segment) in segments.iter().enumerate() {
            scene.sphere(
                projector,
                *segment,
                SEGMENT_RADIUS,
                scenery::segment_color(i, segments.len()),
            );
        }
        scene.sphere(
            projector,
            state.snake.head() + Vec3::new(0.2, 0.2, 0.0),
            0.15,
            Color::Rgb(255, 255, 200),
        );

        scene.sphere(projector, state.apple, APPLE_RADIUS, APPLE_COLOR);
        scene.sphere(
            projector,
            state.apple + Vec3::splat(0.15),
            0.1,
            Color::White,
        );

        // Painter's order
        scene
            .blobs
            .sort_by(|a, b| b.centre.depth.total_cmp(&a.centre.depth));
        scene
    }

    fn paint(&self, ctx: &mut Context) {
        for line in &self.lines {
            ctx.draw(line);
        }
        ctx.layer();

        for blob in &self.blobs {
            // Concentric rings approximate a filled disc
            for ring in 1..=3 {
                ctx.draw(&Circle {
                    x: blob.centre.x,
                    y: blob.centre.y,
                    radius: blob.radius * ring as f64 / 3.0,
                    color: blob.color,
                });
            }
            ctx.draw(&Points {
                coords: &[(blob.centre.x, blob.centre.y)],
                color: blob.color,
            });
        }
    }
}

/// Corners of an axis-aligned square of half-extent `half` at height `y`
fn square(half: f32, y: f32) -> [Vec3; 4] {
    [
        Vec3::new(-half, y, -half),
        Vec3::new(half, y, -half),
        Vec3::new(half, y, half),
        Vec3::new(-half, y, half),
    ]
}

/// A `width` x `height` rectangle centred in `area`
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        state: &GameState,
        camera: &Camera3D,
        metrics: &GameMetrics,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Scene
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        let stats = self.render_stats(state, metrics);
        frame.render_widget(stats, chunks[0]);

        self.render_scene(frame, chunks[1], state, camera);

        if !state.is_playing() {
            let popup = centered(chunks[1], 44, 9);
            frame.render_widget(Clear, popup);
            frame.render_widget(self.render_game_over(state, metrics), popup);
        }

        let controls = self.render_controls();
        frame.render_widget(controls, chunks[2]);
    }

    fn render_scene(&self, frame: &mut Frame, area: Rect, state: &GameState, camera: &Camera3D) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .border_style(Style::default().fg(Color::White))
            .title(" Snake 3D ");

        // Terminal cells are about twice as tall as they are wide
        let inner = block.inner(area);
        let aspect = inner.width as f32 / (inner.height.max(1) as f32 * 2.0);

        let projector = Projector::new(camera, aspect);
        let scene = Scene::build(&projector, state);

        let canvas = Canvas::default()
            .block(block)
            .marker(Marker::Braille)
            .x_bounds(projector.x_bounds())
            .y_bounds(projector.y_bounds())
            .paint(|ctx| scene.paint(ctx));

        frame.render_widget(canvas, area);
    }

    fn render_stats(&self, state: &GameState, metrics: &GameMetrics) -> Paragraph<'_> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);

        let text = vec![Line::from(vec![
            Span::styled("Score: ", label),
            Span::styled(
                state.score.to_string(),
                value.add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Length: ", label),
            Span::styled(state.snake.len().to_string(), value),
            Span::raw("    "),
            Span::styled("Moves: ", label),
            Span::styled(state.moves.to_string(), value),
            Span::raw("    "),
            Span::styled("Step: ", label),
            Span::styled(format!("{:.0}ms", state.move_interval * 1000.0), value),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(metrics.format_time(), value),
            Span::raw("    "),
            Span::styled("Best: ", label),
            Span::styled(metrics.best_score.to_string(), value),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_game_over(&self, state: &GameState, metrics: &GameMetrics) -> Paragraph<'_> {
        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    state.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("   Games: {}", metrics.games_played),
                    Style::default().fg(Color::Gray),
                ),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("PRESS ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "R",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" TO RESTART", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to steer | "),
            Span::styled("R", Style::default().fg(Color::Green)),
            Span::raw(" to restart | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}
