// src/graph/layout/zoned.rs
//! Zoned force-directed placement.
//!
//! The canvas is split into three columns: utility on the left, core in
//! the middle, standalone on the right. Utility and standalone nodes are
//! laid out on a row-major grid in their zone. Core nodes start at random
//! points in the core zone and are relaxed for a fixed number of ticks
//! (repulsion, edge attraction, collision, centering), then pushed apart
//! until no two nodes are closer than `min_separation` and snapped to the
//! grid.

use rand::Rng;
use std::collections::HashMap;
use std::f64::consts::SQRT_2;

use crate::config::LayoutConfig;
use crate::graph::model::{Graph, Position, Role};

const ALPHA_MIN: f64 = 0.001;
const VELOCITY_DECAY: f64 = 0.4;
const UTILITY_SHARE: f64 = 0.2;
const MAX_SEPARATION_SWEEPS: usize = 10_000;
const EPSILON: f64 = 1e-9;

/// Axis-aligned rectangle, origin at its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Zone {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Zone {
    #[must_use]
    pub fn center(&self) -> Position {
        Position::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    #[must_use]
    pub fn contains(&self, p: Position) -> bool {
        p.x >= self.x && p.x <= self.x + self.width && p.y >= self.y && p.y <= self.y + self.height
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Zones {
    pub utility: Zone,
    pub core: Zone,
    pub standalone: Zone,
}

impl Zones {
    #[must_use]
    pub fn for_canvas(config: &LayoutConfig) -> Self {
        let w = config.canvas_width;
        let h = config.canvas_height;
        let side = w * UTILITY_SHARE;
        Self {
            utility: Zone { x: 0.0, y: 0.0, width: side, height: h },
            core: Zone { x: side, y: 0.0, width: w - 2.0 * side, height: h },
            standalone: Zone { x: w - side, y: 0.0, width: side, height: h },
        }
    }

    #[must_use]
    pub fn zone(&self, role: Role) -> Zone {
        match role {
            Role::Core => self.core,
            Role::Utility => self.utility,
            Role::Standalone => self.standalone,
        }
    }
}

/// Places every node of a classified graph. Only the initial core
/// placement draws from `rng`.
#[must_use]
pub fn layout<R: Rng>(graph: &Graph, config: &LayoutConfig, rng: &mut R) -> Graph {
    let zones = Zones::for_canvas(config);
    let mut positions = vec![Position::default(); graph.len()];
    let mut fixed = Vec::new();

    for role in [Role::Utility, Role::Standalone] {
        let members = members_of(graph, role);
        let cells = grid_cells(members.len(), zones.zone(role), config.min_separation);
        for (&i, cell) in members.iter().zip(cells) {
            positions[i] = cell;
            fixed.push(cell);
        }
    }

    let core = members_of(graph, Role::Core);
    if !core.is_empty() {
        let relaxed = simulate(graph, &core, zones.core, config, rng);
        // Snapping moves each point by at most grid/sqrt(2); reserve room for two.
        let spacing = config.min_separation + config.grid_size.max(0.0) * SQRT_2;
        let separated = separate(relaxed, &fixed, spacing);
        for (&i, p) in core.iter().zip(separated) {
            positions[i] = snap(p, config.grid_size);
        }
    }

    tracing::debug!(nodes = graph.len(), core = core.len(), "zoned layout finished");
    graph.annotate(|i, node| node.position = positions[i])
}

fn members_of(graph: &Graph, role: Role) -> Vec<usize> {
    graph
        .nodes()
        .iter()
        .enumerate()
        .filter(|(_, n)| n.role() == role)
        .map(|(i, _)| i)
        .collect()
}

/// Row-major grid with side `ceil(sqrt(count))`, cells at least `min_pitch` apart.
///
/// Separation wins over containment: once `side * min_pitch` exceeds the
/// zone, the grid keeps its pitch and runs past the zone's right and bottom
/// edges. With the default canvas that happens above 25 nodes per side zone.
#[must_use]
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn grid_cells(count: usize, zone: Zone, min_pitch: f64) -> Vec<Position> {
    if count == 0 {
        return Vec::new();
    }
    let side = ((count as f64).sqrt().ceil() as usize).max(1);
    let pitch_x = (zone.width / side as f64).max(min_pitch);
    let pitch_y = (zone.height / side as f64).max(min_pitch);
    (0..count)
        .map(|i| {
            let col = (i % side) as f64;
            let row = (i / side) as f64;
            Position::new(
                zone.x + pitch_x * (col + 0.5),
                zone.y + pitch_y * (row + 0.5),
            )
        })
        .collect()
}

#[derive(Debug, Clone, Copy, Default)]
struct Body {
    x: f64,
    y: f64,
    vx: f64,
    vy: f64,
}

struct Forces<'c> {
    config: &'c LayoutConfig,
    zone: Zone,
    links: Vec<(usize, usize)>,
    degree: Vec<usize>,
}

#[allow(clippy::cast_precision_loss)]
fn simulate<R: Rng>(
    graph: &Graph,
    core: &[usize],
    zone: Zone,
    config: &LayoutConfig,
    rng: &mut R,
) -> Vec<Position> {
    let local: HashMap<usize, usize> = core.iter().enumerate().map(|(l, &g)| (g, l)).collect();
    let adjacency = graph.successors();

    let mut links = Vec::new();
    let mut degree = vec![0usize; core.len()];
    for (l, &g) in core.iter().enumerate() {
        for target in &adjacency[g] {
            if let Some(&t) = local.get(target) {
                if t != l {
                    links.push((l, t));
                    degree[l] += 1;
                    degree[t] += 1;
                }
            }
        }
    }

    let center = zone.center();
    let mut bodies: Vec<Body> = core
        .iter()
        .map(|_| Body {
            x: center.x + (rng.gen::<f64>() - 0.5) * zone.width * 0.8,
            y: center.y + (rng.gen::<f64>() - 0.5) * zone.height * 0.8,
            ..Body::default()
        })
        .collect();

    let forces = Forces {
        config,
        zone,
        links,
        degree,
    };
    let ticks = config.iterations.max(1);
    let alpha_decay = 1.0 - ALPHA_MIN.powf(1.0 / ticks as f64);
    let mut alpha = 1.0;

    for _ in 0..config.iterations {
        alpha -= alpha * alpha_decay;
        forces.tick(&mut bodies, alpha);
    }

    bodies.iter().map(|b| Position::new(b.x, b.y)).collect()
}

impl Forces<'_> {
    fn tick(&self, bodies: &mut [Body], alpha: f64) {
        self.attract(bodies, alpha);
        self.repel(bodies, alpha);
        self.collide(bodies);
        for b in bodies.iter_mut() {
            b.vx *= 1.0 - VELOCITY_DECAY;
            b.vy *= 1.0 - VELOCITY_DECAY;
            b.x += b.vx;
            b.y += b.vy;
        }
        self.recenter(bodies);
        self.clamp(bodies);
    }

    /// Springs along edges towards `link_distance`.
    #[allow(clippy::cast_precision_loss)]
    fn attract(&self, bodies: &mut [Body], alpha: f64) {
        for &(s, t) in &self.links {
            let total = (self.degree[s] + self.degree[t]) as f64;
            let bias = self.degree[s] as f64 / total;
            let mut dx = (bodies[t].x + bodies[t].vx) - (bodies[s].x + bodies[s].vx);
            let mut dy = (bodies[t].y + bodies[t].vy) - (bodies[s].y + bodies[s].vy);
            let l = dx.hypot(dy).max(EPSILON);
            let k = (l - self.config.link_distance) / l * alpha * self.config.link_strength;
            dx *= k;
            dy *= k;
            bodies[t].vx -= dx * bias;
            bodies[t].vy -= dy * bias;
            bodies[s].vx += dx * (1.0 - bias);
            bodies[s].vy += dy * (1.0 - bias);
        }
    }

    /// Many-body charge between every pair of core nodes.
    #[allow(clippy::cast_precision_loss)]
    fn repel(&self, bodies: &mut [Body], alpha: f64) {
        let min2 = self.config.charge_distance_min.powi(2);
        let max2 = self.config.charge_distance_max.powi(2);
        let snapshot: Vec<(f64, f64)> = bodies.iter().map(|b| (b.x, b.y)).collect();
        for (i, body) in bodies.iter_mut().enumerate() {
            for (j, &(xj, yj)) in snapshot.iter().enumerate() {
                if i == j {
                    continue;
                }
                let (mut dx, dy) = (xj - snapshot[i].0, yj - snapshot[i].1);
                let mut l = dx * dx + dy * dy;
                if l >= max2 {
                    continue;
                }
                if l < EPSILON {
                    dx = jiggle(i, j);
                    l = dx * dx;
                }
                if l < min2 {
                    l = (min2 * l).sqrt();
                }
                let w = self.config.charge_strength * alpha / l;
                body.vx += dx * w;
                body.vy += dy * w;
            }
        }
    }

    /// Pushes overlapping pairs apart along their centre line.
    fn collide(&self, bodies: &mut [Body]) {
        let reach = self.config.min_separation;
        for i in 0..bodies.len() {
            for j in (i + 1)..bodies.len() {
                let mut dx = (bodies[i].x + bodies[i].vx) - (bodies[j].x + bodies[j].vx);
                let dy = (bodies[i].y + bodies[i].vy) - (bodies[j].y + bodies[j].vy);
                let mut l = dx.hypot(dy);
                if l >= reach {
                    continue;
                }
                if l < EPSILON {
                    dx = jiggle(i, j);
                    l = dx.abs();
                }
                let k = (reach - l) / l * 0.5;
                bodies[i].vx += dx * k;
                bodies[i].vy += dy * k;
                bodies[j].vx -= dx * k;
                bodies[j].vy -= dy * k;
            }
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn recenter(&self, bodies: &mut [Body]) {
        let n = bodies.len() as f64;
        let cx = bodies.iter().map(|b| b.x).sum::<f64>() / n;
        let cy = bodies.iter().map(|b| b.y).sum::<f64>() / n;
        let target = self.zone.center();
        let sx = (target.x - cx) * self.config.center_strength;
        let sy = (target.y - cy) * self.config.center_strength;
        for b in bodies {
            b.x += sx;
            b.y += sy;
        }
    }

    fn clamp(&self, bodies: &mut [Body]) {
        let inset_x = (self.config.min_separation / 2.0).min(self.zone.width / 2.0);
        let inset_y = (self.config.min_separation / 2.0).min(self.zone.height / 2.0);
        let (lo_x, hi_x) = (self.zone.x + inset_x, self.zone.x + self.zone.width - inset_x);
        let (lo_y, hi_y) = (self.zone.y + inset_y, self.zone.y + self.zone.height - inset_y);
        for b in bodies {
            b.x = b.x.clamp(lo_x, hi_x);
            b.y = b.y.clamp(lo_y, hi_y);
        }
    }
}

/// Deterministic nudge for coincident points.
#[allow(clippy::cast_precision_loss)]
fn jiggle(i: usize, j: usize) -> f64 {
    let sign = if i < j { -1.0 } else { 1.0 };
    sign * 1e-6 * (1 + i + j) as f64
}

/// Moves `points` until every pair, and every point against each fixed
/// obstacle, is at least `spacing` apart.
fn separate(mut points: Vec<Position>, fixed: &[Position], spacing: f64) -> Vec<Position> {
    for _ in 0..MAX_SEPARATION_SWEEPS {
        let mut moved = false;
        for i in 0..points.len() {
            for j in (i + 1)..points.len() {
                moved |= push_pair(&mut points, i, j, spacing);
            }
            for &obstacle in fixed {
                moved |= push_off(&mut points[i], obstacle, spacing, i);
            }
        }
        if !moved {
            break;
        }
    }
    points
}

fn push_pair(points: &mut [Position], i: usize, j: usize, spacing: f64) -> bool {
    let (a, b) = (points[i], points[j]);
    let d = a.distance(b);
    if d >= spacing - EPSILON {
        return false;
    }
    let (ux, uy) = direction(a, b, d, i + j);
    let shift = (spacing - d) / 2.0 + EPSILON;
    points[i] = Position::new(a.x + ux * shift, a.y + uy * shift);
    points[j] = Position::new(b.x - ux * shift, b.y - uy * shift);
    true
}

fn push_off(point: &mut Position, obstacle: Position, spacing: f64, salt: usize) -> bool {
    let d = point.distance(obstacle);
    if d >= spacing - EPSILON {
        return false;
    }
    let (ux, uy) = direction(*point, obstacle, d, salt);
    let shift = spacing - d + EPSILON;
    *point = Position::new(point.x + ux * shift, point.y + uy * shift);
    true
}

/// Unit vector from `b` towards `a`; a fixed angle per `salt` when they coincide.
#[allow(clippy::cast_precision_loss)]
fn direction(a: Position, b: Position, d: f64, salt: usize) -> (f64, f64) {
    if d < EPSILON {
        let angle = salt as f64 * 2.399_963_229_728_653; // golden angle
        return (angle.cos(), angle.sin());
    }
    ((a.x - b.x) / d, (a.y - b.y) / d)
}

fn snap(p: Position, grid: f64) -> Position {
    if grid <= 0.0 {
        return p;
    }
    Position::new((p.x / grid).round() * grid, (p.y / grid).round() * grid)
}
