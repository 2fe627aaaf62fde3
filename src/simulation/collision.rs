//! Collision detection and response
//!
//! Runs after integration every tick:
//! 1. rebuild the grid from the integrated positions
//! 2. broad phase: pairs sharing a cell or sitting in neighbouring cells
//! 3. narrow phase: exact circle/circle overlap
//! 4. response: positional correction by inverse-mass share, then a
//!    restitution impulse along the contact normal
//! 5. world-rectangle boundaries, independent of the grid
//!
//! Any velocity change made here is followed by [`Body::reconcile`], otherwise
//! the next Verlet step would silently restore the pre-collision velocity.

use super::engine::RestitutionRule;
use super::grid::{Bounds, Grid, GridInfo};
use super::states::Body;
use super::systems::PhysicsSystem;
use super::vector::{normalize_or, vec2, NVec2};
use super::world::World;

/// Centre distances at or below this use the fixed fallback normal
pub const COINCIDENT_EPS: f64 = 1e-9;

/// A confirmed overlap between bodies `a` and `b`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    pub a: usize,
    pub b: usize,
    pub normal: NVec2,    // unit, from a towards b
    pub penetration: f64, // (ra + rb) - distance, positive
}

/// Per-tick counters, kept for logging and diagnostics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionStats {
    pub candidates: usize,
    pub contacts: usize,
    pub boundary_hits: usize,
}

/// How many cells away a partner can sit and still overlap
///
/// Two circles can only touch if their centres are closer than the sum of
/// their radii, so `ceil(2 * max_radius / cell_size)` cells is enough.
pub fn neighbour_reach(info: &GridInfo, bodies: &[Body]) -> usize {
    let max_radius = bodies.iter().map(|b| b.radius).fold(0.0, f64::max);
    let reach = (2.0 * max_radius / info.cell_size).ceil() as usize;
    reach.clamp(1, info.num_cells_x.max(info.num_cells_y))
}

#[inline]
fn ordered(i: usize, j: usize) -> (usize, usize) {
    if i < j {
        (i, j)
    } else {
        (j, i)
    }
}

/// Broad phase: every unordered pair that shares a cell or lies within
/// `reach` cells of each other, each pair exactly once
///
/// Only "forward" neighbours (same row to the right, or any row above) are
/// visited from a cell, so a pair of cells is never scanned twice. Pairs come
/// out as `(low, high)` in row-major cell order.
pub fn candidate_pairs(grid: &Grid, info: &GridInfo, reach: usize, out: &mut Vec<(usize, usize)>) {
    let nx = info.num_cells_x as isize;
    let ny = info.num_cells_y as isize;
    let r = reach as isize;

    for cy in 0..ny {
        for cx in 0..nx {
            let cell = grid.cell((cx + cy * nx) as usize);
            if cell.is_empty() {
                continue;
            }

            // same cell
            for (k, &i) in cell.iter().enumerate() {
                for &j in &cell[k + 1..] {
                    out.push(ordered(i, j));
                }
            }

            // forward half of the neighbourhood
            for dy in 0..=r {
                for dx in -r..=r {
                    if dy == 0 && dx <= 0 {
                        continue;
                    }
                    let (ox, oy) = (cx + dx, cy + dy);
                    if ox < 0 || ox >= nx || oy >= ny {
                        continue;
                    }
                    let other = grid.cell((ox + oy * nx) as usize);
                    for &i in cell {
                        for &j in other {
                            out.push(ordered(i, j));
                        }
                    }
                }
            }
        }
    }
}

/// Every unordered pair `(i, j)` with `i < j`; the O(n^2) reference broad phase
pub fn brute_force_pairs(n: usize, out: &mut Vec<(usize, usize)>) {
    for i in 0..n {
        for j in (i + 1)..n {
            out.push((i, j));
        }
    }
}

/// Narrow phase for two circles
///
/// Returns `(normal_a_to_b, penetration)` when `distance^2 < (ra + rb)^2`.
/// Static/static pairs never collide.
pub fn detect(a: &Body, b: &Body) -> Option<(NVec2, f64)> {
    if a.is_static() && b.is_static() {
        return None;
    }

    let diff = b.position - a.position;
    let dist2 = diff.norm_squared();
    let sum_r = a.radius + b.radius;
    if dist2 >= sum_r * sum_r {
        return None;
    }

    let dist = dist2.sqrt();
    // perfectly stacked centres: push apart vertically
    let normal = normalize_or(&diff, COINCIDENT_EPS, vec2(0.0, 1.0));
    Some((normal, sum_r - dist))
}

/// Narrow phase on bodies `i` and `j` of a slice
pub fn detect_pair(bodies: &[Body], i: usize, j: usize) -> Option<Contact> {
    detect(&bodies[i], &bodies[j]).map(|(normal, penetration)| Contact {
        a: i,
        b: j,
        normal,
        penetration,
    })
}

/// Two distinct mutable bodies out of one slice
fn pair_mut(bodies: &mut [Body], i: usize, j: usize) -> (&mut Body, &mut Body) {
    debug_assert!(i != j, "a body cannot collide with itself");
    if i < j {
        let (lo, hi) = bodies.split_at_mut(j);
        (&mut lo[i], &mut hi[0])
    } else {
        let (lo, hi) = bodies.split_at_mut(i);
        (&mut hi[0], &mut lo[j])
    }
}

/// Separate an overlapping pair and exchange the normal impulse
///
/// The full penetration is removed, split by inverse mass so static bodies
/// never move. No impulse is applied when the bodies already separate.
pub fn resolve_contact(bodies: &mut [Body], contact: &Contact, rule: RestitutionRule, dt: f64) {
    let (a, b) = pair_mut(bodies, contact.a, contact.b);

    let inv_mass_sum = a.inverse_mass + b.inverse_mass;
    if inv_mass_sum == 0.0 {
        return;
    }

    let n = contact.normal;
    let correction = n * (contact.penetration / inv_mass_sum);
    a.position -= correction * a.inverse_mass;
    b.position += correction * b.inverse_mass;

    let vel_along_normal = (b.velocity - a.velocity).dot(&n);
    if vel_along_normal <= 0.0 {
        let e = rule.combine(a.restitution, b.restitution);
        let j = -(1.0 + e) * vel_along_normal / inv_mass_sum;
        let impulse = n * j;
        a.velocity -= impulse * a.inverse_mass;
        b.velocity += impulse * b.inverse_mass;
    }

    a.reconcile(dt);
    b.reconcile(dt);
}

/// Clamp dynamic bodies back inside `bounds` and bounce them off the edges
///
/// Only the velocity component moving into an edge is reflected (scaled by
/// the body's restitution). Returns how many bodies touched an edge.
pub fn resolve_boundaries(bodies: &mut [Body], bounds: &Bounds, dt: f64) -> usize {
    let mut hits = 0;

    for b in bodies.iter_mut().filter(|b| !b.is_static()) {
        let mut hit = false;
        let e = b.restitution;

        // ground
        if b.position.y - b.radius < bounds.min_y {
            b.position.y = bounds.min_y + b.radius;
            if b.velocity.y < 0.0 {
                b.velocity.y = -e * b.velocity.y;
            }
            hit = true;
        }
        // ceiling
        if b.position.y + b.radius > bounds.max_y {
            b.position.y = bounds.max_y - b.radius;
            if b.velocity.y > 0.0 {
                b.velocity.y = -e * b.velocity.y;
            }
            hit = true;
        }
        // left wall
        if b.position.x - b.radius < bounds.min_x {
            b.position.x = bounds.min_x + b.radius;
            if b.velocity.x < 0.0 {
                b.velocity.x = -e * b.velocity.x;
            }
            hit = true;
        }
        // right wall
        if b.position.x + b.radius > bounds.max_x {
            b.position.x = bounds.max_x - b.radius;
            if b.velocity.x > 0.0 {
                b.velocity.x = -e * b.velocity.x;
            }
            hit = true;
        }

        if hit {
            b.reconcile(dt);
            hits += 1;
        }
    }

    hits
}

/// Pipeline stage: grid rebuild, pair contacts, then boundaries
#[derive(Debug, Clone, Default)]
pub struct CollisionSystem {
    pub restitution_rule: RestitutionRule,
    pairs: Vec<(usize, usize)>,
    stats: CollisionStats,
}

impl CollisionSystem {
    pub fn new(restitution_rule: RestitutionRule) -> Self {
        Self {
            restitution_rule,
            ..Default::default()
        }
    }

    /// Counters from the most recent tick
    pub fn stats(&self) -> CollisionStats {
        self.stats
    }
}

impl PhysicsSystem for CollisionSystem {
    fn name(&self) -> &'static str {
        "collision"
    }

    fn update(&mut self, world: &mut World, dt: f64) {
        let World {
            bodies,
            grid,
            grid_info,
            ..
        } = world;

        grid.rebuild(grid_info, bodies);

        self.pairs.clear();
        let reach = neighbour_reach(grid_info, bodies);
        candidate_pairs(grid, grid_info, reach, &mut self.pairs);

        let rule = self.restitution_rule;
        let mut contacts = 0;
        for &(i, j) in self.pairs.iter() {
            if let Some(contact) = detect_pair(bodies, i, j) {
                resolve_contact(bodies, &contact, rule, dt);
                contacts += 1;
            }
        }

        let boundary_hits = resolve_boundaries(bodies, &grid_info.bounds, dt);

        self.stats = CollisionStats {
            candidates: self.pairs.len(),
            contacts,
            boundary_hits,
        };
        log::trace!(
            "collision: {} candidates, {} contacts, {} boundary hits",
            self.stats.candidates,
            self.stats.contacts,
            self.stats.boundary_hits
        );
    }
}
