//! Shared world state mutated in place by every physics system
//!
//! The world owns the bodies, the broad-phase grid and its geometry, gravity,
//! the fixed tick and the elapsed time. Everything the input shell is allowed
//! to change goes through the data-level mutators here, which keep the Verlet
//! history consistent via [`Body::reconcile`].

use super::grid::{Bounds, Grid, GridInfo};
use super::states::Body;
use super::vector::NVec2;

#[derive(Debug, Clone)]
pub struct World {
    pub bodies: Vec<Body>,
    pub grid: Grid,
    pub grid_info: GridInfo,
    pub gravity: NVec2,
    pub fixed_dt: f64,
    pub t: f64, // elapsed simulation time
}

/// In-memory copy of the body collection
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    bodies: Vec<Body>,
}

impl Snapshot {
    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}

impl World {
    /// Build a world and reconcile every body against its initial velocity
    pub fn new(bodies: Vec<Body>, gravity: NVec2, fixed_dt: f64, bounds: Bounds, cell_size: f64) -> Self {
        let grid_info = GridInfo::new(bounds, cell_size);
        let grid = Grid::new(&grid_info);
        let mut world = Self {
            bodies,
            grid,
            grid_info,
            gravity,
            fixed_dt,
            t: 0.0,
        };
        for body in world.bodies.iter_mut() {
            body.sanitize();
            body.reconcile(fixed_dt);
        }
        log::debug!(
            "world: {} bodies, {}x{} cells of {}, dt = {}",
            world.bodies.len(),
            world.grid_info.num_cells_x,
            world.grid_info.num_cells_y,
            cell_size,
            fixed_dt
        );
        world
    }

    /// Replace the world rectangle and/or cell size; the grid is resized and emptied
    pub fn reconfigure_grid(&mut self, bounds: Bounds, cell_size: f64) {
        self.grid_info = GridInfo::new(bounds, cell_size);
        self.grid.resize(&self.grid_info);
        log::debug!(
            "grid reconfigured: {}x{} cells",
            self.grid_info.num_cells_x,
            self.grid_info.num_cells_y
        );
    }

    pub fn bounds(&self) -> &Bounds {
        &self.grid_info.bounds
    }

    pub fn body(&self, index: usize) -> Option<&Body> {
        self.bodies.get(index)
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Append a body and return its index
    pub fn add_body(&mut self, mut body: Body) -> usize {
        body.sanitize();
        body.reconcile(self.fixed_dt);
        self.bodies.push(body);
        log::debug!("added body #{}", self.bodies.len() - 1);
        self.bodies.len() - 1
    }

    /// Remove the body at `index`, shifting later indices down by one
    ///
    /// The grid refers to bodies by index, so it is cleared here and stays empty
    /// until the next tick repopulates it.
    pub fn remove_body(&mut self, index: usize) -> Option<Body> {
        if index >= self.bodies.len() {
            return None;
        }
        let body = self.bodies.remove(index);
        self.grid.clear();
        log::debug!("removed body #{index}");
        Some(body)
    }

    /// Apply an arbitrary edit to one body, then re-derive `inverse_mass`,
    /// clamp the edited values and reconcile the Verlet history
    ///
    /// Returns `false` if `index` is out of range.
    pub fn edit_body<F>(&mut self, index: usize, edit: F) -> bool
    where
        F: FnOnce(&mut Body),
    {
        let dt = self.fixed_dt;
        match self.bodies.get_mut(index) {
            Some(body) => {
                edit(body);
                body.sanitize();
                body.reconcile(dt);
                true
            }
            None => false,
        }
    }

    pub fn set_mass(&mut self, index: usize, mass: f64) -> bool {
        self.edit_body(index, |b| b.mass = mass)
    }

    pub fn set_radius(&mut self, index: usize, radius: f64) -> bool {
        self.edit_body(index, |b| b.radius = radius)
    }

    pub fn set_restitution(&mut self, index: usize, restitution: f64) -> bool {
        self.edit_body(index, |b| b.restitution = restitution)
    }

    pub fn set_damping(&mut self, index: usize, damping: f64) -> bool {
        self.edit_body(index, |b| b.damping = damping)
    }

    pub fn set_friction(&mut self, index: usize, friction: f64) -> bool {
        self.edit_body(index, |b| b.friction = friction)
    }

    pub fn set_velocity(&mut self, index: usize, velocity: NVec2) -> bool {
        self.edit_body(index, |b| b.velocity = velocity)
    }

    /// Teleport a body, keeping its current velocity
    pub fn set_position(&mut self, index: usize, position: NVec2) -> bool {
        self.edit_body(index, |b| b.position = position)
    }

    /// Index of the body closest to `point` whose disc contains it
    pub fn pick_body_at(&self, point: NVec2) -> Option<usize> {
        self.bodies
            .iter()
            .enumerate()
            .map(|(i, b)| (i, (b.position - point).norm_squared(), b.radius * b.radius))
            .filter(|&(_, d2, r2)| d2 <= r2)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(i, _, _)| i)
    }

    pub fn kinetic_energy(&self) -> f64 {
        self.bodies.iter().map(Body::kinetic_energy).sum()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            bodies: self.bodies.clone(),
        }
    }

    /// Copy a snapshot back in, re-deriving `inverse_mass` and
    /// `previous_position` for every body. An empty snapshot is a no-op
    pub fn restore(&mut self, snapshot: &Snapshot) -> bool {
        if snapshot.is_empty() {
            return false;
        }
        self.bodies = snapshot.bodies.clone();
        let dt = self.fixed_dt;
        for body in self.bodies.iter_mut() {
            body.sanitize();
            body.reconcile(dt);
        }
        self.grid.clear();
        log::debug!("restored {} bodies from snapshot", self.bodies.len());
        true
    }
}
