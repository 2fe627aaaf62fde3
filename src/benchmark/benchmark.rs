use std::time::Instant;

use crate::simulation::collision::{brute_force_pairs, candidate_pairs, detect_pair, neighbour_reach};
use crate::simulation::grid::Bounds;
use crate::simulation::states::Body;
use crate::simulation::systems::SystemManager;
use crate::simulation::vector::NVec2;
use crate::simulation::world::World;

/// Helper to build a world with `n` small bodies spread over the rectangle
fn make_world(n: usize) -> World {
    let half = 200.0;
    let mut bodies = Vec::with_capacity(n);

    for i in 0..n {
        let i_f = i as f64;
        // deterministic positions, no rand needed
        let x = NVec2::new((i_f * 0.37).sin() * half * 0.95, (i_f * 0.13).cos() * half * 0.95);
        let v = NVec2::new((i_f * 0.71).cos() * 3.0, (i_f * 0.29).sin() * 3.0);
        bodies.push(Body::new(x, v, 1.0, 0.5).with_restitution(0.9));
    }

    World::new(bodies, NVec2::new(0.0, -9.8), 1.0 / 60.0, Bounds::new(-half, half, -half, half), 2.0)
}

/// Grid broad phase vs the all-pairs scan, contacts must agree
pub fn bench_broad_phase() {
    let ns = [500, 1000, 2000, 4000, 8000];

    for n in ns {
        let mut world = make_world(n);
        let mut pairs = Vec::new();

        // Time grid
        let t0 = Instant::now();
        world.grid.rebuild(&world.grid_info, &world.bodies);
        let reach = neighbour_reach(&world.grid_info, &world.bodies);
        candidate_pairs(&world.grid, &world.grid_info, reach, &mut pairs);
        let grid_contacts = pairs.iter().filter(|&&(i, j)| detect_pair(&world.bodies, i, j).is_some()).count();
        let dt_grid = t0.elapsed().as_secs_f64();
        let grid_candidates = pairs.len();

        // Time brute force
        pairs.clear();
        let t1 = Instant::now();
        brute_force_pairs(n, &mut pairs);
        let brute_contacts = pairs.iter().filter(|&&(i, j)| detect_pair(&world.bodies, i, j).is_some()).count();
        let dt_brute = t1.elapsed().as_secs_f64();

        println!(
            "N = {n:5}, grid = {:8.6} s ({grid_candidates} candidates), brute = {:8.6} s, contacts {grid_contacts}/{brute_contacts}",
            dt_grid, dt_brute
        );
    }
}

/// Per-step cost of the full pipeline for a range of n
/// Paste output directly into a spreadsheet to graph
pub fn bench_step_curve() {
    println!("N,step_ms");

    for n in (500..=10000).step_by(500) {
        let steps = if n <= 2000 { 20 } else { 5 };
        let mut world = make_world(n);
        let mut systems = SystemManager::standard();
        let dt = world.fixed_dt;

        // Warm-up one step
        systems.step(&mut world, dt);

        let t0 = Instant::now();
        for _ in 0..steps {
            systems.step(&mut world, dt);
        }
        let ms = t0.elapsed().as_secs_f64() * 1000.0 / steps as f64;

        println!("{},{:.6}", n, ms);
    }
}
