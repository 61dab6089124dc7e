//! Headless black hole demo
//!
//! Loads a scenario from YAML (or scatters a random cluster around a black
//! hole), runs a fixed number of steps and prints what was absorbed and what
//! collided along the way.
//!
//! Run with: cargo run --package interstellar --example black_hole_demo -- [scenario.yaml]
//! Set RUST_LOG=interstellar=debug to see every resolved interaction.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use nalgebra::{Point3, Vector3};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaChaRng;

use interstellar::body::{Color, NewBody};
use interstellar::config::ScenarioConfig;
use interstellar::simulation::Simulation;

const STEPS: usize = 500;
const DT: f64 = 1e-14;

fn random_cluster(seed: u64, n: usize) -> ScenarioConfig {
    let mut rng = ChaChaRng::seed_from_u64(seed);

    let mut bodies = vec![
        NewBody::new(Point3::new(400.0, 400.0, 400.0), 4e47)
            .with_radius(5.0)
            .with_color(Color([20, 20, 20])),
    ];
    for _ in 0..n {
        let position = Point3::new(
            rng.gen_range(340.0..460.0),
            rng.gen_range(340.0..460.0),
            rng.gen_range(340.0..460.0),
        );
        let velocity = Vector3::new(
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
        );
        let mass = 10f64.powf(rng.gen_range(22.0..30.0));
        bodies.push(NewBody::new(position, mass).with_velocity(velocity));
    }

    ScenarioConfig {
        bodies,
        ..ScenarioConfig::default()
    }
}

fn load_scenario(path: &Path) -> Result<ScenarioConfig> {
    let yaml = fs::read_to_string(path)
        .with_context(|| format!("failed to read scenario {}", path.display()))?;
    Ok(ScenarioConfig::from_yaml_str(&yaml)?)
}

fn main() -> Result<()> {
    env_logger::init();

    let scenario = match std::env::args().nth(1) {
        Some(path) => load_scenario(Path::new(&path))?,
        None => random_cluster(42, 200),
    };

    let mut sim = Simulation::from_scenario(scenario)?;
    let physics = sim.config().physics.clone();

    println!("Black hole demo\n");
    println!("{}", "=".repeat(60));
    println!("Bodies: {}", sim.bodies().len());
    println!("Live mass: {:.4e}", sim.state().live_mass(&physics));

    let mut absorptions = 0;
    let mut collisions = 0;
    for i in 0..STEPS {
        let report = sim.step(DT);
        absorptions += report.absorptions;
        collisions += report.collisions;

        if report.absorptions + report.collisions > 0 {
            println!(
                "  step {:4}: {} absorbed, {} collided, {} live",
                i,
                report.absorptions,
                report.collisions,
                sim.state().live_count(&physics)
            );
        }
    }

    let removed = sim.compact();

    println!("{}", "=".repeat(60));
    println!("Simulated time: {:.3e}", sim.time());
    println!("Absorptions: {absorptions}, collisions: {collisions}");
    println!("Removed bodies: {}", removed.len());
    println!("Survivors: {}", sim.bodies().len());
    println!("Live mass: {:.4e}", sim.state().live_mass(&physics));

    for view in sim.snapshot().iter().filter(|v| v.mass > 1e40) {
        println!(
            "  body {:3}: {:?}, mass {:.4e}, position ({:.1}, {:.1}, {:.1})",
            view.id.0,
            view.classification,
            view.mass,
            view.position[0],
            view.position[1],
            view.position[2]
        );
    }

    Ok(())
}
