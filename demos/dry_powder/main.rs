//! Dry-powder hopper demo.
//!
//! Assembles the reference scenario (a 0.30 m vessel with a conical
//! contraction, 4500 packed spheres) and drives the per-step hook with
//! a stub clock until the support floor drops. A real run would hand
//! the stores to the external engine for contact resolution and time
//! integration between hook invocations.
//!
//! ```text
//! cargo run --release --example dry_powder
//! ```

use granflow::scenario::{HopperParams, HopperScenario, ScenarioState, StepClock};

fn main() -> granflow::Result<()> {
    // Default: WARN for everything, INFO for the kernel and this demo.
    // Override with RUST_LOG.
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("granflow=info".parse().unwrap_or_default())
        .add_directive("dry_powder=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let params = HopperParams::default();
    let mut scenario = HopperScenario::build(&params)?;

    // Pick the step size from the contact timescale of the smallest
    // particle, the way an engine configuration would.
    let bed = scenario.species().species(scenario.species_ids().particle)?;
    let mass = bed.particle_mass(params.min_radius);
    let collision_time = bed.collision_time(mass)?;
    let restitution = bed.restitution_coefficient(mass)?;
    tracing::info!(mass, collision_time, restitution, "contact timescales");

    let dt = collision_time / 10.0;
    let mut clock = StepClock::new(0.0, dt);
    while scenario.state() == ScenarioState::Settling && clock.time() < 2.0 {
        scenario.after_time_step(clock)?;
        clock = clock.advanced();
    }

    tracing::info!(
        time = clock.time(),
        state = ?scenario.state(),
        particles = scenario.particles().len(),
        "floor released; the engine would continue to t = 30 s"
    );
    Ok(())
}
