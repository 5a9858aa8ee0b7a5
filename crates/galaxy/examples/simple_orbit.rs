//! Simple orbital integration example
//!
//! Puts the Moon on a circular orbit around the Earth and runs the simulator
//! at one simulated day per step, showing how well the orbit and the energy
//! are kept.
//!
//! Run with: cargo run --package galaxy --example simple_orbit

use env_logger::Env;
use galaxy::body::Body;
use galaxy::simulator::Simulator;
use galaxy::vector::Vector2D;
use galaxy::world::World;

const G: f64 = 6.674e-11; // m³ kg⁻¹ s⁻²

fn main() {
    env_logger::init_from_env(Env::default().filter_or("LOG_LEVEL", "info"));

    println!("Galaxy Simulator Test: Earth-Moon Orbit\n");
    println!("{}", "=".repeat(60));

    let earth_mass = 5.972e24; // kg
    let moon_mass = 7.342e22; // kg
    let r = 3.844e8; // m
    let total = earth_mass + moon_mass;
    let v_rel = (G * total / r).sqrt();

    // Centre of mass frame, so the pair does not drift away
    let earth = Body::planet(
        "Earth",
        Vector2D::new(-r * moon_mass / total, 0.0),
        Vector2D::new(0.0, -v_rel * moon_mass / total),
        earth_mass,
    )
    .expect("valid Earth");
    let moon = Body::planet(
        "Moon",
        Vector2D::new(r * earth_mass / total, 0.0),
        Vector2D::new(0.0, v_rel * earth_mass / total),
        moon_mass,
    )
    .expect("valid Moon");

    println!("\nInitial conditions:");
    println!("  Separation: {:.4e} m", r);
    println!("  Relative velocity: {:.2} m/s", v_rel);

    let world = World::with_bodies(G, [earth, moon]).expect("distinct names");
    let initial_energy = world.total_energy();

    // One simulated day per real second
    let mut simulator = Simulator::new(world, 86_400.0).expect("valid speed");
    simulator.launch().expect("fresh simulation");

    let period = 2.0 * std::f64::consts::PI * r / v_rel;
    println!("  Orbital period: {:.2} days", period / 86_400.0);

    println!("\nIntegrating...");
    let days = 90;
    for day in 1..=days {
        let summary = match simulator.step(1.0) {
            Ok(summary) => summary,
            Err(err) => {
                println!("Step failed on day {}: {}", day, err);
                break;
            }
        };
        if !summary.is_empty() {
            println!("Unexpected collision on day {}", day);
        }

        if day % 10 == 0 {
            let world = simulator.world();
            let (Some(earth), Some(moon)) = (world.body("Earth"), world.body("Moon")) else {
                break;
            };
            let separation = (moon.position() - earth.position()).magnitude();
            let energy_error = ((world.total_energy() - initial_energy) / initial_energy).abs();

            println!(
                "Day {:3}: separation={:.6e} m, Δr={:.2e}, ΔE={:.2e}, {} sub-steps/day",
                day,
                separation,
                ((separation - r) / r).abs(),
                energy_error,
                summary.substeps()
            );
        }
    }

    println!("\n{}", "=".repeat(60));
    let energy_error =
        ((simulator.world().total_energy() - initial_energy) / initial_energy).abs();
    if energy_error < 1e-2 {
        println!("✓ Energy conserved to within 1%");
    } else {
        println!("✗ Energy error too large: {:.2e}", energy_error);
    }

    println!("\nTest complete!");
}
