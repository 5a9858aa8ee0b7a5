//! Collision detection and resolution example
//!
//! Plays back a crowd of planets and comets falling towards a central planet
//! with the headless driver, printing every merger as it happens.
//!
//! Run with: cargo run --package galaxy --example collision_demo

use std::time::Duration;

use env_logger::Env;
use galaxy::driver::{Driver, PlaybackConfig};
use galaxy::scenario::Scenario;
use galaxy::simulator::SharedSimulator;

fn main() {
    env_logger::init_from_env(
        Env::default()
            .filter_or("LOG_LEVEL", "debug")
            .write_style_or("LOG_STYLE", "always"),
    );

    println!("Galaxy Collision Demo: Infall\n");
    println!("{}", "=".repeat(60));

    // Eight embryos spread on a ring, each with a little tangential velocity
    let mut text = String::from("1.0,1.0\ncore,Planet,0,0,0,0,2000\n");
    for i in 0..8 {
        let angle = i as f64 * std::f64::consts::PI / 4.0;
        let (sin, cos) = angle.sin_cos();
        let kind = if i % 2 == 0 { "Planet" } else { "Comet" };
        text.push_str(&format!(
            "embryo-{},{},{:.6},{:.6},{:.6},{:.6},{}\n",
            i,
            kind,
            40.0 * cos,
            40.0 * sin,
            -0.8 * sin,
            0.8 * cos,
            5.0 + i as f64
        ));
    }

    let scenario: Scenario = text.parse().expect("well-formed scenario");
    println!("\nInitial system: {} bodies", scenario.bodies.len());

    let simulator = scenario.into_simulator().expect("valid scenario");
    let shared = SharedSimulator::new(simulator);
    let initial_mass = shared.read(|sim| sim.world().total_mass());

    let mut driver = Driver::new(shared.clone(), PlaybackConfig::default());
    driver.launch(Duration::ZERO).expect("fresh simulation");
    // Play back faster than real time
    for _ in 0..5 {
        driver.faster();
    }

    println!("\nSimulating 20 seconds of playback at {}x...", driver.speed_up());
    for ms in 1..=20_000 {
        let summary = match driver.tick(Duration::from_millis(ms)) {
            Ok(Some(summary)) => summary,
            Ok(None) => continue,
            Err(err) => {
                println!("Playback stopped: {}", err);
                break;
            }
        };
        for (cluster, merged) in summary.iter() {
            println!(
                "t={:7.2}: {:?} -> {} ({:?}, mass {:.1})",
                shared.time(),
                cluster.names().collect::<Vec<_>>(),
                merged.name,
                merged.kind,
                merged.mass
            );
        }
    }

    println!("\n{}", "=".repeat(60));
    shared.read(|sim| {
        let world = sim.world();
        println!("Survivors: {}", world.body_count());
        for body in world.bodies() {
            println!(
                "  {:<10} {:?} mass={:8.1} pos=({:8.2}, {:8.2})",
                body.name(),
                body.kind(),
                body.mass(),
                body.position().x(),
                body.position().y()
            );
        }

        let mass_error = ((world.total_mass() - initial_mass) / initial_mass).abs();
        if mass_error < 1e-12 {
            println!("\n✓ Mass conserved through every merger");
        } else {
            println!("\n✗ Mass error: {:.2e}", mass_error);
        }
    });
}
