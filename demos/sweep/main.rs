//! Builds a small lit scene and prints each light's visibility polygon.
//!
//! Usage: `cargo run --example sweep [scene.toml]`. Set `RUST_LOG=lumisweep=debug`
//! to see sliver drops and range clipping.

use std::error::Error;
use std::f64::consts::FRAC_PI_2;

use lumisweep::math::Point2;
use lumisweep::{BuildSegmentSet, LightState, Obstacle, SceneConfig, Sweeper};
use tracing_subscriber::EnvFilter;

const DEFAULT_SCENE: &str = r"
width = 1000.0
height = 1000.0
lights_count = 3
show_rays = true
";

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let source = match std::env::args().nth(1) {
        Some(path) => std::fs::read_to_string(path)?,
        None => DEFAULT_SCENE.to_owned(),
    };
    let config = SceneConfig::from_toml_str(&source)?;

    let obstacles = obstacle_grid(&config);
    let segments = BuildSegmentSet::new(&obstacles, config.boundary()).execute()?;

    let lights = place_lights(&config);
    let mut sweeper = Sweeper::new(config.sweep);
    for (i, light) in lights.iter().enumerate() {
        let polygon = sweeper.compute(light, &segments);
        println!(
            "light {i} at ({:.1}, {:.1}): {} vertices, lit area {:.1}",
            light.position.x,
            light.position.y,
            polygon.len(),
            polygon.area(light.position)
        );
        for p in polygon.points() {
            println!("  ({:.3}, {:.3})", p.x, p.y);
        }
        if config.show_rays {
            println!("  {} rays cast", sweeper.rays().len());
        }
    }
    Ok(())
}

/// 50-unit squares on a 300-unit grid.
fn obstacle_grid(config: &SceneConfig) -> Vec<Obstacle> {
    let mut centres = Vec::new();
    let mut x = 200.0;
    while x < config.width {
        let mut y = 200.0;
        while y < config.height {
            centres.push(Point2::new(x, y));
            y += 300.0;
        }
        x += 300.0;
    }

    centres
        .into_iter()
        .map(|c| {
            Obstacle::new(vec![
                Point2::new(c.x - 25.0, c.y - 25.0),
                Point2::new(c.x + 25.0, c.y - 25.0),
                Point2::new(c.x + 25.0, c.y + 25.0),
                Point2::new(c.x - 25.0, c.y + 25.0),
            ])
        })
        .collect()
}

/// Spreads the configured lights along the bottom edge; every other one is a
/// narrow upward cone.
#[allow(clippy::cast_precision_loss)]
fn place_lights(config: &SceneConfig) -> Vec<LightState> {
    let count = config.lights_count;
    (0..count)
        .map(|i| {
            let fraction = (i as f64 + 0.5) / count as f64;
            let light = config.light_at(Point2::new(config.width * fraction, 10.0));
            if i % 2 == 1 {
                light.with_cone(FRAC_PI_2, FRAC_PI_2)
            } else {
                light
            }
        })
        .collect()
}
