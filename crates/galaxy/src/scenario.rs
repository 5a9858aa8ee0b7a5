//! Loading simulation scenarios from text
//!
//! A scenario is a comma-separated text file:
//!
//! ```text
//! 6.674e-11,86400
//! Earth,universe.Planet,0,0,0,-12.6,5.972e24
//! Moon,universe.Planet,3.844e8,0,0,1023,7.342e22
//! Halley,universe.Comet,5e8,5e8,-300,0,2.2e14
//! ```
//!
//! The header holds the gravitational constant and the simulation speed.
//! Every further line describes one body as `name,type,x,y,vx,vy,mass`, where
//! `type` is `Planet` or `Comet`, optionally prefixed with `universe.`.
//! Blank lines are ignored and bodies of unknown types are skipped.

use crate::body::{Body, BodyKind};
use crate::error::ScenarioError;
use crate::simulator::Simulator;
use crate::vector::Vector2D;
use crate::world::World;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use std::str::FromStr;

/// Initial state of one body
#[derive(Debug, Clone, PartialEq)]
pub struct BodySpec {
    pub name: String,
    pub kind: BodyKind,
    pub position: Vector2D,
    pub velocity: Vector2D,
    pub mass: f64,
}

/// Parsed scenario, ready to become a [`Simulator`]
#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    pub gravitational_constant: f64,
    pub speed: f64,
    pub bodies: Vec<BodySpec>,
}

impl Scenario {
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ScenarioError> {
        let mut lines = BufReader::new(reader).lines().enumerate();

        let (header_line, header) = loop {
            match lines.next() {
                Some((index, line)) => {
                    let line = line?;
                    if !line.trim().is_empty() {
                        break (index + 1, line);
                    }
                }
                None => return Err(ScenarioError::MissingHeader),
            }
        };
        let mut header_fields = header.split(',').map(str::trim);
        let gravitational_constant =
            parse_number(header_line, "gravitational_constant", header_fields.next())?;
        let speed = parse_number(header_line, "speed", header_fields.next())?;

        let mut bodies = Vec::new();
        for (index, line) in lines {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            if let Some(body) = parse_body(index + 1, &line)? {
                bodies.push(body);
            }
        }

        log::info!(
            "loaded scenario with {} bodies (G = {:e}, speed = {})",
            bodies.len(),
            gravitational_constant,
            speed
        );

        Ok(Self {
            gravitational_constant,
            speed,
            bodies,
        })
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ScenarioError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Builds the world and a paused simulator for this scenario
    pub fn into_simulator(self) -> Result<Simulator, ScenarioError> {
        let bodies = self
            .bodies
            .into_iter()
            .map(|spec| Body::new(spec.name, spec.kind, spec.position, spec.velocity, spec.mass))
            .collect::<Result<Vec<_>, _>>()?;
        let world = World::with_bodies(self.gravitational_constant, bodies)?;
        Ok(Simulator::new(world, self.speed)?)
    }
}

impl FromStr for Scenario {
    type Err = ScenarioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_reader(s.as_bytes())
    }
}

fn parse_kind(tag: &str) -> Option<BodyKind> {
    match tag.strip_prefix("universe.").unwrap_or(tag) {
        "Planet" => Some(BodyKind::Planet),
        "Comet" => Some(BodyKind::Comet),
        _ => None,
    }
}

fn parse_number(line: usize, field: &'static str, value: Option<&str>) -> Result<f64, ScenarioError> {
    let value = value.ok_or(ScenarioError::MissingField { line, field })?;
    value
        .parse()
        .map_err(|source| ScenarioError::InvalidNumber { line, field, source })
}

fn parse_body(line: usize, text: &str) -> Result<Option<BodySpec>, ScenarioError> {
    let mut fields = text.split(',').map(str::trim);

    let name = fields
        .next()
        .filter(|name| !name.is_empty())
        .ok_or(ScenarioError::MissingField { line, field: "name" })?;
    let tag = fields
        .next()
        .ok_or(ScenarioError::MissingField { line, field: "type" })?;
    let Some(kind) = parse_kind(tag) else {
        log::warn!("line {line}: skipping `{name}` of unknown type `{tag}`");
        return Ok(None);
    };

    let x = parse_number(line, "x", fields.next())?;
    let y = parse_number(line, "y", fields.next())?;
    let vx = parse_number(line, "vx", fields.next())?;
    let vy = parse_number(line, "vy", fields.next())?;
    let mass = parse_number(line, "mass", fields.next())?;

    Ok(Some(BodySpec {
        name: name.to_owned(),
        kind,
        position: Vector2D::new(x, y),
        velocity: Vector2D::new(vx, vy),
        mass,
    }))
}
