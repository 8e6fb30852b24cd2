use rainhouse_rain::{RainBuffer, RainSettings, StepParams};
use rainhouse_wall::{WindowHole, build_wall_with_holes};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_2;
use tracing::{debug, warn};

use crate::node::{ParameterValue, SceneNode, Transform};
use crate::tunable::Tunable;
use crate::Result;

pub const DROP_PER_TICK: &str = "DropPerTick";
/// Upper end of the drop panel range unless the configured drop is larger.
const DROP_PANEL_MAX: f64 = 5.0;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct HouseConfig {
    pub wall_width: f64,
    pub wall_height: f64,
    /// Distance of the front and back walls from the house center.
    pub wall_depth: f64,
    pub side_wall_length: f64,
    pub windows: Vec<WindowHole>,
    pub rain: RainSettings,
}

impl Default for HouseConfig {
    fn default() -> Self {
        Self {
            wall_width: 19.0,
            wall_height: 12.0,
            wall_depth: 7.5,
            side_wall_length: 15.0,
            windows: vec![
                WindowHole::new(-6.0, 7.0, 3.0, 2.8),
                WindowHole::new(5.0, 7.0, 3.0, 2.8),
            ],
            rain: RainSettings::default(),
        }
    }
}

pub fn assemble_house(config: &HouseConfig) -> Result<SceneNode> {
    assemble_house_with_rng(config, &mut rand::thread_rng())
}

/// Builds `scene -> { house -> walls, rain }`. The windowed back wall and the
/// rain are required; the plain walls are skipped with a warning on failure.
pub fn assemble_house_with_rng<R: Rng + ?Sized>(
    config: &HouseConfig,
    rng: &mut R,
) -> Result<SceneNode> {
    let mut house = SceneNode::group("house");

    let back = build_wall_with_holes(config.wall_width, config.wall_height, &config.windows)?;
    let mut back_wall = SceneNode::wall(
        "back_wall",
        back,
        Transform::at(0.0, 0.0, config.wall_depth),
    );
    insert_wall_parameters(&mut back_wall, config.wall_width, config.wall_height);
    back_wall.insert_parameter(
        "WindowCount",
        ParameterValue::Integer(config.windows.len() as i64),
    );
    house.add_child(back_wall);

    let half_width = config.wall_width * 0.5;
    let plain_walls = [
        (
            "front_wall",
            config.wall_width,
            Transform::at(0.0, 0.0, -config.wall_depth),
        ),
        (
            "left_wall",
            config.side_wall_length,
            Transform::at(-half_width, 0.0, 0.0).rotated_y(-FRAC_PI_2),
        ),
        (
            "right_wall",
            config.side_wall_length,
            Transform::at(half_width, 0.0, 0.0).rotated_y(FRAC_PI_2),
        ),
    ];
    for (name, width, transform) in plain_walls {
        match build_wall_with_holes(width, config.wall_height, &[]) {
            Ok(mesh) => {
                let mut node = SceneNode::wall(name, mesh, transform);
                insert_wall_parameters(&mut node, width, config.wall_height);
                house.add_child(node);
            }
            Err(err) => warn!(wall = name, error = %err, "skipping wall"),
        }
    }

    let settings = &config.rain;
    StepParams::from(settings).validate()?;
    let buffer = RainBuffer::initialize_with_rng(settings.count, &settings.bounds, rng)?;
    let mut rain = SceneNode::rain("rain", buffer);
    rain.insert_parameter("Count", ParameterValue::Integer(settings.count as i64));
    rain.insert_parameter("Color", ParameterValue::Integer(i64::from(settings.color)));
    rain.insert_parameter(
        "PointSize",
        ParameterValue::Number(f64::from(settings.point_size)),
    );
    rain.insert_parameter("Transparent", ParameterValue::Bool(settings.transparent));
    let drop = f64::from(settings.drop_per_tick);
    rain.insert_tunable(
        DROP_PER_TICK,
        Tunable::new(drop, 0.0, DROP_PANEL_MAX.max(drop), 0.01)?,
    );

    let mut scene = SceneNode::group("scene");
    scene.add_child(house);
    scene.add_child(rain);

    debug!(
        walls = scene.walls().count(),
        raindrops = settings.count,
        "house assembled"
    );
    Ok(scene)
}

fn insert_wall_parameters(node: &mut SceneNode, width: f64, height: f64) {
    node.insert_parameter("Width", ParameterValue::Number(width));
    node.insert_parameter("Height", ParameterValue::Number(height));
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn small_config() -> HouseConfig {
        HouseConfig {
            rain: RainSettings {
                count: 32,
                ..RainSettings::default()
            },
            ..HouseConfig::default()
        }
    }

    #[test]
    fn default_house_has_four_walls_and_rain() -> Result<()> {
        let mut rng = SmallRng::seed_from_u64(1);
        let scene = assemble_house_with_rng(&small_config(), &mut rng)?;

        let names: Vec<_> = scene.walls().map(|(node, _)| node.name.as_str()).collect();
        assert_eq!(names, ["back_wall", "front_wall", "left_wall", "right_wall"]);

        let back = scene.find("back_wall").and_then(SceneNode::wall_mesh);
        assert_eq!(back.map(|mesh| mesh.boundary_loops()), Some(3));

        let rain = scene.rain_node().expect("rain node");
        assert_eq!(
            rain.tunable(DROP_PER_TICK).map(Tunable::value),
            Some(0.5)
        );
        Ok(())
    }

    #[test]
    fn bad_side_wall_is_skipped() -> Result<()> {
        let config = HouseConfig {
            side_wall_length: -1.0,
            ..small_config()
        };
        let scene = assemble_house(&config)?;
        assert_eq!(scene.walls().count(), 2);
        Ok(())
    }

    #[test]
    fn bad_window_fails_assembly() {
        let config = HouseConfig {
            windows: vec![WindowHole::new(0.0, 0.0, 30.0, 2.0)],
            ..small_config()
        };
        assert!(assemble_house(&config).is_err());
    }

    #[test]
    fn large_drop_is_kept() -> Result<()> {
        let mut config = small_config();
        config.rain.drop_per_tick = 10.0;
        let scene = assemble_house(&config)?;
        let rain = scene.rain_node().expect("rain node");
        assert_eq!(
            rain.tunable(DROP_PER_TICK).map(Tunable::value),
            Some(10.0)
        );
        Ok(())
    }

    #[test]
    fn invalid_drop_fails_assembly() {
        for drop in [-1.0, f32::NAN, f32::INFINITY] {
            let mut config = small_config();
            config.rain.drop_per_tick = drop;
            assert!(matches!(
                assemble_house(&config),
                Err(crate::Error::Rain(rainhouse_rain::Error::InvalidParameter(_)))
            ));
        }
    }

    #[test]
    fn config_reads_partial_json() {
        let config: HouseConfig = serde_json::from_str(
            r#"{"wall_width": 21, "windows": [{"x": 0, "y": 6, "w": 2, "h": 2}], "rain": {"count": 5}}"#,
        )
        .unwrap();
        assert_eq!(config.wall_width, 21.0);
        assert_eq!(config.wall_height, 12.0);
        assert_eq!(config.windows.len(), 1);
        assert_eq!(config.rain.count, 5);
        assert_eq!(config.rain.ceiling, 250.0);
    }
}
