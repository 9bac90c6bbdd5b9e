use glam::{DQuat, DVec3};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use startrack_common::{pointing_state, position_state};
use startrack_kernel::{DynamicsMode, Method, Preset, Scene, WorldObject, WorldObjectError};

/// Errors from loading or building a scenario.
#[derive(Debug, thiserror::Error)]
pub enum ScenarioError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unknown scenario format for {0}, expected .yaml, .yml or .json")]
    UnknownFormat(PathBuf),
    #[error("object '{name}': {source}")]
    Object {
        name: String,
        source: WorldObjectError,
    },
}

/// Solver shared by every object in the scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IntegratorConfig {
    pub method: String,
    pub atol: f64,
    pub rtol: f64,
}

impl Default for IntegratorConfig {
    fn default() -> Self {
        Self {
            method: Method::Dopri5.name().to_string(),
            atol: 1e-9,
            rtol: 1e-9,
        }
    }
}

fn default_mode() -> String {
    DynamicsMode::Ode.name().to_string()
}

/// Attitude dynamics of one object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PointingConfig {
    #[serde(default = "default_mode")]
    pub mode: String,
    pub preset: String,
    /// Scalar-last unit quaternion.
    #[serde(default = "identity_quaternion")]
    pub quaternion: [f64; 4],
    #[serde(default)]
    pub angular_rate: [f64; 3],
}

fn identity_quaternion() -> [f64; 4] {
    [0.0, 0.0, 0.0, 1.0]
}

/// Translational dynamics of one object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PositionConfig {
    #[serde(default = "default_mode")]
    pub mode: String,
    pub preset: String,
    #[serde(default)]
    pub position: [f64; 3],
    #[serde(default)]
    pub velocity: [f64; 3],
}

/// Dynamics of one object; absent blocks leave that subsystem unmodeled.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ObjectConfig {
    #[serde(default)]
    pub pointing: Option<PointingConfig>,
    #[serde(default)]
    pub position: Option<PositionConfig>,
}

/// A scene object: a name plus the same dynamics blocks as [`ObjectConfig`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NamedObjectConfig {
    pub name: String,
    #[serde(default)]
    pub pointing: Option<PointingConfig>,
    #[serde(default)]
    pub position: Option<PositionConfig>,
}

/// Top-level scenario file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub integrator: IntegratorConfig,
    /// Reference time origin stored on every built object.
    #[serde(default)]
    pub epoch: f64,
    #[serde(default)]
    pub camera: ObjectConfig,
    #[serde(default)]
    pub objects: Vec<NamedObjectConfig>,
}

/// A built scenario: the observing camera and the scene it looks at.
#[derive(Debug)]
pub struct Scenario {
    pub camera: WorldObject,
    pub scene: Scene,
}

impl ScenarioConfig {
    pub fn from_yaml_str(text: &str) -> Result<Self, ScenarioError> {
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn from_json_str(text: &str) -> Result<Self, ScenarioError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Load a scenario file, choosing the format from its extension.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ScenarioError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = match path.extension().and_then(|e| e.to_str()) {
            Some("yaml" | "yml") => Self::from_yaml_str(&text)?,
            Some("json") => Self::from_json_str(&text)?,
            _ => return Err(ScenarioError::UnknownFormat(path.to_path_buf())),
        };
        tracing::debug!(
            path = %path.display(),
            objects = config.objects.len(),
            "scenario loaded"
        );
        Ok(config)
    }

    /// Build the camera and every object. The first invalid object aborts the
    /// build.
    pub fn build(&self) -> Result<Scenario, ScenarioError> {
        let camera = self.build_object(
            "camera",
            self.camera.pointing.as_ref(),
            self.camera.position.as_ref(),
        )?;
        let mut scene = Scene::new();
        for named in &self.objects {
            let object =
                self.build_object(&named.name, named.pointing.as_ref(), named.position.as_ref())?;
            scene.add(named.name.clone(), object);
        }
        Ok(Scenario { camera, scene })
    }

    fn build_object(
        &self,
        name: &str,
        pointing: Option<&PointingConfig>,
        position: Option<&PositionConfig>,
    ) -> Result<WorldObject, ScenarioError> {
        self.try_build_object(pointing, position)
            .map_err(|source| ScenarioError::Object {
                name: name.to_string(),
                source,
            })
    }

    fn try_build_object(
        &self,
        pointing: Option<&PointingConfig>,
        position: Option<&PositionConfig>,
    ) -> Result<WorldObject, WorldObjectError> {
        let method: Method = self.integrator.method.parse()?;
        let mut object = WorldObject::new();
        object.set_epoch(self.epoch);
        object.set_integrator(method, self.integrator.atol, self.integrator.rtol)?;

        if let Some(pointing) = pointing {
            let preset = resolve_preset(&pointing.mode, &pointing.preset)?;
            let [x, y, z, w] = pointing.quaternion;
            let state = pointing_state(
                DQuat::from_xyzw(x, y, z, w),
                DVec3::from_array(pointing.angular_rate),
            );
            object.set_pointing_preset(preset, Some(state))?;
        }
        if let Some(position) = position {
            let preset = resolve_preset(&position.mode, &position.preset)?;
            let state = position_state(
                DVec3::from_array(position.position),
                DVec3::from_array(position.velocity),
            );
            object.set_position_preset(preset, Some(state))?;
        }
        Ok(object)
    }
}

/// Scenario files can only name presets, which are all ODE dynamics.
fn resolve_preset(mode: &str, preset: &str) -> Result<Preset, WorldObjectError> {
    match mode.parse::<DynamicsMode>()? {
        DynamicsMode::Ode => preset.parse(),
        other => Err(WorldObjectError::NotSupported(format!(
            "{other} dynamics cannot be configured from a scenario file"
        ))),
    }
}
