//! HUD and telemetry text

use hecs::Entity;

use crate::core::SceneError;
use crate::ecs::Scene;
use crate::math::{Axis, Vector};

/// Text lines describing frame placement, for a HUD or a log.
#[derive(Debug, Default)]
pub struct Telemetry {
    /// Whether the overlay should be drawn
    pub enabled: bool,
    lines: Vec<String>,
}

impl Telemetry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle the overlay
    pub fn toggle(&mut self) {
        self.enabled = !self.enabled;
    }

    pub fn add_line(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    pub fn clear_lines(&mut self) {
        self.lines.clear();
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Append the world direction of a local axis of `entity`.
    pub fn push_orientation(
        &mut self,
        label: &str,
        scene: &Scene,
        entity: Entity,
        axis: Axis,
        scale: f32,
    ) -> Result<(), SceneError> {
        let line = orientation_line(label, scene, entity, axis, scale)?;
        self.lines.push(line);
        Ok(())
    }

    /// Append the world position of `entity`.
    pub fn push_position(
        &mut self,
        label: &str,
        scene: &Scene,
        entity: Entity,
        axis: Option<Axis>,
        scale: f32,
    ) -> Result<(), SceneError> {
        let line = position_line(label, scene, entity, axis, scale)?;
        self.lines.push(line);
        Ok(())
    }
}

/// `label` followed by the world direction of `axis`, scaled and truncated.
pub fn orientation_line(
    label: &str,
    scene: &Scene,
    entity: Entity,
    axis: Axis,
    scale: f32,
) -> Result<String, SceneError> {
    let direction = scene.orientation_of(entity, axis)?;
    Ok(format!("{label}{}", format_vector(direction, scale)))
}

/// `label` followed by the world position, or by one coordinate of it when
/// `axis` is given.
pub fn position_line(
    label: &str,
    scene: &Scene,
    entity: Entity,
    axis: Option<Axis>,
    scale: f32,
) -> Result<String, SceneError> {
    let position = scene.position(entity)?;
    Ok(match axis {
        Some(axis) => format!("{label}{}", truncate(axis.component(position), scale)),
        None => format!("{label}{}", format_vector(position, scale)),
    })
}

fn truncate(value: f32, scale: f32) -> i32 {
    (value * scale) as i32
}

fn format_vector(v: Vector, scale: f32) -> String {
    format!(
        "({}, {}, {})",
        truncate(v.x, scale),
        truncate(v.y, scale),
        truncate(v.z, scale)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::{Frame, Transformable};

    #[test]
    fn test_position_line() {
        let mut scene = Scene::new();
        let mut frame = Frame::new();
        frame.translate(-20.0, 0.5, -80.0);
        let camera = scene.spawn_frame(frame);

        let all = position_line(" Camera: at ", &scene, camera, None, 1.0).unwrap();
        assert_eq!(all, " Camera: at (-20, 0, -80)");

        let y = position_line("y ", &scene, camera, Some(Axis::Y), 10.0).unwrap();
        assert_eq!(y, "y 5");
    }

    #[test]
    fn test_orientation_line() {
        let mut scene = Scene::new();
        let camera = scene.spawn_frame(Frame::new());

        let line = orientation_line(" heading ", &scene, camera, Axis::Z, 100.0).unwrap();
        assert_eq!(line, " heading (0, 0, 100)");
    }

    #[test]
    fn test_collects_lines() {
        let mut scene = Scene::new();
        let frame = scene.spawn_frame(Frame::new());

        let mut telemetry = Telemetry::new();
        telemetry
            .push_orientation("x ", &scene, frame, Axis::X, 1.0)
            .unwrap();
        telemetry.push_position("at ", &scene, frame, None, 1.0).unwrap();
        telemetry.add_line("custom");
        assert_eq!(telemetry.lines().len(), 3);

        telemetry.clear_lines();
        assert!(telemetry.lines().is_empty());

        telemetry.toggle();
        assert!(telemetry.enabled);
    }

    #[test]
    fn test_missing_frame_is_an_error() {
        let mut scene = Scene::new();
        let frame = scene.spawn_frame(Frame::new());
        scene.despawn(frame).unwrap();

        let result = orientation_line("x ", &scene, frame, Axis::X, 1.0);
        assert_eq!(result, Err(SceneError::NoSuchFrame(frame)));
    }
}
