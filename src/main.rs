//! Headless demo: a small scene of boxes, a floor and a camera driven by a
//! scripted input sequence. Run with `RUST_LOG=info` to see each tick.

use framegraph::prelude::*;

const TICKS: u32 = 12;
const SPEED: f32 = 2.5;
const ROT_SPEED: f32 = 0.05;
const CONSTANT_ROLL: f32 = 0.02;

/// One tick of scripted input
#[derive(Debug, Default, Clone, Copy)]
struct Controls {
    /// Movement of the right box
    shift: Vector,
    /// Roll applied to both boxes
    roll: f32,
    /// Spin of the top
    spin: f32,
    /// Toggle whether the child box rides on the right box
    toggle_child: bool,
    /// Clone the right box
    clone: bool,
}

fn script(tick: u32) -> Controls {
    let mut controls = Controls {
        roll: 1.0,
        spin: 1.0,
        ..Default::default()
    };
    match tick {
        // push the right box down into the floor
        0..=5 => controls.shift = Vector::new(0.0, -SPEED, 0.0),
        // then towards the camera
        6..=9 => controls.shift = Vector::new(-SPEED * 2.0, 0.0, -SPEED * 4.0),
        _ => {}
    }
    controls.toggle_child = tick == 3 || tick == 8;
    controls.clone = tick == 10;
    controls
}

struct Design {
    scene: Scene,
    telemetry: Telemetry,
    camera: Entity,
    roll_right: Entity,
    roll_left: Entity,
    child: Entity,
    floor: Entity,
    spin_top: Entity,
    child_attached: bool,
    spot_light_on: bool,
    distant_light_on: bool,
}

impl Design {
    fn new(config: SceneConfig) -> Result<Self, SceneError> {
        let z = config.z_sign();
        let mut scene = Scene::with_config(config);

        let mut camera = Shape::new();
        camera.translate(-20.0, 0.0, -80.0 * z);
        camera.set_radius(17.8);
        let camera = scene.spawn_shape(camera);
        scene.set_name(camera, "camera")?;

        let mut roll_right = Shape::new();
        roll_right.set_axis_aligned(Vector::new(-10.0, -10.0, -10.0), Vector::new(10.0, 10.0, 10.0));
        roll_right.translate(20.0, -20.0, 40.0 * z);
        roll_right.set_plane(Vector::new(-1.0, 0.0, 0.0), 10.0);
        let roll_right = scene.spawn_shape(roll_right);

        let mut child = Frame::new();
        child.translate(0.0, 0.0, 10.0 * z);
        let child = scene.spawn_named("child", child);

        let mut roll_left = Shape::new();
        roll_left.set_axis_aligned(Vector::new(-10.0, -10.0, -10.0), Vector::new(10.0, 10.0, 10.0));
        roll_left.translate(-23.0, 13.0, 30.0 * z);
        roll_left.set_radius(17.8);
        let roll_left = scene.spawn_shape(roll_left);

        let mut floor = Shape::new();
        floor.set_axis_aligned(Vector::new(-50.0, -10.0, -50.0), Vector::new(50.0, 10.0, 50.0));
        floor.translate(-10.0, -63.0, 180.0 * z);
        let floor = scene.spawn_shape(floor);

        let mut spin_top = Frame::new();
        spin_top.translate(-10.0, 30.0, 50.0 * z);
        spin_top.rotate_x(1.57 * z);
        let spin_top = scene.spawn_named("spin top", spin_top);

        let mut top_light = Frame::new();
        top_light.rotate_x(0.7);
        let top_light = scene.spawn_named("top light", top_light);

        let mut design = Self {
            scene,
            telemetry: Telemetry::new(),
            camera,
            roll_right,
            roll_left,
            child,
            floor,
            spin_top,
            child_attached: false,
            spot_light_on: true,
            distant_light_on: false,
        };
        design.telemetry.toggle();
        design.scene.attach_to(child, Some(roll_right))?;
        design.scene.attach_to(top_light, Some(spin_top))?;
        design.child_attached = true;
        Ok(design)
    }

    fn update(&mut self, tick: u32, controls: Controls) -> Result<(), SceneError> {
        let z = self.scene.config().z_sign();

        // move the right box unless that would hit the floor
        if !controls.shift.is_zero() {
            if self.scene.collision(self.floor, self.roll_right, controls.shift)? {
                log::info!("tick {tick}: right box blocked by the floor");
            } else {
                let d = controls.shift;
                self.scene.frame_mut(self.roll_right)?.translate(d.x, d.y, d.z);
            }
        }

        let roll = controls.roll * ROT_SPEED + CONSTANT_ROLL;
        self.scene.frame_mut(self.roll_right)?.rotate_x(roll);
        self.scene.frame_mut(self.roll_left)?.rotate_x(roll);
        self.scene
            .frame_mut(self.spin_top)?
            .rotate_z(controls.spin * ROT_SPEED * z);

        if controls.clone {
            let copy = self.scene.clone_node(self.roll_right)?;
            self.scene.frame_mut(copy)?.translate(-40.0, -20.0, 30.0 * z);
            log::info!("tick {tick}: cloned right box at {:?}", self.scene.position(copy)?);
        }

        if controls.toggle_child {
            let parent = (!self.child_attached).then_some(self.roll_right);
            self.scene.attach_to(self.child, parent)?;
            self.child_attached = !self.child_attached;
            log::info!(
                "tick {tick}: child {} at {:?}",
                if self.child_attached { "attached" } else { "detached" },
                self.scene.position(self.child)?
            );
        }

        // each light stays on only while the camera touches its box
        let near_left = self.scene.collision(self.camera, self.roll_left, Vector::ZERO)?;
        if near_left != self.spot_light_on {
            self.spot_light_on = near_left;
            log::info!("tick {tick}: spot light {}", on_off(near_left));
        }
        let near_right = self.scene.collision(self.camera, self.roll_right, Vector::ZERO)?;
        if near_right != self.distant_light_on {
            self.distant_light_on = near_right;
            log::info!("tick {tick}: distant light {}", on_off(near_right));
        }

        self.refresh_telemetry()
    }

    fn refresh_telemetry(&mut self) -> Result<(), SceneError> {
        self.telemetry.clear_lines();
        if !self.telemetry.enabled {
            return Ok(());
        }
        let scene = &self.scene;
        self.telemetry
            .push_position("Camera: ", scene, self.camera, None, 1.0)?;
        self.telemetry
            .push_orientation("Camera heading: ", scene, self.camera, Axis::Z, 100.0)?;
        self.telemetry
            .push_position("Right box: ", scene, self.roll_right, None, 1.0)?;
        self.telemetry
            .push_position("Child x: ", scene, self.child, Some(Axis::X), 1.0)?;
        self.telemetry
            .push_orientation("Top spin: ", scene, self.spin_top, Axis::Y, 100.0)?;
        Ok(())
    }
}

fn on_off(on: bool) -> &'static str {
    if on { "on" } else { "off" }
}

fn main() {
    env_logger::init();

    let config = SceneConfig::default().with_handedness(Handedness::RightHanded);
    let mut design = match Design::new(config) {
        Ok(design) => design,
        Err(e) => {
            log::error!("Failed to build the scene: {e}");
            return;
        }
    };
    let mut cache = WorldCache::new();
    log::info!("Scene ready with {} frames", design.scene.len());

    for tick in 0..TICKS {
        if let Err(e) = design.update(tick, script(tick)) {
            log::error!("tick {tick}: {e}");
            break;
        }
        if let Err(e) = cache.refresh(&design.scene) {
            log::error!("tick {tick}: {e}");
            break;
        }
        for line in design.telemetry.lines() {
            log::info!("tick {tick}: {line}");
        }
    }

    log::info!(
        "Done: {} frames, {} cached, spot light {}, distant light {}",
        design.scene.len(),
        cache.len(),
        on_off(design.spot_light_on),
        on_off(design.distant_light_on),
    );
}
