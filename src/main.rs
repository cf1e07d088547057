//! Panorama - headless driver for the 360° camera control core
//!
//! Runs one simulated viewing session: a finger drag, a gyroscope sweep, a
//! rotation to landscape and an animated return to the horizon, logging what
//! a renderer would receive.

mod settings;

use anyhow::{Context, Result};
use glam::{Vec2, Vec3};
use rand::Rng;
use tracing::{info, trace, Level};
use tracing_subscriber::FmtSubscriber;

use panorama_camera::{CameraController, CameraUpdate, GestureState};
use panorama_core::{MotionSample, ScreenOrientation};
use panorama_sensor::{SensorMultiplexer, SimulatedMotionSensor};

use settings::ViewerSettings;

/// Session state
struct PanoramaApp {
    settings: ViewerSettings,
    sensors: SensorMultiplexer<SimulatedMotionSensor>,
    camera: CameraController,
    screen_orientation: ScreenOrientation,
    clock: f64,
}

impl PanoramaApp {
    fn new(settings: ViewerSettings) -> Result<Self> {
        let sensors = SensorMultiplexer::new(SimulatedMotionSensor::new());
        let mut camera =
            CameraController::with_config(settings.display.portrait(), settings.camera.clone())
                .context("Failed to create camera controller")?;
        let _ = camera.set_allowed_gesture_axes(settings.axes.gesture_mask());
        let _ = camera.set_allowed_motion_axes(settings.axes.motion_mask());

        Ok(Self {
            settings,
            sensors,
            camera,
            screen_orientation: ScreenOrientation::Portrait,
            clock: 0.0,
        })
    }

    fn frame_time(&self) -> f32 {
        1.0 / self.settings.simulation.frame_rate.max(1.0)
    }

    fn frames(&self) -> u32 {
        self.settings.simulation.frames_per_phase
    }

    /// One render tick: deliver a sensor sample, poll it, advance animations
    fn render_tick(&mut self, rotation_rate: Vec3) {
        let dt = self.frame_time();
        self.clock += f64::from(dt);

        let jitter = self.settings.simulation.jitter;
        let noise = if jitter > 0.0 {
            let mut rng = rand::thread_rng();
            Vec3::new(
                rng.gen_range(-jitter..=jitter),
                rng.gen_range(-jitter..=jitter),
                rng.gen_range(-jitter..=jitter),
            )
        } else {
            Vec3::ZERO
        };
        self.sensors
            .push_sample(MotionSample::new(rotation_rate + noise, self.clock));

        if let Some(update) = self
            .camera
            .update_for_device_motion(&self.sensors, self.screen_orientation)
        {
            report(&update);
        }
        if let Some(update) = self.camera.tick(dt) {
            report(&update);
        }
    }

    fn drag(&mut self, from: Vec2, to: Vec2) {
        let frames = self.frames().max(1);
        let _ = self.camera.handle_pan(from, GestureState::Began);
        for i in 1..=frames {
            let point = from.lerp(to, i as f32 / frames as f32);
            if let Some(update) = self.camera.handle_pan(point, GestureState::Changed) {
                report(&update);
            }
            self.render_tick(Vec3::ZERO);
        }
        let _ = self.camera.handle_pan(to, GestureState::Ended);
    }

    fn sweep(&mut self, rotation_rate: Vec3) {
        for _ in 0..self.frames() {
            self.render_tick(rotation_rate);
        }
    }

    fn rotate_screen(&mut self, orientation: ScreenOrientation) -> Result<()> {
        let viewport = if orientation.is_landscape() {
            self.settings.display.landscape()
        } else {
            self.settings.display.portrait()
        };
        self.screen_orientation = orientation;
        let fov = self
            .camera
            .update_viewport(viewport)
            .context("Failed to apply viewport")?;
        info!(
            "Screen now {:?} ({}x{}), field of view {:.1}°",
            orientation, viewport.width, viewport.height, fov
        );
        Ok(())
    }

    fn run(&mut self) -> Result<()> {
        self.camera
            .start_motion_updates(&mut self.sensors)
            .context("Failed to start motion updates")?;
        info!(
            "Session started: compass {:.3} rad, field of view {:.1}°, motion interval {:?}",
            self.camera.compass_angle(),
            self.camera.field_of_view(),
            self.sensors.update_interval()
        );

        info!("Phase: drag");
        let display = self.settings.display.portrait();
        let centre = Vec2::new(display.width / 2.0, display.height / 2.0);
        self.drag(centre, centre + Vec2::new(display.width / 3.0, display.height / 8.0));

        info!("Phase: gyroscope sweep (portrait)");
        self.sweep(Vec3::new(0.0, 1.2, 0.0));

        info!("Phase: gyroscope sweep (landscape)");
        self.rotate_screen(ScreenOrientation::LandscapeLeft)?;
        self.sweep(Vec3::new(-0.9, 0.6, 0.0));

        info!("Phase: reorient to horizon");
        let _ = self.camera.reorient_vertical_to_horizon(true);
        while self.camera.is_reorienting() {
            self.render_tick(Vec3::ZERO);
        }

        self.camera
            .stop_motion_updates(&mut self.sensors)
            .context("Failed to stop motion updates")?;

        let orientation = self.camera.orientation();
        info!(
            "Session ended: yaw {:.3}, pitch {:.3}, compass {:.3} rad, sensor active: {}",
            orientation.yaw,
            orientation.pitch,
            self.camera.compass_angle(),
            self.sensors.is_active()
        );
        Ok(())
    }
}

fn report(update: &CameraUpdate) {
    trace!(
        "rotation ({:.3}, {:.3}, 0), compass {:.3}, first movement {:?}",
        update.rotation.x,
        update.rotation.y,
        update.compass_angle,
        update.first_movement
    );
}

fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("Failed to set subscriber")?;

    info!("Starting Panorama...");

    let settings = ViewerSettings::load();
    if std::env::args().any(|arg| arg == "--write-settings") {
        settings.save().context("Failed to save settings")?;
        return Ok(());
    }

    let mut app = PanoramaApp::new(settings)?;
    app.run()
}
