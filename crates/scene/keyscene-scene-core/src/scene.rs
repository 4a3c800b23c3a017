//! Editing session: the one live project, the kind registry and the clock.
//!
//! Hosts drive it with [`Scene::tick`] once per display frame. A tick advances
//! the playhead (when playing or capturing), applies the timeline, and
//! renders. Capture mode ignores the viewport and renders at the project's
//! logical size until one full timeline length has elapsed.

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::config::SceneConfig;
use crate::error::SceneError;
use crate::project::{CanvasSize, Project};
use crate::registry::KindRegistry;
use crate::render::{render_frame, RenderOptions, RenderedFrame};
use crate::resolver::Resolver;
use keyscene_animation_core::{FrameReport, Playhead};
use keyscene_api_core::Vec2;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct FrameOutput {
    /// Timeline position the frame was sampled at.
    pub time: f64,
    pub frame: RenderedFrame,
    pub report: FrameReport,
    /// Set on the last frame of a capture.
    pub capture_finished: bool,
}

#[derive(Clone, Copy, Debug)]
struct CaptureSession {
    elapsed: f64,
    resume_playing: bool,
}

#[derive(Debug)]
pub struct Scene {
    registry: KindRegistry,
    config: SceneConfig,
    project: Option<Project>,
    playhead: Playhead,
    capture: Option<CaptureSession>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(SceneConfig::default())
    }
}

impl Scene {
    /// Session with the built-in kinds and no project.
    pub fn new(config: SceneConfig) -> Self {
        Self::with_registry(KindRegistry::with_builtins(), config)
    }

    pub fn with_registry(registry: KindRegistry, config: SceneConfig) -> Self {
        Self {
            registry,
            config,
            project: None,
            playhead: Playhead::default(),
            capture: None,
        }
    }

    pub fn registry(&self) -> &KindRegistry {
        &self.registry
    }

    /// For registering extra kinds during setup.
    pub fn registry_mut(&mut self) -> &mut KindRegistry {
        &mut self.registry
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn project(&self) -> Option<&Project> {
        self.project.as_ref()
    }

    pub fn project_mut(&mut self) -> Option<&mut Project> {
        self.project.as_mut()
    }

    // ---- project lifecycle ----

    /// Replace the live project with an empty one.
    pub fn new_project(&mut self, name: impl Into<String>, size: CanvasSize) -> &mut Project {
        let project = Project::new(name, size, self.config.new_project.duration_seconds);
        self.set_project(project)
    }

    /// Empty project using the configured name and canvas size.
    pub fn new_default_project(&mut self) -> &mut Project {
        let d = &self.config.new_project;
        let (name, size) = (d.name.clone(), CanvasSize::new(d.width, d.height));
        self.new_project(name, size)
    }

    /// Install `project` as the live one (reconciled against the registry)
    /// and rewind the clock.
    pub fn set_project(&mut self, mut project: Project) -> &mut Project {
        project.reconcile(&self.registry);
        self.playhead = Playhead::default();
        self.capture = None;
        self.project.insert(project)
    }

    pub fn load_project_json(&mut self, json: &str) -> Result<&mut Project, SceneError> {
        let project = Project::from_json(json, &self.registry)?;
        info!(
            "loaded project '{}' ({} anchors, {} visuals, {} tracks)",
            project.name,
            project.anchors.len(),
            project.visuals.len(),
            project.timeline.len()
        );
        Ok(self.set_project(project))
    }

    pub fn project_json(&self) -> Result<String, SceneError> {
        self.project.as_ref().ok_or(SceneError::NoProject)?.to_json()
    }

    pub fn close_project(&mut self) -> Option<Project> {
        self.capture = None;
        self.playhead = Playhead::default();
        self.project.take()
    }

    // ---- clock ----

    pub fn play(&mut self) {
        self.playhead.play();
    }

    pub fn pause(&mut self) {
        self.playhead.pause();
    }

    pub fn is_playing(&self) -> bool {
        self.playhead.playing
    }

    /// Move the playhead; wraps into the project length.
    pub fn seek(&mut self, time: f64) {
        let duration = self.duration();
        self.playhead.seek(time, duration);
    }

    pub fn time(&self) -> f64 {
        self.playhead.time
    }

    /// Playhead position as a fraction of the project length.
    pub fn fraction(&self) -> f64 {
        self.playhead.fraction(self.duration())
    }

    fn duration(&self) -> f64 {
        self.project.as_ref().map_or(0.0, |p| p.duration_seconds)
    }

    // ---- queries ----

    /// Resolve a reference against the live project; undefined without one.
    pub fn resolve(&self, reference: &str) -> Vec2 {
        match &self.project {
            Some(p) => Resolver::for_project(p, &self.registry)
                .with_max_depth(self.config.max_reference_depth)
                .resolve(reference),
            None => Vec2::UNDEFINED,
        }
    }

    pub fn track_validity(&self) -> Vec<bool> {
        self.project
            .as_ref()
            .map(Project::track_validity)
            .unwrap_or_default()
    }

    // ---- capture ----

    /// Rewind and render every following tick at the logical canvas size
    /// until one project length has passed.
    pub fn start_capture(&mut self) -> Result<(), SceneError> {
        if self.project.is_none() {
            return Err(SceneError::NoProject);
        }
        self.capture = Some(CaptureSession {
            elapsed: 0.0,
            resume_playing: self.playhead.playing,
        });
        self.playhead.time = 0.0;
        self.playhead.play();
        info!("capture started");
        Ok(())
    }

    pub fn is_capturing(&self) -> bool {
        self.capture.is_some()
    }

    /// End a capture early.
    pub fn stop_capture(&mut self) {
        if let Some(cap) = self.capture.take() {
            self.playhead.playing = cap.resume_playing;
            debug!("capture stopped after {:.3}s", cap.elapsed);
        }
    }

    // ---- frame ----

    /// Advance by `dt` seconds and render for a `viewport`-sized surface.
    /// `None` when no project is loaded.
    pub fn tick(&mut self, dt: f64, viewport: Vec2) -> Option<FrameOutput> {
        let project = self.project.as_mut()?;
        let duration = project.duration_seconds;
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

        let mut capture_finished = false;
        let (viewport, background) = match self.capture.as_mut() {
            Some(cap) => {
                cap.elapsed += dt;
                capture_finished = cap.elapsed >= duration;
                (project.canvas_size.as_vec2(), self.config.capture_background)
            }
            None => (viewport, None),
        };

        let time = self.playhead.advance(dt, duration);
        let report = project.apply_frame(time, &self.config.animation);
        let options = RenderOptions {
            background,
            max_reference_depth: self.config.max_reference_depth,
        };
        let frame = render_frame(project, &self.registry, viewport, &options);

        if capture_finished {
            self.stop_capture();
            info!("capture finished");
        }
        Some(FrameOutput {
            time,
            frame,
            report,
            capture_finished,
        })
    }
}
