//! Viewer session: owns the scene and the hover pipeline, and listens for
//! pointer events between explicit `start` and `stop` calls.

mod frame;

use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;

pub use frame::Frame;

use crate::camera::{Camera, CameraUniform, CanvasRect, ViewportPoint};
use crate::error::HoverError;
use crate::highlight::{
    HighlightAppearance, HighlightChange, HighlightState, Highlighter,
    SubsetOverlay, SubsetStore,
};
use crate::input::{InputEvent, PointerHub, Subscription};
use crate::options::Options;
use crate::picking::{
    EntityRef, EntityResolver, ExpressIdResolver, MeshIntersector, Picker,
    SpatialIntersector,
};
use crate::scene::{LoadedModel, Mesh, ModelId, Scene};
use crate::util::frame_timing::FrameTiming;

/// Everything the pointer handler and the render loop share.
struct SessionCore<I, R, O> {
    options: Options,
    scene: Scene,
    canvas: CanvasRect,
    device_pixel_ratio: f32,
    picker: Picker<I, R>,
    highlighter: Highlighter,
    overlay: O,
    timing: FrameTiming,
    last_pointer: Option<ViewportPoint>,
}

impl<I, R, O> SessionCore<I, R, O>
where
    I: SpatialIntersector,
    R: EntityResolver,
    O: SubsetOverlay,
{
    fn handle_event(&mut self, event: InputEvent) -> HighlightChange {
        match event {
            InputEvent::PointerMoved { x, y } => {
                let point = ViewportPoint::new(x, y);
                self.last_pointer = Some(point);
                let target = self.pick(point);
                self.apply(target)
            }
            InputEvent::PointerLeft => {
                self.last_pointer = None;
                if self.options.picking.clear_on_leave {
                    self.apply(None)
                } else {
                    HighlightChange::Unchanged
                }
            }
            InputEvent::CanvasResized(canvas) => {
                self.canvas = canvas;
                self.scene
                    .camera_mut()
                    .set_viewport(canvas.width(), canvas.height());
                HighlightChange::Unchanged
            }
        }
    }

    fn pick(&self, point: ViewportPoint) -> Option<EntityRef> {
        if !self.options.picking.hover {
            return None;
        }
        let candidates = self.scene.pick_candidates();
        self.picker
            .pick_at(point, &self.canvas, self.scene.camera(), &candidates)
    }

    fn apply(&mut self, target: Option<EntityRef>) -> HighlightChange {
        let change = self.highlighter.update(target, &mut self.overlay);
        if change.is_change() {
            log::debug!("hover: {change:?}");
        }
        change
    }
}

/// A running viewer: scene, camera, hover pipeline and overlay, with an
/// explicit pointer subscription.
///
/// Collaborators default to the crate's BVH intersector, entity-id resolver
/// and subset store; any of them can be swapped through
/// [`with_collaborators`](Self::with_collaborators).
///
/// # Example
///
/// ```ignore
/// let hub = PointerHub::new();
/// let mut session = ViewerSession::new(Options::default(), canvas);
/// session.add_model(ModelId(0), mesh)?;
/// session.start(&hub);
/// hub.dispatch(&InputEvent::PointerMoved { x: 320.0, y: 240.0 });
/// session.render(|frame| renderer.draw(frame));
/// session.stop();
/// ```
pub struct ViewerSession<
    I = MeshIntersector,
    R = ExpressIdResolver,
    O = SubsetStore,
> {
    core: Rc<RefCell<SessionCore<I, R, O>>>,
    subscription: Option<Subscription>,
}

impl ViewerSession {
    /// Session with the default collaborators.
    #[must_use]
    pub fn new(options: Options, canvas: CanvasRect) -> Self {
        Self::with_collaborators(
            options,
            canvas,
            MeshIntersector,
            ExpressIdResolver,
            SubsetStore::new(),
        )
    }
}

impl<I, R, O> ViewerSession<I, R, O>
where
    I: SpatialIntersector + 'static,
    R: EntityResolver + 'static,
    O: SubsetOverlay + 'static,
{
    /// Session with caller-supplied intersector, resolver and overlay.
    ///
    /// Builds camera, lights and helpers from `options`. The session is idle
    /// and not yet listening for events.
    #[must_use]
    pub fn with_collaborators(
        options: Options,
        canvas: CanvasRect,
        intersector: I,
        resolver: R,
        overlay: O,
    ) -> Self {
        let aspect = if canvas.is_degenerate() {
            1.0
        } else {
            canvas.width() / canvas.height()
        };
        let scene = Scene::from_options(&options, aspect);
        let highlighter = Highlighter::new(HighlightAppearance::from_options(
            &options.highlight,
        ));
        let timing = FrameTiming::new(options.display.target_fps);
        let core = SessionCore {
            options,
            scene,
            canvas,
            device_pixel_ratio: 1.0,
            picker: Picker::new(intersector, resolver),
            highlighter,
            overlay,
            timing,
            last_pointer: None,
        };
        Self {
            core: Rc::new(RefCell::new(core)),
            subscription: None,
        }
    }

    /// Register a model with the scene and the overlay.
    ///
    /// The bounds tree is built here, using the configured leaf size.
    pub fn add_model(&self, id: ModelId, mesh: Mesh) -> Result<(), HoverError> {
        let mut guard = self.write()?;
        let core = &mut *guard;
        if core.scene.model(id).is_some() {
            return Err(HoverError::DuplicateModel(id));
        }
        let model = LoadedModel::new(id, mesh, core.options.picking.leaf_size);
        let model = core.scene.add_model(model)?;
        core.overlay.register_model(model);
        Ok(())
    }

    /// Begin listening for pointer events on `hub`. Calling it again while
    /// running does nothing.
    pub fn start(&mut self, hub: &PointerHub) {
        if self.subscription.is_some() {
            log::debug!("viewer session already started");
            return;
        }
        let core = Rc::clone(&self.core);
        self.subscription = Some(hub.subscribe(move |event| {
            if let Ok(mut core) = core.try_borrow_mut() {
                let _ = core.handle_event(*event);
            } else {
                log::warn!("viewer session busy, dropped {event:?}");
            }
        }));
        log::info!("viewer session started");
    }

    /// Stop listening and drop any highlight. Returns the highlight change.
    pub fn stop(&mut self) -> HighlightChange {
        let Some(subscription) = self.subscription.take() else {
            return HighlightChange::Unchanged;
        };
        subscription.cancel();
        log::info!("viewer session stopped");
        self.core
            .try_borrow_mut()
            .map_or(HighlightChange::Unchanged, |mut core| {
                let core = &mut *core;
                core.last_pointer = None;
                core.highlighter.clear(&mut core.overlay)
            })
    }

    /// Whether the session is subscribed to a hub.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.subscription.is_some()
    }

    /// Run one event through the pipeline directly, bypassing the hub.
    ///
    /// An event arriving while a frame is being drawn is dropped.
    pub fn handle_event(&self, event: InputEvent) -> HighlightChange {
        self.core.try_borrow_mut().map_or_else(
            |_| {
                log::warn!("viewer session busy, dropped {event:?}");
                HighlightChange::Unchanged
            },
            |mut core| core.handle_event(event),
        )
    }

    /// Re-pick at the last pointer position, e.g. after the host moved the
    /// camera without a pointer event.
    pub fn refresh(&self) -> HighlightChange {
        let last = self.core.try_borrow().ok().and_then(|c| c.last_pointer);
        last.map_or(HighlightChange::Unchanged, |p| {
            self.handle_event(InputEvent::PointerMoved { x: p.x, y: p.y })
        })
    }

    fn read(&self) -> Result<Ref<'_, SessionCore<I, R, O>>, HoverError> {
        self.core.try_borrow().map_err(|_| HoverError::SessionBusy)
    }

    fn write(&self) -> Result<RefMut<'_, SessionCore<I, R, O>>, HoverError> {
        self.core.try_borrow_mut().map_err(|_| HoverError::SessionBusy)
    }

    /// Current highlight.
    ///
    /// This and the other accessors fail with [`HoverError::SessionBusy`]
    /// only when called from a collaborator while an event is in flight.
    /// They are safe to call from inside a [`render`](Self::render) callback.
    pub fn highlight(&self) -> Result<HighlightState, HoverError> {
        Ok(self.read()?.highlighter.state())
    }

    /// Current canvas rectangle.
    pub fn canvas(&self) -> Result<CanvasRect, HoverError> {
        Ok(self.read()?.canvas)
    }

    /// Set the device pixel ratio reported by the host.
    pub fn set_device_pixel_ratio(&self, ratio: f32) -> Result<(), HoverError> {
        self.write()?.device_pixel_ratio = ratio;
        Ok(())
    }

    /// Mutate the camera (the host's navigation controls live outside this
    /// crate). `f` runs on a copy, so it may read the session.
    pub fn update_camera(
        &self,
        f: impl FnOnce(&mut Camera),
    ) -> Result<(), HoverError> {
        let mut camera = self.read()?.scene.camera().clone();
        f(&mut camera);
        *self.write()?.scene.camera_mut() = camera;
        Ok(())
    }

    /// Copy of the active options.
    pub fn options(&self) -> Result<Options, HoverError> {
        Ok(self.read()?.options.clone())
    }

    /// Read access to the overlay.
    pub fn with_overlay<T>(
        &self,
        f: impl FnOnce(&O) -> T,
    ) -> Result<T, HoverError> {
        Ok(f(&self.read()?.overlay))
    }

    /// Read access to the scene.
    pub fn with_scene<T>(
        &self,
        f: impl FnOnce(&Scene) -> T,
    ) -> Result<T, HoverError> {
        Ok(f(&self.read()?.scene))
    }

    /// Draw one frame through `draw`.
    ///
    /// Returns `None` without calling `draw` when the frame cap says it is
    /// too early or the session is mid-event. `draw` may call the read
    /// accessors; events fed to the session from inside it are dropped.
    pub fn render<T>(
        &self,
        draw: impl FnOnce(&Frame<'_, O>) -> T,
    ) -> Option<T> {
        let out = {
            let Ok(core) = self.read() else {
                log::debug!("frame skipped, viewer session busy");
                return None;
            };
            if !core.timing.should_render() {
                return None;
            }

            let highlight = core.highlighter.state();
            let mut camera = CameraUniform::new();
            camera.update_view_proj(core.scene.camera());
            camera.hovered_entity = highlight.as_entity_i32();

            let frame = Frame {
                camera,
                scene: &core.scene,
                overlay: &core.overlay,
                highlight,
                highlight_uniform: core.highlighter.appearance().uniform(),
                pixel_ratio: core
                    .options
                    .display
                    .pixel_ratio(core.device_pixel_ratio),
                fps: core.timing.fps(),
            };
            draw(&frame)
        };
        if let Ok(mut core) = self.write() {
            core.timing.end_frame();
        }
        Some(out)
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::highlight::MaterialId;
    use crate::scene::MeshBuilder;
    use crate::test_support::{OverlayCall, RecordingOverlay};

    type TestSession =
        ViewerSession<MeshIntersector, ExpressIdResolver, RecordingOverlay>;

    const CANVAS: CanvasRect = CanvasRect::from_size(800.0, 600.0);
    const TOP: EntityRef = EntityRef::new(ModelId(0), 7);
    const BELOW: EntityRef = EntityRef::new(ModelId(1), 9);

    /// Camera 20 units above the origin looking straight down.
    fn top_down_options() -> Options {
        let mut options = Options::default();
        options.camera.eye = [0.0, 20.0, 0.0];
        options.camera.target = [0.0, 0.0, 0.0];
        options.camera.up = [0.0, 0.0, 1.0];
        options
    }

    fn slab(min: Vec3, max: Vec3, entity: u32) -> Mesh {
        let mut builder = MeshBuilder::new();
        builder.push_box(min, max, entity);
        builder.build().unwrap()
    }

    /// Model 0: a 10x10 slab with its top at y = 0. Model 1: a wider slab
    /// two units below it.
    fn session_with(options: Options) -> TestSession {
        let session = ViewerSession::with_collaborators(
            options,
            CANVAS,
            MeshIntersector,
            ExpressIdResolver,
            RecordingOverlay::default(),
        );
        session
            .add_model(
                ModelId(0),
                slab(Vec3::new(-5.0, -1.0, -5.0), Vec3::new(5.0, 0.0, 5.0), 7),
            )
            .unwrap();
        session
            .add_model(
                ModelId(1),
                slab(
                    Vec3::new(-10.0, -3.0, -10.0),
                    Vec3::new(10.0, -2.0, 10.0),
                    9,
                ),
            )
            .unwrap();
        session
    }

    fn moved(x: f32, y: f32) -> InputEvent {
        InputEvent::PointerMoved { x, y }
    }

    #[test]
    fn center_picks_nearest_model() {
        let session = session_with(top_down_options());
        let change = session.handle_event(moved(400.0, 300.0));
        assert_eq!(change, HighlightChange::Created(TOP));
        assert_eq!(
            session.highlight().unwrap(),
            HighlightState::Highlighting(TOP)
        );
    }

    #[test]
    fn pointer_past_upper_model_picks_lower_one() {
        let session = session_with(top_down_options());
        let _ = session.handle_event(moved(560.0, 300.0));
        assert_eq!(session.highlight().unwrap().entity(), Some(BELOW));
    }

    #[test]
    fn moving_into_empty_space_clears_once() {
        let session = session_with(top_down_options());
        let _ = session.handle_event(moved(400.0, 300.0));
        assert_eq!(
            session.handle_event(moved(0.0, 0.0)),
            HighlightChange::Cleared(TOP)
        );
        assert_eq!(
            session.handle_event(moved(1.0, 1.0)),
            HighlightChange::Unchanged
        );
        assert_eq!(
            session.with_overlay(RecordingOverlay::clear_count).unwrap(),
            1
        );
        assert_eq!(session.highlight().unwrap(), HighlightState::Idle);
    }

    #[test]
    fn only_one_entity_is_ever_highlighted() {
        let session = session_with(top_down_options());
        for x in [400.0, 560.0, 420.0, 0.0, 560.0] {
            let _ = session.handle_event(moved(x, 300.0));
        }
        session.with_overlay(|overlay| {
            assert_eq!(overlay.max_live, 1);
            assert_eq!(
                overlay.calls[..3],
                [
                    OverlayCall::Create(ModelId(0), vec![7]),
                    OverlayCall::Clear(ModelId(0)),
                    OverlayCall::Create(ModelId(1), vec![9]),
                ]
            );
        })
        .unwrap();
    }

    #[test]
    fn degenerate_canvas_never_picks() {
        let session = session_with(top_down_options());
        let _ = session
            .handle_event(InputEvent::CanvasResized(CanvasRect::from_size(
                0.0, 0.0,
            )));
        assert_eq!(
            session.handle_event(moved(0.0, 0.0)),
            HighlightChange::Unchanged
        );
        assert!(session.with_overlay(|o| o.calls.is_empty()).unwrap());
    }

    #[test]
    fn resize_updates_canvas_and_aspect() {
        let session = session_with(top_down_options());
        let rect = CanvasRect::from_size(1000.0, 500.0);
        let _ = session.handle_event(InputEvent::CanvasResized(rect));
        assert_eq!(session.canvas().unwrap(), rect);
        let aspect = session.with_scene(|s| s.camera().aspect).unwrap();
        assert!((aspect - 2.0).abs() < 1e-6);
        let _ = session.handle_event(moved(500.0, 250.0));
        assert_eq!(session.highlight().unwrap().entity(), Some(TOP));
    }

    #[test]
    fn pointer_leave_clears_unless_disabled() {
        let session = session_with(top_down_options());
        let _ = session.handle_event(moved(400.0, 300.0));
        assert_eq!(
            session.handle_event(InputEvent::PointerLeft),
            HighlightChange::Cleared(TOP)
        );

        let mut options = top_down_options();
        options.picking.clear_on_leave = false;
        let session = session_with(options);
        let _ = session.handle_event(moved(400.0, 300.0));
        assert_eq!(
            session.handle_event(InputEvent::PointerLeft),
            HighlightChange::Unchanged
        );
        assert_eq!(session.highlight().unwrap().entity(), Some(TOP));
    }

    #[test]
    fn hover_disabled_skips_picking() {
        let mut options = top_down_options();
        options.picking.hover = false;
        let session = session_with(options);
        let _ = session.handle_event(moved(400.0, 300.0));
        assert_eq!(session.highlight().unwrap(), HighlightState::Idle);
    }

    #[test]
    fn refresh_repicks_after_camera_move() {
        let session = session_with(top_down_options());
        let _ = session.handle_event(moved(400.0, 300.0));
        session
            .update_camera(|camera| {
                camera.eye = Vec3::new(100.0, 20.0, 0.0);
                camera.target = Vec3::new(100.0, 0.0, 0.0);
            })
            .unwrap();
        assert_eq!(session.refresh(), HighlightChange::Cleared(TOP));
    }

    #[test]
    fn accessors_work_inside_render() {
        let session = session_with(top_down_options());
        let _ = session.handle_event(moved(400.0, 300.0));
        let inside = session.render(|frame| {
            let state = session.highlight().unwrap();
            let canvas = session.canvas().unwrap();
            let models = session.with_scene(|s| s.models().len()).unwrap();
            (state == frame.highlight, canvas, models)
        });
        assert_eq!(inside, Some((true, CANVAS, 2)));
    }

    #[test]
    fn events_inside_render_are_dropped() {
        let session = session_with(top_down_options());
        let change = session
            .render(|_| session.handle_event(moved(400.0, 300.0)))
            .unwrap();
        assert_eq!(change, HighlightChange::Unchanged);
        assert_eq!(session.highlight().unwrap(), HighlightState::Idle);

        let _ = session.handle_event(moved(400.0, 300.0));
        assert_eq!(session.highlight().unwrap().entity(), Some(TOP));
    }

    #[test]
    fn camera_update_may_read_session() {
        let session = session_with(top_down_options());
        session
            .update_camera(|camera| {
                let canvas = session.canvas().unwrap();
                camera.aspect = canvas.width() / canvas.height() * 2.0;
            })
            .unwrap();
        let aspect = session.with_scene(|s| s.camera().aspect).unwrap();
        assert!((aspect - 8.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn duplicate_model_is_rejected() {
        let session = session_with(top_down_options());
        let err = session
            .add_model(ModelId(0), slab(Vec3::ZERO, Vec3::ONE, 1))
            .unwrap_err();
        assert!(matches!(err, HoverError::DuplicateModel(ModelId(0))));
    }

    #[test]
    fn default_session_fills_subset_store() {
        let session = ViewerSession::new(top_down_options(), CANVAS);
        session
            .add_model(
                ModelId(0),
                slab(Vec3::new(-5.0, -1.0, -5.0), Vec3::new(5.0, 0.0, 5.0), 7),
            )
            .unwrap();
        let _ = session.handle_event(moved(400.0, 300.0));
        session.with_overlay(|store| {
            let subset =
                store.subset(ModelId(0), MaterialId::PRESELECT).unwrap();
            assert_eq!(subset.entities, [7]);
            assert_eq!(subset.triangle_count(), 12);
        })
        .unwrap();
        let _ = session.handle_event(InputEvent::PointerLeft);
        assert_eq!(session.with_overlay(SubsetStore::live_count).unwrap(), 0);
    }

    #[test]
    fn start_is_idempotent_and_stop_unsubscribes() {
        let hub = PointerHub::new();
        let mut session = session_with(top_down_options());
        session.start(&hub);
        session.start(&hub);
        assert!(session.is_running());
        assert_eq!(hub.listener_count(), 1);

        hub.dispatch(&moved(400.0, 300.0));
        assert_eq!(session.highlight().unwrap().entity(), Some(TOP));

        assert_eq!(session.stop(), HighlightChange::Cleared(TOP));
        assert!(!session.is_running());
        assert_eq!(hub.listener_count(), 0);

        hub.dispatch(&moved(400.0, 300.0));
        assert_eq!(session.highlight().unwrap(), HighlightState::Idle);
        assert_eq!(session.stop(), HighlightChange::Unchanged);
    }

    #[test]
    fn dropping_session_unsubscribes() {
        let hub = PointerHub::new();
        let mut session = session_with(top_down_options());
        session.start(&hub);
        drop(session);
        assert_eq!(hub.listener_count(), 0);
        hub.dispatch(&moved(400.0, 300.0));
    }

    #[test]
    fn render_exposes_hovered_entity() {
        let session = session_with(top_down_options());
        session.set_device_pixel_ratio(3.0).unwrap();
        let idle = session.render(|frame| frame.camera.hovered_entity);
        assert_eq!(idle, Some(-1));

        let _ = session.handle_event(moved(400.0, 300.0));
        let frame = session.render(|frame| {
            (
                frame.camera.hovered_entity,
                frame.highlight,
                frame.pixel_ratio,
                frame.scene.models().len(),
            )
        });
        assert_eq!(
            frame,
            Some((7, HighlightState::Highlighting(TOP), 2.0, 2))
        );
    }
}
