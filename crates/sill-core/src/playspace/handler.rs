use std::path::Path;
use std::time::Duration;

use sill_config::SillConfig;
use tracing::{debug, info, warn};

use super::types::FrameReport;
use crate::clickthrough::{ClickDecision, ClickThroughProbe, FramebufferSampler};
use crate::collider::BoundaryCollider;
use crate::debug::{DebugDrawMode, DebugLine, debug_lines};
use crate::events::{EventBus, EventKind, PlayspaceEvent, SubscriptionId};
use crate::geometry::Point2;
use crate::hooks::{HookSet, InputHooks, KeyTransition};
use crate::resolver::{ScreenGeometry, Segment, resolve_top_borders};
use crate::sync::BoundarySynchronizer;
use crate::transform::OrthoCameraTransform;
use crate::watch::{FileSystemHooks, WatchError};
use crate::window::{DisplayInfo, WindowError, WindowQuery, WindowRecord, WindowSource};

const FPS_SMOOTHING: f32 = 0.1;

/// Everything the companion needs to walk on the desktop, advanced once per
/// rendered frame with [`tick`](Self::tick).
pub struct Playspace<S: WindowSource, H: InputHooks> {
    config: SillConfig,
    query: WindowQuery<S>,
    hooks: HookSet<H>,
    watchers: Vec<FileSystemHooks>,
    transform: OrthoCameraTransform,
    synchronizer: BoundarySynchronizer,
    events: EventBus,
    probe: ClickThroughProbe,
    debug_mode: DebugDrawMode,
    display: DisplayInfo,
    screen: ScreenGeometry,
    windows: Vec<WindowRecord>,
    segments: Vec<Segment>,
    frame: u64,
    smoothed_delta: f32,
    intercepting: Option<bool>,
    shut_down: bool,
}

impl<S: WindowSource, H: InputHooks> Playspace<S, H> {
    /// Build the pipeline from `config`, install the input hooks and start
    /// watching the configured directories.
    ///
    /// Nothing here fails: a missing display falls back to the first one (or
    /// a default 1920x1080 display), and hooks or watchers that cannot be
    /// installed are logged and left out.
    pub fn new(source: S, hooks: H, config: SillConfig) -> Self {
        let query = WindowQuery::new(source, config.pipeline.title_cache_capacity())
            .with_min_window_size(config.window.min_window_size());

        let chosen = pick_display(query.displays(), config.window.display_index());
        let screen = ScreenGeometry::from_display(&chosen, config.pipeline.segment_depth());
        let transform = OrthoCameraTransform::new(screen.width, screen.height, &config.playspace);
        let synchronizer = BoundarySynchronizer::with_baseline(config.pipeline.pool_baseline());
        let hooks = HookSet::install(hooks);

        let mut watchers = Vec::new();
        for path in config.watch.paths() {
            match FileSystemHooks::install(path) {
                Ok(watcher) => watchers.push(watcher),
                Err(e) => warn!(
                    event = "core.playspace.watch_failed",
                    path = %path.display(),
                    error = %e
                ),
            }
        }

        info!(
            event = "core.playspace.create_completed",
            display = %chosen.name,
            width = screen.width,
            height = screen.height,
            watchers = watchers.len()
        );

        Self {
            debug_mode: config.debug.draw_mode(),
            config,
            query,
            hooks,
            watchers,
            transform,
            synchronizer,
            events: EventBus::new(),
            probe: ClickThroughProbe::new(),
            display: chosen,
            screen,
            windows: Vec::new(),
            segments: Vec::new(),
            frame: 0,
            smoothed_delta: 0.0,
            intercepting: None,
            shut_down: false,
        }
    }

    /// Advance one frame. `delta` is the time since the previous frame.
    ///
    /// Order: service hooks, publish queued input, detect display resizes,
    /// query windows, resolve segments, synchronize colliders, cull the pool
    /// every `cull_interval_frames`.
    pub fn tick(&mut self, delta: Duration) -> FrameReport {
        self.frame += 1;
        let mut published = 0;

        self.hooks.poll();
        for event in self.drain_input() {
            self.events.publish(&event);
            published += 1;
        }
        if let Some(event) = self.refresh_display() {
            self.events.publish(&event);
            published += 1;
        }

        self.windows = self.query.list_visible_windows();
        self.segments = resolve_top_borders(&self.windows, &self.screen, self.query.own_handle());
        let sync = self.synchronizer.sync(
            &self.segments,
            self.debug_mode != DebugDrawMode::Off,
            &self.transform,
        );

        let interval = self.config.pipeline.cull_interval_frames();
        let culled = if interval > 0 && self.frame % interval == 0 {
            self.synchronizer.cull_excess()
        } else {
            0
        };

        let delta = delta.as_secs_f32();
        self.smoothed_delta += (delta - self.smoothed_delta) * FPS_SMOOTHING;

        let report = FrameReport {
            frame: self.frame,
            windows: self.windows.len(),
            segments: self.segments.len(),
            sync,
            culled,
            events: published,
            fps: self.fps(),
        };
        debug!(
            event = "core.playspace.tick_completed",
            frame = report.frame,
            windows = report.windows,
            segments = report.segments,
            events = report.events
        );
        report
    }

    /// Record the pointer (Y-up screen pixels) for this frame's click
    /// pass-through test. Ignored unless `alpha_mode` is enabled.
    pub fn request_click_probe(&mut self, pointer: Point2) {
        if self.config.window.alpha_mode() {
            self.probe.request(pointer, self.screen.width, self.screen.height);
        }
    }

    /// Finish the click test once the frame has been rendered.
    ///
    /// The decision is applied to the companion window, and a `WindowClick`
    /// event is published whenever the intercept state flips.
    pub fn resolve_click_probe(&mut self, sampler: &dyn FramebufferSampler) -> Option<ClickDecision> {
        let decision = self.probe.resolve(sampler)?;
        self.hooks.set_click_through(decision.pass_through);

        let intercepted = !decision.pass_through;
        if self.intercepting != Some(intercepted) {
            self.intercepting = Some(intercepted);
            self.events.publish(&PlayspaceEvent::WindowClick {
                intercepted,
                position: decision.position,
            });
        }
        Some(decision)
    }

    /// Active colliders in segment order.
    pub fn boundaries(&self) -> Vec<&BoundaryCollider> {
        self.synchronizer.boundaries()
    }

    /// Segments resolved by the last tick.
    pub fn window_top_borders(&self) -> &[Segment] {
        &self.segments
    }

    /// Windows returned by the last tick's query.
    pub fn windows(&self) -> &[WindowRecord] {
        &self.windows
    }

    pub fn debug_mode(&self) -> DebugDrawMode {
        self.debug_mode
    }

    /// Takes effect on the next tick.
    pub fn set_debug_mode(&mut self, mode: DebugDrawMode) {
        self.debug_mode = mode;
    }

    /// Polylines for the current debug mode, from the last tick's data.
    pub fn debug_lines(&self) -> Vec<DebugLine> {
        debug_lines(self.debug_mode, &self.windows, &self.segments, &self.screen)
    }

    pub fn current_display(&self) -> &DisplayInfo {
        &self.display
    }

    pub fn screen(&self) -> &ScreenGeometry {
        &self.screen
    }

    /// Move the playspace to display `index`. Surfaces follow on the next tick.
    pub fn change_display(&mut self, index: usize) -> Result<(), WindowError> {
        let target = self
            .query
            .query_displays()?
            .into_iter()
            .find(|d| d.index == index)
            .ok_or(WindowError::MonitorNotFound { index })?;

        info!(
            event = "core.playspace.display_changed",
            index = index,
            name = %target.name
        );
        if let Some(event) = self.apply_display(target) {
            self.events.publish(&event);
        }
        Ok(())
    }

    /// Smoothed frames per second, 0 before the first tick.
    pub fn fps(&self) -> f32 {
        if self.smoothed_delta > 0.0 {
            1.0 / self.smoothed_delta
        } else {
            0.0
        }
    }

    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    pub fn transform(&self) -> &OrthoCameraTransform {
        &self.transform
    }

    /// Change the canvas scale, publishing `ScaleChange` when it actually
    /// changed. Returns the previous scale.
    pub fn set_scale_factor(&mut self, scale_factor: f32) -> f32 {
        let old = self.transform.set_scale_factor(scale_factor);
        let new = self.transform.scale_factor();
        if new != old {
            info!(event = "core.playspace.scale_changed", old = old, new = new);
            self.events.publish(&PlayspaceEvent::ScaleChange { old, new });
        }
        old
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&PlayspaceEvent) + 'static) -> SubscriptionId {
        self.events.subscribe(listener)
    }

    pub fn subscribe_to(
        &mut self,
        kind: EventKind,
        listener: impl FnMut(&PlayspaceEvent) + 'static,
    ) -> SubscriptionId {
        self.events.subscribe_to(kind, listener)
    }

    pub fn events_mut(&mut self) -> &mut EventBus {
        &mut self.events
    }

    /// Start watching another directory.
    pub fn watch(&mut self, path: &Path) -> Result<(), WatchError> {
        self.watchers.push(FileSystemHooks::install(path)?);
        Ok(())
    }

    pub fn hooks(&self) -> &HookSet<H> {
        &self.hooks
    }

    pub fn synchronizer(&self) -> &BoundarySynchronizer {
        &self.synchronizer
    }

    pub fn window_source(&self) -> &S {
        self.query.source()
    }

    pub fn window_source_mut(&mut self) -> &mut S {
        self.query.source_mut()
    }

    /// Remove hooks and stop watchers. Safe to call more than once.
    pub fn shutdown(&mut self) {
        if self.shut_down {
            return;
        }
        self.shut_down = true;
        self.hooks.uninstall();
        self.watchers.clear();
        info!(event = "core.playspace.shutdown_completed", frames = self.frame);
    }

    fn drain_input(&self) -> Vec<PlayspaceEvent> {
        let mut events: Vec<PlayspaceEvent> = self
            .hooks
            .drain_keys()
            .into_iter()
            .map(|key| match key.transition {
                KeyTransition::Down => PlayspaceEvent::KeyDown { key: key.key },
                KeyTransition::Up => PlayspaceEvent::KeyUp { key: key.key },
            })
            .collect();

        events.extend(
            self.hooks
                .drain_drops()
                .into_iter()
                .map(|drop| PlayspaceEvent::FileDrop {
                    paths: drop.paths,
                    position: drop.position,
                }),
        );

        for watcher in &self.watchers {
            events.extend(watcher.drain_events());
        }
        events
    }

    /// Re-read the current display and pick up size changes.
    fn refresh_display(&mut self) -> Option<PlayspaceEvent> {
        let current = self
            .query
            .displays()
            .into_iter()
            .find(|d| d.index == self.display.index)?;
        if current == self.display {
            return None;
        }
        self.apply_display(current)
    }

    fn apply_display(&mut self, display: DisplayInfo) -> Option<PlayspaceEvent> {
        let (old_width, old_height) = (self.display.screen_width(), self.display.screen_height());
        self.screen = ScreenGeometry::from_display(&display, self.config.pipeline.segment_depth());
        self.transform.set_screen_size(self.screen.width, self.screen.height);
        self.display = display;

        let (width, height) = (self.display.screen_width(), self.display.screen_height());
        if (width, height) == (old_width, old_height) {
            return None;
        }
        info!(
            event = "core.playspace.resize_detected",
            old_width = old_width,
            old_height = old_height,
            width = width,
            height = height
        );
        Some(PlayspaceEvent::WindowResize {
            old_width,
            old_height,
            width,
            height,
        })
    }
}

impl<S: WindowSource, H: InputHooks> Drop for Playspace<S, H> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl<S: WindowSource, H: InputHooks> std::fmt::Debug for Playspace<S, H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Playspace")
            .field("display", &self.display.name)
            .field("frame", &self.frame)
            .field("segments", &self.segments.len())
            .finish()
    }
}

fn pick_display(displays: Vec<DisplayInfo>, index: usize) -> DisplayInfo {
    if let Some(display) = displays.iter().find(|d| d.index == index) {
        return display.clone();
    }
    match displays.into_iter().next() {
        Some(first) => {
            warn!(
                event = "core.playspace.display_missing",
                requested = index,
                using = first.index
            );
            first
        }
        None => {
            warn!(event = "core.playspace.display_fallback");
            DisplayInfo::fallback()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clickthrough::SolidSampler;
    use crate::events::VirtualKey;
    use crate::geometry::WindowRect;
    use crate::hooks::{HookKind, RecordingHooks};
    use crate::resolver::FLOOR_ID;
    use crate::window::StaticWindowSource;
    use std::cell::RefCell;
    use std::path::PathBuf;
    use std::rc::Rc;

    const FRAME: Duration = Duration::from_millis(16);

    fn source() -> StaticWindowSource {
        StaticWindowSource::new()
            .with_screen(800, 600)
            .with_window(1, "A", WindowRect::new(100, 300, 400, 550))
            .with_window(2, "B", WindowRect::new(200, 350, 300, 580))
            .with_window(3, "C", WindowRect::new(0, 500, 800, 590))
    }

    fn playspace(source: StaticWindowSource) -> (Playspace<StaticWindowSource, RecordingHooks>, RecordingHooks) {
        let hooks = RecordingHooks::new();
        (Playspace::new(source, hooks.clone(), SillConfig::default()), hooks)
    }

    fn record_events(
        playspace: &mut Playspace<StaticWindowSource, RecordingHooks>,
    ) -> Rc<RefCell<Vec<PlayspaceEvent>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        playspace.subscribe(move |e| sink.borrow_mut().push(e.clone()));
        seen
    }

    #[test]
    fn test_tick_resolves_and_synchronizes() {
        let (mut playspace, _) = playspace(source());
        let report = playspace.tick(FRAME);

        assert_eq!(report.frame, 1);
        assert_eq!(report.windows, 3);
        assert_eq!(report.segments, 4);
        assert_eq!(report.sync.allocated, 4);
        let ids: Vec<&str> = playspace.boundaries().iter().map(|c| c.id()).collect();
        assert_eq!(ids, vec!["A_1_0", "C_3_0", "C_3_1", FLOOR_ID]);
    }

    #[test]
    fn test_steady_scene_only_reconfigures() {
        let (mut playspace, _) = playspace(source());
        playspace.tick(FRAME);
        let report = playspace.tick(FRAME);

        assert_eq!(report.sync.allocated, 0);
        assert_eq!(report.sync.retired, 0);
        assert_eq!(report.sync.reconfigured, 4);
    }

    #[test]
    fn test_failing_source_leaves_floor_only() {
        let (mut playspace, _) = playspace(source().failing());
        let report = playspace.tick(FRAME);

        assert_eq!(report.windows, 0);
        assert_eq!(playspace.window_top_borders().len(), 1);
        assert_eq!(playspace.window_top_borders()[0].id, FLOOR_ID);
        // No displays could be read either.
        assert_eq!(playspace.current_display().name, "Fallback Display");
    }

    #[test]
    fn test_own_window_is_not_a_surface() {
        let (mut playspace, _) = playspace(source().with_own_handle(1));
        playspace.tick(FRAME);
        assert!(playspace.window_top_borders().iter().all(|s| !s.id.starts_with("A_1")));
    }

    #[test]
    fn test_key_and_drop_events_are_published() {
        let (mut playspace, hooks) = playspace(source());
        let seen = record_events(&mut playspace);

        hooks.press(0x41);
        hooks.release(0x41);
        hooks.drop_files(vec![PathBuf::from("/tmp/a.png")], Point2::new(5.0, 6.0));
        let report = playspace.tick(FRAME);

        assert_eq!(report.events, 3);
        assert_eq!(
            *seen.borrow(),
            vec![
                PlayspaceEvent::KeyDown { key: VirtualKey(0x41) },
                PlayspaceEvent::KeyUp { key: VirtualKey(0x41) },
                PlayspaceEvent::FileDrop {
                    paths: vec![PathBuf::from("/tmp/a.png")],
                    position: Point2::new(5.0, 6.0),
                },
            ]
        );
        assert_eq!(playspace.tick(FRAME).events, 0);
    }

    #[test]
    fn test_resize_is_detected_between_ticks() {
        let (mut playspace, _) = playspace(source());
        let seen = record_events(&mut playspace);
        playspace.tick(FRAME);

        let area = WindowRect::new(0, 0, 1024, 768);
        playspace.window_source_mut().set_displays(vec![DisplayInfo {
            index: 0,
            name: "Display 1".to_string(),
            monitor_area: area,
            work_area: area,
            is_primary: true,
        }]);
        playspace.tick(FRAME);

        assert_eq!(
            *seen.borrow(),
            vec![PlayspaceEvent::WindowResize {
                old_width: 800,
                old_height: 600,
                width: 1024,
                height: 768,
            }]
        );
        assert_eq!(playspace.screen().height, 768.0);
    }

    #[test]
    fn test_change_display() {
        let source = source().with_display(DisplayInfo {
            index: 1,
            name: "Side".to_string(),
            monitor_area: WindowRect::new(800, 0, 2080, 1024),
            work_area: WindowRect::new(800, 0, 2080, 1024),
            is_primary: false,
        });
        let (mut playspace, _) = playspace(source);

        playspace.change_display(1).unwrap();
        assert_eq!(playspace.current_display().name, "Side");
        assert_eq!(playspace.screen().origin_x, 800.0);

        let error = playspace.change_display(7).unwrap_err();
        assert!(matches!(error, WindowError::MonitorNotFound { index: 7 }));
        assert_eq!(playspace.current_display().name, "Side");
    }

    #[test]
    fn test_configured_display_is_picked_on_create() {
        let source = source().with_display(DisplayInfo {
            index: 1,
            name: "Side".to_string(),
            monitor_area: WindowRect::new(800, 0, 2080, 1024),
            work_area: WindowRect::new(800, 0, 2080, 1024),
            is_primary: false,
        });
        let mut config = SillConfig::default();
        config.window.display_index = Some(1);
        let playspace = Playspace::new(source, RecordingHooks::new(), config);

        assert_eq!(playspace.current_display().name, "Side");
        assert_eq!(playspace.screen().width, 1280.0);
        assert_eq!(playspace.screen().height, 1024.0);
    }

    #[test]
    fn test_fps_is_smoothed() {
        let (mut playspace, _) = playspace(source());
        assert_eq!(playspace.fps(), 0.0);

        for _ in 0..300 {
            playspace.tick(Duration::from_secs_f32(1.0 / 50.0));
        }
        assert!((playspace.fps() - 50.0).abs() < 0.1);
    }

    #[test]
    fn test_scale_change_event() {
        let (mut playspace, _) = playspace(source());
        let seen = record_events(&mut playspace);

        assert_eq!(playspace.set_scale_factor(2.0), 1.0);
        assert_eq!(playspace.set_scale_factor(2.0), 2.0);
        assert_eq!(playspace.set_scale_factor(-1.0), 2.0);

        assert_eq!(
            *seen.borrow(),
            vec![PlayspaceEvent::ScaleChange { old: 1.0, new: 2.0 }]
        );
    }

    #[test]
    fn test_click_probe_toggles_pass_through() {
        let (mut playspace, hooks) = playspace(source());
        let seen = record_events(&mut playspace);
        let companion =
            SolidSampler::transparent().with_opaque_rect(WindowRect::new(0, 0, 100, 100));

        playspace.request_click_probe(Point2::new(50.0, 50.0));
        let decision = playspace.resolve_click_probe(&companion).unwrap();
        assert!(!decision.pass_through);

        playspace.request_click_probe(Point2::new(50.0, 60.0));
        playspace.resolve_click_probe(&companion);

        playspace.request_click_probe(Point2::new(500.0, 500.0));
        assert!(playspace.resolve_click_probe(&companion).unwrap().pass_through);

        assert_eq!(hooks.click_through_calls(), vec![true, false, true]);
        let intercepts: Vec<bool> = seen
            .borrow()
            .iter()
            .filter_map(|e| match e {
                PlayspaceEvent::WindowClick { intercepted, .. } => Some(*intercepted),
                _ => None,
            })
            .collect();
        assert_eq!(intercepts, vec![true, false]);
    }

    #[test]
    fn test_click_probe_disabled_without_alpha_mode() {
        let mut config = SillConfig::default();
        config.window.alpha_mode = Some(false);
        let mut playspace = Playspace::new(source(), RecordingHooks::new(), config);

        playspace.request_click_probe(Point2::new(50.0, 50.0));
        assert!(playspace.resolve_click_probe(&SolidSampler::transparent()).is_none());
    }

    #[test]
    fn test_periodic_cull_shrinks_pool() {
        let mut config = SillConfig::default();
        config.pipeline.pool_baseline = Some(1);
        config.pipeline.cull_interval_frames = Some(2);
        let mut playspace = Playspace::new(source(), RecordingHooks::new(), config);

        playspace.tick(FRAME);
        playspace.window_source_mut().replace_windows(Vec::new());
        let report = playspace.tick(FRAME);

        // Three window colliders were retired; the floor stays active.
        assert_eq!(report.sync.retired, 3);
        assert_eq!(report.culled, 3);
        assert_eq!(playspace.synchronizer().pool().total_count(), 1);
    }

    #[test]
    fn test_debug_lines_follow_mode() {
        let (mut playspace, _) = playspace(source());
        playspace.tick(FRAME);
        assert!(playspace.debug_lines().is_empty());

        playspace.set_debug_mode(DebugDrawMode::WindowTops);
        assert_eq!(playspace.debug_lines().len(), 4);
        playspace.set_debug_mode(DebugDrawMode::WindowBorders);
        assert_eq!(playspace.debug_lines().len(), 3);
    }

    #[test]
    fn test_shutdown_uninstalls_once() {
        let (mut playspace, hooks) = playspace(source());
        playspace.shutdown();
        playspace.shutdown();
        assert!(!playspace.hooks().is_available(HookKind::Keyboard));
        drop(playspace);
        assert_eq!(hooks.uninstall_count(), 1);
    }

    #[test]
    fn test_watched_directory_reports_changes() {
        let dir = tempfile::tempdir().unwrap();
        let (mut playspace, _) = playspace(source());
        playspace.watch(dir.path()).unwrap();
        std::fs::write(dir.path().join("treat.txt"), b"").unwrap();

        let deadline = std::time::Instant::now() + Duration::from_secs(5);
        let mut events = 0;
        while events == 0 && std::time::Instant::now() < deadline {
            events = playspace.tick(FRAME).events;
            std::thread::sleep(Duration::from_millis(20));
        }
        assert!(events > 0);
    }
}
