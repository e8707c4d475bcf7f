use kurbo::Rect;

use crate::{
    balloon::{self, Balloon},
    config::TourConfig,
    dom::{DomBackend, ElementHandle, ElementSpec, EventKind, TourAction},
    error::{TourError, TourResult},
    mask::mask_path,
    navigator::Navigator,
    radius::resolve_border_radius,
    timer::{Scheduler, TimerId},
    visibility::is_potentially_visible,
};

pub const DEFAULT_LANGUAGE: &str = "it";
pub const NOTIFICATION_TTL_MS: u64 = 2500;
pub const RESIZE_DEBOUNCE_MS: u64 = 5;
/// Gap between resetting the progress cursor to 0% and re-animating it to
/// 100%, so the reset style applies before the transition restarts.
pub const PROGRESS_REANIMATE_DELAY_MS: u64 = 50;

/// Which way to keep looking when a step's target is not viewable.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SkipDirection {
    Forward,
    Backward,
}

/// Keys the engine reacts to while a tour is active.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    Escape,
    Space,
}

/// `Handled` asks the host to prevent the default browser action.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum KeyResponse {
    Handled,
    Ignored,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Phase {
    Active,
    TearingDown,
    Destroyed,
}

/// Transient overlay elements. At most one mask, balloon, and navigator
/// exist at a time; each rebuild removes its predecessor first.
struct Overlay {
    root: ElementHandle,
    notification_center: ElementHandle,
    svg: ElementHandle,
    mask: Option<ElementHandle>,
    balloon: Option<Balloon>,
    navigator: Option<Navigator>,
}

/// The step sequencer: single source of truth for which step is shown, and
/// owner of the autoplay timer lifecycle.
///
/// The host owns the event loop. DOM events bound through
/// [`DomBackend::bind`] come back via [`Tour::dispatch`], timers registered
/// with the [`Scheduler`] come back via [`Tour::on_timer`], and the host's
/// global key listener forwards through [`Tour::handle_key`].
pub struct Tour<D: DomBackend, S: Scheduler> {
    dom: D,
    scheduler: S,
    container: ElementHandle,
    config: TourConfig,
    lang: String,
    overlay: Option<Overlay>,
    current: usize,
    playing: bool,
    phase: Phase,
    autoplay_timer: Option<TimerId>,
    reanimate_timer: Option<TimerId>,
    resize_timer: Option<TimerId>,
    notifications: Vec<(TimerId, ElementHandle)>,
}

impl<D: DomBackend, S: Scheduler> Tour<D, S> {
    pub fn new(
        dom: D,
        scheduler: S,
        container: ElementHandle,
        config: TourConfig,
    ) -> TourResult<Self> {
        config.validate()?;
        Ok(Self {
            dom,
            scheduler,
            container,
            config,
            lang: DEFAULT_LANGUAGE.to_string(),
            overlay: None,
            current: 0,
            playing: false,
            phase: Phase::Active,
            autoplay_timer: None,
            reanimate_timer: None,
            resize_timer: None,
            notifications: Vec::new(),
        })
    }

    /// Sets the language captions are resolved against (default `"it"`).
    pub fn language(mut self, lang: impl Into<String>) -> Self {
        self.lang = lang.into();
        self
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn is_destroyed(&self) -> bool {
        self.phase == Phase::Destroyed
    }

    pub fn overlay_root(&self) -> Option<ElementHandle> {
        self.overlay.as_ref().map(|o| o.root)
    }

    pub fn dom(&self) -> &D {
        &self.dom
    }

    pub fn dom_mut(&mut self) -> &mut D {
        &mut self.dom
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Builds the overlay and shows the first step. A config with no steps
    /// renders nothing; the tour stays inert. Dispatches `onTutorialInit` on
    /// the container once construction completes.
    #[tracing::instrument(skip(self))]
    pub fn init(&mut self) -> TourResult<()> {
        if self.config.steps.is_empty() {
            tracing::warn!("tour config has no steps; nothing to render");
            return Ok(());
        }

        let root = self
            .dom
            .create(ElementSpec::TagName("div"), Some(self.container))?;
        self.dom.add_class(root, "tutorialContainer");
        self.dom.add_class(root, "fadeIn");

        let top_bar = self.dom.create(ElementSpec::TagName("div"), Some(root))?;
        self.dom.add_class(top_bar, "buttonTopContainer");
        let close = self.dom.create(ElementSpec::TagName("i"), Some(top_bar))?;
        self.dom.add_class(close, "close");
        self.dom.add_class(close, "handCursor");
        self.dom.bind(close, EventKind::Click, TourAction::Dismiss);

        let notification_center = self.dom.create(ElementSpec::TagName("div"), Some(root))?;
        self.dom.add_class(notification_center, "notificationCenter");

        let svg = self.build_svg_layer(root)?;
        self.overlay = Some(Overlay {
            root,
            notification_center,
            svg,
            mask: None,
            balloon: None,
            navigator: None,
        });

        self.go_to_step(0, SkipDirection::Forward)?;
        self.dom.dispatch_event(self.container, "onTutorialInit", true);
        Ok(())
    }

    /// Shows the step at `index`, skipping over non-viewable targets in
    /// `direction` until a viewable one or the sequence boundary is reached.
    /// The caller must pass a valid index.
    #[tracing::instrument(skip(self))]
    pub fn go_to_step(&mut self, index: usize, direction: SkipDirection) -> TourResult<()> {
        let Some(overlay) = self.overlay.as_ref() else {
            return Ok(());
        };
        if index >= self.config.steps.len() {
            return Err(TourError::validation(format!(
                "step index {index} out of range"
            )));
        }
        let notification_center = overlay.notification_center;
        let svg = overlay.svg;
        if let Some(nav) = overlay.navigator {
            nav.reset_progress(&mut self.dom);
        }

        let target = self
            .dom
            .query_selector(self.container, &self.config.steps[index].target_selector);
        let Some(target) = target.filter(|t| is_potentially_visible(&self.dom, Some(*t))) else {
            tracing::debug!(index, "step target missing or not viewable; skipping");
            if self.config.show_notifications {
                self.notify_unavailable(index, notification_center)?;
            }
            return match direction {
                SkipDirection::Forward if index + 1 < self.config.steps.len() => {
                    self.current = index + 1;
                    self.go_to_step(index + 1, direction)
                }
                SkipDirection::Backward if index > 0 => {
                    self.current = index - 1;
                    self.go_to_step(index - 1, direction)
                }
                // Boundary reached: stay put, render nothing.
                _ => Ok(()),
            };
        };

        self.current = index;
        self.render_step(index, target, svg)
    }

    /// Advances one step, clamped at the end. Returns whether further
    /// forward movement remains.
    pub fn next(&mut self) -> TourResult<bool> {
        if self.overlay.is_none() || self.config.steps.is_empty() {
            return Ok(false);
        }
        let last = self.config.steps.len() - 1;
        let index = (self.current + 1).min(last);
        self.current = index;
        self.go_to_step(index, SkipDirection::Forward)?;
        Ok(self.current < last)
    }

    /// Retreats one step, clamped at the start. Returns whether further
    /// backward movement remains.
    pub fn prev(&mut self) -> TourResult<bool> {
        if self.overlay.is_none() || self.config.steps.is_empty() {
            return Ok(false);
        }
        let index = self.current.saturating_sub(1);
        self.current = index;
        self.go_to_step(index, SkipDirection::Backward)?;
        Ok(self.current > 0)
    }

    /// Starts timer-driven advancement at the configured interval and kicks
    /// off the progress-cursor fill animation.
    pub fn autoplay(&mut self) {
        let Some(nav) = self.overlay.as_ref().and_then(|o| o.navigator) else {
            return;
        };
        self.playing = true;
        nav.set_playing(&mut self.dom, true);
        nav.animate_progress(&mut self.dom, self.config.autoplay_interval_ms);
        if self.autoplay_timer.is_none() {
            self.autoplay_timer = Some(
                self.scheduler
                    .set_interval(self.config.autoplay_interval_ms),
            );
        }
    }

    pub fn stop_autoplay(&mut self) {
        self.playing = false;
        if let Some(id) = self.autoplay_timer.take() {
            self.scheduler.clear(id);
        }
        if let Some(id) = self.reanimate_timer.take() {
            self.scheduler.clear(id);
        }
        if let Some(nav) = self.overlay.as_ref().and_then(|o| o.navigator) {
            nav.set_playing(&mut self.dom, false);
            nav.reset_progress(&mut self.dom);
        }
    }

    /// Entry point for fired timers. The host calls this with the id a
    /// [`Scheduler`] registration returned.
    pub fn on_timer(&mut self, id: TimerId) -> TourResult<()> {
        if self.phase != Phase::Active {
            return Ok(());
        }
        if Some(id) == self.autoplay_timer {
            return self.autoplay_tick();
        }
        if Some(id) == self.reanimate_timer {
            self.reanimate_timer = None;
            if let Some(nav) = self.overlay.as_ref().and_then(|o| o.navigator) {
                nav.animate_progress(&mut self.dom, self.config.autoplay_interval_ms);
            }
            return Ok(());
        }
        if Some(id) == self.resize_timer {
            self.resize_timer = None;
            return self.regenerate_svg_layer();
        }
        if let Some(pos) = self.notifications.iter().position(|(t, _)| *t == id) {
            let (_, message) = self.notifications.remove(pos);
            self.dom.remove(message);
        }
        Ok(())
    }

    /// Debounced viewport-resize hook; the svg layer is regenerated and the
    /// current step re-rendered once resizing settles.
    pub fn on_resize(&mut self) {
        if self.phase != Phase::Active || self.overlay.is_none() {
            return;
        }
        if let Some(id) = self.resize_timer.take() {
            self.scheduler.clear(id);
        }
        self.resize_timer = Some(self.scheduler.set_timeout(RESIZE_DEBOUNCE_MS));
    }

    /// Begins teardown: the keyboard goes dead immediately, the exit
    /// animation plays, and the overlay is detached when the animation ends
    /// (via [`TourAction::FinalizeTeardown`]).
    #[tracing::instrument(skip(self))]
    pub fn destroy(&mut self) {
        if self.phase != Phase::Active {
            return;
        }
        self.phase = Phase::TearingDown;
        if let Some(id) = self.autoplay_timer.take() {
            self.scheduler.clear(id);
        }
        if let Some(id) = self.reanimate_timer.take() {
            self.scheduler.clear(id);
        }
        let Some(root) = self.overlay.as_ref().map(|o| o.root) else {
            self.finalize_teardown();
            return;
        };
        self.dom.remove_class(root, "fadeIn");
        self.dom.add_class(root, "fadeOut");
        self.dom
            .bind(root, EventKind::AnimationEnd, TourAction::FinalizeTeardown);
    }

    /// Routes an action fired by a DOM binding back into the engine.
    pub fn dispatch(&mut self, action: TourAction) -> TourResult<()> {
        match self.phase {
            Phase::Destroyed => return Ok(()),
            Phase::TearingDown => {
                if action == TourAction::FinalizeTeardown {
                    self.finalize_teardown();
                }
                return Ok(());
            }
            Phase::Active => {}
        }
        match action {
            TourAction::Advance => {
                self.next()?;
            }
            TourAction::Retreat => {
                self.prev()?;
            }
            TourAction::StepNext => {
                self.next()?;
                self.stop_autoplay();
            }
            TourAction::StepBack => {
                self.prev()?;
                self.stop_autoplay();
            }
            TourAction::Play => self.autoplay(),
            TourAction::Stop => self.stop_autoplay(),
            TourAction::Dismiss => self.destroy(),
            TourAction::FinalizeTeardown => {}
        }
        Ok(())
    }

    /// Global key handling while the tour is active. Everything returns
    /// [`KeyResponse::Ignored`] once teardown has begun.
    pub fn handle_key(&mut self, key: Key) -> TourResult<KeyResponse> {
        if self.phase != Phase::Active || self.overlay.is_none() {
            return Ok(KeyResponse::Ignored);
        }
        match key {
            Key::ArrowLeft => {
                self.prev()?;
            }
            Key::ArrowRight => {
                self.next()?;
            }
            Key::Escape => self.destroy(),
            Key::Space => {
                if self.playing {
                    self.stop_autoplay();
                } else {
                    self.autoplay();
                }
            }
        }
        Ok(KeyResponse::Handled)
    }

    fn autoplay_tick(&mut self) -> TourResult<()> {
        if !self.next()? {
            self.stop_autoplay();
        } else {
            // The transition rebuilt the navigator, so the cursor sits at
            // 0%; re-animate it after the reflow gap.
            self.reanimate_timer = Some(self.scheduler.set_timeout(PROGRESS_REANIMATE_DELAY_MS));
        }
        Ok(())
    }

    fn build_svg_layer(&mut self, parent: ElementHandle) -> TourResult<ElementHandle> {
        let bbox = self.dom.bounding_box(self.container);
        let svg = self.dom.create(ElementSpec::TagName("svg"), Some(parent))?;
        self.dom
            .set_attribute(svg, "width", &format!("{}", bbox.width()));
        self.dom
            .set_attribute(svg, "height", &format!("{}", bbox.height()));
        self.dom.bind(svg, EventKind::Click, TourAction::Advance);
        Ok(svg)
    }

    fn regenerate_svg_layer(&mut self) -> TourResult<()> {
        let Some((root, old_svg)) = self.overlay.as_ref().map(|o| (o.root, o.svg)) else {
            return Ok(());
        };
        if let Some(o) = self.overlay.as_mut() {
            // The mask lives inside the svg layer and goes with it.
            o.mask = None;
        }
        self.dom.remove(old_svg);
        let svg = self.build_svg_layer(root)?;
        if let Some(o) = self.overlay.as_mut() {
            o.svg = svg;
        }
        self.go_to_step(self.current, SkipDirection::Forward)
    }

    fn render_step(
        &mut self,
        index: usize,
        target: ElementHandle,
        svg: ElementHandle,
    ) -> TourResult<()> {
        self.dom.scroll_into_view(target);

        let scroll = self.dom.scroll_offset();
        let viewport_target = self.dom.bounding_box(target);
        let doc_target = viewport_target + scroll;
        // The svg layer is sized to the container, so the container box is
        // the overlay rect the mask must cover.
        let doc_overlay = self.dom.bounding_box(self.container) + scroll;
        let radius = resolve_border_radius(&self.dom, target);

        self.rebuild_balloon(index, doc_target, viewport_target)?;
        self.rebuild_mask(svg, doc_overlay, doc_target, radius)?;

        if let Some(nav) = self.overlay.as_ref().and_then(|o| o.navigator) {
            nav.set_counter(&mut self.dom, index + 1);
        }
        Ok(())
    }

    fn rebuild_balloon(
        &mut self,
        index: usize,
        doc_target: Rect,
        viewport_target: Rect,
    ) -> TourResult<()> {
        let Some(root) = self.overlay.as_ref().map(|o| o.root) else {
            return Ok(());
        };
        if let Some(old) = self.overlay.as_mut().and_then(|o| o.balloon.take()) {
            // The navigator is part of the balloon subtree.
            self.dom.remove(old.root);
        }
        if let Some(o) = self.overlay.as_mut() {
            o.navigator = None;
        }

        let viewport = self.dom.viewport_size();
        let mobile = balloon::is_mobile(viewport);
        let step = &self.config.steps[index];
        let position = balloon::resolve_position(step, viewport_target, viewport);

        let balloon = Balloon::create(
            &mut self.dom,
            root,
            self.config.steps[index].caption.resolve(&self.lang),
            self.config.font_family(),
            position,
            mobile,
        )?;
        let navigator = Navigator::create(
            &mut self.dom,
            balloon.navigator_slot,
            self.config.steps.len(),
            self.playing,
        )?;

        // Measure only after insertion so the box is accurate.
        let measured = self.dom.bounding_box(balloon.root).size();
        let origin = balloon::balloon_origin(position, doc_target, measured);
        balloon.place(&mut self.dom, origin);

        if let Some(o) = self.overlay.as_mut() {
            o.balloon = Some(balloon);
            o.navigator = Some(navigator);
        }
        Ok(())
    }

    fn rebuild_mask(
        &mut self,
        svg: ElementHandle,
        doc_overlay: Rect,
        doc_target: Rect,
        radius: crate::radius::CornerRadius,
    ) -> TourResult<()> {
        if let Some(old) = self.overlay.as_mut().and_then(|o| o.mask.take()) {
            self.dom.remove(old);
        }
        let d = mask_path(doc_overlay, doc_target, radius);
        let mask = self.dom.create(ElementSpec::TagName("path"), Some(svg))?;
        self.dom.set_attribute(mask, "d", &d);
        self.dom.set_attribute(mask, "fill", &self.config.mask_color);
        if let Some(o) = self.overlay.as_mut() {
            o.mask = Some(mask);
        }
        Ok(())
    }

    fn notify_unavailable(
        &mut self,
        index: usize,
        center: ElementHandle,
    ) -> TourResult<()> {
        let text = match &self.config.steps[index].unavailable_message {
            Some(message) => message.resolve(&self.lang).to_string(),
            None => format!("Step N. {} non visualizzabile", index + 1),
        };
        let message = self.dom.create(ElementSpec::TagName("div"), Some(center))?;
        self.dom.add_class(message, "notificationMessage");
        self.dom.set_text(message, &text);
        let expiry = self.scheduler.set_timeout(NOTIFICATION_TTL_MS);
        self.notifications.push((expiry, message));
        Ok(())
    }

    fn finalize_teardown(&mut self) {
        for id in [
            self.autoplay_timer.take(),
            self.reanimate_timer.take(),
            self.resize_timer.take(),
        ]
        .into_iter()
        .flatten()
        {
            self.scheduler.clear(id);
        }
        for (id, _) in self.notifications.drain(..) {
            self.scheduler.clear(id);
        }
        if let Some(overlay) = self.overlay.take() {
            self.dom.remove(overlay.root);
        }
        self.phase = Phase::Destroyed;
        tracing::debug!("tour overlay detached");
    }
}
