use crate::{
    dom::{DomBackend, ElementHandle, ElementSpec, EventKind, TourAction},
    error::TourResult,
};

/// Transport controls and the per-step progress indicator. Rebuilt on every
/// step transition; handles are only valid until the next rebuild.
#[derive(Clone, Copy, Debug)]
pub struct Navigator {
    root: ElementHandle,
    play: ElementHandle,
    stop: ElementHandle,
    counter_label: ElementHandle,
    progress_cursor: ElementHandle,
}

impl Navigator {
    /// Builds the control cluster inside `parent`: play/stop (one hidden
    /// according to `playing`), back/next, the `current / total` counter, and
    /// the progress track with its cursor. The current-step label starts
    /// empty; the sequencer fills it via [`Navigator::set_counter`].
    pub fn create<D: DomBackend>(
        dom: &mut D,
        parent: ElementHandle,
        total: usize,
        playing: bool,
    ) -> TourResult<Self> {
        let root = dom.create(ElementSpec::TagName("div"), Some(parent))?;
        dom.add_class(root, "tutorialPlayer");

        let buttons = dom.create(ElementSpec::TagName("div"), Some(root))?;
        dom.add_class(buttons, "playerButtons");

        let play = button(dom, buttons, "autoPlay", TourAction::Play)?;
        let stop = button(dom, buttons, "stopAutoplay", TourAction::Stop)?;
        if playing {
            dom.add_class(play, "d-none");
        } else {
            dom.add_class(stop, "d-none");
        }

        button(dom, buttons, "stepBack", TourAction::StepBack)?;
        button(dom, buttons, "stepNext", TourAction::StepNext)?;

        let counter = dom.create(ElementSpec::TagName("div"), Some(buttons))?;
        dom.add_class(counter, "counterContainer");
        let counter_label = dom.create(ElementSpec::TagName("span"), Some(counter))?;
        let total_label = dom.create(ElementSpec::TagName("span"), Some(counter))?;
        dom.set_text(total_label, &format!(" / {total}"));

        let track = dom.create(ElementSpec::TagName("div"), Some(root))?;
        dom.add_class(track, "progressBar");
        let progress_cursor = dom.create(ElementSpec::TagName("div"), Some(track))?;
        dom.add_class(progress_cursor, "progressBarCursor");

        Ok(Self {
            root,
            play,
            stop,
            counter_label,
            progress_cursor,
        })
    }

    pub fn root(&self) -> ElementHandle {
        self.root
    }

    pub fn set_counter<D: DomBackend>(&self, dom: &mut D, display_number: usize) {
        dom.set_text(self.counter_label, &display_number.to_string());
    }

    pub fn set_playing<D: DomBackend>(&self, dom: &mut D, playing: bool) {
        if playing {
            dom.add_class(self.play, "d-none");
            dom.remove_class(self.stop, "d-none");
        } else {
            dom.remove_class(self.play, "d-none");
            dom.add_class(self.stop, "d-none");
        }
    }

    /// Starts the cursor fill animation: 0% to 100% over `interval_ms`.
    pub fn animate_progress<D: DomBackend>(&self, dom: &mut D, interval_ms: u64) {
        dom.set_style(
            self.progress_cursor,
            "transition",
            &format!("width {interval_ms}ms linear"),
        );
        dom.set_style(self.progress_cursor, "width", "100%");
    }

    /// Snaps the cursor back to empty with no transition.
    pub fn reset_progress<D: DomBackend>(&self, dom: &mut D) {
        dom.set_style(self.progress_cursor, "transition", "none");
        dom.set_style(self.progress_cursor, "width", "0%");
    }
}

fn button<D: DomBackend>(
    dom: &mut D,
    parent: ElementHandle,
    class: &str,
    action: TourAction,
) -> TourResult<ElementHandle> {
    let el = dom.create(ElementSpec::TagName("i"), Some(parent))?;
    dom.add_class(el, "element");
    dom.add_class(el, "button");
    dom.add_class(el, class);
    dom.bind(el, EventKind::Click, action);
    Ok(el)
}
