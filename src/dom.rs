use kurbo::{Rect, Size, Vec2};

use crate::error::TourResult;

/// Opaque id for an element owned by the host's DOM backend.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct ElementHandle(pub u64);

/// What to construct an element from.
///
/// The variant is explicit so backends never have to sniff whether a string
/// is a tag name or a markup fragment.
#[derive(Clone, Debug)]
pub enum ElementSpec<'a> {
    /// A bare tag name such as `"div"`, `"svg"` or `"path"`. The backend is
    /// responsible for choosing the right namespace for SVG tags.
    TagName(&'a str),
    /// A markup fragment; the backend materializes its first element.
    Markup(&'a str),
    /// An element that already exists; creation re-parents it.
    Existing(ElementHandle),
}

/// The computed-style slice the engine reads. Values follow the CSS computed
/// representation: keywords as strings, opacity as a number, border-radius as
/// the raw computed value (unit included).
#[derive(Clone, Debug)]
pub struct ComputedStyle {
    pub display: String,
    pub visibility: String,
    pub opacity: f64,
    pub border_radius: String,
    pub font_size_px: f64,
}

impl Default for ComputedStyle {
    fn default() -> Self {
        Self {
            display: "block".to_string(),
            visibility: "visible".to_string(),
            opacity: 1.0,
            border_radius: "0px".to_string(),
            font_size_px: 16.0,
        }
    }
}

/// Element-scoped events the engine binds to.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum EventKind {
    Click,
    AnimationEnd,
}

/// Commands the engine understands. [`DomBackend::bind`] maps an element
/// event to one of these; when the event fires, the host feeds the action
/// back through [`Tour::dispatch`].
///
/// [`Tour::dispatch`]: crate::sequencer::Tour::dispatch
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TourAction {
    /// Go to the next step without touching autoplay (mask click, ArrowRight).
    Advance,
    /// Go to the previous step without touching autoplay (ArrowLeft).
    Retreat,
    /// Manual "next" transport button: advance, then stop autoplay.
    StepNext,
    /// Manual "back" transport button: retreat, then stop autoplay.
    StepBack,
    /// Start autoplay.
    Play,
    /// Stop autoplay.
    Stop,
    /// Begin teardown (close button, Escape).
    Dismiss,
    /// Exit animation finished; detach the overlay.
    FinalizeTeardown,
}

/// The DOM collaborator the host provides.
///
/// The engine builds, mutates and measures elements exclusively through this
/// trait; it never assumes a real browser. Geometry is in CSS pixels:
/// `bounding_box` is viewport-relative (scroll excluded), `scroll_offset` is
/// the current document scroll.
pub trait DomBackend {
    fn create(
        &mut self,
        spec: ElementSpec<'_>,
        parent: Option<ElementHandle>,
    ) -> TourResult<ElementHandle>;

    /// Resolves a CSS selector inside `scope`, expecting at most one match.
    fn query_selector(&self, scope: ElementHandle, selector: &str) -> Option<ElementHandle>;

    fn parent(&self, el: ElementHandle) -> Option<ElementHandle>;

    /// Detaches the element and its subtree and fires its destroy event.
    fn remove(&mut self, el: ElementHandle);

    fn set_attribute(&mut self, el: ElementHandle, name: &str, value: &str);

    fn add_class(&mut self, el: ElementHandle, class: &str);

    fn remove_class(&mut self, el: ElementHandle, class: &str);

    fn set_style(&mut self, el: ElementHandle, prop: &str, value: &str);

    fn set_text(&mut self, el: ElementHandle, text: &str);

    fn bounding_box(&self, el: ElementHandle) -> Rect;

    /// Layout size used for percentage border-radius resolution.
    fn offset_size(&self, el: ElementHandle) -> Size;

    fn computed_style(&self, el: ElementHandle) -> ComputedStyle;

    fn root_font_size_px(&self) -> f64 {
        16.0
    }

    fn scroll_offset(&self) -> Vec2;

    fn viewport_size(&self) -> Size;

    fn scroll_into_view(&mut self, el: ElementHandle);

    /// Maps an element event to an engine action. The host delivers the
    /// action via `Tour::dispatch` when the event fires. Bindings die with
    /// the element.
    fn bind(&mut self, el: ElementHandle, event: EventKind, action: TourAction);

    /// Dispatches a named custom event on the element, optionally bubbling
    /// to ancestors.
    fn dispatch_event(&mut self, el: ElementHandle, name: &str, bubbles: bool);
}
