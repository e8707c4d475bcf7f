use kurbo::{Point, Rect, Size};

use crate::{
    config::{CalloutPosition, MobilePosition, Step},
    dom::{DomBackend, ElementHandle, ElementSpec},
    error::TourResult,
};

/// Viewports at or below this width use the mobile top/bottom layout.
pub const MOBILE_BREAKPOINT_PX: f64 = 768.0;

/// Clearance between the target box and the balloon. The far gap applies on
/// the sides where the balloon's own extent is subtracted first.
const GAP_NEAR: f64 = 16.0;
const GAP_FAR: f64 = 32.0;

/// Top-left corner for a balloon of measured size `balloon` attached to
/// `target` (both in the same coordinate space).
pub fn balloon_origin(position: CalloutPosition, target: Rect, balloon: Size) -> Point {
    match position {
        CalloutPosition::Left => Point::new(target.x0 - balloon.width - GAP_FAR, target.y0),
        CalloutPosition::Right => Point::new(target.x1 + GAP_NEAR, target.y0),
        CalloutPosition::Top => Point::new(target.x0, target.y0 - balloon.height - GAP_FAR),
        CalloutPosition::Bottom => Point::new(target.x0, target.y1 + GAP_NEAR),
    }
}

pub fn is_mobile(viewport: Size) -> bool {
    viewport.width <= MOBILE_BREAKPOINT_PX
}

/// Effective callout position for a step. Desktop uses the configured
/// position as-is. Mobile uses the per-step override when present, otherwise
/// a target in the lower half of the viewport gets the balloon on top and
/// vice versa. `target_viewport_box` is viewport-relative (scroll excluded).
pub fn resolve_position(step: &Step, target_viewport_box: Rect, viewport: Size) -> CalloutPosition {
    if !is_mobile(viewport) {
        return step.callout_position;
    }
    match step.callout_position_mobile {
        Some(MobilePosition::Top) => CalloutPosition::Top,
        Some(MobilePosition::Bottom) => CalloutPosition::Bottom,
        None => {
            if in_lower_half(target_viewport_box, viewport.height) {
                CalloutPosition::Top
            } else {
                CalloutPosition::Bottom
            }
        }
    }
}

fn in_lower_half(viewport_box: Rect, viewport_height: f64) -> bool {
    viewport_box.y0 >= viewport_height / 2.0
}

/// The caption box. Created and inserted first so its bounding box can be
/// measured, then placed with inline `top`/`left` styles.
#[derive(Clone, Copy, Debug)]
pub struct Balloon {
    pub root: ElementHandle,
    pub navigator_slot: ElementHandle,
}

impl Balloon {
    pub fn create<D: DomBackend>(
        dom: &mut D,
        parent: ElementHandle,
        caption: &str,
        font_family: &str,
        position: CalloutPosition,
        mobile: bool,
    ) -> TourResult<Self> {
        let root = dom.create(ElementSpec::TagName("div"), Some(parent))?;
        dom.add_class(root, "balloon");
        dom.add_class(root, position.as_str());
        dom.add_class(root, if mobile { "mobile" } else { "desktop" });

        let text = dom.create(ElementSpec::TagName("div"), Some(root))?;
        dom.set_style(text, "font-family", font_family);
        dom.set_text(text, caption);

        let navigator_slot = dom.create(ElementSpec::TagName("div"), Some(root))?;
        dom.add_class(navigator_slot, "navigatorContainer");

        Ok(Self {
            root,
            navigator_slot,
        })
    }

    pub fn place<D: DomBackend>(&self, dom: &mut D, origin: Point) {
        dom.set_style(self.root, "top", &format!("{}px", origin.y));
        dom.set_style(self.root, "left", &format!("{}px", origin.x));
    }
}
