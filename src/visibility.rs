use crate::dom::{DomBackend, ElementHandle};

/// Whether the element could be rendered at all: the element exists and no
/// node in its ancestor chain is hidden via `display: none`,
/// `visibility: hidden`, or a computed opacity of exactly zero.
///
/// Read-only style walk; it does not consider clipping or off-screen
/// placement, hence "potentially".
pub fn is_potentially_visible<D: DomBackend + ?Sized>(
    dom: &D,
    element: Option<ElementHandle>,
) -> bool {
    let Some(el) = element else {
        return false;
    };

    let mut node = Some(el);
    while let Some(current) = node {
        let style = dom.computed_style(current);
        if style.display == "none" || style.visibility == "hidden" || style.opacity == 0.0 {
            return false;
        }
        node = dom.parent(current);
    }
    true
}
