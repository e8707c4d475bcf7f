mod support;

use boxtour::{DomBackend, ElementHandle, ElementSpec, is_potentially_visible};
use kurbo::Rect;
use support::MockDom;

fn chain() -> (MockDom, ElementHandle, ElementHandle, ElementHandle) {
    let mut dom = MockDom::new();
    let grandparent = dom.add_element("div", Rect::new(0.0, 0.0, 800.0, 600.0));
    let parent = dom
        .create(ElementSpec::TagName("div"), Some(grandparent))
        .unwrap();
    let child = dom
        .create(ElementSpec::TagName("div"), Some(parent))
        .unwrap();
    (dom, grandparent, parent, child)
}

#[test]
fn missing_element_is_not_viewable() {
    let (dom, _, _, _) = chain();
    assert!(!is_potentially_visible(&dom, None));
}

#[test]
fn unobstructed_chain_is_viewable() {
    let (dom, _, _, child) = chain();
    assert!(is_potentially_visible(&dom, Some(child)));
}

#[test]
fn display_none_on_ancestor_hides_descendants() {
    let (mut dom, _, parent, child) = chain();
    dom.hide(parent);
    assert!(!is_potentially_visible(&dom, Some(child)));
    assert!(!is_potentially_visible(&dom, Some(parent)));

    dom.show(parent);
    assert!(is_potentially_visible(&dom, Some(child)));
}

#[test]
fn visibility_hidden_counts_as_not_viewable() {
    let (mut dom, _, _, child) = chain();
    dom.node_mut(child).style.visibility = "hidden".to_string();
    assert!(!is_potentially_visible(&dom, Some(child)));
}

#[test]
fn zero_opacity_ancestor_hides_descendants() {
    let (mut dom, grandparent, _, child) = chain();
    dom.node_mut(grandparent).style.opacity = 0.0;
    assert!(!is_potentially_visible(&dom, Some(child)));
}

#[test]
fn faint_but_nonzero_opacity_is_still_viewable() {
    let (mut dom, _, parent, child) = chain();
    dom.node_mut(parent).style.opacity = 0.01;
    assert!(is_potentially_visible(&dom, Some(child)));
}
