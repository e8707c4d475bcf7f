#![allow(dead_code)]

use std::collections::{BTreeMap, HashMap};

use boxtour::{
    ComputedStyle, DomBackend, ElementHandle, ElementSpec, EventKind, Scheduler, TimerId,
    TourAction, TourResult,
};
use kurbo::{Rect, Size, Vec2};

/// Routes engine logs to the test harness when a test runs with
/// `--nocapture`. Safe to call from every test; only the first call wins.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

/// In-memory element for [`MockDom`].
#[derive(Clone, Debug)]
pub struct Node {
    pub tag: String,
    pub parent: Option<ElementHandle>,
    pub children: Vec<ElementHandle>,
    pub classes: Vec<String>,
    pub attrs: BTreeMap<String, String>,
    pub styles: BTreeMap<String, String>,
    pub text: String,
    pub bbox: Rect,
    pub style: ComputedStyle,
}

impl Node {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            parent: None,
            children: Vec::new(),
            classes: Vec::new(),
            attrs: BTreeMap::new(),
            styles: BTreeMap::new(),
            text: String::new(),
            bbox: Rect::ZERO,
            style: ComputedStyle::default(),
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}

/// Tree-shaped DOM double that records every mutation the engine performs.
pub struct MockDom {
    next_id: u64,
    pub nodes: HashMap<ElementHandle, Node>,
    pub selectors: HashMap<String, ElementHandle>,
    pub bindings: Vec<(ElementHandle, EventKind, TourAction)>,
    pub events: Vec<(ElementHandle, String, bool)>,
    pub style_writes: Vec<(ElementHandle, String, String)>,
    /// Chronological (prop, value) writes on progress-bar cursors.
    pub cursor_writes: Vec<(String, String)>,
    pub scrolled_into_view: Vec<ElementHandle>,
    pub scroll: Vec2,
    pub viewport: Size,
}

impl MockDom {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            nodes: HashMap::new(),
            selectors: HashMap::new(),
            bindings: Vec::new(),
            events: Vec::new(),
            style_writes: Vec::new(),
            cursor_writes: Vec::new(),
            scrolled_into_view: Vec::new(),
            scroll: Vec2::ZERO,
            viewport: Size::new(1280.0, 800.0),
        }
    }

    fn mint(&mut self, tag: &str) -> ElementHandle {
        let el = ElementHandle(self.next_id);
        self.next_id += 1;
        self.nodes.insert(el, Node::new(tag));
        el
    }

    /// A detached element, e.g. the tour container.
    pub fn add_element(&mut self, tag: &str, bbox: Rect) -> ElementHandle {
        let el = self.mint(tag);
        self.node_mut(el).bbox = bbox;
        el
    }

    /// A page element resolvable through `selector`.
    pub fn page_element(&mut self, selector: &str, bbox: Rect) -> ElementHandle {
        let el = self.add_element("div", bbox);
        self.selectors.insert(selector.to_string(), el);
        el
    }

    pub fn node(&self, el: ElementHandle) -> &Node {
        self.nodes.get(&el).expect("node exists")
    }

    pub fn node_mut(&mut self, el: ElementHandle) -> &mut Node {
        self.nodes.get_mut(&el).expect("node exists")
    }

    pub fn hide(&mut self, el: ElementHandle) {
        self.node_mut(el).style.display = "none".to_string();
    }

    pub fn show(&mut self, el: ElementHandle) {
        self.node_mut(el).style.display = "block".to_string();
    }

    pub fn contains(&self, el: ElementHandle) -> bool {
        self.nodes.contains_key(&el)
    }

    pub fn count_class(&self, class: &str) -> usize {
        self.nodes.values().filter(|n| n.has_class(class)).count()
    }

    pub fn find_class(&self, class: &str) -> Vec<ElementHandle> {
        let mut found: Vec<ElementHandle> = self
            .nodes
            .iter()
            .filter(|(_, n)| n.has_class(class))
            .map(|(el, _)| *el)
            .collect();
        found.sort_by_key(|el| el.0);
        found
    }

    pub fn count_tag(&self, tag: &str) -> usize {
        self.nodes.values().filter(|n| n.tag == tag).count()
    }

    pub fn attr(&self, el: ElementHandle, name: &str) -> Option<&str> {
        self.nodes.get(&el)?.attrs.get(name).map(String::as_str)
    }

    fn remove_subtree(&mut self, el: ElementHandle) {
        if let Some(node) = self.nodes.remove(&el) {
            for child in node.children {
                self.remove_subtree(child);
            }
        }
    }
}

impl DomBackend for MockDom {
    fn create(
        &mut self,
        spec: ElementSpec<'_>,
        parent: Option<ElementHandle>,
    ) -> TourResult<ElementHandle> {
        let el = match spec {
            ElementSpec::TagName(tag) => self.mint(tag),
            ElementSpec::Markup(_) => self.mint("markup"),
            ElementSpec::Existing(existing) => existing,
        };
        if let Some(parent) = parent {
            self.node_mut(el).parent = Some(parent);
            self.node_mut(parent).children.push(el);
        }
        Ok(el)
    }

    fn query_selector(&self, _scope: ElementHandle, selector: &str) -> Option<ElementHandle> {
        self.selectors
            .get(selector)
            .copied()
            .filter(|el| self.nodes.contains_key(el))
    }

    fn parent(&self, el: ElementHandle) -> Option<ElementHandle> {
        self.nodes.get(&el)?.parent
    }

    fn remove(&mut self, el: ElementHandle) {
        if let Some(parent) = self.nodes.get(&el).and_then(|n| n.parent) {
            if let Some(parent_node) = self.nodes.get_mut(&parent) {
                parent_node.children.retain(|c| *c != el);
            }
        }
        self.remove_subtree(el);
    }

    fn set_attribute(&mut self, el: ElementHandle, name: &str, value: &str) {
        self.node_mut(el)
            .attrs
            .insert(name.to_string(), value.to_string());
    }

    fn add_class(&mut self, el: ElementHandle, class: &str) {
        let node = self.node_mut(el);
        if !node.has_class(class) {
            node.classes.push(class.to_string());
        }
    }

    fn remove_class(&mut self, el: ElementHandle, class: &str) {
        self.node_mut(el).classes.retain(|c| c != class);
    }

    fn set_style(&mut self, el: ElementHandle, prop: &str, value: &str) {
        if self.node(el).has_class("progressBarCursor") {
            self.cursor_writes
                .push((prop.to_string(), value.to_string()));
        }
        self.node_mut(el)
            .styles
            .insert(prop.to_string(), value.to_string());
        self.style_writes
            .push((el, prop.to_string(), value.to_string()));
    }

    fn set_text(&mut self, el: ElementHandle, text: &str) {
        self.node_mut(el).text = text.to_string();
    }

    fn bounding_box(&self, el: ElementHandle) -> Rect {
        self.nodes.get(&el).map(|n| n.bbox).unwrap_or(Rect::ZERO)
    }

    fn offset_size(&self, el: ElementHandle) -> Size {
        self.bounding_box(el).size()
    }

    fn computed_style(&self, el: ElementHandle) -> ComputedStyle {
        self.nodes
            .get(&el)
            .map(|n| n.style.clone())
            .unwrap_or_default()
    }

    fn scroll_offset(&self) -> Vec2 {
        self.scroll
    }

    fn viewport_size(&self) -> Size {
        self.viewport
    }

    fn scroll_into_view(&mut self, el: ElementHandle) {
        self.scrolled_into_view.push(el);
    }

    fn bind(&mut self, el: ElementHandle, event: EventKind, action: TourAction) {
        self.bindings.push((el, event, action));
    }

    fn dispatch_event(&mut self, el: ElementHandle, name: &str, bubbles: bool) {
        self.events.push((el, name.to_string(), bubbles));
    }
}

/// Scheduler double: registrations are recorded, never fired on their own.
/// Tests deliver ticks by calling `Tour::on_timer` with a recorded id.
pub struct MockScheduler {
    next: u64,
    pub timeouts: Vec<(TimerId, u64)>,
    pub intervals: Vec<(TimerId, u64)>,
    pub cleared: Vec<TimerId>,
}

impl MockScheduler {
    pub fn new() -> Self {
        Self {
            next: 0,
            timeouts: Vec::new(),
            intervals: Vec::new(),
            cleared: Vec::new(),
        }
    }

    pub fn active_interval(&self) -> Option<TimerId> {
        self.intervals.last().map(|(id, _)| *id)
    }

    pub fn timeout_with_delay(&self, delay_ms: u64) -> Option<TimerId> {
        self.timeouts
            .iter()
            .rev()
            .find(|(_, d)| *d == delay_ms)
            .map(|(id, _)| *id)
    }

    pub fn is_active(&self, id: TimerId) -> bool {
        self.timeouts.iter().any(|(t, _)| *t == id)
            || self.intervals.iter().any(|(t, _)| *t == id)
    }
}

impl Scheduler for MockScheduler {
    fn set_timeout(&mut self, delay_ms: u64) -> TimerId {
        let id = TimerId(self.next);
        self.next += 1;
        self.timeouts.push((id, delay_ms));
        id
    }

    fn set_interval(&mut self, period_ms: u64) -> TimerId {
        let id = TimerId(self.next);
        self.next += 1;
        self.intervals.push((id, period_ms));
        id
    }

    fn clear(&mut self, id: TimerId) {
        self.timeouts.retain(|(t, _)| *t != id);
        self.intervals.retain(|(t, _)| *t != id);
        self.cleared.push(id);
    }
}
