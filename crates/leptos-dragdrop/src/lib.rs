//! Leptos DragDrop Utilities
//!
//! Simple drag-and-drop for Leptos using mouse events.
//! Uses movement threshold to distinguish click from drag, and resolves the
//! drop target with the collision strategies in [`collision`].
//!
//! Markup contract:
//! - draggable elements carry `data-drag-id="<id>"`
//! - drop zones carry `data-drop-kind="container|item"` and `data-drop-id="<id>"`

pub mod collision;

use leptos::prelude::*;
use wasm_bindgen::JsCast;

pub use collision::{Collision, Droppable, Point, Rect, Resolution, Strategy};

pub const DRAG_ID_ATTR: &str = "data-drag-id";
pub const DROP_KIND_ATTR: &str = "data-drop-kind";
pub const DROP_ID_ATTR: &str = "data-drop-id";

/// Drop target types
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DropTarget {
    /// Drop on a container's free area (append)
    Container(u32),
    /// Drop on/near another draggable item
    Item(u32),
}

impl DropTarget {
    /// Value of `data-drop-kind` for this target
    pub fn kind(&self) -> &'static str {
        match self {
            DropTarget::Container(_) => "container",
            DropTarget::Item(_) => "item",
        }
    }

    pub fn id(&self) -> u32 {
        match self {
            DropTarget::Container(id) | DropTarget::Item(id) => *id,
        }
    }

    /// Parse the `data-drop-kind` / `data-drop-id` attribute pair
    pub fn parse(kind: &str, id: &str) -> Option<Self> {
        let id = id.trim().parse::<u32>().ok()?;
        match kind {
            "container" => Some(DropTarget::Container(id)),
            "item" => Some(DropTarget::Item(id)),
            _ => None,
        }
    }
}

/// Resolved drop: the target plus the pointer's signed vertical offset from
/// the target's midpoint (positive = below)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DropHit {
    pub target: DropTarget,
    pub offset_y: f64,
}

impl DropHit {
    pub fn from_collision(collision: &Collision<DropTarget>, pointer: Point) -> Self {
        Self {
            target: collision.key,
            offset_y: pointer.y - collision.rect.center().y,
        }
    }
}

/// DnD state signals
#[derive(Clone, Copy)]
pub struct DndSignals {
    pub dragging_id_read: ReadSignal<Option<u32>>,
    pub dragging_id_write: WriteSignal<Option<u32>>,
    pub drop_target_read: ReadSignal<Option<DropTarget>>,
    pub drop_target_write: WriteSignal<Option<DropTarget>>,
    pub drag_just_ended_read: ReadSignal<bool>,
    pub drag_just_ended_write: WriteSignal<bool>,
    /// Pending item id (mousedown but not yet dragging)
    pub pending_id_read: ReadSignal<Option<u32>>,
    pub pending_id_write: WriteSignal<Option<u32>>,
    /// Start position for movement detection
    pub start_x_read: ReadSignal<i32>,
    pub start_x_write: WriteSignal<i32>,
    pub start_y_read: ReadSignal<i32>,
    pub start_y_write: WriteSignal<i32>,
}

/// Movement threshold in pixels to start dragging
pub const DRAG_THRESHOLD_PX: i32 = 5;

pub fn create_dnd_signals() -> DndSignals {
    let (dragging_id_read, dragging_id_write) = signal(None::<u32>);
    let (drop_target_read, drop_target_write) = signal(None::<DropTarget>);
    let (drag_just_ended_read, drag_just_ended_write) = signal(false);
    let (pending_id_read, pending_id_write) = signal(None::<u32>);
    let (start_x_read, start_x_write) = signal(0i32);
    let (start_y_read, start_y_write) = signal(0i32);
    DndSignals {
        dragging_id_read,
        dragging_id_write,
        drop_target_read,
        drop_target_write,
        drag_just_ended_read,
        drag_just_ended_write,
        pending_id_read,
        pending_id_write,
        start_x_read,
        start_x_write,
        start_y_read,
        start_y_write,
    }
}

/// True once the pointer has left the click tolerance box
pub fn exceeds_threshold(start: (i32, i32), current: (i32, i32)) -> bool {
    (current.0 - start.0).abs() > DRAG_THRESHOLD_PX || (current.1 - start.1).abs() > DRAG_THRESHOLD_PX
}

/// End drag operation
pub fn end_drag(dnd: &DndSignals) {
    dnd.dragging_id_write.set(None);
    dnd.drop_target_write.set(None);
    dnd.pending_id_write.set(None);
    dnd.drag_just_ended_write.set(true);

    if let Some(win) = web_sys::window() {
        let clear = dnd.drag_just_ended_write;
        let cb = wasm_bindgen::closure::Closure::<dyn FnMut()>::new(move || {
            clear.set(false);
        });
        let _ = win.set_timeout_with_callback_and_timeout_and_arguments_0(cb.as_ref().unchecked_ref(), 100);
        cb.forget();
    }
}

/// Create mousedown handler for draggable items
/// Records pending drag with start position
pub fn make_on_mousedown(dnd: DndSignals, item_id: u32) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |ev: web_sys::MouseEvent| {
        if ev.button() == 0 {
            // Ignore if target is a form control
            if let Some(target) = ev.target() {
                if target.dyn_ref::<web_sys::HtmlInputElement>().is_some() { return; }
                if target.dyn_ref::<web_sys::HtmlButtonElement>().is_some() { return; }
                if target.dyn_ref::<web_sys::HtmlSelectElement>().is_some() { return; }
            }
            dnd.pending_id_write.set(Some(item_id));
            dnd.start_x_write.set(ev.client_x());
            dnd.start_y_write.set(ev.client_y());
        }
    }
}

fn element_rect(el: &web_sys::Element) -> Rect {
    let r = el.get_bounding_client_rect();
    Rect::new(r.left(), r.top(), r.width(), r.height())
}

/// Read every `data-drop-kind` element in the document, skipping the
/// dragged item itself
fn collect_droppables(doc: &web_sys::Document, dragging: u32) -> Vec<Droppable<DropTarget>> {
    let Ok(nodes) = doc.query_selector_all(&format!("[{}]", DROP_KIND_ATTR)) else {
        return Vec::new();
    };
    let mut out = Vec::with_capacity(nodes.length() as usize);
    for i in 0..nodes.length() {
        let Some(el) = nodes.item(i).and_then(|n| n.dyn_into::<web_sys::Element>().ok()) else {
            continue;
        };
        let (Some(kind), Some(id)) = (el.get_attribute(DROP_KIND_ATTR), el.get_attribute(DROP_ID_ATTR)) else {
            continue;
        };
        match DropTarget::parse(&kind, &id) {
            Some(DropTarget::Item(item)) if item == dragging => {}
            Some(key) => out.push(Droppable { key, rect: element_rect(&el) }),
            None => {}
        }
    }
    out
}

/// Dragged element's rectangle, moved along with the pointer
fn active_rect(doc: &web_sys::Document, dnd: &DndSignals, dragging: u32, pointer: Point) -> Option<Rect> {
    let el = doc
        .query_selector(&format!("[{}=\"{}\"]", DRAG_ID_ATTR, dragging))
        .ok()
        .flatten()?;
    let dx = pointer.x - f64::from(dnd.start_x_read.get_untracked());
    let dy = pointer.y - f64::from(dnd.start_y_read.get_untracked());
    Some(element_rect(&el).translate(dx, dy))
}

/// Resolve the drop under the pointer for the item being dragged
pub fn resolve_hit(dnd: &DndSignals, dragging: u32, pointer: Point) -> Option<DropHit> {
    let doc = web_sys::window()?.document()?;
    let droppables = collect_droppables(&doc, dragging);
    let active = active_rect(&doc, dnd, dragging, pointer);
    let best = collision::resolve(pointer, active, &droppables)?.best()?;
    Some(DropHit::from_collision(&best, pointer))
}

fn pointer_of(ev: &web_sys::MouseEvent) -> Point {
    Point::new(f64::from(ev.client_x()), f64::from(ev.client_y()))
}

/// Create mousemove handler for document - starts drag if moved enough and
/// keeps the highlighted drop target current
pub fn bind_global_mousemove(dnd: DndSignals) {
    use wasm_bindgen::closure::Closure;

    let on_mousemove = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |ev: web_sys::MouseEvent| {
        let pending = dnd.pending_id_read.get_untracked();
        let dragging = dnd.dragging_id_read.get_untracked();

        if pending.is_some() && dragging.is_none() {
            let start = (dnd.start_x_read.get_untracked(), dnd.start_y_read.get_untracked());
            if exceeds_threshold(start, (ev.client_x(), ev.client_y())) {
                dnd.dragging_id_write.set(pending);
            }
        }

        if let Some(dragged) = dnd.dragging_id_read.get_untracked() {
            let hit = resolve_hit(&dnd, dragged, pointer_of(&ev)).map(|h| h.target);
            if dnd.drop_target_read.get_untracked() != hit {
                dnd.drop_target_write.set(hit);
            }
        }
    });

    if let Some(win) = web_sys::window() {
        if let Some(doc) = win.document() {
            let _ = doc.add_event_listener_with_callback("mousemove", on_mousemove.as_ref().unchecked_ref());
        }
    }
    on_mousemove.forget();
}

/// Bind global mouseup handler for drop detection
pub fn bind_global_mouseup<F>(dnd: DndSignals, on_drop: F)
where
    F: Fn(u32, DropHit) + Clone + 'static,
{
    use wasm_bindgen::closure::Closure;

    let on_mouseup = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |ev: web_sys::MouseEvent| {
        let dragging_id = dnd.dragging_id_read.get_untracked();
        let hit = dragging_id.and_then(|id| resolve_hit(&dnd, id, pointer_of(&ev)));

        dnd.pending_id_write.set(None);
        end_drag(&dnd);

        // Plain clicks fall through to the element's click handler
        if let (Some(dragged), Some(hit)) = (dragging_id, hit) {
            on_drop(dragged, hit);
        }
    });

    if let Some(win) = web_sys::window() {
        if let Some(doc) = win.document() {
            let _ = doc.add_event_listener_with_callback("mouseup", on_mouseup.as_ref().unchecked_ref());
        }
    }
    on_mouseup.forget();

    // Also bind global mousemove
    bind_global_mousemove(dnd);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_drop_target() {
        assert_eq!(DropTarget::parse("container", "3"), Some(DropTarget::Container(3)));
        assert_eq!(DropTarget::parse("item", " 42 "), Some(DropTarget::Item(42)));
        assert_eq!(DropTarget::parse("zone", "1"), None);
        assert_eq!(DropTarget::parse("item", "abc"), None);
    }

    #[test]
    fn test_kind_round_trips_through_attributes() {
        let target = DropTarget::Item(9);
        assert_eq!(DropTarget::parse(target.kind(), &target.id().to_string()), Some(target));
    }

    #[test]
    fn test_hit_offset_sign() {
        let collision = Collision {
            key: DropTarget::Item(1),
            rect: Rect::new(0.0, 100.0, 200.0, 40.0),
            score: 0.0,
        };
        let above = DropHit::from_collision(&collision, Point::new(10.0, 105.0));
        let below = DropHit::from_collision(&collision, Point::new(10.0, 135.0));

        assert!(above.offset_y < 0.0);
        assert!(below.offset_y > 0.0);
        assert_eq!(below.target, DropTarget::Item(1));
    }

    #[test]
    fn test_drag_threshold() {
        assert!(!exceeds_threshold((10, 10), (15, 10)));
        assert!(exceeds_threshold((10, 10), (16, 10)));
        assert!(exceeds_threshold((10, 10), (10, 4)));
    }
}
