//! Stagger-Appear Directive
//!
//! Plays a one-time staggered entrance animation over the children of an
//! element. When the element has no matching children yet, a child-list
//! watcher retries until they show up. Live attachments sit in a side table
//! owned by the runtime. The host remembers which elements already played,
//! without keeping them alive.

mod effects;
pub mod web;

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

pub use effects::{plan_child, Effect, ResolvedStagger, StaggerOptions};
pub use web::{provide_stagger_context, stagger_appear};

/// DOM operations the runtime needs
pub trait StaggerHost: 'static {
    /// Compared by identity
    type Element: Clone + PartialEq + 'static;
    type Animation: 'static;
    type Watcher: 'static;

    /// Descendants of `root` matching `selector`, in document order
    fn select(&self, root: &Self::Element, selector: &str) -> Vec<Self::Element>;

    /// Issue one animation without waiting for it
    fn animate(&self, node: &Self::Element, effect: &Effect) -> Result<Self::Animation, String>;

    /// Call `on_change` whenever direct children of `root` are added or removed
    fn watch_children(
        &self,
        root: &Self::Element,
        on_change: Box<dyn FnMut()>,
    ) -> Result<Self::Watcher, String>;

    fn disconnect(&self, watcher: Self::Watcher);

    /// Record that `element` played its sequence; must not keep it alive
    fn mark_done(&self, element: &Self::Element);

    fn is_done(&self, element: &Self::Element) -> bool;
}

/// Handle to one attachment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotId(u32);

#[cfg(test)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No matching children yet
    Watching,
    Done,
}

/// What one pass issued
pub struct StaggerPass<A> {
    pub animations: Vec<A>,
    /// Start offset of each matched child
    pub delays: Vec<f64>,
    /// Time until the whole staged sequence has ended
    pub settle_ms: f64,
}

type OnPass<A> = Box<dyn FnOnce(StaggerPass<A>)>;

struct Slot<H: StaggerHost> {
    id: SlotId,
    element: H::Element,
    options: ResolvedStagger,
    done: bool,
    watcher: Option<H::Watcher>,
    on_pass: Option<OnPass<H::Animation>>,
}

struct Inner<H: StaggerHost> {
    host: H,
    slots: RefCell<Vec<Slot<H>>>,
    next_id: Cell<u32>,
}

/// Owns the side table for every element the directive touched
pub struct StaggerRuntime<H: StaggerHost> {
    inner: Rc<Inner<H>>,
}

impl<H: StaggerHost> StaggerRuntime<H> {
    pub fn new(host: H) -> Self {
        Self {
            inner: Rc::new(Inner {
                host,
                slots: RefCell::new(Vec::new()),
                next_id: Cell::new(0),
            }),
        }
    }

    #[cfg(test)]
    pub fn attach(&self, element: &H::Element, options: &StaggerOptions) -> SlotId {
        self.attach_inner(element, options, None)
    }

    /// Like `attach`, calling `on_pass` right after the pass is issued
    pub fn attach_with(
        &self,
        element: &H::Element,
        options: &StaggerOptions,
        on_pass: impl FnOnce(StaggerPass<H::Animation>) + 'static,
    ) -> SlotId {
        self.attach_inner(element, options, Some(Box::new(on_pass)))
    }

    fn attach_inner(
        &self,
        element: &H::Element,
        options: &StaggerOptions,
        on_pass: Option<OnPass<H::Animation>>,
    ) -> SlotId {
        let inner = &self.inner;
        if let Some(id) = inner.find_element(element) {
            log::debug!("[STAGGER] Element already attached as {:?}", id);
            return id;
        }

        let id = SlotId(inner.next_id.get());
        inner.next_id.set(id.0.wrapping_add(1));
        if inner.host.is_done(element) {
            log::debug!("[STAGGER] Element already animated, {:?} is a no-op", id);
            return id;
        }
        inner.slots.borrow_mut().push(Slot {
            id,
            element: element.clone(),
            options: options.resolve(),
            done: false,
            watcher: None,
            on_pass,
        });

        if inner.try_pass(id) {
            return id;
        }

        let weak: Weak<Inner<H>> = Rc::downgrade(inner);
        let on_change = Box::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.on_children_changed(id);
            }
        });
        match inner.host.watch_children(element, on_change) {
            Ok(watcher) => {
                if let Some(slot) = inner.slots.borrow_mut().iter_mut().find(|s| s.id == id) {
                    slot.watcher = Some(watcher);
                }
                log::debug!("[STAGGER] {:?} waiting for children", id);
            }
            Err(err) => log::warn!("[STAGGER] Cannot watch children of {:?}: {}", id, err),
        }
        id
    }

    #[cfg(test)]
    pub fn phase(&self, id: SlotId) -> Option<Phase> {
        self.inner
            .slots
            .borrow()
            .iter()
            .find(|s| s.id == id)
            .map(|s| if s.done { Phase::Done } else { Phase::Watching })
    }

    /// Forget the element. Issued animations keep playing
    pub fn detach(&self, id: SlotId) {
        let slot = {
            let mut slots = self.inner.slots.borrow_mut();
            let Some(pos) = slots.iter().position(|s| s.id == id) else {
                return;
            };
            slots.remove(pos)
        };
        if let Some(watcher) = slot.watcher {
            self.inner.host.disconnect(watcher);
            log::debug!("[STAGGER] {:?} detached before children appeared", id);
        }
    }

    #[cfg(test)]
    fn slot_count(&self) -> usize {
        self.inner.slots.borrow().len()
    }
}

impl<H: StaggerHost> Inner<H> {
    fn find_element(&self, element: &H::Element) -> Option<SlotId> {
        self.slots.borrow().iter().find(|s| s.element == *element).map(|s| s.id)
    }

    fn on_children_changed(&self, id: SlotId) {
        let pending = self.slots.borrow().iter().any(|s| s.id == id && !s.done);
        if pending {
            self.try_pass(id);
        }
    }

    /// Animate the matched children once; false when nothing matched yet
    fn try_pass(&self, id: SlotId) -> bool {
        let (element, options) = {
            let slots = self.slots.borrow();
            match slots.iter().find(|s| s.id == id) {
                Some(slot) if slot.done => return true,
                Some(slot) => (slot.element.clone(), slot.options.clone()),
                None => return false,
            }
        };

        let nodes = self.host.select(&element, &options.selector);
        if nodes.is_empty() {
            return false;
        }

        let mut animations = Vec::with_capacity(nodes.len() * 3);
        let mut delays = Vec::with_capacity(nodes.len());
        for (index, node) in nodes.iter().enumerate() {
            delays.push(options.delay_for(index));
            for effect in plan_child(&options, index) {
                match self.host.animate(node, &effect) {
                    Ok(animation) => animations.push(animation),
                    Err(err) => {
                        log::warn!("[STAGGER] {:?} {:?} animation skipped: {}", id, effect.kind, err)
                    }
                }
            }
        }

        let (watcher, on_pass) = {
            let mut slots = self.slots.borrow_mut();
            match slots.iter_mut().find(|s| s.id == id) {
                Some(slot) => {
                    slot.done = true;
                    (slot.watcher.take(), slot.on_pass.take())
                }
                None => (None, None),
            }
        };
        if let Some(watcher) = watcher {
            self.host.disconnect(watcher);
        }
        self.host.mark_done(&element);
        log::debug!("[STAGGER] {:?} animated {} children", id, nodes.len());

        if let Some(on_pass) = on_pass {
            on_pass(StaggerPass { animations, delays, settle_ms: options.settle_ms(nodes.len()) });
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::effects::EffectKind;
    use super::*;
    use std::collections::{HashMap, HashSet};

    type Callback = Box<dyn FnMut()>;

    #[derive(Default)]
    struct MockDom {
        /// root id -> children as (id, class)
        children: HashMap<u32, Vec<(u32, &'static str)>>,
        animations: Vec<(u32, Effect)>,
        watchers: Vec<(usize, u32, Option<Callback>)>,
        disconnected: Vec<usize>,
        done: HashSet<u32>,
        fail_watch: bool,
    }

    #[derive(Clone, Default)]
    struct MockHost(Rc<RefCell<MockDom>>);

    impl MockHost {
        fn insert(&self, root: u32, child: u32, class: &'static str) {
            self.0.borrow_mut().children.entry(root).or_default().push((child, class));
        }

        /// Deliver a child-list change to every live watcher on `root`
        fn mutate(&self, root: u32) {
            let ids: Vec<usize> = self.0.borrow().watchers.iter().filter(|w| w.1 == root).map(|w| w.0).collect();
            for wid in ids {
                let callback = {
                    let mut dom = self.0.borrow_mut();
                    dom.watchers.iter_mut().find(|w| w.0 == wid).and_then(|w| w.2.take())
                };
                if let Some(mut callback) = callback {
                    callback();
                    let mut dom = self.0.borrow_mut();
                    if let Some(w) = dom.watchers.iter_mut().find(|w| w.0 == wid) {
                        w.2 = Some(callback);
                    }
                }
            }
        }

        fn animations(&self) -> Vec<(u32, Effect)> {
            self.0.borrow().animations.clone()
        }

        fn live_watchers(&self) -> usize {
            self.0.borrow().watchers.len()
        }

        fn disconnects(&self) -> usize {
            self.0.borrow().disconnected.len()
        }
    }

    impl StaggerHost for MockHost {
        type Element = u32;
        type Animation = usize;
        type Watcher = usize;

        fn select(&self, root: &u32, selector: &str) -> Vec<u32> {
            let dom = self.0.borrow();
            let children = dom.children.get(root).cloned().unwrap_or_default();
            children
                .into_iter()
                .filter(|(_, class)| selector == effects::DEFAULT_SELECTOR || selector.strip_prefix('.') == Some(*class))
                .map(|(id, _)| id)
                .collect()
        }

        fn animate(&self, node: &u32, effect: &Effect) -> Result<usize, String> {
            let mut dom = self.0.borrow_mut();
            dom.animations.push((*node, effect.clone()));
            Ok(dom.animations.len() - 1)
        }

        fn watch_children(&self, root: &u32, on_change: Box<dyn FnMut()>) -> Result<usize, String> {
            let mut dom = self.0.borrow_mut();
            if dom.fail_watch {
                return Err("observer unavailable".to_string());
            }
            let wid = dom.watchers.len() + dom.disconnected.len();
            dom.watchers.push((wid, *root, Some(on_change)));
            Ok(wid)
        }

        fn disconnect(&self, watcher: usize) {
            let mut dom = self.0.borrow_mut();
            dom.watchers.retain(|w| w.0 != watcher);
            dom.disconnected.push(watcher);
        }

        fn mark_done(&self, element: &u32) {
            self.0.borrow_mut().done.insert(*element);
        }

        fn is_done(&self, element: &u32) -> bool {
            self.0.borrow().done.contains(element)
        }
    }

    fn settle_delays(host: &MockHost) -> Vec<f64> {
        host.animations()
            .into_iter()
            .filter(|(_, e)| e.kind == EffectKind::Settle)
            .map(|(_, e)| e.timing.delay)
            .collect()
    }

    #[test]
    fn test_attach_with_children_runs_immediately() {
        let host = MockHost::default();
        host.insert(1, 10, "card");
        host.insert(1, 11, "card");
        let runtime = StaggerRuntime::new(host.clone());

        let slot = runtime.attach(&1, &StaggerOptions::default());

        assert_eq!(runtime.phase(slot), Some(Phase::Done));
        assert_eq!(host.animations().len(), 6);
        assert_eq!(host.live_watchers(), 0);
        assert_eq!(host.disconnects(), 0);
        assert_eq!(settle_delays(&host), vec![0.0, 45.0]);
    }

    #[test]
    fn test_late_children_get_exactly_one_pass() {
        let host = MockHost::default();
        let runtime = StaggerRuntime::new(host.clone());

        let slot = runtime.attach(&1, &StaggerOptions::default().with_step(30.0));
        assert_eq!(runtime.phase(slot), Some(Phase::Watching));
        assert_eq!(host.live_watchers(), 1);
        assert!(host.animations().is_empty());

        // change with nothing matching keeps watching
        host.mutate(1);
        assert_eq!(runtime.phase(slot), Some(Phase::Watching));

        for child in 0..4 {
            host.insert(1, 100 + child, "card");
        }
        host.mutate(1);
        host.mutate(1);

        assert_eq!(runtime.phase(slot), Some(Phase::Done));
        assert_eq!(host.animations().len(), 12);
        assert_eq!(settle_delays(&host), vec![0.0, 30.0, 60.0, 90.0]);
        assert_eq!(host.live_watchers(), 0);
        assert_eq!(host.disconnects(), 1);
    }

    #[test]
    fn test_animation_order_per_child() {
        let host = MockHost::default();
        host.insert(1, 10, "card");
        let runtime = StaggerRuntime::new(host.clone());
        runtime.attach(&1, &StaggerOptions::default());

        let kinds: Vec<EffectKind> = host.animations().into_iter().map(|(_, e)| e.kind).collect();
        assert_eq!(kinds, vec![EffectKind::Settle, EffectKind::Fade, EffectKind::Bounce]);
        assert!(host.animations().iter().all(|(node, _)| *node == 10));
    }

    #[test]
    fn test_selector_filters_children() {
        let host = MockHost::default();
        let runtime = StaggerRuntime::new(host.clone());
        let slot = runtime.attach(&1, &StaggerOptions::default().with_selector(".card"));

        host.insert(1, 10, "spinner");
        host.mutate(1);
        assert_eq!(runtime.phase(slot), Some(Phase::Watching));

        host.insert(1, 11, "card");
        host.mutate(1);
        assert_eq!(runtime.phase(slot), Some(Phase::Done));
        assert!(host.animations().iter().all(|(node, _)| *node == 11));
    }

    #[test]
    fn test_detach_before_children_disconnects() {
        let host = MockHost::default();
        let runtime = StaggerRuntime::new(host.clone());
        let slot = runtime.attach(&1, &StaggerOptions::default());

        runtime.detach(slot);

        assert_eq!(host.disconnects(), 1);
        assert_eq!(host.live_watchers(), 0);
        assert_eq!(runtime.phase(slot), None);

        host.insert(1, 10, "card");
        host.mutate(1);
        assert!(host.animations().is_empty());
    }

    #[test]
    fn test_done_is_terminal() {
        let host = MockHost::default();
        host.insert(1, 10, "card");
        let runtime = StaggerRuntime::new(host.clone());

        let slot = runtime.attach(&1, &StaggerOptions::default());
        assert_eq!(runtime.attach(&1, &StaggerOptions::default()), slot);
        host.insert(1, 11, "card");
        host.mutate(1);
        assert_eq!(runtime.phase(slot), Some(Phase::Done));

        runtime.detach(slot);
        let again = runtime.attach(&1, &StaggerOptions::default());
        assert_eq!(runtime.phase(again), None);
        assert_eq!(runtime.slot_count(), 0);
        assert_eq!(host.animations().len(), 3);
        assert_eq!(host.live_watchers(), 0);
    }

    #[test]
    fn test_detach_releases_slots() {
        let host = MockHost::default();
        let runtime = StaggerRuntime::new(host.clone());

        for root in 0..100 {
            host.insert(root, 1000 + root, "card");
            let done = runtime.attach(&root, &StaggerOptions::default());
            let pending = runtime.attach(&(500 + root), &StaggerOptions::default());
            assert_eq!(runtime.slot_count(), 2);

            runtime.detach(done);
            runtime.detach(pending);
            assert_eq!(runtime.slot_count(), 0);
            assert_eq!(runtime.phase(done), None);
        }
        assert_eq!(host.animations().len(), 300);
        assert_eq!(host.live_watchers(), 0);
        assert_eq!(host.disconnects(), 100);
    }

    #[test]
    fn test_reattach_while_watching_reuses_watcher() {
        let host = MockHost::default();
        let runtime = StaggerRuntime::new(host.clone());
        let slot = runtime.attach(&1, &StaggerOptions::default());
        assert_eq!(runtime.attach(&1, &StaggerOptions::default()), slot);
        assert_eq!(host.live_watchers(), 1);
    }

    #[test]
    fn test_elements_are_independent() {
        let host = MockHost::default();
        host.insert(2, 20, "card");
        let runtime = StaggerRuntime::new(host.clone());

        let pending = runtime.attach(&1, &StaggerOptions::default());
        let done = runtime.attach(&2, &StaggerOptions::default());

        assert_ne!(pending, done);
        assert_eq!(runtime.phase(pending), Some(Phase::Watching));
        assert_eq!(runtime.phase(done), Some(Phase::Done));
    }

    #[test]
    fn test_on_pass_reports_sequence() {
        let host = MockHost::default();
        let runtime = StaggerRuntime::new(host.clone());
        let report: Rc<RefCell<Option<(usize, Vec<f64>, f64)>>> = Rc::default();

        let sink = report.clone();
        runtime.attach_with(&1, &StaggerOptions::default(), move |pass| {
            *sink.borrow_mut() = Some((pass.animations.len(), pass.delays, pass.settle_ms));
        });
        assert!(report.borrow().is_none());

        host.insert(1, 10, "card");
        host.insert(1, 11, "card");
        host.mutate(1);

        let (animations, delays, settle_ms) = report.borrow_mut().take().expect("pass reported");
        assert_eq!(animations, 6);
        assert_eq!(delays, vec![0.0, 45.0]);
        assert_eq!(settle_ms, 45.0 + 220.0 + 1.0 + 200.0);
    }

    #[test]
    fn test_watch_failure_stays_pending() {
        let host = MockHost::default();
        host.0.borrow_mut().fail_watch = true;
        let runtime = StaggerRuntime::new(host.clone());

        let slot = runtime.attach(&1, &StaggerOptions::default());
        assert_eq!(runtime.phase(slot), Some(Phase::Watching));
        runtime.detach(slot);
        assert_eq!(host.disconnects(), 0);
    }

    #[test]
    fn test_dropped_runtime_ignores_late_changes() {
        let host = MockHost::default();
        let runtime = StaggerRuntime::new(host.clone());
        runtime.attach(&1, &StaggerOptions::default());
        drop(runtime);

        host.insert(1, 10, "card");
        host.mutate(1);
        assert!(host.animations().is_empty());
    }
}
