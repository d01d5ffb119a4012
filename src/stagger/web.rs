//! Browser Binding
//!
//! `StaggerHost` over web-sys plus the Leptos directive
//! (`use:stagger_appear=options`).

use leptos::prelude::*;
use leptos::task::spawn_local;
use serde::Serialize;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    Animation, Element, KeyframeAnimationOptions, MutationObserver, MutationObserverInit,
};

use super::{Effect, StaggerHost, StaggerOptions, StaggerRuntime};

/// Real DOM host
pub struct WebHost {
    /// Elements that already played, collected together with them
    done: js_sys::WeakSet,
}

impl WebHost {
    pub fn new() -> Self {
        Self { done: js_sys::WeakSet::new() }
    }
}

impl Default for WebHost {
    fn default() -> Self {
        Self::new()
    }
}

/// Keeps the JS callback alive as long as the observer
pub struct WebWatcher {
    observer: MutationObserver,
    _on_change: Closure<dyn FnMut()>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ObserveOptions {
    child_list: bool,
}

fn js_error(err: JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{:?}", err))
}

impl StaggerHost for WebHost {
    type Element = Element;
    type Animation = Animation;
    type Watcher = WebWatcher;

    fn select(&self, root: &Element, selector: &str) -> Vec<Element> {
        match root.query_selector_all(selector) {
            Ok(list) => (0..list.length())
                .filter_map(|i| list.get(i))
                .filter_map(|node| node.dyn_into::<Element>().ok())
                .collect(),
            Err(err) => {
                log::warn!("[STAGGER] Bad selector {:?}: {}", selector, js_error(err));
                Vec::new()
            }
        }
    }

    fn animate(&self, node: &Element, effect: &Effect) -> Result<Animation, String> {
        let keyframes: js_sys::Object = serde_wasm_bindgen::to_value(&effect.keyframes)
            .map_err(|e| e.to_string())?
            .unchecked_into();
        let options: KeyframeAnimationOptions = serde_wasm_bindgen::to_value(&effect.timing)
            .map_err(|e| e.to_string())?
            .unchecked_into();
        Ok(node.animate_with_keyframe_animation_options(Some(&keyframes), &options))
    }

    fn watch_children(
        &self,
        root: &Element,
        mut on_change: Box<dyn FnMut()>,
    ) -> Result<WebWatcher, String> {
        let callback = Closure::<dyn FnMut()>::new(move || on_change());
        let observer = MutationObserver::new(callback.as_ref().unchecked_ref()).map_err(js_error)?;
        let init: MutationObserverInit =
            serde_wasm_bindgen::to_value(&ObserveOptions { child_list: true })
                .map_err(|e| e.to_string())?
                .unchecked_into();
        observer.observe_with_options(root, &init).map_err(js_error)?;
        Ok(WebWatcher { observer, _on_change: callback })
    }

    fn disconnect(&self, watcher: WebWatcher) {
        watcher.observer.disconnect();
    }

    fn mark_done(&self, element: &Element) {
        self.done.add(element);
    }

    fn is_done(&self, element: &Element) -> bool {
        self.done.has(element)
    }
}

/// Resolves once every animation of a pass has finished playing
pub async fn pass_finished(animations: Vec<Animation>) -> Result<(), JsValue> {
    let promises = js_sys::Array::new();
    for animation in &animations {
        let finished: JsValue = animation.finished()?.into();
        promises.push(&finished);
    }
    JsFuture::from(js_sys::Promise::all(&promises)).await?;
    Ok(())
}

/// Runtime handle provided by the composition root
#[derive(Clone, Copy)]
pub struct StaggerContext {
    runtime: StoredValue<StaggerRuntime<WebHost>, LocalStorage>,
}

impl StaggerContext {
    pub fn new() -> Self {
        Self {
            runtime: StoredValue::new_local(StaggerRuntime::new(WebHost::new())),
        }
    }
}

impl Default for StaggerContext {
    fn default() -> Self {
        Self::new()
    }
}

pub fn provide_stagger_context() -> StaggerContext {
    let ctx = StaggerContext::new();
    provide_context(ctx);
    ctx
}

/// Leptos directive: animate the element's children once, detach on cleanup
pub fn stagger_appear(el: Element, options: StaggerOptions) {
    let Some(ctx) = use_context::<StaggerContext>() else {
        log::warn!("[STAGGER] StaggerContext not provided, skipping");
        return;
    };

    let slot = ctx.runtime.with_value(|runtime| {
        runtime.attach_with(&el, &options, |pass| {
            let settle_ms = pass.settle_ms;
            let children = pass.delays.len();
            spawn_local(async move {
                match pass_finished(pass.animations).await {
                    Ok(()) => log::debug!(
                        "[STAGGER] Sequence of {} children settled (planned {} ms)",
                        children,
                        settle_ms
                    ),
                    Err(err) => log::debug!("[STAGGER] Sequence interrupted: {}", js_error(err)),
                }
            });
        })
    });

    on_cleanup(move || {
        ctx.runtime.try_with_value(|runtime| runtime.detach(slot));
    });
}
