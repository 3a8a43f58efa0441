//! Videos that only start loading as they scroll into range.

use js_sys::Array;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{
    Document, HtmlVideoElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit,
};

use super::dom::js_err;
use crate::error::Result;
use crate::lazy::{self, LazyLoader};
use crate::site::{LAZY_VIDEOS, LAZY_VIDEO_CLASS};

pub fn init_lazy_videos(document: &Document, margin_px: f64) -> Result<()> {
    let nodes = document.query_selector_all(LAZY_VIDEOS).map_err(js_err)?;
    let mut loader = LazyLoader::new();
    let mut videos = Vec::new();
    for i in 0..nodes.length() {
        if let Some(video) = nodes.item(i).and_then(|n| n.dyn_into::<HtmlVideoElement>().ok()) {
            loader.observe(videos.len(), video.clone());
            videos.push(video);
        }
    }
    if videos.is_empty() {
        return Ok(());
    }

    let options = IntersectionObserverInit::new();
    options.set_root_margin(&lazy::root_margin(margin_px));

    let watched = videos.clone();
    let on_intersect = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
        move |entries: Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let entry: IntersectionObserverEntry = entry.unchecked_into();
                if !entry.is_intersecting() {
                    continue;
                }
                let target = entry.target();
                observer.unobserve(&target);
                let target: &JsValue = target.as_ref();
                let Some(index) = watched.iter().position(|v| AsRef::<JsValue>::as_ref(v) == target) else {
                    continue;
                };
                if let Some(video) = loader.fire(&index) {
                    start(&video);
                }
            }
        },
    );
    let observer =
        IntersectionObserver::new_with_options(on_intersect.as_ref().unchecked_ref(), &options)
            .map_err(js_err)?;
    on_intersect.forget();
    for video in &videos {
        observer.observe(video);
    }
    log::debug!("{} lazy videos", videos.len());
    Ok(())
}

/// Swap in the real source and try to play. Browsers may refuse autoplay until a
/// user gesture; the video then just stays paused.
fn start(video: &HtmlVideoElement) {
    if let Some(src) = video.get_attribute("data-src") {
        video.set_src(&src);
        video.load();
    }
    match video.play() {
        Ok(promise) => spawn_local(async move {
            if let Err(e) = JsFuture::from(promise).await {
                log::info!("autoplay prevented: {e:?}");
            }
        }),
        Err(e) => log::info!("autoplay prevented: {e:?}"),
    }
    if let Err(e) = video.class_list().remove_1(LAZY_VIDEO_CLASS) {
        log::debug!("{e:?}");
    }
}
