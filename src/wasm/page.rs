//! Page startup: controller, widgets, resize plumbing and scroll effects.

use std::rc::Rc;

use js_sys::Function;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{Document, Element, Event, HtmlElement, NodeList, Window};

use super::dom::{self, js_err, object, viewport_height, viewport_width};
use super::gsap::{self, Trigger};
use super::host::{self, dispatch, WeakShared};
use super::lenis::{self, Lenis};
use super::video;
use crate::config::SiteConfig;
use crate::controller::ControllerConfig;
use crate::error::{Error, Result};
use crate::navbar::Navbar;
use crate::scroll::ScrollTracker;
use crate::{gallery, pixel_ratio, reveal, site};

pub fn init(window: Window, document: Document, config: SiteConfig) -> Result<()> {
    if document.get_element_by_id(site::PRIMARY_CANVAS).is_none() {
        return Err(Error::MissingPrimarySurface(site::PRIMARY_CANVAS.into()));
    }

    let controller = host::shared(
        window.clone(),
        document.clone(),
        ControllerConfig::from(&config),
    );
    {
        let mut c = controller.borrow_mut();
        c.start_loading_overlay(Some(site::loading(&config)))?;
        c.register_primary(site::primary(&config))?;
        for widget in site::widgets(&config) {
            c.register(widget)?;
        }
    }
    let me = Rc::downgrade(&controller);
    // closures hold weak references; the controller lives as long as the page
    std::mem::forget(controller);

    watch_resize(&window, me.clone())?;
    watch_pixel_ratio(window.clone(), me.clone())?;

    let lenis = init_smooth_scroll(&config, me.clone())?;
    init_in_page_links(&document, &lenis)?;
    init_navbar(&window, &document, &config)?;

    video::init_lazy_videos(&document, config.video_margin_px)?;

    let loaded = {
        let (window, document) = (window.clone(), document.clone());
        move || on_page_loaded(me, &window, &document, &config)
    };
    dom::when_loaded(&window, &document, loaded)?;

    log::info!("page controller started");
    Ok(())
}

/// Layout is final only once the page has loaded. The gallery pin must exist before
/// the reveal trigger measures its own position.
fn on_page_loaded(me: WeakShared, window: &Window, document: &Document, config: &SiteConfig) {
    dispatch(me, |c| {
        c.maybe_hide_loading_overlay();
    });
    if let Err(e) = init_gallery(window, document, config) {
        log::warn!("works gallery: {e}");
    }
    if let Err(e) = init_reveal(document) {
        log::warn!("about reveal: {e}");
    }
}

fn watch_resize(window: &Window, me: WeakShared) -> Result<()> {
    let on_resize = Closure::<dyn FnMut()>::new(move || {
        dispatch(me.clone(), |c| {
            c.broadcast_resize();
        });
    });
    window
        .add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())
        .map_err(js_err)?;
    on_resize.forget();
    Ok(())
}

/// Moving between screens changes the ratio without a resize event. The query is
/// bound to the current ratio, so it is re-armed with the new one after each change.
fn watch_pixel_ratio(window: Window, me: WeakShared) -> Result<()> {
    let query = pixel_ratio::resolution_query(window.device_pixel_ratio());
    let Some(list) = window.match_media(&query).map_err(js_err)? else {
        return Ok(());
    };
    let armed = list.clone();
    let on_change = Closure::once_into_js(move || {
        armed.set_onchange(None);
        dispatch(me.clone(), |c| {
            c.broadcast_resize();
        });
        if let Err(e) = watch_pixel_ratio(window, me) {
            log::warn!("pixel ratio watcher: {e}");
        }
    });
    list.set_onchange(Some(on_change.unchecked_ref()));
    Ok(())
}

/// Lenis drives the scroll, gsap's ticker drives Lenis, and every Lenis scroll
/// updates ScrollTrigger: one clock for both libraries.
fn init_smooth_scroll(config: &SiteConfig, me: WeakShared) -> Result<Lenis> {
    gsap::register_scroll_trigger()?;
    let lenis = lenis::create(&config.smooth_scroll)?;

    let mut tracker = ScrollTracker::new();
    let on_scroll = Closure::<dyn FnMut(Lenis)>::new(move |lenis: Lenis| {
        gsap::update();
        let state = tracker.sample(lenis.scroll(), lenis.limit());
        dispatch(me.clone(), move |c| {
            c.on_scroll(&state);
        });
    });
    lenis.on("scroll", on_scroll.as_ref().unchecked_ref());
    on_scroll.forget();

    let driver = lenis.clone();
    let tick = Closure::<dyn FnMut(f64)>::new(move |seconds: f64| {
        driver.raf(seconds * 1000.0);
    });
    gsap::ticker_add(tick.as_ref().unchecked_ref());
    tick.forget();
    gsap::lag_smoothing(0.0);

    Ok(lenis)
}

fn init_in_page_links(document: &Document, lenis: &Lenis) -> Result<()> {
    let links = document
        .query_selector_all(site::IN_PAGE_LINKS)
        .map_err(js_err)?;
    for i in 0..links.length() {
        let Some(link) = links.item(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
            continue;
        };
        let Some(href) = link.get_attribute("href").filter(|h| h != "#") else {
            continue;
        };
        let document = document.clone();
        let lenis = lenis.clone();
        let on_click = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            event.prevent_default();
            match document.query_selector(&href) {
                Ok(Some(target)) => lenis.scroll_to(&target),
                Ok(None) => log::debug!("no target for {href}"),
                Err(e) => log::warn!("bad link target {href}: {e:?}"),
            }
        });
        link.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())
            .map_err(js_err)?;
        on_click.forget();
    }
    Ok(())
}

fn init_navbar(window: &Window, document: &Document, config: &SiteConfig) -> Result<()> {
    let Some(navbar) = document
        .query_selector(site::NAVBAR)
        .map_err(js_err)?
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    else {
        log::debug!("no navbar");
        return Ok(());
    };
    let hero = document
        .query_selector(site::HERO)
        .map_err(js_err)?
        .and_then(|el| el.dyn_into::<HtmlElement>().ok());

    let mut state = Navbar::new(config.navbar, window.scroll_y().unwrap_or(0.0));
    apply_navbar(&navbar, &state.classes().toggles())?;

    let window = window.clone();
    let on_update = Closure::<dyn FnMut(Trigger)>::new(move |trigger: Trigger| {
        let hero_height = hero
            .as_ref()
            .map(|h| f64::from(h.offset_height()))
            .unwrap_or_else(|| viewport_height(&window));
        let update = state.update(trigger.scroll(), hero_height);
        if update.suppress_transition {
            if let Err(e) = dom::suppress_transition(&window, &navbar) {
                log::warn!("navbar transition: {e}");
            }
        }
        if let Err(e) = apply_navbar(&navbar, &update.classes.toggles()) {
            log::warn!("navbar classes: {e}");
        }
    });
    let vars = object(&[
        ("start", "top top".into()),
        ("end", 99999.into()),
        ("onUpdate", on_update.into_js_value()),
    ])?;
    gsap::create(&vars);
    Ok(())
}

fn apply_navbar(navbar: &HtmlElement, toggles: &[(&str, bool)]) -> Result<()> {
    for (class, present) in toggles {
        dom::set_class(navbar, class, *present)?;
    }
    Ok(())
}

fn init_gallery(window: &Window, document: &Document, config: &SiteConfig) -> Result<()> {
    let works = document.get_element_by_id(site::WORKS_SECTION);
    let wrapper = document
        .query_selector(site::HORIZONTAL_WRAPPER)
        .map_err(js_err)?;
    let (Some(works), Some(wrapper)) = (works, wrapper) else {
        log::warn!("works gallery elements not found");
        return Ok(());
    };
    let cfg = config.gallery;
    if gallery::is_mobile(&cfg, viewport_width(window)) {
        log::info!("narrow viewport, skipping works gallery");
        return Ok(());
    }

    // evaluated by gsap on every refresh
    let x = {
        let wrapper = wrapper.clone();
        let window = window.clone();
        Closure::<dyn Fn() -> f64>::new(move || {
            gallery::scroll_amount(f64::from(wrapper.scroll_width()), viewport_width(&window))
        })
    };
    let end = {
        let wrapper = wrapper.clone();
        Closure::<dyn Fn() -> String>::new(move || gallery::pin_end(f64::from(wrapper.scroll_width())))
    };
    let trigger = object(&[
        ("trigger", works.into()),
        ("start", "top top".into()),
        ("end", end.into_js_value()),
        ("pin", true.into()),
        ("scrub", cfg.scrub.into()),
        ("invalidateOnRefresh", true.into()),
    ])?;
    let vars = object(&[
        ("x", x.into_js_value()),
        ("ease", "none".into()),
        ("scrollTrigger", trigger.into()),
    ])?;
    gsap::to(&wrapper, &vars);
    gsap::refresh();

    let document = document.clone();
    let window = window.clone();
    let curve = Closure::<dyn FnMut(f64)>::new(move |_seconds: f64| {
        let width = viewport_width(&window);
        if gallery::is_mobile(&cfg, width) {
            return;
        }
        let Ok(cards) = document.query_selector_all(site::SCROLL_BOX) else {
            return;
        };
        for i in 0..cards.length() {
            let Some(card) = cards.item(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
                continue;
            };
            let rect = card.get_bounding_client_rect();
            let t = gallery::card_transform(&cfg, rect.left() + rect.width() / 2.0, width);
            let vars = object(&[
                ("y", t.y.into()),
                ("rotation", t.rotation_deg.into()),
                ("transformOrigin", "center center".into()),
            ]);
            if let Ok(vars) = vars {
                gsap::set(&card, &vars);
            }
        }
    });
    gsap::ticker_add(curve.as_ref().unchecked_ref::<Function>());
    curve.forget();
    gsap::refresh();
    log::info!("works gallery initialised");
    Ok(())
}

/// Wrap the about text's characters in spans and return them with the section that
/// triggers their reveal.
pub fn split_about_text(document: &Document) -> Result<Option<(NodeList, Element)>> {
    let text = document.query_selector(site::ABOUT_TEXT).map_err(js_err)?;
    let section = document.query_selector(site::ABOUT_SECTION).map_err(js_err)?;
    let (Some(text), Some(section)) = (text, section) else {
        return Ok(None);
    };
    text.set_inner_html(&reveal::split_chars(&text.inner_html()));
    let chars = text
        .query_selector_all(&format!(".{}", reveal::CHAR_CLASS))
        .map_err(js_err)?;
    Ok(Some((chars, section)))
}

fn init_reveal(document: &Document) -> Result<()> {
    let Some((chars, section)) = split_about_text(document)? else {
        log::warn!("about text or section not found");
        return Ok(());
    };

    let from = object(&[("opacity", reveal::START_OPACITY.into())])?;
    let trigger = object(&[
        ("trigger", section.into()),
        ("start", "top 75%".into()),
        ("end", "center center".into()),
        ("scrub", true.into()),
    ])?;
    let to = object(&[
        ("opacity", 1.0.into()),
        ("ease", "none".into()),
        ("stagger", 0.1.into()),
        ("scrollTrigger", trigger.into()),
    ])?;
    gsap::from_to(&JsValue::from(chars.clone()), &from, &to);
    log::info!("about reveal: {} chars", chars.length());
    Ok(())
}
