#![cfg(target_arch = "wasm32")]

use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;

use std::cell::Cell;
use std::rc::Rc;

use landing_wasm::wasm::{dom, page};

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> web_sys::Document {
    web_sys::window().unwrap().document().unwrap()
}

#[wasm_bindgen_test]
fn config_defaults_without_element() {
    let cfg = dom::read_config(&document()).unwrap();
    assert_eq!(cfg, landing_wasm::SiteConfig::default());
}

#[wasm_bindgen_test]
fn config_from_inline_json() {
    let document = document();
    let script = document.create_element("script").unwrap();
    script.set_id("site-config");
    script.set_attribute("type", "application/json").unwrap();
    script.set_text_content(Some(r#"{ "overlay": { "minimum_ms": 300 } }"#));
    document.body().unwrap().append_child(&script).unwrap();

    let cfg = dom::read_config(&document).unwrap();
    script.remove();
    assert_eq!(cfg.overlay.minimum_ms, 300.0);
    assert_eq!(cfg.overlay.fade_ms, 500.0);
}

#[wasm_bindgen_test]
fn canvas_lookup_is_typed() {
    let document = document();
    let canvas = document.create_element("canvas").unwrap();
    canvas.set_id("rive-canvas");
    let div = document.create_element("div").unwrap();
    div.set_id("loading-overlay");
    let body = document.body().unwrap();
    body.append_child(&canvas).unwrap();
    body.append_child(&div).unwrap();

    assert!(dom::element_by_id::<web_sys::HtmlCanvasElement>(&document, "rive-canvas").is_some());
    assert!(dom::element_by_id::<web_sys::HtmlCanvasElement>(&document, "loading-overlay").is_none());
    assert!(dom::element_by_id::<web_sys::HtmlCanvasElement>(&document, "missing").is_none());

    canvas.remove();
    div.remove();
}

#[wasm_bindgen_test]
fn class_toggles() {
    let el = document().create_element("nav").unwrap();
    dom::set_class(&el, "navbar-hidden", true).unwrap();
    assert!(el.class_list().contains("navbar-hidden"));
    dom::set_class(&el, "navbar-hidden", false).unwrap();
    assert!(!el.class_list().contains("navbar-hidden"));
}

#[wasm_bindgen_test]
fn object_sets_keys() {
    let obj = dom::object(&[("pin", true.into()), ("scrub", 0.1.into())]).unwrap();
    let pin = js_sys::Reflect::get(&obj, &"pin".into()).unwrap();
    assert_eq!(pin.as_bool(), Some(true));
    let scrub = js_sys::Reflect::get(&obj, &"scrub".into()).unwrap();
    assert_eq!(scrub.as_f64(), Some(0.1));
    assert!(obj.dyn_ref::<js_sys::Object>().is_some());
}

#[wasm_bindgen_test]
fn load_work_runs_at_once_after_load() {
    let window = web_sys::window().unwrap();
    let document = document();
    assert_eq!(document.ready_state(), "complete");

    let section = document.create_element("section").unwrap();
    section.set_class_name("about-section");
    section.set_inner_html(r#"<p class="about-desc-text">Hi <b>you</b></p>"#);
    document.body().unwrap().append_child(&section).unwrap();

    let ran = Rc::new(Cell::new(false));
    let chars = Rc::new(Cell::new(0));
    {
        let (ran, chars, doc) = (ran.clone(), chars.clone(), document.clone());
        dom::when_loaded(&window, &document, move || {
            ran.set(true);
            if let Ok(Some((spans, _))) = page::split_about_text(&doc) {
                chars.set(spans.length());
            }
        })
        .unwrap();
    }

    // `load` is long gone: nothing would ever fire a listener
    assert!(ran.get());
    assert_eq!(chars.get(), 5);
    assert_eq!(document.query_selector_all(".about-char").unwrap().length(), 5);
    assert!(document.query_selector(".about-desc-text b").unwrap().is_some());
    section.remove();
}
