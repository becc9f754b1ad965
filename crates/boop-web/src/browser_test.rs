//! WASM browser tests for the DOM binding
//!
//! Run with: wasm-pack test --headless --firefox crates/boop-web

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use std::cell::RefCell;
use std::rc::Rc;

use boop_core::{BoopConfig, BoopError, Point, Rotation};
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;
use web_sys::{HtmlElement, PointerEvent, PointerEventInit};

use crate::action::{BoopAction, boop, parse_params};
use crate::listeners::client_point;

wasm_bindgen_test_configure!(run_in_browser);

// ============================================================================
// Helpers
// ============================================================================

/// Absolutely positioned `<div>` at (100, 100), 200x100, mounted on body.
fn create_card() -> Result<HtmlElement, String> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or("No document object")?;

    let card = document
        .create_element("div")
        .map_err(|e| format!("Failed to create card: {e:?}"))?
        .dyn_into::<HtmlElement>()
        .map_err(|_| "Failed to cast to HtmlElement")?;
    card.set_class_name("card");
    card.style()
        .set_css_text("position:absolute;left:100px;top:100px;width:200px;height:100px;margin:0");

    let face = document
        .create_element("div")
        .map_err(|e| format!("Failed to create face: {e:?}"))?;
    face.set_class_name("face");
    card.append_child(&face)
        .map_err(|e| format!("Failed to append face: {e:?}"))?;

    document
        .body()
        .ok_or("No body")?
        .append_child(&card)
        .map_err(|e| format!("Failed to mount card: {e:?}"))?;
    Ok(card)
}

fn face_of(card: &HtmlElement) -> HtmlElement {
    card.query_selector(".face")
        .expect("query failed")
        .expect("face missing")
        .dyn_into::<HtmlElement>()
        .expect("face is not an HtmlElement")
}

fn pointer_event(event_type: &str, client_x: i32, client_y: i32) -> PointerEvent {
    let init = PointerEventInit::new();
    init.set_client_x(client_x);
    init.set_client_y(client_y);
    init.set_bubbles(false);
    PointerEvent::new_with_event_init_dict(event_type, &init).expect("Failed to create PointerEvent")
}

fn fire(element: &HtmlElement, event_type: &str, client_x: i32, client_y: i32) {
    element
        .dispatch_event(&pointer_event(event_type, client_x, client_y))
        .expect("dispatch failed");
}

fn var(element: &HtmlElement, name: &str) -> String {
    element.style().get_property_value(name).expect("style read failed")
}

/// Keep layout measurable: no transform, no transition.
fn plain() -> BoopConfig {
    BoopConfig::new().with_initial_style(std::iter::empty::<(&str, &str)>())
}

// ============================================================================
// Rotation output
// ============================================================================

#[wasm_bindgen_test]
fn test_enter_move_leave_writes_variables() {
    let card = create_card().expect("Failed to create card");
    let handle = boop(card.clone(), plain()).expect("boop failed");

    fire(&card, "pointerenter", 150, 150);
    fire(&card, "pointermove", 300, 100);
    assert_eq!(var(&card, "--rotX"), "1rad");
    assert_eq!(var(&card, "--rotY"), "1rad");
    assert_eq!(handle.rotation(), Some(Rotation::new(1.0, 1.0)));

    fire(&card, "pointermove", 200, 150);
    assert_eq!(var(&card, "--rotX"), "0rad");
    assert_eq!(var(&card, "--rotY"), "0rad");

    fire(&card, "pointermove", 250, 125);
    fire(&card, "pointerleave", 400, 400);
    assert_eq!(var(&card, "--rotX"), "0rad");
    assert_eq!(var(&card, "--rotY"), "0rad");
    assert_eq!(handle.rotation(), Some(Rotation::ZERO));

    card.remove();
}

#[wasm_bindgen_test]
fn test_move_without_enter_is_ignored() {
    let card = create_card().expect("Failed to create card");
    let _handle = boop(card.clone(), plain()).expect("boop failed");

    fire(&card, "pointermove", 300, 100);
    assert_eq!(var(&card, "--rotX"), "");

    card.remove();
}

#[wasm_bindgen_test]
fn test_selector_target_receives_variables() {
    let card = create_card().expect("Failed to create card");
    let face = face_of(&card);
    let _handle = boop(card.clone(), plain().with_selector(".face")).expect("boop failed");

    assert_eq!(var(&card, "perspective"), "1000px");

    fire(&card, "pointerenter", 150, 150);
    fire(&card, "pointermove", 100, 150);
    assert_eq!(var(&face, "--rotY"), "-1rad");
    assert_eq!(var(&card, "--rotY"), "");

    card.remove();
}

#[wasm_bindgen_test]
fn test_variables_on_node_after_update() {
    let card = create_card().expect("Failed to create card");
    let face = face_of(&card);
    let handle = boop(card.clone(), plain().with_selector(".face")).expect("boop failed");

    handle
        .configure(plain().with_selector(".face").with_variables_on_node(true))
        .expect("configure failed");

    fire(&card, "pointerenter", 150, 150);
    fire(&card, "pointermove", 100, 150);
    assert_eq!(var(&card, "--rotY"), "-1rad");
    assert_eq!(var(&face, "--rotY"), "");

    card.remove();
}

#[wasm_bindgen_test]
fn test_default_style_applied_to_target() {
    let card = create_card().expect("Failed to create card");
    let face = face_of(&card);
    let _handle =
        boop(card.clone(), BoopConfig::new().with_selector(".face")).expect("boop failed");

    assert_eq!(var(&face, "transform-style"), "preserve-3d");
    assert!(var(&face, "transform").contains("var(--rotX)"));

    card.remove();
}

#[wasm_bindgen_test]
fn test_client_point_keeps_fractional_coordinates() {
    let event = pointer_event("pointermove", 250, 125);
    let descriptor = js_sys::Object::new();
    js_sys::Reflect::set(&descriptor, &"value".into(), &JsValue::from_f64(250.75)).unwrap();
    js_sys::Object::define_property(&event, &"clientX".into(), &descriptor);

    assert_eq!(client_point(&event), Point::new(250.75, 125.0));
}

// ============================================================================
// Errors
// ============================================================================

#[wasm_bindgen_test]
fn test_unmatched_selector_fails() {
    let card = create_card().expect("Failed to create card");

    let result = boop(card.clone(), plain().with_selector(".missing"));
    assert!(matches!(result, Err(BoopError::TargetResolution { .. })));
    assert_eq!(var(&card, "perspective"), "");

    card.remove();
}

#[wasm_bindgen_test]
fn test_failed_update_keeps_previous_target() {
    let card = create_card().expect("Failed to create card");
    let face = face_of(&card);
    let handle = boop(card.clone(), plain().with_selector(".face")).expect("boop failed");

    let result = handle.configure(plain().with_selector(".missing"));
    assert!(result.is_err());

    fire(&card, "pointerenter", 150, 150);
    fire(&card, "pointermove", 300, 150);
    assert_eq!(var(&face, "--rotY"), "1rad");

    card.remove();
}

// ============================================================================
// Teardown
// ============================================================================

#[wasm_bindgen_test]
fn test_deactivate_removes_listeners() {
    let card = create_card().expect("Failed to create card");
    let handle = boop(card.clone(), plain()).expect("boop failed");

    handle.deactivate();
    handle.deactivate();
    assert!(!handle.is_active());

    fire(&card, "pointerenter", 150, 150);
    fire(&card, "pointermove", 300, 100);
    assert_eq!(var(&card, "--rotX"), "");
    assert!(matches!(handle.configure(plain()), Err(BoopError::Inactive)));

    card.remove();
}

#[wasm_bindgen_test]
fn test_dropping_handle_detaches() {
    let card = create_card().expect("Failed to create card");
    drop(boop(card.clone(), plain()).expect("boop failed"));

    fire(&card, "pointerenter", 150, 150);
    fire(&card, "pointermove", 300, 100);
    assert_eq!(var(&card, "--rotX"), "");

    card.remove();
}

#[wasm_bindgen_test]
fn test_transform_callback_receives_rotation() {
    let card = create_card().expect("Failed to create card");
    let handle = boop(card.clone(), plain()).expect("boop failed");

    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    handle
        .on_transform(move |_, rotation| sink.borrow_mut().push(rotation))
        .expect("on_transform failed");

    fire(&card, "pointerenter", 150, 150);
    fire(&card, "pointermove", 300, 150);
    fire(&card, "pointerleave", 0, 0);

    assert_eq!(
        *seen.borrow(),
        vec![Rotation::new(0.0, 1.0), Rotation::ZERO]
    );

    card.remove();
}

#[wasm_bindgen_test]
fn test_deactivate_from_transform_callback() {
    let card = create_card().expect("Failed to create card");
    let handle = Rc::new(boop(card.clone(), plain()).expect("boop failed"));

    let inner = Rc::downgrade(&handle);
    handle
        .on_transform(move |_, _| {
            if let Some(handle) = inner.upgrade() {
                handle.deactivate();
            }
        })
        .expect("on_transform failed");

    fire(&card, "pointerenter", 150, 150);
    fire(&card, "pointermove", 300, 100);
    assert!(!handle.is_active());

    fire(&card, "pointermove", 100, 200);
    assert_eq!(var(&card, "--rotX"), "1rad");

    card.remove();
}

// ============================================================================
// JavaScript surface
// ============================================================================

#[wasm_bindgen_test]
fn test_parse_params_defaults() {
    assert_eq!(parse_params(JsValue::UNDEFINED).unwrap(), BoopConfig::default());
    assert_eq!(parse_params(JsValue::NULL).unwrap(), BoopConfig::default());
}

#[wasm_bindgen_test]
fn test_parse_params_camel_case() {
    let params = js_sys::JSON::parse(r#"{"selector":".face","variablesOnNode":true}"#).unwrap();
    let config = parse_params(params).unwrap();
    assert_eq!(config.selector(), Some(".face"));
    assert!(config.variables_on_node);
}

#[wasm_bindgen_test]
fn test_parse_params_rejects_wrong_type() {
    let params = js_sys::JSON::parse(r#"{"variablesOnNode":"yes"}"#).unwrap();
    assert!(matches!(
        parse_params(params),
        Err(BoopError::InvalidConfig { .. })
    ));
}

#[wasm_bindgen_test]
fn test_action_update_and_destroy() {
    let card = create_card().expect("Failed to create card");
    let face = face_of(&card);

    let action = BoopAction::new(card.clone(), JsValue::UNDEFINED).expect("action failed");
    let params = js_sys::JSON::parse(r#"{"selector":".face","initialStyle":{}}"#).unwrap();
    action.update(params).expect("update failed");

    fire(&card, "pointerenter", 150, 150);
    fire(&card, "pointermove", 300, 150);
    assert_eq!(var(&face, "--rotY"), "1rad");

    action.destroy();
    fire(&card, "pointermove", 100, 150);
    assert_eq!(var(&face, "--rotY"), "1rad");

    card.remove();
}

#[wasm_bindgen_test]
fn test_action_rejects_missing_target() {
    let card = create_card().expect("Failed to create card");
    let params = js_sys::JSON::parse(r#"{"selector":".missing"}"#).unwrap();
    assert!(BoopAction::new(card.clone(), params).is_err());
    card.remove();
}
