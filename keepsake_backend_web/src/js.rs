// Copyright 2026 the Keepsake Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Helpers for turning JS rejections into Rust errors.

use alloc::format;
use alloc::string::String;

use wasm_bindgen::{JsCast as _, JsValue};
use web_sys::DomException;

/// Renders a thrown or rejected JS value as `"Name: message"` when possible.
pub(crate) fn describe(value: &JsValue) -> String {
    if let Some(ex) = value.dyn_ref::<DomException>() {
        return format!("{}: {}", ex.name(), ex.message());
    }
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return format!("{}: {}", String::from(err.name()), String::from(err.message()));
    }
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

/// Returns `true` for a `DOMException` named `InvalidStateError`.
///
/// `createMediaElementSource` throws this when the element already feeds a
/// source node.
pub(crate) fn is_invalid_state(value: &JsValue) -> bool {
    value
        .dyn_ref::<DomException>()
        .is_some_and(|ex| ex.name() == "InvalidStateError")
}
