//! Style payloads and rotation variable formatting

use std::borrow::Cow;

use crate::geometry::Rotation;

/// Custom property carrying the rotation about the horizontal axis.
pub const ROT_X_VAR: &str = "--rotX";
/// Custom property carrying the rotation about the vertical axis.
pub const ROT_Y_VAR: &str = "--rotY";

/// Perspective used by both the default payload and the 3D context.
pub const DEFAULT_PERSPECTIVE: &str = "1000px";

/// Style applied to the resolved target when no `initialStyle` is configured.
pub const DEFAULT_TARGET_STYLE: [(&str, &str); 5] = [
    ("perspective", DEFAULT_PERSPECTIVE),
    ("transform-origin", "center center"),
    (
        "transition",
        "transform 500ms cubic-bezier(0.175, 0.885, 0.32, 1.275)",
    ),
    ("transform-style", "preserve-3d"),
    ("transform", "rotateX(var(--rotX)) rotateY(var(--rotY))"),
];

/// Style establishing a 3D rendering context on the bound element when the
/// rotated target is one of its descendants.
pub const CONTEXT_STYLE: [(&str, &str); 2] = [
    ("perspective", DEFAULT_PERSPECTIVE),
    ("transform-style", "preserve-3d"),
];

/// Format an angle as a CSS radian value.
///
/// ```
/// use boop_core::style::format_radians;
///
/// assert_eq!(format_radians(0.0), "0rad");
/// assert_eq!(format_radians(-0.5), "-0.5rad");
/// ```
#[must_use]
pub fn format_radians(angle: f64) -> String {
    format!("{angle}rad")
}

/// The two variable writes for a rotation, in `(name, value)` form.
#[must_use]
pub fn rotation_variables(rotation: Rotation) -> [(&'static str, String); 2] {
    [
        (ROT_X_VAR, format_radians(rotation.rot_x)),
        (ROT_Y_VAR, format_radians(rotation.rot_y)),
    ]
}

/// Normalize a style key to its CSS property name.
///
/// Custom properties and already-hyphenated names pass through; camelCase DOM
/// names (`transformStyle`) become kebab-case (`transform-style`). A leading
/// uppercase letter marks a vendor prefix (`WebkitTransform`).
///
/// ```
/// use boop_core::style::css_property_name;
///
/// assert_eq!(css_property_name("transformStyle"), "transform-style");
/// assert_eq!(css_property_name("--rotX"), "--rotX");
/// assert_eq!(css_property_name("WebkitTransform"), "-webkit-transform");
/// ```
#[must_use]
pub fn css_property_name(key: &str) -> Cow<'_, str> {
    if key.starts_with("--") || !key.chars().any(|c| c.is_ascii_uppercase()) {
        return Cow::Borrowed(key);
    }

    let mut name = String::with_capacity(key.len() + 4);
    for c in key.chars() {
        if c.is_ascii_uppercase() {
            name.push('-');
            name.push(c.to_ascii_lowercase());
        } else {
            name.push(c);
        }
    }
    Cow::Owned(name)
}
