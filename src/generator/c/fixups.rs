//! Registry fix-ups applied to a resolved feature set before generation.
//!
//! Two independent corrective rules for known registry inconsistencies. Both
//! are safe no-ops when their trigger condition is absent.

use std::collections::BTreeSet;

use crate::core::GladgenError;
use crate::registry::Registry;
use crate::resolver::FeatureSet;

/// Extensions a `wgl` loader cannot compile without.
///
/// The generated loader queries the extension string through these entry
/// points, so they must be part of every `wgl` feature set.
pub const MANDATORY_WGL_EXTENSIONS: [&str; 2] =
    ["WGL_ARB_extensions_string", "WGL_EXT_extensions_string"];

/// Types whose registry definitions collide with the system headers on Mac
/// OS X 10.7+, where `ptrdiff_t` has a different width than the headers
/// assume.
const APPLE_PTRDIFF_TYPES: [&str; 4] =
    ["GLsizeiptr", "GLintptr", "GLsizeiptrARB", "GLintptrARB"];

/// Injects the mandatory `wgl` extensions and re-resolves if any was
/// missing.
///
/// Keyed by api name only; every other api passes through untouched.
///
/// # Errors
///
/// Propagates resolution errors from the re-resolution.
pub fn ensure_wgl_extension_strings(
    registry: &Registry,
    feature_set: FeatureSet,
) -> Result<FeatureSet, GladgenError> {
    if feature_set.api != "wgl" {
        return Ok(feature_set);
    }

    let mut extensions: BTreeSet<String> = feature_set.extensions.iter().cloned().collect();
    let mut grew = false;
    for required in MANDATORY_WGL_EXTENSIONS {
        if extensions.insert(required.to_string()) {
            grew = true;
        }
    }
    if !grew {
        return Ok(feature_set);
    }

    registry.select(
        &feature_set.api,
        feature_set.version,
        feature_set.profile.as_deref(),
        &extensions,
    )
}

/// Rewrites the pointer-sized buffer types to fall back to `long` on newer
/// Mac OS X, where the registry's `ptrdiff_t` definitions collide with the
/// system GL headers.
///
/// Mutates the feature set's own type clones in place; the registry is
/// untouched. Order-independent with respect to
/// [`ensure_wgl_extension_strings`].
pub fn patch_apple_pointer_types(feature_set: &mut FeatureSet) {
    for name in APPLE_PTRDIFF_TYPES {
        if let Some(type_def) = feature_set.type_mut(name) {
            type_def.raw = format!(
                "#if defined(__ENVIRONMENT_MAC_OS_X_VERSION_MIN_REQUIRED__) \
                 && (__ENVIRONMENT_MAC_OS_X_VERSION_MIN_REQUIRED__ > 1060)\n{}\n#else\n{}\n#endif",
                type_def.raw.replace("ptrdiff_t", "long"),
                type_def.raw
            );
        }
    }
}
