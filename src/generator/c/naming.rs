//! Identifier rewriting for multi-context mode.

use crate::constants::{CONTEXT_ACCESSOR, SYMBOL_PREFIX};

/// The identifier-rewriting policy handed to templates.
///
/// In multi-context mode for rendering apis (api name starting with `gl`),
/// every function and constant lives as a member of a context struct, so
/// template-side identifiers are rewritten: the loader's `GLAD_` marker and
/// the api-name prefix are stripped and a `context->` accessor is prepended.
/// Outside multi-context mode the transform only guards identifiers that do
/// not start with an alphabetic character (numeric-prefixed vendor names
/// like `3DFX_tbuffer`), which would otherwise be invalid C.
///
/// # Examples
///
/// ```rust
/// use gladgen::generator::NameTransform;
///
/// let naming = NameTransform::new(true, "gl");
/// assert_eq!(naming.apply("GLAD_glViewport", false, false), "context->Viewport");
/// assert_eq!(naming.apply("GL_3DFX_tbuffer", false, true), "_3DFX_tbuffer");
///
/// let passthrough = NameTransform::new(false, "gl");
/// assert_eq!(passthrough.apply("glViewport", false, false), "glViewport");
/// ```
#[derive(Debug, Clone)]
pub struct NameTransform {
    mx: bool,
    api_prefix: String,
}

impl NameTransform {
    /// Creates the transform for one configuration.
    ///
    /// `mx` enables the context-member rewrite; pass it already gated on the
    /// api being a rendering api. `api` supplies the prefix to strip.
    #[must_use]
    pub fn new(mx: bool, api: &str) -> Self {
        Self { mx, api_prefix: api.to_lowercase() }
    }

    /// Rewrites one identifier.
    ///
    /// `raw` keeps the api-name prefix in place; `name_only` returns the
    /// rewritten identifier without the context accessor.
    #[must_use]
    pub fn apply(&self, name: &str, raw: bool, name_only: bool) -> String {
        let mut name = name;
        if self.mx {
            name = name.strip_prefix(SYMBOL_PREFIX).unwrap_or(name);
            // glFoo -> Foo, GL_ARB_asd -> ARB_asd
            if !raw && name.to_lowercase().starts_with(&self.api_prefix) {
                name = name[self.api_prefix.len()..].trim_start_matches('_');
            }
        }

        // 3DFX_tbuffer -> _3DFX_tbuffer
        let guarded = name.chars().next().is_some_and(|first| !first.is_alphabetic());
        let name = if guarded { format!("_{name}") } else { name.to_string() };

        if name_only || !self.mx {
            name
        } else {
            format!("{CONTEXT_ACCESSOR}{name}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_loader_marker_and_api_prefix_under_mx() {
        let naming = NameTransform::new(true, "gl");
        assert_eq!(naming.apply("GLAD_glViewport", false, false), "context->Viewport");
        assert_eq!(naming.apply("glViewport", false, false), "context->Viewport");
        assert_eq!(naming.apply("GL_ARB_debug_output", false, false), "context->ARB_debug_output");
    }

    #[test]
    fn raw_keeps_the_api_prefix() {
        let naming = NameTransform::new(true, "gl");
        assert_eq!(naming.apply("glViewport", true, false), "context->glViewport");
        assert_eq!(naming.apply("GLAD_glViewport", true, false), "context->glViewport");
    }

    #[test]
    fn name_only_skips_the_accessor() {
        let naming = NameTransform::new(true, "gl");
        assert_eq!(naming.apply("glViewport", false, true), "Viewport");
        assert_eq!(naming.apply("GL_3DFX_tbuffer", false, true), "_3DFX_tbuffer");
    }

    #[test]
    fn numeric_prefixes_are_guarded_even_without_mx() {
        let naming = NameTransform::new(false, "gl");
        assert_eq!(naming.apply("3DLabs_thing", false, false), "_3DLabs_thing");
        assert_eq!(naming.apply("glViewport", false, false), "glViewport");
    }

    #[test]
    fn prefix_strip_is_case_insensitive() {
        let naming = NameTransform::new(true, "wgl");
        assert_eq!(naming.apply("WGL_ARB_pbuffer", false, true), "ARB_pbuffer");
        assert_eq!(naming.apply("wglMakeCurrent", false, true), "MakeCurrent");
    }
}
