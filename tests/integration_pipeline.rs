//! Library-level pipeline tests: parse, resolve, post-process, render.

mod common;

use std::collections::{BTreeMap, BTreeSet};

use gladgen::alias::build_alias_map;
use gladgen::generator::{by_name, Generator, OptionSet};
use gladgen::registry::{Registry, Version};
use gladgen::render::{render_context, Renderer};
use gladgen::resolver::expand::expand_aliased_extensions;

use common::{FIXTURE_REGISTRY, HEADER_TEMPLATE, SOURCE_TEMPLATE};

fn registry() -> Registry {
    Registry::parse("gl", FIXTURE_REGISTRY).unwrap()
}

fn options(pairs: &[(&str, &str)]) -> OptionSet {
    let raw: BTreeMap<String, String> =
        pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect();
    by_name("c").unwrap().validate_options(&raw).unwrap()
}

#[test]
fn alias_expansion_pulls_in_aliasing_extensions() {
    let registry = registry();
    let backend = by_name("c").unwrap();
    let options = options(&[("ALIAS", "true")]);

    let feature_set =
        registry.select("gl", Version::new(3, 2), Some("core"), &BTreeSet::new()).unwrap();
    assert!(feature_set.extensions.is_empty());

    let expanded = backend.modify_feature_set(&registry, feature_set, &options).unwrap();
    assert!(expanded.has_extension("GL_EXT_draw_elements_base_vertex"));
    assert!(expanded.has_extension("GL_OES_draw_elements_base_vertex"));
    assert!(!expanded.has_extension("GL_ARB_debug_output"));
    assert!(expanded.command("glDrawElementsBaseVertexEXT").is_some());
}

#[test]
fn expansion_is_idempotent_on_the_fixture() {
    let registry = registry();
    let feature_set =
        registry.select("gl", Version::new(3, 2), Some("core"), &BTreeSet::new()).unwrap();

    let once = expand_aliased_extensions(&registry, &feature_set).unwrap();
    let twice = expand_aliased_extensions(&registry, &once).unwrap();
    assert_eq!(once.extensions, twice.extensions);
    assert_eq!(once, twice);
}

#[test]
fn alias_map_over_the_full_universe_is_symmetric_and_transitive() {
    let registry = registry();
    let aliases = build_alias_map(registry.commands());

    let group = &aliases["glDrawElementsBaseVertex"];
    assert_eq!(group.len(), 3);
    for member in group {
        assert_eq!(&aliases[member], group);
    }
    assert!(!aliases.contains_key("glViewport"));
}

#[test]
fn wgl_feature_sets_always_carry_the_extension_string_extensions() {
    let registry = registry();
    let backend = by_name("c").unwrap();

    let feature_set =
        registry.select("wgl", Version::new(1, 0), None, &BTreeSet::new()).unwrap();
    let fixed = backend.modify_feature_set(&registry, feature_set, &options(&[])).unwrap();

    assert!(fixed.has_extension("WGL_ARB_extensions_string"));
    assert!(fixed.has_extension("WGL_EXT_extensions_string"));
    assert!(fixed.command("wglGetExtensionsStringARB").is_some());
}

#[test]
fn resolution_is_monotonic_across_the_fixture_versions() {
    let registry = registry();
    let mut previous: BTreeSet<String> = BTreeSet::new();
    for minor in [Version::new(1, 0), Version::new(1, 5), Version::new(3, 2)] {
        let feature_set = registry.select("gl", minor, None, &BTreeSet::new()).unwrap();
        let names: BTreeSet<String> =
            feature_set.commands.iter().map(|c| c.name.clone()).collect();
        assert!(previous.is_subset(&names), "regression at {minor}");
        previous = names;
    }
}

#[test]
fn rendered_header_reflects_the_resolved_surface() {
    let registry = registry();
    let backend = by_name("c").unwrap();
    let options = options(&[]);

    let feature_set =
        registry.select("gl", Version::new(3, 2), Some("core"), &BTreeSet::new()).unwrap();
    let feature_set = backend.modify_feature_set(&registry, feature_set, &options).unwrap();
    let auxiliary = backend.auxiliary_data(&feature_set, &options);

    let mut renderer =
        Renderer::from_raw_templates(&[("gl.h", HEADER_TEMPLATE)]).unwrap();
    renderer.install_auxiliary(&auxiliary);
    let context = render_context(registry.name(), &feature_set, &options, &auxiliary);
    let header = renderer.render("gl.h", &context).unwrap();

    assert!(header.starts_with("// loader header for gl 3.2 (core)"));
    assert!(header.contains("void glViewport(GLint x, GLint y, GLsizei width, GLsizei height);"));
    assert!(header.contains("void * glMapBuffer(GLenum target, GLenum access);"));
    assert!(header.contains("#define GL_TEXTURE_2D 0x0DE1"));
    // removed by the core-profile deltas
    assert!(!header.contains("glBegin"));
    assert!(!header.contains("GL_QUADS"));
    // type dependency pulled in ahead of its dependents
    let khr = header.find("khrplatform.h").unwrap();
    let sizeiptr = header.find("GLsizeiptr").unwrap();
    assert!(khr < sizeiptr);
}

#[test]
fn rendered_source_lists_alias_groups_and_debug_wrappers() {
    let registry = registry();
    let backend = by_name("c").unwrap();
    let options = options(&[("ALIAS", "true"), ("DEBUG", "true")]);

    let feature_set =
        registry.select("gl", Version::new(3, 2), Some("core"), &BTreeSet::new()).unwrap();
    let feature_set = backend.modify_feature_set(&registry, feature_set, &options).unwrap();
    let auxiliary = backend.auxiliary_data(&feature_set, &options);

    let mut renderer =
        Renderer::from_raw_templates(&[("gl.c", SOURCE_TEMPLATE)]).unwrap();
    renderer.install_auxiliary(&auxiliary);
    let context = render_context(registry.name(), &feature_set, &options, &auxiliary);
    let source = renderer.render("gl.c", &context).unwrap();

    assert!(source.contains(
        "// alias glDrawElementsBaseVertex: glDrawElementsBaseVertex, \
         glDrawElementsBaseVertexEXT, glDrawElementsBaseVertexOES"
    ));
    assert!(source.contains("// debug glViewport: \"glViewport\", (void*)glViewport, 4, arg0, arg1, arg2, arg3"));
}

#[test]
fn multi_context_rendering_strips_prefixes() {
    let registry = registry();
    let backend = by_name("c").unwrap();
    let options = options(&[("MX", "true")]);

    let feature_set =
        registry.select("gl", Version::new(1, 0), None, &BTreeSet::new()).unwrap();
    let feature_set = backend.modify_feature_set(&registry, feature_set, &options).unwrap();
    let auxiliary = backend.auxiliary_data(&feature_set, &options);

    let mut renderer =
        Renderer::from_raw_templates(&[("gl.h", HEADER_TEMPLATE)]).unwrap();
    renderer.install_auxiliary(&auxiliary);
    let context = render_context(registry.name(), &feature_set, &options, &auxiliary);
    let header = renderer.render("gl.h", &context).unwrap();

    assert!(header.contains("void context->Viewport(GLint x, GLint y, GLsizei width, GLsizei height);"));
}
