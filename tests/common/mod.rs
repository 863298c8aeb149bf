//! Shared fixtures for integration tests.
//!
//! The fixture registry is a miniature but structurally faithful registry
//! document: a `gl` api with three versions (including a core-profile
//! removal), alias chains across extensions, and a `wgl` api with the
//! extension-string extensions the fix-up pass injects.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

pub const FIXTURE_REGISTRY: &str = r#"
<registry>
    <types>
        <type name="khrplatform">#include &lt;KHR/khrplatform.h&gt;</type>
        <type>typedef unsigned int <name>GLenum</name>;</type>
        <type>typedef int <name>GLint</name>;</type>
        <type>typedef int <name>GLsizei</name>;</type>
        <type requires="khrplatform">typedef ptrdiff_t <name>GLsizeiptr</name>;</type>
        <type requires="khrplatform">typedef ptrdiff_t <name>GLintptr</name>;</type>
        <type>typedef void *<name>HGLRC</name>;</type>
    </types>
    <enums group="PrimitiveType">
        <enum value="0x0007" name="GL_QUADS"/>
    </enums>
    <enums>
        <enum value="0x0DE1" name="GL_TEXTURE_2D" group="TextureTarget"/>
        <enum value="0x92E0" name="GL_DEBUG_OUTPUT"/>
    </enums>
    <commands>
        <command>
            <proto>void <name>glViewport</name></proto>
            <param><ptype>GLint</ptype> <name>x</name></param>
            <param><ptype>GLint</ptype> <name>y</name></param>
            <param><ptype>GLsizei</ptype> <name>width</name></param>
            <param><ptype>GLsizei</ptype> <name>height</name></param>
        </command>
        <command>
            <proto>void <name>glBegin</name></proto>
            <param><ptype>GLenum</ptype> <name>mode</name></param>
        </command>
        <command>
            <proto>void <name>glBufferData</name></proto>
            <param><ptype>GLenum</ptype> <name>target</name></param>
            <param><ptype>GLsizeiptr</ptype> <name>size</name></param>
            <param>const void *<name>data</name></param>
            <param><ptype>GLenum</ptype> <name>usage</name></param>
        </command>
        <command>
            <proto>void *<name>glMapBuffer</name></proto>
            <param><ptype>GLenum</ptype> <name>target</name></param>
            <param><ptype>GLenum</ptype> <name>access</name></param>
        </command>
        <command>
            <proto>void <name>glDrawElementsBaseVertex</name></proto>
            <param><ptype>GLenum</ptype> <name>mode</name></param>
            <param><ptype>GLsizei</ptype> <name>count</name></param>
        </command>
        <command>
            <proto>void <name>glDrawElementsBaseVertexEXT</name></proto>
            <param><ptype>GLenum</ptype> <name>mode</name></param>
            <param><ptype>GLsizei</ptype> <name>count</name></param>
            <alias name="glDrawElementsBaseVertex"/>
        </command>
        <command>
            <proto>void <name>glDrawElementsBaseVertexOES</name></proto>
            <param><ptype>GLenum</ptype> <name>mode</name></param>
            <param><ptype>GLsizei</ptype> <name>count</name></param>
            <alias name="glDrawElementsBaseVertex"/>
        </command>
        <command>
            <proto><ptype>HGLRC</ptype> <name>wglCreateContext</name></proto>
        </command>
        <command>
            <proto>const char *<name>wglGetExtensionsStringARB</name></proto>
        </command>
        <command>
            <proto>const char *<name>wglGetExtensionsStringEXT</name></proto>
        </command>
        <command>
            <proto>VOID <name>wglNotifySwap</name></proto>
        </command>
    </commands>
    <feature api="gl" name="GL_VERSION_1_0" number="1.0">
        <require>
            <type name="GLenum"/>
            <type name="GLint"/>
            <type name="GLsizei"/>
            <enum name="GL_QUADS"/>
            <enum name="GL_TEXTURE_2D"/>
            <command name="glViewport"/>
            <command name="glBegin"/>
        </require>
    </feature>
    <feature api="gl" name="GL_VERSION_1_5" number="1.5">
        <require>
            <type name="GLsizeiptr"/>
            <type name="GLintptr"/>
            <command name="glBufferData"/>
            <command name="glMapBuffer"/>
        </require>
    </feature>
    <feature api="gl" name="GL_VERSION_3_2" number="3.2">
        <require>
            <command name="glDrawElementsBaseVertex"/>
        </require>
        <remove profile="core">
            <enum name="GL_QUADS"/>
            <command name="glBegin"/>
        </remove>
    </feature>
    <feature api="wgl" name="WGL_VERSION_1_0" number="1.0">
        <require>
            <type name="HGLRC"/>
            <command name="wglCreateContext"/>
            <command name="wglNotifySwap"/>
        </require>
    </feature>
    <extensions>
        <extension name="GL_ARB_debug_output" supported="gl|glcore">
            <require>
                <enum name="GL_DEBUG_OUTPUT"/>
            </require>
        </extension>
        <extension name="GL_EXT_draw_elements_base_vertex" supported="gl|gles2">
            <require>
                <command name="glDrawElementsBaseVertexEXT"/>
            </require>
        </extension>
        <extension name="GL_OES_draw_elements_base_vertex" supported="gl|gles2">
            <require>
                <command name="glDrawElementsBaseVertexOES"/>
            </require>
        </extension>
        <extension name="WGL_ARB_extensions_string" supported="wgl">
            <require>
                <command name="wglGetExtensionsStringARB"/>
            </require>
        </extension>
        <extension name="WGL_EXT_extensions_string" supported="wgl">
            <require>
                <command name="wglGetExtensionsStringEXT"/>
            </require>
        </extension>
    </extensions>
</registry>
"#;

pub const HEADER_TEMPLATE: &str = "\
// loader header for {{ feature_set.api }} {{ feature_set.version.major }}.{{ feature_set.version.minor }}{% if feature_set.profile %} ({{ feature_set.profile }}){% endif %}
{% for type in feature_set.types %}{{ type.raw }}
{% endfor %}{% for enum in feature_set.enums %}#define {{ enum.name }} {{ enum.value }}
{% endfor %}{% for command in feature_set.commands %}{{ command.ret | c_type }} {{ ctx(name=command.name) }}({{ command.params | c_params }});
{% endfor %}";

pub const SOURCE_TEMPLATE: &str = "\
// {{ registry }} loader implementation
{% for command in feature_set.commands %}{% if options.DEBUG %}{% set d = debug_impl(command=command) %}// debug {{ command.name }}: {{ d.callback }}
{% endif %}{% endfor %}{% for name, group in aliases %}// alias {{ name }}: {{ group | join(sep=\", \") }}
{% endfor %}";

/// Writes the fixture registry as `gl.xml` under `dir` and returns its path.
pub fn write_registry(dir: &Path) -> PathBuf {
    let path = dir.join("gl.xml");
    fs::write(&path, FIXTURE_REGISTRY).unwrap();
    path
}

/// Writes a minimal template set under `dir/templates` and returns the
/// directory.
pub fn write_templates(dir: &Path) -> PathBuf {
    let templates = dir.join("templates");
    fs::create_dir_all(&templates).unwrap();
    fs::write(templates.join("gl.h"), HEADER_TEMPLATE).unwrap();
    fs::write(templates.join("gl.c"), SOURCE_TEMPLATE).unwrap();
    fs::write(templates.join("header_only.h"), HEADER_TEMPLATE).unwrap();
    templates
}
