//! Read-only XML parsing for registry documents.
//!
//! The registry format encodes pointer and array syntax inline with entity
//! names (`void *<name>data</name>`, `<name>ids</name>[2]`), so prototype
//! parsing reconstructs three views of every declaration: the raw text, the
//! bare name, and the type text with the name removed but glued stars kept.
//!
//! Unknown elements and attributes are ignored for forward compatibility
//! with registry revisions; entities that cannot be named are skipped with a
//! debug log rather than failing the whole document.

use roxmltree::{Document, Node};
use std::collections::BTreeMap;
use tracing::debug;

use super::entity::{Command, Enumerant, Extension, Feature, Param, Requirement, TypeDef};
use super::Registry;
use crate::core::GladgenError;

pub(crate) fn parse_registry(name: &str, text: &str) -> Result<Registry, GladgenError> {
    let parse_error = |reason: String| GladgenError::RegistryParse {
        path: name.to_string(),
        reason,
    };

    let document = Document::parse(text).map_err(|error| parse_error(error.to_string()))?;
    let root = document.root_element();
    if root.tag_name().name() != "registry" {
        return Err(parse_error(format!(
            "expected a <registry> root element, found <{}>",
            root.tag_name().name()
        )));
    }

    let mut registry = Registry {
        name: name.to_string(),
        ..Registry::default()
    };
    let mut extensions = Vec::new();

    for node in root.children().filter(Node::is_element) {
        match node.tag_name().name() {
            "types" => {
                for type_node in elements(node, "type") {
                    if let Some(type_def) = parse_type(type_node) {
                        insert_type(&mut registry, type_def);
                    }
                }
            }
            "enums" => {
                let block_group = node.attribute("group").map(str::to_string);
                for enum_node in elements(node, "enum") {
                    if let Some(enumerant) = parse_enum(enum_node, block_group.as_deref()) {
                        insert_enum(&mut registry, enumerant);
                    }
                }
            }
            "commands" => {
                for command_node in elements(node, "command") {
                    if let Some(command) = parse_command(command_node) {
                        insert_command(&mut registry, command);
                    }
                }
            }
            "feature" => {
                let feature = parse_feature(node, &parse_error)?;
                registry.features.entry(feature.api.clone()).or_default().push(feature);
            }
            "extensions" => {
                for extension_node in elements(node, "extension") {
                    if let Some(extension) = parse_extension(extension_node) {
                        extensions.push(extension);
                    }
                }
            }
            _ => {}
        }
    }

    index_extensions(&mut registry, extensions);
    for chain in registry.features.values_mut() {
        chain.sort_by_key(|feature| feature.version);
    }

    Ok(registry)
}

fn elements<'a>(node: Node<'a, 'a>, name: &'static str) -> impl Iterator<Item = Node<'a, 'a>> {
    node.children().filter(move |child| child.is_element() && child.tag_name().name() == name)
}

/// Concatenated text content of an element and its descendants.
fn text_content(node: Node<'_, '_>) -> String {
    node.descendants()
        .filter(Node::is_text)
        .filter_map(|descendant| descendant.text())
        .collect()
}

/// Splits a prototype or parameter declaration into (raw, name, type text).
///
/// The name element's text contributes only its `*` characters to the type
/// text; everything else passes through unchanged.
fn decl_parts(node: Node<'_, '_>) -> (String, String, String) {
    let mut raw = String::new();
    let mut name = String::new();
    let mut type_text = String::new();

    for descendant in node.descendants().filter(Node::is_text) {
        let Some(text) = descendant.text() else { continue };
        raw.push_str(text);
        let in_name = descendant
            .parent()
            .is_some_and(|parent| parent.tag_name().name() == "name");
        if in_name {
            name.push_str(text);
            for _ in 0..text.matches('*').count() {
                type_text.push('*');
            }
        } else {
            type_text.push_str(text);
        }
    }

    (
        raw.trim().to_string(),
        name.trim_matches(|c: char| c == '*' || c.is_whitespace()).to_string(),
        type_text.trim().to_string(),
    )
}

fn parse_type(node: Node<'_, '_>) -> Option<TypeDef> {
    let name = node
        .attribute("name")
        .map(str::to_string)
        .or_else(|| elements(node, "name").next().map(text_content))?;
    Some(TypeDef {
        name,
        raw: text_content(node),
        requires: node.attribute("requires").map(str::to_string),
    })
}

fn parse_enum(node: Node<'_, '_>, block_group: Option<&str>) -> Option<Enumerant> {
    Some(Enumerant {
        name: node.attribute("name")?.to_string(),
        value: node.attribute("value").unwrap_or_default().to_string(),
        group: node
            .attribute("group")
            .or(block_group)
            .map(str::to_string),
    })
}

fn parse_command(node: Node<'_, '_>) -> Option<Command> {
    let proto = elements(node, "proto").next()?;
    let (_, name, ret) = decl_parts(proto);
    if name.is_empty() {
        debug!("skipping command prototype without a name");
        return None;
    }

    let params = elements(node, "param")
        .map(|param| {
            let (raw, name, type_text) = decl_parts(param);
            Param { raw, name, type_text }
        })
        .collect();

    Some(Command {
        name,
        ret,
        params,
        alias: elements(node, "alias")
            .next()
            .and_then(|alias| alias.attribute("name"))
            .map(str::to_string),
    })
}

fn parse_requirement(node: Node<'_, '_>) -> Requirement {
    let mut requirement = Requirement {
        api: node.attribute("api").map(str::to_string),
        profile: node.attribute("profile").map(str::to_string),
        ..Requirement::default()
    };
    for child in node.children().filter(Node::is_element) {
        let Some(name) = child.attribute("name") else { continue };
        match child.tag_name().name() {
            "type" => requirement.types.push(name.to_string()),
            "enum" => requirement.enums.push(name.to_string()),
            "command" => requirement.commands.push(name.to_string()),
            _ => {}
        }
    }
    requirement
}

fn parse_feature(
    node: Node<'_, '_>,
    parse_error: &impl Fn(String) -> GladgenError,
) -> Result<Feature, GladgenError> {
    let api = node
        .attribute("api")
        .ok_or_else(|| parse_error("<feature> is missing the 'api' attribute".to_string()))?;
    let name = node.attribute("name").unwrap_or_default();
    let number = node
        .attribute("number")
        .ok_or_else(|| parse_error(format!("feature '{name}' is missing the 'number' attribute")))?;
    let version = number
        .parse()
        .map_err(|_| parse_error(format!("feature '{name}' has invalid number '{number}'")))?;

    let mut feature = Feature {
        api: api.to_string(),
        name: name.to_string(),
        version,
        requires: Vec::new(),
        removes: Vec::new(),
    };
    for child in node.children().filter(Node::is_element) {
        match child.tag_name().name() {
            "require" => feature.requires.push(parse_requirement(child)),
            "remove" => feature.removes.push(parse_requirement(child)),
            _ => {}
        }
    }
    Ok(feature)
}

fn parse_extension(node: Node<'_, '_>) -> Option<Extension> {
    let name = node.attribute("name")?;
    Some(Extension {
        name: name.to_string(),
        supported: node
            .attribute("supported")
            .unwrap_or_default()
            .split('|')
            .filter(|token| !token.is_empty())
            .map(str::to_string)
            .collect(),
        requires: elements(node, "require").map(parse_requirement).collect(),
    })
}

/// Builds the per-api extension catalogs from the flat extension list.
///
/// The `glcore` supported token counts toward the `gl` api; the `disabled`
/// token selects nothing.
fn index_extensions(registry: &mut Registry, extensions: Vec<Extension>) {
    for extension in extensions {
        let mut apis: Vec<&str> = extension
            .supported
            .iter()
            .map(|token| if token == "glcore" { "gl" } else { token.as_str() })
            .filter(|token| *token != "disabled")
            .collect();
        apis.sort_unstable();
        apis.dedup();
        for api in apis {
            registry
                .extensions
                .entry(api.to_string())
                .or_insert_with(BTreeMap::new)
                .insert(extension.name.clone(), extension.clone());
        }
    }
}

fn insert_type(registry: &mut Registry, type_def: TypeDef) {
    if registry.type_index.contains_key(&type_def.name) {
        debug!(name = %type_def.name, "duplicate type definition, keeping the first");
        return;
    }
    registry.type_index.insert(type_def.name.clone(), registry.types.len());
    registry.types.push(type_def);
}

fn insert_enum(registry: &mut Registry, enumerant: Enumerant) {
    if registry.enum_index.contains_key(&enumerant.name) {
        debug!(name = %enumerant.name, "duplicate enumerant, keeping the first");
        return;
    }
    registry.enum_index.insert(enumerant.name.clone(), registry.enums.len());
    registry.enums.push(enumerant);
}

fn insert_command(registry: &mut Registry, command: Command) {
    if registry.command_index.contains_key(&command.name) {
        debug!(name = %command.name, "duplicate command, keeping the first");
        return;
    }
    registry.command_index.insert(command.name.clone(), registry.commands.len());
    registry.commands.push(command);
}
