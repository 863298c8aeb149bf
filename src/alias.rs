//! Alias-group construction over commands.
//!
//! The registry stores aliasing as one-way pointers: a command may name a
//! single other command it is interchangeable with, and different commands
//! of one group point at different members. The symmetric, transitive
//! relation the templates need ("which entry points can populate this
//! function at runtime?") is recovered with a disjoint-set union keyed by
//! command name.
//!
//! The resulting [`AliasMap`] maps every member of a group of two or more to
//! the full group. Commands with no known alias are absent entirely - a
//! lookup miss means "nothing to unify", and templates can iterate the map
//! without filtering out trivial groups.
//!
//! # Examples
//!
//! ```rust
//! use gladgen::alias::build_alias_map;
//! use gladgen::registry::Command;
//!
//! let command = |name: &str, alias: Option<&str>| Command {
//!     name: name.to_string(),
//!     ret: "void".to_string(),
//!     params: Vec::new(),
//!     alias: alias.map(str::to_string),
//! };
//!
//! let commands = vec![
//!     command("glDrawArraysInstanced", None),
//!     command("glDrawArraysInstancedARB", Some("glDrawArraysInstanced")),
//!     command("glDrawArraysInstancedEXT", Some("glDrawArraysInstanced")),
//!     command("glViewport", None),
//! ];
//!
//! let aliases = build_alias_map(&commands);
//! assert_eq!(aliases["glDrawArraysInstanced"].len(), 3);
//! assert!(!aliases.contains_key("glViewport"));
//! ```

use petgraph::unionfind::UnionFind;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use tracing::debug;

use crate::registry::Command;

/// Mapping from command name to its full group of interchangeable commands.
///
/// Symmetric and transitive: if B is in `map[A]`, then A is in `map[B]` and
/// `map[A] == map[B]`. Singleton groups are not represented.
pub type AliasMap = BTreeMap<String, BTreeSet<String>>;

/// Builds the alias groups for a command universe.
///
/// Aliases are a property of the input universe: an alias target that is not
/// part of `commands` is dropped from the merge (the registry is known to
/// contain a few dangling pointers; they are tolerated, never an error).
#[must_use]
pub fn build_alias_map(commands: &[Command]) -> AliasMap {
    let index: HashMap<&str, usize> =
        commands.iter().enumerate().map(|(position, command)| (command.name.as_str(), position)).collect();

    let mut sets: UnionFind<usize> = UnionFind::new(commands.len());
    for (position, command) in commands.iter().enumerate() {
        let Some(alias) = command.alias.as_deref() else { continue };
        match index.get(alias) {
            Some(&target) => {
                sets.union(position, target);
            }
            None => {
                debug!(
                    command = %command.name,
                    alias,
                    "alias target is not part of the command universe, dropping"
                );
            }
        }
    }

    let labels = sets.into_labeling();
    let mut groups: HashMap<usize, BTreeSet<String>> = HashMap::new();
    for (position, command) in commands.iter().enumerate() {
        groups.entry(labels[position]).or_default().insert(command.name.clone());
    }

    let mut map = AliasMap::new();
    for group in groups.into_values() {
        if group.len() < 2 {
            continue;
        }
        for name in &group {
            map.insert(name.clone(), group.clone());
        }
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(name: &str, alias: Option<&str>) -> Command {
        Command {
            name: name.to_string(),
            ret: "void".to_string(),
            params: Vec::new(),
            alias: alias.map(str::to_string),
        }
    }

    fn group(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|name| (*name).to_string()).collect()
    }

    #[test]
    fn merges_chained_pointers_into_one_group() {
        // a -> b and c -> b: all three share one group even though no pair
        // (a, c) is declared anywhere.
        let commands = vec![
            command("a", Some("b")),
            command("b", None),
            command("c", Some("b")),
        ];
        let aliases = build_alias_map(&commands);
        let expected = group(&["a", "b", "c"]);
        assert_eq!(aliases["a"], expected);
        assert_eq!(aliases["b"], expected);
        assert_eq!(aliases["c"], expected);
    }

    #[test]
    fn merges_transitive_chains_regardless_of_declaration_order() {
        // c is declared before the command it points at.
        let commands = vec![
            command("c", Some("b")),
            command("b", Some("a")),
            command("a", None),
        ];
        let aliases = build_alias_map(&commands);
        assert_eq!(aliases["a"], group(&["a", "b", "c"]));
    }

    #[test]
    fn relation_is_symmetric_and_transitive() {
        let commands = vec![
            command("glFoo", Some("glFooARB")),
            command("glFooARB", None),
            command("glFooEXT", Some("glFoo")),
            command("glBar", Some("glBarNV")),
            command("glBarNV", None),
            command("glLonely", None),
        ];
        let aliases = build_alias_map(&commands);

        for (name, group) in &aliases {
            assert!(group.contains(name), "{name} missing from its own group");
            assert!(group.len() >= 2);
            for member in group {
                assert_eq!(&aliases[member], group, "{member} disagrees with {name}");
            }
        }
    }

    #[test]
    fn commands_without_aliases_are_absent() {
        let commands = vec![command("glViewport", None), command("glClear", None)];
        assert!(build_alias_map(&commands).is_empty());
    }

    #[test]
    fn dangling_alias_targets_are_dropped() {
        let commands = vec![
            command("glFoo", Some("glRemovedLongAgo")),
            command("glBar", None),
        ];
        let aliases = build_alias_map(&commands);
        assert!(aliases.is_empty(), "dangling target must not create a group: {aliases:?}");
    }

    #[test]
    fn separate_chains_stay_separate() {
        let commands = vec![
            command("a1", Some("a2")),
            command("a2", None),
            command("b1", Some("b2")),
            command("b2", None),
        ];
        let aliases = build_alias_map(&commands);
        assert_eq!(aliases["a1"], group(&["a1", "a2"]));
        assert_eq!(aliases["b1"], group(&["b1", "b2"]));
    }
}
