//! Per-command data for debug-instrumented builds.
//!
//! In a debug build every generated call goes through an indirection that
//! invokes a pre-call callback, the real entry point, and a post-call
//! callback. The templates need, per command: a parameter-list declaration
//! with synthesized positional names, the matching forwarding argument list,
//! the callback-registration arguments, and - for value-returning commands -
//! the capture/return statements.

use serde::Serialize;

use super::to_c_type;
use crate::registry::Command;

/// The derived debug-wrapping strings for one command.
///
/// For a `void`-returning command the three `ret_*` fields are empty,
/// signaling "no value capture" to the template layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DebugArguments {
    /// Parameter-list declaration, e.g. `GLenum arg0, GLfloat arg1`
    pub params: String,
    /// Forwarding argument list, e.g. `arg0, arg1`
    pub args: String,
    /// Callback-registration arguments: display name, address of the real
    /// implementation, parameter count, forwarding arguments
    pub callback: String,
    /// Temporary declaration, e.g. `GLuint ret;`
    pub ret_decl: String,
    /// Assignment prefix, e.g. `ret = `
    pub ret_assign: String,
    /// Return statement, e.g. `return ret;`
    pub ret_return: String,
}

/// Derives the debug-wrapping strings for one command.
///
/// `code_name` is the symbol the wrapper forwards to; it defaults to the
/// command's own name.
#[must_use]
pub fn debug_arguments(command: &Command, code_name: Option<&str>) -> DebugArguments {
    let code_name = code_name.unwrap_or(&command.name);

    let params = command
        .params
        .iter()
        .enumerate()
        .map(|(position, param)| format!("{} arg{position}", to_c_type(&param.type_text)))
        .collect::<Vec<_>>()
        .join(", ");

    let args = (0..command.params.len())
        .map(|position| format!("arg{position}"))
        .collect::<Vec<_>>()
        .join(", ");

    let callback = [
        format!("\"{}\"", command.name),
        format!("(void*){code_name}"),
        command.params.len().to_string(),
        args.clone(),
    ]
    .into_iter()
    .filter(|part| !part.is_empty())
    .collect::<Vec<_>>()
    .join(", ");

    let mut derived = DebugArguments { params, args, callback, ..DebugArguments::default() };

    // case-insensitive because the Windows registry spells the sentinel VOID
    let ret = to_c_type(&command.ret);
    if !ret.eq_ignore_ascii_case("void") {
        derived.ret_decl = format!("{ret} ret;");
        derived.ret_assign = "ret = ".to_string();
        derived.ret_return = "return ret;".to_string();
    }

    derived
}
