//! Patch for the backend's `go.mod`.
//!
//! The template ships a placeholder comment where a local `replace` directive
//! belongs; swapping it in makes the backend build against the sibling `api`
//! module of the checkout instead of the published one.

pub const API_PLACEHOLDER: &str = "// REPLACE_LABRAGO_DEVELOPMENT_API";
pub const API_REPLACE_DIRECTIVE: &str = "replace github.com/GoLabra/labra/src/api => ../api";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModulePatch {
    Applied(String),
    /// Placeholder absent; the file is left untouched.
    AlreadyPatched,
}

/// Replace the first placeholder occurrence with the local replace directive.
pub fn patch_module_file(content: &str) -> ModulePatch {
    if content.contains(API_PLACEHOLDER) {
        ModulePatch::Applied(content.replacen(API_PLACEHOLDER, API_REPLACE_DIRECTIVE, 1))
    } else {
        ModulePatch::AlreadyPatched
    }
}
