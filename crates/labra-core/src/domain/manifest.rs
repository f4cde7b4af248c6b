//! Task manifest (`package.json`) at the project root.
//!
//! Only `scripts` is interpreted. Everything else is kept as parsed, in its
//! original order, and written back unchanged.

use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::domain::error::DomainError;
use crate::domain::package_manager::PackageManager;

pub const MANIFEST_FILE: &str = "package.json";

/// Dev dependency that runs backend and frontend side by side.
pub const CONCURRENCY_HELPER: &str = "concurrently";

pub const START_SCRIPT: &str = "start";
pub const START_BACKEND_SCRIPT: &str = "start:backend";
pub const START_FRONTEND_SCRIPT: &str = "start:frontend";

/// The three scripts `labractl start` relies on, in insertion order.
pub fn launch_scripts(pm: PackageManager) -> [(&'static str, String); 3] {
    [
        (
            START_SCRIPT,
            format!(
                "{CONCURRENCY_HELPER} \"{}\" \"{}\"",
                pm.script_invocation(START_BACKEND_SCRIPT),
                pm.script_invocation(START_FRONTEND_SCRIPT)
            ),
        ),
        (
            START_BACKEND_SCRIPT,
            "cd src/app && go run main.go start".to_owned(),
        ),
        (
            START_FRONTEND_SCRIPT,
            format!("cd src/admin && {}", pm.script_invocation("dev")),
        ),
    ]
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskManifest {
    document: Map<String, Value>,
    scripts: IndexMap<String, String>,
}

impl TaskManifest {
    pub fn parse(text: &str) -> Result<Self, DomainError> {
        let invalid = |reason: String| DomainError::InvalidManifest { reason };

        let value: Value = serde_json::from_str(text).map_err(|e| invalid(e.to_string()))?;
        let Value::Object(document) = value else {
            return Err(invalid("top-level value is not an object".into()));
        };

        let scripts = match document.get("scripts") {
            None | Some(Value::Null) => IndexMap::new(),
            Some(raw) => serde_json::from_value(raw.clone())
                .map_err(|e| invalid(format!("\"scripts\": {e}")))?,
        };

        Ok(Self { document, scripts })
    }

    pub fn scripts(&self) -> &IndexMap<String, String> {
        &self.scripts
    }

    /// Insert every script that is not already present. Existing values are
    /// never touched. Returns the names that were inserted.
    pub fn ensure_scripts<I, K, V>(&mut self, required: I) -> Vec<String>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut inserted = Vec::new();
        for (name, command) in required {
            let name = name.into();
            if !self.scripts.contains_key(&name) {
                self.scripts.insert(name.clone(), command.into());
                inserted.push(name);
            }
        }
        inserted
    }

    /// Whether `name` is declared under `dependencies` or `devDependencies`.
    pub fn has_dependency(&self, name: &str) -> bool {
        ["dependencies", "devDependencies"].iter().any(|section| {
            self.document
                .get(*section)
                .and_then(Value::as_object)
                .is_some_and(|deps| deps.contains_key(name))
        })
    }

    /// Pretty-printed JSON (two-space indent, trailing newline).
    pub fn to_json_pretty(&self) -> Result<String, DomainError> {
        let mut document = self.document.clone();
        let scripts = serde_json::to_value(&self.scripts).map_err(|e| {
            DomainError::InvalidManifest {
                reason: e.to_string(),
            }
        })?;
        document.insert("scripts".into(), scripts);

        let mut out = serde_json::to_string_pretty(&Value::Object(document)).map_err(|e| {
            DomainError::InvalidManifest {
                reason: e.to_string(),
            }
        })?;
        out.push('\n');
        Ok(out)
    }
}
