//! `.env` files written into a freshly cloned project.

use std::path::{Path, PathBuf};

use crate::domain::database::DatabaseSettings;
use crate::domain::project::ProjectContext;

/// Port the Go backend listens on; the frontend URLs point at it.
pub const BACKEND_PORT: u16 = 4001;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvEntry {
    pub key: &'static str,
    pub value: String,
    pub quoted: bool,
}

/// A dotenv file: optional header comment, then blank-line separated groups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvFile {
    path: PathBuf,
    header: Option<&'static str>,
    groups: Vec<Vec<EnvEntry>>,
}

fn plain(key: &'static str, value: impl Into<String>) -> EnvEntry {
    EnvEntry {
        key,
        value: value.into(),
        quoted: false,
    }
}

fn quoted(key: &'static str, value: impl Into<String>) -> EnvEntry {
    EnvEntry {
        key,
        value: value.into(),
        quoted: true,
    }
}

impl EnvFile {
    /// `src/app/.env` for the Go backend.
    pub fn backend(ctx: &ProjectContext, database: &DatabaseSettings) -> Self {
        let schema = ctx.schema_dir();
        Self {
            path: ctx.backend_env_file(),
            header: Some("# LabraGo Environment"),
            groups: vec![
                vec![
                    plain("SERVER_PORT", BACKEND_PORT.to_string()),
                    plain("SECRET_KEY", "supersecretdevkey"),
                ],
                vec![
                    plain("DSN", database.dsn(ctx.name())),
                    plain("DB_DIALECT", "postgres"),
                ],
                vec![plain("ENT_SCHEMA_PATH", schema.display().to_string())],
                vec![
                    plain("CENTRIFUGO_API_ADDRESS", "http://localhost:8000"),
                    plain("CENTRIFUGO_API_KEY", "secretkey"),
                ],
            ],
        }
    }

    /// `src/admin/.env` for the Next.js frontend.
    pub fn frontend(ctx: &ProjectContext) -> Self {
        let http = format!("http://localhost:{BACKEND_PORT}");
        let ws = format!("ws://localhost:{BACKEND_PORT}");
        Self {
            path: ctx.frontend_env_file(),
            header: None,
            groups: vec![vec![
                quoted("NEXT_PUBLIC_BRAND_PRODUCT_NAME", "Labra\u{b7}GO"),
                quoted("NEXT_PUBLIC_BRAND_COLOR", "blue"),
                quoted("NEXT_PUBLIC_GRAPHQL_API_URL", http.clone()),
                quoted("NEXT_PUBLIC_GRAPHQL_QUERY_API_URL", format!("{http}/query")),
                quoted(
                    "NEXT_PUBLIC_GRAPHQL_QUERY_SUBSCRIPTION_URL",
                    format!("{ws}/query"),
                ),
                quoted(
                    "NEXT_PUBLIC_GRAPHQL_QUERY_PLAYGROUND_URL",
                    format!("{http}/playground"),
                ),
                quoted("NEXT_PUBLIC_GRAPHQL_ENTITY_API_URL", format!("{http}/entity")),
                quoted(
                    "NEXT_PUBLIC_GRAPHQL_ENTITY_PLAYGROUND_URL",
                    format!("{http}/eplayground"),
                ),
            ]],
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries()
            .find(|e| e.key == key)
            .map(|e| e.value.as_str())
    }

    pub fn entries(&self) -> impl Iterator<Item = &EnvEntry> {
        self.groups.iter().flatten()
    }

    pub fn render(&self) -> String {
        let mut blocks = Vec::with_capacity(self.groups.len() + 1);
        if let Some(header) = self.header {
            blocks.push(header.to_owned());
        }
        for group in &self.groups {
            let lines: Vec<String> = group
                .iter()
                .map(|e| {
                    if e.quoted {
                        format!("{}=\"{}\"", e.key, e.value)
                    } else {
                        format!("{}={}", e.key, e.value)
                    }
                })
                .collect();
            blocks.push(lines.join("\n"));
        }
        let mut out = blocks.join("\n\n");
        out.push('\n');
        out
    }
}
