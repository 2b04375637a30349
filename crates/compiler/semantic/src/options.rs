//! Compilation options, loadable from the `[compilation]` table of a TOML manifest.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// How nullable annotations on reference types are interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NullableContext {
    /// `T` is not-annotated and `T?` is annotated.
    #[default]
    Enable,
    /// Nullability is oblivious except for explicit `T?`.
    Disable,
    /// Annotations are recorded, warnings are not produced.
    Annotations,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompilationOptions {
    pub name: String,
    pub nullable: NullableContext,
    /// Whether the embedded `System` declarations are part of the compilation.
    pub include_core_library: bool,
    /// Prefix of fully qualified display strings.
    pub global_prefix: String,
}

impl Default for CompilationOptions {
    fn default() -> Self {
        Self {
            name: "prism".to_string(),
            nullable: NullableContext::default(),
            include_core_library: true,
            global_prefix: "global::".to_string(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum OptionsError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid compilation options: {0}")]
    Toml(#[from] toml::de::Error),
}

#[derive(Deserialize)]
struct Manifest {
    #[serde(default)]
    compilation: CompilationOptions,
}

impl CompilationOptions {
    /// Reads the `[compilation]` table of a manifest. Other tables are ignored and a
    /// missing table yields the defaults.
    pub fn from_toml_str(manifest: &str) -> Result<Self, OptionsError> {
        let manifest: Manifest = toml::from_str(manifest)?;
        Ok(manifest.compilation)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, OptionsError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| OptionsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn with_nullable(mut self, nullable: NullableContext) -> Self {
        self.nullable = nullable;
        self
    }

    pub fn without_core_library(mut self) -> Self {
        self.include_core_library = false;
        self
    }
}
