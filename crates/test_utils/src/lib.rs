#![allow(clippy::option_if_let_else)]

//! Shared helpers for Prism tests: tracing setup, fixture discovery and a small
//! incremental project wrapper around the semantic database.

use std::path::{Path, PathBuf};
use std::sync::Once;

use anyhow::{bail, Context};
use once_cell::sync::Lazy;
use prism_compiler_parser::SourceFile;
use prism_compiler_semantic::{
    project_compilation, Compilation, CompilationOptions, Project, SemanticDatabaseImpl, Symbol,
};
use salsa::Setter;
use tracing_subscriber::EnvFilter;

const FIXTURE_EXTENSION: &str = "cs";

pub(crate) static WORKSPACE_ROOT: Lazy<PathBuf> = Lazy::new(|| {
    let mut current = PathBuf::from(env!("CARGO_MANIFEST_DIR"));

    loop {
        if current.join("Cargo.toml").exists() {
            let cargo_toml = std::fs::read_to_string(current.join("Cargo.toml"))
                .expect("Failed to read Cargo.toml");
            if cargo_toml.contains("[workspace]") {
                return current;
            }
        }

        current = current
            .parent()
            .expect("Could not find workspace root")
            .to_path_buf();
    }
});

static TRACING: Once = Once::new();

/// Installs a test-writer subscriber filtered by `RUST_LOG`. Safe to call from
/// every test.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

pub fn test_data_path() -> PathBuf {
    WORKSPACE_ROOT.join("test_data")
}

/// Path of a fixture relative to `test_data`, e.g. `"attributes/config.cs"`.
pub fn fixture_path(name: &str) -> PathBuf {
    test_data_path().join(name)
}

pub fn read_fixture(name: &str) -> String {
    let path = fixture_path(name);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture '{}': {}", path.display(), e))
}

pub fn fixture_exists(name: &str) -> bool {
    fixture_path(name).exists()
}

/// Relative paths of every `.cs` fixture, sorted.
pub fn discover_all_fixtures() -> Vec<String> {
    let test_data = test_data_path();
    let mut fixtures = Vec::new();
    discover_fixtures_recursive(&test_data, &test_data, &mut fixtures);
    fixtures.sort();
    fixtures
}

fn discover_fixtures_recursive(base_path: &Path, current_path: &Path, fixtures: &mut Vec<String>) {
    if let Ok(entries) = std::fs::read_dir(current_path) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                discover_fixtures_recursive(base_path, &path, fixtures);
            } else if path.extension().and_then(|s| s.to_str()) == Some(FIXTURE_EXTENSION) {
                if let Ok(relative_path) = path.strip_prefix(base_path) {
                    fixtures.push(relative_path.to_string_lossy().replace('\\', "/"));
                }
            }
        }
    }
}

/// Binds a single in-memory file called `test.cs`.
pub fn compile(source: &str) -> Compilation {
    compile_files(&[("test.cs", source)])
}

pub fn compile_files(files: &[(&str, &str)]) -> Compilation {
    Compilation::from_sources(files.iter().copied(), CompilationOptions::default())
}

/// Binds one fixture, failing on parse or binding errors.
pub fn compile_fixture(name: &str) -> anyhow::Result<Compilation> {
    let path = fixture_path(name);
    let text = std::fs::read_to_string(&path)
        .with_context(|| format!("reading fixture {}", path.display()))?;
    let compilation = Compilation::from_sources([(name, text.as_str())], CompilationOptions::default());
    if let Some(diagnostic) = compilation.diagnostics().first() {
        bail!("fixture {name} does not compile cleanly: {diagnostic:?}");
    }
    Ok(compilation)
}

/// Looks a type up by metadata name, e.g. ``"Acme.Box`1"``.
pub fn type_symbol(compilation: &Compilation, metadata_name: &str) -> anyhow::Result<Symbol> {
    compilation
        .get_type_by_metadata_name(metadata_name)
        .with_context(|| format!("type {metadata_name} not found"))
}

/// A project held in a salsa database, for tests that edit files and observe the
/// rebound compilation.
pub struct TestProject {
    db: SemanticDatabaseImpl,
    project: Project,
    files: Vec<SourceFile>,
}

impl TestProject {
    pub fn new(files: &[(&str, &str)]) -> Self {
        let db = SemanticDatabaseImpl::default();
        let files: Vec<_> = files
            .iter()
            .map(|(path, text)| SourceFile::new(&db, text.to_string(), path.to_string()))
            .collect();
        let project = Project::new(&db, files.clone(), CompilationOptions::default());
        Self { db, project, files }
    }

    pub fn compilation(&self) -> Compilation {
        project_compilation(&self.db, self.project).clone()
    }

    /// Replaces the text of the file at `path`.
    pub fn edit(&mut self, path: &str, text: &str) -> anyhow::Result<()> {
        let Some(&file) = self
            .files
            .iter()
            .find(|file| file.file_path(&self.db) == path)
        else {
            bail!("no file {path} in the project");
        };
        file.set_text(&mut self.db).to(text.to_string());
        Ok(())
    }
}
