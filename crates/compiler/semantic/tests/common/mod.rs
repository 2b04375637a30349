//! Shared test infrastructure: a salsa test database and compilation helpers.

use prism_compiler_diagnostics::build_diagnostic_message;
use prism_compiler_parser::{Db as ParserDb, SourceFile, Upcast};
use prism_compiler_semantic::{project_compilation, Compilation, CompilationOptions, Project, SemanticDb, Symbol};

#[salsa::db]
#[derive(Clone, Default)]
pub struct TestDb {
    storage: salsa::Storage<Self>,
}

#[salsa::db]
impl salsa::Database for TestDb {}
#[salsa::db]
impl ParserDb for TestDb {}
#[salsa::db]
impl SemanticDb for TestDb {}

impl Upcast<dyn ParserDb> for TestDb {
    fn upcast(&self) -> &(dyn ParserDb + 'static) {
        self
    }
    fn upcast_mut(&mut self) -> &mut (dyn ParserDb + 'static) {
        self
    }
}

/// Binds `(path, text)` files through the `project_compilation` query.
pub fn compile_with(files: &[(&str, &str)], options: CompilationOptions) -> Compilation {
    let db = TestDb::default();
    let sources = files
        .iter()
        .map(|(path, text)| SourceFile::new(&db, text.to_string(), path.to_string()))
        .collect();
    let project = Project::new(&db, sources, options);
    project_compilation(&db, project).clone()
}

pub fn compile_files(files: &[(&str, &str)]) -> Compilation {
    compile_with(files, CompilationOptions::default())
}

pub fn compile(source: &str) -> Compilation {
    compile_files(&[("test.cs", source)])
}

/// Compiles `source` and fails with rendered diagnostics if there are any.
#[track_caller]
pub fn compile_ok(source: &str) -> Compilation {
    let compilation = compile(source);
    assert!(
        compilation.diagnostics().is_empty(),
        "expected no diagnostics, got:\n{}",
        format_diagnostics(source, &compilation)
    );
    compilation
}

pub fn format_diagnostics(source: &str, compilation: &Compilation) -> String {
    compilation
        .diagnostics()
        .iter()
        .map(|diagnostic| build_diagnostic_message(source, diagnostic, false))
        .collect::<Vec<_>>()
        .join("\n")
}

#[track_caller]
pub fn type_named(compilation: &Compilation, metadata_name: &str) -> Symbol {
    compilation
        .get_type_by_metadata_name(metadata_name)
        .unwrap_or_else(|| panic!("no type named {metadata_name}"))
}

#[track_caller]
pub fn member(symbol: &Symbol, name: &str) -> Symbol {
    symbol
        .get_members(name)
        .into_iter()
        .next()
        .unwrap_or_else(|| panic!("{symbol} has no member named {name}"))
}
