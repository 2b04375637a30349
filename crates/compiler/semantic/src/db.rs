use prism_compiler_parser::{parse_file, Db as ParserDb, SourceFile, Upcast};

use crate::compilation::Compilation;
use crate::options::CompilationOptions;

/// Database trait for semantic analysis, extending the parser database.
#[salsa::db]
pub trait SemanticDb: ParserDb + Upcast<dyn ParserDb> {}

#[salsa::db]
#[derive(Clone, Default)]
pub struct SemanticDatabaseImpl {
    storage: salsa::Storage<Self>,
}

#[salsa::db]
impl salsa::Database for SemanticDatabaseImpl {}

#[salsa::db]
impl ParserDb for SemanticDatabaseImpl {}

#[salsa::db]
impl SemanticDb for SemanticDatabaseImpl {}

impl Upcast<dyn ParserDb> for SemanticDatabaseImpl {
    fn upcast(&self) -> &(dyn ParserDb + 'static) {
        self
    }

    fn upcast_mut(&mut self) -> &mut (dyn ParserDb + 'static) {
        self
    }
}

/// The source files and options of one compilation.
#[salsa::input(debug)]
pub struct Project {
    #[returns(ref)]
    pub files: Vec<SourceFile>,
    #[returns(ref)]
    pub options: CompilationOptions,
}

/// Binds every file of `project`. Files are parsed through [`parse_file`], so an
/// edit to one file re-parses only that file before rebinding.
#[salsa::tracked(returns(ref), no_eq)]
pub fn project_compilation(db: &dyn SemanticDb, project: Project) -> Compilation {
    let _span = tracing::trace_span!("project_compilation", files = project.files(db).len()).entered();

    let parser_db = db.upcast();
    let files = project.files(db).iter().map(|&file| {
        let path = file.file_path(parser_db).as_str();
        (path.to_string(), parse_file(parser_db, file).clone())
    });
    Compilation::new(files, project.options(db).clone())
}
