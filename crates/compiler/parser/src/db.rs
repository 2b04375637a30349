use crate::parser::{parse_text, Parse};

/// Database giving access to parsed source files.
#[salsa::db]
pub trait Db: salsa::Database {}

/// Trait for upcasting a reference to a base trait object.
pub trait Upcast<T: ?Sized> {
    fn upcast(&self) -> &T;
    fn upcast_mut(&mut self) -> &mut T;
}

#[salsa::db]
#[derive(Clone, Default)]
pub struct ParserDatabaseImpl {
    storage: salsa::Storage<Self>,
}

#[salsa::db]
impl salsa::Database for ParserDatabaseImpl {}

#[salsa::db]
impl Db for ParserDatabaseImpl {}

impl Upcast<dyn Db> for ParserDatabaseImpl {
    fn upcast(&self) -> &(dyn Db + 'static) {
        self
    }

    fn upcast_mut(&mut self) -> &mut (dyn Db + 'static) {
        self
    }
}

#[salsa::input(debug)]
pub struct SourceFile {
    #[returns(ref)]
    pub text: String,
    #[returns(ref)]
    pub file_path: String,
}

/// Parses a source file. Re-runs only when the file's text changes.
#[salsa::tracked(returns(ref), no_eq)]
pub fn parse_file(db: &dyn Db, file: SourceFile) -> Parse {
    let _span = tracing::trace_span!("parse_file", path = %file.file_path(db)).entered();
    parse_text(file.text(db))
}
