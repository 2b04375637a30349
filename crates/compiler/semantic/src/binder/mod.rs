//! # Binding
//!
//! Turns parsed files into the symbol arena of a compilation in four passes:
//!
//! 1. **Declare**: walk namespaces and type bodies, creating symbols, merging
//!    namespaces and partial types, and synthesizing implicit members.
//! 2. **Signatures**: resolve base lists, enum underlying types and member types.
//! 3. **Constants**: evaluate enum member values and `const` fields.
//! 4. **Attributes**: bind attribute classes, constructors and arguments.

mod attributes;
mod constants;
mod declare;
mod scope;
mod signatures;

use std::sync::Arc;

use index_vec::IndexVec;
use prism_compiler_diagnostics::Diagnostic;
use prism_compiler_parser::SyntaxNode;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::compilation::{CompilationData, FileData};
use crate::options::CompilationOptions;
use crate::special_type::SpecialType;
use crate::symbols::{
    Accessibility, DeclSite, FileIndex, SymbolData, SymbolIndex, SymbolKind,
};

use scope::ImportCache;

pub(crate) fn bind(
    id: u64,
    files: IndexVec<FileIndex, FileData>,
    options: CompilationOptions,
    diagnostics: Vec<Diagnostic>,
) -> CompilationData {
    let mut symbols = IndexVec::new();
    let mut global = SymbolData::new(SymbolKind::Namespace, "", None);
    global.accessibility = Accessibility::Public;
    let global_namespace = symbols.push(global);

    let roots = files.iter().map(FileData::root).collect();
    let mut binder = Binder {
        data: CompilationData {
            id,
            options,
            files,
            symbols,
            global_namespace,
            types_by_metadata_name: FxHashMap::default(),
            symbols_by_site: FxHashMap::default(),
            special_types: FxHashMap::default(),
            diagnostics,
        },
        roots,
        imports: ImportCache::default(),
        evaluating: FxHashSet::default(),
    };

    let files: Vec<FileIndex> = binder.roots.indices().collect();
    for file in files {
        binder.declare_file(file);
    }
    binder.synthesize_constructors();
    binder.index_metadata_names();

    binder.bind_signatures();
    binder.bind_constants();
    binder.bind_attributes();

    // Lookups repeated per declaration site can report the same problem twice.
    let mut seen = FxHashSet::default();
    binder
        .data
        .diagnostics
        .retain(|diagnostic| seen.insert(diagnostic.clone()));

    tracing::debug!(
        symbols = binder.data.symbols.len(),
        diagnostics = binder.data.diagnostics.len(),
        "bound compilation"
    );
    binder.data
}

pub(super) struct Binder {
    data: CompilationData,
    roots: IndexVec<FileIndex, SyntaxNode>,
    imports: ImportCache,
    /// Constants whose evaluation is in progress.
    evaluating: FxHashSet<SymbolIndex>,
}

impl Binder {
    fn report(&mut self, file: FileIndex, diagnostic: Diagnostic) {
        let path: Arc<str> = self.data.files[file].path.clone();
        self.data.diagnostics.push(diagnostic.with_file(path));
    }

    fn push_symbol(&mut self, data: SymbolData) -> SymbolIndex {
        self.data.symbols.push(data)
    }

    /// Records `node` as a declaration of `symbol`. The first symbol recorded for a
    /// node keeps it.
    fn add_declaration(&mut self, symbol: SymbolIndex, file: FileIndex, node: &SyntaxNode) {
        let site = DeclSite {
            file,
            kind: node.kind(),
            range: node.text_range(),
        };
        self.data.symbols[symbol].declarations.push(site);
        self.data.symbols_by_site.entry(site).or_insert(symbol);
    }

    fn node(&self, site: &DeclSite) -> Option<SyntaxNode> {
        crate::compilation::node_at(&self.roots[site.file], site)
    }

    fn index_metadata_names(&mut self) {
        let global = self.data.global_namespace;
        self.index_container(global, String::new(), '.');
        for special in SpecialType::ALL {
            if let Some(&index) = self.data.types_by_metadata_name.get(special.metadata_name()) {
                self.data.special_types.insert(special, index);
            }
        }
    }

    fn index_container(&mut self, container: SymbolIndex, prefix: String, separator: char) {
        let members = self.data.symbols[container].members.clone();
        for member in members {
            let symbol = &self.data.symbols[member];
            let mut name = if prefix.is_empty() {
                symbol.name.to_string()
            } else {
                format!("{prefix}{separator}{}", symbol.name)
            };
            match symbol.kind {
                SymbolKind::Namespace => self.index_container(member, name, '.'),
                SymbolKind::NamedType => {
                    if symbol.arity() > 0 {
                        name.push_str(&format!("`{}", symbol.arity()));
                    }
                    self.data
                        .types_by_metadata_name
                        .entry(name.clone())
                        .or_insert(member);
                    self.index_container(member, name, '+');
                }
                _ => {}
            }
        }
    }
}
