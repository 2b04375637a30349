//! # Compilation
//!
//! An immutable, fully bound set of source files. A [`Compilation`] is a cheap
//! handle: cloning it shares the bound data, and two handles are equal only when they
//! share it.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chumsky::span::SimpleSpan;
use index_vec::IndexVec;
use prism_compiler_diagnostics::{Diagnostic, LineIndex, Location};
use prism_compiler_parser::{parse_text, Parse, SyntaxNode, TextRange};
use rowan::{GreenNode, NodeOrToken};
use rustc_hash::FxHashMap;

use crate::binder;
use crate::core_library::{CORE_LIBRARY, CORE_LIBRARY_PATH};
use crate::options::CompilationOptions;
use crate::special_type::SpecialType;
use crate::symbol::Symbol;
use crate::symbols::{
    DeclSite, FileIndex, NullableAnnotation, SymbolData, SymbolIndex, SymbolKind, SymbolRef,
    TypeKind,
};

static NEXT_COMPILATION_ID: AtomicU64 = AtomicU64::new(1);

pub(crate) struct FileData {
    pub path: Arc<str>,
    pub green: GreenNode,
    pub line_index: LineIndex,
    pub is_core: bool,
}

impl FileData {
    pub fn root(&self) -> SyntaxNode {
        SyntaxNode::new_root(self.green.clone())
    }
}

pub(crate) struct CompilationData {
    pub id: u64,
    pub options: CompilationOptions,
    pub files: IndexVec<FileIndex, FileData>,
    pub symbols: IndexVec<SymbolIndex, SymbolData>,
    pub global_namespace: SymbolIndex,
    pub types_by_metadata_name: FxHashMap<String, SymbolIndex>,
    pub symbols_by_site: FxHashMap<DeclSite, SymbolIndex>,
    pub special_types: FxHashMap<SpecialType, SymbolIndex>,
    pub diagnostics: Vec<Diagnostic>,
}

impl CompilationData {
    pub fn special(&self, special: SpecialType) -> Option<SymbolIndex> {
        self.special_types.get(&special).copied()
    }

    pub fn special_ref(&self, special: SpecialType) -> Option<SymbolRef> {
        self.special(special).map(SymbolRef::Declared)
    }

    pub fn special_type_of(&self, index: SymbolIndex) -> Option<SpecialType> {
        self.special_types
            .iter()
            .find(|(_, &candidate)| candidate == index)
            .map(|(&special, _)| special)
    }

    /// The node a declaration site points at.
    pub fn node_at(&self, site: &DeclSite) -> Option<SyntaxNode> {
        node_at(&self.files.get(site.file)?.root(), site)
    }

    pub fn type_kind(&self, reference: &SymbolRef) -> TypeKind {
        match reference {
            SymbolRef::Declared(index) | SymbolRef::Constructed { definition: index, .. } => self
                .symbols[*index]
                .type_kind
                .unwrap_or(TypeKind::Error),
            SymbolRef::Array { .. } => TypeKind::Array,
            SymbolRef::Error { .. } => TypeKind::Error,
        }
    }

    pub fn is_value_type(&self, reference: &SymbolRef) -> bool {
        matches!(self.type_kind(reference), TypeKind::Struct | TypeKind::Enum)
    }

    pub fn is_reference_type(&self, reference: &SymbolRef) -> bool {
        matches!(
            self.type_kind(reference),
            TypeKind::Class | TypeKind::Interface | TypeKind::Delegate | TypeKind::Array
        )
    }

    /// `definition` applied to `arguments`. A generic definition applied to its own
    /// type parameters, in order, is the definition itself.
    pub fn constructed(&self, definition: SymbolIndex, arguments: Arc<[SymbolRef]>) -> SymbolRef {
        let own = &self.symbols[definition].type_parameters;
        let is_self = own.len() == arguments.len()
            && own
                .iter()
                .zip(arguments.iter())
                .all(|(&parameter, argument)| *argument == SymbolRef::Declared(parameter));
        if is_self {
            SymbolRef::Declared(definition)
        } else {
            SymbolRef::Constructed {
                definition,
                arguments,
            }
        }
    }

    /// Replaces the type parameters of `owner` in `reference` with `arguments`.
    pub fn substitute(
        &self,
        reference: &SymbolRef,
        owner: SymbolIndex,
        arguments: &[SymbolRef],
    ) -> SymbolRef {
        match reference {
            SymbolRef::Declared(index) => {
                let symbol = &self.symbols[*index];
                if symbol.kind == SymbolKind::TypeParameter && symbol.containing == Some(owner) {
                    if let Some(argument) = arguments.get(symbol.ordinal) {
                        return argument.clone();
                    }
                }
                reference.clone()
            }
            SymbolRef::Constructed {
                definition,
                arguments: inner,
            } => self.constructed(
                *definition,
                inner
                    .iter()
                    .map(|argument| self.substitute(argument, owner, arguments))
                    .collect(),
            ),
            SymbolRef::Array { element, rank } => SymbolRef::Array {
                element: Arc::new(self.substitute(element, owner, arguments)),
                rank: *rank,
            },
            SymbolRef::Error { .. } => reference.clone(),
        }
    }

    /// Resolves `reference` as seen through the type arguments of `through`.
    pub fn substitute_through(&self, reference: &SymbolRef, through: &SymbolRef) -> SymbolRef {
        match through {
            SymbolRef::Constructed {
                definition,
                arguments,
            } => self.substitute(reference, *definition, arguments),
            _ => reference.clone(),
        }
    }

    pub fn location(&self, site: &DeclSite, range: TextRange) -> Option<Location> {
        let file = self.files.get(site.file)?;
        Some(Location::new(file.path.clone(), span(range), &file.line_index))
    }
}

pub(crate) fn span(range: TextRange) -> SimpleSpan<usize> {
    SimpleSpan::from(usize::from(range.start())..usize::from(range.end()))
}

pub(crate) fn node_at(root: &SyntaxNode, site: &DeclSite) -> Option<SyntaxNode> {
    if !root.text_range().contains_range(site.range) {
        return None;
    }
    let start = match root.covering_element(site.range) {
        NodeOrToken::Node(node) => node,
        NodeOrToken::Token(token) => token.parent()?,
    };
    start
        .ancestors()
        .find(|node| node.kind() == site.kind && node.text_range() == site.range)
}

/// A handle on a bound set of source files.
#[derive(Clone)]
pub struct Compilation {
    data: Arc<CompilationData>,
}

impl Compilation {
    /// Binds already parsed files. Parse diagnostics are carried over.
    pub fn new<P: Into<Arc<str>>>(
        files: impl IntoIterator<Item = (P, Parse)>,
        options: CompilationOptions,
    ) -> Self {
        let id = NEXT_COMPILATION_ID.fetch_add(1, Ordering::Relaxed);
        let _span = tracing::trace_span!("bind_compilation", id, name = %options.name).entered();

        let mut diagnostics = Vec::new();
        let mut file_data = IndexVec::new();
        if options.include_core_library {
            file_data.push(file_data_for(CORE_LIBRARY_PATH.into(), &CORE_LIBRARY, true));
        }
        for (path, parse) in files {
            let path: Arc<str> = path.into();
            diagnostics.extend(
                parse
                    .diagnostics()
                    .iter()
                    .map(|d| d.clone().with_file(path.clone())),
            );
            file_data.push(file_data_for(path, &parse, false));
        }

        let data = binder::bind(id, file_data, options, diagnostics);
        Self {
            data: Arc::new(data),
        }
    }

    /// Parses and binds `(path, text)` pairs.
    pub fn from_sources<'a>(
        sources: impl IntoIterator<Item = (&'a str, &'a str)>,
        options: CompilationOptions,
    ) -> Self {
        Self::new(
            sources
                .into_iter()
                .map(|(path, text)| (path, parse_text(text))),
            options,
        )
    }

    pub(crate) fn data(&self) -> &CompilationData {
        &self.data
    }

    pub fn id(&self) -> u64 {
        self.data.id
    }

    pub fn options(&self) -> &CompilationOptions {
        &self.data.options
    }

    /// Parse and binding diagnostics of the source files.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.data.diagnostics
    }

    pub fn global_namespace(&self) -> Symbol {
        self.symbol(SymbolRef::Declared(self.data.global_namespace))
    }

    pub fn symbol(&self, reference: SymbolRef) -> Symbol {
        Symbol::new(self.clone(), reference, NullableAnnotation::None)
    }

    /// Looks a type up by metadata name: `Ns.Name`, `` Ns.Generic`1 ``, `Ns.Outer+Inner`.
    pub fn get_type_by_metadata_name(&self, metadata_name: &str) -> Option<Symbol> {
        self.data
            .types_by_metadata_name
            .get(metadata_name)
            .map(|&index| self.symbol(SymbolRef::Declared(index)))
    }

    pub fn special_type(&self, special: SpecialType) -> Option<Symbol> {
        self.data
            .special(special)
            .map(|index| self.symbol(SymbolRef::Declared(index)))
    }

    /// The symbol declared by `node`, if `node` is a declaration in one of this
    /// compilation's trees.
    pub fn declared_symbol(&self, node: &SyntaxNode) -> Option<Symbol> {
        let root = node.ancestors().last()?;
        let green = root.green();
        let file = self
            .data
            .files
            .iter_enumerated()
            .find(|(_, file)| std::ptr::eq(&*green, &*file.green))
            .map(|(index, _)| index)?;
        let site = DeclSite {
            file,
            kind: node.kind(),
            range: node.text_range(),
        };
        self.data
            .symbols_by_site
            .get(&site)
            .map(|&index| self.symbol(SymbolRef::Declared(index)))
    }

    /// Roots of the source files, core library excluded, with their paths.
    pub fn syntax_trees(&self) -> Vec<(Arc<str>, SyntaxNode)> {
        self.data
            .files
            .iter()
            .filter(|file| !file.is_core)
            .map(|file| (file.path.clone(), file.root()))
            .collect()
    }

    pub fn syntax_tree(&self, path: &str) -> Option<SyntaxNode> {
        self.data
            .files
            .iter()
            .find(|file| &*file.path == path)
            .map(FileData::root)
    }

    /// Named types declared in source files, nested types included, in declaration
    /// order.
    pub fn source_types(&self) -> Vec<Symbol> {
        self.data
            .symbols
            .iter_enumerated()
            .filter(|(_, symbol)| {
                symbol.kind == SymbolKind::NamedType
                    && symbol
                        .declarations
                        .iter()
                        .any(|site| !self.data.files[site.file].is_core)
            })
            .map(|(index, _)| self.symbol(SymbolRef::Declared(index)))
            .collect()
    }
}

fn file_data_for(path: Arc<str>, parse: &Parse, is_core: bool) -> FileData {
    let text = parse.syntax_node().text().to_string();
    FileData {
        path,
        green: parse.green().clone(),
        line_index: LineIndex::new(&text),
        is_core,
    }
}

impl PartialEq for Compilation {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.data, &other.data)
    }
}

impl Eq for Compilation {}

impl std::hash::Hash for Compilation {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.data.id.hash(state);
    }
}

impl fmt::Debug for Compilation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Compilation")
            .field("id", &self.data.id)
            .field("name", &self.data.options.name)
            .field("files", &self.data.files.len())
            .field("symbols", &self.data.symbols.len())
            .finish()
    }
}
