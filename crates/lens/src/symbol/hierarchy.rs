//! Containing and base types, interfaces, generics and task-like detection.

use std::collections::VecDeque;

use prism_common::Validation;
use rustc_hash::FxHashSet;

use super::{OptionalSymbol, ValidSymbol};

/// Bound on base-type walks; a malformed hierarchy cannot loop forever.
const MAX_BASE_DEPTH: usize = 64;

const TASKS_NAMESPACE: &str = "System.Threading.Tasks";

impl ValidSymbol {
    pub fn containing_type(&self) -> OptionalSymbol {
        self.symbol.containing_type().into()
    }

    pub fn containing_symbol(&self) -> OptionalSymbol {
        self.symbol.containing_symbol().into()
    }

    pub fn base_type(&self) -> OptionalSymbol {
        self.symbol.base_type().into()
    }

    /// Directly implemented interfaces.
    pub fn interfaces(&self) -> Vec<ValidSymbol> {
        ValidSymbol::collect(self.symbol.interfaces())
    }

    /// Every interface implemented directly, through other interfaces or through
    /// base types, each once. Computed as the iterator advances.
    pub fn all_interfaces(&self) -> AllInterfaces {
        AllInterfaces {
            queue: self.interfaces().into(),
            bases: self.base_types(),
            seen: FxHashSet::default(),
        }
    }

    /// The base type, its base type and so on, nearest first.
    pub fn base_types(&self) -> BaseTypes {
        BaseTypes {
            next: self.base_type().validate(),
            depth: 0,
        }
    }

    /// Whether the symbol implements an interface called `name`.
    pub fn implements(&self, name: &str) -> bool {
        self.all_interfaces().any(|interface| interface.has_name(name))
    }

    /// Whether a base type, at any depth, is called `name`.
    pub fn inherits_from(&self, name: &str) -> bool {
        self.base_types().any(|base| base.has_name(name))
    }

    /// Matches the simple, fully qualified or `global::` qualified name.
    /// Keyword aliases such as `int` and `object` match their declared path too.
    pub fn has_name(&self, name: &str) -> bool {
        let declared = name.strip_prefix("global::").unwrap_or(name);
        self.name() == name
            || self.fully_qualified_name() == name
            || self.global_qualified_name() == name
            || self.declared_path() == declared
    }

    // ---- Generics ----------------------------------------------------------------

    pub fn arity(&self) -> usize {
        self.symbol.arity()
    }

    /// Type arguments in written order. Arguments that did not resolve are skipped;
    /// use [`ValidSymbol::get_type_argument`] for positional access.
    pub fn type_arguments(&self) -> Vec<ValidSymbol> {
        ValidSymbol::collect(self.symbol.type_arguments())
    }

    pub fn get_type_argument(&self, index: usize) -> OptionalSymbol {
        self.symbol.type_arguments().into_iter().nth(index).into()
    }

    pub fn first_type_argument(&self) -> OptionalSymbol {
        self.get_type_argument(0)
    }

    /// The type argument of a type with exactly one.
    pub fn single_type_argument(&self) -> OptionalSymbol {
        let mut arguments = self.symbol.type_arguments();
        if arguments.len() == 1 {
            arguments.pop().into()
        } else {
            OptionalSymbol::empty()
        }
    }

    /// Type parameters of a generic type or method.
    pub fn type_parameters(&self) -> Vec<ValidSymbol> {
        ValidSymbol::collect(self.symbol.type_parameters())
    }

    pub fn original_definition(&self) -> ValidSymbol {
        ValidSymbol {
            symbol: self.symbol.original_definition(),
        }
    }

    // ---- Task-like types ---------------------------------------------------------

    fn task_arity(&self) -> Option<usize> {
        let definition = self.original_definition();
        let is_task_name = matches!(definition.name().as_str(), "Task" | "ValueTask");
        (is_task_name && definition.namespace().as_deref() == Some(TASKS_NAMESPACE))
            .then(|| definition.arity())
    }

    /// `Task` or `ValueTask`.
    pub fn is_task(&self) -> bool {
        self.task_arity() == Some(0)
    }

    /// `Task<T>` or `ValueTask<T>`.
    pub fn is_generic_task(&self) -> bool {
        self.task_arity() == Some(1)
    }

    pub fn is_task_like(&self) -> bool {
        self.is_task() || self.is_generic_task()
    }

    /// `T` of `Task<T>` / `ValueTask<T>`; empty for anything else.
    pub fn task_result_type(&self) -> OptionalSymbol {
        if self.is_generic_task() {
            self.get_type_argument(0)
        } else {
            OptionalSymbol::empty()
        }
    }
}

/// Iterator returned by [`ValidSymbol::base_types`].
#[derive(Debug, Clone)]
pub struct BaseTypes {
    next: Option<ValidSymbol>,
    depth: usize,
}

impl Iterator for BaseTypes {
    type Item = ValidSymbol;

    fn next(&mut self) -> Option<ValidSymbol> {
        if self.depth >= MAX_BASE_DEPTH {
            return None;
        }
        let current = self.next.take()?;
        self.next = current.base_type().validate();
        self.depth += 1;
        Some(current)
    }
}

/// Iterator returned by [`ValidSymbol::all_interfaces`].
#[derive(Debug, Clone)]
pub struct AllInterfaces {
    queue: VecDeque<ValidSymbol>,
    bases: BaseTypes,
    seen: FxHashSet<ValidSymbol>,
}

impl Iterator for AllInterfaces {
    type Item = ValidSymbol;

    fn next(&mut self) -> Option<ValidSymbol> {
        loop {
            while let Some(interface) = self.queue.pop_front() {
                if self.seen.insert(interface.clone()) {
                    self.queue.extend(interface.interfaces());
                    return Some(interface);
                }
            }
            let base = self.bases.next()?;
            self.queue.extend(base.interfaces());
        }
    }
}
