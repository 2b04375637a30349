//! # Typed Attribute Queries
//!
//! A typed query is a plain struct built from one attribute application, for
//! example a `Config` struct read from `[Config("name", Timeout = 30)]`. The
//! [`QueryFactory`] keeps one constructor per query type, keyed by [`TypeId`]:
//! the first request for a type stores its constructor and later requests reuse it.
//!
//! Requesting a type nobody registered is a setup defect. It is logged and
//! returned as a [`FactoryError`], never turned into an empty result.

use std::any::{type_name, Any, TypeId};
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;
use thiserror::Error;
use tracing::{debug, error};

use crate::attribute::ValidAttribute;

/// A query type with a known attribute and a constructor from it.
pub trait AttributeQuery: Send + 'static {
    /// Name of the attribute the query reads, matched like
    /// [`ValidAttribute::is_named`].
    const ATTRIBUTE_NAME: &'static str;

    fn from_attribute(attribute: ValidAttribute) -> Self;
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FactoryError {
    #[error("no constructor registered for query type `{type_name}`")]
    MissingConstructor { type_name: &'static str },
    #[error("constructor registered for `{type_name}` built a value of another type")]
    TypeMismatch { type_name: &'static str },
}

type Constructor = Arc<dyn Fn(ValidAttribute) -> Box<dyn Any + Send> + Send + Sync>;

static GLOBAL: Lazy<QueryFactory> = Lazy::new(QueryFactory::new);

/// Thread-safe cache of query constructors.
pub struct QueryFactory {
    constructors: RwLock<FxHashMap<TypeId, Constructor>>,
}

impl QueryFactory {
    pub fn new() -> Self {
        Self {
            constructors: RwLock::new(FxHashMap::default()),
        }
    }

    /// The process-wide factory.
    pub fn global() -> &'static Self {
        &GLOBAL
    }

    /// Stores `constructor` for `Q`. Returns `false`, keeping the existing entry,
    /// when `Q` already has one.
    pub fn register<Q, F>(&self, constructor: F) -> bool
    where
        Q: Send + 'static,
        F: Fn(ValidAttribute) -> Q + Send + Sync + 'static,
    {
        let boxed: Constructor = Arc::new(move |attribute: ValidAttribute| {
            Box::new(constructor(attribute)) as Box<dyn Any + Send>
        });
        let mut constructors = self
            .constructors
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if constructors.contains_key(&TypeId::of::<Q>()) {
            return false;
        }
        debug!(query = type_name::<Q>(), "registered query constructor");
        constructors.insert(TypeId::of::<Q>(), boxed);
        true
    }

    pub fn is_registered<Q: 'static>(&self) -> bool {
        self.constructors
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(&TypeId::of::<Q>())
    }

    pub fn len(&self) -> usize {
        self.constructors
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Builds a `Q` with the registered constructor.
    pub fn create<Q: Send + 'static>(&self, attribute: ValidAttribute) -> Result<Q, FactoryError> {
        let Some(constructor) = self.lookup(TypeId::of::<Q>()) else {
            error!(query = type_name::<Q>(), "no constructor registered for query type");
            return Err(FactoryError::MissingConstructor {
                type_name: type_name::<Q>(),
            });
        };
        Self::invoke(&constructor, attribute)
    }

    /// Builds a `Q`, storing its constructor on first use.
    pub fn query<Q: AttributeQuery>(&self, attribute: ValidAttribute) -> Result<Q, FactoryError> {
        let constructor = match self.lookup(TypeId::of::<Q>()) {
            Some(constructor) => constructor,
            None => {
                let built: Constructor = Arc::new(|attribute: ValidAttribute| {
                    Box::new(Q::from_attribute(attribute)) as Box<dyn Any + Send>
                });
                let mut constructors = self
                    .constructors
                    .write()
                    .unwrap_or_else(PoisonError::into_inner);
                // Another thread may have won the race; its constructor is kept.
                let stored = constructors.entry(TypeId::of::<Q>()).or_insert_with(|| {
                    debug!(query = type_name::<Q>(), "built query constructor");
                    built
                });
                Arc::clone(stored)
            }
        };
        Self::invoke(&constructor, attribute)
    }

    fn lookup(&self, id: TypeId) -> Option<Constructor> {
        self.constructors
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .cloned()
    }

    fn invoke<Q: 'static>(
        constructor: &Constructor,
        attribute: ValidAttribute,
    ) -> Result<Q, FactoryError> {
        constructor(attribute)
            .downcast::<Q>()
            .map(|query| *query)
            .map_err(|_| {
                error!(query = type_name::<Q>(), "query constructor built a value of another type");
                FactoryError::TypeMismatch {
                    type_name: type_name::<Q>(),
                }
            })
    }
}

impl Default for QueryFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for QueryFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryFactory")
            .field("constructors", &self.len())
            .finish()
    }
}
