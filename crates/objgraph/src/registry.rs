//! The [`TypeRegistry`]: type names to constructors.
//!
//! Concrete types contribute a [`Registration`] through the
//! [`register!`](crate::register) macro. Those entries are collected with
//! `inventory` and turned into an explicit registry value by
//! [`TypeRegistry::with_registered`]; nothing is looked up through global
//! state while reading.

use std::collections::hash_map::Entry;

use fxhash::FxHashMap;

use objgraph_serialize::{CLOSE_BLOCK, OPEN_BLOCK};

use crate::{
    codec::{BACK_REFERENCE, NULL_TOKEN},
    object::Object,
    Error,
};

/// A zero-argument constructor producing a default-initialised instance.
pub type Constructor = fn() -> Box<dyn Object>;

fn construct<T: Object + Default>() -> Box<dyn Object> {
    Box::new(T::default())
}

/// Checks that `name` reads back as the tag of a block: one non-empty token
/// without whitespace that is none of the structural tokens.
///
/// # Errors
///
/// Returns [`Error::InvalidTypeName`] otherwise.
pub fn validate_type_name(name: &str) -> Result<(), Error> {
    let reserved =
        [NULL_TOKEN, BACK_REFERENCE, OPEN_BLOCK, CLOSE_BLOCK].contains(&name);

    if name.is_empty() || reserved || name.chars().any(char::is_whitespace) {
        return Err(Error::InvalidTypeName(name.to_owned()));
    }

    Ok(())
}

/// A statically submitted registry entry.
///
/// This struct acts as a plugin registry via
/// `inventory::collect!(Registration)`; every entry is picked up by
/// [`TypeRegistry::with_registered`].
#[derive(Debug, Clone, Copy)]
pub struct Registration {
    constructor: Constructor,
}

inventory::collect!(Registration);

impl Registration {
    /// Creates a [`Registration`] for the type `T`. The registered name is
    /// whatever `T::default().type_name()` reports.
    #[must_use]
    pub const fn of<T: Object + Default>() -> Self {
        Self { constructor: construct::<T> }
    }

    /// Returns the constructor of this entry.
    #[must_use]
    pub const fn constructor(&self) -> Constructor { self.constructor }
}

/// Maps type names to the constructors used while reading.
///
/// Built once before any session starts and shared read-only afterwards.
#[derive(Debug, Default)]
pub struct TypeRegistry {
    constructors: FxHashMap<String, Constructor>,
}

impl TypeRegistry {
    /// Creates a new empty [`TypeRegistry`].
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Creates a registry containing every [`Registration`] submitted with
    /// [`register!`](crate::register) anywhere in the final binary.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateRegistration`] if two submitted types report
    /// the same name, or [`Error::InvalidTypeName`] if one reports a name
    /// that cannot be a block tag.
    pub fn with_registered() -> Result<Self, Error> {
        let mut registry = Self::new();

        for registration in inventory::iter::<Registration> {
            let name = (registration.constructor)().type_name();
            registry.register(name, registration.constructor)?;
        }

        log::debug!(
            "collected {} statically registered types",
            registry.constructors.len()
        );

        Ok(registry)
    }

    /// Adds a constructor under `name`.
    ///
    /// Registration is additive only; an existing entry is never replaced.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidTypeName`] if `name` fails [`validate_type_name`].
    /// - [`Error::DuplicateRegistration`] if `name` is already taken.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        constructor: Constructor,
    ) -> Result<(), Error> {
        let name = name.into();

        if let Err(error) = validate_type_name(&name) {
            log::warn!("rejected type name `{name}`");
            return Err(error);
        }

        match self.constructors.entry(name) {
            Entry::Occupied(entry) => {
                log::warn!("type `{}` is already registered", entry.key());
                Err(Error::DuplicateRegistration(entry.key().clone()))
            }
            Entry::Vacant(entry) => {
                log::debug!("registered type `{}`", entry.key());
                entry.insert(constructor);
                Ok(())
            }
        }
    }

    /// Registers `T` under the name its default instance reports.
    ///
    /// # Errors
    ///
    /// See [`TypeRegistry::register`].
    pub fn register_type<T: Object + Default>(&mut self) -> Result<(), Error> {
        self.register(T::default().type_name(), construct::<T>)
    }

    /// Creates a fresh, default-initialised instance of the type registered
    /// under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownType`] if no such type is registered.
    pub fn create(&self, name: &str) -> Result<Box<dyn Object>, Error> {
        self.constructors
            .get(name)
            .map(|constructor| constructor())
            .ok_or_else(|| Error::UnknownType(name.to_owned()))
    }

    /// Checks if a type is registered under `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.constructors.contains_key(name)
    }

    /// Returns the number of registered types.
    #[must_use]
    pub fn len(&self) -> usize { self.constructors.len() }

    /// Returns `true` if no type is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.constructors.is_empty() }

    /// Returns every registered name in sorted order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names =
            self.constructors.keys().map(String::as_str).collect::<Vec<_>>();
        names.sort_unstable();

        names
    }
}
