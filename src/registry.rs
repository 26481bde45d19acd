//! The memoizing schema registry.
//!
//! Every type requested through [`SchemaRegistry::get`] goes through the same chain:
//!
//! 1. partial registrars, in order; a claim is returned as-is and never cached,
//! 2. the cache, which answers with a `$ref` for any type already seen,
//! 3. the generic resolver, whose body is written into the schema catalogue once.
//!
//! A type is marked [`RegistrationState::Registering`] before its body is computed, so a
//! type that refers to itself (directly or through other types) gets its `$ref` back
//! instead of recursing again.

use crate::error::{Error, Result};
use crate::generic::GenericSchemaResolver;
use crate::namer::SchemaNamer;
use crate::registrar::{PartialSchemaRegistrar, PrimitiveSchemas};
use crate::schema::{NamedSchema, Schema};
use crate::type_descriptor::TypeDescriptor;
use log::debug;
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

/// Resolution progress of a single type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationState {
    Unseen,
    /// Name assigned, body still being computed
    Registering,
    Registered,
}

#[derive(Debug)]
struct Entry {
    name: String,
    state: RegistrationState,
}

/// Converts types to named schemas, each composite type exactly once
pub struct SchemaRegistry {
    namer: SchemaNamer,
    registrars: Rc<[Box<dyn PartialSchemaRegistrar>]>,
    fallback: Rc<dyn GenericSchemaResolver>,
    entries: HashMap<TypeDescriptor, Entry>,
    /// Display name -> the type that owns it
    owners: HashMap<String, TypeDescriptor>,
    catalogue: BTreeMap<String, Schema>,
}

impl SchemaRegistry {
    /// Create a registry.
    ///
    /// `registrars` are consulted in order, followed by the built-in [`PrimitiveSchemas`];
    /// `fallback` handles every type none of them claims.
    pub fn new(
        namer: SchemaNamer,
        registrars: Vec<Box<dyn PartialSchemaRegistrar>>,
        fallback: impl GenericSchemaResolver + 'static,
    ) -> Self {
        let mut chain = registrars;
        chain.push(Box::new(PrimitiveSchemas));
        debug!("Initializing SchemaRegistry with {} registrars", chain.len());

        Self {
            namer,
            registrars: Rc::from(chain),
            fallback: Rc::new(fallback),
            entries: HashMap::new(),
            owners: HashMap::new(),
            catalogue: BTreeMap::new(),
        }
    }

    /// Resolve a type to a named schema.
    ///
    /// Composite types always come back as a `$ref` into the catalogue, whether this call
    /// registered them or they were cached already.
    ///
    /// # Errors
    ///
    /// [`Error::SchemaNameCollision`] when the namer gives this type a name already owned
    /// by a different type. Errors from registrars and the fallback resolver propagate.
    pub fn get(&mut self, ty: &TypeDescriptor) -> Result<NamedSchema> {
        let registrars = Rc::clone(&self.registrars);
        for registrar in registrars.iter() {
            if let Some(predefined) = registrar.get(ty, self)? {
                debug!("{} resolved by a partial registrar", ty);
                return Ok(predefined);
            }
        }

        if let Some(entry) = self.entries.get(ty) {
            debug!("Schema for {} already {:?}", ty, entry.state);
            return Ok(NamedSchema::new(
                entry.name.clone(),
                Schema::reference(&entry.name),
            ));
        }

        self.register(ty)
    }

    fn register(&mut self, ty: &TypeDescriptor) -> Result<NamedSchema> {
        let name = self.namer.name(ty);
        if let Some(owner) = self.owners.get(&name) {
            return Err(Error::SchemaNameCollision {
                name,
                existing: owner.to_string(),
                requested: ty.to_string(),
            });
        }

        debug!("Registering {} as {}", ty, name);
        self.owners.insert(name.clone(), ty.clone());
        self.entries.insert(
            ty.clone(),
            Entry {
                name: name.clone(),
                state: RegistrationState::Registering,
            },
        );

        let fallback = Rc::clone(&self.fallback);
        let body = match fallback.describe(ty, self) {
            Ok(body) => body,
            // Only this type is released. Members registered while describing it stay in
            // the catalogue and may still refer to its name.
            Err(e) => {
                self.entries.remove(ty);
                self.owners.remove(&name);
                return Err(e);
            }
        };

        debug_assert!(!self.catalogue.contains_key(&name));
        self.catalogue.insert(name.clone(), body);
        if let Some(entry) = self.entries.get_mut(ty) {
            entry.state = RegistrationState::Registered;
        }

        Ok(NamedSchema::new(name.clone(), Schema::reference(&name)))
    }

    /// Current state of a type in the cache
    pub fn state(&self, ty: &TypeDescriptor) -> RegistrationState {
        self.entries
            .get(ty)
            .map_or(RegistrationState::Unseen, |entry| entry.state)
    }

    /// Display name assigned to a cached type
    pub fn name_of(&self, ty: &TypeDescriptor) -> Option<&str> {
        self.entries.get(ty).map(|entry| entry.name.as_str())
    }

    /// Whether the fallback resolver knows a project definition named `name`
    pub fn defines(&self, name: &str) -> bool {
        self.fallback.defines(name)
    }

    pub fn namer(&self) -> &SchemaNamer {
        &self.namer
    }

    /// Registered schema bodies by display name
    pub fn catalogue(&self) -> &BTreeMap<String, Schema> {
        &self.catalogue
    }

    pub fn into_catalogue(self) -> BTreeMap<String, Schema> {
        self.catalogue
    }
}
