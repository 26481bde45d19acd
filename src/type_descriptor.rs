//! Structural identifiers for Rust types.
//!
//! A [`TypeDescriptor`] is the cache key of the schema registry. Two descriptors are equal
//! exactly when their base names and generic arguments are equal, so `Vec<Foo>` and
//! `Vec<Bar>` are distinct while every spelling of `std::vec::Vec<Foo>` collapses to the
//! same value.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Base name used for tuple types, including the unit type `()`.
pub const TUPLE: &str = "()";

/// Base name used for types that cannot be described structurally (trait objects,
/// function pointers, macros in type position, ...).
pub const UNKNOWN: &str = "Unknown";

/// Structural identity of a Rust type, including its generic parameterization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TypeDescriptor {
    /// The last path segment of the type (e.g. "Vec", "User", "i32")
    pub name: String,
    /// Generic type arguments, in declaration order
    pub args: Vec<TypeDescriptor>,
}

impl TypeDescriptor {
    /// Create a descriptor for a non-generic type
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
        }
    }

    /// Create a descriptor for a generic type with the given arguments
    pub fn generic(name: impl Into<String>, args: Vec<TypeDescriptor>) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }

    /// Create a descriptor for `Option<inner>`
    pub fn option(inner: TypeDescriptor) -> Self {
        Self::generic("Option", vec![inner])
    }

    /// Create a descriptor for `Vec<inner>`
    pub fn vec(inner: TypeDescriptor) -> Self {
        Self::generic("Vec", vec![inner])
    }

    /// The unit type `()`
    pub fn unit() -> Self {
        Self::new(TUPLE)
    }

    /// Parse a type expression such as `Vec<User>` or `HashMap<String, i64>`
    pub fn parse(source: &str) -> Result<Self> {
        let ty: syn::Type = syn::parse_str(source.trim()).map_err(|e| {
            Error::InvalidArgument(format!("'{}' is not a valid type: {}", source, e))
        })?;
        Ok(Self::from_syn(&ty))
    }

    /// Build a descriptor from a parsed `syn::Type`.
    ///
    /// References, parentheses and raw pointers are erased, slices and arrays become
    /// `Vec<T>`, lifetimes and const arguments are dropped.
    pub fn from_syn(ty: &syn::Type) -> Self {
        match ty {
            syn::Type::Path(type_path) => Self::from_path(&type_path.path),
            syn::Type::Reference(reference) => Self::from_syn(&reference.elem),
            syn::Type::Paren(paren) => Self::from_syn(&paren.elem),
            syn::Type::Group(group) => Self::from_syn(&group.elem),
            syn::Type::Ptr(ptr) => Self::from_syn(&ptr.elem),
            syn::Type::Slice(slice) => Self::vec(Self::from_syn(&slice.elem)),
            syn::Type::Array(array) => Self::vec(Self::from_syn(&array.elem)),
            syn::Type::Tuple(tuple) => {
                Self::generic(TUPLE, tuple.elems.iter().map(Self::from_syn).collect())
            }
            _ => Self::new(UNKNOWN),
        }
    }

    fn from_path(path: &syn::Path) -> Self {
        let Some(segment) = path.segments.last() else {
            return Self::new(UNKNOWN);
        };

        let args = match &segment.arguments {
            syn::PathArguments::AngleBracketed(bracketed) => bracketed
                .args
                .iter()
                .filter_map(|arg| match arg {
                    syn::GenericArgument::Type(inner) => Some(Self::from_syn(inner)),
                    _ => None,
                })
                .collect(),
            _ => Vec::new(),
        };

        Self::generic(segment.ident.to_string(), args)
    }

    /// Whether this descriptor is `Option<T>`
    pub fn is_option(&self) -> bool {
        self.name == "Option" && self.args.len() == 1
    }

    /// Whether this descriptor is a tuple (the unit type included)
    pub fn is_tuple(&self) -> bool {
        self.name == TUPLE
    }

    /// First generic argument, if any
    pub fn first_arg(&self) -> Option<&TypeDescriptor> {
        self.args.first()
    }

    /// Replace bare type parameters (e.g. `T`) with concrete descriptors.
    pub fn substitute(&self, bindings: &HashMap<String, TypeDescriptor>) -> TypeDescriptor {
        if self.args.is_empty() {
            if let Some(bound) = bindings.get(&self.name) {
                return bound.clone();
            }
        }
        Self {
            name: self.name.clone(),
            args: self.args.iter().map(|arg| arg.substitute(bindings)).collect(),
        }
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .args
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");

        if self.is_tuple() {
            return write!(f, "({})", joined);
        }
        if self.args.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}<{}>", self.name, joined)
        }
    }
}

impl FromStr for TypeDescriptor {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for TypeDescriptor {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<TypeDescriptor> for String {
    fn from(descriptor: TypeDescriptor) -> Self {
        descriptor.to_string()
    }
}
