use crate::type_descriptor::TypeDescriptor;
use std::fmt;
use std::rc::Rc;

/// Maps a type descriptor to the display name used as its component key.
///
/// Naming is pure and may be called any number of times. Uniqueness is not guaranteed
/// here; the schema registry rejects two types that end up with the same name.
#[derive(Clone)]
pub struct SchemaNamer {
    name_fn: Rc<dyn Fn(&TypeDescriptor) -> String>,
}

impl SchemaNamer {
    /// Wrap a custom naming function
    pub fn new(name_fn: impl Fn(&TypeDescriptor) -> String + 'static) -> Self {
        Self {
            name_fn: Rc::new(name_fn),
        }
    }

    /// Canonical string form of the type, e.g. `Page<User>`
    pub fn canonical() -> Self {
        Self::new(|ty| ty.to_string())
    }

    /// Component-key-safe form, e.g. `Page_User` for `Page<User>`.
    ///
    /// Only `[A-Za-z0-9._-]` survive, which is what `$ref` component names allow.
    pub fn sanitized() -> Self {
        Self::new(sanitized_name)
    }

    /// Produce the display name for a type
    pub fn name(&self, ty: &TypeDescriptor) -> String {
        (self.name_fn)(ty)
    }
}

impl Default for SchemaNamer {
    fn default() -> Self {
        Self::canonical()
    }
}

impl fmt::Debug for SchemaNamer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaNamer").finish_non_exhaustive()
    }
}

fn sanitized_name(ty: &TypeDescriptor) -> String {
    let base = if ty.is_tuple() { "Tuple" } else { ty.name.as_str() };
    let mut parts = vec![base.to_string()];
    parts.extend(ty.args.iter().map(sanitized_name));
    parts
        .join("_")
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
        .collect()
}
