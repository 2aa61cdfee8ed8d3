use super::{FileHandle, Object, Registry, Val};
use crate::error;
use crate::lang::Error;

type Result<T> = std::result::Result<T, Error>;

pub type TypeId = usize;

// Built-in ids. Registration order in `TypeRegistry::new` must match.
pub const NONE: TypeId = 0;
pub const WALL: TypeId = 1;
pub const INT: TypeId = 2;
pub const BOOL: TypeId = 3;
pub const REAL: TypeId = 4;
pub const STR: TypeId = 5;
pub const BLOCK: TypeId = 6;
pub const FILE: TypeId = 7;

const BUILTIN: [&str; 8] = ["none", "wall", "int", "bool", "real", "str", "block", "file"];

/// Produces the default payload of a registered object type.
pub type Initializer = fn() -> Box<dyn Object>;

#[derive(Debug)]
pub struct TypeDescriptor {
    id: TypeId,
    initialize: Option<Initializer>,
}

impl TypeDescriptor {
    pub fn id(&self) -> TypeId {
        self.id
    }
}

/// ## Type registry
///
/// Gives every type a stable small id. Built-in types are registered first
/// in a fixed order so their ids are constants.

#[derive(Debug)]
pub struct TypeRegistry {
    types: Registry<TypeDescriptor>,
}

impl Default for TypeRegistry {
    fn default() -> Self {
        TypeRegistry::new()
    }
}

impl TypeRegistry {
    pub fn new() -> TypeRegistry {
        let mut types = Registry::new();
        for (id, name) in BUILTIN.iter().enumerate() {
            let index = types.set(
                name,
                TypeDescriptor {
                    id,
                    initialize: None,
                },
            );
            debug_assert_eq!(index, id);
        }
        TypeRegistry { types }
    }

    /// Registers an object type, or replaces the initializer of an object
    /// type with the same name. Built-in names cannot be taken over.
    pub fn register(&mut self, name: &str, initialize: Initializer) -> Result<TypeId> {
        if let Some(id) = self.types.index(name) {
            if id < BUILTIN.len() {
                return Err(error!(TypeMismatch; format!("`{}` IS A BUILT-IN TYPE", name)));
            }
        }
        let id = self.types.index(name).unwrap_or_else(|| self.types.len());
        let id = self.types.set(
            name,
            TypeDescriptor {
                id,
                initialize: Some(initialize),
            },
        );
        tracing::debug!(name, id, "registered type");
        Ok(id)
    }

    pub fn index(&self, name: &str) -> Option<TypeId> {
        self.types.index(name)
    }

    pub fn name(&self, id: TypeId) -> Option<&str> {
        self.types.key(id)
    }

    /// Name of the value's type, `?` if it was never registered.
    pub fn name_of(&self, val: &Val) -> &str {
        self.name(val.type_id()).unwrap_or("?")
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// A fresh value of the type with its default payload.
    pub fn initialize(&self, id: TypeId) -> Result<Val> {
        let descriptor = match self.types.get(id) {
            Some(descriptor) => descriptor,
            None => return Err(error!(UnknownType; format!("NO TYPE WITH ID {}", id))),
        };
        Ok(match (descriptor.id, descriptor.initialize) {
            (NONE, _) => Val::None,
            (WALL, _) => Val::Wall,
            (INT, _) => Val::Int(0),
            (BOOL, _) => Val::Bool(false),
            (REAL, _) => Val::Real(0.0),
            (STR, _) => Val::Str(String::new()),
            (BLOCK, _) => Val::Block(super::Block::empty()),
            (FILE, _) => Val::File(FileHandle::closed("")),
            (id, Some(initialize)) => Val::Object(id, initialize()),
            (id, None) => return Err(error!(UnknownType; format!("NO INITIALIZER FOR {}", id))),
        })
    }

    /// A fresh value of the named type.
    pub fn initialize_named(&self, name: &str) -> Result<Val> {
        match self.index(name) {
            Some(id) => self.initialize(id),
            None => Err(error!(UnknownType; format!("`{}`", name))),
        }
    }
}
