//! Record definitions
//!
//! A [`Definition`] is the explicit field table of one record type: field
//! names in declaration order, each with an optional type declaration and an
//! optional default value.

use once_cell::sync::OnceCell;

use super::descriptor::{extract_doc_declaration, TypeDescriptor};
use super::value::Value;

/// Field declaration
#[derive(Debug, Clone)]
pub struct FieldDef {
    name: String,
    declaration: Option<String>,
    default: Option<Value>,
    /// Definition that declared the field; set when added to a definition
    declared_in: Option<String>,
    descriptor: OnceCell<TypeDescriptor>,
}

impl FieldDef {
    /// Create a field with a type declaration
    pub fn new(name: impl Into<String>, declaration: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declaration: Some(declaration.into()),
            default: None,
            declared_in: None,
            descriptor: OnceCell::new(),
        }
    }

    /// Create a field without a type declaration
    pub fn untyped(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declaration: None,
            default: None,
            declared_in: None,
            descriptor: OnceCell::new(),
        }
    }

    /// Create a field whose declaration comes from a `@var` doc comment
    pub fn from_doc_comment(name: impl Into<String>, doc: &str) -> Self {
        Self {
            name: name.into(),
            declaration: extract_doc_declaration(doc).map(str::to_string),
            default: None,
            declared_in: None,
            descriptor: OnceCell::new(),
        }
    }

    /// Attach a default value
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn declaration(&self) -> Option<&str> {
        self.declaration.as_deref()
    }

    pub fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }

    /// Name of the definition that declared this field. Inherited fields
    /// keep their parent's name.
    pub fn declared_in(&self) -> Option<&str> {
        self.declared_in.as_deref()
    }

    /// Resolved descriptor, parsed on first access
    pub fn descriptor(&self) -> &TypeDescriptor {
        self.descriptor
            .get_or_init(|| TypeDescriptor::parse(self.declaration.as_deref()))
    }
}

/// Field table of one record type
#[derive(Debug, Clone)]
pub struct Definition {
    name: String,
    parent: Option<String>,
    fields: Vec<FieldDef>,
}

impl Definition {
    /// Create an empty definition
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: None,
            fields: Vec::new(),
        }
    }

    /// Declare this definition a subtype of `parent`
    pub fn extends(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    /// Append a typed field
    pub fn field(self, name: impl Into<String>, declaration: impl Into<String>) -> Self {
        self.with(FieldDef::new(name, declaration))
    }

    /// Append a typed field with a default value
    pub fn field_with_default(
        self,
        name: impl Into<String>,
        declaration: impl Into<String>,
        default: impl Into<Value>,
    ) -> Self {
        self.with(FieldDef::new(name, declaration).with_default(default))
    }

    /// Append a field without declaration
    pub fn untyped(self, name: impl Into<String>) -> Self {
        self.with(FieldDef::untyped(name))
    }

    /// Append a field, replacing any earlier field with the same name in place
    pub fn with(mut self, field: FieldDef) -> Self {
        self.push_field(field);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }

    /// Fields in declaration order
    pub fn fields(&self) -> &[FieldDef] {
        &self.fields
    }

    pub fn get_field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.get_field(name).is_some()
    }

    /// Fully-qualified field name used in error messages
    pub fn fqn(&self, field: &str) -> String {
        format!("{}::{}", self.name, field)
    }

    /// Fully-qualified name of `field` under the definition that declared it
    pub fn field_fqn(&self, field: &FieldDef) -> String {
        let owner = field.declared_in().unwrap_or(self.name.as_str());
        format!("{}::{}", owner, field.name)
    }

    /// Prepends the parent's fields; own fields override inherited ones in place.
    pub(crate) fn inherit(&mut self, parent: &Definition) {
        let own = std::mem::replace(&mut self.fields, parent.fields.clone());
        for field in own {
            self.push_field(field);
        }
    }

    fn push_field(&mut self, mut field: FieldDef) {
        if field.declared_in.is_none() {
            field.declared_in = Some(self.name.clone());
        }
        match self.fields.iter_mut().find(|f| f.name == field.name) {
            Some(existing) => *existing = field,
            None => self.fields.push(field),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fields_keep_declaration_order() {
        let def = Definition::new("User")
            .field("name", "string")
            .field_with_default("role", "string", "member")
            .untyped("extra");

        let names: Vec<_> = def.fields().iter().map(FieldDef::name).collect();
        assert_eq!(names, vec!["name", "role", "extra"]);
        assert!(def.get_field("role").unwrap().has_default());
        assert!(!def.get_field("extra").unwrap().descriptor().has_declaration());
    }

    #[test]
    fn test_descriptor_is_cached() {
        let field = FieldDef::new("age", "int|null");
        let first = field.descriptor() as *const TypeDescriptor;
        let second = field.descriptor() as *const TypeDescriptor;
        assert_eq!(first, second);
        assert!(field.descriptor().is_nullable());
    }

    #[test]
    fn test_fqn() {
        let def = Definition::new("User");
        assert_eq!(def.fqn("name"), "User::name");
    }

    #[test]
    fn test_doc_comment_field() {
        let field = FieldDef::from_doc_comment("child", "/** @var Child */");
        assert_eq!(field.declaration(), Some("Child"));

        let bare = FieldDef::from_doc_comment("child", "/** no annotation */");
        assert_eq!(bare.declaration(), None);
    }

    #[test]
    fn test_inherit_overrides_in_place() {
        let parent = Definition::new("Base").field("id", "int").field("label", "string");
        let mut child = Definition::new("Child")
            .extends("Base")
            .field("label", "string|null")
            .field("extra", "bool");
        child.inherit(&parent);

        let names: Vec<_> = child.fields().iter().map(FieldDef::name).collect();
        assert_eq!(names, vec!["id", "label", "extra"]);
        assert_eq!(child.get_field("label").unwrap().declaration(), Some("string|null"));
    }

    #[test]
    fn test_inherited_fields_keep_declaring_definition() {
        let parent = Definition::new("Base").field("id", "int").field("label", "string");
        let mut child = Definition::new("Child")
            .extends("Base")
            .field("label", "string|null");
        child.inherit(&parent);

        let id = child.get_field("id").unwrap();
        assert_eq!(id.declared_in(), Some("Base"));
        assert_eq!(child.field_fqn(id), "Base::id");

        let label = child.get_field("label").unwrap();
        assert_eq!(child.field_fqn(label), "Child::label");
    }

    #[test]
    fn test_duplicate_field_replaced() {
        let def = Definition::new("A").field("x", "int").field("x", "string");
        assert_eq!(def.fields().len(), 1);
        assert_eq!(def.get_field("x").unwrap().declaration(), Some("string"));
    }
}
