//! Type declarations
//!
//! A declaration is a `|`-separated list of alternatives. Each alternative is
//! a kind name (`int`, `integer`, `float`, `double`, `bool`, `boolean`,
//! `string`, `array`, `object`), `mixed`, `null`, or a definition name, with an
//! optional `[]` suffix meaning "sequence of".

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use super::value::Kind;

const NULL_MARKER: &str = "null";
const MIXED: &str = "mixed";
const ARRAY_SUFFIX: &str = "[]";

static DOC_VAR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"@var ((?:(?:[\w|\\])+(?:\[\])?)+)").expect("static @var pattern is valid")
});

/// One resolved type alternative
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeAtom {
    /// Runtime kind tag
    Kind(Kind),
    /// Any non-null value
    Mixed,
    /// The null marker; accepts nothing on its own
    Null,
    /// Reference to a record definition
    Named(String),
    /// Sequence whose elements each satisfy the inner atom
    ArrayOf(Box<TypeAtom>),
}

impl TypeAtom {
    /// Parses a single alternative
    pub fn parse(alternative: &str) -> TypeAtom {
        if let Some(base) = alternative.strip_suffix(ARRAY_SUFFIX) {
            return TypeAtom::ArrayOf(Box::new(TypeAtom::parse(base)));
        }

        let name = alternative.trim_start_matches('\\');
        if name.eq_ignore_ascii_case(NULL_MARKER) {
            return TypeAtom::Null;
        }
        if name.eq_ignore_ascii_case(MIXED) {
            return TypeAtom::Mixed;
        }
        match Kind::from_declared(name) {
            Some(kind) => TypeAtom::Kind(kind),
            None => TypeAtom::Named(name.to_string()),
        }
    }

    /// Returns the definition name if this atom references one
    pub fn object_type(&self) -> Option<&str> {
        match self {
            TypeAtom::Named(name) => Some(name.as_str()),
            _ => None,
        }
    }

    /// Returns the element atom of an array alternative
    pub fn element(&self) -> Option<&TypeAtom> {
        match self {
            TypeAtom::ArrayOf(inner) => Some(inner.as_ref()),
            _ => None,
        }
    }
}

impl fmt::Display for TypeAtom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeAtom::Kind(kind) => write!(f, "{}", kind),
            TypeAtom::Mixed => write!(f, "{}", MIXED),
            TypeAtom::Null => write!(f, "{}", NULL_MARKER),
            TypeAtom::Named(name) => write!(f, "{}", name),
            TypeAtom::ArrayOf(inner) => write!(f, "{}{}", inner, ARRAY_SUFFIX),
        }
    }
}

/// Structured form of a field declaration
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TypeDescriptor {
    has_declaration: bool,
    is_nullable: bool,
    alternatives: Vec<TypeAtom>,
    type_names: Vec<String>,
}

impl TypeDescriptor {
    /// Descriptor for a field without any declaration: accepts everything
    pub fn undeclared() -> Self {
        Self {
            has_declaration: false,
            is_nullable: true,
            alternatives: Vec::new(),
            type_names: Vec::new(),
        }
    }

    /// Parses a declaration string. `None` or a blank string yields an
    /// undeclared descriptor.
    pub fn parse(declaration: Option<&str>) -> Self {
        let declaration = match declaration.map(str::trim) {
            Some(d) if !d.is_empty() => d,
            _ => return Self::undeclared(),
        };

        let type_names: Vec<String> = declaration
            .split('|')
            .map(str::trim)
            .filter(|alt| !alt.is_empty())
            .map(str::to_string)
            .collect();

        if type_names.is_empty() {
            return Self::undeclared();
        }

        let alternatives: Vec<TypeAtom> = type_names.iter().map(|n| TypeAtom::parse(n)).collect();
        let is_nullable = alternatives.iter().any(|atom| *atom == TypeAtom::Null);

        Self {
            has_declaration: true,
            is_nullable,
            alternatives,
            type_names,
        }
    }

    /// Extracts the declaration from the first `@var` annotation of a doc
    /// comment.
    pub fn from_doc_comment(doc: &str) -> Self {
        Self::parse(extract_doc_declaration(doc))
    }

    pub fn has_declaration(&self) -> bool {
        self.has_declaration
    }

    pub fn is_nullable(&self) -> bool {
        self.is_nullable
    }

    pub fn alternatives(&self) -> &[TypeAtom] {
        &self.alternatives
    }

    /// Alternative names exactly as declared
    pub fn type_names(&self) -> &[String] {
        &self.type_names
    }

    /// Definition names referenced directly, in declaration order
    pub fn object_types(&self) -> impl Iterator<Item = &str> {
        self.alternatives.iter().filter_map(TypeAtom::object_type)
    }

    /// Definition names referenced as array elements, in declaration order
    pub fn array_object_types(&self) -> impl Iterator<Item = &str> {
        self.alternatives
            .iter()
            .filter_map(TypeAtom::element)
            .filter_map(TypeAtom::object_type)
    }
}

/// True if `name` parses as a keyword or array form rather than a
/// definition reference, so no declaration could ever name it.
pub(crate) fn is_reserved_name(name: &str) -> bool {
    !matches!(TypeAtom::parse(name), TypeAtom::Named(_))
}

/// Returns the raw declaration inside a doc comment's `@var` annotation
pub fn extract_doc_declaration(doc: &str) -> Option<&str> {
    DOC_VAR
        .captures(doc)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}
