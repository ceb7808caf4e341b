//! A minimal Java declaration model, just enough structure for the JVM
//! conversion layer. A host frontend lowers real source into these records.

use crate::jvm::JvmReferenceType;

/// Source-level modifier keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JavaModifier {
    Public,
    Protected,
    Private,
    /// No access modifier written; package-private.
    PackageLocal,
    Static,
    Abstract,
    Final,
    Native,
    Synchronized,
    Strictfp,
    Transient,
    Volatile,
    Transitive,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModifierList {
    pub modifiers: Vec<JavaModifier>,
    pub annotations: Vec<JavaAnnotation>,
}

/// The base reference of an anonymous class. `base_is_interface` is `None`
/// when the base class does not resolve.
#[derive(Debug, Clone, PartialEq)]
pub struct AnonymousBase {
    pub base_type: JvmReferenceType,
    pub base_is_interface: Option<bool>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct JavaAnnotation {
    pub qualified_name: String,
    pub attributes: Vec<JavaAnnotationAttribute>,
}

impl JavaAnnotation {
    pub fn new(qualified_name: impl Into<String>) -> Self {
        Self {
            qualified_name: qualified_name.into(),
            attributes: Vec::new(),
        }
    }
}

/// One `name = value` pair in an annotation; `name` is omitted for the
/// single-member shorthand.
#[derive(Debug, Clone, PartialEq)]
pub struct JavaAnnotationAttribute {
    pub name: Option<String>,
    pub value: Option<JavaAnnotationMemberValue>,
}

/// A reference that resolved to an enum constant.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumFieldRef {
    pub enum_type: String,
    pub field: String,
}

/// The source-level shapes an annotation attribute value can take.
#[derive(Debug, Clone, PartialEq)]
pub enum JavaAnnotationMemberValue {
    /// `SomeType.class`.
    ClassAccess { class_name: String },
    /// A nested annotation value.
    Annotation(JavaAnnotation),
    /// `{ v1, v2, ... }`.
    ArrayInitializer(Vec<JavaAnnotationMemberValue>),
    /// A name reference; resolves to an enum field or stays a plain
    /// expression.
    Reference {
        enum_field: Option<EnumFieldRef>,
        text: String,
    },
    /// Any other expression, e.g. a literal or constant arithmetic.
    Expression { text: String },
    /// A shape the model does not cover.
    Unsupported { description: String },
}

/// A class-like declaration: class, interface, enum, annotation type, or an
/// anonymous class.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JavaClassDecl {
    pub name: Option<String>,
    pub qualified_name: Option<String>,
    pub is_interface: bool,
    pub is_enum: bool,
    pub is_annotation: bool,
    pub modifier_list: Option<ModifierList>,
    pub extends_list: Vec<JvmReferenceType>,
    pub implements_list: Vec<JvmReferenceType>,
    pub anonymous_base: Option<AnonymousBase>,
}

impl JavaClassDecl {
    pub fn class(qualified_name: impl Into<String>) -> Self {
        let qualified_name = qualified_name.into();
        Self {
            name: qualified_name.rsplit('.').next().map(str::to_string),
            qualified_name: Some(qualified_name),
            ..Self::default()
        }
    }

    pub fn interface(qualified_name: impl Into<String>) -> Self {
        Self {
            is_interface: true,
            ..Self::class(qualified_name)
        }
    }

    pub fn enumeration(qualified_name: impl Into<String>) -> Self {
        Self {
            is_enum: true,
            ..Self::class(qualified_name)
        }
    }

    /// Annotation types are interfaces at the source level.
    pub fn annotation(qualified_name: impl Into<String>) -> Self {
        Self {
            is_annotation: true,
            is_interface: true,
            ..Self::class(qualified_name)
        }
    }

    pub fn anonymous(base: AnonymousBase) -> Self {
        Self {
            anonymous_base: Some(base),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_modifiers(mut self, modifiers: Vec<JavaModifier>) -> Self {
        self.modifier_list
            .get_or_insert_with(ModifierList::default)
            .modifiers = modifiers;
        self
    }

    #[must_use]
    pub fn with_annotations(mut self, annotations: Vec<JavaAnnotation>) -> Self {
        self.modifier_list
            .get_or_insert_with(ModifierList::default)
            .annotations = annotations;
        self
    }

    #[must_use]
    pub fn with_extends(mut self, extends: Vec<JvmReferenceType>) -> Self {
        self.extends_list = extends;
        self
    }

    #[must_use]
    pub fn with_implements(mut self, implements: Vec<JvmReferenceType>) -> Self {
        self.implements_list = implements;
        self
    }

    #[must_use]
    pub fn has_modifier(&self, modifier: JavaModifier) -> bool {
        self.modifier_list
            .as_ref()
            .is_some_and(|list| list.modifiers.contains(&modifier))
    }
}
