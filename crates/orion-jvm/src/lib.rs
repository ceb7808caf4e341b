//! Language-agnostic JVM view over a Java declaration model.
//!
//! Java source declarations (class-ish things, modifier lists, annotation
//! values) are mapped onto the flat JVM vocabulary: class kind, JVM
//! modifiers, supertype/interface lists, and annotation attribute values.
//! The declaration model is deliberately small; a host frontend lowers real
//! source into it.

mod convert;
mod jvm;
mod model;

pub use convert::{
    annotation_attribute_name, annotation_attribute_value, attribute_value, class_interfaces,
    class_kind, class_super_type, find_annotation, has_annotation, list_annotations,
    list_modifiers,
};
pub use jvm::{
    JvmAnnotationValue, JvmClassKind, JvmModifier, JvmReferenceType, JAVA_LANG_ENUM,
    JAVA_LANG_OBJECT,
};
pub use model::{
    AnonymousBase, EnumFieldRef, JavaAnnotation, JavaAnnotationAttribute,
    JavaAnnotationMemberValue, JavaClassDecl, JavaModifier, ModifierList,
};
