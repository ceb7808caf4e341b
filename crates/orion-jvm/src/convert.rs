//! Conversions from the Java declaration model to the JVM view.

use tracing::warn;

use crate::jvm::{
    JvmAnnotationValue, JvmClassKind, JvmModifier, JvmReferenceType, JAVA_LANG_ENUM,
    JAVA_LANG_OBJECT,
};
use crate::model::{
    JavaAnnotation, JavaAnnotationAttribute, JavaAnnotationMemberValue, JavaClassDecl,
    JavaModifier,
};

/// The attribute name implied by the single-member shorthand.
const DEFAULT_ATTRIBUTE_NAME: &str = "value";

const MODIFIER_TABLE: [(JavaModifier, JvmModifier); 13] = [
    (JavaModifier::Public, JvmModifier::Public),
    (JavaModifier::Protected, JvmModifier::Protected),
    (JavaModifier::Private, JvmModifier::Private),
    (JavaModifier::PackageLocal, JvmModifier::PackageLocal),
    (JavaModifier::Static, JvmModifier::Static),
    (JavaModifier::Abstract, JvmModifier::Abstract),
    (JavaModifier::Final, JvmModifier::Final),
    (JavaModifier::Native, JvmModifier::Native),
    (JavaModifier::Synchronized, JvmModifier::Synchronized),
    (JavaModifier::Strictfp, JvmModifier::Strictfp),
    (JavaModifier::Transient, JvmModifier::Transient),
    (JavaModifier::Volatile, JvmModifier::Volatile),
    (JavaModifier::Transitive, JvmModifier::Transitive),
];

/// Annotations on a declaration; empty when it has no modifier list.
#[must_use]
pub fn list_annotations(decl: &JavaClassDecl) -> &[JavaAnnotation] {
    match &decl.modifier_list {
        Some(list) => &list.annotations,
        None => &[],
    }
}

#[must_use]
pub fn find_annotation<'a>(decl: &'a JavaClassDecl, fqn: &str) -> Option<&'a JavaAnnotation> {
    list_annotations(decl)
        .iter()
        .find(|annotation| annotation.qualified_name == fqn)
}

#[must_use]
pub fn has_annotation(decl: &JavaClassDecl, fqn: &str) -> bool {
    find_annotation(decl, fqn).is_some()
}

/// Present modifiers in the fixed table order.
#[must_use]
pub fn list_modifiers(decl: &JavaClassDecl) -> Vec<JvmModifier> {
    MODIFIER_TABLE
        .iter()
        .filter(|(source, _)| decl.has_modifier(*source))
        .map(|(_, jvm)| *jvm)
        .collect()
}

#[must_use]
pub fn class_kind(decl: &JavaClassDecl) -> JvmClassKind {
    if decl.is_annotation {
        return JvmClassKind::Annotation;
    }
    if decl.is_interface {
        return JvmClassKind::Interface;
    }
    if decl.is_enum {
        return JvmClassKind::Enum;
    }
    JvmClassKind::Class
}

/// The JVM superclass of a declaration, `None` for interfaces and for
/// `java.lang.Object` itself.
#[must_use]
pub fn class_super_type(decl: &JavaClassDecl) -> Option<JvmReferenceType> {
    if decl.is_interface {
        return None;
    }
    if decl.is_enum {
        return Some(JvmReferenceType::new(JAVA_LANG_ENUM));
    }
    if let Some(base) = &decl.anonymous_base {
        if base.base_is_interface == Some(true) {
            return Some(JvmReferenceType::new(JAVA_LANG_OBJECT));
        }
        return Some(base.base_type.clone());
    }
    if decl.qualified_name.as_deref() == Some(JAVA_LANG_OBJECT) {
        return None;
    }
    if decl.extends_list.len() != 1 {
        return Some(JvmReferenceType::new(JAVA_LANG_OBJECT));
    }
    Some(decl.extends_list[0].clone())
}

/// The directly implemented (or, for interfaces, extended) interfaces.
#[must_use]
pub fn class_interfaces(decl: &JavaClassDecl) -> Vec<JvmReferenceType> {
    if let Some(base) = &decl.anonymous_base {
        if base.base_is_interface == Some(true) {
            return vec![base.base_type.clone()];
        }
        return Vec::new();
    }
    if decl.is_interface {
        decl.extends_list.clone()
    } else {
        decl.implements_list.clone()
    }
}

/// An attribute's name, defaulting to `value` for the shorthand form.
#[must_use]
pub fn annotation_attribute_name(attribute: &JavaAnnotationAttribute) -> &str {
    attribute.name.as_deref().unwrap_or(DEFAULT_ATTRIBUTE_NAME)
}

/// Convert an attribute's value, if it has one.
#[must_use]
pub fn attribute_value(attribute: &JavaAnnotationAttribute) -> Option<JvmAnnotationValue> {
    annotation_attribute_value(attribute.value.as_ref()?)
}

/// Map a source-level attribute value onto the JVM view.
///
/// References that do not resolve to an enum constant are still constant
/// expressions. Shapes outside the model are logged and dropped.
#[must_use]
pub fn annotation_attribute_value(value: &JavaAnnotationMemberValue) -> Option<JvmAnnotationValue> {
    match value {
        JavaAnnotationMemberValue::ClassAccess { class_name } => Some(JvmAnnotationValue::Class {
            class_name: class_name.clone(),
        }),
        JavaAnnotationMemberValue::Annotation(annotation) => {
            Some(JvmAnnotationValue::Nested(annotation.clone()))
        }
        JavaAnnotationMemberValue::ArrayInitializer(values) => Some(JvmAnnotationValue::Array(
            values.iter().filter_map(annotation_attribute_value).collect(),
        )),
        JavaAnnotationMemberValue::Reference {
            enum_field: Some(field),
            ..
        } => Some(JvmAnnotationValue::EnumField {
            enum_type: field.enum_type.clone(),
            field: field.field.clone(),
        }),
        JavaAnnotationMemberValue::Reference {
            enum_field: None,
            text,
        } => Some(JvmAnnotationValue::Constant { text: text.clone() }),
        JavaAnnotationMemberValue::Expression { text } => {
            Some(JvmAnnotationValue::Constant { text: text.clone() })
        }
        JavaAnnotationMemberValue::Unsupported { description } => {
            warn!(shape = %description, "unconverted annotation attribute value");
            None
        }
    }
}
