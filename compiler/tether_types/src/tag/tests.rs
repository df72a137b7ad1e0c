use super::*;

const ALL: [ShapeTag; 12] = [
    ShapeTag::Primitive,
    ShapeTag::Boolean,
    ShapeTag::CharacterUnit,
    ShapeTag::DateValue,
    ShapeTag::Void,
    ShapeTag::Unknown,
    ShapeTag::OpaqueHostObject,
    ShapeTag::Array,
    ShapeTag::Nullable,
    ShapeTag::AsyncResult,
    ShapeTag::UserExported,
    ShapeTag::Delegate,
];

#[test]
fn tag_size() {
    assert_eq!(std::mem::size_of::<ShapeTag>(), 1);
}

#[test]
fn primitive_like_are_leaves() {
    for tag in ALL.iter().filter(|t| t.is_primitive_like()) {
        assert!((*tag as u8) < 16, "{tag} is outside the leaf range");
    }
    assert!(!ShapeTag::Void.is_primitive_like());
    assert!(!ShapeTag::OpaqueHostObject.is_primitive_like());
    assert!(!ShapeTag::UserExported.is_primitive_like());
}

#[test]
fn tag_names_are_unique() {
    let mut names: Vec<_> = ALL.iter().map(|t| t.name()).collect();
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), ALL.len());
}
