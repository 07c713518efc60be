// Reflection adapter
//
// One-shot copy from a raw host record into an inert EntityDescriptor.
// Pure: reads the record, never the provider, and never mutates anything.

use crate::error::{Error, Result};
use crate::model::{
    EntityDescriptor, EntityKind, MemberDescriptor, RawReference, Visibility,
};
use crate::reflection::host::HostRecord;

/// Produce exactly one descriptor from one host record
///
/// Fails with `UnsupportedEntityKind` when the host kind tag is not one of
/// class / struct / enum / asset. All members are extracted regardless of
/// visibility; filtering happens at render time.
pub fn describe(record: &HostRecord) -> Result<EntityDescriptor> {
    let kind = parse_kind(&record.kind)
        .ok_or_else(|| Error::unsupported_kind(&record.id, &record.kind))?;

    let display_name = record
        .display_name
        .clone()
        .unwrap_or_else(|| last_segment(&record.id).to_string());

    let category = record
        .category
        .clone()
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| "uncategorized".to_string());

    let members: Vec<MemberDescriptor> = record
        .members
        .iter()
        .map(|m| MemberDescriptor {
            name: m.name.clone(),
            type_name: m.type_name.clone(),
            visibility: parse_visibility(&m.visibility),
            description: m.description.clone(),
            default_value: m.default_value.clone(),
        })
        .collect();

    // Reference order: parent first, then explicit fields, then mentions
    // mined from member declared types.
    let mut references = Vec::new();
    if let Some(parent) = record.parent.as_deref().filter(|p| !p.is_empty()) {
        references.push(RawReference::inherits(parent));
    }
    for target in record.references.iter().filter(|r| !r.is_empty()) {
        references.push(RawReference::contains(target.as_str()));
    }
    for member in &record.members {
        for mention in extract_type_refs(&member.type_name) {
            references.push(RawReference::mention(mention));
        }
    }

    Ok(EntityDescriptor {
        id: record.id.clone(),
        kind,
        display_name,
        category,
        description: record.description.clone(),
        members,
        references,
    })
}

/// Parse a host kind tag, case-insensitive
fn parse_kind(tag: &str) -> Option<EntityKind> {
    match tag.to_ascii_lowercase().as_str() {
        "class" => Some(EntityKind::Class),
        "struct" => Some(EntityKind::Struct),
        "enum" => Some(EntityKind::Enum),
        "asset" => Some(EntityKind::Asset),
        _ => None,
    }
}

/// Parse a host visibility tag; unknown tags fall back to public
fn parse_visibility(tag: &str) -> Visibility {
    match tag.to_ascii_lowercase().as_str() {
        "private" => Visibility::Private,
        "protected" => Visibility::Protected,
        _ => Visibility::Public,
    }
}

/// Last dot-separated segment of a qualified name
fn last_segment(id: &str) -> &str {
    id.rsplit('.').next().unwrap_or(id)
}

/// Extract qualified type names mentioned in declared-type text
///
/// Strips generic wrappers, pointers and array decorations, then keeps the
/// dotted names: `Map<string, Game.Ammo*>` yields `["Game.Ammo"]`.
/// Unqualified names (`float`, `string`) are primitives, not references.
pub fn extract_type_refs(type_text: &str) -> Vec<String> {
    let mut refs = Vec::new();
    let mut current = String::new();

    for c in type_text.chars() {
        if c.is_alphanumeric() || c == '_' || c == '.' {
            current.push(c);
        } else {
            push_if_qualified(&mut refs, &current);
            current.clear();
        }
    }
    push_if_qualified(&mut refs, &current);

    refs
}

fn push_if_qualified(refs: &mut Vec<String>, candidate: &str) {
    let trimmed = candidate.trim_matches('.');
    if trimmed.contains('.') {
        refs.push(trimmed.to_string());
    }
}
