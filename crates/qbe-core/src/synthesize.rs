//! Default predicates for filled example properties.
use crate::{
    expr::{Expr, FieldPath},
    inspect::Property,
    value::{EntityRef, Value},
};
use std::collections::BTreeSet;

///
/// Build the conjunction of default predicates for `filled`, skipping every
/// property whose dot path a custom fragment already consumed.
///
/// - text → case-sensitive `contains`
/// - association (reached by its key) → key equality on the key path; a
///   fragment over any of those key paths replaces the whole default
/// - anything else → equality against the runtime value
///
/// Returns `Expr::True` when nothing is left to constrain.
///
#[must_use]
pub fn synthesize(filled: &[Property], customized: &BTreeSet<String>) -> Expr {
    let predicates = filled
        .iter()
        .filter(|property| !customized.contains(property.dot_path()))
        .flat_map(|property| property_predicates(property.path(), property.value(), customized));

    Expr::all(predicates)
}

fn property_predicates(path: FieldPath, value: &Value, customized: &BTreeSet<String>) -> Vec<Expr> {
    match value {
        Value::Text(text) => vec![path.contains(text.as_str())],
        Value::Entity(associated) => {
            let keyed = key_predicates(&path, associated);
            if keyed
                .iter()
                .any(|(key_path, _)| customized.contains(key_path.as_str()))
            {
                return Vec::new();
            }

            keyed.into_iter().map(|(_, predicate)| predicate).collect()
        }
        other => vec![path.eq(other.clone())],
    }
}

// Equality on the association's key path; composite keys expand per part.
// Each predicate is returned with the path it constrains.
fn key_predicates(path: &FieldPath, associated: &EntityRef) -> Vec<(FieldPath, Expr)> {
    let model = associated.model();

    if let Some(pk) = model.primary_key() {
        let key_path = path.child(pk.name);
        let predicate = key_path.clone().eq(associated.value(pk.name));

        return vec![(key_path, predicate)];
    }

    if let Some(composite) = model.composite_key()
        && let Value::Entity(embedded) = associated.value(composite.name)
    {
        let key_path = path.child(composite.name);

        return embedded
            .model()
            .inspectable_fields()
            .filter_map(|part| {
                let value = embedded.value(part.name);
                let part_path = key_path.child(part.name);

                (!value.is_null()).then(|| (part_path.clone(), part_path.eq(value)))
            })
            .collect();
    }

    // keyless association: compare the object itself
    vec![(path.clone(), path.clone().eq(associated.clone()))]
}
