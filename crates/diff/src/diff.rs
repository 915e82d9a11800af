// crates/diff/src/diff.rs
use serde_json::{Map, Value};
use std::collections::BTreeSet;

use crate::template::{ScalarField, Section, is_known_key};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Added,
    Removed,
    Updated,
}

impl ChangeKind {
    fn between(old: Option<&Value>, new: Option<&Value>) -> Self {
        match (old, new) {
            (None, Some(_)) => Self::Added,
            (Some(_), None) => Self::Removed,
            _ => Self::Updated,
        }
    }

    #[must_use]
    pub const fn marker(self) -> &'static str {
        match self {
            Self::Added => "[+]",
            Self::Removed => "[-]",
            Self::Updated => "[~]",
        }
    }
}

/// A change to a whole top-level value such as `Description`.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueChange {
    pub old: Option<Value>,
    pub new: Option<Value>,
}

impl ValueChange {
    #[must_use]
    pub fn kind(&self) -> ChangeKind {
        ChangeKind::between(self.old.as_ref(), self.new.as_ref())
    }
}

/// A leaf-level difference somewhere inside an entity.
///
/// `path` is relative to the entity; an empty path means the entity value
/// itself was replaced.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyChange {
    pub path: Vec<String>,
    pub old: Option<Value>,
    pub new: Option<Value>,
}

impl PropertyChange {
    #[must_use]
    pub fn kind(&self) -> ChangeKind {
        ChangeKind::between(self.old.as_ref(), self.new.as_ref())
    }

    /// Dotted rendering of the path, with array indices as `[n]`.
    #[must_use]
    pub fn path_string(&self) -> String {
        let mut out = String::new();
        for segment in &self.path {
            if !out.is_empty() && !segment.starts_with('[') {
                out.push('.');
            }
            out.push_str(segment);
        }
        out
    }
}

/// A parameter, output, condition, mapping, metadata entry or unknown
/// top-level key that differs.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityChange {
    pub logical_id: String,
    pub kind: ChangeKind,
    pub old: Option<Value>,
    pub new: Option<Value>,
    /// Only populated for [`ChangeKind::Updated`].
    pub changes: Vec<PropertyChange>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResourceChange {
    pub logical_id: String,
    pub kind: ChangeKind,
    pub old_type: Option<String>,
    pub new_type: Option<String>,
    /// Changes below `Properties`, paths relative to `Properties`.
    pub property_changes: Vec<PropertyChange>,
    /// Changes to every other resource attribute (`DependsOn`, `Metadata`, ...).
    pub other_changes: Vec<PropertyChange>,
}

impl ResourceChange {
    #[must_use]
    pub fn type_changed(&self) -> bool {
        self.kind == ChangeKind::Updated && self.old_type != self.new_type
    }

    /// The resource type to show for this change, preferring the new one.
    #[must_use]
    pub fn resource_type(&self) -> &str {
        self.new_type
            .as_deref()
            .or(self.old_type.as_deref())
            .unwrap_or("<unknown type>")
    }
}

/// Result of comparing two template documents.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TemplateDiff {
    pub format_version: Option<ValueChange>,
    pub transform: Option<ValueChange>,
    pub description: Option<ValueChange>,
    pub metadata: Vec<EntityChange>,
    pub parameters: Vec<EntityChange>,
    pub mappings: Vec<EntityChange>,
    pub conditions: Vec<EntityChange>,
    pub resources: Vec<ResourceChange>,
    pub outputs: Vec<EntityChange>,
    /// Top-level keys the differ does not model, e.g. stack names of a
    /// multi-stack document.
    pub unknown: Vec<EntityChange>,
}

impl TemplateDiff {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.differences_count() == 0
    }

    /// Number of changed top-level values and entities.
    #[must_use]
    pub fn differences_count(&self) -> usize {
        let scalars = [&self.format_version, &self.transform, &self.description]
            .iter()
            .filter(|c| c.is_some())
            .count();
        scalars
            + self.metadata.len()
            + self.parameters.len()
            + self.mappings.len()
            + self.conditions.len()
            + self.resources.len()
            + self.outputs.len()
            + self.unknown.len()
    }

    #[must_use]
    pub fn scalar(&self, field: ScalarField) -> Option<&ValueChange> {
        match field {
            ScalarField::FormatVersion => self.format_version.as_ref(),
            ScalarField::Transform => self.transform.as_ref(),
            ScalarField::Description => self.description.as_ref(),
        }
    }

    /// Entity changes of a non-resource section. `Resources` yields an empty
    /// slice; use [`TemplateDiff::resources`] for it.
    #[must_use]
    pub fn entities(&self, section: Section) -> &[EntityChange] {
        match section {
            Section::Metadata => &self.metadata,
            Section::Parameters => &self.parameters,
            Section::Mappings => &self.mappings,
            Section::Conditions => &self.conditions,
            Section::Outputs => &self.outputs,
            Section::Resources => &[],
        }
    }

    fn entities_mut(&mut self, section: Section) -> Option<&mut Vec<EntityChange>> {
        match section {
            Section::Metadata => Some(&mut self.metadata),
            Section::Parameters => Some(&mut self.parameters),
            Section::Mappings => Some(&mut self.mappings),
            Section::Conditions => Some(&mut self.conditions),
            Section::Outputs => Some(&mut self.outputs),
            Section::Resources => None,
        }
    }

    fn scalar_mut(&mut self, field: ScalarField) -> &mut Option<ValueChange> {
        match field {
            ScalarField::FormatVersion => &mut self.format_version,
            ScalarField::Transform => &mut self.transform,
            ScalarField::Description => &mut self.description,
        }
    }
}

/// Compare two template documents structurally.
///
/// Documents that are not JSON objects are compared as a whole and reported
/// as a single unknown change named `<root>`.
#[must_use]
pub fn diff_template(old: &Value, new: &Value) -> TemplateDiff {
    let mut diff = TemplateDiff::default();

    let (Some(old_doc), Some(new_doc)) = (old.as_object(), new.as_object()) else {
        if old != new {
            diff.unknown.push(entity_change("<root>", Some(old), Some(new)));
        }
        return diff;
    };

    for field in ScalarField::ALL {
        let (o, n) = (old_doc.get(field.key()), new_doc.get(field.key()));
        if o != n {
            *diff.scalar_mut(field) = Some(ValueChange {
                old: o.cloned(),
                new: n.cloned(),
            });
        }
    }

    for section in Section::ALL {
        let key = section.key();
        let (o, n) = (old_doc.get(key), new_doc.get(key));
        if o == n {
            continue;
        }
        let (Some(old_map), Some(new_map)) = (as_section(o), as_section(n)) else {
            // Not a map; keep the raw values.
            diff.unknown.push(entity_change(key, o, n));
            continue;
        };
        if let Some(entities) = diff.entities_mut(section) {
            *entities = diff_entities(&old_map, &new_map);
        } else {
            diff.resources = diff_resources(&old_map, &new_map);
        }
    }

    for key in union_keys(old_doc, new_doc) {
        if is_known_key(key) {
            continue;
        }
        let (o, n) = (old_doc.get(key), new_doc.get(key));
        if o != n {
            diff.unknown.push(entity_change(key, o, n));
        }
    }

    diff
}

/// Deep comparison of two values, appending one [`PropertyChange`] per
/// differing leaf. Objects are compared key by key, arrays element by
/// element when their lengths match, everything else by equality.
pub fn diff_values(
    path: &mut Vec<String>,
    old: &Value,
    new: &Value,
    out: &mut Vec<PropertyChange>,
) {
    match (old, new) {
        (Value::Object(a), Value::Object(b)) => {
            for key in union_keys(a, b) {
                match (a.get(key), b.get(key)) {
                    (Some(x), Some(y)) => {
                        if x != y {
                            path.push(key.clone());
                            diff_values(path, x, y, out);
                            path.pop();
                        }
                    }
                    (x, y) => {
                        let mut leaf = path.clone();
                        leaf.push(key.clone());
                        out.push(PropertyChange {
                            path: leaf,
                            old: x.cloned(),
                            new: y.cloned(),
                        });
                    }
                }
            }
        }
        (Value::Array(a), Value::Array(b)) if a.len() == b.len() => {
            for (i, (x, y)) in a.iter().zip(b).enumerate() {
                if x != y {
                    path.push(format!("[{i}]"));
                    diff_values(path, x, y, out);
                    path.pop();
                }
            }
        }
        _ => {
            if old != new {
                out.push(PropertyChange {
                    path: path.clone(),
                    old: Some(old.clone()),
                    new: Some(new.clone()),
                });
            }
        }
    }
}

fn as_section(value: Option<&Value>) -> Option<Map<String, Value>> {
    match value {
        None => Some(Map::new()),
        Some(Value::Object(map)) => Some(map.clone()),
        Some(_) => None,
    }
}

fn union_keys<'a>(a: &'a Map<String, Value>, b: &'a Map<String, Value>) -> BTreeSet<&'a String> {
    a.keys().chain(b.keys()).collect()
}

fn entity_change(id: &str, old: Option<&Value>, new: Option<&Value>) -> EntityChange {
    let kind = ChangeKind::between(old, new);
    let mut changes = Vec::new();
    if let (Some(o), Some(n)) = (old, new) {
        diff_values(&mut Vec::new(), o, n, &mut changes);
    }
    EntityChange {
        logical_id: id.to_string(),
        kind,
        old: old.cloned(),
        new: new.cloned(),
        changes,
    }
}

fn diff_entities(old: &Map<String, Value>, new: &Map<String, Value>) -> Vec<EntityChange> {
    union_keys(old, new)
        .into_iter()
        .filter_map(|id| {
            let (o, n) = (old.get(id), new.get(id));
            (o != n).then(|| entity_change(id, o, n))
        })
        .collect()
}

fn resource_type(resource: Option<&Value>) -> Option<String> {
    resource?.get("Type")?.as_str().map(str::to_string)
}

fn diff_resources(old: &Map<String, Value>, new: &Map<String, Value>) -> Vec<ResourceChange> {
    let empty = Value::Object(Map::new());
    let mut changes = Vec::new();

    for id in union_keys(old, new) {
        let (o, n) = (old.get(id), new.get(id));
        if o == n {
            continue;
        }
        let mut change = ResourceChange {
            logical_id: id.clone(),
            kind: ChangeKind::between(o, n),
            old_type: resource_type(o),
            new_type: resource_type(n),
            property_changes: Vec::new(),
            other_changes: Vec::new(),
        };

        if let (Some(o), Some(n)) = (o, n) {
            match (o.as_object(), n.as_object()) {
                (Some(old_res), Some(new_res)) => {
                    diff_values(
                        &mut Vec::new(),
                        old_res.get("Properties").unwrap_or(&empty),
                        new_res.get("Properties").unwrap_or(&empty),
                        &mut change.property_changes,
                    );
                    for key in union_keys(old_res, new_res) {
                        if key == "Type" || key == "Properties" {
                            continue;
                        }
                        let mut path = vec![key.clone()];
                        match (old_res.get(key), new_res.get(key)) {
                            (Some(x), Some(y)) => {
                                diff_values(&mut path, x, y, &mut change.other_changes);
                            }
                            (x, y) => change.other_changes.push(PropertyChange {
                                path,
                                old: x.cloned(),
                                new: y.cloned(),
                            }),
                        }
                    }
                }
                _ => diff_values(&mut Vec::new(), o, n, &mut change.other_changes),
            }
        }

        // Missing `Properties` equals `{}`.
        if change.kind == ChangeKind::Updated
            && !change.type_changed()
            && change.property_changes.is_empty()
            && change.other_changes.is_empty()
        {
            continue;
        }
        changes.push(change);
    }

    changes
}
