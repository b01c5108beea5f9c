//! Read-time joins across cached collections.
//!
//! The backend never joins, so every relationship is rebuilt here by
//! comparing canonical identifiers. A missing link is never an error: it
//! resolves to None and the view layer supplies a fallback label.
//!
//! When a collection carries duplicate identifiers, the first record in
//! collection order wins. `JoinIndex` preserves that rule.

use serde_json::Value;
use std::collections::HashMap;
use tracing::warn;

use crate::models::field_utils::resolve_id;
use crate::models::{Client, Entity, Inspection, Permit, Project, RecordId};

/// Join over raw records.
///
/// Resolves the source's foreign key through `source_fk_aliases`, then returns
/// the first target whose identifier (through `target_id_aliases`) is equal.
pub fn join<'a>(
    source: &Value,
    source_fk_aliases: &[&str],
    targets: &'a [Value],
    target_id_aliases: &[&str],
) -> Option<&'a Value> {
    let key = resolve_id(source, source_fk_aliases)?;
    targets
        .iter()
        .find(|target| resolve_id(target, target_id_aliases).as_ref() == Some(&key))
}

pub fn find_by_id<'a, T: Entity>(records: &'a [T], id: &RecordId) -> Option<&'a T> {
    records.iter().find(|r| r.id() == Some(id))
}

/// Typed join: the record a foreign key points at, if both exist
pub fn join_one<'a, T: Entity>(foreign_key: Option<&RecordId>, targets: &'a [T]) -> Option<&'a T> {
    find_by_id(targets, foreign_key?)
}

/// Children whose foreign key points at `parent_id`, in collection order
pub fn join_many<'a, C, F>(
    parent_id: Option<&RecordId>,
    children: &'a [C],
    foreign_key: F,
) -> Vec<&'a C>
where
    F: Fn(&C) -> Option<&RecordId>,
{
    let Some(parent_id) = parent_id else {
        return Vec::new();
    };
    children
        .iter()
        .filter(|child| foreign_key(child) == Some(parent_id))
        .collect()
}

/// Identifiers that appear on more than one record, in first-seen order
pub fn find_duplicate_ids<T: Entity>(records: &[T]) -> Vec<RecordId> {
    let mut seen: HashMap<&RecordId, usize> = HashMap::new();
    let mut duplicates = Vec::new();
    for id in records.iter().filter_map(Entity::id) {
        let count = seen.entry(id).or_insert(0);
        *count += 1;
        if *count == 2 {
            duplicates.push(id.clone());
        }
    }
    duplicates
}

/// Identifier → record index over one collection.
///
/// Answers exactly what a linear first-match scan would, including on
/// collections with duplicate identifiers.
pub struct JoinIndex<'a, T> {
    by_id: HashMap<&'a RecordId, &'a T>,
}

impl<'a, T: Entity> JoinIndex<'a, T> {
    /// Build the index, logging duplicate identifiers
    pub fn build(records: &'a [T]) -> Self {
        Self::build_with_duplicates(records, |id| {
            warn!("duplicate {} id {}; first record wins", T::KIND, id);
        })
    }

    /// Build the index, calling `on_duplicate` for every record that loses
    /// to an earlier one with the same identifier
    pub fn build_with_duplicates<F>(records: &'a [T], mut on_duplicate: F) -> Self
    where
        F: FnMut(&RecordId),
    {
        let mut by_id = HashMap::with_capacity(records.len());
        for record in records {
            if let Some(id) = record.id() {
                if by_id.contains_key(id) {
                    on_duplicate(id);
                } else {
                    by_id.insert(id, record);
                }
            }
        }
        Self { by_id }
    }

    pub fn get(&self, id: Option<&RecordId>) -> Option<&'a T> {
        id.and_then(|id| self.by_id.get(id).copied())
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

// ===== Chained joins =====

pub fn permit_project<'a>(permit: &Permit, projects: &'a [Project]) -> Option<&'a Project> {
    join_one(permit.project_id.as_ref(), projects)
}

pub fn project_client<'a>(project: &Project, clients: &'a [Client]) -> Option<&'a Client> {
    join_one(project.client_id.as_ref(), clients)
}

/// Permit → project → client; None at the first broken link
pub fn permit_client<'a>(
    permit: &Permit,
    projects: &[Project],
    clients: &'a [Client],
) -> Option<&'a Client> {
    project_client(permit_project(permit, projects)?, clients)
}

/// The inspection's project. Inspections recorded without a project
/// reference fall back to the project of their permit.
pub fn inspection_project<'a>(
    inspection: &Inspection,
    permits: &[Permit],
    projects: &'a [Project],
) -> Option<&'a Project> {
    match inspection.project_id.as_ref() {
        Some(project_id) => find_by_id(projects, project_id),
        None => {
            let permit = join_one(inspection.permit_id.as_ref(), permits)?;
            permit_project(permit, projects)
        }
    }
}
