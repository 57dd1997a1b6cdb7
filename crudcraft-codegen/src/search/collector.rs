//! Depth-limited flattening of a model graph into search fields.
//!
//! Relationship fields are replaced by the searchable fields of their target
//! (`author` becomes `author_name`, `author_email`) as long as the depth budget
//! and the path ceiling allow it. The walk uses an explicit stack and a visited
//! set keyed by `(model, prefix)`, so cyclic models terminate.

use super::field::{QueryPath, SearchField};
use crate::config::{DEFAULT_MAX_PATH_DEPTH, SearchConfig};
use crate::error::{CodegenError, Result};
use crate::model::{FieldDescriptor, ModelDescriptor, ModelReader};
use crate::naming;
use crudcraft::SearchPath;
use std::collections::HashSet;
use std::sync::Arc;

/// Pending expansion of one model reached through `prefix`.
struct Node {
    model: Arc<ModelDescriptor>,
    prefix: Vec<String>,
    remaining: u32,
}

pub struct SearchFieldCollector<R> {
    reader: R,
    max_path_depth: usize,
}

impl<R: ModelReader> SearchFieldCollector<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            max_path_depth: DEFAULT_MAX_PATH_DEPTH,
        }
    }

    pub fn from_config(reader: R, config: &SearchConfig) -> Self {
        Self::new(reader).with_max_path_depth(config.max_path_depth)
    }

    /// Longest flattened path, in segments, a relationship may extend.
    #[must_use]
    pub fn with_max_path_depth(mut self, max_path_depth: usize) -> Self {
        self.max_path_depth = max_path_depth;
        self
    }

    pub const fn reader(&self) -> &R {
        &self.reader
    }

    /// Resolve `name` through the reader, then [`Self::collect`].
    pub fn collect_named(&self, name: &str, depth_budget: u32) -> Result<Vec<SearchField>> {
        let root = self
            .reader
            .resolve(name)
            .ok_or_else(|| CodegenError::UnknownModel {
                name: name.to_string(),
            })?;
        Ok(self.collect(&root, depth_budget))
    }

    /// Flatten the searchable fields of `root`, following relationships while
    /// the budget lasts. A budget of 0 yields nothing.
    pub fn collect(&self, root: &ModelDescriptor, depth_budget: u32) -> Vec<SearchField> {
        let mut fields = Vec::new();
        let mut visited: HashSet<(String, String)> = HashSet::new();
        let mut stack = vec![Node {
            model: Arc::new(root.clone()),
            prefix: Vec::new(),
            remaining: depth_budget,
        }];

        while let Some(node) = stack.pop() {
            if node.remaining == 0 {
                continue;
            }
            let key = (node.model.qualified_name(), node.prefix.join("."));
            if !visited.insert(key) {
                tracing::trace!(model = node.model.name(), prefix = %node.prefix.join("."), "already visited");
                continue;
            }
            tracing::trace!(
                model = node.model.name(),
                prefix = %node.prefix.join("."),
                remaining = node.remaining,
                "expanding"
            );

            let mut children = Vec::new();
            for descriptor in node.model.searchable_fields() {
                if let Some(child) = self.expansion(&node, descriptor) {
                    children.push(child);
                    continue;
                }
                fields.push(terminal(&node.prefix, descriptor));
            }
            // Reversed so children pop in declaration order.
            stack.extend(children.into_iter().rev());
        }

        tracing::debug!(
            model = root.name(),
            depth_budget,
            fields = fields.len(),
            "collected search fields"
        );
        fields
    }

    /// The node a relationship field expands into, or `None` when it stays a terminal.
    fn expansion(&self, node: &Node, descriptor: &FieldDescriptor) -> Option<Node> {
        if !descriptor.is_relationship() {
            return None;
        }
        if node.prefix.len() + 1 >= self.max_path_depth {
            return None;
        }
        let declared = descriptor.search_depth();
        let budget_allows = node.remaining > 1 || (declared > 1 && node.remaining > 0);
        if !budget_allows {
            return None;
        }

        let target_name = descriptor.target_type()?;
        let Some(target) = self.reader.resolve(target_name) else {
            tracing::warn!(
                field = descriptor.name(),
                target = target_name,
                "relationship target cannot be resolved, searching the field itself"
            );
            return None;
        };
        if !target.has_searchable_fields() {
            return None;
        }

        let next = if declared > 0 {
            declared - 1
        } else {
            node.remaining - 1
        };
        if next == 0 {
            return None;
        }

        let mut prefix = node.prefix.clone();
        prefix.push(descriptor.name().to_string());
        Some(Node {
            model: target,
            prefix,
            remaining: next,
        })
    }
}

fn terminal(prefix: &[String], descriptor: &Arc<FieldDescriptor>) -> SearchField {
    let operator = descriptor.representative_operator();
    let mut property = naming::property_name(&prefix.join("_"), descriptor.name());
    if operator.is_size_operator() {
        property.push_str("_size");
    }
    let path: QueryPath = prefix
        .iter()
        .fold(SearchPath::root(), |path, segment| path.join(segment.as_str()))
        .get(descriptor.name());
    SearchField::new(Arc::clone(descriptor), property, path, operator)
}

/// Group fields by property name, keeping first-seen order.
pub(crate) fn group_by_property(fields: &[SearchField]) -> Vec<Vec<&SearchField>> {
    let mut groups: Vec<Vec<&SearchField>> = Vec::new();
    for field in fields {
        match groups
            .iter_mut()
            .find(|group| group.first().is_some_and(|first| first.property() == field.property()))
        {
            Some(group) => group.push(field),
            None => groups.push(vec![field]),
        }
    }
    groups
}
