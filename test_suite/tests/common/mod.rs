//! Shared model fixtures for the integration tests.
#![allow(dead_code)]

use crudcraft::SearchOperator;
use crudcraft_codegen::{
    FieldDescriptor, ModelDescriptor, ModelRegistry, RelationshipKind, SearchField,
};
use syn::parse_quote;

/// Install a test subscriber once; `RUST_LOG=crudcraft_codegen=trace` shows collector traversal.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn properties(fields: &[SearchField]) -> Vec<&str> {
    fields.iter().map(SearchField::property).collect()
}

/// `BlogPost { title, author: BlogAuthor (depth 2) }`, `BlogAuthor { name, email, posts }`.
pub fn blog() -> ModelRegistry {
    let post = ModelDescriptor::new("BlogPost", "crate::blog")
        .with_field(FieldDescriptor::new("id", parse_quote!(Uuid)))
        .with_field(FieldDescriptor::new("title", parse_quote!(String)).searchable())
        .with_field(
            FieldDescriptor::new("author", parse_quote!(BlogAuthor))
                .searchable()
                .with_search_depth(2)
                .with_relationship(RelationshipKind::ManyToOne, "crate::blog::BlogAuthor"),
        )
        .with_field(
            FieldDescriptor::new("tags", parse_quote!(Vec<Tag>))
                .with_relationship(RelationshipKind::ManyToMany, "crate::blog::Tag"),
        );
    let author = ModelDescriptor::new("BlogAuthor", "crate::blog")
        .with_field(FieldDescriptor::new("id", parse_quote!(Uuid)))
        .with_field(FieldDescriptor::new("name", parse_quote!(String)).searchable())
        .with_field(FieldDescriptor::new("email", parse_quote!(String)).searchable())
        .with_field(
            FieldDescriptor::new("posts", parse_quote!(Vec<BlogPost>))
                .with_relationship(RelationshipKind::OneToMany, "crate::blog::BlogPost"),
        );
    let tag = ModelDescriptor::new("Tag", "crate::blog")
        .with_field(FieldDescriptor::new("id", parse_quote!(Uuid)))
        .with_field(FieldDescriptor::new("label", parse_quote!(String)));

    ModelRegistry::new()
        .with_model(post)
        .and_then(|registry| registry.with_model(author))
        .and_then(|registry| registry.with_model(tag))
        .unwrap()
}

/// `Root { child: Child }`, `Child { value }`.
pub fn root_child() -> ModelRegistry {
    ModelRegistry::new()
        .with_model(
            ModelDescriptor::new("Root", "crate").with_field(
                FieldDescriptor::new("child", parse_quote!(Child))
                    .searchable()
                    .with_relationship(RelationshipKind::OneToOne, "crate::Child"),
            ),
        )
        .and_then(|registry| {
            registry.with_model(
                ModelDescriptor::new("Child", "crate")
                    .with_field(FieldDescriptor::new("value", parse_quote!(String)).searchable()),
            )
        })
        .unwrap()
}

/// `Node { label, parent: Node, peer: Peer }` and `Peer { code, node: Node }`:
/// one self-reference and one mutual cycle, every relationship searchable.
pub fn cyclic(node_depth: u32, peer_depth: u32) -> ModelRegistry {
    let node = ModelDescriptor::new("Node", "crate::graph")
        .with_field(FieldDescriptor::new("label", parse_quote!(String)).searchable())
        .with_field(
            FieldDescriptor::new("parent", parse_quote!(Option<Node>))
                .searchable()
                .with_search_depth(node_depth)
                .with_relationship(RelationshipKind::ManyToOne, "crate::graph::Node"),
        )
        .with_field(
            FieldDescriptor::new("peers", parse_quote!(Vec<Peer>))
                .searchable()
                .with_operators([SearchOperator::In])
                .with_search_depth(peer_depth)
                .with_relationship(RelationshipKind::OneToMany, "crate::graph::Peer"),
        );
    let peer = ModelDescriptor::new("Peer", "crate::graph")
        .with_field(FieldDescriptor::new("code", parse_quote!(i32)).searchable())
        .with_field(
            FieldDescriptor::new("node", parse_quote!(Node))
                .searchable()
                .with_search_depth(peer_depth)
                .with_relationship(RelationshipKind::ManyToOne, "crate::graph::Node"),
        );
    ModelRegistry::new()
        .with_model(node)
        .and_then(|registry| registry.with_model(peer))
        .unwrap()
}
