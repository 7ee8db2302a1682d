//! Leaf-key enumeration.
//!
//! Walks a schema and lists the path of every node whose kind is one of a
//! set of final kinds. Object keys are joined with `.` and prefixed with
//! `?` when the key is not required; every array level appends `[]`:
//!
//! ```text
//! server.port        required Number under a required Object
//! ?tags[]            optional Array of String
//! hosts[].?alias     optional key inside array items
//! ```
//!
//! Objects described only by `of` have no fixed keys and contribute nothing.

use indexmap::IndexMap;

use crate::node::{SchemaKind, SchemaNode, SchemaType};

/// Leaf paths of `schema`, stopping at scalar kinds.
pub fn leaf_keys(schema: &SchemaNode) -> IndexMap<String, &SchemaNode> {
    leaf_keys_with(schema, &SchemaType::SCALARS)
}

/// Leaf paths of `schema`, stopping at any of `final_types`.
pub fn leaf_keys_with<'a>(
    schema: &'a SchemaNode,
    final_types: &[SchemaType],
) -> IndexMap<String, &'a SchemaNode> {
    let mut acc = IndexMap::new();
    collect(schema, final_types, String::new(), &mut acc);
    acc
}

fn collect<'a>(
    node: &'a SchemaNode,
    final_types: &[SchemaType],
    prefix: String,
    acc: &mut IndexMap<String, &'a SchemaNode>,
) {
    if final_types.contains(&node.schema_type()) {
        acc.insert(prefix, node);
        return;
    }

    match &node.kind {
        SchemaKind::Object(rules) => {
            let Some(childs) = &rules.childs else {
                return;
            };
            for (key, child) in childs {
                let marker = if child.required { "" } else { "?" };
                let path = if prefix.is_empty() {
                    format!("{marker}{key}")
                } else {
                    format!("{prefix}.{marker}{key}")
                };
                collect(child, final_types, path, acc);
            }
        }
        SchemaKind::Array(rules) => collect(&rules.of, final_types, format!("{prefix}[]"), acc),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Childs;

    fn sample() -> SchemaNode {
        let mut listen = Childs::new();
        listen.insert("port".to_string(), SchemaNode::number().required());
        listen.insert("alias".to_string(), SchemaNode::string());

        let mut server = Childs::new();
        server.insert("name".to_string(), SchemaNode::string().required());
        server.insert(
            "listen".to_string(),
            SchemaNode::array(SchemaNode::object(listen)).required(),
        );
        server.insert("labels".to_string(), SchemaNode::map_of(SchemaNode::string()));

        let mut root = Childs::new();
        root.insert("server".to_string(), SchemaNode::object(server).required());
        root.insert("tags".to_string(), SchemaNode::array(SchemaNode::string()));
        root.insert("mode".to_string(), SchemaNode::enumeration(["a", "b"]));
        SchemaNode::object(root)
    }

    #[test]
    fn test_leaf_keys_marks_optional_and_arrays() {
        let schema = sample();
        let keys = leaf_keys(&schema);
        let paths: Vec<&str> = keys.keys().map(String::as_str).collect();
        assert_eq!(
            paths,
            vec![
                "server.name",
                "server.listen[].port",
                "server.listen[].?alias",
                "?tags[]",
                "?mode",
            ]
        );
        assert_eq!(keys["?mode"].schema_type(), SchemaType::Enum);
    }

    #[test]
    fn test_leaf_keys_with_custom_final_types() {
        let schema = sample();
        let keys = leaf_keys_with(&schema, &[SchemaType::Array, SchemaType::String]);
        let paths: Vec<&str> = keys.keys().map(String::as_str).collect();
        assert_eq!(paths, vec!["server.name", "server.listen", "?tags"]);
    }

    #[test]
    fn test_scalar_root_is_single_empty_key() {
        let schema = SchemaNode::boolean();
        let keys = leaf_keys(&schema);
        assert_eq!(keys.len(), 1);
        assert!(keys.contains_key(""));
    }
}
