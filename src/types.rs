//! Core document model for msgtrans.
//! The parser decodes into these; the serializer and pipeline consume them.

/// One position in a message-catalog document tree.
///
/// Objects keep their entries as a single ordered sequence of `(key, value)`
/// pairs: insertion order is semantically significant and survives
/// parse → transform → serialize. There is no auxiliary lookup map; nothing
/// in the pipeline looks entries up by key, it only iterates.
///
/// Numbers are stored as their original literal text, never as a parsed
/// value, so serialization reproduces the source formatting exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Object(Vec<(String, Node)>),
    Array(Vec<Node>),
    String(String),
    Number(String),
    Bool(bool),
    Null,
}

impl Node {
    /// Returns the ordered pairs if this node is an object.
    pub fn as_object(&self) -> Option<&[(String, Node)]> {
        match self {
            Node::Object(pairs) => Some(pairs),
            _ => None,
        }
    }

    /// Returns the elements if this node is an array.
    pub fn as_array(&self) -> Option<&[Node]> {
        match self {
            Node::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the text if this node is a string leaf.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Node::String(s) => Some(s),
            _ => None,
        }
    }
}

/// A complete message catalog: one root node per input file.
///
/// The pipeline expects the root to be an object of namespaces, each
/// namespace an object of entries, but the model itself does not enforce
/// that shape; any depth of nesting parses and serializes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub root: Node,
}

impl Document {
    pub fn new(root: Node) -> Self {
        Document { root }
    }

    /// The root object's ordered pairs, if the root is an object.
    pub fn namespaces(&self) -> Option<&[(String, Node)]> {
        self.root.as_object()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_as_object() {
        let node = Node::Object(vec![("a".to_string(), Node::Null)]);
        assert_eq!(node.as_object().unwrap().len(), 1);
        assert!(Node::Null.as_object().is_none());
    }

    #[test]
    fn test_as_array() {
        let node = Node::Array(vec![Node::Bool(true)]);
        assert_eq!(node.as_array().unwrap().len(), 1);
        assert!(Node::String("x".to_string()).as_array().is_none());
    }

    #[test]
    fn test_as_str() {
        assert_eq!(Node::String("hi".to_string()).as_str(), Some("hi"));
        assert!(Node::Number("1.5".to_string()).as_str().is_none());
    }

    #[test]
    fn test_document_namespaces() {
        let doc = Document::new(Node::Object(vec![(
            "app".to_string(),
            Node::Object(vec![("title".to_string(), Node::String("Hi".to_string()))]),
        )]));
        let namespaces = doc.namespaces().unwrap();
        assert_eq!(namespaces.len(), 1);
        assert_eq!(namespaces[0].0, "app");
    }

    #[test]
    fn test_structural_equality_is_order_sensitive() {
        let a = Node::Object(vec![
            ("x".to_string(), Node::Null),
            ("y".to_string(), Node::Null),
        ]);
        let b = Node::Object(vec![
            ("y".to_string(), Node::Null),
            ("x".to_string(), Node::Null),
        ]);
        assert_ne!(a, b);
    }
}
