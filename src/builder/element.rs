//! Markup tree values.

use crate::compiler::Tag;
use crate::core::{Attributes, Fragment};
use crate::options::OptionsRecord;
use serde_json::Value;

/// One node of a markup tree: a tag, its attributes and its children.
///
/// Children are compiled before their parent when the tree is evaluated.
#[derive(Clone, Debug)]
pub struct Element<M> {
    pub tag: Tag<M>,
    pub attributes: Attributes,
    pub children: Vec<Node<M>>,
}

/// A child of an element: another element or an already-compiled fragment.
#[derive(Clone, Debug)]
pub enum Node<M> {
    Element(Element<M>),
    Fragment(Fragment),
}

impl<M> Element<M> {
    /// Create an element without attributes or children.
    pub fn new(tag: impl Into<Tag<M>>) -> Self {
        Self {
            tag: tag.into(),
            attributes: Attributes::new(),
            children: Vec::new(),
        }
    }

    /// Set one attribute, replacing any earlier value.
    pub fn attr(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Set several attributes at once.
    pub fn attrs(mut self, attributes: Attributes) -> Self {
        self.attributes.extend(attributes);
        self
    }

    /// Append a child element.
    pub fn child(mut self, child: Element<M>) -> Self {
        self.children.push(Node::Element(child));
        self
    }

    /// Append several child elements in order.
    pub fn children<I>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = Element<M>>,
    {
        self.children.extend(children.into_iter().map(Node::Element));
        self
    }

    /// Append an already-compiled fragment.
    pub fn fragment(mut self, fragment: impl Into<Fragment>) -> Self {
        self.children.push(Node::Fragment(fragment.into()));
        self
    }

    /// Put an options record in front of all children.
    pub fn options(mut self, options: OptionsRecord) -> Self {
        self.children.insert(0, Node::Fragment(Fragment::Options(options)));
        self
    }
}

impl<M> From<Element<M>> for Node<M> {
    fn from(element: Element<M>) -> Self {
        Node::Element(element)
    }
}

impl<M> From<Fragment> for Node<M> {
    fn from(fragment: Fragment) -> Self {
        Node::Fragment(fragment)
    }
}
