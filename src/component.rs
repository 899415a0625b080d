//! Component tree contract
//!
//! Every node in the overlay implements [`Renderable`]. Nodes learn their
//! place in the tree through a [`Lineage`] handed to them at construction:
//! the chain of ancestors from the nearest parent up to the root. The chain
//! is a plain value; parents own children, children never own or point back
//! at their parents.

use std::fmt;

use crate::geometry::Rect;
use crate::surface::Surface;

/// Position of a node as slot indices from the root (the root is `[]`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct NodePath(Vec<usize>);

impl NodePath {
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Path of the child in `slot` of this node
    pub fn child(&self, slot: usize) -> Self {
        let mut indices = self.0.clone();
        indices.push(slot);
        Self(indices)
    }

    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    pub fn depth(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("/")?;
        let parts: Vec<String> = self.0.iter().map(|i| i.to_string()).collect();
        f.write_str(&parts.join("/"))
    }
}

/// One entry of an ancestor chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ancestor {
    pub kind: &'static str,
    pub path: NodePath,
}

/// A node's own path plus its ancestors, nearest first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lineage {
    path: NodePath,
    ancestors: Vec<Ancestor>,
}

impl Lineage {
    /// Lineage of the tree root: no ancestors
    pub fn root() -> Self {
        Self::default()
    }

    /// Lineage for a new child placed in `slot` of the node this lineage
    /// belongs to, whose kind is `parent_kind`
    pub fn descend(&self, parent_kind: &'static str, slot: usize) -> Self {
        let mut ancestors = Vec::with_capacity(self.ancestors.len() + 1);
        ancestors.push(Ancestor {
            kind: parent_kind,
            path: self.path.clone(),
        });
        ancestors.extend(self.ancestors.iter().cloned());
        Self {
            path: self.path.child(slot),
            ancestors,
        }
    }

    pub fn path(&self) -> &NodePath {
        &self.path
    }

    /// Ancestors from the nearest parent to the root
    pub fn ancestors(&self) -> &[Ancestor] {
        &self.ancestors
    }

    pub fn parent(&self) -> Option<&Ancestor> {
        self.ancestors.first()
    }

    /// The root ancestor, `None` for the root itself
    pub fn root_ancestor(&self) -> Option<&Ancestor> {
        self.ancestors.last()
    }

    pub fn is_root(&self) -> bool {
        self.ancestors.is_empty()
    }
}

/// Non-fatal contract violation reported while rendering
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Diagnostic {
    /// A component was asked to render but has no drawing logic
    MissingRender { kind: &'static str, path: NodePath },
    /// A scrollable was asked to draw a section but has no section renderer
    MissingSection { kind: &'static str, path: NodePath },
}

impl Diagnostic {
    pub fn path(&self) -> &NodePath {
        match self {
            Diagnostic::MissingRender { path, .. } | Diagnostic::MissingSection { path, .. } => {
                path
            }
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::MissingRender { kind, path } => {
                write!(f, "{} at {} is missing a render implementation", kind, path)
            }
            Diagnostic::MissingSection { kind, path } => {
                write!(
                    f,
                    "{} at {} is missing a section render implementation",
                    kind, path
                )
            }
        }
    }
}

/// A node of the overlay tree
///
/// Implementors provide `render`; the default reports a
/// [`Diagnostic::MissingRender`] and draws nothing so one broken leaf does not
/// take down the overlay.
pub trait Renderable {
    /// Short name used in diagnostics and child lineages
    fn kind(&self) -> &'static str;

    fn lineage(&self) -> &Lineage;

    /// Draw at local origin (0, 0) within `width` x `height`
    fn render(&mut self, surface: &mut dyn Surface, width: i32, height: i32) {
        let _ = (width, height);
        surface.report(Diagnostic::MissingRender {
            kind: self.kind(),
            path: self.lineage().path().clone(),
        });
    }

    /// Clip to the rectangle, translate into it, render, release the clip
    fn render_absolute(
        &mut self,
        surface: &mut dyn Surface,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
    ) {
        surface.clip_rect(Rect::new(x, y, width, height));
        self.render(surface, width, height);
        surface.clip_pop();
    }
}
