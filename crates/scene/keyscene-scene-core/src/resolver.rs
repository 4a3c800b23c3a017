//! Reference resolution.
//!
//! A [`Resolver`] is a read-only view over a project's anchors plus the kind
//! registry. Anchor kinds receive a child resolver and call back into it for
//! their own references, so resolution recurses through anchor chains. Two
//! guards keep that finite: the chain of anchors currently being resolved
//! (a name seen twice is a cycle) and a nesting budget.
//!
//! Clones of one resolver share a memo of anchor positions keyed by anchor
//! and nesting level, so an anchor reached through several branches is
//! evaluated once per level. A resolver borrows the anchors immutably, which
//! keeps the memo valid for as long as the resolver lives.
//!
//! Failures never surface as errors; they produce [`Vec2::UNDEFINED`].

use std::cell::RefCell;
use std::rc::Rc;

use hashbrown::HashMap;
use log::{debug, warn};

use crate::config::DEFAULT_MAX_REFERENCE_DEPTH;
use crate::project::{ObjectMap, Project};
use crate::reference::Reference;
use crate::registry::KindRegistry;
use keyscene_api_core::Vec2;

/// Anchors on the current resolution path, innermost first.
#[derive(Debug)]
struct AnchorChain<'a> {
    name: &'a str,
    parent: Option<&'a AnchorChain<'a>>,
}

impl AnchorChain<'_> {
    fn contains(&self, name: &str) -> bool {
        let mut link = Some(self);
        while let Some(l) = link {
            if l.name == name {
                return true;
            }
            link = l.parent;
        }
        false
    }
}

/// Resolved anchor positions keyed by (anchor index, nesting level).
type Memo = RefCell<HashMap<(usize, usize), Vec2>>;

#[derive(Clone, Debug)]
pub struct Resolver<'a> {
    anchors: &'a ObjectMap,
    registry: &'a KindRegistry,
    canvas: Vec2,
    max_depth: usize,
    depth: usize,
    chain: Option<&'a AnchorChain<'a>>,
    memo: Rc<Memo>,
}

impl<'a> Resolver<'a> {
    pub fn new(anchors: &'a ObjectMap, registry: &'a KindRegistry, canvas: Vec2) -> Self {
        Self {
            anchors,
            registry,
            canvas,
            max_depth: DEFAULT_MAX_REFERENCE_DEPTH,
            depth: 0,
            chain: None,
            memo: Rc::default(),
        }
    }

    pub fn for_project(project: &'a Project, registry: &'a KindRegistry) -> Self {
        Self::new(&project.anchors, registry, project.canvas_size.as_vec2())
    }

    /// Results depend on the budget, so this starts a fresh memo.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self.memo = Rc::default();
        self
    }

    /// Logical canvas size used by fractional literals.
    pub fn canvas(&self) -> Vec2 {
        self.canvas
    }

    pub fn registry(&self) -> &'a KindRegistry {
        self.registry
    }

    /// Resolve a reference string to a point, or [`Vec2::UNDEFINED`].
    pub fn resolve(&self, reference: &str) -> Vec2 {
        self.resolve_parsed(&Reference::parse(reference))
    }

    pub fn resolve_parsed(&self, reference: &Reference<'_>) -> Vec2 {
        let base = match *reference {
            Reference::Literal {
                point, fraction, ..
            } => {
                if fraction {
                    point.component_mul(self.canvas)
                } else {
                    point
                }
            }
            Reference::Anchor { name, .. } => self.resolve_anchor(name),
        };
        match reference.offset() {
            Some(body) if base.is_defined() => match self.descend() {
                Some(next) => base + next.resolve_parsed(&Reference::literal(body)),
                None => Vec2::UNDEFINED,
            },
            _ => base,
        }
    }

    fn resolve_anchor(&self, name: &str) -> Vec2 {
        let Some((index, _, anchor)) = self.anchors.get_full(name) else {
            debug!("reference to missing anchor '{name}'");
            return Vec2::UNDEFINED;
        };
        let Some(kind) = self.registry.anchor_kind(&anchor.kind) else {
            debug!("anchor '{name}' has unregistered kind '{}'", anchor.kind);
            return Vec2::UNDEFINED;
        };
        if self.chain.is_some_and(|c| c.contains(name)) {
            warn!("reference cycle through anchor '{name}'");
            return Vec2::UNDEFINED;
        }
        let key = (index, self.depth);
        if let Some(point) = self.memo.borrow().get(&key).copied() {
            return point;
        }
        let Some(next) = self.descend() else {
            return Vec2::UNDEFINED;
        };
        let link = AnchorChain {
            name,
            parent: self.chain,
        };
        let inner = Resolver {
            anchors: next.anchors,
            registry: next.registry,
            canvas: next.canvas,
            max_depth: next.max_depth,
            depth: next.depth,
            chain: Some(&link),
            memo: next.memo,
        };
        let point = kind.resolve(&anchor.data, &inner);
        self.memo.borrow_mut().insert(key, point);
        point
    }

    /// One level deeper, or `None` when the budget is spent.
    fn descend(&self) -> Option<Resolver<'a>> {
        if self.depth >= self.max_depth {
            warn!(
                "reference nesting exceeded {} levels; resolving to undefined",
                self.max_depth
            );
            return None;
        }
        Some(Resolver {
            depth: self.depth + 1,
            ..self.clone()
        })
    }
}
