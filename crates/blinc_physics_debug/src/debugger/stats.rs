//! Per-update reporting

use crate::geometry::GeometryIssue;
use crate::shape::ShapeId;
use crate::world::BodyId;
use thiserror::Error;

/// Counters for one [`ShapeDebugger::update`](super::ShapeDebugger::update)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SyncStats {
    /// Renderables tracked after the update
    pub tracked: usize,
    /// Renderables built during the update
    pub created: usize,
    /// Renderables reused in place
    pub reused: usize,
    /// Trailing renderables released at the end of the update
    pub removed: usize,
    /// Diagnostics raised while building geometry
    pub diagnostics: usize,
}

impl SyncStats {
    /// Whether the set of renderables changed
    pub fn changed(&self) -> bool {
        self.created > 0 || self.removed > 0
    }
}

/// Geometry issue tied to the body and shape it came from
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{shape} on body {body:?}: {issue}")]
pub struct Diagnostic {
    pub body: BodyId,
    pub shape: ShapeId,
    #[source]
    pub issue: GeometryIssue,
}
