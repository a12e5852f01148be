use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::action::Action;
use crate::error::PaintResult;
use crate::focus::FocusSize;
use crate::geometry::Transform;
use crate::tools::{BrushSettings, ToolKind};
use crate::util::time;

/// Everything needed to rebuild a drawing: the action log plus the view
/// and tool settings it was made with. The redo buffer is not kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentSnapshot {
    pub actions: Vec<Action>,
    pub transform: Transform,
    pub focus: FocusSize,
    pub brush: BrushSettings,
    #[serde(default)]
    pub tool: ToolKind,
    /// Crate version that wrote the snapshot
    pub version: String,
    /// Seconds since the UNIX epoch
    pub timestamp: u64,
}

impl DocumentSnapshot {
    pub fn new(
        actions: Vec<Action>,
        transform: Transform,
        focus: FocusSize,
        brush: BrushSettings,
        tool: ToolKind,
    ) -> Self {
        Self {
            actions,
            transform,
            focus,
            brush,
            tool,
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: time::timestamp_secs(),
        }
    }

    pub fn to_json(&self) -> PaintResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> PaintResult<Self> {
        let snapshot: Self = serde_json::from_str(json)?;
        if snapshot.version != env!("CARGO_PKG_VERSION") {
            log::warn!(
                "Snapshot version {} differs from current version {}",
                snapshot.version,
                env!("CARGO_PKG_VERSION")
            );
        }
        Ok(snapshot)
    }

    /// Writes the snapshot as pretty-printed JSON
    pub fn save(&self, path: impl AsRef<Path>) -> PaintResult<()> {
        let path = path.as_ref();
        fs::write(path, self.to_json()?)?;
        log::info!("Saved {} actions to {}", self.actions.len(), path.display());
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> PaintResult<Self> {
        let path = path.as_ref();
        let snapshot = Self::from_json(&fs::read_to_string(path)?)?;
        log::info!("Loaded {} actions from {}", snapshot.actions.len(), path.display());
        Ok(snapshot)
    }
}
