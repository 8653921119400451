// Layout snapshots
// A recorded calendar layout (CSS variables plus element tree with boxes)
// that can be replayed into a MemoryDocument outside the browser.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Error as SerdeError;

use crate::dom::{find_calendar_roots, ElementSpec, MemoryDocument, NodeId};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutSnapshot {
    /// Custom properties computed on `:root`
    pub css_variables: BTreeMap<String, String>,
    /// Subtree containing one or more calendar roots
    pub root: ElementSpec,
}

impl LayoutSnapshot {
    /// Replay into a document. Returns the calendar roots found in it.
    pub fn into_document(self) -> (MemoryDocument, Vec<NodeId>) {
        let (document, top) = MemoryDocument::from_spec(&self.css_variables, &self.root);
        let mut roots = find_calendar_roots(&document, document.body());
        if roots.is_empty() {
            log::warn!("Snapshot has no calendar root class; treating its top element as one");
            roots.push(top);
        }
        (document, roots)
    }
}

pub fn load_snapshot(path: &Path) -> Result<LayoutSnapshot> {
    if !path.exists() {
        return Err(anyhow!("snapshot {} does not exist", path.display()));
    }

    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read snapshot from {}", path.display()))?;
    let snapshot = serde_json::from_str(&data).map_err(|err| map_deser_error(err, path))?;
    Ok(snapshot)
}

pub fn save_snapshot(path: &Path, snapshot: &LayoutSnapshot) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create dir {}", parent.display()))?;
    }

    let data = serde_json::to_string_pretty(snapshot)?;
    fs::write(path, data)
        .with_context(|| format!("failed to write snapshot to {}", path.display()))?;
    Ok(())
}

fn map_deser_error(err: SerdeError, path: &Path) -> anyhow::Error {
    anyhow::Error::new(err).context(format!(
        "failed to deserialize snapshot from {}",
        path.display()
    ))
}
