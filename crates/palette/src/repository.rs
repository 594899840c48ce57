use std::sync::RwLock;

use crate::{
    error::{Error, Result},
    palette::PaletteBuilderPayload,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CanUndoRedo {
    pub can_undo: bool,
    pub can_redo: bool,
}

/// Persistence collaborator of a [`crate::PaletteBuilder`].
///
/// Every mutation of the builder hands a full snapshot to [`save`](Self::save).
/// History, if any, is kept by the implementation: `undo` and `redo` return
/// the snapshot to restore, or `None` when there is nothing to step to.
pub trait PaletteRepository: Send + Sync {
    fn save(&self, payload: &PaletteBuilderPayload) -> Result<()>;
    fn load(&self) -> Result<Option<PaletteBuilderPayload>>;
    fn undo(&self) -> Result<Option<PaletteBuilderPayload>>;
    fn redo(&self) -> Result<Option<PaletteBuilderPayload>>;
    fn can_undo_redo(&self) -> Result<CanUndoRedo>;
}

/// Keeps the latest snapshot in memory. It records no history.
#[derive(Debug, Default)]
pub struct InMemoryPaletteRepository {
    latest: RwLock<Option<PaletteBuilderPayload>>,
}

impl InMemoryPaletteRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_payload(payload: PaletteBuilderPayload) -> Self {
        Self {
            latest: RwLock::new(Some(payload)),
        }
    }
}

fn poisoned<T>(_: T) -> Error {
    Error::Storage("in-memory repository lock poisoned".to_string())
}

impl PaletteRepository for InMemoryPaletteRepository {
    fn save(&self, payload: &PaletteBuilderPayload) -> Result<()> {
        let mut latest = self.latest.write().map_err(poisoned)?;
        *latest = Some(payload.clone());
        Ok(())
    }

    fn load(&self) -> Result<Option<PaletteBuilderPayload>> {
        let latest = self.latest.read().map_err(poisoned)?;
        Ok(latest.clone())
    }

    fn undo(&self) -> Result<Option<PaletteBuilderPayload>> {
        Ok(None)
    }

    fn redo(&self) -> Result<Option<PaletteBuilderPayload>> {
        Ok(None)
    }

    fn can_undo_redo(&self) -> Result<CanUndoRedo> {
        Ok(CanUndoRedo::default())
    }
}
