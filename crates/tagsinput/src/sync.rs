//! # Display Synchronization
//!
//! A [`Widget`] is a [`TagCollection`] with the identity the display surface
//! needs: a model id and the front-end module that renders it. The widget is
//! the authority; the display holds a mirror and talks to it through
//! [`SyncMessage`]s:
//!
//! - `{"method": "update", "state": {...}}` carries a partial state. Coming
//!   from the display it proposes changes; going to the display it pushes the
//!   current state.
//! - `{"method": "request_state"}` asks for the full state.
//!
//! When an update from the display is rejected, [`Widget::handle_message`]
//! returns the error to the caller, and [`Widget::revert_message`] builds the
//! full-state update the display needs to undo its optimistic change.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::attributes::Attribute;
use crate::error::Result;
use crate::state::{FrontendModule, ModelIdentity, WidgetState};
use crate::widgets::{TagCollection, WidgetKind};

/// A message exchanged with the display surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum SyncMessage {
    Update { state: Map<String, Value> },
    RequestState,
}

impl SyncMessage {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// A live tag widget.
#[derive(Debug, Clone, PartialEq)]
pub struct Widget {
    model_id: Uuid,
    module: FrontendModule,
    collection: TagCollection,
}

impl Widget {
    pub fn new(collection: TagCollection) -> Self {
        Self::with_module(collection, FrontendModule::default())
    }

    pub fn with_module(collection: TagCollection, module: FrontendModule) -> Self {
        Self {
            model_id: Uuid::new_v4(),
            module,
            collection,
        }
    }

    /// Creates a widget from a full state snapshot, validating its value.
    pub fn from_state(state: WidgetState) -> Result<Self> {
        let module = state.identity.module();
        let collection = TagCollection::from_attribute_state(state.attributes)?;
        Ok(Self::with_module(collection, module))
    }

    pub fn model_id(&self) -> Uuid {
        self.model_id
    }

    pub fn kind(&self) -> WidgetKind {
        self.collection.kind()
    }

    pub fn module(&self) -> &FrontendModule {
        &self.module
    }

    pub fn collection(&self) -> &TagCollection {
        &self.collection
    }

    pub fn collection_mut(&mut self) -> &mut TagCollection {
        &mut self.collection
    }

    /// Full state to push to the display surface.
    pub fn get_state(&self) -> WidgetState {
        WidgetState {
            identity: ModelIdentity::new(self.kind(), &self.module),
            attributes: self.collection.attribute_state(),
        }
    }

    /// Applies a partial state update as a unit. See [`TagCollection::set_state`].
    pub fn set_state(&mut self, patch: &Map<String, Value>) -> Result<Vec<Attribute>> {
        match self.collection.set_state(patch) {
            Ok(changed) => {
                tracing::trace!(
                    model_id = %self.model_id,
                    kind = %self.kind(),
                    changed = changed.len(),
                    "applied state update"
                );
                Ok(changed)
            }
            Err(err) => {
                tracing::debug!(
                    model_id = %self.model_id,
                    kind = %self.kind(),
                    error = %err,
                    "rejected state update"
                );
                Err(err)
            }
        }
    }

    /// Handles one message from the display surface.
    ///
    /// Returns the reply to send back, if any. Accepted updates need no reply.
    pub fn handle_message(&mut self, message: SyncMessage) -> Result<Option<SyncMessage>> {
        match message {
            SyncMessage::Update { state } => {
                self.set_state(&state)?;
                Ok(None)
            }
            SyncMessage::RequestState => Ok(Some(self.state_message()?)),
        }
    }

    /// The update that resets the display to the authoritative state.
    pub fn revert_message(&self) -> Result<SyncMessage> {
        self.state_message()
    }

    fn state_message(&self) -> Result<SyncMessage> {
        Ok(SyncMessage::Update {
            state: self.get_state().to_map()?,
        })
    }
}
