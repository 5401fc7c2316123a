//! Widget registry for one host session.
//!
//! The manager creates widgets with the configured defaults, routes display
//! messages to them by model id and drops them when the host closes them.
//! Nothing outlives the manager.

use std::collections::HashMap;

use serde_json::Value;
use uuid::Uuid;

use crate::config::TagsConfig;
use crate::error::{Result, TagsError};
use crate::state::{FrontendModule, WidgetState};
use crate::sync::{SyncMessage, Widget};
use crate::widgets::{TagCollection, WidgetKind};

#[derive(Debug, Default)]
pub struct WidgetManager {
    config: TagsConfig,
    widgets: HashMap<Uuid, Widget>,
}

impl WidgetManager {
    pub fn new(config: TagsConfig) -> Self {
        Self {
            config,
            widgets: HashMap::new(),
        }
    }

    pub fn config(&self) -> &TagsConfig {
        &self.config
    }

    fn module(&self) -> FrontendModule {
        FrontendModule {
            name: self.config.module_name.clone(),
            version: self.config.module_version.clone(),
        }
    }

    /// Creates an empty widget of `kind` with the configured defaults.
    pub fn create(&mut self, kind: WidgetKind) -> Result<Uuid> {
        let collection = TagCollection::from_config(kind, &self.config)?;
        Ok(self.insert(Widget::with_module(collection, self.module())))
    }

    /// Creates a widget from a full state object sent by the display surface.
    pub fn open(&mut self, state: Value) -> Result<Uuid> {
        let widget = Widget::from_state(WidgetState::from_value(state)?)?;
        Ok(self.insert(widget))
    }

    /// Takes ownership of an already built widget.
    pub fn insert(&mut self, widget: Widget) -> Uuid {
        let id = widget.model_id();
        tracing::debug!(model_id = %id, kind = %widget.kind(), "opened widget");
        self.widgets.insert(id, widget);
        id
    }

    pub fn get(&self, id: Uuid) -> Result<&Widget> {
        self.widgets.get(&id).ok_or(TagsError::WidgetNotFound(id))
    }

    pub fn get_mut(&mut self, id: Uuid) -> Result<&mut Widget> {
        self.widgets
            .get_mut(&id)
            .ok_or(TagsError::WidgetNotFound(id))
    }

    /// Routes a display message to its widget. See [`Widget::handle_message`].
    pub fn handle_message(&mut self, id: Uuid, message: SyncMessage) -> Result<Option<SyncMessage>> {
        self.get_mut(id)?.handle_message(message)
    }

    /// Releases a widget and hands it back to the caller.
    pub fn close(&mut self, id: Uuid) -> Result<Widget> {
        let widget = self
            .widgets
            .remove(&id)
            .ok_or(TagsError::WidgetNotFound(id))?;
        tracing::debug!(model_id = %id, kind = %widget.kind(), "closed widget");
        Ok(widget)
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    /// Model ids of all open widgets, in no particular order.
    pub fn ids(&self) -> impl Iterator<Item = Uuid> + '_ {
        self.widgets.keys().copied()
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;

    pub struct ManagerFixture {
        pub manager: WidgetManager,
        pub ids: Vec<Uuid>,
    }

    impl Default for ManagerFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl ManagerFixture {
        pub fn new() -> Self {
            Self {
                manager: WidgetManager::default(),
                ids: Vec::new(),
            }
        }

        pub fn with_config(config: TagsConfig) -> Self {
            Self {
                manager: WidgetManager::new(config),
                ids: Vec::new(),
            }
        }

        pub fn with_widget(mut self, kind: WidgetKind) -> Self {
            let id = self.manager.create(kind).unwrap();
            self.ids.push(id);
            self
        }

        pub fn with_every_kind(self) -> Self {
            WidgetKind::ALL
                .into_iter()
                .fold(self, |fixture, kind| fixture.with_widget(kind))
        }
    }
}
