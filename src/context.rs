//! Application Context
//!
//! Shared state provided via Leptos Context API.

use leptos::prelude::*;
use leptos::reactive::owner::LocalStorage;
use leptos_dragdrop::DndSignals;

use crate::api::{ApiClient, HttpTaskGateway};
use crate::board::BoardController;
use crate::config::AppConfig;
use crate::models::Project;
use crate::store::BoardStore;

/// Controller wired to the live store and the HTTP backend
pub type BoardHandle = BoardController<BoardStore, HttpTaskGateway>;

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Trigger to reload data from backend - read
    pub reload_trigger: ReadSignal<u32>,
    /// Trigger to reload data from backend - write
    set_reload_trigger: WriteSignal<u32>,
    /// Project whose board is shown - read
    pub current_project: ReadSignal<Option<Project>>,
    /// Project whose board is shown - write
    set_current_project: WriteSignal<Option<Project>>,
    /// Drag state shared by every board
    pub dnd: DndSignals,
    config: StoredValue<AppConfig>,
    client: StoredValue<ApiClient, LocalStorage>,
    /// Controller of the mounted board, with its registration token
    board: StoredValue<Option<(u64, BoardHandle)>, LocalStorage>,
    next_board_token: StoredValue<u64>,
}

impl AppContext {
    pub fn new(
        reload_trigger: (ReadSignal<u32>, WriteSignal<u32>),
        current_project: (ReadSignal<Option<Project>>, WriteSignal<Option<Project>>),
        dnd: DndSignals,
        config: AppConfig,
        client: ApiClient,
    ) -> Self {
        Self {
            reload_trigger: reload_trigger.0,
            set_reload_trigger: reload_trigger.1,
            current_project: current_project.0,
            set_current_project: current_project.1,
            dnd,
            config: StoredValue::new(config),
            client: StoredValue::new_local(client),
            board: StoredValue::new_local(None),
            next_board_token: StoredValue::new(0),
        }
    }

    /// Trigger a reload of the board and project list
    pub fn reload(&self) {
        self.set_reload_trigger.update(|v| *v += 1);
    }

    pub fn select_project(&self, project: Option<Project>) {
        self.set_current_project.set(project);
    }

    pub fn config(&self) -> AppConfig {
        self.config.get_value()
    }

    pub fn client(&self) -> ApiClient {
        self.client.get_value()
    }

    /// Register the controller that receives drops. Returns the token
    /// to pass to [`AppContext::release_board`].
    pub fn register_board(&self, board: BoardHandle) -> u64 {
        let token = self.next_board_token.get_value() + 1;
        self.next_board_token.set_value(token);
        self.board.set_value(Some((token, board)));
        token
    }

    /// Unregister, unless a newer board has already replaced this one
    pub fn release_board(&self, token: u64) {
        self.board.update_value(|board| {
            if board.as_ref().is_some_and(|(current, _)| *current == token) {
                *board = None;
            }
        });
    }

    pub fn board(&self) -> Option<BoardHandle> {
        self.board.with_value(|board| board.as_ref().map(|(_, handle)| handle.clone()))
    }
}

pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
