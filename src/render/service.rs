//! Render coordination.
//!
//! Provides the state machine that mediates between input actions, store worker responses
//! and link-open outcomes, and applies them to the view state.

use crate::contact::{spawn_open, whatsapp_url, LinkLauncher, OpenOutcome};
use crate::error::{MedlistError, Result};
use crate::input::InputAction;
use crate::listing::{
    ActionOutcome, AllowDelete, DeletePolicy, LabOrdersGuard, ListPanel, RecordHandler,
    RowAction, RowActionDispatcher,
};
use crate::records::{Lab, Medication, Record, RecordKind};
use crate::render::protocol::{RequestId, StoreCommand, StoreResponse};
use crate::render::ui::state::{RecordDetails, StatusLine, ViewState};
use crate::store::RecordStore;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Shown when a row action arrives before the records are loaded
const BUSY_MESSAGE: &str = "جاري التحميل، انتظر حتى تظهر السجلات";

/// Edit/delete requests collected while dispatching a row action
#[derive(Debug, Default)]
struct RowRequests {
    edit: Option<RecordDetails>,
    delete: Option<(RecordKind, String)>,
}

impl RecordHandler<Lab> for RowRequests {
    fn on_edit(&mut self, lab: &Lab) {
        self.edit = Some(RecordDetails::from(lab));
    }

    fn on_delete(&mut self, lab: &Lab) {
        self.delete = Some((RecordKind::Lab, lab.id.clone()));
    }
}

impl RecordHandler<Medication> for RowRequests {
    fn on_edit(&mut self, med: &Medication) {
        self.edit = Some(RecordDetails::from(med));
    }

    fn on_delete(&mut self, med: &Medication) {
        self.delete = Some((RecordKind::Medication, med.id.clone()));
    }
}

/// Dispatch `action` on the selected row of `panel`, if any
fn dispatch_selected<R: Record>(
    action: RowAction,
    panel: &ListPanel,
    records: &[R],
    policy: &dyn DeletePolicy<R>,
    requests: &mut RowRequests,
    status_line: &mut StatusLine,
) -> Option<ActionOutcome>
where
    RowRequests: RecordHandler<R>,
{
    let record = panel.selected_record(records)?;
    let mut dispatcher = RowActionDispatcher::new(requests, policy, status_line);
    Some(dispatcher.dispatch(action, record))
}

/// Tracks coordinator state that must persist across input actions and worker responses.
///
/// Only the newest load is applied. Every delete reply is applied, since the worker answers
/// in command order and each reply carries its whole dataset.
pub struct RenderLoopState {
    next_request_id: RequestId,
    latest_load: Option<RequestId>,
    pending_deletes: HashSet<RequestId>,
    launcher: Arc<LinkLauncher>,
    link_tx: mpsc::UnboundedSender<OpenOutcome>,
}

impl RenderLoopState {
    pub fn new(launcher: Arc<LinkLauncher>, link_tx: mpsc::UnboundedSender<OpenOutcome>) -> Self {
        Self {
            next_request_id: 1,
            latest_load: None,
            pending_deletes: HashSet::new(),
            launcher,
            link_tx,
        }
    }

    /// Ask the worker to (re)load the data file and show the loading state meanwhile
    pub async fn request_load(
        &mut self,
        store: &mut RecordStore,
        store_tx: &mpsc::Sender<StoreCommand>,
    ) -> Result<RequestId> {
        store.begin_loading();
        let request_id = self.next_request();
        self.latest_load = Some(request_id);
        store_tx
            .send(StoreCommand::Load { request_id })
            .await
            .map_err(|_| MedlistError::store("store worker unavailable"))?;
        Ok(request_id)
    }

    /// Apply one input action. Returns false when the application should quit.
    pub async fn process_action(
        &mut self,
        action: InputAction,
        view_state: &mut ViewState,
        store: &mut RecordStore,
        store_tx: &mpsc::Sender<StoreCommand>,
    ) -> Result<bool> {
        match action {
            InputAction::Quit => return Ok(false),
            InputAction::SelectPrevious => view_state.active_panel_mut().select_previous(),
            InputAction::SelectNext => {
                let rows = view_state.active_rows_on_page(store);
                view_state.active_panel_mut().select_next(rows);
            }
            InputAction::Page(movement) => {
                let total = view_state.active_total(store);
                if view_state.active_panel_mut().navigate(movement, total) {
                    view_state.details = None;
                }
            }
            InputAction::CyclePageSize => {
                let size = view_state.active_panel_mut().cycle_page_size();
                view_state
                    .status_line
                    .set_message(format!("حجم الصفحة: {size}"));
            }
            InputAction::SwitchPanel => {
                view_state.switch_panel();
                view_state.status_line.clear_message();
            }
            InputAction::StartSearch => {
                view_state.active_panel_mut().set_query("");
                view_state.status_line.set_search_prompt("");
            }
            InputAction::UpdateSearch(buffer) => {
                view_state.active_panel_mut().set_query(buffer.as_str());
                view_state.status_line.set_search_prompt(buffer);
            }
            InputAction::CommitSearch(query) => {
                view_state.active_panel_mut().set_query(query);
                view_state.status_line.clear_search_prompt();
            }
            InputAction::ClearSearch => {
                view_state.active_panel_mut().set_query("");
                view_state.status_line.clear_search_prompt();
                view_state.status_line.clear_message();
            }
            InputAction::Edit | InputAction::Delete | InputAction::OpenContact
                if store.is_loading() =>
            {
                view_state.status_line.set_message(BUSY_MESSAGE);
            }
            InputAction::Edit => {
                self.row_action(RowAction::Edit, view_state, store, store_tx)
                    .await?
            }
            InputAction::Delete => {
                self.row_action(RowAction::Delete, view_state, store, store_tx)
                    .await?
            }
            InputAction::OpenContact => self.open_contact(view_state, store),
            InputAction::Dismiss => {
                view_state.details = None;
                view_state.status_line.clear_message();
            }
            InputAction::Reload => {
                view_state.details = None;
                self.request_load(store, store_tx).await?;
            }
            InputAction::Resize { width, height } => {
                if view_state.update_terminal_size(width, height) {
                    log::debug!("terminal resized to {width}x{height}");
                }
            }
            InputAction::NoAction | InputAction::InvalidInput => {}
        }
        Ok(true)
    }

    async fn row_action(
        &mut self,
        action: RowAction,
        view_state: &mut ViewState,
        store: &RecordStore,
        store_tx: &mpsc::Sender<StoreCommand>,
    ) -> Result<()> {
        let mut requests = RowRequests::default();
        let outcome = match view_state.active {
            RecordKind::Lab => {
                let guard = LabOrdersGuard::new(store.orders());
                dispatch_selected(
                    action,
                    &view_state.labs,
                    store.labs(),
                    &guard,
                    &mut requests,
                    &mut view_state.status_line,
                )
            }
            RecordKind::Medication => dispatch_selected(
                action,
                &view_state.medications,
                store.medications(),
                &AllowDelete,
                &mut requests,
                &mut view_state.status_line,
            ),
        };

        if outcome.is_none() {
            view_state.status_line.set_message("لا يوجد سجل محدد");
            return Ok(());
        }

        if let Some(details) = requests.edit {
            view_state.details = Some(details);
        }

        if let Some((kind, id)) = requests.delete {
            let request_id = self.next_request();
            self.pending_deletes.insert(request_id);
            store_tx
                .send(StoreCommand::Delete {
                    request_id,
                    kind,
                    id,
                })
                .await
                .map_err(|_| MedlistError::store("store worker unavailable"))?;
        }
        Ok(())
    }

    fn open_contact(&self, view_state: &mut ViewState, store: &RecordStore) {
        if view_state.active != RecordKind::Lab {
            return;
        }

        let url = view_state
            .labs
            .selected_record(store.labs())
            .and_then(|lab| lab.contact.as_deref())
            .and_then(whatsapp_url);

        match url {
            Some(url) => {
                view_state.status_line.set_message(format!("جاري فتح {url}"));
                spawn_open(Arc::clone(&self.launcher), url, self.link_tx.clone());
            }
            None => view_state.status_line.set_message("لا يوجد رقم تواصل لهذا المختبر"),
        }
    }

    /// Apply a store worker response. Replies to superseded loads are ignored.
    pub fn handle_response(
        &mut self,
        response: StoreResponse,
        view_state: &mut ViewState,
        store: &mut RecordStore,
    ) {
        let request_id = response.request_id();
        let is_delete = self.pending_deletes.remove(&request_id);
        let is_latest_load = self.latest_load == Some(request_id);
        if !is_delete && !is_latest_load {
            log::debug!("ignoring stale store response {request_id}");
            return;
        }
        if is_latest_load {
            self.latest_load = None;
        }

        match response {
            StoreResponse::Loaded { dataset, .. } => {
                store.replace(dataset);
                view_state.labs.records_replaced();
                view_state.medications.records_replaced();
            }
            StoreResponse::Deleted {
                kind,
                name,
                dataset,
                ..
            } => {
                let reloading = store.is_loading();
                store.replace(dataset);
                if reloading {
                    store.begin_loading();
                }
                view_state.panel_mut(kind).records_replaced();
                view_state.status_line.set_message(format!("تم حذف \"{name}\""));
            }
            StoreResponse::Error { error, .. } => {
                if is_latest_load {
                    store.finish_loading();
                }
                log::warn!("store request failed: {error}");
                view_state
                    .status_line
                    .set_warning(error.to_string());
            }
        }
        view_state.sync_with(store);
    }

    /// Report a finished link open on the status line
    pub fn handle_link_outcome(&self, outcome: OpenOutcome, view_state: &mut ViewState) {
        match &outcome {
            OpenOutcome::Opened { .. } => view_state.status_line.set_message(outcome.status_message()),
            OpenOutcome::Failed { .. } => view_state.status_line.set_warning(outcome.status_message()),
        }
    }

    fn next_request(&mut self) -> RequestId {
        let request_id = self.next_request_id;
        self.next_request_id += 1;
        request_id
    }
}
