//! Dashboard window: wires the form, query client and result views together

use std::sync::Arc;
use std::time::{Duration, Instant};

use eframe::egui::{self, Context, Ui};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use neo_core::events::events::{FetchFailed, NeosLoaded, QuerySubmitted, UnitChanged};
use neo_core::{handler_from_fn, DateRangeForm, EventBus, NeosResponse, PageState, QueryParams};
use neo_data::{ConnectivityMonitor, QueryClient, QuerySnapshot};
use neo_ui::{
    date_range_form, error_banner, loading_overlay, page_header, refresh_bar, search_placeholder,
    Theme,
};
use neo_views::{default_file_name, export_csv, pagination_controls, results_toolbar, NeoTableView};

use crate::refetch::{should_request, FocusTracker, RefetchTrigger, SettleTracker};

const PAGE_STATE_KEY: &str = "neo_page_state";
const DATE_RANGE_KEY: &str = "neo_date_range";

/// How often idle cache entries are swept
const EVICTION_INTERVAL: Duration = Duration::from_secs(30);

/// Last form values, restored on startup
#[derive(Debug, Default, Serialize, Deserialize)]
struct SavedRange {
    start_date: String,
    end_date: String,
}

/// Everything the window needs from `main`
pub struct AppServices {
    pub runtime: tokio::runtime::Runtime,
    pub client: QueryClient,
    pub connectivity: ConnectivityMonitor,
    pub probe_interval: Duration,
}

/// Main application state
pub struct NeoDashboardApp {
    /// Tokio runtime running requests and probes
    _runtime: tokio::runtime::Runtime,

    client: QueryClient,
    connectivity: ConnectivityMonitor,
    events: EventBus,

    form: DateRangeForm,
    page: PageState,
    table: NeoTableView,

    /// Key the results area currently renders
    active: Option<QueryParams>,

    /// Export failures, shown until the next export or search
    notice: Option<String>,

    focus: FocusTracker,
    settle: SettleTracker,
    last_eviction: Instant,
}

impl NeoDashboardApp {
    pub fn new(cc: &eframe::CreationContext<'_>, services: AppServices) -> Self {
        neo_ui::apply_theme(&cc.egui_ctx, &Theme::default());

        let AppServices {
            runtime,
            client,
            connectivity,
            probe_interval,
        } = services;

        let repaint_ctx = cc.egui_ctx.clone();
        let client = client.with_settle_callback(move || repaint_ctx.request_repaint());

        let repaint_ctx = cc.egui_ctx.clone();
        connectivity.spawn_probe(
            runtime.handle(),
            probe_interval,
            Some(Arc::new(move || repaint_ctx.request_repaint())),
        );

        let (page, form) = match cc.storage {
            Some(storage) => {
                let page = eframe::get_value::<PageState>(storage, PAGE_STATE_KEY).unwrap_or_default();
                let range = eframe::get_value::<SavedRange>(storage, DATE_RANGE_KEY).unwrap_or_default();
                (page, DateRangeForm::with_values(range.start_date, range.end_date))
            }
            None => (PageState::default(), DateRangeForm::new()),
        };

        let events = EventBus::new();
        subscribe_logging(&events);

        Self {
            _runtime: runtime,
            client,
            connectivity,
            events,
            form,
            page,
            table: NeoTableView::new("results"),
            active: None,
            notice: None,
            focus: FocusTracker::new(),
            settle: SettleTracker::default(),
            last_eviction: Instant::now(),
        }
    }

    /// Handle a validated form submission
    fn submit(&mut self, params: QueryParams) {
        self.events.publish(QuerySubmitted {
            start_date: params.start_date.clone(),
            end_date: params.end_date.clone(),
        });
        self.notice = None;

        let params_changed = self.active.as_ref() != Some(&params);
        if params_changed {
            self.client.set_active(Some(&params));
            self.active = Some(params.clone());
            self.settle.reset();
        }

        let snapshot = self.client.snapshot(&params);
        if should_request(RefetchTrigger::Submit { params_changed }, &snapshot) {
            self.client.request(&params);
        }
    }

    /// Refetch the active query on focus regain or reconnect
    fn poll_refetch_triggers(&mut self, ctx: &Context) {
        let focused = ctx.input(|i| i.focused);
        let mut triggers = Vec::new();
        if self.focus.regained(focused) {
            triggers.push(RefetchTrigger::WindowFocused);
        }
        if self.connectivity.take_reconnected() {
            triggers.push(RefetchTrigger::Reconnected);
        }

        let Some(params) = self.active.clone() else {
            return;
        };
        for trigger in triggers {
            if should_request(trigger, &self.client.snapshot(&params)) {
                info!(?trigger, %params, "refetching");
                self.client.request(&params);
            }
        }
    }

    /// Publish the outcome once when the active query settles
    fn report_settled(&mut self, snapshot: Option<&QuerySnapshot>) {
        if !self.settle.settled(snapshot) {
            return;
        }
        let (Some(params), Some(snapshot)) = (&self.active, snapshot) else {
            return;
        };

        match (&snapshot.error, &snapshot.data) {
            (Some(error), _) => self.events.publish(FetchFailed {
                start_date: params.start_date.clone(),
                message: error.user_message(),
            }),
            (None, Some(data)) => self.events.publish(NeosLoaded {
                start_date: data.start_date.clone(),
                end_date: data.end_date.clone(),
                count: data.count,
                hazardous: data.hazardous_count(),
            }),
            (None, None) => {}
        }
    }

    fn show_results(&mut self, ui: &mut Ui, data: &NeosResponse) {
        let action = results_toolbar(ui, data, &mut self.page);
        if let Some(unit) = action.unit_changed {
            self.events.publish(UnitChanged { unit });
        }
        if action.export_requested {
            self.export(data);
        }

        ui.add_space(4.0);
        self.table.show(ui, &mut self.page, &data.items);
        ui.add_space(4.0);
        pagination_controls(ui, "results", &mut self.page, data.items.len());
    }

    fn export(&mut self, data: &NeosResponse) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .set_file_name(default_file_name(data))
            .save_file()
        else {
            return;
        };

        match export_csv(&path, &data.items, &self.page) {
            Ok(_) => self.notice = None,
            Err(e) => {
                error!(path = %path.display(), error = %e, "export failed");
                self.notice = Some(e.to_string());
            }
        }
    }
}

impl eframe::App for NeoDashboardApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.poll_refetch_triggers(ctx);

        if self.last_eviction.elapsed() >= EVICTION_INTERVAL {
            self.client.evict_expired();
            self.last_eviction = Instant::now();
        }

        let snapshot = self.active.as_ref().map(|params| self.client.snapshot(params));
        self.report_settled(snapshot.as_ref());

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    page_header(ui);

                    if let Some(params) = date_range_form(ui, &mut self.form) {
                        self.submit(params);
                        ctx.request_repaint();
                    }
                    ui.separator();

                    if let Some(notice) = &self.notice {
                        error_banner(ui, notice);
                    }

                    match &snapshot {
                        None => search_placeholder(ui),
                        Some(snapshot) => {
                            if let Some(error) = &snapshot.error {
                                error_banner(ui, &error.user_message());
                            }
                            if snapshot.is_refreshing() {
                                refresh_bar(ui);
                            }
                            if let Some(data) = &snapshot.data {
                                self.show_results(ui, data);
                            }
                        }
                    }
                });
        });

        if snapshot.as_ref().map_or(false, QuerySnapshot::is_loading) {
            loading_overlay(ctx);
        }

        // Keep eviction ticking while the window sits idle
        ctx.request_repaint_after(EVICTION_INTERVAL);
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, PAGE_STATE_KEY, &self.page);
        eframe::set_value(
            storage,
            DATE_RANGE_KEY,
            &SavedRange {
                start_date: self.form.start_date.clone(),
                end_date: self.form.end_date.clone(),
            },
        );
    }
}

/// Mirror domain events into the log
fn subscribe_logging(events: &EventBus) {
    events.subscribe::<QuerySubmitted>(handler_from_fn(|event| {
        if let Some(e) = event.as_any().downcast_ref::<QuerySubmitted>() {
            info!(start_date = %e.start_date, end_date = ?e.end_date, "query submitted");
        }
    }));
    events.subscribe::<NeosLoaded>(handler_from_fn(|event| {
        if let Some(e) = event.as_any().downcast_ref::<NeosLoaded>() {
            info!(
                start_date = %e.start_date,
                end_date = %e.end_date,
                count = e.count,
                hazardous = e.hazardous,
                "near-earth objects loaded"
            );
        }
    }));
    events.subscribe::<FetchFailed>(handler_from_fn(|event| {
        if let Some(e) = event.as_any().downcast_ref::<FetchFailed>() {
            warn!(start_date = %e.start_date, message = %e.message, "query failed");
        }
    }));
    events.subscribe::<UnitChanged>(handler_from_fn(|event| {
        if let Some(e) = event.as_any().downcast_ref::<UnitChanged>() {
            info!(unit = e.unit.label(), "unit changed");
        }
    }));
}
