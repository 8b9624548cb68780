//! Per-user dashboard state: the latest committed view and its two charts.

use log::debug;
use serde::Serialize;

use super::{ChartData, ChartInstance, ChartScale, ChartSlot, DashboardView, Generation, GenerationCounter};

pub const PORTFOLIO_CANVAS_ID: &str = "portfolio-chart";
pub const COMPONENTS_CANVAS_ID: &str = "components-chart";

/// Result of handing a finished view to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "status")]
pub enum CommitOutcome {
    Applied { generation: Generation },
    /// A newer selection started after this one; the view was dropped.
    Stale { generation: Generation, latest: Generation },
}

impl CommitOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, CommitOutcome::Applied { .. })
    }
}

/// Chart data currently drawn on a canvas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedChart {
    canvas_id: String,
    data: Option<ChartData>,
}

impl RenderedChart {
    pub fn new(canvas_id: impl Into<String>, data: ChartData) -> Self {
        Self {
            canvas_id: canvas_id.into(),
            data: Some(data),
        }
    }

    pub fn data(&self) -> Option<&ChartData> {
        self.data.as_ref()
    }
}

impl ChartInstance for RenderedChart {
    fn canvas_id(&self) -> &str {
        &self.canvas_id
    }

    fn destroy(&mut self) {
        self.data = None;
    }
}

#[derive(Debug)]
pub struct DashboardSession {
    generations: GenerationCounter,
    account: Option<String>,
    pending_account: Option<String>,
    view: Option<DashboardView>,
    portfolio_chart: ChartSlot<RenderedChart>,
    components_chart: ChartSlot<RenderedChart>,
}

impl Default for DashboardSession {
    fn default() -> Self {
        Self::new()
    }
}

impl DashboardSession {
    pub fn new() -> Self {
        Self {
            generations: GenerationCounter::new(),
            account: None,
            pending_account: None,
            view: None,
            portfolio_chart: ChartSlot::new(PORTFOLIO_CANVAS_ID),
            components_chart: ChartSlot::new(COMPONENTS_CANVAS_ID),
        }
    }

    /// Starts a selection. The previous view and charts are discarded at once,
    /// and any selection still in flight becomes stale.
    pub fn begin_selection(&mut self, account: &str) -> Generation {
        let generation = self.generations.next();
        debug!("Selection {} started", generation);
        self.pending_account = Some(account.to_string());
        self.account = None;
        self.view = None;
        self.portfolio_chart.clear();
        self.components_chart.clear();
        generation
    }

    /// Stores `view` if `generation` is still the latest selection.
    pub fn commit(&mut self, generation: Generation, view: DashboardView) -> CommitOutcome {
        let latest = self.generations.current();
        if generation != latest {
            debug!("Dropping stale view {} (latest is {})", generation, latest);
            return CommitOutcome::Stale { generation, latest };
        }

        self.account = self.pending_account.take();
        self.view = Some(view);
        self.render(ChartScale::default());
        CommitOutcome::Applied { generation }
    }

    /// Redraws both charts of the current view in `scale`, replacing the
    /// charts drawn before. Returns `None` when no view is committed.
    pub fn render(&mut self, scale: ChartScale) -> Option<(ChartData, ChartData)> {
        let view = self.view.as_ref()?;
        let portfolio = view.portfolio_chart(scale);
        let components = view.components_chart(scale);
        self.portfolio_chart
            .install(RenderedChart::new(PORTFOLIO_CANVAS_ID, portfolio.clone()));
        self.components_chart
            .install(RenderedChart::new(COMPONENTS_CANVAS_ID, components.clone()));
        Some((portfolio, components))
    }

    pub fn is_current(&self, generation: Generation) -> bool {
        self.generations.is_current(generation)
    }

    pub fn view(&self) -> Option<&DashboardView> {
        self.view.as_ref()
    }

    /// Account of the committed view.
    pub fn account(&self) -> Option<&str> {
        self.account.as_deref()
    }

    pub fn portfolio_chart(&self) -> Option<&RenderedChart> {
        self.portfolio_chart.get()
    }

    pub fn components_chart(&self) -> Option<&RenderedChart> {
        self.components_chart.get()
    }
}
