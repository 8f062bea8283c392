use crate::chart::{ChartSpec, Range, build_chart};
use crate::loader::DataBundle;
use crate::models::SubjectId;
use crate::palette::ColorPool;
use chrono::{DateTime, TimeZone, Utc};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ViewError {
    #[error("no chart has been rendered yet")]
    NoChart,
}

#[derive(Debug, Clone)]
pub struct RenderedChart {
    pub generation: u64,
    pub subject: SubjectId,
    pub spec: ChartSpec,
    pub redraws: u32,
}

/// Per-page view context: the color pool and the chart currently on screen.
#[derive(Debug)]
pub struct DashboardView {
    palette: ColorPool,
    chart: Option<RenderedChart>,
    generation: u64,
}

impl DashboardView {
    pub fn new(palette_size: usize) -> Self {
        Self::with_palette(ColorPool::from_entropy(palette_size))
    }

    pub fn with_palette(palette: ColorPool) -> Self {
        Self {
            palette,
            chart: None,
            generation: 0,
        }
    }

    pub fn palette(&self) -> &ColorPool {
        &self.palette
    }

    pub fn chart(&self) -> Option<&RenderedChart> {
        self.chart.as_ref()
    }

    /// Builds a chart for `bundle`, releasing the previous one first.
    pub fn render(&mut self, bundle: &DataBundle, now: DateTime<Utc>) -> &ChartSpec {
        if let Some(previous) = self.chart.take() {
            debug!(
                "releasing chart generation {} for subject {}",
                previous.generation, previous.subject.0
            );
        }

        let spec = build_chart(bundle, &mut self.palette, now);
        self.generation += 1;
        debug!(
            "rendered chart generation {} with {} datasets",
            self.generation,
            spec.data.datasets.len()
        );

        let chart = self.chart.insert(RenderedChart {
            generation: self.generation,
            subject: bundle.subject,
            spec,
            redraws: 0,
        });
        &chart.spec
    }

    /// Narrows the visible time window without touching the data.
    pub fn apply_range<Tz: TimeZone>(&mut self, range: Range, now: &DateTime<Tz>) -> Result<&ChartSpec, ViewError> {
        let chart = self.chart.as_mut().ok_or(ViewError::NoChart)?;
        let min = range.window_start(now);
        chart.spec.set_x_min(min);
        chart.redraws = chart.redraws.saturating_add(1);
        debug!("chart generation {} window starts at {min}", chart.generation);
        Ok(&chart.spec)
    }
}
