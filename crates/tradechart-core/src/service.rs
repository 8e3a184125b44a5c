//! Chart building facade: fetch, aggregate, annotate.

use std::sync::Arc;

use thiserror::Error;

use crate::price_source::{PriceSource, SeriesRequest, SourceError};
use crate::{
    aggregate, build_annotations, ChartConfig, ChartPayload, Granularity, Trade, WeekEndDay,
};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("price source failed: {0}")]
    Source(#[from] SourceError),
}

/// One chart to build.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartRequest {
    pub trade: Trade,
    pub granularity: Granularity,
    /// Overrides the configured weekly closing day.
    pub week_end_day: Option<WeekEndDay>,
}

impl ChartRequest {
    pub fn new(trade: Trade, granularity: Granularity) -> Self {
        Self {
            trade,
            granularity,
            week_end_day: None,
        }
    }

    pub fn with_week_end_day(mut self, week_end_day: WeekEndDay) -> Self {
        self.week_end_day = Some(week_end_day);
        self
    }
}

/// Cheap to clone; clones share the price source.
#[derive(Clone)]
pub struct ChartService {
    source: Arc<dyn PriceSource>,
    padding_days: u32,
    week_end_day: WeekEndDay,
}

impl ChartService {
    pub fn new(source: Arc<dyn PriceSource>, config: &ChartConfig) -> Self {
        Self {
            source,
            padding_days: config.window_padding_days,
            week_end_day: config.week_end_day,
        }
    }

    pub fn from_config(config: &ChartConfig) -> Self {
        Self::new(config.price_source(), config)
    }

    pub fn source_id(&self) -> &'static str {
        self.source.id()
    }

    pub async fn chart(&self, req: ChartRequest) -> Result<ChartPayload, ServiceError> {
        let trade = &req.trade;
        let range = trade.fetch_range(self.padding_days);
        let week_end = req.week_end_day.unwrap_or(self.week_end_day);

        tracing::info!(
            symbol = %trade.symbol,
            source = self.source.id(),
            start = %range.start(),
            end = %range.end(),
            granularity = %req.granularity,
            "building chart"
        );

        let series = self
            .source
            .daily_series(SeriesRequest::new(trade.symbol.clone(), range))
            .await?;
        let bars = aggregate(&series, req.granularity, week_end);
        let annotations = build_annotations(trade, &series);

        Ok(ChartPayload::new(&trade.symbol, &bars, annotations))
    }
}
