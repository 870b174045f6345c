use std::sync::Arc;

use log::debug;
use tokio::sync::RwLock;

use super::request_generation::RequestGeneration;
use crate::application::dtos::TrendDto;
use crate::application::queries::TrendQueries;
use gymdock_domain::trend::{DateRange, Granularity};
use gymdock_domain::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrendSelection {
    pub range: DateRange,
    pub granularity: Granularity,
}

/// The admin trend chart: the current selection and the last series shown.
///
/// Changing the selection while a fetch is in flight makes that fetch stale;
/// its result is discarded when it lands.
pub struct TrendView {
    queries: Arc<TrendQueries>,
    generation: RequestGeneration,
    selection: RwLock<Option<TrendSelection>>,
    latest: RwLock<Option<TrendDto>>,
}

impl TrendView {
    pub fn new(queries: Arc<TrendQueries>) -> Self {
        Self {
            queries,
            generation: RequestGeneration::new(),
            selection: RwLock::new(None),
            latest: RwLock::new(None),
        }
    }

    /// Select a range and fetch it. `Ok(None)` means a newer selection won.
    pub async fn select(
        &self,
        range: DateRange,
        granularity: Granularity,
    ) -> Result<Option<TrendDto>, DomainError> {
        let ticket = self.generation.issue();
        *self.selection.write().await = Some(TrendSelection { range, granularity });

        let result = self.queries.get_trend(range, granularity).await;

        if !self.generation.is_current(ticket) {
            debug!(
                "[trend] discarding stale response start={} end={} granularity={}",
                range.start(),
                range.end(),
                granularity
            );
            return Ok(None);
        }

        let dto = result?;
        *self.latest.write().await = Some(dto.clone());
        Ok(Some(dto))
    }

    /// Re-fetch the current selection, if any.
    pub async fn refresh(&self) -> Result<Option<TrendDto>, DomainError> {
        let selection = *self.selection.read().await;
        match selection {
            Some(selection) => self.select(selection.range, selection.granularity).await,
            None => Ok(None),
        }
    }

    pub async fn selection(&self) -> Option<TrendSelection> {
        *self.selection.read().await
    }

    pub async fn latest(&self) -> Option<TrendDto> {
        self.latest.read().await.clone()
    }
}
