//! Story record reporting.
//!
//! Story records are read back as per-comment usage counts over an
//! optional date range.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use comments_core::result::AppResult;
use comments_core::traits::DataProvider;
use comments_core::types::{ComparisonOperator, FilterGroup, FilterItem, SelectConfiguration};
use comments_database::adapter::{DbAdapter, PgAdapter};
use comments_database::provider::SqlDataProvider;
use comments_entity::{StoryRecord, StoryRecordReadModel};

/// Which story records to report on. Every bound is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryRecordQuery {
    /// Earliest record time, inclusive.
    pub start_date: Option<DateTime<Utc>>,
    /// Latest record time, inclusive.
    pub end_date: Option<DateTime<Utc>>,
    /// Only records of this comment.
    pub comment_id: Option<Uuid>,
    /// Keep at most this many comments.
    pub count: Option<usize>,
}

impl StoryRecordQuery {
    /// The `AND` filter for the given bounds, or `None` when there are none.
    pub fn filter(&self) -> Option<FilterGroup> {
        let mut group = FilterGroup::and("StoryRecordFilter");
        if let Some(start) = self.start_date {
            group.push(FilterItem::new(
                "CreatedOnStart",
                "CreatedOn",
                ComparisonOperator::GreaterOrEqual,
                start,
            ));
        }
        if let Some(end) = self.end_date {
            group.push(FilterItem::new(
                "CreatedOnEnd",
                "CreatedOn",
                ComparisonOperator::LessOrEqual,
                end,
            ));
        }
        if let Some(comment_id) = self.comment_id {
            group.push(FilterItem::new(
                "CommentIdEquality",
                "CommentId",
                ComparisonOperator::Equal,
                comment_id,
            ));
        }
        (!group.is_empty()).then_some(group)
    }
}

/// Usage of one comment in the reported period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryRecordViewModel {
    /// The comment.
    pub comment_id: Uuid,
    /// Its message.
    pub comment_text: String,
    /// Number of records in the period.
    pub increment_count: usize,
}

/// Reports comment usage from story records.
pub struct StoryRecordService<A = PgAdapter> {
    story_records: SqlDataProvider<StoryRecord, A>,
}

impl<A> Clone for StoryRecordService<A> {
    fn clone(&self) -> Self {
        Self {
            story_records: self.story_records.clone(),
        }
    }
}

impl<A: DbAdapter> StoryRecordService<A> {
    /// Creates a story record service.
    pub fn new(adapter: Arc<A>) -> Self {
        Self {
            story_records: SqlDataProvider::new(adapter),
        }
    }

    /// Usage per comment, least used first.
    pub async fn get(&self, query: &StoryRecordQuery) -> AppResult<Vec<StoryRecordViewModel>> {
        let config = SelectConfiguration {
            filter: query.filter(),
        };
        let records: Vec<StoryRecordReadModel> = self.story_records.select(&config).await?;
        debug!(records = records.len(), "Story records loaded");

        let mut usage = summarize(records);
        if let Some(count) = query.count {
            usage.truncate(count);
        }
        Ok(usage)
    }
}

/// Group records by comment in order of first appearance, then order by
/// count. The sort is stable, so ties keep that order.
fn summarize(records: Vec<StoryRecordReadModel>) -> Vec<StoryRecordViewModel> {
    let mut groups: IndexMap<Uuid, StoryRecordViewModel> = IndexMap::new();
    for record in records {
        groups
            .entry(record.comment_id)
            .or_insert_with(|| StoryRecordViewModel {
                comment_id: record.comment_id,
                comment_text: record.comment_text.clone().unwrap_or_default(),
                increment_count: 0,
            })
            .increment_count += 1;
    }

    let mut usage: Vec<_> = groups.into_values().collect();
    usage.sort_by_key(|item| item.increment_count);
    usage
}
