use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;
use strum::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::error::{ItemError, ItemResult};

/// Fixed number of items per listing page
pub const PAGE_SIZE: u64 = 10;

/// Highest page whose offset still fits a signed 64-bit OFFSET
const MAX_PAGE: u64 = (i64::MAX as u64) / PAGE_SIZE;

/// Todo item as returned by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Item {
    /// Store-assigned identifier
    pub id: i64,
    pub description: Option<String>,
    pub done: bool,
}

/// Columns a listing may be ordered by
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum SortField {
    #[default]
    Id,
    Description,
    Done,
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// Raw listing parameters as they arrive in the query string
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListParams {
    /// 1-based page number; values below 1 select the first page
    #[param(value_type = Option<i64>, example = 1)]
    pub page: Option<String>,
    /// Column to order by: `id`, `description` or `done`
    #[param(value_type = Option<SortField>)]
    pub sort_fields: Option<String>,
    /// `asc` or `desc`
    #[param(value_type = Option<SortDirection>)]
    pub sort_directions: Option<String>,
}

/// Validated listing request handed to the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageQuery {
    pub page: u64,
    pub sort_field: SortField,
    pub direction: SortDirection,
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            page: 1,
            sort_field: SortField::default(),
            direction: SortDirection::default(),
        }
    }
}

impl PageQuery {
    pub fn new(page: u64, sort_field: SortField, direction: SortDirection) -> Self {
        Self {
            page: page.clamp(1, MAX_PAGE),
            sort_field,
            direction,
        }
    }

    pub fn limit(&self) -> u64 {
        PAGE_SIZE
    }

    pub fn offset(&self) -> u64 {
        PAGE_SIZE * (self.page - 1)
    }
}

/// Empty strings count as absent, the way form clients send untouched fields.
fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl TryFrom<ListParams> for PageQuery {
    type Error = ItemError;

    fn try_from(params: ListParams) -> ItemResult<Self> {
        let page = match non_empty(&params.page) {
            None => 1,
            Some(raw) => {
                let page = raw
                    .parse::<i64>()
                    .map_err(|_| ItemError::Validation(format!("Invalid page '{}'", raw)))?;
                if page > MAX_PAGE as i64 {
                    return Err(ItemError::Validation(format!("Page {} is out of range", page)));
                }
                page.max(1) as u64
            }
        };

        let sort_field = match non_empty(&params.sort_fields) {
            None => SortField::default(),
            Some(raw) => SortField::from_str(raw)
                .map_err(|_| ItemError::Validation(format!("Unknown sort field '{}'", raw)))?,
        };

        let direction = match non_empty(&params.sort_directions) {
            None => SortDirection::default(),
            Some(raw) => SortDirection::from_str(raw)
                .map_err(|_| ItemError::Validation(format!("Unknown sort direction '{}'", raw)))?,
        };

        Ok(Self::new(page, sort_field, direction))
    }
}

/// One page of a sorted listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub current_page: u64,
    pub list: Vec<Item>,
    pub page_size: u64,
    pub sort_fields: SortField,
    pub sort_directions: SortDirection,
    pub total_results: u64,
}

/// Body of `POST /items`: updates when `id` is present, creates otherwise
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct SaveItem {
    /// Integer or numeric string; omit (or send null) to create
    #[schema(value_type = Option<i64>, example = 1)]
    #[serde(default)]
    pub id: Option<Value>,

    #[validate(length(max = 255))]
    #[schema(example = "buy milk")]
    pub description: Option<String>,

    /// Any JSON value, coerced to a boolean
    #[schema(value_type = Option<bool>, example = false)]
    #[serde(default)]
    pub done: Option<Value>,
}

impl SaveItem {
    /// Target id of an update, `None` for a create.
    pub fn target_id(&self) -> ItemResult<Option<i64>> {
        match &self.id {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Number(n)) => n
                .as_i64()
                .map(Some)
                .ok_or_else(|| ItemError::Validation(format!("Invalid id '{}'", n))),
            Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
            Some(Value::String(s)) => s
                .trim()
                .parse::<i64>()
                .map(Some)
                .map_err(|_| ItemError::Validation(format!("Invalid id '{}'", s))),
            Some(other) => Err(ItemError::Validation(format!("Invalid id '{}'", other))),
        }
    }

    pub fn is_done(&self) -> bool {
        self.done.as_ref().is_some_and(is_truthy)
    }

    /// Overlays non-empty query parameters on the body; the query wins on conflict.
    pub fn with_params(mut self, params: SaveParams) -> Self {
        if let Some(id) = non_empty(&params.id) {
            self.id = Some(Value::String(id.to_string()));
        }
        if let Some(description) = params.description.filter(|d| !d.is_empty()) {
            self.description = Some(description);
        }
        if let Some(done) = params.done.filter(|d| !d.is_empty()) {
            self.done = Some(Value::String(done));
        }
        self
    }
}

/// `POST /items` fields given in the query string instead of the body
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SaveParams {
    /// Update this item instead of creating one
    #[param(value_type = Option<i64>)]
    pub id: Option<String>,
    pub description: Option<String>,
    /// Any non-empty value marks the item done
    pub done: Option<String>,
}

/// Loose boolean coercion for `done`.
///
/// Only `null`, `false`, zero and the empty string are false. Every non-empty
/// string is true, `"false"` and `"0"` included.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
