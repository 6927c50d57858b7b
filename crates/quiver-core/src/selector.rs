//! Point selectors and result projections.
//!
//! Selectors name a set of points (explicit ids or a filter); projections
//! shape the payload and vectors attached to returned records. Both are
//! resolved in one place: selectors by
//! [`crate::Collection::delete`]-family methods, projections by the read
//! paths.

use serde::{Deserialize, Serialize};

use crate::filter::Filter;
use crate::point::{Payload, PointId};

/// An explicit list of point ids wrapped in an object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointIdsList {
    /// The selected ids.
    pub points: Vec<PointId>,
}

/// A filter wrapped in an object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterSelector {
    /// The selecting filter.
    pub filter: Filter,
}

/// Names a set of points for delete and payload mutations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PointsSelector {
    /// Explicit id list.
    Ids(Vec<PointId>),
    /// Explicit id list, object form.
    PointIds(PointIdsList),
    /// All live points matching a filter.
    Filter(Filter),
    /// All live points matching a filter, object form.
    FilterSelector(FilterSelector),
}

impl From<Vec<PointId>> for PointsSelector {
    fn from(ids: Vec<PointId>) -> Self {
        Self::Ids(ids)
    }
}

impl From<Filter> for PointsSelector {
    fn from(filter: Filter) -> Self {
        Self::Filter(filter)
    }
}

impl From<PointIdsList> for PointsSelector {
    fn from(list: PointIdsList) -> Self {
        Self::PointIds(list)
    }
}

impl From<FilterSelector> for PointsSelector {
    fn from(selector: FilterSelector) -> Self {
        Self::FilterSelector(selector)
    }
}

/// Payload projection applied to each returned record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WithPayload {
    /// `true` returns the full payload, `false` omits it.
    Enable(bool),
    /// Sub-map restricted to the listed keys; missing keys are dropped.
    Keys(Vec<String>),
    /// Same as `Keys`, object form.
    Include(PayloadSelectorInclude),
    /// Payload minus the listed keys.
    Exclude(PayloadSelectorExclude),
}

/// Include-list payload selector, object form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayloadSelectorInclude {
    /// Keys to keep.
    pub include: Vec<String>,
}

/// Exclude-list payload selector, object form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayloadSelectorExclude {
    /// Keys to drop.
    pub exclude: Vec<String>,
}

impl Default for WithPayload {
    fn default() -> Self {
        Self::Enable(true)
    }
}

impl From<bool> for WithPayload {
    fn from(enable: bool) -> Self {
        Self::Enable(enable)
    }
}

impl From<Vec<String>> for WithPayload {
    fn from(keys: Vec<String>) -> Self {
        Self::Keys(keys)
    }
}

impl From<Vec<&str>> for WithPayload {
    fn from(keys: Vec<&str>) -> Self {
        Self::Keys(keys.into_iter().map(str::to_string).collect())
    }
}

impl WithPayload {
    /// Applies the projection to a stored payload.
    ///
    /// Keys listed but absent from the payload are silently dropped, never
    /// emitted as null.
    #[must_use]
    pub fn project(&self, payload: &Payload) -> Option<Payload> {
        match self {
            Self::Enable(false) => None,
            Self::Enable(true) => Some(payload.clone()),
            Self::Keys(keys) | Self::Include(PayloadSelectorInclude { include: keys }) => Some(
                keys.iter()
                    .filter_map(|key| payload.get(key).map(|v| (key.clone(), v.clone())))
                    .collect(),
            ),
            Self::Exclude(PayloadSelectorExclude { exclude }) => Some(
                payload
                    .iter()
                    .filter(|(key, _)| !exclude.contains(key))
                    .map(|(key, v)| (key.clone(), v.clone()))
                    .collect(),
            ),
        }
    }
}

/// Vector projection applied to each returned record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WithVectors {
    /// `true` returns all named vectors, `false` omits them.
    ///
    /// When the collection is configured with only the default vector, the
    /// single array is returned unwrapped.
    Enable(bool),
    /// Sub-map restricted to the listed names; never unwrapped.
    Names(Vec<String>),
}

impl Default for WithVectors {
    fn default() -> Self {
        Self::Enable(false)
    }
}

impl From<bool> for WithVectors {
    fn from(enable: bool) -> Self {
        Self::Enable(enable)
    }
}

impl From<Vec<String>> for WithVectors {
    fn from(names: Vec<String>) -> Self {
        Self::Names(names)
    }
}

impl From<Vec<&str>> for WithVectors {
    fn from(names: Vec<&str>) -> Self {
        Self::Names(names.into_iter().map(str::to_string).collect())
    }
}
