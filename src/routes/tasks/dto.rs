use serde::Deserialize;

/// Query-string form of the filter criteria. Absent parameters and the
/// "all" sentinel both mean "no constraint"; see `TaskFilter::from_params`.
#[derive(Debug, Default, Deserialize)]
pub struct ListTasksQuery {
    pub search: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
}
