//! The API seam between the console and its backend.
//!
//! Everything the console reads or writes goes through [`ConsoleApi`]. The
//! worker thread owns one implementation; tests substitute a mock.

use crate::error::Result;
use crate::types::{
    DashboardEntry, GitopsTarget, MqttProfile, NewDashboardEntry, NewGitopsTarget, PipelineNode,
};

/// Backend operations available to the console.
///
/// Ids are always assigned by the backend. Updates and deletes of ids the
/// backend does not know fail with [`ConsoleError::NotFound`](crate::error::ConsoleError::NotFound).
#[cfg_attr(test, mockall::automock)]
pub trait ConsoleApi: Send {
    fn list_dashboard_entries(&self) -> Result<Vec<DashboardEntry>>;

    /// Create an entry and return it with its assigned id.
    fn create_dashboard_entry(&self, entry: NewDashboardEntry) -> Result<DashboardEntry>;

    fn update_dashboard_entry(&self, entry: DashboardEntry) -> Result<DashboardEntry>;

    fn delete_dashboard_entry(&self, id: &str) -> Result<()>;

    fn list_gitops(&self) -> Result<Vec<GitopsTarget>>;

    fn create_gitops(&self, target: NewGitopsTarget) -> Result<GitopsTarget>;

    fn update_gitops(&self, target: GitopsTarget) -> Result<GitopsTarget>;

    fn delete_gitops(&self, id: &str) -> Result<()>;

    fn list_mqtt_profiles(&self) -> Result<Vec<MqttProfile>>;

    /// Ordered node list of one pipeline.
    fn pipeline_topology(&self, pipeline_id: &str) -> Result<Vec<PipelineNode>>;
}
