//! Resource types returned by the listing endpoints.
//!
//! Only decoding lives here. Business-specific normalization (organisation
//! slug injection, legacy status mapping, cluster back-references) is applied
//! by explicit fix-up functions after decoding, never inside `Deserialize`.
//!
//! A JSON `null` in any non-optional field decodes as that field's default,
//! so one sparse record never fails a whole listing.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::acloud_sort::{DeterministicOrder, OrderKey};

/// Organisation membership of the authenticated user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Membership {
    /// Email the membership was granted to.
    #[serde(deserialize_with = "null_as_default")]
    pub email: String,
    /// Organisation ID.
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    /// Organisation display name.
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    /// Organisation slug.
    #[serde(deserialize_with = "null_as_default")]
    pub slug: String,
}

/// Kubernetes cluster.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Cluster {
    /// Display name.
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    /// Cluster identity.
    #[serde(deserialize_with = "null_as_default")]
    pub identity: String,
    /// Identity of the owning environment.
    #[serde(deserialize_with = "null_as_default")]
    pub environment_identity: String,
    /// Slug of the owning environment.
    #[serde(deserialize_with = "null_as_default")]
    pub environment_slug: String,
    /// Identity of the owning organisation.
    #[serde(deserialize_with = "null_as_default")]
    pub customer_identity: String,
    /// Slug of the owning organisation. Filled in by [`fix_cluster`].
    #[serde(deserialize_with = "null_as_default")]
    pub customer_slug: String,
    /// Cluster slug.
    #[serde(deserialize_with = "null_as_default")]
    pub slug: String,
    /// Container network interface.
    #[serde(deserialize_with = "null_as_default")]
    pub cni: String,
    /// Free-form description.
    pub description: Option<String>,
    /// Cloud provider slug.
    #[serde(deserialize_with = "null_as_default")]
    pub cloud_provider: String,
    /// Cloud account the cluster runs in.
    pub cloud_account: Option<CloudAccountReference>,
    /// Region slug.
    #[serde(deserialize_with = "null_as_default")]
    pub region: String,
    /// Cluster version.
    #[serde(deserialize_with = "null_as_default")]
    pub version: String,
    /// Whether automatic upgrades are enabled.
    #[serde(deserialize_with = "null_as_default")]
    pub auto_upgrade: bool,
    /// Whether the control plane is highly available.
    #[serde(deserialize_with = "null_as_default")]
    pub highly_available: bool,
    /// Current status. Legacy `started` is mapped to `running` by [`fix_cluster`].
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
    /// Desired status. Legacy `started` is mapped to `running` by [`fix_cluster`].
    #[serde(deserialize_with = "null_as_default")]
    pub desired_status: String,
    /// Provisioning progress.
    pub provision_status: Option<String>,
    /// Total memory of the cluster's nodes.
    #[serde(deserialize_with = "null_as_default")]
    pub memory: i64,
    /// Total CPU of the cluster's nodes.
    #[serde(deserialize_with = "null_as_default")]
    pub cpu: i64,
    /// API server IP allow list.
    #[serde(deserialize_with = "null_as_default")]
    pub ip_whitelist: Vec<IpWhitelistEntry>,
    /// Whether deletion is blocked.
    #[serde(deserialize_with = "null_as_default")]
    pub delete_protection: bool,
    /// Maintenance schedule applied to the cluster.
    pub maintenance_schedule: Option<MaintenanceSchedule>,
    /// Creation time.
    pub created_at: Option<DateTime<Utc>>,
    /// Last modification time.
    pub modified_at: Option<DateTime<Utc>>,
    /// Deletion time.
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Cluster {
    /// `{organisation}/{environment}/{cluster}`.
    #[must_use]
    pub fn identifier(&self) -> String {
        format!("{}/{}/{}", self.customer_slug, self.environment_slug, self.slug)
    }

    /// `{organisation}/{environment}/{cluster} ({identity})`.
    #[must_use]
    pub fn full_identifier(&self) -> String {
        format!("{} ({})", self.identifier(), self.identity)
    }
}

impl DeterministicOrder for Cluster {
    fn order_key(&self) -> OrderKey<'_> {
        [
            self.customer_slug.as_str(),
            self.environment_slug.as_str(),
            self.slug.as_str(),
            "",
        ]
    }
}

/// Reference to the cloud account of a cluster.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CloudAccountReference {
    /// Cloud account identity.
    #[serde(deserialize_with = "null_as_default")]
    pub identity: String,
    /// Cloud account display name.
    #[serde(deserialize_with = "null_as_default")]
    pub display_name: String,
}

/// One entry of a cluster's IP allow list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IpWhitelistEntry {
    /// Allowed CIDR.
    #[serde(deserialize_with = "null_as_default")]
    pub cidr: String,
    /// Description of the entry.
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
}

/// Maintenance schedule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaintenanceSchedule {
    /// Schedule identity.
    #[serde(deserialize_with = "null_as_default")]
    pub identity: String,
    /// Schedule name.
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    /// Maintenance windows.
    #[serde(deserialize_with = "null_as_default")]
    pub windows: Vec<MaintenanceWindow>,
}

/// Weekly maintenance window.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MaintenanceWindow {
    /// Day of the week.
    #[serde(deserialize_with = "null_as_default")]
    pub day: String,
    /// Start time of day.
    #[serde(deserialize_with = "null_as_default")]
    pub start_time: String,
    /// Duration in minutes.
    #[serde(deserialize_with = "null_as_default")]
    pub duration: u32,
}

/// Pool of nodes within a cluster.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NodePool {
    /// Numeric node pool ID.
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    /// Node pool identity.
    #[serde(deserialize_with = "null_as_default")]
    pub identity: String,
    /// Node pool name.
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    /// Availability zone.
    pub availability_zone: Option<String>,
    /// Node size (instance type).
    #[serde(deserialize_with = "null_as_default")]
    pub node_size: String,
    /// Whether autoscaling is enabled.
    #[serde(deserialize_with = "null_as_default")]
    pub auto_scaling: bool,
    /// Minimum pool size.
    #[serde(deserialize_with = "null_as_default")]
    pub min_size: i64,
    /// Maximum pool size.
    #[serde(deserialize_with = "null_as_default")]
    pub max_size: i64,
    /// Whether unhealthy nodes are replaced automatically.
    #[serde(rename = "enableNodeAutoReplacement", deserialize_with = "null_as_default")]
    pub node_auto_replacement: bool,
    /// Node annotations.
    #[serde(deserialize_with = "null_as_default")]
    pub annotations: BTreeMap<String, String>,
    /// Node labels.
    #[serde(deserialize_with = "null_as_default")]
    pub labels: BTreeMap<String, String>,
    /// Node taints.
    #[serde(deserialize_with = "null_as_default")]
    pub taints: Vec<NodeTaint>,
    /// Current status.
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
    /// Creation time.
    pub created_at: Option<DateTime<Utc>>,
    /// Last modification time.
    pub modified_at: Option<DateTime<Utc>>,
    /// Deletion time.
    pub deleted_at: Option<DateTime<Utc>>,
    /// Identity of the owning cluster.
    #[serde(deserialize_with = "null_as_default")]
    pub cluster_identity: String,
    /// Owning cluster, attached after decoding by [`NodePool::attach_cluster`].
    #[serde(skip)]
    pub cluster: Cluster,
}

impl NodePool {
    /// Record the owning cluster on this pool.
    pub fn attach_cluster(&mut self, cluster: &Cluster) {
        self.cluster = cluster.clone();
        self.cluster_identity.clone_from(&cluster.identity);
    }

    /// `{organisation}/{environment}/{cluster}/{pool} ({id})`.
    #[must_use]
    pub fn full_identifier(&self) -> String {
        format!("{}/{} ({})", self.cluster.identifier(), self.name, self.id)
    }
}

impl DeterministicOrder for NodePool {
    fn order_key(&self) -> OrderKey<'_> {
        [
            self.cluster.customer_slug.as_str(),
            self.cluster.environment_slug.as_str(),
            self.cluster.slug.as_str(),
            self.name.as_str(),
        ]
    }
}

/// Taint applied to the nodes of a pool.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeTaint {
    /// Taint key.
    #[serde(deserialize_with = "null_as_default")]
    pub key: String,
    /// Taint value.
    #[serde(deserialize_with = "null_as_default")]
    pub value: String,
    /// Taint effect.
    #[serde(deserialize_with = "null_as_default")]
    pub effect: String,
}

/// Environment within an organisation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Environment {
    /// Numeric ID.
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    /// Display name.
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    /// Purpose of the environment.
    #[serde(deserialize_with = "null_as_default")]
    pub purpose: String,
    /// Environment type.
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub environment_type: String,
    /// Free-form description.
    pub description: Option<String>,
    /// Number of clusters.
    #[serde(deserialize_with = "null_as_default")]
    pub total_clusters: i64,
    /// Total CPU across clusters.
    #[serde(deserialize_with = "null_as_default")]
    pub total_cpu: i64,
    /// Total memory across clusters.
    #[serde(deserialize_with = "null_as_default")]
    pub total_memory: i64,
    /// Environment slug.
    #[serde(deserialize_with = "null_as_default")]
    pub slug: String,
    /// Slug of the owning organisation.
    #[serde(deserialize_with = "null_as_default")]
    pub organisation_slug: String,
    /// Creation time.
    pub created_at: Option<DateTime<Utc>>,
    /// Last modification time.
    pub modified_at: Option<DateTime<Utc>>,
    /// Deletion time.
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Cloud account of an organisation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CloudAccount {
    /// Cloud account identity.
    #[serde(deserialize_with = "null_as_default")]
    pub identity: String,
    /// Display name.
    #[serde(deserialize_with = "null_as_default")]
    pub display_name: String,
    /// Provider-specific metadata.
    #[serde(deserialize_with = "null_as_default")]
    pub metadata: CloudAccountMetadata,
    /// Cloud profile the account was created from.
    #[serde(deserialize_with = "null_as_default")]
    pub cloud_profile: CloudProfile,
    /// Whether the account is enabled.
    #[serde(deserialize_with = "null_as_default")]
    pub enabled: bool,
    /// Identity of the primary credentials.
    #[serde(deserialize_with = "null_as_default")]
    pub primary_cloud_credentials_identity: String,
}

/// Provider-specific cloud account metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CloudAccountMetadata {
    /// `vSphere` parent resource pool.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_resource_pool: Option<String>,
    /// `vSphere` parent folder.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_folder: Option<String>,
    /// `OpenStack` tenant ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,
}

/// Cloud profile describing a provider and its regions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CloudProfile {
    /// Profile identity.
    #[serde(deserialize_with = "null_as_default")]
    pub identity: String,
    /// Display name.
    #[serde(deserialize_with = "null_as_default")]
    pub display_name: String,
    /// Profile metadata.
    #[serde(deserialize_with = "null_as_default")]
    pub metadata: BTreeMap<String, String>,
    /// Cloud provider slug.
    #[serde(deserialize_with = "null_as_default")]
    pub cloud_provider: String,
    /// Region slugs.
    #[serde(deserialize_with = "null_as_default")]
    pub regions: Vec<String>,
    /// Whether the profile is enabled.
    #[serde(deserialize_with = "null_as_default")]
    pub enabled: bool,
    /// Whether the profile is public.
    #[serde(deserialize_with = "null_as_default")]
    pub public: bool,
    /// Cloud type, e.g. `aws` or `vsphere`.
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub profile_type: String,
}

/// Credentials stored within a cloud account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CloudCredential {
    /// Credential identity.
    #[serde(deserialize_with = "null_as_default")]
    pub identity: String,
    /// Identity of the owning cloud account.
    #[serde(deserialize_with = "null_as_default")]
    pub cloud_account_identity: String,
    /// Cloud type.
    #[serde(deserialize_with = "null_as_default")]
    pub cloud_type: String,
    /// Display name.
    #[serde(deserialize_with = "null_as_default")]
    pub display_name: String,
    /// Credential metadata.
    #[serde(deserialize_with = "null_as_default")]
    pub metadata: BTreeMap<String, String>,
    /// Whether these are the account's primary credentials.
    #[serde(deserialize_with = "null_as_default")]
    pub is_primary: bool,
    /// Creation time.
    pub created_at: Option<DateTime<Utc>>,
}

/// Observability tenant of an organisation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ObservabilityTenant {
    /// Tenant identity.
    #[serde(deserialize_with = "null_as_default")]
    pub identity: String,
    /// Slug of the owning organisation.
    #[serde(rename = "customer", deserialize_with = "null_as_default")]
    pub customer_slug: String,
    /// Display name.
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    /// Tenant slug.
    #[serde(deserialize_with = "null_as_default")]
    pub slug: String,
    /// Whether the tenant is available.
    #[serde(deserialize_with = "null_as_default")]
    pub available: bool,
    /// Comma-separated IP allow list.
    #[serde(rename = "ipWhiteList")]
    pub ip_white_list: Option<String>,
    /// Creation time.
    pub created_at: Option<DateTime<Utc>>,
    /// Last modification time.
    pub modified_at: Option<DateTime<Utc>>,
    /// Deletion time.
    #[serde(alias = "DeletedAt")]
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Status of a scheduled cluster upgrade.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScheduledClusterUpgradeStatus {
    /// Upgrade is scheduled.
    Scheduled,
    /// Upgrade is scheduled and the organisation was notified.
    ScheduledNotified,
    /// Upgrade was updated.
    Updated,
    /// Upgrade succeeded.
    Succeeded,
    /// Upgrade was cancelled.
    Cancelled,
    /// Upgrade was replaced by a newer one.
    Superseded,
    /// Upgrade failed.
    Failed,
    /// Upgrade window was missed.
    Missed,
    /// Status not known to this client.
    #[default]
    #[serde(other)]
    Unknown,
}

impl ScheduledClusterUpgradeStatus {
    /// Wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Scheduled => "SCHEDULED",
            Self::ScheduledNotified => "SCHEDULED_NOTIFIED",
            Self::Updated => "UPDATED",
            Self::Succeeded => "SUCCEEDED",
            Self::Cancelled => "CANCELLED",
            Self::Superseded => "SUPERSEDED",
            Self::Failed => "FAILED",
            Self::Missed => "MISSED",
            Self::Unknown => "UNKNOWN",
        }
    }
}

/// Cluster upgrade planned within a time window.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScheduledClusterUpgrade {
    /// Upgrade identity.
    #[serde(deserialize_with = "null_as_default")]
    pub identity: String,
    /// Identity of the cluster being upgraded.
    #[serde(deserialize_with = "null_as_default")]
    pub cluster_identity: String,
    /// Start of the upgrade window.
    pub window_start: Option<DateTime<Utc>>,
    /// End of the upgrade window.
    pub window_end: Option<DateTime<Utc>>,
    /// Version before the upgrade.
    #[serde(deserialize_with = "null_as_default")]
    pub from_cluster_version: String,
    /// Version after the upgrade.
    #[serde(deserialize_with = "null_as_default")]
    pub to_cluster_version: String,
    /// Upgrade status.
    #[serde(deserialize_with = "null_as_default")]
    pub status: ScheduledClusterUpgradeStatus,
    /// Creation time.
    pub created_at: Option<DateTime<Utc>>,
    /// Last modification time.
    pub modified_at: Option<DateTime<Utc>>,
}

/// Cluster version as seen by platform administrators.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AdminClusterVersion {
    /// Platform version.
    #[serde(deserialize_with = "null_as_default")]
    pub version: String,
    /// Kubernetes version shipped with it.
    #[serde(deserialize_with = "null_as_default")]
    pub kubernetes_version: String,
    /// Cluster controller version.
    #[serde(deserialize_with = "null_as_default")]
    pub cluster_controller_version: String,
    /// Addon controller version.
    #[serde(deserialize_with = "null_as_default")]
    pub addon_controller_version: String,
    /// Whether new clusters may use this version.
    #[serde(deserialize_with = "null_as_default")]
    pub available: bool,
    /// Release note.
    #[serde(deserialize_with = "null_as_default")]
    pub note: String,
    /// Number of clusters on this version.
    #[serde(deserialize_with = "null_as_default")]
    pub cluster_count: i64,
    /// Creation time.
    pub created_at: Option<DateTime<Utc>>,
    /// Last modification time.
    pub modified_at: Option<DateTime<Utc>>,
    /// Deletion time.
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Cloud provider available to an organisation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CloudProvider {
    /// Numeric ID.
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    /// Display name.
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    /// Provider slug, e.g. `aws`.
    #[serde(deserialize_with = "null_as_default")]
    pub slug: String,
    /// Whether clusters can be created on this provider.
    #[serde(deserialize_with = "null_as_default")]
    pub available: bool,
    /// Creation time.
    pub created_at: Option<DateTime<Utc>>,
    /// Last modification time.
    pub modified_at: Option<DateTime<Utc>>,
}

/// Region of a cloud provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Region {
    /// Numeric ID.
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    /// Slug of the cloud provider.
    #[serde(deserialize_with = "null_as_default")]
    pub provider: String,
    /// Display name.
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    /// Region slug.
    #[serde(deserialize_with = "null_as_default")]
    pub slug: String,
    /// Whether clusters can be created in this region.
    #[serde(deserialize_with = "null_as_default")]
    pub available: bool,
    /// Whether the region is restricted to selected organisations.
    #[serde(deserialize_with = "null_as_default")]
    pub restricted: bool,
    /// Creation time.
    pub created_at: Option<DateTime<Utc>>,
    /// Last modification time.
    pub modified_at: Option<DateTime<Utc>>,
}

/// Availability zone within a region.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AvailabilityZone {
    /// Numeric ID.
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    /// Display name.
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    /// Zone slug.
    #[serde(deserialize_with = "null_as_default")]
    pub slug: String,
    /// Creation time.
    pub created_at: Option<DateTime<Utc>>,
    /// Last modification time.
    pub modified_at: Option<DateTime<Utc>>,
}

/// Node size offered by a cloud provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeType {
    /// Instance type name.
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub node_type: String,
    /// Number of CPUs.
    #[serde(deserialize_with = "null_as_default")]
    pub cpu: i64,
    /// Memory in megabytes.
    #[serde(deserialize_with = "null_as_default")]
    pub memory: i64,
}

/// Update channel a cluster can follow.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateChannel {
    /// Channel name.
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    /// Whether clusters can subscribe to the channel.
    #[serde(deserialize_with = "null_as_default")]
    pub available: bool,
    /// Cluster version the channel currently points at.
    #[serde(deserialize_with = "null_as_default")]
    pub kubernetes_cluster_version: String,
}

/// Stable sort of update channels, newest cluster version first.
pub fn sort_update_channels(channels: &mut [UpdateChannel]) {
    channels.sort_by(|a, b| b.kubernetes_cluster_version.cmp(&a.kubernetes_cluster_version));
}

/// Map the legacy `started` status to `running`.
#[must_use]
pub fn fix_status(status: &str) -> String {
    if status == "started" {
        "running".to_string()
    } else {
        status.to_string()
    }
}

/// Apply post-decode fix-ups to a cluster listed under `org`.
///
/// Listing responses omit the organisation slug, and older clusters still
/// report `started` instead of `running`.
pub fn fix_cluster(cluster: &mut Cluster, org: &str) {
    org.clone_into(&mut cluster.customer_slug);
    cluster.status = fix_status(&cluster.status);
    cluster.desired_status = fix_status(&cluster.desired_status);
}

/// Decode `null` as the type's default value.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
