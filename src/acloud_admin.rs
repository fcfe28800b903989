//! Platform administration listings.
//!
//! These endpoints live under `/admin/v1` and require an administrator token.

use crate::{
    acloud_client::AcloudClient,
    acloud_error::AcloudError,
    acloud_listing::optional_query_params,
    acloud_paging::list_paged,
    acloud_types::{
        AdminClusterVersion, ScheduledClusterUpgrade, ScheduledClusterUpgradeStatus, UpdateChannel,
    },
};

/// Filters for [`AcloudClient::list_scheduled_cluster_upgrades`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListScheduledClusterUpgradesOpts {
    /// Only upgrades of these clusters.
    pub cluster_identities: Option<Vec<String>>,
    /// Only upgrades in one of these statuses.
    pub statuses: Option<Vec<ScheduledClusterUpgradeStatus>>,
}

impl ListScheduledClusterUpgradesOpts {
    /// Merge `opts` in order (later values override earlier ones), then fill
    /// fields nobody set from `defaults`.
    #[must_use]
    pub fn merge(opts: &[Self], defaults: &Self) -> Self {
        let mut merged = Self::default();
        for opt in opts {
            if opt.cluster_identities.is_some() {
                merged.cluster_identities.clone_from(&opt.cluster_identities);
            }
            if opt.statuses.is_some() {
                merged.statuses.clone_from(&opt.statuses);
            }
        }

        if merged.cluster_identities.is_none() {
            merged.cluster_identities.clone_from(&defaults.cluster_identities);
        }
        if merged.statuses.is_none() {
            merged.statuses.clone_from(&defaults.statuses);
        }
        merged
    }

    /// Render as a query string without the leading `?`.
    ///
    /// Lists are comma-separated, e.g. `clusterIdentities=a,b&statuses=SCHEDULED,FAILED`.
    #[must_use]
    pub fn to_query_params(&self) -> String {
        let mut params = Vec::new();
        if let Some(identities) = &self.cluster_identities {
            params.push(format!("clusterIdentities={}", identities.join(",")));
        }
        if let Some(statuses) = &self.statuses {
            let statuses: Vec<&str> = statuses.iter().map(|s| s.as_str()).collect();
            params.push(format!("statuses={}", statuses.join(",")));
        }
        params.join("&")
    }
}

impl AcloudClient {
    /// List scheduled cluster upgrades across the platform.
    ///
    /// # Errors
    ///
    /// Returns a transport, API, paging or decode error.
    pub async fn list_scheduled_cluster_upgrades(
        &self,
        opts: &[ListScheduledClusterUpgradesOpts],
    ) -> Result<Vec<ScheduledClusterUpgrade>, AcloudError> {
        let query = ListScheduledClusterUpgradesOpts::merge(opts, &ListScheduledClusterUpgradesOpts::default())
            .to_query_params();
        list_paged(
            self,
            &format!("/admin/v1/scheduled-cluster-upgrades{}", optional_query_params(&query)),
        )
        .await
    }

    /// List every update channel on the platform, in server order.
    ///
    /// # Errors
    ///
    /// Returns a transport, API, paging or decode error.
    pub async fn list_update_channels(&self) -> Result<Vec<UpdateChannel>, AcloudError> {
        list_paged(self, "/admin/v1/update-channels").await
    }

    /// List every cluster version.
    ///
    /// # Errors
    ///
    /// Returns a transport, API, paging or decode error.
    pub async fn list_cluster_versions(&self) -> Result<Vec<AdminClusterVersion>, AcloudError> {
        list_paged(self, "/admin/v1/cluster-versions").await
    }

    /// List the cluster versions new clusters may use.
    ///
    /// # Errors
    ///
    /// Returns a transport, API, paging or decode error.
    pub async fn list_available_cluster_versions(
        &self,
    ) -> Result<Vec<AdminClusterVersion>, AcloudError> {
        list_paged(self, "/admin/v1/cluster-versions/available").await
    }

    /// List retired cluster versions.
    ///
    /// # Errors
    ///
    /// Returns a transport, API, paging or decode error.
    pub async fn list_history_cluster_versions(
        &self,
    ) -> Result<Vec<AdminClusterVersion>, AcloudError> {
        list_paged(self, "/admin/v1/cluster-versions/history").await
    }
}
