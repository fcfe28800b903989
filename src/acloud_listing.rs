//! Resource listings built on the paging and fan-out core.
//!
//! Single-organisation listings walk one paginated endpoint. Cross-organisation
//! listings (all clusters, all node pools) first list the parents, then fan out
//! one listing per parent and return the merged, deterministically sorted
//! result.

use tracing::debug;

use crate::{
    acloud_client::AcloudClient,
    acloud_error::AcloudError,
    acloud_fanout::fan_out_sorted,
    acloud_paging::{collect_pages, list_paged, marshal_page_content},
    acloud_sort::sort_deterministic,
    acloud_types::{
        AvailabilityZone, CloudAccount, CloudCredential, CloudProvider, Cluster, Environment,
        Membership, NodePool, NodeType, ObservabilityTenant, Region, UpdateChannel, fix_cluster,
        sort_update_channels,
    },
};

/// Options for cluster listings.
///
/// Unset fields are filled from the listing's defaults; see [`GetClusterOpts::merge`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GetClusterOpts {
    /// Include detailed cluster information (`includeDetails`).
    pub include_details: Option<bool>,
    /// Include compute totals (`show-compute`).
    pub show_compute: Option<bool>,
}

/// Defaults applied to every cluster listing.
pub const CLUSTER_LIST_DEFAULTS: GetClusterOpts = GetClusterOpts {
    include_details: None,
    show_compute: Some(true),
};

impl GetClusterOpts {
    /// Merge `opts` in order (later values override earlier ones), then fill
    /// fields nobody set from `defaults`.
    #[must_use]
    pub fn merge(opts: &[Self], defaults: Self) -> Self {
        let mut merged = Self::default();
        for opt in opts {
            if opt.include_details.is_some() {
                merged.include_details = opt.include_details;
            }
            if opt.show_compute.is_some() {
                merged.show_compute = opt.show_compute;
            }
        }

        Self {
            include_details: merged.include_details.or(defaults.include_details),
            show_compute: merged.show_compute.or(defaults.show_compute),
        }
    }

    /// Render as a query string without the leading `?`.
    #[must_use]
    pub fn to_query_params(&self) -> String {
        let mut params = Vec::new();
        if let Some(include_details) = self.include_details {
            params.push(format!("includeDetails={include_details}"));
        }
        if let Some(show_compute) = self.show_compute {
            params.push(format!("show-compute={show_compute}"));
        }
        params.join("&")
    }
}

/// Prefix a non-empty query string with `?`.
#[must_use]
pub fn optional_query_params(query: &str) -> String {
    if query.is_empty() {
        String::new()
    } else {
        format!("?{query}")
    }
}

fn cluster_query(opts: &[GetClusterOpts]) -> String {
    optional_query_params(&GetClusterOpts::merge(opts, CLUSTER_LIST_DEFAULTS).to_query_params())
}

impl AcloudClient {
    /// List the organisations the authenticated user is a member of.
    ///
    /// # Errors
    ///
    /// Returns a transport, API, paging or decode error.
    pub async fn get_memberships(&self) -> Result<Vec<Membership>, AcloudError> {
        list_paged(self, "/api/v1/memberships").await
    }

    /// List the clusters of one organisation.
    ///
    /// # Errors
    ///
    /// Returns a transport, API, paging or decode error.
    pub async fn get_clusters_by_org(
        &self,
        org: &str,
        opts: &[GetClusterOpts],
    ) -> Result<Vec<Cluster>, AcloudError> {
        let url = format!("/api/v1/orgs/{org}/clusters{}", cluster_query(opts));
        self.list_clusters(org, &url).await
    }

    /// List the clusters of one environment within an organisation.
    ///
    /// # Errors
    ///
    /// Returns a transport, API, paging or decode error.
    pub async fn get_clusters_by_org_and_env(
        &self,
        org: &str,
        env: &str,
        opts: &[GetClusterOpts],
    ) -> Result<Vec<Cluster>, AcloudError> {
        let url = format!("/api/v1/orgs/{org}/clusters/{env}{}", cluster_query(opts));
        self.list_clusters(org, &url).await
    }

    async fn list_clusters(&self, org: &str, url: &str) -> Result<Vec<Cluster>, AcloudError> {
        let mut clusters: Vec<Cluster> = list_paged(self, url).await?;
        for cluster in &mut clusters {
            fix_cluster(cluster, org);
        }
        sort_deterministic(&mut clusters);
        Ok(clusters)
    }

    /// List the clusters of every organisation the user is a member of.
    ///
    /// Organisations are listed concurrently. The result is sorted by
    /// organisation, environment and cluster slug.
    ///
    /// # Errors
    ///
    /// Returns the membership listing error, or [`AcloudError::FanOut`] naming
    /// the first organisation (in membership order) whose listing failed.
    pub async fn get_clusters(&self, opts: &[GetClusterOpts]) -> Result<Vec<Cluster>, AcloudError> {
        let memberships = self.get_memberships().await?;
        debug!(organisations = memberships.len(), "listing clusters across organisations");

        fan_out_sorted(
            "clusters",
            &memberships,
            |m| m.slug.clone(),
            |m| self.get_clusters_by_org(&m.slug, opts),
        )
        .await
    }

    /// List the node pools of one cluster.
    ///
    /// This endpoint is not paginated. Each pool gets the cluster attached.
    ///
    /// # Errors
    ///
    /// Returns a transport, API or decode error.
    pub async fn get_node_pools_by_cluster(
        &self,
        cluster: &Cluster,
    ) -> Result<Vec<NodePool>, AcloudError> {
        let url = format!(
            "/api/v1/orgs/{}/clusters/{}/{}/pools",
            cluster.customer_slug, cluster.environment_slug, cluster.slug
        );
        let mut pools: Vec<NodePool> = self.get_json(&url).await?;
        for pool in &mut pools {
            pool.attach_cluster(cluster);
        }
        sort_deterministic(&mut pools);
        Ok(pools)
    }

    /// List the node pools of every given cluster concurrently.
    ///
    /// # Errors
    ///
    /// Returns [`AcloudError::FanOut`] naming the full identifier of the first
    /// cluster (in input order) whose listing failed.
    pub async fn get_node_pools_by_clusters(
        &self,
        clusters: &[Cluster],
    ) -> Result<Vec<NodePool>, AcloudError> {
        fan_out_sorted(
            "node pools",
            clusters,
            Cluster::full_identifier,
            |c| self.get_node_pools_by_cluster(c),
        )
        .await
    }

    /// List the node pools of every cluster the user can see.
    ///
    /// # Errors
    ///
    /// Returns the cluster listing error or the node pool fan-out error.
    pub async fn get_node_pools(&self) -> Result<Vec<NodePool>, AcloudError> {
        let clusters = self.get_clusters(&[]).await?;
        self.get_node_pools_by_clusters(&clusters).await
    }

    /// List the node pools of every cluster in one organisation.
    ///
    /// # Errors
    ///
    /// Returns the cluster listing error or the node pool fan-out error.
    pub async fn get_node_pools_by_org(&self, org: &str) -> Result<Vec<NodePool>, AcloudError> {
        let clusters = self.get_clusters_by_org(org, &[]).await?;
        self.get_node_pools_by_clusters(&clusters).await
    }

    /// List the environments of an organisation, including compute totals.
    ///
    /// # Errors
    ///
    /// Returns a transport, API, paging or decode error.
    pub async fn get_environments(&self, org: &str) -> Result<Vec<Environment>, AcloudError> {
        list_paged(self, &format!("/api/v1/orgs/{org}/environments?show-compute=true")).await
    }

    /// List the cloud accounts of an organisation.
    ///
    /// # Errors
    ///
    /// Returns a transport, API, paging or decode error.
    pub async fn get_cloud_accounts(&self, org: &str) -> Result<Vec<CloudAccount>, AcloudError> {
        list_paged(self, &format!("/api/v1/orgs/{org}/cloud-accounts")).await
    }

    /// Find the single cloud account with the given display name and provider.
    ///
    /// # Errors
    ///
    /// Returns [`AcloudError::Ambiguous`] when more than one account matches,
    /// [`AcloudError::NotFound`] when none does, or a listing error.
    pub async fn find_cloud_account_by_name(
        &self,
        org: &str,
        name: &str,
        cloud_provider: &str,
    ) -> Result<CloudAccount, AcloudError> {
        let url = format!(
            "/api/v1/orgs/{org}/cloud-accounts?display-name={name}&cloud-provider-slug={cloud_provider}"
        );
        let page = collect_pages(self, &url).await?;

        if page.total_elements > 1 {
            return Err(AcloudError::Ambiguous {
                resource: "cloud account",
                expected: 1,
                got: page.total_elements,
            });
        }

        marshal_page_content::<CloudAccount>(&page)?
            .into_iter()
            .next()
            .ok_or_else(|| {
                AcloudError::NotFound(format!(
                    "cloud account {name:?} for cloud provider {cloud_provider:?}"
                ))
            })
    }

    /// List the credentials stored in a cloud account.
    ///
    /// # Errors
    ///
    /// Returns a transport, API, paging or decode error.
    pub async fn get_cloud_credentials(
        &self,
        org: &str,
        cloud_account_identity: &str,
    ) -> Result<Vec<CloudCredential>, AcloudError> {
        list_paged(
            self,
            &format!("/api/v1/orgs/{org}/cloud-accounts/{cloud_account_identity}/credentials"),
        )
        .await
    }

    /// List the cloud providers available to an organisation.
    ///
    /// # Errors
    ///
    /// Returns a transport, API, paging or decode error.
    pub async fn get_cloud_providers(&self, org: &str) -> Result<Vec<CloudProvider>, AcloudError> {
        list_paged(self, &format!("/api/v1/orgs/{org}/cloud-providers")).await
    }

    /// List the regions of a cloud provider.
    ///
    /// # Errors
    ///
    /// Returns a transport, API, paging or decode error.
    pub async fn get_regions(
        &self,
        org: &str,
        cloud_provider: &str,
    ) -> Result<Vec<Region>, AcloudError> {
        list_paged(
            self,
            &format!("/api/v1/orgs/{org}/cloud-providers/{cloud_provider}/regions"),
        )
        .await
    }

    /// List the availability zones of a region.
    ///
    /// # Errors
    ///
    /// Returns a transport, API, paging or decode error.
    pub async fn get_availability_zones(
        &self,
        org: &str,
        cloud_provider: &str,
        region: &str,
    ) -> Result<Vec<AvailabilityZone>, AcloudError> {
        list_paged(
            self,
            &format!(
                "/api/v1/orgs/{org}/cloud-providers/{cloud_provider}/regions/{region}/availability-zones"
            ),
        )
        .await
    }

    /// List the node sizes a cloud provider offers. Not scoped to an organisation.
    ///
    /// # Errors
    ///
    /// Returns a transport, API, paging or decode error.
    pub async fn get_node_types(&self, cloud_provider: &str) -> Result<Vec<NodeType>, AcloudError> {
        list_paged(self, &format!("/api/v1/cloud-providers/{cloud_provider}/nodetypes")).await
    }

    /// List the update channels of an organisation, newest cluster version first.
    ///
    /// # Errors
    ///
    /// Returns a transport, API, paging or decode error.
    pub async fn get_update_channels(&self, org: &str) -> Result<Vec<UpdateChannel>, AcloudError> {
        let mut channels: Vec<UpdateChannel> =
            list_paged(self, &format!("/api/v1/orgs/{org}/update-channels")).await?;
        sort_update_channels(&mut channels);
        Ok(channels)
    }

    /// List the observability tenants of an organisation.
    ///
    /// # Errors
    ///
    /// Returns a transport, API, paging or decode error.
    pub async fn get_observability_tenants(
        &self,
        org: &str,
    ) -> Result<Vec<ObservabilityTenant>, AcloudError> {
        list_paged(self, &format!("/api/v1/orgs/{org}/monitoring")).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_params_render_set_fields_only() {
        let cases = [
            (GetClusterOpts::default(), ""),
            (
                GetClusterOpts {
                    include_details: Some(true),
                    show_compute: None,
                },
                "includeDetails=true",
            ),
            (
                GetClusterOpts {
                    include_details: None,
                    show_compute: Some(true),
                },
                "show-compute=true",
            ),
            (
                GetClusterOpts {
                    include_details: Some(true),
                    show_compute: Some(true),
                },
                "includeDetails=true&show-compute=true",
            ),
            (
                GetClusterOpts {
                    include_details: Some(false),
                    show_compute: Some(false),
                },
                "includeDetails=false&show-compute=false",
            ),
        ];

        for (opts, want) in cases {
            assert_eq!(opts.to_query_params(), want, "{opts:?}");
        }
    }

    #[test]
    fn optional_query_params_prefixes_non_empty() {
        assert_eq!(optional_query_params(""), "");
        assert_eq!(optional_query_params("param=1&other=2"), "?param=1&other=2");
    }

    #[test]
    fn merge_applies_later_options_then_defaults() {
        let opts = [
            GetClusterOpts {
                include_details: Some(true),
                show_compute: Some(false),
            },
            GetClusterOpts {
                include_details: Some(false),
                show_compute: None,
            },
        ];

        let merged = GetClusterOpts::merge(&opts, CLUSTER_LIST_DEFAULTS);

        assert_eq!(merged.include_details, Some(false));
        assert_eq!(merged.show_compute, Some(false));
    }

    #[test]
    fn cluster_listing_shows_compute_by_default() {
        assert_eq!(cluster_query(&[]), "?show-compute=true");
        assert_eq!(
            cluster_query(&[GetClusterOpts {
                include_details: Some(true),
                show_compute: None,
            }]),
            "?includeDetails=true&show-compute=true"
        );
    }
}
