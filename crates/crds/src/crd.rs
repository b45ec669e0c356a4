//! Multi-version CustomResourceDefinitions
//!
//! Every kind is served at v1alpha5, v1alpha6, v1beta1 and v1beta2 and stored
//! at the hub version. The API server calls the conversion webhook for anything
//! else.

use k8s_openapi::apiextensions_apiserver::pkg::apis::apiextensions::v1::{
    CustomResourceConversion, CustomResourceDefinition, ServiceReference, WebhookClientConfig,
    WebhookConversion,
};
use kube::CustomResourceExt;
use kube::core::crd::{MergeError, merge_crds};

use crate::scheme::Version;
use crate::{v1alpha5, v1alpha6, v1beta1, v1beta2};

/// Path the conversion webhook serves `ConversionReview` requests on
pub const CONVERT_PATH: &str = "/convert";

/// In-cluster Service fronting the conversion webhook
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookService {
    pub name: String,
    pub namespace: String,
    pub port: i32,
}

impl Default for WebhookService {
    fn default() -> Self {
        Self {
            name: "capo-conversion-webhook".to_string(),
            namespace: "capo-system".to_string(),
            port: 443,
        }
    }
}

impl WebhookService {
    fn conversion(&self) -> CustomResourceConversion {
        CustomResourceConversion {
            strategy: "Webhook".to_string(),
            webhook: Some(WebhookConversion {
                client_config: Some(WebhookClientConfig {
                    service: Some(ServiceReference {
                        name: self.name.clone(),
                        namespace: self.namespace.clone(),
                        path: Some(CONVERT_PATH.to_string()),
                        port: Some(self.port),
                    }),
                    ..Default::default()
                }),
                conversion_review_versions: vec!["v1".to_string()],
            }),
        }
    }
}

fn with_conversion(
    versions: Vec<CustomResourceDefinition>,
    service: &WebhookService,
) -> Result<CustomResourceDefinition, MergeError> {
    let mut crd = merge_crds(versions, Version::HUB.as_str())?;
    crd.spec.conversion = Some(service.conversion());
    Ok(crd)
}

/// All CRDs of the group, each carrying every served version
pub fn all_crds(service: &WebhookService) -> Result<Vec<CustomResourceDefinition>, MergeError> {
    Ok(vec![
        with_conversion(
            vec![
                v1alpha5::OpenStackCluster::crd(),
                v1alpha6::OpenStackCluster::crd(),
                v1beta1::OpenStackCluster::crd(),
                v1beta2::OpenStackCluster::crd(),
            ],
            service,
        )?,
        with_conversion(
            vec![
                v1alpha5::OpenStackClusterTemplate::crd(),
                v1alpha6::OpenStackClusterTemplate::crd(),
                v1beta1::OpenStackClusterTemplate::crd(),
                v1beta2::OpenStackClusterTemplate::crd(),
            ],
            service,
        )?,
        with_conversion(
            vec![
                v1alpha5::OpenStackMachine::crd(),
                v1alpha6::OpenStackMachine::crd(),
                v1beta1::OpenStackMachine::crd(),
                v1beta2::OpenStackMachine::crd(),
            ],
            service,
        )?,
        with_conversion(
            vec![
                v1alpha5::OpenStackMachineTemplate::crd(),
                v1alpha6::OpenStackMachineTemplate::crd(),
                v1beta1::OpenStackMachineTemplate::crd(),
                v1beta2::OpenStackMachineTemplate::crd(),
            ],
            service,
        )?,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_crds_serve_every_version() {
        let crds = all_crds(&WebhookService::default()).unwrap();

        assert_eq!(crds.len(), 4);
        for crd in &crds {
            let versions: Vec<&str> =
                crd.spec.versions.iter().map(|version| version.name.as_str()).collect();
            assert_eq!(
                versions,
                vec!["v1alpha5", "v1alpha6", "v1beta1", "v1beta2"],
                "{:?} should serve every version",
                crd.metadata.name
            );
            let storage: Vec<&str> = crd
                .spec
                .versions
                .iter()
                .filter(|version| version.storage)
                .map(|version| version.name.as_str())
                .collect();
            assert_eq!(storage, vec!["v1beta1"]);
        }
    }

    #[test]
    fn test_v1alpha5_is_deprecated() {
        let crds = all_crds(&WebhookService::default()).unwrap();

        for crd in &crds {
            let legacy = crd
                .spec
                .versions
                .iter()
                .find(|version| version.name == "v1alpha5")
                .unwrap();
            assert_eq!(legacy.deprecated, Some(true));
        }
    }

    #[test]
    fn test_conversion_points_at_webhook() {
        let service = WebhookService {
            name: "webhook".to_string(),
            namespace: "capo".to_string(),
            port: 9443,
        };
        let crds = all_crds(&service).unwrap();

        let conversion = crds[0].spec.conversion.as_ref().unwrap();
        assert_eq!(conversion.strategy, "Webhook");
        let webhook = conversion.webhook.as_ref().unwrap();
        assert_eq!(webhook.conversion_review_versions, vec!["v1"]);
        let reference = webhook
            .client_config
            .as_ref()
            .and_then(|config| config.service.as_ref())
            .unwrap();
        assert_eq!(reference.name, "webhook");
        assert_eq!(reference.namespace, "capo");
        assert_eq!(reference.path.as_deref(), Some("/convert"));
        assert_eq!(reference.port, Some(9443));
    }

    #[test]
    fn test_crd_names() {
        let crds = all_crds(&WebhookService::default()).unwrap();

        let names: Vec<_> = crds.iter().filter_map(|crd| crd.metadata.name.clone()).collect();
        assert_eq!(
            names,
            vec![
                "openstackclusters.infrastructure.cluster.x-k8s.io",
                "openstackclustertemplates.infrastructure.cluster.x-k8s.io",
                "openstackmachines.infrastructure.cluster.x-k8s.io",
                "openstackmachinetemplates.infrastructure.cluster.x-k8s.io",
            ]
        );
    }
}
