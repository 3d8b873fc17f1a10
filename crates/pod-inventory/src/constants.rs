//! Fixed inventory names and connection variables for k3s pod hosts.

/// Host type handled by this system.
pub const POD_HOST_TYPE: &str = "k3s-pod";

/// Group every primary pod host joins.
pub const PODS_GROUP: &str = "k3s_pods";

/// Group every derived container host joins.
pub const CONTAINERS_GROUP: &str = "k3s_pod_containers";

/// Connection kind for exec-based SSH-through-pod connectivity.
pub const CONNECTION_KIND: &str = "sshkubectl";

/// Kubeconfig path on the cluster host.
pub const KUBECONFIG_PATH: &str = "/etc/rancher/k3s/k3s.yaml";

/// Delimiter between hostname and container name in derived hostnames.
pub const CONTAINER_HOST_DELIMITER: &str = "-cnt-";

/// Process-wide aggregate variable fed by expansion updates.
pub const AGGREGATE_KEY: &str = "network_pods";

/// Connection variable names.
pub const VAR_CONNECTION: &str = "ansible_connection";
pub const VAR_HOST: &str = "ansible_host";
pub const VAR_POD: &str = "ansible_kubectl_pod";
pub const VAR_CONTAINER: &str = "ansible_kubectl_container";
pub const VAR_NAMESPACE: &str = "ansible_kubectl_namespace";
pub const VAR_KUBECONFIG: &str = "ansible_kubectl_kubeconfig";
pub const VAR_NETWORK_NODES: &str = "network_nodes";
