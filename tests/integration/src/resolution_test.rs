//! End-to-end resolution test over a real roles tree
//!
//! Builds a roles directory with fragment templates and a site document
//! in a tempdir, runs the full pass sequence, and checks the final
//! inventory state, the aggregate variable, and error accumulation.

use pod_fragments::section::{get, get_mapping, get_sequence, get_str};
use pod_fragments::{FragmentLoader, VarRenderer};
use pod_fs::RolesPath;
use pod_inventory::{MemoryInventory, PodResolver, SiteDocument};
use serde_yaml::Value;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const BASE_FRAGMENT: &str = "\
pod:
  namespace: default
  containers:
    app:
      image: app:{{ app_tag }}
      env:
        LOG_LEVEL: info
  volumes:
    - name: data
      hostPath: /srv/{{ inventory_hostname }}
  tolerations:
    - key: node
      effect: NoSchedule
";

const WEB_FRAGMENT: &str = "\
pod:
  containers:
    app:
      env:
        TZ: UTC
    sidecar:
      image: envoy:1.30
  volumes:
    - name: data
      hostPath: /mnt/{{ inventory_hostname }}
";

const SITE: &str = "\
hosts:
  web1:
    type: k3s-pod
    groups: [web-servers]
    k3s:
      cluster: c1
      namespace: web
      snippets: [app-base, app-web]
    host_vars:
      app_tag: '2.1'
    pod:
      namespace: production
  c1:
    type: server
    networks:
      eth0:
        ipv4: 10.0.0.5/24
";

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn write_fragment(roles_root: &Path, role: &str, text: &str) {
    let templates = roles_root.join(role).join("templates");
    fs::create_dir_all(&templates).unwrap();
    fs::write(templates.join("k3s-pod.yml.j2"), text).unwrap();
}

fn setup_roles() -> TempDir {
    let roles = TempDir::new().unwrap();
    write_fragment(roles.path(), "app-base", BASE_FRAGMENT);
    write_fragment(roles.path(), "app-web", WEB_FRAGMENT);
    roles
}

fn resolver(roles_root: &Path) -> PodResolver<RolesPath, VarRenderer> {
    PodResolver::new(FragmentLoader::new(
        RolesPath::single(roles_root),
        VarRenderer::new(),
    ))
}

#[test]
fn full_pipeline_merges_fragments_and_expands_containers() {
    init_tracing();
    let roles = setup_roles();
    let registry = SITE.parse::<SiteDocument>().unwrap().into_registry();
    let mut inventory = MemoryInventory::new();

    let outcome = resolver(roles.path()).resolve(registry, &mut inventory);
    assert!(
        !outcome.sink.has_errors(),
        "unexpected errors: {:?}",
        outcome.sink.errors()
    );

    // merged pod section written back into the registry
    let web1 = outcome.registry.get("web1").unwrap();
    let pod = web1.pod.as_ref().unwrap();

    // host inline override beats both fragments
    assert_eq!(get_str(pod, "namespace"), Some("production"));

    // container deep merge: base env survives the web overlay, both
    // containers present, rendered values substituted
    let containers = get_mapping(pod, "containers").unwrap();
    let app = get_mapping(containers, "app").unwrap();
    assert_eq!(get_str(app, "image"), Some("app:2.1"));
    let env = get_mapping(app, "env").unwrap();
    assert_eq!(get_str(env, "LOG_LEVEL"), Some("info"));
    assert_eq!(get_str(env, "TZ"), Some("UTC"));
    assert!(get(containers, "sidecar").is_some());

    // volume list merged by name: the web overlay replaced `data`
    let volumes = get_sequence(pod, "volumes").unwrap();
    assert_eq!(volumes.len(), 1);
    let data = volumes[0].as_mapping().unwrap();
    assert_eq!(get_str(data, "hostPath"), Some("/mnt/web1"));

    // primary host connectivity through the cluster interface address
    assert_eq!(
        inventory.variable("web1", "ansible_host"),
        Some(&Value::from("web1@10.0.0.5"))
    );
    assert_eq!(
        inventory.variable("web1", "ansible_kubectl_namespace"),
        Some(&Value::from("web"))
    );

    // two containers, no explicit default: no selector on the primary
    assert!(inventory.variable("web1", "ansible_kubectl_container").is_none());

    // derived hosts, one per container, in the fixed group and the
    // normalized declared group
    for container in ["app", "sidecar"] {
        let derived = format!("web1-cnt-{container}");
        assert!(inventory.hosts().contains(&derived));
        assert!(
            inventory
                .group_members("k3s_pod_containers")
                .unwrap()
                .contains(&derived)
        );
        assert!(inventory.group_members("web_servers").unwrap().contains(&derived));
        assert_eq!(
            inventory.variable(&derived, "ansible_kubectl_container"),
            Some(&Value::from(container))
        );
    }

    // aggregate update folded per host
    assert_eq!(outcome.aggregates.len(), 1);
    let aggregated = outcome.aggregates.get("web1").unwrap();
    assert_eq!(aggregated.pod, web1.pod);
}

#[test]
fn broken_fragment_is_reported_and_the_rest_still_resolves() {
    init_tracing();
    let roles = TempDir::new().unwrap();
    write_fragment(roles.path(), "app-web", WEB_FRAGMENT);
    // app-base is missing entirely

    let registry = SITE.parse::<SiteDocument>().unwrap().into_registry();
    let mut inventory = MemoryInventory::new();

    let outcome = resolver(roles.path()).resolve(registry, &mut inventory);

    // exactly the one fragment failure, attributed to the host
    assert_eq!(outcome.sink.errors().len(), 1);
    let message = format!("{}", outcome.sink.errors()[0]);
    assert!(message.contains("web1"), "got: {message}");
    assert!(message.contains("app-base"), "got: {message}");

    // the surviving fragment and the inline override still applied
    let pod = outcome.registry.get("web1").unwrap().pod.as_ref().unwrap();
    assert_eq!(get_str(pod, "namespace"), Some("production"));
    let containers = get_mapping(pod, "containers").unwrap();
    assert!(get(containers, "sidecar").is_some());

    // expansion still ran
    assert!(inventory.hosts().contains("web1-cnt-sidecar"));
}

#[test]
fn site_file_round_trip_from_disk() {
    init_tracing();
    let roles = setup_roles();
    let site_path = roles.path().join("site.yaml");
    fs::write(&site_path, SITE).unwrap();

    let registry = SiteDocument::load(&site_path).unwrap().into_registry();
    assert_eq!(registry.len(), 2);

    let mut inventory = MemoryInventory::new();
    let outcome = resolver(roles.path()).resolve(registry, &mut inventory);
    assert!(!outcome.sink.has_errors());
    assert!(inventory.hosts().contains("web1-cnt-app"));
}

#[test]
fn dry_run_reports_validation_errors_without_inventory_writes() {
    init_tracing();
    let roles = TempDir::new().unwrap();

    let registry = "\
hosts:
  bad1:
    type: k3s-pod
    k3s:
      cluster: ghost
"
    .parse::<SiteDocument>()
    .unwrap()
    .into_registry();
    let mut inventory = MemoryInventory::new();

    let outcome = resolver(roles.path())
        .dry_run(true)
        .resolve(registry, &mut inventory);

    // no containers and an unresolvable cluster reference
    assert_eq!(outcome.sink.errors().len(), 2);
    assert!(inventory.hosts().is_empty());
    assert!(outcome.aggregates.is_empty());
}
