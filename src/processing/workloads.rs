//! Kubernetes workloads: Redis and the web application.

use crate::models::{
    ContainerPort, ContainerSpec, DeploymentSpec, EnvValue, EnvVar, ResourceNode, ResourceSpec,
    ServicePort, ServiceSpec, ServiceType, TargetPort,
};
use std::collections::BTreeMap;

pub const NAMESPACE: &str = "default";
pub const CREATE_TIMEOUT_SECS: u64 = 30;

pub const REDIS_SERVICE: &str = "redis-service";
pub const REDIS_DEPLOYMENT: &str = "redis-deployment";
pub const REDIS_PORT: u16 = 6379;
/// Container port name shared by the Redis deployment and service.
const REDIS_PORT_NAME: &str = "redis";

pub const WEBAPP_SERVICE: &str = "webapp-service";
pub const WEBAPP_DEPLOYMENT: &str = "webapp-deployment";
pub const WEBAPP_PORT: u16 = 4567;
pub const WEBAPP_PUBLIC_PORT: u16 = 80;

fn app_labels(app: &str) -> BTreeMap<String, String> {
    BTreeMap::from([("app".to_string(), app.to_string())])
}

fn literal(name: &str, value: &str) -> EnvVar {
    EnvVar {
        name: name.to_string(),
        value: EnvValue::Literal(value.to_string()),
    }
}

/// In-cluster URL of the Redis service.
pub fn redis_url() -> String {
    format!("redis://{REDIS_SERVICE}.{NAMESPACE}.svc.cluster.local:{REDIS_PORT}")
}

/// ClusterIP service, reachable only from inside the cluster.
pub fn redis_service_node(cluster: &str) -> ResourceNode {
    let spec = ServiceSpec {
        name: REDIS_SERVICE.to_string(),
        namespace: NAMESPACE.to_string(),
        service_type: ServiceType::ClusterIP,
        ports: vec![ServicePort {
            port: REDIS_PORT,
            target_port: TargetPort::Name(REDIS_PORT_NAME.to_string()),
        }],
        selector: app_labels("redis"),
    };
    ResourceNode::new(REDIS_SERVICE, ResourceSpec::KubeService(spec))
        .depends_on(cluster)
        .create_timeout(CREATE_TIMEOUT_SECS)
}

pub fn redis_deployment_node(cluster: &str) -> ResourceNode {
    let container = ContainerSpec {
        name: "redis".to_string(),
        image: "redis".to_string(),
        ports: vec![ContainerPort {
            name: Some(REDIS_PORT_NAME.to_string()),
            container_port: REDIS_PORT,
        }],
        env: vec![literal("REDIS_URL", &redis_url()), literal("REDIS_HOST", "0.0.0.0")],
        command: vec!["redis-server".to_string()],
        args: vec!["--bind".to_string(), "0.0.0.0".to_string()],
    };
    let spec = DeploymentSpec {
        name: REDIS_DEPLOYMENT.to_string(),
        namespace: NAMESPACE.to_string(),
        replicas: 1,
        labels: app_labels("redis"),
        containers: vec![container],
    };
    ResourceNode::new(REDIS_DEPLOYMENT, ResourceSpec::KubeDeployment(spec))
        .depends_on(cluster)
        .depends_on(REDIS_SERVICE)
        .create_timeout(CREATE_TIMEOUT_SECS)
}

pub fn webapp_deployment_node(cluster: &str, image: &str) -> ResourceNode {
    let container = ContainerSpec {
        name: "webapp".to_string(),
        image: image.to_string(),
        ports: vec![ContainerPort {
            name: None,
            container_port: WEBAPP_PORT,
        }],
        env: vec![literal("REDIS_URL", &redis_url())],
        command: vec![],
        args: vec![],
    };
    let spec = DeploymentSpec {
        name: WEBAPP_DEPLOYMENT.to_string(),
        namespace: NAMESPACE.to_string(),
        replicas: 1,
        labels: app_labels("webapp"),
        containers: vec![container],
    };
    ResourceNode::new(WEBAPP_DEPLOYMENT, ResourceSpec::KubeDeployment(spec))
        .depends_on(cluster)
        .depends_on(REDIS_SERVICE)
        .create_timeout(CREATE_TIMEOUT_SECS)
}

/// Load balancer service, reachable from the internet.
pub fn webapp_service_node(cluster: &str) -> ResourceNode {
    let spec = ServiceSpec {
        name: WEBAPP_SERVICE.to_string(),
        namespace: NAMESPACE.to_string(),
        service_type: ServiceType::LoadBalancer,
        ports: vec![ServicePort {
            port: WEBAPP_PUBLIC_PORT,
            target_port: TargetPort::Number(WEBAPP_PORT),
        }],
        selector: app_labels("webapp"),
    };
    ResourceNode::new(WEBAPP_SERVICE, ResourceSpec::KubeService(spec))
        .depends_on(cluster)
        .create_timeout(CREATE_TIMEOUT_SECS)
}
