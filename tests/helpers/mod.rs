//! Test utility functions for wheel-publish

#![allow(dead_code)]

use wheel_publish::core::{CiEnvironment, PublisherConfig};
use wheel_publish::execution::{PublishError, PublishOutcome, Publisher};
use wheel_publish::upload::{UploadClient, UploadError, UploadRequest};

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

pub const NIGHTLY_SECRET: &str = "nightly-secret";
pub const STAGING_SECRET: &str = "staging-secret";

/// Every external call the mock client saw, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    EnsureAvailable,
    Upload { org: String, token: String, files: usize },
}

/// Mock upload client that records calls and returns scripted results
#[derive(Clone, Default)]
pub struct MockClient {
    calls: Arc<Mutex<Vec<Call>>>,
    install_error: Option<i32>,
    upload_error: Option<i32>,
}

impl MockClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail `ensure_available` as if the installer exited with `code`
    pub fn failing_install(code: i32) -> Self {
        Self {
            install_error: Some(code),
            ..Self::default()
        }
    }

    /// Fail `upload` as if the client exited with `code`
    pub fn failing_upload(code: i32) -> Self {
        Self {
            upload_error: Some(code),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl UploadClient for MockClient {
    async fn ensure_available(&self) -> Result<(), UploadError> {
        self.calls.lock().unwrap().push(Call::EnsureAvailable);
        match self.install_error {
            Some(code) => Err(UploadError::InstallFailed {
                code: Some(code),
                stderr: "pip: no matching distribution".to_string(),
            }),
            None => Ok(()),
        }
    }

    async fn upload(&self, request: &UploadRequest) -> Result<(), UploadError> {
        self.calls.lock().unwrap().push(Call::Upload {
            org: request.org.clone(),
            token: request.token.clone(),
            files: request.files.len(),
        });
        match self.upload_error {
            Some(code) => Err(UploadError::UploadFailed { code: Some(code) }),
            None => Ok(()),
        }
    }
}

/// Create a wheelhouse with `count` wheels and return a config pointing at it
pub fn config_with_wheels(dir: &Path, count: usize) -> PublisherConfig {
    let wheelhouse = dir.join("wheelhouse");
    std::fs::create_dir_all(&wheelhouse).unwrap();
    for i in 0..count {
        std::fs::write(
            wheelhouse.join(format!("scipy-1.{}.0-cp38-cp38-manylinux1_x86_64.whl", i)),
            b"wheel",
        )
        .unwrap();
    }

    PublisherConfig {
        artifacts: format!("{}/*.whl", wheelhouse.display()),
        ..PublisherConfig::default()
    }
}

/// Lookup over a fixed set of variables
pub fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |name| map.get(name).cloned()
}

/// Both secrets plus the two trigger variables
pub fn ci_vars(build_wheel: &str, event: &str) -> impl Fn(&str) -> Option<String> {
    lookup_from(&[
        ("BUILD_WHEEL", build_wheel),
        ("TRAVIS_EVENT_TYPE", event),
        ("SCIPY_WHEELS_NIGHTLY", NIGHTLY_SECRET),
        ("MULTIBUILD_WHEELS_STAGING_ACCESS", STAGING_SECRET),
    ])
}

/// Read the environment and run a publisher with the mock client
pub async fn run_with_mock<F>(
    config: PublisherConfig,
    client: MockClient,
    lookup: F,
) -> Result<PublishOutcome, PublishError>
where
    F: Fn(&str) -> Option<String>,
{
    let env = CiEnvironment::from_lookup(&config, &lookup);
    let publisher = Publisher::new(config, client);
    publisher.publish(&env, lookup).await
}

/// Assert that the run published to `org` with the matching index URL
pub fn assert_published_to(result: &Result<PublishOutcome, PublishError>, expected_org: &str) {
    match result {
        Ok(PublishOutcome::Published { org, index_url, .. }) => {
            assert_eq!(org, expected_org);
            assert_eq!(
                index_url,
                &format!("https://pypi.anaconda.org/{}/simple", expected_org)
            );
        }
        other => panic!("expected Published to {}, got {:?}", expected_org, other),
    }
}
