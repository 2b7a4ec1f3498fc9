use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use dual_session_lambda::adapters::object_store::{ObjectMetadata, ObjectStore, ObjectStream};
use dual_session_lambda::adapters::role_session::{RoleSession, RoleSessionBroker};

#[derive(Default)]
struct CloudState {
    objects: HashMap<(String, String), Vec<u8>>,
    calls: Vec<String>,
    failures: Vec<String>,
}

/// Shared in-memory stand-in for the object store and token service.
#[derive(Clone, Default)]
pub struct InMemoryCloud {
    state: Arc<Mutex<CloudState>>,
}

impl InMemoryCloud {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the named call (e.g. `"assume_role:SourceReaderSession"`) fail.
    pub fn fail_on(&self, call: &str) {
        self.state
            .lock()
            .expect("poisoned mutex")
            .failures
            .push(call.to_string());
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.lock().expect("poisoned mutex").calls.clone()
    }

    pub fn object(&self, bucket: &str, key: &str) -> Option<Vec<u8>> {
        self.state
            .lock()
            .expect("poisoned mutex")
            .objects
            .get(&(bucket.to_string(), key.to_string()))
            .cloned()
    }

    pub fn store(&self, identity: &str) -> FakeStore {
        FakeStore {
            identity: identity.to_string(),
            cloud: self.clone(),
        }
    }

    pub fn broker(&self) -> FakeBroker {
        FakeBroker {
            cloud: self.clone(),
        }
    }

    fn record(&self, call: String) -> Result<(), String> {
        let mut state = self.state.lock().expect("poisoned mutex");
        let should_fail = state.failures.contains(&call);
        state.calls.push(call.clone());
        if should_fail {
            return Err(format!("AccessDenied: injected failure for {call}"));
        }
        Ok(())
    }

    fn insert(&self, bucket: &str, key: &str, body: Vec<u8>) {
        self.state
            .lock()
            .expect("poisoned mutex")
            .objects
            .insert((bucket.to_string(), key.to_string()), body);
    }
}

pub struct FakeStore {
    identity: String,
    cloud: InMemoryCloud,
}

impl ObjectStore for FakeStore {
    fn put_object(&self, bucket: &str, key: &str, body: &[u8]) -> Result<(), String> {
        self.cloud.record(format!("{}:put_object", self.identity))?;
        self.cloud.insert(bucket, key, body.to_vec());
        Ok(())
    }

    fn get_object_stream(&self, bucket: &str, key: &str) -> Result<ObjectStream, String> {
        self.cloud.record(format!("{}:get_object", self.identity))?;
        let body = self
            .cloud
            .object(bucket, key)
            .ok_or_else(|| format!("NoSuchKey: {bucket}/{key}"))?;
        Ok(ObjectStream::from_bytes(body))
    }

    fn upload_stream(&self, bucket: &str, key: &str, stream: ObjectStream) -> Result<(), String> {
        self.cloud
            .record(format!("{}:upload_stream", self.identity))?;
        let body = tokio::runtime::Builder::new_current_thread()
            .build()
            .map_err(|error| error.to_string())?
            .block_on(stream.body.collect())
            .map_err(|error| error.to_string())?
            .into_bytes()
            .to_vec();
        self.cloud.insert(bucket, key, body);
        Ok(())
    }

    fn head_object(&self, bucket: &str, key: &str) -> Result<ObjectMetadata, String> {
        self.cloud.record(format!("{}:head_object", self.identity))?;
        let body = self
            .cloud
            .object(bucket, key)
            .ok_or_else(|| format!("NotFound: {bucket}/{key}"))?;
        Ok(ObjectMetadata {
            content_length: i64::try_from(body.len()).ok(),
            e_tag: Some("\"fake-etag\"".to_string()),
        })
    }
}

pub struct FakeBroker {
    cloud: InMemoryCloud,
}

impl RoleSessionBroker for FakeBroker {
    fn open_session(&self, role_arn: &str, session_name: &str) -> Result<RoleSession, String> {
        self.cloud.record(format!("assume_role:{session_name}"))?;
        Ok(RoleSession::new(
            role_arn,
            session_name,
            Box::new(self.cloud.store(session_name)),
        ))
    }
}
