use std::sync::Mutex;
use async_trait::async_trait;
use serde_json::Value;
use tplink_emeter::{CloudError, Device, EmeterDevice, PassThrough};

/// Pass-through channel answering every command with the same canned envelope
pub struct CannedPassThrough {
    envelope: Option<Value>,
    requests: Mutex<Vec<(String, String, Option<Value>)>>,
}

impl CannedPassThrough {
    pub fn new(envelope: Option<Value>) -> Self {
        Self { envelope, requests: Mutex::new(Vec::new()) }
    }

    /// Module, command and params of every request sent so far
    pub fn requests(&self) -> Vec<(String, String, Option<Value>)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl PassThrough for CannedPassThrough {
    async fn send(&self, module: &str, command: &str, params: Option<Value>) -> Result<Option<Value>, CloudError> {
        self.requests.lock().unwrap().push((module.to_string(), command.to_string(), params));
        tokio::task::yield_now().await;

        Ok(self.envelope.clone())
    }
}

pub fn emeter(envelope: Option<Value>) -> EmeterDevice<CannedPassThrough> {
    EmeterDevice::new(Device::new("80061F9B", "Dryer", "HS110(EU)", None), CannedPassThrough::new(envelope))
}
