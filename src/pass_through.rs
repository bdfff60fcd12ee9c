use async_trait::async_trait;
use serde_json::Value;
use crate::manager_tplink_cloud::errors::CloudError;

/// Relays a command to one functional module of a remote device.
///
/// Implementations return the module's response document for the command, or `None`
/// if the device produced no response for it. Transport level faults are errors.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PassThrough: Send + Sync {
    async fn send(&self, module: &str, command: &str, params: Option<Value>) -> Result<Option<Value>, CloudError>;
}
