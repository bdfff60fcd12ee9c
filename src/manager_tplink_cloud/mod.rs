pub mod errors;

use std::time::Duration;
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde_json::Value;
use crate::config::CloudParameters;
use crate::device::Device;
use crate::manager_tplink_cloud::errors::CloudError;
use crate::models::tplink_passthrough::{build_request_data, PassThroughParams, PassThroughRequest, PassThroughResponse};
use crate::pass_through::PassThrough;

/// Client for the TP-Link cloud passthrough API.
///
/// Only relays requests using an already obtained token, there is no login, token
/// refresh or retry.
#[derive(Clone)]
pub struct TPLinkCloud {
    client: Client,
    app_server_url: String,
    token: String,
}

impl TPLinkCloud {
    /// Returns a new instance of the TPLinkCloud struct
    ///
    /// # Arguments
    ///
    /// * 'config' - cloud parameters, i.e. app server url, token and request timeout
    pub fn new(config: &CloudParameters) -> Result<Self, CloudError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, app_server_url: config.app_server_url.clone(), token: config.token.clone() })
    }

    /// Returns a pass-through channel bound to the given device
    ///
    /// # Arguments
    ///
    /// * 'device' - the device, or power strip outlet, to address
    pub fn channel(&self, device: &Device) -> CloudChannel {
        CloudChannel {
            cloud: self.clone(),
            device_id: device.device_id.clone(),
            child_id: device.child_id.clone(),
        }
    }

    /// Relays a command to a device and returns the response document for that command
    ///
    /// # Arguments
    ///
    /// * 'device_id' - the cloud device id
    /// * 'child_id' - the outlet to address, if any
    /// * 'module' - the device functional module
    /// * 'command' - the command within the module
    /// * 'params' - command parameters
    pub async fn pass_through(&self, device_id: &str, child_id: Option<&str>, module: &str, command: &str, params: Option<Value>)
        -> Result<Option<Value>, CloudError> {

        let request_data = build_request_data(module, command, params, child_id);
        let req = PassThroughRequest {
            method: "passthrough".to_string(),
            params: PassThroughParams {
                device_id: device_id.to_string(),
                request_data: serde_json::to_string(&request_data)?,
            },
        };

        debug!("passthrough to {}: {}", device_id, req.params.request_data);

        let json = self.post_request(&req).await?;

        extract_response(&json, module, command)
    }

    /// Sends a request as a POST and returns the response body
    ///
    /// # Arguments
    ///
    /// * 'req' - the request to send as json
    async fn post_request(&self, req: &PassThroughRequest) -> Result<String, CloudError> {
        let json = self.client
            .post(&self.app_server_url)
            .query(&[("token", self.token.as_str())])
            .json(req)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        Ok(json)
    }
}

/// Pass-through channel to one device, or one outlet of a power strip
#[derive(Clone)]
pub struct CloudChannel {
    cloud: TPLinkCloud,
    device_id: String,
    child_id: Option<String>,
}

#[async_trait]
impl PassThrough for CloudChannel {
    async fn send(&self, module: &str, command: &str, params: Option<Value>) -> Result<Option<Value>, CloudError> {
        self.cloud.pass_through(&self.device_id, self.child_id.as_deref(), module, command, params).await
    }
}

/// Checks the cloud level status and digs out the device response for the command.
///
/// A device that rejects a whole module answers with a status on module level rather
/// than a command response, that status document is then returned in its place.
///
/// # Arguments
///
/// * 'json' - the cloud response body
/// * 'module' - the module the request was sent to
/// * 'command' - the command within the module
fn extract_response(json: &str, module: &str, command: &str) -> Result<Option<Value>, CloudError> {
    let res: PassThroughResponse = serde_json::from_str(json)?;
    if res.error_code != 0 {
        return Err(CloudError::Cloud { code: res.error_code, msg: res.msg.unwrap_or_default() });
    }

    let Some(result) = res.result else {
        return Ok(None);
    };

    let data: Value = serde_json::from_str(&result.response_data)?;
    let Some(module_doc) = data.get(module) else {
        return Ok(None);
    };

    let envelope = match module_doc.get(command) {
        Some(doc) => Some(doc.clone()),
        None if module_doc.get("err_code").is_some() => Some(module_doc.clone()),
        None => None,
    };

    Ok(envelope.filter(|doc| !doc.is_null()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn cloud_body(response_data: Value) -> String {
        json!({
            "error_code": 0,
            "result": { "responseData": response_data.to_string() }
        }).to_string()
    }

    #[test]
    fn request_data_addresses_module_and_command() {
        let data = build_request_data("emeter", "get_daystat", Some(json!({"year": 2023, "month": 1})), None);

        assert_eq!(data, json!({"emeter": {"get_daystat": {"year": 2023, "month": 1}}}));
    }

    #[test]
    fn request_data_without_params_is_null() {
        let data = build_request_data("emeter", "get_realtime", None, Some("80067AC2_00"));

        assert_eq!(data, json!({
            "context": {"child_ids": ["80067AC2_00"]},
            "emeter": {"get_realtime": null}
        }));
    }

    #[test]
    fn request_serializes_to_cloud_format() {
        let req = PassThroughRequest {
            method: "passthrough".to_string(),
            params: PassThroughParams { device_id: "8006".to_string(), request_data: "{}".to_string() },
        };

        assert_eq!(serde_json::to_value(&req).unwrap(), json!({
            "method": "passthrough",
            "params": {"deviceId": "8006", "requestData": "{}"}
        }));
    }

    #[test]
    fn command_response_is_extracted() {
        let body = cloud_body(json!({"emeter": {"get_realtime": {"err_code": 0, "power_mw": 1500}}}));

        let envelope = extract_response(&body, "emeter", "get_realtime").unwrap();

        assert_eq!(envelope, Some(json!({"err_code": 0, "power_mw": 1500})));
    }

    #[test]
    fn module_level_status_replaces_missing_command() {
        let body = cloud_body(json!({"emeter": {"err_code": -1, "err_msg": "module not support"}}));

        let envelope = extract_response(&body, "emeter", "get_realtime").unwrap();

        assert_eq!(envelope, Some(json!({"err_code": -1, "err_msg": "module not support"})));
    }

    #[test]
    fn missing_result_or_module_is_none() {
        let no_result = json!({"error_code": 0}).to_string();
        assert_eq!(extract_response(&no_result, "emeter", "get_monthstat").unwrap(), None);

        let other_module = cloud_body(json!({"system": {"get_sysinfo": {}}}));
        assert_eq!(extract_response(&other_module, "emeter", "get_monthstat").unwrap(), None);

        let null_command = cloud_body(json!({"emeter": {"get_monthstat": null}}));
        assert_eq!(extract_response(&null_command, "emeter", "get_monthstat").unwrap(), None);
    }

    #[test]
    fn cloud_error_code_is_an_error() {
        let body = json!({"error_code": -20571, "msg": "Device is offline"}).to_string();

        let err = extract_response(&body, "emeter", "get_realtime").unwrap_err();

        assert!(matches!(err, CloudError::Cloud { code: -20571, ref msg } if msg == "Device is offline"));
    }

    #[test]
    fn garbled_body_is_a_document_error() {
        let err = extract_response("<html>", "emeter", "get_realtime").unwrap_err();

        assert!(matches!(err, CloudError::Document(_)));
    }
}
