use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

#[derive(Serialize)]
pub struct PassThroughRequest {
    pub method: String,
    pub params: PassThroughParams,
}

#[derive(Serialize)]
pub struct PassThroughParams {
    #[serde(rename = "deviceId")]
    pub device_id: String,
    /// The device level request, itself serialized as a json string
    #[serde(rename = "requestData")]
    pub request_data: String,
}

#[derive(Deserialize)]
pub struct PassThroughResponse {
    pub error_code: i64,
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub result: Option<PassThroughResult>,
}

#[derive(Deserialize)]
pub struct PassThroughResult {
    #[serde(rename = "responseData")]
    pub response_data: String,
}

/// Builds the device level request document, i.e. `{"<module>":{"<command>":<params>}}`
/// with an optional child context for power strip outlets.
///
/// # Arguments
///
/// * 'module' - the device functional module, e.g. "emeter"
/// * 'command' - the command within the module
/// * 'params' - command parameters, serialized as null when missing
/// * 'child_id' - the outlet to address, if any
pub fn build_request_data(module: &str, command: &str, params: Option<Value>, child_id: Option<&str>) -> Value {
    let mut cmd = Map::new();
    cmd.insert(command.to_string(), params.unwrap_or(Value::Null));

    let mut doc = Map::new();
    if let Some(child) = child_id {
        doc.insert("context".to_string(), json!({ "child_ids": [child] }));
    }
    doc.insert(module.to_string(), Value::Object(cmd));

    Value::Object(doc)
}
