use std::fmt;
use std::fmt::Formatter;

/// Known device families, resolved from the model name reported by the cloud
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceKind {
    Plug,
    PowerStrip,
    EmeterPlug,
    EmeterPowerStrip,
    Unknown,
}

impl DeviceKind {
    /// Resolves the device kind from a model name such as "HS110(EU)"
    ///
    /// # Arguments
    ///
    /// * 'model' - the model name, any hardware region suffix is ignored
    pub fn from_model(model: &str) -> DeviceKind {
        let base = model.split('(').next().unwrap_or(model).trim().to_ascii_uppercase();

        match base.as_str() {
            "HS110" | "KP115" | "KP125" | "EP25" => DeviceKind::EmeterPlug,
            "HS300" => DeviceKind::EmeterPowerStrip,
            "HS100" | "HS103" | "HS105" | "KP100" | "KP105" | "EP10" => DeviceKind::Plug,
            "HS107" | "KP200" | "KP303" | "KP400" => DeviceKind::PowerStrip,
            _ => DeviceKind::Unknown,
        }
    }

    pub fn has_emeter(&self) -> bool {
        matches!(self, DeviceKind::EmeterPlug | DeviceKind::EmeterPowerStrip)
    }
}

/// Implementation of the Display Trait for pretty print
impl fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            DeviceKind::Plug             => write!(f, "Plug"),
            DeviceKind::PowerStrip       => write!(f, "Power strip"),
            DeviceKind::EmeterPlug       => write!(f, "Plug with emeter"),
            DeviceKind::EmeterPowerStrip => write!(f, "Power strip with emeter"),
            DeviceKind::Unknown          => write!(f, "Unknown"),
        }
    }
}

/// A device registered in the cloud account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Device {
    pub device_id: String,
    pub alias: String,
    pub model: String,
    /// Outlet id when the device is one outlet of a power strip
    pub child_id: Option<String>,
    pub kind: DeviceKind,
}

impl Device {
    /// Returns a new Device with its kind resolved from the model name
    ///
    /// # Arguments
    ///
    /// * 'device_id' - the cloud device id
    /// * 'alias' - the user given name of the device
    /// * 'model' - the model name
    /// * 'child_id' - the outlet id for power strip outlets
    pub fn new(device_id: &str, alias: &str, model: &str, child_id: Option<&str>) -> Self {
        Self {
            device_id: device_id.to_string(),
            alias: alias.to_string(),
            model: model.to_string(),
            child_id: child_id.map(|c| c.to_string()),
            kind: DeviceKind::from_model(model),
        }
    }

    pub fn has_emeter(&self) -> bool {
        self.kind.has_emeter()
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{} [{}, {}]", self.alias, self.model, self.kind)
    }
}
