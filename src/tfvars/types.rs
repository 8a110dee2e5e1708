//! Data types for the generated tfvars entry

pub const DEFAULT_DISK_SIZE_GB: &str = "10";
pub const DEFAULT_DISK_TYPE: &str = "pd-balanced";
pub const DEFAULT_KEY_REVOCATION_ACTION_TYPE: &str = "NONE";
pub const DEFAULT_BOOT_DISK_AUTO_DELETE: bool = true;

/// Image family an instance is pinned to in tfvars
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageFamily {
    #[default]
    Debian12,
    Debian11,
}

impl ImageFamily {
    /// Classify an image name such as `debian-11-bullseye-v20240110`
    pub fn from_image_name(image: &str) -> Option<Self> {
        if image.contains("debian-12") || image.contains("bookworm") {
            Some(ImageFamily::Debian12)
        } else if image.contains("debian-11") || image.contains("bullseye") {
            Some(ImageFamily::Debian11)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ImageFamily::Debian12 => "debian-12",
            ImageFamily::Debian11 => "debian-11",
        }
    }
}

impl std::fmt::Display for ImageFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fields scraped from the generated configuration of one instance
#[derive(Debug, Clone, PartialEq)]
pub struct InstanceConfig {
    /// Identifier from import.tf, kept for reporting
    pub resource_id: String,
    pub name: String,
    pub zone: String,
    pub machine_type: String,
    /// Digits only; rendered unquoted
    pub disk_size_gb: String,
    pub disk_type: String,
    pub image_family: ImageFamily,
    pub boot_disk_auto_delete: bool,
    pub key_revocation_action_type: String,
    /// Key/value pairs in file order
    pub metadata: Vec<(String, String)>,
    pub service_account_email: Option<String>,
    pub service_account_scopes: Vec<String>,
    pub tags: Vec<String>,
}

impl InstanceConfig {
    /// An instance with nothing extracted yet: empty scalars, defaults elsewhere
    pub fn new(resource_id: impl Into<String>) -> Self {
        Self {
            resource_id: resource_id.into(),
            name: String::new(),
            zone: String::new(),
            machine_type: String::new(),
            disk_size_gb: DEFAULT_DISK_SIZE_GB.to_string(),
            disk_type: DEFAULT_DISK_TYPE.to_string(),
            image_family: ImageFamily::default(),
            boot_disk_auto_delete: DEFAULT_BOOT_DISK_AUTO_DELETE,
            key_revocation_action_type: DEFAULT_KEY_REVOCATION_ACTION_TYPE.to_string(),
            metadata: Vec::new(),
            service_account_email: None,
            service_account_scopes: Vec::new(),
            tags: Vec::new(),
        }
    }

    /// Zone without its trailing `-<letter>` suffix (`us-central1-a` -> `us-central1`)
    pub fn region(&self) -> &str {
        match self.zone.char_indices().rev().nth(1) {
            Some((idx, _)) => &self.zone[..idx],
            None => "",
        }
    }

    /// Tags that are not managed by the environment itself, in original order
    pub fn custom_tags<'a>(&'a self, excluded: &[String]) -> Vec<&'a str> {
        self.tags
            .iter()
            .map(String::as_str)
            .filter(|tag| !excluded.iter().any(|e| e == tag))
            .collect()
    }
}
