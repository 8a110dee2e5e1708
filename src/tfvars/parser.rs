//! Scraper for configuration generated by `plan -generate-config-out`
//!
//! Each field is looked up independently with its own pattern; a field that
//! is missing keeps its default and never affects the others.

use regex::Regex;

use super::types::{ImageFamily, InstanceConfig};

/// Parser for a generated `google_compute_instance` resource block
pub struct GeneratedConfigParser {
    name_pattern: Regex,
    zone_pattern: Regex,
    machine_type_pattern: Regex,
    key_revocation_pattern: Regex,
    tags_pattern: Regex,
    quoted_pattern: Regex,
    boot_disk_block: Regex,
    auto_delete_pattern: Regex,
    initialize_params_block: Regex,
    disk_size_pattern: Regex,
    disk_type_pattern: Regex,
    image_pattern: Regex,
    metadata_block: Regex,
    metadata_entry_pattern: Regex,
    service_account_block: Regex,
    scopes_pattern: Regex,
    email_pattern: Regex,
}

impl Default for GeneratedConfigParser {
    fn default() -> Self {
        Self::new()
    }
}

impl GeneratedConfigParser {
    /// Create a new parser with compiled regex patterns
    pub fn new() -> Self {
        Self {
            // Attribute names are anchored at line start so `device_name`
            // never satisfies `name`
            name_pattern: Regex::new(r#"(?m)^\s*name\s*=\s*"([^"]+)""#)
                .expect("Invalid name pattern regex"),
            zone_pattern: Regex::new(r#"(?m)^\s*zone\s*=\s*"([^"]+)""#)
                .expect("Invalid zone pattern regex"),
            machine_type_pattern: Regex::new(r#"(?m)^\s*machine_type\s*=\s*"([^"]+)""#)
                .expect("Invalid machine type pattern regex"),
            key_revocation_pattern: Regex::new(r#"key_revocation_action_type\s*=\s*"([^"]+)""#)
                .expect("Invalid key revocation pattern regex"),

            // tags = ["ssh", "web"]
            tags_pattern: Regex::new(r"(?m)^\s*tags\s*=\s*\[([^\]]*)\]")
                .expect("Invalid tags pattern regex"),
            quoted_pattern: Regex::new(r#""([^"]+)""#).expect("Invalid quoted pattern regex"),

            // Block headers; the body is cut out by brace matching
            boot_disk_block: Regex::new(r"(?m)^\s*boot_disk\s*\{")
                .expect("Invalid boot_disk pattern regex"),
            auto_delete_pattern: Regex::new(r"(?m)^\s*auto_delete\s*=\s*(true|false)\b")
                .expect("Invalid auto_delete pattern regex"),
            initialize_params_block: Regex::new(r"(?m)^\s*initialize_params\s*\{")
                .expect("Invalid initialize_params pattern regex"),
            disk_size_pattern: Regex::new(r"(?m)^\s*size\s*=\s*(\d+)")
                .expect("Invalid disk size pattern regex"),
            disk_type_pattern: Regex::new(r#"(?m)^\s*type\s*=\s*"([^"]+)""#)
                .expect("Invalid disk type pattern regex"),
            // image = "https://.../projects/debian-cloud/global/images/debian-12-bookworm-v20240213"
            image_pattern: Regex::new(r#"(?m)^\s*image\s*=\s*"(?:[^"]*images/)?([^"]+)""#)
                .expect("Invalid image pattern regex"),

            metadata_block: Regex::new(r"(?m)^\s*metadata\s*=\s*\{")
                .expect("Invalid metadata pattern regex"),
            metadata_entry_pattern: Regex::new(r#"([a-zA-Z0-9_-]+)\s*=\s*"([^"]+)""#)
                .expect("Invalid metadata entry pattern regex"),

            service_account_block: Regex::new(r"(?m)^\s*service_account\s*\{")
                .expect("Invalid service_account pattern regex"),
            scopes_pattern: Regex::new(r"scopes\s*=\s*\[([^\]]*)\]")
                .expect("Invalid scopes pattern regex"),
            email_pattern: Regex::new(r#"(?m)^\s*email\s*=\s*"([^"]+)""#)
                .expect("Invalid email pattern regex"),
        }
    }

    /// Extract every known field from the generated configuration text
    pub fn parse(&self, content: &str, resource_id: &str) -> InstanceConfig {
        let mut instance = InstanceConfig::new(resource_id);

        if let Some(name) = capture(&self.name_pattern, content) {
            instance.name = name.to_string();
        }
        if let Some(zone) = capture(&self.zone_pattern, content) {
            instance.zone = zone.to_string();
        }
        if let Some(machine_type) = capture(&self.machine_type_pattern, content) {
            instance.machine_type = machine_type.to_string();
        }
        if let Some(action) = capture(&self.key_revocation_pattern, content) {
            instance.key_revocation_action_type = action.to_string();
        }

        if let Some(boot_disk) = block_body(&self.boot_disk_block, content) {
            if let Some(flag) = capture(&self.auto_delete_pattern, boot_disk) {
                instance.boot_disk_auto_delete = flag == "true";
            }
        }

        self.parse_disk(content, &mut instance);
        instance.metadata = self.parse_metadata(content);
        self.parse_service_account(content, &mut instance);
        instance.tags = self.parse_tags(content);

        for (field, missing) in [
            ("name", instance.name.is_empty()),
            ("zone", instance.zone.is_empty()),
            ("machine_type", instance.machine_type.is_empty()),
        ] {
            if missing {
                tracing::debug!(field, "not found in generated configuration");
            }
        }

        instance
    }

    fn parse_disk(&self, content: &str, instance: &mut InstanceConfig) {
        let Some(params) = block_body(&self.initialize_params_block, content) else {
            tracing::debug!("no initialize_params block, keeping disk defaults");
            return;
        };

        if let Some(size) = capture(&self.disk_size_pattern, params) {
            instance.disk_size_gb = size.to_string();
        }
        if let Some(disk_type) = capture(&self.disk_type_pattern, params) {
            instance.disk_type = disk_type.to_string();
        }
        if let Some(image) = capture(&self.image_pattern, params) {
            match ImageFamily::from_image_name(image) {
                Some(family) => instance.image_family = family,
                None => tracing::debug!(image, "unrecognized image, keeping default family"),
            }
        }
    }

    fn parse_metadata(&self, content: &str) -> Vec<(String, String)> {
        let Some(body) = block_body(&self.metadata_block, content) else {
            return Vec::new();
        };

        body.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .filter_map(|line| self.metadata_entry_pattern.captures(line))
            .map(|caps| (caps[1].to_string(), caps[2].to_string()))
            .collect()
    }

    fn parse_service_account(&self, content: &str, instance: &mut InstanceConfig) {
        let Some(body) = block_body(&self.service_account_block, content) else {
            return;
        };

        if let Some(scopes) = capture(&self.scopes_pattern, body) {
            instance.service_account_scopes = self.quoted_items(scopes);
        }
        instance.service_account_email = capture(&self.email_pattern, body).map(str::to_string);
    }

    fn parse_tags(&self, content: &str) -> Vec<String> {
        capture(&self.tags_pattern, content)
            .map(|list| self.quoted_items(list))
            .unwrap_or_default()
    }

    fn quoted_items(&self, list: &str) -> Vec<String> {
        self.quoted_pattern
            .captures_iter(list)
            .map(|caps| caps[1].trim().to_string())
            .collect()
    }
}

/// First capture group of the first match
fn capture<'c>(pattern: &Regex, content: &'c str) -> Option<&'c str> {
    pattern
        .captures(content)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Body of the block whose header (ending in `{`) matches `header`
///
/// Braces inside quoted strings are ignored. An unterminated block counts as
/// absent.
fn block_body<'c>(header: &Regex, content: &'c str) -> Option<&'c str> {
    let start = header.find(content)?.end();
    let mut depth = 1usize;
    let mut in_string = false;
    let mut escaped = false;

    for (idx, c) in content[start..].char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }

        match c {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&content[start..start + idx]);
                }
            }
            _ => {}
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_generated_config() -> &'static str {
        r#"# __generated__ by Terraform
# Please review these resources and move them into your main configuration files.

# __generated__ by Terraform from "projects/acme-dev/zones/us-central1-a/instances/app-server-1"
resource "google_compute_instance" "temp_importer" {
  allow_stopping_for_update = null
  can_ip_forward            = false
  deletion_protection       = false
  description               = null
  enable_display            = false
  hostname                  = null
  key_revocation_action_type = "STOP"
  labels                    = {}
  machine_type              = "e2-standard-4"
  metadata = {
    enable-oslogin = "TRUE"
    startup-script = "echo {hello}"
  }
  metadata_startup_script = null
  min_cpu_platform        = null
  name                    = "app-server-1"
  project                 = "acme-dev"
  resource_policies       = []
  tags                    = ["ssh", "custom-tag", "prod"]
  zone                    = "us-central1-a"
  boot_disk {
    auto_delete                = false
    device_name                = "persistent-disk-0"
    disk_encryption_key_raw    = null # sensitive
    mode                       = "READ_WRITE"
    source                     = "https://www.googleapis.com/compute/v1/projects/acme-dev/zones/us-central1-a/disks/app-server-1"
    initialize_params {
      enable_confidential_compute = false
      image                       = "https://www.googleapis.com/compute/beta/projects/debian-cloud/global/images/debian-11-bullseye-v20240110"
      labels                      = {}
      provisioned_iops            = 0
      provisioned_throughput      = 0
      resource_manager_tags       = {}
      size                        = 50
      type                        = "pd-ssd"
    }
  }
  network_interface {
    network            = "https://www.googleapis.com/compute/v1/projects/tws-lz-host-networking/global/networks/shared"
    subnetwork_project = "tws-lz-host-networking"
  }
  service_account {
    email  = "app-sa@acme-dev.iam.gserviceaccount.com"
    scopes = ["https://www.googleapis.com/auth/cloud-platform", "https://www.googleapis.com/auth/logging.write"]
  }
  shielded_instance_config {
    enable_integrity_monitoring = true
    enable_secure_boot          = false
    enable_vtpm                 = true
  }
}
"#
    }

    #[test]
    fn test_parse_full_config() {
        let parser = GeneratedConfigParser::new();
        let instance = parser.parse(sample_generated_config(), "projects/acme-dev/x");

        assert_eq!(instance.resource_id, "projects/acme-dev/x");
        assert_eq!(instance.name, "app-server-1");
        assert_eq!(instance.zone, "us-central1-a");
        assert_eq!(instance.machine_type, "e2-standard-4");
        assert_eq!(instance.key_revocation_action_type, "STOP");
        assert!(!instance.boot_disk_auto_delete);
        assert_eq!(instance.disk_size_gb, "50");
        assert_eq!(instance.disk_type, "pd-ssd");
        assert_eq!(instance.image_family, ImageFamily::Debian11);
        assert_eq!(instance.tags, vec!["ssh", "custom-tag", "prod"]);
        assert_eq!(
            instance.service_account_email.as_deref(),
            Some("app-sa@acme-dev.iam.gserviceaccount.com")
        );
        assert_eq!(
            instance.service_account_scopes,
            vec![
                "https://www.googleapis.com/auth/cloud-platform",
                "https://www.googleapis.com/auth/logging.write"
            ]
        );
    }

    #[test]
    fn test_metadata_in_file_order_with_braces_in_values() {
        let parser = GeneratedConfigParser::new();
        let instance = parser.parse(sample_generated_config(), "id");

        assert_eq!(
            instance.metadata,
            vec![
                ("enable-oslogin".to_string(), "TRUE".to_string()),
                ("startup-script".to_string(), "echo {hello}".to_string()),
            ]
        );
    }

    #[test]
    fn test_name_does_not_match_device_name() {
        let parser = GeneratedConfigParser::new();
        let content = r#"
  boot_disk {
    device_name = "persistent-disk-0"
  }
  name = "real-name"
"#;

        assert_eq!(parser.parse(content, "id").name, "real-name");
    }

    #[test]
    fn test_empty_content_yields_defaults() {
        let parser = GeneratedConfigParser::new();
        let instance = parser.parse("", "id");

        assert_eq!(instance, InstanceConfig::new("id"));
    }

    #[test]
    fn test_fields_are_independent() {
        let parser = GeneratedConfigParser::new();
        let content = r#"
  machine_type = "n2-standard-2"
  initialize_params {
    type = "pd-standard"
  }
"#;

        let instance = parser.parse(content, "id");
        assert_eq!(instance.machine_type, "n2-standard-2");
        assert_eq!(instance.disk_type, "pd-standard");
        assert_eq!(instance.disk_size_gb, "10");
        assert_eq!(instance.name, "");
        assert_eq!(instance.image_family, ImageFamily::Debian12);
        assert!(instance.boot_disk_auto_delete);
    }

    #[test]
    fn test_image_without_images_prefix() {
        let parser = GeneratedConfigParser::new();
        let content = "initialize_params {\n  image = \"debian-11-bullseye-v123\"\n}\n";

        assert_eq!(
            parser.parse(content, "id").image_family,
            ImageFamily::Debian11
        );
    }

    #[test]
    fn test_unknown_image_keeps_default_family() {
        let parser = GeneratedConfigParser::new();
        let content = "initialize_params {\n  image = \"projects/ubuntu-os-cloud/global/images/ubuntu-2204\"\n}\n";

        assert_eq!(
            parser.parse(content, "id").image_family,
            ImageFamily::Debian12
        );
    }

    #[test]
    fn test_empty_tags_and_metadata() {
        let parser = GeneratedConfigParser::new();
        let content = "  metadata = {}\n  tags = []\n";

        let instance = parser.parse(content, "id");
        assert!(instance.metadata.is_empty());
        assert!(instance.tags.is_empty());
    }

    #[test]
    fn test_service_account_without_scopes() {
        let parser = GeneratedConfigParser::new();
        let content = "  service_account {\n    email = \"sa@p.iam.gserviceaccount.com\"\n  }\n";

        let instance = parser.parse(content, "id");
        assert_eq!(
            instance.service_account_email.as_deref(),
            Some("sa@p.iam.gserviceaccount.com")
        );
        assert!(instance.service_account_scopes.is_empty());
    }

    #[test]
    fn test_block_body_handles_nesting_and_strings() {
        let header = Regex::new(r"outer\s*\{").unwrap();

        assert_eq!(
            block_body(&header, r#"outer { a { b } c = "}" } tail"#),
            Some(r#" a { b } c = "}" "#)
        );
        assert_eq!(block_body(&header, "outer { never closed"), None);
        assert_eq!(block_body(&header, "no block here"), None);
    }
}
