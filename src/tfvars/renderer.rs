//! Renders an extracted instance as a `compute.auto.tfvars` map entry

use super::types::InstanceConfig;
use crate::config::ImporterConfig;

/// Renderer for one tfvars map entry
pub struct TfvarsRenderer<'a> {
    config: &'a ImporterConfig,
}

impl<'a> TfvarsRenderer<'a> {
    pub fn new(config: &'a ImporterConfig) -> Self {
        Self { config }
    }

    /// Render the entry keyed by the instance name
    pub fn render(&self, instance: &InstanceConfig) -> String {
        let network = &self.config.network;
        let mut output = String::new();

        output.push_str(&format!("  \"{}\" = {{\n", instance.name));
        output.push_str(&format!("    instance_name         = \"{}\"\n", instance.name));
        output.push_str(&format!("    network_project       = \"{}\"\n", network.project));
        output.push_str(&format!("    network_key           = \"{}\"\n", network.key));
        output.push_str(&format!(
            "    subnet_name           = \"{}{}\"\n",
            network.subnet_prefix,
            instance.region()
        ));
        output.push_str(&format!("    zone                  = \"{}\"\n", instance.zone));
        output.push_str(&format!(
            "    machine_type          = \"{}\"\n",
            instance.machine_type
        ));
        output.push_str(&format!("    disk_size_gb          = {}\n", instance.disk_size_gb));
        output.push_str(&format!("    disk_type             = \"{}\"\n", instance.disk_type));
        output.push_str(&format!(
            "    image_family          = \"{}\"\n",
            instance.image_family
        ));
        output.push_str(&format!(
            "    image_project         = \"{}\"\n",
            self.config.image_project
        ));
        output.push_str("    additional_disks      = []\n");
        output.push_str("    enable_snapshots      = false\n");
        output.push_str("    deletion_protection   = false\n");
        output.push_str(&format!(
            "    custom_tags           = {}\n",
            self.render_custom_tags(instance)
        ));
        output.push_str("    enable_external_ip    = false\n");
        output.push_str(&format!(
            "    boot_disk_auto_delete = {}\n",
            instance.boot_disk_auto_delete
        ));
        output.push_str(&format!(
            "    key_revocation_action_type = \"{}\"\n",
            instance.key_revocation_action_type
        ));

        output.push_str(&self.render_metadata(instance));
        if let Some(email) = &instance.service_account_email {
            output.push_str(&format!("    service_account_email = \"{}\"\n", email));
        }
        output.push_str(&self.render_scopes(instance));

        output.push_str("  }");
        output
    }

    /// Follow-up steps printed after the entry
    pub fn instructions(&self) -> String {
        format!(
            "Action:\n1. Copy block to {}\n2. Run {binary} plan to verify\n3. Run {binary} apply",
            self.config.tfvars_file,
            binary = self.config.binary
        )
    }

    fn render_custom_tags(&self, instance: &InstanceConfig) -> String {
        let tags = instance.custom_tags(&self.config.excluded_tags);

        if tags.is_empty() {
            return "[]".to_string();
        }

        let quoted: Vec<String> = tags.iter().map(|t| format!("\"{}\"", t)).collect();
        format!("[{}]", quoted.join(", "))
    }

    fn render_metadata(&self, instance: &InstanceConfig) -> String {
        if instance.metadata.is_empty() {
            return String::new();
        }

        let mut output = String::from("    metadata = {\n");
        for (key, value) in &instance.metadata {
            output.push_str(&format!("      \"{}\" = \"{}\"\n", key, value));
        }
        output.push_str("    }\n");
        output
    }

    fn render_scopes(&self, instance: &InstanceConfig) -> String {
        if instance.service_account_scopes.is_empty() {
            return String::new();
        }

        let scopes: Vec<String> = instance
            .service_account_scopes
            .iter()
            .map(|s| format!("      \"{}\"", s))
            .collect();

        format!("    service_account_scopes = [\n{}\n    ]\n", scopes.join(",\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tfvars::types::ImageFamily;

    fn instance() -> InstanceConfig {
        let mut instance = InstanceConfig::new("projects/p/zones/us-central1-a/instances/vm-1");
        instance.name = "vm-1".to_string();
        instance.zone = "us-central1-a".to_string();
        instance.machine_type = "e2-medium".to_string();
        instance
    }

    #[test]
    fn test_render_defaults_only() {
        let config = ImporterConfig::default();
        let rendered = TfvarsRenderer::new(&config).render(&InstanceConfig::new("id"));

        let expected = r#"  "" = {
    instance_name         = ""
    network_project       = "tws-lz-host-networking"
    network_key           = "tws-dev-shared-vpc"
    subnet_name           = "tws-dev-subnet-"
    zone                  = ""
    machine_type          = ""
    disk_size_gb          = 10
    disk_type             = "pd-balanced"
    image_family          = "debian-12"
    image_project         = "debian-cloud"
    additional_disks      = []
    enable_snapshots      = false
    deletion_protection   = false
    custom_tags           = []
    enable_external_ip    = false
    boot_disk_auto_delete = true
    key_revocation_action_type = "NONE"
  }"#;

        assert_eq!(rendered, expected);
    }

    #[test]
    fn test_render_subnet_from_zone() {
        let config = ImporterConfig::default();
        let rendered = TfvarsRenderer::new(&config).render(&instance());

        assert!(rendered.starts_with("  \"vm-1\" = {\n"));
        assert!(rendered.contains("subnet_name           = \"tws-dev-subnet-us-central1\"\n"));
        assert!(rendered.contains("zone                  = \"us-central1-a\"\n"));
    }

    #[test]
    fn test_render_custom_tags() {
        let config = ImporterConfig::default();
        let mut instance = instance();
        instance.tags = vec!["ssh".into(), "custom-tag".into(), "prod".into()];

        let rendered = TfvarsRenderer::new(&config).render(&instance);
        assert!(rendered.contains("custom_tags           = [\"custom-tag\"]\n"));

        instance.tags = vec!["web".into(), "dev".into(), "db".into()];
        let rendered = TfvarsRenderer::new(&config).render(&instance);
        assert!(rendered.contains("custom_tags           = [\"web\", \"db\"]\n"));

        instance.tags = vec!["ssh".into(), "staging".into()];
        let rendered = TfvarsRenderer::new(&config).render(&instance);
        assert!(rendered.contains("custom_tags           = []\n"));
    }

    #[test]
    fn test_render_optional_fragments_in_order() {
        let config = ImporterConfig::default();
        let mut instance = instance();
        instance.image_family = ImageFamily::Debian11;
        instance.metadata = vec![
            ("enable-oslogin".into(), "TRUE".into()),
            ("block-project-ssh-keys".into(), "true".into()),
        ];
        instance.service_account_email = Some("sa@p.iam.gserviceaccount.com".into());
        instance.service_account_scopes = vec![
            "https://www.googleapis.com/auth/cloud-platform".into(),
            "https://www.googleapis.com/auth/logging.write".into(),
        ];

        let rendered = TfvarsRenderer::new(&config).render(&instance);

        let tail = r#"    key_revocation_action_type = "NONE"
    metadata = {
      "enable-oslogin" = "TRUE"
      "block-project-ssh-keys" = "true"
    }
    service_account_email = "sa@p.iam.gserviceaccount.com"
    service_account_scopes = [
      "https://www.googleapis.com/auth/cloud-platform",
      "https://www.googleapis.com/auth/logging.write"
    ]
  }"#;

        assert!(rendered.ends_with(tail), "unexpected rendering:\n{}", rendered);
        assert!(rendered.contains("image_family          = \"debian-11\"\n"));
    }

    #[test]
    fn test_render_uses_configured_constants() {
        let mut config = ImporterConfig::default();
        config.network.project = "host-net".to_string();
        config.network.key = "prod-vpc".to_string();
        config.network.subnet_prefix = "prod-subnet-".to_string();
        config.image_project = "my-images".to_string();
        config.excluded_tags = vec!["custom-tag".to_string()];

        let mut instance = instance();
        instance.tags = vec!["ssh".into(), "custom-tag".into()];

        let rendered = TfvarsRenderer::new(&config).render(&instance);
        assert!(rendered.contains("network_project       = \"host-net\"\n"));
        assert!(rendered.contains("network_key           = \"prod-vpc\"\n"));
        assert!(rendered.contains("subnet_name           = \"prod-subnet-us-central1\"\n"));
        assert!(rendered.contains("image_project         = \"my-images\"\n"));
        assert!(rendered.contains("custom_tags           = [\"ssh\"]\n"));
    }

    #[test]
    fn test_instructions() {
        let config = ImporterConfig::default();
        assert_eq!(
            TfvarsRenderer::new(&config).instructions(),
            "Action:\n1. Copy block to compute.auto.tfvars\n2. Run terraform plan to verify\n3. Run terraform apply"
        );
    }
}
