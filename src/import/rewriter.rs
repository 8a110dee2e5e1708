/// Import block binding the resource to the placeholder address
///
/// The planner reads every `*.tf` file in the workspace, so this block
/// replaces the user's import (which points at a module path that may not
/// exist yet) for the duration of the run.
pub fn render_temp_import(resource_id: &str, placeholder_address: &str) -> String {
    format!(
        "\nimport {{\n  id = \"{}\"\n  to = {}\n}}\n",
        resource_id, placeholder_address
    )
}
