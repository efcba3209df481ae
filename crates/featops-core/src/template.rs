use crate::spec::Feature;

/// Default issue body. Overridable per project via `issues.template`.
pub const DEFAULT_ISSUE_BODY: &str = "\
## Summary
{description}

## Feature
- **ID**: {ID}
- **Name**: {name}
- **Type**: {type}
- **Priority**: {priority}

## Acceptance criteria
- [ ] Implementation complete
- [ ] Tests written
- [ ] Code review passed

---
*This issue was generated from the feature spec.*
";

/// Expand feature placeholders in a template string.
///
/// Supported: `{id}`, `{ID}` (uppercased), `{name}`, `{description}`,
/// `{type}`, `{priority}`. Unknown placeholders are left intact so custom
/// templates can carry literal braces.
pub fn expand(template: &str, feature: &Feature) -> String {
    template
        .replace("{id}", &feature.id)
        .replace("{ID}", &feature.id.to_uppercase())
        .replace("{name}", &feature.name)
        .replace("{description}", &feature.description)
        .replace("{type}", &feature.feature_type)
        .replace("{priority}", feature.priority.as_str())
}

/// Issue title for a feature: `[F1] Launch screen`.
pub fn issue_title(feature: &Feature) -> String {
    format!("[{}] {}", feature.id.to_uppercase(), feature.name)
}
