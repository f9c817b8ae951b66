//! Issue-creation payloads.

use crate::adf;
use crate::config::{CustomFieldIds, TrackerConfig};
use docstory_core::StoryRecord;
use serde_json::{json, Map, Value};

fn usable_id<'a>(id: Option<&'a str>, config: &TrackerConfig) -> Option<&'a str> {
    id.map(str::trim).filter(|id| !config.is_unset(id))
}

/// Builds the `POST /rest/api/3/issue` body for `story`.
///
/// Priority and components are only sent when enabled in `config`, since team-managed projects
/// reject them. Custom fields are only set when their id is usable and the story has a value.
pub fn issue_payload(
    story: &StoryRecord,
    custom_fields: &CustomFieldIds,
    config: &TrackerConfig,
) -> Value {
    let issuetype = story
        .issuetype_name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| config.fallback_issuetype());

    let mut fields = Map::new();
    fields.insert("project".into(), json!({ "key": story.project_key }));
    fields.insert("summary".into(), json!(story.summary.as_str()));
    fields.insert(
        "description".into(),
        adf::document(&story.description, &story.acceptance_criteria),
    );
    fields.insert("issuetype".into(), json!({ "name": issuetype }));
    fields.insert("labels".into(), json!(story.labels));

    if config.send_priority {
        if let Some(priority) = story.priority.as_deref().filter(|p| !p.is_empty()) {
            fields.insert("priority".into(), json!({ "name": priority }));
        }
    }

    if config.send_components {
        let components: Vec<Value> = story
            .components
            .iter()
            .filter(|name| !config.is_unset(name))
            .map(|name| json!({ "name": name }))
            .collect();
        if !components.is_empty() {
            fields.insert("components".into(), Value::Array(components));
        }
    }

    if let Some(account_id) = story.assignee_account_id.as_deref().filter(|a| !a.is_empty()) {
        fields.insert("assignee".into(), json!({ "accountId": account_id }));
    }

    if let (Some(id), Some(points)) = (
        usable_id(custom_fields.story_points.as_deref(), config),
        story.story_points,
    ) {
        fields.insert(id.to_owned(), json!(points));
    }

    if let (Some(id), Some(epic)) = (
        usable_id(custom_fields.epic_link.as_deref(), config),
        story.epic_link.as_deref().filter(|e| !e.is_empty()),
    ) {
        fields.insert(id.to_owned(), json!(epic));
    }

    if issuetype.eq_ignore_ascii_case("epic") {
        if let Some(id) = usable_id(custom_fields.epic_name.as_deref(), config) {
            let name = story
                .epic_name
                .as_deref()
                .filter(|n| !n.is_empty())
                .unwrap_or(story.summary.as_str());
            fields.insert(id.to_owned(), json!(name));
        }
    }

    json!({ "fields": fields })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::tests::config;
    use docstory_core::{parse_story, ParseOptions};

    fn story() -> StoryRecord {
        let raw = "Title: Export CSV\nPriority: P1\nComponents: Reports, string\nStory Points: 3\nEpic: ACME-7\nAs a user I want CSV\nAC:\nGiven a report\nThen a file downloads";
        parse_story(raw, "ACME", &[], &[], &ParseOptions::default()).story
    }

    fn ids(points: &str, epic: &str, epic_name: &str) -> CustomFieldIds {
        CustomFieldIds {
            story_points: Some(points.into()),
            epic_link: Some(epic.into()),
            epic_name: Some(epic_name.into()),
        }
    }

    #[test]
    fn test_base_fields() {
        let payload = issue_payload(&story(), &CustomFieldIds::default(), &config());
        let fields = &payload["fields"];
        assert_eq!(fields["project"]["key"], "ACME");
        assert_eq!(fields["summary"], "Export CSV");
        assert_eq!(fields["issuetype"]["name"], "Story");
        assert_eq!(fields["description"]["type"], "doc");
        assert!(fields["labels"].is_array());
        assert!(fields.get("priority").is_none());
        assert!(fields.get("components").is_none());
        assert!(fields.get("assignee").is_none());
    }

    #[test]
    fn test_priority_and_components_when_enabled() {
        let mut config = config();
        config.send_priority = true;
        config.send_components = true;
        let payload = issue_payload(&story(), &CustomFieldIds::default(), &config);
        assert_eq!(payload["fields"]["priority"], json!({ "name": "High" }));
        assert_eq!(payload["fields"]["components"], json!([{ "name": "Reports" }]));
    }

    #[test]
    fn test_custom_fields_when_ids_usable() {
        let payload = issue_payload(
            &story(),
            &ids("customfield_10016", "customfield_10014", "customfield_10011"),
            &config(),
        );
        let fields = &payload["fields"];
        assert_eq!(fields["customfield_10016"], json!(3.0));
        assert_eq!(fields["customfield_10014"], "ACME-7");
        // Epic name only applies to epics.
        assert!(fields.get("customfield_10011").is_none());
    }

    #[test]
    fn test_placeholder_ids_ignored() {
        let payload = issue_payload(&story(), &ids("string", " ", "String"), &config());
        let fields = payload["fields"].as_object().unwrap();
        assert!(fields.keys().all(|key| !key.starts_with("customfield_")));
        assert!(!fields.contains_key("string"));
        assert!(!fields.contains_key(""));
    }

    #[test]
    fn test_epic_name_defaults_to_summary() {
        let epic = story().with_issue_type("EPIC");
        let payload = issue_payload(&epic, &ids("", "", "customfield_10011"), &config());
        assert_eq!(payload["fields"]["issuetype"]["name"], "EPIC");
        assert_eq!(payload["fields"]["customfield_10011"], "Export CSV");

        let named = story().with_issue_type("Epic").with_epic_name("Reporting");
        let payload = issue_payload(&named, &ids("", "", "customfield_10011"), &config());
        assert_eq!(payload["fields"]["customfield_10011"], "Reporting");
    }

    #[test]
    fn test_assignee_when_set() {
        let mut story = story();
        story.assignee_account_id = Some("5b10a2844c20165700ede21g".into());
        let payload = issue_payload(&story, &CustomFieldIds::default(), &config());
        assert_eq!(
            payload["fields"]["assignee"],
            json!({ "accountId": "5b10a2844c20165700ede21g" })
        );
    }
}
