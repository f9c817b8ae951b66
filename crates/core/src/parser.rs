//! Story builder: one forward pass over the extracted text.
//!
//! Each line is trimmed and then handled in this order:
//!
//! 1. an acceptance-criteria header opens block mode;
//! 2. inside a block, non-blank lines are collected and a blank line closes the block;
//! 3. explicit field declarations ([`classify_field`]) are applied;
//! 4. anything else is a user-story line or a description line, and is also scanned for
//!    hashtags and inline points/priority mentions.
//!
//! All state lives in a [`StoryAccumulator`] owned by a single [`parse_story`] call.

use crate::acceptance::normalize_acceptance_criteria;
use crate::classify::{classify_field, FieldLine};
use crate::constants::{ACCEPTANCE_HEADING, DETAILS_HEADING, USER_STORY_HEADING};
use crate::options::ParseOptions;
use crate::patterns;
use crate::priority::map_priority;
use crate::story::{Diagnostics, ParsedStory, StoryRecord};
use crate::summary::Summary;
use crate::text::{clamp_text, split_lines};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Source {
    Field,
    Inline,
}

/// A value together with where it was found. Field declarations outrank inline mentions.
#[derive(Debug, Clone)]
struct Detected<T> {
    value: T,
    source: Source,
}

impl<T> Detected<T> {
    /// First field declaration wins and replaces an earlier inline mention.
    fn offer_field(slot: &mut Option<Self>, value: T) {
        if !matches!(slot, Some(d) if d.source == Source::Field) {
            *slot = Some(Self {
                value,
                source: Source::Field,
            });
        }
    }

    /// Inline mentions only fill an empty slot.
    fn offer_inline(slot: &mut Option<Self>, value: T) {
        if slot.is_none() {
            *slot = Some(Self {
                value,
                source: Source::Inline,
            });
        }
    }
}

#[derive(Debug, Default)]
struct StoryAccumulator {
    title: Option<String>,
    first_non_blank: Option<String>,
    labels: BTreeSet<String>,
    components: BTreeSet<String>,
    priority: Option<Detected<String>>,
    story_points: Option<Detected<f64>>,
    epic_link: Option<String>,
    user_story_lines: Vec<String>,
    description_lines: Vec<String>,
    acceptance_lines: Vec<String>,
    in_acceptance: bool,
}

impl StoryAccumulator {
    fn new(default_labels: &[String], default_components: &[String]) -> Self {
        let labels = default_labels
            .iter()
            .map(|label| label.trim().to_lowercase())
            .filter(|label| !label.is_empty())
            .collect();
        let components = default_components
            .iter()
            .map(|component| component.trim().to_owned())
            .filter(|component| !component.is_empty())
            .collect();

        Self {
            labels,
            components,
            ..Self::default()
        }
    }

    fn feed(&mut self, raw: &str, options: &ParseOptions) {
        let line = raw.trim();
        if self.first_non_blank.is_none() && !line.is_empty() {
            self.first_non_blank = Some(line.to_owned());
        }

        if patterns::is_acceptance_header(line) {
            self.in_acceptance = true;
            return;
        }

        if self.in_acceptance {
            if line.is_empty() {
                self.in_acceptance = false;
            } else {
                self.acceptance_lines.push(line.to_owned());
            }
            return;
        }

        if line.is_empty() {
            return;
        }

        if let Some(field) = classify_field(line, self.title.is_none()) {
            self.apply_field(field);
            return;
        }

        if patterns::is_user_story(line) {
            self.user_story_lines.push(line.to_owned());
        } else {
            self.description_lines.push(line.to_owned());
        }
        self.scan_inline(line, options);
    }

    fn apply_field(&mut self, field: FieldLine) {
        match field {
            // An empty title consumes the line but leaves title capture open.
            FieldLine::Title(title) if title.is_empty() => {}
            FieldLine::Title(title) => self.title = Some(title),
            FieldLine::Labels(labels) => self.labels.extend(labels),
            FieldLine::Components(components) => self.components.extend(components),
            FieldLine::Priority(token) => Detected::offer_field(&mut self.priority, token),
            FieldLine::StoryPoints(Some(points)) => {
                Detected::offer_field(&mut self.story_points, points)
            }
            FieldLine::StoryPoints(None) => {
                tracing::debug!("ignoring story points line with a malformed number");
            }
            FieldLine::EpicLink(epic) => {
                self.epic_link.get_or_insert(epic);
            }
        }
    }

    fn scan_inline(&mut self, line: &str, options: &ParseOptions) {
        if options.label_hashtags {
            self.labels.extend(patterns::hashtags(line));
        }
        if options.detect_points_from_text && self.story_points.is_none() {
            if let Some(points) = patterns::inline_story_points(line) {
                Detected::offer_inline(&mut self.story_points, points);
            }
        }
        if options.detect_priority_from_text && self.priority.is_none() {
            if let Some(token) = patterns::inline_priority(line) {
                Detected::offer_inline(&mut self.priority, token);
            }
        }
    }

    fn summary(&self) -> Summary {
        self.title
            .iter()
            .chain(self.user_story_lines.first())
            .chain(self.first_non_blank.iter())
            .find_map(|line| Summary::from_line(line))
            .unwrap_or_else(Summary::fallback)
    }

    fn description(&self, acceptance: &[String], max_chars: usize) -> String {
        let mut sections = Vec::new();
        if !self.user_story_lines.is_empty() {
            sections.push(format!(
                "{}\n{}",
                USER_STORY_HEADING,
                self.user_story_lines.join("\n")
            ));
        }
        if !self.description_lines.is_empty() {
            sections.push(format!(
                "{}\n{}",
                DETAILS_HEADING,
                self.description_lines.join("\n")
            ));
        }
        if !acceptance.is_empty() {
            let bullets: Vec<String> = acceptance.iter().map(|ac| format!("- {ac}")).collect();
            sections.push(format!("{}\n{}", ACCEPTANCE_HEADING, bullets.join("\n")));
        }

        clamp_text(sections.join("\n\n").trim(), max_chars)
    }

    fn finish(self, project_key: &str, options: &ParseOptions) -> ParsedStory {
        let acceptance_criteria = normalize_acceptance_criteria(&self.acceptance_lines);
        let summary = self.summary();
        let description = self.description(&acceptance_criteria, options.max_chars);

        let priority_token = self.priority.map(|d| d.value);
        let priority = map_priority(priority_token.as_deref(), &options.priority_map);
        let story_points = self.story_points.map(|d| d.value);
        let labels: Vec<String> = self.labels.into_iter().collect();

        let diagnostics = Diagnostics {
            found_user_story_lines: self.user_story_lines.len(),
            ac_count: acceptance_criteria.len(),
            labels_auto: labels.clone(),
            priority_token,
            story_points_detected: story_points,
        };

        let story = StoryRecord {
            project_key: project_key.to_owned(),
            summary,
            description,
            acceptance_criteria,
            labels,
            components: self.components.into_iter().collect(),
            story_points,
            priority,
            epic_link: self.epic_link,
            assignee_account_id: None,
            issuetype_name: None,
            epic_name: None,
        };

        ParsedStory { story, diagnostics }
    }
}

/// Parses extracted document text into a [`StoryRecord`] plus [`Diagnostics`].
///
/// This never fails: empty or unrecognisable text still yields a record with the fallback
/// summary. `default_labels` are lowercased and merged with declared labels and hashtags;
/// `default_components` are merged with declared components.
pub fn parse_story(
    raw: &str,
    project_key: &str,
    default_labels: &[String],
    default_components: &[String],
    options: &ParseOptions,
) -> ParsedStory {
    let mut acc = StoryAccumulator::new(default_labels, default_components);
    for line in split_lines(raw) {
        acc.feed(line, options);
    }

    let parsed = acc.finish(project_key, options);
    tracing::debug!(
        project_key,
        user_story_lines = parsed.diagnostics.found_user_story_lines,
        acceptance_criteria = parsed.diagnostics.ac_count,
        labels = parsed.story.labels.len(),
        "parsed story"
    );
    parsed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{FALLBACK_SUMMARY, SUMMARY_MAX_CHARS, TRUNCATION_MARKER};

    fn parse(raw: &str) -> ParsedStory {
        parse_story(raw, "PROJ", &[], &[], &ParseOptions::default())
    }

    const LOGIN_DOC: &str = "Title: Add login throttling
As a user
I want failed logins to be rate-limited
Labels: security, backend
Priority: p1
Acceptance Criteria:
given 5 failed attempts
then account is locked for 15 minutes

Points: 3
";

    #[test]
    fn test_end_to_end_login_throttling() {
        let ParsedStory { story, diagnostics } = parse(LOGIN_DOC);

        assert_eq!(story.project_key, "PROJ");
        assert_eq!(story.summary.as_str(), "Add login throttling");
        assert_eq!(story.labels, vec!["backend", "security"]);
        assert_eq!(story.priority.as_deref(), Some("High"));
        assert_eq!(story.story_points, Some(3.0));
        assert_eq!(
            story.acceptance_criteria,
            vec!["Given: 5 failed attempts Then: account is locked for 15 minutes"]
        );
        assert_eq!(story.epic_link, None);
        assert_eq!(story.assignee_account_id, None);

        assert_eq!(
            story.description,
            "### User Story\nAs a user\n\n\
             ### Details / Context\nI want failed logins to be rate-limited\n\n\
             ### Acceptance Criteria\n- Given: 5 failed attempts Then: account is locked for 15 minutes"
        );

        assert_eq!(diagnostics.found_user_story_lines, 1);
        assert_eq!(diagnostics.ac_count, 1);
        assert_eq!(diagnostics.priority_token.as_deref(), Some("p1"));
        assert_eq!(diagnostics.story_points_detected, Some(3.0));
        assert_eq!(diagnostics.labels_auto, vec!["backend", "security"]);
    }

    #[test]
    fn test_blank_text_yields_placeholder() {
        for raw in ["", "   \n\t\n  "] {
            let story = parse(raw).story;
            assert_eq!(story.summary.as_str(), FALLBACK_SUMMARY);
            assert_eq!(story.description, "");
            assert!(story.acceptance_criteria.is_empty());
            assert_eq!(story.priority, None);
            assert_eq!(story.story_points, None);
        }
    }

    #[test]
    fn test_summary_falls_back_to_user_story_line() {
        let story = parse("Some intro\nAs an admin   I want\taudit logs").story;
        assert_eq!(story.summary.as_str(), "As an admin I want audit logs");
    }

    #[test]
    fn test_summary_falls_back_to_first_non_blank_line() {
        let long = "w".repeat(400);
        let story = parse(&format!("\n\n   Quarterly   report {long}\nmore")).story;
        assert!(story.summary.as_str().starts_with("Quarterly report w"));
        assert_eq!(story.summary.as_str().chars().count(), SUMMARY_MAX_CHARS);
    }

    #[test]
    fn test_first_non_blank_line_may_be_a_field_line() {
        let story = parse("Labels: a\nPriority: low").story;
        assert_eq!(story.summary.as_str(), "Labels: a");
    }

    #[test]
    fn test_second_title_line_becomes_description() {
        let story = parse("Title: One\nSummary: Two").story;
        assert_eq!(story.summary.as_str(), "One");
        assert_eq!(story.description, "### Details / Context\nSummary: Two");
    }

    #[test]
    fn test_explicit_priority_beats_earlier_inline_mention() {
        let parsed = parse("This is a critical outage\nPriority: low");
        assert_eq!(parsed.story.priority.as_deref(), Some("Low"));
        assert_eq!(parsed.diagnostics.priority_token.as_deref(), Some("low"));
    }

    #[test]
    fn test_explicit_priority_not_overwritten() {
        let story = parse("Priority: p0\nPriority: p3\nlow effort really").story;
        assert_eq!(story.priority.as_deref(), Some("Highest"));
    }

    #[test]
    fn test_explicit_points_beat_inline_and_first_wins() {
        let story = parse("Roughly 8 points of work\nSP: 5\nStory Points: 13").story;
        assert_eq!(story.story_points, Some(5.0));
    }

    #[test]
    fn test_inline_points_first_mention_wins() {
        let story = parse("maybe 2 points\nor 3 story points").story;
        assert_eq!(story.story_points, Some(2.0));
    }

    #[test]
    fn test_malformed_points_leave_field_unset() {
        let parsed = parse("Points: 1.2.3");
        assert_eq!(parsed.story.story_points, None);
        assert_eq!(parsed.diagnostics.story_points_detected, None);
        // The malformed line is consumed as a field, not kept as prose.
        assert_eq!(parsed.story.description, "");
    }

    #[test]
    fn test_inline_detection_can_be_disabled() {
        let options = ParseOptions {
            label_hashtags: false,
            detect_points_from_text: false,
            detect_priority_from_text: false,
            ..ParseOptions::default()
        };
        let parsed = parse_story("Urgent #infra work, high impact, 5 points", "P", &[], &[], &options);
        assert!(parsed.story.labels.is_empty());
        assert_eq!(parsed.story.story_points, None);
        assert_eq!(parsed.story.priority, None);
    }

    #[test]
    fn test_inline_scan_runs_on_user_story_lines() {
        let story = parse("As a dev I want #ci checks, 3 points, p2").story;
        assert_eq!(story.labels, vec!["ci"]);
        assert_eq!(story.story_points, Some(3.0));
        assert_eq!(story.priority.as_deref(), Some("Medium"));
    }

    #[test]
    fn test_labels_union_is_sorted_and_deduplicated() {
        let defaults = vec!["Zeta".to_string(), "alpha".to_string(), " ".to_string()];
        let raw = "Labels: beta, ALPHA\n#zeta and #gamma";
        let first = parse_story(raw, "P", &defaults, &[], &ParseOptions::default());
        let second = parse_story(raw, "P", &defaults, &[], &ParseOptions::default());
        assert_eq!(first.story.labels, vec!["alpha", "beta", "gamma", "zeta"]);
        assert_eq!(first.story.labels, second.story.labels);
    }

    #[test]
    fn test_components_union_keeps_case() {
        let defaults = vec!["Web".to_string()];
        let story = parse_story(
            "Components: API, Web, Mobile",
            "P",
            &[],
            &defaults,
            &ParseOptions::default(),
        )
        .story;
        assert_eq!(story.components, vec!["API", "Mobile", "Web"]);
    }

    #[test]
    fn test_epic_link_only_from_declaration() {
        let story = parse("Part of the epic ABC-9\nEpic Link: ABC-1\nEpic: ABC-2").story;
        assert_eq!(story.epic_link.as_deref(), Some("ABC-1"));
    }

    #[test]
    fn test_acceptance_header_with_value_is_not_a_block() {
        let story = parse("AC: see below\ngiven nothing happens").story;
        assert!(story.acceptance_criteria.is_empty());
        assert!(story.description.contains("AC: see below"));
    }

    #[test]
    fn test_separate_blocks_join_into_one_criterion() {
        let raw = "Acceptance Criteria:\ngiven a user is logged in\n\nContext line\nAC:\nShows a banner\n\nCriteria:\nshows a BANNER\n";
        let story = parse(raw).story;
        assert_eq!(
            story.acceptance_criteria,
            vec!["Given: a user is logged in Shows a banner shows a BANNER"]
        );
        assert_eq!(story.description.matches("Context line").count(), 1);
    }

    #[test]
    fn test_block_boundaries_do_not_split_criteria() {
        let after_blank = parse("AC:\nfoo works\n\nAC:\nbar works").story;
        assert_eq!(after_blank.acceptance_criteria, vec!["foo works bar works"]);

        let repeated_header = parse("AC:\nfoo works\nCriteria:\nbar works").story;
        assert_eq!(repeated_header.acceptance_criteria, vec!["foo works bar works"]);
    }

    #[test]
    fn test_field_lines_inside_block_are_criteria_text() {
        let parsed = parse("Title: Deploy\nAC:\nPriority: high\n#infra must deploy\nLabels: ops");
        let story = parsed.story;
        assert_eq!(
            story.acceptance_criteria,
            vec!["Priority: high #infra must deploy Labels: ops"]
        );
        assert_eq!(story.priority, None);
        assert_eq!(parsed.diagnostics.priority_token, None);
        assert!(story.labels.is_empty());
    }

    #[test]
    fn test_empty_title_line_is_dropped_and_capture_stays_open() {
        let story = parse("Title:   \nReal heading\nTitle: Later").story;
        assert_eq!(story.summary.as_str(), "Later");
        assert_eq!(story.description, "### Details / Context\nReal heading");
    }

    #[test]
    fn test_acceptance_block_runs_to_end_of_text() {
        let story = parse("Criteria:\nwhen saved\nthen persisted").story;
        assert_eq!(
            story.acceptance_criteria,
            vec!["When: saved Then: persisted"]
        );
    }

    #[test]
    fn test_description_is_clamped() {
        let options = ParseOptions::default().with_max_chars(20);
        let story = parse_story("A long line of context text", "P", &[], &[], &options).story;
        assert_eq!(
            story.description,
            format!("### Details / Contex{}", TRUNCATION_MARKER)
        );
    }

    #[test]
    fn test_priority_overrides_apply() {
        let mut options = ParseOptions::default();
        options
            .priority_map
            .insert("p1".to_string(), "Critical".to_string());
        let story = parse_story("Priority: P1", "P", &[], &[], &options).story;
        assert_eq!(story.priority.as_deref(), Some("Critical"));
    }

    #[test]
    fn test_caller_sets_issue_type_afterwards() {
        let story = parse("Title: Epic work")
            .story
            .with_issue_type("Epic")
            .with_epic_name("Platform");
        assert_eq!(story.issuetype_name.as_deref(), Some("Epic"));
        assert_eq!(story.epic_name.as_deref(), Some("Platform"));
    }

    #[test]
    fn test_record_serializes_with_flat_summary() {
        let story = parse(LOGIN_DOC).story;
        let json = serde_json::to_value(&story).unwrap();
        assert_eq!(json["summary"], "Add login throttling");
        assert_eq!(json["story_points"], 3.0);
        assert!(json["assignee_account_id"].is_null());

        let yaml = serde_yaml::to_string(&story).unwrap();
        let back: StoryRecord = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(back, story);
    }
}
