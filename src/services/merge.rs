//! Partial-update rules for events.
//!
//! An update body only touches the fields listed in [`MERGE_RULES`]. Each rule
//! names the field, the presence test an incoming value must pass, and how the
//! value is written onto the stored event. `id`, `startDateTime` and
//! `endDateTime` have no rule and are never changed by an update.

use crate::models::{Event, EventModel};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// Any non-null value is applied.
    Present,
    /// Non-null and not the empty string. Whitespace-only text still counts.
    PresentAndNonEmpty,
}

/// Values an update field can carry. Only text has a blank form.
pub trait MergeValue {
    fn is_blank(&self) -> bool;
}

impl MergeValue for str {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl MergeValue for i64 {
    fn is_blank(&self) -> bool {
        false
    }
}

impl Presence {
    pub fn admits<T: MergeValue + ?Sized>(self, value: Option<&T>) -> bool {
        match (self, value) {
            (_, None) => false,
            (Presence::Present, Some(_)) => true,
            (Presence::PresentAndNonEmpty, Some(value)) => !value.is_blank(),
        }
    }
}

pub struct MergeRule {
    pub field: &'static str,
    pub presence: Presence,
    apply: fn(&mut Event, &EventModel, Presence) -> bool,
}

impl MergeRule {
    /// Writes the incoming value if it passes the presence test. Returns
    /// whether the field was written.
    pub fn apply(&self, event: &mut Event, incoming: &EventModel) -> bool {
        (self.apply)(event, incoming, self.presence)
    }
}

pub const MERGE_RULES: &[MergeRule] = &[
    MergeRule {
        field: "name",
        presence: Presence::PresentAndNonEmpty,
        apply: apply_name,
    },
    MergeRule {
        field: "description",
        presence: Presence::PresentAndNonEmpty,
        apply: apply_description,
    },
    MergeRule {
        field: "venueId",
        presence: Presence::Present,
        apply: apply_venue_id,
    },
    MergeRule {
        field: "organizerId",
        presence: Presence::Present,
        apply: apply_organizer_id,
    },
];

fn apply_name(event: &mut Event, incoming: &EventModel, presence: Presence) -> bool {
    match incoming.name.as_deref() {
        Some(name) if presence.admits(Some(name)) => {
            event.name = name.to_string();
            true
        }
        _ => false,
    }
}

fn apply_description(event: &mut Event, incoming: &EventModel, presence: Presence) -> bool {
    match incoming.description.as_deref() {
        Some(description) if presence.admits(Some(description)) => {
            event.description = Some(description.to_string());
            true
        }
        _ => false,
    }
}

fn apply_venue_id(event: &mut Event, incoming: &EventModel, presence: Presence) -> bool {
    match incoming.venue_id {
        Some(venue_id) if presence.admits(Some(&venue_id)) => {
            event.venue_id = Some(venue_id);
            true
        }
        _ => false,
    }
}

fn apply_organizer_id(event: &mut Event, incoming: &EventModel, presence: Presence) -> bool {
    match incoming.organizer_id {
        Some(organizer_id) if presence.admits(Some(&organizer_id)) => {
            event.organizer_id = Some(organizer_id);
            true
        }
        _ => false,
    }
}

/// Applies every rule and returns the names of the fields that were written.
pub fn merge_into(event: &mut Event, incoming: &EventModel) -> Vec<&'static str> {
    MERGE_RULES
        .iter()
        .filter_map(|rule| rule.apply(event, incoming).then_some(rule.field))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn stored() -> Event {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        Event {
            id: 3,
            name: "Stored name".to_string(),
            description: Some("Stored text".to_string()),
            start_date_time: Some(at),
            end_date_time: Some(at),
            venue_id: Some(10),
            organizer_id: Some(20),
            created_at: at,
            updated_at: at,
        }
    }

    #[test]
    fn test_presence_rules() {
        assert!(!Presence::Present.admits::<str>(None));
        assert!(Presence::Present.admits(Some("")));
        assert!(!Presence::PresentAndNonEmpty.admits::<str>(None));
        assert!(!Presence::PresentAndNonEmpty.admits(Some("")));
        assert!(Presence::PresentAndNonEmpty.admits(Some("   ")));
        // Ids have no blank form
        assert!(Presence::PresentAndNonEmpty.admits(Some(&0_i64)));
        assert!(!Presence::Present.admits::<i64>(None));
    }

    #[test]
    fn test_every_rule_consults_its_presence() {
        let incoming = EventModel {
            name: Some(String::new()),
            description: Some(String::new()),
            venue_id: Some(0),
            organizer_id: Some(0),
            ..Default::default()
        };

        for rule in MERGE_RULES {
            let lenient = MergeRule {
                field: rule.field,
                presence: Presence::Present,
                apply: rule.apply,
            };
            let mut event = stored();
            assert!(
                lenient.apply(&mut event, &incoming),
                "{} should accept any present value",
                rule.field
            );
        }

        // Under the table's own presence, only the id rows accept these values
        let mut event = stored();
        assert_eq!(merge_into(&mut event, &incoming), vec!["venueId", "organizerId"]);
        assert_eq!(event.venue_id, Some(0));
        assert_eq!(event.organizer_id, Some(0));
    }

    #[test]
    fn test_empty_name_is_skipped_and_description_applied() {
        let mut event = stored();
        let incoming = EventModel {
            name: Some(String::new()),
            description: Some("New text".to_string()),
            ..Default::default()
        };

        let applied = merge_into(&mut event, &incoming);

        assert_eq!(applied, vec!["description"]);
        assert_eq!(event.name, "Stored name");
        assert_eq!(event.description.as_deref(), Some("New text"));
    }

    #[test]
    fn test_empty_body_changes_nothing() {
        let mut event = stored();
        let applied = merge_into(&mut event, &EventModel::default());

        assert!(applied.is_empty());
        assert_eq!(event, stored());
    }

    #[test]
    fn test_whitespace_name_is_applied() {
        let mut event = stored();
        let incoming = EventModel {
            name: Some("   ".to_string()),
            ..Default::default()
        };

        assert_eq!(merge_into(&mut event, &incoming), vec!["name"]);
        assert_eq!(event.name, "   ");
    }

    #[test]
    fn test_ids_applied_but_id_and_times_ignored() {
        let mut event = stored();
        let incoming = EventModel {
            id: Some(99),
            start_date_time: Some(Utc::now()),
            end_date_time: Some(Utc::now()),
            venue_id: Some(11),
            organizer_id: Some(21),
            ..Default::default()
        };

        let applied = merge_into(&mut event, &incoming);

        assert_eq!(applied, vec!["venueId", "organizerId"]);
        assert_eq!(event.id, 3);
        assert_eq!(event.venue_id, Some(11));
        assert_eq!(event.organizer_id, Some(21));
        assert_eq!(event.start_date_time, stored().start_date_time);
        assert_eq!(event.end_date_time, stored().end_date_time);
    }

    #[test]
    fn test_rule_table_covers_mutable_fields_only() {
        let fields: Vec<_> = MERGE_RULES.iter().map(|rule| rule.field).collect();
        assert_eq!(fields, vec!["name", "description", "venueId", "organizerId"]);
    }
}
