use serde_json::json;

use crate::domain::{FieldKind, Preset, TemplateError, check_template, parse_form_template};

#[test]
fn every_preset_is_well_formed() {
    for preset in Preset::ALL {
        let template = preset.template();
        check_template(&template).unwrap_or_else(|err| panic!("{}: {err}", preset.name()));
        assert_eq!(Preset::from_name(preset.name()), Some(preset));
    }
}

#[test]
fn only_treatment_screens_schedule_doses() {
    let scheduled: Vec<&str> = Preset::ALL
        .into_iter()
        .filter(|preset| preset.template().entry.schedule.is_some())
        .map(Preset::name)
        .collect();
    assert_eq!(scheduled, ["facility-treatment", "animal-treatment"]);
}

#[test]
fn preset_round_trips_through_json() {
    let template = Preset::FodderComposition.template();
    let value = serde_json::to_value(&template).unwrap();
    assert_eq!(
        value["entry"]["fields"][2]["kind"],
        json!({"type": "enum", "options": ["kg", "g", "l"]})
    );
    assert_eq!(parse_form_template(&value).unwrap(), template);
}

#[test]
fn rejects_duplicate_and_invalid_names() {
    let duplicate = json!({
        "name": "dup",
        "fields": [
            {"name": "tagId", "kind": {"type": "text"}},
            {"name": "tagId", "kind": {"type": "date"}}
        ],
        "entriesField": "treatments",
        "entry": {}
    });
    assert!(matches!(
        parse_form_template(&duplicate),
        Err(TemplateError::Duplicate { .. })
    ));

    let invalid = json!({
        "name": "bad",
        "entriesField": "treat ments",
        "entry": {}
    });
    assert!(matches!(
        parse_form_template(&invalid),
        Err(TemplateError::InvalidName { .. })
    ));

    let shadowed = json!({
        "name": "shadow",
        "fields": [{"name": "treatments", "kind": {"type": "text"}}],
        "entriesField": "treatments",
        "entry": {}
    });
    assert!(parse_form_template(&shadowed).is_err());
}

#[test]
fn default_count_sizes_new_entries() {
    let mut template = Preset::AnimalTreatment.template();
    if let Some(schedule) = template.entry.schedule.as_mut() {
        schedule.default_count = 2;
    }
    let session = crate::form::FormSession::new(template).unwrap();
    assert_eq!(session.entries().get(0).unwrap().dose_count(), 2);
    assert_eq!(
        session.template().entry.field("route").unwrap().kind,
        FieldKind::Enum(vec!["oral".into(), "injection".into(), "topical".into()])
    );
}

#[test]
fn default_count_is_bounded() {
    let mut template = Preset::FacilityTreatment.template();
    if let Some(schedule) = template.entry.schedule.as_mut() {
        schedule.default_count = usize::MAX;
    }
    assert!(matches!(
        check_template(&template),
        Err(TemplateError::CountLimit { .. })
    ));
}
