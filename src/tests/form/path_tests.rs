use crate::{
    domain::Preset,
    form::{DoseField, FieldPath},
};

#[test]
fn parses_dotted_paths() {
    let template = Preset::AnimalTreatment.template();
    assert_eq!(
        FieldPath::parse("tagId", &template).unwrap(),
        FieldPath::Field("tagId".into())
    );
    assert_eq!(
        FieldPath::parse("treatments[2].numberOfDoses", &template).unwrap(),
        FieldPath::EntryField {
            entry: 2,
            field: "numberOfDoses".into()
        }
    );
    assert_eq!(
        FieldPath::parse("treatments[0].doses[3].taken", &template).unwrap(),
        FieldPath::DoseField {
            entry: 0,
            dose: 3,
            field: DoseField::Taken
        }
    );
}

#[test]
fn parses_pointer_paths() {
    let template = Preset::AnimalTreatment.template();
    let path = FieldPath::parse("/treatments/1/doses/0/date", &template).unwrap();
    assert_eq!(
        path,
        FieldPath::DoseField {
            entry: 1,
            dose: 0,
            field: DoseField::Date
        }
    );
    assert_eq!(path.pointer(&template), "/treatments/1/doses/0/date");
}

#[test]
fn rejects_unknown_names() {
    let template = Preset::AnimalTreatment.template();
    for raw in [
        "colour",
        "treatments",
        "feeds[0].feedId",
        "treatments[0].colour",
        "treatments[0].doses[0].colour",
        "treatments[0].shots[0].taken",
        "treatments[x].medicineId",
        "/treatments//medicineId",
        "treatments[0]",
        "/treatments/01/medicineId",
        "treatments[0].doses[00].taken",
    ] {
        assert!(
            FieldPath::parse(raw, &template).is_err(),
            "{raw} should be rejected"
        );
    }
}

#[test]
fn templates_without_schedule_have_no_doses() {
    let template = Preset::FodderComposition.template();
    assert!(FieldPath::parse("components[0].quantity", &template).is_ok());
    assert!(FieldPath::parse("components[0].doses[0].taken", &template).is_err());
}
