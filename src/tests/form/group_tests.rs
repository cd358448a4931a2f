use std::sync::Arc;

use serde_json::json;

use crate::{
    domain::Preset,
    form::{DoseField, GroupList},
};

fn treatment_list(len: usize) -> GroupList {
    let mut list = GroupList::new(Arc::new(Preset::AnimalTreatment.template()));
    for idx in 0..len {
        list.add_default();
        list.update_at(idx, "medicineId", &json!(format!("med-{idx}")))
            .unwrap();
        list.update_at(idx, "numberOfDoses", &json!(idx)).unwrap();
    }
    list
}

fn medicine_ids(list: &GroupList) -> Vec<String> {
    list.iter()
        .map(|entry| entry.field("medicineId").unwrap().as_str().unwrap().to_string())
        .collect()
}

#[test]
fn removing_an_entry_shifts_only_later_entries() {
    let mut list = treatment_list(5);
    let before = list.to_value();
    assert!(list.remove_at(2));
    assert_eq!(medicine_ids(&list), ["med-0", "med-1", "med-3", "med-4"]);

    let after = list.to_value();
    assert_eq!(after[0], before[0]);
    assert_eq!(after[1], before[1]);
    assert_eq!(after[2], before[3]);
    assert_eq!(after[3], before[4]);
}

#[test]
fn out_of_range_removal_is_ignored() {
    let mut list = treatment_list(2);
    assert!(!list.remove_at(2));
    assert!(!list.remove_at(usize::MAX));
    assert_eq!(list.len(), 2);
}

#[test]
fn add_appends_without_reordering() {
    let mut list = treatment_list(3);
    list.add_default();
    assert_eq!(list.len(), 4);
    assert_eq!(&medicine_ids(&list)[..3], ["med-0", "med-1", "med-2"]);
    assert!(list.get(3).unwrap().field("medicineId").unwrap().is_null());
}

#[test]
fn count_update_resizes_in_the_same_call() {
    let mut list = treatment_list(1);
    assert!(list.update_at(0, "numberOfDoses", &json!("3")).unwrap());
    let value = list.to_value();
    assert_eq!(value[0]["numberOfDoses"], json!(3));
    assert_eq!(value[0]["doses"].as_array().unwrap().len(), 3);
}

#[test]
fn updating_one_entry_leaves_siblings_alone() {
    let mut list = treatment_list(3);
    let before = list.to_value();
    list.update_at(1, "dosage", &json!("2.5")).unwrap();
    let after = list.to_value();
    assert_eq!(after[0], before[0]);
    assert_eq!(after[2], before[2]);
    assert_eq!(after[1]["dosage"], json!(2.5));
}

#[test]
fn out_of_range_updates_are_ignored() {
    let mut list = treatment_list(1);
    assert!(!list.update_at(4, "medicineId", &json!("x")).unwrap());
    assert!(
        !list
            .update_dose_at(0, 7, DoseField::Taken, &json!(true))
            .unwrap()
    );
    assert!(
        !list
            .update_dose_at(3, 0, DoseField::Taken, &json!(true))
            .unwrap()
    );
}

#[test]
fn coercion_errors_carry_the_pointer() {
    let mut list = treatment_list(2);
    let err = list.update_at(1, "dosage", &json!("lots")).unwrap_err();
    assert_eq!(err.pointer, "/treatments/1/dosage");
    list.update_at(1, "numberOfDoses", &json!(1)).unwrap();
    let err = list
        .update_dose_at(1, 0, DoseField::Date, &json!("yesterday"))
        .unwrap_err();
    assert_eq!(err.pointer, "/treatments/1/doses/0/date");
}

#[test]
fn count_matches_length_after_mixed_edits() {
    let mut list = treatment_list(3);
    list.update_at(0, "numberOfDoses", &json!(4)).unwrap();
    list.add_default();
    list.update_at(3, "numberOfDoses", &json!("two")).unwrap();
    list.remove_at(1);
    list.update_at(1, "numberOfDoses", &json!(-3)).unwrap();
    list.update_at(0, "numberOfDoses", &json!(1)).unwrap();

    for entry in list.to_value().as_array().unwrap() {
        let count = entry["numberOfDoses"].as_u64().unwrap() as usize;
        assert_eq!(entry["doses"].as_array().unwrap().len(), count);
    }
    let counts: Vec<usize> = list.iter().map(|entry| entry.dose_count()).collect();
    assert_eq!(counts, [1, 0, 0]);
}
