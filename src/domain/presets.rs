use serde_json::json;

use super::schema::{DoseSchedule, EntryTemplate, FieldKind, FieldSpec, FormTemplate};

/// Built-in templates for the farm entry screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    FacilityTreatment,
    AnimalTreatment,
    FodderComposition,
    FeedByLocation,
    SupplierLinkage,
}

impl Preset {
    pub const ALL: [Preset; 5] = [
        Preset::FacilityTreatment,
        Preset::AnimalTreatment,
        Preset::FodderComposition,
        Preset::FeedByLocation,
        Preset::SupplierLinkage,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Preset::FacilityTreatment => "facility-treatment",
            Preset::AnimalTreatment => "animal-treatment",
            Preset::FodderComposition => "fodder-composition",
            Preset::FeedByLocation => "feed-by-location",
            Preset::SupplierLinkage => "supplier-linkage",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|preset| preset.name() == name)
    }

    pub fn template(self) -> FormTemplate {
        match self {
            Preset::FacilityTreatment => FormTemplate {
                name: self.name().to_string(),
                title: Some("Facility treatment".to_string()),
                fields: vec![
                    FieldSpec::new("facilityId", FieldKind::Text),
                    FieldSpec::new("treatedOn", FieldKind::Date),
                ],
                entries_field: "treatments".to_string(),
                entry: treatment_entry(),
                require_entry: true,
            },
            Preset::AnimalTreatment => FormTemplate {
                name: self.name().to_string(),
                title: Some("Animal treatment".to_string()),
                fields: vec![
                    FieldSpec::new("tagId", FieldKind::Text),
                    FieldSpec::new("treatedOn", FieldKind::Date),
                    FieldSpec::new("veterinarian", FieldKind::Text),
                ],
                entries_field: "treatments".to_string(),
                entry: treatment_entry(),
                require_entry: true,
            },
            Preset::FodderComposition => FormTemplate {
                name: self.name().to_string(),
                title: Some("Fodder composition".to_string()),
                fields: vec![FieldSpec::new("fodderName", FieldKind::Text)],
                entries_field: "components".to_string(),
                entry: EntryTemplate {
                    fields: vec![
                        FieldSpec::new("feedId", FieldKind::Text),
                        FieldSpec::new("quantity", FieldKind::Number),
                        FieldSpec::new(
                            "unit",
                            FieldKind::Enum(vec!["kg".into(), "g".into(), "l".into()]),
                        )
                        .with_default(json!("kg")),
                    ],
                    schedule: None,
                },
                require_entry: true,
            },
            Preset::FeedByLocation => FormTemplate {
                name: self.name().to_string(),
                title: Some("Feed by location".to_string()),
                fields: vec![
                    FieldSpec::new("locationId", FieldKind::Text),
                    FieldSpec::new("fedOn", FieldKind::Date),
                ],
                entries_field: "feeds".to_string(),
                entry: EntryTemplate {
                    fields: vec![
                        FieldSpec::new("feedId", FieldKind::Text),
                        FieldSpec::new("quantity", FieldKind::Number),
                    ],
                    schedule: None,
                },
                require_entry: true,
            },
            Preset::SupplierLinkage => FormTemplate {
                name: self.name().to_string(),
                title: Some("Supplier linkage".to_string()),
                fields: vec![FieldSpec::new("supplierId", FieldKind::Text)],
                entries_field: "products".to_string(),
                entry: EntryTemplate {
                    fields: vec![
                        FieldSpec::new("productId", FieldKind::Text),
                        FieldSpec::new("unitPrice", FieldKind::Number),
                        FieldSpec::new("preferred", FieldKind::Boolean)
                            .with_default(json!(false)),
                    ],
                    schedule: None,
                },
                require_entry: false,
            },
        }
    }
}

fn treatment_entry() -> EntryTemplate {
    EntryTemplate {
        fields: vec![
            FieldSpec::new("medicineId", FieldKind::Text),
            FieldSpec::new("dosage", FieldKind::Number),
            FieldSpec::new(
                "route",
                FieldKind::Enum(vec!["oral".into(), "injection".into(), "topical".into()]),
            ),
        ],
        schedule: Some(DoseSchedule::new("numberOfDoses")),
    }
}
