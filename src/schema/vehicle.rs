//! VehicleListing field declarations
//!
//! Every field is declared once. Revision differences are expressed as
//! spans on presence, the required flag, enum members and limits, and
//! resolved into a concrete `FieldDef` per revision.

use super::resolver::EntityKind;
use super::revision::{Revision, Span};
use super::types::{FieldDef, FieldType};

/// Collection vehicle listings are stored in
pub const COLLECTION: &str = "vehicles";

/// Limits that change between revisions
#[derive(Debug, Clone, Copy, PartialEq)]
enum Limit {
    MaxLength(usize),
    MaxItems(usize),
}

/// A field declaration with its per-revision overrides
#[derive(Debug, Clone)]
pub struct FieldSpec {
    field: FieldDef,
    present: Span,
    required: Span,
    members: Vec<(&'static str, Span)>,
    limits: Vec<(Span, Limit)>,
}

impl FieldSpec {
    fn new(field: FieldDef) -> Self {
        Self {
            field,
            present: Span::always(),
            required: Span::never(),
            members: Vec::new(),
            limits: Vec::new(),
        }
    }

    fn present(mut self, span: Span) -> Self {
        self.present = span;
        self
    }

    fn required(mut self, span: Span) -> Self {
        self.required = span;
        self
    }

    fn members(mut self, values: &[&'static str], span: Span) -> Self {
        self.members.extend(values.iter().map(|v| (*v, span)));
        self
    }

    fn limit(mut self, span: Span, limit: Limit) -> Self {
        self.limits.push((span, limit));
        self
    }

    /// Resolves the concrete definition, or `None` if the field does not
    /// exist under `revision`
    pub fn resolve(&self, revision: Revision) -> Option<FieldDef> {
        if !self.present.contains(revision) {
            return None;
        }

        let mut field = self.field.clone();
        field.required = self.required.contains(revision);

        if !self.members.is_empty() {
            let members: Vec<&str> = self
                .members
                .iter()
                .filter(|(_, span)| span.contains(revision))
                .map(|(value, _)| *value)
                .collect();
            field = field.one_of(&members);
        }

        for (span, limit) in &self.limits {
            if span.contains(revision) {
                match limit {
                    Limit::MaxLength(max) => field.max_length = Some(*max),
                    Limit::MaxItems(max) => field.max_items = Some(*max),
                }
            }
        }

        Some(field)
    }
}

const TYPES: &[&str] = &[
    "bicycle",
    "excavator",
    "loader",
    "bulldozer",
    "truck",
    "cement-mixer",
    "crane",
    "road-roller",
    "motorbike",
    "three-wheeler",
    "scooter",
    "car",
    "van",
    "suv",
    "cab",
    "lorry",
    "bus",
];
const LATER_TYPES: &[&str] = &["digger", "tractor", "other"];

const FUELS: &[&str] = &["none", "petrol", "diesel", "electric", "hybrid"];

const COLORS: &[&str] = &[
    "black", "white", "grey", "red", "blue", "green", "orange", "purple", "brown", "pink",
];
const LATER_COLORS: &[&str] = &["silver", "yellow", "other"];

const FEATURES: &[&str] = &[
    "centralLock",
    "sunroof",
    "powerShutters",
    "powerMirrors",
    "airConditioned",
    "spareWheels",
    "toolkit",
    "tinted",
    "navigator",
    "entertainment",
    "security",
    "racks",
    "seatBelts",
    "canopy",
];
const SEARCHABLE_FEATURES: usize = 5;

/// The VehicleListing declaration table in declaration order
pub fn field_specs() -> Vec<FieldSpec> {
    let v2 = Span::since(Revision::V2);
    let v3 = Span::since(Revision::V3);
    let to_v2 = Span::until(Revision::V2);
    let to_v3 = Span::until(Revision::V3);

    let mut specs = vec![
        FieldSpec::new(FieldDef::reference("location", EntityKind::Location)).required(to_v3),
        FieldSpec::new(FieldDef::reference("contact", EntityKind::Contact))
            .present(to_v2)
            .required(to_v2),
        FieldSpec::new(
            FieldDef::list("contacts", FieldType::Reference { kind: EntityKind::Contact })
                .max_items(10),
        )
        .present(v2)
        .required(to_v3),
        FieldSpec::new(FieldDef::string("type").searchable())
            .required(Span::always())
            .members(TYPES, Span::always())
            .members(LATER_TYPES, v2),
        FieldSpec::new(FieldDef::reference("make", EntityKind::VehicleMake).searchable())
            .required(Span::always()),
        FieldSpec::new(FieldDef::reference("model", EntityKind::VehicleModel).searchable())
            .required(Span::always()),
        FieldSpec::new(FieldDef::string("edition").max_length(100).searchable()).present(v2),
        FieldSpec::new(FieldDef::reference("country", EntityKind::Country).searchable())
            .present(v2),
        FieldSpec::new(
            FieldDef::date("manufacturedAt")
                .not_after_now()
                .searchable()
                .sortable(),
        )
        .required(Span::always()),
        FieldSpec::new(FieldDef::string("fuel").searchable())
            .required(Span::always())
            .members(FUELS, Span::always())
            .members(&["other"], v2),
        FieldSpec::new(FieldDef::string("transmission").searchable())
            .required(Span::always())
            .members(&["none"], to_v2)
            .members(&["manual", "automatic", "manumatic"], Span::always())
            .members(&["other"], v2),
        FieldSpec::new(FieldDef::integer("doors").min(0.0).max(50.0)).required(to_v2),
        FieldSpec::new(FieldDef::string("steering"))
            .required(to_v2)
            .members(&["left", "right"], Span::always()),
        FieldSpec::new(FieldDef::integer("seats").min(0.0).max(1000.0).searchable())
            .required(to_v2),
        FieldSpec::new(FieldDef::string("driveType").searchable())
            .required(to_v2)
            .members(&["front", "rear"], Span::always())
            .members(&["four"], v2)
            .members(&["all"], Span::always())
            .members(&["other"], v2),
        FieldSpec::new(FieldDef::number("mileage").min(0.0).searchable().sortable())
            .required(Span::always()),
        FieldSpec::new(FieldDef::string("condition").searchable())
            .required(Span::always())
            .members(&["brand-new", "unregistered", "used"], Span::always()),
        FieldSpec::new(FieldDef::number("engine").max(20000.0).searchable()).required(to_v2),
        FieldSpec::new(FieldDef::string("color").searchable())
            .required(Span::always())
            .members(COLORS, Span::always())
            .members(LATER_COLORS, v2),
        FieldSpec::new(FieldDef::string("description").searchable())
            .limit(to_v2, Limit::MaxLength(1000))
            .limit(v2, Limit::MaxLength(5000)),
        FieldSpec::new(FieldDef::list(
            "images",
            FieldType::Reference { kind: EntityKind::Binary },
        ))
        .present(to_v3)
        .limit(to_v3, Limit::MaxItems(5)),
        FieldSpec::new(FieldDef::list(
            "photos",
            FieldType::Reference { kind: EntityKind::Binary },
        ))
        .present(v3)
        .limit(v3, Limit::MaxItems(10)),
        FieldSpec::new(
            FieldDef::number("price")
                .min(0.0)
                .searchable()
                .sortable(),
        )
        .required(Span::always()),
        FieldSpec::new(FieldDef::string("currency"))
            .required(Span::always())
            .members(&["LKR"], Span::always()),
    ];

    for (i, feature) in FEATURES.iter().enumerate() {
        let mut field = FieldDef::boolean(feature);
        if i < SEARCHABLE_FEATURES {
            field = field.searchable();
        }
        specs.push(FieldSpec::new(field));
    }

    specs
}

/// Base (non-capability) fields of a revision in declaration order
pub fn vehicle_fields(revision: Revision) -> Vec<FieldDef> {
    field_specs()
        .iter()
        .filter_map(|spec| spec.resolve(revision))
        .collect()
}
