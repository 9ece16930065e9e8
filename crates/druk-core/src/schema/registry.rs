use super::{ColumnDescriptor, DisplayTransform, EntitySchema, FieldDescriptor, FieldKind};
use crate::{Error, Result};

use indexmap::IndexMap;

/// Single source of truth mapping entity-type names to their schemas.
///
/// Pure lookup, no side effects. Stores and the HTTP layer both consult the
/// same registry, so the set of manageable entities is declared exactly once.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    entities: IndexMap<String, EntitySchema>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, schema: EntitySchema) -> &mut Self {
        self.entities.insert(schema.entity.clone(), schema);
        self
    }

    pub fn contains(&self, entity: &str) -> bool {
        self.entities.contains_key(entity)
    }

    pub fn schema(&self, entity: &str) -> Result<&EntitySchema> {
        self.entities
            .get(entity)
            .ok_or_else(|| Error::UnknownEntityType(entity.to_string()))
    }

    pub fn columns(&self, entity: &str) -> Result<&[ColumnDescriptor]> {
        Ok(&self.schema(entity)?.columns)
    }

    pub fn entities(&self) -> impl Iterator<Item = &EntitySchema> {
        self.entities.values()
    }

    pub fn entity_names(&self) -> impl Iterator<Item = &str> {
        self.entities.keys().map(String::as_str)
    }

    /// All (entity, field) pairs whose field references `entity`. Used by
    /// store drivers to null out dangling references on delete.
    pub fn referencing(&self, entity: &str) -> Vec<(String, String)> {
        let mut refs = Vec::new();
        for schema in self.entities.values() {
            for field in &schema.fields {
                if field.references.as_deref() == Some(entity) {
                    refs.push((schema.entity.clone(), field.name.clone()));
                }
            }
        }
        refs
    }

    /// The travel-platform entity catalog: tours, hotels, festivals,
    /// flights, itineraries, and custom tour requests.
    pub fn builtin() -> Self {
        let mut registry = Self::new();

        registry.register(
            EntitySchema::new("tours", "Tour")
                .field(FieldDescriptor::new("name", "Name", FieldKind::Text).required())
                .field(FieldDescriptor::new(
                    "description",
                    "Description",
                    FieldKind::LongText,
                ))
                .field(FieldDescriptor::new("price", "Price (USD)", FieldKind::Number).required())
                .field(FieldDescriptor::new(
                    "duration",
                    "Duration (days)",
                    FieldKind::Number,
                ))
                .field(FieldDescriptor::new(
                    "category",
                    "Category",
                    FieldKind::select(["cultural", "trekking", "festival", "luxury", "adventure"]),
                ))
                .field(FieldDescriptor::new("imageUrl", "Image URL", FieldKind::Text))
                .column(ColumnDescriptor::new("name", "Name"))
                .column(
                    ColumnDescriptor::new("price", "Price").transform(DisplayTransform::Currency),
                )
                .column(ColumnDescriptor::new("duration", "Days"))
                .column(ColumnDescriptor::new("category", "Category")),
        );

        registry.register(
            EntitySchema::new("hotels", "Hotel")
                .field(FieldDescriptor::new("name", "Name", FieldKind::Text).required())
                .field(FieldDescriptor::new("location", "Location", FieldKind::Text).required())
                .field(FieldDescriptor::new(
                    "description",
                    "Description",
                    FieldKind::LongText,
                ))
                .field(FieldDescriptor::new(
                    "pricePerNight",
                    "Price per night (USD)",
                    FieldKind::Number,
                ))
                .field(FieldDescriptor::new("rating", "Rating", FieldKind::Number))
                .field(FieldDescriptor::new(
                    "category",
                    "Category",
                    FieldKind::select(["luxury", "boutique", "standard", "farmstay"]),
                ))
                .column(ColumnDescriptor::new("name", "Name"))
                .column(ColumnDescriptor::new("location", "Location"))
                .column(
                    ColumnDescriptor::new("pricePerNight", "Per night")
                        .transform(DisplayTransform::Currency),
                )
                .column(ColumnDescriptor::new("rating", "Rating")),
        );

        registry.register(
            EntitySchema::new("festivals", "Festival")
                .field(FieldDescriptor::new("name", "Name", FieldKind::Text).required())
                .field(FieldDescriptor::new("location", "Location", FieldKind::Text))
                .field(FieldDescriptor::new(
                    "description",
                    "Description",
                    FieldKind::LongText,
                ))
                .field(FieldDescriptor::new(
                    "month",
                    "Month",
                    FieldKind::select([
                        "January",
                        "February",
                        "March",
                        "April",
                        "May",
                        "June",
                        "July",
                        "August",
                        "September",
                        "October",
                        "November",
                        "December",
                    ]),
                ))
                .field(FieldDescriptor::new(
                    "durationDays",
                    "Duration (days)",
                    FieldKind::Number,
                ))
                .column(ColumnDescriptor::new("name", "Name"))
                .column(ColumnDescriptor::new("location", "Location"))
                .column(ColumnDescriptor::new("month", "Month"))
                .column(
                    ColumnDescriptor::new("description", "Description")
                        .transform(DisplayTransform::Truncate(60)),
                ),
        );

        registry.register(
            EntitySchema::new("flights", "Flight")
                .field(FieldDescriptor::new("airline", "Airline", FieldKind::Text).required())
                .field(FieldDescriptor::new("origin", "Origin", FieldKind::Text).required())
                .field(
                    FieldDescriptor::new("destination", "Destination", FieldKind::Text).required(),
                )
                .field(FieldDescriptor::new("price", "Price (USD)", FieldKind::Number))
                .field(FieldDescriptor::new(
                    "departureDate",
                    "Departure date",
                    FieldKind::Text,
                ))
                .column(ColumnDescriptor::new("airline", "Airline"))
                .column(ColumnDescriptor::new("origin", "From"))
                .column(ColumnDescriptor::new("destination", "To"))
                .column(
                    ColumnDescriptor::new("price", "Price").transform(DisplayTransform::Currency),
                ),
        );

        registry.register(
            EntitySchema::new("itineraries", "Itinerary")
                .field(FieldDescriptor::new("title", "Title", FieldKind::Text).required())
                .field(FieldDescriptor::new("summary", "Summary", FieldKind::LongText))
                .field(FieldDescriptor::new("days", "Days", FieldKind::Number))
                .field(
                    FieldDescriptor::new("tourId", "Tour", FieldKind::Number).references("tours"),
                )
                .column(ColumnDescriptor::new("title", "Title"))
                .column(ColumnDescriptor::new("days", "Days"))
                .column(
                    ColumnDescriptor::new("summary", "Summary")
                        .transform(DisplayTransform::Truncate(60)),
                ),
        );

        registry.register(
            EntitySchema::new("custom-tours", "Custom tour request")
                .field(
                    FieldDescriptor::new("customerName", "Customer name", FieldKind::Text)
                        .required(),
                )
                .field(FieldDescriptor::new("email", "Email", FieldKind::Text).required())
                .field(FieldDescriptor::new(
                    "startDate",
                    "Start date",
                    FieldKind::Text,
                ))
                .field(FieldDescriptor::new(
                    "groupSize",
                    "Group size",
                    FieldKind::Number,
                ))
                .field(FieldDescriptor::new(
                    "interests",
                    "Interests",
                    FieldKind::LongText,
                ))
                .field(
                    FieldDescriptor::new(
                        "status",
                        "Status",
                        FieldKind::select(["pending", "approved", "rejected", "completed"]),
                    )
                    .default_value("pending"),
                )
                .column(ColumnDescriptor::new("customerName", "Customer"))
                .column(ColumnDescriptor::new("email", "Email"))
                .column(ColumnDescriptor::new("groupSize", "Group"))
                .column(ColumnDescriptor::new("status", "Status")),
        );

        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn unknown_entity_type() {
        let registry = Registry::builtin();
        assert!(matches!(
            registry.schema("treks"),
            Err(Error::UnknownEntityType(name)) if name == "treks"
        ));
        assert!(matches!(
            registry.columns("treks"),
            Err(Error::UnknownEntityType(_))
        ));
    }

    #[test]
    fn every_schema_is_non_empty_and_columns_reference_fields() {
        let registry = Registry::builtin();
        let mut seen = 0;
        for schema in registry.entities() {
            seen += 1;
            assert!(!schema.fields.is_empty(), "{} has no fields", schema.entity);
            for column in &schema.columns {
                assert!(
                    schema.field_by_name(&column.field).is_some(),
                    "{} column `{}` names an unknown field",
                    schema.entity,
                    column.field
                );
            }
        }
        assert_eq!(seen, 6);
    }

    #[test]
    fn reference_lookup() {
        let registry = Registry::builtin();
        assert_eq!(
            registry.referencing("tours"),
            vec![("itineraries".to_string(), "tourId".to_string())]
        );
        assert!(registry.referencing("hotels").is_empty());
    }

    #[test]
    fn status_options_only_on_status_entities() {
        let registry = Registry::builtin();
        let options: Vec<&str> = registry
            .schema("custom-tours")
            .unwrap()
            .status_options()
            .unwrap()
            .iter()
            .map(String::as_str)
            .collect();
        assert_eq!(options, ["pending", "approved", "rejected", "completed"]);
        assert!(registry.schema("tours").unwrap().status_options().is_none());
    }
}
