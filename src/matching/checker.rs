//! Evaluation of a format's requirement list against a column source.

use crate::core::field::CanonicalField;
use crate::core::mapping::CustomMapping;
use crate::core::types::CountType;
use crate::matching::resolver::ResolvedHeaders;
use crate::rules::Requirement;

/// Something requirements can be checked against: a resolved header set, or a
/// user's custom mapping.
pub trait ColumnSource {
    fn has_field(&self, field: CanonicalField) -> bool;
    fn has_header(&self, literal: &str) -> bool;
    fn has_header_prefix(&self, prefix: &str) -> bool;
}

impl ColumnSource for ResolvedHeaders {
    fn has_field(&self, field: CanonicalField) -> bool {
        self.columns().contains(field)
    }

    fn has_header(&self, literal: &str) -> bool {
        self.contains_header(literal)
    }

    fn has_header_prefix(&self, prefix: &str) -> bool {
        self.contains_prefix(prefix)
    }
}

/// A custom mapping satisfies a field by assigning it a non-empty header; the
/// assigned header names stand in for the file's headers.
impl ColumnSource for CustomMapping {
    fn has_field(&self, field: CanonicalField) -> bool {
        self.is_assigned(field)
    }

    fn has_header(&self, literal: &str) -> bool {
        self.assignments().any(|(_, header)| header == literal)
    }

    fn has_header_prefix(&self, prefix: &str) -> bool {
        self.assignments().any(|(_, header)| header.starts_with(prefix))
    }
}

#[must_use]
pub fn is_satisfied<C: ColumnSource + ?Sized>(
    requirement: &Requirement,
    source: &C,
    primary_count: CountType,
) -> bool {
    match requirement {
        Requirement::Field(field) => source.has_field(*field),
        Requirement::Header(literal) => source.has_header(literal),
        Requirement::AnyOf(fields) => fields.iter().any(|f| source.has_field(*f)),
        Requirement::AnyWithPrefix(prefix) => source.has_header_prefix(prefix),
        Requirement::PrimaryCount => source.has_field(primary_count.field()),
    }
}

/// Labels of unmet requirements, in declared order.
#[must_use]
pub fn missing_requirements<C: ColumnSource + ?Sized>(
    requirements: &[Requirement],
    source: &C,
    primary_count: CountType,
) -> Vec<String> {
    requirements
        .iter()
        .filter(|r| !is_satisfied(r, source, primary_count))
        .map(|r| r.label(primary_count))
        .collect()
}
