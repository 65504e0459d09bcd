//! Alias tables mapping native header spellings to canonical fields.

use crate::core::field::CanonicalField;

/// Accepted spellings for one canonical field.
#[derive(Debug, Clone, Copy)]
pub struct AliasEntry {
    pub field: CanonicalField,
    pub aliases: &'static [&'static str],
}

/// Mapping from canonical fields to the raw header spellings accepted as synonyms.
///
/// Lookups go from header to field; within one table a header must belong to at
/// most one field.
#[derive(Debug, Clone, Copy)]
pub struct AliasTable {
    entries: &'static [AliasEntry],
}

impl AliasTable {
    pub const EMPTY: AliasTable = AliasTable { entries: &[] };

    #[must_use]
    pub const fn new(entries: &'static [AliasEntry]) -> Self {
        Self { entries }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn entries(&self) -> &'static [AliasEntry] {
        self.entries
    }

    /// Canonical field the header key is an alias of.
    #[must_use]
    pub fn field_for(&self, key: &str) -> Option<CanonicalField> {
        self.entries
            .iter()
            .find(|entry| entry.aliases.iter().any(|alias| *alias == key))
            .map(|entry| entry.field)
    }

    /// Accepted spellings of `field`; empty if the table does not cover it.
    #[must_use]
    pub fn aliases(&self, field: CanonicalField) -> &'static [&'static str] {
        self.entries
            .iter()
            .find(|entry| entry.field == field)
            .map(|entry| entry.aliases)
            .unwrap_or(&[])
    }

    /// Raw headers claimed by more than one field.
    #[must_use]
    pub fn conflicting_aliases(&self) -> Vec<&'static str> {
        let mut seen: Vec<&'static str> = Vec::new();
        let mut conflicts = Vec::new();
        for entry in self.entries {
            for alias in entry.aliases {
                if seen.contains(alias) {
                    if !conflicts.contains(alias) {
                        conflicts.push(*alias);
                    }
                } else {
                    seen.push(*alias);
                }
            }
        }
        conflicts
    }
}

/// ImmunoSEQ v1 (camelCase) and v2 (snake_case) export headers.
pub const IMMUNOSEQ_ALIASES: AliasTable = AliasTable::new(&[
    AliasEntry {
        field: CanonicalField::Sequence,
        aliases: &["nucleotide", "rearrangement"],
    },
    AliasEntry {
        field: CanonicalField::Cdr3Aa,
        aliases: &["aminoAcid", "amino_acid"],
    },
    AliasEntry {
        field: CanonicalField::VGene,
        aliases: &["vGeneName", "v_gene", "vMaxResolved", "v_resolved"],
    },
    AliasEntry {
        field: CanonicalField::DGene,
        aliases: &["dGeneName", "d_gene", "dMaxResolved", "d_resolved"],
    },
    AliasEntry {
        field: CanonicalField::JGene,
        aliases: &["jGeneName", "j_gene", "jMaxResolved", "j_resolved"],
    },
    AliasEntry {
        field: CanonicalField::VBegin,
        aliases: &["vIndex", "v_index", "v-index"],
    },
    AliasEntry {
        field: CanonicalField::ReadCount,
        aliases: &["count (reads)", "reads", "seq_reads", "count"],
    },
    AliasEntry {
        field: CanonicalField::UmiCount,
        aliases: &["count (templates/reads)", "count (templates)", "templates"],
    },
]);

/// AIRR rearrangement schema fields. Keys are lower case; headers are
/// normalized before lookup.
pub const AIRR_ALIASES: AliasTable = AliasTable::new(&[
    AliasEntry {
        field: CanonicalField::Sequence,
        aliases: &["sequence"],
    },
    AliasEntry {
        field: CanonicalField::Cdr3Aa,
        aliases: &["junction_aa", "cdr3_aa"],
    },
    AliasEntry {
        field: CanonicalField::Cdr3Nt,
        aliases: &["junction", "cdr3"],
    },
    AliasEntry {
        field: CanonicalField::VGene,
        aliases: &["v_call"],
    },
    AliasEntry {
        field: CanonicalField::DGene,
        aliases: &["d_call"],
    },
    AliasEntry {
        field: CanonicalField::JGene,
        aliases: &["j_call"],
    },
    AliasEntry {
        field: CanonicalField::CGene,
        aliases: &["c_call"],
    },
    AliasEntry {
        field: CanonicalField::VBegin,
        aliases: &["v_sequence_start"],
    },
    AliasEntry {
        field: CanonicalField::ReadCount,
        aliases: &["duplicate_count", "consensus_count"],
    },
    AliasEntry {
        field: CanonicalField::UmiCount,
        aliases: &["umi_count"],
    },
    AliasEntry {
        field: CanonicalField::CellId,
        aliases: &["cell_id"],
    },
]);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_for_is_case_sensitive() {
        assert_eq!(
            IMMUNOSEQ_ALIASES.field_for("vGeneName"),
            Some(CanonicalField::VGene)
        );
        assert_eq!(IMMUNOSEQ_ALIASES.field_for("vgenename"), None);
        assert_eq!(
            IMMUNOSEQ_ALIASES.field_for("count (reads)"),
            Some(CanonicalField::ReadCount)
        );
        assert_eq!(
            IMMUNOSEQ_ALIASES.field_for("templates"),
            Some(CanonicalField::UmiCount)
        );
    }

    #[test]
    fn test_tables_have_no_conflicting_aliases() {
        assert!(IMMUNOSEQ_ALIASES.conflicting_aliases().is_empty());
        assert!(AIRR_ALIASES.conflicting_aliases().is_empty());
    }

    #[test]
    fn test_airr_keys_are_normalized() {
        for entry in AIRR_ALIASES.entries() {
            for alias in entry.aliases {
                assert_eq!(*alias, alias.trim().to_lowercase());
            }
        }
    }

    #[test]
    fn test_conflict_detection() {
        static BROKEN: AliasTable = AliasTable::new(&[
            AliasEntry {
                field: CanonicalField::ReadCount,
                aliases: &["count"],
            },
            AliasEntry {
                field: CanonicalField::UmiCount,
                aliases: &["count", "umis"],
            },
        ]);
        assert_eq!(BROKEN.conflicting_aliases(), vec!["count"]);
    }

    #[test]
    fn test_aliases_for_uncovered_field() {
        assert!(IMMUNOSEQ_ALIASES.aliases(CanonicalField::CellId).is_empty());
        assert!(AliasTable::EMPTY.is_empty());
    }
}
