use crate::core::field::CanonicalField;
use crate::core::types::{CountType, FormatId};
use crate::rules::aliases::{AliasTable, AIRR_ALIASES, IMMUNOSEQ_ALIASES};
use crate::rules::requirement::{HeaderMatching, Requirement};

/// Revision of the rule tables below. Bump whenever a requirement or alias
/// changes so stored verdicts can be traced to the rules that produced them.
pub const RULES_VERSION: u32 = 1;

/// Column rules for one supported format.
#[derive(Debug, Clone, Copy)]
pub struct FormatRule {
    pub format: FormatId,
    pub aliases: AliasTable,
    pub matching: HeaderMatching,
    pub requirements: &'static [Requirement],
}

impl FormatRule {
    /// Whether headers are resolved through an alias table.
    #[must_use]
    pub fn uses_aliases(&self) -> bool {
        !self.aliases.is_empty()
    }

    /// Whether the rule is checked against a user mapping instead of headers.
    #[must_use]
    pub fn uses_custom_mapping(&self) -> bool {
        self.format == FormatId::Custom
    }

    /// Missing-column labels of every requirement, in declared order.
    #[must_use]
    pub fn requirement_labels(&self, primary_count: CountType) -> Vec<String> {
        self.requirements
            .iter()
            .map(|r| r.label(primary_count))
            .collect()
    }

    /// Canonical fields referenced by the requirements, without duplicates.
    #[must_use]
    pub fn required_fields(&self, primary_count: CountType) -> Vec<CanonicalField> {
        let mut fields = Vec::new();
        for requirement in self.requirements {
            for field in requirement.fields(primary_count) {
                if !fields.contains(&field) {
                    fields.push(field);
                }
            }
        }
        fields
    }
}

static IMMUNOSEQ: FormatRule = FormatRule {
    format: FormatId::ImmunoSeq,
    aliases: IMMUNOSEQ_ALIASES,
    matching: HeaderMatching::Exact,
    requirements: &[
        Requirement::Field(CanonicalField::Sequence),
        Requirement::Field(CanonicalField::Cdr3Aa),
        Requirement::Field(CanonicalField::VGene),
        Requirement::Field(CanonicalField::DGene),
        Requirement::Field(CanonicalField::JGene),
        Requirement::Field(CanonicalField::VBegin),
        Requirement::AnyOf(&[CanonicalField::ReadCount, CanonicalField::UmiCount]),
    ],
};

static QIAGEN: FormatRule = FormatRule {
    format: FormatId::Qiagen,
    aliases: AliasTable::EMPTY,
    matching: HeaderMatching::Exact,
    requirements: &[
        Requirement::Header("CDR3 amino acid sequence"),
        Requirement::Header("CDR3 nucleotide sequence"),
        Requirement::Header("V gene"),
        Requirement::Header("J gene"),
        Requirement::Header("Read count"),
    ],
};

const MIXCR_HEADERS: [Requirement; 3] = [
    Requirement::Header("readCount"),
    Requirement::Header("nSeqCDR3"),
    Requirement::Header("aaSeqCDR3"),
];

static MIXCR: FormatRule = FormatRule {
    format: FormatId::Mixcr,
    aliases: AliasTable::EMPTY,
    matching: HeaderMatching::Exact,
    requirements: &MIXCR_HEADERS,
};

static MIXCR_SC: FormatRule = FormatRule {
    format: FormatId::MixcrSc,
    aliases: AliasTable::EMPTY,
    matching: HeaderMatching::Exact,
    requirements: &[
        MIXCR_HEADERS[0],
        MIXCR_HEADERS[1],
        MIXCR_HEADERS[2],
        Requirement::AnyWithPrefix("tagValueCELL"),
    ],
};

static CELLRANGER: FormatRule = FormatRule {
    format: FormatId::CellRanger,
    aliases: AliasTable::EMPTY,
    matching: HeaderMatching::Exact,
    requirements: &[
        Requirement::Header("barcode"),
        Requirement::Header("chain"),
        Requirement::Header("v_gene"),
        Requirement::Header("j_gene"),
        Requirement::Header("cdr3"),
        Requirement::Header("cdr3_nt"),
        Requirement::Header("reads"),
        Requirement::Header("umis"),
    ],
};

const AIRR_HEADERS: [Requirement; 4] = [
    Requirement::Header("duplicate_count"),
    Requirement::Header("junction"),
    Requirement::Header("v_call"),
    Requirement::Header("j_call"),
];

static AIRR: FormatRule = FormatRule {
    format: FormatId::Airr,
    aliases: AIRR_ALIASES,
    matching: HeaderMatching::Normalized,
    requirements: &AIRR_HEADERS,
};

static AIRR_SC: FormatRule = FormatRule {
    format: FormatId::AirrSc,
    aliases: AIRR_ALIASES,
    matching: HeaderMatching::Normalized,
    requirements: &[
        AIRR_HEADERS[0],
        AIRR_HEADERS[1],
        AIRR_HEADERS[2],
        AIRR_HEADERS[3],
        Requirement::Header("cell_id"),
    ],
};

static CUSTOM: FormatRule = FormatRule {
    format: FormatId::Custom,
    aliases: AliasTable::EMPTY,
    matching: HeaderMatching::Exact,
    requirements: &[
        Requirement::AnyOf(&[CanonicalField::Cdr3Nt, CanonicalField::Cdr3Aa]),
        Requirement::Field(CanonicalField::VGene),
        Requirement::Field(CanonicalField::JGene),
        Requirement::PrimaryCount,
    ],
};

/// Rules for `format`.
#[must_use]
pub fn rule_for(format: FormatId) -> &'static FormatRule {
    match format {
        FormatId::ImmunoSeq => &IMMUNOSEQ,
        FormatId::Qiagen => &QIAGEN,
        FormatId::Mixcr => &MIXCR,
        FormatId::MixcrSc => &MIXCR_SC,
        FormatId::CellRanger => &CELLRANGER,
        FormatId::Airr => &AIRR,
        FormatId::AirrSc => &AIRR_SC,
        FormatId::Custom => &CUSTOM,
    }
}

/// Every registered rule, in `FormatId::ALL` order.
pub fn all_rules() -> impl Iterator<Item = &'static FormatRule> {
    FormatId::ALL.into_iter().map(rule_for)
}
