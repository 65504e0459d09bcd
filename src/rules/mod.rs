//! Per-format column rules.
//!
//! Every supported format is described by one [`FormatRule`] in a static
//! registry:
//!
//! - an [`AliasTable`] from native header spellings to canonical fields
//!   (ImmunoSEQ and AIRR only),
//! - a [`HeaderMatching`] policy (exact, or normalized for AIRR),
//! - an ordered list of [`Requirement`]s.
//!
//! Adding a format means adding a rule, not new branching in the validator.
//!
//! | Format | Matching | Requirements |
//! |--------|----------|--------------|
//! | immunoSeq | exact | sequence, cdr3-aa, v/d/j-gene, v-begin, read-count\|umi-count |
//! | qiagen | exact | 5 literal headers |
//! | mixcr | exact | readCount, nSeqCDR3, aaSeqCDR3 |
//! | mixcr-sc | exact | mixcr + tagValueCELL* |
//! | cellranger | exact | 8 literal headers |
//! | airr | normalized | duplicate_count, junction, v_call, j_call |
//! | airr-sc | normalized | airr + cell_id |
//! | custom | user mapping | cdr3-nt\|cdr3-aa, v-gene, j-gene, primary count |

pub mod aliases;
pub mod registry;
pub mod requirement;

pub use aliases::AliasTable;
pub use registry::{all_rules, rule_for, FormatRule, RULES_VERSION};
pub use requirement::{HeaderMatching, Requirement};
