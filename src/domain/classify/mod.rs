//! First-match-wins keyword classifiers over free-text project fields.
//!
//! Three independent classifiers share one rule-engine shape: concatenate the
//! non-empty input fields, lowercase and fold diacritics, then walk an ordered
//! rule list and return the tag of the first matching rule. Categories are not
//! mutually exclusive in vocabulary ("data" and "dev" can both appear), so
//! rule order is the tie-break policy and must be preserved exactly.
//!
//! Classification never fails: blank input and vocabulary misses both return
//! the classifier's `Unknown` tag. Tags are derived on demand and never
//! treated as ground truth.

mod archetype;
mod engine;
mod revenue;
mod venture;

pub use archetype::{classify_archetype, Archetype};
pub use revenue::{classify_revenue_model, RevenueModel};
pub use venture::{classify_venture_kind, VentureKind};
