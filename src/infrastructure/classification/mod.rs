mod scaffold_classifier;
mod who_icd_classifier;

pub use scaffold_classifier::ScaffoldClassifier;
pub use who_icd_classifier::{WhoIcdClassifier, WhoIcdEndpoints};
