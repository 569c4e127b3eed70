//! Quality classifier: pure rules turning raw metrics into verdicts.

mod rules;

pub use rules::{
    format_cutoff, format_duration, interpret_cutoff_shape, interpret_likely_origin, CutoffShape,
    LikelyOrigin, QualityAssessment,
};
