//! Ordered, named pipeline stages.
//!
//! The request pipeline is assembled from an explicit ordered list of stages
//! instead of relying on implicit registration order. The invariants are
//! checked when the plan is constructed, before any listener starts:
//!
//! - `Cors` runs before every other stage
//! - `ErrorBackstop` is last (it wraps every other stage at the HTTP layer)
//! - `NotFound` sits after the real routes and before the backstop
//!
//! The assembly that consumes a plan lives in `http::server`.

/// One named step of the request pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Origin evaluation + pre-flight short-circuit.
    Cors,
    /// Request body size limit (body parsing happens in extractors).
    BodyLimit,
    /// The three resource route collaborators under /api.
    Resources,
    /// Health, CORS introspection and the root descriptor.
    Diagnostics,
    /// Catch-all 404 for unmatched paths.
    NotFound,
    /// Error normalization backstop; must never be shadowed.
    ErrorBackstop,
}

/// Ordering violation detected at construction time.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PipelineError {
    #[error("stage {0:?} is missing from the plan")]
    Missing(Stage),
    #[error("stage {0:?} appears more than once")]
    Duplicate(Stage),
    #[error("Cors must be the first stage")]
    CorsNotFirst,
    #[error("ErrorBackstop must be the last stage")]
    BackstopNotLast,
    #[error("NotFound must come after the route stages")]
    NotFoundBeforeRoutes,
}

/// Validated ordered list of pipeline stages.
#[derive(Debug, Clone)]
pub struct StagePlan {
    stages: Vec<Stage>,
}

const REQUIRED: [Stage; 6] = [
    Stage::Cors,
    Stage::BodyLimit,
    Stage::Resources,
    Stage::Diagnostics,
    Stage::NotFound,
    Stage::ErrorBackstop,
];

impl StagePlan {
    /// Validate a stage ordering.
    pub fn new(stages: Vec<Stage>) -> Result<Self, PipelineError> {
        for required in REQUIRED {
            match stages.iter().filter(|s| **s == required).count() {
                0 => return Err(PipelineError::Missing(required)),
                1 => {}
                _ => return Err(PipelineError::Duplicate(required)),
            }
        }

        let position = |stage| stages.iter().position(|s| *s == stage);
        if position(Stage::Cors) != Some(0) {
            return Err(PipelineError::CorsNotFirst);
        }
        if position(Stage::ErrorBackstop) != Some(stages.len() - 1) {
            return Err(PipelineError::BackstopNotLast);
        }
        let not_found = position(Stage::NotFound);
        if not_found < position(Stage::Resources) || not_found < position(Stage::Diagnostics) {
            return Err(PipelineError::NotFoundBeforeRoutes);
        }

        Ok(Self { stages })
    }

    /// The canonical gateway pipeline.
    pub fn standard() -> Self {
        Self::new(REQUIRED.to_vec()).expect("standard stage order satisfies its own invariants")
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_plan_is_valid() {
        let plan = StagePlan::standard();
        assert_eq!(plan.stages().first(), Some(&Stage::Cors));
        assert_eq!(plan.stages().last(), Some(&Stage::ErrorBackstop));
    }

    #[test]
    fn cors_must_lead() {
        let err = StagePlan::new(vec![
            Stage::BodyLimit,
            Stage::Cors,
            Stage::Resources,
            Stage::Diagnostics,
            Stage::NotFound,
            Stage::ErrorBackstop,
        ])
        .unwrap_err();
        assert_eq!(err, PipelineError::CorsNotFirst);
    }

    #[test]
    fn backstop_must_trail() {
        let err = StagePlan::new(vec![
            Stage::Cors,
            Stage::BodyLimit,
            Stage::Resources,
            Stage::Diagnostics,
            Stage::ErrorBackstop,
            Stage::NotFound,
        ])
        .unwrap_err();
        assert_eq!(err, PipelineError::BackstopNotLast);
    }

    #[test]
    fn not_found_must_follow_routes() {
        let err = StagePlan::new(vec![
            Stage::Cors,
            Stage::BodyLimit,
            Stage::NotFound,
            Stage::Resources,
            Stage::Diagnostics,
            Stage::ErrorBackstop,
        ])
        .unwrap_err();
        assert_eq!(err, PipelineError::NotFoundBeforeRoutes);
    }

    #[test]
    fn missing_and_duplicate_stages_are_rejected() {
        let err = StagePlan::new(vec![Stage::Cors, Stage::ErrorBackstop]).unwrap_err();
        assert_eq!(err, PipelineError::Missing(Stage::BodyLimit));

        let err = StagePlan::new(vec![
            Stage::Cors,
            Stage::BodyLimit,
            Stage::Resources,
            Stage::Resources,
            Stage::Diagnostics,
            Stage::NotFound,
            Stage::ErrorBackstop,
        ])
        .unwrap_err();
        assert_eq!(err, PipelineError::Duplicate(Stage::Resources));
    }
}
