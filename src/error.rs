// Error types for the outlet optimizer

use thiserror::Error;

use crate::models::{DemandId, OutletId};

/// Fatal errors. Soft conditions (missing road node, missing path, missing
/// population) never show up here; they are absorbed by fallbacks.
#[derive(Debug, Error)]
pub enum OptimizerError {
    #[error("{0} outlets given but the demand set is empty")]
    EmptyDemand(usize),

    #[error("{0} demand points given but the outlet set is empty")]
    NoOutlets(usize),

    #[error("duplicate demand point id {0}")]
    DuplicateDemandId(DemandId),

    #[error("duplicate outlet id {0}")]
    DuplicateOutletId(OutletId),

    #[error("{kind} {id} has an invalid coordinate ({lat}, {lon})")]
    InvalidCoordinate {
        kind: &'static str,
        id: u32,
        lat: f64,
        lon: f64,
    },

    #[error("demand point {0} has a non-positive population")]
    NonPositivePopulation(DemandId),

    #[error("assignment references unknown demand point {0}")]
    UnknownDemand(DemandId),

    #[error("assignment references unknown outlet {0}")]
    UnknownOutlet(OutletId),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, OptimizerError>;

impl OptimizerError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }
}
