use crate::optimizer::{ControlValue, OptimizerError};
use ::clarabel::solver::{DefaultSettings, DefaultSettingsBuilder};
use derive_builder::Builder;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Controls accepted by [`ClarabelOptimizer`](super::ClarabelOptimizer).
///
/// Each field can be set by name through
/// [`Optimizer::set_control`](crate::optimizer::Optimizer::set_control).

#[derive(Builder, Debug, Clone, PartialEq)]
#[builder(build_fn(validate = "Self::validate"))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ClarabelControls {
    ///verbose printing
    #[builder(default = "false")]
    pub verbose: bool,

    ///maximum number of interior point iterations per relaxation
    #[builder(default = "200")]
    pub max_iter: u32,

    ///maximum run time (seconds) per relaxation
    #[builder(default = "f64::INFINITY")]
    pub time_limit: f64,

    ///absolute duality gap tolerance
    #[builder(default = "1e-8")]
    pub tol_gap_abs: f64,

    ///relative duality gap tolerance
    #[builder(default = "1e-8")]
    pub tol_gap_rel: f64,

    ///feasibility check tolerance (primal and dual)
    #[builder(default = "1e-8")]
    pub tol_feas: f64,

    ///absolute infeasibility tolerance (primal and dual)
    #[builder(default = "1e-8")]
    pub tol_infeas_abs: f64,

    ///relative infeasibility tolerance (primal and dual)
    #[builder(default = "1e-8")]
    pub tol_infeas_rel: f64,

    ///enable presolve constraint reduction
    #[builder(default = "true")]
    pub presolve_enable: bool,

    ///maximum number of branch and bound nodes
    #[builder(default = "10000")]
    pub mip_max_nodes: u32,

    ///integrality tolerance
    #[builder(default = "1e-6")]
    pub mip_int_tol: f64,
}

impl Default for ClarabelControls {
    fn default() -> ClarabelControls {
        ClarabelControlsBuilder::default().build().unwrap()
    }
}

/// Names of all recognised controls
pub const CONTROL_NAMES: [&str; 11] = [
    "verbose",
    "max_iter",
    "time_limit",
    "tol_gap_abs",
    "tol_gap_rel",
    "tol_feas",
    "tol_infeas_abs",
    "tol_infeas_rel",
    "presolve_enable",
    "mip_max_nodes",
    "mip_int_tol",
];

impl ClarabelControls {
    pub fn is_known(name: &str) -> bool {
        CONTROL_NAMES.contains(&name)
    }

    /// Set a control by name.  The previous value is kept if the new
    /// one is rejected.
    pub fn set(&mut self, name: &str, value: &ControlValue) -> Result<(), OptimizerError> {
        let bad = || OptimizerError::BadControlValue {
            name: name.to_string(),
            value: value.clone(),
        };
        let positive = |v: Option<f64>| v.filter(|&v| v > 0.0).ok_or_else(bad);

        match name {
            "verbose" => self.verbose = value.as_bool().ok_or_else(bad)?,
            "max_iter" => self.max_iter = value.as_u32().ok_or_else(bad)?,
            "time_limit" => self.time_limit = positive(value.as_f64())?,
            "tol_gap_abs" => self.tol_gap_abs = positive(value.as_f64())?,
            "tol_gap_rel" => self.tol_gap_rel = positive(value.as_f64())?,
            "tol_feas" => self.tol_feas = positive(value.as_f64())?,
            "tol_infeas_abs" => self.tol_infeas_abs = positive(value.as_f64())?,
            "tol_infeas_rel" => self.tol_infeas_rel = positive(value.as_f64())?,
            "presolve_enable" => self.presolve_enable = value.as_bool().ok_or_else(bad)?,
            "mip_max_nodes" => self.mip_max_nodes = value.as_u32().ok_or_else(bad)?,
            "mip_int_tol" => {
                self.mip_int_tol = value
                    .as_f64()
                    .filter(|&v| v > 0.0 && v < 0.5)
                    .ok_or_else(bad)?
            }
            _ => return Err(OptimizerError::UnknownControl(name.to_string())),
        }
        Ok(())
    }

    /// Engine settings for one relaxation
    pub(crate) fn engine_settings(&self) -> Result<DefaultSettings<f64>, OptimizerError> {
        DefaultSettingsBuilder::default()
            .verbose(self.verbose)
            .max_iter(self.max_iter)
            .time_limit(self.time_limit)
            .tol_gap_abs(self.tol_gap_abs)
            .tol_gap_rel(self.tol_gap_rel)
            .tol_feas(self.tol_feas)
            .tol_infeas_abs(self.tol_infeas_abs)
            .tol_infeas_rel(self.tol_infeas_rel)
            .presolve_enable(self.presolve_enable)
            .build()
            .map_err(|e| OptimizerError::Engine(format!("{:?}", e)))
    }
}

/// Automatic pre-build controls validation
impl ClarabelControlsBuilder {
    fn validate(&self) -> Result<(), String> {
        let tolerances = [
            ("tol_gap_abs", self.tol_gap_abs),
            ("tol_gap_rel", self.tol_gap_rel),
            ("tol_feas", self.tol_feas),
            ("tol_infeas_abs", self.tol_infeas_abs),
            ("tol_infeas_rel", self.tol_infeas_rel),
            ("time_limit", self.time_limit),
        ];
        for (name, value) in tolerances {
            if matches!(value, Some(v) if v <= 0.0) {
                return Err(format!("{} must be positive", name));
            }
        }
        if matches!(self.mip_int_tol, Some(v) if v <= 0.0 || v >= 0.5) {
            return Err("mip_int_tol must lie in (0, 0.5)".to_string());
        }
        Ok(())
    }
}
