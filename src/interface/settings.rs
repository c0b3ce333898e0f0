use super::ConeMode;
use crate::optimizer::ControlValue;
use derive_builder::Builder;
use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Static settings of a [`ConicInterface`](super::ConicInterface).

#[derive(Builder, Debug, Clone, PartialEq)]
#[builder(build_fn(validate = "Self::validate"))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct InterfaceSettings {
    ///representation of second-order cones in the optimizer
    #[builder(default)]
    pub cone_mode: ConeMode,

    ///switch the optimizer's log output on
    #[builder(default = "false")]
    pub verbose: bool,

    ///key of the warm-start cache entry.  Defaults to the optimizer name
    #[builder(default, setter(into, strip_option))]
    pub solver_name: Option<String>,
}

impl Default for InterfaceSettings {
    fn default() -> InterfaceSettings {
        InterfaceSettingsBuilder::default().build().unwrap()
    }
}

impl InterfaceSettingsBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(Some(name)) = &self.solver_name {
            if name.trim().is_empty() {
                return Err("solver_name must not be empty".to_string());
            }
        }
        Ok(())
    }
}

/// Options for a single solve.
///
/// `controls` are passed to the optimizer verbatim, and a control it does
/// not know is an error.  `extra` holds generic options, of which only
/// those the optimizer recognises are applied.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SolveOptions {
    pub controls: BTreeMap<String, ControlValue>,
    pub extra: BTreeMap<String, ControlValue>,
}

impl SolveOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_control(mut self, name: &str, value: impl Into<ControlValue>) -> Self {
        self.controls.insert(name.to_string(), value.into());
        self
    }

    pub fn with_extra(mut self, name: &str, value: impl Into<ControlValue>) -> Self {
        self.extra.insert(name.to_string(), value.into());
        self
    }
}
