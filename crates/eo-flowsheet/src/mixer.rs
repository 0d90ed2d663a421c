//! Adiabatic stream mixer.

use crate::error::{FlowsheetError, FlowsheetResult};
use crate::traits::{EvalContext, UnitModel};
use eo_core::StreamId;
use eo_thermo::{EnthalpyMode, ThermoPackage};
use std::sync::Arc;

/// Mixes any number of inlets into one outlet.
///
/// Equations, in order:
/// 1. total mole balance: `F_out − Σ F_in`
/// 2. one species balance per component: `F_out z_out,i − Σ F_in z_in,i`
/// 3. energy balance: `(Σ F_in h_in − F_out h_out) / (R T_ref)`
/// 4. pressure: `P_out − min(P_in)`
///
/// The energy residual is divided by `R·T_ref` so that it carries mol/s-like
/// magnitudes comparable to the mole balances.
#[derive(Debug, Clone)]
pub struct Mixer {
    name: String,
    inlets: Vec<StreamId>,
    outlet: StreamId,
    thermo: Arc<ThermoPackage>,
    enthalpy_mode: EnthalpyMode,
}

impl Mixer {
    /// Create a mixer. At least one inlet is required.
    pub fn new(
        name: impl Into<String>,
        inlets: Vec<StreamId>,
        outlet: StreamId,
        thermo: Arc<ThermoPackage>,
    ) -> FlowsheetResult<Self> {
        let name = name.into();
        if inlets.is_empty() {
            return Err(FlowsheetError::InvalidArg {
                what: format!("mixer '{name}' needs at least one inlet"),
            });
        }
        if inlets.contains(&outlet) {
            return Err(FlowsheetError::InvalidArg {
                what: format!("mixer '{name}' uses stream {outlet} as both inlet and outlet"),
            });
        }
        Ok(Self {
            name,
            inlets,
            outlet,
            thermo,
            enthalpy_mode: EnthalpyMode::Absolute,
        })
    }

    /// Enthalpy datum for the energy balance (absolute by default).
    ///
    /// Both datums give the same balance for a non-reacting mixer; sensible
    /// mode additionally requires every species to cover the reference
    /// temperature.
    pub fn with_enthalpy_mode(mut self, mode: EnthalpyMode) -> Self {
        self.enthalpy_mode = mode;
        self
    }

    pub fn inlets(&self) -> &[StreamId] {
        &self.inlets
    }

    pub fn outlet(&self) -> StreamId {
        self.outlet
    }

    fn check_schema(&self, stream: &crate::Stream, n: usize) -> FlowsheetResult<()> {
        if stream.composition.len() == n {
            Ok(())
        } else {
            Err(FlowsheetError::InvalidCompositionSchema {
                stream: stream.name.clone(),
                expected: n,
                found: stream.composition.len(),
            })
        }
    }
}

impl UnitModel for Mixer {
    fn name(&self) -> &str {
        &self.name
    }

    fn streams(&self) -> Vec<StreamId> {
        let mut ids = self.inlets.clone();
        ids.push(self.outlet);
        ids
    }

    fn equations(&self, ctx: &EvalContext<'_>) -> FlowsheetResult<Vec<f64>> {
        let n = self.thermo.species().len();
        let consts = self.thermo.constants();
        let energy_scale = consts.r * consts.t_ref;

        let outlet = ctx.stream(&self.name, self.outlet)?;
        self.check_schema(outlet, n)?;

        let mut flow_in = 0.0;
        let mut species_in = vec![0.0; n];
        let mut enthalpy_in = 0.0;
        let mut p_min = f64::INFINITY;

        for &id in &self.inlets {
            let inlet = ctx.stream(&self.name, id)?;
            self.check_schema(inlet, n)?;
            flow_in += inlet.flow;
            for (acc, fi) in species_in.iter_mut().zip(inlet.component_flows()) {
                *acc += fi;
            }
            let h = self
                .thermo
                .mixture(&inlet.composition)?
                .enthalpy(inlet.temperature, self.enthalpy_mode)?;
            enthalpy_in += inlet.flow * h;
            p_min = p_min.min(inlet.pressure);
        }

        let h_out = self
            .thermo
            .mixture(&outlet.composition)?
            .enthalpy(outlet.temperature, self.enthalpy_mode)?;

        let mut residuals = Vec::with_capacity(n + 3);
        residuals.push(outlet.flow - flow_in);
        residuals.extend(
            outlet
                .component_flows()
                .zip(&species_in)
                .map(|(f_out, f_in)| f_out - f_in),
        );
        residuals.push((enthalpy_in - outlet.flow * h_out) / energy_scale);
        residuals.push(outlet.pressure - p_min);
        Ok(residuals)
    }
}
