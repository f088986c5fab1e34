//! Fuels 2018: upstream emissions of the liquid and gaseous motor fuels
//! consumed in the municipality.

use tracing::debug;

use crate::errors::BalanceResult;
use crate::inputs::Inputs;
use crate::record::{Record, Shape};
use crate::utils::div;
use crate::y2018::agri::A18;
use crate::y2018::business::B18;
use crate::y2018::industry::I18;
use crate::y2018::residences::R18;
use crate::y2018::transport::T18;

crate::snapshot!(
    /// Fuels baseline.
    F18 {
        f,
        d,
        d_r,
        d_b,
        d_i,
        d_t,
        d_a,
        p,
        p_petrol,
        p_jetfuel,
        p_diesel,
        p_bioethanol,
        p_biodiesel,
        p_biogas,
        p_emethan,
        p_hydrogen,
        p_hydrogen_reconv,
    }
);

const PRODUCTION: Shape = Shape::EMITTER.with(Shape::PER_MWH);

fn production(energy: f64, pb_per_mwh: f64) -> Record {
    let mut r = Record::new(PRODUCTION);
    r.energy = energy;
    r.co2e_production_based_per_mwh = pb_per_mwh;
    r.co2e_production_based = energy * pb_per_mwh;
    r.sum_emissions();
    r
}

pub fn calc(
    inputs: &Inputs<'_>,
    r18: &R18,
    b18: &B18,
    i18: &I18,
    t18: &T18,
    a18: &A18,
) -> BalanceResult<F18> {
    let p_petrol = production(
        r18.s_petrol.energy + b18.s_petrol.energy + t18.s_petrol.energy + a18.s_petrol.energy,
        inputs.fact("Fact_F_P_petrol_ratio_CO2e_pb_to_fec_2018")?,
    );
    let p_jetfuel = production(
        t18.s_jetfuel.energy,
        inputs.fact("Fact_F_P_jetfuel_ratio_CO2e_pb_to_fec_2018")?,
    );
    let p_diesel = production(
        b18.s_diesel.energy
            + i18.s_fossil_diesel.energy
            + t18.s_diesel.energy
            + a18.s_diesel.energy,
        inputs.fact("Fact_F_P_diesel_ratio_CO2e_pb_to_fec_2018")?,
    );
    let p_bioethanol = production(
        t18.s_bioethanol.energy,
        inputs.fact("Fact_F_P_bioethanol_ratio_CO2e_pb_to_fec_2018")?,
    );
    let p_biodiesel = production(
        t18.s_biodiesel.energy,
        inputs.fact("Fact_F_P_biodiesel_ratio_CO2e_pb_to_fec_2018")?,
    );
    let p_biogas = production(
        t18.s_biogas.energy,
        inputs.fact("Fact_F_P_biogas_ratio_CO2e_pb_to_fec_2018")?,
    );
    // No synthetic fuels were produced in 2018.
    let p_emethan = production(0.0, 0.0);
    let p_hydrogen = production(0.0, 0.0);
    let p_hydrogen_reconv = production(0.0, 0.0);

    let p = Record::rollup(
        Shape::EMITTER,
        &[
            &p_petrol,
            &p_jetfuel,
            &p_diesel,
            &p_bioethanol,
            &p_biodiesel,
            &p_biogas,
            &p_emethan,
            &p_hydrogen,
            &p_hydrogen_reconv,
        ],
    );
    let f = Record::rollup(Shape::EMITTER, &[&p]);

    let demand = |energy: f64| {
        let mut r = Record::new(Shape::ENERGY.with(Shape::PCT));
        r.energy = energy;
        r.pct_energy = div(energy, p.energy);
        r
    };
    let d_r = demand(r18.s_petrol.energy);
    let d_b = demand(b18.s_petrol.energy + b18.s_diesel.energy);
    let d_i = demand(i18.s_fossil_diesel.energy);
    let d_t = demand(
        t18.s_petrol.energy
            + t18.s_jetfuel.energy
            + t18.s_diesel.energy
            + t18.s_bioethanol.energy
            + t18.s_biodiesel.energy
            + t18.s_biogas.energy,
    );
    let d_a = demand(a18.s_petrol.energy + a18.s_diesel.energy);
    let d = Record::rollup(Shape::ENERGY, &[&d_r, &d_b, &d_i, &d_t, &d_a]);

    debug!(energy = f.energy, co2e = f.co2e_total, "fuels 2018");

    Ok(F18 {
        f,
        d,
        d_r,
        d_b,
        d_i,
        d_t,
        d_a,
        p,
        p_petrol,
        p_jetfuel,
        p_diesel,
        p_bioethanol,
        p_biodiesel,
        p_biogas,
        p_emethan,
        p_hydrogen,
        p_hydrogen_reconv,
    })
}
