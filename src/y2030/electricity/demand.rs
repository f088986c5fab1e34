//! Electricity demand of every sector in the target year.

use crate::errors::BalanceResult;
use crate::inputs::Inputs;
use crate::record::{Record, Shape};
use crate::utils::{MILLION, div};
use crate::y2018::electricity::E18;
use crate::y2018::set_shares;
use crate::y2030::agri::A30;
use crate::y2030::business::B30;
use crate::y2030::fuels::F30;
use crate::y2030::heat::H30;
use crate::y2030::industry::I30;
use crate::y2030::residences::R30;
use crate::y2030::transport::T30;

const CONSUMER: Shape = Shape::ENERGY
    .with(Shape::PCT)
    .with(Shape::ENERGY_CHANGE)
    .with(Shape::ENERGY_CHANGE_PCT);
/// Consumer paying for the electricity it draws from the national mix.
const PAYING: Shape = CONSUMER.with(Shape::FUEL_COST);

pub(super) struct Demand {
    pub d: Record,
    pub d_r: Record,
    pub d_b: Record,
    pub d_i: Record,
    pub d_t: Record,
    pub d_a: Record,
    pub d_h: Record,
    pub d_f_wo_hydrogen: Record,
    pub d_f_hydrogen_reconv: Record,
}

/// Target-year sectors drawing electricity.
pub struct Consumers<'a> {
    pub r30: &'a R30,
    pub b30: &'a B30,
    pub i30: &'a I30,
    pub t30: &'a T30,
    pub a30: &'a A30,
    pub h30: &'a H30,
    pub f30: &'a F30,
}

fn consumer(shape: Shape, energy: f64) -> Record {
    let mut r = Record::new(shape);
    r.energy = energy;
    r
}

pub(super) fn calc(inputs: &Inputs<'_>, e18: &E18, c: &Consumers<'_>) -> BalanceResult<Demand> {
    let household_price = inputs.fact("Fact_E_D_R_cost_fuel_per_MWh_2018")?;
    let paying = |energy: f64, per_mwh: f64| {
        let mut r = consumer(PAYING, energy);
        r.cost_fuel_per_mwh = per_mwh;
        r
    };

    let mut d_r = paying(c.r30.p.demand_electricity, household_price);
    let mut d_b = paying(
        c.b30.p.demand_electricity,
        inputs.fact("Fact_E_D_B_cost_fuel_per_MWh_2018")?,
    );
    let mut d_i = paying(
        c.i30.p.demand_electricity,
        inputs.fact("Fact_E_D_I_cost_fuel_per_MWh_2018")?,
    );
    // Transport and agriculture pay household prices.
    let mut d_t = paying(c.t30.t.demand_electricity, household_price);
    let mut d_a = paying(c.a30.p_operation.demand_electricity, household_price);
    let mut d_h = consumer(CONSUMER, c.h30.p.demand_electricity);
    let f30 = c.f30;
    let mut d_f_wo_hydrogen = consumer(
        CONSUMER,
        Record::total(
            &[
                &f30.p_petrol,
                &f30.p_jetfuel,
                &f30.p_diesel,
                &f30.p_emethan,
                &f30.p_hydrogen,
            ],
            |r| r.demand_electricity,
        ),
    );
    let mut d_f_hydrogen_reconv = consumer(CONSUMER, f30.p_hydrogen_reconv.demand_electricity);

    d_r.set_energy_change(&e18.d_r);
    d_b.set_energy_change(&e18.d_b);
    d_i.set_energy_change(&e18.d_i);
    d_t.set_energy_change(&e18.d_t);
    d_a.set_energy_change(&e18.d_a);
    d_h.set_energy_change(&e18.d_h);
    // E-fuel production did not draw electricity in 2018.
    d_f_wo_hydrogen.set_energy_change(&Record::new(CONSUMER));
    d_f_hydrogen_reconv.set_energy_change(&e18.d_f_hydrogen_reconv);

    let mut d = Record::rollup(
        CONSUMER,
        &[
            &d_r,
            &d_b,
            &d_i,
            &d_t,
            &d_a,
            &d_h,
            &d_f_wo_hydrogen,
            &d_f_hydrogen_reconv,
        ],
    );
    d.set_energy_change(&e18.d);
    set_shares(
        d.energy,
        &mut [
            &mut d_r,
            &mut d_b,
            &mut d_i,
            &mut d_t,
            &mut d_a,
            &mut d_h,
            &mut d_f_wo_hydrogen,
            &mut d_f_hydrogen_reconv,
        ],
    );

    Ok(Demand {
        d,
        d_r,
        d_b,
        d_i,
        d_t,
        d_a,
        d_h,
        d_f_wo_hydrogen,
        d_f_hydrogen_reconv,
    })
}

impl Demand {
    /// Demand the national plants are sized for: everything except the
    /// reconversion of stored hydrogen.
    pub fn without_reconversion(&self) -> f64 {
        self.d.energy - self.d_f_hydrogen_reconv.energy
    }

    /// Fuel cost of the paying consumers for the part of the generation that
    /// comes from the national mix.
    pub fn charge(&mut self, national: f64, total: f64) {
        let share = div(national, total);
        for r in [
            &mut self.d_r,
            &mut self.d_b,
            &mut self.d_i,
            &mut self.d_t,
            &mut self.d_a,
        ] {
            r.cost_fuel = r.energy * r.cost_fuel_per_mwh * share / MILLION;
        }
    }
}
