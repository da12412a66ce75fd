use approx::assert_relative_eq;
use proptest::prelude::*;
use steam_leak_manager::units::{
    convert_density, convert_length, convert_mass_flow, convert_pressure,
    convert_specific_enthalpy, convert_specific_entropy, convert_temperature, convert_viscosity,
    DensityUnit, LengthUnit, MassFlowUnit, PressureUnit, SpecificEnthalpyUnit,
    SpecificEntropyUnit, TemperatureUnit, ViscosityUnit,
};

#[test]
fn imperial_reference_values() {
    assert_eq!(convert_length(1.0, LengthUnit::Inch, LengthUnit::Meter), 0.0254);
    assert_relative_eq!(
        convert_pressure(1.0, PressureUnit::Psi, PressureUnit::Pascal),
        6_894.757_293_168
    );
    assert_relative_eq!(
        convert_temperature(212.0, TemperatureUnit::Fahrenheit, TemperatureUnit::Kelvin),
        373.15,
        epsilon = 1e-9
    );
    assert_relative_eq!(
        convert_density(1.0, DensityUnit::PoundPerCubicFoot, DensityUnit::KgPerCubicMeter),
        16.018_463,
        epsilon = 1e-6
    );
    assert_relative_eq!(
        convert_mass_flow(1.0, MassFlowUnit::KgPerSecond, MassFlowUnit::PoundPerHour),
        7_936.641_4,
        epsilon = 1e-4
    );
    assert_relative_eq!(
        convert_specific_enthalpy(
            1.0,
            SpecificEnthalpyUnit::BtuPerPound,
            SpecificEnthalpyUnit::JPerKg
        ),
        2_326.0
    );
    assert_relative_eq!(
        convert_specific_entropy(
            4_186.8,
            SpecificEntropyUnit::JPerKgK,
            SpecificEntropyUnit::BtuPerPoundRankine
        ),
        1.0,
        epsilon = 1e-12
    );
    assert_relative_eq!(
        convert_viscosity(1.0, ViscosityUnit::Centipoise, ViscosityUnit::PascalSecond),
        1.0e-3
    );
}

proptest! {
    #[test]
    fn inch_meter_round_trip(value in 1.0e-3f64..1.0e3) {
        let m = convert_length(value, LengthUnit::Inch, LengthUnit::Meter);
        let back = convert_length(m, LengthUnit::Meter, LengthUnit::Inch);
        prop_assert!((back - value).abs() <= 1e-9 * value);
    }

    #[test]
    fn psi_pascal_round_trip(value in 1.0e-2f64..1.0e4) {
        let pa = convert_pressure(value, PressureUnit::Psi, PressureUnit::Pascal);
        let back = convert_pressure(pa, PressureUnit::Pascal, PressureUnit::Psi);
        prop_assert!((back - value).abs() <= 1e-9 * value);
    }

    #[test]
    fn density_and_viscosity_round_trip(value in 1.0e-6f64..1.0e3) {
        let rho = convert_density(value, DensityUnit::KgPerCubicMeter, DensityUnit::PoundPerCubicFoot);
        let rho_back = convert_density(rho, DensityUnit::PoundPerCubicFoot, DensityUnit::KgPerCubicMeter);
        prop_assert!((rho_back - value).abs() <= 1e-12 * value);

        let mu = convert_viscosity(value, ViscosityUnit::PascalSecond, ViscosityUnit::PoundPerFootSecond);
        let mu_back = convert_viscosity(mu, ViscosityUnit::PoundPerFootSecond, ViscosityUnit::PascalSecond);
        prop_assert!((mu_back - value).abs() <= 1e-12 * value);
    }
}
