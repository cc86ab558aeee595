//! Literature observations of the reference assembly line
//!
//! Twenty-one daily observations (three machines, one day) of every named
//! quantity, the productive machine time and the output, as published with the
//! regression model. Used only as fixed input to the validation report.

use crate::types::NamedQuantity;

/// Observations per published column
pub const REFERENCE_OBSERVATIONS: usize = 21;

const CYCLE_TIME_DIE_ATTACH: [f64; REFERENCE_OBSERVATIONS] = [
    2.8346, 2.907, 2.9342, 2.8936, 2.9046, 2.8971, 2.8378, 2.8432, 2.8342, 2.9032, 2.9178, 2.8190,
    2.8772, 2.8100, 2.9328, 2.8477, 2.8342, 2.8146, 2.9055, 2.8418, 2.9181,
];

const CYCLE_TIME_WIRE_BOND: [f64; REFERENCE_OBSERVATIONS] = [
    6.1796, 6.3721, 6.1890, 6.3850, 6.2920, 6.2297, 6.2860, 6.1901, 6.2720, 6.1126, 6.3301, 6.1450,
    6.3021, 6.2378, 6.2891, 6.3310, 6.3187, 6.1722, 6.1137, 6.2671, 6.1263,
];

const CYCLE_TIME_PRE_CAP: [f64; REFERENCE_OBSERVATIONS] = [
    1.0199, 0.9977, 1.0288, 0.9880, 1.0186, 0.9883, 1.0078, 1.0079, 0.9220, 1.0260, 1.0348, 0.9972,
    1.0152, 1.020, 0.9973, 1.0256, 1.0200, 1.0450, 1.0123, 1.0150, 1.0190,
];

const DOWNTIME_DURATION_DIE_ATTACH: [f64; REFERENCE_OBSERVATIONS] = [
    2241.0, 3190.0, 2845.0, 3986.0, 4097.0, 3967.0, 2988.0, 3990.0, 4010.0, 3720.0, 2899.0,
    2690.0, 2477.0, 3320.0, 3966.0, 4210.0, 3277.0, 3547.0, 4177.0, 4091.0, 2851.0,
];

const DOWNTIME_DURATION_WIRE_BOND: [f64; REFERENCE_OBSERVATIONS] = [
    1599.0, 1987.0, 2366.0, 1822.0, 1769.0, 2544.0, 1479.0, 2265.0, 2740.0, 1608.0, 1790.0,
    2011.0, 2390.0, 2700.0, 2541.0, 1922.0, 2410.0, 2180.0, 2419.0, 2655.0, 2399.0,
];

const DOWNTIME_FREQUENCY_DIE_ATTACH: [f64; REFERENCE_OBSERVATIONS] = [
    1601.0, 2067.0, 1339.0, 1845.0, 1937.0, 2080.0, 2065.0, 1205.0, 1580.0, 1945.0, 1540.0,
    1766.0, 2010.0, 2087.0, 2019.0, 1579.0, 1368.0, 1392.0, 1752.0, 2180.0, 1611.0,
];

const DOWNTIME_FREQUENCY_WIRE_BOND: [f64; REFERENCE_OBSERVATIONS] = [
    1790.0, 1544.0, 1988.0, 1756.0, 2147.0, 2079.0, 1655.0, 1742.0, 1823.0, 2009.0, 1990.0,
    2080.0, 1590.0, 1630.0, 1762.0, 1934.0, 2076.0, 1855.0, 1988.0, 1628.0, 2070.0,
];

const SETUP_TIME_DIE_ATTACH: [f64; REFERENCE_OBSERVATIONS] = [
    3867.0, 3099.0, 5427.0, 4635.0, 4906.0, 3782.0, 3056.0, 4932.0, 5109.0, 3550.0, 5742.0,
    5230.0, 4480.0, 5020.0, 5564.0, 5716.0, 4288.0, 4399.0, 4980.0, 5927.0, 3899.0,
];

const SETUP_TIME_WIRE_BOND: [f64; REFERENCE_OBSERVATIONS] = [
    2613.0, 2561.0, 1762.0, 2611.0, 2701.0, 1677.0, 1577.0, 2430.0, 2054.0, 2689.0, 2090.0,
    2190.0, 1988.0, 1420.0, 1436.0, 1788.0, 1867.0, 2090.0, 1645.0, 2654.0, 2017.0,
];

const TOTAL_MACHINE_TIME: [f64; REFERENCE_OBSERVATIONS] = [
    994433.0, 992858.0, 979236.0, 980697.0, 981625.0, 980148.0, 993847.0, 975787.0, 975532.0,
    984679.0, 977745.0, 979935.0, 984775.0, 981757.0, 993745.0, 994579.0, 1002224.0, 999328.0,
    994918.0, 994747.0, 1005139.0,
];

const OUTPUT: [f64; REFERENCE_OBSERVATIONS] = [
    72902.0, 91956.0, 92674.0, 82019.0, 80998.0, 92276.0, 76479.0, 90772.0, 78789.0, 80136.0,
    89995.0, 75844.0, 72967.0, 79716.0, 81412.0, 72110.0, 90693.0, 70974.0, 72538.0, 78620.0,
    92051.0,
];

/// Published column for `quantity`
pub fn reference_quantity(quantity: NamedQuantity) -> &'static [f64] {
    match quantity {
        NamedQuantity::CycleTimeWireBond => &CYCLE_TIME_WIRE_BOND,
        NamedQuantity::CycleTimeDieAttach => &CYCLE_TIME_DIE_ATTACH,
        NamedQuantity::CycleTimePreCap => &CYCLE_TIME_PRE_CAP,
        NamedQuantity::DowntimeDurationDieAttach => &DOWNTIME_DURATION_DIE_ATTACH,
        NamedQuantity::DowntimeDurationWireBond => &DOWNTIME_DURATION_WIRE_BOND,
        NamedQuantity::DowntimeFrequencyDieAttach => &DOWNTIME_FREQUENCY_DIE_ATTACH,
        NamedQuantity::DowntimeFrequencyWireBond => &DOWNTIME_FREQUENCY_WIRE_BOND,
        NamedQuantity::SetupTimeDieAttach => &SETUP_TIME_DIE_ATTACH,
        NamedQuantity::SetupTimeWireBond => &SETUP_TIME_WIRE_BOND,
    }
}

/// Published productive machine time column (Ttotal)
pub fn reference_total_machine_time() -> &'static [f64] {
    &TOTAL_MACHINE_TIME
}

/// Published output column (Om)
pub fn reference_output() -> &'static [f64] {
    &OUTPUT
}
