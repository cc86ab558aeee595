//! Enumeration types for the assembly line simulator
//!
//! This module contains the enumeration types used throughout the simulator,
//! including the named physical quantities of the line, their distribution
//! families, the experiments that can be run, and report output formats.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Distribution family a bounded sampler draws from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DistributionKind {
    /// Normal distribution centred on the range midpoint
    Normal,
    /// Exponential distribution shifted to start at the range minimum
    Exponential,
}

impl fmt::Display for DistributionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DistributionKind::Normal => write!(f, "Normal"),
            DistributionKind::Exponential => write!(f, "Exponential"),
        }
    }
}

/// Machine stages of the modelled assembly line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MachineStage {
    /// Die attach machines
    DieAttach,
    /// Wire bond machines
    WireBond,
    /// Pre-cap inspection machines
    PreCap,
}

impl fmt::Display for MachineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MachineStage::DieAttach => write!(f, "Die Attach"),
            MachineStage::WireBond => write!(f, "Wire Bond"),
            MachineStage::PreCap => write!(f, "Pre-Cap Inspection"),
        }
    }
}

/// The nine stochastic quantities that drive one factory evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum NamedQuantity {
    /// Cycle time, wire bond (CTwb)
    CycleTimeWireBond,
    /// Cycle time, die attach (CTda)
    CycleTimeDieAttach,
    /// Cycle time, pre-cap inspection (CTpc)
    CycleTimePreCap,
    /// Downtime duration, die attach (DDda)
    DowntimeDurationDieAttach,
    /// Downtime duration, wire bond (DDwb)
    DowntimeDurationWireBond,
    /// Downtime frequency, die attach (DFda)
    DowntimeFrequencyDieAttach,
    /// Downtime frequency, wire bond (DFwb)
    DowntimeFrequencyWireBond,
    /// Setup time, die attach (STda)
    SetupTimeDieAttach,
    /// Setup time, wire bond (STwb)
    SetupTimeWireBond,
}

impl NamedQuantity {
    /// Number of named quantities
    pub const COUNT: usize = 9;

    /// All quantities in draw order
    pub const ALL: [NamedQuantity; NamedQuantity::COUNT] = [
        NamedQuantity::CycleTimeWireBond,
        NamedQuantity::CycleTimeDieAttach,
        NamedQuantity::CycleTimePreCap,
        NamedQuantity::DowntimeDurationDieAttach,
        NamedQuantity::DowntimeDurationWireBond,
        NamedQuantity::DowntimeFrequencyDieAttach,
        NamedQuantity::DowntimeFrequencyWireBond,
        NamedQuantity::SetupTimeDieAttach,
        NamedQuantity::SetupTimeWireBond,
    ];

    /// Position of this quantity in [`NamedQuantity::ALL`]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Distribution family this quantity is sampled from
    pub fn distribution(self) -> DistributionKind {
        match self {
            NamedQuantity::CycleTimeWireBond
            | NamedQuantity::CycleTimeDieAttach
            | NamedQuantity::CycleTimePreCap => DistributionKind::Normal,
            _ => DistributionKind::Exponential,
        }
    }

    /// Machine stage this quantity belongs to
    pub fn stage(self) -> MachineStage {
        match self {
            NamedQuantity::CycleTimeDieAttach
            | NamedQuantity::DowntimeDurationDieAttach
            | NamedQuantity::DowntimeFrequencyDieAttach
            | NamedQuantity::SetupTimeDieAttach => MachineStage::DieAttach,
            NamedQuantity::CycleTimePreCap => MachineStage::PreCap,
            _ => MachineStage::WireBond,
        }
    }

    /// Short code used in the reference study tables
    pub fn code(self) -> &'static str {
        match self {
            NamedQuantity::CycleTimeWireBond => "CTWB",
            NamedQuantity::CycleTimeDieAttach => "CTDA",
            NamedQuantity::CycleTimePreCap => "CTPC",
            NamedQuantity::DowntimeDurationDieAttach => "DDDA",
            NamedQuantity::DowntimeDurationWireBond => "DDWB",
            NamedQuantity::DowntimeFrequencyDieAttach => "DFDA",
            NamedQuantity::DowntimeFrequencyWireBond => "DFWB",
            NamedQuantity::SetupTimeDieAttach => "STDA",
            NamedQuantity::SetupTimeWireBond => "STWB",
        }
    }
}

impl fmt::Display for NamedQuantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self {
            NamedQuantity::CycleTimeWireBond
            | NamedQuantity::CycleTimeDieAttach
            | NamedQuantity::CycleTimePreCap => "Cycle Time",
            NamedQuantity::DowntimeDurationDieAttach | NamedQuantity::DowntimeDurationWireBond => {
                "Downtime Duration"
            }
            NamedQuantity::DowntimeFrequencyDieAttach
            | NamedQuantity::DowntimeFrequencyWireBond => "Downtime Frequency",
            NamedQuantity::SetupTimeDieAttach | NamedQuantity::SetupTimeWireBond => "Setup Time",
        };
        write!(f, "{} {}", kind, self.stage())
    }
}

impl FromStr for NamedQuantity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NamedQuantity::ALL
            .iter()
            .copied()
            .find(|quantity| quantity.code().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Unknown quantity code: {}", s))
    }
}

/// Experiments the simulator can run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExperimentKind {
    /// Experiment 1: compare simulated statistics against the literature tables
    Validation,
    /// Experiment 2: factories needed to meet one year's production target
    AnnualCapacity,
    /// Experiment 3: factories to build each year to keep up with output growth
    GrowthPlan,
}

impl ExperimentKind {
    /// All experiments in execution order
    pub const ALL: [ExperimentKind; 3] =
        [ExperimentKind::Validation, ExperimentKind::AnnualCapacity, ExperimentKind::GrowthPlan];

    /// Experiment number as used on the command line
    pub fn number(self) -> u8 {
        match self {
            ExperimentKind::Validation => 1,
            ExperimentKind::AnnualCapacity => 2,
            ExperimentKind::GrowthPlan => 3,
        }
    }
}

impl fmt::Display for ExperimentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExperimentKind::Validation => write!(f, "Experiment 1 - model validation"),
            ExperimentKind::AnnualCapacity => write!(f, "Experiment 2 - annual capacity"),
            ExperimentKind::GrowthPlan => write!(f, "Experiment 3 - growth plan"),
        }
    }
}

/// Output format for experiment reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// JSON document
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "Text"),
            OutputFormat::Json => write!(f, "JSON"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}
