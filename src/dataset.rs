//! Two-input logic gate truth tables used as training sets.

use std::fmt;
use std::str::FromStr;

use crate::error::ParseGateError;

/// One `(input, target)` training pair.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub input: Vec<f64>,
    pub target: Vec<f64>,
}

impl Sample {
    pub fn new(input: Vec<f64>, target: Vec<f64>) -> Sample {
        Sample { input, target }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Gate {
    And,
    Or,
    Nand,
    Nor,
    #[default]
    Xor,
}

impl Gate {
    pub const ALL: [Gate; 5] = [Gate::And, Gate::Or, Gate::Nand, Gate::Nor, Gate::Xor];

    pub fn eval(&self, a: bool, b: bool) -> bool {
        match self {
            Gate::And => a && b,
            Gate::Or => a || b,
            Gate::Nand => !(a && b),
            Gate::Nor => !(a || b),
            Gate::Xor => a ^ b,
        }
    }

    /// Truth table in the order (0,0), (0,1), (1,0), (1,1).
    pub fn samples(&self) -> Vec<Sample> {
        [(false, false), (false, true), (true, false), (true, true)]
            .into_iter()
            .map(|(a, b)| {
                let bit = |v: bool| if v { 1.0 } else { 0.0 };
                Sample::new(vec![bit(a), bit(b)], vec![bit(self.eval(a, b))])
            })
            .collect()
    }

    pub fn name(&self) -> &'static str {
        match self {
            Gate::And => "and",
            Gate::Or => "or",
            Gate::Nand => "nand",
            Gate::Nor => "nor",
            Gate::Xor => "xor",
        }
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Gate {
    type Err = ParseGateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        Gate::ALL
            .into_iter()
            .find(|g| g.name() == lower)
            .ok_or_else(|| ParseGateError(s.to_string()))
    }
}
