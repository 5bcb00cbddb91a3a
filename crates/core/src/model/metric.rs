use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum CalcType {
    Sum,
    Avg,
}

impl CalcType {
    pub fn from_stored(raw: Option<i64>) -> Option<Self> {
        match raw {
            Some(0) => Some(Self::Sum),
            Some(1) => Some(Self::Avg),
            _ => None,
        }
    }

    pub fn as_stored(self) -> i64 {
        match self {
            Self::Sum => 0,
            Self::Avg => 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Metric {
    pub id: i64,
    pub name: String,
    pub suffix: Option<String>,
    pub calc_type: Option<CalcType>,
    pub places: u32,
}

impl Metric {
    // Unset and unrecognized calc types both aggregate as SUM.
    pub fn calc(&self) -> CalcType {
        self.calc_type.unwrap_or(CalcType::Sum)
    }
}
