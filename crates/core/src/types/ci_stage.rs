use crate::errors::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the fixed stages of a pipeline, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CiStage {
    Build,
    Test,
    Report,
}

impl CiStage {
    /// Every stage, in the order stages are displayed and rolled up
    pub const ALL: [CiStage; 3] = [CiStage::Build, CiStage::Test, CiStage::Report];

    pub fn as_str(&self) -> &'static str {
        match self {
            CiStage::Build => "build",
            CiStage::Test => "test",
            CiStage::Report => "report",
        }
    }

    /// Position of the stage within [`CiStage::ALL`]
    pub fn index(&self) -> usize {
        match self {
            CiStage::Build => 0,
            CiStage::Test => 1,
            CiStage::Report => 2,
        }
    }
}

impl fmt::Display for CiStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CiStage {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CiStage::ALL
            .into_iter()
            .find(|stage| stage.as_str() == s)
            .ok_or_else(|| {
                Error::configuration(format!(
                    "unknown CI stage '{s}' (expected one of build, test, report)"
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_order_is_fixed() {
        let names: Vec<_> = CiStage::ALL.iter().map(CiStage::as_str).collect();
        assert_eq!(names, ["build", "test", "report"]);
        for (i, stage) in CiStage::ALL.iter().enumerate() {
            assert_eq!(stage.index(), i);
        }
    }

    #[test]
    fn test_parse_stage() {
        assert_eq!("test".parse::<CiStage>().unwrap(), CiStage::Test);
        assert!("deploy".parse::<CiStage>().is_err());
    }

    #[test]
    fn test_serde_tokens() {
        assert_eq!(serde_json::to_string(&CiStage::Report).unwrap(), "\"report\"");
        let stage: CiStage = serde_json::from_str("\"build\"").unwrap();
        assert_eq!(stage, CiStage::Build);
    }
}
