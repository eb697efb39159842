use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckInMode {
    #[default]
    Office,
    Mission,
}

impl Display for CheckInMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            CheckInMode::Office => write!(f, "office"),
            CheckInMode::Mission => write!(f, "mission"),
        }
    }
}
