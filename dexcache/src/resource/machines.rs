use serde::{Deserialize, Serialize};

use super::common::NamedApiResource;

/// `/machine/<id>`: a TM or HM in one version group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Machine {
    /// Upstream ID.
    pub id: u32,
    /// The TM or HM item.
    pub item: NamedApiResource,
    /// Move it teaches.
    #[serde(rename = "move")]
    pub move_: NamedApiResource,
    /// Version group the machine exists in.
    pub version_group: NamedApiResource,
}

resource!(Machine => Machine, unnamed);
