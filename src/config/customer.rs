use serde::{Deserialize, Serialize};

/// The person an order is billed to.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct Customer {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}
