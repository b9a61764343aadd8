use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoStaticStr};

/// Tag of a [`Value`](crate::values::Value) variant, used in diagnostics and
/// by the comparison engine's pairing table.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, IntoStaticStr,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Number,
    Precise,
    Complex,
    Quantity,
    Boolean,
    Null,
    Text,
    Collection,
}
