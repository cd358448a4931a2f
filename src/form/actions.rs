use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "op")]
pub enum FormCommand {
    Set {
        path: String,
        #[serde(default)]
        value: Value,
    },
    AddEntry,
    RemoveEntry {
        index: usize,
    },
    Submit,
    Reset,
}
